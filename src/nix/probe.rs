use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use tracing::debug;

use super::error::ProbeError;
use super::flake::FlakeOutputs;
use super::info::{HostEnv, NixConfig, NixInfo, OsKind};
use super::version::NixVersion;
use crate::health::{self, HealthConfig, NamedCheck};

/// The external collaborators the dashboard loads its data from.
///
/// Methods block; callers run them off the event loop.
pub trait SystemProbe: Send + Sync {
    /// Gathers version, configuration and host environment.
    fn fetch_info(&self) -> Result<NixInfo, ProbeError>;

    /// Runs the full diagnostic suite against an info snapshot.
    fn run_diagnostics(&self, info: &NixInfo) -> Vec<NamedCheck>;

    /// Lists the outputs of the configured flake.
    fn flake_outputs(&self) -> Result<FlakeOutputs, ProbeError>;
}

/// [`SystemProbe`] backed by the `nix` CLI.
#[derive(Debug, Clone)]
pub struct NixProbe {
    health: HealthConfig,
    flake: PathBuf,
}

impl NixProbe {
    pub fn new(health: HealthConfig, flake: impl Into<PathBuf>) -> Self {
        Self {
            health,
            flake: flake.into(),
        }
    }
}

impl SystemProbe for NixProbe {
    fn fetch_info(&self) -> Result<NixInfo, ProbeError> {
        let version: NixVersion = run("nix", &["--version"])?.parse()?;
        let config = NixConfig::from_json(&run("nix", &["show-config", "--json"])?)?;
        Ok(NixInfo {
            version,
            config,
            env: detect_env(),
        })
    }

    fn run_diagnostics(&self, info: &NixInfo) -> Vec<NamedCheck> {
        health::run_all(&self.health, info)
    }

    fn flake_outputs(&self) -> Result<FlakeOutputs, ProbeError> {
        let flake = self.flake.to_string_lossy();
        let json = run("nix", &["flake", "show", "--json", flake.as_ref()])?;
        Ok(FlakeOutputs::from_json(&json)?)
    }
}

/// Runs a program to completion and returns its stdout.
fn run(program: &str, args: &[&str]) -> Result<String, ProbeError> {
    let command = std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");
    let started = Instant::now();
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| ProbeError::Spawn {
            command: command.clone(),
            source,
        })?;
    debug!(%command, status = %output.status, elapsed_ms = started.elapsed().as_millis() as u64, "ran command");

    if !output.status.success() {
        return Err(ProbeError::Exit {
            command,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    String::from_utf8(output.stdout).map_err(|_| ProbeError::Utf8(command))
}

fn detect_env() -> HostEnv {
    let groups = run("id", &["-Gn"])
        .map(|out| out.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default();
    HostEnv {
        user: env::var("USER").unwrap_or_default(),
        groups,
        os: detect_os(env::consts::OS),
        arch: env::consts::ARCH.to_string(),
        shell: env::var("SHELL").ok(),
    }
}

fn detect_os(os: &str) -> OsKind {
    match os {
        "linux" if Path::new("/etc/NIXOS").exists() => OsKind::NixOs,
        "linux" => OsKind::Linux,
        "macos" if Path::new("/run/current-system/darwin-version").exists() => OsKind::NixDarwin,
        "macos" => OsKind::MacOs,
        other => OsKind::Other(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_captures_stdout() {
        let out = run("echo", &["hello"]).unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[test]
    fn run_reports_missing_program() {
        let err = run("definitely-not-a-real-binary-omnix", &[]).unwrap_err();
        assert!(matches!(err, ProbeError::Spawn { .. }));
        assert!(err.to_string().contains("definitely-not-a-real-binary-omnix"));
    }

    #[test]
    fn run_reports_failed_exit() {
        let err = run("false", &[]).unwrap_err();
        assert!(matches!(err, ProbeError::Exit { .. }));
    }

    #[test]
    fn unknown_os_is_kept_verbatim() {
        assert_eq!(detect_os("freebsd"), OsKind::Other("freebsd".into()));
    }

    #[test]
    fn diagnostics_use_configured_minimum() {
        let probe = NixProbe::new(
            HealthConfig {
                min_nix_version: "3.0.0".into(),
                required_caches: vec![],
                ..HealthConfig::default()
            },
            ".",
        );
        let checks = probe.run_diagnostics(&NixInfo::default());
        let version = checks
            .iter()
            .find(|c| c.name == "supported-nix-versions")
            .unwrap();
        assert!(!version.check.result.is_green());
    }
}
