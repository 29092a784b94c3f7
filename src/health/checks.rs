//! Individual diagnostics run against a [`NixInfo`] snapshot.

use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use super::check::{Check, CheckResult, NamedCheck};
use crate::nix::{NixInfo, NixVersion, OsKind};

const DEFAULT_MIN_NIX_VERSION: NixVersion = NixVersion::new(2, 16, 0);

/// Present once Rosetta 2 has been installed on Apple Silicon.
const ROSETTA_RUNTIME: &str = "/Library/Apple/usr/libexec/oah/libRosettaRuntime";

/// Tunables for the diagnostic suite.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HealthConfig {
    /// Oldest supported Nix release, e.g. `2.16.0`.
    pub min_nix_version: String,
    /// Substituters that must be configured.
    pub required_caches: Vec<String>,
    /// Run the trusted-users check. Off by default: becoming a trusted user
    /// grants root-equivalent access to the Nix daemon.
    pub trusted_users: bool,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            min_nix_version: DEFAULT_MIN_NIX_VERSION.to_string(),
            required_caches: vec!["https://cache.nixos.org".to_string()],
            trusted_users: false,
        }
    }
}

impl HealthConfig {
    /// The parsed minimum version; an unparseable value falls back to the default.
    pub fn min_version(&self) -> NixVersion {
        self.min_nix_version.parse().unwrap_or_else(|e| {
            warn!(value = %self.min_nix_version, error = %e, "ignoring invalid min-nix-version");
            DEFAULT_MIN_NIX_VERSION
        })
    }
}

/// Runs every check in display order. Platform-specific and disabled checks
/// are left out rather than reported green.
pub fn run_all(config: &HealthConfig, info: &NixInfo) -> Vec<NamedCheck> {
    let env = &info.env;
    let mut checks = vec![flake_enabled(info), nix_version(info, config.min_version())];
    checks.extend(rosetta(
        &env.os,
        &env.arch,
        Path::new(ROSETTA_RUNTIME).exists(),
    ));
    if config.trusted_users {
        checks.push(trusted_users(info));
    }
    checks.push(caches(info, &config.required_caches));
    checks.push(direnv(which("direnv").is_some()));
    checks.extend(homebrew(&env.os, which("brew").is_some()));
    checks.extend(shell(env.shell.as_deref()));
    checks
}

pub fn flake_enabled(info: &NixInfo) -> NamedCheck {
    let config = &info.config;
    let result = if config.has_feature("flakes") && config.has_feature("nix-command") {
        CheckResult::Green
    } else {
        CheckResult::Red {
            message: "Nix flakes are not enabled".to_string(),
            suggestion: "See https://nixos.wiki/wiki/Flakes#Enable_flakes".to_string(),
        }
    };
    NamedCheck::new(
        "flake-enabled",
        Check {
            title: "Flakes Enabled".to_string(),
            info: format!(
                "experimental-features = {}",
                config.experimental_features.join(" ")
            ),
            result,
            required: true,
        },
    )
}

pub fn nix_version(info: &NixInfo, min: NixVersion) -> NamedCheck {
    let current = info.version;
    let result = if current >= min {
        CheckResult::Green
    } else {
        CheckResult::Red {
            message: format!(
                "Your Nix version ({current}) doesn't satisfy the supported bounds: >={min}"
            ),
            suggestion:
                "To use a specific version of Nix, see <https://nixos.asia/en/howto/nix-package>"
                    .to_string(),
        }
    };
    NamedCheck::new(
        "supported-nix-versions",
        Check {
            title: "Nix Version is supported".to_string(),
            info: format!("nix version = {current}"),
            result,
            required: true,
        },
    )
}

pub fn caches(info: &NixInfo, required: &[String]) -> NamedCheck {
    let configured: Vec<&str> = info
        .config
        .substituters
        .iter()
        .map(|s| normalize_url(s))
        .collect();
    let missing: Vec<&str> = required
        .iter()
        .map(String::as_str)
        .filter(|r| !configured.contains(&normalize_url(r)))
        .collect();

    let result = if missing.is_empty() {
        CheckResult::Green
    } else {
        CheckResult::Red {
            message: format!("You are missing some required caches: {}", missing.join(" ")),
            suggestion: format!(
                "Caches can be added in your {} (see https://nixos.wiki/wiki/Binary_Cache#Using_a_binary_cache)",
                info.env.os.nix_config_label()
            ),
        }
    };
    NamedCheck::new(
        "caches",
        Check {
            title: "Nix Caches in use".to_string(),
            info: format!("substituters = {}", info.config.substituters.join(" ")),
            result,
            required: true,
        },
    )
}

/// Only reported on Apple Silicon Macs.
pub fn rosetta(os: &OsKind, arch: &str, installed: bool) -> Option<NamedCheck> {
    if !is_macos(os) || arch != "aarch64" {
        return None;
    }
    let result = if installed {
        CheckResult::Green
    } else {
        CheckResult::Red {
            message: "Rosetta 2 is not installed".to_string(),
            suggestion: "Install Rosetta 2 with: softwareupdate --install-rosetta".to_string(),
        }
    };
    Some(NamedCheck::new(
        "rosetta",
        Check {
            title: "Rosetta 2".to_string(),
            info: "Required for running x86_64 binaries on Apple Silicon".to_string(),
            result,
            required: false,
        },
    ))
}

/// Green when the user, one of their `@group`s, or `*` is a trusted user.
pub fn trusted_users(info: &NixInfo) -> NamedCheck {
    let user = &info.env.user;
    let trusted = &info.config.trusted_users;
    let is_trusted = trusted.iter().any(|entry| match entry.strip_prefix('@') {
        Some(group) => info.env.groups.iter().any(|g| g == group),
        None => entry == "*" || entry == user,
    });

    let result = if is_trusted {
        CheckResult::Green
    } else {
        let suggestion = match info.env.os {
            OsKind::NixOs | OsKind::NixDarwin => format!(
                "Add 'nix.settings.trusted-users = [ \"root\" \"{user}\" ];' to your {}",
                info.env.os.nix_config_label()
            ),
            _ => format!(
                "Set 'trusted-users = root {user}' in /etc/nix/nix.conf and then restart the Nix daemon using `sudo pkill nix-daemon`"
            ),
        };
        CheckResult::Red {
            message: format!("User '{user}' not present in trusted-users"),
            suggestion,
        }
    };
    NamedCheck::new(
        "trusted-users",
        Check {
            title: "Trusted Users".to_string(),
            info: format!("trusted-users = {}", trusted.join(" ")),
            result,
            required: true,
        },
    )
}

pub fn direnv(installed: bool) -> NamedCheck {
    let result = if installed {
        CheckResult::Green
    } else {
        CheckResult::Red {
            message: "direnv is not installed".to_string(),
            suggestion: "Install direnv from https://direnv.net/".to_string(),
        }
    };
    NamedCheck::new(
        "direnv",
        Check {
            title: "Direnv".to_string(),
            info: "direnv provides automatic directory-specific environments".to_string(),
            result,
            required: false,
        },
    )
}

/// Only reported on macOS.
pub fn homebrew(os: &OsKind, installed: bool) -> Option<NamedCheck> {
    if !is_macos(os) {
        return None;
    }
    let result = if installed {
        CheckResult::Green
    } else {
        CheckResult::Red {
            message: "Homebrew is not installed".to_string(),
            suggestion: "Install Homebrew from https://brew.sh/".to_string(),
        }
    };
    Some(NamedCheck::new(
        "homebrew",
        Check {
            title: "Homebrew".to_string(),
            info: "Homebrew package manager for macOS".to_string(),
            result,
            required: false,
        },
    ))
}

/// Skipped entirely when `$SHELL` is unset.
pub fn shell(shell: Option<&str>) -> Option<NamedCheck> {
    let shell = shell.filter(|s| !s.is_empty())?;
    Some(NamedCheck::new(
        "shell",
        Check {
            title: "Shell Configuration".to_string(),
            info: format!("SHELL = {shell}"),
            result: CheckResult::Green,
            required: false,
        },
    ))
}

fn is_macos(os: &OsKind) -> bool {
    matches!(os, OsKind::MacOs | OsKind::NixDarwin)
}

fn normalize_url(url: &str) -> &str {
    url.trim_end_matches('/')
}

/// Looks a binary up on `$PATH`.
fn which(binary: &str) -> Option<PathBuf> {
    let path = env::var_os("PATH")?;
    env::split_paths(&path)
        .map(|dir| dir.join(binary))
        .find(|candidate| candidate.is_file())
}
