use std::fmt;

use serde::Deserialize;

use super::version::NixVersion;

/// A single entry of `nix show-config --json`; only the effective value is kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
struct ConfigValue<T> {
    value: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
struct RawConfig {
    #[serde(default)]
    experimental_features: ConfigValue<Vec<String>>,
    #[serde(default)]
    system: ConfigValue<String>,
    #[serde(default)]
    substituters: ConfigValue<Vec<String>>,
    #[serde(default)]
    trusted_users: ConfigValue<Vec<String>>,
    #[serde(default)]
    max_jobs: ConfigValue<u32>,
    #[serde(default)]
    cores: ConfigValue<u32>,
}

/// The subset of the Nix configuration shown on the Info screen and
/// consumed by the health checks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NixConfig {
    pub experimental_features: Vec<String>,
    pub system: String,
    pub substituters: Vec<String>,
    pub trusted_users: Vec<String>,
    pub max_jobs: u32,
    pub cores: u32,
}

impl NixConfig {
    /// Decodes the output of `nix show-config --json`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: RawConfig = serde_json::from_str(json)?;
        Ok(Self {
            experimental_features: raw.experimental_features.value,
            system: raw.system.value,
            substituters: raw.substituters.value,
            trusted_users: raw.trusted_users.value,
            max_jobs: raw.max_jobs.value,
            cores: raw.cores.value,
        })
    }

    /// Returns `true` if the named experimental feature is enabled.
    pub fn has_feature(&self, feature: &str) -> bool {
        self.experimental_features.iter().any(|f| f == feature)
    }
}

/// Operating system flavour Nix runs on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OsKind {
    NixOs,
    NixDarwin,
    MacOs,
    #[default]
    Linux,
    Other(String),
}

impl OsKind {
    /// Where a user would change their Nix settings on this OS.
    pub fn nix_config_label(&self) -> &'static str {
        match self {
            Self::NixOs => "nixos configuration",
            Self::NixDarwin => "nix-darwin configuration",
            _ => "/etc/nix/nix.conf",
        }
    }
}

#[mutants::skip]
impl fmt::Display for OsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NixOs => f.write_str("NixOS"),
            Self::NixDarwin => f.write_str("macOS (nix-darwin)"),
            Self::MacOs => f.write_str("macOS"),
            Self::Linux => f.write_str("Linux"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// The host environment Nix operates in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostEnv {
    pub user: String,
    pub groups: Vec<String>,
    pub os: OsKind,
    pub arch: String,
    /// `$SHELL`, if set.
    pub shell: Option<String>,
}

/// Everything known about the local Nix installation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NixInfo {
    pub version: NixVersion,
    pub config: NixConfig,
    pub env: HostEnv,
}

#[mutants::skip]
impl fmt::Display for NixInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nix {} on {}", self.version, self.env.os)
    }
}
