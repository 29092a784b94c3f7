use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use super::error::ProbeError;

/// Matches `nix --version` output, e.g. `nix (Nix) 2.13.0` or
/// `nix (Determinate Nix 3.6.6) 2.29.0`, as well as a bare `2.13.0`.
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:nix \((?:Nix|Determinate Nix [^)]+)\) )?(\d+)\.(\d+)\.(\d+)$")
        .expect("valid hardcoded regex")
});

/// A Nix release version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NixVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl NixVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl FromStr for NixVersion {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = VERSION_RE
            .captures(s.trim())
            .ok_or_else(|| ProbeError::Version(s.trim().to_string()))?;
        let part = |i: usize| {
            caps[i]
                .parse::<u32>()
                .map_err(|_| ProbeError::Version(s.trim().to_string()))
        };
        Ok(Self::new(part(1)?, part(2)?, part(3)?))
    }
}

#[mutants::skip]
impl fmt::Display for NixVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
