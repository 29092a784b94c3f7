//! Discovery of the local Nix installation: version, configuration, host
//! environment and flake outputs.

mod error;
mod flake;
mod info;
mod probe;
mod version;

pub use error::ProbeError;
pub use flake::{FlakeOutputGroup, FlakeOutputs};
pub use info::{HostEnv, NixConfig, NixInfo, OsKind};
pub use probe::{NixProbe, SystemProbe};
pub use version::NixVersion;
