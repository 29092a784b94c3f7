//! Nix health diagnostics: check types, verdict aggregation and the checks themselves.

mod check;
mod checks;

pub use check::{Check, CheckResult, NamedCheck, Verdict};
pub use checks::{HealthConfig, run_all};
