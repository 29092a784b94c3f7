#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod health;
pub mod logging;
pub mod nix;
pub mod tui;
