#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::sync::Arc;

use omnix_tui::config::Config;
use omnix_tui::logging;
use omnix_tui::nix::NixProbe;
use omnix_tui::tui::{self, App, runtime};

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = runtime::restore_terminal();
        original_hook(info);
    }));

    let config = Config::load()?;
    let log_path = logging::init(&config.log_filter)?;
    tracing::info!(log = %log_path.display(), flake = %config.flake.display(), "starting");

    let probe = Arc::new(NixProbe::new(config.health.clone(), config.flake.clone()));
    let app = App::new(probe, &config);
    tui::run(app)?;
    Ok(())
}
