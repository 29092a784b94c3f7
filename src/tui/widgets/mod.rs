//! Reusable TUI widgets.

pub mod check_list;
pub mod progress;
pub mod spinner;
pub mod status_bar;

pub use check_list::render_check_list;
pub use progress::Progress;
pub use spinner::{Spinner, SpinnerTick, WidgetStatus};
pub use status_bar::{StatusBarContext, draw_status_bar};
