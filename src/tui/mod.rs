//! TUI: app model, commands and messages, event loop, screens, widgets.

pub mod app;
pub mod command;
pub mod error;
pub mod load;
pub mod message;
pub mod runtime;
pub mod screens;
pub mod widgets;

pub use app::{App, Screen};
pub use command::Command;
pub use error::AppError;
pub use message::Message;
pub use runtime::run;
