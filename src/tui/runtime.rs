//! The interactive session: terminal setup, the tokio event loop and teardown.

use std::io::{self, stdout};

use crossterm::event::{Event, EventStream};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::{Stream, StreamExt};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{info, trace};

use super::app::App;
use super::command::Command;
use super::error::AppError;
use super::message::Message;

/// Runs `app` until it quits. The terminal is restored on every exit path,
/// including errors from the loop itself.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn run(mut app: App) -> Result<(), AppError> {
    enable_raw_mode()?;
    undo_on_error(|| execute!(stdout(), EnterAlternateScreen), restore_terminal)?;
    let result = session(&mut app);
    let restore_result = restore_terminal();
    result.and(restore_result.map_err(Into::into))
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn session(app: &mut App) -> Result<(), AppError> {
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run_loop(&mut terminal, app, EventStream::new()));
    // In-flight probe calls are abandoned rather than awaited.
    runtime.shutdown_background();
    result
}

/// Leaves raw mode and the alternate screen. Safe to call more than once.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn restore_terminal() -> Result<(), io::Error> {
    let raw_result = disable_raw_mode();
    let screen_result = execute!(stdout(), LeaveAlternateScreen);
    raw_result.and(screen_result)
}

/// Runs `step`; if it fails, runs `undo` before handing back the step's error.
fn undo_on_error(
    step: impl FnOnce() -> io::Result<()>,
    undo: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    step().inspect_err(|_| {
        let _ = undo();
    })
}

/// Draw, wait for the next terminal event or effect result, update, repeat.
///
/// Effects are spawned as detached tasks whose messages come back through a
/// single channel, so `app` is only ever touched from this loop.
pub async fn run_loop<B, S>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut events: S,
) -> Result<(), AppError>
where
    B: Backend,
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    let (tx, mut rx) = mpsc::unbounded_channel();

    let size = terminal.size()?;
    info!(width = size.width, height = size.height, "session started");
    let resize = app.update(Message::Resize {
        width: size.width,
        height: size.height,
    });
    dispatch(resize, &tx);
    if dispatch(app.init(), &tx) {
        return Ok(());
    }

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        let msg = tokio::select! {
            event = events.next() => match event {
                Some(Ok(event)) => match Message::from_event(event) {
                    Some(msg) => msg,
                    None => continue,
                },
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(msg) = rx.recv() => msg,
        };

        trace!(?msg, "message");
        if dispatch(app.update(msg), &tx) {
            break;
        }
    }

    info!("session ended");
    Ok(())
}

/// Spawns the command's effects and reports whether it asked to quit.
fn dispatch(cmd: Command, tx: &UnboundedSender<Message>) -> bool {
    let (effects, quit) = cmd.into_parts();
    for effect in effects {
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Some(msg) = effect.await {
                // The loop has exited once the receiver is gone.
                let _ = tx.send(msg);
            }
        });
    }
    quit
}
