//! Deferred work returned from `update` and executed by the runtime.

use std::fmt;
use std::future::Future;

use futures::FutureExt;
use futures::future::BoxFuture;

use super::message::Message;

/// A unit of async work yielding at most one [`Message`].
pub type Effect = BoxFuture<'static, Option<Message>>;

/// Work for the runtime to carry out after a state transition.
///
/// Effects never touch model state; their only output is the message they
/// resolve to, which the runtime feeds back through `update`.
#[derive(Default)]
pub enum Command {
    /// Nothing to do.
    #[default]
    None,
    /// Stop the event loop.
    Quit,
    /// Run a future off the event loop and deliver its message, if any.
    Perform(Effect),
    /// Several commands at once; no ordering between them.
    Batch(Vec<Command>),
}

impl Command {
    pub fn none() -> Self {
        Self::None
    }

    pub fn quit() -> Self {
        Self::Quit
    }

    pub fn perform<F>(future: F) -> Self
    where
        F: Future<Output = Option<Message>> + Send + 'static,
    {
        Self::Perform(future.boxed())
    }

    /// Combines commands, dropping empty ones. A single survivor is returned
    /// as-is rather than wrapped.
    pub fn batch(commands: impl IntoIterator<Item = Command>) -> Self {
        let mut commands: Vec<Command> = commands.into_iter().filter(|c| !c.is_none()).collect();
        match commands.len() {
            0 => Self::None,
            1 => commands.pop().unwrap_or_default(),
            _ => Self::Batch(commands),
        }
    }

    pub fn is_none(&self) -> bool {
        match self {
            Self::None => true,
            Self::Batch(commands) => commands.iter().all(Self::is_none),
            _ => false,
        }
    }

    /// Returns `true` if this command, or any command in a batch, quits.
    pub fn is_quit(&self) -> bool {
        match self {
            Self::Quit => true,
            Self::Batch(commands) => commands.iter().any(Self::is_quit),
            _ => false,
        }
    }

    /// Number of effects this command would spawn.
    pub fn effect_count(&self) -> usize {
        match self {
            Self::Perform(_) => 1,
            Self::Batch(commands) => commands.iter().map(Self::effect_count).sum(),
            _ => 0,
        }
    }

    /// Flattens into the effects to spawn and whether to quit.
    pub fn into_parts(self) -> (Vec<Effect>, bool) {
        let mut effects = Vec::new();
        let quit = self.collect(&mut effects);
        (effects, quit)
    }

    fn collect(self, effects: &mut Vec<Effect>) -> bool {
        match self {
            Self::None => false,
            Self::Quit => true,
            Self::Perform(effect) => {
                effects.push(effect);
                false
            }
            Self::Batch(commands) => commands
                .into_iter()
                .fold(false, |quit, c| c.collect(effects) || quit),
        }
    }
}

#[mutants::skip]
impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Quit => f.write_str("Quit"),
            Self::Perform(_) => f.write_str("Perform(..)"),
            Self::Batch(commands) => f.debug_list().entries(commands).finish(),
        }
    }
}
