//! Background loads. Each returns a [`Command`] whose effect runs the probe on
//! the blocking pool and resolves to `Loaded` or `LoadFailed`.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::command::Command;
use super::message::{LoadError, LoadKind, Message, Payload};
use crate::nix::{ProbeError, SystemProbe};

/// Runs the probe's diagnostics. Needs a fresh [`NixInfo`](crate::nix::NixInfo)
/// first, so an info failure fails the health load too.
pub fn health(probe: Arc<dyn SystemProbe>) -> Command {
    spawn(LoadKind::Health, move || {
        let info = probe.fetch_info()?;
        Ok(Payload::Health(probe.run_diagnostics(&info)))
    })
}

pub fn info(probe: Arc<dyn SystemProbe>) -> Command {
    spawn(LoadKind::Info, move || {
        Ok(Payload::Info(Box::new(probe.fetch_info()?)))
    })
}

pub fn flake(probe: Arc<dyn SystemProbe>) -> Command {
    spawn(LoadKind::Flake, move || Ok(Payload::Flake(probe.flake_outputs()?)))
}

fn spawn<F>(kind: LoadKind, job: F) -> Command
where
    F: FnOnce() -> Result<Payload, ProbeError> + Send + 'static,
{
    info!(%kind, "load dispatched");
    Command::perform(async move {
        let started = Instant::now();
        let outcome = match tokio::task::spawn_blocking(job).await {
            Ok(Ok(payload)) => Ok(payload),
            Ok(Err(e)) => Err(LoadError::new(kind, e)),
            Err(join) => Err(LoadError::new(kind, join)),
        };
        debug!(%kind, elapsed_ms = started.elapsed().as_millis() as u64, "load finished");
        Some(match outcome {
            Ok(payload) => Message::Loaded(payload),
            Err(e) => {
                warn!(%kind, error = %e.message, "load failed");
                Message::LoadFailed(e)
            }
        })
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use crate::health::{Check, CheckResult, NamedCheck};
    use crate::nix::{
        FlakeOutputGroup, FlakeOutputs, NixInfo, NixVersion, ProbeError, SystemProbe,
    };

    /// In-memory probe. Each `fail_*` flag turns the matching call into an
    /// error; `calls` records the order of probe calls.
    #[derive(Default)]
    pub struct FakeProbe {
        pub fail_info: bool,
        pub fail_flake: bool,
        pub calls: Mutex<Vec<&'static str>>,
    }

    impl FakeProbe {
        pub fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    pub fn info() -> NixInfo {
        NixInfo {
            version: NixVersion::new(2, 18, 1),
            ..NixInfo::default()
        }
    }

    pub fn checks() -> Vec<NamedCheck> {
        vec![NamedCheck::new(
            "flake-enabled",
            Check {
                title: "Flakes Enabled".into(),
                info: "experimental-features = flakes nix-command".into(),
                result: CheckResult::Green,
                required: true,
            },
        )]
    }

    pub fn outputs() -> FlakeOutputs {
        FlakeOutputs {
            groups: vec![FlakeOutputGroup {
                name: "packages".into(),
                attrs: vec!["x86_64-linux.default".into()],
            }],
        }
    }

    impl SystemProbe for FakeProbe {
        fn fetch_info(&self) -> Result<NixInfo, ProbeError> {
            self.calls.lock().unwrap().push("info");
            if self.fail_info {
                return Err(ProbeError::Version("nix not found".into()));
            }
            Ok(info())
        }

        fn run_diagnostics(&self, _info: &NixInfo) -> Vec<NamedCheck> {
            self.calls.lock().unwrap().push("diagnostics");
            checks()
        }

        fn flake_outputs(&self) -> Result<FlakeOutputs, ProbeError> {
            self.calls.lock().unwrap().push("flake");
            if self.fail_flake {
                return Err(ProbeError::Version("no flake.nix".into()));
            }
            Ok(outputs())
        }
    }
}
