/// Errors raised while probing the local Nix installation.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// A subprocess could not be spawned.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        /// The command line that was attempted.
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A subprocess exited unsuccessfully.
    #[error("`{command}` exited with {status}: {stderr}")]
    Exit {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// A subprocess wrote output that is not valid UTF-8.
    #[error("`{0}` produced non-UTF-8 output")]
    Utf8(String),

    /// JSON output could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The `nix --version` output did not contain a version.
    #[error("could not parse nix version from {0:?}")]
    Version(String),
}
