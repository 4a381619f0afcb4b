use std::io;
use std::process::ExitStatus;

use thiserror::Error as ThisError;


/// An error as encountered while invoking the Go toolchain.
///
/// Build failures are not part of what the inlining check verifies, so
/// both variants are fatal to the enclosing check: there is no retry.
#[derive(Debug, ThisError)]
#[non_exhaustive]
pub enum Error {
    /// The `go` executable could not be launched at all.
    #[error("failed to run `{command}`")]
    Spawn {
        /// The command line that failed to launch.
        command: String,
        /// The underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// `go build` ran but exited with a non-zero status.
    #[error("`{command}` reported non-zero exit-status ({status}): {output}")]
    Build {
        /// The command line that was invoked.
        command: String,
        /// The exit status the subprocess reported.
        status: ExitStatus,
        /// The combined stdout and stderr of the subprocess, attached
        /// for diagnosis.
        output: String,
    },
}


/// A result type using our [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;
