//! Location and invocation of the `go` binary.

use std::env;
use std::env::consts::EXE_SUFFIX;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::Error;
use crate::Result;


/// The flag requesting that the compiler print its inlining (and escape
/// analysis) decisions as part of the build.
const INLINE_DIAG_FLAG: &str = "--gcflags=-m";


/// Determine the path of the `go` executable to invoke.
///
/// The toolchain's own installation, as identified by `GOROOT`, takes
/// precedence. The compiled-in default root the toolchain itself falls
/// back to is not observable from here, so absent `GOROOT` the lookup
/// is deferred to `PATH`.
fn go_binary() -> PathBuf {
    let go = format!("go{EXE_SUFFIX}");
    match env::var_os("GOROOT") {
        Some(goroot) => Path::new(&goroot).join("bin").join(go),
        None => PathBuf::from(go),
    }
}


/// Format the command line for a diagnostic build of `pkg_path`, for
/// use in trace events and error messages.
fn format_command(go: &Path, pkg_path: &str) -> String {
    format!("{} build {INLINE_DIAG_FLAG} {pkg_path}", go.display())
}


/// Run the given `go` executable against `pkg_path` with inlining
/// diagnostics enabled, capturing the combined stdout and stderr.
fn run_build(go: &Path, pkg_path: &str) -> Result<String> {
    let command = format_command(go, pkg_path);
    debug!("running `{command}`");

    let output = Command::new(go)
        .args(["build", INLINE_DIAG_FLAG, pkg_path])
        .output()
        .map_err(|err| Error::Spawn {
            command: command.clone(),
            source: err,
        })?;

    // The compiler emits -m diagnostics on stderr; combine both streams
    // so callers see everything the build printed.
    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        return Err(Error::Build {
            command,
            status: output.status,
            output: combined,
        })
    }
    Ok(combined)
}


/// Run `go build` against `pkg_path` with inlining diagnostics enabled.
///
/// The subprocess inherits the caller's working directory and
/// environment; `pkg_path` is handed to the build tool unvalidated. A
/// non-zero exit or a failure to launch is an error carrying the
/// captured output, because a broken build is outside what the inlining
/// check verifies.
pub(crate) fn build_with_inline_diagnostics(pkg_path: &str) -> Result<String> {
    run_build(&go_binary(), pkg_path)
}


#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;


    /// Check that `GOROOT` determines where the binary is looked up.
    #[test]
    fn binary_resolution() {
        // Environment variables are process global state; restrict this
        // test to reading, not setting, to stay parallel safe.
        let go = go_binary();
        match env::var_os("GOROOT") {
            Some(goroot) => {
                assert!(go.starts_with(goroot), "{}", go.display());
            }
            None => {
                assert_eq!(go, PathBuf::from(format!("go{EXE_SUFFIX}")));
            }
        }
    }

    /// Exercise the command line rendering used in errors and traces.
    #[test]
    fn command_formatting() {
        let command = format_command(Path::new("/goroot/bin/go"), "./...");
        assert_eq!(command, "/goroot/bin/go build --gcflags=-m ./...");
    }

    /// Make sure that a non-existent executable surfaces as a spawn
    /// error naming the full command line.
    #[test]
    fn spawn_failure() {
        let goroot = tempfile::tempdir().unwrap();
        let go = goroot.path().join("bin").join(format!("go{EXE_SUFFIX}"));

        let err = run_build(&go, ".").unwrap_err();
        match err {
            Error::Spawn { ref command, .. } => {
                assert!(command.contains("build --gcflags=-m ."), "{command}");
            }
            _ => panic!("unexpected error: {err:?}"),
        }
    }
}
