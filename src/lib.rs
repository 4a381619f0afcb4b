//! **inliner-check** verifies that the Go compiler still considers a
//! given set of functions and methods inlinable.
//!
//! The crate is a thin test-support wrapper around
//! `go build --gcflags=-m`: it runs one build with inlining diagnostics
//! enabled, scans the output for `can inline` decisions, and reconciles
//! them against a caller-provided expectation list. Missing symbols fail
//! the check; symbols the compiler inlines beyond the expectations are
//! surfaced as informational notes only.
//!
//! Whether the check can run at all depends on the environment: when
//! `GO_GCFLAGS` forces flags into every build, or the host OS cannot
//! spawn a build at all, the check is skipped instead of failed.
//!
//! ```no_run
//! use inliner_check::assert_inlinable;
//!
//! // Typically invoked from a #[test] in the package under scrutiny.
//! assert_inlinable(".", &["maskBytes", "newMaskKey"]);
//! ```

#![deny(unsafe_code)]

mod capability;
mod check;
mod diag;
mod error;
mod toolchain;

use tracing::info;

pub use crate::capability::BuildCapability;
pub use crate::capability::Skip;
pub use crate::capability::GCFLAGS_OVERRIDE_VAR;
pub use crate::check::CheckReport;
pub use crate::check::Outcome;
pub use crate::error::Error;
pub use crate::error::Result;


/// Check which of the `expected` symbols in the package at `pkg_path`
/// the compiler still considers inlinable.
///
/// The environment is snapshotted via [`BuildCapability::current`]; use
/// [`check_inlining_with`] to supply an explicit descriptor instead.
///
/// # Errors
/// Fails when the build cannot be launched or exits non-zero. Build
/// failures are fatal and carry the full captured output; they are not
/// part of what the check verifies.
pub fn check_inlining(pkg_path: &str, expected: &[&str]) -> Result<Outcome> {
    check_inlining_with(&BuildCapability::current(), pkg_path, expected)
}


/// Check which of the `expected` symbols in the package at `pkg_path`
/// the compiler still considers inlinable, against an explicit
/// environment descriptor.
///
/// # Errors
/// See [`check_inlining`].
pub fn check_inlining_with(
    capability: &BuildCapability,
    pkg_path: &str,
    expected: &[&str],
) -> Result<Outcome> {
    if let Err(skip) = capability.ensure_usable() {
        return Ok(Outcome::Skipped(skip))
    }

    let output = toolchain::build_with_inline_diagnostics(pkg_path)?;
    let observed = diag::parse_inlinable(&output);
    let report = check::reconcile(expected, observed);
    Ok(Outcome::Checked(report))
}


/// Assert that all `expected` symbols in the package at `pkg_path` are
/// still inlinable.
///
/// Intended to be called from a `#[test]`. When the environment cannot
/// support the check the skip reason is printed and the function
/// returns, because a Rust test cannot mark itself skipped at runtime.
/// When one or more expected symbols are no longer inlinable the
/// function panics, listing every one of them. Extra inlinable symbols
/// are emitted as `tracing` events and never fail the assertion.
///
/// # Panics
/// Panics when an expected symbol is no longer inlinable or the build
/// fails.
pub fn assert_inlinable(pkg_path: &str, expected: &[&str]) {
    match check_inlining(pkg_path, expected) {
        Ok(Outcome::Skipped(skip)) => {
            eprintln!("skipping inlining check: {skip}");
        }
        Ok(Outcome::Checked(report)) => {
            for symbol in report.extra() {
                info!("not in expected set, but also inlinable: {symbol:?}");
            }

            if !report.passed() {
                let message = report
                    .missing()
                    .iter()
                    .map(|symbol| format!("{symbol:?} is no longer inlinable"))
                    .collect::<Vec<_>>()
                    .join("\n");
                panic!("{message}");
            }
        }
        Err(err) => panic!("go build: {err}"),
    }
}
