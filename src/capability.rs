//! Checking whether the current environment supports running `go build`.

use std::env;
use std::env::consts::OS;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;


/// The environment variable callers use to force additional compiler
/// flags into every `go build` invocation. The inlining check injects
/// `--gcflags` itself, so the two cannot be combined.
pub const GCFLAGS_OVERRIDE_VAR: &str = "GO_GCFLAGS";

/// Operating systems on which `go build` cannot be run, because they
/// lack subprocess or build support.
const UNSUPPORTED_OS: &[&str] = &["android", "ios", "js"];


/// The reason an inlining check could not be run.
///
/// A skip is distinct from a failure: it means the check could not be
/// performed in this environment, not that an expected symbol stopped
/// being inlinable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Skip {
    reason: String,
}

impl Skip {
    /// Retrieve the human-readable reason for the skip.
    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl Display for Skip {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.reason)
    }
}


/// A snapshot of the environment facts that decide whether `go build`
/// can be invoked.
///
/// The descriptor is a plain value so that the decision logic can be
/// exercised deterministically, independent of the real process
/// environment. Use [`BuildCapability::current`] for the real thing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuildCapability {
    /// The value of [`GCFLAGS_OVERRIDE_VAR`], if set to a non-empty
    /// string.
    gcflags_override: Option<String>,
    /// The host operating system identifier.
    os: String,
}

impl BuildCapability {
    /// Create a descriptor from explicit values.
    ///
    /// An empty `gcflags_override` counts as unset, mirroring how the
    /// environment variable is interpreted.
    pub fn new(gcflags_override: Option<&str>, os: &str) -> Self {
        Self {
            gcflags_override: gcflags_override
                .filter(|flags| !flags.is_empty())
                .map(ToString::to_string),
            os: os.to_string(),
        }
    }

    /// Capture a descriptor from the real process environment.
    pub fn current() -> Self {
        Self::new(env::var(GCFLAGS_OVERRIDE_VAR).ok().as_deref(), OS)
    }

    /// Check whether `go build` may be invoked in the described
    /// environment, reporting the reason if not.
    pub fn ensure_usable(&self) -> Result<(), Skip> {
        if self.gcflags_override.is_some() {
            return Err(Skip {
                reason: format!(
                    "'go build' not compatible with setting ${GCFLAGS_OVERRIDE_VAR}"
                ),
            })
        }

        if UNSUPPORTED_OS.contains(&self.os.as_str()) {
            return Err(Skip {
                reason: format!("'go build' not available on {}", self.os),
            })
        }
        Ok(())
    }
}
