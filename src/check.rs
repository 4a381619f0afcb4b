//! Reconciliation of expected against observed inlinable symbols.

use std::collections::HashSet;

use crate::capability::Skip;


/// The substring marking a compiler synthesized closure symbol (e.g.
/// `(*Conn).writeFrame.func1`). Such symbols are never part of explicit
/// expectations and are dropped from the report entirely.
const CLOSURE_MARKER: &str = ".func";


/// The result of reconciling an expectation list against the set of
/// symbols the compiler reported as inlinable.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CheckReport {
    /// Expected symbols the compiler no longer considers inlinable.
    missing: Vec<String>,
    /// Inlinable symbols that were not expected, with synthesized
    /// closure symbols filtered out.
    extra: Vec<String>,
}

impl CheckReport {
    /// Whether every expected symbol was observed.
    ///
    /// Extra inlinable symbols never fail a check.
    #[inline]
    pub fn passed(&self) -> bool {
        self.missing.is_empty()
    }

    /// Retrieve the expected symbols that are no longer inlinable, in
    /// expectation-list order.
    #[inline]
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    /// Retrieve the inlinable symbols that were not expected, sorted.
    ///
    /// These are informational only; they surface opportunities to
    /// broaden the expectation list.
    #[inline]
    pub fn extra(&self) -> &[String] {
        &self.extra
    }
}


/// The overall outcome of an inlining check.
#[derive(Clone, Debug)]
pub enum Outcome {
    /// The environment cannot support the check; nothing was verified.
    Skipped(Skip),
    /// The build ran and the expectation list was reconciled.
    Checked(CheckReport),
}


/// Reconcile the expectation list against the observed set.
///
/// Every expectation is processed in order, so all misses are surfaced
/// together instead of stopping at the first. An observed symbol
/// accounts for at most one expectation entry.
pub(crate) fn reconcile(expected: &[&str], mut observed: HashSet<String>) -> CheckReport {
    let mut missing = Vec::new();
    for want in expected {
        if !observed.remove(*want) {
            missing.push((*want).to_string());
        }
    }

    let mut extra = observed
        .into_iter()
        .filter(|symbol| !symbol.contains(CLOSURE_MARKER))
        .collect::<Vec<_>>();
    // The set has no inherent order; sort for stable reporting.
    let () = extra.sort();

    CheckReport { missing, extra }
}
