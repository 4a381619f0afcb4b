//! Parsing of the compiler's textual inlining diagnostics.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;


/// Retrieve the pattern matching a single inlining decision.
///
/// The wording is owned by the Go toolchain and treated as an opaque
/// contract; the symbol is whatever whitespace-delimited token follows
/// the marker phrase.
fn inline_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| {
        Regex::new(r" can inline (\S+)").expect("inlining marker pattern is valid")
    })
}


/// Extract the set of symbols the compiler reported as inlinable from
/// the build's diagnostic output.
///
/// Duplicate reports collapse into a single membership entry and no
/// ordering is preserved.
pub(crate) fn parse_inlinable(output: &str) -> HashSet<String> {
    let inlinable = inline_marker()
        .captures_iter(output)
        .map(|caps| caps[1].to_string())
        .collect::<HashSet<_>>();

    if inlinable.is_empty() && !output.trim().is_empty() {
        // Zero matches on non-empty output most likely means the
        // toolchain changed its diagnostic wording, which would
        // otherwise fail every expectation without a clear signal.
        warn!("no inlining diagnostics found in `go build` output");
    }
    inlinable
}


#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;


    const SAMPLE_OUTPUT: &str = r#"# example.com/mask
./mask.go:10:6: can inline maskBytes
./mask.go:24:6: can inline newMaskKey
./mask.go:24:6: can inline newMaskKey
./mask.go:31:6: cannot inline applyMask: function too complex
./mask.go:40:6: can inline (*Conn).writeFrame.func1
./mask.go:55:14: inlining call to maskBytes
./mask.go:60:2: moved to heap: buf
"#;


    /// Make sure that every marked symbol lands in the observed set,
    /// with duplicates collapsed.
    #[test]
    fn sample_output_parsing() {
        let observed = parse_inlinable(SAMPLE_OUTPUT);
        let expected = ["maskBytes", "newMaskKey", "(*Conn).writeFrame.func1"]
            .into_iter()
            .map(ToString::to_string)
            .collect::<HashSet<_>>();
        assert_eq!(observed, expected);
    }

    /// Check the exact two-line example from the diagnostic contract.
    #[test]
    fn two_symbol_parsing() {
        let output = " can inline foo.Bar\n can inline foo.Baz\n";
        let observed = parse_inlinable(output);
        assert_eq!(observed.len(), 2);
        assert!(observed.contains("foo.Bar"));
        assert!(observed.contains("foo.Baz"));
    }

    /// Unrelated output must not contribute symbols.
    #[test]
    fn unrelated_output() {
        let observed = parse_inlinable("./mask.go:31:6: cannot inline applyMask\n");
        assert_eq!(observed, HashSet::new());
    }

    /// Empty output parses to an empty set without complaint.
    #[test]
    fn empty_output() {
        let observed = parse_inlinable("");
        assert_eq!(observed, HashSet::new());
    }
}
