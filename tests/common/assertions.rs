//! Domain-specific assertions for kal harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that say which
//! output invariant was violated.

use std::collections::BTreeMap;

/// Assert that CSV output starts with exactly the header line.
#[macro_export]
macro_rules! assert_header {
    ($output:expr) => {{
        let output: &str = &$output;
        let first = output.lines().next();
        if first != Some(kal_core::HEADER) {
            panic!(
                "assert_header! failed:\n  expected first line: {:?}\n  actual first line:   {:?}",
                kal_core::HEADER,
                first
            );
        }
    }};
}

/// Data rows of CSV output (everything after the header).
pub fn data_rows(output: &str) -> Vec<String> {
    output.lines().skip(1).map(str::to_string).collect()
}

/// Count occurrences of each row.
pub fn multiset(rows: &[String]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for row in rows {
        *counts.entry(row.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Assert two row collections are equal ignoring order but not multiplicity.
pub fn assert_same_rows(actual: &[String], expected: &[String]) {
    pretty_assertions::assert_eq!(
        multiset(actual),
        multiset(expected),
        "output rows differ from expected rows (order ignored)"
    );
}
