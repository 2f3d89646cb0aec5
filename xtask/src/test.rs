//! xtask test — run every test target per crate and feature set.
//!
//! Each suite is a separate `cargo test` invocation so a failure in one
//! crate never hides the results of the others. Every `test result:` line
//! of every suite is added to the running totals.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Kind {
    Unit,
    Integration,
    Doc,
}

struct Suite {
    label: &'static str,
    kind: Kind,
    args: &'static [&'static str],
}

const SUITES: &[Suite] = &[
    Suite {
        label: "eve-specs (serde)",
        kind: Kind::Unit,
        args: &["test", "-p", "eve-specs", "--lib", "--features", "serde,std"],
    },
    Suite {
        label: "platform transport + FakeEve",
        kind: Kind::Unit,
        args: &["test", "-p", "platform", "--lib", "--features", "std"],
    },
    Suite {
        label: "eve-driver (no logging)",
        kind: Kind::Unit,
        args: &["test", "-p", "eve-driver", "--lib"],
    },
    Suite {
        label: "eve-driver (std + tracing)",
        kind: Kind::Unit,
        args: &["test", "-p", "eve-driver", "--lib", "--features", "std,tracing"],
    },
    Suite {
        label: "xtask",
        kind: Kind::Unit,
        args: &["test", "-p", "xtask"],
    },
    Suite {
        label: "eve-specs timing properties",
        kind: Kind::Integration,
        args: &["test", "-p", "eve-specs", "--test", "*", "--features", "serde,std"],
    },
    Suite {
        label: "platform SPI transactions",
        kind: Kind::Integration,
        args: &["test", "-p", "platform", "--test", "*"],
    },
    Suite {
        label: "eve-driver init, ring and framing",
        kind: Kind::Integration,
        args: &["test", "-p", "eve-driver", "--test", "*"],
    },
    Suite {
        label: "doc examples",
        kind: Kind::Doc,
        args: &[
            "test",
            "--doc",
            "-p",
            "eve-specs",
            "-p",
            "platform",
            "-p",
            "eve-driver",
        ],
    },
];

/// Counts summed over every `test result:` line seen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Tally {
    passed: u32,
    failed: u32,
    ignored: u32,
}

impl Tally {
    /// Add the counts of every `test result:` line in `output`.
    fn add_output(&mut self, output: &str) {
        for line in output.lines() {
            let Some(result) = line.split("test result:").nth(1) else {
                continue;
            };
            for part in result.split(';') {
                let words: Vec<&str> = part.split_whitespace().collect();
                for pair in words.windows(2) {
                    let [count, what] = pair else { continue };
                    let Ok(count) = count.parse::<u32>() else {
                        continue;
                    };
                    match *what {
                        "passed" => self.passed = self.passed.saturating_add(count),
                        "failed" => self.failed = self.failed.saturating_add(count),
                        "ignored" => self.ignored = self.ignored.saturating_add(count),
                        _ => {}
                    }
                }
            }
        }
    }

    fn add(&mut self, other: Tally) {
        self.passed = self.passed.saturating_add(other.passed);
        self.failed = self.failed.saturating_add(other.failed);
        self.ignored = self.ignored.saturating_add(other.ignored);
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} passed, {} failed, {} ignored",
            self.passed, self.failed, self.ignored
        )
    }
}

fn selected(kind: Kind, unit_only: bool, integration_only: bool) -> bool {
    match kind {
        Kind::Unit => !integration_only,
        Kind::Integration => !unit_only,
        Kind::Doc => !unit_only && !integration_only,
    }
}

pub fn run(unit_only: bool, integration_only: bool) -> Result<()> {
    println!();
    println!("{}", "🧪 Running tests...".cyan().bold());
    println!();

    let total_start = Instant::now();
    let mut total = Tally::default();
    let mut failed_suites = Vec::new();

    for suite in SUITES
        .iter()
        .filter(|s| selected(s.kind, unit_only, integration_only))
    {
        println!("{}", format!("  Testing {}...", suite.label).cyan());
        let start = Instant::now();

        let output = Command::new("cargo")
            .args(suite.args)
            .output()
            .with_context(|| format!("Failed to run cargo for {}", suite.label))?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        let mut tally = Tally::default();
        tally.add_output(&stdout);
        total.add(tally);

        if output.status.success() {
            println!(
                "{}",
                format!(
                    "  ✓ {} ({}) in {:.2}s",
                    suite.label,
                    tally,
                    start.elapsed().as_secs_f64()
                )
                .green()
            );
        } else if suite.kind == Kind::Doc {
            eprintln!("{}", format!("  ⚠ {} failed", suite.label).yellow().bold());
        } else {
            eprintln!("{}", format!("  ✗ {} failed ({})", suite.label, tally).red().bold());
            for line in stdout.lines().filter(|l| l.ends_with("FAILED") || l.starts_with("----")) {
                eprintln!("    {}", line);
            }
            if tally == Tally::default() {
                // Nothing ran: usually a build error.
                eprintln!("{}", String::from_utf8_lossy(&output.stderr));
            }
            failed_suites.push(suite.label);
        }
        println!();
    }

    if !failed_suites.is_empty() {
        anyhow::bail!(
            "{} suite(s) failed: {} [{}]",
            failed_suites.len(),
            failed_suites.join(", "),
            total
        );
    }

    println!(
        "{}",
        format!(
            "✓ All tests completed ({}) in {:.2}s",
            total,
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_sums_every_result_line() {
        let output = "\
running 3 tests
test result: ok. 3 passed; 0 failed; 1 ignored; 0 measured; 0 filtered out; finished in 0.01s

running 2 tests
test init::tests::test_plan ... FAILED
test result: FAILED. 1 passed; 1 failed; 0 ignored; 0 measured; 0 filtered out; finished in 0.00s
";
        let mut tally = Tally::default();
        tally.add_output(output);
        assert_eq!(
            tally,
            Tally {
                passed: 4,
                failed: 1,
                ignored: 1
            }
        );
    }

    #[test]
    fn test_tally_ignores_other_lines() {
        let mut tally = Tally::default();
        tally.add_output("running 0 tests\n12 passed in a comment\n");
        assert_eq!(tally, Tally::default());
    }

    #[test]
    fn test_suite_selection() {
        assert!(selected(Kind::Unit, true, false));
        assert!(!selected(Kind::Integration, true, false));
        assert!(!selected(Kind::Doc, true, false));
        assert!(selected(Kind::Integration, false, true));
        assert!(selected(Kind::Doc, false, false));
    }
}
