//! xtask doc — rustdoc for the library crates with their optional APIs.
//!
//! The serde configuration types and `FakeEve` only exist behind features,
//! so the build enables them. `xtask` itself is left out.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

const PACKAGES: &[&str] = &["eve-specs", "platform", "eve-driver"];

/// `defmt` and `tracing` are excluded: they only change log routing.
const FEATURES: &str = "eve-specs/serde,eve-specs/std,platform/std,eve-driver/std";

fn doc_args(open: bool) -> Vec<&'static str> {
    let mut args = vec!["doc", "--no-deps"];
    for package in PACKAGES {
        args.push("-p");
        args.push(*package);
    }
    args.extend(["--features", FEATURES]);
    if open {
        args.push("--open");
    }
    args
}

/// rustdoc `warning:` lines, minus cargo's trailing "generated N warnings".
fn doc_warnings(stderr: &str) -> Vec<&str> {
    stderr
        .lines()
        .filter(|l| l.starts_with("warning:") && !l.contains("generated"))
        .collect()
}

pub fn run(open: bool) -> Result<()> {
    println!();
    println!("{}", "📚 Building documentation...".cyan().bold());
    println!();

    let start = Instant::now();

    let output = Command::new("cargo")
        .args(doc_args(open))
        .output()
        .context("Failed to build documentation")?;
    let stderr = String::from_utf8_lossy(&output.stderr);

    if !output.status.success() {
        eprintln!("{}", "✗ Documentation build failed".red().bold());
        eprintln!();
        eprintln!("{}", stderr);
        anyhow::bail!("Documentation build failed");
    }

    println!(
        "{}",
        format!(
            "✓ Documentation for {} built in {:.2}s",
            PACKAGES.join(", "),
            start.elapsed().as_secs_f64()
        )
        .green()
    );

    let warnings = doc_warnings(&stderr);
    if !warnings.is_empty() {
        println!(
            "{}",
            format!("  ⚠ {} rustdoc warning(s)", warnings.len()).yellow()
        );
        for w in &warnings {
            println!("    {}", w.dimmed());
        }
    }

    if !open {
        println!();
        for package in PACKAGES {
            println!(
                "   {}",
                format!("target/doc/{}/index.html", package.replace('-', "_")).dimmed()
            );
        }
    }

    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_args_enable_optional_apis() {
        let args = doc_args(false);
        assert_eq!(args.iter().filter(|a| **a == "-p").count(), 3);
        assert!(args.contains(&FEATURES));
        assert!(FEATURES.split(',').any(|f| f == "platform/std"));
        assert!(!args.contains(&"--open"));
        assert!(doc_args(true).ends_with(&["--open"]));
    }

    #[test]
    fn test_doc_warnings_skip_summary() {
        let stderr = "\
 Documenting eve-driver v0.1.0
warning: unresolved link to `Eve::frobnicate`
warning: `eve-driver` (lib doc) generated 1 warning
";
        assert_eq!(
            doc_warnings(stderr),
            ["warning: unresolved link to `Eve::frobnicate`"]
        );
    }
}
