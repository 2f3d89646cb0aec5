use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

/// One `cargo` invocation and how to describe it.
struct Step {
    label: &'static str,
    args: &'static [&'static str],
    /// Failure only warns instead of aborting
    advisory: bool,
}

const STEPS: &[Step] = &[
    Step {
        label: "driver on the embedded target (no_std)",
        args: &[
            "check",
            "-p",
            "eve-driver",
            "--target",
            "thumbv7em-none-eabihf",
            "--no-default-features",
        ],
        advisory: false,
    },
    Step {
        label: "driver with defmt logging",
        args: &[
            "check",
            "-p",
            "eve-driver",
            "--target",
            "thumbv7em-none-eabihf",
            "--features",
            "defmt",
        ],
        advisory: false,
    },
    Step {
        label: "driver with tracing on the host",
        args: &["check", "-p", "eve-driver", "--features", "std,tracing"],
        advisory: false,
    },
    Step {
        label: "panel profiles with serde",
        args: &["check", "-p", "eve-specs", "--features", "serde,std"],
        advisory: false,
    },
    Step {
        label: "clippy lints",
        args: &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        advisory: true,
    },
];

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking driver builds...".cyan().bold());
    println!();

    let total_start = Instant::now();

    for step in STEPS {
        println!("{}", format!("  Checking {}...", step.label).cyan());
        let start = Instant::now();

        let output = Command::new("cargo")
            .args(step.args)
            .output()
            .with_context(|| format!("Failed to run cargo for {}", step.label))?;

        if output.status.success() {
            println!(
                "{}",
                format!(
                    "  ✓ {} passed in {:.2}s",
                    step.label,
                    start.elapsed().as_secs_f64()
                )
                .green()
            );
        } else if step.advisory {
            eprintln!("{}", format!("  ⚠ {} reported issues", step.label).yellow().bold());
            eprintln!();
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        } else {
            eprintln!("{}", format!("  ✗ {} failed", step.label).red().bold());
            eprintln!();
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
            anyhow::bail!("Check failed: {}", step.label);
        }
        println!();
    }

    println!("{}", "  Checking code formatting...".cyan());

    let fmt_output = Command::new("cargo")
        .args(["fmt", "--all", "--check"])
        .output()
        .context("Failed to run cargo fmt")?;

    if !fmt_output.status.success() {
        eprintln!("{}", "  ⚠ Formatting issues found".yellow().bold());
        eprintln!("     Run 'cargo fmt --all' to fix");
        // Don't fail on format issues
    } else {
        println!("{}", "  ✓ Formatting check passed".green());
    }
    println!();

    println!(
        "{}",
        format!(
            "✓ All checks completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}
