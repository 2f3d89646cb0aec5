//! xtask panel — show what initialization programs for a panel.
//!
//! The profile comes from the shipped table (`--name`) or a JSON panel
//! configuration (`--config`). Configurations are validated before any
//! register value is derived from them.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use eve_driver::init::panel_register_plan;
use eve_driver::{InitConfig, RegisterWidth, RegisterWrite};
use eve_specs::{displays, PanelConfig, PanelProfile};
use serde::Serialize;
use serde_json::{json, Value};

/// Where the profile comes from.
pub enum Source<'a> {
    Name(&'a str),
    Config(&'a Path),
}

pub fn run(source: &Source<'_>, as_json: bool) -> Result<()> {
    let config;
    let profile = match source {
        Source::Name(name) => *displays::by_name(name).with_context(|| {
            let known: Vec<&str> = displays::ALL.iter().map(|p| p.name).collect();
            format!("unknown panel '{name}' (known: {})", known.join(", "))
        })?,
        Source::Config(path) => {
            config = load_config(path)?;
            config
                .profile()
                .with_context(|| format!("invalid panel configuration {}", path.display()))?
        }
    };

    let init = InitConfig::default();
    if as_json {
        println!("{}", serde_json::to_string_pretty(&report(&profile, &init)?)?);
    } else {
        print_report(&profile, &init)?;
    }
    Ok(())
}

/// Read and validate a JSON panel configuration.
pub(crate) fn load_config(path: &Path) -> Result<PanelConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: PanelConfig = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid panel timing in {}", path.display()))?;
    Ok(config)
}

/// Unit variant name as serde spells it.
fn variant<T: Serialize>(value: T) -> Result<String> {
    Ok(match serde_json::to_value(value)? {
        Value::String(s) => s,
        other => other.to_string(),
    })
}

fn width_name(width: RegisterWidth) -> &'static str {
    match width {
        RegisterWidth::U8 => "u8",
        RegisterWidth::U16 => "u16",
        RegisterWidth::U32 => "u32",
    }
}

fn write_json(w: &RegisterWrite) -> Value {
    json!({
        "register": w.name,
        "address": format!("{:#08x}", w.address),
        "value": w.value,
        "width": width_name(w.width),
    })
}

pub(crate) fn report(profile: &PanelProfile<'_>, init: &InitConfig) -> Result<Value> {
    let plan: Vec<Value> = panel_register_plan(profile, init)
        .iter()
        .map(write_json)
        .collect();
    let pin_drive = profile
        .pin_drive
        .iter()
        .map(|entry| {
            Ok(json!({
                "pin": variant(entry.pin)?,
                "strength": variant(entry.strength)?,
                "param": entry.raw(),
            }))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(json!({
        "name": profile.name,
        "chip": profile.chip_id.name(),
        "clock_source": variant(profile.clock_source)?,
        "clock_select": profile.clock_select.raw(),
        "refresh_millihertz": profile.refresh_millihertz(),
        "registers": plan,
        "pin_drive": pin_drive,
    }))
}

fn print_report(profile: &PanelProfile<'_>, init: &InitConfig) -> Result<()> {
    println!();
    println!("{}", format!("🖥  {}", profile.name).cyan().bold());
    println!(
        "   chip {}  clock {} ×{:#04x}  {}×{}",
        profile.chip_id.name(),
        variant(profile.clock_source)?,
        profile.clock_select.raw(),
        profile.hsize,
        profile.vsize,
    );
    match profile.refresh_millihertz() {
        Some(mhz) => println!("   refresh ≈ {}.{:03} Hz", mhz / 1000, mhz % 1000),
        None => println!("   {}", "refresh: pixel clock off".yellow()),
    }
    println!();

    println!("{}", "  Register writes".cyan());
    for w in panel_register_plan(profile, init).iter() {
        println!(
            "    {:<10} {}  {:>10}  {}",
            w.name,
            format!("{:#08x}", w.address).dimmed(),
            w.value,
            width_name(w.width).dimmed(),
        );
    }
    println!();

    if profile.pin_drive.is_empty() {
        println!("{}", "  No pin drive overrides".dimmed());
    } else {
        println!("{}", "  Pin drive (PINDRIVE host commands)".cyan());
        for entry in profile.pin_drive {
            println!(
                "    {:<12} {:<8} {}",
                variant(entry.pin)?,
                variant(entry.strength)?,
                format!("{:#04x}", entry.raw()).dimmed(),
            );
        }
    }
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eve_specs::displays::{CFA480128, CFA800480};
    use std::io::Write;

    #[test]
    fn test_report_lists_plan_and_pins() {
        let value = report(&CFA800480, &InitConfig::default()).unwrap();
        assert_eq!(value["chip"], "BT817");
        assert_eq!(value["clock_source"], "External");
        assert_eq!(value["registers"][0]["register"], "FREQUENCY");
        assert_eq!(value["registers"][0]["value"], 72_000_000);
        assert_eq!(value["pin_drive"].as_array().unwrap().len(), 22);
        assert_eq!(value["pin_drive"][7]["param"], 0x2E);
    }

    #[test]
    fn test_report_without_pin_drive() {
        let value = report(&CFA480128, &InitConfig::default()).unwrap();
        assert!(value["pin_drive"].as_array().unwrap().is_empty());
        assert_eq!(value["registers"][0]["register"], "PCLK");
    }

    #[test]
    fn test_config_file_is_validated() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "name": "bad", "timing": {{
                "width": 0, "h_front_porch": 1, "h_sync_width": 1,
                "h_back_porch": 1, "h_padding": 0,
                "height": 272, "v_front_porch": 1, "v_sync_width": 1,
                "v_back_porch": 1, "v_padding": 0, "pclk": 5 }} }}"#
        )
        .unwrap();
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid panel timing"));
    }

    #[test]
    fn test_config_file_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "name": "bench", "chip_id": "Bt815", "timing": {{
                "width": 480, "h_front_porch": 8, "h_sync_width": 4,
                "h_back_porch": 43, "h_padding": 0,
                "height": 272, "v_front_porch": 8, "v_sync_width": 4,
                "v_back_porch": 12, "v_padding": 0, "pclk": 5 }} }}"#
        )
        .unwrap();
        let config = load_config(file.path()).unwrap();
        let profile = config.profile().unwrap();
        assert_eq!(profile.hsize, 480);
        let value = report(&profile, &InitConfig::default()).unwrap();
        assert_eq!(value["name"], "bench");
        assert_eq!(value["chip"], "BT815");
    }
}
