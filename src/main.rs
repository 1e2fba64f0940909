//! freq-specs - line-oriented front end for the frequency spec core
//!
//! Reads one command per line from stdin and prints the resulting fields.
//!
//! ## Command line flags
//!
//! - `--config <path>`: load a JSON config (defaults are used if missing)
//! - `--fs <hz>`: initial sampling frequency (default 1.0)
//!
//! ## Commands
//!
//! ```text
//! active F_SB F_PB     set the active parameters
//! edit F_PB 48e3/4     commit text for a field, in the current unit
//! fs 2000              change the sampling frequency
//! unit kHz             change the display unit
//! sort on|off          toggle ascending ordering
//! lock on|off          toggle keeping absolute frequencies
//! save <path>          write a snapshot
//! load <path>          restore a snapshot
//! show                 print the active fields
//! ```

use std::io::{self, BufRead};
use std::path::Path;

use freq_specs::engine::{FieldStatus, FreqSpecCommand, FreqSpecEvent, FreqSpecs};
use freq_specs::persistence::{self, load_config, FreqSpecsConfig};
use freq_specs::specs::{FreqUnit, SamplingContext};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config = match flag_value(&args, "--config") {
        Some(path) => load_config::<FreqSpecsConfig>(Path::new(path)),
        None => Default::default(),
    };
    let f_s = flag_value(&args, "--fs")
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(1.0);

    let context = match SamplingContext::new(f_s) {
        Ok(context) => context,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };
    let mut specs = FreqSpecs::new(config, context);
    log::info!("freq-specs starting up (f_S = {} Hz)", f_s);

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("error: {}", e);
                break;
            }
        };
        if let Err(e) = run_line(&mut specs, line.trim()) {
            eprintln!("error: {}", e);
        }
        for event in specs.drain_events() {
            print_event(&event);
        }
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn run_line(specs: &mut FreqSpecs, line: &str) -> Result<(), String> {
    let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match keyword {
        "" => return Ok(()),
        "show" => return show(specs),
        "save" => {
            return persistence::save_to_file(&specs.snapshot(), Path::new(rest))
                .map_err(|e| e.to_string());
        }
        "load" => {
            let snapshot = persistence::load_from_file(Path::new(rest)).map_err(|e| e.to_string())?;
            specs.restore(&snapshot).map_err(|e| e.to_string())?;
            return show(specs);
        }
        "active" => FreqSpecCommand::UpdateActiveSet {
            names: rest.split_whitespace().map(str::to_string).collect(),
            status: FieldStatus::Normal,
        },
        "edit" => {
            let (name, text) = rest
                .split_once(char::is_whitespace)
                .ok_or("usage: edit <name> <value>")?;
            let previous = specs
                .query_display_value(name, true)
                .map_err(|e| e.to_string())?;
            FreqSpecCommand::CommitEdit {
                name: name.to_string(),
                raw_text: text.to_string(),
                previous_raw_text: previous,
            }
        }
        "fs" => FreqSpecCommand::SamplingFrequencyChanged(
            rest.parse().map_err(|_| format!("invalid sampling frequency: {}", rest))?,
        ),
        "unit" => FreqSpecCommand::UnitChanged(rest.parse::<FreqUnit>().map_err(|e| e.to_string())?),
        "sort" => FreqSpecCommand::SetSortEnabled(on_off(rest)?),
        "lock" => FreqSpecCommand::SetFreqLocked(on_off(rest)?),
        other => return Err(format!("unknown command: {}", other)),
    };

    specs.apply(command).map_err(|e| e.to_string())?;
    show(specs)
}

fn on_off(text: &str) -> Result<bool, String> {
    match text {
        "on" => Ok(true),
        "off" => Ok(false),
        _ => Err(format!("expected on/off, got '{}'", text)),
    }
}

fn show(specs: &FreqSpecs) -> Result<(), String> {
    let rows = specs.display_rows().map_err(|e| e.to_string())?;
    println!("Frequency Specs {}", specs.unit_caption());
    for row in rows {
        println!("  {:<8} {:>12}  [{:?}]", row.label, row.text, row.status);
    }
    Ok(())
}

fn print_event(event: &FreqSpecEvent) {
    match event {
        FreqSpecEvent::SpecsChanged => {}
        FreqSpecEvent::EditRejected {
            name, restore_text, ..
        } => println!("  {} restored to {}", name, restore_text),
        FreqSpecEvent::Warning(warning) => println!("  warning: {}", warning.message()),
    }
}
