//! Value Change Dump reader
//!
//! Only what the generated testbench produces is understood: `$var`
//! declarations, `#time` markers and scalar value changes. Vector changes
//! (the loop counter) are skipped. When a name is declared in several scopes
//! the first declaration wins.

use super::{Signal, Waveform};
use crate::error::{Error, Result};
use std::collections::{BTreeSet, HashMap};

/// Parse VCD text and resample every signal onto the union of time points
pub fn parse(text: &str) -> Result<Waveform> {
    let mut codes: HashMap<String, String> = HashMap::new();
    let mut waveform = Waveform::new();
    let mut in_definitions = true;
    let mut time: u64 = 0;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if in_definitions {
            if line.starts_with("$var") {
                declare(line, &mut codes);
            } else if line.starts_with("$enddefinitions") {
                in_definitions = false;
            }
            continue;
        }

        if let Some(stamp) = line.strip_prefix('#') {
            time = stamp
                .parse()
                .map_err(|_| Error::Simulation(format!("Invalid VCD time marker '{}'", line)))?;
            continue;
        }

        let mut chars = line.chars();
        let value = match chars.next() {
            Some('1') => 1,
            Some('0' | 'x' | 'X' | 'z' | 'Z') => 0,
            // vectors, reals and section keywords
            _ => continue,
        };
        if let Some(name) = codes.get(chars.as_str().trim()) {
            waveform
                .entry(name.clone())
                .or_insert_with(|| Signal::new(name.as_str()))
                .push(time, value);
        }
    }

    if waveform.is_empty() {
        return Err(Error::Simulation(
            "VCD dump contained no scalar signal changes".into(),
        ));
    }
    Ok(normalize(waveform))
}

/// `$var wire 1 ! A $end`: register scalar signals only
fn declare(line: &str, codes: &mut HashMap<String, String>) {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 5 || parts[2] != "1" {
        return;
    }
    let (code, name) = (parts[3], parts[4]);
    if codes.values().any(|n| n == name) {
        return;
    }
    codes.insert(code.to_string(), name.to_string());
}

/// Sample every signal at every time any signal changed
pub fn normalize(waveform: Waveform) -> Waveform {
    let times: BTreeSet<u64> = waveform
        .values()
        .flat_map(|s| s.times.iter().copied())
        .collect();

    waveform
        .into_iter()
        .map(|(name, signal)| {
            let mut resampled = Signal::new(name.as_str());
            for &t in &times {
                resampled.push(t, signal.value_at(t));
            }
            (name, resampled)
        })
        .collect()
}
