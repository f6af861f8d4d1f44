//! Waveform production for generated hardware descriptions
//!
//! A [`WaveformProducer`] turns Verilog text into a simulation log and a set
//! of sampled signals. [`simulate_best_effort`] never fails: when the
//! producer errors, the waveform is derived from the truth table instead.

pub mod icarus;
pub mod synthetic;
pub mod vcd;

pub use icarus::{IcarusSimulator, SimulatorConfig};

use crate::error::{Error, Result};
use crate::render::HardwareModule;
use crate::truth_table::TruthTable;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One sampled signal; `times` and `values` always have the same length
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub times: Vec<u64>,
    pub values: Vec<u8>,
    pub name: String,
}

impl Signal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            times: Vec::new(),
            values: Vec::new(),
            name: name.into(),
        }
    }

    pub fn push(&mut self, time: u64, value: u8) {
        self.times.push(time);
        self.values.push(value);
    }

    /// Value held at `time`: the last change at or before it, 0 before the first
    pub fn value_at(&self, time: u64) -> u8 {
        self.times
            .iter()
            .zip(&self.values)
            .take_while(|(t, _)| **t <= time)
            .last()
            .map(|(_, v)| *v)
            .unwrap_or(0)
    }
}

/// Signals keyed by name
pub type Waveform = BTreeMap<String, Signal>;

/// What a producer hands back after a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationOutput {
    /// Combined simulator stdout and stderr
    pub log: String,
    pub waveform: Waveform,
}

/// Anything that can simulate Verilog text
pub trait WaveformProducer {
    fn simulate(&self, code: &str) -> Result<SimulationOutput>;
}

/// Producer that never runs anything; every request takes the fallback path
#[derive(Debug, Clone, Copy, Default)]
pub struct Disabled;

impl WaveformProducer for Disabled {
    fn simulate(&self, _code: &str) -> Result<SimulationOutput> {
        Err(Error::Simulation("simulator disabled".into()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationStatus {
    Simulated,
    Fallback,
}

/// Outcome of [`simulate_best_effort`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub status: SimulationStatus,
    pub log: String,
    pub waveform: Waveform,
}

impl SimulationReport {
    pub fn is_fallback(&self) -> bool {
        self.status == SimulationStatus::Fallback
    }
}

/// Run `producer` on the module, falling back to a truth-table waveform on any failure
pub fn simulate_best_effort(
    producer: &dyn WaveformProducer,
    module: &HardwareModule,
    table: &TruthTable,
) -> SimulationReport {
    match producer.simulate(&module.code) {
        Ok(output) => {
            info!("simulation produced {} signals", output.waveform.len());
            SimulationReport {
                status: SimulationStatus::Simulated,
                log: output.log,
                waveform: output.waveform,
            }
        }
        Err(e) => {
            warn!("simulation failed, using fallback waveform: {}", e);
            SimulationReport {
                status: SimulationStatus::Fallback,
                log: format!("Simulation completed with fallback waveform data\n{}", e),
                waveform: synthetic::from_truth_table(
                    table,
                    &module.inputs,
                    &module.output,
                    module.step_delay,
                ),
            }
        }
    }
}
