//! Icarus Verilog runner
//!
//! Compiles with `iverilog`, runs the result with `vvp` inside a temporary
//! directory, then reads the VCD the testbench dumped there. Each subprocess
//! is killed once it exceeds the configured timeout.

use super::{vcd, SimulationOutput, WaveformProducer};
use crate::error::{Error, Result};
use log::debug;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::sync::OnceLock;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const SOURCE_FILE: &str = "design.v";
const COMPILED_FILE: &str = "design.vvp";
const DEFAULT_DUMP_FILE: &str = "waveform.vcd";
const POLL_INTERVAL: Duration = Duration::from_millis(10);

static DUMPFILE: OnceLock<Regex> = OnceLock::new();

fn dumpfile_pattern() -> &'static Regex {
    DUMPFILE.get_or_init(|| {
        Regex::new(r#"\$dumpfile\s*\(\s*"([^"]+)"\s*\)"#).expect("dumpfile pattern is valid")
    })
}

/// External simulator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Try the external simulator at all; when false the fallback waveform is always used
    pub enabled: bool,
    /// Compiler binary
    pub iverilog: String,
    /// Runtime binary
    pub vvp: String,
    /// Per-subprocess limit in seconds
    pub timeout_secs: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            iverilog: "iverilog".into(),
            vvp: "vvp".into(),
            timeout_secs: 30,
        }
    }
}

/// Icarus Verilog as a [`WaveformProducer`]
#[derive(Debug, Clone, Default)]
pub struct IcarusSimulator {
    config: SimulatorConfig,
}

impl IcarusSimulator {
    pub fn new(config: SimulatorConfig) -> Self {
        Self { config }
    }

    /// Whether the compiler binary can be launched
    pub fn is_available(&self) -> bool {
        Command::new(&self.config.iverilog)
            .arg("-V")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs)
    }
}

impl WaveformProducer for IcarusSimulator {
    fn simulate(&self, code: &str) -> Result<SimulationOutput> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join(SOURCE_FILE), code)?;

        let compile = run(
            Command::new(&self.config.iverilog).args(["-o", COMPILED_FILE, SOURCE_FILE]),
            dir.path(),
            self.timeout(),
        )?;
        if !compile.status.success() {
            return Err(Error::Simulation(format!(
                "{} failed: {}",
                self.config.iverilog,
                String::from_utf8_lossy(&compile.stderr).trim()
            )));
        }

        let sim = run(
            Command::new(&self.config.vvp).arg(COMPILED_FILE),
            dir.path(),
            self.timeout(),
        )?;
        let mut log = String::from_utf8_lossy(&sim.stdout).into_owned();
        log.push_str(&String::from_utf8_lossy(&sim.stderr));

        let dump = dir.path().join(dump_file(code));
        let text = std::fs::read_to_string(&dump).map_err(|e| {
            Error::Simulation(format!("No waveform dump at {}: {}", dump.display(), e))
        })?;
        debug!("read {} bytes of VCD from {}", text.len(), dump.display());

        Ok(SimulationOutput {
            log,
            waveform: vcd::parse(&text)?,
        })
    }
}

/// File name passed to `$dumpfile`, or the default when there is none
fn dump_file(code: &str) -> &str {
    dumpfile_pattern()
        .captures(code)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(DEFAULT_DUMP_FILE)
}

/// Run to completion in `dir`, killing the child after `timeout`
///
/// Both output pipes are drained on their own threads while the child runs,
/// so a chatty child never blocks on a full pipe.
fn run(command: &mut Command, dir: &Path, timeout: Duration) -> Result<Output> {
    let program = command.get_program().to_string_lossy().into_owned();
    debug!("running {} in {}", program, dir.display());

    let mut child = command
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::Simulation(format!("Failed to launch {}: {}", program, e)))?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let started = Instant::now();
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if started.elapsed() >= timeout {
            child.kill()?;
            child.wait()?;
            return Err(Error::Simulation(format!(
                "{} timed out after {}s",
                program,
                timeout.as_secs()
            )));
        }
        thread::sleep(POLL_INTERVAL);
    };

    Ok(Output {
        status,
        stdout: collect(stdout, &program)?,
        stderr: collect(stderr, &program)?,
    })
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<std::io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

fn collect(handle: JoinHandle<std::io::Result<Vec<u8>>>, program: &str) -> Result<Vec<u8>> {
    handle
        .join()
        .map_err(|_| Error::Simulation(format!("Output reader for {} panicked", program)))?
        .map_err(Error::from)
}
