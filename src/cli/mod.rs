//! CLI command implementations
//!
//! - `table`: truth table, simplified form and minterms
//! - `kmap`: Karnaugh map and simplified form
//! - `verilog`: module and testbench, optionally simulated
//! - `schema`: JSON schema of `kmap.yaml`
//! - `check`: configuration and simulator availability

use kmap_solver::config::Config;
use kmap_solver::expr::parse;
use kmap_solver::service::Service;
use kmap_solver::simplify::SimplifyMode;
use kmap_solver::simulate::{
    simulate_best_effort, Disabled, IcarusSimulator, SimulationReport, WaveformProducer,
};
use kmap_solver::{solve_with, Renderer, Result, Solution};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Options shared by every expression command
pub struct Context {
    pub config: Config,
    pub config_path: Option<PathBuf>,
}

impl Context {
    pub fn mode(&self) -> SimplifyMode {
        self.config.simplify.mode
    }

    fn solve(&self, expression: &str) -> Result<Solution> {
        solve_with(expression, self.mode())
    }

    fn producer(&self) -> Box<dyn WaveformProducer> {
        if self.config.simulator.enabled {
            Box::new(IcarusSimulator::new(self.config.simulator.clone()))
        } else {
            Box::new(Disabled)
        }
    }
}

pub fn cmd_table(ctx: &Context, expression: &str, json: bool) -> Result<()> {
    if json {
        let service = Service::new(ctx.config.clone());
        return print_envelope(service.generate_truth_table(expression));
    }

    let solution = ctx.solve(expression)?;
    print!("{}", solution.truth_table.to_report(&solution.variables));
    println!();
    println!("Simplified: {}", solution.simplified_expression);
    println!("Pretty:     {}", pretty(&solution.simplified_expression));
    println!("Minterms:   {}", sigma(&solution.minterms()));
    Ok(())
}

pub fn cmd_kmap(ctx: &Context, expression: &str, json: bool) -> Result<()> {
    if json {
        let service = Service::new(ctx.config.clone());
        return print_envelope(service.generate_kmap(expression));
    }

    let solution = ctx.solve(expression)?;
    match solution.kmap() {
        Some(kmap) => print!("{}", kmap.to_report()),
        None => println!(
            "K-map not available for {} variables (1 to 4 supported)",
            solution.variables.len()
        ),
    }
    println!();
    println!("Simplified: {}", solution.simplified_expression);
    Ok(())
}

pub fn cmd_verilog(
    ctx: &Context,
    expression: &str,
    json: bool,
    simulate: bool,
    output: Option<&Path>,
) -> Result<()> {
    let producer: Box<dyn WaveformProducer> = if simulate {
        ctx.producer()
    } else {
        Box::new(Disabled)
    };

    if json {
        let service = Service::new(ctx.config.clone());
        return print_envelope(service.generate_verilog(expression, producer.as_ref()));
    }

    let solution = ctx.solve(expression)?;
    let module = Renderer::new(ctx.config.render.clone())
        .render(&solution.normalized_expression, &solution.variables)?;

    match output {
        Some(path) => {
            std::fs::write(path, &module.code)?;
            log::info!("wrote {}", path.display());
        }
        None => print!("{}", module.code),
    }

    if simulate {
        let report = simulate_best_effort(producer.as_ref(), &module, &solution.truth_table);
        print_report(&report);
    }
    Ok(())
}

pub fn cmd_schema() -> Result<()> {
    let schema = schemars::schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

pub fn cmd_check(ctx: &Context) -> Result<()> {
    match &ctx.config_path {
        Some(path) => println!("✓ Config: {}", path.display()),
        None => println!("✓ Config: defaults (no kmap.yaml found)"),
    }
    println!("  simplify.mode: {:?}", ctx.mode());
    println!("  render.module_name: {}", ctx.config.render.module_name);

    if !ctx.config.simulator.enabled {
        println!("- Simulator: disabled");
        return Ok(());
    }
    let simulator = IcarusSimulator::new(ctx.config.simulator.clone());
    if simulator.is_available() {
        println!("✓ Simulator: {} found", ctx.config.simulator.iverilog);
    } else {
        println!(
            "✗ Simulator: {} not found (waveforms will be derived from the truth table)",
            ctx.config.simulator.iverilog
        );
    }
    Ok(())
}

fn print_envelope(envelope: Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    match envelope["error"].as_str() {
        Some(error) if envelope["success"] == Value::Bool(false) => Err(error.into()),
        _ => Ok(()),
    }
}

fn print_report(report: &SimulationReport) {
    println!();
    println!("// Simulation ({:?})", report.status);
    for line in report.log.lines() {
        println!("// {}", line);
    }
    for signal in report.waveform.values() {
        let trace: String = signal
            .values
            .iter()
            .map(|v| if *v == 1 { '‾' } else { '_' })
            .collect();
        println!("// {:>6} {}", signal.name, trace);
    }
}

/// `A·B + ¬C` rendering; falls back to the input when it does not parse
fn pretty(expression: &str) -> String {
    parse(expression)
        .map(|expr| expr.to_pretty())
        .unwrap_or_else(|_| expression.to_string())
}

fn sigma(minterms: &[usize]) -> String {
    let items: Vec<String> = minterms.iter().map(usize::to_string).collect();
    format!("Σm({})", items.join(", "))
}
