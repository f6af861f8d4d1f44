//! Service envelopes and the best-effort simulation path

use kmap_solver::config::Config;
use kmap_solver::service::{generate_kmap, generate_truth_table, generate_verilog, Service};
use kmap_solver::simulate::{
    simulate_best_effort, Disabled, IcarusSimulator, Signal, SimulationOutput, SimulationStatus,
    SimulatorConfig, Waveform, WaveformProducer,
};
use kmap_solver::{extract_variables, Renderer, Result, TruthTable};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use std::cell::RefCell;

/// Records the code it was asked to simulate
#[derive(Default)]
struct Recorder {
    seen: RefCell<Vec<String>>,
}

impl WaveformProducer for Recorder {
    fn simulate(&self, code: &str) -> Result<SimulationOutput> {
        self.seen.borrow_mut().push(code.to_string());
        let mut signal = Signal::new("Y");
        signal.push(0, 1);
        Ok(SimulationOutput {
            log: "VCD info: dumpfile waveform.vcd opened for output.".into(),
            waveform: Waveform::from([("Y".to_string(), signal)]),
        })
    }
}

#[rstest]
#[case("A & B", 2, 4)]
#[case("a or b or c", 3, 8)]
#[case("A ^ B ^ C ^ D ^ E ^ F", 6, 64)]
fn test_truth_table_shape(#[case] expression: &str, #[case] vars: u64, #[case] rows: usize) {
    let v = generate_truth_table(expression);
    assert_eq!(v["success"], json!(true));
    assert_eq!(v["num_variables"], json!(vars));
    assert_eq!(v["truth_table"].as_array().unwrap().len(), rows);
}

#[test]
fn test_expression_is_trimmed() {
    let v = generate_truth_table("  A  ");
    assert_eq!(v["expression"], json!("A"));
    assert_eq!(
        v["truth_table"],
        json!([{"A": 0, "output": false}, {"A": 1, "output": true}])
    );
}

#[rstest]
#[case("A & (B", "Unbalanced parentheses")]
#[case("A & B & C & D & E & F & G", "Too many variables")]
#[case("0 | 1", "No valid variables found in expression")]
#[case("", "No expression provided")]
fn test_failure_envelopes(#[case] expression: &str, #[case] fragment: &str) {
    for v in [generate_truth_table(expression), generate_kmap(expression)] {
        assert_eq!(v["success"], json!(false));
        assert!(v["error"].as_str().unwrap().contains(fragment), "{}", v);
        assert_eq!(v.as_object().unwrap().len(), 2);
    }
}

#[test]
fn test_long_chain_is_failure_envelope() {
    let expression = format!("{}B", "A | ".repeat(10_000));
    for v in [generate_truth_table(&expression), generate_kmap(&expression)] {
        assert_eq!(v["success"], json!(false));
        assert!(v["error"].as_str().unwrap().contains("nested deeper"), "{}", v);
    }
    let v = generate_verilog(&expression, &Disabled);
    assert_eq!(v["success"], json!(false));
}

#[test]
fn test_kmap_four_variables() {
    let v = generate_kmap("A & B & C & D");
    assert_eq!(v["kmap"]["rows"], json!(["00", "01", "11", "10"]));
    assert_eq!(v["kmap"]["cols"], json!(["00", "01", "11", "10"]));
    assert_eq!(v["kmap"]["row_var"], json!("AB"));
    assert_eq!(v["kmap"]["col_var"], json!("CD"));
    assert_eq!(v["kmap"]["grid"][2][2], json!(true));
    assert_eq!(v["simplified_expression"], json!("A & B & C & D"));
}

#[test]
fn test_verilog_passes_code_to_producer() {
    let recorder = Recorder::default();
    let v = generate_verilog("A & B", &recorder);

    assert_eq!(v["success"], json!(true));
    assert_eq!(v["simulation_status"], json!("simulated"));
    assert_eq!(
        v["simulation_output"],
        json!("VCD info: dumpfile waveform.vcd opened for output.")
    );
    assert_eq!(v["waveform_data"]["Y"]["values"], json!([1]));

    let seen = recorder.seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], v["verilog_code"].as_str().unwrap());
}

#[test]
fn test_verilog_fallback_waveform() {
    let v = generate_verilog("A ^ B", &Disabled);
    assert_eq!(v["simulation_status"], json!("fallback"));
    let wave = &v["waveform_data"];
    assert_eq!(wave["A"]["values"], json!([0, 0, 1, 1, 1]));
    assert_eq!(wave["B"]["values"], json!([0, 1, 0, 1, 1]));
    assert_eq!(wave["Y"]["values"], json!([0, 1, 1, 0, 0]));
    assert_eq!(wave["Y"]["times"], json!([0, 10, 20, 30, 40]));
}

#[test]
fn test_missing_simulator_falls_back() {
    let sim = IcarusSimulator::new(SimulatorConfig {
        iverilog: "no-such-iverilog-binary".into(),
        ..Default::default()
    });
    let v = generate_verilog("A | B", &sim);
    assert_eq!(v["success"], json!(true));
    assert_eq!(v["simulation_status"], json!("fallback"));
    assert!(v["simulation_output"]
        .as_str()
        .unwrap()
        .contains("no-such-iverilog-binary"));
}

#[test]
fn test_service_render_config() {
    let mut config = Config::default();
    config.render.module_name = "majority".into();
    config.render.step_delay = 4;
    let v = Service::new(config).generate_verilog("A & B | B & C | A & C", &Disabled);

    let code = v["verilog_code"].as_str().unwrap();
    assert!(code.contains("module majority(A, B, C, Y);"));
    assert!(code.contains("#4;"));
    assert_eq!(v["waveform_data"]["Y"]["times"][1], json!(4));
}

#[test]
fn test_real_simulator_when_installed() {
    let sim = IcarusSimulator::default();
    if !sim.is_available() {
        return;
    }

    let vars = extract_variables("A & B").unwrap();
    let module = Renderer::default().render("A & B", &vars).unwrap();
    let table = TruthTable::generate("A & B", &vars).unwrap();
    let report = simulate_best_effort(&sim, &module, &table);

    assert_eq!(report.status, SimulationStatus::Simulated);
    assert!(report.log.contains("Simulation completed successfully"));
    let y = &report.waveform["Y"];
    assert_eq!(y.times.len(), y.values.len());
    assert_eq!(y.values.last(), Some(&1));
}
