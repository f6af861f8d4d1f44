//! JSON envelopes for the three service operations
//!
//! Every operation returns `{"success": true, ...}` or
//! `{"success": false, "error": "..."}`; errors never escape as `Err`.
//! Field names and shapes match the web front end that consumes them.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::kmap::build_kmap;
use crate::render::Renderer;
use crate::simulate::{simulate_best_effort, WaveformProducer};
use crate::solve::{solve_with, Solution};
use serde_json::{json, Map, Value};

/// Operations with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Service {
    config: Config,
}

impl Service {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// `{expression, variables, truth_table, num_variables}`
    pub fn generate_truth_table(&self, expression: &str) -> Value {
        envelope(self.truth_table_body(expression))
    }

    /// `{expression, variables, kmap, simplified_expression}`; `kmap` is null above four variables
    pub fn generate_kmap(&self, expression: &str) -> Value {
        envelope(self.kmap_body(expression))
    }

    /// `{expression, variables, verilog_code, simulation_output, waveform_data}`
    pub fn generate_verilog(&self, expression: &str, producer: &dyn WaveformProducer) -> Value {
        envelope(self.verilog_body(expression, producer))
    }

    fn solve(&self, expression: &str) -> Result<(String, Solution)> {
        let expression = expression.trim();
        if expression.is_empty() {
            return Err(Error::Validation("No expression provided".into()));
        }
        let solution = solve_with(expression, self.config.simplify.mode)?;
        Ok((expression.to_string(), solution))
    }

    fn truth_table_body(&self, expression: &str) -> Result<Map<String, Value>> {
        let (expression, solution) = self.solve(expression)?;
        let mut body = Map::new();
        body.insert("expression".into(), json!(expression));
        body.insert("variables".into(), json!(solution.variables));
        body.insert("truth_table".into(), truth_table_rows(&solution));
        body.insert("num_variables".into(), json!(solution.variables.len()));
        Ok(body)
    }

    fn kmap_body(&self, expression: &str) -> Result<Map<String, Value>> {
        let (expression, solution) = self.solve(expression)?;
        let kmap = build_kmap(&solution.truth_table, &solution.variables);
        let mut body = Map::new();
        body.insert("expression".into(), json!(expression));
        body.insert("variables".into(), json!(solution.variables));
        body.insert("kmap".into(), serde_json::to_value(kmap)?);
        body.insert(
            "simplified_expression".into(),
            json!(solution.simplified_expression),
        );
        Ok(body)
    }

    fn verilog_body(
        &self,
        expression: &str,
        producer: &dyn WaveformProducer,
    ) -> Result<Map<String, Value>> {
        let (expression, solution) = self.solve(expression)?;
        let module = Renderer::new(self.config.render.clone())
            .render(&expression, &solution.variables)?;
        let report = simulate_best_effort(producer, &module, &solution.truth_table);

        let mut body = Map::new();
        body.insert("expression".into(), json!(expression));
        body.insert("variables".into(), json!(solution.variables));
        body.insert("verilog_code".into(), json!(module.code));
        body.insert("simulation_output".into(), json!(report.log));
        body.insert("simulation_status".into(), serde_json::to_value(report.status)?);
        body.insert("waveform_data".into(), serde_json::to_value(&report.waveform)?);
        Ok(body)
    }
}

/// Truth table with the default configuration
pub fn generate_truth_table(expression: &str) -> Value {
    Service::default().generate_truth_table(expression)
}

/// K-map and simplified expression with the default configuration
pub fn generate_kmap(expression: &str) -> Value {
    Service::default().generate_kmap(expression)
}

/// Verilog plus waveform with the default configuration
pub fn generate_verilog(expression: &str, producer: &dyn WaveformProducer) -> Value {
    Service::default().generate_verilog(expression, producer)
}

/// Index of the available operations
pub fn endpoints() -> Value {
    json!({
        "message": "Boolean Expression Solver API",
        "endpoints": {
            "/generate_truth_table": "Generate truth table for Boolean expression",
            "/generate_kmap": "Generate K-map and simplified expression",
            "/generate_verilog": "Generate Verilog code and simulate"
        }
    })
}

/// Rows as `{"A": 0, "B": 1, "output": true}`
fn truth_table_rows(solution: &Solution) -> Value {
    solution
        .truth_table
        .rows()
        .iter()
        .map(|row| {
            let mut obj = Map::new();
            for (name, value) in solution.variables.iter().zip(&row.values) {
                obj.insert(name.clone(), json!(u8::from(*value)));
            }
            obj.insert("output".into(), json!(row.output));
            Value::Object(obj)
        })
        .collect()
}

fn envelope(body: Result<Map<String, Value>>) -> Value {
    match body {
        Ok(mut body) => {
            body.insert("success".into(), Value::Bool(true));
            Value::Object(body)
        }
        Err(e) => json!({ "success": false, "error": message(&e) }),
    }
}

/// Message without the error-class prefix
fn message(error: &Error) -> String {
    match error {
        Error::Validation(msg)
        | Error::Evaluation(msg)
        | Error::Render(msg)
        | Error::Simulation(msg)
        | Error::Config(msg)
        | Error::Other(msg) => msg.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulate::Disabled;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_truth_table_envelope() {
        let v = generate_truth_table("A & B");
        assert_eq!(v["success"], json!(true));
        assert_eq!(v["expression"], json!("A & B"));
        assert_eq!(v["variables"], json!(["A", "B"]));
        assert_eq!(v["num_variables"], json!(2));
        assert_eq!(v["truth_table"][0], json!({"A": 0, "B": 0, "output": false}));
        assert_eq!(v["truth_table"][3], json!({"A": 1, "B": 1, "output": true}));
    }

    #[test]
    fn test_empty_expression() {
        let ops: [fn(&str) -> Value; 2] = [generate_truth_table, generate_kmap];
        for op in ops {
            assert_eq!(
                op("  "),
                json!({"success": false, "error": "No expression provided"})
            );
        }
        assert_eq!(
            generate_verilog("", &Disabled)["error"],
            json!("No expression provided")
        );
    }

    #[test]
    fn test_errors_become_envelopes() {
        let v = generate_truth_table("A & (B");
        assert_eq!(v["success"], json!(false));
        assert!(v["error"].as_str().unwrap().contains("Unbalanced parentheses"));

        let v = generate_kmap("A & B & C & D & E & F & G");
        assert!(v["error"].as_str().unwrap().starts_with("Too many variables"));
    }

    #[test]
    fn test_kmap_envelope() {
        let v = generate_kmap("A ^ B");
        assert_eq!(v["success"], json!(true));
        assert_eq!(
            v["kmap"],
            json!({
                "rows": ["0", "1"],
                "cols": ["0", "1"],
                "row_var": "A",
                "col_var": "B",
                "grid": [[false, true], [true, false]]
            })
        );
        assert_eq!(v["simplified_expression"], json!("~A & B | A & ~B"));
    }

    #[test]
    fn test_kmap_null_above_four() {
        let v = generate_kmap("A | B | C | D | E");
        assert_eq!(v["success"], json!(true));
        assert_eq!(v["kmap"], Value::Null);
    }

    #[test]
    fn test_verilog_envelope_with_fallback() {
        let v = generate_verilog("A | B", &Disabled);
        assert_eq!(v["success"], json!(true));
        assert!(v["verilog_code"].as_str().unwrap().contains("assign Y = A || B;"));
        assert_eq!(v["simulation_status"], json!("fallback"));
        assert_eq!(
            v["waveform_data"]["Y"],
            json!({"times": [0, 10, 20, 30, 40], "values": [0, 1, 1, 1, 1], "name": "Y"})
        );
    }

    #[test]
    fn test_service_uses_config() {
        let mut config = Config::default();
        config.simplify.mode = crate::simplify::SimplifyMode::Compat;
        let v = Service::new(config).generate_kmap("A");
        assert_eq!(v["simplified_expression"], json!("~A"));
    }

    #[test]
    fn test_endpoints_index() {
        assert_eq!(endpoints()["endpoints"].as_object().unwrap().len(), 3);
    }
}
