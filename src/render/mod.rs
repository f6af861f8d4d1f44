//! Hardware-description rendering — Verilog module plus testbench
//!
//! The output is a fixed template: one combinational module with a single
//! output driven by the translated expression, and a testbench that walks
//! every input combination with a loop counter while dumping a VCD.
//! Rendering is deterministic; nothing is evaluated here.

mod verilog;

pub use verilog::translate_expression;

use crate::error::Result;
use crate::expr::{normalize, VariableSet};
use crate::templates::{self, VerilogContext};
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// Render the Verilog module and testbench with the default configuration
pub fn emit_hardware_description(expression: &str, variables: &VariableSet) -> Result<String> {
    Ok(Renderer::default().render(expression, variables)?.code)
}

/// Render configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RenderConfig {
    /// Name of the combinational module
    pub module_name: String,
    /// Preferred output port name (suffixed with `_OUT` if an input has the same name)
    pub output_name: String,
    /// VCD file the testbench dumps to
    pub dump_file: String,
    /// Delay between input combinations, in simulation time units
    pub step_delay: u32,
    /// Include provenance header
    pub provenance: bool,
    /// Directory whose `verilog.jinja` replaces the embedded template
    pub template_dir: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            module_name: "boolean_function".into(),
            output_name: "Y".into(),
            dump_file: "waveform.vcd".into(),
            step_delay: 10,
            provenance: true,
            template_dir: None,
        }
    }
}

/// Generated Verilog with the names a simulator or waveform reader needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareModule {
    pub code: String,
    pub module_name: String,
    pub inputs: Vec<String>,
    pub output: String,
    pub dump_file: String,
    pub step_delay: u32,
}

/// Verilog renderer
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render the module for `expression` over `variables`
    pub fn render(&self, expression: &str, variables: &VariableSet) -> Result<HardwareModule> {
        let ctx = self.context(expression, variables);
        let mut code = match &self.config.template_dir {
            Some(dir) => {
                let env = templates::engine_with_override(dir)?;
                templates::render_verilog(&env, &ctx)?
            }
            None => templates::render_verilog(templates::engine(), &ctx)?,
        };
        code.push('\n');

        debug!(
            "rendered module '{}' ({} inputs, {} bytes)",
            ctx.module_name,
            ctx.inputs.len(),
            code.len()
        );

        Ok(HardwareModule {
            code,
            module_name: ctx.module_name,
            inputs: ctx.inputs,
            output: ctx.output,
            dump_file: ctx.dump_file,
            step_delay: ctx.step_delay,
        })
    }

    fn context(&self, expression: &str, variables: &VariableSet) -> VerilogContext {
        let normalized = normalize(expression);
        let inputs: Vec<String> = variables.iter().cloned().collect();
        let output = verilog::output_port(&self.config.output_name, &inputs);

        VerilogContext {
            provenance: self.config.provenance,
            hash: expression_hash(&normalized, variables),
            assign_expr: translate_expression(&normalized),
            expression: normalized,
            module_name: self.config.module_name.clone(),
            header_format: VerilogContext::header_format_for(&inputs, &output),
            row_format: VerilogContext::row_format_for(inputs.len()),
            input_concat: format!("{{{}}}", inputs.join(", ")),
            combinations: variables.combinations(),
            dump_file: self.config.dump_file.clone(),
            step_delay: self.config.step_delay,
            inputs,
            output,
        }
    }
}

/// Short content hash of the normalized expression and its variables
pub fn expression_hash(normalized: &str, variables: &VariableSet) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    hasher.update(b"\n");
    hasher.update(variables.as_slice().join(",").as_bytes());
    format!("sha256:{}", hex::encode(&hasher.finalize()[..8]))
}
