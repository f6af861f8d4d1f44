//! Template-based code generation
//!
//! Uses MiniJinja templates for properly formatted Verilog.
//! The template is embedded by default, with optional override via the
//! `render.template_dir` config entry (a directory holding `verilog.jinja`).

pub mod context;
pub mod filters;

use minijinja::Environment;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

pub use context::VerilogContext;

/// Name the Verilog template is registered under
pub const VERILOG_TEMPLATE: &str = "verilog.jinja";

// Embedded templates (compiled into binary)
mod embedded {
    pub const VERILOG: &str = include_str!("../../templates/verilog.jinja");
}

/// Template engine singleton
static ENGINE: OnceLock<Environment<'static>> = OnceLock::new();

/// Initialize the template engine with embedded templates
fn init_engine() -> Environment<'static> {
    let mut env = Environment::new();

    // Register custom filters
    filters::register_filters(&mut env);

    env.add_template(VERILOG_TEMPLATE, embedded::VERILOG)
        .expect("Failed to load verilog template");

    env
}

/// Get the global template engine
pub fn engine() -> &'static Environment<'static> {
    ENGINE.get_or_init(init_engine)
}

/// Create a new template engine with custom template directory
/// Templates in custom_dir override embedded templates
pub fn engine_with_override(custom_dir: &Path) -> Result<Environment<'static>, TemplateError> {
    let mut env = init_engine();

    let path = custom_dir.join(VERILOG_TEMPLATE);
    if path.exists() {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            TemplateError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        env.add_template_owned(VERILOG_TEMPLATE, content)
            .map_err(|e| TemplateError::ParseError(path.display().to_string(), e.to_string()))?;
    }

    Ok(env)
}

/// Render the Verilog template with the given engine
pub fn render_verilog(
    env: &Environment<'_>,
    ctx: &VerilogContext,
) -> Result<String, TemplateError> {
    let template = env
        .get_template(VERILOG_TEMPLATE)
        .map_err(|e| TemplateError::TemplateNotFound(e.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

/// Template errors
#[derive(Debug, Clone)]
pub enum TemplateError {
    /// Template not found
    TemplateNotFound(String),
    /// Template parse error (path, message)
    ParseError(String, String),
    /// Template render error
    RenderError(String),
    /// Reading an override template failed
    IoError(String),
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::TemplateNotFound(msg) => write!(f, "Template not found: {}", msg),
            TemplateError::ParseError(path, msg) => {
                write!(f, "Failed to parse template {}: {}", path, msg)
            }
            TemplateError::RenderError(msg) => write!(f, "Template render failed: {}", msg),
            TemplateError::IoError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TemplateError {}

impl From<TemplateError> for crate::error::Error {
    fn from(e: TemplateError) -> Self {
        crate::error::Error::Render(e.to_string())
    }
}
