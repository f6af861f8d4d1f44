//! Template context for the Verilog module and testbench

use serde::Serialize;

/// Everything `verilog.jinja` reads
#[derive(Debug, Clone, Serialize)]
pub struct VerilogContext {
    pub provenance: bool,
    /// Normalized source expression
    pub expression: String,
    pub hash: String,
    pub module_name: String,
    pub inputs: Vec<String>,
    pub output: String,
    /// Right-hand side of the `assign`
    pub assign_expr: String,
    pub dump_file: String,
    pub step_delay: u32,
    /// Number of input combinations the testbench walks
    pub combinations: usize,
    /// `{A, B, C}`
    pub input_concat: String,
    pub header_format: String,
    pub row_format: String,
}

impl VerilogContext {
    /// `Time\tA\tB\tY`, with literal `\t` escapes for `$display`
    pub fn header_format_for(inputs: &[String], output: &str) -> String {
        let mut columns = vec!["Time".to_string()];
        columns.extend(inputs.iter().cloned());
        columns.push(output.to_string());
        columns.join("\\t")
    }

    /// `%0t\t%b\t%b\t%b`: time, one column per input, then the output
    pub fn row_format_for(input_count: usize) -> String {
        let mut format = String::from("%0t");
        for _ in 0..=input_count {
            format.push_str("\\t%b");
        }
        format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats() {
        let inputs = vec!["A".to_string(), "B".to_string()];
        assert_eq!(VerilogContext::header_format_for(&inputs, "Y"), r"Time\tA\tB\tY");
        assert_eq!(VerilogContext::row_format_for(2), r"%0t\t%b\t%b\t%b");
    }
}
