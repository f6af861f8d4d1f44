//! Truth-table generation
//!
//! Rows are enumerated in binary counting order with the first variable as
//! the most significant bit, so row `i` always holds the binary digits of `i`.

use crate::error::{Error, Result};
use crate::expr::{parse, Assignment, BoolExpr, VariableSet};
use log::debug;
use serde::{Deserialize, Serialize};

/// One assignment and its output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruthTableRow {
    /// Input values in variable order
    pub values: Vec<bool>,
    pub output: bool,
}

/// Complete truth table, one row per integer `0..2^n`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruthTable {
    rows: Vec<TruthTableRow>,
}

impl TruthTable {
    /// Evaluate a normalized expression over every assignment of `variables`.
    ///
    /// All or nothing: the first row that fails to evaluate fails the table.
    pub fn generate(expression: &str, variables: &VariableSet) -> Result<Self> {
        let expr = parse(expression)?;
        Self::from_expr(&expr, variables)
    }

    /// Evaluate an already parsed expression over every assignment of `variables`
    pub fn from_expr(expr: &BoolExpr, variables: &VariableSet) -> Result<Self> {
        let total = variables.combinations();
        let mut rows = Vec::with_capacity(total);

        for index in 0..total {
            let assignment = Assignment::from_index(variables, index);
            let output = expr.eval(&assignment).map_err(|e| {
                Error::Evaluation(format!(
                    "Error evaluating expression with values {}: {}",
                    describe_row(variables, index),
                    e
                ))
            })?;
            rows.push(TruthTableRow {
                values: row_bits(index, variables.len()),
                output,
            });
        }

        debug!(
            "generated {} rows over {} variables",
            rows.len(),
            variables.len()
        );
        Ok(TruthTable { rows })
    }

    /// Build from raw outputs in row order (`outputs.len()` must be a power of two matching `variables`)
    pub fn from_outputs(variables: &VariableSet, outputs: &[bool]) -> Result<Self> {
        if outputs.len() != variables.combinations() {
            return Err(Error::Validation(format!(
                "Expected {} outputs for {} variables, got {}",
                variables.combinations(),
                variables.len(),
                outputs.len()
            )));
        }
        let rows = outputs
            .iter()
            .enumerate()
            .map(|(index, &output)| TruthTableRow {
                values: row_bits(index, variables.len()),
                output,
            })
            .collect();
        Ok(TruthTable { rows })
    }

    pub fn rows(&self) -> &[TruthTableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of input columns
    pub fn width(&self) -> usize {
        self.rows.first().map(|r| r.values.len()).unwrap_or(0)
    }

    pub fn outputs(&self) -> impl Iterator<Item = bool> + '_ {
        self.rows.iter().map(|r| r.output)
    }

    /// Indices of rows whose output is true
    pub fn minterms(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.output)
            .map(|(index, _)| index)
            .collect()
    }

    /// Output of the row whose inputs equal `values` exactly
    pub fn lookup(&self, values: &[bool]) -> Option<bool> {
        self.rows
            .iter()
            .find(|row| row.values == values)
            .map(|row| row.output)
    }

    pub fn all_true(&self) -> bool {
        self.rows.iter().all(|r| r.output)
    }

    pub fn all_false(&self) -> bool {
        self.rows.iter().all(|r| !r.output)
    }

    /// Plain-text table for terminals
    pub fn to_report(&self, variables: &VariableSet) -> String {
        let mut out = String::new();
        let header: Vec<&str> = variables.iter().map(String::as_str).collect();
        out.push_str(&format!("{} | Y\n", header.join(" ")));
        out.push_str(&format!("{}-+--\n", "-".repeat(header.len() * 2 - 1)));
        for row in &self.rows {
            let bits: Vec<&str> = row.values.iter().map(|&b| bit(b)).collect();
            out.push_str(&format!("{} | {}\n", bits.join(" "), bit(row.output)));
        }
        out
    }
}

/// Binary digits of `index`, most significant first
pub(crate) fn row_bits(index: usize, width: usize) -> Vec<bool> {
    (0..width)
        .map(|j| (index >> (width - 1 - j)) & 1 == 1)
        .collect()
}

fn bit(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

fn describe_row(variables: &VariableSet, index: usize) -> String {
    let pairs: Vec<String> = variables
        .iter()
        .zip(row_bits(index, variables.len()))
        .map(|(name, value)| format!("{}={}", name, bit(value)))
        .collect();
    format!("{{{}}}", pairs.join(", "))
}
