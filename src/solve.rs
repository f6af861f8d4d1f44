//! End-to-end solving: normalize, extract, tabulate, simplify

use crate::error::{Error, Result};
use crate::expr::{extract_variables, normalize, parse, VariableSet};
use crate::kmap::{build_kmap, KMap};
use crate::simplify::{simplify_with, SimplifyMode};
use crate::truth_table::TruthTable;
use log::debug;
use serde::{Deserialize, Serialize};

/// Everything derived from one expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// Input as given
    pub expression: String,
    pub variables: VariableSet,
    pub normalized_expression: String,
    pub truth_table: TruthTable,
    pub simplified_expression: String,
}

impl Solution {
    /// Indices of the rows where the expression is true
    pub fn minterms(&self) -> Vec<usize> {
        self.truth_table.minterms()
    }

    /// Karnaugh map, for 1 to 4 variables
    pub fn kmap(&self) -> Option<KMap> {
        build_kmap(&self.truth_table, &self.variables)
    }
}

/// Solve with the default (canonical) simplifier
pub fn solve(expression: &str) -> Result<Solution> {
    solve_with(expression, SimplifyMode::default())
}

/// Solve with an explicit simplification policy
pub fn solve_with(expression: &str, mode: SimplifyMode) -> Result<Solution> {
    if expression.trim().is_empty() {
        return Err(Error::Validation("Empty expression provided".into()));
    }

    let normalized = normalize(expression);
    debug!("normalized '{}' to '{}'", expression, normalized);

    let variables = extract_variables(expression)?;
    debug!("variables: {}", variables.as_slice().join(", "));

    let ast = parse(&normalized)?;
    let truth_table = TruthTable::from_expr(&ast, &variables)?;

    let simplified = simplify_with(&truth_table, &variables, mode);
    debug!("simplified ({:?}): {}", mode, simplified);

    Ok(Solution {
        expression: expression.to_string(),
        variables,
        normalized_expression: normalized,
        truth_table,
        simplified_expression: simplified,
    })
}
