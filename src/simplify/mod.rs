//! Truth table → sum-of-products
//!
//! The default policy lists one product term per true row (a canonical,
//! non-minimized cover). Two other policies exist:
//!
//! - [`SimplifyMode::Compat`] reproduces the legacy web service, including its
//!   single-variable and more-than-four-variable quirks.
//! - [`SimplifyMode::Minimal`] minimizes through Quine-McCluskey and falls back
//!   to the canonical cover if the result does not check out.

pub mod cube;
mod minimize;

pub use cube::{Cube, CubeValue};

use crate::expr::VariableSet;
use crate::truth_table::TruthTable;
use log::{debug, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Widest table the compat policy expands into product terms
pub const COMPAT_SOP_LIMIT: usize = 4;

/// Simplification policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SimplifyMode {
    /// Canonical sum-of-products for every variable count
    #[default]
    Canonical,
    /// Legacy output, bit-for-bit
    Compat,
    /// Quine-McCluskey minimized, verified against the table
    Minimal,
}

/// Canonical sum-of-products for `table`
pub fn simplify(table: &TruthTable, variables: &VariableSet) -> String {
    simplify_with(table, variables, SimplifyMode::Canonical)
}

/// Simplify under an explicit policy
pub fn simplify_with(table: &TruthTable, variables: &VariableSet, mode: SimplifyMode) -> String {
    if table.all_false() {
        return "0".to_string();
    }
    if table.all_true() {
        return "1".to_string();
    }

    match mode {
        SimplifyMode::Canonical => sum_of_products(table, variables),
        SimplifyMode::Compat => compat(table, variables),
        SimplifyMode::Minimal => match minimize::minimize(table, variables.len()) {
            Some(cover) => {
                let literals: usize = cover.iter().map(Cube::literal_count).sum();
                let cubes: Vec<String> = cover.iter().map(Cube::to_string).collect();
                debug!(
                    "minimized {} minterms to {} terms, {} literals: {}",
                    table.minterms().len(),
                    cover.len(),
                    literals,
                    cubes.join(" ")
                );
                render_cover(&cover, variables)
            }
            None => {
                warn!("minimized form did not reproduce the table; using canonical cover");
                sum_of_products(table, variables)
            }
        },
    }
}

/// One product term per true row, joined with `|`
pub fn sum_of_products(table: &TruthTable, variables: &VariableSet) -> String {
    let cover: Vec<Cube> = table
        .rows()
        .iter()
        .filter(|row| row.output)
        .map(|row| Cube::minterm(&row.values))
        .collect();
    render_cover(&cover, variables)
}

/// Join product terms with `|`; an empty cover is constant false
fn render_cover(cover: &[Cube], variables: &VariableSet) -> String {
    if cover.is_empty() {
        return "0".to_string();
    }
    cover
        .iter()
        .map(|cube| cube.to_term(variables))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn compat(table: &TruthTable, variables: &VariableSet) -> String {
    match variables.len() {
        1 => {
            // Legacy reading of the two rows; note (1, 0) is really ~A.
            let name = variables.as_slice()[0].clone();
            let outputs: Vec<bool> = table.outputs().collect();
            match outputs.as_slice() {
                [true, false] => name,
                [false, true] => format!("~{}", name),
                _ => name,
            }
        }
        n if n <= COMPAT_SOP_LIMIT => sum_of_products(table, variables),
        _ => table
            .minterms()
            .iter()
            .map(|i| format!("row{}", i))
            .collect::<Vec<_>>()
            .join(" | "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::extract_variables;

    fn simplified(expr: &str, mode: SimplifyMode) -> String {
        let vars = extract_variables(expr).unwrap();
        let table = TruthTable::generate(&crate::expr::normalize(expr), &vars).unwrap();
        simplify_with(&table, &vars, mode)
    }

    #[test]
    fn test_constants() {
        assert_eq!(simplified("A | ~A", SimplifyMode::Canonical), "1");
        assert_eq!(simplified("A & ~A", SimplifyMode::Canonical), "0");
        assert_eq!(simplified("A & ~A & B & C & D & E", SimplifyMode::Compat), "0");
    }

    #[test]
    fn test_single_minterm_has_no_or() {
        assert_eq!(simplified("A & B", SimplifyMode::Canonical), "A & B");
        assert_eq!(simplified("~A & B & ~C", SimplifyMode::Canonical), "~A & B & ~C");
    }

    #[test]
    fn test_canonical_sop_row_order() {
        assert_eq!(
            simplified("A ^ B", SimplifyMode::Canonical),
            "~A & B | A & ~B"
        );
    }

    #[test]
    fn test_single_variable() {
        assert_eq!(simplified("A", SimplifyMode::Canonical), "A");
        assert_eq!(simplified("~A", SimplifyMode::Canonical), "~A");
        // legacy output swaps the literal
        assert_eq!(simplified("A", SimplifyMode::Compat), "~A");
        assert_eq!(simplified("~A", SimplifyMode::Compat), "A");
    }

    #[test]
    fn test_compat_placeholder_above_four_variables() {
        assert_eq!(
            simplified("A & B & C & D & E", SimplifyMode::Compat),
            "row31"
        );
        assert_eq!(
            simplified("A & B & C & D & E", SimplifyMode::Canonical),
            "A & B & C & D & E"
        );
    }

    #[test]
    fn test_compat_matches_canonical_up_to_four() {
        for expr in ["A | B", "A & (B ^ C)", "(A | B) & (C | ~D)"] {
            assert_eq!(
                simplified(expr, SimplifyMode::Compat),
                simplified(expr, SimplifyMode::Canonical)
            );
        }
    }

    #[test]
    fn test_minimal_mode() {
        assert_eq!(simplified("A & B | A & ~B", SimplifyMode::Minimal), "A");
        assert_eq!(simplified("A | ~A", SimplifyMode::Minimal), "1");
    }

    #[test]
    fn test_mode_serde() {
        let mode: SimplifyMode = serde_json::from_str("\"minimal\"").unwrap();
        assert_eq!(mode, SimplifyMode::Minimal);
        assert_eq!(SimplifyMode::default(), SimplifyMode::Canonical);
    }
}
