//! Karnaugh maps for one to four variables
//!
//! Axis layout is fixed, not chosen per function:
//!
//! | vars | rows        | columns          | grid |
//! |------|-------------|------------------|------|
//! | 1    | v0          | (none)           | 2×1  |
//! | 2    | v0          | v1               | 2×2  |
//! | 3    | v0          | v1 v2 (Gray)     | 2×4  |
//! | 4    | v0 v1 (Gray)| v2 v3 (Gray)     | 4×4  |

use crate::expr::VariableSet;
use crate::truth_table::TruthTable;
use serde::{Deserialize, Serialize};

/// Labels for a one-variable axis
pub const BINARY_LABELS: [&str; 2] = ["0", "1"];

/// Labels for a two-variable axis, adjacent entries differ in one bit
pub const GRAY_LABELS: [&str; 4] = ["00", "01", "11", "10"];

/// Karnaugh map: `grid[row][col]` is the output for the decoded labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KMap {
    #[serde(rename = "rows")]
    pub row_labels: Vec<String>,
    #[serde(rename = "cols")]
    pub col_labels: Vec<String>,
    #[serde(rename = "row_var")]
    pub row_variable_label: String,
    #[serde(rename = "col_var")]
    pub col_variable_label: String,
    pub grid: Vec<Vec<bool>>,
}

/// How the variables split across the two axes
struct Layout {
    row_vars: usize,
    col_vars: usize,
}

impl Layout {
    fn for_count(n: usize) -> Option<Self> {
        let (row_vars, col_vars) = match n {
            1 => (1, 0),
            2 => (1, 1),
            3 => (1, 2),
            4 => (2, 2),
            _ => return None,
        };
        Some(Layout { row_vars, col_vars })
    }
}

fn axis_labels(width: usize) -> Vec<String> {
    match width {
        0 => vec![String::new()],
        1 => BINARY_LABELS.iter().map(|s| s.to_string()).collect(),
        _ => GRAY_LABELS.iter().map(|s| s.to_string()).collect(),
    }
}

fn decode(label: &str) -> impl Iterator<Item = bool> + '_ {
    label.chars().map(|c| c == '1')
}

/// Arrange the table into a Karnaugh map; `None` unless 1 to 4 variables.
///
/// Each cell looks its row up by full assignment, so the map does not rely on
/// the table's row order.
pub fn build_kmap(table: &TruthTable, variables: &VariableSet) -> Option<KMap> {
    let layout = Layout::for_count(variables.len())?;
    let names = variables.as_slice();

    let row_labels = axis_labels(layout.row_vars);
    let col_labels = axis_labels(layout.col_vars);

    let mut grid = Vec::with_capacity(row_labels.len());
    for row_label in &row_labels {
        let mut cells = Vec::with_capacity(col_labels.len());
        for col_label in &col_labels {
            let values: Vec<bool> = decode(row_label).chain(decode(col_label)).collect();
            cells.push(table.lookup(&values)?);
        }
        grid.push(cells);
    }

    Some(KMap {
        row_labels,
        col_labels,
        row_variable_label: names[..layout.row_vars].concat(),
        col_variable_label: names[layout.row_vars..].concat(),
        grid,
    })
}

impl KMap {
    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    pub fn cols(&self) -> usize {
        self.grid.first().map(Vec::len).unwrap_or(0)
    }

    /// Inputs (in variable order) that cell `(row, col)` stands for
    pub fn cell_assignment(&self, row: usize, col: usize) -> Option<Vec<bool>> {
        let r = self.row_labels.get(row)?;
        let c = self.col_labels.get(col)?;
        Some(decode(r).chain(decode(c)).collect())
    }

    /// Plain-text grid for terminals
    pub fn to_report(&self) -> String {
        let corner = format!("{}\\{}", self.row_variable_label, self.col_variable_label);
        let row_width = self
            .row_labels
            .iter()
            .map(String::len)
            .chain(std::iter::once(corner.len()))
            .max()
            .unwrap_or(0);
        let col_width = self.col_labels.iter().map(String::len).max().unwrap_or(1).max(1);

        let mut out = format!("{:<w$} |", corner, w = row_width);
        for label in &self.col_labels {
            out.push_str(&format!(" {:>w$}", label, w = col_width));
        }
        out.push('\n');
        out.push_str(&format!(
            "{}-+{}\n",
            "-".repeat(row_width),
            "-".repeat((col_width + 1) * self.col_labels.len())
        ));
        for (label, cells) in self.row_labels.iter().zip(&self.grid) {
            out.push_str(&format!("{:<w$} |", label, w = row_width));
            for &cell in cells {
                out.push_str(&format!(" {:>w$}", if cell { "1" } else { "0" }, w = col_width));
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::extract_variables;

    fn kmap(expr: &str) -> Option<KMap> {
        let vars = extract_variables(expr).unwrap();
        let table = TruthTable::generate(&crate::expr::normalize(expr), &vars).unwrap();
        build_kmap(&table, &vars)
    }

    #[test]
    fn test_one_variable() {
        let map = kmap("~A").unwrap();
        assert_eq!(map.row_labels, vec!["0", "1"]);
        assert_eq!(map.col_labels, vec![""]);
        assert_eq!(map.row_variable_label, "A");
        assert_eq!(map.col_variable_label, "");
        assert_eq!(map.grid, vec![vec![true], vec![false]]);
    }

    #[test]
    fn test_xor_two_variables() {
        let map = kmap("A ^ B").unwrap();
        assert_eq!(map.grid, vec![vec![false, true], vec![true, false]]);
        assert_eq!(map.col_variable_label, "B");
    }

    #[test]
    fn test_three_variables_gray_columns() {
        // true only at A=0, B=1, C=0 -> row 0, column "10" (index 3)
        let map = kmap("~A & B & ~C").unwrap();
        assert_eq!((map.rows(), map.cols()), (2, 4));
        assert_eq!(map.col_variable_label, "BC");
        assert_eq!(map.grid[0], vec![false, false, false, true]);
        assert!(map.grid[1].iter().all(|&c| !c));
    }

    #[test]
    fn test_four_variables() {
        // A=1, B=1, C=1, D=0 -> row "11" (2), column "10" (3)
        let map = kmap("A & B & C & ~D").unwrap();
        assert_eq!((map.rows(), map.cols()), (4, 4));
        assert_eq!(map.row_variable_label, "AB");
        assert_eq!(map.col_variable_label, "CD");
        for r in 0..4 {
            for c in 0..4 {
                assert_eq!(map.grid[r][c], (r, c) == (2, 3));
            }
        }
    }

    #[test]
    fn test_five_variables_unsupported() {
        assert!(kmap("A & B & C & D & E").is_none());
    }

    #[test]
    fn test_cell_assignment() {
        let map = kmap("A | B | C | D").unwrap();
        assert_eq!(map.cell_assignment(3, 2), Some(vec![true, false, true, true]));
        assert_eq!(map.cell_assignment(4, 0), None);
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_value(kmap("A & B").unwrap()).unwrap();
        assert_eq!(json["row_var"], "A");
        assert_eq!(json["cols"], serde_json::json!(["0", "1"]));
        assert_eq!(json["grid"], serde_json::json!([[false, false], [false, true]]));
    }

    #[test]
    fn test_report() {
        let report = kmap("A ^ B").unwrap().to_report();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "A\\B | 0 1");
        assert_eq!(lines[2], "0   | 0 1");
        assert_eq!(lines[3], "1   | 1 0");
    }
}
