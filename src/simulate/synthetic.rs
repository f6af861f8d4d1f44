//! Waveform derived from a truth table
//!
//! Mirrors what the generated testbench drives: row `i` is applied at time
//! `i * step`, and a final sample at `rows * step` holds the last row.

use super::{Signal, Waveform};
use crate::truth_table::TruthTable;

/// Build input and output signals for every row of `table`
pub fn from_truth_table(
    table: &TruthTable,
    inputs: &[String],
    output: &str,
    step: u32,
) -> Waveform {
    let step = u64::from(step);
    let mut signals: Vec<Signal> = inputs.iter().map(Signal::new).collect();
    let mut out = Signal::new(output);

    let rows = table.rows();
    let last = rows.len().saturating_sub(1);
    // one sample per row plus the trailing hold
    for (index, row) in rows.iter().chain(rows.get(last)).enumerate() {
        let time = index as u64 * step;
        for (signal, value) in signals.iter_mut().zip(&row.values) {
            signal.push(time, u8::from(*value));
        }
        out.push(time, u8::from(row.output));
    }

    let mut waveform: Waveform = signals
        .into_iter()
        .map(|signal| (signal.name.clone(), signal))
        .collect();
    waveform.insert(out.name.clone(), out);
    waveform
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::extract_variables;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_two_inputs() {
        let vars = extract_variables("A | B").unwrap();
        let table = TruthTable::generate("A | B", &vars).unwrap();
        let inputs: Vec<String> = vars.iter().cloned().collect();
        let wave = from_truth_table(&table, &inputs, "Y", 10);

        assert_eq!(wave.len(), 3);
        assert_eq!(wave["A"].times, vec![0, 10, 20, 30, 40]);
        assert_eq!(wave["A"].values, vec![0, 0, 1, 1, 1]);
        assert_eq!(wave["B"].values, vec![0, 1, 0, 1, 1]);
        assert_eq!(wave["Y"].values, vec![0, 1, 1, 1, 1]);
        assert_eq!(wave["Y"].name, "Y");
    }

    #[test]
    fn test_custom_step() {
        let vars = extract_variables("~A").unwrap();
        let table = TruthTable::generate("~A", &vars).unwrap();
        let wave = from_truth_table(&table, &["A".to_string()], "F", 5);
        assert_eq!(wave["F"].times, vec![0, 5, 10]);
        assert_eq!(wave["F"].values, vec![1, 0, 0]);
    }
}
