//! Product terms over the variable set
//!
//! A cube is one AND-term: each variable either appears plain, appears
//! complemented, or is absent.

use crate::expr::VariableSet;
use std::fmt;

/// Value of a single variable in a cube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeValue {
    /// Variable must be false (complemented literal)
    Zero,
    /// Variable must be true (plain literal)
    One,
    /// Variable does not appear in the term
    DontCare,
}

impl CubeValue {
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            CubeValue::One
        } else {
            CubeValue::Zero
        }
    }

    fn to_char(self) -> char {
        match self {
            CubeValue::Zero => '0',
            CubeValue::One => '1',
            CubeValue::DontCare => '-',
        }
    }

    fn is_literal(self) -> bool {
        matches!(self, CubeValue::Zero | CubeValue::One)
    }

    fn accepts(self, bit: bool) -> bool {
        match self {
            CubeValue::Zero => !bit,
            CubeValue::One => bit,
            CubeValue::DontCare => true,
        }
    }
}

/// A product term
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cube {
    inputs: Vec<CubeValue>,
}

impl Cube {
    /// The universal cube (every variable absent), i.e. constant true
    pub fn universal(num_inputs: usize) -> Self {
        Cube {
            inputs: vec![CubeValue::DontCare; num_inputs],
        }
    }

    /// The cube matching exactly one row: every variable appears
    pub fn minterm(values: &[bool]) -> Self {
        Cube {
            inputs: values.iter().map(|&b| CubeValue::from_bit(b)).collect(),
        }
    }

    pub fn inputs(&self) -> &[CubeValue] {
        &self.inputs
    }

    pub fn set(&mut self, index: usize, value: CubeValue) {
        self.inputs[index] = value;
    }

    pub fn literal_count(&self) -> usize {
        self.inputs.iter().filter(|v| v.is_literal()).count()
    }

    /// Whether the row with the given inputs satisfies this term
    pub fn covers(&self, values: &[bool]) -> bool {
        self.inputs.len() == values.len()
            && self
                .inputs
                .iter()
                .zip(values)
                .all(|(cube, &bit)| cube.accepts(bit))
    }

    /// Render as `A & ~B & C`; a term without literals renders as `1`
    pub fn to_term(&self, variables: &VariableSet) -> String {
        let literals: Vec<String> = self
            .inputs
            .iter()
            .zip(variables.iter())
            .filter_map(|(value, name)| match value {
                CubeValue::One => Some(name.clone()),
                CubeValue::Zero => Some(format!("~{}", name)),
                CubeValue::DontCare => None,
            })
            .collect();

        if literals.is_empty() {
            "1".to_string()
        } else {
            literals.join(" & ")
        }
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in &self.inputs {
            write!(f, "{}", v.to_char())?;
        }
        Ok(())
    }
}
