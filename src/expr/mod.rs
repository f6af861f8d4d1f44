//! Boolean expressions — normalization, variable extraction, parsing, evaluation
//!
//! User input is untrusted. It never reaches anything but the closed
//! interpreter in this module: the normalized text is tokenized, parsed into a
//! [`BoolExpr`] tree over `{NOT, AND, OR, XOR, parentheses, 0, 1}` and evaluated
//! against an [`Assignment`].
//!
//! ```rust
//! use kmap_solver::expr::{normalize, parse, Assignment};
//!
//! let normalized = normalize("a and not b");
//! assert_eq!(normalized, "A & ~ B");
//!
//! let expr = parse(&normalized).unwrap();
//! let row = Assignment::new().with("A", true).with("B", false);
//! assert!(expr.eval(&row).unwrap());
//! ```

mod normalize;
mod parser;
mod variables;

pub use normalize::normalize;
pub use parser::{parse, MAX_DEPTH};
pub use variables::{extract_variables, VariableSet, MAX_VARIABLES};

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;

/// Parsed Boolean expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoolExpr {
    Const(bool),
    Var(String),
    Not(Box<BoolExpr>),
    And(Box<BoolExpr>, Box<BoolExpr>),
    Or(Box<BoolExpr>, Box<BoolExpr>),
    Xor(Box<BoolExpr>, Box<BoolExpr>),
}

impl BoolExpr {
    pub fn var(name: impl Into<String>) -> Self {
        BoolExpr::Var(name.into())
    }

    pub fn not(inner: BoolExpr) -> Self {
        BoolExpr::Not(Box::new(inner))
    }

    pub fn and(left: BoolExpr, right: BoolExpr) -> Self {
        BoolExpr::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: BoolExpr, right: BoolExpr) -> Self {
        BoolExpr::Or(Box::new(left), Box::new(right))
    }

    pub fn xor(left: BoolExpr, right: BoolExpr) -> Self {
        BoolExpr::Xor(Box::new(left), Box::new(right))
    }

    /// Evaluate against a variable binding.
    ///
    /// XOR is boolean inequality. Both operands are always evaluated, so a
    /// variable missing from `assignment` is an error on every row, never an
    /// implicit `false`.
    pub fn eval(&self, assignment: &Assignment) -> Result<bool> {
        match self {
            BoolExpr::Const(value) => Ok(*value),
            BoolExpr::Var(name) => assignment.get(name).ok_or_else(|| {
                Error::Evaluation(format!("Variable '{}' is not bound in this row", name))
            }),
            BoolExpr::Not(inner) => Ok(!inner.eval(assignment)?),
            BoolExpr::And(left, right) => {
                let (l, r) = (left.eval(assignment)?, right.eval(assignment)?);
                Ok(l && r)
            }
            BoolExpr::Or(left, right) => {
                let (l, r) = (left.eval(assignment)?, right.eval(assignment)?);
                Ok(l || r)
            }
            BoolExpr::Xor(left, right) => Ok(left.eval(assignment)? != right.eval(assignment)?),
        }
    }

    /// Variable names referenced by this expression, sorted and deduplicated
    pub fn variables(&self) -> Vec<String> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars.sort();
        vars.dedup();
        vars
    }

    fn collect_variables(&self, vars: &mut Vec<String>) {
        match self {
            BoolExpr::Const(_) => {}
            BoolExpr::Var(name) => vars.push(name.clone()),
            BoolExpr::Not(inner) => inner.collect_variables(vars),
            BoolExpr::And(left, right) | BoolExpr::Or(left, right) | BoolExpr::Xor(left, right) => {
                left.collect_variables(vars);
                right.collect_variables(vars);
            }
        }
    }

    /// Render in the given notation, adding parentheses only where precedence needs them
    pub fn render(&self, notation: &Notation) -> String {
        let mut out = String::new();
        self.write(notation, 0, &mut out);
        out
    }

    /// Textbook notation: `A·B + ¬C`
    pub fn to_pretty(&self) -> String {
        self.render(&Notation::PRETTY)
    }

    fn precedence(&self) -> u8 {
        match self {
            BoolExpr::Or(..) => 1,
            BoolExpr::And(..) => 2,
            BoolExpr::Xor(..) => 3,
            BoolExpr::Not(_) => 4,
            BoolExpr::Const(_) | BoolExpr::Var(_) => 5,
        }
    }

    fn write(&self, notation: &Notation, parent: u8, out: &mut String) {
        let prec = self.precedence();
        let wrap = prec < parent;
        if wrap {
            out.push('(');
        }
        match self {
            BoolExpr::Const(true) => out.push_str(notation.one),
            BoolExpr::Const(false) => out.push_str(notation.zero),
            BoolExpr::Var(name) => out.push_str(name),
            BoolExpr::Not(inner) => {
                out.push_str(notation.not);
                inner.write(notation, prec, out);
            }
            BoolExpr::And(left, right) => write_binary(left, right, notation.and, notation, prec, out),
            BoolExpr::Or(left, right) => write_binary(left, right, notation.or, notation, prec, out),
            BoolExpr::Xor(left, right) => write_binary(left, right, notation.xor, notation, prec, out),
        }
        if wrap {
            out.push(')');
        }
    }
}

fn write_binary(
    left: &BoolExpr,
    right: &BoolExpr,
    op: &str,
    notation: &Notation,
    prec: u8,
    out: &mut String,
) {
    left.write(notation, prec, out);
    out.push_str(op);
    right.write(notation, prec + 1, out);
}

impl fmt::Display for BoolExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Notation::CANONICAL))
    }
}

/// Operator spelling used when rendering a [`BoolExpr`]
#[derive(Debug, Clone, Copy)]
pub struct Notation {
    pub and: &'static str,
    pub or: &'static str,
    pub xor: &'static str,
    pub not: &'static str,
    pub one: &'static str,
    pub zero: &'static str,
}

impl Notation {
    /// The operator set accepted by [`parse`]; output re-parses to an equal truth table
    pub const CANONICAL: Notation = Notation {
        and: " & ",
        or: " | ",
        xor: " ^ ",
        not: "~",
        one: "1",
        zero: "0",
    };

    pub const PRETTY: Notation = Notation {
        and: "·",
        or: " + ",
        xor: " ⊕ ",
        not: "¬",
        one: "1",
        zero: "0",
    };
}

/// Variable-to-value binding for a single evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: BTreeMap<String, bool>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style binding
    pub fn with(mut self, name: impl Into<String>, value: bool) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: bool) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.values.get(name).copied()
    }

    /// Binding for truth-table row `index`: bit j (most significant first) goes to `variables[j]`
    pub fn from_index(variables: &VariableSet, index: usize) -> Self {
        let n = variables.len();
        let mut assignment = Self::new();
        for (j, name) in variables.iter().enumerate() {
            assignment.set(name.clone(), (index >> (n - 1 - j)) & 1 == 1);
        }
        assignment
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
