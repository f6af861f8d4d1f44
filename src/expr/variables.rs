//! Variable extraction and the ordered variable set

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Largest supported variable count
pub const MAX_VARIABLES: usize = 6;

static SINGLE_LETTER: OnceLock<Regex> = OnceLock::new();

fn single_letter() -> &'static Regex {
    SINGLE_LETTER.get_or_init(|| Regex::new(r"\b[A-Za-z]\b").expect("variable pattern is valid"))
}

/// Ordered, distinct, uppercase single-letter variables (1 to 6 of them)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct VariableSet(Vec<String>);

impl VariableSet {
    /// Build from arbitrary names: uppercased, deduplicated, sorted, then range-checked
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = names
            .into_iter()
            .map(|name| name.as_ref().to_uppercase())
            .collect();
        names.sort();
        names.dedup();

        if names.is_empty() {
            return Err(Error::Validation(
                "No valid variables found in expression".into(),
            ));
        }
        if names.len() > MAX_VARIABLES {
            return Err(Error::Validation(format!(
                "Too many variables (maximum {} allowed, found {})",
                MAX_VARIABLES,
                names.len()
            )));
        }
        Ok(VariableSet(names))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed set; present for API symmetry
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|v| v == name)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of truth-table rows, `2^n`
    pub fn combinations(&self) -> usize {
        1 << self.0.len()
    }
}

impl TryFrom<Vec<String>> for VariableSet {
    type Error = Error;

    fn try_from(names: Vec<String>) -> Result<Self> {
        VariableSet::new(names)
    }
}

impl From<VariableSet> for Vec<String> {
    fn from(set: VariableSet) -> Self {
        set.0
    }
}

impl<'a> IntoIterator for &'a VariableSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Extract the free variables of an expression (raw or normalized).
///
/// A variable is a standalone letter: `A` in `A & B` is one, the letters of
/// `AND`, `A1` or `A_B` are not.
pub fn extract_variables(expression: &str) -> Result<VariableSet> {
    VariableSet::new(
        single_letter()
            .find_iter(expression)
            .map(|m| m.as_str()),
    )
}
