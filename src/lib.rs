// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # kmap-solver — Boolean expressions, truth tables, Karnaugh maps, Verilog
//!
//! Takes an infix Boolean expression over up to six single-letter variables
//! and derives everything a digital-logic student or a test bench needs.
//!
//! ## Quick Start
//!
//! ```rust
//! use kmap_solver::{build_kmap, solve};
//!
//! let solution = solve("a and not b or c")?;
//! assert_eq!(solution.variables.as_slice(), ["A", "B", "C"]);
//! assert_eq!(solution.truth_table.len(), 8);
//!
//! let kmap = build_kmap(&solution.truth_table, &solution.variables).unwrap();
//! assert_eq!(kmap.rows(), 2);
//! assert_eq!(kmap.cols(), 4);
//! # Ok::<(), kmap_solver::Error>(())
//! ```
//!
//! ## Expression Syntax
//!
//! | Operator | Symbols        | Precedence |
//! |----------|----------------|------------|
//! | NOT      | `~`, `!`, `NOT`| tightest   |
//! | XOR      | `^`, `XOR`     |            |
//! | AND      | `&`, `AND`     |            |
//! | OR       | `\|`, `OR`     | loosest    |
//!
//! Constants are `0`/`1` (or `FALSE`/`TRUE`). Variables are single letters,
//! case-insensitive. Evaluation is a closed interpreter over a parsed AST.
//!
//! ## Architecture
//!
//! ```text
//! expression ──► normalize ──► extract_variables ──► parse
//!                                                      │
//!                                        TruthTable ◄──┘
//!                                        │        │
//!                         simplify_with ◄┘        └► build_kmap
//!
//! expression + VariableSet ──► Renderer ──► HardwareModule
//!                                               │
//!                          simulate_best_effort ◄┘ ──► Waveform
//! ```

pub mod config;
pub mod error;
pub mod expr;
pub mod kmap;
pub mod render;
pub mod service;
pub mod simplify;
pub mod simulate;
pub mod solve;
pub mod templates;
pub mod truth_table;

pub use config::Config;
pub use error::{Error, Result};
pub use expr::{extract_variables, normalize, parse, Assignment, BoolExpr, VariableSet};
pub use kmap::{build_kmap, KMap};
pub use render::{emit_hardware_description, HardwareModule, RenderConfig, Renderer};
pub use simplify::{simplify, simplify_with, SimplifyMode};
pub use simulate::{simulate_best_effort, SimulationReport, WaveformProducer};
pub use solve::{solve, solve_with, Solution};
pub use truth_table::{TruthTable, TruthTableRow};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
