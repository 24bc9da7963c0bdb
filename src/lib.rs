#![doc(html_root_url = "https://docs.rs/symex/0.1.0")]
//! Symex is a symbolic expression engine for real valued formulas. It parses a string into
//! an expression tree, evaluates the tree for given variable values, computes exact
//! derivatives, simplifies trees with a fixed set of rewrite rules, and prints trees with as
//! few parentheses as possible.
//! ```rust
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! #
//! use symex::Evaluator;
//! let mut expr = Evaluator::create("2*x^3 - 4/z")?;
//! assert_eq!(expr.evaluate(&["x", "z"], &[5.3, 0.5])?, 289.75399999999996);
//! #
//! #     Ok(())
//! # }
//! ```
//! The text is simplified right away. To see the result, use the [`Display`](std::fmt::Display)
//! implementation of [`Evaluator`] or the two step protocol of
//! [`calculate_length`](Evaluator::calculate_length) and [`write`](Evaluator::write).
//! ```rust
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! #
//! use symex::Evaluator;
//! let expr = Evaluator::create("(a*1 + b) * c^(3-2)")?;
//! let mut buffer = vec![0u8; expr.calculate_length()];
//! let n_bytes = expr.write(&mut buffer)?;
//! assert_eq!(&buffer[..n_bytes], b"(a+b)*c");
//! #
//! #     Ok(())
//! # }
//! ```
//! Names that are not built-in constants or functions become variables. Built-in constants
//! are `e`, `log2e`, `log10e`, `ln2`, `ln10`, `pi`, `pi_2`, `pi_4`, `sqrt2`, `sqrt1_2`,
//! `inf`, and `nan`. Built-in functions are the trigonometric and hyperbolic functions with
//! their inverses, e.g., `sin`, `sec`, `acot`, `tanh`, `acoth`, as well as `exp`, `log`,
//! `sqrt`, `abs`, `ceil`, and `floor`. Comparisons and the logical operators `&&` and `||`
//! evaluate to `1` or `0`.
//!
//! ## Derivatives
//!
//! Derivatives are new evaluators. They are simplified and work on a copy of the symbol
//! table, hence variables of the derivative and of the original do not influence each
//! other.
//! ```rust
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! #
//! use symex::Evaluator;
//! let mut expr = Evaluator::create("sin(x)*y")?;
//! let mut dexpr_dx = expr.derivative("x")?;
//! assert_eq!(format!("{}", dexpr_dx), "cos(x)*y");
//! assert_eq!(dexpr_dx.evaluate_x_y(0.0, 2.0)?, 2.0);
//! assert_eq!(expr.evaluate_x(0.0)?, 0.0);
//! #
//! #     Ok(())
//! # }
//! ```
//! Comparisons, logical operators, `abs`, `ceil`, `floor`, powers with non-constant
//! exponents, and functions that are only known by name cannot be differentiated.
//!
//! ## Handles
//!
//! [`EvaluatorStore`] owns evaluators and identifies them by integer handles, which is what
//! bindings for other runtimes need.
//!
//! ## Serialization
//!
//! With the feature `serde`, an [`Evaluator`] is serialized as its string representation.
//!
//! ## Logging
//!
//! Symex logs via the [`log`](https://docs.rs/log) facade. The REPL binary initializes
//! [`env_logger`](https://docs.rs/env_logger), e.g., run it with `RUST_LOG=debug`.

mod definitions;
mod evaluator;
mod expression;
mod handles;
mod operators;
mod parser;
mod result;
mod symbol_table;
mod util;

pub use {
    evaluator::Evaluator,
    expression::{
        eval::{eval_tree, evaluate},
        partial::derive,
        simplify::simplify,
        unparse::{measure, unparse, write},
        Node,
    },
    handles::{EvaluatorStore, Handle},
    operators::{BinOp, UnaryOp, BUILTIN_FUNCS},
    parser::parse,
    result::{ExError, ExErrorKind, ExResult},
    symbol_table::{Record, RecordKind, SymbolTable, BUILTIN_CONSTANTS},
};
