use std::{
    fmt::{self, Display, Formatter},
    iter,
    str::FromStr,
};

use log::debug;

use crate::{
    exerr,
    expression::{eval, partial::derive_simplified, simplify::simplify, unparse, Node},
    parser,
    symbol_table::SymbolTable,
    ExError, ExResult,
};

/// Pairs an expression tree with the symbol table that resolves its names. An evaluator
/// exclusively owns both, so binding a variable of one evaluator never affects another.
///
/// ```rust
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// #
/// use symex::Evaluator;
///
/// let mut expr = Evaluator::create("x^2 + 0*y")?;
/// assert_eq!(expr.to_string(), "x^2");
/// assert_eq!(expr.evaluate(&["x", "y"], &[3.0, 1.0])?, 9.0);
///
/// let mut dexpr_dx = expr.derivative_x()?;
/// assert_eq!(dexpr_dx.to_string(), "2*x");
/// assert_eq!(dexpr_dx.evaluate_x(3.0)?, 6.0);
/// #
/// #     Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct Evaluator {
    root: Node,
    table: SymbolTable,
}

impl Evaluator {
    /// Parses a formula and simplifies the result.
    ///
    /// # Errors
    ///
    /// An [`ExError`](crate::ExError) of kind `Parse` is returned if the text is not a
    /// valid formula.
    ///
    pub fn create(text: &str) -> ExResult<Evaluator> {
        let mut table = SymbolTable::with_builtins();
        let raw = parser::parse(text, &mut table)?;
        debug!("parsed '{}' into {} nodes", text, raw.n_nodes());
        let root = simplify(raw);
        debug!("simplified to {} nodes", root.n_nodes());
        Ok(Evaluator { root, table })
    }

    /// Wraps an existing tree. The table needs to know all names the tree references.
    pub fn from_tree(root: Node, table: SymbolTable) -> Evaluator {
        Evaluator { root, table }
    }

    /// Evaluates the expression after assigning `values[i]` to the variable `names[i]`.
    /// Names that are not variables of this evaluator are ignored.
    ///
    /// # Errors
    ///
    /// An [`ExError`](crate::ExError) of kind `Misuse` is returned if the lengths of
    /// `names` and `values` differ. In this case no variable is changed. An error of
    /// kind `Evaluation` is returned if the expression calls a function that is only
    /// known by name.
    ///
    pub fn evaluate(&mut self, names: &[&str], values: &[f64]) -> ExResult<f64> {
        if names.len() != values.len() {
            exerr!(
                Misuse,
                "{} names but {} values passed",
                names.len(),
                values.len()
            );
        }
        self.evaluate_bindings(names.iter().copied().zip(values.iter().copied()))
    }

    /// Evaluates the expression after assigning the passed values to variables.
    pub fn evaluate_bindings<'a, I>(&mut self, bindings: I) -> ExResult<f64>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        eval::evaluate(&self.root, &mut self.table, bindings)
    }

    pub fn evaluate_x(&mut self, x: f64) -> ExResult<f64> {
        self.evaluate_bindings([("x", x)])
    }

    pub fn evaluate_x_y(&mut self, x: f64, y: f64) -> ExResult<f64> {
        self.evaluate_bindings([("x", x), ("y", y)])
    }

    pub fn evaluate_x_y_z(&mut self, x: f64, y: f64, z: f64) -> ExResult<f64> {
        self.evaluate_bindings([("x", x), ("y", y), ("z", z)])
    }

    /// Number of bytes [`Evaluator::write`] needs.
    pub fn calculate_length(&self) -> usize {
        unparse::measure(&self.root)
    }

    /// Writes the textual representation of the expression into `buffer` and returns
    /// the number of bytes written.
    ///
    /// # Errors
    ///
    /// An [`ExError`](crate::ExError) of kind `Misuse` is returned if `buffer` is
    /// shorter than [`Evaluator::calculate_length`].
    ///
    pub fn write(&self, buffer: &mut [u8]) -> ExResult<usize> {
        unparse::write(&self.root, buffer)
    }

    /// Computes the simplified derivative with respect to the variable `name`. The new
    /// evaluator works on a copy of this evaluator's table, i.e., it knows the same
    /// variables with their current values.
    ///
    /// # Errors
    ///
    /// An [`ExError`](crate::ExError) of kind `Differentiation` is returned if the
    /// expression contains parts that cannot be differentiated. `self` is unchanged.
    ///
    pub fn derivative(&self, name: &str) -> ExResult<Evaluator> {
        let root = derive_simplified(&self.root, &self.table, name)?;
        debug!(
            "derivative of {} with respect to {} is {}",
            self,
            name,
            unparse::unparse(&root)
        );
        Ok(Evaluator {
            root,
            table: self.table.copy(),
        })
    }

    pub fn derivative_x(&self) -> ExResult<Evaluator> {
        self.derivative("x")
    }

    pub fn derivative_y(&self) -> ExResult<Evaluator> {
        self.derivative("y")
    }

    pub fn derivative_z(&self) -> ExResult<Evaluator> {
        self.derivative("z")
    }

    /// Computes a chain of derivatives with respect to the passed names.
    ///
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// #
    /// use symex::Evaluator;
    ///
    /// let expr = Evaluator::create("x^4*y^2")?;
    /// let mut d_xy = expr.derivative_iter(["x", "y"])?;
    /// assert_eq!(d_xy.evaluate_x_y(1.0, 1.0)?, 8.0);
    /// #
    /// #     Ok(())
    /// # }
    /// ```
    pub fn derivative_iter<'a, I>(&self, names: I) -> ExResult<Evaluator>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .try_fold(self.clone(), |evaluator, name| evaluator.derivative(name))
    }

    /// Computes the `n`-th derivative with respect to `name`.
    pub fn derivative_nth(&self, name: &str, n: usize) -> ExResult<Evaluator> {
        self.derivative_iter(iter::repeat(name).take(n))
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    /// Variables in alphabetical order. A derivative knows the same variables as the
    /// evaluator it was computed from, even if they do not occur in its expression.
    pub fn var_names(&self) -> Vec<&str> {
        self.table.variable_names()
    }
}

impl Display for Evaluator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        unparse::unparse_into(&self.root, f)
    }
}

impl FromStr for Evaluator {
    type Err = ExError;
    fn from_str(s: &str) -> ExResult<Evaluator> {
        Evaluator::create(s)
    }
}
