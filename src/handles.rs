use std::collections::HashMap;

use log::debug;

use crate::{format_exerr, Evaluator, ExResult};

/// Opaque token for an evaluator that lives in an [`EvaluatorStore`]. Handles are
/// never reused, so a destroyed handle stays invalid.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Handle(u64);

impl Handle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Owns evaluators and hands out integer tokens for them. This is the surface bindings
/// for other runtimes marshal to, where a handle is a plain integer.
///
/// ```rust
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// #
/// use symex::EvaluatorStore;
///
/// let mut store = EvaluatorStore::new();
/// let f = store.create("x*y")?;
/// let df_dx = store.derivative_x(f)?;
/// assert_eq!(store.evaluate(df_dx, &["y"], &[4.0])?, 4.0);
/// store.destroy(f)?;
/// assert!(store.evaluate_x(f, 1.0).is_err());
/// #
/// #     Ok(())
/// # }
/// ```
#[derive(Default, Debug)]
pub struct EvaluatorStore {
    evaluators: HashMap<u64, Evaluator>,
    next_id: u64,
}

impl EvaluatorStore {
    pub fn new() -> EvaluatorStore {
        EvaluatorStore::default()
    }

    fn insert(&mut self, evaluator: Evaluator) -> Handle {
        let handle = Handle(self.next_id);
        self.next_id += 1;
        self.evaluators.insert(handle.0, evaluator);
        handle
    }

    /// Returns the evaluator behind a handle.
    ///
    /// # Errors
    ///
    /// An [`ExError`](crate::ExError) of kind `Misuse` is returned for unknown or
    /// destroyed handles. The same holds for all other methods taking a handle.
    ///
    pub fn get(&self, handle: Handle) -> ExResult<&Evaluator> {
        self.evaluators
            .get(&handle.0)
            .ok_or_else(|| format_exerr!(Misuse, "invalid handle {}", handle.0))
    }

    fn get_mut(&mut self, handle: Handle) -> ExResult<&mut Evaluator> {
        self.evaluators
            .get_mut(&handle.0)
            .ok_or_else(|| format_exerr!(Misuse, "invalid handle {}", handle.0))
    }

    pub fn create(&mut self, text: &str) -> ExResult<Handle> {
        let evaluator = Evaluator::create(text)?;
        let handle = self.insert(evaluator);
        debug!("created handle {} for '{}'", handle.0, text);
        Ok(handle)
    }

    pub fn destroy(&mut self, handle: Handle) -> ExResult<()> {
        self.evaluators
            .remove(&handle.0)
            .map(|_| debug!("destroyed handle {}", handle.0))
            .ok_or_else(|| format_exerr!(Misuse, "invalid handle {}", handle.0))
    }

    pub fn evaluate(&mut self, handle: Handle, names: &[&str], values: &[f64]) -> ExResult<f64> {
        self.get_mut(handle)?.evaluate(names, values)
    }

    pub fn evaluate_x(&mut self, handle: Handle, x: f64) -> ExResult<f64> {
        self.get_mut(handle)?.evaluate_x(x)
    }

    pub fn evaluate_x_y(&mut self, handle: Handle, x: f64, y: f64) -> ExResult<f64> {
        self.get_mut(handle)?.evaluate_x_y(x, y)
    }

    pub fn evaluate_x_y_z(&mut self, handle: Handle, x: f64, y: f64, z: f64) -> ExResult<f64> {
        self.get_mut(handle)?.evaluate_x_y_z(x, y, z)
    }

    pub fn calculate_length(&self, handle: Handle) -> ExResult<usize> {
        Ok(self.get(handle)?.calculate_length())
    }

    pub fn write(&self, handle: Handle, buffer: &mut [u8]) -> ExResult<usize> {
        self.get(handle)?.write(buffer)
    }

    pub fn var_names(&self, handle: Handle) -> ExResult<Vec<&str>> {
        Ok(self.get(handle)?.var_names())
    }

    /// Stores the derivative of the evaluator behind `handle` under a new handle. The
    /// original evaluator stays valid.
    pub fn derivative(&mut self, handle: Handle, name: &str) -> ExResult<Handle> {
        let derivative = self.get(handle)?.derivative(name)?;
        Ok(self.insert(derivative))
    }

    pub fn derivative_x(&mut self, handle: Handle) -> ExResult<Handle> {
        self.derivative(handle, "x")
    }

    pub fn derivative_y(&mut self, handle: Handle) -> ExResult<Handle> {
        self.derivative(handle, "y")
    }

    pub fn derivative_z(&mut self, handle: Handle) -> ExResult<Handle> {
        self.derivative(handle, "z")
    }

    pub fn len(&self) -> usize {
        self.evaluators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluators.is_empty()
    }
}
