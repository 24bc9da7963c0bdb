use std::collections::HashMap;

use crate::{
    definitions::MIN_TABLE_LENGTH,
    operators::{UnaryOp, BUILTIN_FUNCS},
};

/// Named constants every table created for parsing knows about.
pub const BUILTIN_CONSTANTS: [(&str, f64); 12] = [
    ("e", std::f64::consts::E),
    ("log2e", std::f64::consts::LOG2_E),
    ("log10e", std::f64::consts::LOG10_E),
    ("ln2", std::f64::consts::LN_2),
    ("ln10", std::f64::consts::LN_10),
    ("pi", std::f64::consts::PI),
    ("pi_2", std::f64::consts::FRAC_PI_2),
    ("pi_4", std::f64::consts::FRAC_PI_4),
    ("sqrt2", std::f64::consts::SQRT_2),
    ("sqrt1_2", std::f64::consts::FRAC_1_SQRT_2),
    ("inf", f64::INFINITY),
    ("nan", f64::NAN),
];

/// What a name stands for. The kind of a record never changes, only the value of a
/// variable does.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum RecordKind {
    Variable { value: f64 },
    Constant { value: f64 },
    /// A function of fixed arity. Built-in functions carry their operator, user
    /// defined functions are only known by name.
    Function {
        arity: usize,
        builtin: Option<UnaryOp>,
    },
}

impl RecordKind {
    pub fn is_variable(&self) -> bool {
        matches!(self, RecordKind::Variable { .. })
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Record {
    pub name: String,
    pub kind: RecordKind,
}

impl Record {
    /// Value of a variable or a constant, `None` for functions.
    pub fn value(&self) -> Option<f64> {
        match self.kind {
            RecordKind::Variable { value } | RecordKind::Constant { value } => Some(value),
            RecordKind::Function { .. } => None,
        }
    }
}

/// Directory that resolves names to variables, constants, and functions. Each
/// [`Evaluator`](crate::Evaluator) owns exactly one table.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct SymbolTable {
    records: HashMap<String, Record>,
}

impl SymbolTable {
    /// Creates an empty table.
    ///
    /// # Arguments
    ///
    /// * `capacity_hint` - expected number of records
    ///
    pub fn create(capacity_hint: usize) -> SymbolTable {
        SymbolTable {
            records: HashMap::with_capacity(capacity_hint),
        }
    }

    /// Creates a table that contains all built-in constants and functions.
    pub fn with_builtins() -> SymbolTable {
        let mut table = SymbolTable::create(MIN_TABLE_LENGTH);
        for (name, value) in BUILTIN_CONSTANTS {
            table.insert_or_get(name, RecordKind::Constant { value });
        }
        for op in BUILTIN_FUNCS {
            table.insert_or_get(
                op.repr(),
                RecordKind::Function {
                    arity: 1,
                    builtin: Some(op),
                },
            );
        }
        table
    }

    pub fn lookup(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    /// Returns the record with the given name. If there is none, a record with the
    /// passed kind is inserted first. An existing record is never changed.
    pub fn insert_or_get(&mut self, name: &str, kind: RecordKind) -> &Record {
        self.records
            .entry(name.to_string())
            .or_insert_with(|| Record {
                name: name.to_string(),
                kind,
            })
    }

    /// Deep copy of all records. Variables keep their current values, but changes to
    /// them are not shared between the copy and the original.
    pub fn copy(&self) -> SymbolTable {
        SymbolTable {
            records: self
                .records
                .iter()
                .map(|(name, record)| (name.clone(), record.clone()))
                .collect(),
        }
    }

    /// Assigns a value to a variable. Returns `false` and does nothing if the name is
    /// unknown or not a variable.
    pub fn set_value(&mut self, name: &str, new_value: f64) -> bool {
        match self.records.get_mut(name) {
            Some(Record {
                kind: RecordKind::Variable { value },
                ..
            }) => {
                *value = new_value;
                true
            }
            _ => false,
        }
    }

    /// Current value of a variable or value of a constant.
    pub fn value(&self, name: &str) -> Option<f64> {
        self.lookup(name).and_then(Record::value)
    }

    /// Names of all variables in alphabetical order.
    pub fn variable_names(&self) -> Vec<&str> {
        let mut names = self
            .records
            .values()
            .filter(|r| r.kind.is_variable())
            .map(|r| r.name.as_str())
            .collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
