use crate::definitions::N_OPS_ON_STACK;
use num::Float;
use smallvec::{smallvec, SmallVec};

/// Priority of `||`, the loosest binding operator.
pub const PRIO_OR: i32 = 1;
/// Priority of `&&`.
pub const PRIO_AND: i32 = 2;
/// Priority shared by all comparison operators.
pub const PRIO_CMP: i32 = 3;
/// Priority of `+` and `-`.
pub const PRIO_ADD: i32 = 4;
/// Priority of `*` and `/`.
pub const PRIO_MUL: i32 = 5;
/// Priority of the unary minus. It binds tighter than `*` but looser than `^`,
/// hence `-x^2 == -(x^2)`.
pub const PRIO_NEG: i32 = 6;
/// Priority of `^`.
pub const PRIO_POW: i32 = 7;
/// Priority of everything that never needs parentheses, i.e., numbers, variables, and
/// function applications.
pub const PRIO_ATOM: i32 = 8;

fn truthy<T: Float>(x: T) -> bool {
    x != T::zero()
}

fn from_bool<T: Float>(b: bool) -> T {
    if b {
        T::one()
    } else {
        T::zero()
    }
}

/// Binary operators. Arithmetic operators and comparison or logical operators share
/// this type. The latter evaluate to `1` for true and `0` for false.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,
}

impl BinOp {
    /// Canonical representation that is used for printing.
    pub fn repr(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Pow => "^",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::Eq => "=",
            BinOp::Ne => "!=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }

    /// Priority of the binary operation. A binary operation with a
    /// higher number binds tighter.
    pub fn prio(self) -> i32 {
        match self {
            BinOp::Or => PRIO_OR,
            BinOp::And => PRIO_AND,
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge | BinOp::Eq | BinOp::Ne => PRIO_CMP,
            BinOp::Add | BinOp::Sub => PRIO_ADD,
            BinOp::Mul | BinOp::Div => PRIO_MUL,
            BinOp::Pow => PRIO_POW,
        }
    }

    pub fn is_right_assoc(self) -> bool {
        self == BinOp::Pow
    }

    pub fn apply<T: Float>(self, a: T, b: T) -> T {
        match self {
            BinOp::Add => a + b,
            BinOp::Sub => a - b,
            BinOp::Mul => a * b,
            BinOp::Div => a / b,
            BinOp::Pow => a.powf(b),
            BinOp::Lt => from_bool(a < b),
            BinOp::Le => from_bool(a <= b),
            BinOp::Gt => from_bool(a > b),
            BinOp::Ge => from_bool(a >= b),
            BinOp::Eq => from_bool(a == b),
            BinOp::Ne => from_bool(a != b),
            BinOp::And => from_bool(truthy(a) && truthy(b)),
            BinOp::Or => from_bool(truthy(a) || truthy(b)),
        }
    }
}

/// Unary operators, i.e., the negation and all built-in elementary functions.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum UnaryOp {
    Neg,
    Sin,
    Cos,
    Tan,
    Cot,
    Sec,
    Csc,
    Asin,
    Acos,
    Atan,
    Acot,
    Sinh,
    Cosh,
    Tanh,
    Coth,
    Sech,
    Csch,
    Asinh,
    Acosh,
    Atanh,
    Acoth,
    Exp,
    Log,
    Sqrt,
    Abs,
    Ceil,
    Floor,
}

/// All unary operators that are applied with function syntax, e.g., `sin(x)`.
pub const BUILTIN_FUNCS: [UnaryOp; 26] = [
    UnaryOp::Sin,
    UnaryOp::Cos,
    UnaryOp::Tan,
    UnaryOp::Cot,
    UnaryOp::Sec,
    UnaryOp::Csc,
    UnaryOp::Asin,
    UnaryOp::Acos,
    UnaryOp::Atan,
    UnaryOp::Acot,
    UnaryOp::Sinh,
    UnaryOp::Cosh,
    UnaryOp::Tanh,
    UnaryOp::Coth,
    UnaryOp::Sech,
    UnaryOp::Csch,
    UnaryOp::Asinh,
    UnaryOp::Acosh,
    UnaryOp::Atanh,
    UnaryOp::Acoth,
    UnaryOp::Exp,
    UnaryOp::Log,
    UnaryOp::Sqrt,
    UnaryOp::Abs,
    UnaryOp::Ceil,
    UnaryOp::Floor,
];

impl UnaryOp {
    /// Name of the function or `-` in case of the negation.
    pub fn repr(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Sin => "sin",
            UnaryOp::Cos => "cos",
            UnaryOp::Tan => "tan",
            UnaryOp::Cot => "cot",
            UnaryOp::Sec => "sec",
            UnaryOp::Csc => "csc",
            UnaryOp::Asin => "asin",
            UnaryOp::Acos => "acos",
            UnaryOp::Atan => "atan",
            UnaryOp::Acot => "acot",
            UnaryOp::Sinh => "sinh",
            UnaryOp::Cosh => "cosh",
            UnaryOp::Tanh => "tanh",
            UnaryOp::Coth => "coth",
            UnaryOp::Sech => "sech",
            UnaryOp::Csch => "csch",
            UnaryOp::Asinh => "asinh",
            UnaryOp::Acosh => "acosh",
            UnaryOp::Atanh => "atanh",
            UnaryOp::Acoth => "acoth",
            UnaryOp::Exp => "exp",
            UnaryOp::Log => "log",
            UnaryOp::Sqrt => "sqrt",
            UnaryOp::Abs => "abs",
            UnaryOp::Ceil => "ceil",
            UnaryOp::Floor => "floor",
        }
    }

    /// Looks up a built-in function by its name. The negation is not a function and
    /// hence not found.
    pub fn from_func_name(name: &str) -> Option<UnaryOp> {
        BUILTIN_FUNCS.iter().copied().find(|op| op.repr() == name)
    }

    pub fn apply<T: Float>(self, a: T) -> T {
        match self {
            UnaryOp::Neg => -a,
            UnaryOp::Sin => a.sin(),
            UnaryOp::Cos => a.cos(),
            UnaryOp::Tan => a.tan(),
            UnaryOp::Cot => a.tan().recip(),
            UnaryOp::Sec => a.cos().recip(),
            UnaryOp::Csc => a.sin().recip(),
            UnaryOp::Asin => a.asin(),
            UnaryOp::Acos => a.acos(),
            UnaryOp::Atan => a.atan(),
            UnaryOp::Acot => a.recip().atan(),
            UnaryOp::Sinh => a.sinh(),
            UnaryOp::Cosh => a.cosh(),
            UnaryOp::Tanh => a.tanh(),
            UnaryOp::Coth => a.tanh().recip(),
            UnaryOp::Sech => a.cosh().recip(),
            UnaryOp::Csch => a.sinh().recip(),
            UnaryOp::Asinh => a.asinh(),
            UnaryOp::Acosh => a.acosh(),
            UnaryOp::Atanh => a.atanh(),
            UnaryOp::Acoth => a.recip().atanh(),
            UnaryOp::Exp => a.exp(),
            UnaryOp::Log => a.ln(),
            UnaryOp::Sqrt => a.sqrt(),
            UnaryOp::Abs => a.abs(),
            UnaryOp::Ceil => a.ceil(),
            UnaryOp::Floor => a.floor(),
        }
    }
}

/// Symbolic operators as they appear in the string to be parsed. Function names like
/// `sin` are identifiers and resolved through the symbol table instead.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Operator {
    /// Representation of the operator in the string to be parsed, e.g., `-` or `<=`.
    pub repr: &'static str,
    pub bin_op: BinOp,
    /// Only `-` has a unary counterpart with a node of its own.
    pub unary_op: Option<UnaryOp>,
}

impl Operator {
    const fn bin(repr: &'static str, bin_op: BinOp) -> Operator {
        Operator {
            repr,
            bin_op,
            unary_op: None,
        }
    }

    /// `+` and `-` can be used as prefix. A prefix `+` is dropped while parsing.
    pub fn is_prefix(&self) -> bool {
        matches!(self.bin_op, BinOp::Add | BinOp::Sub)
    }
}

/// Returns the default operators sorted inverse alphabetically such that `<=` is
/// found before `<` when tokenizing.
pub fn make_default_operators() -> SmallVec<[Operator; N_OPS_ON_STACK]> {
    let mut ops: SmallVec<[Operator; N_OPS_ON_STACK]> = smallvec![
        Operator::bin("+", BinOp::Add),
        Operator {
            repr: "-",
            bin_op: BinOp::Sub,
            unary_op: Some(UnaryOp::Neg),
        },
        Operator::bin("*", BinOp::Mul),
        Operator::bin("/", BinOp::Div),
        Operator::bin("^", BinOp::Pow),
        Operator::bin("<", BinOp::Lt),
        Operator::bin("<=", BinOp::Le),
        Operator::bin(">", BinOp::Gt),
        Operator::bin(">=", BinOp::Ge),
        Operator::bin("=", BinOp::Eq),
        Operator::bin("==", BinOp::Eq),
        Operator::bin("!=", BinOp::Ne),
        Operator::bin("<>", BinOp::Ne),
        Operator::bin("&&", BinOp::And),
        Operator::bin("||", BinOp::Or),
        Operator::bin("**", BinOp::Pow),
    ];
    ops.sort_unstable_by(|o1, o2| o2.repr.cmp(o1.repr));
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_ops() {
        let ops = make_default_operators();
        let pos = |repr: &str| ops.iter().position(|op| op.repr == repr).unwrap();
        assert!(pos("<=") < pos("<"));
        assert!(pos("<>") < pos("<"));
        assert!(pos("==") < pos("="));
        assert!(pos("**") < pos("*"));
    }

    #[test]
    fn test_apply() {
        assert_eq!(BinOp::Sub.apply(1.0, 3.0), -2.0);
        assert_eq!(BinOp::Pow.apply(2.0, 10.0), 1024.0);
        assert_eq!(BinOp::Div.apply(1.0, 0.0), f64::INFINITY);
        assert_eq!(BinOp::Div.apply(-1.0, 0.0), f64::NEG_INFINITY);
        assert!(BinOp::Div.apply(0.0f64, 0.0).is_nan());
        assert_eq!(BinOp::Le.apply(2.0, 2.0), 1.0);
        assert_eq!(BinOp::Ne.apply(2.0, 2.0), 0.0);
        assert_eq!(BinOp::And.apply(2.0, 0.0), 0.0);
        assert_eq!(BinOp::Or.apply(0.0, -3.0), 1.0);
        assert_eq!(UnaryOp::Neg.apply(2.5), -2.5);
        assert_eq!(UnaryOp::Floor.apply(-2.5), -3.0);
        assert!((UnaryOp::Sec.apply(0.3f64) - 1.0 / 0.3f64.cos()).abs() < 1e-15);
        assert!((UnaryOp::Acoth.apply(2.0f64) - 0.5f64.atanh()).abs() < 1e-15);
    }

    #[test]
    fn test_func_names() {
        for op in BUILTIN_FUNCS {
            assert_eq!(UnaryOp::from_func_name(op.repr()), Some(op));
        }
        assert_eq!(UnaryOp::from_func_name("-"), None);
        assert_eq!(UnaryOp::from_func_name("ln"), None);
    }
}
