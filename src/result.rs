use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Category of an [`ExError`](ExError).
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum ExErrorKind {
    /// The text could not be parsed into an expression.
    Parse,
    /// An expression contains a part that cannot be differentiated.
    Differentiation,
    /// An expression contains a part that cannot be evaluated, e.g., a call of a
    /// function that is only known by name.
    Evaluation,
    /// The caller broke a contract, e.g., passed a destroyed handle or a buffer that
    /// is too short.
    Misuse,
}

impl Display for ExErrorKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            ExErrorKind::Parse => "parse error",
            ExErrorKind::Differentiation => "differentiation error",
            ExErrorKind::Evaluation => "evaluation error",
            ExErrorKind::Misuse => "misuse",
        };
        write!(f, "{}", name)
    }
}

/// This will be thrown at you if something within Symex went wrong. Ok, obviously it is not an
/// exception, so thrown needs to be understood figuratively.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct ExError {
    pub kind: ExErrorKind,
    pub msg: String,
}
impl ExError {
    pub fn new(kind: ExErrorKind, msg: &str) -> ExError {
        ExError {
            kind,
            msg: msg.to_string(),
        }
    }
}
impl Display for ExError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.msg)
    }
}
impl Error for ExError {}

/// Symex' result type with [`ExError`](ExError) as error type.
pub type ExResult<U> = Result<U, ExError>;

/// Creates an [`ExError`](ExError) of the given kind with a formatted message.
///
/// ```rust
/// use symex::{format_exerr, ExErrorKind};
/// let err = format_exerr!(Misuse, "handle {} is unknown", 3);
/// assert_eq!(err.kind, ExErrorKind::Misuse);
/// assert_eq!(err.msg, "handle 3 is unknown");
/// ```
#[macro_export]
macro_rules! format_exerr {
    ($kind:ident, $s:literal $(, $exps:expr )*) => {
        $crate::ExError::new($crate::ExErrorKind::$kind, format!($s $(, $exps)*).as_str())
    }
}

/// Returns early with an error of the given kind and a formatted message.
#[macro_export]
macro_rules! exerr {
    ($kind:ident, $s:literal $(, $exps:expr )*) => {
        return Err($crate::format_exerr!($kind, $s $(, $exps)*))
    }
}

#[test]
fn test_display() {
    let err = format_exerr!(Parse, "cannot parse {}", "1+");
    assert_eq!(format!("{}", err), "parse error: cannot parse 1+");
    let err = ExError::new(ExErrorKind::Differentiation, "abs is not differentiable");
    assert_eq!(
        err.to_string(),
        "differentiation error: abs is not differentiable"
    );
}
