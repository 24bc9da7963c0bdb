use crate::{
    exerr,
    expression::{simplify::simplify, Node},
    operators::{BinOp, UnaryOp},
    symbol_table::{RecordKind, SymbolTable},
    ExResult,
};

fn num(x: f64) -> Node {
    Node::Num(x)
}
fn add(a: Node, b: Node) -> Node {
    Node::bin(BinOp::Add, a, b)
}
fn sub(a: Node, b: Node) -> Node {
    Node::bin(BinOp::Sub, a, b)
}
fn mul(a: Node, b: Node) -> Node {
    Node::bin(BinOp::Mul, a, b)
}
fn div(a: Node, b: Node) -> Node {
    Node::bin(BinOp::Div, a, b)
}
fn pow(a: Node, b: Node) -> Node {
    Node::bin(BinOp::Pow, a, b)
}
fn squared(a: Node) -> Node {
    pow(a, num(2.0))
}
fn un(op: UnaryOp, a: Node) -> Node {
    Node::unary(op, a)
}

/// Derivative of the function `op` evaluated at `a`, i.e., the outer derivative of
/// the chain rule.
fn outer_derivative(op: UnaryOp, a: &Node) -> ExResult<Node> {
    let a = a.clone();
    Ok(match op {
        UnaryOp::Neg => num(-1.0),
        UnaryOp::Exp => un(UnaryOp::Exp, a),
        UnaryOp::Log => div(num(1.0), a),
        UnaryOp::Sqrt => div(num(1.0), mul(num(2.0), un(UnaryOp::Sqrt, a))),
        UnaryOp::Sin => un(UnaryOp::Cos, a),
        UnaryOp::Cos => Node::neg(un(UnaryOp::Sin, a)),
        UnaryOp::Tan => div(num(1.0), squared(un(UnaryOp::Cos, a))),
        UnaryOp::Cot => Node::neg(div(num(1.0), squared(un(UnaryOp::Sin, a)))),
        UnaryOp::Sec => mul(un(UnaryOp::Sec, a.clone()), un(UnaryOp::Tan, a)),
        UnaryOp::Csc => Node::neg(mul(un(UnaryOp::Csc, a.clone()), un(UnaryOp::Cot, a))),
        UnaryOp::Asin => div(num(1.0), un(UnaryOp::Sqrt, sub(num(1.0), squared(a)))),
        UnaryOp::Acos => Node::neg(div(num(1.0), un(UnaryOp::Sqrt, sub(num(1.0), squared(a))))),
        UnaryOp::Atan => div(num(1.0), add(num(1.0), squared(a))),
        UnaryOp::Acot => Node::neg(div(num(1.0), add(num(1.0), squared(a)))),
        UnaryOp::Sinh => un(UnaryOp::Cosh, a),
        UnaryOp::Cosh => un(UnaryOp::Sinh, a),
        UnaryOp::Tanh => div(num(1.0), squared(un(UnaryOp::Cosh, a))),
        UnaryOp::Coth => Node::neg(div(num(1.0), squared(un(UnaryOp::Sinh, a)))),
        UnaryOp::Sech => Node::neg(mul(un(UnaryOp::Sech, a.clone()), un(UnaryOp::Tanh, a))),
        UnaryOp::Csch => Node::neg(mul(un(UnaryOp::Csch, a.clone()), un(UnaryOp::Coth, a))),
        UnaryOp::Asinh => div(num(1.0), un(UnaryOp::Sqrt, add(squared(a), num(1.0)))),
        UnaryOp::Acosh => div(num(1.0), un(UnaryOp::Sqrt, sub(squared(a), num(1.0)))),
        UnaryOp::Atanh | UnaryOp::Acoth => div(num(1.0), sub(num(1.0), squared(a))),
        UnaryOp::Abs | UnaryOp::Ceil | UnaryOp::Floor => {
            exerr!(Differentiation, "{} is not differentiable", op.repr())
        }
    })
}

fn is_constant(table: &SymbolTable, name: &str) -> bool {
    matches!(
        table.lookup(name).map(|r| r.kind),
        Some(RecordKind::Constant { .. })
    )
}

/// Computes the structural derivative of a tree. The result is not simplified.
///
/// A name differentiates to `1` if and only if it is the name we differentiate with
/// respect to and it denotes a variable in `table`. Everything else is constant.
///
/// # Errors
///
/// An [`ExError`](crate::ExError) of kind `Differentiation` is returned if the tree
/// contains a comparison or logical operator, `abs`, `ceil`, `floor`, a power whose
/// exponent is neither a number literal nor a constant, or a call of a function that is
/// only known by name.
///
pub fn derive(tree: &Node, table: &SymbolTable, wrt: &str) -> ExResult<Node> {
    match tree {
        Node::Num(_) => Ok(num(0.0)),
        Node::Var(name) => {
            let is_wrt = name == wrt
                && table
                    .lookup(name)
                    .map(|r| r.kind.is_variable())
                    .unwrap_or(false);
            Ok(num(if is_wrt { 1.0 } else { 0.0 }))
        }
        Node::Unary(UnaryOp::Neg, a) => Ok(Node::neg(derive(a, table, wrt)?)),
        Node::Unary(op, a) => {
            let outer = outer_derivative(*op, a)?;
            Ok(mul(outer, derive(a, table, wrt)?))
        }
        Node::Bin(op, a, b) => {
            let (a, b) = (a.as_ref(), b.as_ref());
            match op {
                BinOp::Add => Ok(add(derive(a, table, wrt)?, derive(b, table, wrt)?)),
                BinOp::Sub => Ok(sub(derive(a, table, wrt)?, derive(b, table, wrt)?)),
                BinOp::Mul => Ok(add(
                    mul(derive(a, table, wrt)?, b.clone()),
                    mul(a.clone(), derive(b, table, wrt)?),
                )),
                BinOp::Div => Ok(div(
                    sub(
                        mul(derive(a, table, wrt)?, b.clone()),
                        mul(a.clone(), derive(b, table, wrt)?),
                    ),
                    squared(b.clone()),
                )),
                BinOp::Pow => match b {
                    Node::Num(c) => Ok(mul(
                        mul(num(*c), pow(a.clone(), num(c - 1.0))),
                        derive(a, table, wrt)?,
                    )),
                    Node::Var(name) if is_constant(table, name) => Ok(mul(
                        mul(b.clone(), pow(a.clone(), sub(b.clone(), num(1.0)))),
                        derive(a, table, wrt)?,
                    )),
                    _ => exerr!(
                        Differentiation,
                        "exponents need to be constant to differentiate a power"
                    ),
                },
                _ => exerr!(Differentiation, "{} is not differentiable", op.repr()),
            }
        }
        Node::Call(name, _) => {
            exerr!(Differentiation, "derivative of function {} is unknown", name)
        }
    }
}

/// Derivative that is simplified right away.
pub fn derive_simplified(tree: &Node, table: &SymbolTable, wrt: &str) -> ExResult<Node> {
    derive(tree, table, wrt).map(simplify)
}
