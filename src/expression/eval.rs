use crate::{
    exerr,
    expression::Node,
    symbol_table::{RecordKind, SymbolTable},
    ExResult,
};

/// Reduces a tree to a number with the current values of the table's variables.
pub fn eval_tree(tree: &Node, table: &SymbolTable) -> ExResult<f64> {
    match tree {
        Node::Num(x) => Ok(*x),
        Node::Var(name) => match table.lookup(name).map(|r| r.kind) {
            Some(RecordKind::Variable { value }) | Some(RecordKind::Constant { value }) => {
                Ok(value)
            }
            Some(RecordKind::Function { .. }) => {
                exerr!(Evaluation, "function {} used as a value", name)
            }
            None => exerr!(Evaluation, "unknown name {}", name),
        },
        Node::Unary(op, a) => Ok(op.apply(eval_tree(a, table)?)),
        Node::Bin(op, a, b) => Ok(op.apply(eval_tree(a, table)?, eval_tree(b, table)?)),
        Node::Call(name, _) => exerr!(Evaluation, "cannot evaluate unknown function {}", name),
    }
}

/// Assigns the bindings to the table's variables and evaluates the tree afterwards.
/// Names that are not variables of the table are ignored.
///
/// # Errors
///
/// An [`ExError`](crate::ExError) of kind `Evaluation` is returned if the tree contains
/// a call of a function that is only known by name or references a name the table does
/// not know. The bindings are applied nevertheless.
///
pub fn evaluate<'a, I>(tree: &Node, table: &mut SymbolTable, bindings: I) -> ExResult<f64>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    for (name, value) in bindings {
        table.set_value(name, value);
    }
    eval_tree(tree, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::{BinOp, UnaryOp};

    fn table_xy() -> SymbolTable {
        let mut table = SymbolTable::with_builtins();
        table.insert_or_get("x", RecordKind::Variable { value: 0.0 });
        table.insert_or_get("y", RecordKind::Variable { value: 0.0 });
        table
    }

    #[test]
    fn test_evaluate() {
        let mut table = table_xy();
        // x * y - sin(pi)
        let tree = Node::bin(
            BinOp::Sub,
            Node::bin(BinOp::Mul, Node::var("x"), Node::var("y")),
            Node::unary(UnaryOp::Sin, Node::var("pi")),
        );
        let res = evaluate(&tree, &mut table, [("x", 2.0), ("y", 3.0), ("z", 1.0)]).unwrap();
        assert!((res - 6.0).abs() < 1e-12);
        // bindings persist
        let res = evaluate(&tree, &mut table, [("x", 1.0)]).unwrap();
        assert!((res - 3.0).abs() < 1e-12);
        // constants cannot be rebound
        let res = evaluate(&Node::var("pi"), &mut table, [("pi", 3.0)]).unwrap();
        assert_eq!(res, std::f64::consts::PI);
    }

    #[test]
    fn test_ieee() {
        let mut table = table_xy();
        let tree = Node::bin(BinOp::Div, Node::var("x"), Node::var("y"));
        assert_eq!(
            evaluate(&tree, &mut table, [("x", -1.0), ("y", 0.0)]).unwrap(),
            f64::NEG_INFINITY
        );
        assert!(evaluate(&tree, &mut table, [("x", 0.0)]).unwrap().is_nan());
        let tree = Node::bin(BinOp::Lt, Node::var("x"), Node::var("y"));
        assert_eq!(evaluate(&tree, &mut table, [("y", 1.0)]).unwrap(), 1.0);
    }

    #[test]
    fn test_errors() {
        let mut table = table_xy();
        let tree = Node::Call("f".to_string(), vec![Node::var("x")]);
        let err = evaluate(&tree, &mut table, [("x", 1.0)]).unwrap_err();
        assert_eq!(err.kind, crate::ExErrorKind::Evaluation);
        assert_eq!(table.value("x"), Some(1.0));
        assert!(eval_tree(&Node::var("q"), &table).is_err());
        assert!(eval_tree(&Node::var("sin"), &table).is_err());
    }
}
