use log::trace;

use crate::{
    expression::Node,
    operators::{BinOp, UnaryOp},
};

fn simplify_unary(op: UnaryOp, a: Node) -> Node {
    match (op, a) {
        (op, Node::Num(x)) => Node::Num(op.apply(x)),
        (UnaryOp::Neg, Node::Unary(UnaryOp::Neg, inner)) => *inner,
        (op, a) => Node::unary(op, a),
    }
}

fn simplify_bin(op: BinOp, a: Node, b: Node) -> Node {
    if let (Some(x), Some(y)) = (a.as_num(), b.as_num()) {
        let folded = op.apply(x, y);
        trace!("folded {}{}{} to {}", x, op.repr(), y, folded);
        return Node::Num(folded);
    }
    match op {
        BinOp::Add if b.is_num(0.0) => a,
        BinOp::Add if a.is_num(0.0) => b,
        BinOp::Sub if b.is_num(0.0) => a,
        BinOp::Sub if a.is_num(0.0) => Node::neg(b),
        BinOp::Mul if a.is_num(0.0) || b.is_num(0.0) => Node::Num(0.0),
        BinOp::Mul if b.is_num(1.0) => a,
        BinOp::Mul if a.is_num(1.0) => b,
        BinOp::Div if b.is_num(1.0) => a,
        BinOp::Pow if b.is_num(0.0) => Node::Num(1.0),
        BinOp::Pow if b.is_num(1.0) => a,
        _ => Node::bin(op, a, b),
    }
}

/// Simplifies a tree in one bottom-up pass. Children are simplified first, then each
/// node is inspected exactly once:
///
/// * operations whose operands are all numbers are folded,
/// * `a+0`, `0+a`, `a-0`, `a*1`, `1*a`, `a/1`, and `a^1` become `a`,
/// * `0-a` becomes `-a` and `-(-a)` becomes `a`,
/// * `a*0` and `0*a` become `0`, `a^0` becomes `1`.
///
/// The pass is not repeated until a fixed point is reached, so patterns that only
/// emerge from a rewrite of the parent survive.
///
/// ```rust
/// use symex::{simplify, BinOp, Node};
/// let tree = Node::bin(BinOp::Add, Node::Num(2.0), Node::Num(3.0));
/// assert_eq!(simplify(tree), Node::Num(5.0));
/// ```
pub fn simplify(tree: Node) -> Node {
    match tree {
        Node::Num(_) | Node::Var(_) => tree,
        Node::Unary(op, a) => simplify_unary(op, simplify(*a)),
        Node::Bin(op, a, b) => simplify_bin(op, simplify(*a), simplify(*b)),
        Node::Call(name, args) => Node::Call(name, args.into_iter().map(simplify).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        expression::eval::evaluate,
        symbol_table::{RecordKind, SymbolTable},
        util::assert_same_value,
    };
    use rand::{thread_rng, Rng};

    fn x() -> Node {
        Node::var("x")
    }

    #[test]
    fn test_identities() {
        let cases = [
            (Node::bin(BinOp::Add, x(), Node::Num(0.0)), x()),
            (Node::bin(BinOp::Add, Node::Num(0.0), x()), x()),
            (Node::bin(BinOp::Sub, x(), Node::Num(0.0)), x()),
            (Node::bin(BinOp::Sub, Node::Num(0.0), x()), Node::neg(x())),
            (Node::bin(BinOp::Mul, x(), Node::Num(1.0)), x()),
            (Node::bin(BinOp::Mul, Node::Num(1.0), x()), x()),
            (Node::bin(BinOp::Mul, x(), Node::Num(0.0)), Node::Num(0.0)),
            (Node::bin(BinOp::Mul, Node::Num(0.0), x()), Node::Num(0.0)),
            (Node::bin(BinOp::Div, x(), Node::Num(1.0)), x()),
            (Node::bin(BinOp::Pow, x(), Node::Num(0.0)), Node::Num(1.0)),
            (Node::bin(BinOp::Pow, x(), Node::Num(1.0)), x()),
            (Node::neg(Node::neg(x())), x()),
            (Node::neg(Node::Num(2.0)), Node::Num(-2.0)),
            (Node::unary(UnaryOp::Sqrt, Node::Num(16.0)), Node::Num(4.0)),
            (Node::bin(BinOp::Ge, Node::Num(2.0), Node::Num(3.0)), Node::Num(0.0)),
        ];
        for (tree, reference) in cases {
            assert_eq!(simplify(tree), reference);
        }
    }

    #[test]
    fn test_bottom_up() {
        // (x*(2-1)) + (0*y) -> x
        let tree = Node::bin(
            BinOp::Add,
            Node::bin(
                BinOp::Mul,
                x(),
                Node::bin(BinOp::Sub, Node::Num(2.0), Node::Num(1.0)),
            ),
            Node::bin(BinOp::Mul, Node::Num(0.0), Node::var("y")),
        );
        assert_eq!(simplify(tree), x());
        let tree = Node::Call(
            "f".to_string(),
            vec![Node::bin(BinOp::Add, x(), Node::Num(0.0))],
        );
        assert_eq!(simplify(tree), Node::Call("f".to_string(), vec![x()]));
    }

    #[test]
    fn test_single_pass() {
        // 0-(-x) becomes -(-x) but not x since the new node is not inspected again
        let tree = Node::bin(BinOp::Sub, Node::Num(0.0), Node::neg(x()));
        assert_eq!(simplify(tree), Node::neg(Node::neg(x())));
    }

    #[test]
    fn test_soundness() {
        let mut table = SymbolTable::with_builtins();
        table.insert_or_get("x", RecordKind::Variable { value: 0.0 });
        let trees = [
            Node::bin(
                BinOp::Mul,
                Node::bin(BinOp::Add, x(), Node::Num(0.0)),
                Node::bin(BinOp::Pow, Node::var("pi"), Node::Num(1.0)),
            ),
            Node::bin(
                BinOp::Div,
                Node::bin(BinOp::Sub, Node::Num(0.0), x()),
                Node::unary(UnaryOp::Cos, Node::Num(0.3)),
            ),
            Node::bin(BinOp::Mul, x(), Node::Num(0.0)),
        ];
        let mut rng = thread_rng();
        for tree in trees {
            let simplified = simplify(tree.clone());
            for _ in 0..20 {
                let v = rng.gen_range(-10.0..10.0);
                let res = evaluate(&tree, &mut table, [("x", v)]).unwrap();
                let res_simplified = evaluate(&simplified, &mut table, [("x", v)]).unwrap();
                assert_same_value(res, res_simplified);
            }
        }
    }
}
