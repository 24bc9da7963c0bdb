use smallvec::SmallVec;

use crate::{
    definitions::N_VARS_ON_STACK,
    operators::{BinOp, UnaryOp},
};

pub mod eval;
pub mod partial;
#[cfg(feature = "serde")]
mod serde;
pub mod simplify;
pub mod unparse;

/// Node of an expression tree. Each node exclusively owns its children.
#[derive(Clone, PartialEq, Debug)]
pub enum Node {
    /// Numeric literal
    Num(f64),
    /// Reference to a variable or a constant of the symbol table by name
    Var(String),
    /// Negation or application of a built-in function
    Unary(UnaryOp, Box<Node>),
    /// Arithmetic, comparison, or logical operation with left and right operand
    Bin(BinOp, Box<Node>, Box<Node>),
    /// Application of a function that is only known by name and arity
    Call(String, Vec<Node>),
}

impl Node {
    pub fn var(name: &str) -> Node {
        Node::Var(name.to_string())
    }

    pub fn unary(op: UnaryOp, a: Node) -> Node {
        Node::Unary(op, Box::new(a))
    }

    pub fn neg(a: Node) -> Node {
        Node::unary(UnaryOp::Neg, a)
    }

    pub fn bin(op: BinOp, a: Node, b: Node) -> Node {
        Node::Bin(op, Box::new(a), Box::new(b))
    }

    pub fn as_num(&self) -> Option<f64> {
        match self {
            Node::Num(x) => Some(*x),
            _ => None,
        }
    }

    /// `true` if the node is a literal with exactly the value `x`.
    pub fn is_num(&self, x: f64) -> bool {
        self.as_num() == Some(x)
    }

    /// Sorted names that are referenced by [`Node::Var`] nodes, each name once.
    pub fn names(&self) -> SmallVec<[&str; N_VARS_ON_STACK]> {
        fn collect<'a>(node: &'a Node, names: &mut SmallVec<[&'a str; N_VARS_ON_STACK]>) {
            match node {
                Node::Num(_) => (),
                Node::Var(name) => names.push(name.as_str()),
                Node::Unary(_, a) => collect(a, names),
                Node::Bin(_, a, b) => {
                    collect(a, names);
                    collect(b, names);
                }
                Node::Call(_, args) => {
                    for arg in args {
                        collect(arg, names);
                    }
                }
            }
        }
        let mut names = SmallVec::new();
        collect(self, &mut names);
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Number of nodes in the tree.
    pub fn n_nodes(&self) -> usize {
        1 + match self {
            Node::Num(_) | Node::Var(_) => 0,
            Node::Unary(_, a) => a.n_nodes(),
            Node::Bin(_, a, b) => a.n_nodes() + b.n_nodes(),
            Node::Call(_, args) => args.iter().map(Node::n_nodes).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        let tree = Node::bin(
            BinOp::Mul,
            Node::var("y"),
            Node::Call(
                "f".to_string(),
                vec![Node::var("x"), Node::neg(Node::var("y")), Node::Num(2.0)],
            ),
        );
        assert_eq!(tree.names().as_slice(), &["x", "y"]);
        assert_eq!(tree.n_nodes(), 7);
        assert!(Node::Num(0.0).is_num(0.0));
        assert!(!tree.is_num(0.0));
        assert_eq!(Node::Num(-1.5).as_num(), Some(-1.5));
    }
}
