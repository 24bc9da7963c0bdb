use std::fmt::{self, Write};

use crate::{
    exerr,
    expression::Node,
    format_exerr,
    operators::{UnaryOp, PRIO_ATOM, PRIO_NEG},
    ExResult,
};

/// Priority of the top-level operation of a node when it is printed. Negative numbers
/// are printed with a leading minus and hence bind like a negation.
fn prio(node: &Node) -> i32 {
    match node {
        Node::Num(x) if x.is_sign_negative() && !x.is_nan() => PRIO_NEG,
        Node::Num(_) | Node::Var(_) | Node::Call(..) => PRIO_ATOM,
        Node::Unary(UnaryOp::Neg, _) => PRIO_NEG,
        Node::Unary(..) => PRIO_ATOM,
        Node::Bin(op, ..) => op.prio(),
    }
}

fn write_num<W: Write>(x: f64, w: &mut W) -> fmt::Result {
    if x.is_nan() {
        w.write_str("nan")
    } else if x == f64::INFINITY {
        w.write_str("inf")
    } else if x == f64::NEG_INFINITY {
        w.write_str("-inf")
    } else if x != 0.0 && (x.abs() < 1e-5 || x.abs() >= 1e16) {
        write!(w, "{:e}", x)
    } else {
        write!(w, "{}", x)
    }
}

fn write_child<W: Write>(child: &Node, needs_parens: bool, w: &mut W) -> fmt::Result {
    if needs_parens {
        w.write_char('(')?;
        unparse_into(child, w)?;
        w.write_char(')')
    } else {
        unparse_into(child, w)
    }
}

/// Writes the tree with as few parentheses as possible such that re-parsing the text
/// yields a tree that evaluates to the same values. Negative literals come back as
/// negations of positive literals. Length calculation and writing both go through this
/// function with different sinks.
pub fn unparse_into<W: Write>(tree: &Node, w: &mut W) -> fmt::Result {
    match tree {
        Node::Num(x) => write_num(*x, w),
        Node::Var(name) => w.write_str(name),
        Node::Unary(UnaryOp::Neg, a) => {
            w.write_char('-')?;
            write_child(a, prio(a) < PRIO_NEG, w)
        }
        Node::Unary(op, a) => {
            w.write_str(op.repr())?;
            write_child(a, true, w)
        }
        Node::Bin(op, a, b) => {
            let (p, p_a, p_b) = (op.prio(), prio(a), prio(b));
            let right_assoc = op.is_right_assoc();
            write_child(a, p_a < p || (p_a == p && right_assoc), w)?;
            w.write_str(op.repr())?;
            write_child(b, p_b < p || (p_b == p && !right_assoc), w)
        }
        Node::Call(name, args) => {
            w.write_str(name)?;
            w.write_char('(')?;
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    w.write_char(',')?;
                }
                unparse_into(arg, w)?;
            }
            w.write_char(')')
        }
    }
}

/// Sink that only counts bytes.
#[derive(Default)]
struct ByteCounter {
    n_bytes: usize,
}
impl Write for ByteCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.n_bytes += s.len();
        Ok(())
    }
}

/// Sink that fills a caller supplied buffer and fails once the buffer is full.
struct SliceWriter<'a> {
    buffer: &'a mut [u8],
    pos: usize,
}
impl<'a> Write for SliceWriter<'a> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.pos + s.len();
        if end > self.buffer.len() {
            return Err(fmt::Error);
        }
        self.buffer[self.pos..end].copy_from_slice(s.as_bytes());
        self.pos = end;
        Ok(())
    }
}

/// Number of bytes [`write`] emits for the same tree.
pub fn measure(tree: &Node) -> usize {
    let mut counter = ByteCounter::default();
    // counting never fails
    let _ = unparse_into(tree, &mut counter);
    counter.n_bytes
}

/// Writes the textual representation of the tree into `buffer` and returns the number
/// of bytes written.
///
/// # Errors
///
/// An [`ExError`](crate::ExError) of kind `Misuse` is returned if `buffer` is shorter
/// than [`measure`] demands.
///
pub fn write(tree: &Node, buffer: &mut [u8]) -> ExResult<usize> {
    let n_bytes = measure(tree);
    if buffer.len() < n_bytes {
        exerr!(
            Misuse,
            "buffer of length {} is too short, {} bytes are needed",
            buffer.len(),
            n_bytes
        );
    }
    let mut writer = SliceWriter { buffer, pos: 0 };
    unparse_into(tree, &mut writer)
        .map_err(|_| format_exerr!(Misuse, "could not write {} bytes", n_bytes))?;
    Ok(writer.pos)
}

/// Textual representation as owned string.
pub fn unparse(tree: &Node) -> String {
    let mut s = String::with_capacity(measure(tree));
    // writing to a string never fails
    let _ = unparse_into(tree, &mut s);
    s
}
