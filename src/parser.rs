use crate::definitions::N_TOKENS_ON_STACK;
use crate::expression::Node;
use crate::operators::{make_default_operators, Operator, PRIO_NEG};
use crate::symbol_table::{RecordKind, SymbolTable};
use crate::{exerr, format_exerr, ExResult};
use lazy_static::lazy_static;
use regex::Regex;
use smallvec::SmallVec;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Paren {
    Open,
    Close,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ParsedToken<'a> {
    Num(f64),
    Paren(Paren),
    Comma,
    Op(Operator),
    Name(&'a str),
}

impl<'a> ParsedToken<'a> {
    fn is_operand(&self) -> bool {
        matches!(self, ParsedToken::Num(_) | ParsedToken::Name(_))
    }
    fn is_prefix_op(&self) -> bool {
        matches!(self, ParsedToken::Op(op) if op.is_prefix())
    }
}

type Tokens<'a> = SmallVec<[ParsedToken<'a>; N_TOKENS_ON_STACK]>;

lazy_static! {
    static ref RE_NUM: Regex =
        Regex::new(r"^(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("number regex is valid");
    static ref RE_NAME: Regex =
        Regex::new(r"^[a-zA-Z_][a-zA-Z_0-9]*").expect("name regex is valid");
}

/// Splits a text into tokens and checks them for invalid constellations.
///
/// # Errors
///
/// An [`ExError`](crate::ExError) of kind `Parse` is returned for non-ascii text,
/// text that cannot be split into tokens, or tokens that cannot form an expression
/// regardless of the grammar, e.g., two numbers next to each other.
///
pub fn tokenize_and_analyze(text: &str) -> ExResult<Tokens<'_>> {
    if !text.is_ascii() {
        exerr!(Parse, "only ascii characters are supported");
    }
    let ops = make_default_operators();
    let mut res = Tokens::new();
    let mut offset = 0usize;
    while offset < text.len() {
        let rest = &text[offset..];
        let c = rest.as_bytes()[0];
        let (token, n_bytes) = if c.is_ascii_whitespace() {
            offset += 1;
            continue;
        } else if c == b'(' {
            (ParsedToken::Paren(Paren::Open), 1)
        } else if c == b')' {
            (ParsedToken::Paren(Paren::Close), 1)
        } else if c == b',' {
            (ParsedToken::Comma, 1)
        } else if let Some(num_match) = RE_NUM.find(rest) {
            let num_str = num_match.as_str();
            let x = num_str
                .parse::<f64>()
                .map_err(|e| format_exerr!(Parse, "could not parse {}, {:?}", num_str, e))?;
            (ParsedToken::Num(x), num_str.len())
        } else if let Some(op) = ops.iter().find(|op| rest.starts_with(op.repr)) {
            (ParsedToken::Op(*op), op.repr.len())
        } else if let Some(name_match) = RE_NAME.find(rest) {
            let name = name_match.as_str();
            (ParsedToken::Name(name), name.len())
        } else {
            exerr!(Parse, "how to parse the beginning of {}", rest);
        };
        res.push(token);
        offset += n_bytes;
    }
    check_parsed_token_preconditions(&res)?;
    Ok(res)
}

struct PairPreCondition {
    apply: fn(&ParsedToken, &ParsedToken) -> bool,
    error_msg: &'static str,
}

fn make_pair_pre_conditions() -> [PairPreCondition; 9] {
    [
        PairPreCondition {
            apply: |left, right| !(left.is_operand() && right.is_operand()),
            error_msg: "a number/variable cannot be next to a number/variable",
        },
        PairPreCondition {
            apply: |left, right| {
                !matches!(
                    (left, right),
                    (ParsedToken::Paren(Paren::Close), ParsedToken::Num(_))
                        | (ParsedToken::Paren(Paren::Close), ParsedToken::Name(_))
                        | (ParsedToken::Paren(Paren::Close), ParsedToken::Paren(Paren::Open))
                )
            },
            error_msg: "wlog a number/variable/paren cannot be on the right of a closing paren",
        },
        PairPreCondition {
            apply: |left, right| {
                !matches!(
                    (left, right),
                    (ParsedToken::Num(_), ParsedToken::Paren(Paren::Open))
                )
            },
            error_msg: "a number cannot be on the left of an opening paren",
        },
        PairPreCondition {
            apply: |left, right| {
                !(matches!(left, ParsedToken::Op(_))
                    && matches!(right, ParsedToken::Op(_))
                    && !right.is_prefix_op())
            },
            error_msg: "a binary operator cannot be next to a binary operator",
        },
        PairPreCondition {
            apply: |left, right| {
                !matches!(
                    (left, right),
                    (ParsedToken::Op(_), ParsedToken::Paren(Paren::Close))
                )
            },
            error_msg: "an operator cannot be on the left of a closing paren",
        },
        PairPreCondition {
            apply: |left, right| {
                !(matches!(left, ParsedToken::Paren(Paren::Open) | ParsedToken::Comma)
                    && matches!(right, ParsedToken::Op(_))
                    && !right.is_prefix_op())
            },
            error_msg: "a binary operator cannot be on the right of an opening paren or a comma",
        },
        PairPreCondition {
            apply: |left, right| {
                !matches!(
                    (left, right),
                    (
                        ParsedToken::Paren(Paren::Open),
                        ParsedToken::Paren(Paren::Close)
                    )
                )
            },
            error_msg: "wlog an opening paren cannot be next to a closing paren",
        },
        PairPreCondition {
            apply: |left, right| {
                !(matches!(
                    left,
                    ParsedToken::Op(_) | ParsedToken::Comma | ParsedToken::Paren(Paren::Open)
                ) && matches!(right, ParsedToken::Comma))
            },
            error_msg: "a comma needs an argument on its left",
        },
        PairPreCondition {
            apply: |left, right| {
                !matches!(
                    (left, right),
                    (ParsedToken::Comma, ParsedToken::Paren(Paren::Close))
                )
            },
            error_msg: "a comma needs an argument on its right",
        },
    ]
}

/// Tries to give useful error messages for invalid constellations of the parsed tokens
///
/// # Errors
///
/// An [`ExError`](crate::ExError) of kind `Parse` is returned for empty input,
/// forbidden neighbours, unbalanced parentheses, and trailing operators.
///
pub fn check_parsed_token_preconditions(parsed_tokens: &[ParsedToken]) -> ExResult<()> {
    if parsed_tokens.is_empty() {
        exerr!(Parse, "cannot parse empty string");
    };

    let pair_pre_conditions = make_pair_pre_conditions();
    for pair in parsed_tokens.windows(2) {
        let failed = pair_pre_conditions
            .iter()
            .find(|ppc| !(ppc.apply)(&pair[0], &pair[1]));
        if let Some(failed_ppc) = failed {
            exerr!(Parse, "{}", failed_ppc.error_msg);
        }
    }

    let mut open_paren_cnt = 0i32;
    for (i, token) in parsed_tokens.iter().enumerate() {
        match token {
            ParsedToken::Paren(Paren::Open) => open_paren_cnt += 1,
            ParsedToken::Paren(Paren::Close) => {
                open_paren_cnt -= 1;
                if open_paren_cnt < 0 {
                    exerr!(Parse, "too many closing parentheses until position {}", i);
                }
            }
            _ => (),
        }
    }
    if open_paren_cnt != 0 {
        exerr!(Parse, "parentheses mismatch");
    }
    match (parsed_tokens.first(), parsed_tokens.last()) {
        (_, Some(ParsedToken::Op(_))) => exerr!(Parse, "the last element cannot be an operator"),
        (Some(ParsedToken::Comma), _) | (_, Some(ParsedToken::Comma)) => {
            exerr!(Parse, "a comma cannot be first or last element")
        }
        (Some(first), _) if matches!(first, ParsedToken::Op(_)) && !first.is_prefix_op() => {
            exerr!(Parse, "the first element cannot be a binary operator")
        }
        _ => Ok(()),
    }
}

/// State of one parse. Names are resolved through and registered in `table`.
struct ParseContext<'a, 'b> {
    tokens: &'b [ParsedToken<'a>],
    pos: usize,
    table: &'b mut SymbolTable,
}

impl<'a, 'b> ParseContext<'a, 'b> {
    fn current(&self) -> Option<ParsedToken<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn expect_close(&mut self) -> ExResult<()> {
        match self.current() {
            Some(ParsedToken::Paren(Paren::Close)) => {
                self.advance();
                Ok(())
            }
            other => exerr!(Parse, "expected ')' but found {:?}", other),
        }
    }

    fn parse_expr(&mut self, min_prio: i32) -> ExResult<Node> {
        let mut left = self.parse_prefix()?;
        while let Some(ParsedToken::Op(op)) = self.current() {
            let prio = op.bin_op.prio();
            if prio < min_prio {
                break;
            }
            self.advance();
            let right_prio = if op.bin_op.is_right_assoc() {
                prio
            } else {
                prio + 1
            };
            let right = self.parse_expr(right_prio)?;
            left = Node::bin(op.bin_op, left, right);
        }
        Ok(left)
    }

    fn parse_args(&mut self) -> ExResult<Vec<Node>> {
        let mut args = vec![self.parse_expr(0)?];
        while let Some(ParsedToken::Comma) = self.current() {
            self.advance();
            args.push(self.parse_expr(0)?);
        }
        self.expect_close()?;
        Ok(args)
    }

    fn parse_call(&mut self, name: &str) -> ExResult<Node> {
        let args = self.parse_args()?;
        let kind = self
            .table
            .insert_or_get(
                name,
                RecordKind::Function {
                    arity: args.len(),
                    builtin: None,
                },
            )
            .kind;
        match kind {
            RecordKind::Function {
                arity,
                builtin: Some(op),
            } => {
                let mut args = args;
                match (arity, args.pop()) {
                    (1, Some(arg)) if args.is_empty() => Ok(Node::unary(op, arg)),
                    _ => exerr!(Parse, "{} expects exactly one argument", name),
                }
            }
            RecordKind::Function {
                arity,
                builtin: None,
            } => {
                if arity == args.len() {
                    Ok(Node::Call(name.to_string(), args))
                } else {
                    exerr!(
                        Parse,
                        "{} expects {} arguments but got {}",
                        name,
                        arity,
                        args.len()
                    )
                }
            }
            RecordKind::Variable { .. } | RecordKind::Constant { .. } => {
                exerr!(Parse, "{} is not a function", name)
            }
        }
    }

    fn parse_prefix(&mut self) -> ExResult<Node> {
        let token = self
            .current()
            .ok_or_else(|| format_exerr!(Parse, "unexpected end of input"))?;
        self.advance();
        match token {
            ParsedToken::Num(x) => Ok(Node::Num(x)),
            ParsedToken::Name(name) => {
                if let Some(ParsedToken::Paren(Paren::Open)) = self.current() {
                    self.advance();
                    return self.parse_call(name);
                }
                let record = self
                    .table
                    .insert_or_get(name, RecordKind::Variable { value: 0.0 });
                match record.kind {
                    RecordKind::Function { .. } => {
                        exerr!(Parse, "function {} cannot be used without arguments", name)
                    }
                    _ => Ok(Node::var(name)),
                }
            }
            ParsedToken::Op(op) => match (op.is_prefix(), op.unary_op) {
                (true, Some(unary_op)) => Ok(Node::unary(unary_op, self.parse_expr(PRIO_NEG)?)),
                (true, None) => self.parse_expr(PRIO_NEG),
                (false, _) => exerr!(Parse, "{} cannot be used as prefix", op.repr),
            },
            ParsedToken::Paren(Paren::Open) => {
                let node = self.parse_expr(0)?;
                self.expect_close()?;
                Ok(node)
            }
            ParsedToken::Paren(Paren::Close) | ParsedToken::Comma => {
                exerr!(Parse, "unexpected {:?}", token)
            }
        }
    }
}

/// Parses a text into an unsimplified tree. Unknown names become variables of `table`,
/// unknown names that are applied to arguments become functions of fixed arity.
///
/// # Errors
///
/// An [`ExError`](crate::ExError) of kind `Parse` is returned for text that is not a
/// valid expression. The table might contain new records in this case.
///
pub fn parse(text: &str, table: &mut SymbolTable) -> ExResult<Node> {
    let tokens = tokenize_and_analyze(text)?;
    let mut ctx = ParseContext {
        tokens: &tokens[..],
        pos: 0,
        table,
    };
    let root = ctx.parse_expr(0)?;
    match ctx.current() {
        None => Ok(root),
        Some(token) => exerr!(Parse, "unexpected {:?} after complete expression", token),
    }
}
