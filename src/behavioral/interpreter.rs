// Interpreter: arithmetic sentences are tokenized, parsed into an AST and
// evaluated against a context that binds variable names.

use std::collections::BTreeMap;
use std::fmt;
use std::io;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::transcript::Transcript;

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("unexpected character {found:?} at {at}")]
    UnexpectedChar { found: char, at: usize },

    #[error("unexpected token {found:?}")]
    UnexpectedToken { found: String },

    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("number {literal} out of range")]
    NumberRange { literal: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum EvalError {
    #[error("unbound variable {name}")]
    Unbound { name: String },

    #[error("division by zero")]
    DivisionByZero,

    #[error("arithmetic overflow")]
    Overflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
        }
    }

    fn apply(self, lhs: i64, rhs: i64) -> Result<i64, EvalError> {
        let value = match self {
            Op::Add => lhs.checked_add(rhs),
            Op::Sub => lhs.checked_sub(rhs),
            Op::Mul => lhs.checked_mul(rhs),
            Op::Div if rhs == 0 => return Err(EvalError::DivisionByZero),
            Op::Div => lhs.checked_div(rhs),
        };
        value.ok_or(EvalError::Overflow)
    }
}

/// Abstract syntax tree. Terminals are numbers and variables.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(i64),
    Variable(String),
    Binary {
        op: Op,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: Op, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn interpret(&self, context: &Context) -> Result<i64, EvalError> {
        match self {
            Expr::Number(n) => Ok(*n),
            Expr::Variable(name) => context.lookup(name),
            Expr::Binary { op, lhs, rhs } => {
                op.apply(lhs.interpret(context)?, rhs.interpret(context)?)
            }
        }
    }
}

/// Fully parenthesized, so the tree shape is visible.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{n}"),
            Expr::Variable(name) => f.write_str(name),
            Expr::Binary { op, lhs, rhs } => write!(f, "({lhs} {} {rhs})", op.symbol()),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Context {
    variables: BTreeMap<String, i64>,
}

impl Context {
    pub fn with(mut self, name: &str, value: i64) -> Self {
        self.variables.insert(name.to_string(), value);
        self
    }

    fn lookup(&self, name: &str) -> Result<i64, EvalError> {
        self.variables
            .get(name)
            .copied()
            .ok_or_else(|| EvalError::Unbound {
                name: name.to_string(),
            })
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, value) in &self.variables {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
            first = false;
        }
        Ok(())
    }
}

// ============================================================================
// Tokenizer
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(i64),
    Ident(String),
    Op(Op),
    Open,
    Close,
}

lazy_static! {
    static ref TOKEN: Regex =
        Regex::new(r"\s*(?:(?P<num>\d+)|(?P<ident>[A-Za-z_]\w*)|(?P<sym>\S))")
            .expect("token pattern is valid");
}

fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    for caps in TOKEN.captures_iter(source) {
        if let Some(num) = caps.name("num") {
            let value = num.as_str().parse().map_err(|_| ParseError::NumberRange {
                literal: num.as_str().to_string(),
            })?;
            tokens.push(Token::Number(value));
        } else if let Some(ident) = caps.name("ident") {
            tokens.push(Token::Ident(ident.as_str().to_string()));
        } else if let Some(sym) = caps.name("sym") {
            let token = match sym.as_str() {
                "+" => Token::Op(Op::Add),
                "-" => Token::Op(Op::Sub),
                "*" => Token::Op(Op::Mul),
                "/" => Token::Op(Op::Div),
                "(" => Token::Open,
                ")" => Token::Close,
                other => {
                    return Err(ParseError::UnexpectedChar {
                        found: other.chars().next().unwrap_or_default(),
                        at: sym.start(),
                    })
                }
            };
            tokens.push(token);
        }
    }
    Ok(tokens)
}

// ============================================================================
// Recursive-descent parser
//
//   expr   := term (('+' | '-') term)*
//   term   := factor (('*' | '/') factor)*
//   factor := number | ident | '(' expr ')'
// ============================================================================

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn binary_level(
        &mut self,
        ops: [Op; 2],
        operand: fn(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        let mut lhs = operand(self)?;
        while let Some(Token::Op(op)) = self.peek() {
            let op = *op;
            if !ops.contains(&op) {
                break;
            }
            self.pos += 1;
            let rhs = operand(self)?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        self.binary_level([Op::Add, Op::Sub], Self::term)
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        self.binary_level([Op::Mul, Op::Div], Self::factor)
    }

    fn factor(&mut self) -> Result<Expr, ParseError> {
        match self.bump() {
            Some(Token::Number(n)) => Ok(Expr::Number(n)),
            Some(Token::Ident(name)) => Ok(Expr::Variable(name)),
            Some(Token::Open) => {
                let inner = self.expr()?;
                match self.bump() {
                    Some(Token::Close) => Ok(inner),
                    Some(other) => Err(unexpected(&other)),
                    None => Err(ParseError::UnexpectedEnd),
                }
            }
            Some(other) => Err(unexpected(&other)),
            None => Err(ParseError::UnexpectedEnd),
        }
    }
}

fn unexpected(token: &Token) -> ParseError {
    let found = match token {
        Token::Number(n) => n.to_string(),
        Token::Ident(name) => name.clone(),
        Token::Op(op) => op.symbol().to_string(),
        Token::Open => "(".to_string(),
        Token::Close => ")".to_string(),
    };
    ParseError::UnexpectedToken { found }
}

pub fn parse(source: &str) -> Result<Expr, ParseError> {
    let mut parser = Parser {
        tokens: tokenize(source)?,
        pos: 0,
    };
    let expr = parser.expr()?;
    match parser.bump() {
        None => Ok(expr),
        Some(trailing) => Err(unexpected(&trailing)),
    }
}

pub fn run(out: &mut Transcript<'_>) -> io::Result<()> {
    // Tree built by hand: (5 + 3) * 2.
    let manual = Expr::binary(
        Op::Mul,
        Expr::binary(Op::Add, Expr::Number(5), Expr::Number(3)),
        Expr::Number(2),
    );
    let empty = Context::default();
    out.line("expression", "(5 + 3) * 2")?;
    out.line("ast", &manual)?;
    match manual.interpret(&empty) {
        Ok(value) => out.line("result", value)?,
        Err(err) => out.line("eval-error", err)?,
    }

    let source = "(x + 10) - (y * 2)";
    out.line("expression", source)?;
    match parse(source) {
        Ok(expr) => {
            out.line("ast", &expr)?;
            for context in [
                Context::default().with("x", 5).with("y", 3),
                Context::default().with("x", 20).with("y", 7),
            ] {
                match expr.interpret(&context) {
                    Ok(value) => out.line("result", format!("{value} with {context}"))?,
                    Err(err) => out.line("eval-error", err)?,
                }
            }
            match expr.interpret(&empty) {
                Ok(value) => out.line("result", value)?,
                Err(err) => out.line("eval-error", err)?,
            }
        }
        Err(err) => out.line("parse-error", err)?,
    }

    for malformed in ["(1 + 2", "3 $ 4", "1 2"] {
        match parse(malformed) {
            Ok(expr) => out.line("ast", expr)?,
            Err(err) => out.line("parse-error", format!("{malformed:?}: {err}"))?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::capture;
    use proptest::prelude::*;

    #[test]
    fn test_precedence() {
        let expr = parse("1 + 2 * 3").unwrap();
        assert_eq!(expr.to_string(), "(1 + (2 * 3))");
        assert_eq!(expr.interpret(&Context::default()), Ok(7));
    }

    #[test]
    fn test_left_associative() {
        let expr = parse("10 - 4 - 3").unwrap();
        assert_eq!(expr.interpret(&Context::default()), Ok(3));
    }

    #[test]
    fn test_variables() {
        let expr = parse("(x + 10) - (y * 2)").unwrap();
        let ctx = Context::default().with("x", 5).with("y", 3);
        assert_eq!(expr.interpret(&ctx), Ok(9));
        let ctx = Context::default().with("x", 20).with("y", 7);
        assert_eq!(expr.interpret(&ctx), Ok(16));
        assert_eq!(
            expr.interpret(&Context::default()),
            Err(EvalError::Unbound {
                name: "x".to_string()
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse("(1 + 2"), Err(ParseError::UnexpectedEnd));
        assert_eq!(
            parse("3 $ 4"),
            Err(ParseError::UnexpectedChar { found: '$', at: 2 })
        );
        assert_eq!(
            parse("1 2"),
            Err(ParseError::UnexpectedToken {
                found: "2".to_string()
            })
        );
        assert_eq!(parse(""), Err(ParseError::UnexpectedEnd));
    }

    #[test]
    fn test_division() {
        let ctx = Context::default();
        assert_eq!(parse("7 / 2").unwrap().interpret(&ctx), Ok(3));
        assert_eq!(
            parse("1 / 0").unwrap().interpret(&ctx),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn test_transcript() {
        let text = capture(run).unwrap();
        assert!(text.contains("expression: (5 + 3) * 2\nast: ((5 + 3) * 2)\nresult: 16\n"));
        assert!(text.contains("result: 9 with x=5, y=3\n"));
        assert!(text.contains("result: 16 with x=20, y=7\n"));
        assert!(text.contains("eval-error: unbound variable x\n"));
        assert!(text.contains("parse-error: \"(1 + 2\": unexpected end of input\n"));
    }

    fn arb_expr() -> impl Strategy<Value = (Expr, i64)> {
        let leaf = (0i64..10).prop_map(|n| (Expr::Number(n), n));
        leaf.prop_recursive(3, 16, 2, |inner| {
            (inner.clone(), inner, prop_oneof![Just(Op::Add), Just(Op::Sub), Just(Op::Mul)])
                .prop_map(|((lhs, a), (rhs, b), op)| {
                    let value = match op {
                        Op::Add => a + b,
                        Op::Sub => a - b,
                        _ => a * b,
                    };
                    (Expr::binary(op, lhs, rhs), value)
                })
        })
    }

    proptest! {
        #[test]
        fn test_evaluator_matches_arithmetic((expr, expected) in arb_expr()) {
            prop_assert_eq!(expr.interpret(&Context::default()), Ok(expected));
        }

        #[test]
        fn test_printed_form_parses_back((expr, expected) in arb_expr()) {
            let reparsed = parse(&expr.to_string()).unwrap();
            prop_assert_eq!(reparsed.interpret(&Context::default()), Ok(expected));
        }
    }
}
