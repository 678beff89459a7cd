//! Evaluation of the `condition` attribute from package.xml format 3.
//!
//! Expressions compare `$VARIABLE`s and literals with `==`, `!=`, `<`, `<=`,
//! `>`, `>=` and combine them with `and`, `or` and parentheses, e.g.
//! `$ROS_VERSION == 2 and $ROS_DISTRO != foxy`.

use crate::shared::Result;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// Deepest parenthesis nesting accepted in a condition
const MAX_NESTING_DEPTH: usize = 32;

/// Variables available to condition expressions
pub type ConditionContext = HashMap<String, String>;

/// A parsed `condition` attribute
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    source: String,
    expr: Expr,
}

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Compare(Operand, CompareOp, Operand),
    Truthy(Operand),
}

#[derive(Debug, Clone, PartialEq)]
enum Operand {
    Variable(String),
    Literal(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    LParen,
    RParen,
    And,
    Or,
    Op(CompareOp),
    Variable(String),
    Literal(String),
}

impl Condition {
    /// Parses a condition expression
    ///
    /// # Errors
    /// Returns an error describing the first syntax problem found
    pub fn parse(source: &str) -> Result<Self> {
        let tokens = tokenize(source)?;
        if tokens.is_empty() {
            anyhow::bail!("condition is empty");
        }
        let mut parser = Parser {
            tokens,
            pos: 0,
            depth: 0,
        };
        let expr = parser.parse_or()?;
        if let Some(token) = parser.peek() {
            anyhow::bail!("unexpected token {:?} in condition '{}'", token, source);
        }
        Ok(Self {
            source: source.to_string(),
            expr,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Evaluates the condition; unset variables compare as the empty string
    pub fn evaluate(&self, context: &ConditionContext) -> bool {
        self.expr.evaluate(context)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Expr {
    fn evaluate(&self, context: &ConditionContext) -> bool {
        match self {
            Expr::And(lhs, rhs) => lhs.evaluate(context) && rhs.evaluate(context),
            Expr::Or(lhs, rhs) => lhs.evaluate(context) || rhs.evaluate(context),
            Expr::Truthy(operand) => !operand.resolve(context).is_empty(),
            Expr::Compare(lhs, op, rhs) => {
                let ordering = compare_values(&lhs.resolve(context), &rhs.resolve(context));
                match op {
                    CompareOp::Eq => ordering == Ordering::Equal,
                    CompareOp::Ne => ordering != Ordering::Equal,
                    CompareOp::Lt => ordering == Ordering::Less,
                    CompareOp::Le => ordering != Ordering::Greater,
                    CompareOp::Gt => ordering == Ordering::Greater,
                    CompareOp::Ge => ordering != Ordering::Less,
                }
            }
        }
    }
}

impl Operand {
    fn resolve(&self, context: &ConditionContext) -> String {
        match self {
            Operand::Variable(name) => context.get(name).cloned().unwrap_or_default(),
            Operand::Literal(value) => value.clone(),
        }
    }
}

/// Numbers compare numerically, everything else lexicographically
fn compare_values(lhs: &str, rhs: &str) -> Ordering {
    match (lhs.parse::<f64>(), rhs.parse::<f64>()) {
        (Ok(a), Ok(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        _ => lhs.cmp(rhs),
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.')
}

fn tokenize(source: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '=' | '!' | '<' | '>' => {
                chars.next();
                let followed_by_eq = chars.peek() == Some(&'=');
                if followed_by_eq {
                    chars.next();
                }
                let op = match (c, followed_by_eq) {
                    ('=', true) => CompareOp::Eq,
                    ('!', true) => CompareOp::Ne,
                    ('<', true) => CompareOp::Le,
                    ('<', false) => CompareOp::Lt,
                    ('>', true) => CompareOp::Ge,
                    ('>', false) => CompareOp::Gt,
                    _ => anyhow::bail!("invalid operator '{}' in condition '{}'", c, source),
                };
                tokens.push(Token::Op(op));
            }
            '$' => {
                chars.next();
                let mut name = String::new();
                while let Some(&n) = chars.peek() {
                    if n.is_alphanumeric() || n == '_' {
                        name.push(n);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if name.is_empty() {
                    anyhow::bail!("'$' without variable name in condition '{}'", source);
                }
                tokens.push(Token::Variable(name));
            }
            '"' | '\'' => {
                chars.next();
                let mut value = String::new();
                let mut closed = false;
                for n in chars.by_ref() {
                    if n == c {
                        closed = true;
                        break;
                    }
                    value.push(n);
                }
                if !closed {
                    anyhow::bail!("unterminated string in condition '{}'", source);
                }
                tokens.push(Token::Literal(value));
            }
            c if is_word_char(c) => {
                let mut word = String::new();
                while let Some(&n) = chars.peek() {
                    if is_word_char(n) {
                        word.push(n);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(match word.as_str() {
                    "and" => Token::And,
                    "or" => Token::Or,
                    _ => Token::Literal(word),
                });
            }
            other => anyhow::bail!("unexpected character '{}' in condition '{}'", other, source),
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn parse_or(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_and()?;
        while self.peek() == Some(&Token::Or) {
            self.pos += 1;
            let rhs = self.parse_and()?;
            lhs = Expr::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_primary()?;
        while self.peek() == Some(&Token::And) {
            self.pos += 1;
            let rhs = self.parse_primary()?;
            lhs = Expr::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        if self.peek() == Some(&Token::LParen) {
            self.pos += 1;
            self.depth += 1;
            if self.depth > MAX_NESTING_DEPTH {
                anyhow::bail!(
                    "condition nests parentheses deeper than {} levels",
                    MAX_NESTING_DEPTH
                );
            }
            let inner = self.parse_or()?;
            self.depth -= 1;
            match self.next() {
                Some(Token::RParen) => return Ok(inner),
                _ => anyhow::bail!("missing closing parenthesis"),
            }
        }

        let lhs = self.parse_operand()?;
        if let Some(Token::Op(op)) = self.peek().cloned() {
            self.pos += 1;
            let rhs = self.parse_operand()?;
            return Ok(Expr::Compare(lhs, op, rhs));
        }
        Ok(Expr::Truthy(lhs))
    }

    fn parse_operand(&mut self) -> Result<Operand> {
        match self.next() {
            Some(Token::Variable(name)) => Ok(Operand::Variable(name)),
            Some(Token::Literal(value)) => Ok(Operand::Literal(value)),
            Some(other) => anyhow::bail!("expected a variable or literal, found {:?}", other),
            None => anyhow::bail!("unexpected end of condition"),
        }
    }
}
