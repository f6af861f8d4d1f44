//! Tokenizer and recursive-descent parser for the closed operator set
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! or    := and ('|' and)*
//! and   := xor ('&' xor)*
//! xor   := unary ('^' unary)*
//! unary := ('~' | '!') unary | atom
//! atom  := VARIABLE | '0' | '1' | '(' or ')'
//! ```
//!
//! Binary operators associate to the left. A variable is a single letter;
//! any other word is rejected, so nothing outside Boolean arithmetic on the
//! named variables can be expressed.
//!
//! Both the parser's own recursion and the height of the resulting tree are
//! bounded by [`MAX_DEPTH`], so a long flat chain such as `A & A & ... & A`
//! is rejected instead of producing a tree too deep to evaluate or drop.

use super::BoolExpr;
use crate::error::{Error, Result};

/// Deepest nesting accepted, counting parentheses, negations and binary
/// operators along any path of the tree
pub const MAX_DEPTH: usize = 256;

/// A subtree and its height
type Parsed = (BoolExpr, usize);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Not,
    And,
    Or,
    Xor,
    Open,
    Close,
    Const(bool),
    Var(String),
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Not => "'~'".into(),
            Token::And => "'&'".into(),
            Token::Or => "'|'".into(),
            Token::Xor => "'^'".into(),
            Token::Open => "'('".into(),
            Token::Close => "')'".into(),
            Token::Const(true) => "'1'".into(),
            Token::Const(false) => "'0'".into(),
            Token::Var(name) => format!("variable '{}'", name),
        }
    }
}

/// Parse an expression (normalized or not) into a [`BoolExpr`]
pub fn parse(expression: &str) -> Result<BoolExpr> {
    let tokens = tokenize(expression)?;
    if tokens.is_empty() {
        return Err(Error::Evaluation("Empty expression".into()));
    }

    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
    };
    let (expr, _) = parser.or()?;
    match parser.peek() {
        None => Ok(expr),
        Some(Token::Close) => Err(Error::Evaluation(format!(
            "Unbalanced parentheses: unexpected ')' at token {}",
            parser.pos + 1
        ))),
        Some(token) => Err(Error::Evaluation(format!(
            "Unexpected {} at token {}",
            token.describe(),
            parser.pos + 1
        ))),
    }
}

fn tokenize(expression: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = expression.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '~' | '!' => tokens.push(Token::Not),
            '&' => tokens.push(Token::And),
            '|' => tokens.push(Token::Or),
            '^' => tokens.push(Token::Xor),
            '(' => tokens.push(Token::Open),
            ')' => tokens.push(Token::Close),
            c if c.is_alphanumeric() || c == '_' => {
                let mut word = String::from(c);
                while let Some(&next) = chars.peek() {
                    if next.is_alphanumeric() || next == '_' {
                        word.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(word_token(&word)?);
            }
            other => {
                return Err(Error::Evaluation(format!("Unknown symbol '{}'", other)));
            }
        }
    }

    Ok(tokens)
}

fn word_token(word: &str) -> Result<Token> {
    match word {
        "0" => Ok(Token::Const(false)),
        "1" => Ok(Token::Const(true)),
        _ => {
            let mut chars = word.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphabetic() => {
                    Ok(Token::Var(c.to_ascii_uppercase().to_string()))
                }
                _ => Err(Error::Evaluation(format!("Unknown symbol '{}'", word))),
            }
        }
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn descend(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(too_deep());
        }
        Ok(())
    }

    fn or(&mut self) -> Result<Parsed> {
        let mut left = self.and()?;
        while self.eat(&Token::Or) {
            let right = self.and()?;
            left = join(BoolExpr::or, left, right)?;
        }
        Ok(left)
    }

    fn and(&mut self) -> Result<Parsed> {
        let mut left = self.xor()?;
        while self.eat(&Token::And) {
            let right = self.xor()?;
            left = join(BoolExpr::and, left, right)?;
        }
        Ok(left)
    }

    fn xor(&mut self) -> Result<Parsed> {
        let mut left = self.unary()?;
        while self.eat(&Token::Xor) {
            let right = self.unary()?;
            left = join(BoolExpr::xor, left, right)?;
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Parsed> {
        if self.eat(&Token::Not) {
            self.descend()?;
            let (inner, height) = self.unary()?;
            self.depth -= 1;
            return Ok((BoolExpr::not(inner), checked_height(height + 1)?));
        }
        self.atom()
    }

    fn atom(&mut self) -> Result<Parsed> {
        let at = self.pos + 1;
        match self.advance() {
            Some(Token::Var(name)) => Ok((BoolExpr::Var(name.clone()), 1)),
            Some(Token::Const(value)) => Ok((BoolExpr::Const(*value), 1)),
            Some(Token::Open) => {
                if self.peek() == Some(&Token::Close) {
                    return Err(Error::Evaluation(format!(
                        "Empty parentheses at token {}",
                        at
                    )));
                }
                self.descend()?;
                let inner = self.or()?;
                self.depth -= 1;
                if !self.eat(&Token::Close) {
                    return Err(Error::Evaluation(format!(
                        "Unbalanced parentheses: '(' at token {} is never closed",
                        at
                    )));
                }
                Ok(inner)
            }
            Some(token) => Err(Error::Evaluation(format!(
                "Expected operand, found {} at token {}",
                token.describe(),
                at
            ))),
            None => Err(Error::Evaluation(
                "Expected operand, found end of expression".into(),
            )),
        }
    }
}

fn join(
    build: fn(BoolExpr, BoolExpr) -> BoolExpr,
    (left, left_height): Parsed,
    (right, right_height): Parsed,
) -> Result<Parsed> {
    let height = checked_height(left_height.max(right_height) + 1)?;
    Ok((build(left, right), height))
}

fn checked_height(height: usize) -> Result<usize> {
    if height > MAX_DEPTH {
        return Err(too_deep());
    }
    Ok(height)
}

fn too_deep() -> Error {
    Error::Evaluation(format!(
        "Expression nested deeper than {} levels",
        MAX_DEPTH
    ))
}
