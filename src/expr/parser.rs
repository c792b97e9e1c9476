// Pratt parser for the fixed function grammar. Identifiers are resolved
// against the allow-list while parsing, so an unknown symbol fails here
// with InvalidExpression instead of surfacing during pixel work.

use std::f64::consts::{E, PI};

use num::complex::Complex;

use crate::error::{PlotError, PlotResult};
use crate::expr::token::Token;
use crate::special;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Var {
    Z,
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Arcsin,
    Arccos,
    Arctan,
    Log,
    Exp,
    Gamma,
    Digamma,
    Lambertw,
    Zetac,
}

impl Func {
    fn from_name(name : &str) -> Option<Func> {
        match name {
            "sin" => Some(Func::Sin),
            "cos" => Some(Func::Cos),
            "tan" => Some(Func::Tan),
            "arcsin" => Some(Func::Arcsin),
            "arccos" => Some(Func::Arccos),
            "arctan" => Some(Func::Arctan),
            "log" => Some(Func::Log),
            "exp" => Some(Func::Exp),
            "gamma" => Some(Func::Gamma),
            "digamma" => Some(Func::Digamma),
            "lambertw" => Some(Func::Lambertw),
            "zetac" => Some(Func::Zetac),
            _ => None,
        }
    }

    pub fn apply(self, v : Complex<f64>) -> Complex<f64> {
        match self {
            Func::Sin => v.sin(),
            Func::Cos => v.cos(),
            Func::Tan => v.tan(),
            Func::Arcsin => v.asin(),
            Func::Arccos => v.acos(),
            Func::Arctan => v.atan(),
            Func::Log => v.ln(),
            Func::Exp => v.exp(),
            Func::Gamma => special::gamma(v),
            Func::Digamma => special::digamma(v),
            Func::Lambertw => special::lambertw(v),
            Func::Zetac => special::zetac(v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Num(Complex<f64>),
    Var(Var),
    Neg(Box<Expr>),
    Call(Func, Box<Expr>),
    Bin(BinOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn eval(&self, z : Complex<f64>) -> Complex<f64> {
        match self {
            Expr::Num(v) => *v,
            Expr::Var(Var::Z) => z,
            Expr::Var(Var::X) => Complex::new(z.re, 0.0),
            Expr::Var(Var::Y) => Complex::new(z.im, 0.0),
            Expr::Neg(inner) => -inner.eval(z),
            Expr::Call(func, arg) => func.apply(arg.eval(z)),
            Expr::Bin(op, lhs, rhs) => {
                let l = lhs.eval(z);
                let r = rhs.eval(z);
                match op {
                    BinOp::Add => l + r,
                    BinOp::Sub => l - r,
                    BinOp::Mul => l * r,
                    BinOp::Div => l / r,
                    BinOp::Pow => l.powc(r),
                }
            }
        }
    }
}

pub struct Parser {
    tokens : Vec<Token>,
    pos : usize,
}

// Prefix minus binds tighter than multiplication but looser than the
// right-associative power, so -z^2 means -(z^2).
const NEG_BP : u8 = 13;

impl Parser {
    pub fn new(tokens : Vec<Token>) -> Parser {
        Parser { tokens, pos: 0 }
    }

    pub fn parse(mut self) -> PlotResult<Expr> {
        let expr = self.parse_expr(0)?;
        match self.peek() {
            Token::Eof => Ok(expr),
            other => Err(PlotError::InvalidExpression(format!(
                "unexpected {:?} after expression",
                other
            ))),
        }
    }

    fn parse_expr(&mut self, min_bp : u8) -> PlotResult<Expr> {
        let mut lhs = self.parse_prefix()?;
        loop {
            let (op, left_bp, right_bp) = match self.peek() {
                Token::Plus => (BinOp::Add, 9, 10),
                Token::Minus => (BinOp::Sub, 9, 10),
                Token::Star => (BinOp::Mul, 11, 12),
                Token::Slash => (BinOp::Div, 11, 12),
                Token::Caret => (BinOp::Pow, 16, 15),
                _ => break,
            };
            if left_bp < min_bp {
                break;
            }
            self.advance();
            let rhs = self.parse_expr(right_bp)?;
            lhs = Expr::Bin(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_prefix(&mut self) -> PlotResult<Expr> {
        match self.advance() {
            Token::Num(v) => Ok(Expr::Num(Complex::new(v, 0.0))),
            Token::Plus => self.parse_expr(NEG_BP),
            Token::Minus => Ok(Expr::Neg(Box::new(self.parse_expr(NEG_BP)?))),
            Token::LParen => {
                let inner = self.parse_expr(0)?;
                self.expect_rparen()?;
                Ok(inner)
            }
            Token::Ident(name) => self.resolve_ident(name),
            other => Err(PlotError::InvalidExpression(format!(
                "unexpected {:?} in expression",
                other
            ))),
        }
    }

    fn resolve_ident(&mut self, name : String) -> PlotResult<Expr> {
        match name.as_str() {
            "z" => return Ok(Expr::Var(Var::Z)),
            "x" => return Ok(Expr::Var(Var::X)),
            "y" => return Ok(Expr::Var(Var::Y)),
            "pi" => return Ok(Expr::Num(Complex::new(PI, 0.0))),
            "e" => return Ok(Expr::Num(Complex::new(E, 0.0))),
            "i" => return Ok(Expr::Num(Complex::new(0.0, 1.0))),
            _ => {}
        }
        if let Some(func) = Func::from_name(&name) {
            if self.peek() != &Token::LParen {
                return Err(PlotError::InvalidExpression(format!(
                    "function '{}' needs an argument",
                    name
                )));
            }
            self.advance();
            let arg = self.parse_expr(0)?;
            self.expect_rparen()?;
            return Ok(Expr::Call(func, Box::new(arg)));
        }
        Err(PlotError::InvalidExpression(format!("unknown symbol '{}'", name)))
    }

    fn expect_rparen(&mut self) -> PlotResult<()> {
        match self.advance() {
            Token::RParen => Ok(()),
            other => Err(PlotError::InvalidExpression(format!(
                "expected ')', found {:?}",
                other
            ))),
        }
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens.get(self.pos).cloned().unwrap_or(Token::Eof);
        self.pos += 1;
        token
    }
}
