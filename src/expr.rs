// Parsing and elementwise evaluation of the user's function text.
//
// The text is preprocessed (a digit directly followed by 'i' gets an
// explicit multiplication inserted, so "2i" reads as "2*i"), tokenized,
// and parsed against a fixed allow-list of variables, constants and
// functions. Evaluation binds z, x and y per call; there is no shared
// evaluation state anywhere.

use std::fmt;

use num::complex::Complex;
use rayon::prelude::*;

use crate::error::PlotResult;
use crate::grid::{ComplexField, Grid};

mod parser;
mod token;

pub use parser::{BinOp, Expr, Func, Var};

/// Insert the multiplication the shorthand "2i" leaves out. An 'i' that
/// does not directly follow a digit is left untouched.
pub fn preprocess(text : &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut prev : Option<char> = None;
    for ch in text.chars() {
        if ch == 'i' && matches!(prev, Some(p) if p.is_ascii_digit()) {
            out.push('*');
        }
        out.push(ch);
        prev = Some(ch);
    }
    out
}

/// A parsed function of z, ready to evaluate over a grid.
pub struct Function {
    text : String,
    ast : Expr,
}

impl Function {
    pub fn parse(text : &str) -> PlotResult<Function> {
        let processed = preprocess(text);
        let tokens = token::Lexer::new(&processed).tokenize()?;
        let ast = parser::Parser::new(tokens).parse()?;
        Ok(Function { text: text.to_string(), ast })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn eval(&self, z : Complex<f64>) -> Complex<f64> {
        self.ast.eval(z)
    }

    // Elementwise application over the whole grid. Rows are independent so
    // the work parallelizes freely; collect keeps the pixel order.
    pub fn eval_grid(&self, grid : &Grid) -> ComplexField {
        let values = (0..grid.len())
            .into_par_iter()
            .map(|idx| self.ast.eval(grid.complex_at_index(idx)))
            .collect();
        ComplexField::new(grid.width(), grid.height(), values)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preprocess_inserts_multiplication_after_digits() {
        assert_eq!(preprocess("2i"), "2*i");
        assert_eq!(preprocess("sin(2i)"), "sin(2*i)");
        assert_eq!(preprocess("3.5i + 2i"), "3.5*i + 2*i");
    }

    #[test]
    fn preprocess_leaves_bare_i_alone() {
        assert_eq!(preprocess("i2"), "i2");
        assert_eq!(preprocess("i"), "i");
        assert_eq!(preprocess("sin(i)"), "sin(i)");
        assert_eq!(preprocess("pi"), "pi");
    }

    #[test]
    fn shorthand_literals_evaluate() {
        let f = Function::parse("2i").unwrap();
        assert_eq!(f.eval(Complex::new(0.0, 0.0)), Complex::new(0.0, 2.0));
        let f = Function::parse("sin(2i)").unwrap();
        assert_eq!(
            f.eval(Complex::new(0.0, 0.0)),
            Complex::new(0.0, 2.0).sin()
        );
    }

    #[test]
    fn display_keeps_the_original_text() {
        let f = Function::parse("sin(2i)").unwrap();
        assert_eq!(f.to_string(), "sin(2i)");
    }

    #[test]
    fn eval_grid_matches_pointwise_eval() {
        let f = Function::parse("z^2 - 1").unwrap();
        let grid = Grid::generate(9, 7, 4.0, 0.5, -0.25);
        let field = f.eval_grid(&grid);
        assert_eq!(field.width(), 9);
        assert_eq!(field.height(), 7);
        for r in 0..7 {
            for c in 0..9 {
                assert_eq!(field.at(r, c), f.eval(grid.complex_at(r, c)));
            }
        }
    }

    #[test]
    fn parse_failure_reports_invalid_expression() {
        assert!(Function::parse("surprise(z)").is_err());
        assert!(Function::parse("2 ** z").is_err());
    }
}
