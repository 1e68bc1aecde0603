//! SELECT statement - the three axes of an MDX query plus the cube.

use super::expr::{cross_join, MdxExpr};
use super::token::{Token, TokenStream};

/// An MDX SELECT statement.
///
/// Rows and slicer entries are cross-joined; columns are a flat set.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "builders have no effect until used"]
pub struct Statement {
    pub columns: Vec<MdxExpr>,
    pub rows: Vec<MdxExpr>,
    pub slicer: Vec<MdxExpr>,
    pub cube: String,
}

impl Statement {
    pub fn new(cube: &str) -> Self {
        Self {
            columns: vec![],
            rows: vec![],
            slicer: vec![],
            cube: cube.into(),
        }
    }

    pub fn with_columns(mut self, columns: Vec<MdxExpr>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_rows(mut self, rows: Vec<MdxExpr>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_slicer(mut self, slicer: Vec<MdxExpr>) -> Self {
        self.slicer = slicer;
        self
    }

    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();
        ts.push(Token::Select).newline();

        if !self.columns.is_empty() {
            ts.append(&MdxExpr::Set(self.columns.clone()).to_tokens());
            ts.space().push(Token::On).space().push(Token::Columns);
        }

        if !self.rows.is_empty() {
            if !self.columns.is_empty() {
                ts.comma().newline();
            }
            ts.push(Token::NonEmpty).space();
            ts.append(&braced_cross_join(&self.rows));
            ts.space().push(Token::On).space().push(Token::Rows);
        }

        if !self.columns.is_empty() || !self.rows.is_empty() {
            ts.newline();
        }
        ts.push(Token::From).space().push(Token::Ident(self.cube.clone()));

        if !self.slicer.is_empty() {
            ts.newline().push(Token::Where).space();
            ts.append(&braced_cross_join(&self.slicer));
        }

        ts
    }

    pub fn to_mdx(&self) -> String {
        self.to_tokens().serialize()
    }
}

fn braced_cross_join(items: &[MdxExpr]) -> TokenStream {
    let mut ts = TokenStream::new();
    ts.lbrace();
    ts.append(&cross_join(items.to_vec()).to_tokens());
    ts.rbrace();
    ts
}
