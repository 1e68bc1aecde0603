//! Expression AST - the set and member expressions that make up MDX axes.
//!
//! Expressions are built as a tree and rendered through a [`TokenStream`],
//! so nesting is always balanced and every name segment is quoted the same
//! way.

use super::token::{Token, TokenStream};

// =============================================================================
// Expression AST
// =============================================================================

/// An MDX expression.
///
/// Every variant must be handled in `to_tokens()` - the compiler enforces this.
#[derive(Debug, Clone, PartialEq)]
pub enum MdxExpr {
    /// Bracketed path: `[Date].[Month].[2023-01]`
    Path(Vec<String>),

    /// All members of a level or hierarchy: `expr.Members`
    Members(Box<MdxExpr>),

    /// `expr.currentMember`
    CurrentMember(Box<MdxExpr>),

    /// `expr.caption`
    Caption(Box<MdxExpr>),

    /// String literal: `'2023-01'`
    Literal(String),

    /// Brace-enclosed set: `{a,b,c}`
    Set(Vec<MdxExpr>),

    /// Cross-join of sets: `a*b*c`
    CrossJoin(Vec<MdxExpr>),

    /// Function call: `name(arg, arg)`
    Function { name: String, args: Vec<MdxExpr> },

    /// `order(set, key, BASC|BDESC)`
    Order {
        set: Box<MdxExpr>,
        key: Box<MdxExpr>,
        dir: SortDir,
    },

    /// `filter(set, predicate)`
    Filter {
        set: Box<MdxExpr>,
        predicate: Box<MdxExpr>,
    },

    /// Comparison: `left op right`
    Compare {
        left: Box<MdxExpr>,
        op: ComparisonOp,
        right: Box<MdxExpr>,
    },

    /// Conjunction: `a and b and c`
    And(Vec<MdxExpr>),

    /// Parenthesized expression
    Paren(Box<MdxExpr>),
}

/// Sort direction for `order()`.
///
/// Both directions break the hierarchy, matching the flags the cube server
/// expects for flat result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

/// Comparison operators usable in `filter()` predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    Lt,
    Gt,
    Lte,
    Gte,
}

impl ComparisonOp {
    fn to_token(self) -> Token {
        match self {
            ComparisonOp::Eq => Token::Eq,
            ComparisonOp::Lt => Token::Lt,
            ComparisonOp::Gt => Token::Gt,
            ComparisonOp::Lte => Token::Lte,
            ComparisonOp::Gte => Token::Gte,
        }
    }
}

// =============================================================================
// Expression to Tokens
// =============================================================================

impl MdxExpr {
    /// Convert this expression to a token stream.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();

        match self {
            MdxExpr::Path(segments) => {
                for (i, segment) in segments.iter().enumerate() {
                    if i > 0 {
                        ts.dot();
                    }
                    ts.push(Token::Ident(segment.clone()));
                }
            }

            MdxExpr::Members(inner) => {
                ts.append(&inner.to_tokens()).dot().push(Token::Members);
            }

            MdxExpr::CurrentMember(inner) => {
                ts.append(&inner.to_tokens()).dot().push(Token::CurrentMember);
            }

            MdxExpr::Caption(inner) => {
                ts.append(&inner.to_tokens()).dot().push(Token::Caption);
            }

            MdxExpr::Literal(value) => {
                ts.push(Token::LitString(value.clone()));
            }

            MdxExpr::Set(items) => {
                ts.lbrace();
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        ts.comma();
                    }
                    ts.append(&item.to_tokens());
                }
                ts.rbrace();
            }

            MdxExpr::CrossJoin(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        ts.push(Token::Star);
                    }
                    ts.append(&item.to_tokens());
                }
            }

            MdxExpr::Function { name, args } => {
                ts.push(Token::FunctionName(name.clone()));
                ts.lparen();
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        ts.comma().space();
                    }
                    ts.append(&arg.to_tokens());
                }
                ts.rparen();
            }

            MdxExpr::Order { set, key, dir } => {
                ts.push(Token::FunctionName("order".into()));
                ts.lparen();
                ts.append(&set.to_tokens());
                ts.comma().space();
                ts.append(&key.to_tokens());
                ts.comma().space();
                ts.push(match dir {
                    SortDir::Asc => Token::BAsc,
                    SortDir::Desc => Token::BDesc,
                });
                ts.rparen();
            }

            MdxExpr::Filter { set, predicate } => {
                ts.push(Token::FunctionName("filter".into()));
                ts.lparen();
                ts.append(&set.to_tokens());
                ts.comma().space();
                ts.append(&predicate.to_tokens());
                ts.rparen();
            }

            MdxExpr::Compare { left, op, right } => {
                ts.append(&left.to_tokens());
                ts.space().push(op.to_token()).space();
                ts.append(&right.to_tokens());
            }

            MdxExpr::And(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        ts.space().push(Token::And).space();
                    }
                    ts.append(&term.to_tokens());
                }
            }

            MdxExpr::Paren(inner) => {
                ts.lparen();
                ts.append(&inner.to_tokens());
                ts.rparen();
            }
        }

        ts
    }

    /// Render this expression to MDX text.
    pub fn to_mdx(&self) -> String {
        self.to_tokens().serialize()
    }

    /// `self.Members`
    pub fn members(self) -> MdxExpr {
        MdxExpr::Members(Box::new(self))
    }

    /// `self.currentMember`
    pub fn current_member(self) -> MdxExpr {
        MdxExpr::CurrentMember(Box::new(self))
    }

    /// `self.caption`
    pub fn caption(self) -> MdxExpr {
        MdxExpr::Caption(Box::new(self))
    }

    /// `(self)`
    pub fn paren(self) -> MdxExpr {
        MdxExpr::Paren(Box::new(self))
    }

    /// `self op right`
    pub fn compare(self, op: ComparisonOp, right: MdxExpr) -> MdxExpr {
        MdxExpr::Compare {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }
}

// =============================================================================
// Constructors
// =============================================================================

/// Bracketed path from name segments.
pub fn path<I, S>(segments: I) -> MdxExpr
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    MdxExpr::Path(segments.into_iter().map(Into::into).collect())
}

/// `[Measures].[name]`
pub fn measure(name: &str) -> MdxExpr {
    path(["Measures", name])
}

/// String literal.
pub fn lit_str(value: impl Into<String>) -> MdxExpr {
    MdxExpr::Literal(value.into())
}

/// Brace-enclosed set.
pub fn set(items: Vec<MdxExpr>) -> MdxExpr {
    MdxExpr::Set(items)
}

/// Cross-join of the given sets.
pub fn cross_join(items: Vec<MdxExpr>) -> MdxExpr {
    MdxExpr::CrossJoin(items)
}

/// Generic function call.
pub fn func(name: &str, args: Vec<MdxExpr>) -> MdxExpr {
    MdxExpr::Function {
        name: name.into(),
        args,
    }
}

/// `Descendants(set, level)`
pub fn descendants(set: MdxExpr, level: MdxExpr) -> MdxExpr {
    func("Descendants", vec![set, level])
}

/// `Ancestor(member, level)`
pub fn ancestor(member: MdxExpr, level: MdxExpr) -> MdxExpr {
    func("Ancestor", vec![member, level])
}

/// `order(set, key, dir)`
pub fn order(set: MdxExpr, key: MdxExpr, dir: SortDir) -> MdxExpr {
    MdxExpr::Order {
        set: Box::new(set),
        key: Box::new(key),
        dir,
    }
}

/// `filter(set, predicate)`
pub fn filter(set: MdxExpr, predicate: MdxExpr) -> MdxExpr {
    MdxExpr::Filter {
        set: Box::new(set),
        predicate: Box::new(predicate),
    }
}

/// Conjunction of predicates; a single predicate is returned as-is.
pub fn and_all(mut terms: Vec<MdxExpr>) -> MdxExpr {
    if terms.len() == 1 {
        terms.remove(0)
    } else {
        MdxExpr::And(terms)
    }
}
