//! MDX Tokens - the atomic units of MDX output.
//!
//! Every statement and expression is lowered to a flat token stream and
//! serialized in one pass, so quoting rules live in exactly one place.

/// MDX Token - every possible element in an MDX statement.
///
/// Adding a new variant here will cause compile errors everywhere
/// it needs to be handled (exhaustive matching).
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // === Keywords ===
    Select,
    On,
    Columns,
    Rows,
    NonEmpty,
    From,
    Where,
    And,
    /// Ascending, hierarchy-breaking order flag.
    BAsc,
    /// Descending, hierarchy-breaking order flag.
    BDesc,

    // === Member properties ===
    Members,
    CurrentMember,
    Caption,

    // === Punctuation ===
    Comma,
    Dot,
    /// Cross-join operator.
    Star,
    LParen,
    RParen,
    LBrace,
    RBrace,

    // === Comparison operators ===
    Eq,
    Lt,
    Gt,
    Lte,
    Gte,

    // === Whitespace / Formatting ===
    Space,
    Newline,

    // === Dynamic Content ===
    /// Bracketed name segment: `[Region]`
    Ident(String),
    /// Single-quoted string literal
    LitString(String),
    /// Function name, rendered as-is
    FunctionName(String),
}

impl Token {
    /// Serialize this token to MDX text.
    pub fn serialize(&self) -> String {
        match self {
            Token::Select => "SELECT".into(),
            Token::On => "ON".into(),
            Token::Columns => "COLUMNS".into(),
            Token::Rows => "ROWS".into(),
            Token::NonEmpty => "NON EMPTY".into(),
            Token::From => "FROM".into(),
            Token::Where => "WHERE".into(),
            Token::And => "and".into(),
            Token::BAsc => "BASC".into(),
            Token::BDesc => "BDESC".into(),

            Token::Members => "Members".into(),
            Token::CurrentMember => "currentMember".into(),
            Token::Caption => "caption".into(),

            Token::Comma => ",".into(),
            Token::Dot => ".".into(),
            Token::Star => "*".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
            Token::LBrace => "{".into(),
            Token::RBrace => "}".into(),

            Token::Eq => "=".into(),
            Token::Lt => "<".into(),
            Token::Gt => ">".into(),
            Token::Lte => "<=".into(),
            Token::Gte => ">=".into(),

            Token::Space => " ".into(),
            Token::Newline => "\n".into(),

            Token::Ident(name) => quote_bracket(name),
            Token::LitString(s) => quote_string(s),
            Token::FunctionName(name) => name.clone(),
        }
    }
}

/// Bracket a name segment, doubling any closing bracket inside it.
pub fn quote_bracket(ident: &str) -> String {
    format!("[{}]", ident.replace(']', "]]"))
}

/// Single-quote a string literal, doubling embedded quotes.
pub fn quote_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// A stream of tokens that can be serialized to MDX.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Create an empty token stream.
    pub fn new() -> Self {
        Self { tokens: vec![] }
    }

    /// Push a single token.
    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    /// Extend with multiple tokens.
    pub fn extend(&mut self, tokens: impl IntoIterator<Item = Token>) -> &mut Self {
        self.tokens.extend(tokens);
        self
    }

    /// Append another token stream.
    pub fn append(&mut self, other: &TokenStream) -> &mut Self {
        self.tokens.extend(other.tokens.iter().cloned());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Serialize all tokens to an MDX string.
    pub fn serialize(&self) -> String {
        self.tokens.iter().map(Token::serialize).collect()
    }

    // Convenience methods for common tokens
    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }
    pub fn newline(&mut self) -> &mut Self {
        self.push(Token::Newline)
    }
    pub fn comma(&mut self) -> &mut Self {
        self.push(Token::Comma)
    }
    pub fn dot(&mut self) -> &mut Self {
        self.push(Token::Dot)
    }
    pub fn lparen(&mut self) -> &mut Self {
        self.push(Token::LParen)
    }
    pub fn rparen(&mut self) -> &mut Self {
        self.push(Token::RParen)
    }
    pub fn lbrace(&mut self) -> &mut Self {
        self.push(Token::LBrace)
    }
    pub fn rbrace(&mut self) -> &mut Self {
        self.push(Token::RBrace)
    }
}
