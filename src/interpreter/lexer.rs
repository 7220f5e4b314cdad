use logos::Logos;

/// A source location, with lines counted from 1 and the column pointing at
/// the first character of the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// The line number, starting at 1.
    pub line:   usize,
    /// The column of the token's first character, starting at 1.
    pub column: usize,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Represents a lexical token in the source input.
///
/// This enum defines every token of the language. Whitespace (space, tab,
/// carriage return, line feed) separates tokens and is skipped; there is no
/// comment syntax. `[` and `]` are recognized so they produce a proper
/// syntax error from the parser instead of a lexer failure, even though no
/// grammar rule consumes them.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Floating point literal tokens, such as `2.5`, `1.0e-3` or `3e8`.
    /// Higher priority than `BadLiteral`, which can match the same length
    /// on exponent forms like `1e3`.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_float, priority = 10)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_float, priority = 10)]
    LitFloat(f64),
    /// Integer literal tokens: `0`, or a nonzero digit followed by digits.
    #[regex(r"0|[1-9][0-9]*", parse_int)]
    LitInt(i32),
    /// Boolean literal tokens, `true` or `false`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    LitBool(bool),
    /// A numeric literal running into trailing alphabetic characters, such
    /// as `1.5a` or `123abc`. Never surfaced as a token; the token source
    /// reports it as a malformed literal. Low priority so that exponent
    /// forms keep lexing as floats.
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?[a-zA-Z_][a-zA-Z0-9_]*", priority = 3)]
    BadLiteral,
    /// `int`
    #[token("int")]
    Int,
    /// `float`
    #[token("float")]
    Float,
    /// `boolean`
    #[token("boolean")]
    Boolean,
    /// `function`
    #[token("function")]
    Function,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `for`
    #[token("for")]
    For,
    /// `while`
    #[token("while")]
    While,
    /// `return`
    #[token("return")]
    Return,
    /// `break`
    #[token("break")]
    Break,
    /// `continue`
    #[token("continue")]
    Continue,
    /// Identifier tokens; variable or function names such as `x` or `fact`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `=`
    #[token("=")]
    Assign,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,

    /// Line feeds advance the line counter and record where the new line
    /// starts, then disappear from the stream.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        lex.extras.line_start = lex.span().end;
        logos::Skip
    })]
    Newline,
    /// Spaces, tabs and carriage returns between tokens.
    #[regex(r"[ \t\r]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number and the byte offset where that line
/// starts, so the token source can attach a `(line, column)` position to
/// every token.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

/// Parses a floating-point literal from the current token slice.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice.
///
/// Values outside the `i32` range fail here, which the token source
/// surfaces as a malformed-literal error.
fn parse_int(lex: &logos::Lexer<Token>) -> Option<i32> {
    lex.slice().parse().ok()
}

/// Parses a boolean literal from the current token slice.
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LitFloat(value) => write!(f, "{value}"),
            Self::LitInt(value) => write!(f, "{value}"),
            Self::LitBool(value) => write!(f, "{value}"),
            Self::BadLiteral => write!(f, "<malformed literal>"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Boolean => write!(f, "boolean"),
            Self::Function => write!(f, "function"),
            Self::If => write!(f, "if"),
            Self::Else => write!(f, "else"),
            Self::For => write!(f, "for"),
            Self::While => write!(f, "while"),
            Self::Return => write!(f, "return"),
            Self::Break => write!(f, "break"),
            Self::Continue => write!(f, "continue"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Percent => write!(f, "%"),
            Self::AndAnd => write!(f, "&&"),
            Self::OrOr => write!(f, "||"),
            Self::EqualEqual => write!(f, "=="),
            Self::BangEqual => write!(f, "!="),
            Self::Less => write!(f, "<"),
            Self::Greater => write!(f, ">"),
            Self::Assign => write!(f, "="),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::LBrace => write!(f, "{{"),
            Self::RBrace => write!(f, "}}"),
            Self::LBracket => write!(f, "["),
            Self::RBracket => write!(f, "]"),
            Self::Semicolon => write!(f, ";"),
            Self::Comma => write!(f, ","),
            Self::Colon => write!(f, ":"),
            Self::Newline | Self::Ignored => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use logos::Logos;

    use super::Token;

    fn tokens(source: &str) -> Vec<Token> {
        Token::lexer(source).map(|token| token.expect("lex failure"))
                            .collect()
    }

    #[test]
    fn keywords_overlay_identifiers() {
        assert_eq!(tokens("int intx"),
                   vec![Token::Int, Token::Identifier("intx".to_string())]);
    }

    #[test]
    fn literal_forms() {
        assert_eq!(tokens("0 42 2.5 1e3 1.0e-2"),
                   vec![Token::LitInt(0),
                        Token::LitInt(42),
                        Token::LitFloat(2.5),
                        Token::LitFloat(1e3),
                        Token::LitFloat(1.0e-2)]);
    }

    #[test]
    fn trailing_alpha_is_a_bad_literal() {
        assert_eq!(tokens("1.5a"), vec![Token::BadLiteral]);
        assert_eq!(tokens("123abc"), vec![Token::BadLiteral]);
    }

    #[test]
    fn leading_zeros_do_not_merge() {
        assert_eq!(tokens("01"), vec![Token::LitInt(0), Token::LitInt(1)]);
    }

    #[test]
    fn two_character_operators() {
        assert_eq!(tokens("== != && || = <"),
                   vec![Token::EqualEqual,
                        Token::BangEqual,
                        Token::AndAnd,
                        Token::OrOr,
                        Token::Assign,
                        Token::Less]);
    }

    #[test]
    fn int_literal_overflow_is_an_error() {
        let mut lexer = Token::lexer("2147483648");
        assert_eq!(lexer.next(), Some(Err(())));
    }

    #[test]
    fn newlines_advance_the_line_counter() {
        let mut lexer = Token::lexer("a\nb");
        assert!(lexer.next().is_some());
        assert_eq!(lexer.extras.line, 1);
        assert!(lexer.next().is_some());
        assert_eq!(lexer.extras.line, 2);
        assert_eq!(lexer.extras.line_start, 2);
    }
}
