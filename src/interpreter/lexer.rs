use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Numeric literal tokens, such as `3.14` or `-0.5`.
    #[regex(r"-?[0-9]+\.[0-9]+", parse_float)]
    Real(f64),
    /// Integer literal tokens, such as `42` or `-90`.
    #[regex(r"-?[0-9]+", parse_integer)]
    Integer(i64),
    /// Boolean literal tokens, such as `True`.
    #[token("True", parse_bool)]
    #[token("False", parse_bool)]
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// String literal tokens, such as `"img.png"`. Escapes are resolved.
    #[regex(r#""([^"\\\n]|\\.)*""#, parse_string, allow_greedy = true)]
    Str(String),
    /// Identifier tokens; operation, keyword, variable or function names.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `# Comments.` The text excludes the `#`.
    #[regex(r"#[^\n\r]*", |lex| lex.slice()[1..].trim().to_string(), allow_greedy = true)]
    Comment(String),
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `=`
    #[token("=")]
    Equals,
    /// A line break. Carries the indentation width of the line that follows.
    #[regex(r"\r?\n[ \t]*", newline)]
    NewLine(usize),
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\f\r]+", logos::skip)]
    Ignored,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Real(r) => write!(f, "{r}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::Comment(text) => write!(f, "# {text}"),
            Self::LBracket => write!(f, "["),
            Self::RBracket => write!(f, "]"),
            Self::Comma => write!(f, ","),
            Self::Colon => write!(f, ":"),
            Self::EqualEqual => write!(f, "=="),
            Self::BangEqual => write!(f, "!="),
            Self::Equals => write!(f, "="),
            Self::NewLine(_) => write!(f, "end of line"),
            Self::Ignored => Ok(()),
        }
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number and where that line starts, so every token
/// can be given a line and column for diagnostics.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset at which the current line starts.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

/// A 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Source line.
    pub line:   usize,
    /// Source column, in characters.
    pub column: usize,
}

/// Splits source text into tokens paired with their start positions.
///
/// # Parameters
/// - `source`: The script text.
///
/// # Returns
/// Every token in order, each with the line and column it starts at.
///
/// # Errors
/// - `UnexpectedCharacter` for input that starts no token, including an
///   unterminated string.
/// - `LiteralTooLarge` for an integer that does not fit in 64 bits.
///
/// # Example
/// ```
/// use visionscript::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("Say[\"hi\"]").unwrap();
/// let kinds = tokens.into_iter().map(|(t, _)| t).collect::<Vec<_>>();
///
/// assert_eq!(kinds,
///            vec![Token::Identifier("Say".to_string()),
///                 Token::LBracket,
///                 Token::Str("hi".to_string()),
///                 Token::RBracket]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, Position)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras::default());
    // Byte offset and column of the last token start, so columns count
    // characters without rescanning the line.
    let mut counted = (0, 1);

    loop {
        let line = lexer.extras.line;
        let line_start = lexer.extras.line_start;

        let Some(token) = lexer.next() else {
            break;
        };

        let start = lexer.span().start;
        if counted.0 < line_start {
            counted = (line_start, 1);
        }
        let column = counted.1 + source[counted.0..start].chars().count();
        counted = (start, column);

        let position = Position { line, column };

        match token {
            Ok(tok) => tokens.push((tok, position)),
            Err(()) => {
                let slice = lexer.slice();
                if slice.len() > 1 && slice.trim_start_matches('-').bytes().all(|b| b.is_ascii_digit())
                {
                    return Err(ParseError::LiteralTooLarge { literal: slice.to_string(),
                                                             line:    position.line,
                                                             column:  position.column, });
                }

                let character = slice.chars().next().unwrap_or_default();
                return Err(ParseError::UnexpectedCharacter { character,
                                                             line: position.line,
                                                             column: position.column });
            },
        }
    }

    Ok(tokens)
}

/// Records a line break and returns the indentation of the next line.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// The number of spaces and tabs that open the following line.
fn newline(lex: &mut logos::Lexer<Token>) -> usize {
    let slice = lex.slice();
    let break_len = if slice.starts_with('\r') { 2 } else { 1 };

    lex.extras.line += 1;
    lex.extras.line_start = lex.span().start + break_len;

    slice.len() - break_len
}

/// Parses a floating-point literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(f64)`: The parsed floating-point value if successful.
/// - `None`: If the token slice is not a valid float.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}
/// Parses an integer literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(i64)`: The parsed integer value if successful.
/// - `None`: If the token slice does not fit in an `i64`.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}
/// Parses a boolean literal from the current token slice.
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "True" | "true" => Some(true),
        "False" | "false" => Some(false),
        _ => None,
    }
}

/// Strips the quotes from a string literal and resolves its escapes.
///
/// `\n`, `\t`, `\"` and `\\` are recognised; any other escaped character
/// stands for itself.
fn parse_string(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => {},
        }
    }
    out
}
