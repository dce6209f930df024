use std::iter::Peekable;

use crate::{
    ast::{Node, Program},
    error::ParseError,
    interpreter::{
        lexer::{Position, Token, tokenize},
        parser::{binary::parse_equality, statement::parse_line},
    },
    suggest::refine,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Deepest combined nesting of brackets and indented blocks a script may
/// use.
pub const MAX_NESTING: usize = 128;

/// Parses a whole script.
///
/// This is the entry point for parsing. The source is tokenized, then parsed
/// line by line. Any failure is passed through the suggestion engine so that
/// misspelled operation names come back with "did you mean" candidates.
///
/// Grammar: `program := (line? NEWLINE)*`
///
/// # Parameters
/// - `source`: The script text.
/// - `max_suggestion_distance`: Edit-distance bound for suggestions.
///
/// # Returns
/// The parsed [`Program`]. A failed parse never yields a partial tree.
///
/// # Example
/// ```
/// use visionscript::interpreter::parser::core::parse_program;
///
/// let program = parse_program("Load[\"a.png\"]\nDetect[]\n", 2).unwrap();
/// assert_eq!(program.statements.len(), 2);
/// ```
pub fn parse_program(source: &str, max_suggestion_distance: usize) -> ParseResult<Program> {
    parse_source(source).map_err(|e| refine(at_end_of(source, e), source, max_suggestion_distance))
}

fn parse_source(source: &str) -> ParseResult<Program> {
    let tokens = tokenize(source)?;
    check_nesting(&tokens)?;
    let mut iter = tokens.iter().peekable();

    let mut statements = Vec::new();
    let mut indent = 0;

    loop {
        if let Some(next_indent) = skip_newlines(&mut iter) {
            indent = next_indent;
        }
        if iter.peek().is_none() {
            break;
        }
        statements.extend(parse_line(&mut iter, indent)?);
    }

    Ok(Program { statements })
}

/// Rejects scripts that nest deeper than [`MAX_NESTING`] before the
/// recursive descent starts.
///
/// Block depth is counted from the indentation of non-blank lines, so it is
/// an upper bound on how deeply headers can nest.
fn check_nesting(tokens: &[(Token, Position)]) -> ParseResult<()> {
    let mut brackets = 0_usize;
    let mut indents: Vec<usize> = Vec::new();

    for (index, (token, position)) in tokens.iter().enumerate() {
        match token {
            Token::LBracket => brackets += 1,
            Token::RBracket => brackets = brackets.saturating_sub(1),
            Token::NewLine(_) if matches!(tokens.get(index + 1), None | Some((Token::NewLine(_), _))) => continue,
            Token::NewLine(width) => {
                while indents.last().is_some_and(|top| top >= width) {
                    indents.pop();
                }
                if *width > 0 {
                    indents.push(*width);
                }
            },
            _ => continue,
        }

        if brackets + indents.len() > MAX_NESTING {
            return Err(ParseError::NestingTooDeep { line:   position.line,
                                                    column: position.column, });
        }
    }

    Ok(())
}

/// Gives an end-of-input error the position just past the last character of
/// the source.
fn at_end_of(source: &str, error: ParseError) -> ParseError {
    match error {
        ParseError::UnexpectedEndOfInput { .. } => {
            let line = source.lines().count().max(1);
            let column = source.lines().last().map_or(0, |last| last.chars().count()) + 1;
            ParseError::UnexpectedEndOfInput { line, column }
        },
        other => other,
    }
}

/// Parses a full expression.
///
/// Grammar: `expression := equality`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, Position)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    parse_equality(tokens)
}

/// Consumes consecutive line breaks.
///
/// # Returns
/// The indentation of the line that follows the last break consumed, or
/// `None` if the next token was not a line break.
pub(in crate::interpreter::parser) fn skip_newlines<'a, I>(tokens: &mut Peekable<I>)
                                                           -> Option<usize>
    where I: Iterator<Item = &'a (Token, Position)>
{
    let mut indent = None;
    while let Some((Token::NewLine(width), _)) = tokens.peek() {
        indent = Some(*width);
        tokens.next();
    }
    indent
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ast::LiteralValue;

    #[test]
    fn blank_lines_and_comments() {
        let program = parse_program("\n# setup\n\nLoad[\"a.png\"] # first\n\n", 2).unwrap();

        assert_eq!(program.statements,
                   vec![Node::Comment { text: "setup".to_string(),
                                        line: 2, },
                        Node::Call { name:      "Load".to_string(),
                                     arguments: vec![Node::Literal { value:
                                                                         LiteralValue::from("a.png"),
                                                                     line:  4, }],
                                     line:      4, },
                        Node::Comment { text: "first".to_string(),
                                        line: 4, }]);
    }

    #[test]
    fn deep_nesting_is_a_syntax_error() {
        let lists = format!("x = {}{}", "[".repeat(200_000), "]".repeat(200_000));
        assert!(matches!(parse_program(&lists, 2), Err(ParseError::NestingTooDeep { line: 1, .. })));

        let blocks = (0..=MAX_NESTING).map(|depth| format!("{}If[True]\n\n", " ".repeat(depth)))
                                      .collect::<String>();
        assert!(matches!(parse_program(&blocks, 2), Err(ParseError::NestingTooDeep { .. })));

        let shallow = format!("x = {}{}", "[".repeat(20), "]".repeat(20));
        assert!(parse_program(&shallow, 2).is_ok());
    }

    #[test]
    fn end_of_input_points_past_the_source() {
        assert_eq!(parse_program("Say[\"hi\"", 2),
                   Err(ParseError::UnexpectedEndOfInput { line: 1, column: 9 }));
    }

    #[test]
    fn parsing_is_deterministic() {
        let source = "Make[F]\n  Say[\"x\"]\nIf[Contains[\"x\"]]\nRun[F]\n";
        assert_eq!(parse_program(source, 2), parse_program(source, 2));
    }
}
