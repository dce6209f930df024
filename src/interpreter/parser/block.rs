use std::iter::Peekable;

use crate::{
    ast::Node,
    interpreter::{
        lexer::{Position, Token},
        parser::{
            core::{ParseResult, skip_newlines},
            statement::{parse_line, parse_statement},
            utils::{end_of_input, expect, unexpected},
        },
    },
};

/// Indentation given to statements inside an inline body. No line can be
/// indented deeper, so headers inside inline bodies never take a block.
const INLINE: usize = usize::MAX;

/// Parses what follows the arguments of a `Make`, `If` or `In` header.
///
/// Grammar: `tail := (":" inline)? "]" block?`
///
/// # Parameters
/// - `tokens`: Token stream positioned after the header arguments.
/// - `indent`: Indentation of the header line.
///
/// # Returns
/// The inline statements followed by the indented ones.
pub fn parse_header_tail<'a, I>(tokens: &mut Peekable<I>, indent: usize) -> ParseResult<Vec<Node>>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut body = if let Some((Token::Colon, _)) = tokens.peek() {
        tokens.next();
        parse_inline_body(tokens)?
    } else {
        expect(tokens, &Token::RBracket)?;
        Vec::new()
    };

    body.extend(parse_indented_block(tokens, indent)?);
    Ok(body)
}

/// Parses statements written between a colon and the closing bracket.
///
/// Statements are separated by commas or line breaks. Parsing stops after
/// the closing `]`.
///
/// Grammar: `inline := statement (("," | NEWLINE) statement)* "]"`
fn parse_inline_body<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Node>>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut body = Vec::new();

    loop {
        skip_newlines(tokens);
        if let Some((Token::RBracket, _)) = tokens.peek() {
            tokens.next();
            break;
        }

        body.push(parse_statement(tokens, INLINE)?);

        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            Some((Token::NewLine(_) | Token::RBracket, _)) => {},
            Some((Token::Comment(text), position)) => {
                body.push(Node::Comment { text: text.clone(),
                                          line: position.line, });
                tokens.next();
            },
            Some((tok, position)) => return Err(unexpected(tok, *position)),
            None => return Err(end_of_input()),
        }
    }

    Ok(body)
}

/// Parses the lines below a header that are indented deeper than it.
///
/// The block ends at the first non-blank line whose indentation is not
/// greater than `indent`, or at the end of input. The line break before that
/// line is left in the stream.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the header.
/// - `indent`: Indentation of the header line.
pub fn parse_indented_block<'a, I>(tokens: &mut Peekable<I>,
                                   indent: usize)
                                   -> ParseResult<Vec<Node>>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut body = Vec::new();

    loop {
        let mut lookahead = tokens.clone();
        let Some(line_indent) = skip_newlines(&mut lookahead) else {
            break;
        };
        if line_indent <= indent || lookahead.peek().is_none() {
            break;
        }

        *tokens = lookahead;
        body.extend(parse_line(tokens, line_indent)?);
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ParseError, interpreter::parser::core::parse_program};

    #[test]
    fn inline_and_indented_bodies_combine() {
        let program = parse_program("If[True: Say[\"a\"], Say[\"b\"]]\n  Say[\"c\"]\n", 2).unwrap();
        let [Node::If { body, .. }] = program.statements.as_slice() else {
            panic!("expected a single If");
        };

        assert_eq!(body.len(), 3);
    }

    #[test]
    fn inline_body_may_span_lines() {
        let program = parse_program("Make[F:\n  Say[\"a\"]\n  Say[\"b\"]\n]\nRun[F]", 2).unwrap();

        assert!(matches!(&program.statements[0], Node::MakeFunction { body, .. } if body.len() == 2));
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn unclosed_inline_body_is_an_error() {
        assert!(matches!(parse_program("Make[F: Say[\"a\"]", 2),
                         Err(ParseError::UnexpectedEndOfInput { .. })));
    }
}
