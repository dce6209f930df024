use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Position, Token},
        parser::core::ParseResult,
    },
};

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by list literals and call argument lists. It
/// repeatedly calls `parse_item` to parse one element, expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list.
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut items = Vec::new();
    if let Some((tok, _)) = tokens.peek()
       && tok == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((tok, _)) if tok == closing => break,
            Some((tok, position)) => return Err(unexpected(tok, *position)),
            None => return Err(end_of_input()),
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name and position.
///
/// The next token must be `Token::Identifier`. This function does not check
/// for reserved names; callers must handle that.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the next token is not an identifier,
/// - the input ends unexpectedly.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<(String, Position)>
    where I: Iterator<Item = &'a (Token, Position)>
{
    match tokens.next() {
        Some((Token::Identifier(s), position)) => Ok((s.clone(), *position)),
        Some((tok, position)) => Err(unexpected(tok, *position)),
        None => Err(end_of_input()),
    }
}

/// Consumes the next token, which must equal `expected`.
///
/// # Returns
/// The position of the consumed token.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token)
                                                    -> ParseResult<Position>
    where I: Iterator<Item = &'a (Token, Position)>
{
    match tokens.next() {
        Some((tok, position)) if tok == expected => Ok(*position),
        Some((tok, position)) => Err(unexpected(tok, *position)),
        None => Err(end_of_input()),
    }
}

/// Consumes an optional empty bracket pair, as in `Make[Greet[]]`.
pub(in crate::interpreter::parser) fn skip_empty_brackets<'a, I>(tokens: &mut Peekable<I>)
                                                                 -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, Position)>
{
    if let Some((Token::LBracket, _)) = tokens.peek() {
        tokens.next();
        expect(tokens, &Token::RBracket)?;
    }
    Ok(())
}

/// Builds the error for a token the grammar does not allow here.
pub(in crate::interpreter::parser) fn unexpected(token: &Token, position: Position) -> ParseError {
    ParseError::UnexpectedToken { token:  token.to_string(),
                                  line:   position.line,
                                  column: position.column, }
}

/// Builds the error for input that stops mid-construct.
///
/// The position is filled in by the top-level parser, which knows where the
/// source ends.
pub(in crate::interpreter::parser) const fn end_of_input() -> ParseError {
    ParseError::UnexpectedEndOfInput { line: 0, column: 0 }
}
