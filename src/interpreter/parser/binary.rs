use std::iter::Peekable;

use crate::{
    ast::Node,
    interpreter::{
        lexer::{Position, Token},
        parser::{core::ParseResult, unary::parse_primary},
    },
};

/// Parses an equality comparison.
///
/// Equality does not chain: `a == b == c` leaves the second `==` in the
/// stream, where the line parser rejects it.
///
/// Grammar: `equality := primary (("==" | "!=") primary)?`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the left operand.
///
/// # Returns
/// A [`Node::Equality`], or the left operand if no operator follows.
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let left = parse_primary(tokens)?;

    let (negated, line) = match tokens.peek() {
        Some((Token::EqualEqual, position)) => (false, position.line),
        Some((Token::BangEqual, position)) => (true, position.line),
        _ => return Ok(left),
    };
    tokens.next();

    let right = parse_primary(tokens)?;

    Ok(Node::Equality { left: Box::new(left),
                        right: Box::new(right),
                        negated,
                        line })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ParseError, interpreter::parser::core::parse_program};

    #[test]
    fn not_equal_is_negated() {
        let program = parse_program("If[Count[] != 0]", 2).unwrap();
        let [Node::If { condition, .. }] = program.statements.as_slice() else {
            panic!("expected a single If");
        };

        assert!(matches!(condition.as_ref(), Node::Equality { negated: true, .. }));
    }

    #[test]
    fn equality_does_not_chain() {
        assert!(matches!(parse_program("x = 1 == 1 == 1", 2),
                         Err(ParseError::UnexpectedToken { .. })));
    }
}
