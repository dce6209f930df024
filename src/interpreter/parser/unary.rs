use std::iter::Peekable;

use crate::{
    ast::{LiteralValue, Node},
    error::ParseError,
    interpreter::{
        lexer::{Position, Token},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{end_of_input, expect, parse_comma_separated, parse_identifier, unexpected},
        },
    },
    vocabulary::{self, Keyword, Word},
};

/// Parses a primary expression.
///
/// Primary expressions are the atoms of the language:
/// - literals (`42`, `0.5`, `True`, `"text"`),
/// - list literals (`["a", "b"]`),
/// - identifiers, calls and the `Not`, `Contains` and `Input` forms.
///
/// Grammar:
/// ```text
///     primary := literal | list | identifier_or_call
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary expression.
///
/// # Returns
/// The parsed primary [`Node`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let (token, position) = tokens.peek().ok_or_else(end_of_input)?;

    match token {
        Token::Real(..) | Token::Integer(..) | Token::Bool(..) | Token::Str(..) => {
            parse_literal(tokens)
        },
        Token::LBracket => parse_list_literal(tokens),
        Token::Identifier(_) => parse_identifier_or_call(tokens),
        tok => Err(unexpected(tok, *position)),
    }
}

/// Parses a literal token into a [`Node::Literal`].
fn parse_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let (token, position) = tokens.next().ok_or_else(end_of_input)?;

    let value = match token {
        Token::Real(r) => LiteralValue::Real(*r),
        Token::Integer(i) => LiteralValue::Integer(*i),
        Token::Bool(b) => LiteralValue::Bool(*b),
        Token::Str(s) => LiteralValue::Str(s.clone()),
        tok => return Err(unexpected(tok, *position)),
    };

    Ok(Node::Literal { value,
                       line: position.line })
}

/// Parses a list literal of the form `[expr1, expr2, ..., exprN]`.
///
/// An empty list `[]` is accepted.
///
/// Grammar: `list := "[" (expression ("," expression)*)? "]"`
fn parse_list_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let position = expect(tokens, &Token::LBracket)?;
    let elements = parse_comma_separated(tokens, parse_expression, &Token::RBracket)?;

    Ok(Node::ListLit { elements,
                       line: position.line })
}

/// Parses an identifier, possibly followed by a bracketed argument list.
///
/// Supported forms:
/// - `Not[expr]` and `Contains[expr]`,
/// - `Input["key"]`,
/// - `Builtin[args]` for any builtin or alias, giving a [`Node::Call`],
/// - `Name[]` for any other name, giving a [`Node::LiteralFunctionRef`],
/// - a bare `name`, giving a [`Node::Variable`].
///
/// # Errors
/// - `UnknownFunction` for `Name[args]` where `Name` is not in the
///   vocabulary. Suggestions are filled in by the top-level parser.
/// - `UnexpectedToken` for a statement keyword used as a value, or a
///   vocabulary word used without brackets.
fn parse_identifier_or_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let (name, position) = parse_identifier(tokens)?;
    let line = position.line;
    let word = vocabulary::lookup(&name);

    if !matches!(tokens.peek(), Some((Token::LBracket, _))) {
        if word.is_some() {
            return Err(ParseError::UnexpectedToken { token:  name,
                                                     line,
                                                     column: position.column, });
        }
        return Ok(Node::Variable { name, line });
    }
    tokens.next();

    match word {
        Some(Word::Keyword(Keyword::Not)) => {
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::RBracket)?;
            Ok(Node::Negate { expr: Box::new(expr),
                              line })
        },
        Some(Word::Keyword(Keyword::Contains)) => {
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::RBracket)?;
            Ok(Node::Contains { expr: Box::new(expr),
                                line })
        },
        Some(Word::Keyword(Keyword::Input)) => {
            let key = match tokens.next() {
                Some((Token::Str(key), _)) => key.clone(),
                Some((tok, position)) => return Err(unexpected(tok, *position)),
                None => return Err(end_of_input()),
            };
            expect(tokens, &Token::RBracket)?;
            Ok(Node::Input { key, line })
        },
        Some(Word::Keyword(_)) => Err(ParseError::UnexpectedToken { token: name,
                                                                    line,
                                                                    column: position.column }),
        Some(Word::Builtin(_)) => {
            let arguments = parse_comma_separated(tokens, parse_expression, &Token::RBracket)?;
            Ok(Node::Call { name,
                            arguments,
                            line })
        },
        None => {
            let arguments = parse_comma_separated(tokens, parse_expression, &Token::RBracket)?;
            if !arguments.is_empty() {
                return Err(ParseError::UnknownFunction { name,
                                                         line,
                                                         column: position.column,
                                                         suggestions: Vec::new() });
            }
            Ok(Node::LiteralFunctionRef { name, line })
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interpreter::parser::core::parse_program;

    fn parse_one(source: &str) -> Node {
        let mut statements = parse_program(source, 2).unwrap().statements;
        assert_eq!(statements.len(), 1);
        statements.remove(0)
    }

    #[test]
    fn aliases_keep_their_surface_name() {
        assert_eq!(parse_one("Find[\"cat\"]"),
                   Node::Call { name:      "Find".to_string(),
                                arguments: vec![Node::Literal { value: LiteralValue::from("cat"),
                                                                line:  1, }],
                                line:      1, });
    }

    #[test]
    fn unknown_name_without_arguments_is_a_function_reference() {
        assert_eq!(parse_one("Greet[]"),
                   Node::LiteralFunctionRef { name: "Greet".to_string(),
                                              line: 1, });
    }

    #[test]
    fn misspelled_call_suggests_the_builtin() {
        let error = parse_program("Sayy[\"hi\"]", 2).unwrap_err();

        assert_eq!(error,
                   ParseError::UnknownFunction { name:        "Sayy".to_string(),
                                                 line:        1,
                                                 column:      1,
                                                 suggestions: vec!["Save".to_string(),
                                                                   "Say".to_string()], });
    }

    #[test]
    fn list_and_keyword_forms() {
        assert_eq!(parse_one("Detect[[\"a\", \"b\"]]"),
                   Node::Call { name:      "Detect".to_string(),
                                arguments: vec![Node::ListLit { elements: vec![Node::Literal { value: LiteralValue::from("a"),
                                                                                               line:  1, },
                                                                               Node::Literal { value: LiteralValue::from("b"),
                                                                                               line:  1, }],
                                                                line:     1, }],
                                line:      1, });
        assert!(matches!(parse_one("x = Not[True]"), Node::VarDecl { value, .. } if matches!(*value, Node::Negate { .. })));
        assert_eq!(parse_one("Input[\"image\"]"),
                   Node::Input { key:  "image".to_string(),
                                 line: 1, });
    }

    #[test]
    fn statement_keywords_are_not_values() {
        assert!(matches!(parse_program("x = Run[F]", 2),
                         Err(ParseError::UnexpectedToken { .. })));
        assert!(matches!(parse_program("Say", 2), Err(ParseError::UnexpectedToken { .. })));
    }
}
