use std::iter::Peekable;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        lexer::{Position, Token},
        parser::{
            block::parse_header_tail,
            core::{ParseResult, parse_expression},
            utils::{end_of_input, expect, parse_identifier, skip_empty_brackets, unexpected},
        },
    },
    vocabulary::{self, Keyword, Word},
};

/// Parses one source line: a statement, an optional trailing comment, then
/// the end of the line.
///
/// The line break itself is left in the stream for the caller.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first token of the line.
/// - `indent`: Indentation of the line; bodies of headers on this line must be
///   indented further.
///
/// # Returns
/// The statement, followed by a [`Node::Comment`] if the line had one.
///
/// # Errors
/// `UnexpectedToken` if anything other than a comment or a line break follows
/// the statement.
pub fn parse_line<'a, I>(tokens: &mut Peekable<I>, indent: usize) -> ParseResult<Vec<Node>>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut nodes = vec![parse_statement(tokens, indent)?];

    if let Some((Token::Comment(text), position)) = tokens.peek() {
        tokens.next();
        nodes.push(Node::Comment { text: text.clone(),
                                   line: position.line, });
    }

    match tokens.peek() {
        None | Some((Token::NewLine(_), _)) => Ok(nodes),
        Some((tok, position)) => Err(unexpected(tok, *position)),
    }
}

/// Parses a single statement.
///
/// A statement may be one of:
/// - a comment,
/// - a variable declaration (`name = expression`),
/// - a `Make`, `Run`, `If` or `In` form,
/// - an expression used as a statement.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the statement.
/// - `indent`: Indentation of the enclosing line.
///
/// # Returns
/// A parsed [`Node`].
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>, indent: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    match tokens.peek() {
        Some((Token::Comment(text), position)) => {
            tokens.next();
            Ok(Node::Comment { text: text.clone(),
                               line: position.line, })
        },
        Some((Token::Identifier(name), _)) => {
            let mut lookahead = tokens.clone();
            lookahead.next();
            if let Some((Token::Equals, _)) = lookahead.peek() {
                return parse_variable_declaration(tokens);
            }

            match vocabulary::lookup(name) {
                Some(Word::Keyword(Keyword::Make)) => parse_make(tokens, indent),
                Some(Word::Keyword(Keyword::Run)) => parse_run(tokens),
                Some(Word::Keyword(Keyword::If)) => parse_if(tokens, indent),
                Some(Word::Keyword(Keyword::In)) => parse_in(tokens, indent),
                _ => parse_expression(tokens),
            }
        },
        Some(_) => parse_expression(tokens),
        None => Err(end_of_input()),
    }
}

/// Parses a variable declaration of the form `name = expression`.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the name is reserved by the vocabulary,
/// - the expression is malformed.
fn parse_variable_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let (name, position) = parse_identifier(tokens)?;
    reject_reserved(&name, position)?;
    expect(tokens, &Token::Equals)?;

    let value = parse_expression(tokens)?;

    Ok(Node::VarDecl { name,
                       value: Box::new(value),
                       line: position.line })
}

/// Parses a function definition.
///
/// Syntax:
/// ```text
///     Make[Name]
///         statement
///         ...
///     Make[Name[]: statement, statement]
/// ```
/// The body may be written inline after a colon, as indented lines, or both.
/// Nothing is evaluated here; the body is stored when the statement runs.
fn parse_make<'a, I>(tokens: &mut Peekable<I>, indent: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let (_, position) = parse_identifier(tokens)?;
    expect(tokens, &Token::LBracket)?;

    let (name, name_position) = parse_identifier(tokens)?;
    reject_reserved(&name, name_position)?;
    skip_empty_brackets(tokens)?;

    let body = parse_header_tail(tokens, indent)?;

    Ok(Node::MakeFunction { name,
                            body,
                            line: position.line })
}

/// Parses `Run[Name]` or `Run[Name[]]`.
fn parse_run<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let (_, position) = parse_identifier(tokens)?;
    expect(tokens, &Token::LBracket)?;

    let (name, _) = parse_identifier(tokens)?;
    skip_empty_brackets(tokens)?;
    expect(tokens, &Token::RBracket)?;

    Ok(Node::RunFunction { name,
                           line: position.line })
}

/// Parses a conditional.
///
/// Syntax:
/// ```text
///     If[condition]
///         statement
///     If[condition: statement, statement]
/// ```
fn parse_if<'a, I>(tokens: &mut Peekable<I>, indent: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let (_, position) = parse_identifier(tokens)?;
    expect(tokens, &Token::LBracket)?;

    let condition = parse_expression(tokens)?;
    let body = parse_header_tail(tokens, indent)?;

    Ok(Node::If { condition: Box::new(condition),
                  body,
                  line: position.line })
}

/// Parses a directory loop.
///
/// Syntax:
/// ```text
///     In["folder", file]
///         statement
///     In["folder": statement]
/// ```
/// The loop variable is optional; when present it is bound to the path of
/// the active file on every iteration.
fn parse_in<'a, I>(tokens: &mut Peekable<I>, indent: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let (_, position) = parse_identifier(tokens)?;
    expect(tokens, &Token::LBracket)?;

    let path = parse_expression(tokens)?;

    let binding = if let Some((Token::Comma, _)) = tokens.peek() {
        tokens.next();
        let (name, name_position) = parse_identifier(tokens)?;
        reject_reserved(&name, name_position)?;
        Some(name)
    } else {
        None
    };

    let body = parse_header_tail(tokens, indent)?;

    Ok(Node::ForInDirectory { path: Box::new(path),
                              binding,
                              body,
                              line: position.line })
}

/// Fails if `name` is a builtin, alias or keyword.
fn reject_reserved(name: &str, position: Position) -> ParseResult<()> {
    if vocabulary::is_reserved(name) {
        return Err(ParseError::IdentifierReserved { name:   name.to_string(),
                                                    line:   position.line,
                                                    column: position.column, });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{ast::LiteralValue, interpreter::parser::core::parse_program};

    fn parse(source: &str) -> Vec<Node> {
        parse_program(source, 2).unwrap().statements
    }

    fn say(text: &str, line: usize) -> Node {
        Node::Call { name: "Say".to_string(),
                     arguments: vec![Node::Literal { value: LiteralValue::from(text),
                                                     line }],
                     line }
    }

    #[test]
    fn inline_make() {
        assert_eq!(parse("Make[Greet[]: Say[\"hi\"]]\nRun[Greet]"),
                   vec![Node::MakeFunction { name: "Greet".to_string(),
                                             body: vec![say("hi", 1)],
                                             line: 1, },
                        Node::RunFunction { name: "Greet".to_string(),
                                            line: 2, }]);
    }

    #[test]
    fn indented_make_ends_at_dedent() {
        let statements = parse("Make[Greet]\n    Say[\"a\"]\n\n    Say[\"b\"]\nSay[\"c\"]\n");

        assert_eq!(statements,
                   vec![Node::MakeFunction { name: "Greet".to_string(),
                                             body: vec![say("a", 2), say("b", 4)],
                                             line: 1, },
                        say("c", 5)]);
    }

    #[test]
    fn nested_blocks() {
        let statements = parse("In[\"imgs\", f]\n  Load[f]\n  If[True]\n    Say[\"x\"]\n  Detect[]\n");
        let Node::ForInDirectory { binding, body, .. } = &statements[0] else {
            panic!("expected a directory loop");
        };

        assert_eq!(binding.as_deref(), Some("f"));
        assert_eq!(body.len(), 3);
        assert!(matches!(&body[1], Node::If { body, .. } if body.len() == 1));
        assert_eq!(statements.len(), 1);
    }

    #[test]
    fn declarations_reject_reserved_names() {
        assert!(matches!(parse_program("Say = 1", 2),
                         Err(ParseError::IdentifierReserved { .. })));
        assert!(matches!(parse_program("In[\"a\", Load]", 2),
                         Err(ParseError::IdentifierReserved { .. })));
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        assert_eq!(parse_program("Say[\"a\"] ]", 2),
                   Err(ParseError::UnexpectedToken { token:  "]".to_string(),
                                                     line:   1,
                                                     column: 10, }));
    }
}
