//! Session script parser using chumsky
//!
//! A script is one statement per line. `#` starts a comment and blank lines
//! are skipped.
//!
//! ```text
//! $user = actor 10 20
//! $login = usecase 50 50 "Log in"
//! connect $user $login
//! connect $user (200, 80)
//! move $user 15 25
//! tool connect
//! select $login
//! remove $user
//! ```

use chumsky::prelude::*;
use chumsky::text::{ident, keyword};
use diagram_store::core::{Position, StoreError};

type Extra<'src> = extra::Err<Rich<'src, char>>;

/// An element named either by a script variable or by its raw id
#[derive(Debug, Clone, PartialEq)]
pub enum Reference {
    Variable(String),
    Id(String),
}

/// One end of a connection as written in a script
#[derive(Debug, Clone, PartialEq)]
pub enum EndpointSpec {
    Reference(Reference),
    Point(Position),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddActor(Position),
    AddUseCase {
        position: Position,
        title: Option<String>,
    },
    Connect {
        start: EndpointSpec,
        end: EndpointSpec,
    },
    Move {
        target: Reference,
        position: Position,
    },
    Remove(Reference),
    Tool(String),
    Select(Option<Reference>),
}

impl Command {
    /// Returns true if the command creates an element (and may be bound)
    pub fn creates_element(&self) -> bool {
        matches!(
            self,
            Command::AddActor(_) | Command::AddUseCase { .. } | Command::Connect { .. }
        )
    }
}

/// A parsed script line
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// 1-based source line
    pub line: usize,
    /// Variable the created element's id is bound to
    pub binding: Option<String>,
    pub command: Command,
}

/// Parse a whole script into statements
pub fn parse_script(source: &str) -> Result<Vec<Statement>, StoreError> {
    let mut statements = Vec::new();

    for (index, text) in source.lines().enumerate() {
        let line = index + 1;
        let parsed = line_parser()
            .parse(text)
            .into_result()
            .map_err(|errors| {
                let message = errors
                    .iter()
                    .map(|error| error.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                StoreError::script_error(line, message)
            })?;

        let Some((binding, command)) = parsed else {
            continue;
        };

        if binding.is_some() && !command.creates_element() {
            return Err(StoreError::script_error(
                line,
                "only actor, usecase and connect results can be bound to a variable",
            ));
        }

        statements.push(Statement {
            line,
            binding,
            command,
        });
    }

    Ok(statements)
}

fn line_parser<'src>(
) -> impl Parser<'src, &'src str, Option<(Option<String>, Command)>, Extra<'src>> {
    let comment = just('#').then(any().repeated()).ignored();

    inline_ws()
        .ignore_then(binding().or_not().then(command()).or_not())
        .then_ignore(inline_ws())
        .then_ignore(comment.or_not())
        .then_ignore(end())
}

fn inline_ws<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone {
    one_of(" \t").repeated().ignored()
}

fn ws_required<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone {
    one_of(" \t").repeated().at_least(1).ignored()
}

fn number<'src>() -> impl Parser<'src, &'src str, f64, Extra<'src>> + Clone {
    just('-')
        .or_not()
        .then(text::digits(10))
        .then(just('.').then(text::digits(10)).or_not())
        .to_slice()
        // The grammar above only admits valid float literals
        .map(|s: &str| s.parse::<f64>().unwrap_or_default())
}

/// `X Y`
fn coordinates<'src>() -> impl Parser<'src, &'src str, Position, Extra<'src>> + Clone {
    number()
        .then_ignore(ws_required())
        .then(number())
        .map(|(x, y)| Position::new(x, y))
}

/// `(X, Y)`
fn point<'src>() -> impl Parser<'src, &'src str, Position, Extra<'src>> + Clone {
    just('(')
        .ignore_then(inline_ws())
        .ignore_then(number())
        .then_ignore(inline_ws())
        .then_ignore(just(','))
        .then_ignore(inline_ws())
        .then(number())
        .then_ignore(inline_ws())
        .then_ignore(just(')'))
        .map(|(x, y)| Position::new(x, y))
}

fn variable<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    just('$')
        .ignore_then(ident())
        .map(|s: &str| s.to_string())
}

fn bare_word<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    none_of(" \t\r\n\"#$(),=")
        .repeated()
        .at_least(1)
        .to_slice()
        .map(|s: &str| s.to_string())
}

fn reference<'src>() -> impl Parser<'src, &'src str, Reference, Extra<'src>> + Clone {
    variable()
        .map(Reference::Variable)
        .or(bare_word().map(Reference::Id))
}

fn endpoint<'src>() -> impl Parser<'src, &'src str, EndpointSpec, Extra<'src>> + Clone {
    point()
        .map(EndpointSpec::Point)
        .or(reference().map(EndpointSpec::Reference))
}

fn title<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    just('"')
        .ignore_then(none_of("\"\n").repeated().to_slice())
        .then_ignore(just('"'))
        .map(|s: &str| s.to_string())
}

/// `$name =`
fn binding<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    variable()
        .then_ignore(inline_ws())
        .then_ignore(just('='))
        .then_ignore(inline_ws())
}

fn command<'src>() -> impl Parser<'src, &'src str, Command, Extra<'src>> + Clone {
    let actor = keyword("actor")
        .ignore_then(ws_required())
        .ignore_then(coordinates())
        .map(Command::AddActor);

    let use_case = keyword("usecase")
        .ignore_then(ws_required())
        .ignore_then(coordinates())
        .then(ws_required().ignore_then(title()).or_not())
        .map(|(position, title)| Command::AddUseCase { position, title });

    let connect = keyword("connect")
        .ignore_then(ws_required())
        .ignore_then(endpoint())
        .then_ignore(ws_required())
        .then(endpoint())
        .map(|(start, end)| Command::Connect { start, end });

    let move_to = keyword("move")
        .ignore_then(ws_required())
        .ignore_then(reference())
        .then_ignore(ws_required())
        .then(coordinates())
        .map(|(target, position)| Command::Move { target, position });

    let remove = keyword("remove")
        .ignore_then(ws_required())
        .ignore_then(reference())
        .map(Command::Remove);

    let tool = keyword("tool")
        .ignore_then(ws_required())
        .ignore_then(bare_word())
        .map(Command::Tool);

    let select = keyword("select")
        .ignore_then(ws_required())
        .ignore_then(reference())
        .map(|target| match target {
            Reference::Id(id) if id == "none" => Command::Select(None),
            other => Command::Select(Some(other)),
        });

    choice((actor, use_case, connect, move_to, remove, tool, select))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(source: &str) -> Statement {
        let mut statements = parse_script(source).unwrap();
        assert_eq!(statements.len(), 1, "expected one statement in {:?}", source);
        statements.remove(0)
    }

    #[test]
    fn test_parse_actor() {
        let statement = single("actor 10 20");
        assert_eq!(statement.command, Command::AddActor(Position::new(10.0, 20.0)));
        assert_eq!(statement.binding, None);
        assert_eq!(statement.line, 1);
    }

    #[test]
    fn test_parse_negative_and_fractional_coordinates() {
        let statement = single("actor -1.5 0.25");
        assert_eq!(statement.command, Command::AddActor(Position::new(-1.5, 0.25)));
    }

    #[test]
    fn test_parse_use_case_with_and_without_title() {
        assert_eq!(
            single("usecase 50 50").command,
            Command::AddUseCase {
                position: Position::new(50.0, 50.0),
                title: None,
            }
        );
        assert_eq!(
            single("usecase 5 6 \"Log in\"").command,
            Command::AddUseCase {
                position: Position::new(5.0, 6.0),
                title: Some("Log in".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_binding() {
        let statement = single("$user = actor 1 2");
        assert_eq!(statement.binding, Some("user".to_string()));
    }

    #[test]
    fn test_parse_connect_endpoints() {
        let statement = single("connect $user (3, 4)");
        assert_eq!(
            statement.command,
            Command::Connect {
                start: EndpointSpec::Reference(Reference::Variable("user".to_string())),
                end: EndpointSpec::Point(Position::new(3.0, 4.0)),
            }
        );

        let statement = single("connect actor-1 usecase-2");
        assert_eq!(
            statement.command,
            Command::Connect {
                start: EndpointSpec::Reference(Reference::Id("actor-1".to_string())),
                end: EndpointSpec::Reference(Reference::Id("usecase-2".to_string())),
            }
        );
    }

    #[test]
    fn test_parse_move_remove_tool_select() {
        assert_eq!(
            single("move actor-3 7 8").command,
            Command::Move {
                target: Reference::Id("actor-3".to_string()),
                position: Position::new(7.0, 8.0),
            }
        );
        assert_eq!(
            single("remove $login").command,
            Command::Remove(Reference::Variable("login".to_string()))
        );
        assert_eq!(single("tool connect").command, Command::Tool("connect".to_string()));
        assert_eq!(single("select none").command, Command::Select(None));
        assert_eq!(
            single("select usecase-1").command,
            Command::Select(Some(Reference::Id("usecase-1".to_string())))
        );
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let statements =
            parse_script("# a session\n\n  actor 1 1   # first\n\t\nactor 2 2\n").unwrap();
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].line, 3);
        assert_eq!(statements[1].line, 5);
    }

    #[test]
    fn test_error_reports_line() {
        let error = parse_script("actor 1 1\nactor one two\n").unwrap_err();
        match error {
            StoreError::ScriptError { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_binding_requires_creating_command() {
        let error = parse_script("$x = remove actor-1").unwrap_err();
        assert!(error.to_string().contains("bound"));
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(parse_script("note 1 2").is_err());
        assert!(parse_script("actorx 1 2").is_err());
    }
}
