//! Diagram elements
//!
//! Actors, use cases and connections, plus a borrowed [`Element`] view that
//! lets the store look up and iterate over all three uniformly.

use std::fmt;

use crate::core::types::{ElementKind, ElementRef, Endpoint, Position};

/// Default title given to use cases created without one
pub const DEFAULT_USE_CASE_TITLE: &str = "Use Case";

/// An actor placed on the canvas
///
/// Its type tag is [`Actor::kind`], which always returns [`ElementKind::Actor`].
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub id: String,
    pub position: Position,
}

impl Actor {
    pub fn new(id: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }

    pub fn kind(&self) -> ElementKind {
        ElementKind::Actor
    }
}

/// A use case placed on the canvas
///
/// Its type tag is [`UseCase::kind`] (`"useCase"` via [`ElementKind::type_tag`]).
#[derive(Debug, Clone, PartialEq)]
pub struct UseCase {
    pub id: String,
    pub position: Position,
    pub title: String,
}

impl UseCase {
    pub fn new(id: impl Into<String>, position: Position, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position,
            title: title.into(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        ElementKind::UseCase
    }
}

/// A connection between two endpoints
///
/// Its type tag is [`Connection::kind`].
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub id: String,
    pub start: Endpoint,
    pub end: Endpoint,
}

impl Connection {
    pub fn new(id: impl Into<String>, start: Endpoint, end: Endpoint) -> Self {
        Self {
            id: id.into(),
            start,
            end,
        }
    }

    pub fn kind(&self) -> ElementKind {
        ElementKind::Connection
    }

    /// Returns true if either end is attached to the given element id
    pub fn touches(&self, id: &str) -> bool {
        self.start.refers_to(id) || self.end.refers_to(id)
    }
}

/// Borrowed view over any stored element
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Element<'a> {
    Actor(&'a Actor),
    UseCase(&'a UseCase),
    Connection(&'a Connection),
}

impl<'a> Element<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            Element::Actor(actor) => &actor.id,
            Element::UseCase(use_case) => &use_case.id,
            Element::Connection(connection) => &connection.id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Actor(_) => ElementKind::Actor,
            Element::UseCase(_) => ElementKind::UseCase,
            Element::Connection(_) => ElementKind::Connection,
        }
    }

    /// Position of the element; connections have none
    pub fn position(&self) -> Option<Position> {
        match self {
            Element::Actor(actor) => Some(actor.position),
            Element::UseCase(use_case) => Some(use_case.position),
            Element::Connection(_) => None,
        }
    }

    /// A selection reference pointing at this element
    pub fn to_ref(&self) -> ElementRef {
        ElementRef::new(self.kind(), self.id())
    }
}

impl fmt::Display for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Actor(actor) => write!(f, "{} {}", actor.id, actor.position),
            Element::UseCase(use_case) => write!(
                f,
                "{} {} \"{}\"",
                use_case.id, use_case.position, use_case.title
            ),
            Element::Connection(connection) => write!(
                f,
                "{} {} -> {}",
                connection.id, connection.start, connection.end
            ),
        }
    }
}
