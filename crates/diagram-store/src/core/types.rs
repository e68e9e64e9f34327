//! Core value types for the diagram model
//!
//! Positions, element kinds, connection endpoints and selection references.
//! Everything here is a plain value; ownership of elements lives in the store.

use std::fmt;
use std::str::FromStr;

use crate::core::error::StoreError;

/// A 2D coordinate on the diagram canvas
///
/// Positions are replaced wholesale when an element moves.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Create a new position
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl FromStr for Position {
    type Err = StoreError;

    /// Parse `x,y` or `(x, y)`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(trimmed);

        let (x, y) = inner
            .split_once(',')
            .ok_or_else(|| StoreError::invalid_position(s))?;
        let x = x
            .trim()
            .parse::<f64>()
            .map_err(|_| StoreError::invalid_position(s))?;
        let y = y
            .trim()
            .parse::<f64>()
            .map_err(|_| StoreError::invalid_position(s))?;

        Ok(Self { x, y })
    }
}

/// The three kinds of element a diagram holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A stick-figure actor
    Actor,
    /// A titled use-case ellipse
    UseCase,
    /// A line between two endpoints
    Connection,
}

impl ElementKind {
    /// All kinds, in the order the store scans its collections
    pub const ALL: [ElementKind; 3] = [
        ElementKind::Actor,
        ElementKind::UseCase,
        ElementKind::Connection,
    ];

    /// Prefix used when generating ids for this kind
    pub fn prefix(&self) -> &'static str {
        match self {
            ElementKind::Actor => "actor",
            ElementKind::UseCase => "usecase",
            ElementKind::Connection => "connection",
        }
    }

    /// Type tag carried by elements of this kind
    pub fn type_tag(&self) -> &'static str {
        match self {
            ElementKind::Actor => "actor",
            ElementKind::UseCase => "useCase",
            ElementKind::Connection => "connection",
        }
    }

    /// Returns true if elements of this kind have a position
    pub fn is_positioned(&self) -> bool {
        !matches!(self, ElementKind::Connection)
    }

    /// Infer the kind from an id of the form `<prefix>-<n>`
    ///
    /// Ids are caller-visible strings, so this is a hint only: the store
    /// never relies on it for removal or updates.
    pub fn from_id(id: &str) -> Option<Self> {
        let (prefix, _) = id.split_once('-')?;
        Self::ALL.into_iter().find(|kind| kind.prefix() == prefix)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_tag())
    }
}

impl FromStr for ElementKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "actor" => Ok(ElementKind::Actor),
            "usecase" | "use-case" | "use_case" => Ok(ElementKind::UseCase),
            "connection" => Ok(ElementKind::Connection),
            _ => Err(StoreError::UnknownElementKind {
                kind: s.to_string(),
            }),
        }
    }
}

/// One end of a connection
///
/// The store does not check that an `Element` endpoint refers to anything.
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    /// Attached to the element with this id
    Element(String),
    /// Loose end at a canvas coordinate
    Point(Position),
}

impl Endpoint {
    /// Create an endpoint attached to an element id
    pub fn element(id: impl Into<String>) -> Self {
        Endpoint::Element(id.into())
    }

    /// The element id this endpoint is attached to, if any
    pub fn element_id(&self) -> Option<&str> {
        match self {
            Endpoint::Element(id) => Some(id),
            Endpoint::Point(_) => None,
        }
    }

    /// Returns true if this endpoint is attached to the given id
    pub fn refers_to(&self, id: &str) -> bool {
        self.element_id() == Some(id)
    }
}

impl From<Position> for Endpoint {
    fn from(position: Position) -> Self {
        Endpoint::Point(position)
    }
}

impl From<&str> for Endpoint {
    fn from(id: &str) -> Self {
        Endpoint::Element(id.to_string())
    }
}

impl From<String> for Endpoint {
    fn from(id: String) -> Self {
        Endpoint::Element(id)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Element(id) => f.write_str(id),
            Endpoint::Point(position) => write!(f, "{}", position),
        }
    }
}

/// Reference to a selected element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementRef {
    pub kind: ElementKind,
    pub id: String,
}

impl ElementRef {
    pub fn new(kind: ElementKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}
