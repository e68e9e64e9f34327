//! Element id generation
//!
//! Ids have the shape `<kind-prefix>-<n>`. How `n` is chosen is up to the
//! [`IdGenerator`] a store is built with.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::trace;

use crate::core::error::StoreError;
use crate::core::types::ElementKind;

/// Source of fresh element ids
pub trait IdGenerator: Send + fmt::Debug {
    /// Produce the next id for an element of the given kind
    fn next_id(&mut self, kind: ElementKind) -> String;
}

/// Millisecond timestamp ids, e.g. `actor-1718000000000`
///
/// When two elements of the same kind are created within one millisecond
/// the number is bumped past the last one issued, so ids never repeat
/// within a generator.
#[derive(Debug, Default)]
pub struct TimestampIds {
    last_issued: HashMap<ElementKind, u64>,
}

impl TimestampIds {
    pub fn new() -> Self {
        Self::default()
    }

    fn now_millis() -> u64 {
        // A clock before the epoch degrades to 0; the bump below still keeps ids unique.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0)
    }
}

impl IdGenerator for TimestampIds {
    fn next_id(&mut self, kind: ElementKind) -> String {
        let now = Self::now_millis();
        let stamp = match self.last_issued.get(&kind) {
            Some(&last) if now <= last => {
                trace!(kind = %kind, last, now, "Clock has not advanced, bumping id");
                last + 1
            }
            _ => now,
        };
        self.last_issued.insert(kind, stamp);
        format!("{}-{}", kind.prefix(), stamp)
    }
}

/// Per-kind counters starting at 1, e.g. `actor-1`, `actor-2`, `usecase-1`
#[derive(Debug, Default)]
pub struct SequentialIds {
    counters: HashMap<ElementKind, u64>,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, kind: ElementKind) -> String {
        let counter = self.counters.entry(kind).or_insert(0);
        *counter += 1;
        format!("{}-{}", kind.prefix(), counter)
    }
}

/// Which id generator a store should use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum IdStrategy {
    /// Millisecond timestamps, unique per store
    #[default]
    Timestamp,
    /// Deterministic per-kind counters
    Sequential,
}

impl IdStrategy {
    /// Build a fresh generator for this strategy
    pub fn generator(&self) -> Box<dyn IdGenerator> {
        match self {
            IdStrategy::Timestamp => Box::new(TimestampIds::new()),
            IdStrategy::Sequential => Box::new(SequentialIds::new()),
        }
    }

    /// Get all valid strategy names
    pub fn variants() -> &'static [&'static str] {
        &["timestamp", "sequential"]
    }
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdStrategy::Timestamp => write!(f, "timestamp"),
            IdStrategy::Sequential => write!(f, "sequential"),
        }
    }
}

impl FromStr for IdStrategy {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "timestamp" => Ok(IdStrategy::Timestamp),
            "sequential" => Ok(IdStrategy::Sequential),
            _ => Err(StoreError::UnknownIdStrategy {
                strategy: s.to_string(),
            }),
        }
    }
}
