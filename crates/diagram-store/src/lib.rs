//! diagram-store - in-memory element store for use-case diagram editors
//!
//! Holds the actors, use cases and connections of one editing session,
//! together with the active tool and the selected element.
//!
//! # Quick Start
//!
//! ```rust
//! use diagram_store::prelude::*;
//!
//! let mut store = DiagramStore::new();
//!
//! let actor = store.add_actor(Position::new(10.0, 20.0));
//! let use_case = store.add_use_case(Position::new(50.0, 50.0), None);
//! store.add_connection(actor.id.as_str(), use_case.id.as_str());
//!
//! assert_eq!(use_case.title, "Use Case");
//! assert_eq!(store.element_count(), 3);
//!
//! // Connections are not cascaded when an endpoint goes away
//! store.remove_element(&actor.id);
//! assert_eq!(store.actors().len(), 0);
//! assert_eq!(store.connections().len(), 1);
//! ```
//!
//! # Watching for changes
//!
//! The store never calls back into its host. A renderer remembers the
//! [`Revisions`](store::Revisions) it last drew and redraws the parts whose
//! counters moved:
//!
//! ```rust
//! use diagram_store::prelude::*;
//!
//! let mut store = DiagramStore::new();
//! let seen = store.revisions();
//!
//! store.add_actor(Position::new(0.0, 0.0));
//!
//! let now = store.revisions();
//! assert_ne!(now.actors, seen.actors);
//! assert_eq!(now.use_cases, seen.use_cases);
//! ```

pub mod core;
pub mod store;

pub use crate::core::*;
pub use crate::store::{DiagramStore, Revisions};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Actor, Connection, Element, ElementKind, ElementRef, Endpoint, IdGenerator, IdStrategy,
        Position, StoreConfig, UseCase,
    };
    pub use crate::store::{DiagramStore, Revisions};
}
