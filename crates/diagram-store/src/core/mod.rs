//! Core building blocks of the diagram model
//!
//! Value types, elements, id generation, configuration, errors and logging.
//! The store in [`crate::store`] is assembled from these.

mod config;
mod element;
mod error;
mod ids;
pub mod logging;
mod types;

pub use config::*;
pub use element::*;
pub use error::*;
pub use ids::*;
pub use logging::*;
pub use types::*;
