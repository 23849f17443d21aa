//! # Textsweep Model
//!
//! Host document model for the textsweep replacement engine: views,
//! typed elements with parameters, and the transaction primitive that
//! commits or discards a batch of edits.

mod document;
mod element;
mod error;
mod transaction;

pub use document::{Document, View};
pub use element::{Element, ElementId, ElementKind, Parameter, ParameterValue, StorageType};
pub use error::{ModelError, ModelResult};
pub use transaction::Transaction;
