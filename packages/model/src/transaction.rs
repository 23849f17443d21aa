//! # Transactions
//!
//! Scoped, all-or-nothing edit batches over a [`Document`].
//!
//! ## Design
//!
//! - Starting a transaction snapshots the element table
//! - Writes go straight into the document while the transaction is open
//! - `commit` validates document constraints, then drops the snapshot
//! - `rollback` (or a failed commit) restores the snapshot
//! - Dropping an open transaction rolls it back
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut tx = Transaction::start(&mut doc, "Replace Text")?;
//! tx.document_mut().element_mut(id)?.set_text("Opening".into())?;
//! tx.commit()?;
//! ```

use crate::{Document, Element, ElementId, ModelError, ModelResult};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Open edit batch; commit and rollback are the only ways to finish it
pub struct Transaction<'doc> {
    name: String,
    doc: &'doc mut Document,
    snapshot: Option<BTreeMap<ElementId, Element>>,
}

impl<'doc> Transaction<'doc> {
    /// Open a transaction on a writable document
    pub fn start(doc: &'doc mut Document, name: impl Into<String>) -> ModelResult<Self> {
        let name = name.into();
        if doc.is_read_only() {
            return Err(ModelError::ReadOnly);
        }

        debug!(transaction = %name, "Transaction started");
        let snapshot = Some(doc.elements.clone());
        Ok(Self { name, doc, snapshot })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn document(&self) -> &Document {
        &*self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut *self.doc
    }

    /// Make all changes durable.
    ///
    /// On a constraint failure the document is restored before the error is
    /// returned, so the transaction never leaves partial state behind.
    pub fn commit(mut self) -> ModelResult<()> {
        if let Err(err) = self.doc.validate() {
            warn!(transaction = %self.name, error = %err, "Commit rejected, rolling back");
            self.restore();
            return Err(err);
        }

        self.snapshot = None;
        debug!(transaction = %self.name, "Transaction committed");
        Ok(())
    }

    /// Discard all changes made since `start`
    pub fn rollback(mut self) {
        self.restore();
        debug!(transaction = %self.name, "Transaction rolled back");
    }

    fn restore(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.doc.elements = snapshot;
        }
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if self.snapshot.is_some() {
            warn!(transaction = %self.name, "Transaction dropped while open, rolling back");
            self.restore();
        }
    }
}
