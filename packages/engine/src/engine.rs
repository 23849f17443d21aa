//! # Replacement Engine
//!
//! Drives one find-and-replace run over a whole document.
//!
//! ```text
//! Idle → Scanning ─┬─ preview ──────────────→ Previewing        (rollback)
//!                  ├─ matches ──────────────→ Committing        (commit)
//!                  ├─ no matches ───────────→ RollingBackEmpty  (rollback)
//!                  └─ transaction failure ──→ RollingBackError  (rollback)
//! ```
//!
//! The transaction commits only when preview is off, at least one field
//! matched, and the host accepted the commit. Every other path leaves the
//! document exactly as it was before the run.

use crate::accessor::TextAccessor;
use crate::change_log::{ChangeLog, ChangeRecord};
use crate::errors::InputError;
use crate::options::ReplaceOptions;
use crate::scanner::ElementScanner;
use crate::view_filter::ViewFilter;
use serde::Serialize;
use std::fmt;
use textsweep_model::{Document, ModelError, Transaction};
use tracing::{debug, info, instrument, warn};

pub const NO_MATCHES_MESSAGE: &str = "No matches found for the given text.";

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Disposition {
    /// Changes persisted
    Committed,
    /// Full scan, changes discarded
    Previewed,
    /// Nothing matched, nothing to keep
    NoMatches,
    /// Transaction-level failure, changes discarded
    Failed,
}

/// Everything a caller needs to present the result of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplacementOutcome {
    pub disposition: Disposition,
    pub committed: bool,
    pub any_match_found: bool,
    pub log: ChangeLog,
    pub top_level_error: Option<String>,
}

impl ReplacementOutcome {
    fn finished(disposition: Disposition, any_match_found: bool, log: ChangeLog) -> Self {
        Self {
            disposition,
            committed: disposition == Disposition::Committed,
            any_match_found,
            log,
            top_level_error: None,
        }
    }

    fn failed(any_match_found: bool, log: ChangeLog, error: &ModelError) -> Self {
        Self {
            disposition: Disposition::Failed,
            committed: false,
            any_match_found,
            log,
            top_level_error: Some(error.to_string()),
        }
    }

    pub fn committed(&self) -> bool {
        self.committed
    }

    /// Title and body for display
    pub fn report(&self) -> Report {
        match self.disposition {
            Disposition::Previewed => Report {
                title: "Preview of Changes",
                body: if self.log.is_empty() {
                    NO_MATCHES_MESSAGE.to_string()
                } else {
                    self.log.join()
                },
            },
            Disposition::Committed => Report {
                title: "Changes Made",
                body: self.log.join(),
            },
            Disposition::NoMatches => Report {
                title: "Replace Text",
                body: NO_MATCHES_MESSAGE.to_string(),
            },
            Disposition::Failed => Report {
                title: "Error",
                body: format!("Error: {}", self.top_level_error.as_deref().unwrap_or_default()),
            },
        }
    }
}

/// Summary shown to the user after a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub title: &'static str,
    pub body: String,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.title, self.body)
    }
}

/// Scoped, transactional find-and-replace over every eligible view
pub struct ReplacementEngine {
    options: ReplaceOptions,
    filter: Box<dyn ViewFilter>,
    scanner: ElementScanner,
}

impl ReplacementEngine {
    pub fn new(options: ReplaceOptions) -> Self {
        let filter = options.view_scope.filter();
        let scanner = ElementScanner::standard(&options.lookup_parameter);
        Self {
            options,
            filter,
            scanner,
        }
    }

    /// Scan an extra element kind after the built-in ones
    pub fn with_accessor(mut self, accessor: Box<dyn TextAccessor>) -> Self {
        self.scanner.push(accessor);
        self
    }

    pub fn with_filter(mut self, filter: Box<dyn ViewFilter>) -> Self {
        self.filter = filter;
        self
    }

    pub fn options(&self) -> &ReplaceOptions {
        &self.options
    }

    /// Replace `find` with `replace` everywhere in `doc`.
    ///
    /// Empty input is rejected before a transaction is opened. Transaction
    /// failures are reported through [`ReplacementOutcome::top_level_error`].
    #[instrument(skip(self, doc), fields(document = %doc.title))]
    pub fn run(
        &self,
        doc: &mut Document,
        find: &str,
        replace: &str,
        preview: bool,
    ) -> Result<ReplacementOutcome, InputError> {
        InputError::check(find, replace)?;
        info!("Starting text replacement");

        let mut tx = match Transaction::start(doc, self.options.transaction_name.as_str()) {
            Ok(tx) => tx,
            Err(err) => {
                warn!(error = %err, "Could not open transaction");
                return Ok(ReplacementOutcome::failed(false, ChangeLog::new(), &err));
            }
        };

        let mut log = ChangeLog::new();
        let mut any_match_found = false;

        let view_ids = tx.document().view_ids();
        for view_id in view_ids {
            let doc = tx.document_mut();
            let Some(view) = doc.view(view_id).filter(|v| self.filter.is_eligible(Some(*v))) else {
                debug!(view = %view_id, "Skipping ineligible view");
                continue;
            };
            let name = view.name.clone();

            let scan = self
                .scanner
                .scan(doc, view_id, self.filter.as_ref(), find, replace);
            log.extend(scan.records);

            if scan.matched {
                any_match_found = true;
                log.push(ChangeRecord::found(&name, find));
            }
        }

        let outcome = if preview {
            tx.rollback();
            ReplacementOutcome::finished(Disposition::Previewed, any_match_found, log)
        } else if any_match_found {
            match tx.commit() {
                Ok(()) => ReplacementOutcome::finished(Disposition::Committed, true, log),
                Err(err) => {
                    warn!(error = %err, "Commit failed, changes rolled back");
                    ReplacementOutcome::failed(true, log, &err)
                }
            }
        } else {
            tx.rollback();
            ReplacementOutcome::finished(Disposition::NoMatches, false, log)
        };

        info!(
            disposition = ?outcome.disposition,
            records = outcome.log.len(),
            replacements = outcome.log.replacements().count(),
            "Text replacement complete"
        );
        Ok(outcome)
    }
}

impl Default for ReplacementEngine {
    fn default() -> Self {
        Self::new(ReplaceOptions::default())
    }
}

/// Run the engine with default options
pub fn replace_text(
    doc: &mut Document,
    find: &str,
    replace: &str,
    preview: bool,
) -> Result<ReplacementOutcome, InputError> {
    ReplacementEngine::default().run(doc, find, replace, preview)
}

#[cfg(test)]
mod tests {
    use super::*;
    use textsweep_model::{Element, ElementId, View};

    fn single_note(text: &str) -> Document {
        let mut doc = Document::new("Engine");
        let plan = doc.add_view(View::new(100, "Plan1"));
        let note = doc.add_element(Element::text_note(1, text));
        doc.place(plan, note).unwrap();
        doc
    }

    #[test]
    fn test_report_titles() {
        let mut doc = single_note("Door");
        let preview = replace_text(&mut doc, "Door", "Opening", true).unwrap();
        assert_eq!(preview.report().title, "Preview of Changes");

        let none = replace_text(&mut doc, "Window", "Opening", false).unwrap();
        assert_eq!(none.report().title, "Replace Text");
        assert_eq!(none.report().body, NO_MATCHES_MESSAGE);

        let done = replace_text(&mut doc, "Door", "Opening", false).unwrap();
        assert_eq!(done.report().title, "Changes Made");
        assert_eq!(
            done.report().body,
            "Replaced 'Door' with 'Opening' in TextNote ID 1\nFound 'Door' in view 'Plan1'"
        );
    }

    #[test]
    fn test_read_only_document_fails_without_changes() {
        let mut doc = single_note("Door");
        doc.set_read_only(true);
        let before = doc.clone();

        let outcome = replace_text(&mut doc, "Door", "Opening", false).unwrap();
        assert_eq!(outcome.disposition, Disposition::Failed);
        assert!(!outcome.committed());
        assert_eq!(outcome.top_level_error.as_deref(), Some("Document is read-only"));
        assert_eq!(outcome.report().body, "Error: Document is read-only");
        assert_eq!(doc, before);
    }

    #[test]
    fn test_empty_preview_reports_no_matches() {
        let mut doc = single_note("Door");
        let outcome = replace_text(&mut doc, "Window", "Opening", true).unwrap();
        assert_eq!(outcome.disposition, Disposition::Previewed);
        assert_eq!(outcome.report().body, NO_MATCHES_MESSAGE);
    }

    #[test]
    fn test_engine_uses_configured_lookup_parameter() {
        let mut doc = Document::new("Marks");
        let plan = doc.add_view(View::new(100, "Plan1"));
        let tag = doc.add_element(
            Element::tag(2)
                .with_parameter(textsweep_model::Parameter::string("Comments", "Door"))
                .with_parameter(textsweep_model::Parameter::string("Mark", "Door")),
        );
        doc.place(plan, tag).unwrap();

        let engine = ReplacementEngine::new(ReplaceOptions {
            lookup_parameter: "Mark".to_string(),
            ..ReplaceOptions::default()
        });
        assert_eq!(engine.options().lookup_parameter, "Mark");
        let outcome = engine.run(&mut doc, "Door", "Opening", false).unwrap();
        assert!(outcome.committed());

        let tag = doc.element(ElementId(2)).unwrap();
        assert_eq!(tag.lookup_parameter("Comments").unwrap().as_string(), Some("Door"));
        assert_eq!(tag.lookup_parameter("Mark").unwrap().as_string(), Some("Opening"));
    }
}
