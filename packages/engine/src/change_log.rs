//! # Change Log
//!
//! Append-only record of what a run found, replaced, or failed on.
//! Records keep discovery order: view order, then accessor order within a
//! view, then element order within an accessor.

use serde::Serialize;
use std::fmt;
use textsweep_model::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordKind {
    Match,
    Replace,
    Error,
}

/// One log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    pub kind: RecordKind,
    pub container_name: String,
    pub element_id: Option<ElementId>,
    pub detail: String,
}

impl ChangeRecord {
    pub fn replaced(container: &str, element_id: ElementId, find: &str, replace: &str, location: &str) -> Self {
        Self {
            kind: RecordKind::Replace,
            container_name: container.to_string(),
            element_id: Some(element_id),
            detail: format!("Replaced '{}' with '{}' in {}", find, replace, location),
        }
    }

    pub fn found(container: &str, find: &str) -> Self {
        Self {
            kind: RecordKind::Match,
            container_name: container.to_string(),
            element_id: None,
            detail: format!("Found '{}' in view '{}'", find, container),
        }
    }

    pub fn invalid_view(container: &str) -> Self {
        Self {
            kind: RecordKind::Error,
            container_name: container.to_string(),
            element_id: None,
            detail: format!("View '{}' is not valid or does not exist.", container),
        }
    }

    pub fn view_failed(container: &str, cause: impl fmt::Display) -> Self {
        Self {
            kind: RecordKind::Error,
            container_name: container.to_string(),
            element_id: None,
            detail: format!("Error replacing text in view '{}': {}", container, cause),
        }
    }

    pub fn element_failed(container: &str, element: impl fmt::Display, element_id: ElementId, cause: impl fmt::Display) -> Self {
        Self {
            kind: RecordKind::Error,
            container_name: container.to_string(),
            element_id: Some(element_id),
            detail: format!(
                "Error replacing text in {} ID {} in view '{}': {}",
                element, element_id, container, cause
            ),
        }
    }
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.detail)
    }
}

/// Ordered, unbounded sequence of records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChangeLog {
    records: Vec<ChangeRecord>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ChangeRecord) {
        self.records.push(record);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn replacements(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.of_kind(RecordKind::Replace)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.of_kind(RecordKind::Error)
    }

    fn of_kind(&self, kind: RecordKind) -> impl Iterator<Item = &ChangeRecord> {
        self.records.iter().filter(move |r| r.kind == kind)
    }

    /// Newline-joined report text
    pub fn join(&self) -> String {
        self.records
            .iter()
            .map(|r| r.detail.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Extend<ChangeRecord> for ChangeLog {
    fn extend<I: IntoIterator<Item = ChangeRecord>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_details() {
        let replaced = ChangeRecord::replaced("Plan1", ElementId(5), "Door", "Opening", "TextNote ID 5");
        assert_eq!(replaced.to_string(), "Replaced 'Door' with 'Opening' in TextNote ID 5");
        assert_eq!(replaced.element_id, Some(ElementId(5)));

        let found = ChangeRecord::found("Plan1", "Door");
        assert_eq!(found.to_string(), "Found 'Door' in view 'Plan1'");
        assert_eq!(found.kind, RecordKind::Match);

        let invalid = ChangeRecord::invalid_view("Gone");
        assert_eq!(invalid.to_string(), "View 'Gone' is not valid or does not exist.");

        let failed = ChangeRecord::element_failed("Plan1", "Tag", ElementId(8), "Element 8 is not valid");
        assert_eq!(
            failed.to_string(),
            "Error replacing text in Tag ID 8 in view 'Plan1': Element 8 is not valid"
        );
    }

    #[test]
    fn test_join_preserves_insertion_order() {
        let mut log = ChangeLog::new();
        log.push(ChangeRecord::replaced("A", ElementId(1), "x", "y", "TextNote ID 1"));
        log.push(ChangeRecord::invalid_view("B"));
        log.push(ChangeRecord::found("A", "x"));

        assert_eq!(log.len(), 3);
        assert_eq!(
            log.join(),
            "Replaced 'x' with 'y' in TextNote ID 1\nView 'B' is not valid or does not exist.\nFound 'x' in view 'A'"
        );
        assert_eq!(log.replacements().count(), 1);
        assert_eq!(log.errors().count(), 1);
    }

    #[test]
    fn test_log_serializes_as_list() {
        let mut log = ChangeLog::new();
        log.push(ChangeRecord::found("Plan1", "Door"));
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json[0]["kind"], "Match");
        assert_eq!(json[0]["containerName"], "Plan1");
        assert!(json[0]["elementId"].is_null());
    }
}
