use crate::ElementId;
use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Element {0} not found")]
    ElementNotFound(ElementId),

    #[error("View {0} not found")]
    ViewNotFound(ElementId),

    #[error("Element {0} is not valid")]
    InvalidElement(ElementId),

    #[error("Element {id} is not editable: borrowed by {owner}")]
    ElementNotEditable { id: ElementId, owner: String },

    #[error("Element {0} has no text")]
    MissingText(ElementId),

    #[error("Parameter '{0}' is read-only")]
    ReadOnlyParameter(String),

    #[error("Parameter '{0}' does not store a string")]
    NotAString(String),

    #[error("Value for parameter '{name}' exceeds {max_length} characters")]
    ValueTooLong { name: String, max_length: usize },

    #[error("Duplicate value '{value}' for parameter '{parameter}' on elements {first} and {second}")]
    DuplicateValue {
        parameter: String,
        value: String,
        first: ElementId,
        second: ElementId,
    },

    #[error("Document is read-only")]
    ReadOnly,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModelError {
    pub fn value_too_long(name: impl Into<String>, max_length: usize) -> Self {
        Self::ValueTooLong {
            name: name.into(),
            max_length,
        }
    }

    pub fn not_editable(id: ElementId, owner: impl Into<String>) -> Self {
        Self::ElementNotEditable {
            id,
            owner: owner.into(),
        }
    }
}
