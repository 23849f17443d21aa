//! Error types for the engine

use thiserror::Error;

/// Input rejected before any transaction is opened
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Find text must not be empty")]
    EmptyFindText,

    #[error("Replace text must not be empty")]
    EmptyReplaceText,
}

impl InputError {
    /// Check both strings, find text first
    pub fn check(find: &str, replace: &str) -> Result<(), InputError> {
        if find.is_empty() {
            return Err(InputError::EmptyFindText);
        }
        if replace.is_empty() {
            return Err(InputError::EmptyReplaceText);
        }
        Ok(())
    }
}
