//! # Textsweep Engine
//!
//! Transactional find-and-replace over the text of a host document.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ ReplacementEngine                           │
//! │  - reject empty input                       │
//! │  - open transaction, walk views             │
//! │  - commit / roll back                       │
//! └─────────────────────────────────────────────┘
//!          ↓ per view (ViewFilter)
//! ┌─────────────────────────────────────────────┐
//! │ ElementScanner                              │
//! │  - text notes → tags → family instances     │
//! │  - per-element failure isolation            │
//! └─────────────────────────────────────────────┘
//!          ↓ per element kind
//! ┌─────────────────────────────────────────────┐
//! │ TextAccessor                                │
//! │  DirectText | LookupParameter | Multi...    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Every match is written as soon as it is found; the host transaction is
//! what makes the batch all-or-nothing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use textsweep_engine::{replace_text, Disposition};
//!
//! let outcome = replace_text(&mut doc, "Door", "Opening", false)?;
//! if outcome.disposition == Disposition::Committed {
//!     doc.save("project.json")?;
//! }
//! println!("{}", outcome.report());
//! ```

mod accessor;
mod change_log;
mod engine;
mod errors;
mod options;
mod scanner;
mod view_filter;

pub use accessor::{DirectText, FieldSlot, LookupParameter, MultiParameter, TextAccessor, TextField};
pub use change_log::{ChangeLog, ChangeRecord, RecordKind};
pub use engine::{replace_text, Disposition, ReplacementEngine, ReplacementOutcome, Report, NO_MATCHES_MESSAGE};
pub use errors::InputError;
pub use options::{ReplaceOptions, ViewScope, DEFAULT_LOOKUP_PARAMETER, DEFAULT_TRANSACTION_NAME};
pub use scanner::{ContainerScan, ElementScanner};
pub use view_filter::{NonTemplateViews, ValidViews, ViewFilter};

// Re-export the document model for convenience
pub use textsweep_model as model;
