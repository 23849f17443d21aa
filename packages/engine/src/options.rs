use crate::view_filter::{NonTemplateViews, ValidViews, ViewFilter};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TRANSACTION_NAME: &str = "Replace Text";
pub const DEFAULT_LOOKUP_PARAMETER: &str = "Comments";

/// Engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplaceOptions {
    /// Name of the host transaction wrapping a run
    pub transaction_name: String,

    /// Parameter read from tags
    pub lookup_parameter: String,

    /// Which views are scanned
    pub view_scope: ViewScope,
}

impl Default for ReplaceOptions {
    fn default() -> Self {
        Self {
            transaction_name: DEFAULT_TRANSACTION_NAME.to_string(),
            lookup_parameter: DEFAULT_LOOKUP_PARAMETER.to_string(),
            view_scope: ViewScope::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewScope {
    /// Every valid view, templates and schedules included
    #[default]
    All,
    /// Valid views except templates
    ExcludeTemplates,
}

impl ViewScope {
    pub fn filter(self) -> Box<dyn ViewFilter> {
        match self {
            ViewScope::All => Box::new(ValidViews),
            ViewScope::ExcludeTemplates => Box::new(NonTemplateViews),
        }
    }
}
