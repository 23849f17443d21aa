//! Which views the engine scans.

use textsweep_model::View;

/// Decides whether a view is scanned
pub trait ViewFilter: Send + Sync {
    fn is_eligible(&self, view: Option<&View>) -> bool;
}

/// Every view that still exists and is valid, whatever its type
#[derive(Debug, Default, Clone, Copy)]
pub struct ValidViews;

impl ViewFilter for ValidViews {
    fn is_eligible(&self, view: Option<&View>) -> bool {
        view.map(View::is_valid).unwrap_or(false)
    }
}

/// Valid views that are not templates
#[derive(Debug, Default, Clone, Copy)]
pub struct NonTemplateViews;

impl ViewFilter for NonTemplateViews {
    fn is_eligible(&self, view: Option<&View>) -> bool {
        ValidViews.is_eligible(view) && view.map(|v| !v.is_template()).unwrap_or(false)
    }
}
