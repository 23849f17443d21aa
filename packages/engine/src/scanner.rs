//! # Element Scanner
//!
//! Runs every accessor over one view and rewrites matching fields in place.
//!
//! Failures are contained per element: an element that cannot be read or
//! written gets an error record and the scan moves on to the next one.

use crate::accessor::{DirectText, LookupParameter, MultiParameter, TextAccessor};
use crate::change_log::ChangeRecord;
use crate::view_filter::ViewFilter;
use textsweep_model::{Document, ElementId, ElementKind, ModelResult};
use tracing::{debug, warn};

/// Result of scanning one view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerScan {
    pub matched: bool,
    pub records: Vec<ChangeRecord>,
}

/// Visits the elements of a view through an ordered list of accessors
pub struct ElementScanner {
    accessors: Vec<Box<dyn TextAccessor>>,
}

impl ElementScanner {
    pub fn new(accessors: Vec<Box<dyn TextAccessor>>) -> Self {
        Self { accessors }
    }

    /// Text notes, then tags through `lookup_parameter`, then family instances
    pub fn standard(lookup_parameter: &str) -> Self {
        Self::new(vec![
            Box::new(DirectText),
            Box::new(LookupParameter::new(ElementKind::Tag, lookup_parameter)),
            Box::new(MultiParameter::default()),
        ])
    }

    pub fn push(&mut self, accessor: Box<dyn TextAccessor>) {
        self.accessors.push(accessor);
    }

    /// Replace every occurrence of `find` in the fields of one view
    pub fn scan(
        &self,
        doc: &mut Document,
        view_id: ElementId,
        filter: &dyn ViewFilter,
        find: &str,
        replace: &str,
    ) -> ContainerScan {
        let mut scan = ContainerScan::default();

        let view = doc.view(view_id);
        let name = view.map(|v| v.name.clone()).unwrap_or_default();
        if !filter.is_eligible(view) {
            warn!(view = %name, "View is not valid, skipping");
            scan.records.push(ChangeRecord::invalid_view(&name));
            return scan;
        }

        debug!(view = %name, "Scanning view");

        for accessor in &self.accessors {
            let ids = match doc.collect(view_id, accessor.kind()) {
                Ok(ids) => ids,
                Err(err) => {
                    warn!(view = %name, kind = %accessor.kind(), error = %err, "Element collection failed");
                    scan.records.push(ChangeRecord::view_failed(&name, &err));
                    continue;
                }
            };

            for id in ids {
                if let Err(err) = self.scan_element(doc, accessor.as_ref(), id, &name, find, replace, &mut scan) {
                    warn!(view = %name, element = %id, error = %err, "Element replacement failed");
                    scan.records
                        .push(ChangeRecord::element_failed(&name, accessor.kind(), id, &err));
                }
            }
        }

        scan
    }

    #[allow(clippy::too_many_arguments)]
    fn scan_element(
        &self,
        doc: &mut Document,
        accessor: &dyn TextAccessor,
        id: ElementId,
        view_name: &str,
        find: &str,
        replace: &str,
        scan: &mut ContainerScan,
    ) -> ModelResult<()> {
        let element = doc.element_mut(id)?;

        for field in accessor.fields(element)? {
            if !field.value.contains(find) {
                continue;
            }

            let updated = field.value.replace(find, replace);
            accessor.write(element, &field, updated)?;

            let location = accessor.describe(element, &field);
            debug!(view = %view_name, element = %id, field = %field.name, "Replaced text");
            scan.records
                .push(ChangeRecord::replaced(view_name, id, find, replace, &location));
            scan.matched = true;
        }

        Ok(())
    }
}

impl Default for ElementScanner {
    fn default() -> Self {
        Self::standard(crate::options::DEFAULT_LOOKUP_PARAMETER)
    }
}
