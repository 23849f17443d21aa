//! # Host Document
//!
//! In-memory element graph that the replacement engine works against.
//!
//! A document owns a flat table of elements and an ordered list of views.
//! Views do not own elements: each view lists the ids visible in it, so the
//! same element can show up in several views.
//!
//! ```text
//! Document
//!   ├── views:    [View { id, name, elements: [ids...] }, ...]   (host order)
//!   └── elements: { id → Element { kind, text, parameters } }
//! ```
//!
//! Documents round-trip through a camelCase JSON format so the CLI can load
//! and save them.

use crate::{Element, ElementId, ElementKind, ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Named scope grouping the elements visible in it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    pub id: ElementId,
    pub name: String,
    #[serde(default = "default_true")]
    pub valid: bool,
    #[serde(default)]
    pub template: bool,
    #[serde(default)]
    pub elements: Vec<ElementId>,
}

fn default_true() -> bool {
    true
}

impl View {
    pub fn new(id: impl Into<ElementId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            valid: true,
            template: false,
            elements: Vec::new(),
        }
    }

    pub fn template(mut self) -> Self {
        self.template = true;
        self
    }

    pub fn invalidated(mut self) -> Self {
        self.valid = false;
        self
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_template(&self) -> bool {
        self.template
    }
}

/// Editable host document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    read_only: bool,

    #[serde(default)]
    views: Vec<View>,

    #[serde(default, with = "element_list")]
    pub(crate) elements: BTreeMap<ElementId, Element>,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            read_only: false,
            views: Vec::new(),
            elements: BTreeMap::new(),
        }
    }

    /// Parse a document from its JSON form
    pub fn from_json(source: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn to_json(&self) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load document from a JSON file
    pub fn load(path: impl AsRef<Path>) -> ModelResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    /// Save document to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> ModelResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn add_view(&mut self, view: View) -> ElementId {
        let id = view.id;
        self.views.retain(|v| v.id != id);
        self.views.push(view);
        id
    }

    /// Insert an element, replacing any element with the same id
    pub fn add_element(&mut self, element: Element) -> ElementId {
        let id = element.id;
        self.elements.insert(id, element);
        id
    }

    /// Make an element visible in a view
    pub fn place(&mut self, view_id: ElementId, element_id: ElementId) -> ModelResult<()> {
        let view = self
            .views
            .iter_mut()
            .find(|v| v.id == view_id)
            .ok_or(ModelError::ViewNotFound(view_id))?;

        if !view.elements.contains(&element_id) {
            view.elements.push(element_id);
        }
        Ok(())
    }

    /// Mark a view as deleted; it stays enumerable but is no longer valid
    pub fn invalidate_view(&mut self, view_id: ElementId) -> ModelResult<()> {
        let view = self
            .views
            .iter_mut()
            .find(|v| v.id == view_id)
            .ok_or(ModelError::ViewNotFound(view_id))?;
        view.valid = false;
        Ok(())
    }

    /// View ids in host enumeration order
    pub fn view_ids(&self) -> Vec<ElementId> {
        self.views.iter().map(|v| v.id).collect()
    }

    pub fn views(&self) -> impl Iterator<Item = &View> {
        self.views.iter()
    }

    pub fn view(&self, id: ElementId) -> Option<&View> {
        self.views.iter().find(|v| v.id == id)
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn element(&self, id: ElementId) -> ModelResult<&Element> {
        self.elements.get(&id).ok_or(ModelError::ElementNotFound(id))
    }

    pub fn element_mut(&mut self, id: ElementId) -> ModelResult<&mut Element> {
        self.elements
            .get_mut(&id)
            .ok_or(ModelError::ElementNotFound(id))
    }

    /// Ids of the elements of `kind` visible in a view, in the view's order.
    ///
    /// Ids that no longer resolve to an element are skipped.
    pub fn collect(&self, view_id: ElementId, kind: ElementKind) -> ModelResult<Vec<ElementId>> {
        let view = self.view(view_id).ok_or(ModelError::ViewNotFound(view_id))?;

        Ok(view
            .elements
            .iter()
            .filter(|id| {
                self.elements
                    .get(id)
                    .map(|e| e.kind == kind)
                    .unwrap_or(false)
            })
            .copied()
            .collect())
    }

    /// Check document-wide constraints (run by the transaction before committing)
    pub fn validate(&self) -> ModelResult<()> {
        let mut seen: HashMap<(&str, &str), ElementId> = HashMap::new();

        for element in self.elements.values().filter(|e| e.is_valid()) {
            for parameter in element.parameters.iter().filter(|p| p.unique) {
                let Some(value) = parameter.as_string().filter(|v| !v.is_empty()) else {
                    continue;
                };

                if let Some(first) = seen.insert((parameter.name.as_str(), value), element.id) {
                    if first != element.id {
                        return Err(ModelError::DuplicateValue {
                            parameter: parameter.name.clone(),
                            value: value.to_string(),
                            first,
                            second: element.id,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("")
    }
}

mod element_list {
    use crate::{Element, ElementId};
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S>(elements: &BTreeMap<ElementId, Element>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(elements.values())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<ElementId, Element>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let list = Vec::<Element>::deserialize(deserializer)?;
        Ok(list.into_iter().map(|e| (e.id, e)).collect())
    }
}
