//! # Text Accessors
//!
//! Each element kind exposes its text through a different path:
//!
//! - **DirectText**: the element's own text body (text notes)
//! - **LookupParameter**: one parameter found by name (tags, `Comments`)
//! - **MultiParameter**: every writable string parameter (family instances)
//!
//! The scanner only talks to the [`TextAccessor`] trait. Supporting another
//! element kind means adding an accessor, not touching the scanner.

use textsweep_model::{Element, ElementKind, ModelError, ModelResult, StorageType};

/// Where a field's text lives on its element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSlot {
    /// The element's text body
    Text,
    /// Parameter at this index in the element's parameter list
    Parameter(usize),
}

/// Candidate text field read from an element
#[derive(Debug, Clone, PartialEq)]
pub struct TextField {
    pub slot: FieldSlot,
    pub name: String,
    pub value: String,
}

impl TextField {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            slot: FieldSlot::Text,
            name: "Text".to_string(),
            value: value.into(),
        }
    }

    pub fn parameter(index: usize, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            slot: FieldSlot::Parameter(index),
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Read and write access to the text of one element kind
pub trait TextAccessor: Send + Sync {
    /// Element kind this accessor handles
    fn kind(&self) -> ElementKind;

    /// Fields of `element` eligible for replacement.
    ///
    /// Returns an error only when the element itself is unusable; a missing
    /// or ineligible field yields an empty list.
    fn fields(&self, element: &Element) -> ModelResult<Vec<TextField>>;

    /// Human-readable location of `field` for the change log
    fn describe(&self, element: &Element, field: &TextField) -> String;

    /// Store `value` into `field`
    fn write(&self, element: &mut Element, field: &TextField, value: String) -> ModelResult<()> {
        match field.slot {
            FieldSlot::Text => element.set_text(value),
            FieldSlot::Parameter(index) => element.set_parameter(index, value),
        }
    }
}

fn ensure_valid(element: &Element) -> ModelResult<()> {
    if element.is_valid() {
        Ok(())
    } else {
        Err(ModelError::InvalidElement(element.id))
    }
}

/// Text notes: the whole text body is one field
#[derive(Debug, Default, Clone)]
pub struct DirectText;

impl TextAccessor for DirectText {
    fn kind(&self) -> ElementKind {
        ElementKind::TextNote
    }

    fn fields(&self, element: &Element) -> ModelResult<Vec<TextField>> {
        ensure_valid(element)?;

        // A note without a body has nothing to match
        Ok(element
            .text()
            .filter(|text| !text.is_empty())
            .map(|text| vec![TextField::text(text)])
            .unwrap_or_default())
    }

    fn describe(&self, element: &Element, _field: &TextField) -> String {
        format!("{} ID {}", element.kind, element.id)
    }
}

/// Tags: a single parameter found by name
#[derive(Debug, Clone)]
pub struct LookupParameter {
    kind: ElementKind,
    parameter: String,
}

impl LookupParameter {
    pub fn new(kind: ElementKind, parameter: impl Into<String>) -> Self {
        Self {
            kind,
            parameter: parameter.into(),
        }
    }

    /// `Comments` on tags
    pub fn comments() -> Self {
        Self::new(ElementKind::Tag, "Comments")
    }

}

impl TextAccessor for LookupParameter {
    fn kind(&self) -> ElementKind {
        self.kind
    }

    fn fields(&self, element: &Element) -> ModelResult<Vec<TextField>> {
        ensure_valid(element)?;

        let Some(index) = element.lookup_parameter_index(&self.parameter) else {
            return Ok(Vec::new());
        };
        let parameter = &element.parameters[index];

        if parameter.read_only || !parameter.has_value() {
            return Ok(Vec::new());
        }

        Ok(parameter
            .as_string()
            .filter(|text| !text.is_empty())
            .map(|text| vec![TextField::parameter(index, &parameter.name, text)])
            .unwrap_or_default())
    }

    fn describe(&self, element: &Element, _field: &TextField) -> String {
        format!("{} ID {}", element.kind, element.id)
    }
}

/// Family instances: every writable string parameter with a value
#[derive(Debug, Clone)]
pub struct MultiParameter {
    kind: ElementKind,
}

impl MultiParameter {
    pub fn new(kind: ElementKind) -> Self {
        Self { kind }
    }
}

impl Default for MultiParameter {
    fn default() -> Self {
        Self::new(ElementKind::FamilyInstance)
    }
}

impl TextAccessor for MultiParameter {
    fn kind(&self) -> ElementKind {
        self.kind
    }

    fn fields(&self, element: &Element) -> ModelResult<Vec<TextField>> {
        ensure_valid(element)?;

        Ok(element
            .parameters
            .iter()
            .enumerate()
            .filter(|(_, p)| p.storage_type() == StorageType::String && !p.read_only && p.has_value())
            .filter_map(|(index, p)| {
                p.as_string()
                    .filter(|text| !text.is_empty())
                    .map(|text| TextField::parameter(index, &p.name, text))
            })
            .collect())
    }

    fn describe(&self, element: &Element, field: &TextField) -> String {
        format!("Parameter '{}' of {} ID {}", field.name, element.kind, element.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textsweep_model::{Parameter, ParameterValue};

    #[test]
    fn test_direct_text_yields_whole_body() {
        let note = Element::text_note(1, "Door-01 Door-02");
        let fields = DirectText.fields(&note).unwrap();
        assert_eq!(fields, vec![TextField::text("Door-01 Door-02")]);
        assert_eq!(DirectText.describe(&note, &fields[0]), "TextNote ID 1");
    }

    #[test]
    fn test_direct_text_without_body_yields_nothing() {
        let bare = Element::new(1, ElementKind::TextNote);
        assert!(DirectText.fields(&bare).unwrap().is_empty());

        let empty = Element::text_note(2, "");
        assert!(DirectText.fields(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_direct_text_write_replaces_body() {
        let mut note = Element::text_note(1, "Door");
        let field = DirectText.fields(&note).unwrap().remove(0);
        DirectText.write(&mut note, &field, "Opening".to_string()).unwrap();
        assert_eq!(note.text(), Some("Opening"));
    }

    #[test]
    fn test_invalid_element_is_an_error() {
        let note = Element::text_note(1, "Door").invalidated();
        assert!(matches!(DirectText.fields(&note), Err(ModelError::InvalidElement(_))));

        let tag = Element::tag(2).invalidated();
        assert!(matches!(
            LookupParameter::comments().fields(&tag),
            Err(ModelError::InvalidElement(_))
        ));
    }

    #[test]
    fn test_lookup_missing_parameter_yields_nothing() {
        let tag = Element::tag(2).with_parameter(Parameter::string("Mark", "Door"));
        assert!(LookupParameter::comments().fields(&tag).unwrap().is_empty());
    }

    #[test]
    fn test_lookup_skips_read_only_empty_and_valueless() {
        let accessor = LookupParameter::comments();

        let read_only = Element::tag(1).with_parameter(Parameter::string("Comments", "Door").read_only());
        let empty = Element::tag(2).with_parameter(Parameter::string("Comments", ""));
        let valueless = Element::tag(3).with_parameter(Parameter::new("Comments", ParameterValue::String(None)));

        assert!(accessor.fields(&read_only).unwrap().is_empty());
        assert!(accessor.fields(&empty).unwrap().is_empty());
        assert!(accessor.fields(&valueless).unwrap().is_empty());
    }

    #[test]
    fn test_lookup_yields_named_parameter_only() {
        let tag = Element::tag(2)
            .with_parameter(Parameter::string("Mark", "Door"))
            .with_parameter(Parameter::string("Comments", "Door swing"));

        let fields = LookupParameter::comments().fields(&tag).unwrap();
        assert_eq!(fields, vec![TextField::parameter(1, "Comments", "Door swing")]);
    }

    #[test]
    fn test_multi_parameter_yields_every_writable_string() {
        let instance = Element::family_instance(9)
            .with_parameter(Parameter::string("Mark", "D1"))
            .with_parameter(Parameter::string("Type Comments", "Door").read_only())
            .with_parameter(Parameter::new("Count", ParameterValue::Integer(Some(2))))
            .with_parameter(Parameter::new("Label", ParameterValue::String(None)))
            .with_parameter(Parameter::string("Comments", "Door leaf"));

        let fields = MultiParameter::default().fields(&instance).unwrap();
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Mark", "Comments"]);
        assert_eq!(fields[1].slot, FieldSlot::Parameter(4));
        assert_eq!(
            MultiParameter::default().describe(&instance, &fields[1]),
            "Parameter 'Comments' of FamilyInstance ID 9"
        );
    }
}
