use crate::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier shared by elements and views
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub i64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ElementId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<i32> for ElementId {
    fn from(id: i32) -> Self {
        Self(i64::from(id))
    }
}

/// Element categories known to the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// Free-standing text annotation
    TextNote,
    /// Annotation tag attached to another element
    Tag,
    /// Placed instance of a loadable family
    FamilyInstance,
    /// Anything else (walls, dimensions, ...)
    Other,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::TextNote => "TextNote",
            ElementKind::Tag => "Tag",
            ElementKind::FamilyInstance => "FamilyInstance",
            ElementKind::Other => "Element",
        };
        f.write_str(name)
    }
}

/// How a parameter stores its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageType {
    String,
    Integer,
    Double,
    ElementId,
}

/// Typed parameter value; `None` means the parameter has no value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "storage", content = "value", rename_all = "camelCase")]
pub enum ParameterValue {
    String(Option<String>),
    Integer(Option<i64>),
    Double(Option<f64>),
    ElementId(Option<ElementId>),
}

impl ParameterValue {
    pub fn storage_type(&self) -> StorageType {
        match self {
            ParameterValue::String(_) => StorageType::String,
            ParameterValue::Integer(_) => StorageType::Integer,
            ParameterValue::Double(_) => StorageType::Double,
            ParameterValue::ElementId(_) => StorageType::ElementId,
        }
    }

    pub fn has_value(&self) -> bool {
        match self {
            ParameterValue::String(v) => v.is_some(),
            ParameterValue::Integer(v) => v.is_some(),
            ParameterValue::Double(v) => v.is_some(),
            ParameterValue::ElementId(v) => v.is_some(),
        }
    }
}

/// Named, typed value slot on an element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    pub value: ParameterValue,
    #[serde(default)]
    pub read_only: bool,
    /// Values must be unique per parameter name across the document (checked on commit)
    #[serde(default)]
    pub unique: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: ParameterValue) -> Self {
        Self {
            name: name.into(),
            value,
            read_only: false,
            unique: false,
            max_length: None,
        }
    }

    /// String parameter holding `value`
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, ParameterValue::String(Some(value.into())))
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn storage_type(&self) -> StorageType {
        self.value.storage_type()
    }

    pub fn has_value(&self) -> bool {
        self.value.has_value()
    }

    pub fn as_string(&self) -> Option<&str> {
        match &self.value {
            ParameterValue::String(v) => v.as_deref(),
            _ => None,
        }
    }

    /// Store a string, enforcing the parameter's own constraints
    pub fn set_string(&mut self, value: String) -> ModelResult<()> {
        if self.read_only {
            return Err(ModelError::ReadOnlyParameter(self.name.clone()));
        }
        if self.storage_type() != StorageType::String {
            return Err(ModelError::NotAString(self.name.clone()));
        }
        if let Some(max_length) = self.max_length {
            if value.chars().count() > max_length {
                return Err(ModelError::value_too_long(&self.name, max_length));
            }
        }

        self.value = ParameterValue::String(Some(value));
        Ok(())
    }
}

/// Identifiable unit of document content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Text body (text notes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default = "default_true")]
    pub valid: bool,
    /// Owner holding the worksharing lock, if someone else has it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borrowed_by: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Element {
    pub fn new(id: impl Into<ElementId>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            text: None,
            parameters: Vec::new(),
            valid: true,
            borrowed_by: None,
        }
    }

    pub fn text_note(id: impl Into<ElementId>, text: impl Into<String>) -> Self {
        let mut element = Self::new(id, ElementKind::TextNote);
        element.text = Some(text.into());
        element
    }

    pub fn tag(id: impl Into<ElementId>) -> Self {
        Self::new(id, ElementKind::Tag)
    }

    pub fn family_instance(id: impl Into<ElementId>) -> Self {
        Self::new(id, ElementKind::FamilyInstance)
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn borrowed_by(mut self, owner: impl Into<String>) -> Self {
        self.borrowed_by = Some(owner.into());
        self
    }

    pub fn invalidated(mut self) -> Self {
        self.valid = false;
        self
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// First parameter with the given name
    pub fn lookup_parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn lookup_parameter_index(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.name == name)
    }

    /// Replace the whole text body
    pub fn set_text(&mut self, text: String) -> ModelResult<()> {
        self.ensure_editable()?;
        if self.text.is_none() {
            return Err(ModelError::MissingText(self.id));
        }
        self.text = Some(text);
        Ok(())
    }

    /// Store a string into the parameter at `index`
    pub fn set_parameter(&mut self, index: usize, value: String) -> ModelResult<()> {
        self.ensure_editable()?;
        let id = self.id;
        let parameter = self
            .parameters
            .get_mut(index)
            .ok_or(ModelError::InvalidElement(id))?;
        parameter.set_string(value)
    }

    fn ensure_editable(&self) -> ModelResult<()> {
        if !self.valid {
            return Err(ModelError::InvalidElement(self.id));
        }
        if let Some(owner) = &self.borrowed_by {
            return Err(ModelError::not_editable(self.id, owner));
        }
        Ok(())
    }
}
