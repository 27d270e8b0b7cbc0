//! Draft field addressing and values

use crate::core::step::Step;
use std::fmt;

/// One addressable field of a [`ConfigurationDraft`](crate::core::ConfigurationDraft)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DraftField {
    Product,
    InstallationType,
    Width,
    Depth,
    Color,
    Led,
    Service,
    Branch,
    Name,
    Email,
    Phone,
}

impl DraftField {
    /// Every field, in wizard order
    pub const ALL: [DraftField; 11] = [
        DraftField::Product,
        DraftField::InstallationType,
        DraftField::Width,
        DraftField::Depth,
        DraftField::Color,
        DraftField::Led,
        DraftField::Service,
        DraftField::Branch,
        DraftField::Name,
        DraftField::Email,
        DraftField::Phone,
    ];

    /// Dotted path used by `update_field` (`"dimensions.width"`)
    pub fn path(self) -> &'static str {
        match self {
            DraftField::Product => "product",
            DraftField::InstallationType => "installationType",
            DraftField::Width => "dimensions.width",
            DraftField::Depth => "dimensions.depth",
            DraftField::Color => "color",
            DraftField::Led => "led",
            DraftField::Service => "service",
            DraftField::Branch => "branch",
            DraftField::Name => "name",
            DraftField::Email => "email",
            DraftField::Phone => "phone",
        }
    }

    /// Name used at the start of validation messages
    pub fn label(self) -> &'static str {
        match self {
            DraftField::Product => "Product",
            DraftField::InstallationType => "Installation Type",
            DraftField::Width => "Width",
            DraftField::Depth => "Depth",
            DraftField::Color => "Color",
            DraftField::Led => "LED option",
            DraftField::Service => "Service option",
            DraftField::Branch => "Branch",
            DraftField::Name => "Name",
            DraftField::Email => "Email",
            DraftField::Phone => "Phone number",
        }
    }

    /// Key under which step validation reports this field
    pub fn step_key(self) -> &'static str {
        match self {
            DraftField::Width => "width",
            DraftField::Depth => "depth",
            other => other.path(),
        }
    }

    /// Key under which whole-document validation reports this field
    ///
    /// Width and depth share the combined `dimensions` key.
    pub fn document_key(self) -> &'static str {
        match self {
            DraftField::Width | DraftField::Depth => "dimensions",
            other => other.path(),
        }
    }

    /// The wizard step that collects this field
    pub fn step(self) -> Step {
        let number = match self {
            DraftField::Product => 1,
            DraftField::InstallationType => 2,
            DraftField::Width | DraftField::Depth => 3,
            DraftField::Color => 4,
            DraftField::Led => 5,
            DraftField::Service => 6,
            DraftField::Branch => 7,
            DraftField::Name | DraftField::Email | DraftField::Phone => 8,
        };
        Step::from_number(number)
    }

    /// Whether the field holds a boolean rather than text
    pub fn is_flag(self) -> bool {
        matches!(self, DraftField::Service)
    }

    /// Look up a field by its dotted path
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.path() == path)
    }

    /// Fields an error key refers to
    ///
    /// Accepts paths, step keys and document keys alike, so both client
    /// and server error maps can be resolved.
    pub fn from_error_key(key: &str) -> &'static [DraftField] {
        static FIELDS: [DraftField; 11] = DraftField::ALL;

        if key == "dimensions" {
            return &FIELDS[2..=3];
        }

        match FIELDS
            .iter()
            .position(|field| field.path() == key || field.step_key() == key)
        {
            Some(index) => &FIELDS[index..=index],
            None => &[],
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A value assigned to a draft field by the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    /// Kind name used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Flag(_) => "boolean",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}
