//! Configuration draft and its validated and stored counterparts
//!
//! A [`ConfigurationDraft`] is what the wizard collects and what the API
//! receives: every value may be missing. [`Configuration`] is the typed form
//! of a complete draft and can only be obtained through
//! [`parse_configuration`](crate::core::validation::parse_configuration).
//! [`StoredConfiguration`] is the persisted, identifier-bearing record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A closed set of values selectable in one wizard step
pub trait Choice: Sized + Copy + 'static {
    /// Every variant, in the order the wizard offers them
    const ALL: &'static [Self];

    /// Wire form (`"patio_cover"`)
    fn as_str(&self) -> &'static str;

    /// Human-readable form (`"Patio Cover"`)
    fn label(&self) -> &'static str;

    /// Parse the wire form
    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|choice| choice.as_str() == value)
    }

    /// Comma-separated list of accepted wire values
    fn allowed() -> String {
        Self::ALL
            .iter()
            .map(|choice| choice.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Declare a [`Choice`] enum with its wire names and labels
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => ($wire:literal, $label:literal)),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl Choice for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

choice_enum!(
    /// Product family
    Product {
        PatioCover => ("patio_cover", "Patio Cover"),
        Carport => ("carport", "Carport"),
        WinterGarden => ("winter_garden", "Winter Garden"),
    }
);

choice_enum!(
    /// How the product is mounted
    InstallationType {
        Attached => ("attached", "Attached"),
        Freestanding => ("freestanding", "Freestanding"),
        Consultation => ("consultation", "I need consultation"),
    }
);

choice_enum!(
    /// Frame color
    Color {
        White => ("white", "White"),
        Black => ("black", "Black"),
        Gray => ("gray", "Gray"),
    }
);

choice_enum!(
    /// LED lighting option
    Led {
        Yes => ("yes", "Yes"),
        No => ("no", "No"),
    }
);

choice_enum!(
    /// Branch that receives the request
    Branch {
        Dhaka => ("dhaka", "Dhaka"),
        Chittagong => ("chittagong", "Chittagong"),
        Rajshahi => ("rajshahi", "Rajshahi"),
    }
);

/// A dimension as entered, in centimetres
///
/// Form inputs arrive as text and API callers may send numbers. The original
/// form is kept so a stored record echoes exactly what was submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measure {
    Number(serde_json::Number),
    Text(String),
}

impl Measure {
    /// Whether the measure counts as not entered
    pub fn is_blank(&self) -> bool {
        matches!(self, Measure::Text(text) if text.is_empty())
    }

    /// Numeric value if it is a finite number greater than zero
    pub fn as_positive(&self) -> Option<f64> {
        let value = match self {
            Measure::Number(number) => number.as_f64()?,
            Measure::Text(text) => text.trim().parse::<f64>().ok()?,
        };

        (value.is_finite() && value > 0.0).then_some(value)
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Number(number) => write!(f, "{}", number),
            Measure::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Measure {
    fn from(value: &str) -> Self {
        Measure::Text(value.to_string())
    }
}

impl From<String> for Measure {
    fn from(value: String) -> Self {
        Measure::Text(value)
    }
}

impl From<u32> for Measure {
    fn from(value: u32) -> Self {
        Measure::Number(value.into())
    }
}

/// Width and depth as collected by step 3
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Measure>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<Measure>,
}

/// An in-progress configuration request
///
/// Missing keys and `null` both deserialize to `None`. Empty strings are kept
/// as-is and treated as absent by validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installation_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub led: Option<String>,

    /// `Some(false)` is a valid answer; only `None` means unanswered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ConfigurationDraft {
    /// Width, if a dimensions object is present
    pub fn width(&self) -> Option<&Measure> {
        self.dimensions.as_ref().and_then(|d| d.width.as_ref())
    }

    /// Depth, if a dimensions object is present
    pub fn depth(&self) -> Option<&Measure> {
        self.dimensions.as_ref().and_then(|d| d.depth.as_ref())
    }
}

/// Validated width and depth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfiguredDimensions {
    pub width: Measure,
    pub depth: Measure,
}

/// A complete, validated configuration request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub product: Product,
    pub installation_type: InstallationType,
    pub dimensions: ConfiguredDimensions,
    pub color: Color,
    pub led: Led,
    pub service: bool,
    pub branch: Branch,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Configuration {
    /// Back to the draft shape, e.g. to resubmit a stored request
    pub fn to_draft(&self) -> ConfigurationDraft {
        ConfigurationDraft {
            product: Some(self.product.as_str().to_string()),
            installation_type: Some(self.installation_type.as_str().to_string()),
            dimensions: Some(Dimensions {
                width: Some(self.dimensions.width.clone()),
                depth: Some(self.dimensions.depth.clone()),
            }),
            color: Some(self.color.as_str().to_string()),
            led: Some(self.led.as_str().to_string()),
            service: Some(self.service),
            branch: Some(self.branch.as_str().to_string()),
            name: Some(self.name.clone()),
            email: Some(self.email.clone()),
            phone: Some(self.phone.clone()),
        }
    }
}

/// A persisted configuration request
///
/// Records are append-only: there is no update or delete path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredConfiguration {
    pub id: Uuid,

    #[serde(flatten)]
    pub configuration: Configuration,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredConfiguration {
    /// Assign an identifier and timestamps to a validated configuration
    pub fn new(configuration: Configuration) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            configuration,
            created_at: now,
            updated_at: now,
        }
    }
}
