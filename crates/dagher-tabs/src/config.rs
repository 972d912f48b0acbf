//! Tab group configuration read from host attributes.

use dagher_dom::{Document, NodeId};

/// Attribute holding the accessible name of the tab list.
pub const TITLE_ATTRIBUTE: &str = "title";
/// Attribute selecting the visual variant.
pub const VARIANT_ATTRIBUTE: &str = "variant";
/// Attribute selecting manual activation.
pub const MANUAL_SWITCHING_ATTRIBUTE: &str = "with-manual-switching";

/// Host attributes whose changes re-synchronize the tab group.
pub const OBSERVED_ATTRIBUTES: &[&str] = &[
    TITLE_ATTRIBUTE,
    VARIANT_ATTRIBUTE,
    MANUAL_SWITCHING_ATTRIBUTE,
];

/// Whether changes to `name` are observed.
#[must_use]
pub fn is_observed(name: &str) -> bool {
    OBSERVED_ATTRIBUTES.contains(&name)
}

/// Visual style of the tab list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Variant {
    #[default]
    Pill,
    Underline,
}

impl Variant {
    /// Every variant, in class-reset order.
    pub const ALL: [Self; 2] = [Self::Pill, Self::Underline];

    /// Parse an attribute value. Anything but `"underline"` is a pill.
    #[must_use]
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value {
            Some("underline") => Self::Underline,
            _ => Self::Pill,
        }
    }

    /// Class applied to the tab list.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Pill => "pill",
            Self::Underline => "underline",
        }
    }
}

/// Whether focusing a tab also selects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActivationModel {
    /// Selection follows focus.
    #[default]
    AutomaticOnFocus,
    /// Selection changes only on click, Enter or Space.
    Manual,
}

impl ActivationModel {
    /// Derive the model from the `with-manual-switching` attribute value.
    ///
    /// Presence selects [`Manual`](Self::Manual) unless the value is
    /// literally `"false"`.
    #[must_use]
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.eq_ignore_ascii_case("false") => Self::Manual,
            _ => Self::AutomaticOnFocus,
        }
    }
}

/// Configuration of one tab group instance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TabGroupConfig {
    /// Accessible name of the tab list.
    pub label: Option<String>,
    /// Visual variant.
    pub variant: Variant,
    /// Activation model.
    pub activation: ActivationModel,
}

impl TabGroupConfig {
    /// Read the configuration from the host element's attributes.
    #[must_use]
    pub fn from_host(doc: &Document, host: NodeId) -> Self {
        Self {
            label: doc.attribute(host, TITLE_ATTRIBUTE).map(str::to_owned),
            variant: Variant::from_attribute(doc.attribute(host, VARIANT_ATTRIBUTE)),
            activation: ActivationModel::from_attribute(
                doc.attribute(host, MANUAL_SWITCHING_ATTRIBUTE),
            ),
        }
    }
}

/// Attribute values applied to hosts that do not set them.
#[derive(Debug, Clone, Default)]
pub struct HostDefaults {
    /// Default accessible name.
    pub title: Option<String>,
    /// Default variant value.
    pub variant: Option<String>,
    /// Default activation: `Some(true)` adds `with-manual-switching`.
    pub manual_switching: Option<bool>,
}

impl HostDefaults {
    /// Attributes the host lacks and these defaults provide.
    ///
    /// A `manual_switching` of `Some(false)` never adds anything, since
    /// absence already means automatic activation.
    #[must_use]
    pub fn missing_attributes(&self, doc: &Document, host: NodeId) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(title) = &self.title
            && !doc.has_attribute(host, TITLE_ATTRIBUTE)
        {
            out.push((TITLE_ATTRIBUTE, title.clone()));
        }
        if let Some(variant) = &self.variant
            && !doc.has_attribute(host, VARIANT_ATTRIBUTE)
        {
            out.push((VARIANT_ATTRIBUTE, variant.clone()));
        }
        if self.manual_switching == Some(true) && !doc.has_attribute(host, MANUAL_SWITCHING_ATTRIBUTE)
        {
            out.push((MANUAL_SWITCHING_ATTRIBUTE, String::new()));
        }
        out
    }
}
