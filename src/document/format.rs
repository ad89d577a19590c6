/*!
 * Document formats.
 *
 * A `DocumentFormat` describes one format an office suite can read or write:
 * its extensions, MIME type, the family it opens as, and the filter
 * properties used when storing documents of each family in it.
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Office filter, load or store properties
///
/// Values are kept as JSON so nested structures such as `FilterData`
/// survive a round trip through a registry file.
pub type PropertyMap = BTreeMap<String, serde_json::Value>;

/// Family of documents an office suite can open
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentFamily {
    Text,
    Spreadsheet,
    Presentation,
    Drawing,
}

impl DocumentFamily {
    /// All families, in declaration order
    pub const ALL: [DocumentFamily; 4] = [
        Self::Text,
        Self::Spreadsheet,
        Self::Presentation,
        Self::Drawing,
    ];
}

impl fmt::Display for DocumentFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Spreadsheet => "spreadsheet",
            Self::Presentation => "presentation",
            Self::Drawing => "drawing",
        };
        write!(f, "{}", name)
    }
}

/// Conversion metadata for a single document format
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFormat {
    /// Human readable name (e.g. "Portable Document Format")
    pub name: String,

    /// File extensions, the first one being the default
    pub extensions: Vec<String>,

    /// MIME type
    pub media_type: String,

    /// Family of documents this format opens as, if it can be loaded at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_family: Option<DocumentFamily>,

    /// Properties applied when loading a document of this format
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub load_properties: PropertyMap,

    /// Properties applied when storing to this format, per source family
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub store_properties: BTreeMap<DocumentFamily, PropertyMap>,
}

impl DocumentFormat {
    /// Start building a format with its name, default extension and MIME type
    pub fn builder(
        name: impl Into<String>,
        extension: impl Into<String>,
        media_type: impl Into<String>,
    ) -> DocumentFormatBuilder {
        DocumentFormatBuilder {
            format: DocumentFormat {
                name: name.into(),
                extensions: vec![extension.into()],
                media_type: media_type.into(),
                input_family: None,
                load_properties: PropertyMap::new(),
                store_properties: BTreeMap::new(),
            },
        }
    }

    /// The default extension, without leading dot
    pub fn extension(&self) -> &str {
        self.extensions.first().map(String::as_str).unwrap_or_default()
    }

    /// Whether `extension` names this format, ignoring case and a leading dot
    pub fn has_extension(&self, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.');
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(extension))
    }

    /// Store properties to use when the source document belongs to `family`
    pub fn store_properties_for(&self, family: DocumentFamily) -> Option<&PropertyMap> {
        self.store_properties.get(&family)
    }

    /// Whether a document of `family` can be exported to this format
    pub fn is_output_for(&self, family: DocumentFamily) -> bool {
        self.store_properties.contains_key(&family)
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.extension())
    }
}

/// Fluent construction of a `DocumentFormat`
#[derive(Debug, Clone)]
pub struct DocumentFormatBuilder {
    format: DocumentFormat,
}

impl DocumentFormatBuilder {
    /// Add an alternative extension
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.format.extensions.push(extension.into());
        self
    }

    /// Set the family this format loads as
    pub fn input_family(mut self, family: DocumentFamily) -> Self {
        self.format.input_family = Some(family);
        self
    }

    /// Add a load property
    pub fn load_property(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.format.load_properties.insert(name.into(), value.into());
        self
    }

    /// Export filter used when storing a document of `family` to this format
    pub fn store_filter(self, family: DocumentFamily, filter_name: &str) -> Self {
        self.store_property(family, "FilterName", filter_name)
    }

    /// Add a store property for documents of `family`
    pub fn store_property(
        mut self,
        family: DocumentFamily,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.format
            .store_properties
            .entry(family)
            .or_default()
            .insert(name.into(), value.into());
        self
    }

    pub fn build(self) -> DocumentFormat {
        self.format
    }
}
