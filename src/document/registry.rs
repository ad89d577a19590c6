/*!
 * Registry of document formats.
 *
 * The stock registry covers common office, text and image formats. Custom
 * registries are read from a JSON array of formats.
 */

use log::debug;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::format::{DocumentFamily, DocumentFormat};
use crate::errors::{ConfigurationError, FormatError};

/// Read-only lookup table of supported document formats
///
/// A registry is built once and then shared (usually behind an `Arc`) by every
/// converter and job that needs it. It never changes after construction;
/// `with_format` returns a new registry.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatRegistry {
    formats: Vec<DocumentFormat>,
}

impl FormatRegistry {
    /// Create a registry from a list of formats
    ///
    /// # Errors
    /// * `FormatError::Duplicate` if two formats claim the same extension
    pub fn new(formats: Vec<DocumentFormat>) -> Result<Self, FormatError> {
        let mut seen: Vec<String> = Vec::new();
        for format in &formats {
            for extension in &format.extensions {
                let extension = extension.to_ascii_lowercase();
                if seen.contains(&extension) {
                    return Err(FormatError::Duplicate(extension));
                }
                seen.push(extension);
            }
        }
        Ok(Self { formats })
    }

    /// A registry that knows no formats
    pub fn empty() -> Self {
        Self { formats: Vec::new() }
    }

    /// Parse a registry from a JSON array of formats
    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        let formats: Vec<DocumentFormat> = serde_json::from_str(json)
            .map_err(|e| ConfigurationError::InvalidRegistry(e.to_string()))?;
        Ok(Self::new(formats)?)
    }

    /// Parse a registry from a reader yielding a JSON array of formats
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, ConfigurationError> {
        let formats: Vec<DocumentFormat> = serde_json::from_reader(reader)
            .map_err(|e| ConfigurationError::InvalidRegistry(e.to_string()))?;
        Ok(Self::new(formats)?)
    }

    /// Load a registry from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            ConfigurationError::InvalidRegistry(format!("{}: {}", path.display(), e))
        })?;
        let registry = Self::from_json_reader(BufReader::new(file))?;
        debug!("Loaded {} document formats from {}", registry.len(), path.display());
        Ok(registry)
    }

    /// Return a registry with `format` added
    ///
    /// Any existing format sharing an extension with `format` is replaced.
    pub fn with_format(mut self, format: DocumentFormat) -> Self {
        self.formats
            .retain(|existing| !format.extensions.iter().any(|e| existing.has_extension(e)));
        self.formats.push(format);
        self
    }

    /// All formats, in registration order
    pub fn formats(&self) -> &[DocumentFormat] {
        &self.formats
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    /// Find a format by file extension, ignoring case and a leading dot
    pub fn get_format_by_extension(&self, extension: &str) -> Option<&DocumentFormat> {
        self.formats.iter().find(|f| f.has_extension(extension))
    }

    /// Find a format by MIME type, ignoring case
    pub fn get_format_by_media_type(&self, media_type: &str) -> Option<&DocumentFormat> {
        self.formats
            .iter()
            .find(|f| f.media_type.eq_ignore_ascii_case(media_type))
    }

    /// Find a format by its name, ignoring case
    pub fn get_format_by_name(&self, name: &str) -> Option<&DocumentFormat> {
        self.formats.iter().find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Find a format by any identifier: extension, then MIME type, then name
    pub fn lookup(&self, identifier: &str) -> Option<&DocumentFormat> {
        self.get_format_by_extension(identifier)
            .or_else(|| self.get_format_by_media_type(identifier))
            .or_else(|| self.get_format_by_name(identifier))
    }

    /// Formats a document of `family` can be exported to
    pub fn get_output_formats(&self, family: DocumentFamily) -> Vec<&DocumentFormat> {
        self.formats.iter().filter(|f| f.is_output_for(family)).collect()
    }

    /// Resolve the format of a file from its extension
    pub fn get_format_for_path(&self, path: &Path) -> Option<&DocumentFormat> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| self.get_format_by_extension(e))
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self { formats: stock_formats() }
    }
}

fn stock_formats() -> Vec<DocumentFormat> {
    use DocumentFamily::{Drawing, Presentation, Spreadsheet, Text};

    vec![
        DocumentFormat::builder("Portable Document Format", "pdf", "application/pdf")
            .input_family(Drawing)
            .load_property("FilterName", "draw_pdf_import")
            .store_filter(Text, "writer_pdf_Export")
            .store_filter(Spreadsheet, "calc_pdf_Export")
            .store_filter(Presentation, "impress_pdf_Export")
            .store_filter(Drawing, "draw_pdf_Export")
            .build(),
        DocumentFormat::builder("HTML", "html", "text/html")
            .extension("htm")
            .input_family(Text)
            .store_filter(Text, "HTML (StarWriter)")
            .store_filter(Spreadsheet, "HTML (StarCalc)")
            .store_filter(Presentation, "impress_html_Export")
            .build(),
        DocumentFormat::builder("OpenDocument Text", "odt", "application/vnd.oasis.opendocument.text")
            .input_family(Text)
            .store_filter(Text, "writer8")
            .build(),
        DocumentFormat::builder("Microsoft Word", "doc", "application/msword")
            .input_family(Text)
            .store_filter(Text, "MS Word 97")
            .build(),
        DocumentFormat::builder(
            "Word Open XML",
            "docx",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        )
        .input_family(Text)
        .store_filter(Text, "MS Word 2007 XML")
        .build(),
        DocumentFormat::builder("Rich Text Format", "rtf", "text/rtf")
            .input_family(Text)
            .store_filter(Text, "Rich Text Format")
            .build(),
        DocumentFormat::builder("Plain Text", "txt", "text/plain")
            .input_family(Text)
            .load_property("FilterName", "Text (encoded)")
            .load_property("FilterOptions", "utf8")
            .store_filter(Text, "Text (encoded)")
            .store_property(Text, "FilterOptions", "utf8")
            .build(),
        DocumentFormat::builder("OpenDocument Spreadsheet", "ods", "application/vnd.oasis.opendocument.spreadsheet")
            .input_family(Spreadsheet)
            .store_filter(Spreadsheet, "calc8")
            .build(),
        DocumentFormat::builder("Microsoft Excel", "xls", "application/vnd.ms-excel")
            .input_family(Spreadsheet)
            .store_filter(Spreadsheet, "MS Excel 97")
            .build(),
        DocumentFormat::builder(
            "Excel Open XML",
            "xlsx",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        )
        .input_family(Spreadsheet)
        .store_filter(Spreadsheet, "Calc MS Excel 2007 XML")
        .build(),
        DocumentFormat::builder("Comma Separated Values", "csv", "text/csv")
            .input_family(Spreadsheet)
            .load_property("FilterName", "Text - txt - csv (StarCalc)")
            .load_property("FilterOptions", "44,34,0")
            .store_filter(Spreadsheet, "Text - txt - csv (StarCalc)")
            .store_property(Spreadsheet, "FilterOptions", "44,34,0")
            .build(),
        DocumentFormat::builder("OpenDocument Presentation", "odp", "application/vnd.oasis.opendocument.presentation")
            .input_family(Presentation)
            .store_filter(Presentation, "impress8")
            .build(),
        DocumentFormat::builder("Microsoft PowerPoint", "ppt", "application/vnd.ms-powerpoint")
            .input_family(Presentation)
            .store_filter(Presentation, "MS PowerPoint 97")
            .build(),
        DocumentFormat::builder(
            "PowerPoint Open XML",
            "pptx",
            "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        )
        .input_family(Presentation)
        .store_filter(Presentation, "Impress MS PowerPoint 2007 XML")
        .build(),
        DocumentFormat::builder("OpenDocument Drawing", "odg", "application/vnd.oasis.opendocument.graphics")
            .input_family(Drawing)
            .store_filter(Drawing, "draw8")
            .build(),
        DocumentFormat::builder("Portable Network Graphics", "png", "image/png")
            .store_filter(Text, "writer_png_Export")
            .store_filter(Spreadsheet, "calc_png_Export")
            .store_filter(Presentation, "impress_png_Export")
            .store_filter(Drawing, "draw_png_Export")
            .build(),
        DocumentFormat::builder("JPEG", "jpg", "image/jpeg")
            .extension("jpeg")
            .store_filter(Text, "writer_jpg_Export")
            .store_filter(Spreadsheet, "calc_jpg_Export")
            .store_filter(Presentation, "impress_jpg_Export")
            .store_filter(Drawing, "draw_jpg_Export")
            .build(),
        DocumentFormat::builder("Scalable Vector Graphics", "svg", "image/svg+xml")
            .store_filter(Text, "writer_svg_Export")
            .store_filter(Presentation, "impress_svg_Export")
            .store_filter(Drawing, "draw_svg_Export")
            .build(),
    ]
}
