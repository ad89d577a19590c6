/*!
 * Tests for the document format registry
 */

use onlineconv::{ConfigurationError, DocumentFamily, DocumentFormat, FormatRegistry};
use crate::common::{create_temp_dir, create_test_file};

#[test]
fn test_defaultRegistry_pdf_shouldExportFromEveryFamily() {
    let registry = FormatRegistry::default();
    let pdf = registry.get_format_by_media_type("APPLICATION/PDF").expect("pdf should exist");

    for family in DocumentFamily::ALL {
        assert!(pdf.is_output_for(family), "pdf should be an output for {}", family);
    }
}

#[test]
fn test_defaultRegistry_imageFormats_shouldNotBeInputs() {
    let registry = FormatRegistry::default();
    for extension in ["png", "jpg", "svg"] {
        let format = registry.get_format_by_extension(extension).unwrap();
        assert!(format.input_family.is_none(), "{} should not be loadable", extension);
    }
}

#[test]
fn test_load_withSavedRegistry_shouldRoundTripCustomFormat() -> anyhow::Result<()> {
    let dir = create_temp_dir()?;
    let custom = DocumentFormat::builder("Markdown", "md", "text/markdown")
        .input_family(DocumentFamily::Text)
        .store_filter(DocumentFamily::Text, "Markdown")
        .build();
    let json = serde_json::to_string_pretty(&vec![custom.clone()])?;
    let path = create_test_file(dir.path(), "formats.json", json.as_bytes())?;

    let registry = FormatRegistry::load(&path)?;

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.lookup("md"), Some(&custom));
    Ok(())
}

#[test]
fn test_load_withMissingFile_shouldReturnInvalidRegistry() {
    let result = FormatRegistry::load("/nonexistent/formats.json");
    assert!(matches!(result, Err(ConfigurationError::InvalidRegistry(ref msg)) if msg.contains("formats.json")));
}

#[test]
fn test_fromJsonReader_withDuplicateExtension_shouldFail() {
    let json = r#"[
        {"name": "One", "extensions": ["one"], "mediaType": "application/x-one"},
        {"name": "Two", "extensions": ["two", "ONE"], "mediaType": "application/x-two"}
    ]"#;
    let result = FormatRegistry::from_json_reader(json.as_bytes());
    assert!(matches!(result, Err(ConfigurationError::InvalidRegistry(ref msg)) if msg.contains("one")));
}

#[test]
fn test_emptyRegistry_shouldFindNothing() {
    let registry = FormatRegistry::empty();
    assert!(registry.is_empty());
    assert!(registry.lookup("pdf").is_none());
    assert!(registry.get_output_formats(DocumentFamily::Text).is_empty());
}
