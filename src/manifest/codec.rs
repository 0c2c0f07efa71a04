/// Multi-document YAML codec
use serde::Deserialize;
use serde_yaml::Value;

use crate::error::{Result, SyncError};

/// One parsed YAML document
pub type Document = serde_yaml::Value;

const DOCUMENT_SEPARATOR: &str = "---\n";

/// Parse every document in `text`, in order of appearance
pub fn parse_documents(text: &str) -> Result<Vec<Document>> {
    serde_yaml::Deserializer::from_str(text)
        .map(|document| {
            Document::deserialize(document).map_err(|e| {
                SyncError::Codec(format!("Error converting YAML to documents: {}", e))
            })
        })
        .collect()
}

/// Render documents back to YAML text, separated by `---` lines
///
/// Block style with two-space indentation, sequences flush with their key
/// and `{}` / `[]` for empty collections. Strings that would not read back
/// as the same string are double-quoted.
pub fn render_documents(docs: &[Document]) -> Result<String> {
    if docs.is_empty() {
        return Ok(String::new());
    }

    let rendered = docs
        .iter()
        .map(render_document)
        .collect::<Result<Vec<_>>>()?;
    let text = rendered.join(DOCUMENT_SEPARATOR);

    // The caller overwrites the manifest with this text
    if parse_documents(&text)? != docs {
        return Err(SyncError::Codec(
            "Error converting documents to YAML: output does not read back as the merged documents"
                .to_string(),
        ));
    }
    Ok(text)
}

fn render_document(doc: &Document) -> Result<String> {
    reject_tags(doc)?;

    let options = serde_saphyr::SerializerOptions {
        indent_step: 2,
        indent_array: Some(0),
        prefer_block_scalars: false,
        empty_map_as_braces: true,
        empty_array_as_brackets: true,
        line_width: None,
        quote_ambiguous_keys: true,
        quote_numeric_strings: true,
        ..Default::default()
    };

    let mut output = String::new();
    serde_saphyr::to_fmt_writer_with_options(&mut output, doc, options)
        .map_err(|e| SyncError::Codec(format!("Error converting documents to YAML: {}", e)))?;
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

/// Tagged nodes would be written as `"!Tag": value` mappings
fn reject_tags(value: &Value) -> Result<()> {
    match value {
        Value::Tagged(tagged) => Err(SyncError::Codec(format!(
            "Error converting documents to YAML: tag {} is not supported",
            tagged.tag
        ))),
        Value::Mapping(mapping) => mapping
            .iter()
            .try_for_each(|(key, value)| reject_tags(key).and_then(|_| reject_tags(value))),
        Value::Sequence(items) => items.iter().try_for_each(reject_tags),
        _ => Ok(()),
    }
}
