//! Declarative page descriptions.
//!
//! Hosts without a real browser describe the page markup and its layout in a
//! JSON5 file. [`PageDescription::into_document`] builds the matching
//! [`Document`].

use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Document, ElementId, Rect, Viewport};

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Failed to read page description: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse page description: {0}")]
    Parse(#[from] json5::Error),
}

/// Markup and layout of a single element and its children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDescription {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Space separated class list, as in the `class` attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rect: Option<Rect>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Self>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDescription {
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub body: Vec<ElementDescription>,
}

impl PageDescription {
    /// # Errors
    ///
    /// * If the description is not valid JSON5 or does not match the schema
    pub fn from_json5(content: &str) -> Result<Self, PageError> {
        Ok(json5::from_str(content)?)
    }

    /// # Errors
    ///
    /// * If the file cannot be read
    /// * If the file is not a valid page description
    pub fn load(path: &Path) -> Result<Self, PageError> {
        let content = fs::read_to_string(path)?;
        Self::from_json5(&content)
    }

    #[must_use]
    pub fn into_document(self) -> Document {
        let mut document = Document::new(self.viewport);
        let body = document.body();

        for element in self.body {
            build(&mut document, body, element);
        }

        log::debug!(
            "into_document: built {} elements",
            document.descendants(document.root()).len()
        );

        document
    }
}

fn build(document: &mut Document, parent: ElementId, description: ElementDescription) {
    let id = document.create_element(&description.tag);

    if let Some(str_id) = description.id {
        document.set_attribute(id, "id", str_id);
    }
    if let Some(class) = description.class {
        document.set_attribute(id, "class", class);
    }
    for (name, value) in description.attributes {
        document.set_attribute(id, &name, value);
    }
    for (property, value) in description.style {
        document.set_style(id, &property, value);
    }
    if let Some(text) = description.text {
        document.set_text(id, text);
    }
    if let Some(value) = description.value {
        document.set_value(id, value);
    }
    if let Some(rect) = description.rect {
        document.set_rect(id, rect);
    }

    document.append_child(parent, id);

    for child in description.children {
        build(document, id, child);
    }
}
