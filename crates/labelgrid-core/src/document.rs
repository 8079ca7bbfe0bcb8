//! Saved sheet documents.

use crate::error::{EditorError, EditorResult};
use crate::ids::MAX_ELEMENT_ID;
use crate::label::Label;
use std::collections::HashSet;
use crate::sheet::LabelSheet;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Schema version written into every saved document.
pub const DOCUMENT_VERSION: &str = "1.0";

fn default_version() -> String {
    DOCUMENT_VERSION.to_string()
}

/// A saved label sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetDocument {
    #[serde(default = "default_version")]
    pub version: String,
    /// RFC 3339 save time.
    #[serde(default)]
    pub timestamp: String,
    pub labels: Vec<Label>,
}

impl SheetDocument {
    /// Snapshot a sheet, stamped with the current time.
    pub fn capture(sheet: &LabelSheet) -> Self {
        Self::with_labels(sheet.labels().to_vec())
    }

    pub fn with_labels(labels: Vec<Label>) -> Self {
        Self {
            version: default_version(),
            timestamp: now_rfc3339(),
            labels,
        }
    }

    /// Parsed save time, if the document carries a valid one.
    pub fn saved_at(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::parse(&self.timestamp, &Rfc3339).ok()
    }

    pub fn element_count(&self) -> usize {
        self.labels.iter().map(|l| l.elements.len()).sum()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    ///
    /// Anything that does not match the schema is rejected as a whole, as is
    /// a label reusing an element id or an id above [`MAX_ELEMENT_ID`].
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let document: Self =
            serde_json::from_str(json).map_err(|e| EditorError::MalformedDocument(e.to_string()))?;
        document.validate_ids()?;
        Ok(document)
    }

    fn validate_ids(&self) -> EditorResult<()> {
        for label in &self.labels {
            let mut seen = HashSet::with_capacity(label.elements.len());
            for element in &label.elements {
                let id = element.id();
                if id > MAX_ELEMENT_ID {
                    return Err(EditorError::MalformedDocument(format!(
                        "element id {} in label {} is out of range",
                        id, label.id
                    )));
                }
                if !seen.insert(id) {
                    return Err(EditorError::MalformedDocument(format!(
                        "duplicate element id {} in label {}",
                        id, label.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Build a live sheet from this document.
    pub fn into_sheet(self, background: impl Into<String>) -> LabelSheet {
        LabelSheet::from_labels(self.labels, background)
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default()
}
