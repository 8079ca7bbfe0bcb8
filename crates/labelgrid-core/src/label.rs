//! Labels and their element lists.

use crate::elements::{Element, ElementId};
use serde::{Deserialize, Serialize};

/// Stable label identifier, assigned `0..N-1` when the sheet is created.
pub type LabelId = u32;

/// Background color given to new and cleared labels.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// One printable label: a background plus elements in z-order (back to front).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: LabelId,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default = "default_background")]
    pub background_color: String,
}

fn default_background() -> String {
    DEFAULT_BACKGROUND.to_string()
}

impl Label {
    /// Create an empty label with the default background.
    pub fn new(id: LabelId) -> Self {
        Self {
            id,
            elements: Vec::new(),
            background_color: default_background(),
        }
    }

    /// Append an element on top of the others, giving it `id`.
    pub fn add_element(&mut self, mut element: Element, id: ElementId) -> ElementId {
        element.set_id(id);
        self.elements.push(element);
        id
    }

    /// Remove an element by id. Missing ids are ignored.
    pub fn remove_element(&mut self, id: ElementId) -> Option<Element> {
        let index = self.elements.iter().position(|e| e.id() == id)?;
        Some(self.elements.remove(index))
    }

    pub fn set_background(&mut self, color: impl Into<String>) {
        self.background_color = color.into();
    }

    /// Empty the label and reset its background.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.background_color = default_background();
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.element(id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Deep copy of this label whose element ids are `base + index`.
    pub fn clone_with_ids(&self, base: ElementId) -> Self {
        Self {
            id: self.id,
            elements: renumber(&self.elements, base),
            background_color: self.background_color.clone(),
        }
    }

    /// Replace elements and background wholesale from a snapshot.
    pub fn replace_content(&mut self, elements: Vec<Element>, background_color: String) {
        self.elements = elements;
        self.background_color = background_color;
    }
}

/// Clone `elements`, numbering the copies `base`, `base + 1`, ...
pub fn renumber(elements: &[Element], base: ElementId) -> Vec<Element> {
    elements
        .iter()
        .zip(0..)
        .map(|(element, offset)| element.with_id(base + offset))
        .collect()
}
