//! The session's single set of labels.

use crate::elements::{Element, ElementId};
use crate::error::{EditorError, EditorResult};
use crate::ids::IdAllocator;
use crate::label::{Label, LabelId};

/// All labels of the session plus the id allocator for their elements.
///
/// Labels are created once and never destroyed; they are only cleared or
/// have their content replaced.
#[derive(Debug, Clone)]
pub struct LabelSheet {
    labels: Vec<Label>,
    background: String,
    ids: IdAllocator,
}

impl LabelSheet {
    /// Create `count` empty labels with ids `0..count`.
    pub fn new(count: u32, background: impl Into<String>) -> Self {
        let background = background.into();
        let labels = (0..count)
            .map(|id| {
                let mut label = Label::new(id);
                label.set_background(background.clone());
                label
            })
            .collect();
        Self {
            labels,
            background,
            ids: IdAllocator::new(),
        }
    }

    /// Build a sheet from labels that came from elsewhere (a loaded file).
    ///
    /// Element frames and opacities are normalized and the id allocator is
    /// advanced past every id already present.
    pub fn from_labels(mut labels: Vec<Label>, background: impl Into<String>) -> Self {
        let mut ids = IdAllocator::new();
        for label in &mut labels {
            for element in &mut label.elements {
                element.normalize();
                ids.observe(element.id());
            }
        }
        Self {
            labels,
            background: background.into(),
            ids,
        }
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label(&self, id: LabelId) -> Option<&Label> {
        self.labels.iter().find(|l| l.id == id)
    }

    pub fn label_mut(&mut self, id: LabelId) -> Option<&mut Label> {
        self.labels.iter_mut().find(|l| l.id == id)
    }

    /// Look up a label, reporting unknown ids as an error.
    pub fn require(&self, id: LabelId) -> EditorResult<&Label> {
        self.label(id).ok_or(EditorError::UnknownLabel(id))
    }

    pub fn require_mut(&mut self, id: LabelId) -> EditorResult<&mut Label> {
        self.label_mut(id).ok_or(EditorError::UnknownLabel(id))
    }

    pub fn first_label_id(&self) -> Option<LabelId> {
        self.labels.first().map(|l| l.id)
    }

    pub fn element(&self, label: LabelId, element: ElementId) -> Option<&Element> {
        self.label(label)?.element(element)
    }

    pub fn element_mut(&mut self, label: LabelId, element: ElementId) -> Option<&mut Element> {
        self.label_mut(label)?.element_mut(element)
    }

    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    pub fn ids_mut(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }

    /// Append `element` to a label under a freshly allocated id.
    pub fn add_element(&mut self, label: LabelId, element: Element) -> EditorResult<ElementId> {
        self.require(label)?;
        let id = self.ids.next_id()?;
        let label = self.require_mut(label)?;
        Ok(label.add_element(element, id))
    }

    /// Remove an element. Unknown labels or elements are ignored.
    pub fn remove_element(&mut self, label: LabelId, element: ElementId) -> Option<Element> {
        self.label_mut(label)?.remove_element(element)
    }

    /// Empty every label and reset its background.
    pub fn clear_all(&mut self) {
        for label in &mut self.labels {
            label.clear();
            label.set_background(self.background.clone());
        }
    }

    /// Whether any element on the sheet uses `id`.
    pub fn contains_element_id(&self, id: ElementId) -> bool {
        self.labels.iter().any(|l| l.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::TextElement;

    #[test]
    fn test_new_sheet_ids() {
        let sheet = LabelSheet::new(30, "#ffffff");
        assert_eq!(sheet.len(), 30);
        let ids: Vec<_> = sheet.labels().iter().map(|l| l.id).collect();
        assert_eq!(ids, (0..30).collect::<Vec<_>>());
    }

    #[test]
    fn test_add_element_unknown_label() {
        let mut sheet = LabelSheet::new(2, "#ffffff");
        let result = sheet.add_element(5, Element::Text(TextElement::default()));
        assert_eq!(result, Err(EditorError::UnknownLabel(5)));
    }

    #[test]
    fn test_add_elements_get_unique_ids() {
        let mut sheet = LabelSheet::new(2, "#ffffff");
        let a = sheet.add_element(0, Element::Text(TextElement::default())).unwrap();
        let b = sheet.add_element(0, Element::Text(TextElement::default())).unwrap();
        let c = sheet.add_element(1, Element::Text(TextElement::default())).unwrap();
        assert!(a < b && b < c);
        assert!(sheet.contains_element_id(b));
    }

    #[test]
    fn test_clear_all_keeps_label_ids() {
        let mut sheet = LabelSheet::new(3, "#fafafa");
        sheet.add_element(1, Element::Text(TextElement::default())).unwrap();
        sheet.label_mut(2).unwrap().set_background("#000000");
        sheet.clear_all();
        assert!(sheet.labels().iter().all(|l| l.is_empty()));
        assert!(sheet.labels().iter().all(|l| l.background_color == "#fafafa"));
        assert_eq!(sheet.label(2).map(|l| l.id), Some(2));
    }

    #[test]
    fn test_from_labels_advances_ids() {
        let mut label = Label::new(0);
        label.add_element(Element::Text(TextElement::default()), u64::MAX / 2);
        let mut sheet = LabelSheet::from_labels(vec![label], "#ffffff");
        let next = sheet.add_element(0, Element::Text(TextElement::default())).unwrap();
        assert!(next > u64::MAX / 2);
    }
}
