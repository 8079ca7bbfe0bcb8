//! Label and element selection.

use crate::elements::ElementId;
use crate::label::LabelId;
use crate::sheet::LabelSheet;

/// Current selection, held by id.
///
/// Invariant: when `element` is set, `label` is set and the element belongs
/// to that label. Every mutator below keeps this true.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    label: Option<LabelId>,
    element: Option<ElementId>,
    /// Labels marked for multi-label commands, in the order they were added.
    marked: Vec<LabelId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active label.
    pub fn label(&self) -> Option<LabelId> {
        self.label
    }

    /// The active element, always on [`Selection::label`].
    pub fn element(&self) -> Option<ElementId> {
        self.element
    }

    /// Active label and element together.
    pub fn selected_element(&self) -> Option<(LabelId, ElementId)> {
        Some((self.label?, self.element?))
    }

    /// Marked labels in insertion order.
    pub fn marked(&self) -> &[LabelId] {
        &self.marked
    }

    pub fn marked_count(&self) -> usize {
        self.marked.len()
    }

    pub fn is_marked(&self, id: LabelId) -> bool {
        self.marked.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.marked.is_empty()
    }

    /// Make `id` the active label.
    ///
    /// A non-additive select collapses the marked set to just `id`; an
    /// additive one extends it. Either way no element stays selected.
    pub fn select_label(&mut self, id: LabelId, additive: bool) {
        if !additive {
            self.marked.clear();
        }
        self.mark(id);
        self.label = Some(id);
        self.element = None;
    }

    /// Select an element through its owning label.
    pub fn select_element(&mut self, label: LabelId, element: ElementId) {
        if self.label != Some(label) {
            self.select_label(label, false);
        }
        self.element = Some(element);
    }

    /// Reset everything.
    pub fn clear(&mut self) {
        self.label = None;
        self.element = None;
        self.marked.clear();
    }

    pub fn mark(&mut self, id: LabelId) {
        if !self.is_marked(id) {
            self.marked.push(id);
        }
    }

    pub fn unmark(&mut self, id: LabelId) {
        self.marked.retain(|&m| m != id);
    }

    /// Change the active label without touching the marked set.
    ///
    /// The selected element is dropped if it lived on another label.
    pub fn set_active_label(&mut self, id: Option<LabelId>) {
        if self.label != id {
            self.element = None;
        }
        self.label = id;
    }

    /// Deselect the element, keeping the label.
    pub fn forget_element(&mut self) {
        self.element = None;
    }

    /// Drop references that no longer resolve in `sheet`.
    pub fn retain_valid(&mut self, sheet: &LabelSheet) {
        self.marked.retain(|&id| sheet.label(id).is_some());
        match self.label {
            Some(label) if sheet.label(label).is_none() => {
                self.label = None;
                self.element = None;
            }
            Some(label) => {
                if self.element.is_some_and(|e| sheet.element(label, e).is_none()) {
                    self.element = None;
                }
            }
            None => self.element = None,
        }
    }

    /// Summary for the selection indicator, shown only when several labels
    /// are marked.
    pub fn selection_info(&self) -> Option<String> {
        let count = self.marked_count();
        (count > 1).then(|| format!("{} labels selected", count))
    }
}
