//! Copy/paste of whole labels, and duplication across marked labels.

use crate::elements::{Element, ElementId};
use crate::error::{EditorError, EditorResult};
use crate::label::{Label, LabelId, renumber};
use crate::sheet::LabelSheet;
use serde::{Deserialize, Serialize};

/// Id stride between targets in a copy-to-many batch.
///
/// Element `i` pasted into label `t` gets `base + t * stride + i`, so labels
/// holding fewer than `stride` elements never collide.
pub const TARGET_ID_STRIDE: u64 = 1000;

/// Detached copy of a label's content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSnapshot {
    pub elements: Vec<Element>,
    pub background_color: String,
}

impl LabelSnapshot {
    pub fn of(label: &Label) -> Self {
        Self {
            elements: label.elements.clone(),
            background_color: label.background_color.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Write this content into `label`, numbering elements from `base`.
    fn apply_to(&self, label: &mut Label, base: ElementId) {
        label.replace_content(renumber(&self.elements, base), self.background_color.clone());
    }
}

/// Holds at most one copied label.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    copied: Option<LabelSnapshot>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&LabelSnapshot> {
        self.copied.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.copied.is_none()
    }

    /// Snapshot the `source` label.
    pub fn copy(&mut self, sheet: &LabelSheet, source: Option<LabelId>) -> EditorResult<()> {
        let source = source.ok_or(EditorError::NoSelection)?;
        let label = sheet.require(source)?;
        self.copied = Some(LabelSnapshot::of(label));
        log::info!("Copied label {} ({} elements)", source, label.elements.len());
        Ok(())
    }

    /// Replace `target`'s content with the copied label.
    ///
    /// Pasted elements get fresh ids. The caller must drop any element
    /// selection on `target`, since the old elements are gone.
    pub fn paste_into(&self, sheet: &mut LabelSheet, target: Option<LabelId>) -> EditorResult<()> {
        let target = target.ok_or(EditorError::NoSelection)?;
        let snapshot = self.copied.as_ref().ok_or(EditorError::EmptyClipboard)?;
        sheet.require(target)?;

        let base = sheet.ids_mut().reserve(snapshot.len() as u64)?;
        let label = sheet.require_mut(target)?;
        snapshot.apply_to(label, base);
        log::info!("Pasted {} elements into label {}", snapshot.len(), target);
        Ok(())
    }
}

/// Copy `source`'s content onto every other marked label.
///
/// Returns the ids of the labels that were overwritten, in marking order.
pub fn copy_to_many(
    sheet: &mut LabelSheet,
    source: Option<LabelId>,
    marked: &[LabelId],
) -> EditorResult<Vec<LabelId>> {
    let source = source.ok_or(EditorError::NoSelection)?;
    if marked.len() < 2 {
        return Err(EditorError::InsufficientSelection {
            selected: marked.len(),
        });
    }
    let targets: Vec<LabelId> = marked.iter().copied().filter(|&id| id != source).collect();
    if targets.is_empty() {
        return Err(EditorError::NoOtherTargets);
    }
    for &target in &targets {
        sheet.require(target)?;
    }
    let snapshot = LabelSnapshot::of(sheet.require(source)?);

    let max_target = targets.iter().copied().max().map_or(0, u64::from);
    let span = max_target
        .checked_mul(TARGET_ID_STRIDE)
        .and_then(|offset| offset.checked_add(snapshot.len() as u64))
        .ok_or(EditorError::IdSpaceExhausted)?;
    let base = sheet.ids_mut().reserve(span)?;

    for &target in &targets {
        let label = sheet.require_mut(target)?;
        snapshot.apply_to(label, base + u64::from(target) * TARGET_ID_STRIDE);
    }
    log::info!(
        "Copied label {} to {} labels ({} elements each)",
        source,
        targets.len(),
        snapshot.len()
    );
    Ok(targets)
}
