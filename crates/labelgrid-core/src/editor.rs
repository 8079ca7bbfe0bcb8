//! The editor: owns the sheet and routes input to the active gesture.
//!
//! All state lives here. Gestures and the selection hold label/element ids,
//! which are resolved against the sheet on every event, so replacing a
//! label's content (paste, copy-to-many, load) cannot leave a dangling
//! reference behind; at worst an id stops resolving and the event is a no-op.

use crate::clipboard::{Clipboard, copy_to_many};
use crate::config::EditorConfig;
use crate::document::SheetDocument;
use crate::elements::{Element, ElementId, ImageElement, ImagePatch, TextElement, TextPatch};
use crate::error::{EditorError, EditorResult};
use crate::input::{Key, KeyEvent, Modifiers, PointerEvent};
use crate::interaction::{DragState, Interaction, MarqueeState, ResizeState};
use crate::label::{Label, LabelId};
use crate::layout::{HitTarget, SheetLayout};
use crate::selection::Selection;
use crate::sheet::LabelSheet;
use crate::snap::{Guides, snap_to_center};
use kurbo::{Point, Rect};

/// Notifications for the rendering and property-panel collaborators.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// A label's elements or background changed and it should be redrawn.
    LabelChanged(LabelId),
    /// The whole sheet was replaced (load, clear all).
    SheetReplaced,
    /// Selected label, element or marked set changed.
    SelectionChanged,
    /// Center guides to show on a label while dragging.
    GuidesChanged { label: LabelId, guides: Guides },
    /// Marquee rectangle to draw, or `None` to hide it.
    MarqueeChanged(Option<Rect>),
}

/// A label sheet editing session.
#[derive(Debug, Clone)]
pub struct Editor {
    config: EditorConfig,
    sheet: LabelSheet,
    selection: Selection,
    clipboard: Clipboard,
    interaction: Interaction,
    /// Guides currently shown, and on which label.
    guides: Option<(LabelId, Guides)>,
    events: Vec<EditorEvent>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Start a session with `config.label_count` empty labels.
    pub fn new(config: EditorConfig) -> Self {
        let sheet = LabelSheet::new(config.label_count, config.default_background.clone());
        Self {
            config,
            sheet,
            selection: Selection::new(),
            clipboard: Clipboard::new(),
            interaction: Interaction::Idle,
            guides: None,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn layout(&self) -> &SheetLayout {
        &self.config.layout
    }

    pub fn sheet(&self) -> &LabelSheet {
        &self.sheet
    }

    pub fn labels(&self) -> &[Label] {
        self.sheet.labels()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// Guides currently displayed, if any.
    pub fn guides(&self) -> Option<(LabelId, Guides)> {
        self.guides
    }

    pub fn selected_label(&self) -> Option<&Label> {
        self.sheet.label(self.selection.label()?)
    }

    pub fn selected_element(&self) -> Option<&Element> {
        let (label, element) = self.selection.selected_element()?;
        self.sheet.element(label, element)
    }

    /// Text for the multi-selection indicator.
    pub fn selection_info(&self) -> Option<String> {
        self.selection.selection_info()
    }

    /// Drain pending collaborator notifications.
    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: EditorEvent) {
        self.events.push(event);
    }

    // --- Input dispatch ---

    /// Route a pointer event to the gesture it belongs to.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position, modifiers } => self.pointer_down(position, modifiers),
            PointerEvent::Move {
                position,
                text_selection_active,
            } => self.pointer_move(position, text_selection_active),
            PointerEvent::Up { .. } => self.pointer_up(),
        }
    }

    fn pointer_down(&mut self, position: Point, modifiers: Modifiers) {
        if !self.interaction.is_idle() {
            // A press without a matching release; close the old gesture first.
            self.pointer_up();
        }

        let hit = self.config.layout.hit_test(self.sheet.labels(), position);
        log::debug!("Pointer down at {:?} hit {:?}", position, hit);

        match hit {
            HitTarget::Outside => {
                if !self.selection.is_empty() {
                    self.selection.clear();
                    self.emit(EditorEvent::SelectionChanged);
                }
            }
            HitTarget::LabelBackground(label) => {
                self.interaction = Interaction::Marquee(MarqueeState::new(
                    position,
                    Some(label),
                    modifiers.multi_select(),
                    self.config.marquee_threshold,
                ));
            }
            HitTarget::ElementBody {
                label,
                element,
                editable_text,
            } => {
                let Some(origin) = self.sheet.element(label, element).map(|e| e.frame().origin())
                else {
                    return;
                };
                self.select_element(label, element);
                self.interaction = Interaction::Drag(DragState::new(
                    label,
                    element,
                    position,
                    origin,
                    editable_text,
                    self.config.drag_threshold,
                ));
            }
            HitTarget::ResizeHandle { label, element } => {
                let Some(size) = self.sheet.element(label, element).map(|e| e.frame().size())
                else {
                    return;
                };
                self.select_element(label, element);
                self.interaction =
                    Interaction::Resize(ResizeState::new(label, element, position, size));
            }
        }
    }

    fn pointer_move(&mut self, position: Point, text_selection_active: bool) {
        let mut interaction = std::mem::take(&mut self.interaction);
        match &mut interaction {
            Interaction::Idle => {}
            Interaction::Drag(drag) => {
                if let Some(origin) = drag.update(position, text_selection_active) {
                    self.move_element(drag.label, drag.element, origin);
                }
            }
            Interaction::Resize(resize) => {
                let size = resize.update(position);
                if let Some(element) = self.sheet.element_mut(resize.label, resize.element) {
                    element.frame_mut().set_size(size.width, size.height);
                    self.emit(EditorEvent::LabelChanged(resize.label));
                }
            }
            Interaction::Marquee(marquee) => {
                let layout = self.config.layout;
                let bounds: Vec<(LabelId, Rect)> = self
                    .sheet
                    .labels()
                    .iter()
                    .map(|l| (l.id, layout.label_bounds(l.id)))
                    .collect();
                let before = self.selection.clone();
                if let Some(rect) = marquee.update(position, bounds, &mut self.selection) {
                    self.emit(EditorEvent::MarqueeChanged(Some(rect)));
                    if self.selection != before {
                        self.emit(EditorEvent::SelectionChanged);
                    }
                }
            }
        }
        self.interaction = interaction;
    }

    fn pointer_up(&mut self) {
        let interaction = std::mem::take(&mut self.interaction);
        log::debug!("Pointer up, ending {}", interaction.name());

        if let Interaction::Marquee(marquee) = &interaction {
            marquee.finish(&mut self.selection);
            if marquee.has_dragged {
                self.emit(EditorEvent::MarqueeChanged(None));
            }
            self.emit(EditorEvent::SelectionChanged);
        }

        if let Some((label, _)) = self.guides.take() {
            self.emit(EditorEvent::GuidesChanged {
                label,
                guides: Guides::NONE,
            });
        }
    }

    /// Move an element to `origin`, then correct it toward the label center.
    fn move_element(&mut self, label: LabelId, element: ElementId, origin: Point) {
        let content = self.config.layout.content_size();
        let tolerance = self.config.snap_tolerance;
        let Some(element) = self.sheet.element_mut(label, element) else {
            return;
        };
        let frame = element.frame_mut();
        frame.set_origin(origin);
        let snap = snap_to_center(frame, content, tolerance);
        frame.set_origin(snap.point);
        self.emit(EditorEvent::LabelChanged(label));

        let guides = snap.guides();
        let shown = guides.any().then_some((label, guides));
        if shown != self.guides {
            self.guides = shown;
            self.emit(EditorEvent::GuidesChanged { label, guides });
        }
    }

    /// Handle a key press.
    ///
    /// Escape clears the selection. Delete and Backspace remove the selected
    /// element unless a text surface has focus; with nothing selected they do
    /// nothing.
    pub fn handle_key(&mut self, event: KeyEvent) {
        match event.key {
            Key::Escape => self.clear_selection(),
            Key::Delete | Key::Backspace if !event.editing_focus => {
                if self.selection.element().is_some() {
                    if let Err(e) = self.delete_selected_element() {
                        log::warn!("Delete rejected: {}", e);
                    }
                }
            }
            _ => {}
        }
    }

    // --- Selection ---

    /// Select a label, as a click on its background would.
    pub fn select_label(&mut self, label: LabelId, additive: bool) -> EditorResult<()> {
        self.sheet.require(label)?;
        self.selection.select_label(label, additive);
        self.emit(EditorEvent::SelectionChanged);
        Ok(())
    }

    fn select_element(&mut self, label: LabelId, element: ElementId) {
        self.selection.select_element(label, element);
        self.emit(EditorEvent::SelectionChanged);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.emit(EditorEvent::SelectionChanged);
    }

    /// Make sure some label is active, falling back to the first one.
    pub fn ensure_selected_label(&mut self) -> EditorResult<LabelId> {
        if let Some(label) = self.selection.label() {
            return Ok(label);
        }
        let first = self.sheet.first_label_id().ok_or(EditorError::NoSelection)?;
        self.select_label(first, false)?;
        Ok(first)
    }

    // --- Commands ---

    /// Add a default text element to the selected label and select it.
    pub fn add_text(&mut self) -> EditorResult<ElementId> {
        let label = self.selection.label().ok_or(EditorError::NoSelection)?;
        self.add_element(label, Element::Text(TextElement::default()))
    }

    /// Add an image from raw file bytes.
    pub fn add_image(&mut self, data: &[u8]) -> EditorResult<ElementId> {
        let image = ImageElement::from_bytes(data).ok_or(EditorError::UnsupportedImage)?;
        let label = self.ensure_selected_label()?;
        self.add_element(label, Element::Image(image))
    }

    /// Add an image referencing an existing source.
    pub fn add_image_src(&mut self, src: impl Into<String>) -> EditorResult<ElementId> {
        let label = self.ensure_selected_label()?;
        self.add_element(label, Element::Image(ImageElement::new(src)))
    }

    fn add_element(&mut self, label: LabelId, element: Element) -> EditorResult<ElementId> {
        let id = self.sheet.add_element(label, element)?;
        log::debug!("Added element {} to label {}", id, label);
        self.emit(EditorEvent::LabelChanged(label));
        self.select_element(label, id);
        Ok(id)
    }

    /// Remove the selected element.
    pub fn delete_selected_element(&mut self) -> EditorResult<Element> {
        let (label, element) = self
            .selection
            .selected_element()
            .ok_or(EditorError::NoElementSelected)?;
        let removed = self
            .sheet
            .remove_element(label, element)
            .ok_or(EditorError::NoElementSelected)?;
        self.selection.forget_element();
        self.emit(EditorEvent::LabelChanged(label));
        self.emit(EditorEvent::SelectionChanged);
        Ok(removed)
    }

    /// Empty every label and drop the selection.
    pub fn clear_all(&mut self) {
        self.sheet.clear_all();
        self.selection.clear();
        self.interaction = Interaction::Idle;
        self.guides = None;
        log::info!("Cleared all {} labels", self.sheet.len());
        self.emit(EditorEvent::SheetReplaced);
        self.emit(EditorEvent::SelectionChanged);
    }

    pub fn copy_label(&mut self) -> EditorResult<()> {
        self.clipboard
            .copy(&self.sheet, self.selection.label())
            .inspect_err(|e| log::warn!("Copy rejected: {}", e))
    }

    /// Replace the selected label's content with the copied label.
    pub fn paste_label(&mut self) -> EditorResult<()> {
        let target = self.selection.label();
        self.clipboard
            .paste_into(&mut self.sheet, target)
            .inspect_err(|e| log::warn!("Paste rejected: {}", e))?;
        self.selection.forget_element();
        if let Some(label) = target {
            self.emit(EditorEvent::LabelChanged(label));
        }
        self.emit(EditorEvent::SelectionChanged);
        Ok(())
    }

    /// Copy the selected label onto every other marked label.
    pub fn copy_to_selected(&mut self) -> EditorResult<Vec<LabelId>> {
        let source = self.selection.label();
        let marked = self.selection.marked().to_vec();
        let targets = copy_to_many(&mut self.sheet, source, &marked)
            .inspect_err(|e| log::warn!("Copy to selected rejected: {}", e))?;
        for &label in &targets {
            self.emit(EditorEvent::LabelChanged(label));
        }
        Ok(targets)
    }

    /// Set the selected label's background color.
    pub fn set_background(&mut self, color: impl Into<String>) -> EditorResult<()> {
        let label = self.selection.label().ok_or(EditorError::NoSelection)?;
        self.sheet.require_mut(label)?.set_background(color);
        self.emit(EditorEvent::LabelChanged(label));
        Ok(())
    }

    /// Apply property-panel edits to the selected text element.
    pub fn update_text(&mut self, patch: &TextPatch) -> EditorResult<()> {
        let (label, element) = self
            .selection
            .selected_element()
            .ok_or(EditorError::NoElementSelected)?;
        let text = self
            .sheet
            .element_mut(label, element)
            .and_then(Element::as_text_mut)
            .ok_or(EditorError::NoElementSelected)?;
        text.apply(patch);
        self.emit(EditorEvent::LabelChanged(label));
        Ok(())
    }

    /// Apply property-panel edits to the selected image element.
    pub fn update_image(&mut self, patch: &ImagePatch) -> EditorResult<()> {
        let (label, element) = self
            .selection
            .selected_element()
            .ok_or(EditorError::NoElementSelected)?;
        let image = self
            .sheet
            .element_mut(label, element)
            .and_then(Element::as_image_mut)
            .ok_or(EditorError::NoElementSelected)?;
        image.apply(patch);
        self.emit(EditorEvent::LabelChanged(label));
        Ok(())
    }

    // --- Persistence ---

    /// Snapshot the sheet as a document.
    pub fn save_document(&self) -> SheetDocument {
        SheetDocument::capture(&self.sheet)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        self.save_document().to_json()
    }

    /// Replace the sheet with a document parsed from `json`.
    ///
    /// On error the current sheet is untouched.
    pub fn load_json(&mut self, json: &str) -> EditorResult<()> {
        let document = SheetDocument::from_json(json)
            .inspect_err(|e| log::warn!("Load rejected: {}", e))?;
        self.load_document(document);
        Ok(())
    }

    /// Replace the sheet with `document` and clear the selection.
    pub fn load_document(&mut self, document: SheetDocument) {
        log::info!(
            "Loading document v{} with {} labels",
            document.version,
            document.labels.len()
        );
        self.sheet = document.into_sheet(self.config.default_background.clone());
        self.selection.clear();
        self.interaction = Interaction::Idle;
        self.guides = None;
        self.emit(EditorEvent::SheetReplaced);
        self.emit(EditorEvent::SelectionChanged);
    }
}
