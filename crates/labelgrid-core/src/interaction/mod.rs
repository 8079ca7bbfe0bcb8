//! Pointer gesture state machines.
//!
//! Exactly one gesture is live at a time, chosen by what the initiating
//! pointer-down landed on. Gestures refer to labels and elements by id; the
//! editor resolves those ids against the sheet on every event.

mod drag;
mod marquee;
mod resize;

pub use drag::{DragPhase, DragState};
pub use marquee::MarqueeState;
pub use resize::ResizeState;

/// The gesture currently in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Interaction {
    #[default]
    Idle,
    /// Moving an element (pressed on its body).
    Drag(DragState),
    /// Resizing an element (pressed on its handle).
    Resize(ResizeState),
    /// Rubber-band selection over labels (pressed on label background).
    Marquee(MarqueeState),
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }

    /// Short name for log output.
    pub fn name(&self) -> &'static str {
        match self {
            Interaction::Idle => "idle",
            Interaction::Drag(_) => "drag",
            Interaction::Resize(_) => "resize",
            Interaction::Marquee(_) => "marquee",
        }
    }
}
