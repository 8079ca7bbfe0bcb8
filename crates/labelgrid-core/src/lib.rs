//! LabelGrid Core Library
//!
//! Data model and interaction engine for the LabelGrid label sheet editor:
//! labels holding text and image elements, selection, drag/resize with
//! center snapping, marquee selection, and label copy/paste. Rendering is
//! left to the host; it consumes [`EditorEvent`]s and reads the model.

pub mod clipboard;
pub mod config;
pub mod document;
pub mod editor;
pub mod elements;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod input;
pub mod interaction;
pub mod label;
pub mod layout;
pub mod selection;
pub mod sheet;
pub mod snap;
pub mod storage;

pub use clipboard::{Clipboard, LabelSnapshot};
pub use config::EditorConfig;
pub use document::SheetDocument;
pub use editor::{Editor, EditorEvent};
pub use elements::{Element, ElementId, ImageElement, ImagePatch, TextAlign, TextElement, TextPatch};
pub use error::{EditorError, EditorResult};
pub use input::{Key, KeyEvent, Modifiers, PointerEvent};
pub use interaction::Interaction;
pub use label::{Label, LabelId};
pub use layout::{HitTarget, SheetLayout};
pub use selection::Selection;
pub use sheet::LabelSheet;
pub use snap::{Guides, SnapResult};
pub use storage::{MemoryStorage, Storage, StorageError, StorageResult};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
