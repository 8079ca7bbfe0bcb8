//! Scripted input for headless editing sessions.
//!
//! A script is a JSON array of steps. Pointer and key steps go through the
//! editor's event dispatch exactly as a GUI would send them; the remaining
//! steps are toolbar and property-panel commands.

use labelgrid_core::{
    Editor, EditorError, ImagePatch, Key, KeyEvent, LabelId, Modifiers, PointerEvent, TextPatch,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures that stop a replay. Rejected editor commands do not.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        meta: bool,
    },
    PointerMove {
        x: f64,
        y: f64,
        /// Text is selected inside the element under the pointer.
        #[serde(default)]
        text_selected: bool,
    },
    PointerUp {
        x: f64,
        y: f64,
    },
    Key {
        key: String,
        /// A text field has focus.
        #[serde(default)]
        editing: bool,
    },
    SelectLabel {
        label: LabelId,
        #[serde(default)]
        additive: bool,
    },
    AddText,
    /// Image file, relative to the script's directory.
    AddImage {
        path: PathBuf,
    },
    Delete,
    ClearAll,
    Copy,
    Paste,
    CopyToSelected,
    SetBackground {
        color: String,
    },
    EditText(TextPatch),
    /// Opacity as typed into the panel, in percent.
    EditImage {
        opacity: String,
    },
}

/// Summary of a finished replay.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReplayReport {
    pub steps: usize,
    /// Steps the editor refused, by index, with the message shown to the user.
    pub rejected: Vec<(usize, EditorError)>,
    /// Collaborator notifications emitted over the whole run.
    pub events: usize,
}

/// Parse a script from JSON text.
pub fn parse_script(json: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a script file.
pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>, ScriptError> {
    let json = fs::read_to_string(path).map_err(|source| ScriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&json)
}

/// Apply one step. `Ok(Err(_))` is a command the editor rejected.
pub fn apply_step(
    editor: &mut Editor,
    step: &ScriptStep,
    base_dir: &Path,
) -> Result<Result<(), EditorError>, ScriptError> {
    let result = match step {
        ScriptStep::PointerDown { x, y, ctrl, meta } => {
            let modifiers = Modifiers {
                ctrl: *ctrl,
                meta: *meta,
                ..Modifiers::NONE
            };
            editor.handle_pointer(PointerEvent::Down {
                position: Point::new(*x, *y),
                modifiers,
            });
            Ok(())
        }
        ScriptStep::PointerMove { x, y, text_selected } => {
            editor.handle_pointer(PointerEvent::Move {
                position: Point::new(*x, *y),
                text_selection_active: *text_selected,
            });
            Ok(())
        }
        ScriptStep::PointerUp { x, y } => {
            editor.handle_pointer(PointerEvent::Up {
                position: Point::new(*x, *y),
            });
            Ok(())
        }
        ScriptStep::Key { key, editing } => {
            editor.handle_key(KeyEvent {
                key: Key::from_name(key),
                editing_focus: *editing,
            });
            Ok(())
        }
        ScriptStep::SelectLabel { label, additive } => editor.select_label(*label, *additive),
        ScriptStep::AddText => editor.add_text().map(drop),
        ScriptStep::AddImage { path } => {
            let path = base_dir.join(path);
            let data = fs::read(&path).map_err(|source| ScriptError::Io { path, source })?;
            editor.add_image(&data).map(drop)
        }
        ScriptStep::Delete => editor.delete_selected_element().map(drop),
        ScriptStep::ClearAll => {
            editor.clear_all();
            Ok(())
        }
        ScriptStep::Copy => editor.copy_label(),
        ScriptStep::Paste => editor.paste_label(),
        ScriptStep::CopyToSelected => editor.copy_to_selected().map(drop),
        ScriptStep::SetBackground { color } => editor.set_background(color.as_str()),
        ScriptStep::EditText(patch) => editor.update_text(patch),
        ScriptStep::EditImage { opacity } => editor.update_image(&ImagePatch::from_input(opacity)),
    };
    Ok(result)
}

/// Run every step in order. Rejected commands are collected, not fatal.
pub fn run_script(
    editor: &mut Editor,
    steps: &[ScriptStep],
    base_dir: &Path,
) -> Result<ReplayReport, ScriptError> {
    let mut report = ReplayReport::default();
    for (index, step) in steps.iter().enumerate() {
        if let Err(err) = apply_step(editor, step, base_dir)? {
            log::warn!("Step {} ({:?}) rejected: {}", index, step, err);
            report.rejected.push((index, err));
        }
        report.events += editor.take_events().len();
        report.steps += 1;
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelgrid_core::EditorConfig;
    use tempfile::tempdir;

    #[test]
    fn test_parse_steps() {
        let steps = parse_script(
            r##"[
                {"action": "select_label", "label": 2},
                {"action": "add_text"},
                {"action": "edit_text", "content": "Hi", "fontSize": 20},
                {"action": "pointer_down", "x": 1, "y": 2, "ctrl": true},
                {"action": "key", "key": "Escape"},
                {"action": "set_background", "color": "#eeeeee"}
            ]"##,
        )
        .unwrap();
        assert_eq!(steps.len(), 6);
        assert_eq!(
            steps[2],
            ScriptStep::EditText(TextPatch {
                content: Some("Hi".into()),
                font_size: Some(20),
                ..TextPatch::default()
            })
        );
        assert_eq!(
            steps[3],
            ScriptStep::PointerDown { x: 1.0, y: 2.0, ctrl: true, meta: false }
        );
    }

    #[test]
    fn test_unknown_action_is_parse_error() {
        assert!(matches!(
            parse_script(r#"[{"action": "fly"}]"#),
            Err(ScriptError::Parse(_))
        ));
    }

    #[test]
    fn test_rejected_steps_are_reported() {
        let mut editor = Editor::new(EditorConfig::default());
        let steps = vec![
            ScriptStep::AddText,
            ScriptStep::Paste,
            ScriptStep::SelectLabel { label: 0, additive: false },
            ScriptStep::AddText,
        ];
        let report = run_script(&mut editor, &steps, Path::new(".")).unwrap();
        assert_eq!(report.steps, 4);
        assert_eq!(
            report.rejected,
            vec![(0, EditorError::NoSelection), (1, EditorError::NoSelection)]
        );
        assert_eq!(editor.sheet().label(0).unwrap().elements.len(), 1);
        assert!(report.events > 0);
    }

    #[test]
    fn test_add_image_reads_relative_path() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("logo.png"), [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]).unwrap();
        let mut editor = Editor::new(EditorConfig::default());

        let steps = vec![ScriptStep::AddImage { path: "logo.png".into() }];
        let report = run_script(&mut editor, &steps, dir.path()).unwrap();
        assert!(report.rejected.is_empty());
        assert!(editor.selected_element().and_then(|e| e.as_image()).is_some());

        let missing = vec![ScriptStep::AddImage { path: "nope.png".into() }];
        assert!(matches!(
            run_script(&mut editor, &missing, dir.path()),
            Err(ScriptError::Io { .. })
        ));
    }

    #[test]
    fn test_pointer_steps_drive_marquee() {
        let mut editor = Editor::new(EditorConfig::default());
        let steps = parse_script(
            r#"[
                {"action": "pointer_down", "x": 20, "y": 20},
                {"action": "pointer_move", "x": 400, "y": 30},
                {"action": "pointer_up", "x": 400, "y": 30}
            ]"#,
        )
        .unwrap();
        run_script(&mut editor, &steps, Path::new(".")).unwrap();
        assert_eq!(editor.selection().marked(), &[0, 1]);
        assert_eq!(editor.selection().label(), Some(1));
    }
}
