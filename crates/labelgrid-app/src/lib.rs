//! LabelGrid Application
//!
//! Headless shell around the label sheet editor: keeps sheets in a storage
//! directory and drives editing sessions from JSON scripts.

mod app;
mod cli;
mod script;

pub use app::{App, AppConfig, SheetSummary};
pub use cli::{Args, Command, run};
pub use script::{
    ReplayReport, ScriptError, ScriptStep, apply_step, load_script, parse_script, run_script,
};
