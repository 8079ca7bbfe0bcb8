//! Sheet sessions backed by a storage directory.

use crate::script::{ReplayReport, ScriptStep, run_script};
use anyhow::{Context, Result, bail};
use labelgrid_core::{Editor, EditorConfig, FileStorage, SheetDocument, Storage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration, read from an optional JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub editor: EditorConfig,
    /// Where sheets are kept. Defaults to the platform data directory.
    pub storage_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }
}

/// Short description of a stored sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetSummary {
    pub name: String,
    pub version: String,
    pub timestamp: String,
    pub labels: usize,
    pub used_labels: usize,
    pub elements: usize,
}

impl SheetSummary {
    pub fn of(name: &str, document: &SheetDocument) -> Self {
        Self {
            name: name.to_string(),
            version: document.version.clone(),
            timestamp: document.timestamp.clone(),
            labels: document.labels.len(),
            used_labels: document.labels.iter().filter(|l| !l.elements.is_empty()).count(),
            elements: document.element_count(),
        }
    }
}

impl fmt::Display for SheetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} labels ({} in use), {} elements, v{}, saved {}",
            self.name,
            self.labels,
            self.used_labels,
            self.elements,
            self.version,
            if self.timestamp.is_empty() { "unknown" } else { self.timestamp.as_str() }
        )
    }
}

/// Headless shell around the editor and a storage backend.
pub struct App<S: Storage> {
    config: AppConfig,
    storage: S,
}

impl App<FileStorage> {
    /// Open file storage at the configured (or default) location.
    pub fn open(config: AppConfig) -> Result<Self> {
        let storage = match &config.storage_dir {
            Some(dir) => FileStorage::new(dir.clone()),
            None => FileStorage::default_location(),
        }
        .context("Failed to open sheet storage")?;
        log::info!("Using sheet storage at {}", storage.base_path().display());
        Ok(Self::with_storage(config, storage))
    }
}

impl<S: Storage> App<S> {
    pub fn with_storage(config: AppConfig, storage: S) -> Self {
        Self { config, storage }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Fresh editor with the configured layout.
    pub fn new_editor(&self) -> Editor {
        Editor::new(self.config.editor.clone())
    }

    /// Create an empty sheet. Refuses to overwrite unless `force`.
    pub async fn create(&self, name: &str, force: bool) -> Result<SheetSummary> {
        if !force && self.storage.exists(name).await? {
            bail!("Sheet '{}' already exists", name);
        }
        let editor = self.new_editor();
        self.save(name, &editor).await
    }

    /// Load a stored sheet into a new editor.
    pub async fn open_sheet(&self, name: &str) -> Result<Editor> {
        let document = self
            .storage
            .load(name)
            .await
            .with_context(|| format!("Failed to load sheet '{}'", name))?;
        let mut editor = self.new_editor();
        editor.load_document(document);
        editor.take_events();
        Ok(editor)
    }

    pub async fn save(&self, name: &str, editor: &Editor) -> Result<SheetSummary> {
        let document = editor.save_document();
        self.storage
            .save(name, &document)
            .await
            .with_context(|| format!("Failed to save sheet '{}'", name))?;
        Ok(SheetSummary::of(name, &document))
    }

    pub async fn summary(&self, name: &str) -> Result<SheetSummary> {
        let document = self
            .storage
            .load(name)
            .await
            .with_context(|| format!("Failed to load sheet '{}'", name))?;
        Ok(SheetSummary::of(name, &document))
    }

    pub async fn list(&self) -> Result<Vec<String>> {
        Ok(self.storage.list().await?)
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        Ok(self.storage.delete(name).await?)
    }

    /// Replay a script against a stored sheet and save the result, under
    /// `save_as` if given.
    pub async fn replay(
        &self,
        name: &str,
        steps: &[ScriptStep],
        base_dir: &Path,
        save_as: Option<&str>,
    ) -> Result<(ReplayReport, SheetSummary)> {
        let mut editor = self.open_sheet(name).await?;
        let report = run_script(&mut editor, steps, base_dir)?;
        let summary = self.save(save_as.unwrap_or(name), &editor).await?;
        Ok((report, summary))
    }

    /// Store a document file under `name`. Malformed files are rejected
    /// before anything is written.
    pub async fn import(&self, path: &Path, name: &str) -> Result<SheetSummary> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let document = SheetDocument::from_json(&json)
            .with_context(|| format!("Failed to import {}", path.display()))?;
        let mut editor = self.new_editor();
        editor.load_document(document);
        self.save(name, &editor).await
    }

    /// Write a stored sheet out as a standalone document file.
    pub async fn export(&self, name: &str, path: &Path) -> Result<()> {
        let editor = self.open_sheet(name).await?;
        let json = editor.to_json().context("Failed to serialize sheet")?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelgrid_core::MemoryStorage;
    use pollster::block_on;
    use tempfile::tempdir;

    fn app() -> App<MemoryStorage> {
        let mut config = AppConfig::default();
        config.editor.label_count = 6;
        App::with_storage(config, MemoryStorage::new())
    }

    #[test]
    fn test_config_defaults_without_file() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.editor.label_count, 30);
        assert!(config.storage_dir.is_none());
    }

    #[test]
    fn test_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("labelgrid.json");
        fs::write(&path, r#"{"editor": {"label_count": 8}, "storage_dir": "/tmp/sheets"}"#).unwrap();
        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.editor.label_count, 8);
        assert_eq!(config.storage_dir, Some(PathBuf::from("/tmp/sheets")));
    }

    #[test]
    fn test_create_refuses_overwrite() {
        let app = app();
        let summary = block_on(app.create("a", false)).unwrap();
        assert_eq!(summary.labels, 6);
        assert_eq!(summary.elements, 0);
        assert!(block_on(app.create("a", false)).is_err());
        assert!(block_on(app.create("a", true)).is_ok());
    }

    #[test]
    fn test_replay_saves_result() {
        let app = app();
        block_on(app.create("base", false)).unwrap();
        let steps = vec![
            ScriptStep::SelectLabel { label: 1, additive: false },
            ScriptStep::AddText,
            ScriptStep::Copy,
            ScriptStep::SelectLabel { label: 3, additive: true },
            ScriptStep::SelectLabel { label: 1, additive: true },
            ScriptStep::CopyToSelected,
        ];
        let (report, summary) =
            block_on(app.replay("base", &steps, Path::new("."), Some("out"))).unwrap();
        assert!(report.rejected.is_empty());
        assert_eq!(summary.elements, 2);
        assert_eq!(summary.used_labels, 2);

        assert_eq!(block_on(app.summary("base")).unwrap().elements, 0);
        assert_eq!(block_on(app.list()).unwrap(), vec!["base", "out"]);
    }

    #[test]
    fn test_import_export() {
        let dir = tempdir().unwrap();
        let app = app();
        let mut editor = app.new_editor();
        editor.select_label(0, false).unwrap();
        editor.add_text().unwrap();
        let source = dir.path().join("in.json");
        fs::write(&source, editor.to_json().unwrap()).unwrap();

        let summary = block_on(app.import(&source, "imported")).unwrap();
        assert_eq!(summary.elements, 1);

        let target = dir.path().join("out.json");
        block_on(app.export("imported", &target)).unwrap();
        let exported = SheetDocument::from_json(&fs::read_to_string(&target).unwrap()).unwrap();
        assert_eq!(exported.labels, editor.labels());
    }

    #[test]
    fn test_import_rejects_malformed() {
        let dir = tempdir().unwrap();
        let app = app();
        let source = dir.path().join("bad.json");
        fs::write(&source, "[1, 2, 3]").unwrap();
        assert!(block_on(app.import(&source, "bad")).is_err());
        assert!(!block_on(app.storage().exists("bad")).unwrap());
    }

    #[test]
    fn test_file_backed_app() {
        let dir = tempdir().unwrap();
        let config = AppConfig {
            storage_dir: Some(dir.path().to_path_buf()),
            ..AppConfig::default()
        };
        let app = App::open(config).unwrap();
        block_on(app.create("sheet", false)).unwrap();
        assert!(dir.path().join("sheet.json").exists());
        let editor = block_on(app.open_sheet("sheet")).unwrap();
        assert_eq!(editor.labels().len(), 30);
    }
}
