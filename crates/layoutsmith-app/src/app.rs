//! Command-line session shell around the core editor.

use crate::replay::{self, ReplaySummary};
use layoutsmith_core::storage::load_state;
use layoutsmith_core::{
    Editor, EditorConfig, EditorState, ExportFormat, FileStorage, STORAGE_KEY, Storage, StorageError, export_html,
    export_json,
};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by the command-line shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding stored snapshots. `None` uses the platform default.
    pub data_dir: Option<PathBuf>,
    pub editor: EditorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            editor: EditorConfig {
                storage_key: STORAGE_KEY.to_string(),
                ..EditorConfig::default()
            },
        }
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    storage: Arc<FileStorage>,
}

impl App {
    /// Open the snapshot store described by `config`.
    pub fn open(config: AppConfig) -> Result<Self, CliError> {
        let storage = match &config.data_dir {
            Some(dir) => FileStorage::new(dir.clone())?,
            None => FileStorage::default_location()?,
        };
        log::info!("Using snapshot store at {}", storage.base_path().display());
        Ok(Self {
            config,
            storage: Arc::new(storage),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn key(&self) -> &str {
        &self.config.editor.storage_key
    }

    /// Current stored state, or the sample document if there is none.
    pub fn load(&self) -> EditorState {
        load_state(self.storage.as_ref(), self.key(), &self.config.editor)
    }

    /// Replay a JSON-lines event log against the stored session.
    pub fn replay<R: BufRead>(&self, reader: R) -> Result<ReplaySummary, CliError> {
        let mut editor = Editor::open(self.storage.clone(), self.config.editor.clone())?;
        let summary = replay::replay(&mut editor, reader)?;
        editor.flush();
        Ok(summary)
    }

    /// Render the stored session in `format`.
    pub fn export(&self, format: ExportFormat) -> Result<String, CliError> {
        let state = self.load();
        let output = match format {
            ExportFormat::Json => export_json(&state.elements)?,
            ExportFormat::Html => export_html(&state.elements, state.canvas_width, state.canvas_height),
        };
        Ok(output)
    }

    /// Remove the stored snapshot so the next session starts from the sample.
    pub fn reset(&self) -> Result<(), CliError> {
        self.storage.remove(self.key())?;
        log::info!("Removed stored state '{}'", self.key());
        Ok(())
    }
}
