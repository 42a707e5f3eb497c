//! Write-behind persistence of the editor snapshot.
//!
//! Every mutation hands a serialized snapshot to a background writer thread.
//! The writer drains whatever is queued and stores only the newest snapshot,
//! so a burst of pointer moves costs one write instead of one per move.

use crate::canvas::{EditorConfig, EditorState};
use crate::storage::{Storage, StorageError, StorageResult};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::{self, JoinHandle};

/// Commands sent to the writer thread.
enum SaveCommand {
    Save(String),
    Flush(Sender<()>),
}

/// Background snapshot writer for one storage key.
///
/// Write failures are logged and never reported back to the editor; the next
/// snapshot simply tries again. Dropping the saver waits for pending writes.
pub struct AutoSaver {
    key: String,
    /// Channel to send commands to the writer thread.
    cmd_tx: Option<Sender<SaveCommand>>,
    /// Handle to the writer thread.
    thread: Option<JoinHandle<()>>,
}

impl AutoSaver {
    /// Start a writer thread storing snapshots under `key`.
    pub fn spawn<S: Storage + 'static>(storage: Arc<S>, key: impl Into<String>) -> StorageResult<Self> {
        let key = key.into();
        let (cmd_tx, cmd_rx) = channel::<SaveCommand>();

        let thread_key = key.clone();
        let handle = thread::Builder::new()
            .name("layoutsmith-autosave".to_string())
            .spawn(move || run_writer(storage.as_ref(), &thread_key, cmd_rx))
            .map_err(|e| StorageError::Io(format!("Failed to start autosave thread: {}", e)))?;

        Ok(Self {
            key,
            cmd_tx: Some(cmd_tx),
            thread: Some(handle),
        })
    }

    /// Storage key snapshots are written to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Queue a snapshot of `state` for writing.
    pub fn persist(&self, state: &EditorState) {
        match snapshot(state) {
            Ok(json) => self.send(SaveCommand::Save(json)),
            Err(e) => log::error!("Skipping autosave for '{}': {}", self.key, e),
        }
    }

    /// Block until every snapshot queued so far has been written (or failed).
    pub fn flush(&self) {
        let (ack_tx, ack_rx) = channel();
        self.send(SaveCommand::Flush(ack_tx));
        // An error here means the writer is gone; nothing is left to wait for.
        let _ = ack_rx.recv();
    }

    fn send(&self, command: SaveCommand) {
        let sent = self
            .cmd_tx
            .as_ref()
            .is_some_and(|tx| tx.send(command).is_ok());
        if !sent {
            log::error!("Autosave writer for '{}' is not running", self.key);
        }
    }
}

impl Drop for AutoSaver {
    fn drop(&mut self) {
        // Closing the channel lets the writer finish its queue and exit.
        self.cmd_tx.take();
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                log::error!("Autosave writer for '{}' panicked", self.key);
            }
        }
    }
}

/// Serialize `state` for storage.
pub fn snapshot(state: &EditorState) -> StorageResult<String> {
    state.to_json().map_err(|e| StorageError::Serialization(e.to_string()))
}

fn run_writer<S: Storage + ?Sized>(storage: &S, key: &str, cmd_rx: Receiver<SaveCommand>) {
    log::debug!("Autosave writer started for '{}'", key);

    while let Ok(first) = cmd_rx.recv() {
        let mut latest = None;
        let mut waiting = Vec::new();

        for command in std::iter::once(first).chain(cmd_rx.try_iter()) {
            match command {
                SaveCommand::Save(json) => latest = Some(json),
                SaveCommand::Flush(ack) => waiting.push(ack),
            }
        }

        if let Some(json) = latest {
            match storage.set(key, &json) {
                Ok(()) => log::debug!("Saved snapshot to '{}' ({} bytes)", key, json.len()),
                Err(e) => log::error!("Failed to save snapshot to '{}': {}", key, e),
            }
        }

        for ack in waiting {
            let _ = ack.send(());
        }
    }

    log::debug!("Autosave writer for '{}' exiting", key);
}

/// Load the editor state stored under `key`.
///
/// Falls back to the sample document when nothing is stored, when the stored
/// snapshot does not parse, or when the backend cannot be read.
pub fn load_state<S: Storage + ?Sized>(storage: &S, key: &str, config: &EditorConfig) -> EditorState {
    match storage.get(key) {
        Ok(Some(json)) => match EditorState::from_json(&json) {
            Ok(state) => {
                log::info!("Restored {} elements from '{}'", state.len(), key);
                state
            }
            Err(e) => {
                log::warn!("Ignoring malformed snapshot under '{}': {}", key, e);
                EditorState::sample_for(config)
            }
        },
        Ok(None) => {
            log::info!("No saved state under '{}', starting from the sample document", key);
            EditorState::sample_for(config)
        }
        Err(e) => {
            log::error!("Failed to read '{}': {}", key, e);
            EditorState::sample_for(config)
        }
    }
}
