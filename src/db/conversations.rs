//! Append-only, file-backed conversation transcripts.
//!
//! One JSON-Lines file per chat id under the configured directory; each
//! line is one serialized [`StoredMessage`]. File-append order is the
//! conversational order. Appends from a single writer are whole-line
//! atomic; concurrent writers to the same chat id are not arbitrated.

use crate::types::{MessageRole, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Serializable chat message representation. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMessage {
    pub chat_id: String,
    pub role: MessageRole,
    pub content: String,
    /// ISO-8601 timestamp; file order must equal chronological order.
    pub timestamp: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

/// Aggregate export row: one per chat.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConversationExport {
    pub chat_id: String,
    pub messages: Vec<StoredMessage>,
}

/// File-backed message store, one transcript per chat id.
pub struct ConversationStore {
    directory: PathBuf,
}

impl ConversationStore {
    /// Create a store rooted at `directory`, creating it if absent.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory)?;
        Ok(Self { directory })
    }

    fn chat_path(&self, chat_id: &str) -> PathBuf {
        self.directory.join(format!("{}.jsonl", chat_id))
    }

    /// Persist a new message to the chat transcript.
    ///
    /// Opens the log for appending (creating it if absent), writes exactly
    /// one newline-terminated record, and closes.
    pub fn append(&self, message: &StoredMessage) -> Result<()> {
        let path = self.chat_path(&message.chat_id);
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        let line = serde_json::to_string(message)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    /// Load the full conversation for a chat id, in file order.
    ///
    /// Returns an empty sequence if the chat has never been recorded.
    pub fn load(&self, chat_id: &str) -> Result<Vec<StoredMessage>> {
        let path = self.chat_path(chat_id);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(path)?;
        let mut messages = Vec::new();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            messages.push(serde_json::from_str(line)?);
        }
        Ok(messages)
    }

    /// All persisted chat identifiers, sorted lexicographically.
    pub fn list_chats(&self) -> Result<Vec<String>> {
        let mut chats = Vec::new();
        for entry in fs::read_dir(&self.directory)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("jsonl") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    chats.push(stem.to_string());
                }
            }
        }
        chats.sort();
        Ok(chats)
    }

    /// Materialise all conversations into a single JSON-Lines file.
    ///
    /// Each row holds the chat identifier and its full message history.
    /// Read-only with respect to the source logs.
    pub fn export(&self, destination: &Path) -> Result<usize> {
        let chats = self.list_chats()?;
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = fs::File::create(destination)?;
        for chat_id in &chats {
            let record = ConversationExport {
                chat_id: chat_id.clone(),
                messages: self.load(chat_id)?,
            };
            let line = serde_json::to_string(&record)?;
            writeln!(file, "{}", line)?;
        }
        Ok(chats.len())
    }
}
