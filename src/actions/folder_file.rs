use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{ActionError, ActionInvocation, ToolAction};
use crate::config::FilesConfig;
use crate::desktop::{Desktop, WindowDirectory};
use crate::resolver::index::{self, EntryKind, IndexEntry};
use crate::resolver::GENERIC_THRESHOLD;

/// Wait for the opened file/folder window before trying to focus it.
const FOCUS_DELAY: Duration = Duration::from_millis(1500);

/// Folder and file management driven by free text: create, rename, delete,
/// open. Targets resolve fuzzily against a one-level index of the user
/// profile folders plus configured extra roots, rebuilt per request.
pub struct FolderFile {
    desktop: Arc<dyn Desktop>,
    roots: Vec<PathBuf>,
    create_root: PathBuf,
}

impl FolderFile {
    pub fn new(desktop: Arc<dyn Desktop>, files: &FilesConfig) -> Self {
        Self {
            desktop,
            roots: index::default_roots(&files.extra_roots),
            create_root: PathBuf::from(&files.create_root),
        }
    }

    /// Test/embedding constructor with explicit roots.
    pub fn with_roots(desktop: Arc<dyn Desktop>, roots: Vec<PathBuf>, create_root: PathBuf) -> Self {
        Self {
            desktop,
            roots,
            create_root,
        }
    }

    fn find(&self, query: &str, idx: &[IndexEntry], kind: EntryKind) -> Option<IndexEntry> {
        index::search(query, idx, kind, GENERIC_THRESHOLD).map(|(e, m)| {
            tracing::info!(query = %query, matched = %e.name, score = m.score, "item resolved");
            e.clone()
        })
    }

    async fn open_entry(&self, entry: &IndexEntry) -> Result<(), ActionError> {
        self.desktop.open_path(&entry.path)?;
        tokio::time::sleep(FOCUS_DELAY).await;
        // Focus is best-effort; Explorer titles the window after the item.
        let directory = WindowDirectory::new(self.desktop.clone());
        if let Some(w) = directory.find_by_substring(&entry.name) {
            let _ = self.desktop.activate(&w);
        }
        Ok(())
    }
}

#[async_trait]
impl ToolAction for FolderFile {
    fn name(&self) -> &'static str {
        "folder_file"
    }

    fn description(&self) -> &'static str {
        "Manage folders and files from natural language: 'create folder X', \
         'rename OLD to NEW', 'delete X', 'open X folder', or open a file by name."
    }

    async fn invoke(&self, invocation: &ActionInvocation) -> Result<String, ActionError> {
        let command = invocation.argument.trim();
        if command.is_empty() {
            return Err(ActionError::InvalidInput("no file command given".into()));
        }
        let lower = command.to_lowercase();

        if let Some(pos) = lower.find("create folder") {
            let name = command[pos + "create folder".len()..].trim();
            if name.is_empty() {
                return Err(ActionError::InvalidInput("create folder needs a name".into()));
            }
            let path = self.create_root.join(name);
            std::fs::create_dir_all(&path).map_err(crate::errors::VoiceDeskError::from)?;
            return Ok(format!("Folder created: {}", path.display()));
        }

        let idx = index::build_index(&self.roots);

        if let Some(pos) = lower.find("rename") {
            let remainder = lower[pos + "rename".len()..].trim();
            // Fail fast on anything but the two-part "old to new" shape.
            let Some((old_name, new_name)) = remainder.split_once(" to ") else {
                return Err(ActionError::InvalidInput(
                    "rename needs the form 'rename OLD to NEW'".into(),
                ));
            };
            let (old_name, new_name) = (old_name.trim(), new_name.trim());
            if old_name.is_empty() || new_name.is_empty() {
                return Err(ActionError::InvalidInput(
                    "rename needs the form 'rename OLD to NEW'".into(),
                ));
            }
            let entry = self
                .find(old_name, &idx, EntryKind::Folder)
                .or_else(|| self.find(old_name, &idx, EntryKind::File))
                .ok_or_else(|| ActionError::NotFound(old_name.to_string()))?;
            let new_path = entry.path.with_file_name(new_name);
            std::fs::rename(&entry.path, &new_path).map_err(crate::errors::VoiceDeskError::from)?;
            return Ok(format!("Renamed '{}' to {}", entry.name, new_path.display()));
        }

        if lower.contains("delete") {
            let entry = self
                .find(command, &idx, EntryKind::Folder)
                .or_else(|| self.find(command, &idx, EntryKind::File))
                .ok_or_else(|| ActionError::NotFound(command.to_string()))?;
            match entry.kind {
                // Non-recursive on purpose: a fuzzy match must never wipe a
                // populated folder.
                EntryKind::Folder => {
                    std::fs::remove_dir(&entry.path).map_err(crate::errors::VoiceDeskError::from)?
                }
                EntryKind::File => {
                    std::fs::remove_file(&entry.path).map_err(crate::errors::VoiceDeskError::from)?
                }
            }
            return Ok(format!("Deleted: {}", entry.name));
        }

        if lower.contains("folder") {
            let entry = self
                .find(command, &idx, EntryKind::Folder)
                .ok_or_else(|| ActionError::NotFound(command.to_string()))?;
            self.open_entry(&entry).await?;
            return Ok(format!("Folder opened: {}", entry.name));
        }

        let entry = self
            .find(command, &idx, EntryKind::File)
            .ok_or_else(|| ActionError::NotFound(command.to_string()))?;
        self.open_entry(&entry).await?;
        Ok(format!("File opened: {}", entry.name))
    }
}

/// Opens a media/document file from the configured media roots by fuzzy
/// name, for "play my resume" style directives.
pub struct PlayFile {
    desktop: Arc<dyn Desktop>,
    roots: Vec<PathBuf>,
}

impl PlayFile {
    pub fn new(desktop: Arc<dyn Desktop>, files: &FilesConfig) -> Self {
        Self {
            desktop,
            roots: files.extra_roots.iter().map(PathBuf::from).collect(),
        }
    }

    pub fn with_roots(desktop: Arc<dyn Desktop>, roots: Vec<PathBuf>) -> Self {
        Self { desktop, roots }
    }
}

#[async_trait]
impl ToolAction for PlayFile {
    fn name(&self) -> &'static str {
        "play_file"
    }

    fn description(&self) -> &'static str {
        "Find a file by name on the media drive and open it with its default app."
    }

    async fn invoke(&self, invocation: &ActionInvocation) -> Result<String, ActionError> {
        let query = invocation.argument.trim();
        if query.is_empty() {
            return Err(ActionError::InvalidInput("no file name given".into()));
        }

        let idx = index::build_index(&self.roots);
        let Some((entry, m)) = index::search(query, &idx, EntryKind::File, GENERIC_THRESHOLD) else {
            return Err(ActionError::NotFound(query.to_string()));
        };
        tracing::info!(query = %query, matched = %entry.name, score = m.score, "playing file");

        self.desktop.open_path(&entry.path)?;
        tokio::time::sleep(FOCUS_DELAY).await;
        let directory = WindowDirectory::new(self.desktop.clone());
        if let Some(w) = directory.find_by_substring(&entry.name) {
            let _ = self.desktop.activate(&w);
        }
        Ok(format!("File opened: {}", entry.name))
    }
}
