//! Buffer registry: the multi-tab model.
//!
//! Hosts that show several documents at once (tabs, splits) need a stable
//! way to address them that does not depend on UI object identity. The
//! registry is an arena of buffer records indexed by opaque [`BufferId`]s;
//! each record owns an [`EditorSurface`], an optional file path, and the
//! saved-content snapshot used for modified tracking and close prompts.

use crate::surface::EditorSurface;
use std::collections::BTreeMap;

/// Opaque identifier for an open buffer in a [`BufferRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BufferId(u64);

impl BufferId {
    /// Get the underlying numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Registry-level errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A buffer with this path is already open.
    PathAlreadyOpen(String),
    /// A buffer id was not found.
    BufferNotFound(BufferId),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PathAlreadyOpen(path) => write!(f, "Path already open: {}", path),
            Self::BufferNotFound(id) => write!(f, "Buffer not found: {}", id.get()),
        }
    }
}

impl std::error::Error for RegistryError {}

struct BufferRecord {
    path: Option<String>,
    saved_snapshot: String,
    surface: EditorSurface,
}

/// Arena of open buffers with path lookup and modified tracking.
///
/// # Example
///
/// ```rust
/// use overlay_core::BufferRegistry;
///
/// let mut registry = BufferRegistry::new();
/// let id = registry
///     .open_buffer(Some("main.c".to_string()), "int main(){}")
///     .unwrap();
/// assert!(!registry.is_modified(id).unwrap());
///
/// registry.buffer_mut(id).unwrap().handle_char('x');
/// assert!(registry.is_modified(id).unwrap());
///
/// registry.mark_saved(id).unwrap();
/// assert!(!registry.is_modified(id).unwrap());
/// ```
pub struct BufferRegistry {
    buffers: BTreeMap<u64, BufferRecord>,
    next_id: u64,
    active: Option<BufferId>,
}

impl BufferRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            buffers: BTreeMap::new(),
            next_id: 0,
            active: None,
        }
    }

    /// Number of open buffers.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Returns `true` when no buffers are open.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Open a new buffer over `text`, optionally bound to a file path.
    ///
    /// Rejects a path that is already open (the host should focus the
    /// existing buffer instead). The new buffer becomes active, and its
    /// saved snapshot is the initial text.
    pub fn open_buffer(
        &mut self,
        path: Option<String>,
        text: &str,
    ) -> Result<BufferId, RegistryError> {
        if let Some(path) = &path {
            if self.buffer_id_for_path(path).is_some() {
                return Err(RegistryError::PathAlreadyOpen(path.clone()));
            }
        }

        let id = BufferId(self.next_id);
        self.next_id += 1;
        self.buffers.insert(
            id.0,
            BufferRecord {
                path,
                saved_snapshot: text.to_string(),
                surface: EditorSurface::from_text(text),
            },
        );
        self.active = Some(id);
        Ok(id)
    }

    /// Close a buffer. When the active buffer closes, the lowest remaining
    /// id becomes active.
    pub fn close_buffer(&mut self, id: BufferId) -> Result<(), RegistryError> {
        self.buffers
            .remove(&id.0)
            .ok_or(RegistryError::BufferNotFound(id))?;
        if self.active == Some(id) {
            self.active = self.buffers.keys().next().copied().map(BufferId);
        }
        Ok(())
    }

    /// All open buffer ids, in creation order.
    pub fn buffer_ids(&self) -> Vec<BufferId> {
        self.buffers.keys().copied().map(BufferId).collect()
    }

    /// The buffer's editor surface.
    pub fn buffer(&self, id: BufferId) -> Result<&EditorSurface, RegistryError> {
        self.buffers
            .get(&id.0)
            .map(|record| &record.surface)
            .ok_or(RegistryError::BufferNotFound(id))
    }

    /// The buffer's editor surface, mutably.
    pub fn buffer_mut(&mut self, id: BufferId) -> Result<&mut EditorSurface, RegistryError> {
        self.buffers
            .get_mut(&id.0)
            .map(|record| &mut record.surface)
            .ok_or(RegistryError::BufferNotFound(id))
    }

    /// The id of the buffer bound to `path`, if open.
    pub fn buffer_id_for_path(&self, path: &str) -> Option<BufferId> {
        self.buffers
            .iter()
            .find(|(_, record)| record.path.as_deref() == Some(path))
            .map(|(id, _)| BufferId(*id))
    }

    /// The buffer's file path, if bound.
    pub fn path(&self, id: BufferId) -> Result<Option<&str>, RegistryError> {
        self.buffers
            .get(&id.0)
            .map(|record| record.path.as_deref())
            .ok_or(RegistryError::BufferNotFound(id))
    }

    /// Bind or unbind the buffer's file path (save-as rename). Rejects a
    /// path already bound to another buffer.
    pub fn set_buffer_path(
        &mut self,
        id: BufferId,
        path: Option<String>,
    ) -> Result<(), RegistryError> {
        if let Some(path) = &path {
            if let Some(existing) = self.buffer_id_for_path(path) {
                if existing != id {
                    return Err(RegistryError::PathAlreadyOpen(path.clone()));
                }
            }
        }
        let record = self
            .buffers
            .get_mut(&id.0)
            .ok_or(RegistryError::BufferNotFound(id))?;
        record.path = path;
        Ok(())
    }

    /// Returns `true` when the buffer's text differs from its saved
    /// snapshot.
    pub fn is_modified(&self, id: BufferId) -> Result<bool, RegistryError> {
        let record = self
            .buffers
            .get(&id.0)
            .ok_or(RegistryError::BufferNotFound(id))?;
        Ok(record.surface.text() != record.saved_snapshot)
    }

    /// Refresh the saved snapshot from the current text (after the host
    /// wrote the file).
    pub fn mark_saved(&mut self, id: BufferId) -> Result<(), RegistryError> {
        let record = self
            .buffers
            .get_mut(&id.0)
            .ok_or(RegistryError::BufferNotFound(id))?;
        record.saved_snapshot = record.surface.text();
        Ok(())
    }

    /// The active (focused) buffer id.
    pub fn active_buffer_id(&self) -> Option<BufferId> {
        self.active
    }

    /// Focus `id`.
    pub fn set_active(&mut self, id: BufferId) -> Result<(), RegistryError> {
        if !self.buffers.contains_key(&id.0) {
            return Err(RegistryError::BufferNotFound(id));
        }
        self.active = Some(id);
        Ok(())
    }

    /// The active buffer's surface, if any buffer is open.
    pub fn active_buffer(&self) -> Option<&EditorSurface> {
        self.active.and_then(|id| self.buffer(id).ok())
    }

    /// The active buffer's surface, mutably.
    pub fn active_buffer_mut(&mut self) -> Option<&mut EditorSurface> {
        let id = self.active?;
        self.buffer_mut(id).ok()
    }
}

impl Default for BufferRegistry {
    fn default() -> Self {
        Self::new()
    }
}
