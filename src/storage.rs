//! # Project Persistence
//!
//! Projects are stored as JSON strings in a flat key-value store, one entry per project,
//! namespaced by user: `<user>/<project name>`. Neither part may contain `/`. A small [`SessionRecord`] under the
//! configured storage key remembers who is logged in, which project was open and the
//! theme.
//!
//! ## Backends
//! - [`MemoryStore`] - in-process map, used by tests and embedders with their own storage
//! - [`FileStore`] - one `<key>.json` file per key in a directory; keys are
//!   percent-encoded so any user or project name maps to a safe file name
//!
//! ## Failure handling
//! `load` reports every failure. `load_or_none` is the fail-soft variant editors use at
//! start-up: a missing or corrupt entry logs a warning and yields `None`.
//!
//! ## Example
//! ```rust
//! use fretboard::project::Project;
//! use fretboard::storage::{MemoryStore, ProjectStore};
//!
//! let mut store = ProjectStore::open(MemoryStore::new(), "guitar_architect_data").unwrap();
//! store.switch_user("ana").unwrap();
//! store.save(&Project::new("Blues", "ana")).unwrap();
//! assert_eq!(store.list().unwrap(), vec!["Blues".to_string()]);
//! ```

use crate::error::{FretboardError, Result};
use crate::project::Project;
use crate::view::Theme;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Version written into every session record.
pub const SESSION_VERSION: &str = "1.5";

/// User assumed before anyone logs in.
pub const DEFAULT_USER: &str = "guest";

/// Minimal string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
    /// All keys, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}

/// Directory-backed store.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", encode_key(key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let name = entry?.file_name();
            let Some(stem) = name.to_str().and_then(|n| n.strip_suffix(".json")) else {
                continue;
            };
            if let Some(key) = decode_key(stem) {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}

fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}

fn decode_key(encoded: &str) -> Option<String> {
    let bytes = encoded.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = encoded.get(i + 1..i + 3)?;
            decoded.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(decoded).ok()
}

/// Who is logged in and what they had open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub version: String,
    pub current_user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_project: Option<String>,
    #[serde(default)]
    pub theme: Theme,
}

impl Default for SessionRecord {
    fn default() -> Self {
        Self {
            version: SESSION_VERSION.to_string(),
            current_user: DEFAULT_USER.to_string(),
            active_project: None,
            theme: Theme::default(),
        }
    }
}

/// Per-user project storage on top of a [`KeyValueStore`].
#[derive(Debug)]
pub struct ProjectStore<S> {
    store: S,
    session_key: String,
    session: SessionRecord,
}

impl<S: KeyValueStore> ProjectStore<S> {
    /// Wrap `store`, restoring the session saved under `session_key` if it is readable.
    pub fn open(store: S, session_key: &str) -> Result<Self> {
        let session = match store.get(session_key)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Failed to load session '{}': {}", session_key, e);
                SessionRecord::default()
            }),
            None => SessionRecord::default(),
        };
        debug!("opened project store for user '{}'", session.current_user);
        Ok(Self {
            store,
            session_key: session_key.to_string(),
            session,
        })
    }

    pub fn session(&self) -> &SessionRecord {
        &self.session
    }

    pub fn user(&self) -> &str {
        &self.session.current_user
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Log in as `user`. The open project is forgotten.
    pub fn switch_user(&mut self, user: &str) -> Result<()> {
        let user = user.trim();
        if user.is_empty() {
            return Err(FretboardError::Storage {
                key: self.session_key.clone(),
                message: "user name is empty".to_string(),
            });
        }
        if user.contains('/') {
            return Err(FretboardError::Storage {
                key: self.session_key.clone(),
                message: format!("user name '{}' must not contain '/'", user),
            });
        }
        if user != self.session.current_user {
            self.session.current_user = user.to_string();
            self.session.active_project = None;
        }
        self.save_session()
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.session.theme = theme;
        self.save_session()
    }

    /// Store `project` under the current user and remember it as the open project.
    pub fn save(&mut self, project: &Project) -> Result<()> {
        let key = self.project_key(&project.name)?;
        let json = serde_json::to_string(project)?;
        self.store.set(&key, &json)?;
        debug!("saved project '{}' ({} diagrams)", key, project.diagrams.len());
        self.session.active_project = Some(project.name.clone());
        self.save_session()
    }

    pub fn load(&self, name: &str) -> Result<Project> {
        let key = self.project_key(name)?;
        let raw = self
            .store
            .get(&key)?
            .ok_or_else(|| FretboardError::ProjectNotFound(name.to_string()))?;
        let project: Project = serde_json::from_str(&raw)?;
        if project.diagrams.is_empty() {
            return Err(FretboardError::Storage {
                key,
                message: "project has no diagrams".to_string(),
            });
        }
        debug!("loaded project '{}'", key);
        Ok(project)
    }

    /// Fail-soft `load`: logs and returns `None` on any failure.
    pub fn load_or_none(&self, name: &str) -> Option<Project> {
        match self.load(name) {
            Ok(project) => Some(project),
            Err(e) => {
                warn!("Failed to load from storage: {}", e);
                None
            }
        }
    }

    /// The project recorded as open in the session, if it still loads.
    pub fn load_active(&self) -> Option<Project> {
        let name = self.session.active_project.as_deref()?;
        self.load_or_none(name)
    }

    /// Project names of the current user, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let prefix = format!("{}/", self.session.current_user);
        Ok(self
            .store
            .keys()?
            .into_iter()
            .filter_map(|key| key.strip_prefix(&prefix).map(str::to_string))
            .filter(|name| !name.contains('/'))
            .collect())
    }

    pub fn delete(&mut self, name: &str) -> Result<()> {
        let key = self.project_key(name)?;
        if self.store.get(&key)?.is_none() {
            return Err(FretboardError::ProjectNotFound(name.to_string()));
        }
        self.store.remove(&key)?;
        debug!("deleted project '{}'", key);
        if self.session.active_project.as_deref() == Some(name) {
            self.session.active_project = None;
            self.save_session()?;
        }
        Ok(())
    }

    fn project_key(&self, name: &str) -> Result<String> {
        if name.contains('/') {
            return Err(FretboardError::Storage {
                key: format!("{}/{}", self.session.current_user, name),
                message: "project name must not contain '/'".to_string(),
            });
        }
        Ok(format!("{}/{}", self.session.current_user, name))
    }

    fn save_session(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.session)?;
        self.store.set(&self.session_key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "guitar_architect_data";

    #[test]
    fn test_key_encoding_round_trips() {
        for key in ["ana/Blues in A", "guitar_architect_data", "zoë/../etc", "a%b"] {
            let encoded = encode_key(key);
            assert!(!encoded.contains('/') && !encoded.contains('.'));
            assert_eq!(decode_key(&encoded).as_deref(), Some(key));
        }
        assert_eq!(decode_key("%G1"), None);
        assert_eq!(decode_key("%4"), None);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        store.set("b", "2").unwrap();
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(store.keys().unwrap(), vec!["a", "b"]);
        store.remove("a").unwrap();
        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn test_projects_are_namespaced_per_user() {
        let mut store = ProjectStore::open(MemoryStore::new(), KEY).unwrap();
        assert_eq!(store.user(), DEFAULT_USER);
        store.switch_user("ana").unwrap();
        store.save(&Project::new("Blues", "ana")).unwrap();
        store.save(&Project::new("Arpeggios", "ana")).unwrap();
        store.switch_user("bo").unwrap();
        assert!(store.list().unwrap().is_empty());
        assert!(matches!(store.load("Blues"), Err(FretboardError::ProjectNotFound(_))));
        store.switch_user("ana").unwrap();
        assert_eq!(store.list().unwrap(), vec!["Arpeggios", "Blues"]);
        assert_eq!(store.load("Blues").unwrap().name, "Blues");
    }

    #[test]
    fn test_session_survives_reopen() {
        let mut store = ProjectStore::open(MemoryStore::new(), KEY).unwrap();
        store.switch_user("ana").unwrap();
        store.set_theme(Theme::Light).unwrap();
        let project = Project::new("Blues", "ana");
        store.save(&project).unwrap();

        let reopened = ProjectStore::open(store.into_inner(), KEY).unwrap();
        assert_eq!(reopened.user(), "ana");
        assert_eq!(reopened.session().theme, Theme::Light);
        assert_eq!(reopened.session().version, "1.5");
        assert_eq!(reopened.load_active(), Some(project));
    }

    #[test]
    fn test_corrupt_entries_fail_soft() {
        let mut backend = MemoryStore::new();
        backend.set(KEY, "{not json").unwrap();
        backend.set("guest/Broken", "[]").unwrap();
        let store = ProjectStore::open(backend, KEY).unwrap();
        assert_eq!(store.session(), &SessionRecord::default());
        assert!(matches!(store.load("Broken"), Err(FretboardError::Serialization(_))));
        assert_eq!(store.load_or_none("Broken"), None);
        assert_eq!(store.load_or_none("Missing"), None);
    }

    #[test]
    fn test_project_without_diagrams_is_rejected() {
        let mut project = Project::new("Empty", DEFAULT_USER);
        project.diagrams.clear();
        let mut backend = MemoryStore::new();
        backend.set("guest/Empty", &serde_json::to_string(&project).unwrap()).unwrap();
        let store = ProjectStore::open(backend, KEY).unwrap();
        assert_eq!(
            store.load("Empty").unwrap_err().to_string(),
            "Storage error for key 'guest/Empty': project has no diagrams"
        );
    }

    #[test]
    fn test_delete() {
        let mut store = ProjectStore::open(MemoryStore::new(), KEY).unwrap();
        store.save(&Project::new("Blues", DEFAULT_USER)).unwrap();
        store.delete("Blues").unwrap();
        assert!(store.session().active_project.is_none());
        assert!(store.delete("Blues").is_err());
    }

    #[test]
    fn test_slashes_cannot_cross_user_namespaces() {
        let mut store = ProjectStore::open(MemoryStore::new(), KEY).unwrap();
        let err = store.switch_user("ana/x").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Storage error for key 'guitar_architect_data': user name 'ana/x' must not contain '/'"
        );
        assert_eq!(store.user(), DEFAULT_USER);

        store.switch_user("ana").unwrap();
        let err = store.save(&Project::new("x/Blues", "ana")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Storage error for key 'ana/x/Blues': project name must not contain '/'"
        );
        assert!(matches!(store.load("x/Blues"), Err(FretboardError::Storage { .. })));
        assert!(matches!(store.delete("x/Blues"), Err(FretboardError::Storage { .. })));

        // Keys written by other means stay out of the listing.
        let mut backend = store.into_inner();
        backend.set("ana/x/Blues", "{}").unwrap();
        let store = ProjectStore::open(backend, KEY).unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_empty_user_is_rejected() {
        let mut store = ProjectStore::open(MemoryStore::new(), KEY).unwrap();
        let err = store.switch_user("  ").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Storage error for key 'guitar_architect_data': user name is empty"
        );
    }

    #[test]
    fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("data")).unwrap();
        store.set("ana/Blues in A", "{}").unwrap();
        store.set(KEY, "{}").unwrap();
        assert!(store.root().join("ana%2FBlues%20in%20A.json").exists());
        assert_eq!(store.keys().unwrap(), vec!["ana/Blues in A", KEY]);
        assert_eq!(store.get("ana/Blues in A").unwrap().as_deref(), Some("{}"));
        assert_eq!(store.get("nobody").unwrap(), None);
        store.remove("ana/Blues in A").unwrap();
        store.remove("ana/Blues in A").unwrap();
        assert_eq!(store.keys().unwrap(), vec![KEY]);
    }
}
