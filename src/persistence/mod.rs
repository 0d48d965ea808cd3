use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::errors::LexiflowError,
    store::{
        ImportData,
        VocabularyStore,
    },
};

const APP_NAME: &str = "lexiflow";
pub const STATE_FILE: &str = "lexiflow_state.json";

/// Bumped on schema changes; an external migration step upgrades older
/// documents before the store sees them.
pub const STORAGE_VERSION: u32 = 1;

/// The versioned persisted document: the full store shape plus a version tag.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub version: u32,
    #[serde(flatten)]
    pub state: VocabularyStore,
}

impl Snapshot {
    pub fn capture(store: &VocabularyStore, include_credentials: bool) -> Self {
        let mut state = store.clone();
        if !include_credentials {
            state.settings.api_key.clear();
        }
        Snapshot { version: STORAGE_VERSION, state }
    }

    /// Turn a loaded document back into a live store. In-flight enrichment
    /// does not survive the process, so the active set starts empty.
    pub fn into_store(self) -> VocabularyStore {
        let mut state = self.state;
        state.active_queue.clear();
        state.settings.concurrency_limit = state.settings.concurrency_limit.max(1);
        state
    }
}

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_data_file_path(filename: &str) -> PathBuf {
    get_app_data_dir().join(filename)
}

pub fn save_json_to<T: Serialize>(data: &T, path: &Path) -> Result<(), LexiflowError> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    log::debug!("Data saved to: {}", path.display());
    Ok(())
}

pub fn load_json_from<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, LexiflowError> {
    let json = fs::read_to_string(path)?;
    let data: T = serde_json::from_str(&json)?;
    log::debug!("Data loaded from: {}", path.display());
    Ok(data)
}

pub fn save_state(store: &VocabularyStore) -> Result<(), LexiflowError> {
    save_state_to(store, &get_data_file_path(STATE_FILE))
}

pub fn save_state_to(store: &VocabularyStore, path: &Path) -> Result<(), LexiflowError> {
    // The local document keeps credentials; only shared exports strip them.
    save_json_to(&Snapshot::capture(store, true), path)
}

pub fn load_state() -> Result<VocabularyStore, LexiflowError> {
    load_state_from(&get_data_file_path(STATE_FILE))
}

pub fn load_state_from(path: &Path) -> Result<VocabularyStore, LexiflowError> {
    if !path.exists() {
        return Ok(VocabularyStore::default());
    }

    let snapshot: Snapshot = load_json_from(path)?;
    if snapshot.version > STORAGE_VERSION {
        return Err(LexiflowError::UnsupportedVersion(snapshot.version));
    }
    Ok(snapshot.into_store())
}

/// Fall back to a fresh store when the document is unreadable, so a corrupt
/// file never takes the whole application down.
pub fn load_state_or_default() -> VocabularyStore {
    match load_state() {
        Ok(store) => store,
        Err(e) => {
            log::error!("Failed to load {}: {}. Using defaults.", STATE_FILE, e);
            VocabularyStore::default()
        }
    }
}

/// Serialize a shareable snapshot. Credentials are stripped unless explicitly
/// requested.
pub fn export_snapshot(
    store: &VocabularyStore,
    include_credentials: bool,
) -> Result<String, LexiflowError> {
    let snapshot = Snapshot::capture(store, include_credentials);
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

/// Parse an import payload: any partial snapshot matching the persisted
/// entity shapes.
pub fn parse_import(json: &str) -> Result<ImportData, LexiflowError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::core::{
        models::{
            Question,
            SettingsPatch,
            Word,
        },
        utils::now_ms,
    };

    fn populated_store() -> VocabularyStore {
        let mut store = VocabularyStore::new();
        store.add_word(Word {
            id: "w1".to_string(),
            original: "keen".to_string(),
            word_translation: "敏銳的".to_string(),
            questions: vec![Question {
                id: "q1".to_string(),
                sentence: "She has a keen eye.".to_string(),
                translation: "她有敏銳的眼光。".to_string(),
                cloze: "She has a __________ eye.".to_string(),
            }],
            enabled: true,
            added_at: now_ms(),
            category_ids: Vec::new(),
        });
        store.set_settings(SettingsPatch {
            api_key: Some("sk-secret".to_string()),
            ..Default::default()
        });
        store.enqueue_words(vec!["brisk".to_string()]);
        store
    }

    #[test]
    fn state_round_trips_through_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(STATE_FILE);
        let store = populated_store();

        save_state_to(&store, &path).unwrap();
        let loaded = load_state_from(&path).unwrap();

        assert_eq!(loaded, store);
    }

    #[test]
    fn loading_resets_the_active_set() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(STATE_FILE);
        let mut store = populated_store();
        store.move_to_active(); // "brisk" is now in flight

        save_state_to(&store, &path).unwrap();
        let loaded = load_state_from(&path).unwrap();

        assert!(loaded.active_queue.is_empty());
        assert!(loaded.processing_queue.is_empty()); // It was popped before saving
    }

    #[test]
    fn missing_file_yields_a_default_store() {
        let dir = tempdir().unwrap();
        let loaded = load_state_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, VocabularyStore::default());
    }

    #[test]
    fn newer_versions_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(STATE_FILE);

        let mut snapshot = Snapshot::capture(&populated_store(), true);
        snapshot.version = STORAGE_VERSION + 1;
        save_json_to(&snapshot, &path).unwrap();

        assert!(matches!(
            load_state_from(&path),
            Err(LexiflowError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn export_strips_credentials_by_default() {
        let store = populated_store();

        let exported = export_snapshot(&store, false).unwrap();
        assert!(!exported.contains("sk-secret"));
        // Everything else survives.
        assert!(exported.contains("keen"));

        let with_creds = export_snapshot(&store, true).unwrap();
        assert!(with_creds.contains("sk-secret"));
    }

    #[test]
    fn exported_snapshot_parses_as_an_import_payload() {
        let store = populated_store();
        let exported = export_snapshot(&store, false).unwrap();

        let import = parse_import(&exported).unwrap();
        assert_eq!(import.words.len(), 1);
        assert!(import.words.contains_key("w1"));
        assert!(import.settings.is_some());
    }
}
