use alibi_core::models::context::{BelievabilityLevel, ExcuseContext, UrgencyLevel};
use alibi_core::models::excuse::SavedExcuse;
use alibi_core::storage_keys::SAVED_EXCUSES;
use alibi_storage::excuses::ExcuseStore;
use alibi_storage::kv::{FileStore, KeyValueStore, MemoryStore};
use tempfile::TempDir;

fn excuse(text: &str) -> SavedExcuse {
    SavedExcuse::new(text, ExcuseContext::Work, None, None)
}

#[test]
fn absent_key_loads_empty() {
    let store = ExcuseStore::load(MemoryStore::new());
    assert!(store.is_empty());
}

#[test]
fn corrupted_value_loads_empty_and_is_left_in_place() {
    let backend = MemoryStore::new().with_value(SAVED_EXCUSES, "{not json");
    let store = ExcuseStore::load(backend);

    assert!(store.is_empty());
    assert_eq!(
        store.backend().get(SAVED_EXCUSES).unwrap().as_deref(),
        Some("{not json")
    );
}

#[test]
fn add_prepends_and_writes_through() {
    let mut store = ExcuseStore::load(MemoryStore::new());
    let first = excuse("Missed the bus.");
    let second = excuse("Power cut.");

    assert!(store.add(first.clone()));
    assert!(store.add(second.clone()));

    assert_eq!(store.excuses()[0].id, second.id);
    assert_eq!(store.excuses()[1].id, first.id);

    let raw = store.backend().get(SAVED_EXCUSES).unwrap().unwrap();
    let on_disk: Vec<SavedExcuse> = serde_json::from_str(&raw).unwrap();
    assert_eq!(on_disk, store.excuses());
}

#[test]
fn duplicate_id_is_not_admitted() {
    let mut store = ExcuseStore::load(MemoryStore::new());
    let original = excuse("Original.");
    let mut clash = excuse("Clash.");
    clash.id = original.id.clone();

    assert!(store.add(original));
    assert!(!store.add(clash));
    assert_eq!(store.len(), 1);
    assert_eq!(store.excuses()[0].text, "Original.");
}

#[test]
fn delete_removes_only_the_matching_record() {
    let mut store = ExcuseStore::load(MemoryStore::new());
    let keep_a = excuse("Keep A.");
    let remove = excuse("Remove me.");
    let keep_b = excuse("Keep B.");
    store.add(keep_a.clone());
    store.add(remove.clone());
    store.add(keep_b.clone());

    assert!(store.delete(&remove.id));

    assert_eq!(store.excuses(), &[keep_b, keep_a]);
    let raw = store.backend().get(SAVED_EXCUSES).unwrap().unwrap();
    assert!(!raw.contains("Remove me."));
}

#[test]
fn delete_unknown_id_is_noop() {
    let mut store = ExcuseStore::load(MemoryStore::new());
    store.add(excuse("Only one."));
    let before = store.excuses().to_vec();

    assert!(!store.delete("0b6f3c1e-2a7d-4c59-9f4e-1d2c3b4a5f60"));
    assert!(!store.delete("not-a-uuid"));
    assert_eq!(store.excuses(), before.as_slice());
}

#[test]
fn failed_write_keeps_in_memory_add() {
    let mut backend = MemoryStore::new();
    backend.set_reject_writes(true);
    let mut store = ExcuseStore::load(backend);

    assert!(store.add(excuse("Unsaved.")));

    assert_eq!(store.len(), 1);
    assert_eq!(store.backend().get(SAVED_EXCUSES).unwrap(), None);

    // A later successful write catches the disk up.
    store.backend_mut().set_reject_writes(false);
    store.add(excuse("Saved."));
    let raw = store.backend().get(SAVED_EXCUSES).unwrap().unwrap();
    let on_disk: Vec<SavedExcuse> = serde_json::from_str(&raw).unwrap();
    assert_eq!(on_disk.len(), 2);
}

#[test]
fn failed_write_keeps_in_memory_delete() {
    let mut store = ExcuseStore::load(MemoryStore::new());
    let gone = excuse("Gone.");
    store.add(excuse("Stays."));
    store.add(gone.clone());

    store.backend_mut().set_reject_writes(true);
    assert!(store.delete(&gone.id));

    assert_eq!(store.len(), 1);
    assert_eq!(store.excuses()[0].text, "Stays.");
    let raw = store.backend().get(SAVED_EXCUSES).unwrap().unwrap();
    assert!(raw.contains("Gone."));
}

#[test]
fn collection_survives_reload_from_disk() {
    let dir = TempDir::new().unwrap();
    let mut store = ExcuseStore::load(FileStore::new(dir.path()));

    store.add(SavedExcuse::new(
        "Train cancelled.",
        ExcuseContext::Family,
        Some(UrgencyLevel::Low),
        Some(BelievabilityLevel::VeryBelievable),
    ));
    store.add(excuse("Laptop died."));
    let written = store.excuses().to_vec();

    let reloaded = ExcuseStore::load(FileStore::new(dir.path()));
    assert_eq!(reloaded.excuses(), written.as_slice());
}

#[test]
fn records_from_browser_client_load() {
    let raw = r#"[
        {"id":"7d1b1d5e-5c1f-4d6e-8f7a-9b0c1d2e3f40","text":"Had a migraine.","context":"work","urgency":"Medium","believability":"","createdAt":"2024-03-02T09:15:00.000Z"},
        {"id":"1a2b3c4d-5e6f-4a7b-8c9d-0e1f2a3b4c5d","text":"Cat was sick.","context":"family","createdAt":"2024-03-01T18:40:00.000Z"}
    ]"#;
    let store = ExcuseStore::load(MemoryStore::new().with_value(SAVED_EXCUSES, raw));

    assert_eq!(store.len(), 2);
    assert_eq!(store.excuses()[0].urgency, Some(UrgencyLevel::Medium));
    assert_eq!(store.excuses()[0].believability, None);
    assert_eq!(
        store.excuses()[1].created_at,
        "2024-03-01T18:40:00Z".parse::<jiff::Timestamp>().unwrap()
    );
}

#[test]
fn non_uuid_ids_load_and_survive_the_next_write() {
    let raw = r#"[{"id":"abc-1","text":"Keep me.","context":"school","createdAt":"2024-03-02T09:15:00Z"}]"#;
    let mut store = ExcuseStore::load(MemoryStore::new().with_value(SAVED_EXCUSES, raw));

    assert_eq!(store.len(), 1);
    assert_eq!(store.get("abc-1").map(|e| e.text.as_str()), Some("Keep me."));

    store.add(excuse("New one."));
    let raw = store.backend().get(SAVED_EXCUSES).unwrap().unwrap();
    assert!(raw.contains("Keep me."));
    assert!(raw.contains("New one."));

    assert!(store.delete("abc-1"));
    assert_eq!(store.len(), 1);
}
