use contracts::domain::sales_record::{sanitize, seed_records, SalesRecord};
use leptos::prelude::*;

const STORAGE_KEY: &str = "bosch-row-sales-data";

/// Single owner of the in-memory record list and its persisted mirror in
/// localStorage. Cheap to copy; hand it around via context.
#[derive(Clone, Copy)]
pub struct RecordStore {
    records: RwSignal<Vec<SalesRecord>>,
}

impl RecordStore {
    /// Reads the persisted blob, falling back to the seed list when nothing
    /// is stored or the blob does not parse. The sanitized result is written
    /// back so storage never retains a non-positive-revenue entry.
    pub fn load() -> Self {
        let records = sanitize(read_persisted().unwrap_or_else(seed_records));
        let store = Self {
            records: RwSignal::new(records),
        };
        store.persist();
        store
    }

    /// Read-only view for the query pipeline.
    pub fn records(&self) -> Signal<Vec<SalesRecord>> {
        self.records.into()
    }

    /// Appends a record when it passes validation and persists the result.
    /// Invalid records are dropped without surfacing an error; returns
    /// whether the record was accepted.
    pub fn append(&self, record: SalesRecord) -> bool {
        if !record.is_valid() {
            log::debug!("record rejected by validation: {:?}", record.project);
            return false;
        }
        self.records.update(|records| records.push(record));
        self.persist();
        true
    }

    fn persist(&self) {
        self.records.update(|records| {
            *records = sanitize(std::mem::take(records));
        });
        match serde_json::to_string(&self.records.get_untracked()) {
            Ok(json) => {
                if let Some(storage) = local_storage() {
                    let _ = storage.set_item(STORAGE_KEY, &json);
                }
            }
            Err(err) => log::warn!("failed to serialize records: {err}"),
        }
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

fn read_persisted() -> Option<Vec<SalesRecord>> {
    let raw = local_storage()?.get_item(STORAGE_KEY).ok()??;
    match serde_json::from_str(&raw) {
        Ok(records) => Some(records),
        Err(err) => {
            log::warn!("persisted data is malformed, reseeding: {err}");
            None
        }
    }
}
