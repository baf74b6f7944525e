use super::kind::CollectionKind;
use super::stats::CollectionStats;
use crate::core::{Record, Result, StoreError, fresh_id};
use crate::storage::Medium;
use crate::store::PersistedCollectionStore;
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// A record kind with its own collection on the planning dashboard.
pub trait Entity: Record {
    const KIND: CollectionKind;

    /// Whether records carry a numeric price that adds up to a budget.
    const PRICED: bool = false;

    /// Restores the kind's ordering after a create or update.
    fn arrange(_items: &mut Vec<Self>) {}

    /// Flips the completion marker.
    fn toggle_completed(&mut self);

    fn price(&self) -> Option<f64> {
        None
    }

    /// Records a fresh plan starts with when sample data is requested.
    fn sample_data() -> Vec<Self>;
}

/// Create/update/delete intents on top of a [`PersistedCollectionStore`].
///
/// Every intent reads the current value, builds the complete next value and
/// hands it to a single `set`.
pub struct EntityCollection<T: Entity> {
    store: PersistedCollectionStore<T>,
}

impl<T: Entity> Clone for EntityCollection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<T: Entity> EntityCollection<T> {
    pub fn open(medium: Arc<dyn Medium>, default: Vec<T>) -> Self {
        Self::from_store(PersistedCollectionStore::open(
            medium,
            T::KIND.storage_key(),
            default,
        ))
    }

    pub fn from_store(store: PersistedCollectionStore<T>) -> Self {
        Self { store }
    }

    pub fn kind(&self) -> CollectionKind {
        T::KIND
    }

    pub fn store(&self) -> &PersistedCollectionStore<T> {
        &self.store
    }

    pub fn list(&self) -> Vec<T> {
        self.store.get()
    }

    pub fn find(&self, id: &str) -> Option<T> {
        self.store
            .with_items(|items| items.iter().find(|record| record.id() == id).cloned())
    }

    /// Adds `record` under a newly assigned id and returns the stored copy.
    pub fn create(&self, mut record: T) -> T {
        let mut items = self.store.get();
        record.set_id(fresh_id(items.iter().map(|existing| existing.id())));
        items.push(record.clone());
        T::arrange(&mut items);
        self.store.set(items);
        record
    }

    /// Replaces the record with `id`, keeping its id.
    pub fn update(&self, id: &str, replacement: T) -> Result<T> {
        self.update_with(id, move |record| *record = replacement)
    }

    pub fn update_with(&self, id: &str, edit: impl FnOnce(&mut T)) -> Result<T> {
        let mut items = self.store.get();
        let Some(record) = items.iter_mut().find(|record| record.id() == id) else {
            return Err(StoreError::RecordNotFound {
                key: self.store.key().to_string(),
                id: id.to_string(),
            });
        };
        edit(record);
        record.set_id(id.to_string());
        let updated = record.clone();
        T::arrange(&mut items);
        self.store.set(items);
        Ok(updated)
    }

    /// Removes the record with `id`. Unknown ids leave the collection as is.
    pub fn delete(&self, id: &str) -> bool {
        let mut items = self.store.get();
        let Some(position) = items.iter().position(|record| record.id() == id) else {
            return false;
        };
        items.remove(position);
        self.store.set(items);
        true
    }

    pub fn toggle_completed(&self, id: &str) -> Result<T> {
        self.update_with(id, |record| record.toggle_completed())
    }

    pub fn stats(&self) -> CollectionStats {
        self.store.with_items(CollectionStats::of)
    }
}

/// Kind-erased access used by front ends that pick a collection at runtime.
pub trait DynCollection: Send + Sync {
    fn kind(&self) -> CollectionKind;

    fn records_json(&self) -> JsonValue;

    /// Creates a record from a JSON object and returns its new id.
    fn create_json(&self, value: JsonValue) -> Result<String>;

    fn update_json(&self, id: &str, value: JsonValue) -> Result<()>;

    fn delete(&self, id: &str) -> bool;

    fn toggle_completed(&self, id: &str) -> Result<()>;

    fn stats(&self) -> CollectionStats;

    /// Most recent storage problem of the underlying store, cleared on read.
    fn take_warning(&self) -> Option<StoreError>;

    /// Fails with the `WriteFailure` raised since the last `take_warning`,
    /// if any. The in-memory value is kept either way.
    fn ensure_persisted(&self) -> Result<()> {
        match self.take_warning() {
            Some(err @ StoreError::WriteFailure { .. }) => Err(err),
            _ => Ok(()),
        }
    }
}

impl<T: Entity> EntityCollection<T> {
    fn parse_json(&self, value: JsonValue) -> Result<T> {
        serde_json::from_value(value)
            .map_err(|e| StoreError::deserialization(self.store.key(), e))
    }
}

impl<T: Entity> DynCollection for EntityCollection<T> {
    fn kind(&self) -> CollectionKind {
        T::KIND
    }

    fn records_json(&self) -> JsonValue {
        self.store.with_items(|items| {
            serde_json::to_value(items).unwrap_or_else(|_| JsonValue::Array(Vec::new()))
        })
    }

    fn create_json(&self, value: JsonValue) -> Result<String> {
        let record = self.parse_json(value)?;
        Ok(self.create(record).id().to_string())
    }

    fn update_json(&self, id: &str, value: JsonValue) -> Result<()> {
        let record = self.parse_json(value)?;
        self.update(id, record).map(|_| ())
    }

    fn delete(&self, id: &str) -> bool {
        EntityCollection::delete(self, id)
    }

    fn toggle_completed(&self, id: &str) -> Result<()> {
        EntityCollection::toggle_completed(self, id).map(|_| ())
    }

    fn stats(&self) -> CollectionStats {
        EntityCollection::stats(self)
    }

    fn take_warning(&self) -> Option<StoreError> {
        self.store.take_warning()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::entities::{FloralArrangement, TimelineEvent};
    use crate::storage::MemoryMedium;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn florals() -> EntityCollection<FloralArrangement> {
        EntityCollection::open(Arc::new(MemoryMedium::new()), Vec::new())
    }

    #[test]
    fn test_create_assigns_unique_ids() {
        let collection = florals();
        let a = collection.create(FloralArrangement::new("Bouquet", "Rosas"));
        let b = collection.create(FloralArrangement::new("Centros", "Eucalipto"));
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert_eq!(collection.list().len(), 2);
        assert_eq!(collection.list()[0].kind, "Bouquet");
    }

    #[test]
    fn test_create_ignores_caller_supplied_id() {
        let collection = florals();
        let first = collection.create(FloralArrangement::new("Bouquet", "Rosas"));
        let mut dup = FloralArrangement::new("Arco", "Flores blancas");
        dup.id = first.id.clone();
        let second = collection.create(dup);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_update_keeps_id() {
        let collection = florals();
        let created = collection.create(FloralArrangement::new("Bouquet", "Rosas"));
        let mut replacement = FloralArrangement::new("Bouquet", "Peonías");
        replacement.id = "other".to_string();
        let updated = collection.update(&created.id, replacement).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(collection.find(&created.id).unwrap().description, "Peonías");
    }

    #[test]
    fn test_update_unknown_id_fails() {
        let collection = florals();
        let err = collection
            .update("missing", FloralArrangement::new("x", "y"))
            .unwrap_err();
        assert!(matches!(err, StoreError::RecordNotFound { .. }));
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let collection = florals();
        collection.create(FloralArrangement::new("Bouquet", "Rosas"));
        let before = collection.list();
        let writes = Arc::new(AtomicUsize::new(0));
        let counter = writes.clone();
        let _sub = collection.store().subscribe(move |_: &[FloralArrangement]| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!collection.delete("missing"));
        assert_eq!(collection.list(), before);
        assert_eq!(writes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let collection = florals();
        let a = collection.create(FloralArrangement::new("A", ""));
        let b = collection.create(FloralArrangement::new("B", ""));
        assert!(collection.delete(&a.id));
        let remaining = collection.list();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, b.id);
    }

    #[test]
    fn test_toggle_completed_flips() {
        let collection = florals();
        let created = collection.create(FloralArrangement::new("A", ""));
        assert!(collection.toggle_completed(&created.id).unwrap().confirmed);
        assert!(!collection.toggle_completed(&created.id).unwrap().confirmed);
    }

    #[test]
    fn test_timeline_sorted_after_every_insert() {
        let timeline: EntityCollection<TimelineEvent> =
            EntityCollection::open(Arc::new(MemoryMedium::new()), Vec::new());
        for hour in ["18:00", "16:00", "17:00"] {
            timeline.create(TimelineEvent::at("2024-06-15", hour, hour).unwrap());
        }
        let titles: Vec<_> = timeline.list().into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["16:00", "17:00", "18:00"]);
    }

    #[test]
    fn test_dyn_collection_json_round() {
        let collection = florals();
        let dynamic: &dyn DynCollection = &collection;
        let id = dynamic
            .create_json(serde_json::json!({
                "tipo": "Bouquet",
                "descripcion": "Rosas",
                "precio": 120.5,
                "confirmado": false
            }))
            .unwrap();
        assert_eq!(dynamic.records_json()[0]["id"], JsonValue::String(id.clone()));
        dynamic.toggle_completed(&id).unwrap();
        assert_eq!(dynamic.stats().completed, 1);
        assert!(matches!(
            dynamic.create_json(serde_json::json!({"tipo": 3})),
            Err(StoreError::DeserializationFailure { .. })
        ));
        assert!(dynamic.delete(&id));
    }

    #[test]
    fn test_ensure_persisted_reports_failed_write() {
        let medium = MemoryMedium::new();
        let collection: EntityCollection<FloralArrangement> =
            EntityCollection::open(Arc::new(medium.clone()), Vec::new());
        let dynamic: &dyn DynCollection = &collection;

        dynamic.create_json(serde_json::json!({"tipo": "Bouquet"})).unwrap();
        assert!(dynamic.ensure_persisted().is_ok());

        medium.set_available(false);
        dynamic.create_json(serde_json::json!({"tipo": "Arco"})).unwrap();
        assert!(matches!(
            dynamic.ensure_persisted(),
            Err(StoreError::WriteFailure { .. })
        ));
        // Reported once; memory keeps both records.
        assert!(dynamic.ensure_persisted().is_ok());
        assert_eq!(dynamic.stats().total, 2);
    }
}
