use super::aggregation::{AggregatedSection, DashboardSnapshot, SectionCounts, global_progress};
use crate::core::Record;
use crate::store::{PersistedCollectionStore, Subscription};
use std::sync::{Arc, Weak};

/// One collection as seen by the dashboard.
pub trait SectionSource: Send + Sync {
    fn name(&self) -> &str;

    fn icon(&self) -> &str;

    /// Storage key of the observed collection.
    fn key(&self) -> &str;

    fn counts(&self) -> SectionCounts;

    /// Invokes `on_change` whenever the underlying collection changes.
    fn watch(&self, on_change: Arc<dyn Fn() + Send + Sync>) -> Subscription;
}

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Section backed by a [`PersistedCollectionStore`] and a completion predicate.
pub struct StoreSection<T: Record> {
    name: String,
    icon: String,
    store: PersistedCollectionStore<T>,
    predicate: Predicate<T>,
}

impl<T: Record> StoreSection<T> {
    /// Uses the record's own completion marker.
    pub fn new(
        name: impl Into<String>,
        icon: impl Into<String>,
        store: PersistedCollectionStore<T>,
    ) -> Self {
        Self::with_predicate(name, icon, store, |record: &T| record.is_completed())
    }

    pub fn with_predicate<P>(
        name: impl Into<String>,
        icon: impl Into<String>,
        store: PersistedCollectionStore<T>,
        predicate: P,
    ) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            icon: icon.into(),
            store,
            predicate: Arc::new(predicate),
        }
    }
}

impl<T: Record> SectionSource for StoreSection<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn icon(&self) -> &str {
        &self.icon
    }

    fn key(&self) -> &str {
        self.store.key()
    }

    fn counts(&self) -> SectionCounts {
        self.store.with_items(|items| SectionCounts {
            completed: items.iter().filter(|record| (self.predicate)(*record)).count(),
            total: items.len(),
        })
    }

    fn watch(&self, on_change: Arc<dyn Fn() + Send + Sync>) -> Subscription {
        self.store.subscribe(move |_: &[T]| on_change())
    }
}

/// Read-only progress summary over a fixed list of sections.
///
/// Nothing is cached: every call recomputes from the stores' current values.
#[derive(Clone)]
pub struct AggregationView {
    sections: Arc<Vec<Arc<dyn SectionSource>>>,
}

impl AggregationView {
    pub fn new(sections: Vec<Arc<dyn SectionSource>>) -> Self {
        Self {
            sections: Arc::new(sections),
        }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn sections(&self) -> Vec<AggregatedSection> {
        self.sections
            .iter()
            .map(|source| AggregatedSection::compute(source.name(), source.icon(), source.counts()))
            .collect()
    }

    pub fn section(&self, name: &str) -> Option<AggregatedSection> {
        self.sections
            .iter()
            .find(|source| source.name() == name)
            .map(|source| AggregatedSection::compute(source.name(), source.icon(), source.counts()))
    }

    pub fn global_progress(&self) -> f64 {
        global_progress(&self.sections())
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot::from_sections(self.sections())
    }

    /// Calls `callback` with a fresh snapshot after any section changes.
    ///
    /// The stores only keep a weak reference to the view's sections, so
    /// notifications stop once every handle to this view has been dropped.
    /// Cancel the returned subscription to deregister earlier.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&DashboardSnapshot) + Send + Sync + 'static,
    {
        let callback = Arc::new(callback);
        let parts = self
            .sections
            .iter()
            .map(|source| {
                let sections: Weak<Vec<Arc<dyn SectionSource>>> = Arc::downgrade(&self.sections);
                let callback = callback.clone();
                source.watch(Arc::new(move || {
                    if let Some(sections) = sections.upgrade() {
                        callback(&AggregationView { sections }.snapshot());
                    }
                }))
            })
            .collect();
        Subscription::merge(parts)
    }
}
