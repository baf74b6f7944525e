// ============================================================================
// EventPlan Library
// ============================================================================
//
// Persisted reactive collections for a personal event plan, plus a
// dashboard that aggregates their progress.
//
// ```
// use eventplan::{MemoryMedium, Planner};
// use std::sync::Arc;
//
// let planner = Planner::open(Arc::new(MemoryMedium::new()), true);
// let dashboard = planner.dashboard();
// println!("{}%", dashboard.snapshot().display_percent());
// ```

pub mod config;
pub mod core;
pub mod dashboard;
pub mod planner;
pub mod storage;
pub mod store;

// Re-export main types for convenience
pub use config::PlannerConfig;
pub use core::{Record, Result, StoreError, fresh_id};
pub use storage::{ChangeCallback, FileMedium, Medium, MemoryMedium, WatchGuard};
pub use store::{PersistedCollectionStore, Subscription};

// Dashboard
pub use dashboard::{
    AggregatedSection, AggregationView, DashboardSnapshot, SectionCounts, SectionSource,
    SectionStatus, StoreSection,
};

// Planner
pub use planner::{
    CollectionKind, CollectionStats, DynCollection, Entity, EntityCollection, GuestHeadcount,
    Planner,
};
pub use planner::entities;
