pub mod aggregation;
pub mod view;

pub use aggregation::{
    AggregatedSection, DashboardSnapshot, SectionCounts, SectionStatus, display_percent,
    global_progress, progress_percent,
};
pub use view::{AggregationView, SectionSource, StoreSection};
