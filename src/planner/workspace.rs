use super::collection::{DynCollection, Entity, EntityCollection};
use super::entities::{
    CateringItem, FloralArrangement, Guest, MusicService, PhotoService, StylingService,
    TimelineEvent, Venue,
};
use super::kind::CollectionKind;
use super::stats::GuestHeadcount;
use crate::config::PlannerConfig;
use crate::dashboard::{AggregationView, SectionSource, StoreSection};
use crate::storage::Medium;
use std::sync::Arc;
use tracing::info;

/// All eight collections of one plan, opened over a shared medium.
///
/// Each collection owns its storage key; opening two planners over the same
/// medium context would make them fight over the same slots.
pub struct Planner {
    medium: Arc<dyn Medium>,
    pub guests: EntityCollection<Guest>,
    pub venues: EntityCollection<Venue>,
    pub florals: EntityCollection<FloralArrangement>,
    pub catering: EntityCollection<CateringItem>,
    pub photography: EntityCollection<PhotoService>,
    pub music: EntityCollection<MusicService>,
    pub styling: EntityCollection<StylingService>,
    pub timeline: EntityCollection<TimelineEvent>,
}

impl Planner {
    pub fn open(medium: Arc<dyn Medium>, seed_sample_data: bool) -> Self {
        fn collection<T: Entity>(medium: &Arc<dyn Medium>, seed: bool) -> EntityCollection<T> {
            let default = if seed { T::sample_data() } else { Vec::new() };
            EntityCollection::open(medium.clone(), default)
        }

        let planner = Self {
            guests: collection(&medium, seed_sample_data),
            venues: collection(&medium, seed_sample_data),
            florals: collection(&medium, seed_sample_data),
            catering: collection(&medium, seed_sample_data),
            photography: collection(&medium, seed_sample_data),
            music: collection(&medium, seed_sample_data),
            styling: collection(&medium, seed_sample_data),
            timeline: collection(&medium, seed_sample_data),
            medium,
        };
        info!(seeded = seed_sample_data, "planner collections opened");
        planner
    }

    pub fn with_config(medium: Arc<dyn Medium>, config: &PlannerConfig) -> Self {
        Self::open(medium, config.seed_sample_data)
    }

    pub fn medium(&self) -> &Arc<dyn Medium> {
        &self.medium
    }

    pub fn collection(&self, kind: CollectionKind) -> &dyn DynCollection {
        match kind {
            CollectionKind::Guests => &self.guests,
            CollectionKind::Venues => &self.venues,
            CollectionKind::Florals => &self.florals,
            CollectionKind::Catering => &self.catering,
            CollectionKind::Photography => &self.photography,
            CollectionKind::Music => &self.music,
            CollectionKind::Styling => &self.styling,
            CollectionKind::Timeline => &self.timeline,
        }
    }

    /// Progress summary over every collection, in sidebar order.
    pub fn dashboard(&self) -> AggregationView {
        fn section<T: Entity>(collection: &EntityCollection<T>) -> Arc<dyn SectionSource> {
            Arc::new(StoreSection::new(
                T::KIND.display_name(),
                T::KIND.icon(),
                collection.store().clone(),
            ))
        }

        AggregationView::new(
            CollectionKind::ALL
                .into_iter()
                .map(|kind| match kind {
                    CollectionKind::Guests => section(&self.guests),
                    CollectionKind::Venues => section(&self.venues),
                    CollectionKind::Florals => section(&self.florals),
                    CollectionKind::Catering => section(&self.catering),
                    CollectionKind::Photography => section(&self.photography),
                    CollectionKind::Music => section(&self.music),
                    CollectionKind::Styling => section(&self.styling),
                    CollectionKind::Timeline => section(&self.timeline),
                })
                .collect(),
        )
    }

    pub fn headcount(&self) -> GuestHeadcount {
        self.guests.store().with_items(GuestHeadcount::of)
    }
}
