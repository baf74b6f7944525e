pub mod collection;
pub mod entities;
pub mod kind;
pub mod stats;
pub mod workspace;

pub use collection::{DynCollection, Entity, EntityCollection};
pub use kind::CollectionKind;
pub use stats::{CollectionStats, GuestHeadcount};
pub use workspace::Planner;
