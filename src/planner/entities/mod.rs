//! Record types of the eight planning collections.
//!
//! Rust field names are English; the serialized names match what the
//! collections have always stored.

/// Implements [`Record`](crate::core::Record) for a kind whose completion is a
/// single boolean field (`confirmed` unless named otherwise).
macro_rules! confirmable_record {
    ($ty:ty) => {
        confirmable_record!($ty, confirmed);
    };
    ($ty:ty, $flag:ident) => {
        impl $crate::core::Record for $ty {
            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }

            fn is_completed(&self) -> bool {
                self.$flag
            }
        }
    };
}

mod catering;
mod florals;
mod guests;
mod music;
mod photography;
mod styling;
mod timeline;
mod venues;

pub use catering::{CateringItem, MenuCourse};
pub use florals::FloralArrangement;
pub use guests::{Guest, RsvpStatus};
pub use music::{MusicService, MusicSlot};
pub use photography::{PhotoService, PhotoServiceKind};
pub use styling::{StylingService, StylingServiceKind};
pub use timeline::{TimelineEvent, parse_time};
pub use venues::Venue;
