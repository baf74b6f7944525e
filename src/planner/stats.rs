use super::collection::Entity;
use super::entities::{Guest, RsvpStatus};
use serde::Serialize;

/// Header figures of one collection screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CollectionStats {
    pub total: usize,
    pub completed: usize,
    /// Sum of prices, for kinds that carry one. Missing prices count as zero.
    pub budget: Option<f64>,
}

impl CollectionStats {
    pub fn of<T: Entity>(items: &[T]) -> Self {
        Self {
            total: items.len(),
            completed: items.iter().filter(|item| item.is_completed()).count(),
            budget: T::PRICED.then(|| items.iter().filter_map(|item| item.price()).sum::<f64>()),
        }
    }

    pub fn pending(&self) -> usize {
        self.total - self.completed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GuestHeadcount {
    pub invited: usize,
    pub companions: u64,
    pub confirmed: usize,
    pub declined: usize,
    pub pending: usize,
}

impl GuestHeadcount {
    pub fn of(guests: &[Guest]) -> Self {
        guests.iter().fold(Self::default(), |mut acc, guest| {
            acc.invited += 1;
            acc.companions += u64::from(guest.companions);
            match guest.rsvp {
                RsvpStatus::Confirmed => acc.confirmed += 1,
                RsvpStatus::Declined => acc.declined += 1,
                RsvpStatus::Pending => acc.pending += 1,
            }
            acc
        })
    }

    /// Guests plus everyone they bring along.
    pub fn total_attendees(&self) -> u64 {
        self.invited as u64 + self.companions
    }
}
