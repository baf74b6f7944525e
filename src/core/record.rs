use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

/// A record that can live inside a persisted collection.
///
/// The store only needs two things from a record: its stable identifier and
/// whether it counts toward the completed total of its collection.
pub trait Record: Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    fn is_completed(&self) -> bool;
}

/// Generates an identifier that does not collide with any of `existing`.
pub fn fresh_id<'a, I>(existing: I) -> String
where
    I: IntoIterator<Item = &'a str> + Clone,
{
    loop {
        let candidate = Uuid::new_v4().simple().to_string();
        if !existing.clone().into_iter().any(|id| id == candidate) {
            return candidate;
        }
    }
}
