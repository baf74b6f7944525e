pub mod collection_store;
pub mod subscription;

pub use collection_store::PersistedCollectionStore;
pub use subscription::Subscription;
