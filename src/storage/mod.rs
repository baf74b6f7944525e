pub mod file;
pub mod medium;
pub mod memory;

pub use file::FileMedium;
pub use medium::{ChangeCallback, Medium, WatchGuard};
pub use memory::MemoryMedium;
