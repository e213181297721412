pub mod manager;
pub mod store;

pub use manager::{load, save, LoadOutcome, LABELS_KEY, MODEL_KEY};
pub use store::{FsStore, KvStore, MemStore};
