pub mod controller;
pub mod domain;
pub mod generation;
pub mod history;
pub mod payload;
pub mod ports;

#[cfg(test)]
mod testing;

pub use controller::{AppController, PendingCopy, PendingSubmission};
pub use domain::{BulletCount, CopyLength, FormState, GenerationRequest, HistoryEntry, HistoryId, Tone};
pub use generation::{GenerationClient, GenerationStatus};
pub use history::{HistoryCache, HISTORY_CAPACITY, HISTORY_STORAGE_KEY};
pub use payload::build_payload;
pub use ports::{
    ClipboardService, CopyGenerationService, KeyValueStore, PortError, PortResult,
};
