pub mod cache;
pub mod detector;
pub mod inventory;
pub mod llm;
pub mod prompts;

pub use cache::{AdviceCache, CacheKey};
pub use detector::{DetectorClient, DetectorError, DetectorReply};
pub use inventory::{compute_status, InventoryStore, MemoryInventory};
pub use llm::{fallback_recommendations, AdviceOutcome, LlmClient, LlmError};
