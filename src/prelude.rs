pub use crate::builder::CacheBuilder;
pub use crate::cache::{SetAssociativeCache, SharedPolicy};
pub use crate::ds::{NodeId, RecencyList};
pub use crate::entry::Entry;
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::MetricsSnapshot;
pub use crate::policy::{Lfu, Lru, Mru, ReplacementPolicy};
pub use crate::set::{EntryRef, SetView};
