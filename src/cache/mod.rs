//! # Bounded recency caching
//!
//! Fixed-capacity LRU caching used twice by the serving pipeline:
//!
//! - **Retrieval cache**: query text -> ordered document id list, so a
//!   repeated query skips the simulated ANN search entirely
//! - **Fragment cache**: document id -> evidence fragment, filled lazily by
//!   the context assembler
//!
//! Both instances are owned by the pipeline and mutated from a single task;
//! the cache itself carries no lock.
//!
//! ## Example
//!
//! ```rust
//! use ragserve::cache::LruCache;
//!
//! let mut cache: LruCache<String, u32> = LruCache::new(2);
//! cache.put("a".to_string(), 1);
//! cache.put("b".to_string(), 2);
//! cache.put("c".to_string(), 3); // evicts "a"
//!
//! assert_eq!(cache.get(&"a".to_string()), None);
//! assert_eq!(cache.get(&"c".to_string()), Some(3));
//! ```

pub mod store;
pub mod types;

pub use store::LruCache;
pub use types::{CacheStats, DocId};
