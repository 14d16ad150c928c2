//! In-Memory Implementations
//!
//! 有界 TTL 缓存（进程内，不持久化）

mod ttl_cache;

pub use ttl_cache::InMemoryTtlCache;
