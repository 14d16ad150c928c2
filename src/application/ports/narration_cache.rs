//! Narration Cache Port - 旁白结果缓存
//!
//! 有界 TTL 缓存抽象：key → value，容量上限 + 过期淘汰

/// 缓存统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hit_count: u64,
    pub miss_count: u64,
}

/// Cache Port
///
/// - 过期条目视为不存在
/// - 达到容量时先清理过期条目，再淘汰最早写入的条目
pub trait CachePort<V>: Send + Sync
where
    V: Clone + Send + Sync,
{
    fn get(&self, key: &str) -> Option<V>;

    fn put(&self, key: String, value: V);

    fn remove(&self, key: &str) -> bool;

    fn clear(&self);

    fn stats(&self) -> CacheStats;
}

/// 空缓存（禁用缓存时使用）
pub struct NullCache;

impl<V> CachePort<V> for NullCache
where
    V: Clone + Send + Sync,
{
    fn get(&self, _key: &str) -> Option<V> {
        None
    }

    fn put(&self, _key: String, _value: V) {}

    fn remove(&self, _key: &str) -> bool {
        false
    }

    fn clear(&self) {}

    fn stats(&self) -> CacheStats {
        CacheStats::default()
    }
}

/// 生成缓存 key
///
/// 使用 scope + md5(model + input) 作为缓存 key，input 为原始提示文本
pub fn generate_cache_key(scope: &str, model: &str, input: &str) -> String {
    let mut context = md5::Context::new();
    context.consume(model.as_bytes());
    context.consume([0u8]);
    context.consume(input.as_bytes());
    format!("{}:{:x}", scope, context.compute())
}
