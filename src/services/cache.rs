use crate::models::MealAdvice;
use std::time::Duration;

/// In-memory TTL cache for generated meal advice.
///
/// Repeated analyses of the same plate (same labels, portion, conditions)
/// reuse the generator's output instead of re-invoking it. Single-tier and
/// process-local; nothing here survives a restart.
pub struct AdviceCache {
    cache: moka::future::Cache<String, MealAdvice>,
}

impl AdviceCache {
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let cache = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    pub async fn get(&self, key: &str) -> Option<MealAdvice> {
        let hit = self.cache.get(key).await;
        if hit.is_some() {
            tracing::trace!("Advice cache hit: {}", key);
        }
        hit
    }

    pub async fn insert(&self, key: String, advice: MealAdvice) {
        self.cache.insert(key, advice).await;
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Key for generated advice. Labels and conditions are sorted so the key
    /// does not depend on detection order.
    pub fn advice(labels: &[String], portion: f64, conditions: &[String]) -> String {
        let mut labels: Vec<&str> = labels.iter().map(|s| s.as_str()).collect();
        labels.sort_unstable();
        let mut conditions: Vec<&str> = conditions.iter().map(|s| s.as_str()).collect();
        conditions.sort_unstable();

        format!(
            "advice:{}:{:.2}:{}",
            labels.join("+"),
            portion,
            conditions.join("+")
        )
    }
}
