//! Short-TTL cache for the tailnet node list.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::tailscale::{Node, StatusSource};

/// Holds the last fetched node list. Single writer, single reader: the
/// hosting runtime dispatches events serially, so no locking is needed.
pub struct NodeCache {
    nodes: Vec<Node>,
    fetched_at: Option<Instant>,
    ttl: Duration,
}

impl NodeCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            nodes: Vec::new(),
            fetched_at: None,
            ttl,
        }
    }

    /// An uninitialized cache (`fetched_at == None`) is always expired.
    pub fn is_fresh(&self, now: Instant) -> bool {
        self.fetched_at
            .map(|stamp| now.duration_since(stamp) < self.ttl)
            .unwrap_or(false)
    }

    /// Returns the cached node list, refreshing it from `source` when the
    /// TTL window has elapsed. The list is replaced wholesale; a failed
    /// fetch caches an empty list so the next attempt waits out the TTL
    /// instead of re-running a broken command on every keystroke.
    pub async fn list_nodes(&mut self, now: Instant, source: &dyn StatusSource) -> &[Node] {
        if self.is_fresh(now) {
            return &self.nodes;
        }

        self.nodes = match source.fetch_status().await {
            Ok(status) => {
                debug!(count = status.nodes.len(), "Refreshed node cache");
                status.nodes
            }
            Err(err) => {
                warn!(error = %err, "Status fetch failed, caching empty node list");
                Vec::new()
            }
        };
        self.fetched_at = Some(now);

        &self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tailscale::testing::{node, ScriptedSource};

    fn sample_nodes() -> Vec<Node> {
        vec![
            node("laptop", "100.102.11.93", true),
            node("nas", "100.103.105.243", true),
        ]
    }

    #[tokio::test]
    async fn serves_cached_list_within_ttl() {
        let source = ScriptedSource::with_nodes(sample_nodes(), true);
        let mut cache = NodeCache::new(Duration::from_secs(10));
        let now = Instant::now();

        let first = cache.list_nodes(now, &source).await.to_vec();
        let second = cache
            .list_nodes(now + Duration::from_secs(9), &source)
            .await
            .to_vec();

        assert_eq!(first, second);
        assert_eq!(source.fetch_calls(), 1);
    }

    #[tokio::test]
    async fn refetches_once_after_ttl_elapses() {
        let source = ScriptedSource::with_nodes(sample_nodes(), true);
        let mut cache = NodeCache::new(Duration::from_secs(10));
        let now = Instant::now();

        cache.list_nodes(now, &source).await;
        cache.list_nodes(now + Duration::from_secs(10), &source).await;

        assert_eq!(source.fetch_calls(), 2);
    }

    #[test]
    fn uninitialized_cache_is_expired() {
        let cache = NodeCache::new(Duration::from_secs(10));
        assert!(!cache.is_fresh(Instant::now()));
    }

    #[tokio::test]
    async fn failed_fetch_caches_empty_list() {
        let source = ScriptedSource::failing();
        let mut cache = NodeCache::new(Duration::from_secs(10));
        let now = Instant::now();

        assert!(cache.list_nodes(now, &source).await.is_empty());
        // Still within the TTL: the empty result is served without a retry.
        assert!(cache
            .list_nodes(now + Duration::from_secs(1), &source)
            .await
            .is_empty());
        assert_eq!(source.fetch_calls(), 1);
    }
}
