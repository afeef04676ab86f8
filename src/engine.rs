//! Query handling and row rendering over the cached node list.

use std::time::{Duration, Instant};

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::actions::{DisplayItem, ItemAction};
use crate::cache::NodeCache;
use crate::config::Config;
use crate::matcher;
use crate::tailscale::{Node, StatusSource};

/// The external daemon's state transition is not synchronous with the
/// toggle command's return, so status is re-checked after a settle delay.
const SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Result of dispatching an activation.
#[derive(Debug)]
pub enum ActivationOutcome {
    /// Re-rendered row list (toggle path).
    Rendered(Vec<DisplayItem>),
    /// Value for the host to copy to the clipboard.
    Clipboard(String),
}

/// Owns the node cache, the status source and the self-online flag.
/// Events are handled to completion one at a time; the hosting runtime
/// serializes dispatch.
pub struct Engine<S: StatusSource> {
    config: Config,
    cache: NodeCache,
    source: S,
    self_online: bool,
}

struct Candidate {
    keyword: String,
    item: DisplayItem,
}

impl<S: StatusSource> Engine<S> {
    pub fn new(config: Config, source: S) -> Self {
        let cache = NodeCache::new(config.cache_ttl());
        Self {
            config,
            cache,
            source,
            self_online: false,
        }
    }

    /// Handles a keystroke event: refreshes the self-online flag (uncached)
    /// and renders the filtered row list.
    pub async fn handle_query(&mut self, query: Option<&str>) -> Vec<DisplayItem> {
        self.refresh_online().await;
        self.render(query).await
    }

    /// Dispatches an item activation.
    pub async fn handle_activation(&mut self, action: ItemAction) -> ActivationOutcome {
        match action {
            ItemAction::Toggle { query } => {
                self.source.toggle_connection(self.self_online).await;
                sleep(SETTLE_DELAY).await;
                self.refresh_online().await;
                ActivationOutcome::Rendered(self.render(query.as_deref()).await)
            }
            ItemAction::Copy { value } => ActivationOutcome::Clipboard(value),
        }
    }

    /// Uncached online check. On failure the flag drops to offline rather
    /// than keeping a possibly stale value.
    async fn refresh_online(&mut self) {
        self.self_online = match self.source.fetch_status().await {
            Ok(status) => status.self_online,
            Err(err) => {
                warn!(error = %err, "Online check failed, treating as offline");
                false
            }
        };
    }

    async fn render(&mut self, query: Option<&str>) -> Vec<DisplayItem> {
        let limit = self.config.effective_limit();
        if limit == 0 {
            return Vec::new();
        }

        let mut candidates = vec![status_row(self.self_online, query)];
        let nodes = self.cache.list_nodes(Instant::now(), &self.source).await;
        candidates.extend(nodes.iter().map(node_row));

        let ranked = match query {
            Some(q) if !q.is_empty() => {
                matcher::rank_by_key(q, candidates, |c| c.keyword.as_str())
            }
            _ => candidates,
        };

        debug!(query = ?query, rows = ranked.len().min(limit), "Rendered result list");
        ranked
            .into_iter()
            .take(limit)
            .map(|candidate| candidate.item)
            .collect()
    }
}

fn status_row(online: bool, query: Option<&str>) -> Candidate {
    let state = if online { "Online" } else { "Offline" };
    Candidate {
        keyword: "status".to_string(),
        item: DisplayItem {
            icon: format!("images/{}.png", state.to_lowercase()),
            title: "Status".to_string(),
            subtitle: format!("You're {state}"),
            action: ItemAction::Toggle {
                query: query.map(str::to_string),
            },
        },
    }
}

fn node_row(node: &Node) -> Candidate {
    Candidate {
        keyword: node.hostname.clone(),
        item: DisplayItem {
            icon: "images/tailscale.png".to_string(),
            title: if node.online {
                node.hostname.clone()
            } else {
                format!("{} (offline)", node.hostname)
            },
            subtitle: node.ipv4.clone(),
            action: ItemAction::Copy {
                value: node.ipv4.clone(),
            },
        },
    }
}
