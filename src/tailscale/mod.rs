mod api;
mod client;
mod models;

pub use api::{NodeRecord, StatusResponse};
pub use client::{StatusSource, TailscaleCli};
pub use models::{Node, TailnetStatus};

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::types::BackendError;

    use super::{Node, StatusSource, TailnetStatus};

    pub(crate) fn node(hostname: &str, ipv4: &str, online: bool) -> Node {
        Node {
            hostname: hostname.to_string(),
            ipv4: ipv4.to_string(),
            online,
        }
    }

    /// Scripted status source that records how it was driven.
    pub(crate) struct ScriptedSource {
        nodes: Vec<Node>,
        online: bool,
        fail: bool,
        fetch_calls: AtomicUsize,
        toggle_log: Mutex<Vec<bool>>,
    }

    impl ScriptedSource {
        pub fn with_nodes(nodes: Vec<Node>, online: bool) -> Self {
            Self {
                nodes,
                online,
                fail: false,
                fetch_calls: AtomicUsize::new(0),
                toggle_log: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::with_nodes(Vec::new(), false)
            }
        }

        pub fn fetch_calls(&self) -> usize {
            self.fetch_calls.load(Ordering::SeqCst)
        }

        pub fn toggles(&self) -> Vec<bool> {
            self.toggle_log.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StatusSource for ScriptedSource {
        async fn fetch_status(&self) -> Result<TailnetStatus, BackendError> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(BackendError::Command("scripted status failure".to_string()));
            }
            Ok(TailnetStatus {
                nodes: self.nodes.clone(),
                self_online: self.online,
            })
        }

        async fn toggle_connection(&self, currently_online: bool) {
            self.toggle_log.lock().unwrap().push(currently_online);
        }
    }
}
