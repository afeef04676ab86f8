use serde::Serialize;

use super::api::{NodeRecord, StatusResponse};

/// Normalized node snapshot for UI display. Replaced wholesale on each
/// refresh, never mutated in place.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Node {
    pub hostname: String,
    /// First IPv4 assigned to the node, empty string when it has none.
    pub ipv4: String,
    pub online: bool,
}

impl Node {
    pub fn from_record(record: &NodeRecord) -> Self {
        Self {
            hostname: record.host_name.clone(),
            ipv4: first_ipv4(&record.tailscale_ips),
            online: record.online,
        }
    }
}

/// One parsed status snapshot: the full node list plus the self node's
/// online flag.
#[derive(Debug, Clone)]
pub struct TailnetStatus {
    pub nodes: Vec<Node>,
    pub self_online: bool,
}

impl TailnetStatus {
    /// Normalizes the wire response: self node first, then peers ordered
    /// by case-insensitive hostname.
    pub fn from_response(response: StatusResponse) -> Self {
        let self_online = response.self_node.online;

        let mut nodes = vec![Node::from_record(&response.self_node)];
        let mut peers: Vec<Node> = response.peers.values().map(Node::from_record).collect();
        peers.sort_by(|a, b| a.hostname.to_lowercase().cmp(&b.hostname.to_lowercase()));
        nodes.extend(peers);

        Self { nodes, self_online }
    }
}

fn first_ipv4(ips: &[String]) -> String {
    ips.iter()
        .find(|ip| ip.contains('.'))
        .cloned()
        .unwrap_or_default()
}
