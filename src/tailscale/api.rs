use serde::Deserialize;
use std::collections::HashMap;

/// Top-level shape of `tailscale status --json`. Only the fields the
/// backend consumes are modeled; everything else is ignored.
#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    #[serde(rename = "Self")]
    pub self_node: NodeRecord,

    #[serde(rename = "Peer", default)]
    pub peers: HashMap<String, NodeRecord>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NodeRecord {
    #[serde(rename = "HostName")]
    pub host_name: String,

    #[serde(rename = "TailscaleIPs", default)]
    pub tailscale_ips: Vec<String>,

    #[serde(rename = "Online", default)]
    pub online: bool,
}
