//! Backend for a launcher-style Tailscale frontend: fetches node status
//! from the `tailscale` CLI, caches it for a short TTL, and renders a
//! filtered, ranked row list plus a connection toggle. The launcher host
//! itself lives elsewhere; this crate exposes the typed boundary it
//! drives (queries in, display rows and tagged activation actions out).

pub mod actions;
pub mod cache;
pub mod config;
pub mod engine;
pub mod matcher;
pub mod tailscale;
pub mod types;

pub use actions::{DisplayItem, ItemAction};
pub use cache::NodeCache;
pub use config::Config;
pub use engine::{ActivationOutcome, Engine};
pub use tailscale::{Node, StatusSource, TailnetStatus, TailscaleCli};
pub use types::BackendError;
