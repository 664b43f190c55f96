use std::collections::HashSet;
use std::sync::RwLock;

use log::debug;
use reqwest::Url;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PeerError {
    /// The address carries neither a network location nor a usable
    /// host:port form.
    #[error("invalid peer address: {0:?}")]
    InvalidAddress(String),
}

/// Registry of peer nodes, kept as normalized `host:port` strings and
/// deduplicated. Registration may run concurrently with resolution, which
/// iterates a snapshot.
#[derive(Debug, Default)]
pub struct PeerSet {
    nodes: RwLock<HashSet<String>>,
}

impl PeerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a peer given either a full URL or a bare `host:port`.
    /// Returns the normalized form actually stored.
    pub fn register(&self, address: &str) -> Result<String, PeerError> {
        let normalized = normalize_address(address)?;
        let mut nodes = self.nodes.write().expect("peer set lock poisoned");
        if nodes.insert(normalized.clone()) {
            debug!("PEERS - registered {normalized}");
        }
        Ok(normalized)
    }

    /// Snapshot of the registry for iteration outside the lock.
    pub fn snapshot(&self) -> Vec<String> {
        let nodes = self.nodes.read().expect("peer set lock poisoned");
        let mut list: Vec<String> = nodes.iter().cloned().collect();
        list.sort();
        list
    }

    pub fn len(&self) -> usize {
        self.nodes.read().expect("peer set lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reduce an address to `host:port`. Full URLs keep their network location
/// and drop everything else; inputs without a scheme separator are taken as
/// bare `host:port`, minus any trailing slash.
fn normalize_address(address: &str) -> Result<String, PeerError> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(PeerError::InvalidAddress(address.to_string()));
    }
    if !trimmed.contains("://") {
        return Ok(trimmed.trim_end_matches('/').to_string());
    }
    let url = Url::parse(trimmed).map_err(|_| PeerError::InvalidAddress(address.to_string()))?;
    match url.host_str() {
        Some(host) => Ok(match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }),
        None => Err(PeerError::InvalidAddress(address.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::PeerSet;

    #[test]
    fn url_and_bare_forms_normalize_alike() {
        let peers = PeerSet::new();
        peers.register("192.168.0.5:5000").unwrap();
        peers.register("http://192.168.0.5:5000/").unwrap();
        assert_eq!(peers.snapshot(), vec!["192.168.0.5:5000".to_string()]);
    }

    #[test]
    fn url_path_and_query_are_dropped() {
        let peers = PeerSet::new();
        let stored = peers.register("http://node.example:8080/chain?full=1").unwrap();
        assert_eq!(stored, "node.example:8080");
    }

    #[test]
    fn host_without_port_is_kept() {
        let peers = PeerSet::new();
        assert_eq!(peers.register("http://node.example/").unwrap(), "node.example");
    }

    #[test]
    fn empty_and_hostless_addresses_are_rejected() {
        let peers = PeerSet::new();
        assert!(peers.register("").is_err());
        assert!(peers.register("   ").is_err());
        assert!(peers.register("http://").is_err());
        assert!(peers.is_empty());
    }

    #[test]
    fn registration_deduplicates() {
        let peers = PeerSet::new();
        peers.register("localhost:5001").unwrap();
        peers.register("localhost:5001").unwrap();
        assert_eq!(peers.len(), 1);
    }
}
