//! TCP connect scan of the candidate service ports.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::sync::{mpsc, Semaphore};
use tracing::{trace, warn};

use super::limits::{self, EXHAUSTION_BACKOFF, EXHAUSTION_RETRIES};
use crate::domain::COMMON_PORTS;
use crate::ports::PortScannerPort;

/// Probes every candidate port concurrently with a full TCP handshake.
///
/// All scans through one scanner share a connect budget, so a sweep of many
/// live hosts never holds more sockets than the descriptor limit allows.
pub struct TcpConnectScanner {
    ports: Vec<u16>,
    timeout: Duration,
    budget: usize,
    connects: Arc<Semaphore>,
}

impl TcpConnectScanner {
    /// Scanner over [`COMMON_PORTS`], budgeted from the current descriptor limit.
    pub fn new(timeout: Duration) -> Self {
        Self::with_ports(COMMON_PORTS.to_vec(), timeout)
    }

    /// Scanner over an explicit port list.
    pub(crate) fn with_ports(ports: Vec<u16>, timeout: Duration) -> Self {
        let budget = limits::connect_budget();
        Self {
            ports,
            timeout,
            budget,
            connects: Arc::new(Semaphore::new(budget)),
        }
    }

    /// Cap the number of connects in flight across all hosts.
    pub fn with_connect_budget(mut self, budget: usize) -> Self {
        self.budget = budget.max(1);
        self.connects = Arc::new(Semaphore::new(self.budget));
        self
    }

    pub fn ports(&self) -> &[u16] {
        &self.ports
    }

    pub fn connect_budget(&self) -> usize {
        self.budget
    }

    #[cfg(test)]
    fn idle_connects(&self) -> usize {
        self.connects.available_permits()
    }
}

impl Default for TcpConnectScanner {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}

/// Whether `addr` completes a handshake within `timeout`.
///
/// The stream is dropped immediately; no payload is exchanged. Running out
/// of descriptors is retried, never reported as a closed port.
async fn probe_port(addr: SocketAddr, timeout: Duration) -> bool {
    for attempt in 1..=EXHAUSTION_RETRIES {
        match tokio::time::timeout(timeout, TcpStream::connect(addr)).await {
            Ok(Ok(_stream)) => return true,
            Ok(Err(e)) if limits::is_exhausted(&e) => {
                warn!(%addr, attempt, error = %e, "connect could not open a socket");
                tokio::time::sleep(EXHAUSTION_BACKOFF).await;
            }
            Ok(Err(e)) => {
                trace!(%addr, error = %e, "port closed");
                return false;
            }
            Err(_) => {
                trace!(%addr, "port filtered (timeout)");
                return false;
            }
        }
    }
    false
}

impl PortScannerPort for TcpConnectScanner {
    async fn scan(&self, address: Ipv4Addr) -> Vec<u16> {
        let (tx, mut rx) = mpsc::channel(self.ports.len().max(1));

        for &port in &self.ports {
            let tx = tx.clone();
            let timeout = self.timeout;
            let connects = Arc::clone(&self.connects);
            tokio::spawn(async move {
                // Held until the stream inside probe_port is closed.
                let _permit = connects.acquire_owned().await.ok();
                let addr = SocketAddr::from((address, port));
                if probe_port(addr, timeout).await {
                    let _ = tx.send(port).await;
                }
            });
        }
        drop(tx);

        // Closes once every probe task has dropped its sender.
        let mut open_ports = Vec::new();
        while let Some(port) = rx.recv().await {
            open_ports.push(port);
        }
        open_ports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;
    use tokio::task::JoinSet;

    async fn closed_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        port
    }

    #[test]
    fn test_default_ports_are_canonical() {
        let scanner = TcpConnectScanner::default();
        assert_eq!(scanner.ports(), &COMMON_PORTS[..]);
    }

    #[tokio::test]
    async fn test_single_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let open = listener.local_addr().unwrap().port();
        let closed = closed_port().await;

        let scanner =
            TcpConnectScanner::with_ports(vec![closed, open], Duration::from_millis(500));
        let ports = scanner.scan(Ipv4Addr::LOCALHOST).await;

        assert_eq!(ports, vec![open]);
    }

    #[tokio::test]
    async fn test_no_listeners() {
        let a = closed_port().await;
        let b = closed_port().await;

        let scanner = TcpConnectScanner::with_ports(vec![a, b], Duration::from_millis(500));
        assert!(scanner.scan(Ipv4Addr::LOCALHOST).await.is_empty());
    }

    #[tokio::test]
    async fn test_multiple_listeners_any_order() {
        let first = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let second = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let p1 = first.local_addr().unwrap().port();
        let p2 = second.local_addr().unwrap().port();

        let scanner = TcpConnectScanner::with_ports(vec![p1, p2], Duration::from_millis(500));
        let mut ports = scanner.scan(Ipv4Addr::LOCALHOST).await;
        ports.sort_unstable();

        let mut expected = vec![p1, p2];
        expected.sort_unstable();
        assert_eq!(ports, expected);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_many_hosts_share_connect_budget() {
        let mut listeners = Vec::new();
        for _ in 0..COMMON_PORTS.len() {
            listeners.push(TcpListener::bind("127.0.0.1:0").await.unwrap());
        }
        let mut expected: Vec<u16> = listeners
            .iter()
            .map(|l| l.local_addr().unwrap().port())
            .collect();
        expected.sort_unstable();

        let scanner = Arc::new(
            TcpConnectScanner::with_ports(expected.clone(), Duration::from_secs(2))
                .with_connect_budget(8),
        );

        let mut scans = JoinSet::new();
        for _ in 0..40 {
            let scanner = Arc::clone(&scanner);
            scans.spawn(async move { scanner.scan(Ipv4Addr::LOCALHOST).await });
        }

        let mut complete = 0;
        while let Some(found) = scans.join_next().await {
            let mut found = found.unwrap();
            found.sort_unstable();
            assert_eq!(found, expected);
            complete += 1;
        }

        assert_eq!(complete, 40);
        assert_eq!(scanner.idle_connects(), 8);
    }

    #[test]
    fn test_connect_budget_defaults_and_clamps() {
        let scanner = TcpConnectScanner::default();
        assert!(scanner.connect_budget() >= 1);
        assert_eq!(scanner.idle_connects(), scanner.connect_budget());

        let scanner = scanner.with_connect_budget(0);
        assert_eq!(scanner.connect_budget(), 1);
    }

    #[tokio::test]
    async fn test_empty_port_list() {
        let scanner = TcpConnectScanner::with_ports(Vec::new(), Duration::from_millis(100));
        assert!(scanner.scan(Ipv4Addr::LOCALHOST).await.is_empty());
    }
}
