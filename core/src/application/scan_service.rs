//! Subnet scan orchestration.

use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::IdentityResolver;
use crate::domain::{ScanProgress, ScanReport, ScanResult, ScanState, Subnet, HOST_COUNT};
use crate::error::{Error, Result};
use crate::ports::{
    HostnameResolverPort, LivenessProbePort, LocalAddressPort, NeighborTablePort, PortScannerPort,
};

/// Per-host pipeline: liveness, then identity and ports together.
pub struct HostInspector<P, H, N, S> {
    liveness: P,
    identity: IdentityResolver<H, N>,
    ports: S,
}

impl<P, H, N, S> HostInspector<P, H, N, S>
where
    P: LivenessProbePort,
    H: HostnameResolverPort,
    N: NeighborTablePort,
    S: PortScannerPort,
{
    pub fn new(liveness: P, identity: IdentityResolver<H, N>, ports: S) -> Self {
        Self {
            liveness,
            identity,
            ports,
        }
    }

    /// Result for `address`, or `None` when the host did not answer.
    pub async fn inspect(&self, address: Ipv4Addr) -> Option<ScanResult> {
        if !self.liveness.is_alive(address).await {
            return None;
        }

        let (identity, open_ports) =
            tokio::join!(self.identity.resolve(address), self.ports.scan(address));

        Some(ScanResult::alive(address, identity, open_ports))
    }
}

/// Clears the running flag even if the scan future is dropped or panics.
///
/// A scan dropped before it settled its state ends as `Failed`.
struct RunningGuard<'a> {
    running: &'a AtomicBool,
    state: &'a RwLock<ScanState>,
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        {
            let mut state = self.state.write();
            if state.is_running() {
                *state = ScanState::Failed {
                    reason: "scan cancelled".to_string(),
                };
            }
        }
        self.running.store(false, Ordering::SeqCst);
    }
}

/// Application service that runs subnet scans.
///
/// Owns the result collection and the progress counter; both are written
/// only by the aggregation loop inside [`ScanService::run`].
pub struct ScanService<A, P, H, N, S> {
    local: A,
    inspector: Arc<HostInspector<P, H, N, S>>,
    max_concurrency: Option<usize>,
    state: RwLock<ScanState>,
    results: RwLock<Vec<ScanResult>>,
    progress: Arc<ScanProgress>,
    running: AtomicBool,
}

impl<A, P, H, N, S> ScanService<A, P, H, N, S>
where
    A: LocalAddressPort,
    P: LivenessProbePort + 'static,
    H: HostnameResolverPort + 'static,
    N: NeighborTablePort + 'static,
    S: PortScannerPort + 'static,
{
    /// Create a new scan service with the given capabilities.
    pub fn new(local: A, inspector: HostInspector<P, H, N, S>) -> Self {
        Self {
            local,
            inspector: Arc::new(inspector),
            max_concurrency: None,
            state: RwLock::new(ScanState::Idle),
            results: RwLock::new(Vec::new()),
            progress: Arc::new(ScanProgress::new(HOST_COUNT)),
            running: AtomicBool::new(false),
        }
    }

    /// Cap the number of hosts probed at once. `None` probes all 254 together.
    pub fn with_max_concurrency(mut self, limit: Option<usize>) -> Self {
        self.max_concurrency = limit.map(|n| n.max(1));
        self
    }

    pub fn max_concurrency(&self) -> Option<usize> {
        self.max_concurrency
    }

    /// Determine the /24 to enumerate from the local address.
    pub async fn detect_subnet(&self) -> Result<Subnet> {
        let address = self.local.local_address().await?;
        Subnet::from_local(address)
    }

    /// Run one scan to completion.
    ///
    /// Fails only if the local subnet cannot be determined, or with
    /// [`Error::ScanInProgress`] if another scan is running.
    pub async fn run(&self) -> Result<ScanReport> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(Error::ScanInProgress);
        }
        let _guard = RunningGuard {
            running: &self.running,
            state: &self.state,
        };

        let started = Instant::now();
        self.results.write().clear();
        self.progress.reset();
        *self.state.write() = ScanState::Running;

        let subnet = match self.detect_subnet().await {
            Ok(subnet) => subnet,
            Err(e) => {
                error!(error = %e, "scan aborted");
                *self.state.write() = ScanState::Failed {
                    reason: e.to_string(),
                };
                return Err(e);
            }
        };

        info!(%subnet, local = %subnet.local, limit = ?self.max_concurrency, "scan started");
        self.sweep(subnet).await;

        let results = self.results.read().clone();
        let hosts = results.len();
        *self.state.write() = ScanState::Completed { hosts };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        info!(hosts, elapsed_ms, "scan completed");

        Ok(ScanReport {
            id: Uuid::new_v4(),
            subnet,
            results,
            elapsed_ms,
        })
    }

    /// Fan out one task per candidate and aggregate their outcomes.
    async fn sweep(&self, subnet: Subnet) {
        let limiter = self.max_concurrency.map(|n| Arc::new(Semaphore::new(n)));
        let (tx, mut rx) = mpsc::channel::<Option<ScanResult>>(HOST_COUNT);

        for address in subnet.targets() {
            let tx = tx.clone();
            let inspector = Arc::clone(&self.inspector);
            let limiter = limiter.clone();

            tokio::spawn(async move {
                let _permit = match limiter {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                let outcome = inspector.inspect(address).await;
                let _ = tx.send(outcome).await;
            });
        }
        drop(tx);

        // Closes once every host task has finished.
        while let Some(outcome) = rx.recv().await {
            if let Some(result) = outcome {
                debug!(address = %result.address, ports = ?result.open_ports, "host up");
                self.results.write().push(result);
            }
            self.progress.advance();
        }

        let processed = self.progress.completed();
        if processed < HOST_COUNT {
            warn!(
                missing = HOST_COUNT - processed,
                "host tasks ended without reporting"
            );
            for _ in processed..HOST_COUNT {
                self.progress.advance();
            }
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ScanState {
        self.state.read().clone()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Snapshot of the result collection (partial while a scan runs).
    pub fn results(&self) -> Vec<ScanResult> {
        self.results.read().clone()
    }

    /// Number of hosts found so far.
    pub fn device_count(&self) -> usize {
        self.results.read().len()
    }

    /// Shared progress handle, readable from any thread.
    pub fn progress(&self) -> Arc<ScanProgress> {
        Arc::clone(&self.progress)
    }
}
