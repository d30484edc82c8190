//! Open file descriptor budget.
//!
//! A full sweep holds a socket per port probe and a child process per ping,
//! so the soft `RLIMIT_NOFILE` (often 1024 or 256) is easy to exhaust.

use std::io;
use std::time::Duration;

use crate::error::Result;

/// Attempts made when an operation fails for lack of descriptors.
pub const EXHAUSTION_RETRIES: u32 = 3;

/// Pause between those attempts.
pub const EXHAUSTION_BACKOFF: Duration = Duration::from_millis(100);

/// Concurrent TCP connects allowed when the descriptor limit is unknown.
pub const DEFAULT_CONNECT_BUDGET: usize = 256;

const MIN_CONNECT_BUDGET: usize = 32;
const MAX_CONNECT_BUDGET: usize = 1024;

#[cfg(unix)]
const EXHAUSTED: [i32; 2] = [nix::libc::EMFILE, nix::libc::ENFILE];

// WSAEMFILE
#[cfg(not(unix))]
const EXHAUSTED: [i32; 1] = [10024];

/// Whether `error` means the process or system ran out of descriptors.
pub fn is_exhausted(error: &io::Error) -> bool {
    error
        .raw_os_error()
        .is_some_and(|code| EXHAUSTED.contains(&code))
}

/// Current soft limit on open files, if the platform has one.
#[cfg(unix)]
pub fn open_file_limit() -> Option<u64> {
    use nix::sys::resource::{getrlimit, Resource};

    getrlimit(Resource::RLIMIT_NOFILE)
        .ok()
        .map(|(soft, _)| soft as u64)
}

#[cfg(not(unix))]
pub fn open_file_limit() -> Option<u64> {
    None
}

/// Raise the soft open-file limit to the hard limit and return the new soft limit.
///
/// macOS rejects soft limits above `OPEN_MAX` even when the hard limit is
/// unlimited, so the target is capped there.
#[cfg(unix)]
pub fn raise_open_file_limit() -> Result<u64> {
    use nix::libc::rlim_t;
    use nix::sys::resource::{getrlimit, setrlimit, Resource};

    const OPEN_MAX: rlim_t = 10240;

    let (soft, hard) = getrlimit(Resource::RLIMIT_NOFILE).map_err(io::Error::from)?;
    let target = if cfg!(target_os = "macos") {
        hard.min(OPEN_MAX)
    } else {
        hard
    };

    if soft >= target {
        return Ok(soft as u64);
    }

    setrlimit(Resource::RLIMIT_NOFILE, target, hard).map_err(io::Error::from)?;
    tracing::debug!(from = soft as u64, to = target as u64, "raised open file limit");
    Ok(target as u64)
}

/// Windows has no per-process descriptor rlimit to raise.
#[cfg(not(unix))]
pub fn raise_open_file_limit() -> Result<u64> {
    Ok(u64::MAX)
}

/// Concurrent TCP connects that fit in the current descriptor limit.
///
/// A quarter of the limit goes to sockets; the rest covers ping children,
/// DNS workers and the runtime itself.
pub fn connect_budget() -> usize {
    match open_file_limit() {
        Some(limit) => usize::try_from(limit / 4)
            .unwrap_or(MAX_CONNECT_BUDGET)
            .clamp(MIN_CONNECT_BUDGET, MAX_CONNECT_BUDGET),
        None => DEFAULT_CONNECT_BUDGET,
    }
}
