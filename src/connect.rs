use std::thread;
use std::time::Duration;

use anyhow::Result;

use crate::error::BoardError;

/// Network uplink that has to be up before anything is fetched.
pub trait Link {
    fn connect(&mut self, timeout: Duration) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff: Duration,
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff: Duration::from_secs(5),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Tries the link up to `policy.attempts` times, sleeping `policy.backoff`
/// after each failure.
pub fn connect_with_retry<L: Link + ?Sized>(
    link: &mut L,
    policy: &RetryPolicy,
) -> Result<(), BoardError> {
    let attempts = policy.attempts.max(1);
    for attempt in 1..=attempts {
        log::info!("connecting (attempt {attempt}/{attempts})");
        match link.connect(policy.timeout) {
            Ok(()) => {
                log::info!("connected");
                return Ok(());
            }
            Err(err) => {
                log::warn!("connection attempt {attempt} failed: {err:#}");
                if attempt < attempts && !policy.backoff.is_zero() {
                    thread::sleep(policy.backoff);
                }
            }
        }
    }
    log::error!("exceeded {attempts} connection attempts");
    Err(BoardError::NetworkUnavailable { attempts })
}
