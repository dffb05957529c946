//! Bounded polling for eventually consistent reads

use std::{future::Future, time::Duration};

use tokio::time::Instant;

use crate::error::IamsError;

/// How long to keep polling and how often to ask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub timeout: Duration,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(90),
            interval: Duration::from_secs(1),
        }
    }
}

impl PollPolicy {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }
}

/// Call `probe` until it returns `true` or the policy times out
///
/// Probe errors abort immediately; return `Ok(false)` for "not yet".
/// The probe always runs at least once, even with a zero timeout.
pub async fn poll_until<F, Fut>(what: &str, policy: PollPolicy, mut probe: F) -> Result<(), IamsError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, IamsError>>,
{
    let started = Instant::now();
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        if probe().await? {
            tracing::debug!("{} after {} attempt(s)", what, attempts);
            return Ok(());
        }

        let waited = started.elapsed();
        if waited >= policy.timeout {
            return Err(IamsError::timeout(what, waited));
        }

        let remaining = policy.timeout - waited;
        tokio::time::sleep(policy.interval.min(remaining)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    };

    #[tokio::test(start_paused = true)]
    async fn test_poll_succeeds_after_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = poll_until("member visible", PollPolicy::default(), || {
            let counter = counter.clone();
            async move { Ok(counter.fetch_add(1, Ordering::SeqCst) >= 2) }
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_times_out() {
        let policy = PollPolicy::new(Duration::from_secs(5), Duration::from_secs(1));
        let result = poll_until("never", policy, || async { Ok(false) }).await;

        match result {
            Err(IamsError::Timeout { what, waited }) => {
                assert_eq!(what, "never");
                assert!(waited >= Duration::from_secs(5));
            }
            other => panic!("Expected timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_poll_propagates_probe_error() {
        let result = poll_until("broken", PollPolicy::default(), || async {
            Err(IamsError::authentication("expired"))
        })
        .await;

        assert!(matches!(result, Err(IamsError::Authentication { .. })));
    }
}
