use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff settings for store connection attempts.
///
/// Delays grow by `backoff_multiplier` after each failure, capped at
/// `max_delay_ms`. Jitter scales each delay to 50-100% of its value so
/// restarting replicas do not reconnect in lockstep.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt (total attempts = this + 1)
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
    pub use_jitter: bool,
}

impl RetryConfig {
    /// Defaults: 3 retries, 100ms initial delay, 5s cap, doubling, jittered.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay_ms: u64) -> Self {
        self.initial_delay_ms = delay_ms;
        self
    }

    pub fn with_max_delay(mut self, delay_ms: u64) -> Self {
        self.max_delay_ms = delay_ms;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 100,
            max_delay_ms: 5000,
            backoff_multiplier: 2.0,
            use_jitter: true,
        }
    }
}

/// Run `operation` until it succeeds or the retry budget is spent.
///
/// The last error is returned once `config.max_retries` retries have
/// failed. Works with any fallible async closure:
///
/// ```ignore
/// let client = retry_with_backoff(
///     || database::mongodb::connect(&url),
///     RetryConfig::new().with_max_retries(5),
/// )
/// .await?;
/// ```
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0u32;
    let mut delay_ms = config.initial_delay_ms;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    debug!("Operation succeeded after {attempt} retries");
                }
                return Ok(value);
            }
            Err(e) if attempt >= config.max_retries => {
                warn!("Giving up after {} attempts: {e}", attempt + 1);
                return Err(e);
            }
            Err(e) => {
                attempt += 1;

                let wait_ms = if config.use_jitter {
                    jittered(delay_ms)
                } else {
                    delay_ms
                };

                debug!(
                    "Attempt {attempt}/{} failed: {e}. Retrying in {wait_ms}ms",
                    config.max_retries
                );
                tokio::time::sleep(Duration::from_millis(wait_ms)).await;

                delay_ms = ((delay_ms as f64 * config.backoff_multiplier) as u64)
                    .min(config.max_delay_ms);
            }
        }
    }
}

/// [`retry_with_backoff`] with the default budget.
pub async fn retry<F, Fut, T, E>(operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    retry_with_backoff(operation, RetryConfig::default()).await
}

/// Scale a delay to 50-100% of its value.
///
/// Seeded from the wall clock through a fresh `RandomState`, which is
/// random enough to spread out reconnects without pulling in an RNG crate.
fn jittered(delay_ms: u64) -> u64 {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    let roll = RandomState::new().hash_one(std::time::SystemTime::now()) % 50;
    let factor = 0.5 + roll as f64 / 100.0;

    (delay_ms as f64 * factor) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fail_first<T: Clone + Send + 'static>(
        failures: u32,
        value: T,
    ) -> (Arc<AtomicU32>, impl FnMut() -> std::pin::Pin<Box<dyn Future<Output = Result<T, String>> + Send>>)
    {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let op = move || {
            let calls = counter.clone();
            let value = value.clone();
            Box::pin(async move {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < failures {
                    Err(format!("failure {}", n + 1))
                } else {
                    Ok(value)
                }
            }) as std::pin::Pin<Box<dyn Future<Output = _> + Send>>
        };

        (calls, op)
    }

    #[tokio::test]
    async fn test_first_attempt_success_calls_once() {
        let (calls, op) = fail_first(0, "ok");

        let result = retry(op).await;

        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recovers_from_transient_failures() {
        let (calls, op) = fail_first(2, "ok");
        let config = RetryConfig::new().with_initial_delay(10).without_jitter();

        let result = retry_with_backoff(op, config).await;

        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_budget_spent() {
        let (calls, op) = fail_first(u32::MAX, "never");
        let config = RetryConfig::new()
            .with_max_retries(2)
            .with_initial_delay(10)
            .without_jitter();

        let result = retry_with_backoff(op, config).await;

        assert_eq!(result.unwrap_err(), "failure 3");
        // 1 initial attempt + 2 retries
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_builder_overrides_defaults() {
        let config = RetryConfig::new()
            .with_max_retries(5)
            .with_initial_delay(200)
            .with_max_delay(10_000)
            .without_jitter();

        assert_eq!(config.max_retries, 5);
        assert_eq!(config.initial_delay_ms, 200);
        assert_eq!(config.max_delay_ms, 10_000);
        assert!(!config.use_jitter);
    }

    #[test]
    fn test_jitter_stays_within_half_to_full() {
        for _ in 0..20 {
            let wait = jittered(1000);
            assert!((500..=1000).contains(&wait));
        }
    }

    #[tokio::test]
    async fn test_backoff_delays_accumulate() {
        let (_, op) = fail_first(u32::MAX, ());
        let config = RetryConfig::new()
            .with_max_retries(3)
            .with_initial_delay(50)
            .without_jitter();

        let start = std::time::Instant::now();
        let _ = retry_with_backoff(op, config).await;

        // 50 + 100 + 200 = 350ms of sleeps, minus scheduler slop
        assert!(start.elapsed().as_millis() >= 300);
    }
}
