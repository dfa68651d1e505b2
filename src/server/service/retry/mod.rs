//! Retry with exponential backoff for service reads.

use std::time::Duration;

use crate::server::error::{retry::ErrorRetryStrategy, Error};

/// Context for service methods providing retry logic.
///
/// The cache `T` survives between attempts so an operation can keep work that already
/// succeeded. Most callers have nothing to keep and use `()`.
pub struct RetryContext<T> {
    cache: T,
    max_attempts: u32,
    initial_backoff_secs: u64,
}

impl<T> RetryContext<T>
where
    T: Clone + Default,
{
    const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    const DEFAULT_INITIAL_BACKOFF_SECS: u64 = 1;

    pub fn new() -> Self {
        Self {
            cache: T::default(),
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            initial_backoff_secs: Self::DEFAULT_INITIAL_BACKOFF_SECS,
        }
    }

    /// Runs `operation` until it succeeds, fails permanently or runs out of attempts.
    ///
    /// Only errors whose [`Error::to_retry_strategy`] is [`ErrorRetryStrategy::Retry`] are
    /// retried, sleeping 1s, 2s, 4s... between attempts.
    ///
    /// ```ignore
    /// let mut ctx: RetryContext<()> = RetryContext::new();
    /// let db = self.db.clone();
    ///
    /// ctx.execute_with_retry(&format!("get gym ID {}", gym_id), |_| {
    ///     let db = db.clone();
    ///
    ///     Box::pin(async move { Ok(GymRepository::new(&db).get_by_id(gym_id).await?) })
    /// })
    /// .await?;
    /// ```
    pub async fn execute_with_retry<R, F>(
        &mut self,
        description: &str,
        operation: F,
    ) -> Result<R, Error>
    where
        F: for<'a> Fn(
            &'a mut T,
        ) -> std::pin::Pin<
            Box<dyn std::future::Future<Output = Result<R, Error>> + Send + 'a>,
        >,
    {
        let mut attempt_count = 0;

        loop {
            tracing::debug!(
                "Processing {} (attempt {}/{})",
                description,
                attempt_count + 1,
                self.max_attempts
            );

            match operation(&mut self.cache).await {
                Ok(result) => return Ok(result),
                Err(e) => match e.to_retry_strategy() {
                    ErrorRetryStrategy::Fail => return Err(e),
                    ErrorRetryStrategy::Retry => {
                        attempt_count += 1;
                        if attempt_count >= self.max_attempts {
                            tracing::error!(
                                "Max attempts ({}) exceeded for {}: {}",
                                self.max_attempts,
                                description,
                                e
                            );
                            return Err(e);
                        }

                        let backoff = Duration::from_secs(
                            self.initial_backoff_secs * 2_u64.pow(attempt_count - 1),
                        );

                        tracing::warn!(
                            "Retrying {} (attempt {}/{}) after {:?}: {}",
                            description,
                            attempt_count,
                            self.max_attempts,
                            backoff,
                            e
                        );

                        tokio::time::sleep(backoff).await;
                    }
                },
            }
        }
    }
}

impl<T> Default for RetryContext<T>
where
    T: Clone + Default,
{
    fn default() -> Self {
        Self::new()
    }
}
