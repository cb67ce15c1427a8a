use std::future::Future;
use tracing::{info, warn};

/// Result of a single attempt: accept the value or ask for another go.
pub enum Attempt<T, R> {
    Done(T),
    Retry(R),
}

pub enum RetryOutcome<T, R> {
    Succeeded(T),
    /// Every attempt asked for a retry; carries the last rejected value.
    Exhausted(R),
}

/// Fixed-count retry: one initial attempt plus `max_retries` re-runs of the
/// same operation, back to back. Errors from the operation are returned
/// immediately and never retried.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_retries: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}

impl RetryPolicy {
    pub fn new(max_retries: usize) -> Self {
        Self { max_retries }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_retries + 1
    }

    pub async fn run<F, Fut, T, R, E>(
        &self,
        operation_name: &str,
        mut f: F,
    ) -> Result<RetryOutcome<T, R>, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Attempt<T, R>, E>>,
    {
        let mut attempt = 1;

        loop {
            match f().await? {
                Attempt::Done(value) => {
                    if attempt > 1 {
                        info!(
                            operation = operation_name,
                            attempts = attempt,
                            "Operation succeeded after retries"
                        );
                    }
                    return Ok(RetryOutcome::Succeeded(value));
                }
                Attempt::Retry(rejected) => {
                    if attempt > self.max_retries {
                        warn!(
                            operation = operation_name,
                            attempts = attempt,
                            "Giving up after max retries"
                        );
                        return Ok(RetryOutcome::Exhausted(rejected));
                    }

                    warn!(
                        operation = operation_name,
                        retry = attempt,
                        max_retries = self.max_retries,
                        "Attempt rejected, retrying"
                    );
                    attempt += 1;
                }
            }
        }
    }
}
