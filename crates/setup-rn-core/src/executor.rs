//! Step execution with per-step failure policies

use crate::error::{ScaffoldError, ToolError};
use futures::future::BoxFuture;
use std::fmt;
use std::time::Duration;

/// How a step's failure affects the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// One attempt, failure aborts the run
    Fatal,
    /// Retried per [`RetryPolicy`], aborts once attempts are exhausted
    RetryThenFatal,
    /// One attempt, failure is recorded as a warning
    SoftFail,
}

/// Bounded retry with a fixed delay between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_millis(1000),
        }
    }
}

type StepAction<'a> = Box<dyn Fn() -> BoxFuture<'a, Result<(), ToolError>> + Send + Sync + 'a>;

/// One named unit of pipeline work
pub struct PipelineStep<'a> {
    name: String,
    policy: FailurePolicy,
    action: StepAction<'a>,
}

impl<'a> PipelineStep<'a> {
    /// Create a step; `action` is invoked once per attempt
    pub fn new<F>(name: impl Into<String>, policy: FailurePolicy, action: F) -> Self
    where
        F: Fn() -> BoxFuture<'a, Result<(), ToolError>> + Send + Sync + 'a,
    {
        Self {
            name: name.into(),
            policy,
            action: Box::new(action),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }
}

impl fmt::Debug for PipelineStep<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineStep")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Result of a step that did not abort the pipeline
#[derive(Debug)]
pub enum StepOutcome {
    Succeeded { attempts: u32 },
    SoftFailed { error: ToolError },
}

/// Receives progress notifications while steps run
pub trait StepObserver: Send + Sync {
    fn step_started(&self, _name: &str) {}

    fn step_retrying(&self, _name: &str, _attempt: u32, _delay: Duration, _error: &ToolError) {}

    fn step_finished(&self, _name: &str, _outcome: &StepOutcome) {}

    fn step_failed(&self, _name: &str, _error: &ScaffoldError) {}
}

/// Observer that ignores every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {}

/// Runs steps according to their [`FailurePolicy`]
#[derive(Debug, Clone, Copy, Default)]
pub struct StepExecutor {
    retry: RetryPolicy,
}

impl StepExecutor {
    pub fn new(retry: RetryPolicy) -> Self {
        Self { retry }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Run `step`, retrying sequentially where its policy allows
    pub async fn execute(
        &self,
        step: &PipelineStep<'_>,
        observer: &dyn StepObserver,
    ) -> Result<StepOutcome, ScaffoldError> {
        match step.policy {
            FailurePolicy::Fatal => match (step.action)().await {
                Ok(()) => Ok(StepOutcome::Succeeded { attempts: 1 }),
                Err(source) => Err(ScaffoldError::StepFailed {
                    step: step.name.clone(),
                    attempts: 1,
                    source,
                }),
            },
            FailurePolicy::SoftFail => match (step.action)().await {
                Ok(()) => Ok(StepOutcome::Succeeded { attempts: 1 }),
                Err(error) => {
                    tracing::warn!(step = %step.name, error = %error, "step failed, continuing");
                    Ok(StepOutcome::SoftFailed { error })
                }
            },
            FailurePolicy::RetryThenFatal => self.execute_with_retry(step, observer).await,
        }
    }

    async fn execute_with_retry(
        &self,
        step: &PipelineStep<'_>,
        observer: &dyn StepObserver,
    ) -> Result<StepOutcome, ScaffoldError> {
        let attempts = self.retry.attempts.max(1);
        let mut attempt = 1;
        loop {
            match (step.action)().await {
                Ok(()) => return Ok(StepOutcome::Succeeded { attempts: attempt }),
                Err(source) if attempt >= attempts => {
                    return Err(ScaffoldError::StepFailed {
                        step: step.name.clone(),
                        attempts: attempt,
                        source,
                    });
                }
                Err(error) => {
                    tracing::warn!(
                        step = %step.name,
                        attempt,
                        delay_ms = self.retry.delay.as_millis() as u64,
                        error = %error,
                        "attempt failed, retrying"
                    );
                    observer.step_retrying(&step.name, attempt, self.retry.delay, &error);
                    tokio::time::sleep(self.retry.delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
