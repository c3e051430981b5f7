//! Request execution with classified, fixed-delay retries
//!
//! One invocation walks Attempt → (Wait → Attempt)* → Done. Conflicts,
//! transient rejections and transport failures go through Wait; unparseable
//! and fatal rejections end the invocation immediately. When the retry budget
//! runs out the last observed error is returned as-is.

use std::sync::Arc;
use std::time::Duration;

use playfab_domain::constants::SUCCESS_STATUS;
use playfab_domain::{PlayFabError, Result, RetryConfig, ServiceError};

use super::classify::{ErrorClassifier, FailureClass};
use crate::http::{Transport, TransportRequest};
use crate::observability::Logger;

/// Executes calls through a [`Transport`] under a fixed retry policy.
pub struct RequestEngine {
    transport: Arc<dyn Transport>,
    classifier: ErrorClassifier,
    max_retries: u32,
    backoff: Duration,
    logger: Arc<dyn Logger>,
}

impl RequestEngine {
    pub fn new(transport: Arc<dyn Transport>, retry: &RetryConfig, logger: Arc<dyn Logger>) -> Self {
        Self {
            transport,
            classifier: ErrorClassifier::from_config(retry),
            max_retries: retry.max_retries,
            backoff: retry.backoff(),
            logger,
        }
    }

    /// Retries allowed after the first attempt.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    /// Execute `request` until it succeeds, fails terminally, or the retry
    /// budget is spent.
    ///
    /// Every attempt sends a fresh copy of `request`. The success body is
    /// returned unmodified.
    ///
    /// There is no backoff after the final failed attempt: an exhausted budget
    /// waits `max_retries` backoffs in total, not `max_retries + 1`.
    ///
    /// # Errors
    /// - `PlayFabError::Unparseable` after the first rejection whose body is
    ///   not an error envelope
    /// - `PlayFabError::Service` for a fatal rejection, or the last conflict or
    ///   transient rejection once retries are exhausted
    /// - `PlayFabError::Transport` for the last transport failure once retries
    ///   are exhausted
    pub async fn execute(&self, function: &str, request: TransportRequest) -> Result<Vec<u8>> {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            self.logger.debug(format_args!("Starting attempt {attempt} for {function}"));

            let failure = match self.transport.send(request.clone()).await {
                Ok(response) if response.status == SUCCESS_STATUS => return Ok(response.body),
                Ok(response) => {
                    let rejected = ServiceError::from_response(function, response.status, response.body);
                    match self.classifier.classify(&rejected) {
                        FailureClass::Conflict | FailureClass::Transient => {
                            PlayFabError::Service(rejected)
                        }
                        FailureClass::Unparseable(reason) => return Err(reason.into_error(rejected)),
                        FailureClass::Fatal => return Err(PlayFabError::Service(rejected)),
                    }
                }
                Err(err) => PlayFabError::Transport(err),
            };

            if attempt > self.max_retries {
                self.logger.warn(format_args!(
                    "{function} failed after {attempt} attempts, giving up"
                ));
                return Err(failure);
            }

            self.logger.error(format_args!("waiting for retry after error - {failure}"));
            if !self.backoff.is_zero() {
                tokio::time::sleep(self.backoff).await;
            }
        }
    }
}

impl std::fmt::Debug for RequestEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestEngine")
            .field("classifier", &self.classifier)
            .field("max_retries", &self.max_retries)
            .field("backoff", &self.backoff)
            .finish_non_exhaustive()
    }
}
