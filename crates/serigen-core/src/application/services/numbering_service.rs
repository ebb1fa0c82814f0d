//! Numbering Service - issue numbers against a series store.
//!
//! Generation is a read-modify-write on the series counter. Two callers
//! reading the same counter must not both issue the same value, so every
//! commit is a compare-and-swap on the generation state and a lost race is
//! retried from a fresh read.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::{ApplicationError, SeriesGenerator, ports::SeriesStore},
    domain::{GenerationRequest, SeriesConfig},
    error::{SerigenError, SerigenResult},
};

/// Default number of read-generate-commit rounds before giving up.
pub const DEFAULT_COMMIT_ATTEMPTS: u32 = 5;

/// Issues numbers from a [`SeriesStore`].
pub struct NumberingService {
    store: Arc<dyn SeriesStore>,
    generator: SeriesGenerator,
    max_commit_attempts: u32,
}

impl NumberingService {
    pub fn new(store: Arc<dyn SeriesStore>, generator: SeriesGenerator) -> Self {
        Self {
            store,
            generator,
            max_commit_attempts: DEFAULT_COMMIT_ATTEMPTS,
        }
    }

    /// Bound the optimistic retry loop. Values below 1 are raised to 1.
    pub fn with_max_commit_attempts(mut self, attempts: u32) -> Self {
        self.max_commit_attempts = attempts.max(1);
        self
    }

    pub fn max_commit_attempts(&self) -> u32 {
        self.max_commit_attempts
    }

    /// Issue the next number and persist the advanced counter.
    #[instrument(
        skip_all,
        fields(type_of = %request.type_of, type_value = %request.type_value)
    )]
    pub fn next(&self, request: GenerationRequest) -> SerigenResult<SeriesConfig> {
        let request = request.normalized();

        for attempt in 1..=self.max_commit_attempts {
            let (current, next) = self.prepare(&request)?;

            if self.store.commit(&current, &next)? {
                info!(
                    series = %next.key(),
                    value = %next.last_value,
                    counter = next.last_counter,
                    attempt,
                    "Number issued"
                );
                return Ok(next);
            }

            warn!(series = %next.key(), attempt, "Series changed concurrently, retrying");
        }

        Err(ApplicationError::CommitConflict {
            key: request.key(),
            attempts: self.max_commit_attempts,
        }
        .into())
    }

    /// Show the number `next` would issue, without committing it.
    #[instrument(
        skip_all,
        fields(type_of = %request.type_of, type_value = %request.type_value)
    )]
    pub fn peek(&self, request: GenerationRequest) -> SerigenResult<SeriesConfig> {
        let request = request.normalized();
        let (_, next) = self.prepare(&request)?;
        Ok(next)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Read the candidates and compute the next state.
    ///
    /// Returns the stored record the result was derived from alongside it.
    fn prepare(&self, request: &GenerationRequest) -> SerigenResult<(SeriesConfig, SeriesConfig)> {
        let candidates = self.store.candidates(&request.type_of)?;
        let next = self.generator.generate(request, &candidates)?;

        let current = candidates
            .into_iter()
            .find(|c| c.id == next.id)
            .ok_or_else(|| SerigenError::Internal {
                message: format!("generated series {} is not among the candidates", next.id),
            })?;

        Ok((current, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockSeriesStore;
    use crate::domain::GenerationError;
    use chrono::NaiveDate;

    fn request(type_value: &str) -> GenerationRequest {
        let as_of = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        GenerationRequest::new("ProjectCode", type_value, as_of)
    }

    fn stored() -> SeriesConfig {
        SeriesConfig::new("ProjectCode", "SALES", "S{YY}-{###}").with_state(41, "S24-00041", "S24-")
    }

    #[test]
    fn next_commits_generated_state() {
        let current = stored();
        let mut store = MockSeriesStore::new();
        let candidates = vec![current.clone()];
        store
            .expect_candidates()
            .withf(|type_of| type_of == "ProjectCode")
            .returning(move |_| Ok(candidates.clone()));
        store
            .expect_commit()
            .withf(|expected, updated| {
                expected.last_counter == 41 && updated.last_counter == 42
            })
            .times(1)
            .returning(|_, _| Ok(true));

        let service = NumberingService::new(Arc::new(store), SeriesGenerator::default());
        let issued = service.next(request("sales")).unwrap();

        assert_eq!(issued.last_value, "S24-00042");
    }

    #[test]
    fn next_retries_after_conflict() {
        let mut store = MockSeriesStore::new();
        let candidates = vec![stored()];
        store
            .expect_candidates()
            .times(2)
            .returning(move |_| Ok(candidates.clone()));

        let mut seq = mockall::Sequence::new();
        store
            .expect_commit()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(false));
        store
            .expect_commit()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(true));

        let service = NumberingService::new(Arc::new(store), SeriesGenerator::default());
        assert!(service.next(request("SALES")).is_ok());
    }

    #[test]
    fn next_gives_up_after_max_attempts() {
        let mut store = MockSeriesStore::new();
        let candidates = vec![stored()];
        store
            .expect_candidates()
            .times(3)
            .returning(move |_| Ok(candidates.clone()));
        store.expect_commit().times(3).returning(|_, _| Ok(false));

        let service = NumberingService::new(Arc::new(store), SeriesGenerator::default())
            .with_max_commit_attempts(3);
        let err = service.next(request("SALES")).unwrap_err();

        assert!(matches!(
            err,
            SerigenError::Application(ApplicationError::CommitConflict { attempts: 3, .. })
        ));
        assert!(err.is_retryable());
    }

    #[test]
    fn generation_failure_skips_commit() {
        let mut store = MockSeriesStore::new();
        store.expect_candidates().returning(|_| Ok(Vec::new()));
        store.expect_commit().never();

        let service = NumberingService::new(Arc::new(store), SeriesGenerator::default());
        let err = service.next(request("SALES")).unwrap_err();

        assert!(matches!(
            err,
            SerigenError::Generation(GenerationError::ConfigurationNotFound { .. })
        ));
    }

    #[test]
    fn peek_never_commits() {
        let mut store = MockSeriesStore::new();
        let candidates = vec![stored()];
        store
            .expect_candidates()
            .returning(move |_| Ok(candidates.clone()));
        store.expect_commit().never();

        let service = NumberingService::new(Arc::new(store), SeriesGenerator::default());
        let preview = service.peek(request("sales")).unwrap();

        assert_eq!(preview.last_counter, 42);
    }

    #[test]
    fn attempts_floor_is_one() {
        let store = MockSeriesStore::new();
        let service = NumberingService::new(Arc::new(store), SeriesGenerator::default())
            .with_max_commit_attempts(0);
        assert_eq!(service.max_commit_attempts(), 1);
    }
}
