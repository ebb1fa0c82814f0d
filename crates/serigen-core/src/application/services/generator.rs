//! Series Generator - one generation step.
//!
//! Sequence for a single request:
//! 1. Validate the request (when a validator is configured)
//! 2. Select the exact series, else the type's default series
//! 3. Refuse disabled series
//! 4. Reset to the start counter on a new date prefix, else increment
//! 5. Enforce the maximum
//! 6. Render the value
//!
//! The generator never mutates its inputs. It hands back an updated copy of
//! the selected series; a failed call leaves nothing to persist.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::ports::RequestValidator,
    domain::{FormatRenderer, GenerationError, GenerationRequest, SeriesConfig},
};

/// Stateless number-series generator.
#[derive(Clone, Default)]
pub struct SeriesGenerator {
    renderer: FormatRenderer,
    validator: Option<Arc<dyn RequestValidator>>,
}

impl SeriesGenerator {
    /// Create a generator without request validation.
    pub fn new(renderer: FormatRenderer) -> Self {
        Self {
            renderer,
            validator: None,
        }
    }

    /// Run `validator` before every generation.
    pub fn with_validator(mut self, validator: Arc<dyn RequestValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn renderer(&self) -> &FormatRenderer {
        &self.renderer
    }

    /// Produce the next state of the series matching `request`.
    #[instrument(
        skip_all,
        fields(type_of = %request.type_of, type_value = %request.type_value)
    )]
    pub fn generate(
        &self,
        request: &GenerationRequest,
        candidates: &[SeriesConfig],
    ) -> Result<SeriesConfig, GenerationError> {
        if let Some(validator) = &self.validator {
            validator
                .validate(request)
                .map_err(|messages| GenerationError::ValidationFailed { messages })?;
        }

        let entry = select(request, candidates).ok_or_else(|| {
            GenerationError::ConfigurationNotFound {
                key: request.key(),
            }
        })?;
        debug!(series = %entry.key(), "Series selected");

        if entry.is_disabled {
            return Err(GenerationError::ConfigurationDisabled { key: request.key() });
        }

        let as_of = request.as_of.date();
        let prefix = self.renderer.render_prefix_without_counter(&entry.format, as_of);

        let counter = if entry.automatic_reset && prefix != entry.last_prefix {
            debug!(
                previous = %entry.last_prefix,
                current = %prefix,
                start = entry.start_counter,
                "Prefix changed, resetting counter"
            );
            Some(entry.start_counter)
        } else {
            entry.last_counter.checked_add(entry.increment)
        };

        let counter = match counter {
            Some(counter) if counter <= entry.maximum => counter,
            attempted => {
                return Err(GenerationError::MaximumExceeded {
                    key: request.key(),
                    attempted: attempted.unwrap_or(u64::MAX),
                    maximum: entry.maximum,
                });
            }
        };

        let mut next = entry.clone();
        next.last_counter = counter;
        next.last_value = self.renderer.render_next(&entry.format, counter, as_of);
        next.last_prefix = prefix;

        debug!(counter, value = %next.last_value, "Value rendered");
        Ok(next)
    }
}

/// Exact `(TypeOf, TypeValue)` match first, then the type's default series.
fn select<'a>(request: &GenerationRequest, candidates: &'a [SeriesConfig]) -> Option<&'a SeriesConfig> {
    candidates
        .iter()
        .find(|c| c.matches(&request.type_of, &request.type_value))
        .or_else(|| candidates.iter().find(|c| c.matches(&request.type_of, "")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockRequestValidator;
    use crate::domain::{SeriesKey, ValidationMessage};
    use chrono::NaiveDate;

    const PROJECT_CODE: &str = "ProjectCode";
    const FORMAT: &str = "PREFIX-{YYYY}-{MM}-{DD}-{####}-SUFFIX";

    fn request_on(y: i32, m: u32, d: u32) -> GenerationRequest {
        let as_of = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        GenerationRequest::new(PROJECT_CODE, "001", as_of)
    }

    fn series(start: u64, counter: u64, increment: u64, maximum: u64) -> SeriesConfig {
        SeriesConfig::new(PROJECT_CODE, "001", FORMAT)
            .with_bounds(start, increment, maximum)
            .with_state(counter, "PREFIX-2023-10-09-0005-SUFFIX", "PREFIX-2023-10-11--SUFFIX")
    }

    fn fresh_series(start: u64, increment: u64, maximum: u64) -> SeriesConfig {
        SeriesConfig::new(PROJECT_CODE, "001", FORMAT).with_bounds(start, increment, maximum)
    }

    fn accepting_validator() -> Arc<dyn RequestValidator> {
        let mut validator = MockRequestValidator::new();
        validator.expect_validate().returning(|_| Ok(()));
        Arc::new(validator)
    }

    fn generator() -> SeriesGenerator {
        SeriesGenerator::default().with_validator(accepting_validator())
    }

    // ========================================================================
    // Failures
    // ========================================================================

    #[test]
    fn validation_failure_stops_before_lookup() {
        let mut validator = MockRequestValidator::new();
        validator
            .expect_validate()
            .times(1)
            .returning(|_| Err(vec![ValidationMessage::new("type_of", "Error")]));
        let generator = SeriesGenerator::default().with_validator(Arc::new(validator));

        let err = generator.generate(&request_on(2024, 1, 1), &[]).unwrap_err();

        match err {
            GenerationError::ValidationFailed { messages } => {
                assert_eq!(messages[0].message, "Error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_candidates_is_not_found() {
        let err = generator().generate(&request_on(2024, 1, 1), &[]).unwrap_err();
        assert_eq!(
            err,
            GenerationError::ConfigurationNotFound {
                key: SeriesKey::new(PROJECT_CODE, "001")
            }
        );
        assert_eq!(err.to_string(), "No number series configured for ProjectCode - 001");
    }

    #[test]
    fn unrelated_candidates_are_not_found() {
        let other = SeriesConfig::new(PROJECT_CODE, "002", FORMAT);
        let err = generator()
            .generate(&request_on(2024, 1, 1), &[other])
            .unwrap_err();
        assert!(matches!(err, GenerationError::ConfigurationNotFound { .. }));
    }

    #[test]
    fn disabled_series_fails_regardless_of_counter() {
        let disabled = series(1, 5, 1, 10).with_disabled(true);
        let err = generator()
            .generate(&request_on(2023, 10, 10), &[disabled])
            .unwrap_err();
        assert!(matches!(err, GenerationError::ConfigurationDisabled { .. }));
    }

    #[test]
    fn counter_past_maximum_fails() {
        let at_max = series(1, 10, 1, 10);
        let err = generator()
            .generate(&request_on(2023, 10, 10), std::slice::from_ref(&at_max))
            .unwrap_err();

        assert_eq!(
            err,
            GenerationError::MaximumExceeded {
                key: SeriesKey::new(PROJECT_CODE, "001"),
                attempted: 11,
                maximum: 10,
            }
        );
        // The input record is untouched.
        assert_eq!(at_max.last_counter, 10);
    }

    #[test]
    fn overflowing_increment_is_maximum_exceeded() {
        let huge = series(1, u64::MAX - 1, 5, u64::MAX);
        let err = generator()
            .generate(&request_on(2023, 10, 10), &[huge])
            .unwrap_err();
        assert!(matches!(
            err,
            GenerationError::MaximumExceeded { attempted: u64::MAX, .. }
        ));
    }

    // ========================================================================
    // Counter policy
    // ========================================================================

    #[test]
    fn increments_when_reset_disabled() {
        let next = generator()
            .generate(&request_on(2023, 10, 10), &[series(1, 5, 1, 10)])
            .unwrap();

        assert_eq!(next.last_counter, 6);
        assert_eq!(next.last_value, "PREFIX-2023-10-10-000006-SUFFIX");
        assert_eq!(next.last_prefix, "PREFIX-2023-10-10--SUFFIX");
    }

    #[test]
    fn resets_to_start_when_prefix_changes() {
        let resetting = series(1, 5, 1, 10).with_automatic_reset(true);
        let next = generator()
            .generate(&request_on(2024, 1, 1), &[resetting])
            .unwrap();

        assert_eq!(next.last_counter, 1);
        assert_eq!(next.last_value, "PREFIX-2024-01-01-000001-SUFFIX");
    }

    #[test]
    fn reset_does_not_apply_increment() {
        let resetting = series(100, 5, 10, 1000).with_automatic_reset(true);
        let next = generator()
            .generate(&request_on(2024, 1, 1), &[resetting])
            .unwrap();
        assert_eq!(next.last_counter, 100);
    }

    #[test]
    fn same_prefix_increments_even_with_reset() {
        let resetting = series(1, 5, 1, 10).with_automatic_reset(true);
        let next = generator()
            .generate(&request_on(2023, 10, 11), &[resetting])
            .unwrap();
        assert_eq!(next.last_counter, 6);
    }

    #[test]
    fn fresh_series_issues_first_number() {
        let next = generator()
            .generate(&request_on(2023, 10, 10), &[fresh_series(1, 1, 10)])
            .unwrap();

        assert_eq!(next.last_counter, 1);
        assert_eq!(next.last_value, "PREFIX-2023-10-10-000001-SUFFIX");
    }

    #[test]
    fn increments_by_configured_step() {
        let mut current = fresh_series(1, 10, 1000);
        for expected in [10, 20, 30] {
            current = generator()
                .generate(&request_on(2023, 10, 10), &[current])
                .unwrap();
            assert_eq!(current.last_counter, expected);
        }
    }

    #[test]
    fn counter_equal_to_maximum_is_allowed() {
        let next = generator()
            .generate(&request_on(2023, 10, 10), &[series(1, 9, 1, 10)])
            .unwrap();
        assert_eq!(next.last_counter, 10);
    }

    // ========================================================================
    // Selection
    // ========================================================================

    #[test]
    fn falls_back_to_default_series() {
        let default = SeriesConfig::new(PROJECT_CODE, "", "D-{###}");
        let next = generator()
            .generate(&request_on(2023, 10, 10), &[default.clone()])
            .unwrap();

        assert_eq!(next.id, default.id);
        assert_eq!(next.last_value, "D-00001");
    }

    #[test]
    fn exact_match_wins_over_default() {
        let default = SeriesConfig::new(PROJECT_CODE, "", "D-{###}");
        let exact = SeriesConfig::new(PROJECT_CODE, "001", "E-{###}");
        let next = generator()
            .generate(&request_on(2023, 10, 10), &[default, exact.clone()])
            .unwrap();

        assert_eq!(next.id, exact.id);
        assert_eq!(next.last_value, "E-00001");
    }

    #[test]
    fn disabled_default_is_reported_as_disabled() {
        let default = SeriesConfig::new(PROJECT_CODE, "", "D-{###}").with_disabled(true);
        let err = generator()
            .generate(&request_on(2023, 10, 10), &[default])
            .unwrap_err();
        assert!(matches!(err, GenerationError::ConfigurationDisabled { .. }));
    }

    #[test]
    fn runs_without_validator() {
        let next = SeriesGenerator::default()
            .generate(&request_on(2023, 10, 10), &[fresh_series(1, 1, 10)])
            .unwrap();
        assert_eq!(next.last_counter, 1);
    }
}
