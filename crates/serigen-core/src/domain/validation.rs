use crate::domain::{
    entities::{COUNTER_LIMIT, GenerationRequest, SeriesConfig, ValidationMessage},
    error::DomainError,
    format::placeholder_runs,
};

pub const MAX_TYPE_LEN: usize = 64;
pub const MAX_FORMAT_LEN: usize = 128;
pub const MAX_STATE_LEN: usize = 64;
pub const MAX_DESCRIPTION_LEN: usize = 256;

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    /// Check a series configuration before it is stored.
    pub fn validate_config(config: &SeriesConfig) -> Result<(), DomainError> {
        check_len("type_of", &config.type_of, 1, MAX_TYPE_LEN)?;
        check_len("type_value", &config.type_value, 0, MAX_TYPE_LEN)?;
        check_len("format", &config.format, 1, MAX_FORMAT_LEN)?;
        check_len("last_prefix", &config.last_prefix, 0, MAX_STATE_LEN)?;
        check_len("last_value", &config.last_value, 0, MAX_STATE_LEN)?;
        if let Some(description) = &config.description {
            check_len("description", description, 0, MAX_DESCRIPTION_LEN)?;
        }

        check_counter("start_counter", config.start_counter)?;
        check_counter("increment", config.increment)?;
        check_counter("maximum", config.maximum)?;
        check_counter("last_counter", config.last_counter)?;

        let runs = placeholder_runs(&config.format);
        if runs > 1 {
            return Err(DomainError::MultiplePlaceholders {
                format: config.format.clone(),
                count: runs,
            });
        }

        Ok(())
    }

    /// Field-level checks for a generation request.
    ///
    /// Returns every violation; an empty list means the request is valid.
    pub fn validate_request(
        request: &GenerationRequest,
        allowed_types: &[String],
    ) -> Vec<ValidationMessage> {
        let mut messages = Vec::new();
        let type_of = request.type_of.as_str();

        if type_of.is_empty() {
            messages.push(ValidationMessage::new("type_of", "must not be empty"));
        } else if type_of.chars().count() > MAX_TYPE_LEN {
            messages.push(ValidationMessage::new(
                "type_of",
                format!("must be at most {MAX_TYPE_LEN} characters"),
            ));
        }

        if !type_of.is_empty() && !allowed_types.iter().any(|t| t == type_of) {
            messages.push(ValidationMessage::new(
                "type_of",
                "must be one of the allowed values",
            ));
        }

        if request.type_value.is_empty() {
            messages.push(ValidationMessage::new("type_value", "must not be empty"));
        }

        messages
    }
}

fn check_len(field: &'static str, value: &str, min: usize, max: usize) -> Result<(), DomainError> {
    let len = value.chars().count();
    if len < min || len > max {
        let reason = if min == 0 {
            format!("must be at most {max} characters")
        } else {
            format!("must be between {min} and {max} characters")
        };
        return Err(DomainError::InvalidConfig { field, reason });
    }
    Ok(())
}

fn check_counter(field: &'static str, value: u64) -> Result<(), DomainError> {
    if value > COUNTER_LIMIT {
        return Err(DomainError::InvalidConfig {
            field,
            reason: format!("must not exceed {COUNTER_LIMIT}"),
        });
    }
    Ok(())
}
