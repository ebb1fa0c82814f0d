//! Allow-list request validator.

use serigen_core::{
    application::ports::RequestValidator,
    domain::{DomainValidator, GenerationRequest, ValidationMessage},
};
use tracing::debug;

/// The series type every installation accepts out of the box.
pub const PROJECT_CODE: &str = "ProjectCode";

/// Validates requests against a fixed set of accepted series types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardRequestValidator {
    allowed_types: Vec<String>,
}

impl StandardRequestValidator {
    /// Create a validator accepting exactly the given types.
    pub fn new(allowed_types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            allowed_types: allowed_types.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allowed_types(&self) -> &[String] {
        &self.allowed_types
    }
}

impl Default for StandardRequestValidator {
    fn default() -> Self {
        Self::new([PROJECT_CODE])
    }
}

impl RequestValidator for StandardRequestValidator {
    fn validate(&self, request: &GenerationRequest) -> Result<(), Vec<ValidationMessage>> {
        let messages = DomainValidator::validate_request(request, &self.allowed_types);

        if messages.is_empty() {
            Ok(())
        } else {
            debug!(violations = messages.len(), "Request rejected");
            Err(messages)
        }
    }
}
