#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// A singleton document (e.g. the in-progress workout) does not exist.
    #[error("{0}")]
    Missing(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let reasons: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                format!("{field}: {}", reasons.join(", "))
            })
            .collect();
        fields.sort();
        if fields.is_empty() {
            // Only nested (struct or list) errors.
            return CoreError::Validation(errors.to_string());
        }
        CoreError::Validation(fields.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Named {
        #[validate(length(min = 1, message = "must not be empty"))]
        name: String,
    }

    #[test]
    fn validation_errors_name_the_field() {
        let err: CoreError = Named {
            name: String::new(),
        }
        .validate()
        .unwrap_err()
        .into();
        assert_eq!(err.to_string(), "Validation failed: name: must not be empty");
    }
}
