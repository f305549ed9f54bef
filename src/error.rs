use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EsqueryError {
    #[error(
        "The '{param}' parameter should be one of {} (got {})",
        format_choices(.accepted),
        format_got(.value)
    )]
    InvalidEnumValue {
        param: String,
        value: Option<String>,
        accepted: Vec<String>,
    },

    #[error("{method} is not supported in {variant}")]
    UnsupportedOption { method: String, variant: String },

    #[error("{param} must be an instance of {expected}")]
    InvalidArgumentType { param: String, expected: String },

    #[error("{field} is required for {entity}")]
    MissingRequiredField { entity: String, field: String },

    #[error("`{param}` must be one of {}, got '{value}'", format_choices(.accepted))]
    InvalidConstructorArgument {
        param: String,
        value: String,
        accepted: Vec<String>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(String),
}

pub type Result<T> = std::result::Result<T, EsqueryError>;

impl From<serde_json::Error> for EsqueryError {
    fn from(e: serde_json::Error) -> Self {
        EsqueryError::Json(e.to_string())
    }
}

/// Render an accepted-value list the way error messages show it:
/// `'a'`, `'a' or 'b'`, `'a', 'b', or 'c'`.
///
/// Values are sorted so the message is stable regardless of declaration order.
pub fn format_choices(accepted: &[String]) -> String {
    let mut sorted: Vec<&str> = accepted.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    let quoted: Vec<String> = sorted.iter().map(|v| format!("'{}'", v)).collect();

    match quoted.len() {
        0 => "nothing".to_string(),
        1 => quoted[0].clone(),
        2 => format!("{} or {}", quoted[0], quoted[1]),
        n => format!("{}, or {}", quoted[..n - 1].join(", "), quoted[n - 1]),
    }
}

fn format_got(value: &Option<String>) -> String {
    match value {
        Some(v) => format!("'{}'", v),
        None => "null".to_string(),
    }
}

impl EsqueryError {
    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            EsqueryError::InvalidEnumValue { .. } => "invalid_enum_value",
            EsqueryError::UnsupportedOption { .. } => "unsupported_option",
            EsqueryError::InvalidArgumentType { .. } => "invalid_argument_type",
            EsqueryError::MissingRequiredField { .. } => "missing_required_field",
            EsqueryError::InvalidConstructorArgument { .. } => "invalid_constructor_argument",
            EsqueryError::Config(_) => "config_error",
            EsqueryError::Json(_) => "json_error",
        }
    }

    /// Closest accepted value for a rejected enum or constructor argument,
    /// if one is near enough to be a likely typo.
    pub fn suggestion(&self) -> Option<String> {
        let (value, accepted) = match self {
            EsqueryError::InvalidEnumValue {
                value: Some(value),
                accepted,
                ..
            } => (value, accepted),
            EsqueryError::InvalidConstructorArgument {
                value, accepted, ..
            } => (value, accepted),
            _ => return None,
        };

        let needle = value.to_ascii_lowercase();
        accepted
            .iter()
            .map(|candidate| (strsim::levenshtein(&needle, candidate), candidate))
            .filter(|(distance, _)| *distance <= 3)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, candidate)| candidate.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_format_choices_two_items() {
        assert_eq!(format_choices(&strings(&["desc", "asc"])), "'asc' or 'desc'");
    }

    #[test]
    fn test_format_choices_many_items() {
        assert_eq!(
            format_choices(&strings(&["min", "max", "avg"])),
            "'avg', 'max', or 'min'"
        );
        assert_eq!(format_choices(&strings(&["score"])), "'score'");
    }

    #[test]
    fn test_invalid_enum_message() {
        let err = EsqueryError::InvalidEnumValue {
            param: "order".to_string(),
            value: Some("up".to_string()),
            accepted: strings(&["asc", "desc"]),
        };
        assert_eq!(
            err.to_string(),
            "The 'order' parameter should be one of 'asc' or 'desc' (got 'up')"
        );
        assert_eq!(err.code(), "invalid_enum_value");
    }

    #[test]
    fn test_invalid_enum_message_null() {
        let err = EsqueryError::InvalidEnumValue {
            param: "mode".to_string(),
            value: None,
            accepted: strings(&["min", "max"]),
        };
        assert!(err.to_string().ends_with("(got null)"));
        assert_eq!(err.suggestion(), None);
    }

    #[test]
    fn test_suggestion_picks_closest() {
        let err = EsqueryError::InvalidEnumValue {
            param: "order".to_string(),
            value: Some("DSEC".to_string()),
            accepted: strings(&["asc", "desc"]),
        };
        assert_eq!(err.suggestion().as_deref(), Some("desc"));

        let far = EsqueryError::InvalidConstructorArgument {
            param: "type".to_string(),
            value: "completely-unrelated".to_string(),
            accepted: strings(&["inline", "stored"]),
        };
        assert_eq!(far.suggestion(), None);
    }

    #[test]
    fn test_unsupported_option_message() {
        let err = EsqueryError::UnsupportedOption {
            method: "field".to_string(),
            variant: "GlobalAggregation".to_string(),
        };
        assert_eq!(err.to_string(), "field is not supported in GlobalAggregation");
    }
}
