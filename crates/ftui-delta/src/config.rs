#![forbid(unsafe_code)]

//! Policy-as-data configuration for plan construction.
//!
//! [`DeltaConfig`] gathers the planner's tunables so front ends can load
//! them from TOML or JSON instead of hardcoding them.
//!
//! ```toml
//! # ftui-delta.toml
//! epsilon = 0.0001
//! max_steps = 64
//! policy = "largest"
//! ```
//!
//! ```rust,ignore
//! let config = DeltaConfig::from_toml_file("ftui-delta.toml")?;
//! let planner = Planner::<f64>::from_config(&config);
//! ```
//!
//! Missing keys take their defaults. Loaders validate before returning.

#[cfg(feature = "config")]
use std::path::Path;

use crate::numeric::DEFAULT_EPSILON;
use crate::policy::PolicyKind;

/// Planner tunables.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct DeltaConfig {
    /// Relative tolerance for floating-point elements, in `[0, 1)`.
    /// Ignored for integers.
    pub epsilon: f64,

    /// Abort with `StepLimitExceeded` after this many steps.
    pub max_steps: Option<usize>,

    /// Policy front ends use when the caller names none.
    pub policy: PolicyKind,
}

impl Default for DeltaConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_steps: None,
            policy: PolicyKind::First,
        }
    }
}

impl DeltaConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, DeltaConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, DeltaConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, DeltaConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DeltaConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Load from a file, choosing the format by extension (`.json` is JSON,
    /// anything else TOML).
    #[cfg(feature = "config")]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DeltaConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Check every field is in range.
    ///
    /// Returns a list of problems. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(0.0..1.0).contains(&self.epsilon) {
            errors.push(format!("epsilon must be in [0, 1), got {}", self.epsilon));
        }

        if self.max_steps == Some(0) {
            errors.push("max_steps must be > 0 when set".into());
        }

        errors
    }

    #[cfg(feature = "config")]
    fn validated(self) -> Result<Self, DeltaConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(DeltaConfigError::Validation(errors))
        }
    }
}

/// Errors that can occur when loading a [`DeltaConfig`].
#[cfg(feature = "config")]
#[derive(Debug, thiserror::Error)]
pub enum DeltaConfigError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON parse error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// Out-of-range values.
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(DeltaConfig::default().validate().is_empty());
    }

    #[test]
    fn rejects_bad_epsilon() {
        for epsilon in [-1.0, 1.0, f64::NAN, f64::INFINITY] {
            let config = DeltaConfig {
                epsilon,
                ..DeltaConfig::default()
            };
            assert_eq!(config.validate().len(), 1, "epsilon {epsilon}");
        }
    }

    #[test]
    fn rejects_zero_step_limit() {
        let config = DeltaConfig {
            max_steps: Some(0),
            ..DeltaConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("max_steps"));
    }

    #[cfg(feature = "config")]
    #[test]
    fn validation_error_joins_messages() {
        let err = DeltaConfigError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "validation errors: a; b");
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_partial_uses_defaults() {
        let config = DeltaConfig::from_toml_str("policy = \"widest\"").unwrap();
        assert_eq!(config.policy, PolicyKind::Widest);
        assert_eq!(config.max_steps, None);
        assert!((config.epsilon - DEFAULT_EPSILON).abs() < f64::EPSILON);
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_unknown_field_fails() {
        let err = DeltaConfig::from_json_str(r#"{"epsilon": 0.1, "speed": 3}"#).unwrap_err();
        assert!(matches!(err, DeltaConfigError::Json(_)));
    }
}
