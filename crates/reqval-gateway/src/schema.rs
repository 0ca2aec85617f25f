//! # Config-Shape Registration & Validation
//!
//! The host packaging tool can be told what a `request:` block looks like
//! so it validates user-authored configuration before the merge pass ever
//! runs. [`register_request_schema`] pushes that shape through the
//! host-provided [`EventSchemaRegistry`]; a duplicate registration is
//! benign and swallowed, any other failure is logged as a warning and
//! setup continues.
//!
//! The same shape backs [`validate_request_config`], which checks a
//! user-authored block locally and reports each violation with its JSON
//! pointer, for tooling that wants to fail fast without a host registry.

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// JSON schema of the `request:` configuration block.
///
/// Pass-through by design: schema documents under `schemas` and the
/// parameter maps are open objects; only the validator policy enum is
/// constrained.
pub fn request_config_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "validator": {
                "type": "object",
                "properties": {
                    "type": {
                        "type": "string",
                        "enum": ["ALL", "BODY_ONLY", "PARAMS_ONLY"]
                    }
                }
            },
            "schemas": { "type": "object" },
            "parameters": {
                "type": "object",
                "properties": {
                    "paths": { "type": "object" },
                    "querystrings": { "type": "object" },
                    "headers": { "type": "object" }
                }
            }
        }
    })
}

/// The payload registered against the host's `http` event definition:
/// a `properties` wrapper adding the `request` key.
pub fn function_event_properties() -> Value {
    json!({
        "properties": {
            "request": request_config_schema()
        }
    })
}

/// Failure modes of a host schema registration.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The event properties already have a definition. Benign.
    #[error("event properties already have a definition")]
    AlreadyDefined,
    /// Any other registry failure.
    #[error("schema registry error: {0}")]
    Registry(String),
}

/// Host-provided registry of per-event configuration shapes.
pub trait EventSchemaRegistry {
    /// Register additional properties for an event kind of a provider.
    fn define_function_event_properties(
        &mut self,
        provider: &str,
        event: &str,
        properties: &Value,
    ) -> Result<(), RegistryError>;
}

/// Register the `request:` shape for `aws`/`http` events.
///
/// `AlreadyDefined` is treated as success; any other failure is logged at
/// warn level and setup continues.
pub fn register_request_schema(registry: &mut dyn EventSchemaRegistry) {
    let properties = function_event_properties();
    match registry.define_function_event_properties("aws", "http", &properties) {
        Ok(()) | Err(RegistryError::AlreadyDefined) => {}
        Err(err) => tracing::warn!("request schema registration failed: {err}"),
    }
}

/// One schema violation in a user-authored `request:` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaViolation {
    /// JSON pointer to the violating value.
    pub pointer: String,
    /// Human-readable message.
    pub message: String,
}

impl std::fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.pointer.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.pointer, self.message)
        }
    }
}

/// Validate a user-authored `request:` block against
/// [`request_config_schema`]. Returns every violation found; an empty
/// vector means the block is well-formed.
pub fn validate_request_config(value: &Value) -> Vec<SchemaViolation> {
    let schema = request_config_schema();
    let validator = match jsonschema::validator_for(&schema) {
        Ok(validator) => validator,
        Err(err) => {
            return vec![SchemaViolation {
                pointer: String::new(),
                message: format!("request config schema failed to compile: {err}"),
            }];
        }
    };

    validator
        .iter_errors(value)
        .map(|err| SchemaViolation {
            pointer: err.instance_path.to_string(),
            message: err.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// In-memory registry mirroring a host's duplicate-detection behavior.
    #[derive(Default)]
    struct FakeRegistry {
        defined: Vec<(String, String)>,
        fail_with: Option<String>,
    }

    impl EventSchemaRegistry for FakeRegistry {
        fn define_function_event_properties(
            &mut self,
            provider: &str,
            event: &str,
            _properties: &Value,
        ) -> Result<(), RegistryError> {
            if let Some(message) = &self.fail_with {
                return Err(RegistryError::Registry(message.clone()));
            }
            let key = (provider.to_string(), event.to_string());
            if self.defined.contains(&key) {
                return Err(RegistryError::AlreadyDefined);
            }
            self.defined.push(key);
            Ok(())
        }
    }

    #[test]
    fn registers_request_shape_for_aws_http() {
        let mut registry = FakeRegistry::default();
        register_request_schema(&mut registry);
        assert_eq!(registry.defined, [("aws".to_string(), "http".to_string())]);
    }

    #[test]
    fn duplicate_registration_is_swallowed() {
        let mut registry = FakeRegistry::default();
        register_request_schema(&mut registry);
        // Second registration hits AlreadyDefined; must not panic or grow.
        register_request_schema(&mut registry);
        assert_eq!(registry.defined.len(), 1);
    }

    #[test]
    fn other_registration_failures_are_non_fatal() {
        let mut registry = FakeRegistry {
            fail_with: Some("registry unavailable".to_string()),
            ..Default::default()
        };
        register_request_schema(&mut registry);
        assert!(registry.defined.is_empty());
    }

    #[test]
    fn well_formed_request_block_passes() {
        let block = json!({
            "validator": { "type": "PARAMS_ONLY" },
            "schemas": { "application/json": { "type": "object" } },
            "parameters": { "paths": { "id": true } }
        });
        assert!(validate_request_config(&block).is_empty());
    }

    #[test]
    fn bad_policy_enum_reports_pointer() {
        let block = json!({
            "validator": { "type": "EVERYTHING" }
        });
        let violations = validate_request_config(&block);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].pointer, "/validator/type");
    }

    #[test]
    fn non_object_parameters_reported() {
        let block = json!({
            "validator": {},
            "parameters": { "paths": ["id"] }
        });
        let violations = validate_request_config(&block);
        assert!(violations
            .iter()
            .any(|v| v.pointer == "/parameters/paths"));
    }

    #[test]
    fn registered_payload_carries_policy_enum() {
        let payload = function_event_properties();
        let enum_values = payload
            .pointer("/properties/request/properties/validator/properties/type/enum")
            .unwrap();
        assert_eq!(enum_values, &json!(["ALL", "BODY_ONLY", "PARAMS_ONLY"]));
    }
}
