//! # Logical-Name Derivation
//!
//! Created resources get logical names that are pure functions of their
//! inputs: sanitize the concatenation of a fixed prefix, the route path,
//! the upper-cased method, and (for models) the content type. Sanitization
//! strips every character outside `[A-Za-z0-9]`, which is the character
//! set templates accept for logical names.
//!
//! Locating a route's *pre-existing* method resource goes through the
//! [`MethodNaming`] oracle instead, because that name was chosen by
//! whatever compiled the template. [`AwsNaming`] implements the standard
//! AWS provider convention and serves as the default oracle.

/// Strip every character outside `[A-Za-z0-9]`.
pub fn sanitize_logical_name(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// Logical name of the validator created for a route.
pub fn validator_logical_name(path: &str, method: &str) -> String {
    sanitize_logical_name(&format!(
        "RequestValidator{path}{}",
        method.to_ascii_uppercase()
    ))
}

/// Logical name of the model created for a (route, content-type) pair.
pub fn model_logical_name(path: &str, method: &str, content_type: &str) -> String {
    sanitize_logical_name(&format!(
        "Model{path}{}{content_type}",
        method.to_ascii_uppercase()
    ))
}

/// Oracle resolving the logical name of a route's method resource.
///
/// The names of pre-existing method entries were chosen by the tool that
/// compiled the template; implementations of this trait reproduce that
/// tool's convention. Both functions are pure.
pub trait MethodNaming {
    /// Logical name of the gateway resource entry for a route path.
    fn resource_logical_id(&self, path: &str) -> String;

    /// Logical name of the method entry, given the resource logical name
    /// and the HTTP verb.
    fn method_logical_id(&self, resource_id: &str, method: &str) -> String;
}

/// The standard AWS provider naming convention.
///
/// Paths become `ApiGatewayResource` plus each segment capitalized, with
/// `{x}` (and greedy `{x+}`) segments rendered as `XVar`. Methods become
/// `ApiGatewayMethod` plus the resource suffix plus the capitalized verb:
///
/// - `/users/{id}` → `ApiGatewayResourceUsersIdVar`
/// - (`ApiGatewayResourceUsersIdVar`, `GET`) → `ApiGatewayMethodUsersIdVarGet`
#[derive(Debug, Clone, Copy, Default)]
pub struct AwsNaming;

impl MethodNaming for AwsNaming {
    fn resource_logical_id(&self, path: &str) -> String {
        let mut id = String::from("ApiGatewayResource");
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            id.push_str(&normalize_segment(segment));
        }
        id
    }

    fn method_logical_id(&self, resource_id: &str, method: &str) -> String {
        let suffix = resource_id
            .strip_prefix("ApiGatewayResource")
            .unwrap_or(resource_id);
        format!(
            "ApiGatewayMethod{suffix}{}",
            capitalize(&method.to_ascii_lowercase())
        )
    }
}

/// Render one path segment: `{x}` and `{x+}` become `XVar`, plain
/// segments keep their alphanumerics, capitalized.
fn normalize_segment(segment: &str) -> String {
    if let Some(inner) = segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        let name = sanitize_logical_name(inner.trim_end_matches('+'));
        format!("{}Var", capitalize(&name))
    } else {
        capitalize(&sanitize_logical_name(segment))
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
