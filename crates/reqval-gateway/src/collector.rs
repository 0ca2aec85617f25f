//! # ConfigCollector
//!
//! Scans a route-definition collection and extracts a normalized
//! [`RouteValidationSpec`] for each route that opts into validation. Pure:
//! definitions in, spec map out; malformed or non-participating entries
//! are skipped, never raised.

use std::collections::BTreeMap;

use reqval_core::route::{FunctionDef, RouteValidationSpec};

/// Extract validation specs from a function registry.
///
/// A route participates only when its HTTP trigger declares a non-empty
/// path AND method AND a `validator:` block. The policy type defaults to
/// `ALL`; schema and parameter maps default to empty. The method verb is
/// normalized to upper case.
///
/// The output is keyed by path. Two routes sharing a path but differing
/// by method collide: the later one (function-name, then event order)
/// wins. This matches the long-standing keying behavior and is covered by
/// a test rather than silently changed.
pub fn collect(
    functions: &BTreeMap<String, FunctionDef>,
) -> BTreeMap<String, RouteValidationSpec> {
    let mut specs = BTreeMap::new();

    for function in functions.values() {
        for event in &function.events {
            let Some(http) = &event.http else { continue };
            if http.path.is_empty() || http.method.is_empty() {
                continue;
            }
            let Some(request) = &http.request else { continue };
            let Some(validator) = &request.validator else {
                continue;
            };

            specs.insert(
                http.path.clone(),
                RouteValidationSpec {
                    policy: validator.kind,
                    method: http.method.to_ascii_uppercase(),
                    schemas: request.schemas.clone(),
                    parameters: request.parameters.clone(),
                },
            );
        }
    }

    specs
}
