//! # ResourceMerger
//!
//! Consumes the spec map produced by the collector and splices the
//! derived resources into an existing resource graph:
//!
//! 1. Locate the REST-API root. Absent root → diagnostic, no mutation.
//! 2. Per route: insert a request-validator resource, resolve the route's
//!    method entry through the naming oracle, and wire the validator
//!    reference, parameter requirements, and per-content-type model
//!    resources onto it. A missing method entry skips the wiring but
//!    leaves the validator created.
//! 3. Report created-resource counts through the diagnostic sink.
//!
//! Logical names are pure functions of (path, method, content type), so
//! re-running the pass overwrites the same entries with identical
//! recomputed properties; parameter-map entries are unioned, never
//! duplicated. Nothing here returns an error: every anticipated failure
//! is a skip with a diagnostic.

use std::collections::BTreeMap;

use reqval_core::graph::{
    LogicalRef, MethodProperties, ModelProperties, Resource, ResourceGraph, ValidatorProperties,
};
use reqval_core::naming::{model_logical_name, validator_logical_name, MethodNaming};
use reqval_core::route::{ParameterRequirements, RouteValidationSpec};

use crate::diag::DiagnosticSink;

/// Service identity embedded into validator display names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeContext {
    /// Service name.
    pub service: String,
    /// Deployment stage.
    pub stage: String,
}

impl MergeContext {
    /// Context for a service at the default `dev` stage.
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            stage: "dev".to_string(),
        }
    }

    /// Override the deployment stage.
    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = stage.into();
        self
    }
}

/// Counts of resources created by one merge pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Request validators inserted.
    pub validators: usize,
    /// Request models inserted.
    pub models: usize,
}

/// Merge validation resources for every spec into the graph, in place.
///
/// The caller grants exclusive mutation rights over `graph` for the
/// duration of the call. Insertion order follows the spec map's key
/// order, so the pass is deterministic for a given input.
pub fn merge(
    graph: &mut ResourceGraph,
    specs: &BTreeMap<String, RouteValidationSpec>,
    ctx: &MergeContext,
    naming: &dyn MethodNaming,
    sink: &mut dyn DiagnosticSink,
) -> MergeSummary {
    let Some(rest_api_id) = graph.find_rest_api().map(str::to_owned) else {
        sink.log("No REST API found. Skipping request validator configuration.");
        return MergeSummary::default();
    };

    if specs.is_empty() {
        sink.log("No validator configurations found.");
        return MergeSummary::default();
    }

    let mut summary = MergeSummary::default();

    for (path, spec) in specs {
        let validator_name = validator_logical_name(path, &spec.method);
        graph.insert(
            validator_name.clone(),
            Resource::validator(ValidatorProperties {
                rest_api_id: LogicalRef::new(&rest_api_id),
                validate_request_body: spec.policy.validates_body(),
                validate_request_parameters: spec.policy.validates_params(),
                name: format!(
                    "{}-{}-{}-{}-validator",
                    ctx.service, ctx.stage, path, spec.method
                ),
            }),
        );
        summary.validators += 1;

        let resource_id = naming.resource_logical_id(path);
        let method_id = naming.method_logical_id(&resource_id, &spec.method);
        if graph.get(&method_id).and_then(Resource::as_method).is_none() {
            sink.log(&format!(
                "No method resource {method_id} for {} {path}; validator left unattached.",
                spec.method
            ));
            continue;
        }

        // Models go into the graph before the method is re-borrowed.
        let mut model_refs = Vec::new();
        for (content_type, schema) in &spec.schemas {
            let model_name = model_logical_name(path, &spec.method, content_type);
            graph.insert(
                model_name.clone(),
                Resource::model(ModelProperties {
                    rest_api_id: LogicalRef::new(&rest_api_id),
                    content_type: content_type.clone(),
                    description: format!("Schema for {path} {} {content_type}", spec.method),
                    schema: schema.clone(),
                    name: model_name.clone(),
                }),
            );
            summary.models += 1;
            model_refs.push((content_type.clone(), model_name));
        }

        if let Some(method) = graph.get_mut(&method_id).and_then(Resource::as_method_mut) {
            method.request_validator_id = Some(LogicalRef::new(&validator_name));
            apply_parameter_requirements(method, &spec.parameters);
            for (content_type, model_name) in model_refs {
                method
                    .request_models
                    .insert(content_type, LogicalRef::new(model_name));
            }
        }
    }

    sink.log(&format!(
        "Added {} request validator(s) and {} request model(s).",
        summary.validators, summary.models
    ));
    summary
}

/// Merge parameter requirements onto a method, additively.
///
/// Entries land under `method.request.<kind>.<name>` keys. Pre-existing
/// entries for other names are preserved; same-name entries are
/// overwritten with the configured flag.
pub fn apply_parameter_requirements(
    method: &mut MethodProperties,
    parameters: &ParameterRequirements,
) {
    for (name, required) in &parameters.paths {
        method
            .request_parameters
            .insert(format!("method.request.path.{name}"), *required);
    }
    for (name, required) in &parameters.querystrings {
        method
            .request_parameters
            .insert(format!("method.request.querystring.{name}"), *required);
    }
    for (name, required) in &parameters.headers {
        method
            .request_parameters
            .insert(format!("method.request.header.{name}"), *required);
    }
}
