//! # reqval-core — Foundational Types for Request-Validation Derivation
//!
//! Data model shared by the collector and merger:
//!
//! - **Route configuration** ([`route`]): the declarative per-function
//!   trigger definitions (`http` events with an optional `request:` block)
//!   and the normalized [`RouteValidationSpec`] extracted from them.
//!
//! - **Resource graph** ([`graph`]): a typed, CloudFormation-shaped mapping
//!   from logical resource name to resource record. Resource kinds the
//!   merge pass touches (REST API root, methods, request validators,
//!   models) get explicit property structs; everything else round-trips
//!   through opaque passthrough values.
//!
//! - **Naming** ([`naming`]): deterministic logical-name derivation for
//!   created resources, plus the [`MethodNaming`] oracle used to resolve a
//!   route's pre-existing method resource.
//!
//! This crate performs no I/O and emits no diagnostics; it is a pure data
//! layer consumed by `reqval-gateway`.

pub mod graph;
pub mod naming;
pub mod route;

pub use graph::{
    LogicalRef, MethodProperties, ModelProperties, Resource, ResourceGraph, ResourceProperties,
    Template, ValidatorProperties, METHOD_TYPE, MODEL_TYPE, REQUEST_VALIDATOR_TYPE, REST_API_TYPE,
};
pub use naming::{
    model_logical_name, sanitize_logical_name, validator_logical_name, AwsNaming, MethodNaming,
};
pub use route::{
    FunctionDef, FunctionEvent, HttpEvent, ParameterRequirements, RequestConfig,
    RouteValidationSpec, ValidatorConfig, ValidatorType,
};
