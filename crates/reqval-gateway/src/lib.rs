//! # reqval-gateway — Request-Validation Resource Derivation
//!
//! Two independently callable operations over the `reqval-core` data
//! model, run leaf-first by whatever packaging pipeline hosts them:
//!
//! 1. [`collector::collect`] — scan route definitions and extract a
//!    normalized validation spec per opted-in route. Pure.
//! 2. [`merger::merge`] — splice validator and model resources into an
//!    existing resource graph and wire each route's method entry to them.
//!    Mutates the graph in place under an exclusive borrow; all failure
//!    paths are non-fatal skips reported through a [`DiagnosticSink`].
//!
//! Neither operation calls back into the other, and neither performs I/O.
//!
//! The [`schema`] module is the host-tool extension point: it exposes the
//! JSON-schema shape of the `request:` configuration block for
//! registration with a host schema registry, and can validate
//! user-authored configuration against that shape ahead of a merge pass.

pub mod collector;
pub mod diag;
pub mod merger;
pub mod schema;

pub use collector::collect;
pub use diag::{DiagnosticSink, MemorySink, TracingSink};
pub use merger::{merge, MergeContext, MergeSummary};
pub use schema::{
    function_event_properties, register_request_schema, request_config_schema,
    validate_request_config, EventSchemaRegistry, RegistryError, SchemaViolation,
};
