//! # reqval-cli — Command-Line Driver
//!
//! Provides the `reqval` binary. Subcommand handlers live here as plain
//! functions returning an exit code, so they stay testable without a
//! process boundary:
//!
//! - `reqval apply` — collect validation specs from a service
//!   configuration and merge the derived resources into a compiled
//!   template.
//! - `reqval schema` — print the `request:` configuration JSON schema, or
//!   validate a user-authored block against it.

pub mod apply;
pub mod schema;
