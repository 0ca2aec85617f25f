//! # `reqval schema`
//!
//! Prints the JSON schema of the `request:` configuration block, or — with
//! `--validate` — checks a user-authored block (YAML or JSON) against it
//! and reports violations.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use reqval_gateway::{request_config_schema, validate_request_config};

/// Arguments for `reqval schema`.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Validate this request block instead of printing the schema.
    #[arg(long)]
    pub validate: Option<PathBuf>,
}

/// Run the schema subcommand. Returns the process exit code.
pub fn run_schema(args: &SchemaArgs) -> anyhow::Result<u8> {
    let Some(path) = &args.validate else {
        let schema = serde_json::to_string_pretty(&request_config_schema())
            .context("serializing request config schema")?;
        println!("{schema}");
        return Ok(0);
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("reading request block {}", path.display()))?;
    let value: serde_json::Value =
        serde_yaml::from_str(&text).context("parsing request block")?;

    let violations = validate_request_config(&value);
    if violations.is_empty() {
        println!("{}: ok", path.display());
        return Ok(0);
    }

    for violation in &violations {
        eprintln!("{}: {violation}", path.display());
    }
    Ok(1)
}
