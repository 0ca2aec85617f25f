//! # `reqval apply`
//!
//! Reads a service configuration (YAML) and a compiled template (JSON),
//! runs collect + merge, and writes the merged template. A template with
//! no REST-API root or a configuration with no validator-bearing routes
//! is not an error: the pass logs a diagnostic and the template is
//! written back unchanged, mirroring the core's skip-and-log semantics.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Deserialize;

use reqval_core::graph::Template;
use reqval_core::naming::AwsNaming;
use reqval_core::route::FunctionDef;
use reqval_gateway::{collect, merge, MergeContext, TracingSink};

/// Arguments for `reqval apply`.
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Service configuration file (YAML).
    #[arg(long)]
    pub config: PathBuf,

    /// Compiled template file (JSON).
    #[arg(long)]
    pub template: PathBuf,

    /// Output path for the merged template; stdout when omitted.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Deployment stage; overrides the configuration's `provider.stage`.
    #[arg(long)]
    pub stage: Option<String>,
}

/// The slice of a service configuration this tool reads.
#[derive(Debug, Default, Deserialize)]
struct ServiceConfig {
    #[serde(default)]
    service: String,
    #[serde(default)]
    provider: ProviderConfig,
    #[serde(default)]
    functions: BTreeMap<String, FunctionDef>,
}

#[derive(Debug, Default, Deserialize)]
struct ProviderConfig {
    #[serde(default)]
    stage: Option<String>,
}

/// Run the apply subcommand. Returns the process exit code.
pub fn run_apply(args: &ApplyArgs) -> anyhow::Result<u8> {
    let config_text = fs::read_to_string(&args.config)
        .with_context(|| format!("reading config {}", args.config.display()))?;
    let config: ServiceConfig =
        serde_yaml::from_str(&config_text).context("parsing service configuration")?;

    let template_text = fs::read_to_string(&args.template)
        .with_context(|| format!("reading template {}", args.template.display()))?;
    let mut template: Template =
        serde_json::from_str(&template_text).context("parsing template")?;

    let specs = collect(&config.functions);
    tracing::debug!(routes = specs.len(), "collected validator configurations");

    let stage = args
        .stage
        .clone()
        .or_else(|| config.provider.stage.clone())
        .unwrap_or_else(|| "dev".to_string());
    let ctx = MergeContext::new(config.service).with_stage(stage);

    let summary = merge(
        &mut template.resources,
        &specs,
        &ctx,
        &AwsNaming,
        &mut TracingSink,
    );
    tracing::debug!(
        validators = summary.validators,
        models = summary.models,
        "merge pass complete"
    );

    let mut rendered =
        serde_json::to_string_pretty(&template).context("serializing merged template")?;
    rendered.push('\n');

    match &args.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("writing merged template to {}", path.display()))?,
        None => print!("{rendered}"),
    }

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CONFIG: &str = r#"
service: demo-service
provider:
  stage: prod
functions:
  createUser:
    handler: bin/create_user
    events:
      - http:
          path: /users
          method: post
          request:
            validator:
              type: ALL
            schemas:
              application/json:
                type: object
                required: [name]
  getUser:
    events:
      - http:
          path: /users/{id}
          method: get
          request:
            validator:
              type: PARAMS_ONLY
            parameters:
              paths:
                id: true
"#;

    fn template_json() -> serde_json::Value {
        json!({
            "Resources": {
                "ApiGatewayRestApi": {
                    "Type": "AWS::ApiGateway::RestApi",
                    "Properties": {}
                },
                "ApiGatewayMethodUsersPost": {
                    "Type": "AWS::ApiGateway::Method",
                    "Properties": { "HttpMethod": "POST" }
                },
                "ApiGatewayMethodUsersIdVarGet": {
                    "Type": "AWS::ApiGateway::Method",
                    "Properties": { "HttpMethod": "GET" }
                }
            }
        })
    }

    fn write_inputs(dir: &tempfile::TempDir) -> (PathBuf, PathBuf, PathBuf) {
        let config = dir.path().join("service.yml");
        let template = dir.path().join("template.json");
        let output = dir.path().join("merged.json");
        fs::write(&config, CONFIG).unwrap();
        fs::write(&template, template_json().to_string()).unwrap();
        (config, template, output)
    }

    #[test]
    fn apply_merges_validators_into_template() {
        let dir = tempfile::tempdir().unwrap();
        let (config, template, output) = write_inputs(&dir);

        let code = run_apply(&ApplyArgs {
            config,
            template,
            output: Some(output.clone()),
            stage: None,
        })
        .unwrap();
        assert_eq!(code, 0);

        let merged: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let resources = merged.get("Resources").unwrap();

        let validator = resources.get("RequestValidatorusersPOST").unwrap();
        assert_eq!(
            validator.pointer("/Properties/Name").unwrap(),
            &json!("demo-service-prod-/users-POST-validator")
        );
        assert!(resources.get("ModelusersPOSTapplicationjson").is_some());
        assert_eq!(
            resources
                .pointer("/ApiGatewayMethodUsersIdVarGet/Properties/RequestParameters/method.request.path.id")
                .unwrap(),
            &json!(true)
        );
    }

    #[test]
    fn stage_flag_overrides_config_stage() {
        let dir = tempfile::tempdir().unwrap();
        let (config, template, output) = write_inputs(&dir);

        run_apply(&ApplyArgs {
            config,
            template,
            output: Some(output.clone()),
            stage: Some("staging".to_string()),
        })
        .unwrap();

        let merged: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(
            merged
                .pointer("/Resources/RequestValidatorusersPOST/Properties/Name")
                .unwrap(),
            &json!("demo-service-staging-/users-POST-validator")
        );
    }

    #[test]
    fn template_without_rest_api_passes_through_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("service.yml");
        let template = dir.path().join("template.json");
        let output = dir.path().join("merged.json");
        fs::write(&config, CONFIG).unwrap();
        let bare = json!({
            "Resources": {
                "SomeQueue": { "Type": "AWS::SQS::Queue", "Properties": {} }
            }
        });
        fs::write(&template, bare.to_string()).unwrap();

        let code = run_apply(&ApplyArgs {
            config,
            template,
            output: Some(output.clone()),
            stage: None,
        })
        .unwrap();
        assert_eq!(code, 0);

        let merged: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(merged, bare);
    }

    #[test]
    fn malformed_template_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("service.yml");
        let template = dir.path().join("template.json");
        fs::write(&config, CONFIG).unwrap();
        fs::write(&template, "{ not json").unwrap();

        let result = run_apply(&ApplyArgs {
            config,
            template,
            output: None,
            stage: None,
        });
        assert!(result.is_err());
    }
}
