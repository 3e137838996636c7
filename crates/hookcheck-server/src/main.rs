//! `hookcheck` command-line entry point

use anyhow::{Context, Result};
use clap::ArgMatches;
use hookcheck_core::ContentValidator;
use hookcheck_policy::ValidationPolicy;
use hookcheck_server::cli::{command, render_report};
use hookcheck_server::{init_tracing, serve, AppConfig};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let matches = command().get_matches();
    init_tracing(matches.get_flag("log-json"));

    match matches.subcommand() {
        Some(("serve", args)) => {
            let mut config = match args.get_one::<String>("config") {
                Some(path) => AppConfig::load(path)
                    .with_context(|| format!("loading config {path}"))?,
                None => AppConfig::default(),
            };
            if let Some(bind) = args.get_one::<String>("bind") {
                config = config.with_bind(bind);
            }
            if let Some(policy) = args.get_one::<String>("policy") {
                config = config.with_policy_path(policy);
            }
            serve(&config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(("validate", args)) => {
            let validator = validator_for(args)?;
            let (hook, script) = content_for(args)?;
            let report = validator.validate(&hook, script.as_deref());

            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_report(&report));
            }
            Ok(exit_code(report.is_valid()))
        }
        Some(("correct", args)) => {
            let validator = validator_for(args)?;
            let (hook, script) = content_for(args)?;
            let correction = validator.correct(&hook, script.as_deref());

            if args.get_flag("json") {
                let response = hookcheck_core::CorrectionResponse {
                    corrected_hook: correction.hook,
                    corrected_script: correction.script,
                    report: correction.report,
                };
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("{}", correction.hook);
                if let Some(script) = &correction.script {
                    println!("\n{script}");
                }
                println!();
                print!("{}", render_report(&correction.report));
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(("policy", args)) => {
            let policy = policy_for(args)?;
            if args.get_flag("check") {
                for warning in policy.warnings() {
                    println!("warning: {warning}");
                }
                if policy.warnings().is_empty() {
                    println!("policy v{} ok", policy.version());
                }
                return Ok(exit_code(policy.warnings().is_empty()));
            }
            print!("{}", policy.config().to_toml()?);
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(ExitCode::FAILURE),
    }
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn policy_for(args: &ArgMatches) -> Result<ValidationPolicy> {
    match args.get_one::<String>("policy") {
        Some(path) => {
            ValidationPolicy::load(path).with_context(|| format!("loading policy {path}"))
        }
        None => Ok(ValidationPolicy::lima_real_estate()),
    }
}

fn validator_for(args: &ArgMatches) -> Result<ContentValidator> {
    Ok(ContentValidator::new(Arc::new(policy_for(args)?)))
}

fn content_for(args: &ArgMatches) -> Result<(String, Option<String>)> {
    let hook = args
        .get_one::<String>("hook")
        .cloned()
        .context("--hook is required")?;
    let script = match (
        args.get_one::<String>("script"),
        args.get_one::<String>("script-file"),
    ) {
        (Some(text), _) => Some(text.clone()),
        (None, Some(path)) => Some(
            std::fs::read_to_string(Path::new(path))
                .with_context(|| format!("reading script {path}"))?,
        ),
        (None, None) => None,
    };
    Ok((hook, script))
}
