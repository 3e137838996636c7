//! Command-line definition and text rendering

use clap::{Arg, ArgAction, ArgGroup, Command};
use hookcheck_core::{ValidationReport, ValidationResult};
use std::fmt::Write;

/// The `hookcheck` command tree
#[must_use]
pub fn command() -> Command {
    let policy_arg = || {
        Arg::new("policy")
            .long("policy")
            .value_name("FILE")
            .help("Policy file (.toml, .yaml, .json); built-in policy when omitted")
    };
    let content_args = |cmd: Command| {
        cmd.arg(
            Arg::new("hook")
                .long("hook")
                .required(true)
                .value_name("TEXT")
                .help("Hook text"),
        )
        .arg(
            Arg::new("script")
                .long("script")
                .value_name("TEXT")
                .help("Script text"),
        )
        .arg(
            Arg::new("script-file")
                .long("script-file")
                .value_name("FILE")
                .help("Read the script from a file"),
        )
        .group(ArgGroup::new("script-source").args(["script", "script-file"]))
        .arg(policy_arg())
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
    };

    Command::new("hookcheck")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Brand-safety validation for short-form marketing copy")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand(
            Command::new("serve")
                .about("Run the HTTP API")
                .arg(
                    Arg::new("bind")
                        .long("bind")
                        .value_name("ADDR")
                        .help("Listen address, e.g. 127.0.0.1:8080"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_name("FILE")
                        .help("Application config (hookcheck.toml)"),
                )
                .arg(policy_arg()),
        )
        .subcommand(content_args(
            Command::new("validate").about("Validate a hook and optional script"),
        ))
        .subcommand(content_args(
            Command::new("correct").about("Auto-correct a hook and optional script"),
        ))
        .subcommand(
            Command::new("policy")
                .about("Print the resolved policy as TOML")
                .arg(policy_arg())
                .arg(
                    Arg::new("check")
                        .long("check")
                        .action(ArgAction::SetTrue)
                        .help("Report misconfiguration warnings; exit 1 if any"),
                ),
        )
}

fn render_result(out: &mut String, label: &str, result: &ValidationResult) {
    let verdict = if result.is_valid { "valid" } else { "invalid" };
    let _ = writeln!(out, "{label}: {}/100 ({verdict})", result.score);
    for issue in &result.issues {
        let _ = write!(out, "  [{:?}] {:?}: {}", issue.severity, issue.kind, issue.message);
        if let Some(suggestion) = &issue.suggestion {
            let _ = write!(out, " -> {suggestion}");
        }
        out.push('\n');
    }
}

/// Human-readable report
#[must_use]
pub fn render_report(report: &ValidationReport) -> String {
    let mut out = String::new();
    render_result(&mut out, "Hook", &report.hook_result);
    if let Some(script) = &report.script_result {
        render_result(&mut out, "Script", script);
    }
    let _ = writeln!(
        out,
        "Total: {}/100 ({:?})",
        report.total_score, report.quality_tier
    );
    if !report.recommendations.is_empty() {
        out.push_str("Recommendations:\n");
        for recommendation in &report.recommendations {
            let _ = writeln!(out, "  - {recommendation}");
        }
    }
    out
}
