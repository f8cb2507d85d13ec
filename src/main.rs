// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{anyhow, bail, Context, Result};
use flepimop2::builder::Builder;
use flepimop2::config::{load_and_validate_config, Config};
use flepimop2::errors::{ConfigError, PipelineError};
use flepimop2::meta::RunMeta;
use flepimop2::observability::messages::simulation::SimulationFailed;
use flepimop2::observability::messages::validation::{
    CompatibilityIssueReported, ConfigErrorReported, ConfigValidationFailed,
};
use flepimop2::observability::messages::StructuredLog;
use flepimop2::registry::{Category, Registry};
use flepimop2::simulator::Simulator;
use flepimop2::traits::Process;
use std::env;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Simulate,
    Process,
    List,
}

#[derive(Debug)]
struct CliArgs {
    command: Command,
    config: Option<String>,
    target: Option<String>,
    dry_run: bool,
    verbosity: u8,
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} <simulate|process|list> [config.yaml] [--target NAME] [--dry-run] [-v...]\n\
         Example: {program} simulate configs/sir-demo.yaml\n\
         Example: {program} simulate configs/sir-groups.yaml --target high -vv\n\
         Example: {program} process configs/sir-demo.yaml --dry-run\n\
         Example: {program} list"
    )
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut iter = args.iter();
    let command = match iter.next().map(String::as_str) {
        Some("simulate") => Command::Simulate,
        Some("process") => Command::Process,
        Some("list") => Command::List,
        Some(other) => bail!("unknown command '{}'", other),
        None => bail!("missing command"),
    };

    let mut cli = CliArgs {
        command,
        config: None,
        target: None,
        dry_run: false,
        verbosity: 0,
    };

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--dry-run" => cli.dry_run = true,
            "--verbose" => cli.verbosity = cli.verbosity.saturating_add(1),
            "--target" | "-t" => {
                let name = iter
                    .next()
                    .ok_or_else(|| anyhow!("--target requires a name"))?;
                cli.target = Some(name.clone());
            }
            flag if flag.len() > 1 && flag.starts_with('-') && flag[1..].chars().all(|c| c == 'v') => {
                cli.verbosity = cli.verbosity.saturating_add((flag.len() - 1) as u8);
            }
            flag if flag.starts_with('-') => bail!("unknown option '{}'", flag),
            path if cli.config.is_none() => cli.config = Some(path.to_string()),
            extra => bail!("unexpected argument '{}'", extra),
        }
    }

    if command != Command::List && cli.config.is_none() {
        bail!("a config file is required");
    }
    Ok(cli)
}

/// `RUST_LOG` wins; otherwise each `-v` raises the level from `warn`.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_checked(path: &str) -> Result<Config> {
    match load_and_validate_config(path) {
        Ok(config) => Ok(config),
        Err(ConfigError::Invalid(errors)) => {
            ConfigValidationFailed {
                path,
                error_count: errors.len(),
            }
            .log();
            for error in &errors {
                ConfigErrorReported { error }.log();
            }
            Err(ConfigError::Invalid(errors).into())
        }
        Err(error) => Err(error).with_context(|| format!("failed to load '{}'", path)),
    }
}

fn run_name(config: &Config, target: &str) -> String {
    match &config.name {
        Some(name) => format!("{}_{}", name, target),
        None => target.to_string(),
    }
}

/// Build, validate and (unless dry) run one target. Returns the trajectory shape.
fn run_target(
    config: &Config,
    target: &str,
    dry_run: bool,
) -> Result<Option<(usize, usize)>, PipelineError> {
    let mut simulator = Simulator::from_config(config, Some(target))?;
    if dry_run {
        return Ok(None);
    }
    let run_meta = RunMeta::simulate().with_name(run_name(config, target));
    let trajectory = simulator.run_configured(&run_meta)?;
    Ok(Some(trajectory.shape()))
}

fn report_failure(target: &str, error: &PipelineError) {
    if let PipelineError::Incompatible(incompatible) = error {
        for issue in &incompatible.issues {
            CompatibilityIssueReported { target, issue }.log();
        }
    }
    SimulationFailed { target, error }.log();
}

async fn simulate(cli: &CliArgs, path: &str) -> Result<()> {
    let config = Arc::new(load_checked(path)?);
    let targets = match &cli.target {
        Some(target) => vec![target.clone()],
        None => config.target_names(),
    };
    if targets.is_empty() {
        return Err(ConfigError::NoTargets.into());
    }

    println!("📋 Configuration: {}", path);
    println!("🎯 Targets: {}", targets.join(", "));
    if cli.dry_run {
        println!("🧪 Dry run: components are built and validated, nothing is integrated");
    }

    let start = Instant::now();
    let handles: Vec<_> = targets
        .into_iter()
        .map(|target| {
            let config = Arc::clone(&config);
            let dry_run = cli.dry_run;
            tokio::task::spawn_blocking(move || {
                let result = run_target(&config, &target, dry_run);
                (target, result)
            })
        })
        .collect();

    let mut failures = 0;
    for handle in handles {
        let (target, result) = handle.await.context("simulation task panicked")?;
        match result {
            Ok(Some((rows, cols))) => println!("  ✅ {} → {} time points x {} states", target, rows, cols),
            Ok(None) => println!("  ✅ {} → validated", target),
            Err(error) => {
                report_failure(&target, &error);
                println!("  ❌ {} → {}", target, error);
                failures += 1;
            }
        }
    }

    println!("⏱️  Total Time: {:?}", start.elapsed());
    if failures > 0 {
        bail!("{} simulation target(s) failed", failures);
    }
    Ok(())
}

async fn process(cli: &CliArgs, path: &str) -> Result<()> {
    let config = load_checked(path)?;
    let builder = Builder::global();

    for (name, raw) in &config.process {
        let step = builder
            .build_value::<dyn Process>(raw)
            .with_context(|| format!("failed to build process '{}'", name))?;
        step.execute(cli.dry_run)
            .await
            .with_context(|| format!("process '{}' failed", name))?;
        println!("  ✅ {} ({})", name, step.module());
    }
    Ok(())
}

fn list() {
    let registry = Registry::global();
    for category in Category::ALL {
        println!("{}:", category);
        for name in registry.names(category) {
            println!("  {}", category.path_for(&name));
        }
    }
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("flepimop2");

    let cli = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{}\n\n{}", e, usage(program));
            std::process::exit(2);
        }
    };
    init_logging(cli.verbosity);

    let result = match (cli.command, cli.config.as_deref()) {
        (Command::List, _) => {
            list();
            Ok(())
        }
        (Command::Simulate, Some(path)) => simulate(&cli, path).await,
        (Command::Process, Some(path)) => process(&cli, path).await,
        (_, None) => Err(anyhow!("a config file is required")),
    };

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_args_table_driven() {
        struct TestCase {
            name: &'static str,
            args: Vec<String>,
            expected: Option<(Command, Option<&'static str>, Option<&'static str>, bool, u8)>,
        }

        let test_cases = vec![
            TestCase {
                name: "simulate with config",
                args: args(&["simulate", "configs/sir-demo.yaml"]),
                expected: Some((Command::Simulate, Some("configs/sir-demo.yaml"), None, false, 0)),
            },
            TestCase {
                name: "target, dry run and stacked verbosity",
                args: args(&["simulate", "c.yaml", "--target", "high", "--dry-run", "-vv", "-v"]),
                expected: Some((Command::Simulate, Some("c.yaml"), Some("high"), true, 3)),
            },
            TestCase {
                name: "list needs no config",
                args: args(&["list"]),
                expected: Some((Command::List, None, None, false, 0)),
            },
            TestCase {
                name: "process without config",
                args: args(&["process"]),
                expected: None,
            },
            TestCase {
                name: "unknown command",
                args: args(&["run", "c.yaml"]),
                expected: None,
            },
            TestCase {
                name: "target without name",
                args: args(&["simulate", "c.yaml", "--target"]),
                expected: None,
            },
            TestCase {
                name: "unknown option",
                args: args(&["simulate", "c.yaml", "--fast"]),
                expected: None,
            },
            TestCase {
                name: "second config",
                args: args(&["simulate", "a.yaml", "b.yaml"]),
                expected: None,
            },
        ];

        for test_case in test_cases {
            let parsed = parse_args(&test_case.args).ok().map(|cli| {
                (
                    cli.command,
                    cli.config.clone(),
                    cli.target.clone(),
                    cli.dry_run,
                    cli.verbosity,
                )
            });
            let expected = test_case.expected.map(|(command, config, target, dry_run, v)| {
                (
                    command,
                    config.map(str::to_string),
                    target.map(str::to_string),
                    dry_run,
                    v,
                )
            });
            assert_eq!(parsed, expected, "Test case '{}' failed", test_case.name);
        }
    }

    #[test]
    fn test_run_name_prefers_config_name() {
        let mut config = Config::default();
        assert_eq!(run_name(&config, "baseline"), "baseline");

        config.name = Some("sir_demo".to_string());
        assert_eq!(run_name(&config, "baseline"), "sir_demo_baseline");
    }
}
