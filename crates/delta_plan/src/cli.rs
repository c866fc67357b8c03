#![forbid(unsafe_code)]

use std::fmt::Display;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{ArgAction, Args, Parser, Subcommand};
use ftui_delta::{DeltaConfig, DeltaConfigError, Numeric, Planner, PolicyKind, Tolerance};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::input::SequenceArgs;
use crate::report::{PlanReport, RunReport, write_json, write_plan_text, write_runs_text};

#[derive(Debug, Parser)]
#[command(
    name = "delta_plan",
    about = "Plan non-overshooting run-by-run transitions between numeric sequences",
    version
)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build a full plan and print every step.
    Plan(PlanArgs),

    /// Print the current run partition without planning.
    Runs(RunsArgs),

    /// List built-in selection policies.
    Policies,
}

#[derive(Debug, Clone, Default, Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub sequences: SequenceArgs,

    /// Selection policy (first, last, largest, smallest, widest).
    #[arg(long)]
    pub policy: Option<String>,

    /// TOML or JSON config file with epsilon, max_steps, policy.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the floating-point epsilon.
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Fail if the plan needs more than this many steps.
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct RunsArgs {
    #[command(flatten)]
    pub sequences: SequenceArgs,

    /// Override the floating-point epsilon.
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Whether the parsed subcommand asked for JSON output.
    #[must_use]
    pub fn json_output(&self) -> bool {
        match &self.command {
            Commands::Plan(args) => args.json,
            Commands::Runs(args) => args.json,
            Commands::Policies => false,
        }
    }
}

pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    match cli.command {
        Commands::Plan(args) => run_plan(&args, out),
        Commands::Runs(args) => run_runs(&args, out),
        Commands::Policies => {
            for kind in PolicyKind::ALL {
                writeln!(out, "{:<10} {}", kind.as_str(), kind.description())?;
            }
            Ok(())
        }
    }
}

/// Merge the config file (if any) with command-line overrides.
fn resolve_config(args: &PlanArgs) -> Result<DeltaConfig> {
    let mut config = match &args.config {
        Some(path) => DeltaConfig::from_file(path)?,
        None => DeltaConfig::default(),
    };
    if let Some(policy) = &args.policy {
        config.policy = policy.parse()?;
    }
    if let Some(epsilon) = args.epsilon {
        config.epsilon = epsilon;
    }
    if args.max_steps.is_some() {
        config.max_steps = args.max_steps;
    }
    validated(config)
}

fn validated(config: DeltaConfig) -> Result<DeltaConfig> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(DeltaConfigError::Validation(errors).into());
    }
    Ok(config)
}

fn run_plan<W: Write>(args: &PlanArgs, out: &mut W) -> Result<()> {
    let config = resolve_config(args)?;
    tracing::debug!(?config, "resolved plan config");
    if args.sequences.float {
        plan_with::<f64, W>(args, &config, out)
    } else {
        plan_with::<i64, W>(args, &config, out)
    }
}

fn plan_with<T, W>(args: &PlanArgs, config: &DeltaConfig, out: &mut W) -> Result<()>
where
    T: Numeric + Display + FromStr + Serialize + DeserializeOwned,
    W: Write,
{
    let pair = args.sequences.load::<T>()?;
    let planner = Planner::<T>::from_config(config);
    let plan = planner.build(&pair.current, &pair.target, &config.policy)?;
    tracing::info!(steps = plan.len(), policy = %config.policy, "plan built");
    if args.json {
        write_json(out, &PlanReport::new(&plan, config.policy.as_str()))
    } else {
        write_plan_text(out, &plan, config.policy.as_str())
    }
}

fn run_runs<W: Write>(args: &RunsArgs, out: &mut W) -> Result<()> {
    let mut config = DeltaConfig::default();
    if let Some(epsilon) = args.epsilon {
        config.epsilon = epsilon;
    }
    let config = validated(config)?;
    if args.sequences.float {
        runs_with::<f64, W>(args, config.epsilon, out)
    } else {
        runs_with::<i64, W>(args, config.epsilon, out)
    }
}

fn runs_with<T, W>(args: &RunsArgs, epsilon: f64, out: &mut W) -> Result<()>
where
    T: Numeric + Display + FromStr + Serialize + DeserializeOwned,
    W: Write,
{
    let pair = args.sequences.load::<T>()?;
    let tolerance = Tolerance::new(epsilon);
    let runs = ftui_delta::find_runs_with(&pair.current, &pair.target, &tolerance)?;
    if args.json {
        let report: Vec<RunReport<T>> = runs.iter().map(RunReport::from).collect();
        write_json(out, &report)
    } else {
        write_runs_text(out, &runs)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;
    use crate::error::CliError;

    fn sequences(current: &str, target: &str) -> SequenceArgs {
        SequenceArgs {
            current: Some(current.to_string()),
            target: Some(target.to_string()),
            ..SequenceArgs::default()
        }
    }

    fn run_to_string(command: Commands) -> Result<String> {
        let mut out = Vec::new();
        run(Cli { verbose: 0, command }, &mut out)?;
        Ok(String::from_utf8(out).expect("utf8 output"))
    }

    #[test]
    fn policies_command_lists_all() {
        let text = run_to_string(Commands::Policies).unwrap();
        assert_eq!(text.lines().count(), PolicyKind::ALL.len());
        assert!(text.contains("largest"));
    }

    #[test]
    fn plan_command_reference_scenario() {
        let text = run_to_string(Commands::Plan(PlanArgs {
            sequences: sequences(
                "1,23,53,123,412,8,231,23,1234,43,1,3",
                "42,321,53,532,12,8,2123,2,12341,653,1,4",
            ),
            ..PlanArgs::default()
        }))
        .unwrap();
        assert!(text.starts_with("policy: first  steps: 9"), "{text}");
    }

    #[test]
    fn plan_command_json() {
        let text = run_to_string(Commands::Plan(PlanArgs {
            sequences: sequences("32,152,68,8", "3,12,32,15"),
            policy: Some("largest".into()),
            json: true,
            ..PlanArgs::default()
        }))
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["policy"], "largest");
        assert_eq!(value["steps"][0]["delta"], -29);
    }

    #[test]
    fn plan_command_mismatch_exit_code() {
        let err = run_to_string(Commands::Plan(PlanArgs {
            sequences: sequences("1,2,3", "1,2"),
            ..PlanArgs::default()
        }))
        .unwrap_err();
        assert!(matches!(err, CliError::Plan(_)));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn unknown_policy_exit_code() {
        let err = run_to_string(Commands::Plan(PlanArgs {
            sequences: sequences("1", "2"),
            policy: Some("random".into()),
            ..PlanArgs::default()
        }))
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn config_file_sets_policy_and_limit() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "policy = \"last\"\nmax_steps = 1").unwrap();
        let err = run_to_string(Commands::Plan(PlanArgs {
            sequences: sequences("0,0,0", "1,2,3"),
            config: Some(file.path().to_path_buf()),
            ..PlanArgs::default()
        }))
        .unwrap_err();
        assert!(err.to_string().contains("step limit"), "{err}");

        let text = run_to_string(Commands::Plan(PlanArgs {
            sequences: sequences("0,0,0", "1,2,3"),
            config: Some(file.path().to_path_buf()),
            max_steps: Some(10),
            ..PlanArgs::default()
        }))
        .unwrap();
        assert!(text.starts_with("policy: last  steps: 3"), "{text}");
    }

    #[test]
    fn invalid_epsilon_override_rejected() {
        let err = run_to_string(Commands::Plan(PlanArgs {
            sequences: sequences("1", "2"),
            epsilon: Some(-0.5),
            ..PlanArgs::default()
        }))
        .unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn runs_command_float() {
        let mut args = RunsArgs {
            sequences: sequences("0.0, 0.0, 0.0", "0.5, 0.00001, -0.25"),
            ..RunsArgs::default()
        };
        args.sequences.float = true;
        let text = run_to_string(Commands::Runs(args)).unwrap();
        assert_eq!(text, "[0, 1)  0.5\n[2, 3)  -0.25\n");
    }

    #[test]
    fn runs_command_rejects_non_finite_epsilon() {
        for epsilon in [f64::NAN, f64::INFINITY, 1.5] {
            let mut args = RunsArgs {
                sequences: sequences("0", "5"),
                epsilon: Some(epsilon),
                ..RunsArgs::default()
            };
            args.sequences.float = true;
            let err = run_to_string(Commands::Runs(args)).unwrap_err();
            assert!(matches!(err, CliError::Config(_)), "{epsilon}: {err}");
            assert_eq!(err.exit_code(), 2);
        }
    }

    #[test]
    fn json_output_follows_subcommand() {
        let plan = Cli::try_parse_from([
            "delta_plan",
            "plan",
            "--current",
            "1",
            "--target",
            "2",
            "--json",
        ])
        .unwrap();
        assert!(plan.json_output());
        let policies = Cli::try_parse_from(["delta_plan", "policies"]).unwrap();
        assert!(!policies.json_output());
        assert!(Cli::try_parse_from(["delta_plan", "policies", "--json"]).is_err());
    }

    #[test]
    fn runs_command_json() {
        let text = run_to_string(Commands::Runs(RunsArgs {
            sequences: sequences("32,152,68,8", "3,12,32,15"),
            json: true,
            ..RunsArgs::default()
        }))
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"start": 0, "end": 3, "delta": -29},
                {"start": 3, "end": 4, "delta": 7}
            ])
        );
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "delta_plan",
            "-v",
            "plan",
            "--current",
            "-1,2",
            "--target",
            "3,-4",
            "--policy",
            "widest",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Plan(args) => {
                assert_eq!(args.sequences.current.as_deref(), Some("-1,2"));
                assert_eq!(args.policy.as_deref(), Some("widest"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn input_conflicts_with_inline_values() {
        let parsed = Cli::try_parse_from([
            "delta_plan",
            "runs",
            "--current",
            "1",
            "--input",
            "pair.json",
        ]);
        assert!(parsed.is_err());
    }
}
