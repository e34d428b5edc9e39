//! Dispatch from a subcommand to an engine call
//!
//! `run` loads the parameter file, executes the command into a [`Report`],
//! renders it in the requested format and writes it to stdout or a file.

use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use paycomp_core::analysis::{SweepConfig, SweepResults, sweep};
use paycomp_core::model::{Comparison, ParameterSet, PayMode, SalaryBreakdown, StoreReport};
use paycomp_core::optimization::{ThresholdSuggestion, suggest_thresholds};
use paycomp_core::{analyze, analyze_all, calculate_breakdown, compare_for_role};
use serde::Serialize;

use crate::cli::{Cli, Command, OutputFormat};
use crate::render;
use crate::storage::{load_parameters, resolve_output_path, save_parameters, write_file};

/// Structured result of one command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Init { path: PathBuf },
    Salary(SalaryBreakdown),
    Comparison(Comparison),
    Store(StoreReport),
    Stores(Vec<StoreReport>),
    Sweep(SweepResults),
    Suggestion {
        mode: PayMode,
        suggestion: Option<ThresholdSuggestion>,
    },
}

impl Report {
    /// Render in the requested output format
    pub fn render(&self, format: OutputFormat) -> color_eyre::Result<String> {
        match format {
            OutputFormat::Json => {
                let mut json =
                    serde_json::to_string_pretty(self).wrap_err("Failed to serialize report")?;
                json.push('\n');
                Ok(json)
            }
            OutputFormat::Text => Ok(self.render_text()),
        }
    }

    fn render_text(&self) -> String {
        match self {
            Report::Init { path } => {
                format!("Wrote default parameters to {}\n", path.display())
            }
            Report::Salary(b) => render::render_breakdown(b),
            Report::Comparison(c) => render::render_comparison(c),
            Report::Store(r) => render::render_store(r),
            Report::Stores(reports) => render::render_stores(reports),
            Report::Sweep(results) => render::render_sweep(results),
            Report::Suggestion { mode, suggestion } => {
                render::render_suggestion(*mode, suggestion.as_ref())
            }
        }
    }
}

/// Load the parameter file named on the command line, or the defaults
pub fn load(config: Option<&Path>) -> color_eyre::Result<ParameterSet> {
    match config {
        Some(path) => {
            let params = load_parameters(path)
                .wrap_err_with(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Using parameters from {}", path.display());
            Ok(params)
        }
        None => {
            tracing::info!("No parameter file given, using defaults");
            Ok(ParameterSet::default())
        }
    }
}

/// Execute one command against a parameter set
pub fn execute(command: &Command, params: &ParameterSet) -> color_eyre::Result<Report> {
    let report = match command {
        Command::Init { path, force } => {
            save_parameters(path, params, *force)?;
            Report::Init { path: path.clone() }
        }
        Command::Calc(selection) => {
            let mode = selection.mode.unwrap_or(params.pay_mode);
            let role = selection.role.unwrap_or(params.selected_role);
            Report::Salary(calculate_breakdown(params, mode, role)?)
        }
        Command::Compare { role } => {
            let role = role.unwrap_or(params.selected_role);
            Report::Comparison(compare_for_role(params, role)?)
        }
        Command::Store { mode, all } => {
            if *all {
                Report::Stores(analyze_all(params)?)
            } else {
                Report::Store(analyze(params, mode.unwrap_or(params.pay_mode))?)
            }
        }
        Command::Sweep {
            target,
            min,
            max,
            steps,
        } => {
            let config = SweepConfig::new(*target, *min, *max, *steps);
            Report::Sweep(sweep(params, &config)?)
        }
        Command::Suggest { mode, step } => Report::Suggestion {
            mode: *mode,
            suggestion: suggest_thresholds(params, *mode, *step)?,
        },
    };
    Ok(report)
}

/// Run the command line end to end
pub fn run(cli: &Cli) -> color_eyre::Result<()> {
    // `init` writes the defaults; it never reads an existing file
    let params = match cli.command {
        Command::Init { .. } => ParameterSet::default(),
        _ => load(cli.config.as_deref())?,
    };

    tracing::debug!(command = cli.command.name(), "executing");
    let report = execute(&cli.command, &params)?;
    let rendered = report.render(cli.format)?;

    match &cli.output {
        Some(target) => {
            let now = jiff::Zoned::now().datetime();
            let path =
                resolve_output_path(target, cli.command.name(), cli.format.extension(), now);
            write_file(&path, &rendered)?;
            tracing::info!("Wrote {} report to {}", cli.command.name(), path.display());
            eprintln!("Report written to {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Selection;
    use paycomp_core::analysis::SweepTarget;
    use paycomp_core::model::Role;
    use tempfile::tempdir;

    #[test]
    fn test_calc_uses_selection_then_params() {
        let params = ParameterSet::default();

        let report = execute(
            &Command::Calc(Selection {
                mode: Some(PayMode::NewLow),
                role: None,
            }),
            &params,
        )
        .unwrap();
        match report {
            Report::Salary(b) => {
                assert_eq!(b.mode, PayMode::NewLow);
                assert_eq!(b.role, params.selected_role);
            }
            other => panic!("unexpected report {other:?}"),
        }
    }

    #[test]
    fn test_store_all_has_every_mode() {
        let report = execute(
            &Command::Store {
                mode: None,
                all: true,
            },
            &ParameterSet::default(),
        )
        .unwrap();
        assert!(matches!(report, Report::Stores(ref r) if r.len() == PayMode::ALL.len()));
    }

    #[test]
    fn test_engine_errors_propagate() {
        let params = ParameterSet::default();
        let command = Command::Sweep {
            target: SweepTarget::PackPrice,
            min: 10.0,
            max: 1.0,
            steps: 3,
        };
        assert!(execute(&command, &params).is_err());
    }

    #[test]
    fn test_json_report_is_the_engine_record() {
        let command = Command::Compare {
            role: Some(Role::Supervisor),
        };
        let report = execute(&command, &ParameterSet::default()).unwrap();
        let json = report.render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["role"], "supervisor");
        assert_eq!(value["rows"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("params.yaml");
        let command = Command::Init {
            path: path.clone(),
            force: false,
        };

        execute(&command, &ParameterSet::default()).unwrap();
        assert_eq!(load(Some(&path)).unwrap(), ParameterSet::default());

        // Second run without --force refuses to overwrite
        assert!(execute(&command, &ParameterSet::default()).is_err());
    }

    #[test]
    fn test_suggestion_text_without_candidates() {
        let mut params = ParameterSet::default();
        params.purchased_packages = 5.0;
        let report = execute(
            &Command::Suggest {
                mode: PayMode::NewMid,
                step: 5,
            },
            &params,
        )
        .unwrap();
        let text = report.render(OutputFormat::Text).unwrap();
        assert!(text.starts_with("No threshold suggestion"));
    }
}
