#![forbid(unsafe_code)]

//! Text and JSON rendering of runs and plans.

use std::fmt::Display;
use std::io::Write;

use ftui_delta::{Plan, RunDelta};
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Serialize)]
pub struct RunReport<T> {
    pub start: usize,
    pub end: usize,
    pub delta: T,
}

impl<T: Copy> From<&RunDelta<T>> for RunReport<T> {
    fn from(run: &RunDelta<T>) -> Self {
        Self {
            start: run.range.start,
            end: run.range.end,
            delta: run.delta,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StepReport<T> {
    #[serde(flatten)]
    pub run: RunReport<T>,
    pub snapshot: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct PlanReport<T> {
    pub status: &'static str,
    pub policy: String,
    pub step_count: usize,
    pub initial: Vec<T>,
    pub steps: Vec<StepReport<T>>,
}

impl<T: Copy> PlanReport<T> {
    pub fn new(plan: &Plan<T>, policy: &str) -> Self {
        Self {
            status: "ok",
            policy: policy.to_string(),
            step_count: plan.len(),
            initial: plan.initial().to_vec(),
            steps: plan
                .steps()
                .iter()
                .map(|step| StepReport {
                    run: RunReport::from(&step.run),
                    snapshot: step.snapshot.clone(),
                })
                .collect(),
        }
    }
}

pub fn write_json<W: Write, S: Serialize>(out: &mut W, value: &S) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn join<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// One line per step: index, `[start, end)`, delta, resulting snapshot.
pub fn write_plan_text<W: Write, T: Display + Copy>(
    out: &mut W,
    plan: &Plan<T>,
    policy: &str,
) -> Result<()> {
    writeln!(out, "policy: {policy}  steps: {}", plan.len())?;
    writeln!(out, "{:>4}  {:<12} {:>10}  snapshot", "step", "range", "delta")?;
    writeln!(out, "{:>4}  {:<12} {:>10}  {}", 0, "-", "-", join(plan.initial()))?;
    for (k, step) in plan.steps().iter().enumerate() {
        let range = format!("[{}, {})", step.run.range.start, step.run.range.end);
        writeln!(
            out,
            "{:>4}  {:<12} {:>10}  {}",
            k + 1,
            range,
            step.run.delta.to_string(),
            join(&step.snapshot)
        )?;
    }
    Ok(())
}

/// One line per run: `[start, end)` and delta.
pub fn write_runs_text<W: Write, T: Display>(out: &mut W, runs: &[RunDelta<T>]) -> Result<()> {
    if runs.is_empty() {
        writeln!(out, "converged: no runs")?;
        return Ok(());
    }
    for run in runs {
        writeln!(out, "[{}, {})  {}", run.range.start, run.range.end, run.delta)?;
    }
    Ok(())
}
