//! Provenance sidecars: every written bar document gets a small JSON file
//! next to it naming the build, the subcommand and its parameters.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What produced an artifact: the subcommand and its effective parameters.
pub struct Payload {
    pub command: &'static str,
    pub params: Value,
}

impl Payload {
    pub fn new(command: &'static str, params: Value) -> Self {
        Self { command, params }
    }

    fn record<'a>(&'a self, outputs: Vec<String>, callsite: Option<Callsite>) -> Record<'a> {
        Record {
            code_rev: current_git_rev(),
            barcut_version: barcut::VERSION,
            command: self.command,
            params: &self.params,
            outputs,
            callsite,
        }
    }
}

#[derive(Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

#[derive(Serialize)]
struct Record<'a> {
    code_rev: String,
    barcut_version: &'static str,
    command: &'static str,
    params: &'a Value,
    outputs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    callsite: Option<Callsite>,
}

/// Write the sidecar for `artifact` and return its path. The callsite is the
/// caller of this function.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let caller = Location::caller();
    let artifact = artifact.as_ref();
    let target = sidecar_path(artifact);
    match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir)
            .with_context(|| format!("creating provenance dir {}", dir.display()))?,
        _ => {}
    }

    let record = payload.record(
        vec![artifact.display().to_string()],
        Some(Callsite {
            file: caller.file(),
            line: caller.line(),
        }),
    );
    let bytes = serde_json::to_vec_pretty(&record)?;
    std::fs::write(&target, bytes).with_context(|| format!("writing {}", target.display()))?;
    Ok(target)
}

/// Provenance block without an artifact (for `report`).
pub fn report_block(payload: &Payload) -> Value {
    // A struct of strings and a `Value` always serializes.
    serde_json::to_value(payload.record(Vec::new(), None)).unwrap_or(Value::Null)
}

/// `bars.json` -> `bars.provenance.json`; an extensionless file gains the suffix.
fn sidecar_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("provenance.json")
}

/// Build-time `GIT_COMMIT`, then runtime `GIT_COMMIT`, then `git rev-parse`.
pub fn current_git_rev() -> String {
    non_empty(option_env!("GIT_COMMIT").map(str::to_owned))
        .or_else(|| non_empty(std::env::var("GIT_COMMIT").ok()))
        .or_else(rev_from_git)
        .unwrap_or_else(|| "unknown".to_owned())
}

fn non_empty(rev: Option<String>) -> Option<String> {
    rev.filter(|r| !r.trim().is_empty())
}

fn rev_from_git() -> Option<String> {
    let output = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    non_empty(String::from_utf8(output.stdout).ok()).map(|r| r.trim().to_owned())
}
