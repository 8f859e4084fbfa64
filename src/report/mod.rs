use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;

use crate::core::marker::MarkerEnv;
use crate::core::models::Requirement;
use crate::core::repository::{Repository, Sort};
use crate::errors::Result;
use crate::validate::findings::{Finding, Report};

/// Machine-readable export of one validation run.
#[derive(Debug, Serialize)]
pub struct ReportFile {
    pub manifest: String,
    pub generated_at: String,
    pub summary: ReportSummary,
    pub requirements: Vec<RequirementEntry>,
    pub findings: Vec<Finding>,
}

#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub requirements: usize,
    pub errors: usize,
    pub warnings: usize,
}

#[derive(Debug, Serialize)]
pub struct RequirementEntry {
    pub line: usize,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<String>,
    pub constraint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    pub platforms: Vec<String>,
}

pub fn build_report_file(
    manifest: &Path,
    requirements: &Repository<Requirement>,
    envs: &[(String, MarkerEnv)],
    report: &Report,
) -> ReportFile {
    let entries = requirements
        .values(Sort::IdAsc)
        .into_iter()
        .map(|req| RequirementEntry {
            line: req.line,
            name: req.name.raw().to_string(),
            extras: req.extras.clone(),
            constraint: req.specifiers.to_string(),
            marker: req.marker.as_ref().map(|m| m.to_string()),
            platforms: req
                .active_platforms(envs)
                .into_iter()
                .map(|p| p.to_string())
                .collect(),
        })
        .collect();

    ReportFile {
        manifest: manifest.display().to_string(),
        generated_at: Local::now().to_rfc3339(),
        summary: ReportSummary {
            requirements: requirements.len(),
            errors: report.errors(),
            warnings: report.warnings(),
        },
        requirements: entries,
        findings: report.findings.clone(),
    }
}

pub fn save_report(file: &ReportFile, path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let contents = serde_json::to_string_pretty(file)?;
    fs::write(path, contents)?;
    Ok(path.to_path_buf())
}
