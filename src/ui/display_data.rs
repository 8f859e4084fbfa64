use crate::core::marker::MarkerEnv;
use crate::core::models::Requirement;
use crate::core::repository::{Repository, Sort};
use crate::ui::width_util::WidthUtil;
use crate::validate::findings::Report;

#[derive(Debug, Default, Clone)]
pub struct DisplayDataBuilder {
    util: WidthUtil,
}

impl DisplayDataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// One row per finding, painted by severity. `message_width` caps the
    /// last column so tables survive narrow terminals.
    pub fn finding_rows(&self, report: &Report, message_width: usize) -> Vec<Vec<String>> {
        report
            .findings
            .iter()
            .map(|finding| {
                let sev = finding.severity;
                let line = finding
                    .line
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "-".to_string());
                let package = finding.package.clone().unwrap_or_else(|| "-".to_string());
                let message = self.util.truncate_visible(&finding.message, message_width);
                vec![
                    sev.paint(line),
                    sev.paint(sev.to_string()),
                    sev.paint(finding.rule.to_string()),
                    sev.paint(package),
                    sev.paint(message),
                ]
            })
            .collect()
    }

    pub fn requirement_rows(
        &self,
        requirements: &Repository<Requirement>,
        envs: &[(String, MarkerEnv)],
    ) -> Vec<Vec<String>> {
        self.rows_for(&requirements.values(Sort::IdAsc), envs)
    }

    pub fn rows_for(
        &self,
        requirements: &[&Requirement],
        envs: &[(String, MarkerEnv)],
    ) -> Vec<Vec<String>> {
        requirements
            .iter()
            .map(|req| {
                let extras = if req.extras.is_empty() {
                    "-".to_string()
                } else {
                    req.extras.join(", ")
                };
                let constraint = if req.specifiers.is_empty() {
                    "*".to_string()
                } else {
                    req.specifiers.to_string()
                };
                let marker = req
                    .marker
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "-".to_string());
                let platforms = req.active_platforms(envs);
                let platforms = if platforms.len() == envs.len() {
                    "all".to_string()
                } else if platforms.is_empty() {
                    "none".to_string()
                } else {
                    platforms.join(", ")
                };
                vec![
                    req.line.to_string(),
                    req.name.raw().to_string(),
                    extras,
                    constraint,
                    marker,
                    platforms,
                ]
            })
            .collect()
    }
}
