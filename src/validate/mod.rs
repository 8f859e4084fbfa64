pub mod conflicts;
pub mod duplicates;
pub mod findings;
pub mod platforms;
#[cfg(test)]
mod tests;

use crate::config::Config;
use crate::core::context::AppContext;
use crate::core::marker::MarkerEnv;
use crate::core::models::Requirement;
use crate::core::repository::Sort;
use crate::core::types::RuleKind;
use crate::logging::{LogTarget, Logger};
use crate::validate::conflicts::{Satisfiability, analyze};
use crate::validate::duplicates::DuplicateRule;
use crate::validate::findings::{Finding, Report};
use crate::validate::platforms::PlatformRule;

/// Everything a rule may consult besides the requirements themselves.
pub struct RuleContext<'a> {
    pub envs: &'a [(String, MarkerEnv)],
    pub alternate_groups: &'a [Vec<String>],
    pub duplicate_policy: crate::core::types::DuplicatePolicy,
}

impl<'a> RuleContext<'a> {
    pub fn platform_names(&self) -> Vec<&str> {
        self.envs.iter().map(|(p, _)| p.as_str()).collect()
    }

    /// The alternate group containing `name`, if any.
    pub fn group_of(&self, name: &str) -> Option<&'a Vec<String>> {
        self.alternate_groups
            .iter()
            .find(|group| group.iter().any(|member| member == name))
    }
}

pub trait ValidationRule {
    fn kind(&self) -> RuleKind;
    fn evaluate(&self, requirements: &[&Requirement], cx: &RuleContext) -> Vec<Finding>;
}

/// Flags requirements whose own specifier list is unsatisfiable.
pub struct ConstraintRule;

impl ValidationRule for ConstraintRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Constraints
    }

    fn evaluate(&self, requirements: &[&Requirement], _cx: &RuleContext) -> Vec<Finding> {
        requirements
            .iter()
            .filter_map(|req| {
                match analyze(req.specifiers.specifiers.iter()) {
                    Satisfiability::Satisfiable => None,
                    Satisfiability::Conflict(detail) => Some(Finding::error(
                        RuleKind::Constraints,
                        Some(req.line),
                        Some(req.name.normalized().to_string()),
                        format!("unsatisfiable constraints: {}", detail),
                    )),
                }
            })
            .collect()
    }
}

pub fn make_rule_set() -> Vec<Box<dyn ValidationRule>> {
    vec![
        Box::new(ConstraintRule),
        Box::new(DuplicateRule),
        Box::new(PlatformRule),
    ]
}

/// Build one marker environment per declared target platform.
pub fn build_envs(config: &Config) -> Vec<(String, MarkerEnv)> {
    let python = config.python_version();
    config
        .target_platforms()
        .iter()
        .map(|platform| (platform.clone(), MarkerEnv::for_platform(platform, python)))
        .collect()
}

/// Runs the rule set over the loaded requirements and folds the results
/// into a `Report`, logging each rule's contribution to the session file.
pub struct Validator<'a> {
    ctx: &'a AppContext,
    envs: Vec<(String, MarkerEnv)>,
    rules: Vec<Box<dyn ValidationRule>>,
    logger: Logger,
}

impl<'a> Validator<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        let envs = build_envs(&ctx.config);
        Self {
            ctx,
            envs,
            rules: make_rule_set(),
            logger: ctx.logger.clone(),
        }
    }

    pub fn run(&self) -> Report {
        self.logger
            .info("Starting validation...", LogTarget::FileOnly);

        let requirements = self.ctx.requirements.values(Sort::IdAsc);
        let cx = RuleContext {
            envs: &self.envs,
            alternate_groups: self.ctx.config.alternate_providers(),
            duplicate_policy: self.ctx.config.duplicate_policy(),
        };

        let mut findings = Vec::new();
        for rule in &self.rules {
            let produced = rule.evaluate(&requirements, &cx);
            if !produced.is_empty() {
                self.logger.info(
                    format!("Rule '{}' produced {} finding(s)", rule.kind(), produced.len()),
                    LogTarget::FileOnly,
                );
            }
            findings.extend(produced);
        }

        self.logger
            .info("Finished validation.", LogTarget::FileOnly);
        Report::new(findings)
    }
}
