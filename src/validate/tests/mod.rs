mod conflicts_tests;
mod platforms_tests;

use crate::core::marker::MarkerEnv;
use crate::core::models::Requirement;
use crate::core::types::DuplicatePolicy;
use crate::core::version::Version;
use crate::manifest::line_parser::RequirementParser;
use crate::validate::RuleContext;

pub(super) fn req(line_text: &str, number: usize) -> Requirement {
    RequirementParser::new()
        .parse(line_text, number)
        .expect("fixture requirement should parse")
}

pub(super) fn default_envs() -> Vec<(String, MarkerEnv)> {
    let python = Version::try_from_str("3.11").expect("python version parses");
    ["linux", "darwin", "win32"]
        .iter()
        .map(|p| (p.to_string(), MarkerEnv::for_platform(p, &python)))
        .collect()
}

pub(super) fn context<'a>(
    envs: &'a [(String, MarkerEnv)],
    groups: &'a [Vec<String>],
) -> RuleContext<'a> {
    RuleContext {
        envs,
        alternate_groups: groups,
        duplicate_policy: DuplicatePolicy::Warn,
    }
}
