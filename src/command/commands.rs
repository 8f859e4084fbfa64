use std::path::PathBuf;

use crate::arg::arg_extractor::extract_at;
use crate::arg::args::{Arg, ConfigKeyArg, PlatformArg, TextArg};
use crate::command::manual::ManualCatalog;
use crate::command::policies::flag_policy::{FlagDecision, FlagPolicy, HelpAtIdx};
use crate::core::context::AppContext;
use crate::core::repository::Sort;
use crate::core::types::ManifestAction;
use crate::errors::Error::Parse;
use crate::errors::{Error, Result, require_parse};
use crate::logging::LogTarget;
use crate::manifest::ManifestLoader;
use crate::report::{build_report_file, save_report};
use crate::ui::display_manager::DisplayManager;
use crate::validate::findings::Report;
use crate::validate::{Validator, build_envs};

pub struct CommandCore<'a> {
    pub args: &'a [Arg],
    pub flag_policy: FlagPolicy,
}
impl<'a> CommandCore<'a> {
    pub fn new(args: &'a [Arg], flag_policy: FlagPolicy) -> Self {
        Self { args, flag_policy }
    }
}

mod sealed {
    use super::CommandCore;

    pub trait Sealed<'a> {
        fn core(&self) -> &CommandCore<'a>;
    }
}

pub trait Command<'a>: sealed::Sealed<'a> {
    fn usage(&self) -> String;
    fn perform(&self, ctx: &mut AppContext) -> Result<()>;

    fn execute(&self, ctx: &mut AppContext) -> Result<()> {
        let core = self.core();
        match core.flag_policy.evaluate(core.args) {
            FlagDecision::ShortCircuitUsage => {
                ctx.logger.info(self.usage(), LogTarget::ConsoleOnly);
                Ok(())
            }
            FlagDecision::Continue => self.perform(ctx),
            FlagDecision::Error(e) => Err(e),
        }
    }
}

pub type CommandDyn<'a> = Box<dyn Command<'a> + 'a>;

/// Shared manifest-loading step for check/show/export: parse the file,
/// stage requirements, and keep syntax findings for the report.
fn load_manifest(ctx: &mut AppContext, path: &PathBuf) -> Result<Report> {
    let outcome = ManifestLoader::new().load_into(&mut ctx.requirements, path)?;
    ctx.logger.info(
        format!(
            "Parsed {} requirement(s) from {}",
            outcome.loaded,
            path.display()
        ),
        LogTarget::FileOnly,
    );
    Ok(Report::new(outcome.findings))
}

pub struct ManifestCommand<'a> {
    core: CommandCore<'a>,
    action: ManifestAction,
}

impl<'a> ManifestCommand<'a> {
    pub fn new(action: ManifestAction, args: &'a [Arg]) -> Self {
        let policy = FlagPolicy::new(vec![Box::new(HelpAtIdx(0))]);
        Self {
            core: CommandCore::new(args, policy),
            action,
        }
    }

    fn manifest_path(&self) -> Result<PathBuf> {
        let text = require_parse(
            extract_at::<TextArg>(self.core.args, 0),
            format!("Expected a manifest path.\n{}", self.usage()),
        )?;
        Ok(PathBuf::from(text))
    }

    fn handle_check(&self, ctx: &mut AppContext) -> Result<()> {
        let path = self.manifest_path()?;
        let mut report = load_manifest(ctx, &path)?;
        report.extend(Validator::new(ctx).run().findings);

        let dm = DisplayManager::new();
        dm.display_findings(&format!("Findings: {}", path.display()), &report);
        ctx.logger.info(report.summary(), LogTarget::ConsoleAndFile);

        if report.has_errors() {
            return Err(Error::ChecksFailed {
                errors: report.errors(),
                warnings: report.warnings(),
            });
        }
        Ok(())
    }

    fn handle_show(&self, ctx: &mut AppContext) -> Result<()> {
        let path = self.manifest_path()?;
        let platform = extract_at::<PlatformArg>(self.core.args, 1).cloned();
        load_manifest(ctx, &path)?;

        let envs = build_envs(&ctx.config);
        let dm = DisplayManager::new();
        match platform {
            Some(platform) => {
                let env = envs
                    .iter()
                    .find(|(p, _)| *p == platform)
                    .map(|(_, env)| env.clone())
                    .unwrap_or_else(|| {
                        crate::core::marker::MarkerEnv::for_platform(
                            &platform,
                            ctx.config.python_version(),
                        )
                    });
                let selected = ctx
                    .requirements
                    .query()
                    .r#where(|req| req.applies_on(&env))
                    .order(Sort::IdAsc)
                    .collect();
                dm.display_requirements(
                    &format!("Requirements on {platform}: {}", path.display()),
                    &selected,
                    &envs,
                );
            }
            None => {
                dm.display_all_requirements(
                    &format!("Requirements: {}", path.display()),
                    &ctx.requirements,
                    &envs,
                );
            }
        }
        Ok(())
    }

    fn handle_export(&self, ctx: &mut AppContext) -> Result<()> {
        let path = self.manifest_path()?;
        let out = require_parse(
            extract_at::<TextArg>(self.core.args, 1),
            format!("Expected an output path.\n{}", self.usage()),
        )
        .map(PathBuf::from)?;

        let mut report = load_manifest(ctx, &path)?;
        report.extend(Validator::new(ctx).run().findings);

        let envs = build_envs(&ctx.config);
        let file = build_report_file(&path, &ctx.requirements, &envs, &report);
        let saved = save_report(&file, &out)?;
        ctx.logger.info(
            format!("Exported report to {}", saved.display()),
            LogTarget::ConsoleAndFile,
        );
        Ok(())
    }
}

impl<'a> sealed::Sealed<'a> for ManifestCommand<'a> {
    fn core(&self) -> &CommandCore<'a> {
        &self.core
    }
}

impl<'a> Command<'a> for ManifestCommand<'a> {
    fn usage(&self) -> String {
        match self.action {
            ManifestAction::Check => {
                "Usage: check <manifest>   # Validate a requirements manifest".into()
            }
            ManifestAction::Show => {
                "Usage: show <manifest> [platform]   # List parsed requirements".into()
            }
            ManifestAction::Export => {
                "Usage: export <manifest> <out.json>   # Write a JSON report".into()
            }
        }
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        match self.action {
            ManifestAction::Check => self.handle_check(ctx),
            ManifestAction::Show => self.handle_show(ctx),
            ManifestAction::Export => self.handle_export(ctx),
        }
    }
}

pub struct ConfigCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> ConfigCommand<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        let policy = FlagPolicy::new(vec![Box::new(HelpAtIdx(0))]);
        Self {
            core: CommandCore::new(args, policy),
        }
    }
}

impl<'a> sealed::Sealed<'a> for ConfigCommand<'a> {
    fn core(&self) -> &CommandCore<'a> {
        &self.core
    }
}

impl<'a> Command<'a> for ConfigCommand<'a> {
    fn usage(&self) -> String {
        "Usage: config [KEY value]   # View configuration, or set one value".into()
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        if self.core.args.is_empty() {
            DisplayManager::new().display_config(&ctx.config);
            return Ok(());
        }

        let key = require_parse(
            extract_at::<ConfigKeyArg>(self.core.args, 0),
            format!(
                "Expected a configuration key as first argument.\n{}",
                self.usage()
            ),
        )?;
        let value = match self.core.args.get(1) {
            Some(arg) => arg.to_string(),
            None => {
                return Err(Parse(format!(
                    "Expected a value for {}.\n{}",
                    key,
                    self.usage()
                )));
            }
        };

        ctx.config.set_key(key, &value)?;
        if let Some((changed_key, old, new)) = ctx.config.take_last_change() {
            ctx.logger.info(
                format!("Updated {changed_key}: {old} -> {new}"),
                LogTarget::ConsoleAndFile,
            );
        }
        if key == crate::config::ConfigKey::FileLoggingEnabled {
            ctx.logger
                .set_file_logging_enabled(ctx.config.file_logging_enabled());
        }
        Ok(())
    }
}

pub struct LogCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> LogCommand<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        let policy = FlagPolicy::new(vec![Box::new(HelpAtIdx(0))]);
        Self {
            core: CommandCore::new(args, policy),
        }
    }
}

impl<'a> sealed::Sealed<'a> for LogCommand<'a> {
    fn core(&self) -> &CommandCore<'a> {
        &self.core
    }
}

impl<'a> Command<'a> for LogCommand<'a> {
    fn usage(&self) -> String {
        "Usage: log   # Print current session log to console".into()
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        match ctx.logger.log_path() {
            None => {
                println!("No logs");
            }
            Some(path) => match std::fs::read_to_string(&path) {
                Ok(contents) => print!("{contents}"),
                Err(err) => {
                    eprintln!("Unable to read log file: {err}");
                }
            },
        }
        Ok(())
    }
}

pub struct ManCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> ManCommand<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        let policy = FlagPolicy::new(vec![Box::new(HelpAtIdx(0))]);
        Self {
            core: CommandCore::new(args, policy),
        }
    }

    fn topic_arg(&self) -> Result<Option<String>> {
        match self.core.args.len() {
            0 => Ok(None),
            1 => match &self.core.args[0] {
                Arg::Text(name) => Ok(Some(name.clone())),
                Arg::Platform(name) => Ok(Some(name.clone())),
                other => Err(Parse(format!(
                    "Unsupported manual topic: {}. Usage: man [topic]",
                    other
                ))),
            },
            _ => Err(Parse(
                "Expected at most one topic. Usage: man [topic]".into(),
            )),
        }
    }
}

impl<'a> sealed::Sealed<'a> for ManCommand<'a> {
    fn core(&self) -> &CommandCore<'a> {
        &self.core
    }
}

impl<'a> Command<'a> for ManCommand<'a> {
    fn usage(&self) -> String {
        "Usage: man [topic]   # Show manual pages".into()
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        let topic = self.topic_arg()?;
        let page = ManualCatalog::new().page_for(topic.as_deref())?;
        ctx.logger.info(page.render(), LogTarget::ConsoleOnly);
        Ok(())
    }
}

pub struct TypeHelpCommand<'a> {
    core: CommandCore<'a>,
    command_type: crate::core::types::TypeHelpCommand,
}

impl<'a> TypeHelpCommand<'a> {
    pub fn new(args: &'a [Arg], command_type: crate::core::types::TypeHelpCommand) -> Self {
        let policy = FlagPolicy::new(vec![Box::new(HelpAtIdx(0))]);
        Self {
            core: CommandCore::new(args, policy),
            command_type,
        }
    }
}

impl<'a> sealed::Sealed<'a> for TypeHelpCommand<'a> {
    fn core(&self) -> &CommandCore<'a> {
        &self.core
    }
}

impl<'a> Command<'a> for TypeHelpCommand<'a> {
    fn usage(&self) -> String {
        self.command_type.usage()
    }
    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        ctx.logger
            .info(self.command_type.usage(), LogTarget::ConsoleOnly);
        Ok(())
    }
}
