use std::str::FromStr;

use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display as DisplayDerive, EnumIter as EnumIterDerive, EnumString};

use crate::core::types::TypeHelpCommand;
use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, DisplayDerive, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum ManualTopic {
    General,
    Check,
    Show,
    Export,
    Config,
    Log,
    Man,
    Constraints,
    Markers,
    Platforms,
}

impl ManualTopic {
    pub fn try_from(input: &str) -> Result<Self> {
        Self::from_str(input).map_err(|_| {
            Error::Parse(format!(
                "Unsupported manual topic: '{}'. Valid topics: {}",
                input.trim(),
                valid_csv::<ManualTopic>()
            ))
        })
    }
}

#[derive(Debug, Clone)]
pub struct ManualSection {
    title: String,
    body: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ManualPage {
    name: String,
    summary: String,
    sections: Vec<ManualSection>,
}

impl ManualPage {
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_section(
            "NAME",
            &[format!("{} - {}", self.name, self.summary)],
            &mut out,
        );
        for section in &self.sections {
            self.write_section(&section.title, &section.body, &mut out);
        }
        out.trim_end().to_string()
    }

    fn write_section(&self, title: &str, lines: &[String], out: &mut String) {
        out.push_str(&title.to_uppercase());
        out.push('\n');
        for line in lines {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }
}

pub struct ManualPageBuilder {
    name: String,
    summary: String,
    sections: Vec<ManualSection>,
}

impl ManualPageBuilder {
    pub fn new(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
            sections: Vec::new(),
        }
    }

    pub fn section(mut self, title: &str, body: Vec<String>) -> Self {
        self.sections.push(ManualSection {
            title: title.to_string(),
            body,
        });
        self
    }

    pub fn build(self) -> ManualPage {
        ManualPage {
            name: self.name,
            summary: self.summary,
            sections: self.sections,
        }
    }
}

pub struct ManualCatalog;

impl ManualCatalog {
    pub fn new() -> Self {
        Self
    }

    pub fn page_for(&self, topic: Option<&str>) -> Result<ManualPage> {
        let topic = match topic {
            None => ManualTopic::General,
            Some(name) => ManualTopic::try_from(name)?,
        };
        Ok(self.build_page(topic))
    }

    pub fn topics(&self) -> Vec<String> {
        ManualTopic::iter().map(|t| t.to_string()).collect()
    }

    fn build_page(&self, topic: ManualTopic) -> ManualPage {
        match topic {
            ManualTopic::General => self.general_page(),
            ManualTopic::Check => self.simple_page(
                "check",
                "Validate a requirements manifest.",
                vec!["check <manifest>".to_string()],
                vec![
                    "Parses every line and runs the constraint, duplicate and".to_string(),
                    "platform rules. Exits non-zero when error findings exist.".to_string(),
                ],
            ),
            ManualTopic::Show => self.simple_page(
                "show",
                "List the parsed requirements of a manifest.",
                vec!["show <manifest> [platform]".to_string()],
                vec![
                    "Shows one row per requirement with its constraint, marker".to_string(),
                    "and active platforms. A platform argument filters the list".to_string(),
                    "to requirements selected on that platform.".to_string(),
                ],
            ),
            ManualTopic::Export => self.simple_page(
                "export",
                "Write a machine-readable validation report.",
                vec!["export <manifest> <out.json>".to_string()],
                vec![
                    "Runs the same rules as 'check' and writes a JSON report".to_string(),
                    "with summary counts, requirements and findings.".to_string(),
                ],
            ),
            ManualTopic::Config => self.simple_page(
                "config",
                "View or edit configuration values.",
                vec!["config".to_string(), "config <KEY> <value>".to_string()],
                vec![
                    "Without arguments, prints the configuration table.".to_string(),
                    "With a key and value, updates and persists the config file.".to_string(),
                ],
            ),
            ManualTopic::Log => self.simple_page(
                "log",
                "Print the current session log to the console.",
                vec!["log".to_string()],
                vec![
                    "Shows the session log file contents if it exists.".to_string(),
                    "Does not create a log file when one is missing.".to_string(),
                ],
            ),
            ManualTopic::Man => self.simple_page(
                "man",
                "Show manual pages for commands and topics.",
                vec!["man [topic]".to_string()],
                vec![
                    format!("Topics: {}", self.topics().join(", ")),
                    "Use 'man' with no topic for the general manual.".to_string(),
                ],
            ),
            ManualTopic::Constraints => self.type_help_page(TypeHelpCommand::Constraints),
            ManualTopic::Markers => self.type_help_page(TypeHelpCommand::Markers),
            ManualTopic::Platforms => self.type_help_page(TypeHelpCommand::Platforms),
        }
    }

    fn general_page(&self) -> ManualPage {
        ManualPageBuilder::new("reqlint", "Requirements-manifest linter.")
            .section(
                "SYNOPSIS",
                vec!["reqlint [--config <path>] [--logs <dir>] <command> [args]".to_string()],
            )
            .section("COMMANDS", general_command_lines())
            .section(
                "TOPICS",
                vec![
                    "Use 'man <topic>' for command-specific details.".to_string(),
                    format!("Available topics: {}", self.topics().join(", ")),
                ],
            )
            .build()
    }

    fn simple_page(
        &self,
        name: &str,
        summary: &str,
        synopsis: Vec<String>,
        description: Vec<String>,
    ) -> ManualPage {
        ManualPageBuilder::new(name, summary)
            .section("SYNOPSIS", synopsis)
            .section("DESCRIPTION", description)
            .build()
    }

    fn type_help_page(&self, kind: TypeHelpCommand) -> ManualPage {
        ManualPageBuilder::new(kind.to_string(), "Format helper command.")
            .section("SYNOPSIS", vec![kind.to_string()])
            .section("DESCRIPTION", vec![kind.usage()])
            .build()
    }
}

fn general_command_lines() -> Vec<String> {
    vec![
        "check <manifest>              # Validate a manifest".to_string(),
        "show <manifest> [platform]    # List parsed requirements".to_string(),
        "export <manifest> <out.json>  # Write a JSON report".to_string(),
        "config [KEY value]            # View or edit config".to_string(),
        "log                           # Print the session log".to_string(),
        "man [topic]                   # Show manual pages".to_string(),
        "constraints | markers | platforms  # Format helper commands".to_string(),
    ]
}
