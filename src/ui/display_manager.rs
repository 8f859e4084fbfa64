use crate::config::Config;
use crate::core::marker::MarkerEnv;
use crate::core::models::Requirement;
use crate::core::repository::Repository;
use crate::ui::display_data::DisplayDataBuilder;
use crate::ui::table_printer::TablePrinter;
use crate::ui::width_util::WidthUtil;
use crate::validate::findings::Report;
use std::io;
use std::io::Write;

const FINDING_HEADERS: [&str; 5] = ["LINE", "SEVERITY", "RULE", "PACKAGE", "MESSAGE"];
const REQUIREMENT_HEADERS: [&str; 6] =
    ["LINE", "PACKAGE", "EXTRAS", "CONSTRAINT", "MARKER", "PLATFORMS"];

#[derive(Debug, Default, Clone)]
pub struct DisplayManager {
    pub printer: TablePrinter,
    pub util: WidthUtil,
    pub data: DisplayDataBuilder,
}

impl DisplayManager {
    pub fn new() -> Self {
        Self {
            printer: TablePrinter::new(),
            util: WidthUtil::default(),
            data: DisplayDataBuilder::new(),
        }
    }

    pub fn display_config(&self, config: &Config) {
        let headers = ["KEY", "DESCRIPTION", "VALUE"];
        let rows: Vec<Vec<String>> = config
            .rows()
            .iter()
            .map(|(k, d, v)| vec![k.clone(), d.clone(), v.clone()])
            .collect();

        self.printer.print_table(
            "Config",
            &headers,
            &rows,
            Some("No config items found."),
            None,
        );
    }

    /// Width left for the message column after the fixed columns.
    fn message_width(&self) -> usize {
        self.util.terminal_width().saturating_sub(40).max(30)
    }

    pub fn render_findings<W: Write>(
        &self,
        title: &str,
        report: &Report,
        out: &mut W,
    ) -> io::Result<()> {
        let rows = self.data.finding_rows(report, self.message_width());
        self.printer.render_table(
            title,
            &FINDING_HEADERS,
            &rows,
            Some("No findings."),
            None,
            out,
        )
    }

    pub fn display_findings(&self, title: &str, report: &Report) {
        let mut stdout = io::stdout();
        let _ = self.render_findings(title, report, &mut stdout);
    }

    pub fn render_requirements<W: Write>(
        &self,
        title: &str,
        requirements: &[&Requirement],
        envs: &[(String, MarkerEnv)],
        out: &mut W,
    ) -> io::Result<()> {
        let rows = self.data.rows_for(requirements, envs);
        self.printer.render_table(
            title,
            &REQUIREMENT_HEADERS,
            &rows,
            Some("No requirements parsed."),
            None,
            out,
        )
    }

    pub fn display_requirements(
        &self,
        title: &str,
        requirements: &[&Requirement],
        envs: &[(String, MarkerEnv)],
    ) {
        let mut stdout = io::stdout();
        let _ = self.render_requirements(title, requirements, envs, &mut stdout);
    }

    pub fn display_all_requirements(
        &self,
        title: &str,
        requirements: &Repository<Requirement>,
        envs: &[(String, MarkerEnv)],
    ) {
        let rows = self.data.requirement_rows(requirements, envs);
        self.printer.print_table(
            title,
            &REQUIREMENT_HEADERS,
            &rows,
            Some("No requirements parsed."),
            None,
        );
    }
}
