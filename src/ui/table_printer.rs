use crate::ui::width_util::WidthUtil;
use std::io::Write;

#[derive(Debug, Clone, Default)]
pub struct TablePrinter {
    util: WidthUtil,
}

impl TablePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    fn write_separator<W: Write + ?Sized>(&self, out: &mut W, width: usize) -> std::io::Result<()> {
        let line = if width == 0 {
            "-".to_string()
        } else {
            "-".repeat(width)
        };
        writeln!(out, "{line}")
    }

    fn write_banner<W: Write + ?Sized>(
        &self,
        out: &mut W,
        table_name: &str,
        width: usize,
    ) -> std::io::Result<()> {
        self.write_separator(out, width)?;
        writeln!(out, "{}", table_name.to_uppercase())?;
        self.write_separator(out, width)
    }

    pub fn render_banner<W: Write + ?Sized>(
        &self,
        title: &str,
        width: usize,
        out: &mut W,
    ) -> std::io::Result<()> {
        let w = width.max(self.util.visible_width(title));
        self.write_banner(out, title, w)
    }

    pub fn compute_table_width<T: AsRef<str>>(&self, headers: &[&str], rows: &[Vec<T>]) -> usize {
        self.natural_width(&self.column_widths(headers, rows))
    }

    /// Render into any writer (tests capture output this way);
    /// `min_width` stretches the separators to align stacked tables.
    pub fn render_table<T: AsRef<str>, W: Write + ?Sized>(
        &self,
        table_name: &str,
        headers: &[&str],
        rows: &[Vec<T>],
        empty_message: Option<&str>,
        min_width: Option<usize>,
        out: &mut W,
    ) -> std::io::Result<()> {
        let col_widths = self.column_widths(headers, rows);
        let total_width = self.natural_width(&col_widths).max(min_width.unwrap_or(0));

        if rows.is_empty() {
            if let Some(msg) = empty_message {
                let width = total_width
                    .max(self.util.visible_width(table_name))
                    .max(self.util.visible_width(msg));
                self.write_banner(out, table_name, width)?;
                writeln!(out, "{msg}")?;
                self.write_separator(out, width)?;
                return Ok(());
            }
        }

        self.write_banner(out, table_name, total_width)?;

        if !headers.is_empty() {
            writeln!(out, "{}", self.join_cells(headers, &col_widths))?;
            self.write_separator(out, total_width)?;
        }

        for row in rows {
            let cells: Vec<&str> = row.iter().map(|c| c.as_ref()).collect();
            writeln!(out, "{}", self.join_cells(&cells, &col_widths))?;
        }
        self.write_separator(out, total_width)
    }

    /// Convenience wrapper printing to stdout.
    pub fn print_table<T: AsRef<str>>(
        &self,
        table_name: &str,
        headers: &[&str],
        rows: &[Vec<T>],
        empty_message: Option<&str>,
        min_width: Option<usize>,
    ) {
        let mut stdout = std::io::stdout();
        let _ = self.render_table(table_name, headers, rows, empty_message, min_width, &mut stdout);
    }

    fn column_widths<T: AsRef<str>>(&self, headers: &[&str], rows: &[Vec<T>]) -> Vec<usize> {
        let col_count = headers.len();
        let mut widths = vec![0usize; col_count];
        for (i, h) in headers.iter().enumerate() {
            widths[i] = widths[i].max(self.util.visible_width(h));
        }
        for row in rows {
            for (i, cell) in row.iter().enumerate().take(col_count) {
                widths[i] = widths[i].max(self.util.visible_width(cell.as_ref()));
            }
        }
        widths
    }

    fn natural_width(&self, col_widths: &[usize]) -> usize {
        if col_widths.is_empty() {
            0
        } else {
            col_widths.iter().copied().sum::<usize>() + (col_widths.len() - 1) * 3
        }
    }

    fn join_cells<T: AsRef<str>>(&self, cells: &[T], col_widths: &[usize]) -> String {
        if col_widths.is_empty() {
            return cells
                .iter()
                .map(|c| c.as_ref())
                .collect::<Vec<_>>()
                .join(" | ");
        }
        cells
            .iter()
            .enumerate()
            .take(col_widths.len())
            .map(|(i, cell)| self.util.pad_visible(cell.as_ref(), col_widths[i]))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
