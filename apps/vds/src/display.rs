//! Output rendering and formatting

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::Term;
use std::io;
use vds_types::{OutputFormat, ReportEntry};

/// Output renderer for synthesized report entries
pub struct OutputRenderer {
    format: OutputFormat,
    term: Term,
}

impl OutputRenderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            term: Term::stdout(),
        }
    }

    /// Render the results of one synthesis call
    pub fn render(&self, entries: &[ReportEntry]) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => Self::render_json(entries),
            OutputFormat::Plain => self.render_table(entries),
        }
    }

    fn render_json(entries: &[ReportEntry]) -> io::Result<()> {
        let json = serde_json::to_string_pretty(entries).map_err(io::Error::other)?;
        println!("{json}");
        Ok(())
    }

    fn render_table(&self, entries: &[ReportEntry]) -> io::Result<()> {
        if entries.is_empty() {
            println!("No vulnerabilities found!");
            return Ok(());
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("ID").add_attribute(Attribute::Bold),
                Cell::new("Severity").add_attribute(Attribute::Bold),
                Cell::new("Score").add_attribute(Attribute::Bold),
                Cell::new("Category").add_attribute(Attribute::Bold),
                Cell::new("Condition").add_attribute(Attribute::Bold),
            ]);

        let colors = self.term.features().colors_supported();
        for entry in entries {
            let mut severity = Cell::new(&entry.severity);
            if colors {
                severity = severity.fg(severity_color(&entry.severity));
            }
            table.add_row(vec![
                Cell::new(&entry.id),
                severity,
                Cell::new(format!("{:.1} (v{})", entry.score.base, entry.score.version)),
                Cell::new(&entry.category),
                Cell::new(entry.condition.as_deref().unwrap_or("-")),
            ]);
        }

        println!("{table}");
        println!();
        println!("Vulnerabilities: {}", entries.len());
        Ok(())
    }
}

fn severity_color(severity: &str) -> Color {
    match severity {
        "Critical" => Color::Magenta,
        "High" => Color::Red,
        "Medium" => Color::Yellow,
        "Low" => Color::Green,
        _ => Color::Reset,
    }
}
