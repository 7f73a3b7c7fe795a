use std::io::{self, Write};

use crossterm::style::{style, Stylize as _};
use unicode_width::UnicodeWidthStr as _;

use crate::{
    cmd::OutputFormat,
    detector::{ResourceRef, UnusedResult},
};

const HEADER: [&str; 2] = ["NAME", "NAMESPACE"];
const COLUMN_GAP: usize = 3;

const VERSION_LABEL: &str = "keyval-detector version ";
const CONTEXT_LABEL: &str = "Current k8s context name: ";

/// Writes the scan result to a text stream.
pub struct Presenter<W> {
    writer: W,
    format: OutputFormat,
    color: bool,
}

impl<W: Write> Presenter<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            writer,
            format,
            color: false,
        }
    }

    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Version and target context, printed before the scan in table mode.
    pub fn banner(&mut self, version: &str, context: &str) -> io::Result<()> {
        if self.format != OutputFormat::Table {
            return Ok(());
        }

        if self.color {
            writeln!(self.writer, "{}{}", style(VERSION_LABEL).green(), version)?;
            writeln!(self.writer, "{}{}", style(CONTEXT_LABEL).yellow(), context)?;
        } else {
            writeln!(self.writer, "{}{}", VERSION_LABEL, version)?;
            writeln!(self.writer, "{}{}", CONTEXT_LABEL, context)?;
        }

        writeln!(self.writer)?;

        self.writer.flush()
    }

    pub fn render(&mut self, result: &UnusedResult) -> io::Result<()> {
        match self.format {
            OutputFormat::Table => {
                self.heading("Unused ConfigMaps:")?;
                self.table(&result.configmaps)?;

                writeln!(self.writer)?;

                self.heading("Unused Secrets:")?;
                self.table(&result.secrets)?;
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut self.writer, result)?;
                writeln!(self.writer)?;
            }
        }

        self.writer.flush()
    }

    fn heading(&mut self, text: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.writer, "{}", style(text).red())
        } else {
            writeln!(self.writer, "{}", text)
        }
    }

    fn table(&mut self, rows: &[ResourceRef]) -> io::Result<()> {
        if rows.is_empty() {
            return writeln!(self.writer, "No resources found");
        }

        let name_width = rows
            .iter()
            .map(|row| row.name.width())
            .chain([HEADER[0].width()])
            .max()
            .unwrap_or_default();

        write_row(&mut self.writer, HEADER[0], HEADER[1], name_width)?;

        for row in rows {
            write_row(&mut self.writer, &row.name, &row.namespace, name_width)?;
        }

        Ok(())
    }
}

fn write_row(
    writer: &mut impl Write,
    name: &str,
    namespace: &str,
    width: usize,
) -> io::Result<()> {
    let padding = width.saturating_sub(name.width()) + COLUMN_GAP;

    writeln!(writer, "{}{}{}", name, " ".repeat(padding), namespace)
}
