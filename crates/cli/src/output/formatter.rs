//! Output formatter for human-readable and JSON output
//!
//! Ensures consistent output formatting across all commands. Records go to
//! stdout; errors and warnings go to stderr.

use comfy_table::{ContentArrangement, Table, presets};
use console::{Style, Term};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::OutputConfig;

/// Indent of wrapped message bodies under the `@screen_name` line
const MESSAGE_INDENT: usize = 3;

/// Wrap width when stdout is not a terminal
const DEFAULT_WIDTH: usize = 80;

/// Color theme for styled output
#[derive(Debug, Clone)]
pub struct Theme {
    /// Screen names heading a message - yellow + bold
    pub screen_name: Style,
    /// Usernames and list names - bold
    pub name: Style,
    /// Consumer keys - cyan
    pub key: Style,
    /// Active profile marker - green
    pub active: Style,
    /// Success messages - green
    pub success: Style,
    /// Error messages - red
    pub error: Style,
    /// Warning messages - yellow
    pub warning: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            screen_name: Style::new().yellow().bold(),
            name: Style::new().bold(),
            key: Style::new().cyan(),
            active: Style::new().green(),
            success: Style::new().green(),
            error: Style::new().red(),
            warning: Style::new().yellow(),
        }
    }
}

impl Theme {
    /// Returns a theme with no styling (for no-color mode)
    pub fn plain() -> Self {
        Self {
            screen_name: Style::new(),
            name: Style::new(),
            key: Style::new(),
            active: Style::new(),
            success: Style::new(),
            error: Style::new(),
            warning: Style::new(),
        }
    }
}

/// Formatter for CLI output
///
/// When JSON mode is enabled, all output is strict JSON without colors.
#[derive(Debug, Clone)]
pub struct Formatter {
    config: OutputConfig,
    theme: Theme,
}

impl Formatter {
    pub fn new(config: OutputConfig) -> Self {
        let theme = if config.no_color || config.json {
            Theme::plain()
        } else {
            Theme::default()
        };
        Self { config, theme }
    }

    pub fn is_json(&self) -> bool {
        self.config.json
    }

    // ========== Style helper methods ==========

    pub fn style_name(&self, text: &str) -> String {
        self.theme.name.apply_to(text).to_string()
    }

    pub fn style_key(&self, text: &str) -> String {
        self.theme.key.apply_to(text).to_string()
    }

    pub fn style_active(&self, text: &str) -> String {
        self.theme.active.apply_to(text).to_string()
    }

    // ========== Output methods ==========

    /// Output a success message
    pub fn success(&self, message: &str) {
        if self.config.quiet || self.config.json {
            return;
        }

        let checkmark = self.theme.success.apply_to("✓");
        println!("{checkmark} {message}");
    }

    /// Output an error message
    ///
    /// Errors are always printed, even in quiet mode.
    pub fn error(&self, message: &str) {
        if self.config.json {
            let error = serde_json::json!({
                "error": message
            });
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&error).unwrap_or_else(|_| message.to_string())
            );
        } else {
            let cross = self.theme.error.apply_to("✗");
            eprintln!("{cross} {message}");
        }
    }

    /// Output a warning message
    pub fn warning(&self, message: &str) {
        if self.config.quiet || self.config.json {
            return;
        }

        let warn_icon = self.theme.warning.apply_to("⚠");
        eprintln!("{warn_icon} {message}");
    }

    /// Output JSON directly
    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error serializing output: {e}"),
        }
    }

    /// Print a line of text (respects quiet mode)
    pub fn println(&self, message: &str) {
        if self.config.quiet {
            return;
        }
        println!("{message}");
    }

    /// Print a message body under its author, wrapped to the terminal width
    pub fn message(&self, screen_name: &str, text: &str) {
        if self.config.quiet {
            return;
        }

        let heading = format!("{:indent$}@{screen_name}", "", indent = MESSAGE_INDENT);
        println!("{}", self.theme.screen_name.apply_to(heading));
        for line in wrap_text(text, terminal_width().saturating_sub(MESSAGE_INDENT)) {
            println!("{:indent$}{line}", "", indent = MESSAGE_INDENT);
        }
        println!();
    }

    /// Print rows under headings; nothing is printed for an empty set
    pub fn table(&self, headings: &[&str], rows: Vec<Vec<String>>) {
        if self.config.quiet || rows.is_empty() {
            return;
        }

        let mut table = Table::new();
        table
            .load_preset(presets::NOTHING)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(headings.to_vec());
        for row in rows {
            table.add_row(row);
        }
        println!("{table}");
    }

    /// Print labelled values in two aligned columns
    pub fn fields(&self, rows: Vec<(&str, String)>) {
        if self.config.quiet || rows.is_empty() {
            return;
        }

        let mut table = Table::new();
        table
            .load_preset(presets::NOTHING)
            .set_content_arrangement(ContentArrangement::Dynamic);
        for (label, value) in rows {
            table.add_row(vec![label.to_string(), value]);
        }
        println!("{table}");
    }

    /// Print rows as CSV with a heading line; nothing for an empty set
    pub fn csv(&self, headings: &[&str], rows: Vec<Vec<String>>) {
        if self.config.quiet || rows.is_empty() {
            return;
        }

        let headings: Vec<String> = headings.iter().map(|h| h.to_string()).collect();
        println!("{}", csv_line(&headings));
        for row in rows {
            println!("{}", csv_line(&row));
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(OutputConfig::default())
    }
}

fn terminal_width() -> usize {
    let term = Term::stdout();
    if term.is_term() {
        usize::from(term.size().1)
    } else {
        DEFAULT_WIDTH
    }
}

/// Greedy word wrap; words longer than `width` get a line of their own
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_width = 0;
        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            if line_width > 0 && line_width + 1 + word_width > width {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }

            // Runs of wide characters may break anywhere; other words never split
            if word_width > width && word.chars().any(|c| c.width().unwrap_or(0) > 1) {
                let mut chunks = split_at_width(word, width);
                line = chunks.pop().unwrap_or_default();
                line_width = line.width();
                lines.extend(chunks);
                continue;
            }

            if line_width > 0 {
                line.push(' ');
                line_width += 1;
            }
            line.push_str(word);
            line_width += word_width;
        }
        lines.push(line);
    }

    lines
}

fn split_at_width(word: &str, width: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    let mut chunk_width = 0;
    for c in word.chars() {
        let char_width = c.width().unwrap_or(0);
        if chunk_width + char_width > width && !chunk.is_empty() {
            chunks.push(std::mem::take(&mut chunk));
            chunk_width = 0;
        }
        chunk.push(c);
        chunk_width += char_width;
    }
    chunks.push(chunk);
    chunks
}

/// One RFC 4180 record; fields holding a comma, quote or line break are quoted
pub fn csv_line(fields: &[String]) -> String {
    fields
        .iter()
        .map(|field| {
            if field.contains([',', '"', '\n', '\r']) {
                format!("\"{}\"", field.replace('"', "\"\""))
            } else {
                field.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}
