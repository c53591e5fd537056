//! Output formatting
//!
//! Commands print through a [`Formatter`], which owns the color theme and
//! the JSON/quiet switches, and render records with the helpers in
//! [`records`].

mod formatter;
pub mod records;

pub use formatter::Formatter;

/// Global output switches
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Print JSON instead of text
    pub json: bool,
    /// Disable ANSI colors
    pub no_color: bool,
    /// Suppress informational output
    pub quiet: bool,
}

/// Text layout selected per command with `--long` and `--csv`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Layout {
    #[default]
    Plain,
    Long,
    Csv,
}

impl Layout {
    /// CSV wins when both flags are given
    pub fn from_flags(long: bool, csv: bool) -> Self {
        if csv {
            Layout::Csv
        } else if long {
            Layout::Long
        } else {
            Layout::Plain
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_from_flags() {
        assert_eq!(Layout::from_flags(false, false), Layout::Plain);
        assert_eq!(Layout::from_flags(true, false), Layout::Long);
        assert_eq!(Layout::from_flags(true, true), Layout::Csv);
    }
}
