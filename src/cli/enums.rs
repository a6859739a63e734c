//! CLI enum types for output format selection.

use clap::ValueEnum;

/// Output rendering of a packed conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// C byte-array snippet for embedding in firmware.
    #[default]
    C,
    /// Comma-terminated `0xHH` tokens, one per byte.
    Hex,
    /// Binary digit strings, one line per grid row.
    Binary,
    /// ASCII art (`#` / `.`), one line per grid row.
    Ascii,
    /// Every format, one after another.
    All,
}

impl OutputFormat {
    /// Parse a config-file format name. Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "c" => Some(OutputFormat::C),
            "hex" => Some(OutputFormat::Hex),
            "binary" => Some(OutputFormat::Binary),
            "ascii" => Some(OutputFormat::Ascii),
            "all" => Some(OutputFormat::All),
            _ => None,
        }
    }

    /// Human-readable name, matching the config-file spelling.
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::C => "c",
            OutputFormat::Hex => "hex",
            OutputFormat::Binary => "binary",
            OutputFormat::Ascii => "ascii",
            OutputFormat::All => "all",
        }
    }
}
