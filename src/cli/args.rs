//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::OutputFormat;

/// Largest grid dimension accepted from the command line. The packer itself
/// has no upper bound; this keeps accidental `--grid 100000x100000` runs
/// from eating memory.
pub const MAX_GRID_DIM: usize = 200;

/// Parse and validate a grid size: `WxH`, or a single number for a square
/// grid. The preset sizes (8x8, 16x16, 32x32, 20x31, 10x24, 64x64) are
/// ordinary `WxH` values.
pub fn parse_grid_size(s: &str) -> Result<(usize, usize), String> {
    let (w, h) = match s.split_once('x') {
        Some((w, h)) => {
            let w: usize = w
                .parse()
                .map_err(|_| format!("Invalid width '{}' in grid size", w))?;
            let h: usize = h
                .parse()
                .map_err(|_| format!("Invalid height '{}' in grid size", h))?;
            (w, h)
        }
        None => {
            let dim: usize = s
                .parse()
                .map_err(|_| format!("'{}' is not a valid grid size (use WxH or a number)", s))?;
            (dim, dim)
        }
    };
    if w == 0 || h == 0 {
        return Err("Grid width and height must be greater than 0".to_string());
    }
    if w > MAX_GRID_DIM || h > MAX_GRID_DIM {
        return Err(format!(
            "Grid size {}x{} exceeds the maximum supported ({}x{})",
            w, h, MAX_GRID_DIM, MAX_GRID_DIM
        ));
    }
    Ok((w, h))
}

/// Convert images and ASCII drawings to packed bytes for monochrome displays
#[derive(Parser, Debug)]
#[command(name = "glyphpack")]
#[command(version, about = "Convert images and ASCII drawings to packed bytes for monochrome displays", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert an image to a packed byte array
    #[command(after_help = "EXAMPLES:
    glyphpack convert wifi.png                    # 16x16 grid, C array output
    glyphpack convert wifi.png --grid 32x32
    glyphpack convert wifi.png -g 8 -f hex        # 8x8 square grid
    glyphpack convert logo.png --name logo_bits --invert
    glyphpack convert icon.png --threshold-resize # resize-then-threshold fallback

PRESETS: 8x8, 16x16, 32x32, 20x31, 10x24, 64x64 (any WxH up to 200x200 works)")]
    Convert {
        /// Image file to convert
        image: PathBuf,

        /// Target grid size (WxH, or a single number for a square grid)
        #[arg(long, short, value_parser = parse_grid_size)]
        grid: Option<(usize, usize)>,

        /// Output format
        #[arg(long, short)]
        format: Option<OutputFormat>,

        /// C array identifier
        #[arg(long, short)]
        name: Option<String>,

        /// Invert the grid before packing
        #[arg(long)]
        invert: bool,

        /// Use the resize-then-threshold fallback instead of the
        /// classified-pixel mapping (may differ at edges)
        #[arg(long)]
        threshold_resize: bool,

        /// Skip the terminal preview
        #[arg(long)]
        no_preview: bool,
    },

    /// Pack an ASCII-art drawing ('#' and '.') into a byte array
    #[command(after_help = "EXAMPLES:
    glyphpack pack icon.txt                       # size inferred from the file
    glyphpack pack icon.txt --grid 16x16          # size must match exactly
    glyphpack pack icon.txt -f binary --invert")]
    Pack {
        /// Text file containing the drawing
        file: PathBuf,

        /// Expected grid size (inferred from the file when omitted)
        #[arg(long, short, value_parser = parse_grid_size)]
        grid: Option<(usize, usize)>,

        /// Output format
        #[arg(long, short)]
        format: Option<OutputFormat>,

        /// C array identifier
        #[arg(long, short)]
        name: Option<String>,

        /// Invert the grid before packing
        #[arg(long)]
        invert: bool,
    },

    /// Classify an image's pixels and print statistics
    #[command(after_help = "EXAMPLES:
    glyphpack analyze wifi.png
    glyphpack analyze wifi.png --grid 32x32       # conversion preview size
    glyphpack analyze wifi.png --region 0 0 16 16 # top-left 16x16 block
    glyphpack analyze wifi.png --no-preview")]
    Analyze {
        /// Image file to analyze
        image: PathBuf,

        /// Restrict analysis to a region: X1 Y1 X2 Y2 (exclusive upper bounds)
        #[arg(long, num_args = 4, value_names = ["X1", "Y1", "X2", "Y2"])]
        region: Option<Vec<u32>>,

        /// Grid size for the conversion preview
        #[arg(long, short, value_parser = parse_grid_size)]
        grid: Option<(usize, usize)>,

        /// Skip the terminal previews
        #[arg(long)]
        no_preview: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grid_size_wxh() {
        assert_eq!(parse_grid_size("16x16").unwrap(), (16, 16));
        assert_eq!(parse_grid_size("20x31").unwrap(), (20, 31));
        assert_eq!(parse_grid_size("10x24").unwrap(), (10, 24));
    }

    #[test]
    fn test_parse_grid_size_square_shorthand() {
        assert_eq!(parse_grid_size("8").unwrap(), (8, 8));
        assert_eq!(parse_grid_size("64").unwrap(), (64, 64));
    }

    #[test]
    fn test_parse_grid_size_rejects_zero() {
        assert!(parse_grid_size("0x16").is_err());
        assert!(parse_grid_size("16x0").is_err());
        assert!(parse_grid_size("0").is_err());
    }

    #[test]
    fn test_parse_grid_size_rejects_oversize() {
        let err = parse_grid_size("201x16").unwrap_err();
        assert!(err.contains("exceeds"));
        assert!(parse_grid_size("1000").is_err());
    }

    #[test]
    fn test_parse_grid_size_rejects_garbage() {
        assert!(parse_grid_size("axb").is_err());
        assert!(parse_grid_size("16x").is_err());
        assert!(parse_grid_size("").is_err());
        assert!(parse_grid_size("16x16x16").is_err());
    }

    #[test]
    fn test_args_convert_defaults() {
        let args = Args::parse_from(["glyphpack", "convert", "wifi.png"]);
        match args.command {
            Command::Convert {
                image,
                grid,
                format,
                name,
                invert,
                threshold_resize,
                no_preview,
            } => {
                assert_eq!(image, PathBuf::from("wifi.png"));
                assert!(grid.is_none());
                assert!(format.is_none());
                assert!(name.is_none());
                assert!(!invert);
                assert!(!threshold_resize);
                assert!(!no_preview);
            }
            _ => panic!("Expected Convert subcommand"),
        }
    }

    #[test]
    fn test_args_convert_options() {
        let args = Args::parse_from([
            "glyphpack", "convert", "wifi.png", "--grid", "32x32", "--format", "hex", "--name",
            "wifi_bits", "--invert", "--no-preview",
        ]);
        match args.command {
            Command::Convert {
                grid,
                format,
                name,
                invert,
                no_preview,
                ..
            } => {
                assert_eq!(grid, Some((32, 32)));
                assert_eq!(format, Some(OutputFormat::Hex));
                assert_eq!(name.as_deref(), Some("wifi_bits"));
                assert!(invert);
                assert!(no_preview);
            }
            _ => panic!("Expected Convert subcommand"),
        }
    }

    #[test]
    fn test_args_pack_grid_optional() {
        let args = Args::parse_from(["glyphpack", "pack", "icon.txt"]);
        match args.command {
            Command::Pack { grid, .. } => assert!(grid.is_none()),
            _ => panic!("Expected Pack subcommand"),
        }
    }

    #[test]
    fn test_args_analyze_region() {
        let args = Args::parse_from([
            "glyphpack", "analyze", "wifi.png", "--region", "0", "0", "16", "16",
        ]);
        match args.command {
            Command::Analyze { region, .. } => {
                assert_eq!(region, Some(vec![0, 0, 16, 16]));
            }
            _ => panic!("Expected Analyze subcommand"),
        }
    }

    #[test]
    fn test_args_config_subcommands() {
        let args = Args::parse_from(["glyphpack", "config", "show"]);
        match args.command {
            Command::Config {
                action: ConfigAction::Show,
            } => (),
            _ => panic!("Expected Config Show subcommand"),
        }

        let args = Args::parse_from(["glyphpack", "config", "init"]);
        match args.command {
            Command::Config {
                action: ConfigAction::Init,
            } => (),
            _ => panic!("Expected Config Init subcommand"),
        }
    }

    #[test]
    fn test_args_global_config_path() {
        let args = Args::parse_from(["glyphpack", "-c", "/tmp/gp.toml", "pack", "icon.txt"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/gp.toml")));
    }
}
