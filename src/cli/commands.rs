//! Subcommand handlers wiring the importer, resampler, and packer together.

use std::path::Path;

use crate::config::{default_path as get_config_path, Config};
use crate::grid::Grid;
use crate::import::{
    region_counts, resample, threshold_resize, ChannelLayout, ClassCounts, Classification,
    SourceImage,
};
use crate::pack::{pack, PackedBitmap};
use crate::preview;

use super::args::ConfigAction;
use super::enums::OutputFormat;

/// Default C array identifier when neither flag nor config supplies one.
const DEFAULT_ARRAY_NAME: &str = "icon_bits";

/// Resolved output settings: CLI flag > config file > built-in default.
pub struct OutputOptions {
    pub format: OutputFormat,
    pub name: String,
}

impl OutputOptions {
    pub fn resolve(
        format: Option<OutputFormat>,
        name: Option<String>,
        config: &Config,
    ) -> Self {
        let format = format
            .or_else(|| {
                config
                    .output
                    .format
                    .as_deref()
                    .and_then(OutputFormat::from_name)
            })
            .unwrap_or_default();
        let name = name
            .or_else(|| config.output.name.clone())
            .unwrap_or_else(|| DEFAULT_ARRAY_NAME.to_string());
        OutputOptions { format, name }
    }
}

/// Run the convert command: image -> classification -> grid -> bytes.
#[allow(clippy::too_many_arguments)] // Direct mapping from CLI args
pub fn run_convert(
    image_path: &Path,
    grid_size: (usize, usize),
    output: &OutputOptions,
    invert: bool,
    use_threshold_resize: bool,
    show_preview: bool,
    preview_box: (u16, u16),
) -> Result<(), String> {
    let image = SourceImage::open(image_path).map_err(|e| e.to_string())?;
    let (target_w, target_h) = grid_size;

    let classification = Classification::analyze(&image);
    print_image_header(image_path, &image);
    print_counts(&classification.counts(), image.layout());

    let mut grid = if use_threshold_resize {
        log::info!("using resize-then-threshold fallback");
        threshold_resize(&image, target_w, target_h)
    } else {
        resample(&classification, target_w, target_h)
    };
    if invert {
        grid.invert();
    }

    if show_preview {
        let (max_w, max_h) = preview_box;
        let (pw, ph) = preview::preview_size(&image, max_w, max_h);
        println!();
        println!("Terminal preview ({}x{} characters):", pw, ph);
        for line in preview::render_image(&image, max_w, max_h) {
            println!("{}", line);
        }
        println!();
        println!("Conversion preview ({}x{}):", target_w, target_h);
        print!("{}", grid.to_ascii());
    }

    let bitmap = pack(&grid).map_err(|e| e.to_string())?;
    println!();
    print_output(&bitmap, &grid, output);
    Ok(())
}

/// Run the pack command: ASCII-art file -> grid -> bytes.
pub fn run_pack(
    file: &Path,
    grid_size: Option<(usize, usize)>,
    output: &OutputOptions,
    invert: bool,
) -> Result<(), String> {
    let text = std::fs::read_to_string(file)
        .map_err(|e| format!("Failed to read '{}': {}", file.display(), e))?;

    // Without an explicit size, take the first line as the width and the
    // line count as the height; the parser still validates every line.
    let (width, height) = match grid_size {
        Some(size) => size,
        None => {
            let width = text.lines().next().map(|l| l.chars().count()).unwrap_or(0);
            let height = text.lines().count();
            (width, height)
        }
    };

    let mut grid = Grid::parse_ascii(&text, width, height)
        .map_err(|e| format!("Invalid drawing '{}': {}", file.display(), e))?;
    if invert {
        grid.invert();
    }

    let bitmap = pack(&grid).map_err(|e| e.to_string())?;
    println!("Packed {}x{} drawing: {} bytes", width, height, bitmap.len());
    println!();
    print_output(&bitmap, &grid, output);
    Ok(())
}

/// Run the analyze command: classification statistics and previews.
pub fn run_analyze(
    image_path: &Path,
    region: Option<(u32, u32, u32, u32)>,
    grid_size: (usize, usize),
    show_preview: bool,
    preview_box: (u16, u16),
) -> Result<(), String> {
    let image = SourceImage::open(image_path).map_err(|e| e.to_string())?;
    print_image_header(image_path, &image);

    if let Some((x1, y1, x2, y2)) = region {
        let counts = region_counts(&image, x1, y1, x2, y2).map_err(|e| e.to_string())?;
        println!();
        println!(
            "Region ({},{}) to ({},{}): {}x{} pixels",
            x1,
            y1,
            x2,
            y2,
            x2 - x1,
            y2 - y1
        );
        print_counts(&counts, image.layout());
        return Ok(());
    }

    let classification = Classification::analyze(&image);
    let counts = classification.counts();
    print_counts(&counts, image.layout());

    println!();
    println!("Conversion summary:");
    println!("  To black (#): {}", counts.colored);
    println!("  To white (.): {}", counts.white + counts.transparent);

    if show_preview {
        let (max_w, max_h) = preview_box;
        let (pw, ph) = preview::preview_size(&image, max_w, max_h);
        println!();
        println!("Terminal preview ({}x{} characters):", pw, ph);
        for line in preview::render_image(&image, max_w, max_h) {
            println!("{}", line);
        }

        let (target_w, target_h) = grid_size;
        let grid = resample(&classification, target_w, target_h);
        println!();
        println!(
            "Conversion preview ({}x{}, {:.1}% filled):",
            target_w,
            target_h,
            grid.set_count() as f64 * 100.0 / grid.cell_count().max(1) as f64
        );
        print!("{}", grid.to_ascii());
    }

    Ok(())
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, config: &Config) {
    match action {
        ConfigAction::Show => {
            println!("Current configuration:");
            println!("  Grid: {}x{}", config.grid.width, config.grid.height);
            println!(
                "  Format: {}",
                config.output.format.as_deref().unwrap_or("c")
            );
            println!(
                "  Array name: {}",
                config.output.name.as_deref().unwrap_or(DEFAULT_ARRAY_NAME)
            );
            println!(
                "  Preview: {} (max {}x{})",
                if config.preview.enabled { "on" } else { "off" },
                config.preview.max_width,
                config.preview.max_height
            );
            println!();

            let config_path = get_config_path();
            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
        }
        ConfigAction::Init => {
            let config_path = get_config_path();

            if config_path.exists() {
                eprintln!("Config file already exists: {}", config_path.display());
                eprintln!("Use 'glyphpack config show' to view current settings.");
                std::process::exit(1);
            }

            // Create parent directories if needed
            if let Some(parent) = config_path.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    eprintln!("Error creating config directory: {}", e);
                    std::process::exit(1);
                }
            }

            let default_config = r#"# glyphpack configuration

[grid]
# Default target grid size for image conversion
# Common display sizes: 8x8, 16x16, 32x32, 20x31, 10x24, 64x64
width = 16
height = 16

[output]
# Output format: c, hex, binary, ascii, all
format = "c"
# C array identifier
name = "icon_bits"

[preview]
# Show terminal previews
enabled = true
# Preview box size in characters
max_width = 80
max_height = 40
"#;

            if let Err(e) = std::fs::write(&config_path, default_config) {
                eprintln!("Error writing config file: {}", e);
                std::process::exit(1);
            }

            println!("Created config file: {}", config_path.display());
        }
    }
}

fn print_image_header(path: &Path, image: &SourceImage) {
    println!("Image: {}", path.display());
    println!("Dimensions: {}x{} pixels", image.width(), image.height());
    let layout = match image.layout() {
        ChannelLayout::Gray => "1 (grayscale)",
        ChannelLayout::Rgb => "3 (RGB)",
        ChannelLayout::Rgba => "4 (RGBA)",
    };
    println!("Channels: {}", layout);
}

fn print_counts(counts: &ClassCounts, layout: ChannelLayout) {
    println!();
    println!("Pixel classification:");
    println!(
        "  Colored:     {} ({:.1}%)",
        counts.colored,
        counts.percent(counts.colored)
    );
    println!(
        "  White:       {} ({:.1}%)",
        counts.white,
        counts.percent(counts.white)
    );
    if layout == ChannelLayout::Rgba {
        println!(
            "  Transparent: {} ({:.1}%)",
            counts.transparent,
            counts.percent(counts.transparent)
        );
    }
    println!("  Total:       {}", counts.total());
}

fn print_output(bitmap: &PackedBitmap, grid: &Grid, output: &OutputOptions) {
    match output.format {
        OutputFormat::C => print!("{}", bitmap.c_array(&output.name)),
        OutputFormat::Hex => print_hex(bitmap),
        OutputFormat::Binary => print_binary(bitmap),
        OutputFormat::Ascii => print!("{}", grid.to_ascii()),
        OutputFormat::All => {
            print!("{}", bitmap.c_array(&output.name));
            println!();
            print_binary(bitmap);
            println!();
            print!("{}", grid.to_ascii());
        }
    }
}

fn print_hex(bitmap: &PackedBitmap) {
    let tokens = bitmap.hex_tokens();
    for row in tokens.chunks(bitmap.bytes_per_row()) {
        let mut line = String::new();
        for token in row {
            line.push_str(token);
            line.push_str(", ");
        }
        line.pop();
        println!("{}", line);
    }
}

fn print_binary(bitmap: &PackedBitmap) {
    for (i, row) in bitmap.binary_rows().iter().enumerate() {
        println!("Row {}: {}", i, row);
    }
}
