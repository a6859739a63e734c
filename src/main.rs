use clap::Parser;

use glyphpack::cli::commands::{self, OutputOptions};
use glyphpack::cli::{Args, Command};
use glyphpack::config::Config;

fn main() {
    env_logger::init();

    let args = Args::parse();

    // Load config file.
    // If --config is specified, require the file to exist.
    // Otherwise, fall back to defaults if the default config is not found.
    let config = if let Some(ref path) = args.config {
        if !path.exists() {
            eprintln!("Error: Config file '{}' not found", path.display());
            std::process::exit(1);
        }
        match Config::load(Some(path)) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        match Config::load(None) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Warning: Failed to load config file: {}", e);
                eprintln!("Using default settings.\n");
                Config::default()
            }
        }
    };

    let preview_box = (config.preview.max_width, config.preview.max_height);

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
            // Merge settings: CLI args > config file > built-in defaults
            let grid = grid.unwrap_or((config.grid.width, config.grid.height));
            let output = OutputOptions::resolve(format, name, &config);
            let show_preview = !no_preview && config.preview.enabled;

            if let Err(e) = commands::run_convert(
                &image,
                grid,
                &output,
                invert,
                threshold_resize,
                show_preview,
                preview_box,
            ) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Command::Pack {
            file,
            grid,
            format,
            name,
            invert,
        } => {
            let output = OutputOptions::resolve(format, name, &config);
            if let Err(e) = commands::run_pack(&file, grid, &output, invert) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Command::Analyze {
            image,
            region,
            grid,
            no_preview,
        } => {
            let region = region.map(|r| (r[0], r[1], r[2], r[3]));
            let grid = grid.unwrap_or((config.grid.width, config.grid.height));
            let show_preview = !no_preview && config.preview.enabled;

            if let Err(e) =
                commands::run_analyze(&image, region, grid, show_preview, preview_box)
            {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Command::Config { action } => {
            commands::handle_config_action(action, &config);
        }
    }
}
