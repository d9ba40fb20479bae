// SPDX-License-Identifier: MPL-2.0
//! Command-line front end: load files, pick margins, crop them all.
//!
//! The session runs headless: no thumbnails, previews or original images.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use cropdeck::application::session::{CommitOutcome, CropSession};
use cropdeck::config;
use cropdeck::domain::crop::{find_preset, preset_for_resolution, CropSettings, ProcessingStatus};
use cropdeck::infrastructure::{FsOriginalSource, LocalImageBackend};
use cropdeck::logging;
use log::LevelFilter;

const USAGE: &str = "\
Usage: cropdeck [OPTIONS] FILES...

Crops every file with the same margins and writes <name>_cropped.<ext>.

Options:
  --top N            Pixels removed from the top edge
  --bottom N         Pixels removed from the bottom edge
  --left N           Pixels removed from the left edge
  --right N          Pixels removed from the right edge
  --preset LABEL     Start from a named preset (margin flags override it)
  --auto-preset      Start from the preset matching the first file's resolution
  --output DIR       Write cropped files to DIR instead of next to each input
  --config-dir DIR   Read settings.toml from DIR
  --list-presets     Print the available presets and exit
  -v, --verbose      Log debug output to stderr
  -h, --help         Print this help
";

#[derive(Debug, Default, PartialEq, Eq)]
struct Flags {
    top: Option<u32>,
    bottom: Option<u32>,
    left: Option<u32>,
    right: Option<u32>,
    preset: Option<String>,
    auto_preset: bool,
    output: Option<PathBuf>,
    config_dir: Option<PathBuf>,
    list_presets: bool,
    verbose: bool,
    help: bool,
    files: Vec<String>,
}

impl Flags {
    fn parse(mut args: pico_args::Arguments) -> Result<Self, String> {
        let flags = Flags {
            help: args.contains(["-h", "--help"]),
            verbose: args.contains(["-v", "--verbose"]),
            list_presets: args.contains("--list-presets"),
            auto_preset: args.contains("--auto-preset"),
            top: args.opt_value_from_str("--top").map_err(|e| e.to_string())?,
            bottom: args.opt_value_from_str("--bottom").map_err(|e| e.to_string())?,
            left: args.opt_value_from_str("--left").map_err(|e| e.to_string())?,
            right: args.opt_value_from_str("--right").map_err(|e| e.to_string())?,
            preset: args.opt_value_from_str("--preset").map_err(|e| e.to_string())?,
            output: args
                .opt_value_from_str::<_, String>("--output")
                .map_err(|e| e.to_string())?
                .map(PathBuf::from),
            config_dir: args
                .opt_value_from_str::<_, String>("--config-dir")
                .map_err(|e| e.to_string())?
                .map(PathBuf::from),
            files: Vec::new(),
        };

        let mut files = Vec::new();
        for arg in args.finish() {
            let arg = arg.to_string_lossy().into_owned();
            if arg.starts_with('-') {
                return Err(format!("unknown option '{arg}'"));
            }
            files.push(arg);
        }

        Ok(Flags { files, ..flags })
    }

    /// Applies the individual margin flags on top of `base`.
    fn apply_margins(&self, base: CropSettings) -> CropSettings {
        CropSettings {
            top: self.top.unwrap_or(base.top),
            bottom: self.bottom.unwrap_or(base.bottom),
            left: self.left.unwrap_or(base.left),
            right: self.right.unwrap_or(base.right),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let flags = match Flags::parse(pico_args::Arguments::from_env()) {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("error: {err}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };
    if flags.help {
        print!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let level = if flags.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(err) = logging::init(level) {
        eprintln!("warning: {err}");
    }

    let (config, warning) = config::load_with_override(flags.config_dir.clone());
    if let Some(warning) = warning {
        log::warn!("{warning}");
    }
    let presets = config.presets();

    if flags.list_presets {
        for preset in &presets {
            println!(
                "{:<8} {}x{}  {}",
                preset.label, preset.source_width, preset.source_height, preset.settings
            );
        }
        return ExitCode::SUCCESS;
    }

    if flags.files.is_empty() {
        eprintln!("error: no input files\n\n{USAGE}");
        return ExitCode::FAILURE;
    }

    let mut options = config.session_options();
    options.display = false;
    if let Some(output) = flags.output.clone() {
        options.output_dir = Some(output);
    }
    let session = CropSession::new(
        Arc::new(LocalImageBackend::new()),
        Arc::new(FsOriginalSource::new()),
        options,
    );
    session.add_files(flags.files.iter().cloned()).await;

    let mut base = CropSettings::default();
    if let Some(label) = &flags.preset {
        match find_preset(&presets, label) {
            Some(preset) => base = preset.settings,
            None => {
                eprintln!("error: unknown preset '{label}' (see --list-presets)");
                return ExitCode::FAILURE;
            }
        }
    } else if flags.auto_preset {
        let info = session
            .snapshot()
            .files()
            .first()
            .and_then(|entry| entry.info.clone());
        let preset = info
            .and_then(|info| preset_for_resolution(&presets, info.width, info.height).cloned());
        match preset {
            Some(preset) => {
                log::info!(
                    "Using preset {} for {}x{}",
                    preset.label,
                    preset.source_width,
                    preset.source_height
                );
                base = preset.settings;
            }
            None => log::warn!("No preset matches the first file's resolution"),
        }
    }
    session.set_settings(flags.apply_margins(base));

    let outcome = session.execute_crop().await;
    let state = session.snapshot();
    for result in &state.results {
        if result.success {
            println!("{} -> {}", result.input_path, result.output_path);
        } else {
            println!("FAILED {}", result.failure_line());
        }
    }

    match outcome {
        CommitOutcome::Finished(ProcessingStatus::Done) => ExitCode::SUCCESS,
        CommitOutcome::Finished(_) => {
            if let Some(message) = &state.error_message {
                eprintln!("error: {message}");
            }
            ExitCode::FAILURE
        }
        CommitOutcome::NothingToCrop | CommitOutcome::AlreadyRunning => ExitCode::FAILURE,
    }
}
