use std::{
    fs,
    path::{Path, PathBuf},
};

use color_eyre::{
    Result,
    eyre::{WrapErr as _, eyre},
};
use log::LevelFilter;
use serde::{Deserialize, de::DeserializeOwned};
use wallai_engine::{
    APP_NAME, ModelChoice, PromptParts, RunConfig, RunReport, image_model::DEFAULT_MODEL,
    run::unix_now,
};

pub mod cli;
pub use cli::Cli;

/// Values from the defaults file. Command line flags win over these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub model: Option<String>,
    pub out_dir: Option<PathBuf>,
    pub set_wallpaper: Option<bool>,
}

pub fn load_ron_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let src = fs::read_to_string(path)?;
    Ok(ron::from_str(&src)?)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(dirs::config_local_dir()
        .ok_or(eyre!("Couldn't get config dir"))?
        .join(format!("{APP_NAME}.ron")))
}

/// An explicitly given file has to exist, the default one is optional.
pub fn load_defaults(explicit: Option<&Path>) -> Result<Defaults> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match config_path() {
            Ok(path) if path.exists() => path,
            _ => return Ok(Defaults::default()),
        },
    };
    load_ron_file(&path).wrap_err_with(|| format!("Couldn't load defaults from {}", path.display()))
}

pub fn default_out_dir() -> PathBuf {
    out_dir_under(dirs::home_dir())
}

/// Without a home directory the path stays relative to the working directory.
fn out_dir_under(home: Option<PathBuf>) -> PathBuf {
    home.unwrap_or_default()
        .join("pictures")
        .join("generated-wallpapers")
}

impl Cli {
    pub fn into_run_config(self, defaults: Defaults) -> RunConfig {
        let model = if self.random_model {
            ModelChoice::Random {
                seed: self.seed.unwrap_or_else(unix_now),
            }
        } else {
            ModelChoice::Fixed(
                self.model
                    .or(defaults.model)
                    .unwrap_or_else(|| DEFAULT_MODEL.into()),
            )
        };

        let out_dir = self
            .out_dir
            .or(defaults.out_dir)
            .unwrap_or_else(default_out_dir);

        RunConfig {
            prompt: PromptParts {
                prompt: self.prompt,
                tag: self.tag,
                style: self.style,
                mood: self.mood,
                negative: self.negative,
            },
            model,
            // negative counts end up as 0 and are rejected by validation
            count: usize::try_from(self.count).unwrap_or(0),
            out_dir,
            set_wallpaper: self
                .set_wallpaper
                .or(defaults.set_wallpaper)
                .unwrap_or(true),
        }
    }
}

/// Printed on stdout once the loop is done.
pub fn summary(report: &RunReport) -> String {
    format!(
        "saved {} of {} images",
        report.saved.len(),
        report.attempts
    )
}

/// Warnings and errors from everything, plus debug output from our own crates
/// when `verbose` is set.
pub fn logger_builder(verbose: bool) -> env_logger::Builder {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(LevelFilter::Warn);
    if verbose {
        builder
            .filter_module("wallai", LevelFilter::Debug)
            .filter_module("wallai_engine", LevelFilter::Debug);
    }
    builder
}

/// Logs go to stderr. `RUST_LOG` overrides the levels picked here.
pub fn init_logger(verbose: bool) {
    let mut builder = logger_builder(verbose);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}
