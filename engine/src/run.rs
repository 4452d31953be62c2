//! The fetch loop: validate the configuration, prepare the output directory,
//! then fetch and save `count` images one after another.
//!
//! Only configuration errors and a failure to create the output directory end a
//! run early. Everything that goes wrong inside a single iteration is logged and
//! the loop moves on to the next image.

use std::{
    fs::{DirBuilder, File},
    io::Write,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use color_eyre::{Report, Result, eyre::WrapErr as _};
use log::{debug, error, info};
use thiserror::Error;
use tokio_stream::StreamExt;

use crate::{
    APP_NAME,
    image_model::{ImageBody, ImageSource, ModelChoice, pollinations::request_url},
    prompt::PromptParts,
    wallpaper::WallpaperSetter,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub prompt: PromptParts,
    pub model: ModelChoice,
    pub count: usize,
    pub out_dir: PathBuf,
    pub set_wallpaper: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("prompt required (-p)")]
    EmptyPrompt,

    #[error("count must be > 0")]
    InvalidCount,
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prompt.is_blank() {
            return Err(ConfigError::EmptyPrompt);
        }
        if self.count < 1 {
            return Err(ConfigError::InvalidCount);
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub attempts: usize,
    pub saved: Vec<PathBuf>,
}

pub async fn run(
    config: &RunConfig,
    source: &dyn ImageSource,
    wallpaper: &dyn WallpaperSetter,
) -> Result<RunReport> {
    config.validate()?;

    let model = config.model.resolve();
    let prompt = config.prompt.assemble();
    info!("Generating {} image(s) with model {model}", config.count);

    prepare_out_dir(&config.out_dir)?;

    let url = request_url(&prompt, &model);
    let mut report = RunReport::default();

    for i in 0..config.count {
        debug!("URL: {url}");
        report.attempts += 1;

        let image = match source.fetch(&url).await {
            Ok(image) => image,
            Err(e) => {
                error!("{:#}", Report::new(e));
                continue;
            }
        };

        let ext = image_extension(image.content_type.as_deref());
        let path = config
            .out_dir
            .join(image_file_name(unix_now(), i + 1, ext));

        let file = match File::create(&path) {
            Ok(file) => file,
            Err(e) => {
                error!("failed to create file {}: {e}", path.display());
                continue;
            }
        };

        if let Err(e) = write_body(image.body, file).await {
            error!("failed to save image: {e:#}");
        }

        println!("saved {}", path.display());
        if config.set_wallpaper {
            wallpaper.apply(&path);
        }
        report.saved.push(path);
    }

    Ok(report)
}

/// Creates `dir` and all missing parents.
pub fn prepare_out_dir(dir: &Path) -> Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder
        .create(dir)
        .wrap_err_with(|| format!("failed to create output dir {}", dir.display()))
}

pub fn image_extension(content_type: Option<&str>) -> &'static str {
    match content_type {
        Some(ct) if ct.contains("png") => ".png",
        _ => ".jpg",
    }
}

/// `index` is 1-based.
pub fn image_file_name(unix_time: u64, index: usize, ext: &str) -> String {
    format!("{APP_NAME}-{unix_time}-{index}{ext}")
}

pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

async fn write_body(mut body: ImageBody, mut file: File) -> Result<()> {
    while let Some(chunk) = body.next().await {
        file.write_all(&chunk?)?;
    }
    file.flush()?;
    Ok(())
}
