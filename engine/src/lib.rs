pub mod image_model;
pub mod prompt;
pub mod run;
pub mod wallpaper;

pub use image_model::{ImageSource, ModelChoice, Pollinations};
pub use prompt::PromptParts;
pub use run::{RunConfig, RunReport, run};
pub use wallpaper::{TermuxWallpaper, WallpaperSetter};

/// Prefix of every saved image and name of the defaults file
pub const APP_NAME: &str = "wallai";
