use std::{io, pin::Pin};

use bytes::Bytes;
use rand::{Rng, SeedableRng, rngs::StdRng};
use reqwest::StatusCode;
use strum::{Display, EnumIter, IntoEnumIterator};
use thiserror::Error;
use tokio_stream::Stream;

pub mod pollinations;
pub use pollinations::Pollinations;

pub const DEFAULT_MODEL: &str = "flux";

/// Models that can be picked by random model selection.
#[derive(Debug, Clone, Copy, Display, EnumIter, Hash, PartialEq, Eq)]
pub enum RegistryModel {
    #[strum(to_string = "flux")]
    Flux,
    #[strum(to_string = "stable-diffusion")]
    StableDiffusion,
    #[strum(to_string = "anime-v2")]
    AnimeV2,
}

impl RegistryModel {
    /// Deterministic for a given seed.
    pub fn pick(seed: u64) -> Self {
        let models: Vec<_> = Self::iter().collect();
        let mut rng = StdRng::seed_from_u64(seed);
        models[rng.random_range(0..models.len())]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelChoice {
    Fixed(String),
    Random { seed: u64 },
}

impl Default for ModelChoice {
    fn default() -> Self {
        Self::Fixed(DEFAULT_MODEL.into())
    }
}

impl ModelChoice {
    pub fn resolve(&self) -> String {
        match self {
            ModelChoice::Fixed(model) => model.clone(),
            ModelChoice::Random { seed } => RegistryModel::pick(*seed).to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to fetch image")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("bad response: {0}")]
    Status(StatusCode),

    #[error("failed to read image body")]
    Body(#[source] io::Error),
}

pub type ImageBody = Pin<Box<dyn Stream<Item = Result<Bytes, FetchError>> + Send>>;

pub struct FetchedImage {
    /// Raw `Content-Type` header, if the server sent one
    pub content_type: Option<String>,
    pub body: ImageBody,
}

/// Something that can turn a request URL into image bytes.
pub trait ImageSource {
    fn fetch<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<FetchedImage, FetchError>> + Send + 'a>>;
}
