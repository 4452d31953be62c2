use std::{io, pin::Pin};

use log::debug;
use reqwest::{Client, header::CONTENT_TYPE};
use tokio_stream::StreamExt;

use super::{FetchError, FetchedImage, ImageSource};

pub const BASE_URL: &str = "https://image.pollinations.ai";

/// `https://image.pollinations.ai/prompt/<prompt>?nologo=true&model=<model>`
pub fn request_url(prompt: &str, model: &str) -> String {
    format!(
        "{BASE_URL}/prompt/{}?nologo=true&model={}",
        urlencoding::encode(prompt),
        urlencoding::encode(model)
    )
}

#[derive(Clone, Default)]
pub struct Pollinations {
    client: Client,
}

impl Pollinations {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl ImageSource for Pollinations {
    fn fetch<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<FetchedImage, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            let resp = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| FetchError::Transport(e.into()))?;

            let status = resp.status();
            debug!("Pollinations responded with {status}");
            if !status.is_success() {
                return Err(FetchError::Status(status));
            }

            let content_type = resp
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);

            let body = resp
                .bytes_stream()
                .map(|chunk| chunk.map_err(|e| FetchError::Body(io::Error::other(e))));

            Ok(FetchedImage {
                content_type,
                body: Box::pin(body),
            })
        })
    }
}
