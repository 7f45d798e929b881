pub mod image_client;
pub mod traits;

use crate::{config::GeminiConfig, error::Result, generator::MarketingGenerator};
use std::sync::Arc;

pub use image_client::ImageClient;
pub use traits::ImageBackend;

#[derive(Clone)]
pub struct GeminiClient {
    image_client: ImageClient,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let image_client = ImageClient::new(&config)?;
        log::info!("Gemini client ready for model {}", config.model);

        Ok(Self { image_client })
    }

    /// A generator that sends every variation through this client.
    pub fn generator(&self) -> MarketingGenerator {
        MarketingGenerator::new(Arc::new(self.image_client.clone()))
    }
}
