use crate::{
    error::{MarkitError, Result},
    gemini::ImageBackend,
    logger,
    models::{catalog, GenerationParams, GenerationResult},
    prompt::build_prompt,
};
use futures::future::try_join_all;
use std::sync::Arc;

/// Fans one submission out into one backend call per package image.
#[derive(Clone)]
pub struct MarketingGenerator {
    backend: Arc<dyn ImageBackend>,
}

impl MarketingGenerator {
    pub fn new(backend: Arc<dyn ImageBackend>) -> Self {
        Self { backend }
    }

    /// All variations run concurrently. The first failure fails the whole call and the
    /// images that did succeed are dropped.
    pub async fn generate(&self, params: &GenerationParams) -> Result<GenerationResult> {
        let package = catalog::find_package(params.package_tier)?;
        let _timer = logger::timer(&format!(
            "{} package ({} images) for {}",
            package.name, package.image_count, params.brand_name
        ));

        let tasks = (0..package.image_count).map(|variation| self.variation(params, variation));
        let images = try_join_all(tasks).await?;

        log::info!(
            "Generated {} image(s) for {}",
            images.len(),
            params.brand_name
        );

        Ok(GenerationResult {
            package_tier: package.id,
            images,
        })
    }

    async fn variation(&self, params: &GenerationParams, variation: usize) -> Result<String> {
        log::debug!("Dispatching variation {}", variation + 1);
        let parts = build_prompt(params, variation);

        match self.backend.generate_image(parts).await {
            Ok(image) => Ok(image.to_data_uri()),
            Err(e) => {
                log::error!("Error generating image variation {}: {}", variation + 1, e);
                Err(MarkitError::variation_failed(variation, e))
            }
        }
    }
}
