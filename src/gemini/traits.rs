use crate::{
    error::Result,
    models::{GeneratedImage, RequestPart},
};
use async_trait::async_trait;

/// Anything that can turn one prompt into one image.
#[async_trait]
pub trait ImageBackend: Send + Sync {
    async fn generate_image(&self, parts: Vec<RequestPart>) -> Result<GeneratedImage>;
}
