//! MarkitBrand: marketing image previews from a brand name, tagline, style and optional
//! logo, generated through Gemini with one concurrent request per package image.

pub mod config;
pub mod encoding;
pub mod error;
pub mod gemini;
pub mod generator;
pub mod logger;
pub mod models;
pub mod order;
pub mod prompt;
#[cfg(feature = "server")]
pub mod server;
pub mod session;

pub use config::{Config, GeminiConfig, PaymentConfig};
pub use error::{MarkitError, Result};
pub use gemini::{GeminiClient, ImageBackend, ImageClient};
pub use generator::MarketingGenerator;
pub use models::{
    GeneratedImage, GenerationParams, GenerationResult, Logo, PackageOption, PackageTier,
    RequestPart, PACKAGES,
};
pub use order::OrderId;
pub use prompt::build_prompt;
pub use session::{Session, SessionState};
