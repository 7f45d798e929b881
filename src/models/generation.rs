use crate::encoding;
use crate::error::{MarkitError, Result};
use crate::models::catalog::PackageTier;
use serde::{Deserialize, Serialize};

pub const DEFAULT_STYLE: &str = "Modern and eye-catching";

/// An uploaded logo, already base64 encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Logo {
    pub data: String,
    pub mime_type: String,
}

impl Logo {
    /// `None` unless both the payload (after any data-URI prefix) and the mime type are
    /// non-empty; a half-specified logo is treated as no logo at all.
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Option<Self> {
        let data: String = data.into();
        let data = encoding::strip_data_uri_prefix(&data).trim();
        let mime_type: String = mime_type.into();
        if data.is_empty() || mime_type.trim().is_empty() {
            return None;
        }
        Some(Self {
            data: data.to_string(),
            mime_type: mime_type.trim().to_string(),
        })
    }

    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Option<Self> {
        if bytes.is_empty() {
            return None;
        }
        Self::new(encoding::encode_bytes(bytes), mime_type)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub brand_name: String,
    pub tagline: String,
    pub style: String,
    pub logo: Option<Logo>,
    pub package_tier: PackageTier,
}

impl GenerationParams {
    pub fn new(brand_name: impl Into<String>, tagline: impl Into<String>) -> Self {
        Self {
            brand_name: brand_name.into(),
            tagline: tagline.into(),
            style: DEFAULT_STYLE.to_string(),
            logo: None,
            package_tier: PackageTier::default(),
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn with_optional_logo(mut self, logo: Option<Logo>) -> Self {
        self.logo = logo;
        self
    }

    pub fn with_package(mut self, tier: PackageTier) -> Self {
        self.package_tier = tier;
        self
    }

    /// Brand name and tagline are required before a submit is allowed.
    pub fn validate(&self) -> Result<()> {
        if self.brand_name.trim().is_empty() {
            return Err(MarkitError::InvalidInput("brand name is required".into()));
        }
        if self.tagline.trim().is_empty() {
            return Err(MarkitError::InvalidInput("tagline is required".into()));
        }
        Ok(())
    }
}

/// One element of a request payload. An image part goes before the text part.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestPart {
    InlineImage { data: String, mime_type: String },
    Text { content: String },
}

impl RequestPart {
    pub fn is_image(&self) -> bool {
        matches!(self, RequestPart::InlineImage { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            RequestPart::Text { content } => Some(content),
            RequestPart::InlineImage { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub data: String,
}

impl GeneratedImage {
    pub fn to_data_uri(&self) -> String {
        encoding::to_data_uri(&self.mime_type, &self.data)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationResult {
    pub package_tier: PackageTier,
    /// Data-URIs, index i holds variation i.
    pub images: Vec<String>,
}

impl GenerationResult {
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
