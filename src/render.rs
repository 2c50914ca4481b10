//! Architectural render generation
//!
//! Turns a site photo, an optional style reference and a set of style
//! parameters into Gemini image-generation requests. One request yields at
//! most one image, so a render with `image_count = n` fires `n` independent
//! requests concurrently and keeps every response that carried an image.

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::{
    config::{Config, GeminiConfig},
    error::AppError,
    metrics,
    models::gemini::{
        Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageConfig,
        Part,
    },
    providers::gemini::{self, GeminiEndpoint},
};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
/// The only model that accepts `imageSize` and needs a separately authorized key
pub const PRO_MODEL: &str = "gemini-3-pro-image-preview";
pub const MAX_IMAGE_COUNT: u8 = 4;

/// Base64 image payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    pub base64: String,
    pub mime_type: String,
}

impl ImageData {
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }

    fn to_part(&self) -> Part {
        Part::inline(&self.mime_type, &self.base64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    Portrait3x4,
    #[serde(rename = "4:3")]
    Landscape4x3,
    #[serde(rename = "9:16")]
    Portrait9x16,
    #[default]
    #[serde(rename = "16:9")]
    Landscape16x9,
}

impl AspectRatio {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Portrait3x4 => "3:4",
            Self::Landscape4x3 => "4:3",
            Self::Portrait9x16 => "9:16",
            Self::Landscape16x9 => "16:9",
        }
    }
}

impl std::str::FromStr for AspectRatio {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1:1" => Ok(Self::Square),
            "3:4" => Ok(Self::Portrait3x4),
            "4:3" => Ok(Self::Landscape4x3),
            "9:16" => Ok(Self::Portrait9x16),
            "16:9" => Ok(Self::Landscape16x9),
            other => Err(AppError::InvalidInput(format!(
                "unsupported aspect ratio '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Resolution {
    #[default]
    #[serde(rename = "1K")]
    OneK,
    #[serde(rename = "2K")]
    TwoK,
    #[serde(rename = "4K")]
    FourK,
}

impl Resolution {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneK => "1K",
            Self::TwoK => "2K",
            Self::FourK => "4K",
        }
    }
}

impl std::str::FromStr for Resolution {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1K" => Ok(Self::OneK),
            "2K" => Ok(Self::TwoK),
            "4K" => Ok(Self::FourK),
            other => Err(AppError::InvalidInput(format!(
                "unsupported resolution '{}'",
                other
            ))),
        }
    }
}

/// Style parameters for a render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    pub style: String,
    pub location: String,
    pub lighting: String,
    pub weather: String,
    pub custom_prompt: Option<String>,
    pub image_count: u8,
    pub aspect_ratio: AspectRatio,
    pub model: String,
    pub resolution: Resolution,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            style: "Modern (Hiện đại)".to_string(),
            location: "trên một đường phố Việt Nam".to_string(),
            lighting: "sáng rực rỡ".to_string(),
            weather: "trong xanh".to_string(),
            custom_prompt: None,
            image_count: 3,
            aspect_ratio: AspectRatio::default(),
            model: DEFAULT_MODEL.to_string(),
            resolution: Resolution::default(),
        }
    }
}

impl RenderConfig {
    pub fn is_pro(&self) -> bool {
        self.model == PRO_MODEL
    }
}

/// Build the render instruction sent alongside the images
pub fn build_prompt(config: &RenderConfig) -> String {
    let extra = match config.custom_prompt.as_deref() {
        Some(custom) if !custom.trim().is_empty() => format!("Yêu cầu bổ sung: {}", custom),
        _ => String::new(),
    };

    [
        "Tạo một bản render kiến trúc chân thực dựa trên Ảnh Gốc (Ảnh 1). ".to_string(),
        "LƯU Ý QUAN TRỌNG: Hình ảnh đầu ra PHẢI có kích thước pixel và tỉ lệ khung hình GIỐNG Y HỆT so với Ảnh Gốc (Ảnh 1), chi tiết bám theo ảnh 1. ".to_string(),
        "KHÔNG được lấy kích thước hoặc tỉ lệ khung hình của Ảnh Tham Chiếu (Ảnh 2).".to_string(),
        String::new(),
        format!(
            "Hướng dẫn sáng tạo chính là: một bản render chân thực của tòa nhà theo phong cách {}, ",
            config.style
        ),
        format!(
            "nằm trong bối cảnh {}, với ánh sáng {}, và thời tiết {}.",
            config.location, config.lighting, config.weather
        ),
        extra,
        String::new(),
        "Hãy tránh các yếu tố sau: chữ, dầu mờ, mờ, chất lượng thấp.".to_string(),
    ]
    .join("\n")
}

/// Build one generateContent request: original image, optional reference, then the prompt
pub fn build_request(
    original: &ImageData,
    reference: Option<&ImageData>,
    config: &RenderConfig,
) -> GenerateContentRequest {
    let mut parts = vec![original.to_part()];
    if let Some(reference) = reference {
        parts.push(reference.to_part());
    }
    parts.push(Part::text(build_prompt(config)));

    let image_size = config
        .is_pro()
        .then(|| config.resolution.as_str().to_string());

    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts,
        }],
        generation_config: Some(GenerationConfig {
            image_config: Some(ImageConfig {
                aspect_ratio: config.aspect_ratio.as_str().to_string(),
                image_size,
            }),
        }),
    }
}

/// First inline image of the first candidate, as a data URL
pub fn first_image_data_url(response: &GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .first()?
        .content
        .as_ref()?
        .parts
        .iter()
        .find_map(|part| part.inline_data.as_ref())
        .map(|data| format!("data:{};base64,{}", data.mime_type, data.data))
}

/// Gate in front of the pro image model
pub trait ProAccess: Send + Sync {
    /// Whether the pro model may be called right now
    fn is_authorized(&self) -> bool;

    /// Ask for authorization; the current render is abandoned either way
    fn request_access(&self);
}

/// Authorized when a dedicated pro key is configured
#[derive(Debug, Clone)]
pub struct KeyProAccess {
    has_key: bool,
}

impl KeyProAccess {
    pub fn new(gemini: &GeminiConfig) -> Self {
        Self {
            has_key: gemini.has_pro_key(),
        }
    }
}

impl ProAccess for KeyProAccess {
    fn is_authorized(&self) -> bool {
        self.has_key
    }

    fn request_access(&self) {
        warn!(
            model = PRO_MODEL,
            "Pro image model requested without a key; set gemini.pro_api_key (HOMEPRO__GEMINI__PRO_API_KEY)"
        );
    }
}

/// Issues render requests against Gemini
#[derive(Clone)]
pub struct Renderer {
    client: reqwest::Client,
    endpoint: GeminiEndpoint,
    pro_api_key: Option<String>,
    allowed_models: Vec<String>,
    max_image_count: u8,
    pro_access: Arc<dyn ProAccess>,
}

impl Renderer {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        let pro_access = Arc::new(KeyProAccess::new(&config.gemini));
        Self::with_pro_access(client, config, pro_access)
    }

    pub fn with_pro_access(
        client: reqwest::Client,
        config: &Config,
        pro_access: Arc<dyn ProAccess>,
    ) -> Self {
        Self {
            client,
            endpoint: GeminiEndpoint {
                base_url: config.gemini.base_url.clone(),
                api_key: config.gemini.api_key.clone(),
                timeout_seconds: config.gemini.timeout_seconds,
            },
            pro_api_key: config
                .gemini
                .pro_api_key
                .clone()
                .filter(|_| config.gemini.has_pro_key()),
            allowed_models: config.render.allowed_models.clone(),
            max_image_count: config.render.max_image_count,
            pro_access,
        }
    }

    /// Render `config.image_count` variations; returns data URLs of the images produced
    pub async fn render(
        &self,
        original: &ImageData,
        reference: Option<&ImageData>,
        config: &RenderConfig,
    ) -> Result<Vec<String>, AppError> {
        if config.image_count == 0 || config.image_count > self.max_image_count {
            return Err(AppError::InvalidInput(format!(
                "image_count must be between 1 and {}",
                self.max_image_count
            )));
        }

        if !self.allowed_models.iter().any(|m| m == &config.model) {
            return Err(AppError::InvalidInput(format!(
                "model '{}' is not available",
                config.model
            )));
        }

        let endpoint = if config.is_pro() {
            if !self.pro_access.is_authorized() {
                self.pro_access.request_access();
                metrics::record_render(&config.model, "unauthorized");
                return Err(AppError::ProAuthorizationRequired(format!(
                    "model '{}' needs an authorized API key",
                    config.model
                )));
            }
            self.pro_endpoint()
        } else {
            self.endpoint.clone()
        };

        let request = build_request(original, reference, config);
        let start = Instant::now();

        info!(
            model = %config.model,
            image_count = config.image_count,
            has_reference = reference.is_some(),
            aspect_ratio = config.aspect_ratio.as_str(),
            "Starting render"
        );

        let calls = (0..config.image_count).map(|idx| {
            let request = &request;
            let endpoint = &endpoint;
            async move {
                let response =
                    gemini::generate_content(&self.client, endpoint, &config.model, request)
                        .await?;
                let image = first_image_data_url(&response);
                if image.is_none() {
                    debug!(variant = idx, "Render response carried no image");
                }
                Ok::<_, AppError>(image)
            }
        });

        let results = match try_join_all(calls).await {
            Ok(results) => results,
            Err(e) => {
                warn!(model = %config.model, error = %e, "Render failed");
                metrics::record_render(&config.model, "error");
                return Err(e);
            }
        };

        let images: Vec<String> = results.into_iter().flatten().collect();
        let duration = start.elapsed();

        info!(
            model = %config.model,
            requested = config.image_count,
            produced = images.len(),
            duration_ms = duration.as_millis() as u64,
            "Render completed"
        );
        metrics::record_render(&config.model, "success");
        metrics::record_render_images(&config.model, images.len() as u64);
        metrics::record_render_duration(&config.model, duration);

        Ok(images)
    }

    fn pro_endpoint(&self) -> GeminiEndpoint {
        let mut endpoint = self.endpoint.clone();
        if let Some(key) = &self.pro_api_key {
            endpoint.api_key = key.clone();
        }
        endpoint
    }
}
