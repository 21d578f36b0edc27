//! Request construction for the `images:annotate` endpoint.
//!
//! The captured image arrives already base64-encoded; the builder only strips
//! a data-URL prefix and never re-encodes the payload.

use serde::{Deserialize, Serialize};

/// Default result caps per feature, in request order.
pub const DEFAULT_TEXT_RESULTS: u32 = 50;
pub const DEFAULT_OBJECT_RESULTS: u32 = 20;
pub const DEFAULT_LANDMARK_RESULTS: u32 = 10;
pub const DEFAULT_LOGO_RESULTS: u32 = 10;

/// Maximum results requested for each feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureLimits {
    pub text: u32,
    pub objects: u32,
    pub landmarks: u32,
    pub logos: u32,
}

impl Default for FeatureLimits {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT_RESULTS,
            objects: DEFAULT_OBJECT_RESULTS,
            landmarks: DEFAULT_LANDMARK_RESULTS,
            logos: DEFAULT_LOGO_RESULTS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureType {
    TextDetection,
    ObjectLocalization,
    LandmarkDetection,
    LogoDetection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: FeatureType,
    pub max_results: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotateImageRequest {
    pub image: ImagePayload,
    pub features: Vec<Feature>,
}

/// Body of a batch annotate call. Always carries exactly one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotateRequest {
    pub requests: Vec<AnnotateImageRequest>,
}

const DATA_URL_HEAD: &str = "data:image/";
const DATA_URL_TAIL: &str = ";base64,";

/// Strip a `data:image/<subtype>;base64,` prefix if present.
///
/// `<subtype>` must be one or more ASCII lowercase letters. Any other input,
/// including near-misses, is returned untouched.
pub fn strip_data_url_prefix(image: &str) -> &str {
    let Some(rest) = image.strip_prefix(DATA_URL_HEAD) else {
        return image;
    };
    let Some(end) = rest.find(DATA_URL_TAIL) else {
        return image;
    };
    let subtype = &rest[..end];
    if subtype.is_empty() || !subtype.bytes().all(|b| b.is_ascii_lowercase()) {
        return image;
    }
    &rest[end + DATA_URL_TAIL.len()..]
}

/// Build the four-feature annotate request for one captured image.
pub fn build_request(image: &str, limits: &FeatureLimits) -> AnnotateRequest {
    let features = vec![
        Feature { kind: FeatureType::TextDetection, max_results: limits.text },
        Feature { kind: FeatureType::ObjectLocalization, max_results: limits.objects },
        Feature { kind: FeatureType::LandmarkDetection, max_results: limits.landmarks },
        Feature { kind: FeatureType::LogoDetection, max_results: limits.logos },
    ];
    AnnotateRequest {
        requests: vec![AnnotateImageRequest {
            image: ImagePayload { content: strip_data_url_prefix(image).to_string() },
            features,
        }],
    }
}
