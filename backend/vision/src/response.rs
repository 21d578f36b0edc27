//! Typed view of an `images:annotate` response.
//!
//! Provider JSON is validated against these shapes before normalization.
//! Unknown fields are ignored; missing required fields are rejected as
//! [`AnalysisError::MalformedResponse`].

use glimpse_core::AnalysisError;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnnotateResponse {
    pub responses: Vec<AnnotateImageResponse>,
}

/// Results for a single image. Every feature list is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateImageResponse {
    #[serde(default)]
    pub text_annotations: Option<Vec<EntityAnnotation>>,
    #[serde(default)]
    pub localized_object_annotations: Option<Vec<LocalizedObjectAnnotation>>,
    #[serde(default)]
    pub landmark_annotations: Option<Vec<EntityAnnotation>>,
    #[serde(default)]
    pub logo_annotations: Option<Vec<EntityAnnotation>>,
    #[serde(default)]
    pub error: Option<Status>,
}

/// Text, landmark and logo entries share this shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityAnnotation {
    pub description: String,
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(default)]
    pub bounding_poly: Option<BoundingPoly>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedObjectAnnotation {
    pub name: String,
    /// Required: one scoreless object rejects the whole response as malformed.
    pub score: f32,
    #[serde(default)]
    pub bounding_poly: Option<BoundingPoly>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BoundingPoly {
    #[serde(default)]
    pub vertices: Vec<Vertex>,
}

/// Pixel-space vertex. The provider omits zero coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Vertex {
    #[serde(default)]
    pub x: Option<i64>,
    #[serde(default)]
    pub y: Option<i64>,
}

impl Vertex {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x: Some(x), y: Some(y) }
    }
}

/// Per-image status the provider embeds when one request in a batch fails.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

/// Validate raw provider JSON against the response schema.
pub fn parse_response(value: Value) -> Result<AnnotateResponse, AnalysisError> {
    let parsed: AnnotateResponse = serde_json::from_value(value)
        .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;
    if parsed.responses.is_empty() {
        return Err(AnalysisError::MalformedResponse(
            "`responses` array is empty".to_string(),
        ));
    }
    Ok(parsed)
}

impl AnnotateResponse {
    /// The single image response this pipeline asks for.
    pub fn into_first(self) -> Result<AnnotateImageResponse, AnalysisError> {
        let first = self.responses.into_iter().next().ok_or_else(|| {
            AnalysisError::MalformedResponse("`responses` array is empty".to_string())
        })?;
        if let Some(status) = &first.error {
            if status.code != 0 || !status.message.is_empty() {
                return Err(AnalysisError::Provider {
                    code: status.code,
                    message: status.message.clone(),
                });
            }
        }
        Ok(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_all_four_features() {
        let raw = json!({
            "responses": [{
                "textAnnotations": [{ "description": "HELLO", "boundingPoly": { "vertices": [{ "x": 1 }] } }],
                "localizedObjectAnnotations": [{ "name": "Cat", "score": 0.7, "mid": "/m/01yrx" }],
                "landmarkAnnotations": [{ "description": "Eiffel Tower", "score": 0.6 }],
                "logoAnnotations": [{ "description": "Acme" }]
            }]
        });
        let first = parse_response(raw).unwrap().into_first().unwrap();
        assert_eq!(first.text_annotations.unwrap()[0].bounding_poly.as_ref().unwrap().vertices[0], Vertex { x: Some(1), y: None });
        assert_eq!(first.localized_object_annotations.unwrap()[0].score, 0.7);
        assert_eq!(first.logo_annotations.unwrap()[0].score, None);
    }

    #[test]
    fn missing_responses_is_malformed() {
        let err = parse_response(json!({ "unexpected": true })).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn empty_responses_is_malformed() {
        let err = parse_response(json!({ "responses": [] })).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn wrong_feature_shape_is_malformed() {
        let err = parse_response(json!({ "responses": [{ "textAnnotations": "nope" }] })).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn object_without_score_is_malformed() {
        let err = parse_response(json!({
            "responses": [{ "localizedObjectAnnotations": [{ "name": "Cup" }] }]
        }))
        .unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn scoreless_object_rejects_otherwise_valid_features() {
        let err = parse_response(json!({
            "responses": [{
                "textAnnotations": [{ "description": "HELLO" }, { "description": "HELLO" }],
                "localizedObjectAnnotations": [{ "name": "Cup" }],
                "logoAnnotations": [{ "description": "Acme", "score": 0.9 }]
            }]
        }))
        .unwrap_err();
        match err {
            AnalysisError::MalformedResponse(msg) => assert!(msg.contains("score"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn embedded_error_becomes_provider_error() {
        let raw = json!({
            "responses": [{ "error": { "code": 3, "message": "Bad image data." } }]
        });
        let err = parse_response(raw).unwrap().into_first().unwrap_err();
        assert_eq!(err, AnalysisError::Provider { code: 3, message: "Bad image data.".into() });
    }

    #[test]
    fn empty_image_response_is_valid() {
        let first = parse_response(json!({ "responses": [{}] })).unwrap().into_first().unwrap();
        assert_eq!(first, AnnotateImageResponse::default());
    }
}
