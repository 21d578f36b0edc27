use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The four feature families a vision provider reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    Text,
    Object,
    Landmark,
    Logo,
}

impl AnnotationKind {
    /// Fixed presentation order: text, object, landmark, logo.
    pub const ALL: [AnnotationKind; 4] = [
        AnnotationKind::Text,
        AnnotationKind::Object,
        AnnotationKind::Landmark,
        AnnotationKind::Logo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationKind::Text => "text",
            AnnotationKind::Object => "object",
            AnnotationKind::Landmark => "landmark",
            AnnotationKind::Logo => "logo",
        }
    }

    /// Human label for `count` items of this kind, e.g. "text elements".
    pub fn label(&self, count: usize) -> String {
        let singular = match self {
            AnnotationKind::Text => "text element",
            AnnotationKind::Object => "object",
            AnnotationKind::Landmark => "landmark",
            AnnotationKind::Logo => "logo",
        };
        if count > 1 {
            format!("{singular}s")
        } else {
            singular.to_string()
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis-aligned rectangle in the image's pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One normalized detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    /// `{kind}-{index}`; unique within one result.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AnnotationKind,
    pub content: String,
    /// Always within `[0, 1]`.
    pub confidence: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

impl Annotation {
    pub fn new(
        id: impl Into<String>,
        kind: AnnotationKind,
        content: impl Into<String>,
        confidence: f32,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            content: content.into(),
            confidence: confidence.clamp(0.0, 1.0),
            bounding_box: None,
        }
    }

    pub fn with_bounding_box(mut self, bounding_box: Option<BoundingBox>) -> Self {
        self.bounding_box = bounding_box;
        self
    }
}

/// Outcome of one pipeline run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    timestamp: DateTime<Utc>,
    source_image: String,
    annotations: Vec<Annotation>,
    summary: String,
}

impl AnalysisResult {
    pub fn new(
        timestamp: DateTime<Utc>,
        source_image: impl Into<String>,
        annotations: Vec<Annotation>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            source_image: source_image.into(),
            annotations,
            summary: summary.into(),
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The image reference exactly as it was handed to the pipeline.
    pub fn source_image(&self) -> &str {
        &self.source_image
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn count(&self, kind: AnnotationKind) -> usize {
        self.annotations.iter().filter(|a| a.kind == kind).count()
    }

    pub fn of_kind(&self, kind: AnnotationKind) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter().filter(move |a| a.kind == kind)
    }
}
