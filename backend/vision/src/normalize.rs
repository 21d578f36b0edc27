//! Provider response → uniform annotation list.

use glimpse_core::{AnalysisError, Annotation, AnnotationKind};
use serde_json::Value;
use tracing::debug;

use crate::geometry::bounding_box;
use crate::response::{AnnotateImageResponse, EntityAnnotation, parse_response};

/// The provider reports no per-token confidence for text.
pub const TEXT_CONFIDENCE: f32 = 0.9;

/// Used for landmarks and logos that arrive without a score.
pub const DEFAULT_CONFIDENCE: f32 = 0.8;

/// Parse raw provider JSON and normalize its single image response.
pub fn normalize_response(raw: Value) -> Result<Vec<Annotation>, AnalysisError> {
    let image = parse_response(raw)?.into_first()?;
    Ok(normalize(&image))
}

/// Flatten one image response, kinds ordered text → object → landmark → logo.
pub fn normalize(response: &AnnotateImageResponse) -> Vec<Annotation> {
    let mut out = Vec::new();

    // Entry 0 is the aggregate full-text block; only the tokens after it count.
    if let Some(texts) = &response.text_annotations {
        for (index, entry) in texts.iter().enumerate().skip(1) {
            push_entity(&mut out, AnnotationKind::Text, index, entry, TEXT_CONFIDENCE, false);
        }
    }

    if let Some(objects) = &response.localized_object_annotations {
        for (index, obj) in objects.iter().enumerate() {
            let Some(content) = non_empty(&obj.name) else {
                debug!(index, "Skipping object with empty name");
                continue;
            };
            out.push(
                Annotation::new(annotation_id(AnnotationKind::Object, index), AnnotationKind::Object, content, obj.score)
                    .with_bounding_box(bounding_box(obj.bounding_poly.as_ref())),
            );
        }
    }

    for (kind, entries) in [
        (AnnotationKind::Landmark, &response.landmark_annotations),
        (AnnotationKind::Logo, &response.logo_annotations),
    ] {
        if let Some(entries) = entries {
            for (index, entry) in entries.iter().enumerate() {
                push_entity(&mut out, kind, index, entry, DEFAULT_CONFIDENCE, true);
            }
        }
    }

    out
}

fn push_entity(
    out: &mut Vec<Annotation>,
    kind: AnnotationKind,
    index: usize,
    entry: &EntityAnnotation,
    default_confidence: f32,
    use_score: bool,
) {
    let Some(content) = non_empty(&entry.description) else {
        debug!(%kind, index, "Skipping annotation with empty description");
        return;
    };
    let confidence = if use_score {
        entry.score.unwrap_or(default_confidence)
    } else {
        default_confidence
    };
    out.push(
        Annotation::new(annotation_id(kind, index), kind, content, confidence)
            .with_bounding_box(bounding_box(entry.bounding_poly.as_ref())),
    );
}

/// `{kind}-{index}`, indexed within the feature's own raw list.
fn annotation_id(kind: AnnotationKind, index: usize) -> String {
    format!("{}-{}", kind.as_str(), index)
}

fn non_empty(s: &str) -> Option<&str> {
    if s.trim().is_empty() { None } else { Some(s) }
}
