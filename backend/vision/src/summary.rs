//! Human-readable summary of a normalized annotation list.

use glimpse_core::{Annotation, AnnotationKind};

const PREFIX: &str = "Analysis complete. Found: ";
const NOTHING_FOUND: &str = "no recognizable content";

/// Count annotations per kind and describe them in fixed kind order.
pub fn summarize(annotations: &[Annotation]) -> String {
    let parts: Vec<String> = AnnotationKind::ALL
        .iter()
        .filter_map(|kind| {
            let count = annotations.iter().filter(|a| a.kind == *kind).count();
            (count > 0).then(|| format!("{count} {}", kind.label(count)))
        })
        .collect();

    if parts.is_empty() {
        format!("{PREFIX}{NOTHING_FOUND}")
    } else {
        format!("{PREFIX}{}", parts.join(", "))
    }
}
