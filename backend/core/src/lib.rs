pub mod error;
pub mod traits;
pub mod types;

pub use error::AnalysisError;
pub use traits::ImageSource;
pub use types::{AnalysisResult, Annotation, AnnotationKind, BoundingBox};
