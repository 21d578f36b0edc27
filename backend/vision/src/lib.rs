//! Vision understanding: turn one captured image into normalized annotations.
//!
//! Stages are plain functions ([`build_request`], [`normalize_response`],
//! [`reduce_vertices`], [`summarize`]) wired together by [`AnalysisPipeline`].

pub mod export;
pub mod fallback;
pub mod geometry;
pub mod normalize;
pub mod pipeline;
pub mod providers;
pub mod request;
pub mod response;
pub mod summary;

pub use export::{ExportDocument, export_file_name, write_export};
pub use fallback::{FallbackPolicy, fallback_result};
pub use geometry::{bounding_box, reduce_vertices};
pub use normalize::{normalize, normalize_response};
pub use pipeline::{AnalysisPipeline, PipelineOutcome, PipelineState};
pub use providers::VisionTransport;
pub use providers::google::GoogleVisionTransport;
pub use providers::mock::MockTransport;
pub use request::{AnnotateRequest, FeatureLimits, build_request, strip_data_url_prefix};
pub use response::{AnnotateResponse, parse_response};
pub use summary::summarize;
