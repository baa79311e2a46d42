mod graph;
mod retrieval;
mod scoring;
mod service;

pub use graph::SimilarityGraph;
pub use scoring::{similarity, SIMILARITY_THRESHOLD};
pub use service::SimilarityService;
