mod graph;
mod service;
mod traversal;

pub use graph::SocialGraph;
pub use service::SocialService;
