// Resume scan: the end-to-end pipeline, rule-based suggestions and job recommendations.
// Handlers are the only async code here; everything else is synchronous.

pub mod handlers;
pub mod pipeline;
pub mod recommender;
pub mod suggestions;

pub use recommender::JobIndex;
