use std::sync::Arc;

use crate::config::Config;
use crate::matching::SkillEmbedder;
use crate::scan::JobIndex;
use crate::skills::SkillTaxonomy;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Everything here is built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub taxonomy: Arc<SkillTaxonomy>,
    /// Skill sets of the job corpus. Rebuilt only on restart.
    pub job_index: Arc<JobIndex>,
    /// Pluggable embedder. Default: FastEmbedder, optionally behind CachedEmbedder.
    pub embedder: Arc<dyn SkillEmbedder>,
}
