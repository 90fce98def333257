// Semantic skill matching and ATS scoring.
// Embedding goes through the SkillEmbedder trait; nothing here talks to fastembed directly.

pub mod embedder;
pub mod scorer;
pub mod semantic;

pub use embedder::{CachedEmbedder, EmbeddingError, FastEmbedder, SkillEmbedder};
pub use scorer::{calculate_score, ScoreResult, ScoreWeights};
pub use semantic::{semantic_match, SkillMatch, DEFAULT_MATCH_THRESHOLD};
