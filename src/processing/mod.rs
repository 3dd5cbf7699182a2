//! Text processing and matching module

pub mod entity_extractor;
pub mod experience;
pub mod lemmatizer;
pub mod matcher;
pub mod normalizer;
pub mod similarity;
pub mod vocabulary;

pub use matcher::{EntityProfile, MatchEngine, MatchReport};
pub use normalizer::{NormalizedText, Normalizer};
pub use vocabulary::Vocabulary;
