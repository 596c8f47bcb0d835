pub mod candidate;
pub mod identifiers;

pub use candidate::{normalize_candidates, Candidate, CandidateQuery, LabeledCandidate, Level};
pub use identifiers::{CacheName, CacheNameError, ChipId, ContentDigest, RequestToken};
