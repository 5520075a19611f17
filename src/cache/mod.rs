pub mod candidate_set;

pub use candidate_set::{CandidateSet, Observation};
