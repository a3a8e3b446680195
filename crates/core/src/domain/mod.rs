pub mod derivation;
pub mod operators;
pub mod sources;

pub use derivation::{Combination, Derivation};
pub use operators::Operator;
pub use sources::{SourceNumber, SourceSet};
