//! Semantic analysis
//!
//! Validates the static structure of a parsed program before any later
//! phase runs: class registration, inheritance-graph checks and per-class
//! scope construction. Expression-level type checking plugs in behind the
//! scope walk but is not performed here.

mod analyzer;
mod diagnostics;
mod inheritance;
mod registry;
mod scope;

pub use analyzer::SemanticAnalyzer;
pub use diagnostics::{Diagnostics, SemantError};
pub use inheritance::InheritanceGraph;
pub use registry::{AttrSig, ClassRegistry, FeatureIndex, MethodSig};
pub use scope::{Scope, ScopeBuilder};
