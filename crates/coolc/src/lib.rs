//! Cool compiler - semantic analysis front end
//!
//! This library validates the static structure of a parsed Cool program: a
//! class-based object-oriented language with a single-rooted inheritance
//! hierarchy. The parser runs upstream and hands over the syntax tree; code
//! generation runs downstream once the tree is known to be well-formed.
//!
//! ## Architecture
//!
//! - **AST** (`ast/`): the interned syntax tree and the ingestion layer for
//!   the parser's wire format
//! - **Symbols** (`symbols`): identifier interning and the predefined names
//! - **Sema** (`sema/`): class registry, inheritance-graph validation,
//!   per-class scope construction and the diagnostics sink
//! - **Common** (`common/`): shared infrastructure (errors)

pub mod ast;
pub mod common;
pub mod sema;
pub mod symbols;

// Re-exports for convenience
pub use common::{CompileError, CompileResult};
pub use sema::{Diagnostics, SemanticAnalyzer};
pub use symbols::{Ident, Interner, Predefined};
