//! Shared utilities: error types, source locations, debug printers.

pub mod dot;
pub mod errors;
pub mod location;

pub use errors::{CompileError, LexicalError, RuntimeError, SemanticError, SyntaxError};
pub use location::{SourceCode, SourceSpan};
