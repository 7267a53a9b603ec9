//! pljit: a just-in-time compiler for a tiny PL/0-style language.
//!
//! Source programs are registered with a [`Jit`] and compiled lazily on
//! their first call:
//!
//! ```text
//! source text
//!     |  lexer (on demand, token at a time)
//!     v
//! parse tree          concrete syntax, every terminal kept
//!     |  semantic analysis
//!     v
//! AST + symbol table  names resolved, initialization checked
//!     |  dead-code elimination, constant propagation
//!     v
//! evaluation          tree walk on a per-call context clone
//! ```
//!
//! Registration is cheap and thread-safe; each registered function is
//! compiled at most once no matter how many threads call it, and calls
//! evaluate without holding any lock.
//!
//! # Example
//!
//! ```
//! use pljit::Jit;
//!
//! let jit = Jit::new();
//! let function = jit.register("PARAM a, b;\nBEGIN\nRETURN a * b\nEND.");
//! assert_eq!(function.call(&[6, 7]), Some(42));
//! ```

#![warn(missing_docs)]

pub mod frontend;
pub mod jit;
pub mod runtime;
pub mod transform;
pub mod utils;

pub use jit::{FunctionHandle, Jit};
pub use runtime::EvaluationContext;
pub use utils::errors::CompileError;
pub use utils::location::{SourceCode, SourceSpan};

/// Commonly used types.
pub mod prelude {
    pub use crate::frontend::{Expr, Function, Stmt, SymbolTable};
    pub use crate::jit::{FunctionHandle, Jit};
    pub use crate::runtime::EvaluationContext;
    pub use crate::utils::errors::CompileError;
    pub use crate::utils::location::{SourceCode, SourceSpan};
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
