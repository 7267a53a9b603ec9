//! Function registry with lazy, at-most-once compilation.
//!
//! Registration only stores source text. The first call compiles the
//! function under a per-entry lock with a double-checked compiled flag, so
//! concurrent first calls compile exactly once; a failed compilation is
//! cached the same way and every later call fails fast. Evaluation itself
//! happens after all locks are released, on a clone of the entry's template
//! context.

use crate::frontend::ast::Function;
use crate::frontend::parser::Parser;
use crate::frontend::semantic;
use crate::runtime::EvaluationContext;
use crate::transform;
use crate::utils::errors::{CompileError, RuntimeError};
use crate::utils::location::SourceCode;
use log::{debug, info};
use std::sync::{Arc, Mutex};

/// The function registry.
#[derive(Default)]
pub struct Jit {
    entries: Mutex<Vec<Arc<Entry>>>,
}

/// One registered function.
struct Entry {
    source: SourceCode,
    state: Mutex<EntryState>,
}

/// Compilation state of an entry, guarded by the entry lock.
#[derive(Default)]
struct EntryState {
    /// Set after the first compilation attempt, successful or not
    compiled: bool,
    /// The compiled function; `None` once `compiled` is set means the
    /// source was rejected and stays rejected
    artifact: Option<Artifact>,
}

/// Everything a call needs once compilation is done. Cloning is cheap: the
/// AST is shared, only the template context is deep-copied per call.
#[derive(Clone)]
struct Artifact {
    function: Arc<Function>,
    template: EvaluationContext,
    parameters: Arc<[String]>,
}

/// Handle to a registered function, used to call it.
#[derive(Clone, Copy)]
pub struct FunctionHandle<'a> {
    jit: &'a Jit,
    index: usize,
}

impl Jit {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register source code without compiling it.
    pub fn register(&self, source: &str) -> FunctionHandle<'_> {
        let mut entries = self.entries.lock().unwrap();
        let index = entries.len();
        debug!("registering function {index} ({} bytes of source)", source.len());
        entries.push(Arc::new(Entry {
            source: SourceCode::new(source),
            state: Mutex::default(),
        }));
        FunctionHandle { jit: self, index }
    }
}

impl FunctionHandle<'_> {
    /// Call the function with positional arguments, compiling it first if
    /// this is the first call.
    ///
    /// Returns `None` when the source does not compile, when the argument
    /// count does not match the parameter count, or when evaluation divides
    /// by zero; diagnostics have gone to stderr in each case.
    pub fn call(&self, arguments: &[i64]) -> Option<i64> {
        let artifact = self.compiled_artifact()?;

        if arguments.len() != artifact.parameters.len() {
            eprintln!(
                "Expected {} arguments, got {}",
                artifact.parameters.len(),
                arguments.len()
            );
            return None;
        }

        // no locks held from here on; the call owns its context
        let mut context = artifact.template.clone();
        for (name, value) in artifact.parameters.iter().zip(arguments) {
            context.set_value(name, *value);
        }
        let result = artifact.function.evaluate(&mut context);
        if context.division_by_zero() {
            eprintln!("{}", RuntimeError::DivisionByZero);
            return None;
        }
        Some(result)
    }

    /// Fetch the entry's artifact, compiling on first use. Lock order is
    /// registry first, then entry; both are released before returning.
    fn compiled_artifact(&self) -> Option<Artifact> {
        let entries = self.jit.entries.lock().unwrap();
        let entry = &entries[self.index];
        let mut state = entry.state.lock().unwrap();
        if !state.compiled {
            state.artifact = match compile(&entry.source) {
                Ok(artifact) => {
                    info!("function {} compiled", self.index);
                    Some(artifact)
                }
                Err(error) => {
                    debug!("function {} rejected: {error}", self.index);
                    None
                }
            };
            state.compiled = true;
        }
        state.artifact.clone()
    }
}

/// Run the full pipeline on one source program.
fn compile(source: &SourceCode) -> Result<Artifact, CompileError> {
    let tree = Parser::new(source).parse_function_definition()?;
    let (mut function, symbols) = semantic::analyze(&tree, source)?;
    transform::optimize(&mut function, &symbols);
    let parameters: Arc<[String]> = symbols.parameters().map(str::to_string).collect();
    Ok(Artifact {
        function: Arc::new(function),
        template: EvaluationContext::new(&symbols),
        parameters,
    })
}
