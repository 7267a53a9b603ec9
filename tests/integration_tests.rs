//! End-to-end tests for the whole pipeline, from source text to call
//! results, including the concurrency contract of the registry.

use pljit::frontend::{self, Expr, Stmt};
use pljit::transform;
use pljit::{Jit, SourceCode};
use std::thread;

#[test]
fn test_parenthesized_arithmetic() {
    let jit = Jit::new();
    let function = jit.register("BEGIN\nRETURN 12 * (8 - 5)\nEND.");
    assert_eq!(function.call(&[]), Some(36));
}

#[test]
fn test_unary_signs_cancel() {
    let jit = Jit::new();
    let function = jit.register("BEGIN\nRETURN +42 + -42\nEND.");
    assert_eq!(function.call(&[]), Some(0));
}

#[test]
fn test_constant_propagation_folds_whole_body() {
    let source = SourceCode::new("BEGIN\nRETURN +42 + -42\nEND.");
    let (mut function, symbols) = frontend::parse_and_analyze(&source).unwrap();
    transform::optimize(&mut function, &symbols);
    assert_eq!(
        function.statements,
        vec![Stmt::Return {
            expr: Expr::Literal(0)
        }]
    );
}

#[test]
fn test_parameters_variables_constants() {
    let jit = Jit::new();
    let function = jit.register(
        "PARAM a;\nVAR b;\nCONST e = 1;\nBEGIN\nb := 1 + 2;\nRETURN a * b + e\nEND.",
    );
    assert_eq!(function.call(&[5]), Some(16));
    assert_eq!(function.call(&[0]), Some(1));
}

#[test]
fn test_duplicate_declaration_rejected() {
    let jit = Jit::new();
    let function = jit.register("PARAM foo;\nVAR foo;\nBEGIN\nRETURN foo\nEND.");
    assert_eq!(function.call(&[1]), None);
}

#[test]
fn test_uninitialized_variable_rejected() {
    let jit = Jit::new();
    let function = jit.register("VAR foo;\nBEGIN\nRETURN foo\nEND.");
    assert_eq!(function.call(&[]), None);
}

#[test]
fn test_division_by_zero_compiles_but_never_yields() {
    let source = SourceCode::new("BEGIN\nRETURN 1 / 0\nEND.");
    assert!(frontend::parse_and_analyze(&source).is_ok());

    let jit = Jit::new();
    let function = jit.register("BEGIN\nRETURN 1 / 0\nEND.");
    assert_eq!(function.call(&[]), None);
    assert_eq!(function.call(&[]), None);
}

#[test]
fn test_optimization_pipeline_is_idempotent() {
    let source = SourceCode::new(
        "PARAM p;\nVAR a, b;\nBEGIN\na := 2 * 21;\nb := a + p;\nRETURN b;\nb := 0\nEND.",
    );
    let (mut function, symbols) = frontend::parse_and_analyze(&source).unwrap();
    transform::optimize(&mut function, &symbols);
    let once = function.clone();
    transform::optimize(&mut function, &symbols);
    assert_eq!(function, once);
    // dead statement after the return is gone, the constant is folded
    assert_eq!(function.statements.len(), 3);
    assert_eq!(function.statements[0].expr(), &Expr::Literal(42));
}

#[test]
fn test_dead_code_does_not_change_results() {
    let jit = Jit::new();
    let function = jit.register("VAR a;\nBEGIN\na := 1;\nRETURN a;\na := 2;\na := 3\nEND.");
    assert_eq!(function.call(&[]), Some(1));
}

#[test]
fn test_concurrent_calls_agree() {
    let jit = Jit::new();
    let function = jit.register("PARAM n;\nBEGIN\nRETURN n * n\nEND.");
    thread::scope(|scope| {
        let workers: Vec<_> = (0..8)
            .map(|i| scope.spawn(move || function.call(&[i])))
            .collect();
        for (i, worker) in workers.into_iter().enumerate() {
            assert_eq!(worker.join().unwrap(), Some((i * i) as i64));
        }
    });
}

#[test]
fn test_concurrent_calls_to_rejected_function() {
    let jit = Jit::new();
    let function = jit.register("BEGIN\nRETURN oops\nEND.");
    thread::scope(|scope| {
        let workers: Vec<_> = (0..4)
            .map(|_| scope.spawn(move || function.call(&[])))
            .collect();
        for worker in workers {
            assert_eq!(worker.join().unwrap(), None);
        }
    });
}

#[test]
fn test_concurrent_registration() {
    let jit = Jit::new();
    thread::scope(|scope| {
        let workers: Vec<_> = (0..4)
            .map(|i| {
                let jit = &jit;
                scope.spawn(move || {
                    let text = format!("BEGIN\nRETURN {i}\nEND.");
                    jit.register(&text).call(&[])
                })
            })
            .collect();
        for (i, worker) in workers.into_iter().enumerate() {
            assert_eq!(worker.join().unwrap(), Some(i as i64));
        }
    });
}

#[test]
fn test_whitespace_and_newlines_are_free_form() {
    let jit = Jit::new();
    let function = jit.register("PARAM a;BEGIN RETURN a END.");
    assert_eq!(function.call(&[3]), Some(3));
    let function = jit.register("PARAM a;\n\nBEGIN\n   RETURN\n a\nEND\n.");
    assert_eq!(function.call(&[3]), Some(3));
}
