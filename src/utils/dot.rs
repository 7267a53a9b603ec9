//! DOT (Graphviz) printers for the parse tree and the AST.
//!
//! Both printers emit a `digraph` with pre-order node ids starting at 0,
//! each node on its own line followed by the edges to its children. Parse
//! tree terminals are labeled with their source text, non-terminals with
//! their rule name; AST nodes are labeled by what they are.

use crate::frontend::ast::{Expr, Function, Stmt};
use crate::frontend::parse_tree::ParseNode;
use crate::utils::location::SourceCode;

/// Render a parse tree as a DOT graph.
pub fn parse_tree_to_dot(root: &ParseNode, source: &SourceCode) -> String {
    let mut printer = DotPrinter::new();
    let id = printer.allocate();
    printer.parse_node(id, root, source);
    printer.finish()
}

/// Render an AST as a DOT graph.
pub fn ast_to_dot(function: &Function) -> String {
    let mut printer = DotPrinter::new();
    let id = printer.allocate();
    printer.node(id, "Function");
    for statement in &function.statements {
        let child = printer.allocate();
        printer.edge(id, child);
        printer.statement(child, statement);
    }
    printer.finish()
}

struct DotPrinter {
    out: String,
    next_id: usize,
}

impl DotPrinter {
    fn new() -> Self {
        Self {
            out: "digraph {\n".to_string(),
            next_id: 0,
        }
    }

    fn finish(mut self) -> String {
        self.out.push_str("}\n");
        self.out
    }

    fn allocate(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn node(&mut self, id: usize, label: &str) {
        self.out.push_str(&format!("  {id} [label=\"{label}\"];\n"));
    }

    fn edge(&mut self, parent: usize, child: usize) {
        self.out.push_str(&format!("  {parent} -> {child};\n"));
    }

    fn parse_node(&mut self, id: usize, node: &ParseNode, source: &SourceCode) {
        match node {
            ParseNode::NonTerminal { rule, children, .. } => {
                self.node(id, rule.name());
                for child in children {
                    let child_id = self.allocate();
                    self.edge(id, child_id);
                    self.parse_node(child_id, child, source);
                }
            }
            terminal => {
                let text = source.span_text(terminal.span());
                self.node(id, &text);
            }
        }
    }

    fn statement(&mut self, id: usize, statement: &Stmt) {
        match statement {
            Stmt::Assignment { name, expr } => {
                self.node(id, "Assignment");
                let target = self.allocate();
                self.edge(id, target);
                self.node(target, &format!("Identifier: {name}"));
                let value = self.allocate();
                self.edge(id, value);
                self.expression(value, expr);
            }
            Stmt::Return { expr } => {
                self.node(id, "Return Statement");
                let value = self.allocate();
                self.edge(id, value);
                self.expression(value, expr);
            }
        }
    }

    fn expression(&mut self, id: usize, expr: &Expr) {
        match expr {
            Expr::Literal(value) => self.node(id, &format!("Literal: {value}")),
            Expr::Identifier(name) => self.node(id, &format!("Identifier: {name}")),
            Expr::Unary { op, child } => {
                self.node(id, &format!("Unary Operator: {op}"));
                let child_id = self.allocate();
                self.edge(id, child_id);
                self.expression(child_id, child);
            }
            Expr::Binary { op, left, right } => {
                self.node(id, &format!("Binary Operator: {op}"));
                let left_id = self.allocate();
                self.edge(id, left_id);
                self.expression(left_id, left);
                let right_id = self.allocate();
                self.edge(id, right_id);
                self.expression(right_id, right);
            }
        }
    }
}
