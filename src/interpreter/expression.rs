use log::debug;

use super::{
    diagnostic::Diagnostic, native, value::Value, DiagnosticSink, SystemContext,
};
use crate::parser::expression::{Expression, ExpressionNode, ExpressionNodeRef};

pub struct ExpressionEvaluator;

impl ExpressionEvaluator {
    pub fn evaluate_expression<C: SystemContext>(tree: &Expression, context: &mut C) -> Value {
        Self::evaluate_expression_node(tree, tree.get_root_ref(), context)
    }

    fn evaluate_expression_node<C: SystemContext>(
        tree: &Expression,
        node: ExpressionNodeRef,
        context: &mut C,
    ) -> Value {
        let current_node = tree
            .get_node(node)
            .expect("Node ref came from the tree so it must exist.");
        let line = tree.get_line(node).unwrap_or_default();

        match current_node {
            ExpressionNode::Atom(atom) => Value::from_literal(&atom.literal),
            ExpressionNode::Group { inner } => {
                Self::evaluate_expression_node(tree, *inner, context)
            }
            ExpressionNode::Relational { operator, lhs, rhs } => {
                let lhs = Self::evaluate_expression_node(tree, *lhs, context);
                let rhs = Self::evaluate_expression_node(tree, *rhs, context);
                let lhs = Self::coerce_number(&lhs, line, context);
                let rhs = Self::coerce_number(&rhs, line, context);
                Value::Bool(operator.compare(lhs, rhs))
            }
            ExpressionNode::Logical { operator, lhs, rhs } => {
                // Both sides always run, so calls on the right are never skipped.
                let lhs = Self::evaluate_expression_node(tree, *lhs, context);
                let rhs = Self::evaluate_expression_node(tree, *rhs, context);
                let lhs = Self::coerce_bool(&lhs, line, context);
                let rhs = Self::coerce_bool(&rhs, line, context);
                Value::Bool(operator.combine(lhs, rhs))
            }
            ExpressionNode::Call {
                name,
                arguments,
                line,
            } => {
                let Some(function) = native::lookup(name) else {
                    context.report(Diagnostic::UnknownFunction {
                        name: name.clone(),
                        line: *line,
                    });
                    return Value::Number(0.0);
                };
                let argument = function
                    .select_argument(arguments)
                    .map(|argument| {
                        Self::evaluate_expression_node(tree, argument.value, context).to_string()
                    });
                debug!("[line {line}] calling {name} with {argument:?}");
                Value::Number((function.call)(argument.as_deref(), context))
            }
        }
    }

    /// Reads `value` as a number, reporting and using `0` when it is not one.
    pub fn coerce_number<D: DiagnosticSink>(value: &Value, line: u32, diagnostics: &mut D) -> f64 {
        value.as_number().unwrap_or_else(|error| {
            diagnostics.report(Diagnostic::Coercion { error, line });
            0.0
        })
    }

    /// Reads `value` as a boolean, reporting and using `false` when it is not one.
    pub fn coerce_bool<D: DiagnosticSink>(value: &Value, line: u32, diagnostics: &mut D) -> bool {
        value.as_bool().unwrap_or_else(|error| {
            diagnostics.report(Diagnostic::Coercion { error, line });
            false
        })
    }
}
