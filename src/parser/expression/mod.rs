mod operator;
mod tree;

pub use operator::{InfixOperator, LogicalOperator, RelationalOperator};
pub use tree::{
    CallArgument, Expression, ExpressionAtom, ExpressionNode, ExpressionNodeRef,
    IncompleteExpression, Literal, LiteralKind,
};
