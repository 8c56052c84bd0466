use compact_str::CompactString;

use super::{LogicalOperator, RelationalOperator};
use crate::string::strip_quotes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Number,
    String,
    /// A bare identifier used as a value.
    Word,
}

/// A literal exactly as written in the script. String literals keep their
/// `「」` markers until they are evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub kind: LiteralKind,
    pub text: CompactString,
}

impl Literal {
    pub fn new(kind: LiteralKind, text: impl Into<CompactString>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn number(text: impl Into<CompactString>) -> Self {
        Self::new(LiteralKind::Number, text)
    }

    pub fn string(text: impl Into<CompactString>) -> Self {
        Self::new(LiteralKind::String, text)
    }

    pub fn word(text: impl Into<CompactString>) -> Self {
        Self::new(LiteralKind::Word, text)
    }

    /// The text handed to commands: quoted strings lose their markers, every
    /// other literal keeps its source spelling.
    pub fn as_argument_text(&self) -> &str {
        match self.kind {
            LiteralKind::String => strip_quotes(&self.text).unwrap_or(self.text.as_str()),
            LiteralKind::Number | LiteralKind::Word => self.text.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionAtom {
    pub literal: Literal,
    pub line: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpressionNodeRef(pub u32);

#[derive(Debug, Clone, PartialEq)]
pub struct CallArgument {
    pub key: Option<CompactString>,
    pub value: ExpressionNodeRef,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionNode {
    Atom(ExpressionAtom),
    Group {
        inner: ExpressionNodeRef,
    },
    Relational {
        operator: RelationalOperator,
        lhs: ExpressionNodeRef,
        rhs: ExpressionNodeRef,
    },
    Logical {
        operator: LogicalOperator,
        lhs: ExpressionNodeRef,
        rhs: ExpressionNodeRef,
    },
    Call {
        name: CompactString,
        arguments: Vec<CallArgument>,
        line: u32,
    },
}

/// Node storage while an expression is still being built.
#[derive(Debug, Clone, Default)]
pub struct IncompleteExpression {
    nodes: Vec<ExpressionNode>,
}

impl IncompleteExpression {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn push(&mut self, node: ExpressionNode) -> ExpressionNodeRef {
        self.nodes.push(node);
        ExpressionNodeRef(self.nodes.len() as u32 - 1)
    }

    pub fn atom(&mut self, literal: Literal, line: u32) -> ExpressionNodeRef {
        self.push(ExpressionNode::Atom(ExpressionAtom { literal, line }))
    }

    pub fn get_node(&self, index: ExpressionNodeRef) -> Option<&ExpressionNode> {
        self.nodes.get(index.0 as usize)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    nodes: Vec<ExpressionNode>,
    root: ExpressionNodeRef,
}

impl Expression {
    pub fn new(tree: IncompleteExpression, root: ExpressionNodeRef) -> Option<Self> {
        if !(0..tree.nodes.len()).contains(&(root.0 as usize)) {
            None
        } else {
            Some(Self {
                nodes: tree.nodes,
                root,
            })
        }
    }

    pub fn get_root_ref(&self) -> ExpressionNodeRef {
        self.root
    }

    pub fn get_root(&self) -> &ExpressionNode {
        self.get_node(self.get_root_ref())
            .expect("The root exists within the tree.")
    }

    pub fn get_node(&self, node: ExpressionNodeRef) -> Option<&ExpressionNode> {
        self.nodes.get(node.0 as usize)
    }

    pub fn get_line(&self, node: ExpressionNodeRef) -> Option<u32> {
        match self.get_node(node)? {
            ExpressionNode::Atom(ExpressionAtom { line, .. }) => Some(*line),
            ExpressionNode::Call { line, .. } => Some(*line),
            ExpressionNode::Group { inner } => self.get_line(*inner),
            ExpressionNode::Relational { lhs, .. } => self.get_line(*lhs),
            ExpressionNode::Logical { lhs, .. } => self.get_line(*lhs),
        }
    }
}
