use compact_str::CompactString;

use super::expression::{Expression, Literal};

/// Key of a command argument. Arguments written without a key are stored
/// under [`ArgKey::DEFAULT`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArgKey(CompactString);

impl ArgKey {
    pub const DEFAULT: &'static str = "default";

    pub fn named(name: impl Into<CompactString>) -> Self {
        Self(name.into())
    }

    pub fn default_key() -> Self {
        Self(CompactString::new(Self::DEFAULT))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ArgKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Keyword arguments of a command in source order.
///
/// Inserting an existing key replaces its value in place, so the last
/// occurrence in the source wins while the first position is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    entries: Vec<(ArgKey, Literal)>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: ArgKey, value: Literal) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Literal> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.as_str() == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ArgKey, &Literal)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(ArgKey, Literal)> for Arguments {
    fn from_iter<T: IntoIterator<Item = (ArgKey, Literal)>>(iter: T) -> Self {
        let mut arguments = Self::new();
        for (key, value) in iter {
            arguments.insert(key, value);
        }
        arguments
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DialogueStatement {
    /// The quoted text, markers included.
    pub text: CompactString,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandStatement {
    pub name: CompactString,
    pub arguments: Arguments,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalStatement {
    pub condition: Expression,
    pub body: Box<Statement>,
    /// Label of a `→` clause. Parsed so existing scripts load, never followed.
    pub jump: Option<CompactString>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Dialogue(DialogueStatement),
    Command(CommandStatement),
    Conditional(ConditionalStatement),
}

impl Statement {
    pub fn line(&self) -> u32 {
        match self {
            Statement::Dialogue(stmt) => stmt.line,
            Statement::Command(stmt) => stmt.line,
            Statement::Conditional(stmt) => stmt.line,
        }
    }
}

/// The root of a parsed script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn get_statement(&self, index: usize) -> Option<&Statement> {
        self.statements.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
