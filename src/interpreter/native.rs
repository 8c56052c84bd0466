use std::collections::HashMap;
use std::sync::LazyLock;

use super::EnvironmentQuery;
use crate::parser::expression::CallArgument;

pub type NativeCall = fn(Option<&str>, &mut dyn EnvironmentQuery) -> f64;

/// A built-in function. At most one argument is ever consulted.
#[derive(Debug, Clone, Copy)]
pub struct NativeFunction {
    pub name: &'static str,
    /// Key of the consulted argument; `None` for nullary functions.
    pub parameter: Option<&'static str>,
    pub call: NativeCall,
}

const NATIVE_TABLE: &[NativeFunction] = &[
    NativeFunction {
        name: "現在時刻",
        parameter: None,
        call: |_, environment| environment.current_time(),
    },
    NativeFunction {
        name: "ファイル",
        parameter: Some("パス"),
        call: |path, environment| environment.count_directory_entries(path.unwrap_or_default()),
    },
];

pub static NATIVE_FUNCTIONS: LazyLock<HashMap<&'static str, NativeFunction>> =
    LazyLock::new(|| {
        NATIVE_TABLE
            .iter()
            .map(|function| (function.name, *function))
            .collect()
    });

pub fn lookup(name: &str) -> Option<&'static NativeFunction> {
    NATIVE_FUNCTIONS.get(name)
}

impl NativeFunction {
    /// The argument keyed with the parameter name, otherwise the first one.
    pub fn select_argument<'a>(&self, arguments: &'a [CallArgument]) -> Option<&'a CallArgument> {
        let parameter = self.parameter?;
        arguments
            .iter()
            .find(|argument| argument.key.as_deref() == Some(parameter))
            .or_else(|| arguments.first())
    }
}
