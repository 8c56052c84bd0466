use compact_str::CompactString;
use log::warn;
use std::collections::HashMap;

use super::{diagnostic::Diagnostic, ActionSink, DiagnosticSink, DialogueSink, EnvironmentQuery};

/// Forwards every diagnostic to the `log` facade as a warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl DiagnosticSink for LogDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        warn!("{diagnostic}");
    }
}

/// Prints dialogue to standard output, optionally as `【speaker】text`.
#[derive(Debug, Default, Clone)]
pub struct StdoutDialogue {
    speaker: Option<CompactString>,
}

impl StdoutDialogue {
    pub fn new(speaker: Option<&str>) -> Self {
        Self {
            speaker: speaker.map(CompactString::from),
        }
    }
}

impl DialogueSink for StdoutDialogue {
    fn on_dialogue(&mut self, text: &str) {
        match self.speaker {
            Some(ref speaker) => println!("【{speaker}】{text}"),
            None => println!("{text}"),
        }
    }
}

/// Bundles one implementation of each sink into a single context.
#[derive(Debug)]
pub struct HostContext<D, A, E, G> {
    pub dialogue: D,
    pub actions: A,
    pub environment: E,
    pub diagnostics: G,
}

impl<D, A, E, G> HostContext<D, A, E, G> {
    pub fn new(dialogue: D, actions: A, environment: E, diagnostics: G) -> Self {
        Self {
            dialogue,
            actions,
            environment,
            diagnostics,
        }
    }
}

impl<D: DialogueSink, A, E, G> DialogueSink for HostContext<D, A, E, G> {
    fn on_dialogue(&mut self, text: &str) {
        self.dialogue.on_dialogue(text);
    }
}

impl<D, A: ActionSink, E, G> ActionSink for HostContext<D, A, E, G> {
    fn set_input_blocked(&mut self, blocked: bool) {
        self.actions.set_input_blocked(blocked);
    }

    fn open_path(&mut self, path: &str) {
        self.actions.open_path(path);
    }
}

impl<D, A, E: EnvironmentQuery, G> EnvironmentQuery for HostContext<D, A, E, G> {
    fn count_directory_entries(&mut self, path: &str) -> f64 {
        self.environment.count_directory_entries(path)
    }

    fn current_time(&mut self) -> f64 {
        self.environment.current_time()
    }
}

impl<D, A, E, G: DiagnosticSink> DiagnosticSink for HostContext<D, A, E, G> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.report(diagnostic);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Dialogue(CompactString),
    InputBlocked(bool),
    OpenPath(CompactString),
    DirectoryQuery(CompactString),
    ClockQuery,
    Diagnostic(Diagnostic),
}

/// A context that touches nothing and remembers everything, in order.
///
/// Directory sizes come from a table set up front; unknown paths count as
/// empty. The clock is fixed.
#[derive(Debug, Default, Clone)]
pub struct RecordingContext {
    events: Vec<Event>,
    directories: HashMap<CompactString, f64>,
    time: f64,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_directory(mut self, path: &str, entries: usize) -> Self {
        self.directories.insert(CompactString::from(path), entries as f64);
        self
    }

    pub fn with_time(mut self, hhmm: f64) -> Self {
        self.time = hhmm;
        self
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn dialogue(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Dialogue(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn diagnostics(&self) -> Vec<&Diagnostic> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Diagnostic(diagnostic) => Some(diagnostic),
                _ => None,
            })
            .collect()
    }

    /// Only the events that reached the action sink.
    pub fn actions(&self) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|event| matches!(event, Event::InputBlocked(_) | Event::OpenPath(_)))
            .collect()
    }

    pub fn directory_queries(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, Event::DirectoryQuery(_)))
            .count()
    }
}

impl DialogueSink for RecordingContext {
    fn on_dialogue(&mut self, text: &str) {
        self.events.push(Event::Dialogue(CompactString::from(text)));
    }
}

impl ActionSink for RecordingContext {
    fn set_input_blocked(&mut self, blocked: bool) {
        self.events.push(Event::InputBlocked(blocked));
    }

    fn open_path(&mut self, path: &str) {
        self.events.push(Event::OpenPath(CompactString::from(path)));
    }
}

impl EnvironmentQuery for RecordingContext {
    fn count_directory_entries(&mut self, path: &str) -> f64 {
        self.events
            .push(Event::DirectoryQuery(CompactString::from(path)));
        self.directories.get(path).copied().unwrap_or_default()
    }

    fn current_time(&mut self) -> f64 {
        self.events.push(Event::ClockQuery);
        self.time
    }
}

impl DiagnosticSink for RecordingContext {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.events.push(Event::Diagnostic(diagnostic));
    }
}
