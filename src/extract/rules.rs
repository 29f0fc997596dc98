//! Line tokenizer and lexical signal classifier.
//!
//! Every transcript line is tested against a fixed set of marker rules:
//! - `决策：` / `decision:` → Decision
//! - `待办：` / `action:` → Task
//!
//! Lines matching no rule are noise and dropped without error.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

static DEFAULT_RULES: LazyLock<SignalRules> = LazyLock::new(SignalRules::default_rules);

/// Kind of signal a marker rule produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Decision,
    Task,
}

/// A classified transcript line carrying its captured content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    Decision(String),
    Task(String),
}

impl Signal {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Decision(_) => "decision",
            Self::Task(_) => "task",
        }
    }
}

/// A single marker rule with a compiled regex.
#[derive(Debug, Clone)]
pub struct SignalRule {
    /// What a match produces.
    pub kind: SignalKind,
    /// Compiled regex; capture group 2 is the signal content.
    pub regex: Regex,
}

/// Ordered marker rules. The first matching rule wins.
#[derive(Debug, Clone)]
pub struct SignalRules {
    rules: Vec<SignalRule>,
}

impl SignalRules {
    /// The standard bilingual decision/action markers.
    pub fn default_rules() -> Self {
        let rules = vec![
            SignalRule {
                kind: SignalKind::Decision,
                regex: Regex::new(r"(?i)^(decision|决策)\s*[:：]\s*(.+)$")
                    .expect("decision marker regex is valid"),
            },
            SignalRule {
                kind: SignalKind::Task,
                regex: Regex::new(r"(?i)^(action|待办)\s*[:：]\s*(.+)$")
                    .expect("action marker regex is valid"),
            },
        ];
        Self { rules }
    }

    /// Custom rules, tried in order.
    pub fn new(rules: Vec<SignalRule>) -> Self {
        Self { rules }
    }

    /// Shared instance of [`SignalRules::default_rules`].
    pub fn standard() -> &'static Self {
        &DEFAULT_RULES
    }

    /// Classify one already-trimmed line. `None` means noise.
    pub fn classify(&self, line: &str) -> Option<Signal> {
        for rule in &self.rules {
            let Some(caps) = rule.regex.captures(line) else {
                continue;
            };
            let Some(content) = caps.get(2).map(|m| m.as_str().trim()) else {
                continue;
            };
            if content.is_empty() {
                continue;
            }
            let signal = match rule.kind {
                SignalKind::Decision => Signal::Decision(content.to_string()),
                SignalKind::Task => Signal::Task(content.to_string()),
            };
            debug!(kind = signal.label(), content, "Line matched marker rule");
            return Some(signal);
        }
        None
    }

    /// Classify every line of a chunk, in line order.
    pub fn classify_chunk(&self, chunk: &str) -> Vec<Signal> {
        split_lines(chunk).filter_map(|line| self.classify(line)).collect()
    }
}

/// Split a chunk into trimmed, non-empty lines.
pub fn split_lines(chunk: &str) -> impl Iterator<Item = &str> {
    chunk.lines().map(str::trim).filter(|line| !line.is_empty())
}
