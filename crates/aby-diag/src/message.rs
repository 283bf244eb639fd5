use std::fmt;

/// Separator placed between nested context names.
pub const CONTEXT_SEPARATOR: &str = " > ";

/// The two categories a message can be recorded under.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// Line prefix used by the textual output.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A recorded error or warning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    /// Context chain that produced the message, e.g. `root > function`.
    /// Empty when no context in the chain had a name.
    pub context: String,
    pub text: String,
}

impl Message {
    pub fn new(context: impl Into<String>, text: impl Into<String>) -> Self {
        Self { context: context.into(), text: text.into() }
    }

    /// Formats the message as a single output line, without the trailing newline.
    pub fn line(&self, severity: Severity) -> MessageLine<'_> {
        MessageLine { severity, message: self }
    }
}

/// `Display` adapter for `Severity : [context] : text`.
pub struct MessageLine<'a> {
    severity: Severity,
    message: &'a Message,
}

impl fmt::Display for MessageLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : [{}] : {}", self.severity, self.message.context, self.message.text)
    }
}

/// Joins a parent context name with the context name carried by a message.
///
/// Empty names vanish from the chain instead of leaving a dangling separator.
pub fn compose_name(parent: &str, child: &str) -> String {
    match (parent.is_empty(), child.is_empty()) {
        (true, _) => child.to_string(),
        (false, true) => parent.to_string(),
        (false, false) => format!("{parent}{CONTEXT_SEPARATOR}{child}"),
    }
}
