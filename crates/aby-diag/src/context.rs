use crate::message::{compose_name, Message};

/// A named group of errors and warnings.
///
/// Insertion order is preserved within each list. Messages are never
/// reordered or deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    name: String,
    errors: Vec<Message>,
    warnings: Vec<Message>,
}

impl ErrorContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), errors: Vec::new(), warnings: Vec::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds an error tagged with this context's name.
    pub fn add_error(&mut self, text: impl Into<String>) {
        self.errors.push(Message::new(self.name.clone(), text));
    }

    /// Adds several errors, in order, each tagged with this context's name.
    pub fn add_errors<I, S>(&mut self, texts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = &self.name;
        self.errors
            .extend(texts.into_iter().map(|t| Message::new(name.clone(), t)));
    }

    /// Adds a warning tagged with this context's name.
    pub fn add_warning(&mut self, text: impl Into<String>) {
        self.warnings.push(Message::new(self.name.clone(), text));
    }

    /// Adds several warnings, in order, each tagged with this context's name.
    pub fn add_warnings<I, S>(&mut self, texts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = &self.name;
        self.warnings
            .extend(texts.into_iter().map(|t| Message::new(name.clone(), t)));
    }

    /// Ingests errors recorded by another context.
    ///
    /// Each message keeps its text; its context becomes `self.name > message.context`.
    pub fn merge_errors<I>(&mut self, messages: I)
    where
        I: IntoIterator<Item = Message>,
    {
        let name = &self.name;
        self.errors.extend(messages.into_iter().map(|m| compose(name, m)));
    }

    /// Ingests warnings recorded by another context. See [`merge_errors`](Self::merge_errors).
    pub fn merge_warnings<I>(&mut self, messages: I)
    where
        I: IntoIterator<Item = Message>,
    {
        let name = &self.name;
        self.warnings.extend(messages.into_iter().map(|m| compose(name, m)));
    }

    pub fn errors(&self) -> &[Message] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Message] {
        &self.warnings
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Splits the context into its error and warning lists.
    pub(crate) fn into_messages(self) -> (Vec<Message>, Vec<Message>) {
        (self.errors, self.warnings)
    }
}

fn compose(parent: &str, m: Message) -> Message {
    Message { context: compose_name(parent, &m.context), text: m.text }
}
