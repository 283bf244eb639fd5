use std::fmt;
use std::io;
use std::mem;

use crate::context::ErrorContext;
use crate::message::{Message, Severity};

/// A stack of [`ErrorContext`]s.
///
/// The stack is never empty: the current context lives in `top`, the ones
/// underneath in `below` (bottom first). Only `top` receives new messages and
/// only `top` is inspected or written out; deeper contexts become visible once
/// they are folded upwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorAggregator {
    top: ErrorContext,
    below: Vec<ErrorContext>,
}

impl Default for ErrorAggregator {
    fn default() -> Self {
        Self::new("")
    }
}

impl ErrorAggregator {
    /// Creates an aggregator whose root context is named `root`.
    pub fn new(root: impl Into<String>) -> Self {
        Self { top: ErrorContext::new(root), below: Vec::new() }
    }

    /// Number of contexts on the stack. Always at least 1.
    pub fn depth(&self) -> usize {
        self.below.len() + 1
    }

    /// Pushes a new, empty context that becomes the current one.
    pub fn push(&mut self, name: impl Into<String>) {
        let previous = mem::replace(&mut self.top, ErrorContext::new(name));
        self.below.push(previous);
    }

    /// Imports everything `other` has recorded as one new anonymous context.
    ///
    /// `other` is collapsed on a private copy, so its nested context names are
    /// kept in the composed message names and `other` itself is left untouched.
    pub fn push_from(&mut self, other: &ErrorAggregator) {
        let mut collapsed = other.clone();
        while collapsed.depth() > 1 {
            collapsed.fold();
        }

        let (errors, warnings) = collapsed.top.into_messages();
        self.push("");
        self.top.merge_errors(errors);
        self.top.merge_warnings(warnings);
    }

    /// Removes the current context and returns it.
    ///
    /// Popping the last context leaves a fresh anonymous one in its place.
    pub fn pop(&mut self) -> ErrorContext {
        let next = self.below.pop().unwrap_or_default();
        mem::replace(&mut self.top, next)
    }

    /// Merges the current context into the one underneath.
    pub fn fold(&mut self) {
        let (errors, warnings) = self.pop().into_messages();
        self.top.merge_errors(errors);
        self.top.merge_warnings(warnings);
    }

    /// Like [`fold`](Self::fold), but warnings are promoted to errors.
    pub fn fold_to_error(&mut self) {
        let (errors, warnings) = self.pop().into_messages();
        self.top.merge_errors(errors);
        self.top.merge_errors(warnings);
    }

    /// Like [`fold`](Self::fold), but errors are demoted to warnings.
    pub fn fold_to_warning(&mut self) {
        let (errors, warnings) = self.pop().into_messages();
        self.top.merge_warnings(errors);
        self.top.merge_warnings(warnings);
    }

    pub fn add_error(&mut self, text: impl Into<String>) {
        self.top.add_error(text);
    }

    pub fn add_errors<I, S>(&mut self, texts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.top.add_errors(texts);
    }

    pub fn add_warning(&mut self, text: impl Into<String>) {
        self.top.add_warning(text);
    }

    pub fn add_warnings<I, S>(&mut self, texts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.top.add_warnings(texts);
    }

    pub fn current_context(&self) -> &ErrorContext {
        &self.top
    }

    /// Whether the current context holds errors. Unfolded contexts are not consulted.
    pub fn has_errors(&self) -> bool {
        self.top.has_errors()
    }

    /// Whether the current context holds warnings. Unfolded contexts are not consulted.
    pub fn has_warnings(&self) -> bool {
        self.top.has_warnings()
    }

    /// Drops every context and starts over with a single context named `name`.
    pub fn clear(&mut self, name: impl Into<String>) {
        self.below.clear();
        self.top = ErrorContext::new(name);
    }

    /// Writes the errors, then the warnings, of the current context.
    pub fn write_to<W: io::Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        self.write_errors_to(out)?;
        self.write_warnings_to(out)
    }

    pub fn write_errors_to<W: io::Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        write_lines(out, Severity::Error, self.top.errors())
    }

    pub fn write_warnings_to<W: io::Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        write_lines(out, Severity::Warning, self.top.warnings())
    }

    /// Emits the current context through the `log` facade: errors at `error`
    /// level, warnings at `warn` level.
    pub fn report(&self) {
        for m in self.top.errors() {
            log::error!("{}", m.line(Severity::Error));
        }
        for m in self.top.warnings() {
            log::warn!("{}", m.line(Severity::Warning));
        }
    }
}

fn write_lines<W: io::Write + ?Sized>(
    out: &mut W,
    severity: Severity,
    messages: &[Message],
) -> io::Result<()> {
    for m in messages {
        writeln!(out, "{}", m.line(severity))?;
    }
    Ok(())
}

impl fmt::Display for ErrorAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in self.top.errors() {
            writeln!(f, "{}", m.line(Severity::Error))?;
        }
        for m in self.top.warnings() {
            writeln!(f, "{}", m.line(Severity::Warning))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contexts(list: &[Message]) -> Vec<&str> {
        list.iter().map(|m| m.context.as_str()).collect()
    }

    fn texts(list: &[Message]) -> Vec<&str> {
        list.iter().map(|m| m.text.as_str()).collect()
    }

    fn written(diag: &ErrorAggregator) -> String {
        let mut buf = Vec::new();
        diag.write_to(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    // ── push / pop ────────────────────────────────────────────────────────

    #[test]
    fn new_has_single_named_context() {
        let diag = ErrorAggregator::new("root");
        assert_eq!(diag.depth(), 1);
        assert_eq!(diag.current_context().name(), "root");
        assert!(!diag.has_errors());
        assert!(!diag.has_warnings());
    }

    #[test]
    fn default_root_is_anonymous() {
        assert_eq!(ErrorAggregator::default().current_context().name(), "");
    }

    #[test]
    fn push_then_pop_restores_depth() {
        let mut diag = ErrorAggregator::new("root");
        diag.push("a");
        let before = diag.depth();

        diag.push("");
        let popped = diag.pop();

        assert_eq!(popped, ErrorContext::new(""));
        assert_eq!(diag.depth(), before);
        assert_eq!(diag.current_context().name(), "a");
    }

    #[test]
    fn popping_last_context_recreates_anonymous_one() {
        let mut diag = ErrorAggregator::new("root");
        diag.add_error("e");
        diag.add_warning("w");

        let popped = diag.pop();

        assert_eq!(popped.name(), "root");
        assert_eq!(texts(popped.errors()), ["e"]);
        assert_eq!(texts(popped.warnings()), ["w"]);

        assert_eq!(diag.depth(), 1);
        assert_eq!(diag.current_context(), &ErrorContext::new(""));
    }

    #[test]
    fn repeated_pop_never_underflows() {
        let mut diag = ErrorAggregator::default();
        for _ in 0..3 {
            diag.pop();
            assert_eq!(diag.depth(), 1);
        }
    }

    #[test]
    fn insertions_go_to_top_only() {
        let mut diag = ErrorAggregator::new("root");
        diag.add_error("root error");
        diag.push("child");
        diag.add_errors(["a", "b"]);
        diag.add_warnings(["w"]);

        assert_eq!(contexts(diag.current_context().errors()), ["child", "child"]);
        assert_eq!(texts(diag.current_context().warnings()), ["w"]);

        let child = diag.pop();
        assert_eq!(child.errors().len(), 2);
        assert_eq!(texts(diag.current_context().errors()), ["root error"]);
    }

    // ── fold ──────────────────────────────────────────────────────────────

    #[test]
    fn fold_composes_named_contexts() {
        let mut diag = ErrorAggregator::new("A");
        diag.add_error("parent");
        diag.push("B");
        diag.add_error("child");
        diag.add_warning("child warning");
        diag.fold();

        assert_eq!(diag.depth(), 1);
        let top = diag.current_context();
        assert_eq!(texts(top.errors()), ["parent", "child"]);
        assert_eq!(contexts(top.errors()), ["A", "A > B"]);
        assert_eq!(contexts(top.warnings()), ["A > B"]);
    }

    #[test]
    fn fold_anonymous_child_into_named_parent() {
        let mut diag = ErrorAggregator::new("A");
        diag.push("");
        diag.add_error("x");
        diag.fold();

        assert_eq!(contexts(diag.current_context().errors()), ["A"]);
    }

    #[test]
    fn fold_named_child_into_anonymous_parent() {
        let mut diag = ErrorAggregator::new("");
        diag.push("B");
        diag.add_warning("x");
        diag.fold();

        assert_eq!(contexts(diag.current_context().warnings()), ["B"]);
    }

    #[test]
    fn nested_folds_accumulate_names() {
        let mut diag = ErrorAggregator::new("root");
        diag.push("function");
        diag.push("innerBlock");
        diag.add_error("deep");
        diag.fold();
        diag.fold();

        assert_eq!(contexts(diag.current_context().errors()), ["root > function > innerBlock"]);
    }

    #[test]
    fn fold_on_single_context_moves_messages_into_fresh_root() {
        let mut diag = ErrorAggregator::new("root");
        diag.add_error("e");
        diag.fold();

        assert_eq!(diag.depth(), 1);
        assert_eq!(diag.current_context().name(), "");
        assert_eq!(contexts(diag.current_context().errors()), ["root"]);
    }

    #[test]
    fn fold_to_error_promotes_warnings() {
        let mut diag = ErrorAggregator::new("parent");
        diag.add_error("p-e");
        diag.add_warning("p-w");
        diag.push("child");
        diag.add_warning("c-w");
        diag.add_error("c-e");
        diag.fold_to_error();

        let top = diag.current_context();
        assert_eq!(texts(top.errors()), ["p-e", "c-e", "c-w"]);
        assert_eq!(texts(top.warnings()), ["p-w"]);
        assert_eq!(contexts(&top.errors()[1..]), ["parent > child"; 2]);
    }

    #[test]
    fn fold_to_warning_demotes_errors() {
        let mut diag = ErrorAggregator::new("parent");
        diag.add_error("p-e");
        diag.push("child");
        diag.add_warning("c-w");
        diag.add_error("c-e");
        diag.fold_to_warning();

        let top = diag.current_context();
        assert_eq!(texts(top.errors()), ["p-e"]);
        assert_eq!(texts(top.warnings()), ["c-e", "c-w"]);
    }

    // ── push_from ─────────────────────────────────────────────────────────

    #[test]
    fn push_from_collapses_other_into_one_context() {
        let mut other = ErrorAggregator::new("root");
        other.push("fn");
        other.add_error("failed");
        let snapshot = other.clone();

        let mut diag = ErrorAggregator::new("main");
        diag.push_from(&other);

        assert_eq!(diag.depth(), 2);
        let top = diag.current_context();
        assert_eq!(top.name(), "");
        assert_eq!(texts(top.errors()), ["failed"]);
        assert_eq!(contexts(top.errors()), ["root > fn"]);
        assert_eq!(other, snapshot);
    }

    #[test]
    fn push_from_keeps_every_level() {
        let mut other = ErrorAggregator::new("root");
        other.add_error("at root");
        other.add_warning("root warning");
        other.push("fn");
        other.add_error("in fn");

        let mut diag = ErrorAggregator::default();
        diag.push_from(&other);

        let top = diag.current_context();
        assert_eq!(contexts(top.errors()), ["root", "root > fn"]);
        assert_eq!(contexts(top.warnings()), ["root"]);
    }

    #[test]
    fn push_from_then_fold_prefixes_receiver_name() {
        let mut other = ErrorAggregator::new("loader");
        other.add_warning("slow");

        let mut diag = ErrorAggregator::new("game");
        diag.push_from(&other);
        diag.fold();

        assert_eq!(contexts(diag.current_context().warnings()), ["game > loader"]);
    }

    // ── queries / clear ───────────────────────────────────────────────────

    #[test]
    fn has_errors_only_looks_at_top() {
        let mut diag = ErrorAggregator::new("root");
        diag.add_error("hidden soon");
        diag.push("child");
        assert!(!diag.has_errors());

        diag.fold();
        assert!(diag.has_errors());
    }

    #[test]
    fn clear_resets_everything() {
        let mut diag = ErrorAggregator::new("root");
        diag.add_error("e");
        diag.push("a");
        diag.add_warning("w");
        diag.push("b");

        diag.clear("x");

        assert_eq!(diag.depth(), 1);
        assert_eq!(diag.current_context(), &ErrorContext::new("x"));
    }

    // ── output ────────────────────────────────────────────────────────────

    #[test]
    fn write_to_lists_errors_then_warnings() {
        let mut diag = ErrorAggregator::new("root");
        diag.add_warning("w1");
        diag.add_error("e1");
        diag.push("fn");
        diag.add_error("e2");
        diag.fold();

        assert_eq!(
            written(&diag),
            "Error : [root] : e1\nError : [root > fn] : e2\nWarning : [root] : w1\n"
        );
    }

    #[test]
    fn write_single_category() {
        let mut diag = ErrorAggregator::new("");
        diag.add_error("e");
        diag.add_warning("w");

        let mut errors = Vec::new();
        diag.write_errors_to(&mut errors).unwrap();
        assert_eq!(errors, b"Error : [] : e\n");

        let mut warnings = Vec::new();
        diag.write_warnings_to(&mut warnings).unwrap();
        assert_eq!(warnings, b"Warning : [] : w\n");
    }

    #[test]
    fn write_is_idempotent() {
        let mut diag = ErrorAggregator::new("root");
        diag.add_error("e");

        let mut first = Vec::new();
        let mut second = Vec::new();
        diag.write_errors_to(&mut first).unwrap();
        diag.write_errors_to(&mut second).unwrap();

        assert_eq!(first, second);
        assert!(diag.has_errors());
    }

    #[test]
    fn write_ignores_unfolded_contexts() {
        let mut diag = ErrorAggregator::new("root");
        diag.add_error("below");
        diag.push("top");

        assert_eq!(written(&diag), "");
    }

    #[test]
    fn display_matches_write_to() {
        let mut diag = ErrorAggregator::new("root");
        diag.add_error("e");
        diag.add_warning("w");

        assert_eq!(diag.to_string(), written(&diag));
    }
}
