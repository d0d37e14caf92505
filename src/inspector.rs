//! Inspector state for one embedded page.
//!
//! The inspector is either off, hovering for a target, or holding a selected element. An
//! in-place edit of the selected element is bracketed by [`InspectorContext::begin_edit`]
//! and [`InspectorContext::confirm_edit`] / [`InspectorContext::cancel_edit`]; a confirmed
//! edit that changed the markup leaves a prompt queued for the agent.

use edit_diff::{build_edit_diff_prompt, build_selection_prompt, UNKNOWN_URL};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InspectorMode {
    #[default]
    Idle,
    Selecting,
    Selected,
}

/// The element the user picked, captured at selection time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub element_path: String,
    pub outer_html: String,
}

impl Selection {
    pub fn new(element_path: impl Into<String>, outer_html: impl Into<String>) -> Self {
        Self {
            element_path: element_path.into(),
            outer_html: outer_html.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct InspectorContext {
    mode: InspectorMode,
    selection: Option<Selection>,
    /// Markup captured when editing started.
    edit_before: Option<String>,
    pending_prompt: Option<String>,
}

impl InspectorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> InspectorMode {
        self.mode
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.edit_before.is_some()
    }

    /// Switches modes. Going idle drops the selection and any edit in progress.
    pub fn set_mode(&mut self, mode: InspectorMode) {
        if mode == InspectorMode::Idle {
            self.selection = None;
            self.edit_before = None;
        }
        debug!(from = ?self.mode, to = ?mode, "inspector mode changed");
        self.mode = mode;
    }

    /// Idle toggles to selecting; any other mode toggles back to idle.
    pub fn toggle(&mut self) {
        let next = match self.mode {
            InspectorMode::Idle => InspectorMode::Selecting,
            InspectorMode::Selecting | InspectorMode::Selected => InspectorMode::Idle,
        };
        self.set_mode(next);
    }

    pub fn select(&mut self, selection: Selection) {
        debug!(element_path = %selection.element_path, "element selected");
        self.selection = Some(selection);
        self.mode = InspectorMode::Selected;
    }

    /// Starts an in-place edit, capturing the element's current markup.
    ///
    /// A second call while editing restarts from the new markup.
    pub fn begin_edit(&mut self, before_html: impl Into<String>) {
        self.edit_before = Some(before_html.into());
    }

    /// Ends the edit. Queues and returns the diff prompt only when the markup changed.
    pub fn confirm_edit(
        &mut self,
        after_html: &str,
        element_path: &str,
        current_url: Option<&str>,
    ) -> Option<&str> {
        let before = self.edit_before.take()?;
        if before == after_html {
            debug!(element_path, "edit confirmed without changes");
            return None;
        }

        let prompt = build_edit_diff_prompt(
            &before,
            after_html,
            element_path,
            current_url.unwrap_or(UNKNOWN_URL),
        );
        if let Some(selection) = self.selection.as_mut() {
            selection.outer_html = after_html.to_string();
        }
        debug!(element_path, "edit prompt queued");
        self.pending_prompt = Some(prompt);
        self.pending_prompt.as_deref()
    }

    /// Ends the edit without a prompt, returning the captured markup to restore.
    pub fn cancel_edit(&mut self) -> Option<String> {
        self.edit_before.take()
    }

    /// Drains the queued edit prompt.
    pub fn take_pending_prompt(&mut self) -> Option<String> {
        self.pending_prompt.take()
    }

    pub fn has_pending_prompt(&self) -> bool {
        self.pending_prompt.is_some()
    }

    /// The message to send for typed `text`: with the selected element's context appended
    /// when there is a selection, unchanged otherwise.
    pub fn selection_prompt(&self, text: &str, current_url: Option<&str>) -> String {
        match &self.selection {
            Some(selection) => build_selection_prompt(
                text,
                current_url.unwrap_or(UNKNOWN_URL),
                &selection.element_path,
                &selection.outer_html,
            ),
            None => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{InspectorContext, InspectorMode, Selection};

    fn selected() -> InspectorContext {
        let mut inspector = InspectorContext::new();
        inspector.toggle();
        inspector.select(Selection::new("main > h1", "<h1>Hi</h1>"));
        inspector
    }

    #[test]
    fn toggle_cycles_through_idle_and_clears_selection() {
        let mut inspector = InspectorContext::new();
        assert_eq!(inspector.mode(), InspectorMode::Idle);

        inspector.toggle();
        assert_eq!(inspector.mode(), InspectorMode::Selecting);

        inspector.select(Selection::new("main > h1", "<h1>Hi</h1>"));
        assert_eq!(inspector.mode(), InspectorMode::Selected);

        inspector.toggle();
        assert_eq!(inspector.mode(), InspectorMode::Idle);
        assert!(inspector.selection().is_none());
    }

    #[test]
    fn unchanged_edit_queues_nothing() {
        let mut inspector = selected();
        inspector.begin_edit("<h1>Hi</h1>");
        assert!(inspector.is_editing());

        assert_eq!(inspector.confirm_edit("<h1>Hi</h1>", "main > h1", None), None);
        assert!(!inspector.is_editing());
        assert!(!inspector.has_pending_prompt());
    }

    #[test]
    fn changed_edit_queues_prompt_once() {
        let mut inspector = selected();
        inspector.begin_edit("<h1>Hi</h1>");

        let prompt = inspector
            .confirm_edit("<h1>Hello</h1>", "main > h1", None)
            .expect("changed markup should queue a prompt")
            .to_string();
        assert!(prompt.contains("Current URL: unknown"));
        assert!(prompt.contains("-  Hi\n+  Hello"));

        assert_eq!(inspector.take_pending_prompt(), Some(prompt));
        assert_eq!(inspector.take_pending_prompt(), None);
        assert_eq!(
            inspector.selection().map(|s| s.outer_html.as_str()),
            Some("<h1>Hello</h1>")
        );
    }

    #[test]
    fn confirm_without_begin_is_a_no_op() {
        let mut inspector = selected();
        assert_eq!(inspector.confirm_edit("<h1>x</h1>", "main > h1", None), None);
    }

    #[test]
    fn cancel_returns_captured_markup() {
        let mut inspector = selected();
        inspector.begin_edit("<h1>Hi</h1>");

        assert_eq!(inspector.cancel_edit().as_deref(), Some("<h1>Hi</h1>"));
        assert!(!inspector.is_editing());
        assert_eq!(inspector.cancel_edit(), None);
    }

    #[test]
    fn selection_prompt_appends_element_context() {
        let inspector = selected();
        assert_eq!(
            inspector.selection_prompt("Make it red", Some("http://localhost:3000/")),
            "Make it red\n\nCurrent URL: http://localhost:3000/\nElement path: main > h1\n```html\n<h1>Hi</h1>\n```"
        );

        let idle = InspectorContext::new();
        assert_eq!(idle.selection_prompt("hello", None), "hello");
    }
}
