//! Render-ready projection of a [`TranscriptStore`].
//!
//! Widgets are not drawn here. The projection decides what is visible, how assistant parts
//! group, and which labels and statuses tool steps carry, so any front-end can draw it
//! without re-deriving those rules.

use crate::schema::{MessageError, Part, PartKind, PartTime, Role, ToolState, ToolStatus};
use crate::store::{MessageEntry, TranscriptStore};

const TOOL_LABELS: [(&str, &str); 11] = [
    ("read", "Read file"),
    ("list", "List directory"),
    ("glob", "Glob search"),
    ("grep", "Regex search"),
    ("webfetch", "Fetch webpage"),
    ("bash", "Shell command"),
    ("edit", "Edit file"),
    ("write", "Write file"),
    ("apply_patch", "Apply patch"),
    ("todowrite", "Write todos"),
    ("todoread", "Read todos"),
];

/// Display label for a tool; unknown tools are labelled with their own name.
#[must_use]
pub fn tool_label(tool: &str) -> &str {
    TOOL_LABELS
        .iter()
        .find(|(name, _)| *name == tool)
        .map_or(tool, |(_, label)| *label)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Complete,
    Active,
    Pending,
}

impl From<ToolStatus> for StepStatus {
    fn from(status: ToolStatus) -> Self {
        match status {
            ToolStatus::Completed | ToolStatus::Error => Self::Complete,
            ToolStatus::Running => Self::Active,
            ToolStatus::Pending => Self::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStep<'a> {
    pub part_id: &'a str,
    pub tool: &'a str,
    /// State title while running or completed, otherwise the tool label.
    pub title: &'a str,
    pub status: StepStatus,
    pub error: Option<&'a str>,
    /// Present only for completed steps with non-empty output.
    pub output: Option<&'a str>,
}

impl<'a> ToolStep<'a> {
    fn new(part_id: &'a str, tool: &'a str, state: &'a ToolState) -> Self {
        let label = tool_label(tool);
        let title = match state.status {
            ToolStatus::Completed | ToolStatus::Running => state.title.as_deref().unwrap_or(label),
            ToolStatus::Pending | ToolStatus::Error => label,
        };
        let error = match state.status {
            ToolStatus::Error => state.error.as_deref(),
            _ => None,
        };
        let output = match state.status {
            ToolStatus::Completed => state.output.as_deref().filter(|output| !output.is_empty()),
            _ => None,
        };

        Self {
            part_id,
            tool,
            title,
            status: state.status.into(),
            error,
            output,
        }
    }
}

/// A run of consecutive tool parts, shown as one collapsible chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolGroup<'a> {
    pub steps: Vec<ToolStep<'a>>,
}

impl ToolGroup<'_> {
    /// Groups start expanded while any step is still running.
    #[must_use]
    pub fn open_by_default(&self) -> bool {
        self.steps.iter().any(|step| step.status == StepStatus::Active)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasoningBlock<'a> {
    pub part_id: &'a str,
    pub text: &'a str,
    pub streaming: bool,
    /// Whole seconds, rounded up, once the reasoning has ended.
    pub duration_secs: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantBlock<'a> {
    Text { part_id: &'a str, text: &'a str },
    Reasoning(ReasoningBlock<'a>),
    Tools(ToolGroup<'a>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice<'a> {
    pub name: &'a str,
    pub message: &'a str,
}

impl<'a> From<&'a MessageError> for ErrorNotice<'a> {
    fn from(error: &'a MessageError) -> Self {
        Self {
            name: &error.name,
            message: error.message(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptItem<'a> {
    User {
        message_id: &'a str,
        text: String,
    },
    Assistant {
        message_id: &'a str,
        streaming: bool,
        blocks: Vec<AssistantBlock<'a>>,
        error: Option<ErrorNotice<'a>>,
    },
}

/// Projects the current session's messages into displayable items, oldest first.
///
/// User messages whose text parts are all blank are omitted.
#[must_use]
pub fn transcript_items(store: &TranscriptStore) -> Vec<TranscriptItem<'_>> {
    store
        .sorted_messages()
        .into_iter()
        .filter_map(|entry| match entry.info().role {
            Role::User => user_item(entry),
            Role::Assistant => Some(assistant_item(entry)),
        })
        .collect()
}

fn user_item(entry: &MessageEntry) -> Option<TranscriptItem<'_>> {
    let text = entry
        .parts()
        .iter()
        .filter_map(|part| match &part.kind {
            PartKind::Text { text } => Some(text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n");

    if text.trim().is_empty() {
        return None;
    }

    Some(TranscriptItem::User {
        message_id: &entry.info().id,
        text,
    })
}

fn assistant_item(entry: &MessageEntry) -> TranscriptItem<'_> {
    let info = entry.info();
    let streaming = !info.is_complete();

    TranscriptItem::Assistant {
        message_id: &info.id,
        streaming,
        blocks: assistant_blocks(entry.parts(), streaming),
        error: info.error.as_ref().map(ErrorNotice::from),
    }
}

/// Splits parts into runs of tool and non-tool parts, then drops what is not displayed.
///
/// Any non-tool part ends a tool run, including parts that render nothing (blank text,
/// step markers).
pub fn assistant_blocks(parts: &[Part], streaming: bool) -> Vec<AssistantBlock<'_>> {
    let mut blocks = Vec::new();
    let mut previous_was_tool = false;

    for part in parts {
        let is_tool = part.is_tool();
        match &part.kind {
            PartKind::Tool { tool, state, .. } => {
                let step = ToolStep::new(&part.id, tool, state);
                match blocks.last_mut() {
                    Some(AssistantBlock::Tools(group)) if previous_was_tool => {
                        group.steps.push(step)
                    }
                    _ => blocks.push(AssistantBlock::Tools(ToolGroup { steps: vec![step] })),
                }
            }
            PartKind::Text { text } if !text.trim().is_empty() => {
                blocks.push(AssistantBlock::Text {
                    part_id: &part.id,
                    text,
                });
            }
            PartKind::Reasoning { text, time } if !text.trim().is_empty() => {
                blocks.push(AssistantBlock::Reasoning(ReasoningBlock {
                    part_id: &part.id,
                    text,
                    streaming: streaming && time.end.is_none(),
                    duration_secs: reasoning_duration_secs(time),
                }));
            }
            _ => {}
        }
        previous_was_tool = is_tool;
    }

    blocks
}

fn reasoning_duration_secs(time: &PartTime) -> Option<i64> {
    let end = time.end?;
    let elapsed_ms = end.saturating_sub(time.start);
    Some((elapsed_ms as f64 / 1000.0).ceil() as i64)
}
