//! Plain-text transcript rendering.

use session_transcript::view::{AssistantBlock, ReasoningBlock, StepStatus, ToolGroup};
use session_transcript::{transcript_items, TranscriptItem, TranscriptStore};

const INDENT: &str = "  ";

/// Renders the store's current session, one block per message separated by blank lines.
pub fn render_transcript(store: &TranscriptStore) -> String {
    let blocks: Vec<String> = transcript_items(store).iter().map(render_item).collect();
    blocks.join("\n\n")
}

fn render_item(item: &TranscriptItem<'_>) -> String {
    let mut lines = Vec::new();

    match item {
        TranscriptItem::User { text, .. } => {
            lines.push("user:".to_string());
            push_indented(&mut lines, text);
        }
        TranscriptItem::Assistant {
            streaming,
            blocks,
            error,
            ..
        } => {
            lines.push(if *streaming {
                "assistant (streaming):".to_string()
            } else {
                "assistant:".to_string()
            });
            for block in blocks {
                match block {
                    AssistantBlock::Text { text, .. } => push_indented(&mut lines, text),
                    AssistantBlock::Reasoning(reasoning) => render_reasoning(&mut lines, reasoning),
                    AssistantBlock::Tools(group) => render_tools(&mut lines, group),
                }
            }
            if let Some(error) = error {
                lines.push(format!("{INDENT}! {}: {}", error.name, error.message));
            }
        }
    }

    lines.join("\n")
}

fn render_reasoning(lines: &mut Vec<String>, reasoning: &ReasoningBlock<'_>) {
    let header = match (reasoning.streaming, reasoning.duration_secs) {
        (true, _) => "thinking...".to_string(),
        (false, Some(secs)) => format!("thought for {secs}s"),
        (false, None) => "thought".to_string(),
    };
    lines.push(format!("{INDENT}({header})"));
    for line in reasoning.text.lines() {
        lines.push(format!("{INDENT}{INDENT}{line}"));
    }
}

fn render_tools(lines: &mut Vec<String>, group: &ToolGroup<'_>) {
    for step in &group.steps {
        let marker = match step.status {
            StepStatus::Complete if step.error.is_some() => "[!]",
            StepStatus::Complete => "[x]",
            StepStatus::Active => "[~]",
            StepStatus::Pending => "[ ]",
        };
        lines.push(format!("{INDENT}{marker} {}", step.title));
        if let Some(error) = step.error {
            lines.push(format!("{INDENT}{INDENT}error: {error}"));
        }
    }
}

fn push_indented(lines: &mut Vec<String>, text: &str) {
    for line in text.lines() {
        lines.push(format!("{INDENT}{line}"));
    }
}
