use std::sync::OnceLock;

use regex::Regex;

/// Indentation emitted per nesting level.
pub const INDENT: &str = "  ";

fn inter_tag_whitespace_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| Regex::new(r">\s+<").expect("inter-tag whitespace regex must compile"))
}

fn tag_token_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| Regex::new(r"</?[^>]+>").expect("tag token regex must compile"))
}

fn void_tag_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| {
        Regex::new(r"(?i)^<(br|hr|img|input|meta|link)\b").expect("void tag regex must compile")
    })
}

/// Rewrites markup so every tag sits on its own line, indented by nesting depth.
///
/// This is a presentation transform for line diffing, not a parser: malformed markup is
/// formatted on a best-effort basis and never rejected.
pub fn format_html(html: &str) -> String {
    format_html_lines(html).join("\n")
}

/// Same as [`format_html`], returning the lines instead of joining them.
pub fn format_html_lines(html: &str) -> Vec<String> {
    let collapsed = inter_tag_whitespace_regex().replace_all(html, "><");
    let split = tag_token_regex().replace_all(&collapsed, "\n${0}\n");

    let mut indent: usize = 0;
    let mut lines = Vec::new();

    for line in split.split('\n').map(str::trim).filter(|line| !line.is_empty()) {
        let kind = LineKind::classify(line);

        if kind == LineKind::Closing {
            indent = indent.saturating_sub(1);
        }

        lines.push(format!("{}{line}", INDENT.repeat(indent)));

        if kind == LineKind::Opening {
            indent += 1;
        }
    }

    lines
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Opening,
    Closing,
    SelfClosing,
    /// Text, comments, doctypes and lines that already close what they open.
    Inline,
}

impl LineKind {
    fn classify(line: &str) -> Self {
        if line.starts_with("</") {
            return Self::Closing;
        }

        if line.ends_with("/>") || void_tag_regex().is_match(line) {
            return Self::SelfClosing;
        }

        let opens_element = line
            .strip_prefix('<')
            .and_then(|rest| rest.chars().next())
            .is_some_and(|ch| ch.is_ascii_alphabetic());

        if opens_element && !line.contains("</") {
            Self::Opening
        } else {
            Self::Inline
        }
    }
}
