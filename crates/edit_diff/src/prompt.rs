use crate::diff::unified_diff;
use crate::format::format_html;

/// Opening sentence of every edit-diff prompt.
pub const EDIT_INSTRUCTION: &str = "I made a visual edit to an element on the page. Find the source file that renders this element and apply the same change to the source code.";

/// URL placeholder used when the embedded page has no known location.
pub const UNKNOWN_URL: &str = "unknown";

/// Builds the agent instruction describing an in-place edit of one element.
///
/// Pure function of its inputs. It always produces a prompt, so callers decide whether
/// an edit happened at all (`before_html != after_html`) before calling it.
pub fn build_edit_diff_prompt(
    before_html: &str,
    after_html: &str,
    element_path: &str,
    current_url: &str,
) -> String {
    let formatted_before = format_html(before_html);
    let formatted_after = format_html(after_html);
    let diff = unified_diff(&formatted_before, &formatted_after);
    let url_line = format!("Current URL: {current_url}");
    let path_line = format!("Element path: {element_path}");

    [
        EDIT_INSTRUCTION,
        "",
        url_line.as_str(),
        path_line.as_str(),
        "",
        "Diff of the change:",
        "```diff",
        diff.as_str(),
        "```",
        "",
        "Original HTML:",
        "```html",
        formatted_before.as_str(),
        "```",
        "",
        "Modified HTML:",
        "```html",
        formatted_after.as_str(),
        "```",
    ]
    .join("\n")
}

/// Appends the selected element's context to a typed chat message.
///
/// The element markup is embedded verbatim, unformatted.
pub fn build_selection_prompt(
    text: &str,
    current_url: &str,
    element_path: &str,
    outer_html: &str,
) -> String {
    format!(
        "{text}\n\nCurrent URL: {current_url}\nElement path: {element_path}\n```html\n{outer_html}\n```"
    )
}

#[cfg(test)]
mod tests {
    use super::{build_edit_diff_prompt, build_selection_prompt, EDIT_INSTRUCTION};

    #[test]
    fn prompt_sections_appear_in_order() {
        let prompt = build_edit_diff_prompt("<p>a</p>", "<p>b</p>", "main > p", "http://x/");
        let positions: Vec<usize> = [
            EDIT_INSTRUCTION,
            "Current URL: http://x/",
            "Element path: main > p",
            "Diff of the change:",
            "```diff",
            "Original HTML:",
            "Modified HTML:",
        ]
        .iter()
        .map(|needle| prompt.find(needle).expect("section should be present"))
        .collect();

        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
        assert!(prompt.ends_with("```"));
    }

    #[test]
    fn identical_input_still_produces_a_keep_only_prompt() {
        let prompt = build_edit_diff_prompt("<b>x</b>", "<b>x</b>", "b", "u");
        assert!(prompt.contains("```diff\n <b>\n   x\n </b>\n```"));
    }

    #[test]
    fn selection_prompt_appends_element_context() {
        assert_eq!(
            build_selection_prompt("make it red", "unknown", "div#hero", "<div id=\"hero\"></div>"),
            "make it red\n\nCurrent URL: unknown\nElement path: div#hero\n```html\n<div id=\"hero\"></div>\n```"
        );
    }
}
