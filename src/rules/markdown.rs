//! Markdown to plain text conversion.
//!
//! The output must not read as Markdown again, or a second run would convert
//! it further. Rendering is tried plainly first, then with markup-significant
//! characters escaped, and as a last resort with every ASCII punctuation
//! character escaped and line indentation dropped.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use std::borrow::Cow;

/// Renders Markdown as plain text.
///
/// Returns the text and the number of markup elements converted. Text with no
/// markup elements is returned unchanged, so paragraphs and bare lists that are
/// already plain keep their exact original spacing.
pub(crate) fn to_plain_text(input: &str) -> (Cow<'_, str>, usize) {
    let (plain, converted) = render(input, false);
    if converted == 0 {
        return (Cow::Borrowed(input), 0);
    }
    if is_inert(&plain) {
        return (Cow::Owned(plain), converted);
    }

    // Code contents and backslash escapes can come out looking like markup
    let (escaped, _) = render(input, true);
    if is_inert(&escaped) {
        return (Cow::Owned(escaped), converted);
    }

    tracing::trace!("markdown output still parses as markup, escaping all punctuation");
    (Cow::Owned(escape_all(&plain)), converted)
}

/// True if the text contains no markup element that would be converted.
fn is_inert(text: &str) -> bool {
    render(text, false).1 == 0
}

fn render(input: &str, escape: bool) -> (String, usize) {
    let mut renderer = Renderer {
        out: String::with_capacity(input.len()),
        converted: 0,
        lists: Vec::new(),
        escape,
        line_start: true,
    };

    for event in Parser::new_ext(input, Options::ENABLE_STRIKETHROUGH) {
        renderer.event(event);
    }

    let mut out = renderer.out;
    let trimmed_len = out.trim_end_matches('\n').len();
    out.truncate(trimmed_len);
    if input.ends_with('\n') {
        out.push('\n');
    }
    (out, renderer.converted)
}

struct Renderer {
    out: String,
    converted: usize,
    // One entry per open list: next number for ordered lists, None for bullets
    lists: Vec<Option<u64>>,
    escape: bool,
    // Nothing but indentation written since the last line break or list marker
    line_start: bool,
}

impl Renderer {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => match tag {
                Tag::Heading { .. }
                | Tag::BlockQuote(..)
                | Tag::CodeBlock(_)
                | Tag::Emphasis
                | Tag::Strong
                | Tag::Strikethrough
                | Tag::Link { .. }
                | Tag::Image { .. } => self.converted += 1,
                Tag::List(start) => {
                    self.start_line();
                    self.lists.push(start);
                }
                Tag::Item => self.start_item(),
                _ => {}
            },
            Event::End(tag) => match tag {
                TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::CodeBlock => self.end_block(),
                TagEnd::List(_) => {
                    self.lists.pop();
                    if self.lists.is_empty() {
                        self.end_block();
                    }
                }
                _ => {}
            },
            Event::Text(text) | Event::Html(text) | Event::InlineHtml(text) => {
                self.push_text(&text);
            }
            Event::Code(code) => {
                self.converted += 1;
                self.push_text(&code);
            }
            Event::SoftBreak | Event::HardBreak => self.push_char('\n'),
            Event::Rule => {
                self.converted += 1;
                self.end_block();
            }
            _ => {}
        }
    }

    fn start_item(&mut self) {
        self.start_line();
        let depth = self.lists.len().saturating_sub(1);
        self.out.push_str(&"  ".repeat(depth));
        match self.lists.last_mut() {
            Some(Some(number)) => {
                self.out.push_str(&format!("{}. ", number));
                *number += 1;
            }
            _ => self.out.push_str("- "),
        }
        self.line_start = true;
    }

    fn start_line(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.push_char('\n');
        }
    }

    fn end_block(&mut self) {
        if self.out.is_empty() {
            return;
        }
        while !self.out.ends_with("\n\n") {
            self.push_char('\n');
        }
    }

    fn push_text(&mut self, text: &str) {
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            if self.escape && self.needs_escape(c, chars.peek().copied()) {
                self.out.push('\\');
            }
            self.push_char(c);
        }
    }

    fn push_char(&mut self, c: char) {
        self.out.push(c);
        match c {
            '\n' => self.line_start = true,
            ' ' | '\t' => {}
            _ => self.line_start = false,
        }
    }

    fn needs_escape(&self, c: char, next: Option<char>) -> bool {
        match c {
            '\\' | '`' | '*' | '~' | '[' | '<' => true,
            // An underscore between two alphanumerics never delimits emphasis
            '_' => {
                let prev = self.out.chars().next_back();
                !(prev.is_some_and(char::is_alphanumeric) && next.is_some_and(char::is_alphanumeric))
            }
            '#' | '>' | '-' | '+' | '=' => self.line_start,
            _ => false,
        }
    }
}

/// Escapes every ASCII punctuation character and drops line indentation.
///
/// The result parses as plain paragraphs only.
fn escape_all(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut line_start = true;
    for c in text.chars() {
        match c {
            '\n' | '\r' => line_start = true,
            ' ' | '\t' if line_start => continue,
            _ => line_start = false,
        }
        if c.is_ascii_punctuation() {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_stable(output: &str) {
        let (again, count) = to_plain_text(output);
        assert_eq!(count, 0, "{:?} still converts", output);
        assert_eq!(again, output);
    }

    #[test]
    fn test_plain_text_is_untouched() {
        let input = "Just a sentence.\n\nAnother  one with  spacing.";
        let (text, count) = to_plain_text(input);
        assert!(matches!(text, Cow::Borrowed(_)));
        assert_eq!(count, 0);
    }

    #[test]
    fn test_heading_and_emphasis() {
        let (text, count) = to_plain_text("# Title\n\nSome **bold** and *italic* text.");
        assert_eq!(text, "Title\n\nSome bold and italic text.");
        assert_eq!(count, 3);
    }

    #[test]
    fn test_links_keep_their_text() {
        let (text, count) = to_plain_text("See [the docs](https://example.com) now.");
        assert_eq!(text, "See the docs now.");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_image_keeps_alt_text() {
        let (text, _) = to_plain_text("![a cat](cat.png)");
        assert_eq!(text, "a cat");
    }

    #[test]
    fn test_inline_code_and_fence() {
        let (text, count) = to_plain_text("Run `cargo doc`:\n\n```sh\ncargo doc --open\n```\n");
        assert_eq!(text, "Run cargo doc:\n\ncargo doc --open\n");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_lists() {
        let (text, _) = to_plain_text("**Steps**\n\n1. first\n2. second\n\n- a\n- b");
        assert_eq!(text, "Steps\n\n1. first\n2. second\n\n- a\n- b");
    }

    #[test]
    fn test_block_quote_and_rule() {
        let (text, count) = to_plain_text("> quoted\n\n---\n\nafter");
        assert_eq!(text, "quoted\n\nafter");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_strikethrough() {
        let (text, count) = to_plain_text("~~old~~ new");
        assert_eq!(text, "old new");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_code_block_comment_is_not_a_heading() {
        let (text, count) = to_plain_text("Install:\n\n```sh\n# update first\napt update\n```\n");
        assert_eq!(text, "Install:\n\n\\# update first\napt update\n");
        assert_eq!(count, 1);
        assert_stable(&text);
    }

    #[test]
    fn test_inline_code_markup_stays_literal() {
        let (text, count) = to_plain_text("Use `**kwargs**` here");
        assert_eq!(text, "Use \\*\\*kwargs\\*\\* here");
        assert_eq!(count, 1);
        assert_stable(&text);
    }

    #[test]
    fn test_unclosed_markup_in_code_needs_no_escape() {
        let (text, count) = to_plain_text("Use `**kwargs` here");
        assert_eq!(text, "Use **kwargs here");
        assert_eq!(count, 1);
        assert_stable(&text);
    }

    #[test]
    fn test_backslash_escapes_stay_literal() {
        let (text, count) = to_plain_text("\\*x\\* **b**");
        assert_eq!(text, "\\*x\\* b");
        assert_eq!(count, 1);
        assert_stable(&text);
    }

    #[test]
    fn test_snake_case_is_not_escaped() {
        let (text, _) = to_plain_text("`my_var` and `*ptr*`");
        assert_eq!(text, "my_var and \\*ptr\\*");
        assert_stable(&text);
    }

    #[test]
    fn test_indented_code_line_falls_back_to_full_escape() {
        let (text, count) = to_plain_text("```\nx\n\n    **y**\n```");
        assert_eq!(text, "x\n\n\\*\\*y\\*\\*");
        assert_eq!(count, 1);
        assert_stable(&text);
    }

    #[test]
    fn test_escape_all_output_is_inert() {
        let text = escape_all("# a\n    code\r\t> *b* [c](d) `e` ~~f~~ <http://g>\n---");
        assert!(is_inert(&text));
    }
}
