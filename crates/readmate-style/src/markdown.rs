//! Markdown rendering for AI answers.
//!
//! A small pure pipeline: text is parsed into a tagged block tree, and the
//! tree is rendered to HTML separately. Only the constructs the completion
//! models actually emit are understood: `#`/`##`/`###` headings, `* ` list
//! items, `**bold**` spans, and blank-line-separated paragraphs.

/// An inline span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Bold(String),
}

/// A block-level node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, spans: Vec<Inline> },
    Paragraph(Vec<Inline>),
    List(Vec<Vec<Inline>>),
}

/// Parse answer text into a block tree.
pub fn parse(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<String> = Vec::new();
    let mut items: Vec<Vec<Inline>> = Vec::new();

    let flush_paragraph = |paragraph: &mut Vec<String>, blocks: &mut Vec<Block>| {
        if !paragraph.is_empty() {
            blocks.push(Block::Paragraph(parse_inlines(&paragraph.join("\n"))));
            paragraph.clear();
        }
    };
    let flush_list = |items: &mut Vec<Vec<Inline>>, blocks: &mut Vec<Block>| {
        if !items.is_empty() {
            blocks.push(Block::List(std::mem::take(items)));
        }
    };

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
            flush_list(&mut items, &mut blocks);
            continue;
        }

        if let Some((level, rest)) = heading_of(trimmed) {
            flush_paragraph(&mut paragraph, &mut blocks);
            flush_list(&mut items, &mut blocks);
            blocks.push(Block::Heading {
                level,
                spans: parse_inlines(rest),
            });
        } else if let Some(item) = trimmed.strip_prefix("* ") {
            flush_paragraph(&mut paragraph, &mut blocks);
            items.push(parse_inlines(item));
        } else {
            flush_list(&mut items, &mut blocks);
            paragraph.push(trimmed.to_string());
        }
    }

    flush_paragraph(&mut paragraph, &mut blocks);
    flush_list(&mut items, &mut blocks);
    blocks
}

fn heading_of(line: &str) -> Option<(u8, &str)> {
    for (prefix, level) in [("### ", 3u8), ("## ", 2), ("# ", 1)] {
        if let Some(rest) = line.strip_prefix(prefix) {
            return Some((level, rest.trim_start()));
        }
    }
    None
}

fn parse_inlines(text: &str) -> Vec<Inline> {
    let mut spans = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find("**") {
        match rest[open + 2..].find("**") {
            Some(close) => {
                if open > 0 {
                    spans.push(Inline::Text(rest[..open].to_string()));
                }
                spans.push(Inline::Bold(rest[open + 2..open + 2 + close].to_string()));
                rest = &rest[open + 2 + close + 2..];
            }
            // Unmatched marker: keep it as literal text.
            None => break,
        }
    }
    if !rest.is_empty() {
        spans.push(Inline::Text(rest.to_string()));
    }
    spans
}

/// Escape text for inclusion in HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a block tree to HTML. Source text is escaped span by span.
pub fn to_html(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            Block::Heading { level, spans } => {
                out.push_str(&format!("<h{level}>{}</h{level}>", render_inlines(spans)));
            }
            Block::Paragraph(spans) => {
                out.push_str(&format!("<p>{}</p>", render_inlines(spans)));
            }
            Block::List(items) => {
                out.push_str("<ul>");
                for item in items {
                    out.push_str(&format!("<li>{}</li>", render_inlines(item)));
                }
                out.push_str("</ul>");
            }
        }
    }
    out
}

fn render_inlines(spans: &[Inline]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            Inline::Text(text) => out.push_str(&escape_html(text).replace('\n', "<br>")),
            Inline::Bold(text) => {
                out.push_str(&format!("<strong>{}</strong>", escape_html(text)));
            }
        }
    }
    out
}

/// Parse and render in one step.
pub fn render(text: &str) -> String {
    to_html(&parse(text))
}
