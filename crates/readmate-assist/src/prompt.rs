//! Prompt construction and batch response parsing.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

/// Map a language code to the display name used in prompts. Unknown codes
/// pass through so callers can hand over full names directly.
pub fn language_display_name(code: &str) -> &str {
    match code {
        "en" => "English",
        "uk" => "Ukrainian",
        "ru" => "Russian",
        "es" => "Spanish",
        "de" => "German",
        "fr" => "French",
        other => other,
    }
}

/// Best-effort detection of the language an answer should be written in.
pub fn detect_language(text: &str) -> &'static str {
    let has = |pred: fn(char) -> bool| text.chars().any(pred);

    if has(|c| ('\u{0400}'..='\u{04FF}').contains(&c)) {
        if has(|c| "іїєґІЇЄҐ".contains(c)) {
            return "Ukrainian";
        }
        return "Russian";
    }
    if has(|c| "äöüßÄÖÜ".contains(c)) {
        return "German";
    }
    if has(|c| "àâçèéêëîïôùûü".contains(c)) {
        return "French";
    }
    if has(|c| "ñ¿¡".contains(c)) {
        return "Spanish";
    }
    "English"
}

/// System instruction for page translation.
pub fn translation_system_prompt(language_name: &str) -> String {
    format!(
        "You are a professional translator. Translate the user's text into {language_name}. \
         Preserve the [N] index markers and the blank lines between numbered sections exactly \
         as they appear. Output only the translation, with no commentary."
    )
}

fn language_clause(text: &str) -> String {
    let language = detect_language(text);
    format!(
        "\n\nIMPORTANT: The input text is in {language}. You MUST respond in {language} language only."
    )
}

pub fn simplify_system_prompt(text: &str) -> String {
    format!(
        "You simplify difficult text. Rewrite the user's text in plain, easy language, \
         keeping every important fact.{}",
        language_clause(text)
    )
}

pub fn explain_system_prompt(text: &str) -> String {
    format!(
        "You explain text and terms. Explain what the user's text means in clear language.{}\
         \n\nKeep your explanation concise and to the point. For short text (1-3 words), provide \
         a brief 2-3 sentence explanation. For longer text, limit your response to one short \
         paragraph.",
        language_clause(text)
    )
}

pub fn summarize_system_prompt(text: &str) -> String {
    format!(
        "You summarize text. Produce a short summary of the user's text that covers the key \
         points.{}",
        language_clause(text)
    )
}

/// User prompt for an aid request, with optional page context prepended.
pub fn aid_user_prompt(instruction: &str, text: &str, page_title: Option<&str>) -> String {
    let context = page_title
        .map(|title| format!("Context: I am on the page \"{title}\".\n\n"))
        .unwrap_or_default();
    format!("{context}{instruction}\n\n{text}")
}

/// Concatenate batch paragraphs into one numbered prompt:
/// `[0] first` … `[N-1] last`, blank-line separated.
pub fn build_numbered_prompt(paragraphs: &[String]) -> String {
    paragraphs
        .iter()
        .enumerate()
        .map(|(index, text)| format!("[{index}] {text}"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn marker_regex() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"\[(\d+)\]\s*").expect("static pattern"))
}

/// Split a translated response back into per-paragraph translations.
///
/// For each input index: prefer the text following a matching `[index]`
/// marker; fall back to positional blank-line chunks when the marker is
/// missing; fall back to the paragraph's original text when the response has
/// no entry at all. The result always has exactly one entry per input.
pub fn parse_block_response(response: &str, paragraphs: &[String]) -> Vec<String> {
    let markers: Vec<(usize, usize, usize)> = marker_regex()
        .captures_iter(response)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            let index: usize = captures.get(1)?.as_str().parse().ok()?;
            Some((index, whole.start(), whole.end()))
        })
        .collect();

    let mut by_index: Vec<Option<&str>> = vec![None; paragraphs.len()];
    for (position, (index, _, end)) in markers.iter().enumerate() {
        let section_end = markers
            .get(position + 1)
            .map(|(_, next_start, _)| *next_start)
            .unwrap_or(response.len());
        if let Some(slot) = by_index.get_mut(*index) {
            let section = response[*end..section_end].trim();
            if !section.is_empty() {
                *slot = Some(section);
            }
        }
    }

    let chunks: Vec<&str> = response
        .split("\n\n")
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect();

    paragraphs
        .iter()
        .enumerate()
        .map(|(index, original)| match by_index[index] {
            Some(section) => section.to_string(),
            None => {
                debug!(index, "index marker missing, falling back");
                chunks
                    .get(index)
                    .map(|chunk| chunk.to_string())
                    .unwrap_or_else(|| original.trim().to_string())
            }
        })
        .collect()
}
