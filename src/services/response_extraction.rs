use once_cell::sync::Lazy;
use regex::Regex;

// Best-effort only: nested fences and multiple JSON blocks are not handled.
static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```(?:json)?\s*([\s\S]*?)```").expect("valid fence pattern"));
static OBJECT_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[\s\S]*\}").expect("valid object pattern"));
static ARRAY_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[\s\S]*\]").expect("valid array pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Object,
    Array,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    Found(String),
    NotFound,
}

impl ExtractionOutcome {
    /// The text to hand to the JSON parser. Without a match that is the raw
    /// response itself, which will normally fail to parse.
    pub fn candidate<'a>(&'a self, raw: &'a str) -> &'a str {
        match self {
            ExtractionOutcome::Found(text) => text,
            ExtractionOutcome::NotFound => raw,
        }
    }
}

/// Pulls the JSON payload out of a model response.
///
/// A fenced code block wins; otherwise the widest `{...}` or `[...]` span,
/// depending on the shape the caller expects.
pub fn extract_json(raw: &str, shape: JsonShape) -> ExtractionOutcome {
    if let Some(inner) = FENCED_BLOCK.captures(raw).and_then(|caps| caps.get(1)) {
        let inner = inner.as_str().trim();
        if !inner.is_empty() {
            return ExtractionOutcome::Found(inner.to_string());
        }
    }

    let span = match shape {
        JsonShape::Object => &*OBJECT_SPAN,
        JsonShape::Array => &*ARRAY_SPAN,
    };

    match span.find(raw) {
        Some(found) => ExtractionOutcome::Found(found.as_str().to_string()),
        None => ExtractionOutcome::NotFound,
    }
}
