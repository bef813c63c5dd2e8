use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::ReportError;

pub const MIN_PAGES: u32 = 2;
pub const MAX_PAGES: u32 = 50;
pub const DEFAULT_PAGES: u32 = 5;
pub const WORDS_PER_PAGE: u32 = 500;
pub const MIN_IDEA_CHARS: usize = 10;
/// Upstream hard ceiling on `max_tokens`.
pub const MAX_OUTPUT_TOKENS: u32 = 16_000;
pub const TOKEN_SAFETY_MARGIN: u32 = 500;
/// Reports longer than this are generated in two halves.
pub const SPLIT_THRESHOLD_PAGES: u32 = 25;

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub idea: Option<String>,
    /// Template identifier, e.g. `market_analysis`.
    #[serde(default)]
    pub template: Option<String>,
    /// Number-like: `10`, `"10"`, `"10 pages"` are all accepted.
    #[serde(default)]
    pub pages: Option<Value>,
}

/// A generation request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSpec {
    pub topic: String,
    pub template: String,
    pub pages: u32,
}

impl GenerateRequest {
    pub fn validate(&self) -> Result<ReportSpec, ReportError> {
        let idea = match self.idea.as_deref() {
            Some(idea) if !idea.is_empty() => idea,
            _ => return Err(ReportError::MissingIdea),
        };
        let template = match self.template.as_deref() {
            Some(template) if !template.is_empty() => template,
            _ => return Err(ReportError::MissingTemplate),
        };

        let topic = idea.trim();
        if topic.chars().count() < MIN_IDEA_CHARS {
            return Err(ReportError::IdeaTooShort);
        }

        Ok(ReportSpec {
            topic: topic.to_string(),
            template: template.to_string(),
            pages: clamp_pages(self.pages.as_ref()),
        })
    }
}

/// Resolves the requested page count into `[MIN_PAGES, MAX_PAGES]`.
///
/// Strings are read up to their first non-digit, numbers are truncated.
/// Anything unreadable, and zero, falls back to `DEFAULT_PAGES`.
pub fn clamp_pages(raw: Option<&Value>) -> u32 {
    let requested = match raw {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => leading_integer(s),
        _ => None,
    };

    let requested = match requested {
        Some(0) | None => DEFAULT_PAGES as i64,
        Some(n) => n,
    };

    requested.clamp(MIN_PAGES as i64, MAX_PAGES as i64) as u32
}

fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value = digits[..end]
        .bytes()
        .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add((b - b'0') as i64));

    Some(if negative { -value } else { value })
}

/// Word and token targets derived from a page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBudget {
    pub pages: u32,
    pub required_words: u32,
    /// 90% of `required_words`, rounded down.
    pub min_words: u32,
    /// `required_words / 0.75`, rounded up.
    pub estimated_tokens: u32,
    pub max_tokens: u32,
}

impl LengthBudget {
    pub fn for_pages(pages: u32) -> Self {
        let required_words = pages * WORDS_PER_PAGE;
        let min_words = required_words * 9 / 10;
        let estimated_tokens = (required_words * 4).div_ceil(3);
        let max_tokens = (estimated_tokens + TOKEN_SAFETY_MARGIN).min(MAX_OUTPUT_TOKENS);

        LengthBudget {
            pages,
            required_words,
            min_words,
            estimated_tokens,
            max_tokens,
        }
    }

    pub fn needs_split(&self) -> bool {
        self.pages > SPLIT_THRESHOLD_PAGES
    }

    /// Budgets for the first and second half. The first half takes the
    /// extra page when the count is odd.
    pub fn halves(&self) -> (LengthBudget, LengthBudget) {
        let first = self.pages.div_ceil(2);
        (LengthBudget::for_pages(first), LengthBudget::for_pages(self.pages - first))
    }
}

/// Response of `POST /api/generate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub pitch: String,
    pub model: String,
    pub pages: u32,
    pub word_count: usize,
}

impl GenerationResult {
    pub fn new(pitch: String, model: impl Into<String>, pages: u32) -> Self {
        let word_count = count_words(&pitch);
        GenerationResult {
            pitch,
            model: model.into(),
            pages,
            word_count,
        }
    }
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
