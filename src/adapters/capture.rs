//! Reads the page automation step's capture file.
//!
//! The file is a JSON object keyed by plan name. A value is either the card
//! text itself or the visible text of each ancestor of the plan heading,
//! innermost first, from which the card is chosen by [`select_card_text`].

use crate::core::{PlanTexts, Storage, TextSource};
use crate::utils::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;

/// Texts longer than this are page-sized blobs rather than a card.
pub const MAX_CARD_CHARS: usize = 6000;
const CALL_TO_ACTION: [&str; 2] = ["add to cart", "buy now"];

static CURRENCY_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[£$€]\s*\d").unwrap());
static MONTH_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)month").unwrap());

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PlanCapture {
    Text(String),
    Candidates(Vec<String>),
}

impl PlanCapture {
    pub fn into_card_text(self) -> Option<String> {
        match self {
            PlanCapture::Text(text) => Some(normalize_ws(&text)).filter(|t| !t.is_empty()),
            PlanCapture::Candidates(candidates) => select_card_text(&candidates),
        }
    }
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

/// How much a text looks like one plan's pricing card.
pub fn card_score(text: &str) -> i32 {
    let lower = text.to_lowercase();
    let month = if MONTH_WORD.is_match(text) { 3 } else { 0 };
    let cta = if CALL_TO_ACTION.iter().any(|p| lower.contains(p)) { 2 } else { 0 };
    let prices = CURRENCY_DIGIT.find_iter(text).take(3).count() as i32;
    let blob = if text.chars().count() > MAX_CARD_CHARS { 5 } else { 0 };
    month + cta + prices - blob
}

/// Candidates scoring below this are never chosen.
pub const MIN_CARD_SCORE: i32 = 0;

/// Highest-scoring non-empty candidate; the innermost one wins a tie.
pub fn select_card_text(candidates: &[String]) -> Option<String> {
    let mut best: Option<(i32, String)> = None;
    for candidate in candidates {
        let text = normalize_ws(candidate);
        if text.is_empty() {
            continue;
        }
        let score = card_score(&text);
        if score < MIN_CARD_SCORE {
            tracing::debug!("Rejecting candidate of {} chars (score {})", text.len(), score);
            continue;
        }
        if best.as_ref().map_or(true, |(top, _)| score > *top) {
            best = Some((score, text));
        }
    }
    best.map(|(_, text)| text)
}

/// Capture file read through a [`Storage`] backend.
pub struct CaptureFileSource<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> CaptureFileSource<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }
}

impl<S: Storage> TextSource for CaptureFileSource<S> {
    async fn plan_texts(&self) -> Result<PlanTexts> {
        tracing::debug!("Reading capture file: {}", self.path);
        let raw = self.storage.read_file(&self.path).await?;
        let captures: HashMap<String, PlanCapture> = serde_json::from_slice(&raw)?;

        let mut texts = PlanTexts::new();
        for (plan, capture) in captures {
            match capture.into_card_text() {
                Some(text) => {
                    texts.insert(plan, text);
                }
                None => tracing::warn!("No container text for {}", plan),
            }
        }
        Ok(texts)
    }
}
