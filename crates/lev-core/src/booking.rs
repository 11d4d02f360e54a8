//! Scheduling-link helpers.
//!
//! Booking URLs come from configuration and are frequently pasted with
//! trailing punctuation ("https://cal.com/lev.call."), so every consumer goes
//! through [`clean_raw_url`] before use.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use url::Url;

static TRAILING_PUNCT_RE: OnceLock<Regex> = OnceLock::new();
static CAL_COM_RE: OnceLock<Regex> = OnceLock::new();

fn trailing_punct_re() -> &'static Regex {
    TRAILING_PUNCT_RE.get_or_init(|| Regex::new(r"[.,;:!?]+$").unwrap())
}

fn cal_com_re() -> &'static Regex {
    CAL_COM_RE.get_or_init(|| Regex::new(r"(?i)^https://cal\.com/.+").unwrap())
}

/// Trim whitespace and strip a trailing run of `. , ; : ! ?`.
pub fn clean_raw_url(url: &str) -> String {
    trailing_punct_re().replace(url.trim(), "").into_owned()
}

/// Whether `url` (after cleaning) points at a cal.com booking page.
pub fn is_cal_com_url(url: &str) -> bool {
    cal_com_re().is_match(&clean_raw_url(url))
}

/// Clean and re-serialize a booking URL. Unparseable input is returned cleaned
/// but otherwise untouched.
pub fn normalize_booking_url(url: &str) -> String {
    let cleaned = clean_raw_url(url);
    match Url::parse(&cleaned) {
        Ok(parsed) => parsed.to_string(),
        Err(_) => cleaned,
    }
}

// ---------------------------------------------------------------------------
// BookingDuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingDuration {
    #[default]
    #[serde(rename = "30")]
    ThirtyMinutes,
    #[serde(rename = "15")]
    FifteenMinutes,
}

impl BookingDuration {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingDuration::ThirtyMinutes => "30",
            BookingDuration::FifteenMinutes => "15",
        }
    }
}

impl fmt::Display for BookingDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingDuration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "30" => Ok(BookingDuration::ThirtyMinutes),
            "15" => Ok(BookingDuration::FifteenMinutes),
            other => Err(format!("unknown booking duration: {other}")),
        }
    }
}
