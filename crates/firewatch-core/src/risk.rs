//! Risk score classification: severity tier and green→red marker color.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FireError, FireResult};

// ── Tier thresholds ──────────────────────────────────────────────────────────

/// Lower bound (inclusive) of the "very high" tier.
pub const VERY_HIGH_THRESHOLD: f64 = 0.75;

/// Lower bound (inclusive) of the "moderate" tier.
pub const MODERATE_THRESHOLD: f64 = 0.5;

// ── Types ────────────────────────────────────────────────────────────────────

/// Severity tier derived from a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Moderate,
    VeryHigh,
}

impl RiskTier {
    pub fn from_score(score: f64) -> Self {
        if score >= VERY_HIGH_THRESHOLD {
            RiskTier::VeryHigh
        } else if score >= MODERATE_THRESHOLD {
            RiskTier::Moderate
        } else {
            RiskTier::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Low      => "low",
            RiskTier::Moderate => "moderate",
            RiskTier::VeryHigh => "very high",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Classified risk for a single prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub score: f64,
    pub tier: RiskTier,
    pub color: Rgb,
    /// Marker tooltip, e.g. `Risco: 42.00%`.
    pub label: String,
}

// ── Classification ───────────────────────────────────────────────────────────

/// Reject scores outside [0, 1]. NaN is rejected too.
fn check_score(score: f64) -> FireResult<f64> {
    if (0.0..=1.0).contains(&score) {
        Ok(score)
    } else {
        log::error!("model returned risk score {score} outside [0, 1]");
        Err(FireError::OutOfRangeScore(score))
    }
}

/// Linear green→red gradient: R = round(255·risk), G = round(255·(1 − risk)), B = 0.
pub fn risk_color(score: f64) -> FireResult<Rgb> {
    let risk = check_score(score)?.clamp(0.0, 1.0);
    let red = (255.0 * risk).round() as u8;
    let green = (255.0 * (1.0 - risk)).round() as u8;
    Ok(Rgb::new(red, green, 0))
}

/// Map a score to its tier and marker color.
pub fn classify_risk(score: f64) -> FireResult<(RiskTier, Rgb)> {
    let score = check_score(score)?;
    Ok((RiskTier::from_score(score), risk_color(score)?))
}

/// Percentage with two decimals, matching the dashboard's `{:.2%}` display.
pub fn format_percent(score: f64) -> String {
    format!("{:.2}%", score * 100.0)
}

/// Full classification including the tooltip label.
pub fn assess_score(score: f64) -> FireResult<RiskAssessment> {
    let (tier, color) = classify_risk(score)?;
    Ok(RiskAssessment {
        score,
        tier,
        color,
        label: format!("Risco: {}", format_percent(score)),
    })
}
