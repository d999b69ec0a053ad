// ABOUTME: Maps an inferred symptom pattern onto safe exercise buckets
// ABOUTME: Ordered keyword rule table evaluated by one generic matcher with a safe fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Pattern Mapping
//!
//! Translates the onboarding inference (`suspected_pattern`, focus tags,
//! confidence) into catalog bucket slugs. Rules are plain data: each rule
//! lists keywords, target buckets and a rationale, and a rule matches when
//! any of its keywords is a substring of the lowercase search text.
//!
//! The mapper never returns an empty bucket list. When nothing matches, or
//! when low confidence filters every bucket away, it falls back to
//! `mobility_general` + `isometric_general`.

use rehab_core::constants::buckets::{ISOMETRIC, MOBILITY, SAFE_FALLBACK};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Confidence attached to the upstream pattern inference
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    /// Strong evidence for the pattern
    High,
    /// Some evidence for the pattern
    #[default]
    Medium,
    /// Weak evidence; only mobility and isometric work is allowed
    Low,
}

impl ConfidenceLevel {
    /// Parse confidence from string, unknown values count as `Low`
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "high" => Self::High,
            "medium" | "moderate" => Self::Medium,
            _ => Self::Low,
        }
    }
}

/// Upstream inference used for the first plan of a program
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatternInference {
    /// Free-form suspected pattern, e.g. "patellofemoral pain"
    pub suspected_pattern: String,
    /// Focus tags, e.g. `["quad activation"]`
    #[serde(default)]
    pub recommended_focus: Vec<String>,
    /// Inference confidence
    pub confidence: ConfidenceLevel,
    /// Body area, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
}

impl PatternInference {
    /// Lowercase text searched by the rule keywords
    fn search_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(self.recommended_focus.len() + 2);
        parts.push(&self.suspected_pattern);
        parts.extend(self.recommended_focus.iter().map(String::as_str));
        if let Some(area) = &self.area {
            parts.push(area);
        }
        parts.join(" ").to_lowercase()
    }
}

/// One keyword rule
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatternRule {
    /// Lowercase keywords, matched as substrings
    pub keywords: Vec<String>,
    /// Bucket slugs contributed when the rule matches
    pub target_buckets: Vec<String>,
    /// Why these buckets suit the pattern
    pub rationale: String,
}

impl PatternRule {
    /// Build a rule from static slices
    #[must_use]
    pub fn new(keywords: &[&str], target_buckets: &[&str], rationale: &str) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            target_buckets: target_buckets.iter().map(|&b| b.to_owned()).collect(),
            rationale: rationale.to_owned(),
        }
    }

    /// Keywords of this rule found in `text`
    #[must_use]
    pub fn matched_keywords<'a>(&'a self, text: &str) -> Vec<&'a str> {
        self.keywords
            .iter()
            .filter(|k| !k.is_empty() && text.contains(k.as_str()))
            .map(String::as_str)
            .collect()
    }
}

/// Default ordered rule table
#[must_use]
pub fn default_rules() -> Vec<PatternRule> {
    vec![
        PatternRule::new(
            &["knee", "patell", "acl", "mcl", "menisc", "quad"],
            &["mobility_knee", "isometric_knee", "activation_quads"],
            "Knee pattern: restore knee range and reload the quadriceps",
        ),
        PatternRule::new(
            &["hip", "glute", "piriformis", "groin"],
            &["mobility_hip", "activation_glutes", "isometric_hip"],
            "Hip pattern: open hip range and wake up the glutes",
        ),
        PatternRule::new(
            &["back", "lumbar", "spine", "spinal", "sciatic", "disc"],
            &["mobility_spine", "activation_core", "isometric_core"],
            "Spinal pattern: gentle spinal movement with trunk control",
        ),
        PatternRule::new(
            &["shoulder", "rotator", "impingement", "scapula"],
            &["mobility_shoulder", "isometric_shoulder", "activation_scapular"],
            "Shoulder pattern: pain-free range plus cuff and scapular control",
        ),
        PatternRule::new(
            &["ankle", "achilles", "plantar", "calf", "foot"],
            &["mobility_ankle", "isometric_calf", "activation_foot"],
            "Ankle and foot pattern: ankle range and calf loading",
        ),
        PatternRule::new(
            &["neck", "cervical", "whiplash"],
            &["mobility_neck", "isometric_neck"],
            "Neck pattern: cervical range and low-load isometrics",
        ),
        PatternRule::new(
            &["tendin", "tendon"],
            &["isometric_general"],
            "Tendon irritation responds well to isometric loading",
        ),
        PatternRule::new(
            &["stiff", "arthritis", "arthrosis", "frozen"],
            &["mobility_general"],
            "Stiffness-dominant pattern: prioritise range of motion",
        ),
        PatternRule::new(
            &["weak", "instab", "unstable", "giving way", "balance"],
            &["activation_general", "stability_general"],
            "Weakness or instability: activation then stability work",
        ),
    ]
}

/// Output of a pattern mapping
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatternMapping {
    /// Bucket slugs, never empty
    pub buckets: Vec<String>,
    /// Rationale of every matching rule, in table order
    pub rationale: Vec<String>,
    /// Confidence the mapping was made with
    pub confidence_level: ConfidenceLevel,
    /// Keywords that matched
    pub matched_keywords: Vec<String>,
    /// Explanation of filtering or fallback
    pub notes: String,
    /// Whether the safe fallback buckets were used
    pub used_fallback: bool,
}

/// Rule-based pattern mapper
#[derive(Debug, Clone)]
pub struct PatternMapper {
    rules: Vec<PatternRule>,
}

impl Default for PatternMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternMapper {
    /// Create a mapper over the default rule table
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    /// Create a mapper over a custom rule table
    #[must_use]
    pub const fn with_rules(rules: Vec<PatternRule>) -> Self {
        Self { rules }
    }

    /// Rules in evaluation order
    #[must_use]
    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Map an inference onto bucket slugs
    #[must_use]
    pub fn map(&self, inference: &PatternInference) -> PatternMapping {
        let text = inference.search_text();

        let mut buckets: Vec<String> = Vec::new();
        let mut rationale = Vec::new();
        let mut matched_keywords: Vec<String> = Vec::new();

        for rule in &self.rules {
            let hits = rule.matched_keywords(&text);
            if hits.is_empty() {
                continue;
            }
            for keyword in hits {
                push_unique(&mut matched_keywords, keyword);
            }
            for bucket in &rule.target_buckets {
                push_unique(&mut buckets, bucket);
            }
            rationale.push(rule.rationale.clone());
        }

        if buckets.is_empty() {
            info!(
                pattern = %inference.suspected_pattern,
                "No pattern rule matched, using safe fallback buckets"
            );
            return Self::fallback(
                inference.confidence,
                rationale,
                matched_keywords,
                "No pattern rule matched; using safe fallback buckets",
            );
        }

        if inference.confidence == ConfidenceLevel::Low {
            buckets.retain(|b| b.contains(MOBILITY) || b.contains(ISOMETRIC));
            if buckets.is_empty() {
                info!(
                    pattern = %inference.suspected_pattern,
                    "Low confidence removed every bucket, using safe fallback buckets"
                );
                return Self::fallback(
                    inference.confidence,
                    rationale,
                    matched_keywords,
                    "Low confidence left no mobility or isometric bucket; using safe fallback buckets",
                );
            }
            return PatternMapping {
                buckets,
                rationale,
                confidence_level: inference.confidence,
                matched_keywords,
                notes: "Low confidence: restricted to mobility and isometric buckets".to_owned(),
                used_fallback: false,
            };
        }

        let notes = format!("Matched {} pattern rule(s)", rationale.len());
        PatternMapping {
            buckets,
            rationale,
            confidence_level: inference.confidence,
            matched_keywords,
            notes,
            used_fallback: false,
        }
    }

    fn fallback(
        confidence_level: ConfidenceLevel,
        mut rationale: Vec<String>,
        matched_keywords: Vec<String>,
        notes: &str,
    ) -> PatternMapping {
        rationale.push("Gentle mobility and isometric work is safe for most presentations".to_owned());
        PatternMapping {
            buckets: SAFE_FALLBACK.iter().map(|&b| b.to_owned()).collect(),
            rationale,
            confidence_level,
            matched_keywords,
            notes: notes.to_owned(),
            used_fallback: true,
        }
    }
}

fn push_unique(target: &mut Vec<String>, value: &str) {
    if !target.iter().any(|existing| existing == value) {
        target.push(value.to_owned());
    }
}
