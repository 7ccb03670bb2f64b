// src/view.rs
//! Derived presentation of the form state. Nothing here is stored; every
//! view is rebuilt from a `SubmissionForm` on demand.

use std::fmt;

use crate::form::SubmissionForm;
use crate::types::response::{AdviceResult, MatchResult};

pub const NONE_DETECTED: &str = "None detected";

/// Whole-number percentage of a 0–1 fraction.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.0}%", (fraction * 100.0).round())
}

/// Score as received: `82` stays `82`, `82.5` stays `82.5`.
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.0}", score)
    } else {
        score.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillTone {
    Matched,
    Missing,
}

impl SkillTone {
    pub fn css_class(self) -> &'static str {
        match self {
            SkillTone::Matched => "matched",
            SkillTone::Missing => "missing",
        }
    }
}

/// One labeled group of skill tokens. Empty lists become a single
/// placeholder token.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillSection {
    pub title: &'static str,
    pub tone: SkillTone,
    pub tokens: Vec<String>,
    pub placeholder: bool,
}

impl SkillSection {
    fn new(title: &'static str, tone: SkillTone, skills: &[String]) -> Self {
        if skills.is_empty() {
            Self {
                title,
                tone,
                tokens: vec![NONE_DETECTED.to_string()],
                placeholder: true,
            }
        } else {
            Self {
                title,
                tone,
                tokens: skills.to_vec(),
                placeholder: false,
            }
        }
    }

    pub fn css_class(&self) -> &'static str {
        if self.placeholder {
            "placeholder"
        } else {
            self.tone.css_class()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdviceSection {
    pub title: &'static str,
    pub items: Vec<String>,
    pub ordered: bool,
}

/// Advice is supplementary: empty lists are left out entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct AdviceView {
    pub summary: String,
    pub sections: Vec<AdviceSection>,
}

impl AdviceView {
    pub fn from_advice(advice: &AdviceResult) -> Self {
        let candidates = [
            ("Suggested resume bullets", &advice.rewritten_bullets, true),
            ("Skills to highlight", &advice.skills_to_highlight, false),
            ("Skills to develop", &advice.skills_to_develop, false),
        ];

        let sections = candidates
            .into_iter()
            .filter(|(_, items, _)| !items.is_empty())
            .map(|(title, items, ordered)| AdviceSection {
                title,
                items: items.clone(),
                ordered,
            })
            .collect();

        Self {
            summary: advice.tailored_summary.clone(),
            sections,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub overall_score: String,
    pub required_percent: String,
    pub nice_to_have_percent: String,
    pub skills: Vec<SkillSection>,
    pub advice: Option<AdviceView>,
}

impl ResultsView {
    pub fn new(result: &MatchResult, advice: Option<&AdviceResult>) -> Self {
        Self {
            overall_score: format_score(result.overall_score),
            required_percent: format_percent(result.required_match_fraction),
            nice_to_have_percent: format_percent(result.nice_to_have_match_fraction),
            skills: vec![
                SkillSection::new(
                    "Matched required skills",
                    SkillTone::Matched,
                    &result.matched_required_skills,
                ),
                SkillSection::new(
                    "Missing required skills",
                    SkillTone::Missing,
                    &result.missing_required_skills,
                ),
                SkillSection::new(
                    "Matched nice-to-have",
                    SkillTone::Matched,
                    &result.matched_nice_to_have,
                ),
                SkillSection::new(
                    "Missing nice-to-have",
                    SkillTone::Missing,
                    &result.missing_nice_to_have,
                ),
            ],
            advice: advice.map(AdviceView::from_advice),
        }
    }

    pub fn section(&self, title: &str) -> Option<&SkillSection> {
        self.skills.iter().find(|s| s.title == title)
    }
}

/// Everything the page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub job_description: String,
    pub resume_name: Option<String>,
    pub error: Option<String>,
    pub in_flight: bool,
    pub results: Option<ResultsView>,
}

impl FormView {
    pub fn from_form(form: &SubmissionForm) -> Self {
        Self {
            job_description: form.job_description().to_string(),
            resume_name: form.resume().map(|r| r.name.clone()),
            error: form.error().map(str::to_string),
            in_flight: form.is_in_flight(),
            results: form
                .match_result()
                .map(|result| ResultsView::new(result, form.advice())),
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.in_flight {
            "Analyzing..."
        } else {
            "Analyze match"
        }
    }
}

impl fmt::Display for ResultsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Overall score: {}", self.overall_score)?;
        writeln!(f, "Required skills matched: {}", self.required_percent)?;
        writeln!(f, "Nice-to-have matched: {}", self.nice_to_have_percent)?;

        for section in &self.skills {
            writeln!(f)?;
            writeln!(f, "{}:", section.title)?;
            let tokens: Vec<String> = section.tokens.iter().map(|t| format!("[{}]", t)).collect();
            writeln!(f, "  {}", tokens.join(" "))?;
        }

        if let Some(advice) = &self.advice {
            writeln!(f)?;
            writeln!(f, "Tailored summary:")?;
            writeln!(f, "  {}", advice.summary)?;

            for section in &advice.sections {
                writeln!(f)?;
                writeln!(f, "{}:", section.title)?;
                for (i, item) in section.items.iter().enumerate() {
                    if section.ordered {
                        writeln!(f, "  {}. {}", i + 1, item)?;
                    } else {
                        writeln!(f, "  - {}", item)?;
                    }
                }
            }
        }

        Ok(())
    }
}
