use serde::{Deserialize, Serialize};

// ===== Analysis Service Response Types =====

/// Body of a successful `POST /api/jobmatch_pdf`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(rename = "match")]
    pub match_result: MatchResult,
    #[serde(default)]
    pub jd: JobPosting,
    #[serde(default)]
    pub resume: ResumeProfile,
    #[serde(default)]
    pub advice: Option<AdviceResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub overall_score: f64,
    pub required_match_fraction: f64,
    pub nice_to_have_match_fraction: f64,
    pub matched_required_skills: Vec<String>,
    pub missing_required_skills: Vec<String>,
    pub matched_nice_to_have: Vec<String>,
    pub missing_nice_to_have: Vec<String>,
}

/// LLM-authored tailoring suggestions. The service answers `{}` when it has
/// none, so every field defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdviceResult {
    #[serde(default)]
    pub tailored_summary: String,
    #[serde(default)]
    pub rewritten_bullets: Vec<String>,
    #[serde(default)]
    pub skills_to_highlight: Vec<String>,
    #[serde(default)]
    pub skills_to_develop: Vec<String>,
}

// Pass-through: accepted and kept, never rendered by the form view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub required_skills: Vec<String>,
    pub nice_to_have_skills: Vec<String>,
    pub responsibilities: Vec<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeProfile {
    pub name: String,
    pub headline: String,
    pub skills: Vec<String>,
    pub tools: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn match_body() -> serde_json::Value {
        json!({
            "overall_score": 82,
            "required_match_fraction": 0.75,
            "nice_to_have_match_fraction": 0.5,
            "matched_required_skills": ["python", "sql"],
            "missing_required_skills": ["spark"],
            "matched_nice_to_have": [],
            "missing_nice_to_have": ["airflow"]
        })
    }

    #[test]
    fn test_full_payload() {
        let body = json!({
            "match": match_body(),
            "jd": {
                "title": "Data Engineer",
                "company": "Acme",
                "location": "Remote",
                "required_skills": ["python", "sql", "spark"],
                "nice_to_have_skills": ["airflow"],
                "responsibilities": ["Build pipelines"],
                "keywords": ["etl"]
            },
            "resume": {
                "name": "Sam Doe",
                "headline": "CS student",
                "skills": ["python"],
                "tools": ["sql"]
            },
            "advice": {
                "tailored_summary": "Solid fit.",
                "rewritten_bullets": ["Built an ETL job"],
                "skills_to_highlight": ["sql"],
                "skills_to_develop": ["spark"]
            }
        });

        let response: AnalysisResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.match_result.overall_score, 82.0);
        assert_eq!(response.match_result.missing_required_skills, vec!["spark"]);
        assert_eq!(response.jd.company, "Acme");
        assert_eq!(response.resume.tools, vec!["sql"]);
        let advice = response.advice.unwrap();
        assert_eq!(advice.tailored_summary, "Solid fit.");
        assert_eq!(advice.skills_to_develop, vec!["spark"]);
    }

    #[test]
    fn test_advice_missing_or_null() {
        let missing: AnalysisResponse =
            serde_json::from_value(json!({ "match": match_body(), "jd": {}, "resume": {} }))
                .unwrap();
        assert!(missing.advice.is_none());

        let null: AnalysisResponse =
            serde_json::from_value(json!({ "match": match_body(), "advice": null })).unwrap();
        assert!(null.advice.is_none());
    }

    #[test]
    fn test_empty_advice_object() {
        let response: AnalysisResponse =
            serde_json::from_value(json!({ "match": match_body(), "advice": {} })).unwrap();
        assert_eq!(response.advice, Some(AdviceResult::default()));
    }

    #[test]
    fn test_match_is_required() {
        let result = serde_json::from_value::<AnalysisResponse>(json!({ "jd": {}, "resume": {} }));
        assert!(result.is_err());
    }
}
