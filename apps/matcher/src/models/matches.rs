use serde::{Deserialize, Serialize};

/// Per-dimension sub-scores and the server's rationale for a match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchReasons {
    #[serde(default)]
    pub experience_match: f64,
    #[serde(default)]
    pub growth_match: f64,
    #[serde(default)]
    pub industry_match: f64,
    #[serde(default)]
    pub technical_match: f64,
    #[serde(default)]
    pub reasoning: String,
}

/// A server-ranked company match. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatch {
    pub company_name: String,
    #[serde(default)]
    pub company_description: String,
    pub final_score: f64, // 0.0 – 1.0
    #[serde(default)]
    pub match_reasons: MatchReasons,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchList {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub matches: Vec<JobMatch>,
}

/// Body of `GET /api/matches`. The list is nested one level deeper than the top-level count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchesResponse {
    #[serde(default)]
    pub count: usize,
    pub matches: MatchList,
}

/// Display percentage for a score in [0,1]. The stored score is never rounded.
pub fn score_percent(score: f64) -> i64 {
    (score * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_percent_rounds_to_nearest() {
        assert_eq!(score_percent(0.873), 87);
        assert_eq!(score_percent(0.875), 88);
        assert_eq!(score_percent(0.0), 0);
        assert_eq!(score_percent(1.0), 100);
    }

    #[test]
    fn test_matches_response_deserializes_nested_list() {
        let body = serde_json::json!({
            "count": 1,
            "matches": {
                "count": 1,
                "matches": [{
                    "company_name": "Acme & Co",
                    "company_description": "Rockets",
                    "final_score": 0.873,
                    "match_reasons": {
                        "experience_match": 0.9,
                        "growth_match": 0.5,
                        "industry_match": 0.7,
                        "technical_match": 0.81,
                        "reasoning": "Strong backend fit"
                    }
                }]
            }
        });
        let parsed: MatchesResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.matches.matches.len(), 1);
        let m = &parsed.matches.matches[0];
        assert_eq!(m.company_name, "Acme & Co");
        assert_eq!(m.final_score, 0.873);
        assert_eq!(m.match_reasons.reasoning, "Strong backend fit");
    }
}
