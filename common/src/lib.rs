pub mod match_stats;
pub use match_stats::MatchStats;

/// Body of a request to analyse one match.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParseRequest {
    pub demo_url: String,
    pub nickname: String,
    pub match_id: String,
}
