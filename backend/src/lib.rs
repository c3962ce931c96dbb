pub mod acquire;
pub mod analysis;
pub mod api;
pub mod config;
pub mod decode;
pub mod publish;
pub mod storage;

mod error;
pub use error::{ConfigError, RunError};

/// Shared by every run, holds nothing that is specific to a single match.
pub struct Context {
    pub http: reqwest::Client,
    pub work_dir: std::path::PathBuf,
    pub decoder: std::sync::Arc<dyn decode::EventDecoder>,
    pub analyses: std::sync::Arc<Vec<std::sync::Arc<dyn crate::analysis::Analysis + Send + Sync>>>,
    pub sinks: crate::analysis::Sinks,
}

impl Context {
    pub fn from_args(args: &config::Args) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(args.http_timeout_secs))
            .build()?;

        let analyses: Vec<std::sync::Arc<dyn crate::analysis::Analysis + Send + Sync>> = vec![
            std::sync::Arc::new(crate::analysis::stats::StatsAnalysis::new()),
            std::sync::Arc::new(crate::analysis::heatmap::HeatmapAnalysis::new(&args.maps_dir)),
        ];

        Ok(Self {
            http: http.clone(),
            work_dir: args.work_dir.clone(),
            decoder: std::sync::Arc::new(decode::JsonLinesDecoder::new()),
            analyses: std::sync::Arc::new(analyses),
            sinks: crate::analysis::Sinks {
                publisher: publish::StatsPublisher::new(http, args.stats_endpoint.clone()),
                storage: args.image_storage()?,
            },
        })
    }
}
