pub mod heatmap;
pub mod stats;

#[derive(Debug, Clone)]
pub struct AnalysisInput {
    pub match_id: String,
    pub nickname: String,
    pub map: String,
    pub calibration: analysis::calibration::MapCalibration,
    pub events: std::sync::Arc<[analysis::event::Event]>,
}

/// Everything the deferred part of an analysis writes its results to.
pub struct Sinks {
    pub publisher: crate::publish::StatsPublisher,
    pub storage: Box<dyn crate::storage::ImageStorage>,
}

/// I/O an analysis wants performed once every analysis of the run computed
/// its results.
pub type Deferred = Box<
    dyn FnOnce(&Sinks) -> futures::future::BoxFuture<'_, Result<(), crate::RunError>> + Send,
>;

pub trait Analysis {
    fn analyse(&self, input: &AnalysisInput) -> Result<Deferred, crate::RunError>;
}

#[derive(Debug, PartialEq)]
pub struct RunSummary {
    pub match_id: String,
    pub map: String,
    pub events: usize,
    pub elapsed: std::time::Duration,
}

impl core::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Analysed {} ({}, {} events) in {} ms",
            self.match_id,
            self.map,
            self.events,
            self.elapsed.as_millis()
        )
    }
}

fn validate(request: &common::ParseRequest) -> Result<(), crate::RunError> {
    let is_safe = |s: &str| {
        !s.is_empty()
            && s
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !s.contains("..")
    };

    if !is_safe(&request.match_id) {
        return Err(crate::RunError::InvalidRequest(format!(
            "match id {:?}",
            request.match_id
        )));
    }
    if request.nickname.is_empty() || request.nickname.contains(['/', '\\']) {
        return Err(crate::RunError::InvalidRequest(format!(
            "nickname {:?}",
            request.nickname
        )));
    }

    Ok(())
}

/// Runs every analysis for one match. Nothing is published or uploaded unless
/// all of them computed their results.
#[tracing::instrument(skip(context, request), fields(match_id = %request.match_id))]
pub async fn run(
    request: common::ParseRequest,
    context: &crate::Context,
) -> Result<RunSummary, crate::RunError> {
    let started = std::time::Instant::now();

    validate(&request)?;

    // Several runs for the same match may overlap, each gets its own folder
    let run_dir = context
        .work_dir
        .join(format!("{}-{}", request.match_id, uuid::Uuid::now_v7()));

    let acquired = crate::acquire::acquire(
        &context.http,
        &request.demo_url,
        &request.match_id,
        &run_dir,
    )
    .await;
    let result = match acquired {
        Ok(demo_path) => process(request, context, demo_path).await,
        Err(e) => Err(e),
    };
    let cleanup = match tokio::fs::remove_dir_all(&run_dir).await {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        other => other,
    };

    let mut summary = result?;
    cleanup?;

    summary.elapsed = started.elapsed();
    tracing::info!("Operation took: {} ms", summary.elapsed.as_millis());

    Ok(summary)
}

async fn process(
    request: common::ParseRequest,
    context: &crate::Context,
    demo_path: std::path::PathBuf,
) -> Result<RunSummary, crate::RunError> {
    let decoder = context.decoder.clone();
    let demo = tokio::task::spawn_blocking(move || decoder.decode(&demo_path)).await??;

    tracing::info!("MAP: {}", demo.map);
    let calibration = *analysis::calibration::MapCalibration::for_map(&demo.map)?;

    let input = AnalysisInput {
        match_id: request.match_id,
        nickname: request.nickname,
        map: demo.map,
        calibration,
        events: demo.events.into(),
    };

    let summary = RunSummary {
        match_id: input.match_id.clone(),
        map: input.map.clone(),
        events: input.events.len(),
        elapsed: std::time::Duration::ZERO,
    };

    let analyses = context.analyses.clone();
    let deferred = tokio::task::spawn_blocking(move || {
        analyses
            .iter()
            .map(|analysis| analysis.analyse(&input))
            .collect::<Result<Vec<_>, _>>()
    })
    .await??;

    for action in deferred {
        action(&context.sinks).await?;
    }

    Ok(summary)
}
