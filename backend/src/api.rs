use axum::extract::State;
use std::sync::Arc;

pub fn router(context: Arc<crate::Context>) -> axum::Router {
    axum::Router::new()
        .route("/parse", axum::routing::post(parse))
        .with_state(context)
}

#[tracing::instrument(skip(context))]
async fn parse(
    State(context): State<Arc<crate::Context>>,
    axum::Json(request): axum::Json<common::ParseRequest>,
) -> Result<String, (axum::http::StatusCode, String)> {
    tracing::info!("Parse request for {} ({})", request.match_id, request.nickname);

    match crate::analysis::run(request, &context).await {
        Ok(summary) => Ok(format!("{}\n", summary)),
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            Err((axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}
