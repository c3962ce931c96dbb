use clap::Parser;
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let registry = tracing_subscriber::Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::filter_fn(|meta| {
            meta.target().contains("backend") || meta.target().contains("analysis")
        }));
    tracing::subscriber::set_global_default(registry)?;

    let args = backend::config::Args::parse();

    tracing::info!("Starting...");

    let context = backend::Context::from_args(&args)?;

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    tracing::info!("Listening on {}", args.listen);

    axum::serve(listener, backend::api::router(std::sync::Arc::new(context))).await?;

    Ok(())
}
