pub struct StatsPublisher {
    client: reqwest::Client,
    endpoint: String,
}

impl StatsPublisher {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Only a `201 Created` counts as success.
    #[tracing::instrument(skip(self, stats), fields(match_id = %stats.match_id))]
    pub async fn publish(&self, stats: &common::MatchStats) -> Result<(), crate::RunError> {
        let response = self.client.post(&self.endpoint).json(stats).send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(crate::RunError::Publish {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!("Published stats for {} players", stats.data.len());

        Ok(())
    }
}
