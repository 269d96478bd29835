use std::time::Instant;

use tracing::error;

use crate::{
    application::services::Service,
    domain::{
        common::entities::app_errors::CoreError,
        crypto::ports::HasherRepository,
        health::{entities::DatabaseHealthStatus, ports::HealthCheckService},
        notification::ports::TaskNotifier,
    },
};

impl<H, N> HealthCheckService for Service<H, N>
where
    H: HasherRepository,
    N: TaskNotifier,
{
    async fn readiness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        let started = Instant::now();

        self.db.ping().await.map_err(|e| {
            error!("Database ping failed: {}", e);
            CoreError::Persistence(e.to_string())
        })?;

        Ok(DatabaseHealthStatus {
            status: "UP".to_string(),
            response_time_ms: started.elapsed().as_millis() as u64,
        })
    }
}
