use mongodb::Client;
use std::time::Instant;

/// Outcome of a [`check_health_detailed`] probe.
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    /// Driver error text when the probe failed.
    pub message: Option<String>,
    /// Round-trip time of the probe in milliseconds.
    pub response_time_ms: u64,
}

/// Probe MongoDB connectivity.
///
/// Lists database names, which forces server selection and a round trip
/// without touching any collection.
pub async fn check_health(client: &Client) -> bool {
    check_health_detailed(client).await.healthy
}

/// Probe MongoDB connectivity, reporting latency and error details.
///
/// # Example
/// ```ignore
/// let status = check_health_detailed(&client).await;
/// if !status.healthy {
///     warn!("MongoDB unreachable: {:?}", status.message);
/// }
/// ```
pub async fn check_health_detailed(client: &Client) -> HealthStatus {
    let start = Instant::now();
    let outcome = client.list_database_names().await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    match outcome {
        Ok(_) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms,
        },
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(e.to_string()),
            response_time_ms,
        },
    }
}
