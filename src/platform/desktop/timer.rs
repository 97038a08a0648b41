use std::time::Duration;

/// The desktop renderer drives its tasks on tokio, so its timer is usable from `spawn`.
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}
