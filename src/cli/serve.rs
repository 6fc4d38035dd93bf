use crate::api;
use crate::core::AppConfig;

pub async fn run(host: String, port: String) {
    let config = AppConfig::default();
    // Reject a bad CHRONOSAGE_TIMEZONE at startup, not on the first request
    let _ = config.tz();
    api::serve(host, port, config).await;
}
