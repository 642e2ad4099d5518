use cinescout_client::ClientError;

pub mod catalog;
pub mod config;
pub mod describe;
pub mod recommend;

pub use catalog::{list_genres, list_languages};
pub use describe::run_describe;
pub use recommend::run_recommend;

/// Wrap a service failure for the one-shot commands, saying which request
/// failed and whether trying again later may help.
pub fn service_failure(err: ClientError) -> anyhow::Error {
    let summary = failure_summary(&err);
    anyhow::Error::new(err).context(summary)
}

fn failure_summary(err: &ClientError) -> String {
    let request = err
        .operation()
        .map_or_else(|| String::from("Service request"), |op| format!("Request for {}", op));
    if err.is_transient() {
        format!("{} failed; the service may be unavailable, try again later", request)
    } else {
        format!("{} failed", request)
    }
}
