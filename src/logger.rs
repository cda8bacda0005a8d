use std::fs::OpenOptions;
use std::io::Write;
use chrono::Utc;
use tracing::warn;
use crate::metrics::Task;
use crate::models::Usage;

pub fn format_entry(task: Task, model: &str, usage: &Usage) -> String {

    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S");
    format!(
        "{} | {:8} | {:30} | {:6} in | {:6} out | {:7} total\n",
        timestamp,
        task.as_str(),
        model,
        usage.prompt_tokens,
        usage.completion_tokens,
        usage.total_tokens
    )

}

// append-only ledger of completed tasks, a write failure never fails the request
pub fn log_request(log_path: &str, task: Task, model: &str, usage: &Usage) {

    let log_entry = format_entry(task, model, usage);

    match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(mut file) => {
            if let Err(e) = file.write_all(log_entry.as_bytes()) {
                warn!(path = %log_path, error = %e, "failed to write request log");
            }
        }
        Err(e) => warn!(path = %log_path, error = %e, "failed to open request log")
    }

}
