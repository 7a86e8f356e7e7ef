use std::sync::Arc;

use anyhow::{Result, anyhow};
use chrono::{Timelike, Utc};
use tracing::{error, info};

use crate::{init::state::ServerState, util::time::duration_formatter::format_duration};

/// Next instant at `second_offset`.`millisecond_offset` into a minute that is strictly after `now`.
pub fn next_scheduled_mark(
    now: chrono::DateTime<chrono::Utc>,
    second_offset: u32,
    millisecond_offset: u32,
) -> Result<chrono::DateTime<chrono::Utc>> {
    let truncated_to_minute = now
        .with_second(0)
        .and_then(|dt| dt.with_nanosecond(0))
        .ok_or_else(|| anyhow!("Could not truncate to minute."))?;

    let mut target_time = truncated_to_minute
        + chrono::Duration::seconds(i64::from(second_offset))
        + chrono::Duration::milliseconds(i64::from(millisecond_offset));

    if target_time <= now {
        target_time += chrono::Duration::seconds(60);
    }

    Ok(target_time)
}

/// Returns the delay until the next mark and a log line describing it.
pub fn next_scheduled_delay(
    task_descriptor: &str,
    second_offset: u32,
    millisecond_offset: u32,
) -> Result<(tokio::time::Duration, String)> {
    let now = Utc::now();
    let next_mark = next_scheduled_mark(now, second_offset, millisecond_offset)?;

    let delay = (next_mark - now).to_std().map_err(|e| {
        anyhow!(
            "Could not schedule job at next_scheduled_mark(). Chrono->Std error: {:?}",
            e
        )
    })?;

    let schedule_msg = format!(
        "Task '{}' will run in {}",
        task_descriptor,
        format_duration(delay)
    );

    Ok((delay, schedule_msg))
}

/// Runs `task` once a minute at the given offset, forever.
pub async fn schedule_task_every_minute_at<F, Fut>(
    state: Arc<ServerState>,
    task: F,
    task_descriptor: String,
    second_offset: u32,
    millisecond_offset: u32,
) -> Result<()>
where
    F: Fn(Arc<ServerState>) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    loop {
        let (delay, schedule_message) =
            match next_scheduled_delay(&task_descriptor, second_offset, millisecond_offset) {
                Ok((d, m)) => (d, m),
                Err(e) => {
                    error!(
                        "Could not calculate next scheduled time for {}: {:?}",
                        task_descriptor, e
                    );
                    tokio::time::sleep(std::time::Duration::from_secs(10)).await;
                    continue;
                }
            };

        info!("{}", schedule_message);

        tokio::time::sleep(delay).await;

        task(Arc::clone(&state)).await;
    }
}
