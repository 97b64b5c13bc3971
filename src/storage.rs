use crate::models::TrackerData;
use chrono::NaiveDate;
use std::{env, path::Path, path::PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/fitness.json"))
}

pub async fn load_data_at(path: &Path, today: NaiveDate) -> TrackerData {
    let mut data = match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<TrackerData>(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                TrackerData::new(today)
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => TrackerData::new(today),
        Err(err) => {
            error!("failed to read data file: {err}");
            TrackerData::new(today)
        }
    };

    if let Some(entry) = data.roll_over(today) {
        info!(
            archived = %entry.date,
            today = %today,
            trained = entry.trained,
            streak = data.streak,
            "rolled over stored day"
        );
    }

    data
}

pub async fn persist_data(path: &Path, data: &TrackerData) -> Result<(), StorageError> {
    let payload = serde_json::to_vec_pretty(data)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, payload).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}
