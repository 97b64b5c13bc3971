use crate::actions::{apply, Action};
use crate::errors::AppError;
use crate::models::TrackerData;
use crate::storage::persist_data;
use chrono::{DateTime, Local, NaiveDate};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info};

#[derive(Clone)]
pub struct AppState {
    data_path: PathBuf,
    data: Arc<Mutex<TrackerData>>,
    changes: Arc<watch::Sender<TrackerData>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: TrackerData) -> Self {
        let (changes, _) = watch::channel(data.clone());
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            changes: Arc::new(changes),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<TrackerData> {
        self.changes.subscribe()
    }

    pub async fn snapshot(&self) -> Result<TrackerData, AppError> {
        self.snapshot_at(Local::now().date_naive()).await
    }

    pub async fn snapshot_at(&self, today: NaiveDate) -> Result<TrackerData, AppError> {
        let mut data = self.data.lock().await;
        if self.roll_over_locked(&mut data, today) {
            self.commit(&data).await?;
        }
        Ok(data.clone())
    }

    pub async fn dispatch(&self, action: Action) -> Result<TrackerData, AppError> {
        self.dispatch_at(action, Local::now()).await
    }

    pub async fn dispatch_at(
        &self,
        action: Action,
        now: DateTime<Local>,
    ) -> Result<TrackerData, AppError> {
        let mut data = self.data.lock().await;
        let rolled = self.roll_over_locked(&mut data, now.date_naive());

        debug!(action = action.name(), "applying action");
        if let Err(err) = apply(&mut data, action, now) {
            if rolled {
                self.commit(&data).await?;
            }
            return Err(err.into());
        }

        self.commit(&data).await?;
        Ok(data.clone())
    }

    fn roll_over_locked(&self, data: &mut TrackerData, today: NaiveDate) -> bool {
        match data.roll_over(today) {
            Some(entry) => {
                info!(
                    archived = %entry.date,
                    today = %today,
                    trained = entry.trained,
                    streak = data.streak,
                    "rolled over day"
                );
                true
            }
            None => false,
        }
    }

    async fn commit(&self, data: &TrackerData) -> Result<(), AppError> {
        persist_data(&self.data_path, data).await?;
        self.changes.send_replace(data.clone());
        Ok(())
    }
}
