// core/src/storage.rs
use std::collections::{BTreeSet, HashMap};
use std::error::Error;
use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, Utc};
use log::{info, warn};

use crate::classifier::ClassifierConfig;
use crate::error::DataAccessError;
use crate::point::MobilityPoint;
use crate::service::UserMobilityQueries;
use crate::types::{LocationStatus, Mode, PrivacyState};

/// Leser inn klassifikator-config fra disk (JSON).
/// Hvis filen ikke finnes, returneres defaults.
pub fn load_classifier_config(path: &str) -> Result<ClassifierConfig, Box<dyn Error>> {
    if Path::new(path).exists() {
        let contents = std::fs::read_to_string(path)?;
        let cfg: ClassifierConfig = serde_json::from_str(&contents)?;
        info!("classifier config loaded from {path}");
        Ok(cfg)
    } else {
        warn!("no classifier config at {path}, using defaults");
        Ok(ClassifierConfig::default())
    }
}

/// Lagrer klassifikator-config til disk som JSON (pretty-print).
pub fn save_classifier_config(cfg: &ClassifierConfig, path: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(cfg)?;
    std::fs::write(path, json)?;
    info!("classifier config saved to {path}");
    Ok(())
}

/// In-memory gateway: punkter per brukernavn bak en mutex.
/// Brukes i tester og i innbygde oppsett uten database.
#[derive(Default)]
pub struct MemoryUserMobilityQueries {
    points: Mutex<HashMap<String, Vec<MobilityPoint>>>,
}

impl MemoryUserMobilityQueries {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserMobilityQueries for MemoryUserMobilityQueries {
    fn create_mobility_point(
        &self,
        username: &str,
        _client: &str,
        point: &MobilityPoint,
    ) -> Result<(), DataAccessError> {
        let mut points = self.points.lock().unwrap();
        points
            .entry(username.to_string())
            .or_default()
            .push(point.clone());
        Ok(())
    }

    fn get_mobility_information(
        &self,
        username: &str,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
        privacy_state: Option<PrivacyState>,
        location_status: Option<LocationStatus>,
        mode: Option<Mode>,
    ) -> Result<Vec<MobilityPoint>, DataAccessError> {
        let points = self.points.lock().unwrap();

        let matches = points
            .get(username)
            .map(|user_points| {
                user_points
                    .iter()
                    .filter(|p| start_date.map_or(true, |d| p.time() >= d))
                    .filter(|p| end_date.map_or(true, |d| p.time() <= d))
                    .filter(|p| privacy_state.map_or(true, |s| p.privacy_state() == s))
                    .filter(|p| location_status.map_or(true, |s| p.location_status() == s))
                    .filter(|p| mode.map_or(true, |m| p.mode() == m))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(matches)
    }

    fn get_dates(
        &self,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        username: &str,
    ) -> Result<BTreeSet<NaiveDate>, DataAccessError> {
        let points = self.points.lock().unwrap();

        let dates = points
            .get(username)
            .map(|user_points| {
                user_points
                    .iter()
                    .filter(|p| p.time() >= start_date && p.time() <= end_date)
                    .map(|p| p.time().date_naive())
                    .collect()
            })
            .unwrap_or_default();

        Ok(dates)
    }
}
