// core/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::LocationStatus;

/// Én diskret sensoravlesning: tidsoffset + 3-akse akselerometer.
/// Immutabel etter konstruksjon.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Sample {
    pub t_ms: i64, // offset fra punktets tidsstempel (ms)
    pub x: f64,    // m/s²
    pub y: f64,    // m/s²
    pub z: f64,    // m/s²
}

impl Sample {
    /// Magnitude av akselerasjonsvektoren (m/s²).
    #[inline]
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Ett observert aksesspunkt i en WiFi-skanning.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AccessPoint {
    pub ssid: String,
    pub strength: f64, // dBm
}

/// En tidsstemplet WiFi-skanning: settet av observerte aksesspunkter.
/// "Fraværende" modelleres som Option<WifiScan> hos brukerne av typen.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WifiScan {
    pub time: i64, // epoch millis
    pub scan: Vec<AccessPoint>,
}

impl WifiScan {
    /// Andel av aksesspunktene i `self` som også finnes i `other` (på ssid).
    /// Brukes til å avgjøre om enheten har flyttet seg mellom to skanninger.
    pub fn overlap_ratio(&self, other: &WifiScan) -> f64 {
        if self.scan.is_empty() {
            return 0.0;
        }
        let shared = self
            .scan
            .iter()
            .filter(|ap| other.scan.iter().any(|o| o.ssid == ap.ssid))
            .count();
        shared as f64 / self.scan.len() as f64
    }
}

/// Rå sensordata for et punkt med subtype sensor_data.
/// Payloadene holdes som rå JSON og parses først når de trengs –
/// et malformet payload skal feile klassifiseringen, ikke opplastingen.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SensorData {
    pub speed: f64, // m/s fra GPS
    /// Akselerometer-payload: JSON-array av samples.
    pub accel_data: Value,
    /// WiFi-payload: JSON-objekt {time, scan}, eller None hvis
    /// klienten ikke fanget WiFi for dette punktet.
    #[serde(default)]
    pub wifi_data: Option<Value>,
}

impl SensorData {
    pub fn new(speed: f64, accel_data: Value, wifi_data: Option<Value>) -> Self {
        Self {
            speed,
            accel_data,
            wifi_data,
        }
    }
}

/// Posisjonsmetadata for punktet. Mangler når status er unavailable.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f64, // meter
    pub provider: String,
    pub time: DateTime<Utc>,
}

impl Location {
    /// Konsistenssjekk mot status: unavailable skal ikke ha posisjon.
    pub fn consistent_with(loc: Option<&Location>, status: LocationStatus) -> bool {
        match status {
            LocationStatus::Unavailable => loc.is_none(),
            _ => loc.is_some(),
        }
    }
}
