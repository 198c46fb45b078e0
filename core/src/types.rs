// core/src/types.rs
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Bevegelsesmodus for et mobilitetspunkt.
/// ERROR markerer et punkt som feilet på klientsiden og aldri skal klassifiseres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Still,
    Walk,
    Run,
    Bike,
    Drive,
    Error,
}

impl FromStr for Mode {
    type Err = DomainError;

    /// Sjekket konvertering fra etikett (case-insensitiv).
    /// Ukjent etikett er en typet feil – aldri stille fallback.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "still" => Ok(Mode::Still),
            "walk" => Ok(Mode::Walk),
            "run" => Ok(Mode::Run),
            "bike" => Ok(Mode::Bike),
            "drive" => Ok(Mode::Drive),
            "error" => Ok(Mode::Error),
            other => Err(DomainError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // små bokstaver på wire-formatet
        let s = match self {
            Mode::Still => "still",
            Mode::Walk => "walk",
            Mode::Run => "run",
            Mode::Bike => "bike",
            Mode::Drive => "drive",
            Mode::Error => "error",
        };
        f.write_str(s)
    }
}

/// Skiller punkter med rå sensordata (kan klassifiseres)
/// fra rene modus-punkter (kan ikke).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubType {
    ModeOnly,
    SensorData,
}

impl FromStr for SubType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mode_only" => Ok(SubType::ModeOnly),
            "sensor_data" => Ok(SubType::SensorData),
            other => Err(DomainError::UnknownSubType(other.to_string())),
        }
    }
}

/// Kvalitet/tilgjengelighet på posisjonsfixen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationStatus {
    Valid,
    Network,
    Inaccurate,
    Stale,
    Unavailable,
}

impl FromStr for LocationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "valid" => Ok(LocationStatus::Valid),
            "network" => Ok(LocationStatus::Network),
            "inaccurate" => Ok(LocationStatus::Inaccurate),
            "stale" => Ok(LocationStatus::Stale),
            "unavailable" => Ok(LocationStatus::Unavailable),
            other => Err(DomainError::UnknownLocationStatus(other.to_string())),
        }
    }
}

/// Personvern-tilstand for punktet (arves fra kampanjemodellen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyState {
    Private,
    Shared,
}

impl FromStr for PrivacyState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "private" => Ok(PrivacyState::Private),
            "shared" => Ok(PrivacyState::Shared),
            other => Err(DomainError::UnknownPrivacyState(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_from_str_is_case_insensitive() {
        assert_eq!("STILL".parse::<Mode>().unwrap(), Mode::Still);
        assert_eq!("Drive".parse::<Mode>().unwrap(), Mode::Drive);
        assert_eq!("walk".parse::<Mode>().unwrap(), Mode::Walk);
    }

    #[test]
    fn mode_from_str_rejects_unknown_label() {
        let err = "teleport".parse::<Mode>();
        assert!(matches!(err, Err(DomainError::UnknownMode(_))));
    }

    #[test]
    fn mode_display_roundtrips() {
        for m in [
            Mode::Still,
            Mode::Walk,
            Mode::Run,
            Mode::Bike,
            Mode::Drive,
            Mode::Error,
        ] {
            assert_eq!(m.to_string().parse::<Mode>().unwrap(), m);
        }
    }
}
