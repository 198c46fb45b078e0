// core/src/point.rs
use chrono::{DateTime, Utc};
use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_path_to_error as spte;

use crate::error::DomainError;
use crate::models::{Location, Sample, SensorData, WifiScan};
use crate::types::{LocationStatus, Mode, PrivacyState, SubType};

/// Feature-bunt fra klassifikatoren.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierFeatures {
    /// FFT-sammendrag (magnitude per bin).
    pub fft: Vec<f64>,
    /// Varians av akselerasjonsmagnituden.
    pub variance: f64,
    /// Varians trimmet ved 95-persentilen.
    pub n95_variance: f64,
    /// Gjennomsnittlig magnitude.
    pub average: f64,
}

/// Klassifikator-output slik det persisteres på punktet.
/// Settes KUN av klassifiseringspasset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierData {
    pub mode: Mode,
    /// None når klassifikatoren ga modus uten feature-bunt
    /// (typisk for få samples).
    pub features: Option<ClassifierFeatures>,
}

/// Det sentrale domeneobjektet: ett tidsstemplet mobilitetspunkt.
///
/// Livssyklus: konstruert fra opplastingspayload (kun klient-felter) →
/// eventuelt beriket in-place av klassifiseringspasset → levert til
/// gateway for lagring, eller returnert som read-only spørringsresultat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MobilityPoint {
    time: DateTime<Utc>,
    timezone: String,
    location_status: LocationStatus,
    location: Option<Location>,
    client: String,
    privacy_state: PrivacyState,
    mode: Mode,
    sub_type: SubType,
    sensor_data: Option<SensorData>,
    classifier_data: Option<ClassifierData>,
}

impl MobilityPoint {
    /// Konstruktør for et klient-rapportert punkt.
    /// Et sensor_data-punkt uten SensorData-payload er ugyldig.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        time: DateTime<Utc>,
        timezone: impl Into<String>,
        location_status: LocationStatus,
        location: Option<Location>,
        client: impl Into<String>,
        privacy_state: PrivacyState,
        mode: Mode,
        sub_type: SubType,
        sensor_data: Option<SensorData>,
    ) -> Result<Self, DomainError> {
        if sub_type == SubType::SensorData && sensor_data.is_none() {
            return Err(DomainError::MissingSensorData);
        }
        if !Location::consistent_with(location.as_ref(), location_status) {
            return Err(DomainError::InconsistentLocation);
        }

        Ok(Self {
            time,
            timezone: timezone.into(),
            location_status,
            location,
            client: client.into(),
            privacy_state,
            mode,
            sub_type,
            sensor_data,
            classifier_data: None,
        })
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    pub fn location_status(&self) -> LocationStatus {
        self.location_status
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn client(&self) -> &str {
        &self.client
    }

    pub fn privacy_state(&self) -> PrivacyState {
        self.privacy_state
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn sub_type(&self) -> SubType {
        self.sub_type
    }

    pub fn sensor_data(&self) -> Option<&SensorData> {
        self.sensor_data.as_ref()
    }

    pub fn classifier_data(&self) -> Option<&ClassifierData> {
        self.classifier_data.as_ref()
    }

    /// Har punktet et WiFi-payload i det hele tatt?
    /// (Fraværende payload er normalt; malformet payload er datafeil.)
    pub fn has_wifi_data(&self) -> bool {
        self.sensor_data
            .as_ref()
            .map(|sd| sd.wifi_data.is_some())
            .unwrap_or(false)
    }

    /// Parser sample-sekvensen fra det rå akselerometer-payloadet.
    pub fn samples(&self) -> Result<Vec<Sample>, DomainError> {
        let sensor_data = self
            .sensor_data
            .as_ref()
            .ok_or(DomainError::MissingSensorData)?;

        parse_payload(&sensor_data.accel_data).map_err(|(path, message)| {
            DomainError::MalformedSamples { path, message }
        })
    }

    /// Parser WiFi-skanningen fra payloadet.
    /// Kontraktsfeil hvis payload mangler – kallere sjekker has_wifi_data først.
    pub fn wifi_scan(&self) -> Result<WifiScan, DomainError> {
        let sensor_data = self
            .sensor_data
            .as_ref()
            .ok_or(DomainError::MissingSensorData)?;

        let wifi = sensor_data
            .wifi_data
            .as_ref()
            .ok_or(DomainError::MissingWifiData)?;

        parse_payload(wifi)
            .map_err(|(path, message)| DomainError::MalformedWifi { path, message })
    }

    /// Felles kontraktssjekk for begge klassifikator-setterne.
    /// Brudd her er programmeringsfeil hos kaller, ikke datakvalitet.
    fn check_classifiable(&self) -> Result<(), DomainError> {
        if self.mode == Mode::Error {
            return Err(DomainError::ClassifyErrorPoint);
        }
        if self.sub_type != SubType::SensorData {
            return Err(DomainError::ClassifyNonSensorPoint);
        }
        if self.sensor_data.is_none() {
            return Err(DomainError::MissingSensorData);
        }
        Ok(())
    }

    /// Registrerer full klassifikator-output (modus + feature-bunt).
    pub fn set_classifier_data(
        &mut self,
        fft: Vec<f64>,
        variance: f64,
        n95_variance: f64,
        average: f64,
        mode: Mode,
    ) -> Result<(), DomainError> {
        self.check_classifiable()?;

        self.classifier_data = Some(ClassifierData {
            mode,
            features: Some(ClassifierFeatures {
                fft,
                variance,
                n95_variance,
                average,
            }),
        });
        Ok(())
    }

    /// Registrerer modus uten feature-bunt (for få samples e.l.).
    pub fn set_classifier_mode_only(&mut self, mode: Mode) -> Result<(), DomainError> {
        self.check_classifiable()?;

        self.classifier_data = Some(ClassifierData {
            mode,
            features: None,
        });
        Ok(())
    }
}

/// Deserialiser et rått JSON-payload med path-informasjon i feilmeldingen.
fn parse_payload<T: DeserializeOwned>(value: &Value) -> Result<T, (String, String)> {
    let de = value.clone().into_deserializer();
    spte::deserialize(de).map_err(|e| (e.path().to_string(), e.inner().to_string()))
}
