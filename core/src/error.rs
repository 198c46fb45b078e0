// core/src/error.rs
use thiserror::Error;

/// Datafeil på ett enkelt punkt (tilsvarer domenelaget).
/// Disse er alltid fatale for batchen – ingen stille retting.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Modus-etikett som ikke finnes i Mode-enumet.
    #[error("unknown mobility mode label: '{0}'")]
    UnknownMode(String),

    #[error("unknown location status: '{0}'")]
    UnknownLocationStatus(String),

    #[error("unknown privacy state: '{0}'")]
    UnknownPrivacyState(String),

    #[error("unknown subtype: '{0}'")]
    UnknownSubType(String),

    /// Rått akselerometer-payload kunne ikke parses.
    /// Path peker på feltet i JSON som feilet.
    #[error("malformed sample payload at '{path}': {message}")]
    MalformedSamples { path: String, message: String },

    /// WiFi-payload finnes, men kunne ikke parses (ulikt "fraværende").
    #[error("malformed wifi payload at '{path}': {message}")]
    MalformedWifi { path: String, message: String },

    /// Kontraktsbrudd fra kaller: punktet skulle vært hoppet over.
    #[error("classifier data cannot be set on a point with mode ERROR")]
    ClassifyErrorPoint,

    #[error("classifier data cannot be set on a point whose subtype is not sensor data")]
    ClassifyNonSensorPoint,

    #[error("the point does not contain sensor data")]
    MissingSensorData,

    /// Posisjon og posisjonstatus motsier hverandre
    /// (unavailable med posisjon, eller gyldig status uten).
    #[error("the location is inconsistent with the location status")]
    InconsistentLocation,

    #[error("the point does not contain wifi data")]
    MissingWifiData,
}

/// Opak gateway-feil (tilsvarer dataaksesslaget).
/// Kjernen tolker aldri innholdet – bare pakker den videre opp.
#[derive(Debug, Error)]
#[error("data access error: {0}")]
pub struct DataAccessError(pub String);

/// Tjenestenivå-feil. Alt fra classify/create/retrieve ender her.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{message}")]
    Domain {
        message: String,
        #[source]
        source: DomainError,
    },

    #[error(transparent)]
    DataAccess(#[from] DataAccessError),

    /// Ugyldig argument fra kaller (tomt brukernavn o.l.).
    #[error("{0}")]
    InvalidArgument(String),
}

impl ServiceError {
    /// Pakk en domenefeil med kontekstmelding, slik tjenestelaget gjør
    /// konsekvent for alle datafeil i klassifiseringspasset.
    pub fn domain(message: impl Into<String>, source: DomainError) -> Self {
        Self::Domain {
            message: message.into(),
            source,
        }
    }
}
