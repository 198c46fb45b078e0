// core/src/lib.rs
//! Mobility core: punktmodell og klassifiseringspipeline for mobilitetsdata.
//!
//! Kjernen er `classify_points`/`MobilityServices::classify_data`: et
//! sekvensielt pass over en kronologisk ordnet batch av mobilitetspunkter
//! som tråder forrige WiFi-skanning og forrige WiFi-modus fra punkt til
//! punkt, kaller klassifikatoren per kvalifisert punkt og fletter
//! resultatet tilbake i punktet. HTTP-laget, autentisering og SQL ligger
//! utenfor – gatewayen er et trait med en in-memory implementasjon.

pub mod classifier;
pub mod error;
pub mod metrics;
pub mod models;
pub mod point;
pub mod service;
pub mod storage;
pub mod types;

pub use classifier::{Classification, Classifier, ClassifierConfig, MobilityClassifier};
pub use error::{DataAccessError, DomainError, ServiceError};
pub use models::{AccessPoint, Location, Sample, SensorData, WifiScan};
pub use point::{ClassifierData, ClassifierFeatures, MobilityPoint};
pub use service::{classify_points, MobilityServices, UserMobilityQueries};
pub use storage::{load_classifier_config, save_classifier_config, MemoryUserMobilityQueries};
pub use types::{LocationStatus, Mode, PrivacyState, SubType};
