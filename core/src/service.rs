// core/src/service.rs
use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, info};

use crate::classifier::{Classifier, MobilityClassifier};
use crate::error::{DataAccessError, ServiceError};
use crate::metrics::METRICS;
use crate::point::MobilityPoint;
use crate::types::{LocationStatus, Mode, PrivacyState, SubType};

/// Gateway mot persistenslaget. Alle metoder kan feile med en opak
/// dataaksessfeil som tjenestelaget pakker videre uten å tolke.
pub trait UserMobilityQueries {
    fn create_mobility_point(
        &self,
        username: &str,
        client: &str,
        point: &MobilityPoint,
    ) -> Result<(), DataAccessError>;

    /// Filtrert uthenting. Username er påkrevd; alle andre filtre er
    /// valgfrie og snevrer inn resultatet (snitt-semantikk).
    /// Datogrenser er inklusive i begge ender.
    #[allow(clippy::too_many_arguments)]
    fn get_mobility_information(
        &self,
        username: &str,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
        privacy_state: Option<PrivacyState>,
        location_status: Option<LocationStatus>,
        mode: Option<Mode>,
    ) -> Result<Vec<MobilityPoint>, DataAccessError>;

    /// Distinkte kalenderdatoer (UTC) med minst ett punkt i intervallet.
    fn get_dates(
        &self,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        username: &str,
    ) -> Result<BTreeSet<NaiveDate>, DataAccessError>;
}

/// Tjenestene rundt mobilitetspunkter: klassifisering, lagring, uthenting.
///
/// Konstrueres eksplisitt med sin gateway (dependency injection) –
/// én instans per sammensetting, ingen global singleton.
pub struct MobilityServices<Q> {
    queries: Q,
}

impl<Q: UserMobilityQueries> MobilityServices<Q> {
    pub fn new(queries: Q) -> Self {
        Self { queries }
    }

    /// Kjører klassifikatoren over alle punktene i batchen, i listerekkefølge.
    ///
    /// Rekkefølgen er bærende: forrige WiFi-skanning og forrige WiFi-modus
    /// trådes fra punkt til punkt, så kaller MÅ levere punktene i reell
    /// kronologisk innsamlingsrekkefølge. En fersk klassifikator lages per
    /// batch, så parallelle batcher deler aldri tilstand.
    pub fn classify_data(&self, points: &mut [MobilityPoint]) -> Result<(), ServiceError> {
        let mut classifier = MobilityClassifier::new();
        classify_points(&mut classifier, points)
    }

    /// Persisterer en liste klient-rapporterte punkter for (username, client).
    pub fn create_mobility_point(
        &self,
        username: &str,
        client: &str,
        points: &[MobilityPoint],
    ) -> Result<(), ServiceError> {
        if username.is_empty() {
            return Err(ServiceError::InvalidArgument(
                "the username cannot be empty".to_string(),
            ));
        }
        if client.is_empty() {
            return Err(ServiceError::InvalidArgument(
                "the client cannot be empty".to_string(),
            ));
        }

        for point in points {
            self.queries.create_mobility_point(username, client, point)?;
        }
        Ok(())
    }

    /// Henter punktene som tilfredsstiller filtrene. Kun username er
    /// påkrevd; hvert ekstra filter snevrer inn mengden.
    #[allow(clippy::too_many_arguments)]
    pub fn retrieve_mobility_data(
        &self,
        username: &str,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
        privacy_state: Option<PrivacyState>,
        location_status: Option<LocationStatus>,
        mode: Option<Mode>,
    ) -> Result<Vec<MobilityPoint>, ServiceError> {
        Ok(self.queries.get_mobility_information(
            username,
            start_date,
            end_date,
            privacy_state,
            location_status,
            mode,
        )?)
    }

    /// Datoene brukeren har minst ett punkt på, innenfor intervallet.
    pub fn get_dates(
        &self,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        username: &str,
    ) -> Result<BTreeSet<NaiveDate>, ServiceError> {
        Ok(self.queries.get_dates(start_date, end_date, username)?)
    }
}

/// Selve klassifiseringspasset, skilt ut så det kan testes med en
/// skriptet klassifikator. Muterer punktene in-place; eierskapet til
/// listen ligger hos kaller.
///
/// Per punkt:
/// 1. Mode == error → hopp over (ingen mutasjon, ingen state-oppdatering).
/// 2. Subtype != sensor_data → hopp over. Merk: hoppede punkter rører
///    IKKE den bårne WiFi-tilstanden.
/// 3. Parse samples (datafeil → hele batchen feiler).
/// 4. Parse WiFi-skanning hvis payload finnes; fraværende payload er
///    normalt og nullstiller carryen.
/// 5. Klassifiser med båret tilstand.
/// 6. Oppdater båret tilstand.
/// 7. Flett resultatet inn i punktet (full bunt eller kun modus).
pub fn classify_points<C: Classifier>(
    classifier: &mut C,
    points: &mut [MobilityPoint],
) -> Result<(), ServiceError> {
    if points.is_empty() {
        return Ok(());
    }

    info!("classifying batch of {} mobility points", points.len());

    let mut previous_wifi_scan = None;
    let mut previous_wifi_mode: Option<String> = None;

    for point in points.iter_mut() {
        if point.mode() == Mode::Error {
            METRICS.points_skipped_total.inc();
            continue;
        }
        if point.sub_type() != SubType::SensorData {
            METRICS.points_skipped_total.inc();
            continue;
        }

        let samples = point.samples().map_err(|e| {
            METRICS.batches_failed_total.inc();
            ServiceError::domain("there was a problem retrieving the samples", e)
        })?;

        // Fraværende WiFi er normalt; malformet WiFi er datafeil.
        let current_wifi = if point.has_wifi_data() {
            Some(point.wifi_scan().map_err(|e| {
                METRICS.batches_failed_total.inc();
                ServiceError::domain("the mobility point's wifi data could not be read", e)
            })?)
        } else {
            None
        };

        let speed = point.sensor_data().map(|sd| sd.speed).unwrap_or(0.0);

        let classification = classifier.classify(
            &samples,
            speed,
            current_wifi.as_ref(),
            previous_wifi_scan.as_ref(),
            previous_wifi_mode.as_deref(),
        );

        // Oppdater båret tilstand. En fraværende skanning nullstiller
        // carryen – neste punkt skal ikke sammenlignes mot en gammel.
        previous_wifi_scan = current_wifi;
        previous_wifi_mode = classification.wifi_mode.clone();

        // Sjekket etikett → Mode. Ukjent etikett feiler batchen.
        let mode: Mode = classification.mode.parse().map_err(|e| {
            METRICS.batches_failed_total.inc();
            ServiceError::domain(
                "there was a problem reading the classification's information",
                e,
            )
        })?;

        let merge_result = match classification.features {
            Some(f) => point.set_classifier_data(f.fft, f.variance, f.n95_variance, f.average, mode),
            None => point.set_classifier_mode_only(mode),
        };
        merge_result.map_err(|e| {
            METRICS.batches_failed_total.inc();
            ServiceError::domain("the classification could not be stored on the point", e)
        })?;

        METRICS.points_classified_total.inc();
        debug!("classified point at {} as {}", point.time(), mode);
    }

    Ok(())
}
