// core/src/metrics.rs
use once_cell::sync::Lazy;
use prometheus::{IntCounter, Registry};

/// Tellere for klassifiseringspasset. Registrert i eget registry så
/// innbyggende applikasjon kan velge å eksponere dem eller ikke.
pub struct Metrics {
    pub registry: Registry,
    pub points_classified_total: IntCounter,
    pub points_skipped_total: IntCounter,
    pub batches_failed_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let points_classified_total = IntCounter::new(
            "mobility_points_classified_total",
            "Antall mobilitetspunkter klassifisert",
        )
        .expect("metric definition");
        let points_skipped_total = IntCounter::new(
            "mobility_points_skipped_total",
            "Antall punkter hoppet over (error/mode_only)",
        )
        .expect("metric definition");
        let batches_failed_total = IntCounter::new(
            "mobility_batches_failed_total",
            "Antall batcher avbrutt av datafeil",
        )
        .expect("metric definition");

        registry
            .register(Box::new(points_classified_total.clone()))
            .expect("metric registration");
        registry
            .register(Box::new(points_skipped_total.clone()))
            .expect("metric registration");
        registry
            .register(Box::new(batches_failed_total.clone()))
            .expect("metric registration");

        Self {
            registry,
            points_classified_total,
            points_skipped_total,
            batches_failed_total,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Prosessvid default-instans. Navnene er statiske, så konstruksjonen
/// kan ikke feile i praksis.
pub static METRICS: Lazy<Metrics> = Lazy::new(Metrics::new);
