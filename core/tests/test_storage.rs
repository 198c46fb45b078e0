// core/tests/test_storage.rs

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::json;

use mobility_core::{
    load_classifier_config, save_classifier_config, ClassifierConfig, Location, LocationStatus,
    MemoryUserMobilityQueries, MobilityPoint, MobilityServices, Mode, PrivacyState, SensorData,
    ServiceError, SubType,
};

fn ts(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap()
}

fn point(
    time: DateTime<Utc>,
    mode: Mode,
    privacy: PrivacyState,
    status: LocationStatus,
) -> MobilityPoint {
    let location = match status {
        LocationStatus::Unavailable => None,
        _ => Some(Location {
            latitude: 59.91,
            longitude: 10.75,
            accuracy: 10.0,
            provider: "gps".to_string(),
            time,
        }),
    };

    MobilityPoint::new(
        time,
        "Europe/Oslo",
        status,
        location,
        "unit-test",
        privacy,
        mode,
        SubType::SensorData,
        Some(SensorData::new(
            0.0,
            json!([{"t_ms": 0, "x": 0.0, "y": 0.0, "z": 9.8}]),
            None,
        )),
    )
    .unwrap()
}

/// Gateway ferdig seedet for filtertestene.
fn seeded_services() -> MobilityServices<MemoryUserMobilityQueries> {
    let services = MobilityServices::new(MemoryUserMobilityQueries::new());

    let alice = vec![
        point(ts(1, 8), Mode::Still, PrivacyState::Private, LocationStatus::Valid),
        point(ts(1, 12), Mode::Walk, PrivacyState::Shared, LocationStatus::Valid),
        point(ts(3, 9), Mode::Walk, PrivacyState::Private, LocationStatus::Stale),
        point(ts(5, 18), Mode::Drive, PrivacyState::Shared, LocationStatus::Unavailable),
    ];
    services
        .create_mobility_point("alice", "android-app", &alice)
        .unwrap();

    let bob = vec![point(ts(2, 10), Mode::Run, PrivacyState::Private, LocationStatus::Valid)];
    services.create_mobility_point("bob", "ios-app", &bob).unwrap();

    services
}

#[test]
fn username_only_returns_all_points_for_that_user() {
    let services = seeded_services();

    let alice = services
        .retrieve_mobility_data("alice", None, None, None, None, None)
        .unwrap();
    assert_eq!(alice.len(), 4);

    let bob = services
        .retrieve_mobility_data("bob", None, None, None, None, None)
        .unwrap();
    assert_eq!(bob.len(), 1);

    // andre brukeres punkter lekker aldri inn
    assert!(bob.iter().all(|p| p.mode() == Mode::Run));
}

#[test]
fn unknown_user_yields_an_empty_result() {
    let services = seeded_services();
    let none = services
        .retrieve_mobility_data("charlie", None, None, None, None, None)
        .unwrap();
    assert!(none.is_empty());
}

#[test]
fn date_range_narrows_with_inclusive_bounds() {
    let services = seeded_services();

    let in_range = services
        .retrieve_mobility_data("alice", Some(ts(1, 12)), Some(ts(3, 9)), None, None, None)
        .unwrap();
    // begge grensene er inklusive
    assert_eq!(in_range.len(), 2);

    let after = services
        .retrieve_mobility_data("alice", Some(ts(4, 0)), None, None, None, None)
        .unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].mode(), Mode::Drive);
}

#[test]
fn each_filter_narrows_by_intersection() {
    let services = seeded_services();

    let shared = services
        .retrieve_mobility_data("alice", None, None, Some(PrivacyState::Shared), None, None)
        .unwrap();
    assert_eq!(shared.len(), 2);

    let walk = services
        .retrieve_mobility_data("alice", None, None, None, None, Some(Mode::Walk))
        .unwrap();
    assert_eq!(walk.len(), 2);

    let stale = services
        .retrieve_mobility_data("alice", None, None, None, Some(LocationStatus::Stale), None)
        .unwrap();
    assert_eq!(stale.len(), 1);

    // snitt: shared OG walk
    let shared_walk = services
        .retrieve_mobility_data(
            "alice",
            None,
            None,
            Some(PrivacyState::Shared),
            None,
            Some(Mode::Walk),
        )
        .unwrap();
    assert_eq!(shared_walk.len(), 1);
    assert_eq!(shared_walk[0].privacy_state(), PrivacyState::Shared);
    assert_eq!(shared_walk[0].mode(), Mode::Walk);
}

#[test]
fn get_dates_returns_distinct_days_with_data() {
    let services = seeded_services();

    let dates = services.get_dates(ts(1, 0), ts(4, 23), "alice").unwrap();

    // 1. mai har to punkter men telles én gang; 5. mai er utenfor intervallet
    let expected: Vec<NaiveDate> = vec![
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
    ];
    assert_eq!(dates.into_iter().collect::<Vec<_>>(), expected);
}

#[test]
fn create_rejects_empty_username_and_client() {
    let services = MobilityServices::new(MemoryUserMobilityQueries::new());
    let points = vec![point(ts(1, 8), Mode::Still, PrivacyState::Private, LocationStatus::Valid)];

    let err = services.create_mobility_point("", "client", &points);
    assert!(matches!(err, Err(ServiceError::InvalidArgument(_))));

    let err = services.create_mobility_point("alice", "", &points);
    assert!(matches!(err, Err(ServiceError::InvalidArgument(_))));
}

#[test]
fn classifier_config_save_and_load_roundtrip() {
    let path = "tests/tmp_classifier_config.json";

    let cfg = ClassifierConfig {
        min_samples: 20,
        drive_speed_min: 7.5,
        ..ClassifierConfig::default()
    };

    save_classifier_config(&cfg, path).expect("kunne ikke lagre config");
    let loaded = load_classifier_config(path).expect("kunne ikke laste config");

    assert_eq!(loaded.min_samples, 20);
    assert!((loaded.drive_speed_min - 7.5).abs() < 1e-12);

    std::fs::remove_file(path).ok();
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let loaded = load_classifier_config("tests/finnes_ikke.json").unwrap();
    let defaults = ClassifierConfig::default();
    assert_eq!(loaded.min_samples, defaults.min_samples);
    assert!((loaded.wifi_overlap_still - defaults.wifi_overlap_still).abs() < 1e-12);
}
