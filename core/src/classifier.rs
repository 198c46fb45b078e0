// core/src/classifier.rs
use serde::{Deserialize, Serialize};

use crate::models::{Sample, WifiScan};
use crate::point::ClassifierFeatures;

/// Resultatet av én klassifisering.
/// `mode` er en etikett – sjekket konvertering til Mode skjer hos kaller,
/// slik at en etikett utenfor enumet feiler batchen der og da.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub mode: String,
    /// None når signalet var for tynt til en feature-bunt.
    pub features: Option<ClassifierFeatures>,
    /// WiFi-avledet modus som bæres videre til neste punkt i batchen.
    pub wifi_mode: Option<String>,
}

impl Classification {
    pub fn has_features(&self) -> bool {
        self.features.is_some()
    }
}

/// Kontrakten orkestratoren bruker. Implementasjonen skal IKKE holde
/// tilstand mellom kall – all state-tråding er orkestratorens ansvar.
pub trait Classifier {
    fn classify(
        &mut self,
        samples: &[Sample],
        speed: f64,
        current_wifi: Option<&WifiScan>,
        previous_wifi: Option<&WifiScan>,
        previous_wifi_mode: Option<&str>,
    ) -> Classification;
}

/// Terskler for heuristikken. Lastes fra JSON via storage::load_classifier_config,
/// defaults er kalibrert for 1g-normalisert akselerometer ved ca. 10 Hz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Minste antall samples før vi beregner en feature-bunt.
    pub min_samples: usize,
    /// Antall bins i DFT-sammendraget.
    pub fft_bins: usize,
    /// Varians under dette regnes som i ro.
    pub still_variance_max: f64,
    /// Varians over dette regnes som løping.
    pub walk_variance_max: f64,
    /// Fartsgrense (m/s) for kjøring.
    pub drive_speed_min: f64,
    /// Fartsgrense (m/s) for sykling.
    pub bike_speed_min: f64,
    /// Andel felles aksesspunkter som regnes som "samme sted".
    pub wifi_overlap_still: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_samples: 10,
            fft_bins: 10,
            still_variance_max: 0.3,
            walk_variance_max: 5.0,
            drive_speed_min: 6.0,
            bike_speed_min: 2.5,
            wifi_overlap_still: 0.67,
        }
    }
}

/// Standard modusklassifikator: terskler på varians/fart pluss
/// WiFi-likhet mellom to påfølgende skanninger.
#[derive(Debug, Clone, Default)]
pub struct MobilityClassifier {
    cfg: ClassifierConfig,
}

impl MobilityClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(cfg: ClassifierConfig) -> Self {
        Self { cfg }
    }

    /// WiFi-verdikt: to skanninger med høy overlapp betyr at enheten
    /// står i ro; lav overlapp betyr forflytning. Uten forrige skanning
    /// bæres forrige verdikt uendret videre.
    fn wifi_mode(
        &self,
        current: Option<&WifiScan>,
        previous: Option<&WifiScan>,
        previous_mode: Option<&str>,
    ) -> Option<String> {
        match (current, previous) {
            (Some(cur), Some(prev)) => {
                if cur.overlap_ratio(prev) >= self.cfg.wifi_overlap_still {
                    Some("still".to_string())
                } else {
                    Some("drive".to_string())
                }
            }
            (Some(_), None) => previous_mode.map(str::to_string),
            (None, _) => None,
        }
    }

    /// Modusvalg uten feature-bunt (for få samples).
    fn mode_without_features(&self, speed: f64, wifi_mode: Option<&str>) -> String {
        if wifi_mode == Some("still") {
            return "still".to_string();
        }
        if speed >= self.cfg.drive_speed_min {
            "drive".to_string()
        } else if speed >= 0.5 {
            "walk".to_string()
        } else {
            "still".to_string()
        }
    }

    /// Modusvalg med features. WiFi-verdiktet "still" vinner over
    /// GPS-støy i lav fart.
    fn mode_with_features(&self, speed: f64, variance: f64, wifi_mode: Option<&str>) -> String {
        let c = &self.cfg;

        if variance <= c.still_variance_max {
            // Glatt signal: enten i ro eller i kjøretøy.
            if speed >= c.drive_speed_min {
                return "drive".to_string();
            }
            return "still".to_string();
        }

        if wifi_mode == Some("still") && speed < 1.0 {
            return "still".to_string();
        }

        if variance > c.walk_variance_max {
            return "run".to_string();
        }

        if speed >= c.drive_speed_min {
            return "drive".to_string();
        }
        if speed >= c.bike_speed_min {
            return "bike".to_string();
        }

        "walk".to_string()
    }
}

impl Classifier for MobilityClassifier {
    fn classify(
        &mut self,
        samples: &[Sample],
        speed: f64,
        current_wifi: Option<&WifiScan>,
        previous_wifi: Option<&WifiScan>,
        previous_wifi_mode: Option<&str>,
    ) -> Classification {
        let wifi_mode = self.wifi_mode(current_wifi, previous_wifi, previous_wifi_mode);

        if samples.len() < self.cfg.min_samples {
            let mode = self.mode_without_features(speed, wifi_mode.as_deref());
            return Classification {
                mode,
                features: None,
                wifi_mode,
            };
        }

        let magnitudes: Vec<f64> = samples.iter().map(Sample::magnitude).collect();
        let average = mean(&magnitudes);
        let variance = variance_about(&magnitudes, average);
        let n95_variance = n95_variance(&magnitudes);
        let fft = dft_summary(&magnitudes, average, self.cfg.fft_bins);

        let mode = self.mode_with_features(speed, variance, wifi_mode.as_deref());

        Classification {
            mode,
            features: Some(ClassifierFeatures {
                fft,
                variance,
                n95_variance,
                average,
            }),
            wifi_mode,
        }
    }
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

fn variance_about(xs: &[f64], mean: f64) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / xs.len() as f64
}

/// Varians etter at verdiene over 95-persentilen er trimmet vekk.
/// Robust mot enkeltspikere (støt, fall, dørsmell).
fn n95_variance(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let mut sorted = xs.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let cutoff_idx = ((sorted.len() - 1) as f64 * 0.95).floor() as usize;
    let trimmed = &sorted[..=cutoff_idx];
    let m = mean(trimmed);
    variance_about(trimmed, m)
}

/// Enkel N-bins DFT-magnitude av den middel-sentrerte magnitudeserien.
fn dft_summary(xs: &[f64], mean: f64, bins: usize) -> Vec<f64> {
    let n = xs.len();
    let mut out = Vec::with_capacity(bins);

    for k in 1..=bins {
        let mut re = 0.0;
        let mut im = 0.0;
        for (i, x) in xs.iter().enumerate() {
            let angle = -2.0 * std::f64::consts::PI * (k as f64) * (i as f64) / n as f64;
            let centered = x - mean;
            re += centered * angle.cos();
            im += centered * angle.sin();
        }
        out.push((re * re + im * im).sqrt() / n as f64);
    }

    out
}
