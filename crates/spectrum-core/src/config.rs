// File: crates/spectrum-core/src/config.rs
// Summary: Filter settings read from the flight-controller header; absent or zero means disabled.

use serde::{Deserialize, Serialize};

/// A header value that may hold a single number or a list of them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(f64),
    Many(Vec<f64>),
}

impl OneOrMany {
    pub fn values(&self) -> Vec<f64> {
        match self {
            OneOrMany::One(v) => vec![*v],
            OneOrMany::Many(v) => v.clone(),
        }
    }
}

/// Notch filter: centre frequency and cutoff, both Hz.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NotchPair {
    pub center: f64,
    pub cutoff: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub gyro_lowpass_hz: Option<f64>,
    /// Dynamic gyro low-pass [min, max].
    pub gyro_lowpass_dyn_hz: Option<[f64; 2]>,
    pub gyro_lowpass2_hz: Option<f64>,
    pub gyro_notch_hz: Option<OneOrMany>,
    pub gyro_notch_cutoff: Option<OneOrMany>,
    pub dterm_lpf_hz: Option<f64>,
    /// Dynamic D-term low-pass [min, max].
    pub dterm_lpf_dyn_hz: Option<[f64; 2]>,
    pub dterm_lpf2_hz: Option<f64>,
    pub dterm_notch_hz: Option<f64>,
    pub dterm_notch_cutoff: Option<f64>,
    pub yaw_lpf_hz: Option<f64>,
}

/// Present and strictly positive.
pub fn enabled(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Present, positive minimum and `max > min`.
pub fn enabled_band(band: Option<[f64; 2]>) -> Option<(f64, f64)> {
    let [min, max] = band?;
    (enabled(Some(min)).is_some() && max.is_finite() && max > min).then_some((min, max))
}

fn enabled_notch(center: f64, cutoff: f64) -> Option<NotchPair> {
    Some(NotchPair { center: enabled(Some(center))?, cutoff: enabled(Some(cutoff))? })
}

impl FilterConfig {
    /// Enabled gyro notches in header order; lists are paired index by index.
    pub fn gyro_notches(&self) -> Vec<NotchPair> {
        let (Some(centers), Some(cutoffs)) = (&self.gyro_notch_hz, &self.gyro_notch_cutoff) else {
            return Vec::new();
        };
        let (centers, cutoffs) = (centers.values(), cutoffs.values());
        if centers.len() != cutoffs.len() {
            log::warn!(
                "gyro notch lists differ in length ({} centres, {} cutoffs); pairing the common prefix",
                centers.len(),
                cutoffs.len()
            );
        }
        centers
            .into_iter()
            .zip(cutoffs)
            .filter_map(|(center, cutoff)| enabled_notch(center, cutoff))
            .collect()
    }

    pub fn dterm_notch(&self) -> Option<NotchPair> {
        enabled_notch(self.dterm_notch_hz?, self.dterm_notch_cutoff?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_are_disabled() {
        let cfg: FilterConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, FilterConfig::default());
        assert!(cfg.gyro_notches().is_empty());
        assert_eq!(cfg.dterm_notch(), None);
    }

    #[test]
    fn single_and_list_notches() {
        let single: FilterConfig =
            serde_json::from_str(r#"{"gyro_notch_hz":400,"gyro_notch_cutoff":300}"#).unwrap();
        assert_eq!(single.gyro_notches(), vec![NotchPair { center: 400.0, cutoff: 300.0 }]);

        let many: FilterConfig = serde_json::from_str(
            r#"{"gyro_notch_hz":[400,0,200],"gyro_notch_cutoff":[300,100,150]}"#,
        )
        .unwrap();
        assert_eq!(
            many.gyro_notches(),
            vec![NotchPair { center: 400.0, cutoff: 300.0 }, NotchPair { center: 200.0, cutoff: 150.0 }]
        );
    }

    #[test]
    fn unequal_notch_lists_pair_common_prefix() {
        let cfg = FilterConfig {
            gyro_notch_hz: Some(OneOrMany::Many(vec![400.0, 200.0, 100.0])),
            gyro_notch_cutoff: Some(OneOrMany::Many(vec![300.0, 150.0])),
            ..FilterConfig::default()
        };
        assert_eq!(
            cfg.gyro_notches(),
            vec![NotchPair { center: 400.0, cutoff: 300.0 }, NotchPair { center: 200.0, cutoff: 150.0 }]
        );
    }

    #[test]
    fn band_requires_increasing_positive_bounds() {
        assert_eq!(enabled_band(Some([80.0, 120.0])), Some((80.0, 120.0)));
        assert_eq!(enabled_band(Some([120.0, 80.0])), None);
        assert_eq!(enabled_band(Some([0.0, 80.0])), None);
        assert_eq!(enabled_band(None), None);
    }

    #[test]
    fn zero_and_negative_are_disabled() {
        assert_eq!(enabled(Some(0.0)), None);
        assert_eq!(enabled(Some(-3.0)), None);
        assert_eq!(enabled(Some(f64::NAN)), None);
        assert_eq!(enabled(Some(90.0)), Some(90.0));
    }
}
