// File: crates/spectrum-core/src/spectrum.rs
// Summary: Spectrum sample model (bar or throttle-grid magnitudes) and its shape validation.

use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};
use crate::types::THROTTLE_BINS;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Single frequency / magnitude bar chart.
    Frequency,
    /// Frequency-vs-throttle heat map.
    FrequencyVsThrottle,
}

/// Magnitudes in one of the two shapes the display modes consume.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Magnitudes {
    /// `fft_length` magnitudes, bar mode.
    Flat(Vec<f64>),
    /// `THROTTLE_BINS` rows of `fft_length` magnitudes, heat-map mode.
    Grid(Vec<Vec<f64>>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpectrumSample {
    #[serde(default)]
    pub field_name: Option<String>,
    pub fft_length: usize,
    /// Source sample rate, Hz.
    pub black_box_rate: f64,
    /// Peak motor-noise frequency, Hz.
    #[serde(default)]
    pub max_noise_idx: Option<f64>,
    pub magnitudes: Magnitudes,
}

impl SpectrumSample {
    pub fn flat(field_name: impl Into<String>, black_box_rate: f64, magnitudes: Vec<f64>) -> Self {
        Self {
            field_name: Some(field_name.into()),
            fft_length: magnitudes.len(),
            black_box_rate,
            max_noise_idx: None,
            magnitudes: Magnitudes::Flat(magnitudes),
        }
    }

    /// Rows are indexed by throttle bin; `fft_length` is taken from the first row.
    pub fn grid(field_name: impl Into<String>, black_box_rate: f64, rows: Vec<Vec<f64>>) -> Self {
        Self {
            field_name: Some(field_name.into()),
            fft_length: rows.first().map_or(0, Vec::len),
            black_box_rate,
            max_noise_idx: None,
            magnitudes: Magnitudes::Grid(rows),
        }
    }

    pub fn with_max_noise(mut self, hz: f64) -> Self {
        self.max_noise_idx = Some(hz);
        self
    }

    /// Non-blank field name, if any.
    pub fn field_name(&self) -> Option<&str> {
        self.field_name.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Check rate and length are usable.
    pub fn check_degenerate(&self) -> PlotResult<()> {
        if !(self.black_box_rate.is_finite() && self.black_box_rate > 0.0) {
            return Err(PlotError::degenerate(format!(
                "sample rate must be positive, got {}",
                self.black_box_rate
            )));
        }
        if self.fft_length == 0 {
            return Err(PlotError::degenerate("fft length is zero"));
        }
        Ok(())
    }

    /// Flat magnitudes, checked against `fft_length`.
    pub fn flat_magnitudes(&self) -> PlotResult<&[f64]> {
        self.check_degenerate()?;
        match &self.magnitudes {
            Magnitudes::Flat(v) if v.len() == self.fft_length => Ok(v),
            Magnitudes::Flat(v) => Err(PlotError::invalid_data(format!(
                "expected {} magnitudes, got {}",
                self.fft_length,
                v.len()
            ))),
            Magnitudes::Grid(_) => Err(PlotError::invalid_data("bar mode needs flat magnitudes, got a throttle grid")),
        }
    }

    /// Throttle grid, checked to be `THROTTLE_BINS` x `fft_length`.
    pub fn grid_magnitudes(&self) -> PlotResult<&[Vec<f64>]> {
        self.check_degenerate()?;
        let rows = match &self.magnitudes {
            Magnitudes::Grid(rows) => rows,
            Magnitudes::Flat(_) => {
                return Err(PlotError::invalid_data("heat-map mode needs a throttle grid, got flat magnitudes"))
            }
        };
        if rows.len() != THROTTLE_BINS {
            return Err(PlotError::invalid_data(format!(
                "expected {THROTTLE_BINS} throttle rows, got {}",
                rows.len()
            )));
        }
        if let Some((j, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != self.fft_length) {
            return Err(PlotError::invalid_data(format!(
                "throttle row {j} has {} bins, expected {}",
                row.len(),
                self.fft_length
            )));
        }
        Ok(rows)
    }

    /// Validate the sample for the given display mode.
    pub fn validate(&self, mode: DisplayMode) -> PlotResult<()> {
        match mode {
            DisplayMode::Frequency => self.flat_magnitudes().map(|_| ()),
            DisplayMode::FrequencyVsThrottle => self.grid_magnitudes().map(|_| ()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_length_mismatch_is_invalid() {
        let mut s = SpectrumSample::flat("gyroADC[0]", 2000.0, vec![1.0; 8]);
        s.fft_length = 9;
        assert!(matches!(s.validate(DisplayMode::Frequency), Err(PlotError::InvalidSpectrumData(_))));
    }

    #[test]
    fn zero_rate_is_degenerate() {
        let s = SpectrumSample::flat("gyroADC[0]", 0.0, vec![1.0; 8]);
        assert!(matches!(s.validate(DisplayMode::Frequency), Err(PlotError::DegenerateInput(_))));
        let empty = SpectrumSample::flat("gyroADC[0]", 2000.0, Vec::new());
        assert!(matches!(empty.validate(DisplayMode::Frequency), Err(PlotError::DegenerateInput(_))));
    }

    #[test]
    fn grid_checks_rows_and_columns() {
        let ok = SpectrumSample::grid("gyroADC[0]", 2000.0, vec![vec![0.0; 4]; THROTTLE_BINS]);
        assert!(ok.validate(DisplayMode::FrequencyVsThrottle).is_ok());

        let short = SpectrumSample::grid("gyroADC[0]", 2000.0, vec![vec![0.0; 4]; 99]);
        assert!(matches!(short.validate(DisplayMode::FrequencyVsThrottle), Err(PlotError::InvalidSpectrumData(_))));

        let mut ragged = vec![vec![0.0; 4]; THROTTLE_BINS];
        ragged[42].pop();
        let ragged = SpectrumSample::grid("gyroADC[0]", 2000.0, ragged);
        let err = ragged.validate(DisplayMode::FrequencyVsThrottle).unwrap_err();
        assert!(err.to_string().contains("row 42"));
    }

    #[test]
    fn mode_shape_mismatch_is_invalid() {
        let flat = SpectrumSample::flat("gyroADC[0]", 2000.0, vec![1.0; 8]);
        assert!(matches!(flat.validate(DisplayMode::FrequencyVsThrottle), Err(PlotError::InvalidSpectrumData(_))));
    }

    #[test]
    fn blank_field_name_reads_as_absent() {
        let mut s = SpectrumSample::flat("  ", 2000.0, vec![1.0]);
        assert_eq!(s.field_name(), None);
        s.field_name = None;
        assert_eq!(s.field_name(), None);
    }

    #[test]
    fn deserializes_from_json() {
        let s: SpectrumSample = serde_json::from_str(
            r#"{"field_name":"gyroADC[1]","fft_length":3,"black_box_rate":4000,"max_noise_idx":215.0,"magnitudes":[1,2,3]}"#,
        )
        .unwrap();
        assert_eq!(s.magnitudes, Magnitudes::Flat(vec![1.0, 2.0, 3.0]));
        assert_eq!(s.max_noise_idx, Some(215.0));
    }
}
