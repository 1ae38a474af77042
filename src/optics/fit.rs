//! Waist fitting from beam size measurements.
//!
//! The measurements are fitted with a straight line, and the fitted beam is
//! the one whose radius is tangent to that line at the mean position.

use std::f64::consts::PI;

use super::{Beam, OpticsError};

/// Radii below this are unset rows and take no part in the fit.
const MIN_RADIUS: f64 = 1e-50;

/// What the measured values represent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FitDataType {
    /// Radius at 1/e².
    Radius,
    /// Diameter at 1/e².
    #[default]
    Diameter,
    StandardDeviation,
    /// Full width at half maximum.
    Fwhm,
    /// Half width at half maximum.
    Hwhm,
}

impl FitDataType {
    /// Convert a measured value to a 1/e² radius.
    pub fn to_radius(self, value: f64) -> f64 {
        match self {
            FitDataType::Radius => value,
            FitDataType::Diameter => value / 2.0,
            FitDataType::StandardDeviation => value * 2.0,
            FitDataType::Fwhm => value / (2.0 * 2f64.ln()).sqrt(),
            FitDataType::Hwhm => value * (2.0 / 2f64.ln()).sqrt(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    pub beam: Beam,
    /// Squared correlation coefficient of the linear fit.
    pub rho2: f64,
}

/// A named set of `(position, value)` measurements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fit {
    pub name: String,
    pub data_type: FitDataType,
    points: Vec<(f64, f64)>,
}

impl Fit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn add_data(&mut self, position: f64, value: f64) {
        self.points.push((position, value));
    }

    /// Set row `index`, growing the table with empty rows if needed.
    pub fn set_data(&mut self, index: usize, position: f64, value: f64) {
        if self.points.len() <= index {
            self.points.resize(index + 1, (0.0, 0.0));
        }
        self.points[index] = (position, value);
    }

    pub fn remove_data(&mut self, index: usize) -> Option<(f64, f64)> {
        (index < self.points.len()).then(|| self.points.remove(index))
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn position(&self, index: usize) -> Option<f64> {
        self.points.get(index).map(|&(position, _)| position)
    }

    pub fn radius(&self, index: usize) -> Option<f64> {
        self.points
            .get(index)
            .map(|&(_, value)| self.data_type.to_radius(value))
    }

    /// Rows holding an actual measurement.
    pub fn non_zero_len(&self) -> usize {
        self.samples().count()
    }

    fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points
            .iter()
            .map(|&(position, value)| (position, self.data_type.to_radius(value)))
            .filter(|&(_, radius)| radius > MIN_RADIUS)
    }

    pub fn fit_beam(&self, wavelength: f64) -> Result<FitResult, OpticsError> {
        let (positions, radii): (Vec<f64>, Vec<f64>) = self.samples().unzip();
        let line = LinearFit::new(&positions, &radii)?;

        let z = line.mean_x;
        let radius = line.slope * z + line.intercept;
        // (z - z_w) / z_R of the tangent beam
        let alpha = PI * radius * line.slope / wavelength;

        let mut beam = Beam::new(radius / (1.0 + alpha * alpha).sqrt(), 0.0, wavelength);
        beam.waist_position = z - beam.rayleigh() * alpha;

        Ok(FitResult {
            beam,
            rho2: line.rho2,
        })
    }
}

/// Least-squares line through `(x, y)` samples.
struct LinearFit {
    mean_x: f64,
    slope: f64,
    intercept: f64,
    rho2: f64,
}

impl LinearFit {
    fn new(x: &[f64], y: &[f64]) -> Result<Self, OpticsError> {
        if x.len() < 2 {
            return Err(OpticsError::NotEnoughData(x.len()));
        }
        let n = x.len() as f64;
        let mean_x = x.iter().sum::<f64>() / n;
        let mean_y = y.iter().sum::<f64>() / n;

        let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
        for (xi, yi) in x.iter().zip(y) {
            let (dx, dy) = (xi - mean_x, yi - mean_y);
            sxx += dx * dx;
            syy += dy * dy;
            sxy += dx * dy;
        }
        if sxx == 0.0 {
            return Err(OpticsError::DegenerateFit);
        }

        let slope = sxy / sxx;
        Ok(Self {
            mean_x,
            slope,
            intercept: mean_y - slope * mean_x,
            rho2: if syy == 0.0 {
                1.0
            } else {
                sxy * sxy / (sxx * syy)
            },
        })
    }
}
