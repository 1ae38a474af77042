//! Gaussian beam parameters and the complex `q` parameter.

use std::{
    f64::consts::{FRAC_PI_2, PI},
    ops::{Add, Div, Mul},
};

use super::OpticsError;

/// Complex beam parameter `q(z) = (z - z_w) + i z_R`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamParameter {
    pub re: f64,
    pub im: f64,
}

impl BeamParameter {
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

impl Add<f64> for BeamParameter {
    type Output = BeamParameter;

    fn add(self, rhs: f64) -> BeamParameter {
        BeamParameter::new(self.re + rhs, self.im)
    }
}

impl Mul<f64> for BeamParameter {
    type Output = BeamParameter;

    fn mul(self, rhs: f64) -> BeamParameter {
        BeamParameter::new(self.re * rhs, self.im * rhs)
    }
}

impl Div for BeamParameter {
    type Output = BeamParameter;

    fn div(self, rhs: BeamParameter) -> BeamParameter {
        let norm = rhs.re * rhs.re + rhs.im * rhs.im;
        BeamParameter::new(
            (self.re * rhs.re + self.im * rhs.im) / norm,
            (self.im * rhs.re - self.re * rhs.im) / norm,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Beam {
    /// Waist radius at 1/e².
    pub waist: f64,
    pub waist_position: f64,
    /// Vacuum wavelength.
    pub wavelength: f64,
    /// Refractive index of the medium the beam travels in.
    pub index: f64,
    /// Beam quality factor M².
    pub m2: f64,
}

impl Beam {
    /// An ideal (M² = 1) beam in vacuum.
    pub fn new(waist: f64, waist_position: f64, wavelength: f64) -> Self {
        Self {
            waist,
            waist_position,
            wavelength,
            index: 1.0,
            m2: 1.0,
        }
    }

    pub fn with_index(mut self, index: f64) -> Self {
        self.index = index;
        self
    }

    pub fn with_m2(mut self, m2: f64) -> Self {
        self.m2 = m2;
        self
    }

    /// Rebuild a beam from its `q` parameter observed at position `z`.
    pub fn from_q(q: BeamParameter, z: f64, wavelength: f64, index: f64, m2: f64) -> Self {
        Self {
            waist: (q.im * wavelength * m2 / (index * PI)).sqrt(),
            waist_position: z - q.re,
            wavelength,
            index,
            m2,
        }
    }

    pub fn rayleigh(&self) -> f64 {
        self.index * PI * self.waist * self.waist / (self.wavelength * self.m2)
    }

    /// Far-field half-angle divergence.
    pub fn divergence(&self) -> f64 {
        if self.waist == 0.0 {
            return 0.0;
        }
        (self.wavelength * self.m2 / (self.index * PI * self.waist)).atan()
    }

    /// Change the waist so the beam diverges with the given half angle.
    pub fn set_divergence(&mut self, divergence: f64) -> Result<(), OpticsError> {
        if !(divergence > 0.0 && divergence < FRAC_PI_2) {
            return Err(OpticsError::InvalidDivergence(divergence));
        }
        self.waist = self.wavelength * self.m2 / (self.index * PI * divergence.tan());
        Ok(())
    }

    /// Change the waist so the beam has the given Rayleigh range.
    pub fn set_rayleigh(&mut self, rayleigh: f64) -> Result<(), OpticsError> {
        if !(rayleigh > 0.0) {
            return Err(OpticsError::InvalidRayleigh(rayleigh));
        }
        self.waist = (rayleigh * self.wavelength * self.m2 / (self.index * PI)).sqrt();
        Ok(())
    }

    /// Distance to the waist in Rayleigh ranges.
    pub fn zred(&self, z: f64) -> f64 {
        (z - self.waist_position) / self.rayleigh()
    }

    /// Beam radius at 1/e² at position `z`.
    pub fn radius(&self, z: f64) -> f64 {
        self.waist * (1.0 + self.zred(z).powi(2)).sqrt()
    }

    pub fn radius_derivative(&self, z: f64) -> f64 {
        let zred = self.zred(z);
        self.waist / self.rayleigh() * zred / (1.0 + zred * zred).sqrt()
    }

    pub fn radius_second_derivative(&self, z: f64) -> f64 {
        let rayleigh = self.rayleigh();
        self.waist / (rayleigh * rayleigh) / (1.0 + self.zred(z).powi(2)).powf(1.5)
    }

    /// Wavefront radius of curvature, infinite at the waist.
    pub fn curvature(&self, z: f64) -> f64 {
        let distance = z - self.waist_position;
        if distance == 0.0 {
            return f64::INFINITY;
        }
        distance * (1.0 + 1.0 / self.zred(z).powi(2))
    }

    pub fn gouy_phase(&self, z: f64) -> f64 {
        self.zred(z).atan()
    }

    pub fn q(&self, z: f64) -> BeamParameter {
        BeamParameter::new(z - self.waist_position, self.rayleigh())
    }
}

/// Intensity overlap of two beams at position `z`.
///
/// For beams of the same wavelength the value does not depend on `z`.
pub fn overlap(beam1: &Beam, beam2: &Beam, z: f64) -> f64 {
    let zred1 = beam1.zred(z);
    let zred2 = beam2.zred(z);
    let rho = (beam1.radius(z) / beam2.radius(z)).powi(2);
    4.0 * rho / ((1.0 + rho).powi(2) + (zred1 - zred2 * rho).powi(2))
}

/// A beam the "magic waist" search tries to reach, with its acceptance
/// criterion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetBeam {
    pub beam: Beam,
    /// Accept on overlap when true, on waist and position tolerances otherwise.
    pub overlap_criterion: bool,
    pub min_overlap: f64,
    /// Relative to the target waist.
    pub waist_tolerance: f64,
    /// Relative to the target Rayleigh range.
    pub position_tolerance: f64,
}

impl TargetBeam {
    pub fn new(beam: Beam) -> Self {
        Self {
            beam,
            overlap_criterion: true,
            min_overlap: 0.98,
            waist_tolerance: 0.05,
            position_tolerance: 0.1,
        }
    }

    pub fn is_reached_by(&self, beam: &Beam) -> bool {
        if self.overlap_criterion {
            overlap(beam, &self.beam, 0.0) > self.min_overlap
        } else {
            (beam.waist - self.beam.waist).abs() < self.waist_tolerance * self.beam.waist
                && (beam.waist_position - self.beam.waist_position).abs()
                    < self.position_tolerance * self.beam.rayleigh()
        }
    }
}
