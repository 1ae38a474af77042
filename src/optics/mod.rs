//! Gaussian beam propagation.
//!
//! The optical engine of GaussianBeam: beam parameters, ABCD optics, the
//! bench that chains them, waist fitting from radius measurements, the
//! "magic waist" search and resonator eigenmodes. Lengths are in meters.

pub mod beam;
pub mod bench;
pub mod cavity;
pub mod element;
pub mod fit;

use thiserror::Error;

pub use beam::{Beam, BeamParameter, TargetBeam, overlap};
pub use bench::OpticsBench;
pub use cavity::Cavity;
pub use element::{Abcd, Optics, OpticsKind, OpticsType};
pub use fit::{Fit, FitDataType, FitResult};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OpticsError {
    #[error("divergence must lie in (0, pi/2), got {0}")]
    InvalidDivergence(f64),
    #[error("Rayleigh range must be positive, got {0}")]
    InvalidRayleigh(f64),
    #[error("a fit needs at least two non-zero measurements, got {0}")]
    NotEnoughData(usize),
    #[error("all measurements are at the same position")]
    DegenerateFit,
    #[error("no optics at index {0}")]
    NoSuchOptics(usize),
    #[error("no optics named '{0}'")]
    UnknownOptics(String),
    #[error("an optics named '{0}' already exists")]
    DuplicateName(String),
    #[error("the input beam cannot be removed or replaced")]
    InputBeam,
    #[error("locking '{0}' to '{1}' would create a cycle")]
    LockCycle(String, String),
    #[error("'{0}' has no ABCD matrix and cannot be part of a cavity")]
    NotAbcd(String),
    #[error("a cavity needs at least two optics")]
    CavityTooSmall,
}
