//! Optical resonators built from consecutive bench optics.
//!
//! The round trip starts right after the first optics. A ring cavity goes
//! through every optics once and closes with a return leg as long as the
//! forward path. A linear cavity reflects on the last optics and crosses
//! the inner optics again in reverse.

use super::{Abcd, Beam, Optics, OpticsError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cavity {
    round_trip: Abcd,
    /// Position of the reference plane, at the exit of the first optics.
    reference: f64,
    ring: bool,
}

impl Cavity {
    pub fn new(optics: &[Optics], ring: bool) -> Result<Self, OpticsError> {
        let [first, .., last] = optics else {
            return Err(OpticsError::CavityTooSmall);
        };
        let matrices = optics
            .iter()
            .map(|o| o.kind.abcd().ok_or_else(|| OpticsError::NotAbcd(o.name.clone())))
            .collect::<Result<Vec<Abcd>, _>>()?;
        let gap = |i: usize| Abcd::free_space(optics[i].position - optics[i - 1].end_position());

        let mut path = Vec::with_capacity(4 * optics.len());
        for i in 1..optics.len() {
            path.push(gap(i));
            path.push(matrices[i]);
        }
        if ring {
            path.push(Abcd::free_space(last.position - first.end_position()));
        } else {
            for i in (1..optics.len()).rev() {
                path.push(gap(i));
                if i > 1 {
                    path.push(matrices[i - 1].reversed());
                }
            }
        }
        path.push(matrices[0]);

        let round_trip = path
            .into_iter()
            .fold(Abcd::identity(), |acc, matrix| matrix * acc);

        Ok(Self {
            round_trip,
            reference: first.end_position(),
            ring,
        })
    }

    pub fn round_trip(&self) -> &Abcd {
        &self.round_trip
    }

    pub fn is_ring(&self) -> bool {
        self.ring
    }

    pub fn is_stable(&self) -> bool {
        self.round_trip.is_stable()
    }

    /// Self-consistent beam at the exit of the first optics.
    pub fn eigen_beam(&self, wavelength: f64) -> Option<Beam> {
        if !self.is_stable() {
            return None;
        }
        let q = self.round_trip.eigen_parameter()?;
        Some(Beam::from_q(q, self.reference, wavelength, 1.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics::OpticsKind;

    const LAMBDA: f64 = 461e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-9 * expected.abs(),
            "{} != {}",
            actual,
            expected
        );
    }

    fn mirror(position: f64, name: &str) -> Optics {
        Optics::new(
            OpticsKind::CurvedMirror {
                curvature_radius: 0.1,
            },
            position,
            name,
        )
    }

    fn lens(position: f64, name: &str) -> Optics {
        Optics::new(OpticsKind::Lens { focal: 0.1 }, position, name)
    }

    #[test]
    fn test_linear_two_mirror_cavity() {
        let cavity = Cavity::new(&[mirror(0.0, "R1"), mirror(0.05, "R2")], false).unwrap();

        assert_eq!(*cavity.round_trip(), Abcd::new(0.0, 0.05, -20.0, -1.0, 0.1));
        assert!(cavity.is_stable());

        // w0² = λ/π · sqrt(L (2R - L)) / 2, at the cavity center
        let beam = cavity.eigen_beam(LAMBDA).unwrap();
        assert_close(beam.waist, 7.97123925104256e-05);
        assert_close(beam.waist_position, 0.025);
    }

    #[test]
    fn test_ring_lens_cavity() {
        let cavity = Cavity::new(&[lens(0.2, "L1"), lens(0.3, "L2")], true).unwrap();

        assert!(cavity.is_ring());
        let beam = cavity.eigen_beam(LAMBDA).unwrap();
        assert_close(beam.waist, 0.0001127303465774514);
        assert_close(beam.waist_position, 0.25);
    }

    #[test]
    fn test_unstable_cavity_has_no_mode() {
        // Mirrors farther apart than twice their radius.
        let cavity = Cavity::new(&[mirror(0.0, "R1"), mirror(0.3, "R2")], false).unwrap();

        assert!(!cavity.is_stable());
        assert_eq!(cavity.eigen_beam(LAMBDA), None);
    }

    #[test]
    fn test_cavity_needs_abcd_optics() {
        let source = Optics::new(
            OpticsKind::CreateBeam {
                waist: 1e-4,
                index: 1.0,
                m2: 1.0,
            },
            0.0,
            "w0",
        );

        assert_eq!(
            Cavity::new(&[source, mirror(0.1, "R1")], false),
            Err(OpticsError::NotAbcd("w0".to_string()))
        );
        assert_eq!(
            Cavity::new(&[mirror(0.1, "R1")], false),
            Err(OpticsError::CavityTooSmall)
        );
    }
}
