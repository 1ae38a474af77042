//! Optical elements and their ABCD matrices.

use std::ops::Mul;

use super::beam::{Beam, BeamParameter};

/// Ray transfer matrix of an element of optical length `width`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Abcd {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub width: f64,
}

impl Abcd {
    pub fn new(a: f64, b: f64, c: f64, d: f64, width: f64) -> Self {
        Self { a, b, c, d, width }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0)
    }

    pub fn free_space(width: f64) -> Self {
        Self::new(1.0, width, 0.0, 1.0, width)
    }

    /// `q_out = (A q_in + B) / (C q_in + D)`
    pub fn transform(&self, q: BeamParameter) -> BeamParameter {
        (q * self.a + self.b) / (q * self.c + self.d)
    }

    /// Inverse of [`Abcd::transform`].
    pub fn inverse_transform(&self, q: BeamParameter) -> BeamParameter {
        (q * -self.d + self.b) / (q * self.c + -self.a)
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Matrix of the same element crossed in the opposite direction.
    pub fn reversed(&self) -> Self {
        let det = self.determinant();
        Self::new(
            self.d / det,
            self.b / det,
            self.c / det,
            self.a / det,
            self.width,
        )
    }

    pub fn half_trace(&self) -> f64 {
        (self.a + self.d) / 2.0
    }

    /// Discriminant of the self-consistency equation `C q² + (D - A) q - B = 0`.
    pub fn discriminant(&self) -> f64 {
        (self.d - self.a).powi(2) + 4.0 * self.c * self.b
    }

    /// A round trip with this matrix keeps a Gaussian mode confined.
    ///
    /// Both criteria agree for unit-determinant matrices. A disagreement
    /// means the matrix is not a physical round trip.
    pub fn is_stable(&self) -> bool {
        let by_trace = self.half_trace().abs() < 1.0;
        let by_discriminant = self.discriminant() < 0.0;
        if by_trace != by_discriminant {
            tracing::debug!(
                by_trace,
                by_discriminant,
                "stability criteria disagree for {:?}",
                self
            );
        }
        by_trace && by_discriminant
    }

    /// `q` reproduced by one pass through this matrix, if any.
    pub fn eigen_parameter(&self) -> Option<BeamParameter> {
        let discriminant = self.discriminant();
        if discriminant >= 0.0 || self.c == 0.0 {
            return None;
        }
        Some(BeamParameter::new(
            (self.a - self.d) / (2.0 * self.c),
            (-discriminant).sqrt() / (2.0 * self.c.abs()),
        ))
    }
}

/// Matrix product: `self * rhs` applies `rhs` first.
impl Mul for Abcd {
    type Output = Abcd;

    fn mul(self, rhs: Abcd) -> Abcd {
        Abcd::new(
            self.a * rhs.a + self.b * rhs.c,
            self.a * rhs.b + self.b * rhs.d,
            self.c * rhs.a + self.d * rhs.c,
            self.c * rhs.b + self.d * rhs.d,
            self.width + rhs.width,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpticsType {
    CreateBeam,
    FreeSpace,
    Lens,
    FlatMirror,
    CurvedMirror,
    FlatInterface,
    CurvedInterface,
    DielectricSlab,
    GenericAbcd,
}

impl OpticsType {
    /// Prefix of generated names ("L1", "M2", ...).
    pub fn prefix(self) -> &'static str {
        match self {
            OpticsType::CreateBeam => "w",
            OpticsType::FreeSpace => "F",
            OpticsType::Lens => "L",
            OpticsType::FlatMirror => "M",
            OpticsType::CurvedMirror => "R",
            OpticsType::FlatInterface => "I",
            OpticsType::CurvedInterface => "C",
            OpticsType::DielectricSlab => "S",
            OpticsType::GenericAbcd => "G",
        }
    }

    /// Parameters given to a freshly added element.
    pub fn default_kind(self) -> OpticsKind {
        match self {
            OpticsType::CreateBeam => OpticsKind::CreateBeam {
                waist: 180e-6,
                index: 1.0,
                m2: 1.0,
            },
            OpticsType::FreeSpace => OpticsKind::FreeSpace { width: 0.1 },
            OpticsType::Lens => OpticsKind::Lens { focal: 0.1 },
            OpticsType::FlatMirror => OpticsKind::FlatMirror,
            OpticsType::CurvedMirror => OpticsKind::CurvedMirror {
                curvature_radius: 0.05,
            },
            OpticsType::FlatInterface => OpticsKind::FlatInterface { index_ratio: 1.5 },
            OpticsType::CurvedInterface => OpticsKind::CurvedInterface {
                curvature_radius: 0.1,
                index_ratio: 1.5,
            },
            OpticsType::DielectricSlab => OpticsKind::DielectricSlab {
                index_ratio: 1.5,
                width: 0.01,
            },
            OpticsType::GenericAbcd => {
                OpticsKind::GenericAbcd(Abcd::new(1.0, 0.2, 0.0, 1.0, 0.1))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OpticsKind {
    /// Source of the bench: emits a beam with its waist at the element.
    CreateBeam { waist: f64, index: f64, m2: f64 },
    FreeSpace { width: f64 },
    Lens { focal: f64 },
    FlatMirror,
    CurvedMirror { curvature_radius: f64 },
    /// `index_ratio` is the index after the interface over the index before.
    FlatInterface { index_ratio: f64 },
    CurvedInterface { curvature_radius: f64, index_ratio: f64 },
    DielectricSlab { index_ratio: f64, width: f64 },
    GenericAbcd(Abcd),
}

impl OpticsKind {
    pub fn optics_type(&self) -> OpticsType {
        match self {
            OpticsKind::CreateBeam { .. } => OpticsType::CreateBeam,
            OpticsKind::FreeSpace { .. } => OpticsType::FreeSpace,
            OpticsKind::Lens { .. } => OpticsType::Lens,
            OpticsKind::FlatMirror => OpticsType::FlatMirror,
            OpticsKind::CurvedMirror { .. } => OpticsType::CurvedMirror,
            OpticsKind::FlatInterface { .. } => OpticsType::FlatInterface,
            OpticsKind::CurvedInterface { .. } => OpticsType::CurvedInterface,
            OpticsKind::DielectricSlab { .. } => OpticsType::DielectricSlab,
            OpticsKind::GenericAbcd(_) => OpticsType::GenericAbcd,
        }
    }

    /// `None` for the beam source, which replaces its input.
    pub fn abcd(&self) -> Option<Abcd> {
        let identity = Abcd::identity();
        let matrix = match *self {
            OpticsKind::CreateBeam { .. } => return None,
            OpticsKind::FreeSpace { width } => Abcd::free_space(width),
            OpticsKind::Lens { focal } => Abcd {
                c: -1.0 / focal,
                ..identity
            },
            OpticsKind::FlatMirror => identity,
            OpticsKind::CurvedMirror { curvature_radius } => Abcd {
                c: -2.0 / curvature_radius,
                ..identity
            },
            OpticsKind::FlatInterface { index_ratio } => Abcd {
                d: 1.0 / index_ratio,
                ..identity
            },
            OpticsKind::CurvedInterface {
                curvature_radius,
                index_ratio,
            } => Abcd {
                c: (1.0 / index_ratio - 1.0) / curvature_radius,
                d: 1.0 / index_ratio,
                ..identity
            },
            OpticsKind::DielectricSlab { index_ratio, width } => Abcd {
                b: width / index_ratio,
                width,
                ..identity
            },
            OpticsKind::GenericAbcd(abcd) => abcd,
        };
        Some(matrix)
    }

    pub fn width(&self) -> f64 {
        self.abcd().map_or(0.0, |m| m.width)
    }

    /// Factor applied to the medium index when crossing the element.
    pub fn index_jump(&self) -> f64 {
        match *self {
            OpticsKind::FlatInterface { index_ratio }
            | OpticsKind::CurvedInterface { index_ratio, .. } => index_ratio,
            _ => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Optics {
    pub name: String,
    /// Position of the entrance plane.
    pub position: f64,
    pub kind: OpticsKind,
    /// The element never moves with the "magic waist" search or a drag.
    pub absolute_lock: bool,
    /// Name of the element this one moves together with.
    pub lock_parent: Option<String>,
}

impl Optics {
    pub fn new(kind: OpticsKind, position: f64, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position,
            kind,
            absolute_lock: false,
            lock_parent: None,
        }
    }

    pub fn width(&self) -> f64 {
        self.kind.width()
    }

    pub fn end_position(&self) -> f64 {
        self.position + self.width()
    }

    /// Beam leaving the element when `input` enters it.
    pub fn image(&self, input: &Beam) -> Beam {
        match (self.kind, self.kind.abcd()) {
            (OpticsKind::CreateBeam { waist, index, m2 }, _) => Beam {
                waist,
                waist_position: self.position,
                wavelength: input.wavelength,
                index,
                m2,
            },
            (_, Some(abcd)) => Beam::from_q(
                abcd.transform(input.q(self.position)),
                self.end_position(),
                input.wavelength,
                input.index * self.kind.index_jump(),
                input.m2,
            ),
            (_, None) => *input,
        }
    }

    /// Beam entering the element that leaves it as `output`.
    pub fn antecedent(&self, output: &Beam) -> Beam {
        match (self.kind, self.kind.abcd()) {
            (OpticsKind::CreateBeam { .. }, _) => self.image(output),
            (_, Some(abcd)) => Beam::from_q(
                abcd.inverse_transform(output.q(self.end_position())),
                self.position,
                output.wavelength,
                output.index / self.kind.index_jump(),
                output.m2,
            ),
            (_, None) => *output,
        }
    }
}
