//! The optics bench: a beam source followed by optics sorted by position.
//!
//! Index 0 always holds the source. Beams are recomputed after every
//! change, so `beam(i)` is the beam leaving optics `i`.

use std::collections::{HashMap, HashSet};

use super::{
    Beam, Cavity, Fit, Optics, OpticsError, OpticsKind, OpticsType, TargetBeam, overlap,
};

/// Random moves tried by [`OpticsBench::magic_waist`].
pub const MAGIC_WAIST_TRIES: usize = 500_000;

/// Displacement applied to each optics when measuring sensitivity.
const SENSITIVITY_STEP: f64 = 1e-6;

/// Spacing given to an optics added after another one.
const INSERT_SPACING: f64 = 0.05;

#[derive(Debug, Clone, PartialEq)]
struct CavitySpec {
    first: String,
    last: String,
    ring: bool,
}

#[derive(Debug, Clone)]
pub struct OpticsBench {
    wavelength: f64,
    optics: Vec<Optics>,
    beams: Vec<Beam>,
    /// Range explored by the "magic waist" search.
    pub left_boundary: f64,
    pub right_boundary: f64,
    cavity: Option<CavitySpec>,
    fits: Vec<Fit>,
    name_counters: HashMap<OpticsType, usize>,
}

impl OpticsBench {
    /// A bench holding only the source: a 180 µm waist at 10 mm, locked.
    pub fn new(wavelength: f64) -> Self {
        let mut source = Optics::new(OpticsType::CreateBeam.default_kind(), 10e-3, "w0");
        source.absolute_lock = true;

        let mut bench = Self {
            wavelength,
            optics: vec![source],
            beams: Vec::new(),
            left_boundary: -0.1,
            right_boundary: 0.7,
            cavity: None,
            fits: Vec::new(),
            name_counters: HashMap::new(),
        };
        bench.compute_beams();
        bench
    }

    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    pub fn set_wavelength(&mut self, wavelength: f64) {
        self.wavelength = wavelength;
        self.compute_beams();
    }

    pub fn optics_count(&self) -> usize {
        self.optics.len()
    }

    pub fn optics_list(&self) -> &[Optics] {
        &self.optics
    }

    pub fn optics(&self, index: usize) -> Option<&Optics> {
        self.optics.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.optics.iter().position(|o| o.name == name)
    }

    /// Beam leaving optics `index`.
    pub fn beam(&self, index: usize) -> Option<&Beam> {
        self.beams.get(index)
    }

    pub fn output_beam(&self) -> &Beam {
        // The source is never removed, so there is always a beam.
        &self.beams[self.beams.len() - 1]
    }

    /// Add an optics of the given type with default parameters, placed a
    /// little after the optics currently at `index - 1`.
    pub fn add_optics(
        &mut self,
        optics_type: OpticsType,
        index: usize,
    ) -> Result<usize, OpticsError> {
        if index == 0 || optics_type == OpticsType::CreateBeam {
            return Err(OpticsError::InputBeam);
        }
        let previous = self
            .optics
            .get(index - 1)
            .ok_or(OpticsError::NoSuchOptics(index))?;
        let position = previous.position + INSERT_SPACING;
        let name = self.next_name(optics_type);
        self.insert_optics(Optics::new(optics_type.default_kind(), position, name))
    }

    /// Insert an optics at its position. Returns its index.
    pub fn insert_optics(&mut self, optics: Optics) -> Result<usize, OpticsError> {
        if matches!(optics.kind, OpticsKind::CreateBeam { .. }) {
            return Err(OpticsError::InputBeam);
        }
        if self.index_of(&optics.name).is_some() {
            return Err(OpticsError::DuplicateName(optics.name));
        }
        let name = optics.name.clone();
        self.optics.push(optics);
        self.sort_and_compute();
        self.index_of(&name).ok_or(OpticsError::UnknownOptics(name))
    }

    pub fn remove_optics(&mut self, index: usize) -> Result<Optics, OpticsError> {
        if index == 0 {
            return Err(OpticsError::InputBeam);
        }
        if index >= self.optics.len() {
            return Err(OpticsError::NoSuchOptics(index));
        }
        let removed = self.optics.remove(index);
        for optics in &mut self.optics {
            if optics.lock_parent.as_deref() == Some(removed.name.as_str()) {
                optics.lock_parent = None;
            }
        }
        if self
            .cavity
            .as_ref()
            .is_some_and(|c| c.first == removed.name || c.last == removed.name)
        {
            self.cavity = None;
        }
        self.compute_beams();
        Ok(removed)
    }

    /// Move an optics together with its lock tree. Nothing moves when the
    /// tree root is absolutely locked. Returns the new index of the optics.
    pub fn set_optics_position(
        &mut self,
        index: usize,
        position: f64,
    ) -> Result<usize, OpticsError> {
        let name = self.checked(index)?.name.clone();
        if move_tree(&mut self.optics, index, position, true) {
            self.sort_and_compute();
        }
        self.index_of(&name).ok_or(OpticsError::UnknownOptics(name))
    }

    pub fn set_optics_name(&mut self, index: usize, name: &str) -> Result<(), OpticsError> {
        let old = self.checked(index)?.name.clone();
        if old == name {
            return Ok(());
        }
        if self.index_of(name).is_some() {
            return Err(OpticsError::DuplicateName(name.to_string()));
        }
        self.optics[index].name = name.to_string();
        for optics in &mut self.optics {
            if optics.lock_parent.as_deref() == Some(old.as_str()) {
                optics.lock_parent = Some(name.to_string());
            }
        }
        if let Some(cavity) = self.cavity.as_mut() {
            for end in [&mut cavity.first, &mut cavity.last] {
                if *end == old {
                    *end = name.to_string();
                }
            }
        }
        Ok(())
    }

    /// Change the parameters of an optics. The source keeps its role.
    pub fn set_optics_kind(&mut self, index: usize, kind: OpticsKind) -> Result<(), OpticsError> {
        self.checked(index)?;
        let is_source = matches!(kind, OpticsKind::CreateBeam { .. });
        if is_source != (index == 0) {
            return Err(OpticsError::InputBeam);
        }
        self.optics[index].kind = kind;
        self.compute_beams();
        Ok(())
    }

    /// Make optics `index` follow `parent` when either is moved.
    pub fn lock_to(&mut self, index: usize, parent: &str) -> Result<(), OpticsError> {
        let name = self.checked(index)?.name.clone();
        let parent_index = self
            .index_of(parent)
            .ok_or_else(|| OpticsError::UnknownOptics(parent.to_string()))?;
        if tree_members(&self.optics, index).contains(&parent_index) {
            return Err(OpticsError::LockCycle(name, parent.to_string()));
        }
        let optics = &mut self.optics[index];
        optics.lock_parent = Some(parent.to_string());
        optics.absolute_lock = false;
        Ok(())
    }

    pub fn unlock(&mut self, index: usize) -> Result<(), OpticsError> {
        self.checked(index)?;
        self.optics[index].lock_parent = None;
        Ok(())
    }

    /// An absolute lock replaces any relative lock.
    pub fn set_absolute_lock(&mut self, index: usize, lock: bool) -> Result<(), OpticsError> {
        self.checked(index)?;
        let optics = &mut self.optics[index];
        if lock {
            optics.lock_parent = None;
        }
        optics.absolute_lock = lock;
        Ok(())
    }

    /// Replace the source beam, moving the source to the beam waist even
    /// when it is locked.
    pub fn set_input_beam(&mut self, beam: &Beam) {
        self.optics[0].kind = OpticsKind::CreateBeam {
            waist: beam.waist,
            index: beam.index,
            m2: beam.m2,
        };
        move_tree(&mut self.optics, 0, beam.waist_position, false);
        self.sort_and_compute();
    }

    /// Impose the beam leaving optics `index` and propagate it both ways.
    /// The source is updated to the beam found upstream.
    pub fn set_beam(&mut self, index: usize, beam: Beam) -> Result<(), OpticsError> {
        self.checked(index)?;
        self.beams[index] = beam;
        for i in index + 1..self.optics.len() {
            self.beams[i] = self.optics[i].image(&self.beams[i - 1]);
        }
        for i in (0..index).rev() {
            self.beams[i] = self.optics[i + 1].antecedent(&self.beams[i + 1]);
        }
        let source = self.beams[0];
        self.optics[0].kind = OpticsKind::CreateBeam {
            waist: source.waist,
            index: source.index,
            m2: source.m2,
        };
        self.optics[0].position = source.waist_position;
        Ok(())
    }

    /// Second derivative of the output overlap with respect to the position
    /// of each optics. Large values flag the optics that need care.
    pub fn sensitivity(&self) -> Vec<f64> {
        let reference = *self.output_beam();
        let initial = overlap(&reference, &output_of(&self.optics, self.wavelength), 0.0);
        let mut moved = self.optics.clone();

        (0..moved.len())
            .map(|i| {
                let position = moved[i].position;
                moved[i].position = position + SENSITIVITY_STEP;
                let shifted = overlap(&reference, &output_of(&moved, self.wavelength), 0.0);
                moved[i].position = position;
                (shifted - initial) / (SENSITIVITY_STEP * SENSITIVITY_STEP)
            })
            .collect()
    }

    /// Randomly move the free optics within the bench boundaries until the
    /// output beam reaches `target`. Optics under an absolute lock or locked
    /// to another optics stay put. Returns whether a solution was applied.
    pub fn magic_waist(&mut self, target: &TargetBeam, seed: u64) -> bool {
        let movable: Vec<String> = self
            .optics
            .iter()
            .filter(|o| !o.absolute_lock && o.lock_parent.is_none())
            .map(|o| o.name.clone())
            .collect();
        if movable.is_empty() {
            return false;
        }

        let mut candidate = self.optics.clone();
        let mut rng = XorShift::new(seed);
        let span = self.right_boundary - self.left_boundary;

        for attempt in 0..MAGIC_WAIST_TRIES {
            let name = &movable[rng.below(movable.len())];
            let position = self.left_boundary + rng.next_f64() * span;
            if let Some(index) = candidate.iter().position(|o| &o.name == name) {
                move_tree(&mut candidate, index, position, true);
                sort_optics(&mut candidate);
            }

            let beam = output_of(&candidate, self.wavelength);
            if target.is_reached_by(&beam) {
                tracing::debug!(
                    attempt,
                    waist = beam.waist,
                    position = beam.waist_position,
                    "magic waist found"
                );
                self.optics = candidate;
                self.compute_beams();
                return true;
            }
        }

        tracing::debug!("magic waist not found after {} tries", MAGIC_WAIST_TRIES);
        false
    }

    /// Declare the optics from `first` to `last` (inclusive) a cavity.
    pub fn set_cavity(&mut self, first: &str, last: &str, ring: bool) -> Result<(), OpticsError> {
        let spec = CavitySpec {
            first: first.to_string(),
            last: last.to_string(),
            ring,
        };
        self.cavity_optics(&spec)?;
        self.cavity = Some(spec);
        Ok(())
    }

    pub fn clear_cavity(&mut self) {
        self.cavity = None;
    }

    pub fn cavity(&self) -> Option<Cavity> {
        let spec = self.cavity.as_ref()?;
        let (first, last) = self.cavity_optics(spec).ok()?;
        Cavity::new(&self.optics[first..=last], spec.ring).ok()
    }

    pub fn is_cavity_stable(&self) -> bool {
        self.cavity().is_some_and(|c| c.is_stable())
    }

    /// Cavity eigenmode leaving optics `index`, which must lie inside the
    /// cavity. The last optics of a ring cavity is excluded.
    pub fn cavity_eigen_beam(&self, index: usize) -> Option<Beam> {
        let spec = self.cavity.as_ref()?;
        let (first, last) = self.cavity_optics(spec).ok()?;
        let inside = if spec.ring {
            (first..last).contains(&index)
        } else {
            (first..=last).contains(&index)
        };
        if !inside {
            return None;
        }

        let mut beam = self.cavity()?.eigen_beam(self.wavelength)?;
        for optics in &self.optics[first + 1..=index] {
            beam = optics.image(&beam);
        }
        Some(beam)
    }

    pub fn fits(&self) -> &[Fit] {
        &self.fits
    }

    /// Fit `index`, created empty (with the ones before it) if missing.
    pub fn fit_mut(&mut self, index: usize) -> &mut Fit {
        while self.fits.len() <= index {
            let name = format!("Fit {}", self.fits.len() + 1);
            self.fits.push(Fit::new(name));
        }
        &mut self.fits[index]
    }

    fn cavity_optics(&self, spec: &CavitySpec) -> Result<(usize, usize), OpticsError> {
        let find = |name: &str| {
            self.index_of(name)
                .ok_or_else(|| OpticsError::UnknownOptics(name.to_string()))
        };
        let (first, last) = (find(&spec.first)?, find(&spec.last)?);
        if first == 0 {
            return Err(OpticsError::NotAbcd(spec.first.clone()));
        }
        if last <= first {
            return Err(OpticsError::CavityTooSmall);
        }
        Ok((first, last))
    }

    fn checked(&self, index: usize) -> Result<&Optics, OpticsError> {
        self.optics.get(index).ok_or(OpticsError::NoSuchOptics(index))
    }

    fn next_name(&mut self, optics_type: OpticsType) -> String {
        loop {
            let counter = self.name_counters.entry(optics_type).or_insert(0);
            *counter += 1;
            let name = format!("{}{}", optics_type.prefix(), counter);
            if self.index_of(&name).is_none() {
                return name;
            }
        }
    }

    fn sort_and_compute(&mut self) {
        sort_optics(&mut self.optics);
        self.compute_beams();
    }

    fn compute_beams(&mut self) {
        self.beams = propagate(&self.optics, self.wavelength);
    }
}

/// Beams leaving each optics, starting from an empty beam.
fn propagate(optics: &[Optics], wavelength: f64) -> Vec<Beam> {
    let mut beam = Beam::new(0.0, 0.0, wavelength);
    optics
        .iter()
        .map(|o| {
            beam = o.image(&beam);
            beam
        })
        .collect()
}

fn output_of(optics: &[Optics], wavelength: f64) -> Beam {
    optics
        .iter()
        .fold(Beam::new(0.0, 0.0, wavelength), |beam, o| o.image(&beam))
}

/// Keep the source first and the other optics by position.
fn sort_optics(optics: &mut [Optics]) {
    if let Some((_, rest)) = optics.split_first_mut() {
        rest.sort_by(|a, b| a.position.total_cmp(&b.position));
    }
}

fn lock_root(optics: &[Optics], mut index: usize) -> usize {
    // Bounded walk: a hand-edited lock chain may loop.
    for _ in 0..optics.len() {
        let Some(parent) = optics[index]
            .lock_parent
            .as_deref()
            .and_then(|name| optics.iter().position(|o| o.name == name))
        else {
            break;
        };
        index = parent;
    }
    index
}

/// `root` and every optics locked to it, directly or not.
fn tree_members(optics: &[Optics], root: usize) -> Vec<usize> {
    let mut members = vec![root];
    let mut names: HashSet<&str> = HashSet::from([optics[root].name.as_str()]);
    let mut grew = true;
    while grew {
        grew = false;
        for (i, o) in optics.iter().enumerate() {
            if !names.contains(o.name.as_str())
                && o.lock_parent.as_deref().is_some_and(|p| names.contains(p))
            {
                names.insert(o.name.as_str());
                members.push(i);
                grew = true;
            }
        }
    }
    members
}

/// Move optics `index` to `position`, shifting its whole lock tree.
/// Returns false when an absolute lock on the tree root forbids it.
fn move_tree(
    optics: &mut [Optics],
    index: usize,
    position: f64,
    respect_absolute_lock: bool,
) -> bool {
    let root = lock_root(optics, index);
    if respect_absolute_lock && optics[root].absolute_lock {
        return false;
    }
    let delta = position - optics[index].position;
    for member in tree_members(optics, root) {
        optics[member].position += delta;
    }
    true
}

/// xorshift64* generator, enough to scatter trial positions.
struct XorShift(u64);

impl XorShift {
    fn new(seed: u64) -> Self {
        Self((seed ^ 0x9E37_79B9_7F4A_7C15).max(1))
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}
