use crate::core::models::atom::Atom;
use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Inverted bounds on the {axis} axis: min {min} > max {max}")]
    InvertedBounds { axis: char, min: f64, max: f64 },
    #[error("Bounds must be finite on the {axis} axis")]
    NonFiniteBounds { axis: char },
}

const AXES: [char; 3] = ['x', 'y', 'z'];

/// The minimal axis-aligned box enclosing a set of points.
///
/// A volume is either *empty* (no point added yet, encoded as
/// `min = +inf`, `max = -inf`) or satisfies `min <= max` on every axis.
/// Every mutating operation preserves this.
///
/// Octants produced by [`subdivide`](Self::subdivide) are indexed as
/// `(x_bit << 2) | (y_bit << 1) | z_bit`, where a bit of 0 selects the lower
/// half of that axis: octant 0 is lower on all axes, octant 7 upper on all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
    min: Point3<f64>,
    max: Point3<f64>,
}

impl Default for BoundingVolume {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingVolume {
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Creates a volume from explicit corners.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonFiniteBounds`] if any coordinate is NaN or
    /// infinite, and [`GeometryError::InvertedBounds`] if `min > max` on any
    /// axis.
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Result<Self, GeometryError> {
        for (i, &axis) in AXES.iter().enumerate() {
            if !min[i].is_finite() || !max[i].is_finite() {
                return Err(GeometryError::NonFiniteBounds { axis });
            }
            if min[i] > max[i] {
                return Err(GeometryError::InvertedBounds {
                    axis,
                    min: min[i],
                    max: max[i],
                });
            }
        }
        Ok(Self { min, max })
    }

    pub fn from_point(point: &Point3<f64>) -> Self {
        let mut volume = Self::empty();
        volume.add_point(point);
        volume
    }

    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point3<f64>>,
    {
        let mut volume = Self::empty();
        for point in points {
            volume.add_point(point);
        }
        volume
    }

    pub fn from_atoms(atoms: &[Atom]) -> Self {
        let mut volume = Self::empty();
        volume.calculate_from_atoms(atoms);
        volume
    }

    pub fn min(&self) -> Point3<f64> {
        self.min
    }

    pub fn max(&self) -> Point3<f64> {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    /// An empty volume is valid; a non-empty one must be finite with
    /// `min <= max` on every axis.
    pub fn is_valid(&self) -> bool {
        self.is_empty() || Self::new(self.min, self.max).is_ok()
    }

    pub fn reset(&mut self) {
        *self = Self::empty();
    }

    /// Grows the volume to include `point`. Non-finite points are ignored.
    pub fn add_point(&mut self, point: &Point3<f64>) {
        if !(point.x.is_finite() && point.y.is_finite() && point.z.is_finite()) {
            return;
        }
        if self.is_empty() {
            self.min = *point;
            self.max = *point;
            return;
        }
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Replaces the current bounds with the bounds of `atoms`.
    pub fn calculate_from_atoms(&mut self, atoms: &[Atom]) {
        self.reset();
        for atom in atoms {
            self.add_point(&atom.position);
        }
    }

    pub fn width(&self) -> f64 {
        self.extent(0)
    }

    pub fn height(&self) -> f64 {
        self.extent(1)
    }

    pub fn depth(&self) -> f64 {
        self.extent(2)
    }

    fn extent(&self, axis: usize) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max[axis] - self.min[axis]
        }
    }

    pub fn volume(&self) -> f64 {
        self.width() * self.height() * self.depth()
    }

    /// The midpoint of the box, or `None` for an empty volume.
    pub fn center(&self) -> Option<Point3<f64>> {
        (!self.is_empty()).then(|| nalgebra::center(&self.min, &self.max))
    }

    /// Radius of the sphere centred on the box that touches its corners.
    /// Zero for an empty volume.
    pub fn bounding_sphere_radius(&self) -> f64 {
        self.center()
            .map_or(0.0, |c| nalgebra::distance(&c, &self.max))
    }

    /// Inclusive point test; always `false` for an empty volume.
    pub fn contains_point(&self, point: &Point3<f64>) -> bool {
        !self.is_empty()
            && (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }

    /// Tests the atom's centre only; its radius is not considered.
    pub fn contains_atom(&self, atom: &Atom) -> bool {
        self.contains_point(&atom.position)
    }

    /// Whether `other` lies entirely inside this volume (faces may coincide).
    pub fn contains(&self, other: &BoundingVolume) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && (0..3).all(|i| other.min[i] >= self.min[i] && other.max[i] <= self.max[i])
    }

    /// Whether the two volumes overlap. Touching faces, edges or corners
    /// count as intersecting.
    pub fn intersects(&self, other: &BoundingVolume) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && (0..3).all(|i| self.min[i] <= other.max[i] && other.min[i] <= self.max[i])
    }

    /// The smallest volume enclosing both `self` and `other`.
    pub fn merge(&self, other: &BoundingVolume) -> BoundingVolume {
        match (self.is_empty(), other.is_empty()) {
            (true, _) => *other,
            (_, true) => *self,
            _ => BoundingVolume {
                min: self.min.inf(&other.min),
                max: self.max.sup(&other.max),
            },
        }
    }

    /// Moves every face outwards by `margin`. Has no effect on an empty volume.
    ///
    /// A negative margin shrinks the box. An axis that would become inverted
    /// collapses to zero size at its midpoint instead. A NaN or infinite
    /// margin, or one that would push a face to infinity, leaves the volume
    /// unchanged.
    pub fn expand(&mut self, margin: f64) {
        if self.is_empty() || !margin.is_finite() {
            return;
        }
        let mut min = self.min;
        let mut max = self.max;
        for i in 0..3 {
            let lo = min[i] - margin;
            let hi = max[i] + margin;
            if !lo.is_finite() || !hi.is_finite() {
                return;
            }
            if lo > hi {
                let mid = (min[i] + max[i]) * 0.5;
                min[i] = mid;
                max[i] = mid;
            } else {
                min[i] = lo;
                max[i] = hi;
            }
        }
        self.min = min;
        self.max = max;
    }

    /// Splits the volume at its midpoint into 8 octants.
    ///
    /// The octants of an empty volume are all empty.
    pub fn subdivide(&self) -> [BoundingVolume; 8] {
        match self.center() {
            None => [BoundingVolume::empty(); 8],
            Some(mid) => std::array::from_fn(|index| self.octant_around(index, &mid)),
        }
    }

    /// A single octant of [`subdivide`](Self::subdivide), or `None` if
    /// `index >= 8`.
    pub fn octant(&self, index: usize) -> Option<BoundingVolume> {
        if index >= 8 {
            return None;
        }
        Some(match self.center() {
            None => BoundingVolume::empty(),
            Some(mid) => self.octant_around(index, &mid),
        })
    }

    /// Index of the octant that owns `point`; points on a splitting plane go
    /// to the lower half.
    pub fn octant_index_of(&self, point: &Point3<f64>) -> Option<usize> {
        let mid = self.center()?;
        Some(
            (0..3)
                .map(|i| usize::from(point[i] > mid[i]) << (2 - i))
                .sum(),
        )
    }

    fn octant_around(&self, index: usize, mid: &Point3<f64>) -> BoundingVolume {
        let mut min = self.min;
        let mut max = self.max;
        for i in 0..3 {
            if index & (1 << (2 - i)) == 0 {
                max[i] = mid[i];
            } else {
                min[i] = mid[i];
            }
        }
        BoundingVolume { min, max }
    }
}
