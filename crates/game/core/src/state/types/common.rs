use std::fmt;

/// Unique identifier for any actor tracked in a zone.
///
/// Identifiers are stable for the lifetime of the actor; casts hold ids rather
/// than references so that an actor leaving the zone never dangles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// World-space position in yalms.
///
/// `x`/`y` span the ground plane; `z` is height and is ignored by range checks.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Ground-plane position (z = 0).
    pub const fn planar(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Euclidean distance on the ground plane.
    pub fn distance(&self, other: &Position) -> f32 {
        let (dx, dy) = self.offset_to(other);
        (dx * dx + dy * dy).sqrt()
    }

    /// Ground-plane offset `(dx, dy)` from `self` to `other`.
    pub fn offset_to(&self, other: &Position) -> (f32, f32) {
        (other.x - self.x, other.y - self.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

/// Unit vector for a facing angle in radians (0 = +x, counter-clockwise).
pub fn facing_vector(rotation: f32) -> (f32, f32) {
    (rotation.cos(), rotation.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_ignores_height() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 4.0, 50.0);
        assert!((a.distance(&b) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn facing_zero_points_along_x() {
        let (dx, dy) = facing_vector(0.0);
        assert!((dx - 1.0).abs() < 1e-6);
        assert!(dy.abs() < 1e-6);
    }
}
