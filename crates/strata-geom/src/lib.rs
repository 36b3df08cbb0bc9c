//! Minimal geometry types shared by the meshing crates.
#![forbid(unsafe_code)]

use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const UP: Vec3 = Vec3 {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    /// Centre of a unit block in its local frame; pivot for block rotations.
    pub const BLOCK_CENTRE: Vec3 = Vec3 {
        x: 0.5,
        y: 0.5,
        z: 0.5,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, rhs: Vec3) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline]
    pub fn cross(self, rhs: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn normalized(self) -> Vec3 {
        let len = self.length();
        if len > 0.0 { self / len } else { self }
    }

    #[inline]
    pub fn distance(self, rhs: Vec3) -> f32 {
        (self - rhs).length()
    }

    /// Rotates about the Z axis through `pivot`. Positive degrees take +Y towards -X.
    #[inline]
    pub fn rotated_about_z(self, pivot: Vec3, degrees: f32) -> Vec3 {
        let (s, c) = sin_cos_degrees(degrees);
        let d = self - pivot;
        pivot + Vec3::new(d.x * c - d.y * s, d.x * s + d.y * c, d.z)
    }

    /// Rotates about the Y axis through `pivot`. Positive degrees take -X towards +Z.
    #[inline]
    pub fn rotated_about_y(self, pivot: Vec3, degrees: f32) -> Vec3 {
        let (s, c) = sin_cos_degrees(degrees);
        let d = self - pivot;
        pivot + Vec3::new(d.x * c + d.z * s, d.y, -d.x * s + d.z * c)
    }
}

/// Sine and cosine of an angle in degrees; quarter turns are exact.
pub fn sin_cos_degrees(degrees: f32) -> (f32, f32) {
    let quarters = degrees / 90.0;
    if quarters.fract() == 0.0 && quarters.is_finite() {
        match (quarters as i64).rem_euclid(4) {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        }
    } else {
        degrees.to_radians().sin_cos()
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec3) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn div(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut it = points.into_iter();
        let first = it.next()?;
        let mut bb = Aabb::new(first, first);
        for p in it {
            bb.include(p);
        }
        Some(bb)
    }

    #[inline]
    pub fn include(&mut self, p: Vec3) {
        self.min = Vec3::new(self.min.x.min(p.x), self.min.y.min(p.y), self.min.z.min(p.z));
        self.max = Vec3::new(self.max.x.max(p.x), self.max.y.max(p.y), self.max.z.max(p.z));
    }
}

/// RGBA tint in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Colour4f {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Colour4f {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Colour4f {
    pub const WHITE: Colour4f = Colour4f::new(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn grey(lightness: f32) -> Self {
        Self::new(lightness, lightness, lightness, 1.0)
    }

    /// Scales the colour channels by `lightness`, leaving alpha alone.
    #[inline]
    pub fn lit(self, lightness: f32) -> Self {
        Self::new(self.r * lightness, self.g * lightness, self.b * lightness, self.a)
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// Sense of a block rotation. `None` ignores whatever angle accompanies it.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Rotation {
    #[default]
    None,
    Clockwise,
    AntiClockwise,
}

/// A rotation sense paired with an angle in degrees.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Turn {
    pub rotation: Rotation,
    pub angle: f32,
}

impl Turn {
    pub const NONE: Turn = Turn {
        rotation: Rotation::None,
        angle: 0.0,
    };

    #[inline]
    pub const fn new(rotation: Rotation, angle: f32) -> Self {
        Self { rotation, angle }
    }

    /// Signed degrees, clockwise positive.
    #[inline]
    pub fn signed_degrees(self) -> f32 {
        match self.rotation {
            Rotation::None => 0.0,
            Rotation::Clockwise => self.angle,
            Rotation::AntiClockwise => -self.angle,
        }
    }
}

/// Vertical turn (about Z) followed by horizontal turn (about Y), both pivoting on the block centre.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Orientation {
    pub vertical: Turn,
    pub horizontal: Turn,
}

impl Orientation {
    #[inline]
    pub const fn new(vertical: Turn, horizontal: Turn) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    /// Maps a point in the block's local frame to its rotated position.
    #[inline]
    pub fn apply(&self, p: Vec3) -> Vec3 {
        let mut out = p;
        let v = self.vertical.signed_degrees();
        if v != 0.0 {
            out = out.rotated_about_z(Vec3::BLOCK_CENTRE, v);
        }
        let h = self.horizontal.signed_degrees();
        if h != 0.0 {
            out = out.rotated_about_y(Vec3::BLOCK_CENTRE, h);
        }
        out
    }
}
