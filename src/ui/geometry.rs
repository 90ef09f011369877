//! Dial geometry
//!
//! Angles are measured clockwise from 12 o'clock in fixed point units,
//! [`TRIG_MAX_ANGLE`] per full turn.

use core::f32::consts::PI;

use embedded_graphics::geometry::Point;

/// One full turn
pub const TRIG_MAX_ANGLE: i32 = 0x10000;

/// Fixed point angle
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Angle(pub i32);

impl Angle {
    /// `numerator / denominator` of a full turn
    pub const fn from_turns(numerator: i32, denominator: i32) -> Self {
        Self(TRIG_MAX_ANGLE * numerator / denominator)
    }
    /// Angle of minute mark `index` (0–59)
    pub const fn from_sixtieths(index: i32) -> Self {
        Self::from_turns(index, 60)
    }

    fn radians(self) -> f32 {
        self.0 as f32 * 2.0 * PI / TRIG_MAX_ANGLE as f32
    }

    /// Point at `radius` from `center` in the direction of this angle.
    ///
    /// Offsets are truncated toward zero.
    pub fn point_at(self, center: Point, radius: u32) -> Point {
        let radians = self.radians();
        let radius = radius as f32;
        Point::new(
            center.x + (libm::sinf(radians) * radius) as i32,
            center.y + (-libm::cosf(radians) * radius) as i32,
        )
    }
}

impl core::ops::Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Self) -> Self::Output {
        Angle(self.0 + rhs.0)
    }
}
