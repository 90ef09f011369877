//! Dial layout
//!
//! The dial is made of concentric layers. Their full size is derived from the
//! display bounds when the watchface is shown; the entrance animation grows
//! them from zero.

use embedded_graphics::{geometry::Point, primitives::Rectangle};

use crate::system::config::{BATT_DOTS_MARGIN, BLACK_DIAL_MARGIN, DIAL_DOTS_MARGIN, RADIUS_MARGIN};

/// Radii of the dial layers in pixels
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RadiusSet {
    /// Gray dial disc
    pub dial: u32,
    /// Minute tick marks
    pub dots: u32,
    /// Black center disc covering the hand bases
    pub black_dial: u32,
    /// Battery and bluetooth dots
    pub batt_dots: u32,
    /// Length of both hands
    pub hand_length: u32,
}

impl RadiusSet {
    /// Full size radii for a display area
    pub fn for_bounds(bounds: &Rectangle) -> Self {
        let dial = bounds.size.width.saturating_sub(RADIUS_MARGIN) / 2;
        Self {
            dial,
            dots: dial.saturating_sub(DIAL_DOTS_MARGIN),
            black_dial: dial.saturating_sub(BLACK_DIAL_MARGIN),
            batt_dots: dial.saturating_sub(BATT_DOTS_MARGIN),
            hand_length: dial,
        }
    }

    /// Apply `f` to every radius
    pub fn map(&self, mut f: impl FnMut(u32) -> u32) -> Self {
        Self {
            dial: f(self.dial),
            dots: f(self.dots),
            black_dial: f(self.black_dial),
            batt_dots: f(self.batt_dots),
            hand_length: f(self.hand_length),
        }
    }

    /// Whether no radius is larger than its counterpart in `other`
    pub fn fits_within(&self, other: &RadiusSet) -> bool {
        self.dial <= other.dial
            && self.dots <= other.dots
            && self.black_dial <= other.black_dial
            && self.batt_dots <= other.batt_dots
            && self.hand_length <= other.hand_length
    }
}

/// Screen areas of the watchface
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Whole display
    pub bounds: Rectangle,
    /// Part of the display not covered by system overlays
    pub unobstructed: Rectangle,
}

impl Layout {
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            unobstructed: bounds,
        }
    }

    /// Dial center, in the middle of the visible area
    pub fn center(&self) -> Point {
        let area = &self.unobstructed;
        area.top_left + area.size / 2
    }

    /// Full radii for the visible area
    pub fn full_radii(&self) -> RadiusSet {
        RadiusSet::for_bounds(&self.unobstructed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::geometry::Size;

    #[test]
    fn pinetime_radii() {
        let bounds = Rectangle::new(Point::zero(), Size::new(240, 240));
        assert_eq!(
            RadiusSet::for_bounds(&bounds),
            RadiusSet {
                dial: 112,
                dots: 103,
                black_dial: 94,
                batt_dots: 87,
                hand_length: 112,
            }
        );
    }

    #[test]
    fn small_bounds_do_not_underflow() {
        let bounds = Rectangle::new(Point::zero(), Size::new(40, 40));
        let radii = RadiusSet::for_bounds(&bounds);
        assert_eq!(radii.dial, 12);
        assert_eq!(radii.black_dial, 0);
        assert_eq!(radii.batt_dots, 0);
    }

    #[test]
    fn center_follows_unobstructed_area() {
        let mut layout = Layout::new(Rectangle::new(Point::zero(), Size::new(240, 240)));
        assert_eq!(layout.center(), Point::new(120, 120));

        layout.unobstructed = Rectangle::new(Point::zero(), Size::new(240, 160));
        assert_eq!(layout.center(), Point::new(120, 80));
        assert_eq!(layout.full_radii().dial, 112);
    }

    #[test]
    fn zero_radii_fit_within_any() {
        let full = RadiusSet::for_bounds(&Rectangle::new(Point::zero(), Size::new(180, 180)));
        assert!(RadiusSet::default().fits_within(&full));
        assert!(full.fits_within(&full));
        assert!(!full.fits_within(&RadiusSet::default()));
    }
}
