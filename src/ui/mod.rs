//! UI definitions module
//! Based on: https://github.com/lupyuen/pinetime-watchface/blob/master/src/lib.rs

use embedded_graphics::{
    draw_target::DrawTarget, geometry::Point, pixelcolor::Rgb565, primitives::Rectangle,
};

use crate::system::{status::DeviceStatus, time::ClockTime};

pub mod animation;
pub mod dial_watchface;
pub mod geometry;
pub mod layout;

use animation::AnimatedTime;
use geometry::Angle;
use layout::RadiusSet;

pub use dial_watchface::DialWatchface;

/// Color format of the LCD
pub type ColorMode = Rgb565;

pub trait WatchFace {
    /// Draw the watchface for `state` onto `target`
    fn draw<D>(&mut self, state: &WatchFaceState, target: &mut D) -> Result<(), Error<D::Error>>
    where
        D: DrawTarget<Color = ColorMode>;
}

/// Time the hands point to
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hands {
    /// Current time
    Live(ClockTime),
    /// Entrance animation in progress
    Sweeping(AnimatedTime),
}

impl Hands {
    fn minutes(&self) -> u8 {
        match self {
            Hands::Live(time) => time.minutes,
            Hands::Sweeping(time) => time.minutes,
        }
    }

    pub fn minute_angle(&self) -> Angle {
        Angle::from_turns(self.minutes() as i32, 60)
    }

    /// Hour hand angle, creeping toward the next hour as the minutes pass
    pub fn hour_angle(&self) -> Angle {
        let hours = match self {
            Hands::Live(time) => Angle::from_turns(time.hours as i32, 12),
            Hands::Sweeping(time) => Angle::from_turns(time.hours_in_sixtieths as i32, 60),
        };
        hours + Angle(self.minute_angle().0 / 12)
    }
}

/// State for the watch face
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WatchFaceState {
    /// Whole display
    pub bounds: Rectangle,
    /// Dial center
    pub center: Point,
    /// Current radii of the dial layers
    pub radii: RadiusSet,
    pub hands: Hands,
    pub status: DeviceStatus,
    /// Day of month (1–31)
    pub day: u32,
}

#[derive(Debug)]
pub enum Error<E> {
    /// The display rejected a drawing operation
    Draw(E),
    /// A label did not fit its buffer
    Format,
}
