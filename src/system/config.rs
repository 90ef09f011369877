//! General watchface configuration
//!
//! Everything here is fixed at compile time; the watchface has no user
//! settings.

use embassy_time::Duration;
use embedded_graphics::geometry::{Point, Size};

/// LCD width in pixels
pub const LCD_W: u32 = 240;
/// LCD height in pixels
pub const LCD_H: u32 = 240;
/// Full LCD size
pub const LCD_SIZE: Size = Size::new(LCD_W, LCD_H);

/// Local time zone offset from UTC in seconds
pub const TIMEZONE: i32 = 1 * 3_600;

/// Space left around the gray dial (sum of both sides)
pub const RADIUS_MARGIN: u32 = 15;
/// Dial dots sit this far inside the gray dial
pub const DIAL_DOTS_MARGIN: u32 = 9;
/// Black center disc radius, measured inward from the gray dial
pub const BLACK_DIAL_MARGIN: u32 = 18;
/// Battery and bluetooth dots sit this far inside the gray dial
pub const BATT_DOTS_MARGIN: u32 = 25;

/// Duration of the radius run; the hand run takes twice as long
pub const ANIMATION_DURATION: Duration = Duration::from_millis(500);
/// Delay before both entrance animation runs start
pub const ANIMATION_DELAY: Duration = Duration::from_millis(600);
/// Cadence of animation frames (~30 fps)
pub const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Top left corner of the day-of-month label
pub const DATE_POSITION: Point = Point::new(162, 112);
