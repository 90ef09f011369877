//! Analog dial watchface

use core::fmt;

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::Point,
    mono_font::MonoTextStyle,
    pixelcolor::{Rgb565, RgbColor},
    primitives::{Circle, Line, Primitive, PrimitiveStyle},
    text::{Baseline, Text},
    Drawable,
};
use profont::PROFONT_14_POINT;

use super::{geometry::Angle, ColorMode, Error, WatchFace, WatchFaceState};
use crate::system::{config::DATE_POSITION, status::BATTERY_DOTS};

const BUF_LEN: usize = 4;

/// Stroke width of both hands
const HAND_WIDTH: u32 = 6;

const BACKGROUND: Rgb565 = Rgb565::BLACK;
const DIAL: Rgb565 = Rgb565::new(10, 21, 10);
const DIAL_DOTS: Rgb565 = Rgb565::WHITE;
const HOUR_HAND: Rgb565 = Rgb565::RED;
const MINUTE_HAND: Rgb565 = Rgb565::WHITE;
const BATTERY_EMPTY: Rgb565 = Rgb565::new(0, 21, 0);
const BATTERY_FULL: Rgb565 = Rgb565::GREEN;
const BATTERY_CHARGING: Rgb565 = Rgb565::YELLOW;
const BT_CONNECTED: Rgb565 = Rgb565::BLUE;
const BT_DISCONNECTED: Rgb565 = Rgb565::RED;
const DATE_TEXT: Rgb565 = Rgb565::WHITE;

/// Minute mark of the first battery dot; the dots are two marks apart
const BATTERY_DOTS_START: i32 = 20;
/// Minute mark of the bluetooth dot
const BT_DOT_POSITION: i32 = 30;

/// Radius of dial dot `index` (0–59): large on the quarters, medium on the
/// hours, small on every other minute
pub fn dial_dot_radius(index: u32) -> u32 {
    if index % 15 == 0 {
        3
    } else if index % 5 == 0 {
        2
    } else {
        1
    }
}

/// Angle of battery dot `index` (0–4)
pub fn battery_dot_angle(index: u8) -> Angle {
    Angle::from_sixtieths(BATTERY_DOTS_START + 2 * index as i32)
}

/// Angle of the bluetooth dot
pub fn bluetooth_dot_angle() -> Angle {
    Angle::from_sixtieths(BT_DOT_POSITION)
}

/// Filled circle around `center`
fn disc(center: Point, radius: u32, color: Rgb565) -> impl Drawable<Color = Rgb565> {
    Circle::with_center(center, radius * 2 + 1).into_styled(PrimitiveStyle::with_fill(color))
}

pub struct Label {
    str_buf: [u8; BUF_LEN],
    position: Point,
}

impl Label {
    /// Create new label with its top left corner at `position`
    fn new(position: Point) -> Self {
        Self {
            str_buf: [0; BUF_LEN],
            position,
        }
    }

    fn draw<D>(
        &mut self,
        args: fmt::Arguments,
        style: MonoTextStyle<'_, ColorMode>,
        target: &mut D,
    ) -> Result<(), Error<D::Error>>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        let text = format_no_std::show(&mut self.str_buf, args).map_err(|_| Error::Format)?;
        Text::with_baseline(text, self.position, style, Baseline::Top)
            .draw(target)
            .map_err(Error::Draw)?;
        Ok(())
    }
}

/// Analog dial with battery and bluetooth indicators
pub struct DialWatchface {
    /// Day of month label
    date_label: Label,
}

impl Default for DialWatchface {
    fn default() -> Self {
        Self::new()
    }
}

impl DialWatchface {
    pub fn new() -> Self {
        Self {
            date_label: Label::new(DATE_POSITION),
        }
    }

    fn draw_dial<D>(&self, state: &WatchFaceState, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        let center = state.center;
        let radii = &state.radii;

        target.fill_solid(&state.bounds, BACKGROUND)?;

        // Gray clockface
        disc(center, radii.dial, DIAL).draw(target)?;

        // Dial dots
        for i in 0..60 {
            let dot_center = Angle::from_sixtieths(i as i32).point_at(center, radii.dots);
            disc(dot_center, dial_dot_radius(i), DIAL_DOTS).draw(target)?;
        }

        // Hands
        let hour_tip = state.hands.hour_angle().point_at(center, radii.hand_length);
        let minute_tip = state.hands.minute_angle().point_at(center, radii.hand_length);
        Line::new(center, hour_tip)
            .into_styled(PrimitiveStyle::with_stroke(HOUR_HAND, HAND_WIDTH))
            .draw(target)?;
        Line::new(center, minute_tip)
            .into_styled(PrimitiveStyle::with_stroke(MINUTE_HAND, HAND_WIDTH))
            .draw(target)?;

        // Black dial
        disc(center, radii.black_dial, BACKGROUND).draw(target)?;

        // Battery dots
        let battery = state.status.battery;
        for i in 0..BATTERY_DOTS {
            let dot_center = battery_dot_angle(i).point_at(center, radii.batt_dots);
            if state.status.battery_dot_filled(i) {
                let color = if battery.charging {
                    BATTERY_CHARGING
                } else {
                    BATTERY_FULL
                };
                disc(dot_center, 2, color).draw(target)?;
            } else {
                disc(dot_center, 1, BATTERY_EMPTY).draw(target)?;
            }
        }

        // Bluetooth dot
        let dot_center = bluetooth_dot_angle().point_at(center, radii.batt_dots);
        let color = if state.status.bluetooth_connected {
            BT_CONNECTED
        } else {
            BT_DISCONNECTED
        };
        disc(dot_center, 2, color).draw(target)?;

        Ok(())
    }
}

impl WatchFace for DialWatchface {
    fn draw<D>(&mut self, state: &WatchFaceState, target: &mut D) -> Result<(), Error<D::Error>>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        self.draw_dial(state, target).map_err(Error::Draw)?;

        let style = MonoTextStyle::new(&PROFONT_14_POINT, DATE_TEXT);
        self.date_label
            .draw(format_args!("{:02}", state.day), style, target)
    }
}
