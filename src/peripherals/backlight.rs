//! Backlight control
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/backlight.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::{
    gpio::Output,
    peripherals::{P0_14, P0_22, P0_23},
};

/// Highest brightness level
pub const MAX_BRIGHTNESS: u8 = 7;

/// Three active-low pins, each switching the backlight through a
/// different resistor (2.2 kΩ, 100 Ω, 30 Ω). Their combinations give
/// 7 brightness levels plus off.
pub struct Backlight<'a> {
    low: Output<'a, P0_14>,
    mid: Output<'a, P0_22>,
    high: Output<'a, P0_23>,
    /// Current level (0–7)
    brightness: u8,
    /// Level restored by [`Backlight::on`]
    on_level: u8,
}

impl<'a> Backlight<'a> {
    /// Initialize the backlight switched off, remembering `on_level`
    pub fn init(
        low: Output<'a, P0_14>,
        mid: Output<'a, P0_22>,
        high: Output<'a, P0_23>,
        on_level: u8,
    ) -> Result<Self, Error> {
        if on_level > MAX_BRIGHTNESS {
            return Err(Error::OutOfBounds);
        }
        let mut backlight = Self {
            low,
            mid,
            high,
            brightness: 0,
            on_level,
        };
        backlight.off();
        Ok(backlight)
    }

    /// Set the brightness level between 0 (off) and 7 (max brightness).
    pub fn set(&mut self, brightness: u8) -> Result<(), Error> {
        if brightness > MAX_BRIGHTNESS {
            return Err(Error::OutOfBounds);
        }
        defmt::debug!("Setting backlight brightness to {}", brightness);

        drive(&mut self.low, brightness & 0x01 != 0);
        drive(&mut self.mid, brightness & 0x02 != 0);
        drive(&mut self.high, brightness & 0x04 != 0);
        self.brightness = brightness;
        Ok(())
    }

    /// Switch to the remembered level
    pub fn on(&mut self) {
        let level = self.on_level;
        self.apply(level);
    }

    /// Turn off the backlight.
    pub fn off(&mut self) {
        self.apply(0);
    }

    pub fn is_on(&self) -> bool {
        self.brightness > 0
    }

    fn apply(&mut self, level: u8) {
        // Levels passed here are checked at init
        if self.set(level).is_err() {
            defmt::warn!("Backlight level {} rejected", level);
        }
    }
}

/// Enable one resistor path. The pins are active low.
fn drive<P: embassy_nrf::gpio::Pin>(pin: &mut Output<'_, P>, enabled: bool) {
    if enabled {
        pin.set_low();
    } else {
        pin.set_high();
    }
}

#[derive(Debug, defmt::Format)]
pub enum Error {
    OutOfBounds,
}
