//! Side button of the PineTime

use debouncr::{debounce_2, Debouncer, Edge, Repeat2};
use embassy_nrf::{
    gpio::{Input, Output},
    peripherals::{P0_13, P0_15},
};
use embassy_time::{Duration, Timer};

/// Interval between two button samples
const POLL_INTERVAL: Duration = Duration::from_millis(10);

pub struct Button<'a> {
    /// Button detection pin (high = pressed)
    pin_button: Input<'a, P0_13>,
    /// Powers the button circuit while sampling
    pin_enable: Output<'a, P0_15>,
    debouncer: Debouncer<u8, Repeat2>,
}

impl<'a> Button<'a> {
    pub fn init(pin_button: Input<'a, P0_13>, pin_enable: Output<'a, P0_15>) -> Self {
        Self {
            pin_button,
            pin_enable,
            debouncer: debounce_2(false),
        }
    }

    /// Wait until the button has been pressed, stable for two samples
    pub async fn pressed(&mut self) {
        loop {
            if self.sample().await == Some(Edge::Rising) {
                return;
            }
            Timer::after(POLL_INTERVAL).await;
        }
    }

    async fn sample(&mut self) -> Option<Edge> {
        self.pin_enable.set_high();
        // The button needs a short time to give stable outputs
        Timer::after(Duration::from_nanos(1)).await;
        let edge = self.debouncer.update(self.pin_button.is_high());
        // Button consumes around 34µA when P0.15 is left high.
        self.pin_enable.set_low();
        edge
    }
}
