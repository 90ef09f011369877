//! Time and device status state of the watchface

use chrono::NaiveDateTime;

use super::status::{BatteryInfo, DeviceStatus};
use super::time::ClockTime;

/// Last known time and device status.
///
/// Every setter overwrites the stored value and requests a redraw.
#[derive(Debug, Default)]
pub struct WatchState {
    time: ClockTime,
    status: DeviceStatus,
    redraw: bool,
}

impl WatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_time(&mut self, hours: u8, minutes: u8) {
        self.time = ClockTime::new(hours, minutes);
        self.redraw = true;
    }

    /// Store the time of a wall clock reading
    pub fn set_datetime(&mut self, time: &NaiveDateTime) {
        self.time = ClockTime::from_datetime(time);
        self.redraw = true;
    }

    pub fn set_battery(&mut self, percent: u8, charging: bool) {
        self.status.battery = BatteryInfo::new(percent, charging);
        self.redraw = true;
    }

    pub fn set_bluetooth(&mut self, connected: bool) {
        self.status.bluetooth_connected = connected;
        self.redraw = true;
    }

    pub fn time(&self) -> ClockTime {
        self.time
    }

    pub fn status(&self) -> DeviceStatus {
        self.status
    }

    /// Request a redraw without changing any value
    pub fn mark_dirty(&mut self) {
        self.redraw = true;
    }

    /// Return and clear the pending redraw request
    pub fn take_redraw(&mut self) -> bool {
        core::mem::take(&mut self.redraw)
    }
}
