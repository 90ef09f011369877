//! Device status shown on the dial

/// Number of battery level dots
pub const BATTERY_DOTS: u8 = 5;

/// Battery reading as delivered by the battery monitor
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatteryInfo {
    /// Charging state
    pub charging: bool,
    /// Battery percentage
    pub percent: u8,
}

impl BatteryInfo {
    pub fn new(percent: u8, charging: bool) -> Self {
        Self {
            charging,
            percent: percent.min(100),
        }
    }
    /// The level at which the low battery alert fires
    pub fn is_low_alert(&self) -> bool {
        self.percent == 10 && !self.charging
    }
}

/// Battery and connection state of the watch
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeviceStatus {
    pub battery: BatteryInfo,
    pub bluetooth_connected: bool,
}

impl DeviceStatus {
    /// Whether battery dot `index` (0–4) is drawn as filled.
    ///
    /// Each dot stands for a 20% band, rounded at the band's middle.
    pub fn battery_dot_filled(&self, index: u8) -> bool {
        (index as i16) <= (self.battery.percent as i16 + 10) / 20 - 1
    }
    /// Number of filled battery dots
    pub fn filled_battery_dots(&self) -> u8 {
        (0..BATTERY_DOTS)
            .filter(|&i| self.battery_dot_filled(i))
            .count() as u8
    }
}
