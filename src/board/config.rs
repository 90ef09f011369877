//! Peripheral configuration for the PineTime board

use embassy_nrf::{
    config::{Config, Debug, HfclkSource, LfclkSource},
    interrupt::Priority,
    saadc::{self, Resolution},
    spim,
};

/// Brightness the backlight returns to when the watchface is shown
pub const BACKLIGHT_LEVEL: u8 = 2;

/// Chip configuration compatible with the SoftDevice
pub fn chip() -> Config {
    // Config is `non_exhaustive`
    let mut config = Config::default();

    config.hfclk_source = HfclkSource::ExternalXtal;
    config.lfclk_source = LfclkSource::ExternalXtal;

    // DC/DC regulator massively reduces runtime current consumption
    config.dcdc.reg1 = true;

    // Priorities 0, 1 and 4 are reserved for the SoftDevice
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;

    config.debug = Debug::Allowed;

    config
}

/// SPI bus of the LCD
pub fn display_spi() -> spim::Config {
    let mut config = spim::Config::default();
    // 8MHz is the fastest clock available on the nRF52832
    config.frequency = spim::Frequency::M8;
    // The ST7789 only works in mode 3
    config.mode = spim::MODE_3;
    config
}

/// ADC measuring the battery voltage
pub fn battery_adc() -> saadc::Config {
    let mut config = saadc::Config::default();
    // The voltage formula expects 12 bit samples
    config.resolution = Resolution::_12BIT;
    config
}
