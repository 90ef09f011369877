#![no_std]
#![no_main]

mod board;
mod peripherals;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pull},
    interrupt::{self, InterruptExt, Priority},
    peripherals::SPI2,
    saadc::{self, ChannelConfig, Saadc},
    spim,
};
use embassy_time::{with_timeout, Duration, Instant, Ticker};
use nrf_softdevice::Softdevice;
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use board::{
    bluetooth::{self, Server},
    config,
    platform::{self, Services, Vibes, EVENTS, NOTIFY},
};
use peripherals::{
    backlight::Backlight, battery::Battery, button::Button, display::Display,
    vibration::VibrationMotor,
};
use pinetime_dial::{
    system::{
        config::{FRAME_INTERVAL, LCD_SIZE, TIMEZONE},
        events::Event,
        time::{TimeManager, TimeReference, WallClock},
    },
    ui::DialWatchface,
    Watch,
};

// Others
use chrono::Timelike;
use embedded_graphics::{geometry::Point, pixelcolor::Rgb565, prelude::RgbColor, primitives::Rectangle};

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

static SERVER: StaticCell<Server> = StaticCell::new();

/// Local time, counted from the build time at boot
fn boot_clock() -> TimeManager {
    let mut clock = TimeManager::init(TIMEZONE);
    clock.set_time(TimeReference::from_timestamp(UTC_EPOCH, Instant::from_ticks(0)));
    clock
}

/// Vibrate whenever the watchface asks for it
#[embassy_executor::task(pool_size = 1)]
async fn notify(mut motor: VibrationMotor<'static>) {
    loop {
        match NOTIFY.wait().await {
            1 => motor.pulse_once(None).await,
            count => motor.pulse_times(None, count).await,
        }
    }
}

/// Fetch the battery status from the hardware.
#[embassy_executor::task(pool_size = 1)]
async fn update_battery_status(mut battery: Battery, server: &'static Server) {
    let mut tick = Ticker::every(Duration::from_secs(1));
    loop {
        match battery.update().await {
            Ok(Some(info)) => {
                defmt::info!(
                    "Battery status: {}% ({})",
                    info.percent,
                    if info.charging { "charging" } else { "discharging" }
                );
                bluetooth::set_battery_level(server, info.percent);
                platform::publish(Event::Battery(info));
            }
            Ok(None) => {}
            Err(e) => defmt::warn!("Battery measurement failed: {}", e),
        }

        tick.next().await;
    }
}

/// Publish the local time once per minute
#[embassy_executor::task(pool_size = 1)]
async fn update_time(clock: TimeManager) {
    let mut tick = Ticker::every(Duration::from_secs(1));
    let mut last_minute = None;
    loop {
        let now = clock.now();
        if last_minute != Some(now.minute()) {
            last_minute = Some(now.minute());
            defmt::debug!("Current time: {}:{}", now.hour(), now.minute());
            platform::publish(Event::Tick(now));
        }

        tick.next().await;
    }
}

/// Toggle the watchface and the backlight on every button press
#[embassy_executor::task(pool_size = 1)]
async fn poll_button(mut button: Button<'static>, mut backlight: Backlight<'static>) {
    loop {
        button.pressed().await;
        if backlight.is_on() {
            platform::publish(Event::Hide);
            backlight.off();
        } else {
            backlight.on();
            platform::publish(Event::Show);
        }
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(config::chip());
    defmt::info!("Initializing");

    // Keep clear of the priorities reserved for the SoftDevice
    interrupt::SAADC.set_priority(Priority::P3);
    interrupt::SPIM2_SPIS2_SPI2.set_priority(Priority::P3);

    // Pin P0.31: Voltage level
    let channel_config = ChannelConfig::single_ended(p.P0_31);
    let saadc = Saadc::new(p.SAADC, Irqs, config::battery_adc(), [channel_config]);
    saadc.calibrate().await;
    let mut battery = Battery::init(saadc, Input::new(p.P0_12, Pull::None));
    match battery.update().await {
        Ok(Some(info)) => platform::publish(Event::Battery(info)),
        Ok(None) => {}
        Err(e) => defmt::warn!("Battery measurement failed: {}", e),
    }

    let mut backlight = unwrap!(Backlight::init(
        Output::new(p.P0_14, Level::High, OutputDrive::Standard),
        Output::new(p.P0_22, Level::High, OutputDrive::Standard),
        Output::new(p.P0_23, Level::High, OutputDrive::Standard),
        config::BACKLIGHT_LEVEL,
    ));

    let button = Button::init(
        Input::new(p.P0_13, Pull::None),
        Output::new(p.P0_15, Level::Low, OutputDrive::Standard),
    );

    let vibration = VibrationMotor::init(Output::new(p.P0_16, Level::High, OutputDrive::Standard));

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, config::display_spi());
    let mut display = unwrap!(Display::init(
        spim,
        Output::new(p.P0_25, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26, Level::Low, OutputDrive::Standard),
    ));
    unwrap!(display.clear(Rgb565::BLACK));

    let sd = Softdevice::enable(&bluetooth::generate_config());
    let server: &'static Server = SERVER.init(unwrap!(Server::new(sd)));
    let sd: &'static Softdevice = sd;

    let mut services = Services::new(boot_clock());
    let mut vibes = Vibes;
    let mut watch = Watch::new(
        DialWatchface::new(),
        Rectangle::new(Point::zero(), LCD_SIZE),
    );
    watch.start(&mut services);
    watch.show(&mut services, Instant::now());
    backlight.on();

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(bluetooth::softdevice_task(sd)));
    unwrap!(spawner.spawn(bluetooth::bluetooth(sd, server)));
    unwrap!(spawner.spawn(update_battery_status(battery, server)));
    unwrap!(spawner.spawn(update_time(boot_clock())));
    unwrap!(spawner.spawn(poll_button(button, backlight)));
    unwrap!(spawner.spawn(notify(vibration)));

    loop {
        // Wake up for the next frame while the entrance animation runs
        let event = if watch.is_animating() {
            with_timeout(FRAME_INTERVAL, EVENTS.receive()).await.ok()
        } else {
            Some(EVENTS.receive().await)
        };

        let now = Instant::now();
        if let Some(event) = event {
            watch.handle(event, now, &mut services, &mut vibes);
        }
        watch.animate(now);

        if watch.take_redraw() {
            if let Err(e) = watch.render(&mut display, &services) {
                defmt::warn!("Rendering failed: {:?}", defmt::Debug2Format(&e));
            }
        }
    }
}
