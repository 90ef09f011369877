//! Renders the dial into an in-memory framebuffer and probes pixels.

use chrono::{NaiveDate, NaiveDateTime};
use embassy_time::Instant;
use embedded_graphics::{
    pixelcolor::{Rgb565, RgbColor},
    prelude::*,
    primitives::Rectangle,
    Pixel,
};

use pinetime_dial::{
    system::{
        events::{EventServices, Haptics, Service, Subscriptions},
        status::BatteryInfo,
        time::{ClockTime, WallClock},
    },
    ui::{
        dial_watchface::{battery_dot_angle, bluetooth_dot_angle, dial_dot_radius},
        geometry::Angle,
        DialWatchface, Hands,
    },
    Watch,
};

const W: usize = 240;
const H: usize = 240;
const CENTER: Point = Point::new(120, 120);
const DIAL_GRAY: Rgb565 = Rgb565::new(10, 21, 10);
const DARK_GREEN: Rgb565 = Rgb565::new(0, 21, 0);

struct Framebuffer {
    pixels: Vec<Rgb565>,
}

impl Framebuffer {
    fn new() -> Self {
        Self {
            pixels: vec![Rgb565::MAGENTA; W * H],
        }
    }

    fn pixel(&self, point: Point) -> Rgb565 {
        self.pixels[point.y as usize * W + point.x as usize]
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(W as u32, H as u32)
    }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(pos, color) in pixels {
            if pos.x < 0 || pos.x >= W as i32 || pos.y < 0 || pos.y >= H as i32 {
                continue;
            }
            self.pixels[pos.y as usize * W + pos.x as usize] = color;
        }
        Ok(())
    }
}

struct Platform {
    subscriptions: Subscriptions,
    battery: BatteryInfo,
    connected: bool,
    now: NaiveDateTime,
}

impl WallClock for Platform {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}

impl EventServices for Platform {
    fn subscribe(&mut self, service: Service) {
        self.subscriptions.insert(service);
    }
    fn unsubscribe(&mut self, service: Service) {
        self.subscriptions.remove(service);
    }
    fn peek_battery(&self) -> BatteryInfo {
        self.battery
    }
    fn peek_connection(&self) -> bool {
        self.connected
    }
}

struct NoHaptics;

impl Haptics for NoHaptics {
    fn double_pulse(&mut self) {}
}

fn platform(battery: BatteryInfo, connected: bool) -> Platform {
    Platform {
        subscriptions: Subscriptions::empty(),
        battery,
        connected,
        now: NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap(),
    }
}

fn shown_watch(platform: &mut Platform) -> Watch {
    let mut watch = Watch::new(
        DialWatchface::new(),
        Rectangle::new(Point::zero(), Size::new(W as u32, H as u32)),
    );
    watch.start(platform);
    watch.show(platform, Instant::from_millis(0));
    watch
}

/// Point `along / length` of the way from the center to the hand tip
fn on_hand(angle: Angle, along: i32) -> Point {
    let tip = angle.point_at(CENTER, 112);
    CENTER + (tip - CENTER) * along / 112
}

#[test]
fn half_past_nine_discharging_and_disconnected() {
    let mut platform = platform(BatteryInfo::new(45, false), false);
    let mut watch = shown_watch(&mut platform);
    watch.animate(Instant::from_millis(2_000));
    assert!(!watch.is_animating());

    let state = watch.face_state(&platform);
    assert_eq!(state.hands, Hands::Live(ClockTime::new(9, 30)));
    assert_eq!(state.day, 9);

    let mut fb = Framebuffer::new();
    assert!(watch.take_redraw());
    watch.render(&mut fb, &platform).unwrap();

    // Background and dial
    assert_eq!(fb.pixel(Point::new(0, 0)), Rgb565::BLACK);
    assert_eq!(fb.pixel(Point::new(120, 10)), DIAL_GRAY);

    // Minute hand straight down, hour hand halfway between 9 and 10
    assert_eq!(fb.pixel(on_hand(state.hands.minute_angle(), 98)), Rgb565::WHITE);
    assert_eq!(
        state.hands.hour_angle(),
        Angle::from_turns(9, 12) + Angle(Angle::from_turns(30, 60).0 / 12)
    );
    assert_eq!(fb.pixel(on_hand(state.hands.hour_angle(), 100)), Rgb565::RED);

    // Hand bases are covered by the black dial
    assert_eq!(fb.pixel(on_hand(state.hands.minute_angle(), 60)), Rgb565::BLACK);

    // Two green battery dots, three dim ones
    for k in 0..5 {
        let dot = battery_dot_angle(k).point_at(CENTER, 87);
        let expected = if k < 2 { Rgb565::GREEN } else { DARK_GREEN };
        assert_eq!(fb.pixel(dot), expected, "battery dot {}", k);
    }

    // Disconnected
    let bt = bluetooth_dot_angle().point_at(CENTER, 87);
    assert_eq!(fb.pixel(bt), Rgb565::RED);

    // Date label has some white pixels
    let label = Rectangle::new(Point::new(162, 112), Size::new(24, 20));
    assert!(label.points().any(|p| fb.pixel(p) == Rgb565::WHITE));

    // Nothing left undrawn
    assert!(fb.pixels.iter().all(|&c| c != Rgb565::MAGENTA));
}

#[test]
fn charging_and_connected_colors() {
    let mut platform = platform(BatteryInfo::new(100, true), true);
    let mut watch = shown_watch(&mut platform);
    watch.animate(Instant::from_millis(2_000));

    let mut fb = Framebuffer::new();
    watch.render(&mut fb, &platform).unwrap();

    for k in 0..5 {
        let dot = battery_dot_angle(k).point_at(CENTER, 87);
        assert_eq!(fb.pixel(dot), Rgb565::YELLOW, "battery dot {}", k);
    }
    let bt = bluetooth_dot_angle().point_at(CENTER, 87);
    assert_eq!(fb.pixel(bt), Rgb565::BLUE);
}

#[test]
fn dial_dot_sizes_on_screen() {
    let mut platform = platform(BatteryInfo::new(45, false), false);
    let mut watch = shown_watch(&mut platform);
    watch.animate(Instant::from_millis(2_000));

    let mut fb = Framebuffer::new();
    watch.render(&mut fb, &platform).unwrap();

    // Dots between 0 and 15 minutes, away from both hands
    for i in 1..15 {
        let dot = Angle::from_sixtieths(i).point_at(CENTER, 103);
        let radius = dial_dot_radius(i as u32) as i32;
        assert_eq!(fb.pixel(dot), Rgb565::WHITE, "dot {}", i);
        assert_eq!(fb.pixel(dot + Point::new(0, radius + 1)), DIAL_GRAY, "dot {}", i);
    }
}

#[test]
fn dial_is_hidden_before_the_animation_starts() {
    let mut platform = platform(BatteryInfo::new(45, false), false);
    let mut watch = shown_watch(&mut platform);
    watch.animate(Instant::from_millis(300));
    assert!(watch.is_animating());

    let mut fb = Framebuffer::new();
    watch.render(&mut fb, &platform).unwrap();
    assert_eq!(fb.pixel(Point::new(120, 10)), Rgb565::BLACK);
    assert_eq!(fb.pixel(on_hand(Angle::from_sixtieths(30), 98)), Rgb565::BLACK);
}

#[test]
fn hidden_watch_leaves_target_untouched() {
    let mut platform = platform(BatteryInfo::new(45, false), false);
    let mut watch = shown_watch(&mut platform);
    watch.hide();

    let mut fb = Framebuffer::new();
    watch.render(&mut fb, &platform).unwrap();
    assert!(fb.pixels.iter().all(|&c| c == Rgb565::MAGENTA));
}
