//! Watchface application
//!
//! Owns the time and status state, the entrance animation and the layout,
//! and binds platform events to them. The platform calls [`Watch::handle`]
//! for every event, [`Watch::animate`] once per frame while
//! [`Watch::is_animating`], and [`Watch::render`] whenever
//! [`Watch::take_redraw`] asks for it.

use chrono::{Datelike, NaiveDateTime};
use embassy_time::Instant;
use embedded_graphics::{draw_target::DrawTarget, primitives::Rectangle};

use crate::system::{
    events::{Event, EventServices, Haptics, Service},
    state::WatchState,
    status::{BatteryInfo, DeviceStatus},
    time::{ClockTime, WallClock},
};
use crate::ui::{
    animation::EntranceAnimation,
    layout::{Layout, RadiusSet},
    ColorMode, DialWatchface, Error, Hands, WatchFace, WatchFaceState,
};

pub struct Watch<F = DialWatchface> {
    face: F,
    state: WatchState,
    animation: EntranceAnimation,
    layout: Layout,
    /// Radii the entrance animation grows toward
    full_radii: RadiusSet,
    /// Visible area announced by the last will-change notification
    pending_area: Option<Rectangle>,
    visible: bool,
}

impl<F: WatchFace> Watch<F> {
    /// Create watchface for a display of the given size
    pub fn new(face: F, bounds: Rectangle) -> Self {
        Self {
            face,
            state: WatchState::new(),
            animation: EntranceAnimation::new(),
            layout: Layout::new(bounds),
            full_radii: RadiusSet::default(),
            pending_area: None,
            visible: false,
        }
    }

    /// Seed time and status and subscribe to the status services.
    ///
    /// Seeding does not trigger any alerts.
    pub fn start<S: EventServices>(&mut self, services: &mut S) {
        self.state.set_datetime(&services.now());

        services.subscribe(Service::Battery);
        let battery = services.peek_battery();
        self.state.set_battery(battery.percent, battery.charging);

        services.subscribe(Service::Connection);
        self.state.set_bluetooth(services.peek_connection());

        info!(
            "Watchface started, battery {}%, connected: {}",
            battery.percent,
            self.state.status().bluetooth_connected
        );
    }

    /// Unsubscribe from every service
    pub fn stop<S: EventServices>(&mut self, services: &mut S) {
        for service in Service::ALL {
            services.unsubscribe(service);
        }
        info!("Watchface stopped");
    }

    /// Lay the dial out for the visible area and play the entrance animation
    pub fn show<S: EventServices>(&mut self, services: &mut S, now: Instant) {
        self.full_radii = self.layout.full_radii();
        self.visible = true;
        if self.animation.reset() {
            self.animation.start(now);
        }

        services.subscribe(Service::Tick);
        services.subscribe(Service::UnobstructedArea);
        self.state.mark_dirty();
        debug!("Watchface shown, dial radius {}", self.full_radii.dial);
    }

    /// Stop drawing until shown again
    pub fn hide(&mut self) {
        self.visible = false;
        debug!("Watchface hidden");
    }

    pub fn on_tick(&mut self, time: &NaiveDateTime) {
        self.state.set_datetime(time);
    }

    /// Store the new battery state, alerting once when it drops to 10%
    pub fn on_battery<H: Haptics>(&mut self, battery: BatteryInfo, haptics: &mut H) {
        let was_low = self.state.status().battery.is_low_alert();
        self.state.set_battery(battery.percent, battery.charging);

        if !was_low && self.state.status().battery.is_low_alert() {
            info!("Battery low: {}%", battery.percent);
            haptics.double_pulse();
        }
    }

    /// Store the new connection state, alerting on every change
    pub fn on_bluetooth<H: Haptics>(&mut self, connected: bool, haptics: &mut H) {
        let changed = self.state.status().bluetooth_connected != connected;
        self.state.set_bluetooth(connected);

        if changed {
            info!("Bluetooth connected: {}", connected);
            haptics.double_pulse();
        }
    }

    /// Collapse the dial ahead of a visible area change
    pub fn on_unobstructed_will_change(&mut self, area: Rectangle) {
        self.pending_area = Some(area);
        if self.animation.reset() {
            trace!("Dial reset for visible area change");
        }
    }

    /// Move the dial into the new visible area and replay the entrance animation
    pub fn on_unobstructed_did_change(&mut self, now: Instant) {
        if let Some(area) = self.pending_area.take() {
            self.layout.unobstructed = area;
        }
        self.animation.start(now);
        self.state.mark_dirty();
    }

    /// Dispatch a platform event
    pub fn handle<S, H>(&mut self, event: Event, now: Instant, services: &mut S, haptics: &mut H)
    where
        S: EventServices,
        H: Haptics,
    {
        match event {
            Event::Tick(time) => self.on_tick(&time),
            Event::Battery(battery) => self.on_battery(battery, haptics),
            Event::Connection(connected) => self.on_bluetooth(connected, haptics),
            Event::UnobstructedWillChange(area) => self.on_unobstructed_will_change(area),
            Event::UnobstructedDidChange => self.on_unobstructed_did_change(now),
            Event::Show => self.show(services, now),
            Event::Hide => self.hide(),
        }
    }

    /// Advance the entrance animation to `now`
    pub fn animate(&mut self, now: Instant) {
        if self.animation.update(now, &self.full_radii, self.state.time()) {
            self.state.mark_dirty();
        }
    }

    /// Whether frames have to be delivered to [`Watch::animate`]
    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn time(&self) -> ClockTime {
        self.state.time()
    }

    pub fn status(&self) -> DeviceStatus {
        self.state.status()
    }

    pub fn radii(&self) -> RadiusSet {
        self.animation.radii()
    }

    /// Return and clear the pending redraw request.
    ///
    /// Never asks for a redraw while hidden.
    pub fn take_redraw(&mut self) -> bool {
        self.state.take_redraw() && self.visible
    }

    /// What the watchface would draw right now
    pub fn face_state<C: WallClock>(&self, clock: &C) -> WatchFaceState {
        let hands = if self.animation.is_running() {
            Hands::Sweeping(self.animation.time())
        } else {
            Hands::Live(self.state.time())
        };
        WatchFaceState {
            bounds: self.layout.bounds,
            center: self.layout.center(),
            radii: self.animation.radii(),
            hands,
            status: self.state.status(),
            day: clock.now().day(),
        }
    }

    /// Draw the watchface onto `target`. Does nothing while hidden.
    pub fn render<D, C>(&mut self, target: &mut D, clock: &C) -> Result<(), Error<D::Error>>
    where
        D: DrawTarget<Color = ColorMode>,
        C: WallClock,
    {
        if !self.visible {
            return Ok(());
        }
        let state = self.face_state(clock);
        self.face.draw(&state, target)
    }
}
