//! Glue between the firmware tasks and the watchface.
//!
//! Tasks publish [`Event`]s; only those the watchface subscribed to reach
//! its queue.

use core::cell::Cell;

use chrono::NaiveDateTime;
use embassy_sync::{
    blocking_mutex::{raw::ThreadModeRawMutex, Mutex},
    channel::Channel,
    signal::Signal,
};

use pinetime_dial::system::{
    events::{Event, EventServices, Haptics, Service, Subscriptions},
    status::BatteryInfo,
    time::{TimeManager, WallClock},
};

/// Events waiting for the watchface
pub static EVENTS: Channel<ThreadModeRawMutex, Event, 8> = Channel::new();
/// Number of vibration pulses requested
pub static NOTIFY: Signal<ThreadModeRawMutex, u8> = Signal::new();

static SUBSCRIPTIONS: Mutex<ThreadModeRawMutex, Cell<Subscriptions>> =
    Mutex::new(Cell::new(Subscriptions::empty()));
static BATTERY: Mutex<ThreadModeRawMutex, Cell<Option<BatteryInfo>>> =
    Mutex::new(Cell::new(None));
static CONNECTED: Mutex<ThreadModeRawMutex, Cell<bool>> = Mutex::new(Cell::new(false));

/// Record the latest state carried by `event` and queue it for the
/// watchface if it listens for it.
pub fn publish(event: Event) {
    match event {
        Event::Battery(info) => BATTERY.lock(|b| b.set(Some(info))),
        Event::Connection(connected) => CONNECTED.lock(|c| c.set(connected)),
        _ => {}
    }

    if !SUBSCRIPTIONS.lock(|s| s.get()).accepts(&event) {
        return;
    }
    if EVENTS.try_send(event).is_err() {
        defmt::warn!("Event queue full, dropping {:?}", defmt::Debug2Format(&event));
    }
}

/// Services offered to the watchface
pub struct Services {
    clock: TimeManager,
}

impl Services {
    pub fn new(clock: TimeManager) -> Self {
        Self { clock }
    }
}

impl WallClock for Services {
    fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }
}

impl EventServices for Services {
    fn subscribe(&mut self, service: Service) {
        SUBSCRIPTIONS.lock(|s| {
            let mut subs = s.get();
            subs.insert(service);
            s.set(subs);
        });
    }

    fn unsubscribe(&mut self, service: Service) {
        SUBSCRIPTIONS.lock(|s| {
            let mut subs = s.get();
            subs.remove(service);
            s.set(subs);
        });
    }

    fn peek_battery(&self) -> BatteryInfo {
        BATTERY.lock(|b| b.get()).unwrap_or_default()
    }

    fn peek_connection(&self) -> bool {
        CONNECTED.lock(|c| c.get())
    }
}

/// Vibration requests, served by the notify task
pub struct Vibes;

impl Haptics for Vibes {
    fn double_pulse(&mut self) {
        NOTIFY.signal(2);
    }
}
