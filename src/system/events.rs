//! Platform events consumed by the watchface
//!
//! The platform delivers everything as [`Event`]s on one queue. Which of them
//! it forwards is decided by the [`Subscriptions`] the watchface holds through
//! [`EventServices`].

use chrono::NaiveDateTime;
use embedded_graphics::primitives::Rectangle;

use super::status::BatteryInfo;
use super::time::WallClock;

/// Notification from the platform
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Minute tick with the current local time
    Tick(NaiveDateTime),
    /// Battery charge or charging state changed
    Battery(BatteryInfo),
    /// Phone connection changed
    Connection(bool),
    /// The visible area is about to change to the given rectangle
    UnobstructedWillChange(Rectangle),
    /// The visible area finished changing
    UnobstructedDidChange,
    /// The watchface became visible
    Show,
    /// The watchface is no longer visible
    Hide,
}

impl Event {
    /// Service that has to be subscribed for this event to be delivered.
    ///
    /// Lifecycle events are always delivered.
    pub fn service(&self) -> Option<Service> {
        match self {
            Event::Tick(_) => Some(Service::Tick),
            Event::Battery(_) => Some(Service::Battery),
            Event::Connection(_) => Some(Service::Connection),
            Event::UnobstructedWillChange(_) | Event::UnobstructedDidChange => {
                Some(Service::UnobstructedArea)
            }
            Event::Show | Event::Hide => None,
        }
    }
}

/// Event producing platform service
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Service {
    Tick = 0b0001,
    Battery = 0b0010,
    Connection = 0b0100,
    UnobstructedArea = 0b1000,
}

impl Service {
    pub const ALL: [Service; 4] = [
        Service::Tick,
        Service::Battery,
        Service::Connection,
        Service::UnobstructedArea,
    ];
}

/// Set of subscribed services
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Subscriptions(u8);

impl Subscriptions {
    pub const fn empty() -> Self {
        Self(0)
    }
    pub fn insert(&mut self, service: Service) {
        self.0 |= service as u8;
    }
    pub fn remove(&mut self, service: Service) {
        self.0 &= !(service as u8);
    }
    pub fn contains(&self, service: Service) -> bool {
        self.0 & service as u8 != 0
    }
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
    /// Whether `event` should be delivered
    pub fn accepts(&self, event: &Event) -> bool {
        event.service().map_or(true, |service| self.contains(service))
    }
}

/// Platform services the watchface subscribes to
pub trait EventServices: WallClock {
    /// Start delivering events of `service`
    fn subscribe(&mut self, service: Service);
    /// Stop delivering events of `service`
    fn unsubscribe(&mut self, service: Service);
    /// Current battery state
    fn peek_battery(&self) -> BatteryInfo;
    /// Current phone connection state
    fn peek_connection(&self) -> bool;
}

/// Vibration feedback
pub trait Haptics {
    /// Two short pulses
    fn double_pulse(&mut self);
}
