//! Analog dial watchface for the PineTime
//!
//! Hardware independent part of the firmware: time and device status state,
//! the entrance animation, the dial renderer and the bindings that turn
//! platform events into state changes. The firmware binary (`pinetime`
//! feature) feeds nRF peripherals into [`watch::Watch`].

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod system;
pub mod ui;
pub mod watch;

pub use watch::Watch;
