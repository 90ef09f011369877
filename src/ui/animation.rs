//! Entrance animation
//!
//! Two runs start together once the watchface becomes visible: the radius
//! run grows every dial layer from zero to its full size, the hand run
//! sweeps both hands from 12 o'clock to the current time. The hand run takes
//! twice as long, so the dial settles before the hands arrive.
//!
//! Runs are advanced by the platform calling [`EntranceAnimation::update`]
//! once per frame with the current time.

use embassy_time::{Duration, Instant};

use super::layout::RadiusSet;
use crate::system::{
    config::{ANIMATION_DELAY, ANIMATION_DURATION},
    time::ClockTime,
};

/// Progress value at the end of a run
pub const ANIMATION_NORMALIZED_MAX: u32 = 65535;

/// `progress` of `max`, rounded down
pub fn anim_percentage(progress: u32, max: u32) -> u32 {
    (progress as u64 * max as u64 / ANIMATION_NORMALIZED_MAX as u64) as u32
}

/// Timing curve of a run
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Curve {
    Linear,
    EaseInOut,
}

impl Curve {
    /// Map linear progress onto the curve
    pub fn apply(self, progress: u32) -> u32 {
        let progress = progress.min(ANIMATION_NORMALIZED_MAX);
        match self {
            Curve::Linear => progress,
            Curve::EaseInOut => {
                let t = progress as f32 / ANIMATION_NORMALIZED_MAX as f32;
                let eased = if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 - 2.0 * t;
                    1.0 - u * u * u / 2.0
                };
                ((eased * ANIMATION_NORMALIZED_MAX as f32) as u32).min(ANIMATION_NORMALIZED_MAX)
            }
        }
    }
}

/// Where a run is at a given time
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Start delay has not passed yet
    Pending,
    /// Eased progress, `0..=ANIMATION_NORMALIZED_MAX`
    Running(u32),
    /// End time has passed
    Finished,
}

/// One timed interpolation
#[derive(Clone, Copy, Debug)]
pub struct Run {
    start: Instant,
    duration: Duration,
    curve: Curve,
}

impl Run {
    /// Run scheduled at `now`, starting after `delay`
    pub fn new(now: Instant, delay: Duration, duration: Duration, curve: Curve) -> Self {
        Self {
            start: now + delay,
            duration,
            curve,
        }
    }

    pub fn phase(&self, now: Instant) -> Phase {
        if now < self.start {
            return Phase::Pending;
        }
        let elapsed = (now - self.start).as_ticks();
        let duration = self.duration.as_ticks();
        if elapsed >= duration {
            return Phase::Finished;
        }
        let linear = (elapsed * ANIMATION_NORMALIZED_MAX as u64 / duration) as u32;
        Phase::Running(self.curve.apply(linear))
    }
}

/// Hand positions during the sweep
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimatedTime {
    /// Hour hand position in sixtieths of a turn
    pub hours_in_sixtieths: u8,
    pub minutes: u8,
}

impl AnimatedTime {
    /// Interpolate from zero toward `target`
    pub fn at(progress: u32, target: ClockTime) -> Self {
        Self {
            hours_in_sixtieths: anim_percentage(progress, target.hours_in_sixtieths() as u32) as u8,
            minutes: anim_percentage(progress, target.minutes as u32) as u8,
        }
    }
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnimationState {
    #[default]
    Inactive,
    Running,
}

/// Radius growth and hand sweep played when the watchface becomes visible
#[derive(Debug, Default)]
pub struct EntranceAnimation {
    radius_run: Option<Run>,
    hand_run: Option<Run>,
    radii: RadiusSet,
    time: AnimatedTime,
    state: AnimationState,
}

impl EntranceAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimationState::Running
    }

    /// Current radii of the dial layers
    pub fn radii(&self) -> RadiusSet {
        self.radii
    }

    /// Current hand positions of the sweep
    pub fn time(&self) -> AnimatedTime {
        self.time
    }

    /// Collapse the dial and hands to zero.
    ///
    /// Does nothing while running. Returns whether anything was reset.
    pub fn reset(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.radii = RadiusSet::default();
        self.time = AnimatedTime::default();
        true
    }

    /// Schedule both runs at `now`.
    ///
    /// Does nothing while running. Returns whether the animation was started.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.is_running() {
            debug!("Entrance animation already running");
            return false;
        }
        self.radius_run = Some(Run::new(
            now,
            ANIMATION_DELAY,
            ANIMATION_DURATION,
            Curve::EaseInOut,
        ));
        self.hand_run = Some(Run::new(
            now,
            ANIMATION_DELAY,
            ANIMATION_DURATION * 2,
            Curve::EaseInOut,
        ));
        self.state = AnimationState::Running;
        debug!("Entrance animation started");
        true
    }

    /// Advance both runs to `now`. Returns whether the dial changed.
    pub fn update(&mut self, now: Instant, full: &RadiusSet, target: ClockTime) -> bool {
        let mut changed = false;

        if let Some(run) = self.radius_run {
            let progress = match run.phase(now) {
                Phase::Pending => None,
                Phase::Running(p) => Some(p),
                Phase::Finished => {
                    self.radius_run = None;
                    Some(ANIMATION_NORMALIZED_MAX)
                }
            };
            if let Some(p) = progress {
                self.radii = full.map(|radius| anim_percentage(p, radius));
                changed = true;
            }
        }

        if let Some(run) = self.hand_run {
            let progress = match run.phase(now) {
                Phase::Pending => None,
                Phase::Running(p) => Some(p),
                Phase::Finished => {
                    self.hand_run = None;
                    Some(ANIMATION_NORMALIZED_MAX)
                }
            };
            if let Some(p) = progress {
                self.time = AnimatedTime::at(p, target);
                changed = true;
            }
        }

        if self.is_running() && self.radius_run.is_none() && self.hand_run.is_none() {
            self.state = AnimationState::Inactive;
            debug!("Entrance animation finished");
            changed = true;
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FULL: RadiusSet = RadiusSet {
        dial: 112,
        dots: 103,
        black_dial: 94,
        batt_dots: 87,
        hand_length: 112,
    };

    fn ms(millis: u64) -> Instant {
        Instant::from_millis(millis)
    }

    #[test]
    fn curve_endpoints() {
        for curve in [Curve::Linear, Curve::EaseInOut] {
            assert_eq!(curve.apply(0), 0);
            assert_eq!(curve.apply(ANIMATION_NORMALIZED_MAX), ANIMATION_NORMALIZED_MAX);
        }
        let half = ANIMATION_NORMALIZED_MAX / 2;
        let eased = Curve::EaseInOut.apply(half);
        assert!(eased.abs_diff(half) <= 4);
    }

    #[test]
    fn run_phases() {
        let run = Run::new(ms(1_000), Duration::from_millis(600), Duration::from_millis(500), Curve::Linear);
        assert_eq!(run.phase(ms(1_000)), Phase::Pending);
        assert_eq!(run.phase(ms(1_599)), Phase::Pending);
        assert_eq!(run.phase(ms(1_600)), Phase::Running(0));
        assert_eq!(run.phase(ms(1_850)), Phase::Running(ANIMATION_NORMALIZED_MAX / 2));
        assert_eq!(run.phase(ms(2_100)), Phase::Finished);
    }

    #[test]
    fn anim_percentage_rounds_down() {
        assert_eq!(anim_percentage(0, 112), 0);
        assert_eq!(anim_percentage(ANIMATION_NORMALIZED_MAX, 112), 112);
        assert_eq!(anim_percentage(ANIMATION_NORMALIZED_MAX - 1, 112), 111);
    }

    #[test]
    fn radii_grow_before_hands_finish() {
        let target = ClockTime::new(9, 30);
        let mut anim = EntranceAnimation::new();
        assert!(anim.start(ms(0)));
        assert!(anim.is_running());

        // Still waiting for the start delay
        assert!(!anim.update(ms(300), &FULL, target));
        assert_eq!(anim.radii(), RadiusSet::default());

        // Radius run done, hand run halfway
        assert!(anim.update(ms(1_100), &FULL, target));
        assert_eq!(anim.radii(), FULL);
        assert!(anim.time().minutes < 30);
        assert!(anim.is_running());

        // Both done
        assert!(anim.update(ms(1_600), &FULL, target));
        assert_eq!(
            anim.time(),
            AnimatedTime {
                hours_in_sixtieths: 45,
                minutes: 30
            }
        );
        assert_eq!(anim.state(), AnimationState::Inactive);
        assert!(!anim.update(ms(1_700), &FULL, target));
    }

    #[test]
    fn second_start_is_a_no_op() {
        let target = ClockTime::new(3, 15);
        let mut anim = EntranceAnimation::new();
        assert!(anim.start(ms(0)));
        anim.update(ms(800), &FULL, target);
        let radii = anim.radii();
        let time = anim.time();

        assert!(!anim.start(ms(800)));
        assert!(!anim.reset());
        assert_eq!(anim.radii(), radii);
        assert_eq!(anim.time(), time);

        // The first run still completes on its original schedule
        anim.update(ms(1_600), &FULL, target);
        assert!(!anim.is_running());
        assert!(anim.start(ms(2_000)));
    }

    #[test]
    fn reset_collapses_when_idle() {
        let target = ClockTime::new(6, 45);
        let mut anim = EntranceAnimation::new();
        anim.start(ms(0));
        anim.update(ms(2_000), &FULL, target);
        assert_eq!(anim.radii(), FULL);

        assert!(anim.reset());
        assert_eq!(anim.radii(), RadiusSet::default());
        assert_eq!(anim.time(), AnimatedTime::default());
    }

    proptest! {
        #[test]
        fn radii_never_shrink_or_overshoot(mut frames in proptest::collection::vec(0u64..2_000, 1..60)) {
            frames.sort_unstable();
            let target = ClockTime::new(11, 59);
            let mut anim = EntranceAnimation::new();
            anim.start(ms(0));

            let mut previous = RadiusSet::default();
            for frame in frames {
                anim.update(ms(frame), &FULL, target);
                let radii = anim.radii();
                prop_assert!(previous.fits_within(&radii));
                prop_assert!(radii.fits_within(&FULL));
                prop_assert!(anim.time().minutes <= target.minutes);
                prop_assert!(anim.time().hours_in_sixtieths <= target.hours_in_sixtieths());
                previous = radii;
            }

            anim.update(ms(1_600), &FULL, target);
            prop_assert_eq!(anim.radii(), FULL);
        }

        #[test]
        fn eased_progress_is_monotonic(a in 0u32..=ANIMATION_NORMALIZED_MAX, b in 0u32..=ANIMATION_NORMALIZED_MAX) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(Curve::EaseInOut.apply(lo) <= Curve::EaseInOut.apply(hi));
        }
    }
}
