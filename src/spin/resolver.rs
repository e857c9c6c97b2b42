use super::{FLING_DIVISOR, FULL_TURN, HALF_TURN, MIN_SPIN_SECONDS, SectorLayout, WheelError};
use derive_more::{Display, From};
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};

/// Animation curve applied between a spin's start and its snapped stop.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Fast start, smooth stop. The feel of a wheel losing momentum.
    #[default]
    #[strum(to_string = "ease-out", serialize = "easeout")]
    EaseOut,
    #[strum(to_string = "ease-in-out", serialize = "easeinout")]
    EaseInOut,
    #[strum(to_string = "linear")]
    Linear,
}

impl Easing {
    /// Maps linear progress in [0, 1] to eased progress in [0, 1].
    pub fn apply(self, progress: f64) -> f64 {
        let t = progress.clamp(0.0, 1.0);
        match self {
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::Linear => t,
        }
    }
}

/// A drag gesture at the moment of release: the final translation and the
/// end translation the host projects from the fling velocity. Both are
/// vertical pixel distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSample {
    pub translation: f64,
    pub predicted_end: f64,
}

/// Handle identifying one scheduled spin completion. Stale tokens (from a
/// cancelled or superseded spin) are rejected by [`SpinResolver::complete`],
/// so an already-scheduled timer callback cannot touch newer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, From)]
pub struct SpinToken(u64);

impl SpinToken {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Dragging,
    Animating,
}

/// Everything the rendering shell needs to realize one spin: the rotation
/// endpoints, how long to take, which curve to follow, and where the wheel
/// will have landed once the motion ends.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinPlan {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
    pub easing: Easing,
    pub landed_index: usize,
    pub token: SpinToken,
}

/// The spin state machine: `Idle -> Dragging -> Animating -> Idle`.
///
/// Pure with respect to rendering and time; the shell feeds it gesture
/// samples and schedules the completion it prescribes.
#[derive(Debug)]
pub struct SpinResolver {
    layout: SectorLayout,
    easing: Easing,
    base_rotation: f64,
    drag_offset: f64,
    phase: Phase,
    pending: Option<(SpinToken, usize)>,
}

impl SpinResolver {
    pub fn new(layout: SectorLayout, easing: Easing) -> Self {
        Self {
            layout,
            easing,
            base_rotation: 0.0,
            drag_offset: 0.0,
            phase: Phase::Idle,
            pending: None,
        }
    }

    pub fn layout(&self) -> SectorLayout {
        self.layout
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_spinning(&self) -> bool {
        self.phase == Phase::Animating
    }

    /// Rotation to render outside of an animation: the persisted base plus
    /// 1:1 feedback for the live drag, proportional to surface height.
    pub fn display_rotation(&self, surface_height: f64) -> f64 {
        self.base_rotation + self.drag_offset / surface_height * HALF_TURN
    }

    /// Tracks an in-progress drag. Rejected while a spin animates; nothing
    /// is queued.
    pub fn drag_update(&mut self, translation: f64) -> Result<(), WheelError> {
        if self.phase == Phase::Animating {
            return Err(WheelError::Busy);
        }
        self.base_rotation %= FULL_TURN;
        self.drag_offset = translation;
        self.phase = Phase::Dragging;
        Ok(())
    }

    /// Resolves a released drag into a spin. `forced` pins the outcome to a
    /// specific sector while keeping the gesture's visual motion.
    pub fn release(
        &mut self,
        sample: DragSample,
        surface_height: f64,
        forced: Option<usize>,
    ) -> Result<SpinPlan, WheelError> {
        self.resolve(sample, surface_height, forced)
    }

    /// Command-driven spin: no live translation, caller supplies the fling
    /// magnitude and the sector to land on.
    pub fn spin_to(
        &mut self,
        index: usize,
        surface_height: f64,
        fling: f64,
    ) -> Result<SpinPlan, WheelError> {
        self.resolve(
            DragSample {
                translation: 0.0,
                predicted_end: fling,
            },
            surface_height,
            Some(index),
        )
    }

    fn resolve(
        &mut self,
        sample: DragSample,
        surface_height: f64,
        forced: Option<usize>,
    ) -> Result<SpinPlan, WheelError> {
        if self.phase == Phase::Animating {
            return Err(WheelError::Busy);
        }
        let count = self.layout.count();
        if let Some(index) = forced
            && index >= count
        {
            return Err(WheelError::OutOfRange { index, count });
        }
        debug_assert!(surface_height > 0.0);

        // Fling magnitude amplifies the raw angular delta and stretches
        // the animation.
        let velocity = (sample.predicted_end - sample.translation).abs() / FLING_DIVISOR;
        let angular = sample.predicted_end / surface_height * HALF_TURN;
        let desired = self.base_rotation + angular * (1.0 + velocity);

        let width = self.layout.sector_width();
        let mut stop = self.layout.nearest_stop(desired);
        let mut landed = self.layout.landed_index(desired);

        if let Some(target) = forced {
            // Shift the stop so the same motion terminates on the target.
            let shift = target as i64 - landed as i64;
            stop -= width * shift as f64;
            landed = target;
        }

        let token = SpinToken::next();
        let plan = SpinPlan {
            from: self.display_rotation(surface_height),
            to: stop,
            duration: Duration::from_secs_f64(velocity.max(MIN_SPIN_SECONDS)),
            easing: self.easing,
            landed_index: landed,
            token,
        };

        // The base jumps to the stop immediately; the animation only
        // interpolates what is rendered. The drag offset must not
        // double-count on top of it.
        self.base_rotation = stop;
        self.drag_offset = 0.0;
        self.phase = Phase::Animating;
        self.pending = Some((token, landed));

        Ok(plan)
    }

    /// Finishes the spin identified by `token`, returning the landed index.
    /// Stale or duplicate tokens return `None` and change nothing.
    pub fn complete(&mut self, token: SpinToken) -> Option<usize> {
        match self.pending {
            Some((pending, landed)) if pending == token => {
                self.pending = None;
                self.phase = Phase::Idle;
                Some(landed)
            }
            _ => None,
        }
    }

    /// Abandons a pending spin. Its completion token becomes stale, so a
    /// timer that already fired against it is a no-op.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            self.phase = Phase::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const HEIGHT: f64 = 400.0;

    fn resolver(count: usize) -> SpinResolver {
        SpinResolver::new(SectorLayout::new(count).unwrap(), Easing::default())
    }

    fn strong_drag() -> DragSample {
        DragSample {
            translation: 500.0,
            predicted_end: 2000.0,
        }
    }

    #[test]
    fn reference_scenario_resolves_exactly() {
        // velocity = |2000 - 500| / 400 = 3.75
        // angular = 2000 / 400 * 180 = 900
        // desired = 0 + 900 * 4.75 = 4275, snapped to 4260
        let mut r = resolver(6);
        let plan = r.release(strong_drag(), HEIGHT, None).unwrap();
        assert_abs_diff_eq!(plan.to, 4260.0, epsilon = 1e-9);
        assert_eq!(plan.landed_index, 1);
        assert_abs_diff_eq!(plan.duration.as_secs_f64(), 3.75, epsilon = 1e-9);
    }

    #[test]
    fn duration_never_drops_below_the_floor() {
        let mut r = resolver(6);
        let plan = r
            .release(
                DragSample {
                    translation: 10.0,
                    predicted_end: 12.0,
                },
                HEIGHT,
                None,
            )
            .unwrap();
        assert_abs_diff_eq!(plan.duration.as_secs_f64(), 0.2, epsilon = 1e-9);
    }

    #[test]
    fn stop_is_always_on_a_sector_boundary() {
        for predicted in [-2400.0, -333.3, 0.0, 123.4, 1999.9, 2500.0] {
            let mut r = resolver(6);
            let plan = r
                .release(
                    DragSample {
                        translation: 0.0,
                        predicted_end: predicted,
                    },
                    HEIGHT,
                    None,
                )
                .unwrap();
            let steps = plan.to / 60.0;
            assert_abs_diff_eq!(steps, steps.round(), epsilon = 1e-9);
            assert!(plan.landed_index < 6);
        }
    }

    #[test]
    fn forced_index_wins_for_every_target() {
        for target in 0..6 {
            for drag in [
                strong_drag(),
                DragSample {
                    translation: -80.0,
                    predicted_end: -1700.0,
                },
            ] {
                let mut r = resolver(6);
                let plan = r.release(drag, HEIGHT, Some(target)).unwrap();
                assert_eq!(plan.landed_index, target);
                let steps = plan.to / 60.0;
                assert_abs_diff_eq!(steps, steps.round(), epsilon = 1e-9);
                assert_eq!(r.complete(plan.token), Some(target));
            }
        }
    }

    #[test]
    fn command_spin_from_rest_lands_on_target() {
        let mut r = resolver(6);
        let plan = r.spin_to(3, HEIGHT, 2000.0).unwrap();
        assert_eq!(plan.landed_index, 3);
        let steps = plan.to / 60.0;
        assert_abs_diff_eq!(steps, steps.round(), epsilon = 1e-9);
        assert_eq!(r.complete(plan.token), Some(3));
        assert_eq!(r.phase(), Phase::Idle);
    }

    #[test]
    fn spin_to_matches_a_forced_release_from_rest() {
        let mut a = resolver(6);
        let mut b = resolver(6);
        let plan_a = a.spin_to(4, HEIGHT, 1800.0).unwrap();
        let plan_b = b
            .release(
                DragSample {
                    translation: 0.0,
                    predicted_end: 1800.0,
                },
                HEIGHT,
                Some(4),
            )
            .unwrap();
        assert_eq!(plan_a.to, plan_b.to);
        assert_eq!(plan_a.landed_index, plan_b.landed_index);
        assert_eq!(plan_a.duration, plan_b.duration);
    }

    #[test]
    fn out_of_range_target_is_rejected_without_state_change() {
        let mut r = resolver(6);
        let err = r.spin_to(6, HEIGHT, 2000.0).unwrap_err();
        assert_eq!(
            err,
            WheelError::OutOfRange {
                index: 6,
                count: 6
            }
        );
        assert_eq!(r.phase(), Phase::Idle);
    }

    #[test]
    fn spinning_wheel_rejects_everything_until_complete() {
        let mut r = resolver(6);
        let plan = r.release(strong_drag(), HEIGHT, None).unwrap();

        assert_eq!(r.drag_update(15.0), Err(WheelError::Busy));
        assert_eq!(
            r.release(strong_drag(), HEIGHT, None),
            Err(WheelError::Busy)
        );
        assert_eq!(r.spin_to(2, HEIGHT, 2000.0), Err(WheelError::Busy));

        assert_eq!(r.complete(plan.token), Some(plan.landed_index));
        assert!(r.release(strong_drag(), HEIGHT, None).is_ok());
    }

    #[test]
    fn completion_fires_once() {
        let mut r = resolver(6);
        let plan = r.release(strong_drag(), HEIGHT, None).unwrap();
        assert!(r.complete(plan.token).is_some());
        assert_eq!(r.complete(plan.token), None);
    }

    #[test]
    fn cancelled_spin_ignores_its_stale_token() {
        let mut r = resolver(6);
        let plan = r.release(strong_drag(), HEIGHT, None).unwrap();
        r.cancel();
        assert_eq!(r.phase(), Phase::Idle);
        assert_eq!(r.complete(plan.token), None);

        // A fresh spin gets a distinct token.
        let next = r.release(strong_drag(), HEIGHT, None).unwrap();
        assert_ne!(next.token, plan.token);
    }

    #[test]
    fn drag_folds_the_base_rotation_into_one_turn() {
        let mut r = resolver(6);
        let plan = r.release(strong_drag(), HEIGHT, None).unwrap();
        r.complete(plan.token).unwrap();

        // Base was 4260; the next drag folds it to 300 and adds the live
        // offset scaled against the surface height.
        r.drag_update(10.0).unwrap();
        assert_abs_diff_eq!(r.display_rotation(HEIGHT), 304.5, epsilon = 1e-9);
        assert_eq!(r.phase(), Phase::Dragging);
    }

    #[test]
    fn easing_parses_case_insensitively() {
        assert_eq!("EASE-OUT".parse::<Easing>().unwrap(), Easing::EaseOut);
        assert_eq!("easeout".parse::<Easing>().unwrap(), Easing::EaseOut);
        assert_eq!("Linear".parse::<Easing>().unwrap(), Easing::Linear);
        assert!("bouncy".parse::<Easing>().is_err());
    }

    #[test]
    fn easing_curves_hit_their_endpoints() {
        for easing in [Easing::EaseOut, Easing::EaseInOut, Easing::Linear] {
            assert_abs_diff_eq!(easing.apply(0.0), 0.0, epsilon = 1e-9);
            assert_abs_diff_eq!(easing.apply(1.0), 1.0, epsilon = 1e-9);
            assert_abs_diff_eq!(easing.apply(2.0), 1.0, epsilon = 1e-9);
        }
        // Decelerating: the first half covers more than half the distance.
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
    }
}
