use super::FLING_PROJECTION_SECONDS;
use crate::config::WheelConfig;
use crate::gui::theme;
use crate::spin::{
    DEFAULT_SECTOR_COUNT, DragSample, Easing, SectorLayout, SpinPlan, SpinResolver, SpinToken,
};
use palette::Srgba;
use std::time::{Duration, Instant};

/// One running spin animation: the rendered rotation between the plan's
/// endpoints as a function of wall-clock time.
#[derive(Debug, Clone)]
pub struct Animation {
    from: f64,
    to: f64,
    duration: Duration,
    easing: Easing,
    started: Instant,
    pub token: SpinToken,
}

impl Animation {
    pub fn from_plan(plan: &SpinPlan, started: Instant) -> Self {
        Self {
            from: plan.from,
            to: plan.to,
            duration: plan.duration,
            easing: plan.easing,
            started,
            token: plan.token,
        }
    }

    pub fn rotation_at(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return self.to;
        }
        let t = now.duration_since(self.started).as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    pub fn finished(&self, now: Instant) -> bool {
        now.duration_since(self.started) >= self.duration
    }
}

/// Estimates fling velocity from successive drag offsets and projects the
/// end translation the resolver consumes.
#[derive(Debug, Clone)]
pub struct DragTracker {
    last_offset: f64,
    last_at: Instant,
    velocity: f64,
}

impl DragTracker {
    pub fn start(offset: f64, now: Instant) -> Self {
        Self {
            last_offset: offset,
            last_at: now,
            velocity: 0.0,
        }
    }

    pub fn update(&mut self, offset: f64, now: Instant) {
        let dt = now.duration_since(self.last_at).as_secs_f64();
        if dt > 1e-4 {
            self.velocity = (offset - self.last_offset) / dt;
        }
        self.last_offset = offset;
        self.last_at = now;
    }

    pub fn sample(&self) -> DragSample {
        DragSample {
            translation: self.last_offset,
            predicted_end: self.last_offset + self.velocity * FLING_PROJECTION_SECONDS,
        }
    }
}

/// Everything the component renders and mutates: the items, their colors,
/// the resolver, and whatever motion is in flight.
pub struct WheelState {
    pub items: Vec<String>,
    pub palette: Vec<Srgba<f64>>,
    pub resolver: SpinResolver,
    pub animation: Option<Animation>,
    pub drag: Option<DragTracker>,
    /// Configured forced outcome: every spin lands here when set.
    pub rig: Option<usize>,
}

impl WheelState {
    pub fn from_config(cfg: &WheelConfig) -> Self {
        let items = if cfg.items.is_empty() {
            log::warn!(
                "No items configured; falling back to {} numbered sectors",
                DEFAULT_SECTOR_COUNT
            );
            (1..=DEFAULT_SECTOR_COUNT).map(|n| n.to_string()).collect()
        } else {
            cfg.items.clone()
        };
        let layout =
            SectorLayout::new(items.len()).expect("fallback guarantees at least one sector");

        let palette = cfg
            .colors
            .as_deref()
            .and_then(theme::parse_palette)
            .unwrap_or_else(theme::default_palette);

        let rig = cfg.rig.filter(|&index| {
            if index < items.len() {
                true
            } else {
                log::warn!(
                    "Rig index {} out of range for {} items; ignoring",
                    index,
                    items.len()
                );
                false
            }
        });

        Self {
            items,
            palette,
            resolver: SpinResolver::new(layout, cfg.easing),
            animation: None,
            drag: None,
            rig,
        }
    }

    /// The rotation to render right now: the running animation while one is
    /// in flight, otherwise the resolver's base-plus-drag formula.
    pub fn display_rotation(&self, surface_height: f64, now: Instant) -> f64 {
        match &self.animation {
            Some(animation) => animation.rotation_at(now),
            None => self.resolver.display_rotation(surface_height),
        }
    }

    pub fn label(&self, index: usize) -> String {
        self.items
            .get(index)
            .cloned()
            .unwrap_or_else(|| (index + 1).to_string())
    }
}
