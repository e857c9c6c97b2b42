use crate::config;
use crate::events::AppEvent;
use crate::gui::theme;
use crate::gui::wheel::{self, Animation, DragTracker, WheelState};
use crate::spin::{COMMAND_FLING_MAX, COMMAND_FLING_MIN, DragSample, SpinPlan, SpinToken, WheelError};
use gtk::prelude::*;
use gtk4 as gtk;
use rand::Rng;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

pub struct AppModel {
    pub state: Rc<RefCell<WheelState>>,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    DragUpdate(f64),
    DragEnd(f64),
    Spin,
    SpinTo(usize),
    SpinFinished(SpinToken),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Spin => AppMsg::Spin,
            AppEvent::SpinTo(index) => AppMsg::SpinTo(index),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

/// Emitted once per spin, after the wheel has visually stopped.
#[derive(Debug, Clone)]
pub enum WheelOutput {
    Landed { index: usize, label: String },
}

fn command_fling() -> f64 {
    rand::rng().random_range(COMMAND_FLING_MIN..=COMMAND_FLING_MAX)
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (WheelState, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = WheelOutput;

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Spin Wheel"),
            set_default_width: 480,
            set_default_height: 480,
            add_css_class: "spinwheel-window",

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "spinwheel-area",

                add_controller = gtk::GestureDrag {
                    connect_drag_update[sender] => move |_, _, dy| {
                        sender.input(AppMsg::DragUpdate(dy));
                    },
                    connect_drag_end[sender] => move |_, _, dy| {
                        sender.input(AppMsg::DragEnd(dy));
                    },
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (state, rx) = init;

        theme::load_css();

        let state = Rc::new(RefCell::new(state));

        let model = AppModel {
            state: state.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        widgets.drawing_area.set_draw_func(move |_, cr, width, height| {
            let state = state_draw.borrow();
            let rotation = state.display_rotation(f64::from(height).max(1.0), Instant::now());
            if let Err(e) = wheel::draw(cr, &state, f64::from(width), f64::from(height), rotation) {
                log::error!("Drawing error: {}", e);
            }
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::DragUpdate(offset) => {
                let mut state = self.state.borrow_mut();
                match state.resolver.drag_update(offset) {
                    Ok(()) => {
                        let now = Instant::now();
                        match &mut state.drag {
                            Some(tracker) => tracker.update(offset, now),
                            None => state.drag = Some(DragTracker::start(offset, now)),
                        }
                        drop(state);
                        self.drawing_area.queue_draw();
                    }
                    Err(e) => log::debug!("Drag ignored: {}", e),
                }
            }
            AppMsg::DragEnd(offset) => {
                let plan = {
                    let mut state = self.state.borrow_mut();
                    let now = Instant::now();
                    let sample = match state.drag.take() {
                        Some(mut tracker) => {
                            tracker.update(offset, now);
                            tracker.sample()
                        }
                        None => DragSample {
                            translation: offset,
                            predicted_end: offset,
                        },
                    };
                    // The rig hook overrides the natural outcome but keeps
                    // a convincing motion, like a caller-decided draw.
                    let forced = state.rig;
                    let sample = if forced.is_some() {
                        DragSample {
                            translation: offset,
                            predicted_end: command_fling(),
                        }
                    } else {
                        sample
                    };
                    state.resolver.release(sample, self.surface_height(), forced)
                };
                match plan {
                    Ok(plan) => self.begin_spin(plan, &sender),
                    Err(e) => log::debug!("Drag release ignored: {}", e),
                }
            }
            AppMsg::Spin => self.spin_command(None, &sender),
            AppMsg::SpinTo(index) => self.spin_command(Some(index), &sender),
            AppMsg::SpinFinished(token) => {
                let landed = self.state.borrow_mut().resolver.complete(token);
                match landed {
                    Some(index) => {
                        let label = {
                            let mut state = self.state.borrow_mut();
                            state.animation = None;
                            state.label(index)
                        };
                        log::info!("Landed on sector {} ({})", index, label);
                        let _ = sender.output(WheelOutput::Landed { index, label });
                        self.drawing_area.queue_draw();
                    }
                    None => log::debug!("Stale spin completion ignored"),
                }
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    let mut state = self.state.borrow_mut();
                    // Any spin in flight is abandoned; its completion timer
                    // finds a stale token and does nothing.
                    state.resolver.cancel();
                    *state = WheelState::from_config(&new_config);
                    drop(state);
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    fn surface_height(&self) -> f64 {
        f64::from(self.drawing_area.height()).max(1.0)
    }

    fn spin_command(&mut self, target: Option<usize>, sender: &ComponentSender<Self>) {
        let plan = {
            let mut state = self.state.borrow_mut();
            let height = self.surface_height();
            let fling = command_fling();
            match target.or(state.rig) {
                Some(index) => state.resolver.spin_to(index, height, fling),
                None => state.resolver.release(
                    DragSample {
                        translation: 0.0,
                        predicted_end: fling,
                    },
                    height,
                    None,
                ),
            }
        };
        match plan {
            Ok(plan) => self.begin_spin(plan, sender),
            Err(e @ WheelError::OutOfRange { .. }) => log::warn!("Spin command rejected: {}", e),
            Err(e) => log::debug!("Spin command rejected: {}", e),
        }
    }

    fn begin_spin(&self, plan: SpinPlan, sender: &ComponentSender<Self>) {
        let started = Instant::now();
        {
            let mut state = self.state.borrow_mut();
            state.drag = None;
            state.animation = Some(Animation::from_plan(&plan, started));
        }

        // Redraw every frame for as long as the animation runs.
        let state_tick = self.state.clone();
        self.drawing_area.add_tick_callback(move |area, _| {
            area.queue_draw();
            let done = state_tick
                .borrow()
                .animation
                .as_ref()
                .is_none_or(|animation| animation.finished(Instant::now()));
            if done {
                glib::ControlFlow::Break
            } else {
                glib::ControlFlow::Continue
            }
        });

        // Completion is scheduled once against the wall clock, not polled.
        let sender = sender.clone();
        let token = plan.token;
        glib::timeout_add_local_once(plan.duration, move || {
            sender.input(AppMsg::SpinFinished(token));
        });
    }
}
