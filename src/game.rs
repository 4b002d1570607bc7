//! Game controller
//!
//! Owns the world, the simulation state, the live aim and the frame loop.
//! The host forwards input (`set_angle`, `set_power`, `launch`, `reset`) and
//! frame callbacks (`on_frame`); every state change is followed by a redraw.

use crate::error::SchedulerError;
use crate::frame_loop::{FrameId, FrameLoop, FrameScheduler};
use crate::hud::{self, BallReadout};
use crate::renderer::{DrawSurface, Frame, draw_frame};
use crate::settings::Settings;
use crate::sim::{self, GameStatus, LaunchParameters, SimState, TickReport, World};

pub struct Game<S: FrameScheduler> {
    world: World,
    state: SimState,
    /// Live slider values
    params: LaunchParameters,
    settings: Settings,
    frames: FrameLoop<S>,
    /// Report of the most recent tick since launch
    last_report: Option<TickReport>,
}

impl<S: FrameScheduler> Game<S> {
    pub fn new(world: World, settings: Settings, scheduler: S) -> Self {
        Self {
            state: SimState::new(&world),
            params: settings.initial_params(),
            world,
            settings,
            frames: FrameLoop::new(scheduler),
            last_report: None,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn params(&self) -> &LaunchParameters {
        &self.params
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn frames(&self) -> &FrameLoop<S> {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut FrameLoop<S> {
        &mut self.frames
    }

    pub fn last_report(&self) -> Option<&TickReport> {
        self.last_report.as_ref()
    }

    /// Launch is only possible from Ready
    pub fn can_launch(&self) -> bool {
        self.state.status == GameStatus::Ready
    }

    /// Update the angle slider value. Redraws (and returns true) only while Ready.
    pub fn set_angle<D: DrawSurface + ?Sized>(&mut self, angle_deg: u32, surface: &mut D) -> bool {
        self.params = LaunchParameters::new(angle_deg, self.params.power);
        self.redraw(surface)
    }

    /// Update the power slider value. Redraws (and returns true) only while Ready.
    pub fn set_power<D: DrawSurface + ?Sized>(&mut self, power: f64, surface: &mut D) -> bool {
        self.params = LaunchParameters::new(self.params.angle_deg, self.settings.power.clamp(power));
        self.redraw(surface)
    }

    /// Start a flight with the current aim.
    ///
    /// Returns `Ok(false)` when not Ready. If no frame can be scheduled the
    /// launch is rolled back so the game does not sit in Playing forever.
    pub fn launch(&mut self) -> Result<bool, SchedulerError> {
        if !sim::launch(&mut self.state, &self.world, &self.params) {
            return Ok(false);
        }
        self.last_report = None;

        self.frames.cancel();
        if let Err(e) = self.frames.start() {
            log::error!("Could not schedule flight: {}", e);
            sim::reset(&mut self.state, &self.world);
            return Err(e);
        }
        Ok(true)
    }

    /// Back to Ready from any state.
    ///
    /// The pending frame is cancelled before the state is touched, so a tick
    /// scheduled for the old flight can never run against the new state.
    pub fn reset<D: DrawSurface + ?Sized>(&mut self, surface: &mut D) {
        self.frames.cancel();
        sim::reset(&mut self.state, &self.world);
        self.last_report = None;
        log::info!("Game reset");
        self.draw(surface);
    }

    /// Frame callback: tick, draw, and schedule the next frame while playing.
    ///
    /// Returns the tick report, or `None` if the frame was stale.
    pub fn on_frame<D: DrawSurface + ?Sized>(
        &mut self,
        id: FrameId,
        surface: &mut D,
    ) -> Result<Option<TickReport>, SchedulerError> {
        if !self.frames.accept(id) {
            return Ok(None);
        }

        let report = sim::tick(&mut self.state, &self.world, self.settings.sim_dt);
        if report.is_some() {
            self.last_report = report;
        }
        self.draw(surface);

        if self.state.status == GameStatus::Playing {
            self.frames.start()?;
        }
        Ok(report)
    }

    /// Redraw for a resize or slider change; only acts while Ready
    pub fn redraw<D: DrawSurface + ?Sized>(&self, surface: &mut D) -> bool {
        if self.state.status != GameStatus::Ready {
            return false;
        }
        self.draw(surface);
        true
    }

    /// Draw the current frame unconditionally
    pub fn draw<D: DrawSurface + ?Sized>(&self, surface: &mut D) {
        draw_frame(
            surface,
            &Frame {
                world: &self.world,
                state: &self.state,
                params: &self.params,
                display_override: self.last_report.and_then(|r| r.display_override()),
            },
        );
    }

    /// Status line text
    pub fn message(&self) -> &'static str {
        hud::status_message(self.state.status, self.last_report.map(|r| r.outcome))
    }

    /// Position/velocity readout, hidden while Ready
    pub fn readout(&self) -> Option<BallReadout> {
        if self.state.status == GameStatus::Ready {
            return None;
        }
        Some(match self.last_report {
            Some(report) => BallReadout::new(report.candidate, report.velocity),
            None => BallReadout::new(self.state.position, self.state.velocity),
        })
    }
}
