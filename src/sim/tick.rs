//! Fixed timestep simulation tick
//!
//! Launch, advance and reset operate on an explicit `SimState`. Gravity is
//! applied after the candidate position is computed, so its effect on
//! position lags one tick behind.

use glam::DVec2;

use super::collision::{Outcome, classify};
use super::state::{GameStatus, LaunchParameters, SimState};
use super::world::World;
use crate::consts::*;

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub outcome: Outcome,
    /// Position the ball moved to this tick (committed only on `Continue`)
    pub candidate: DVec2,
    /// Velocity after this tick's gravity
    pub velocity: DVec2,
}

impl TickReport {
    /// Position to draw instead of the committed one.
    ///
    /// Terminal ticks leave `SimState::position` at its pre-tick value, so the
    /// final frame shows the candidate through this override.
    pub fn display_override(&self) -> Option<DVec2> {
        self.outcome.is_terminal().then_some(self.candidate)
    }
}

/// Launch the ball. Ignored unless the state is Ready.
///
/// Returns whether the launch happened.
pub fn launch(state: &mut SimState, world: &World, params: &LaunchParameters) -> bool {
    if state.status != GameStatus::Ready {
        log::debug!("Launch ignored in {:?}", state.status);
        return false;
    }

    state.position = world.start();
    state.velocity = params.velocity();
    state.elapsed = 0.0;
    state.trail.clear();
    state.status = GameStatus::Playing;

    log::info!(
        "Launched at {}° with power {:.1} (v = {:.2}, {:.2})",
        params.angle_deg,
        params.power,
        state.velocity.x,
        state.velocity.y
    );
    true
}

/// Advance the flight by one fixed timestep. No-op unless Playing.
pub fn tick(state: &mut SimState, world: &World, dt: f64) -> Option<TickReport> {
    if state.status != GameStatus::Playing {
        return None;
    }

    state.elapsed += dt;

    let candidate = state.position + state.velocity * dt;
    state.velocity.y += GRAVITY * dt;

    // Modulo sampler: roughly every 4th tick, drifts with accumulated error
    if state.elapsed % TRAIL_SAMPLE_PERIOD < dt {
        state.trail.record(state.position);
    }

    let outcome = classify(candidate, world);
    match outcome {
        Outcome::Continue => state.position = candidate,
        Outcome::Won => {
            state.status = GameStatus::Won;
            log::info!(
                "Target hit at ({:.2}, {:.2}) after {:.3}s",
                candidate.x,
                candidate.y,
                state.elapsed
            );
        }
        Outcome::Lost(reason) => {
            state.status = GameStatus::Lost;
            log::info!(
                "Flight lost ({:?}) at ({:.2}, {:.2}) after {:.3}s",
                reason,
                candidate.x,
                candidate.y,
                state.elapsed
            );
        }
    }

    Some(TickReport {
        outcome,
        candidate,
        velocity: state.velocity,
    })
}

/// Return to a fresh Ready state from any status
pub fn reset(state: &mut SimState, world: &World) {
    *state = SimState::new(world);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::LossReason;
    use crate::sim::state::TRAIL_LENGTH;

    /// Tick until the flight ends, returning the terminal report and tick count
    fn fly(state: &mut SimState, world: &World) -> (TickReport, u32) {
        let mut ticks = 0;
        loop {
            ticks += 1;
            let report = tick(state, world, SIM_DT).expect("state should be playing");
            if report.outcome.is_terminal() {
                return (report, ticks);
            }
            assert!(ticks < 10_000, "flight never ended");
        }
    }

    #[test]
    fn test_launch_only_from_ready() {
        let world = World::reference();
        let mut state = SimState::new(&world);
        let params = LaunchParameters::new(45, 10.0);

        assert!(launch(&mut state, &world, &params));
        assert_eq!(state.status, GameStatus::Playing);

        // Re-launch mid-flight is ignored
        tick(&mut state, &world, SIM_DT);
        let before = state.clone();
        assert!(!launch(&mut state, &world, &LaunchParameters::new(10, 2.0)));
        assert_eq!(state, before);
    }

    #[test]
    fn test_terminal_state_needs_reset_before_launch() {
        let world = World::reference();
        let mut state = SimState::new(&world);
        launch(&mut state, &world, &LaunchParameters::new(10, 5.0));
        fly(&mut state, &world);
        assert_eq!(state.status, GameStatus::Lost);

        assert!(!launch(&mut state, &world, &LaunchParameters::new(45, 10.0)));
        assert_eq!(state.status, GameStatus::Lost);
        assert!(tick(&mut state, &world, SIM_DT).is_none());

        reset(&mut state, &world);
        assert!(launch(&mut state, &world, &LaunchParameters::new(45, 10.0)));
    }

    #[test]
    fn test_tick_is_noop_when_not_playing() {
        let world = World::reference();
        let mut state = SimState::new(&world);
        let before = state.clone();
        assert!(tick(&mut state, &world, SIM_DT).is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn test_first_tick_moves_with_pre_gravity_velocity() {
        let world = World::reference();
        let mut state = SimState::new(&world);
        let params = LaunchParameters::new(60, 8.0);
        launch(&mut state, &world, &params);
        let v0 = state.velocity;

        let report = tick(&mut state, &world, SIM_DT).unwrap();
        assert_eq!(report.outcome, Outcome::Continue);
        assert_eq!(state.position, v0 * SIM_DT);
        assert_eq!(state.velocity.x, v0.x);
        assert_eq!(state.velocity.y, v0.y + GRAVITY * SIM_DT);
        assert_eq!(state.elapsed, SIM_DT);
    }

    #[test]
    fn test_trail_follows_modulo_schedule() {
        // Straight up at power 5 stays airborne for hundreds of ticks
        let world = World::reference();
        let mut state = SimState::new(&world);
        launch(&mut state, &world, &LaunchParameters::new(90, 5.0));

        let mut sampled_on = Vec::new();
        for n in 1..=20 {
            let before = state.trail.len();
            let position_before = state.position;
            tick(&mut state, &world, SIM_DT).unwrap();
            if state.trail.len() > before {
                sampled_on.push(n);
                // Samples are the pre-update position
                assert_eq!(state.trail.newest(), Some(position_before));
            }
        }
        // Accumulated rounding makes ticks 4 and 5 both sample
        assert_eq!(sampled_on, vec![4, 5, 9, 13, 16, 20]);
    }

    #[test]
    fn test_trail_capped_on_long_flight() {
        let world = World::reference();
        let mut state = SimState::new(&world);
        launch(&mut state, &world, &LaunchParameters::new(90, 5.0));
        let (report, ticks) = fly(&mut state, &world);

        assert_eq!(ticks, 401);
        assert_eq!(state.trail.len(), TRAIL_LENGTH);
        // Ball comes straight back down and dips below zero in one step,
        // so out-of-bounds wins over the ground check
        assert_eq!(report.outcome, Outcome::Lost(LossReason::OutOfBounds));
        assert!(report.candidate.y < 0.0);
    }

    #[test]
    fn test_low_shot_hits_ground_immediately() {
        let world = World::reference();
        let mut state = SimState::new(&world);
        launch(&mut state, &world, &LaunchParameters::new(10, 5.0));
        let (report, ticks) = fly(&mut state, &world);
        assert_eq!(ticks, 1);
        assert_eq!(report.outcome, Outcome::Lost(LossReason::Ground));
        assert!(state.trail.is_empty());
    }

    #[test]
    fn test_forty_five_at_ten_clips_upper_fence() {
        let world = World::reference();
        let mut state = SimState::new(&world);
        launch(&mut state, &world, &LaunchParameters::new(45, 10.0));
        let (report, ticks) = fly(&mut state, &world);

        assert_eq!(ticks, 113);
        assert_eq!(report.outcome, Outcome::Lost(LossReason::Fence));
        assert_eq!(state.status, GameStatus::Lost);

        // Rendered terminal position is the candidate inside the fence band
        let shown = report.display_override().unwrap();
        assert!((shown.x - 19.9758).abs() < 1e-3);
        assert!((shown.y - 16.0208).abs() < 1e-3);
        assert!(shown.y >= 16.0);

        // Committed position stays one step behind, still inside the gap
        assert_ne!(state.position, shown);
        assert!(state.position.x < shown.x);
        assert!(state.position.y > 13.0 && state.position.y < 16.0);
    }

    #[test]
    fn test_lobbed_shot_through_gap_wins() {
        let world = World::reference();
        let mut state = SimState::new(&world);
        launch(&mut state, &world, &LaunchParameters::new(66, 6.3));
        let (report, ticks) = fly(&mut state, &world);

        assert_eq!(report.outcome, Outcome::Won);
        assert_eq!(state.status, GameStatus::Won);
        assert_eq!(ticks, 461);
        let shown = report.display_override().unwrap();
        assert!((shown.x - 30.0).abs() < 0.5);
        assert!(shown.y.abs() < 0.5);
        assert_ne!(state.position, shown);
    }

    #[test]
    fn test_continue_has_no_display_override() {
        let world = World::reference();
        let mut state = SimState::new(&world);
        launch(&mut state, &world, &LaunchParameters::new(45, 10.0));
        let report = tick(&mut state, &world, SIM_DT).unwrap();
        assert_eq!(report.display_override(), None);
        assert_eq!(state.position, report.candidate);
    }

    #[test]
    fn test_reset_from_every_status() {
        let world = World::reference();
        for params in [
            LaunchParameters::new(45, 10.0),
            LaunchParameters::new(66, 6.3),
            LaunchParameters::new(10, 5.0),
        ] {
            let mut state = SimState::new(&world);
            launch(&mut state, &world, &params);
            for _ in 0..30 {
                tick(&mut state, &world, SIM_DT);
            }
            reset(&mut state, &world);
            assert_eq!(state, SimState::new(&world));
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn first_tick_applies_exactly_one_gravity_step(
                angle in 0u32..=90,
                power in 0.1f64..40.0,
            ) {
                let world = World::reference();
                let mut state = SimState::new(&world);
                launch(&mut state, &world, &LaunchParameters::new(angle, power));
                let vy = state.velocity.y;
                let report = tick(&mut state, &world, SIM_DT).unwrap();

                prop_assert_eq!(report.velocity.y, vy + GRAVITY * SIM_DT);
                prop_assert!(report.velocity.y < vy);
            }

            #[test]
            fn trail_never_exceeds_capacity(
                angle in 0u32..=90,
                power in 0.1f64..20.0,
                ticks in 1usize..800,
            ) {
                let world = World::reference();
                let mut state = SimState::new(&world);
                launch(&mut state, &world, &LaunchParameters::new(angle, power));
                for _ in 0..ticks {
                    if tick(&mut state, &world, SIM_DT).is_none() {
                        break;
                    }
                    prop_assert!(state.trail.len() <= TRAIL_LENGTH);
                }
            }

            #[test]
            fn terminal_override_matches_classification(
                angle in 0u32..=90,
                power in 0.1f64..20.0,
            ) {
                let world = World::reference();
                let mut state = SimState::new(&world);
                launch(&mut state, &world, &LaunchParameters::new(angle, power));
                let mut last = None;
                for _ in 0..10_000 {
                    match tick(&mut state, &world, SIM_DT) {
                        Some(report) => last = Some(report),
                        None => break,
                    }
                }
                let report = last.unwrap();
                prop_assert!(report.outcome.is_terminal());
                let shown = report.display_override().unwrap();
                prop_assert_eq!(classify(shown, &world), report.outcome);
            }

            #[test]
            fn reset_always_restores_ready(
                angle in 0u32..=90,
                power in 0.1f64..20.0,
                ticks in 0usize..600,
            ) {
                let world = World::reference();
                let mut state = SimState::new(&world);
                launch(&mut state, &world, &LaunchParameters::new(angle, power));
                for _ in 0..ticks {
                    tick(&mut state, &world, SIM_DT);
                }
                reset(&mut state, &world);
                prop_assert_eq!(state.status, GameStatus::Ready);
                prop_assert_eq!(state.position, world.start());
                prop_assert_eq!(state.velocity, DVec2::ZERO);
                prop_assert!(state.trail.is_empty());
            }
        }
    }
}
