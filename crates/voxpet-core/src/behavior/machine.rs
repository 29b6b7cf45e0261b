//! Behavior state record, transitions and steering
//!
//! The machine only owns discrete state and its transient fields. Frame
//! effects (movement, stat costs, animation) are applied by the habitat,
//! which calls back into these transitions.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use super::BehaviorState;
use crate::interaction::Grab;

#[derive(Debug, Clone, Default)]
pub struct BehaviorMachine {
    state: BehaviorState,
    /// State saved across a drag or photo mode
    previous: BehaviorState,
    target: Option<Vec3>,
    action_timer_ms: f32,
    grab: Option<Grab>,
    /// Live chase target while exercising
    cursor: Vec3,
}

impl BehaviorMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BehaviorState {
        self.state
    }

    pub fn previous_state(&self) -> BehaviorState {
        self.previous
    }

    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    pub fn action_timer_ms(&self) -> f32 {
        self.action_timer_ms
    }

    pub fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }

    pub fn grab(&self) -> Option<&Grab> {
        self.grab.as_ref()
    }

    pub fn cursor(&self) -> Vec3 {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Vec3) {
        self.cursor = cursor;
    }

    /// Back to a fresh IDLE with no transient state
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn enter(&mut self, state: BehaviorState) {
        if self.state != state {
            log::trace!("Behavior {} -> {}", self.state, state);
        }
        self.state = state;
        self.action_timer_ms = 0.0;
    }

    /// Head for a point (wander or food)
    pub fn walk_to(&mut self, target: Vec3) {
        self.target = Some(target);
        self.enter(BehaviorState::Walk);
    }

    /// Walk target reached: eat if there is food, otherwise idle
    pub fn arrive(&mut self, food_present: bool) {
        if food_present {
            self.enter(BehaviorState::Eat);
        } else {
            self.target = None;
            self.enter(BehaviorState::Idle);
        }
    }

    /// Leave an action state for IDLE
    pub fn idle(&mut self) {
        self.enter(BehaviorState::Idle);
    }

    /// Enter PLAY unless dragging or already playing; returns whether the
    /// state changed
    pub fn request_play(&mut self) -> bool {
        if self.is_dragging() || self.state == BehaviorState::Play {
            return false;
        }
        self.enter(BehaviorState::Play);
        true
    }

    pub fn start_exercise(&mut self, cursor: Vec3) {
        self.cursor = cursor;
        self.enter(BehaviorState::Exercise);
    }

    /// Follow the sleeping flag: SLEEP when set, IDLE when cleared
    pub fn set_sleeping(&mut self, sleeping: bool) {
        self.enter(if sleeping {
            BehaviorState::Sleep
        } else {
            BehaviorState::Idle
        });
    }

    pub fn begin_drag(&mut self, grab: Grab) {
        self.previous = self.state;
        self.grab = Some(grab);
        self.enter(BehaviorState::Dragged);
    }

    /// Release a drag, landing in SLEEP or IDLE; None if not dragging
    pub fn end_drag(&mut self, sleeping: bool) -> Option<BehaviorState> {
        self.grab.take()?;
        self.target = None;
        self.set_sleeping(sleeping);
        Some(self.state)
    }

    /// Freeze at IDLE for photo mode, remembering the current state
    pub fn enter_photo(&mut self, sleeping: bool) {
        self.end_drag(sleeping);
        self.previous = self.state;
        self.target = None;
        self.state = BehaviorState::Idle;
    }

    /// Restore the state saved by `enter_photo`
    ///
    /// A walk lost its target on entry, so it resumes as IDLE. The sleeping
    /// flag wins over whatever was saved.
    pub fn exit_photo(&mut self, sleeping: bool) {
        self.state = match self.previous {
            _ if sleeping => BehaviorState::Sleep,
            BehaviorState::Walk | BehaviorState::Dragged => BehaviorState::Idle,
            BehaviorState::Sleep => BehaviorState::Idle,
            other => other,
        };
    }

    /// Advance the time spent in the current action
    pub fn advance_timer(&mut self, dt_ms: f32) -> f32 {
        self.action_timer_ms += dt_ms;
        self.action_timer_ms
    }
}

/// Wrap an angle into [-PI, PI]
pub fn wrap_angle(mut angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    angle %= TAU;
    if angle > PI {
        angle -= TAU;
    } else if angle < -PI {
        angle += TAU;
    }
    angle
}

/// Heading (yaw about +Y) that faces from `from` toward `to`; +Z is yaw 0
pub fn heading(from: Vec3, to: Vec3) -> f32 {
    let d = to - from;
    d.x.atan2(d.z)
}

/// Ease `yaw` toward facing `to` by `factor` of the shortest turn
pub fn turn_toward(yaw: f32, from: Vec3, to: Vec3, factor: f32) -> f32 {
    yaw + wrap_angle(heading(from, to) - yaw) * factor
}

/// Horizontal distance between two points
pub fn flat_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(b.x - a.x, b.z - a.z).length()
}

/// Move `from` up to `step` units toward `to` on the ground plane, never
/// overshooting
pub fn step_toward(from: Vec3, to: Vec3, step: f32) -> Vec3 {
    let delta = Vec2::new(to.x - from.x, to.z - from.z);
    let dist = delta.length();
    if dist <= f32::EPSILON {
        return from;
    }
    let moved = delta / dist * step.min(dist);
    Vec3::new(from.x + moved.x, from.y, from.z + moved.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        let machine = BehaviorMachine::new();
        assert_eq!(machine.state(), BehaviorState::Idle);
        assert!(!machine.is_dragging());
        assert!(machine.target().is_none());
    }

    #[test]
    fn test_walk_then_arrive() {
        let mut machine = BehaviorMachine::new();
        machine.walk_to(Vec3::X);
        assert_eq!(machine.state(), BehaviorState::Walk);

        machine.arrive(true);
        assert_eq!(machine.state(), BehaviorState::Eat);
        assert_eq!(machine.action_timer_ms(), 0.0);

        machine.walk_to(Vec3::Z);
        machine.arrive(false);
        assert_eq!(machine.state(), BehaviorState::Idle);
        assert!(machine.target().is_none());
    }

    #[test]
    fn test_play_only_when_free() {
        let mut machine = BehaviorMachine::new();
        assert!(machine.request_play());
        machine.advance_timer(500.0);
        assert!(!machine.request_play());
        assert_eq!(machine.action_timer_ms(), 500.0);

        machine.begin_drag(Grab::begin(None, Vec3::ZERO));
        assert!(!machine.request_play());
        assert_eq!(machine.state(), BehaviorState::Dragged);
        assert_eq!(machine.previous_state(), BehaviorState::Play);
    }

    #[test]
    fn test_drag_release_restores_pose_state() {
        let mut machine = BehaviorMachine::new();
        machine.set_sleeping(true);
        machine.begin_drag(Grab::begin(None, Vec3::ZERO));
        assert_eq!(machine.end_drag(true), Some(BehaviorState::Sleep));
        assert_eq!(machine.end_drag(true), None);

        machine.set_sleeping(false);
        machine.begin_drag(Grab::begin(None, Vec3::ZERO));
        assert_eq!(machine.end_drag(false), Some(BehaviorState::Idle));
    }

    #[test]
    fn test_photo_mode_round_trip() {
        let mut machine = BehaviorMachine::new();
        machine.start_exercise(Vec3::ONE);
        machine.enter_photo(false);
        assert_eq!(machine.state(), BehaviorState::Idle);
        machine.exit_photo(false);
        assert_eq!(machine.state(), BehaviorState::Exercise);

        machine.walk_to(Vec3::X);
        machine.enter_photo(false);
        assert!(machine.target().is_none());
        machine.exit_photo(false);
        assert_eq!(machine.state(), BehaviorState::Idle);

        machine.set_sleeping(true);
        machine.enter_photo(true);
        machine.exit_photo(true);
        assert_eq!(machine.state(), BehaviorState::Sleep);
    }

    #[test]
    fn test_photo_mode_ends_drag() {
        let mut machine = BehaviorMachine::new();
        machine.begin_drag(Grab::begin(None, Vec3::ZERO));
        machine.enter_photo(false);
        assert!(!machine.is_dragging());
        machine.exit_photo(false);
        assert_eq!(machine.state(), BehaviorState::Idle);
    }

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
        assert!((wrap_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-5);
        assert!((wrap_angle(0.3) - 0.3).abs() < 1e-6);
        assert_eq!(wrap_angle(f32::NAN), 0.0);
    }

    #[test]
    fn test_turn_takes_short_way() {
        // Facing just left of -Z, target just right of -Z: turn through PI
        let yaw = PI - 0.1;
        let target = Vec3::new(-0.1, 0.0, -1.0);
        let turned = turn_toward(yaw, Vec3::ZERO, target, 1.0);
        assert!((wrap_angle(turned) - heading(Vec3::ZERO, target)).abs() < 1e-4);
        assert!(turned > yaw);
    }

    #[test]
    fn test_step_toward_never_overshoots() {
        let from = Vec3::new(0.0, 0.0, 0.0);
        let to = Vec3::new(3.0, 0.0, 4.0);
        let mid = step_toward(from, to, 2.5);
        assert!((flat_distance(mid, to) - 2.5).abs() < 1e-5);
        let done = step_toward(from, to, 100.0);
        assert!((done - to).length() < 1e-5);
    }
}
