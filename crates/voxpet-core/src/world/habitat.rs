//! The habitat: one creature on one platform
//!
//! Owns the stat simulator, behavior machine, creature model, props and
//! particles, and advances them in a fixed order each frame:
//! stats, evolution, behavior (with animation), falling food.
//! Pointer handlers mutate only the drag/cursor fields and the root
//! position; they never run a frame.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec3;
use voxpet_creature::animator;
use voxpet_creature::{
    CreatureModel, GenerationError, MeshLedger, Transform, VitalStats, WorldBox, generate,
};

use crate::behavior::machine::{flat_distance, step_toward, turn_toward};
use crate::behavior::{BehaviorMachine, BehaviorState};
use crate::config::{REFERENCE_FRAME_MS, SimConfig};
use crate::interaction::{
    GROUND_HEIGHT, Grab, PerspectiveCamera, PointerEvent, Ray, Viewport, chase_target, screen_ray,
};
use crate::rng_trait::SimRng;
use crate::stats::{StatSimulator, StatsNotifier, TickContext, TickOutcome};
use crate::world::particles::{ParticleKind, ParticleSystem};
use crate::world::platform::Platform;
use crate::world::props::{Prop, PropKind};

/// Where bursts above the creature appear, relative to its root
const ABOVE_ROOT: Vec3 = Vec3::new(0.0, 1.0, 0.0);
/// Root height while lying dead
const DEAD_HEIGHT: f32 = 0.2;
/// Initial chase target offset from the root
const EXERCISE_CURSOR_OFFSET: Vec3 = Vec3::new(1.0, 0.0, 1.0);
/// Root yaw added per reference frame while playing
const PLAY_SPIN: f32 = 0.2;

const SPAWN_BURST: usize = 20;
const EVOLUTION_BURST: usize = 30;
const PLAY_BURST: usize = 8;
const EAT_BURST: usize = 10;
const DIRT_BURST: usize = 4;
const SPLASH_BURST: usize = 6;

/// What a frame produced for the outside world
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// A stats snapshot is due now
    pub emit_stats: bool,
    pub tick: TickOutcome,
}

pub struct Habitat {
    config: SimConfig,
    sim: StatSimulator,
    machine: BehaviorMachine,
    notifier: StatsNotifier,
    ledger: MeshLedger,
    creature: CreatureModel,
    /// World placement of the creature; survives regeneration
    root: Transform,
    shadow_visible: bool,
    platform: Platform,
    particles: ParticleSystem,
    food: Option<Prop>,
    waste: Vec<Prop>,
    photo_mode: bool,
}

impl Habitat {
    pub fn new<R: SimRng + ?Sized>(
        stats: VitalStats,
        config: SimConfig,
        rng: &mut R,
    ) -> Result<Self, GenerationError> {
        let mut sim = StatSimulator::new(stats);
        let mut ledger = MeshLedger::new();
        let creature = generate(sim.identity_mut(), &mut ledger)?;
        let platform = Platform::new(config.play_radius, config.platform_radius, rng);
        let notifier = StatsNotifier::new(config.notify_interval_ms);

        let mut habitat = Self {
            config,
            sim,
            machine: BehaviorMachine::new(),
            notifier,
            ledger,
            creature,
            root: Transform::IDENTITY,
            shadow_visible: true,
            platform,
            particles: ParticleSystem::new(),
            food: None,
            waste: Vec::new(),
            photo_mode: false,
        };
        habitat.spawn_burst(rng);
        habitat.settle_into_pose();
        Ok(habitat)
    }

    // --- Accessors ---

    pub fn stats(&self) -> &VitalStats {
        self.sim.stats()
    }

    pub fn state(&self) -> BehaviorState {
        self.machine.state()
    }

    pub fn machine(&self) -> &BehaviorMachine {
        &self.machine
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn root(&self) -> &Transform {
        &self.root
    }

    pub fn creature(&self) -> &CreatureModel {
        &self.creature
    }

    pub fn creature_boxes(&self) -> Vec<WorldBox> {
        self.creature.world_boxes(&self.root)
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn food(&self) -> Option<&Prop> {
        self.food.as_ref()
    }

    pub fn waste(&self) -> &[Prop] {
        &self.waste
    }

    pub fn ledger(&self) -> &MeshLedger {
        &self.ledger
    }

    pub fn is_photo_mode(&self) -> bool {
        self.photo_mode
    }

    pub fn is_dragging(&self) -> bool {
        self.machine.is_dragging()
    }

    pub fn shadow_visible(&self) -> bool {
        self.shadow_visible
    }

    /// Ask for a stats snapshot at the next allowed slot
    pub fn request_emit(&mut self) {
        self.notifier.request();
    }

    // --- Frame ---

    /// Advance one display frame
    pub fn frame<R: SimRng + ?Sized>(&mut self, now_ms: f64, dt_ms: f32, rng: &mut R) -> FrameReport {
        let dt = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        self.platform.drift_clouds(dt);
        self.particles.update(dt);

        if !self.stats().is_alive {
            self.root.rotation.z = FRAC_PI_2;
            self.root.translation.y = DEAD_HEIGHT;
            return FrameReport {
                emit_stats: self.notifier.poll(now_ms, false),
                tick: TickOutcome::default(),
            };
        }

        let ctx = TickContext {
            dt_ms: dt,
            dragging: self.machine.is_dragging(),
            photo_mode: self.photo_mode,
            waste_present: !self.waste.is_empty(),
        };
        let tick = self.sim.tick(&ctx, &self.config, rng);
        if tick.died {
            // Later frames take the dead branch, which only sends requested snapshots
            self.notifier.request();
        }
        if tick.spawn_waste {
            self.spawn_waste();
        }
        if tick.evolved {
            self.regenerate(rng);
            self.particles.burst(
                ParticleKind::Evolution,
                self.root.translation,
                EVOLUTION_BURST,
                rng,
            );
        }

        let emit_stats = self.notifier.poll(now_ms, true);

        self.animate(now_ms, dt, rng);

        FrameReport { emit_stats, tick }
    }

    fn animate<R: SimRng + ?Sized>(&mut self, now_ms: f64, dt: f32, rng: &mut R) {
        let time = (now_ms * 0.001) as f32;
        let weight = self.stats().weight;

        animator::apply_fat_scale(&mut self.creature, weight);
        if self.machine.state().breathes() {
            animator::breathe(&mut self.creature, time);
        }

        if self.photo_mode {
            return;
        }

        let speed = animator::speed_modifier(weight);
        match self.machine.state() {
            BehaviorState::Idle => self.step_idle(rng),
            BehaviorState::Walk => self.step_walk(time, dt, speed),
            BehaviorState::Exercise => self.step_exercise(time, dt, speed, rng),
            BehaviorState::Eat => self.step_eat(time, dt, rng),
            BehaviorState::Play => self.step_play(time, dt),
            BehaviorState::Dragged => animator::drag_flail(&mut self.creature, time),
            BehaviorState::Sleep => {}
        }

        if let Some(food) = self.food.as_mut() {
            food.fall(dt, &self.config.food);
        }
    }

    fn step_idle<R: SimRng + ?Sized>(&mut self, rng: &mut R) {
        let movement = &self.config.movement;
        if rng.check_probability(movement.idle_turn_chance) {
            self.root.rotation.y += rng.gen_centered();
        }
        if rng.check_probability(movement.wander_chance) && !self.stats().is_sleeping {
            let r = rng.gen_f32() * movement.wander_radius;
            let theta = rng.gen_f32() * TAU;
            self.machine
                .walk_to(Vec3::new(r * theta.cos(), 0.0, r * theta.sin()));
        }
        animator::rest_legs(&mut self.creature);
    }

    fn step_walk(&mut self, time: f32, dt: f32, speed: f32) {
        let Some(target) = self.machine.target() else {
            self.machine.idle();
            return;
        };
        let movement = &self.config.movement;
        let here = self.root.translation;
        self.root.rotation.y = turn_toward(self.root.rotation.y, here, target, movement.walk_turn);

        if flat_distance(here, target) > movement.arrival_distance {
            let next = step_toward(here, target, movement.walk_speed * dt * speed);
            self.root.translation = self.platform.clamp(next);
            animator::walk_cycle(&mut self.creature, time, 1.0);
        } else {
            animator::settle_body(&mut self.creature);
            self.machine.arrive(self.food.is_some());
        }
    }

    fn step_exercise<R: SimRng + ?Sized>(&mut self, time: f32, dt: f32, speed: f32, rng: &mut R) {
        let movement = &self.config.movement;
        let cursor = self.machine.cursor();
        let here = self.root.translation;
        self.root.rotation.y = turn_toward(self.root.rotation.y, here, cursor, movement.chase_turn);

        if flat_distance(here, cursor) > movement.chase_arrival_distance {
            let next = step_toward(here, cursor, movement.chase_speed * dt * speed);
            self.root.translation = self.platform.clamp(next);
            animator::walk_cycle(&mut self.creature, time, 2.0);
            self.sim.burn_exercise(dt, &self.config);
            if rng.check_probability(self.config.actions.sweat_chance) {
                self.particles
                    .burst(ParticleKind::Sweat, self.root.translation + ABOVE_ROOT, 1, rng);
            }
        } else {
            animator::pant(&mut self.creature, time);
        }

        if self.stats().energy < self.config.actions.exercise_stop_energy {
            log::debug!("{} is worn out", self.stats().name);
            self.machine.idle();
        }
    }

    fn step_eat<R: SimRng + ?Sized>(&mut self, time: f32, dt: f32, rng: &mut R) {
        let elapsed = self.machine.advance_timer(dt);
        animator::bite(&mut self.creature, time);
        if elapsed <= self.config.actions.eat_duration_ms {
            return;
        }

        if let Some(food) = self.food.take() {
            food.release(&mut self.ledger);
            self.sim.eat_meal(&self.config);
            self.particles
                .burst(ParticleKind::Eat, self.root.translation, EAT_BURST, rng);
        }
        self.machine.idle();
        animator::end_bite(&mut self.creature);
        self.notifier.request();
    }

    fn step_play(&mut self, time: f32, dt: f32) {
        let elapsed = self.machine.advance_timer(dt);
        self.root.rotation.y += PLAY_SPIN * dt / REFERENCE_FRAME_MS;
        animator::play_bounce(&mut self.creature, time);
        if elapsed > self.config.actions.play_duration_ms {
            self.machine.idle();
            animator::end_play(&mut self.creature);
        }
    }

    // --- Generation and props ---

    fn spawn_burst<R: SimRng + ?Sized>(&mut self, rng: &mut R) {
        self.particles.burst(
            ParticleKind::Spawn,
            self.root.translation + ABOVE_ROOT,
            SPAWN_BURST,
            rng,
        );
    }

    /// Rebuild the model from the current seed, species and stage
    ///
    /// The old model is released only once the new one exists.
    pub fn regenerate<R: SimRng + ?Sized>(&mut self, rng: &mut R) {
        match generate(self.sim.identity_mut(), &mut self.ledger) {
            Ok(model) => {
                let mut old = std::mem::replace(&mut self.creature, model);
                old.dispose(&mut self.ledger);
                // Dropping the creature or leaving photo mode restores the pose
                if !self.is_dragging() && !self.photo_mode {
                    self.settle_into_pose();
                }
                self.spawn_burst(rng);
            }
            Err(err) => log::error!("Regeneration failed, keeping current model: {}", err),
        }
    }

    /// Put the model subtree into the pose the sleeping flag implies
    fn settle_into_pose(&mut self) {
        if self.stats().is_sleeping {
            animator::sleep_pose(&mut self.creature);
            self.shadow_visible = false;
        } else {
            animator::reset_model(&mut self.creature);
            self.shadow_visible = true;
        }
    }

    fn spawn_waste(&mut self) {
        let behind = self
            .root
            .matrix()
            .transform_vector3(Vec3::new(0.0, 0.0, -self.config.hazards.waste_offset));
        let mut position = self.root.translation + behind;
        position.y = 0.0;
        log::debug!("Waste dropped at ({:.2}, {:.2})", position.x, position.z);
        self.waste
            .push(Prop::spawn(PropKind::Waste, position, &mut self.ledger));
    }

    fn clear_props(&mut self) {
        if let Some(food) = self.food.take() {
            food.release(&mut self.ledger);
        }
        for waste in self.waste.drain(..) {
            waste.release(&mut self.ledger);
        }
    }

    // --- Actions ---

    /// Replace the stats record and rebuild everything around it
    pub fn load_state<R: SimRng + ?Sized>(&mut self, stats: VitalStats, rng: &mut R) {
        self.machine.reset();
        self.root = Transform::IDENTITY;
        self.clear_props();
        self.sim.adopt(stats);
        self.regenerate(rng);
        if self.stats().is_sleeping {
            self.machine.set_sleeping(true);
        }
        log::info!(
            "Loaded {} ({}, stage {})",
            self.stats().name,
            self.stats().species,
            self.stats().evolution_stage
        );
        self.notifier.request();
    }

    /// Drop food somewhere on the platform and walk to it
    pub fn feed<R: SimRng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let stats = self.stats();
        if !stats.is_alive || self.food.is_some() || stats.is_sleeping || self.is_dragging() {
            return false;
        }

        let rules = &self.config.food;
        let r = rng.gen_range_f32(rules.min_radius, rules.max_radius);
        let theta = rng.gen_f32() * TAU;
        let position = Vec3::new(r * theta.cos(), rules.drop_height, r * theta.sin());
        let food = Prop::spawn(PropKind::Food, position, &mut self.ledger);
        let target = food.ground_position();
        self.food = Some(food);
        self.machine.walk_to(target);
        true
    }

    /// Remove all waste; no-op if there is none
    pub fn clean<R: SimRng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if !self.stats().is_alive || self.waste.is_empty() {
            return false;
        }
        for waste in std::mem::take(&mut self.waste) {
            self.particles
                .burst(ParticleKind::Dirt, waste.position, DIRT_BURST, rng);
            self.particles
                .burst(ParticleKind::Splash, waste.position, SPLASH_BURST, rng);
            waste.release(&mut self.ledger);
        }
        self.sim.restore_hygiene();
        self.notifier.request();
        true
    }

    /// Cheer the creature up; enters PLAY only when not dragged or playing
    pub fn play<R: SimRng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if !self.stats().is_alive || self.stats().is_sleeping {
            return false;
        }
        self.sim.play(&self.config);
        self.particles.burst(
            ParticleKind::Play,
            self.root.translation + ABOVE_ROOT,
            PLAY_BURST,
            rng,
        );
        self.machine.request_play();
        self.notifier.request();
        true
    }

    pub fn start_exercise(&mut self) -> bool {
        let stats = self.stats();
        if !stats.is_alive
            || stats.is_sleeping
            || self.is_dragging()
            || stats.energy < self.config.actions.exercise_min_energy
        {
            return false;
        }
        let cursor = self.platform.clamp(self.root.translation + EXERCISE_CURSOR_OFFSET);
        self.machine.start_exercise(Vec3::new(cursor.x, 0.0, cursor.z));
        true
    }

    /// Toggle sleep
    pub fn sleep(&mut self) -> bool {
        if !self.stats().is_alive {
            return false;
        }
        let sleeping = self.sim.toggle_sleep();
        if !self.is_dragging() {
            self.machine.set_sleeping(sleeping);
            self.settle_into_pose();
        }
        log::debug!("{} is {}", self.stats().name, if sleeping { "asleep" } else { "awake" });
        self.notifier.request();
        true
    }

    /// Enter or leave photo mode; returns false if already in that mode
    pub fn set_photo_mode(&mut self, enabled: bool) -> bool {
        if enabled == self.photo_mode {
            return false;
        }
        self.photo_mode = enabled;
        let sleeping = self.stats().is_sleeping;

        if enabled {
            self.machine.enter_photo(sleeping);
            self.root = Transform::IDENTITY;
            animator::reset_model(&mut self.creature);
            self.shadow_visible = true;
        } else {
            self.machine.exit_photo(sleeping);
            self.settle_into_pose();
            if self.machine.state() == BehaviorState::Idle
                && let Some(food) = &self.food
            {
                self.machine.walk_to(food.ground_position());
            }
        }
        log::info!("Photo mode {}", if enabled { "on" } else { "off" });
        true
    }

    /// Turn the creature for framing; photo mode only
    pub fn set_pet_rotation(&mut self, angle: f32) -> bool {
        if !self.photo_mode || !angle.is_finite() {
            return false;
        }
        self.root.rotation.y = angle;
        true
    }

    // --- Pointer ---

    /// Feed one pointer event through the camera
    pub fn pointer<R: SimRng + ?Sized>(
        &mut self,
        event: PointerEvent,
        camera: &PerspectiveCamera,
        viewport: &Viewport,
        rng: &mut R,
    ) -> bool {
        match event {
            PointerEvent::Down(client) => {
                let ray = screen_ray(camera, viewport, client);
                self.pointer_down(ray, rng)
            }
            PointerEvent::Move(client) => {
                let ray = screen_ray(camera, viewport, client);
                self.pointer_move(ray)
            }
            PointerEvent::Up => self.pointer_up(),
        }
    }

    /// Try to grab the creature
    pub fn pointer_down<R: SimRng + ?Sized>(&mut self, ray: Option<Ray>, rng: &mut R) -> bool {
        if self.photo_mode || !self.stats().is_alive {
            return false;
        }
        if self.machine.state() == BehaviorState::Exercise {
            return false;
        }
        let Some(ray) = ray else {
            return false;
        };
        if ray.pick(&self.creature_boxes()).is_none() {
            return false;
        }

        let grab = Grab::begin(ray.intersect_ground(GROUND_HEIGHT), self.root.translation);
        self.machine.begin_drag(grab);
        log::debug!("Picked up {}", self.stats().name);
        self.play(rng);
        true
    }

    /// Update the chase target or the dragged position
    pub fn pointer_move(&mut self, ray: Option<Ray>) -> bool {
        let Some(hit) = ray.and_then(|r| r.intersect_ground(GROUND_HEIGHT)) else {
            return false;
        };
        let radius = self.config.play_radius;
        let mut changed = false;

        if self.machine.state() == BehaviorState::Exercise
            && let Some(cursor) = chase_target(hit, radius)
        {
            self.machine.set_cursor(cursor);
            changed = true;
        }

        if let Some(next) = self.machine.grab().and_then(|grab| grab.follow(hit, radius)) {
            self.root.translation = Vec3::new(next.x, self.config.movement.drag_height, next.z);
            changed = true;
        }
        changed
    }

    /// Drop the creature back into IDLE or SLEEP
    pub fn pointer_up(&mut self) -> bool {
        if self.machine.end_drag(self.stats().is_sleeping).is_none() {
            return false;
        }
        self.root.translation.y = 0.0;
        animator::end_bite(&mut self.creature);
        self.settle_into_pose();
        log::debug!("Dropped {}", self.stats().name);
        true
    }

    // --- Teardown ---

    /// Release every mesh; safe to call more than once
    pub fn dispose(&mut self) {
        self.clear_props();
        self.creature.dispose(&mut self.ledger);
        self.particles.clear();
    }
}
