//! Autonomous roaming: a timer-driven state machine each NPC runs on its
//! own, with no player or network involvement.
use bevy::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Motion state. Exactly one is active per NPC; transitions happen when the
/// remaining duration runs out or an external freeze/unfreeze fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoamState {
    Idle { seconds_remaining: f32 },
    Moving { direction: Vec2, seconds_remaining: f32 },
    Paused { seconds_remaining: f32 },
}

/// Behavioral tuning, sourced from the roster config.
#[derive(Debug, Clone)]
pub struct RoamTuning {
    /// Maximum distance the NPC may wander from its spawn point.
    pub roam_radius: f32,
    /// Walk speed in world units per second.
    pub move_speed: f32,
    /// Probability of entering `Paused` when a behavior roll fires.
    pub pause_chance: f32,
    /// Probability of picking a fresh random direction on a roll.
    pub direction_change_chance: f32,
}

impl Default for RoamTuning {
    fn default() -> Self {
        Self {
            roam_radius: 5.0,
            move_speed: 1.5,
            pause_chance: 0.25,
            direction_change_chance: 0.35,
        }
    }
}

const IDLE_SECONDS: (f32, f32) = (0.5, 1.5);
const PAUSE_SECONDS: (f32, f32) = (1.0, 3.0);
const MOVE_SECONDS: (f32, f32) = (2.0, 5.0);

/// Per-NPC roaming state machine with its own seeded random source.
#[derive(Component, Debug)]
pub struct RoamingAgent {
    tuning: RoamTuning,
    state: RoamState,
    last_direction: Vec2,
    frozen: bool,
    rng: StdRng,
}

impl RoamingAgent {
    pub fn new(tuning: RoamTuning, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let idle = rng.gen_range(IDLE_SECONDS.0..IDLE_SECONDS.1);
        let last_direction = random_direction(&mut rng);
        Self {
            tuning,
            state: RoamState::Idle {
                seconds_remaining: idle,
            },
            last_direction,
            frozen: false,
            rng,
        }
    }

    pub fn state(&self) -> RoamState {
        self.state
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Stops the machine in place; `tick` becomes a no-op until unfrozen.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Resumes exactly where the machine was frozen.
    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }

    /// Advances the machine by `delta_seconds`, integrating `position`
    /// within the roam circle around `spawn`. Returns the direction walked
    /// this tick, if any.
    pub fn tick(&mut self, delta_seconds: f32, position: &mut Vec3, spawn: Vec3) -> Option<Vec2> {
        if self.frozen || delta_seconds <= 0.0 {
            return None;
        }

        match self.state {
            RoamState::Idle { seconds_remaining } => {
                let remaining = seconds_remaining - delta_seconds;
                if remaining > 0.0 {
                    self.state = RoamState::Idle {
                        seconds_remaining: remaining,
                    };
                } else {
                    self.roll_behavior();
                }
                None
            }
            RoamState::Paused { seconds_remaining } => {
                let remaining = seconds_remaining - delta_seconds;
                if remaining > 0.0 {
                    self.state = RoamState::Paused {
                        seconds_remaining: remaining,
                    };
                } else {
                    self.roll_behavior();
                }
                None
            }
            RoamState::Moving {
                direction,
                seconds_remaining,
            } => {
                let walked = self.integrate(direction, delta_seconds, position, spawn);
                self.last_direction = walked;
                let remaining = seconds_remaining - delta_seconds;
                if remaining > 0.0 {
                    self.state = RoamState::Moving {
                        direction: walked,
                        seconds_remaining: remaining,
                    };
                } else {
                    self.roll_behavior();
                }
                Some(walked)
            }
        }
    }

    /// Steps along `direction`, clamping to the roam circle. Reaching the
    /// boundary reflects the heading inward instead of overshooting.
    fn integrate(&mut self, direction: Vec2, dt: f32, position: &mut Vec3, spawn: Vec3) -> Vec2 {
        let step = direction * self.tuning.move_speed * dt;
        let mut next = Vec2::new(position.x + step.x, position.z + step.y);
        let center = Vec2::new(spawn.x, spawn.z);
        let offset = next - center;
        let mut heading = direction;

        if offset.length() > self.tuning.roam_radius {
            let normal = offset.normalize_or_zero();
            next = center + normal * self.tuning.roam_radius;
            heading = (direction - 2.0 * direction.dot(normal) * normal).normalize_or_zero();
            if heading == Vec2::ZERO {
                heading = -normal;
            }
        }

        position.x = next.x;
        position.z = next.y;
        heading
    }

    /// Rolls the next behavior: pause, turn, or keep walking the last
    /// direction.
    fn roll_behavior(&mut self) {
        let pause_chance = self.tuning.pause_chance;
        let direction_change_chance = self.tuning.direction_change_chance;
        let roll: f32 = self.rng.gen();

        if roll < pause_chance {
            let seconds = self.rng.gen_range(PAUSE_SECONDS.0..PAUSE_SECONDS.1);
            self.state = RoamState::Paused {
                seconds_remaining: seconds,
            };
        } else if roll < pause_chance + direction_change_chance {
            let direction = random_direction(&mut self.rng);
            let seconds = self.rng.gen_range(MOVE_SECONDS.0..MOVE_SECONDS.1);
            self.last_direction = direction;
            self.state = RoamState::Moving {
                direction,
                seconds_remaining: seconds,
            };
        } else {
            let seconds = self.rng.gen_range(MOVE_SECONDS.0..MOVE_SECONDS.1);
            self.state = RoamState::Moving {
                direction: self.last_direction,
                seconds_remaining: seconds,
            };
        }
    }
}

fn random_direction(rng: &mut StdRng) -> Vec2 {
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn make_agent(seed: u64) -> RoamingAgent {
        RoamingAgent::new(
            RoamTuning {
                roam_radius: 3.0,
                move_speed: 2.0,
                pause_chance: 0.2,
                direction_change_chance: 0.3,
            },
            seed,
        )
    }

    #[test]
    fn position_stays_within_roam_radius() {
        let spawn = Vec3::new(4.0, 1.0, -2.0);
        for seed in 0..8 {
            let mut agent = make_agent(seed);
            let mut position = spawn;
            for _ in 0..4000 {
                agent.tick(0.05, &mut position, spawn);
                let distance = Vec2::new(position.x - spawn.x, position.z - spawn.z).length();
                assert!(
                    distance <= 3.0 + EPSILON,
                    "seed {seed}: wandered {distance} from spawn"
                );
            }
        }
    }

    #[test]
    fn same_seed_replays_identically() {
        let spawn = Vec3::ZERO;
        let mut left = make_agent(99);
        let mut right = make_agent(99);
        let mut left_pos = spawn;
        let mut right_pos = spawn;
        for _ in 0..500 {
            left.tick(0.033, &mut left_pos, spawn);
            right.tick(0.033, &mut right_pos, spawn);
        }
        assert_eq!(left.state(), right.state());
        assert_eq!(left_pos, right_pos);
    }

    #[test]
    fn freeze_preserves_state_without_drift() {
        let spawn = Vec3::ZERO;
        let mut agent = make_agent(7);
        let mut position = spawn;
        for _ in 0..40 {
            agent.tick(0.05, &mut position, spawn);
        }

        let state_before = agent.state();
        let position_before = position;
        agent.freeze();
        for _ in 0..200 {
            assert_eq!(agent.tick(0.05, &mut position, spawn), None);
        }
        assert_eq!(agent.state(), state_before);
        assert_eq!(position, position_before);

        agent.unfreeze();
        assert_eq!(agent.state(), state_before);
    }

    #[test]
    fn boundary_reflects_instead_of_overshooting() {
        // Zero roll chances so the agent always keeps its current heading.
        let mut agent = RoamingAgent::new(
            RoamTuning {
                roam_radius: 1.0,
                move_speed: 5.0,
                pause_chance: 0.0,
                direction_change_chance: 0.0,
            },
            3,
        );
        let spawn = Vec3::ZERO;
        let mut position = spawn;
        let mut saw_movement = false;
        for _ in 0..600 {
            if agent.tick(0.1, &mut position, spawn).is_some() {
                saw_movement = true;
            }
            let distance = Vec2::new(position.x, position.z).length();
            assert!(distance <= 1.0 + EPSILON);
        }
        assert!(saw_movement);
    }
}
