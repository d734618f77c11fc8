//! Scripted sessions: configuration plus a gesture timeline, replayable without an engine.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use fetch_agent::{Animator, BehaviorState, Transition};
use fetch_core::{require_positive, ConfigError, FetchConfig, FetchError, Vec2, Vec3};
use fetch_throw::{BallPhase, PointerEvent, PointerHub, PRIMARY_POINTER};

use crate::{FetchScene, SimConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub fetch: FetchConfig,
    pub sim: SimConfig,

    /// Fixed step in seconds
    pub dt: f32,

    pub swipes: Vec<ScriptedSwipe>,
    pub taps: Vec<ScriptedTap>,
    pub camera_moves: Vec<ScriptedCameraMove>,
}

/// A press at `from`, released at `to` after `duration_ticks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedSwipe {
    pub at_tick: u64,
    pub from: Vec2,
    pub to: Vec2,
    pub duration_ticks: u64,
    #[serde(default)]
    pub pointer: u32,
}

/// A press and release on the next tick, at a fixed screen point or wherever the agent is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedTap {
    pub at_tick: u64,
    pub target: TapTarget,
}

/// Glide the camera to `position`, facing `look_at`, starting on `at_tick`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedCameraMove {
    pub at_tick: u64,
    pub position: Vec3,
    pub look_at: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TapTarget {
    Agent,
    Screen(Vec2),
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            sim: SimConfig::default(),
            dt: 1.0 / 60.0,
            swipes: vec![ScriptedSwipe {
                at_tick: 60,
                from: Vec2::new(540.0, 300.0),
                to: Vec2::new(560.0, 500.0),
                duration_ticks: 12,
                pointer: PRIMARY_POINTER,
            }],
            taps: vec![ScriptedTap {
                at_tick: 10,
                target: TapTarget::Agent,
            }],
            camera_moves: Vec::new(),
        }
    }
}

/// Outcome of [`Scenario::run`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub seconds: f32,
    pub throws: u32,
    pub completed_cycles: u32,
    pub head_looks: u32,
    pub ground_contacts: u32,
    pub wall_contacts: u32,
    /// Every scripted throw finished its fetch cycle before the tick limit.
    pub finished: bool,
    pub final_state: BehaviorState,
    pub ball_phase: BallPhase,
    pub agent_position: Vec3,
    pub ball_position: Vec3,
    pub camera_position: Vec3,
    pub transitions: Vec<Transition>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fetch.validate()?;
        self.sim.validate()?;
        require_positive("scenario.dt", self.dt)
    }

    /// Last tick on which the script publishes anything.
    pub fn last_scripted_tick(&self) -> u64 {
        let swipes = self.swipes.iter().map(|s| s.at_tick + s.duration_ticks);
        let taps = self.taps.iter().map(|t| t.at_tick + 1);
        let moves = self.camera_moves.iter().map(|m| m.at_tick);
        swipes.chain(taps).chain(moves).max().unwrap_or(0)
    }

    /// Pointer events due on `tick`, in script order.
    pub fn events_at(&self, tick: u64, scene: &FetchScene) -> Vec<PointerEvent> {
        let time = tick as f32 * self.dt;
        let mut events = Vec::new();

        for swipe in &self.swipes {
            if swipe.at_tick == tick {
                events.push(PointerEvent::down(swipe.pointer, swipe.from, time));
            }
            if swipe.at_tick + swipe.duration_ticks == tick {
                events.push(PointerEvent::up(swipe.pointer, swipe.to, time));
            }
        }

        for tap in &self.taps {
            if tap.at_tick != tick && tap.at_tick + 1 != tick {
                continue;
            }
            let Some(position) = tap_position(tap.target, scene) else {
                continue;
            };
            if tap.at_tick == tick {
                events.push(PointerEvent::down(PRIMARY_POINTER, position, time));
            } else {
                events.push(PointerEvent::up(PRIMARY_POINTER, position, time));
            }
        }

        events
    }

    /// Replay the script until every throw has been fetched back or `max_ticks` run out.
    pub fn run(
        &self,
        max_ticks: u64,
        animator: Option<Box<dyn Animator>>,
    ) -> Result<RunSummary, FetchError> {
        self.validate()?;

        let mut scene = FetchScene::new(self.fetch.clone(), &self.sim, self.dt)?;
        scene.set_animator(animator);
        let mut hub = PointerHub::new();
        scene.attach(&mut hub);

        let last_scripted = self.last_scripted_tick();
        let mut transitions = Vec::new();
        let (mut head_looks, mut ground_contacts, mut wall_contacts) = (0, 0, 0);
        let mut finished = false;
        let mut ticks = 0;

        while ticks < max_ticks {
            for event in self.events_at(ticks, &scene) {
                hub.publish(event);
            }
            for camera_move in self.camera_moves.iter().filter(|m| m.at_tick == ticks) {
                scene.move_camera_to(camera_move.position, camera_move.look_at);
            }
            let report = scene.tick(&mut hub)?;
            ticks += 1;

            head_looks += u32::from(report.head_look_started);
            for contact in &report.contacts {
                if contact.is_ground() {
                    ground_contacts += 1;
                } else {
                    wall_contacts += 1;
                }
            }
            transitions.extend(report.transitions);

            if report.tick >= last_scripted
                && scene.completed_cycles() >= scene.throws()
                && scene.agent_state() == BehaviorState::Idle
                && scene.ball_phase() == BallPhase::AtRest
                && !scene.camera().is_moving()
            {
                finished = true;
                break;
            }
        }
        scene.detach(&mut hub);

        let summary = RunSummary {
            ticks,
            seconds: ticks as f32 * self.dt,
            throws: scene.throws(),
            completed_cycles: scene.completed_cycles(),
            head_looks,
            ground_contacts,
            wall_contacts,
            finished,
            final_state: scene.agent_state(),
            ball_phase: scene.ball_phase(),
            agent_position: scene.agent().position(),
            ball_position: scene.ball().position(),
            camera_position: scene.camera().position(),
            transitions,
        };
        info!(
            ticks = summary.ticks,
            throws = summary.throws,
            cycles = summary.completed_cycles,
            finished = summary.finished,
            "scenario finished"
        );
        Ok(summary)
    }
}

fn tap_position(target: TapTarget, scene: &FetchScene) -> Option<Vec2> {
    match target {
        TapTarget::Screen(position) => Some(position),
        TapTarget::Agent => scene.project(scene.geometry().agent_center),
    }
}
