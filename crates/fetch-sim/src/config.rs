use serde::{Deserialize, Serialize};

use fetch_core::{require_finite, require_positive, require_range, ConfigError, Vec2, Vec3};

/// Simulation tuning: world bounds, ball body and camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub gravity: Vec3,

    /// Height of the ground plane
    pub ground_height: f32,

    /// Walls sit at `±x` and `±z` of these extents around the origin
    pub room_half_extents: Vec3,

    pub ball_mass: f32,
    pub ball_radius: f32,

    /// Fraction of normal speed kept after a bounce
    pub restitution: f32,

    /// Horizontal speed lost per second while rolling
    pub friction: f32,

    /// Below this speed a grounded ball is put to sleep
    pub sleep_speed: f32,

    /// Radius of the sphere that stands in for the agent in ray queries
    pub agent_radius: f32,

    pub camera: CameraConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            ground_height: 0.0,
            room_half_extents: Vec3::new(5.0, 5.0, 10.0),
            ball_mass: 1.0,
            ball_radius: 0.1,
            restitution: 0.4,
            friction: 2.0,
            sleep_speed: 0.05,
            agent_radius: 0.5,
            camera: CameraConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_finite("sim.gravity", self.gravity)?;
        if !self.ground_height.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "sim.ground_height",
            });
        }
        require_positive("sim.room_half_extents.x", self.room_half_extents.x)?;
        require_positive("sim.room_half_extents.z", self.room_half_extents.z)?;
        require_positive("sim.ball_mass", self.ball_mass)?;
        require_positive("sim.ball_radius", self.ball_radius)?;
        require_range("sim.restitution", self.restitution, 0.0, 1.0)?;
        require_range("sim.friction", self.friction, 0.0, f32::MAX)?;
        require_range("sim.sleep_speed", self.sleep_speed, 0.0, f32::MAX)?;
        require_positive("sim.agent_radius", self.agent_radius)?;
        self.camera.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,

    /// Point the camera faces. Coinciding with `position` leaves it facing `+z`.
    pub look_at: Vec3,

    /// Vertical field of view
    pub fov_degrees: f32,

    /// Screen size in pixels
    pub viewport: Vec2,

    /// Seconds for a scripted camera glide
    pub move_duration: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.2, -1.5),
            look_at: Vec3::new(0.0, 0.4, 4.0),
            fov_degrees: 60.0,
            viewport: Vec2::new(1080.0, 1920.0),
            move_duration: 0.4,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_finite("camera.position", self.position)?;
        require_finite("camera.look_at", self.look_at)?;
        require_range("camera.fov_degrees", self.fov_degrees, 1.0, 179.0)?;
        require_positive("camera.viewport.x", self.viewport.x)?;
        require_positive("camera.viewport.y", self.viewport.y)?;
        require_positive("camera.move_duration", self.move_duration)?;
        Ok(())
    }
}
