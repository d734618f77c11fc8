use fetch_core::{
    look_rotation, move_towards, require_positive, AgentConfig, ConfigError, Quat, Vec3,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionStep {
    pub position: Vec3,
    /// Judged on the distance before this step moved.
    pub arrived: bool,
    /// Unnormalized `target - position`, before the step.
    pub direction: Vec3,
    pub distance: f32,
}

/// Straight-line approach with speed proportional to the remaining distance, capped at
/// `max_speed`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionStepper {
    acceleration: f32,
    max_speed: f32,
    rotation_speed: f32,
}

impl MotionStepper {
    pub fn new(acceleration: f32, max_speed: f32, rotation_speed: f32) -> Result<Self, ConfigError> {
        require_positive("agent.acceleration", acceleration)?;
        require_positive("agent.max_speed", max_speed)?;
        require_positive("agent.rotation_speed", rotation_speed)?;
        Ok(Self {
            acceleration,
            max_speed,
            rotation_speed,
        })
    }

    pub fn from_config(config: &AgentConfig) -> Result<Self, ConfigError> {
        Self::new(config.acceleration, config.max_speed, config.rotation_speed)
    }

    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    pub fn speed_at(&self, distance: f32) -> f32 {
        (self.acceleration * distance).clamp(0.0, self.max_speed)
    }

    pub fn step(&self, position: Vec3, target: Vec3, threshold: f32, dt: f32) -> MotionStep {
        let direction = target - position;
        let distance = direction.length();
        let travel = self.speed_at(distance) * dt.max(0.0);

        MotionStep {
            position: move_towards(position, target, travel),
            arrived: distance <= threshold,
            direction,
            distance,
        }
    }

    /// Turn `rotation` toward facing `direction` by a `rotation_speed * dt` fraction of the
    /// remaining angle. A zero direction leaves it unchanged.
    pub fn face(&self, rotation: Quat, direction: Vec3, dt: f32) -> Quat {
        let Some(target) = look_rotation(direction) else {
            return rotation;
        };
        let t = (self.rotation_speed * dt.max(0.0)).clamp(0.0, 1.0);
        rotation.slerp(target, t)
    }
}
