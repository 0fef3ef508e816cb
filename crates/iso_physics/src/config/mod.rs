//! Configuration system
//!
//! File-backed configuration for the physics world: gravity, world bounds
//! and the global world-bounds collision toggles. TOML and RON formats are
//! supported.

pub use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;
use crate::physics::{BoundingCube, DirectionFlags, IsoWorld};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Physics world configuration
///
/// Describes the world an [`IsoWorld`] integrator is built from: gravity,
/// the world-bounds box and which bound directions bodies collide with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// World gravity per axis, in units per second squared
    pub gravity: [f32; 3],
    /// Back corner of the world bounds
    pub bounds_origin: [f32; 3],
    /// World bounds extents along +X, +Y and +Z
    pub bounds_size: [f32; 3],
    /// Collide with the upper Z bound
    pub collide_up: bool,
    /// Collide with the lower Z bound
    pub collide_down: bool,
    /// Collide with the lower X bound
    pub collide_back_x: bool,
    /// Collide with the upper X bound
    pub collide_front_x: bool,
    /// Collide with the lower Y bound
    pub collide_back_y: bool,
    /// Collide with the upper Y bound
    pub collide_front_y: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, 0.0, 0.0],
            bounds_origin: [0.0, 0.0, 0.0],
            bounds_size: [0.0, 0.0, 0.0],
            collide_up: true,
            collide_down: true,
            collide_back_x: true,
            collide_front_x: true,
            collide_back_y: true,
            collide_front_y: true,
        }
    }
}

impl Config for PhysicsConfig {}

impl PhysicsConfig {
    /// Build the world integrator this configuration describes
    #[must_use]
    pub fn into_world(self) -> IsoWorld {
        let mut check_collision = DirectionFlags::empty();
        check_collision.set(DirectionFlags::UP, self.collide_up);
        check_collision.set(DirectionFlags::DOWN, self.collide_down);
        check_collision.set(DirectionFlags::BACK_X, self.collide_back_x);
        check_collision.set(DirectionFlags::FRONT_X, self.collide_front_x);
        check_collision.set(DirectionFlags::BACK_Y, self.collide_back_y);
        check_collision.set(DirectionFlags::FRONT_Y, self.collide_front_y);

        IsoWorld {
            gravity: Vec3::new(self.gravity[0], self.gravity[1], self.gravity[2]),
            bounds: BoundingCube::new(
                self.bounds_origin[0],
                self.bounds_origin[1],
                self.bounds_origin[2],
                self.bounds_size[0],
                self.bounds_size[1],
                self.bounds_size[2],
            ),
            check_collision,
        }
    }
}
