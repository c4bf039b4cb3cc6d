//! Data-driven encounter configuration.
//!
//! An encounter (boss fight) is authored as data: phases, their fire
//! options, and the emitters each option drives. Configurations are
//! validated when loaded — a bad configuration prevents the encounter from
//! starting instead of failing mid-phase.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::{AimMode, BulletType, DirectionChange, Pattern, RotationMode};

/// Complete configuration for one boss encounter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterConfig {
    /// Display name of the boss.
    pub name: String,
    /// Health refilled at the start of every life.
    pub max_health: i32,
    /// Extra lives beyond the first health bar. Defaults to one per
    /// additional phase.
    #[serde(default)]
    pub lives: Option<u32>,
    /// Initial boss position; emitter offsets are relative to it.
    #[serde(default)]
    pub boss_position: Vec2,
    /// Attack phases (spell cards), one invoked at a time.
    pub phases: Vec<PhaseConfig>,
    /// Effect zones that reconfigure trigger bullets crossing them.
    #[serde(default)]
    pub zones: Vec<ZoneConfig>,
}

/// One attack phase: a named set of fire options running concurrently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseConfig {
    pub name: String,
    /// Time budget in seconds; expiring forces the transition damage would
    /// have caused, with a score penalty.
    #[serde(default)]
    pub duration_secs: Option<f32>,
    pub options: Vec<OptionConfig>,
}

/// One fire option: a set of emitters sharing a fire loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionConfig {
    /// Seconds between volleys.
    pub fire_interval_secs: f32,
    /// Seconds before the first volley.
    #[serde(default)]
    pub activation_delay_secs: f32,
    /// Scale this option toward its deltas as the boss's health drops.
    #[serde(default)]
    pub scale_by_health: bool,
    /// Fire-interval delta reached at zero health (negative = faster).
    #[serde(default)]
    pub fire_interval_delta: f32,
    /// Bullet-speed delta reached at zero health.
    #[serde(default)]
    pub bullet_speed_delta: f32,
    /// Bullet-acceleration delta reached at zero health.
    #[serde(default)]
    pub bullet_acceleration_delta: f32,
    pub emitters: Vec<EmitterConfig>,
}

/// One pattern emitter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmitterConfig {
    pub bullet_type: BulletType,
    /// Position relative to the boss.
    #[serde(default)]
    pub offset: Vec2,
    /// Launch speed (units/s).
    pub speed: f32,
    /// Launch acceleration along the heading (units/s²).
    #[serde(default)]
    pub acceleration: f32,
    /// Damage dealt to the player on impact.
    #[serde(default = "default_damage")]
    pub damage: i32,
    #[serde(default)]
    pub rotation: RotationMode,
    pub aim: AimMode,
    /// Degrees per second added to a fixed aim angle (ignored for lock-on).
    #[serde(default)]
    pub aim_rotation_speed: f32,
    pub pattern: Pattern,
    /// Turn each volley into a timed burst of volleys.
    #[serde(default)]
    pub batch: Option<BatchFire>,
    /// Constant downward pull on the bullets.
    #[serde(default)]
    pub gravity: bool,
    /// Bullet lifetime in seconds; unset bullets live until out of bounds.
    #[serde(default)]
    pub lifespan_secs: Option<f32>,
    /// Zone-trigger effects carried by the bullets.
    #[serde(default)]
    pub trigger: Option<TriggerConfig>,
}

fn default_damage() -> i32 {
    1
}

/// Burst-fire parameters: `count` volleys, `cooldown_secs` apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchFire {
    pub count: u32,
    pub cooldown_secs: f32,
}

/// Axis-aligned effect zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneConfig {
    pub min: Vec2,
    pub max: Vec2,
}

/// Enter/exit effects for trigger bullets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Apply the enter effect at most once per checkout.
    #[serde(default = "default_true")]
    pub one_shot_enter: bool,
    #[serde(default)]
    pub on_enter: Option<TriggerEffect>,
    #[serde(default)]
    pub on_exit: Option<TriggerEffect>,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            one_shot_enter: true,
            on_enter: None,
            on_exit: None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// What a zone crossing does to a bullet. Unset fields are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TriggerEffect {
    /// Reset the along-heading acceleration.
    #[serde(default)]
    pub acceleration: Option<f32>,
    /// Reset the spin speed (switches the bullet to constant spin).
    #[serde(default)]
    pub spin_speed: Option<f32>,
    /// Reset the spin acceleration (switches the bullet to constant spin).
    #[serde(default)]
    pub spin_acceleration: Option<f32>,
    /// Reset the travel speed, keeping the heading.
    #[serde(default)]
    pub speed: Option<f32>,
    /// Change the heading, keeping the speed unless `speed` is also set.
    #[serde(default)]
    pub direction: Option<DirectionChange>,
}

impl EncounterConfig {
    /// Validate the configuration. Called before an encounter starts; a
    /// failure here is an authoring error, not a runtime condition.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_health <= 0 {
            return Err(format!(
                "encounter '{}': max_health must be positive, got {}",
                self.name, self.max_health
            ));
        }
        if self.phases.is_empty() {
            return Err(format!("encounter '{}': no phases configured", self.name));
        }
        for phase in &self.phases {
            phase.validate(&self.name)?;
        }
        for (i, zone) in self.zones.iter().enumerate() {
            if zone.min.x >= zone.max.x || zone.min.y >= zone.max.y {
                return Err(format!(
                    "encounter '{}': zone {} has an empty extent",
                    self.name, i
                ));
            }
        }
        Ok(())
    }

    /// Every bullet type any emitter in this encounter fires.
    pub fn bullet_types(&self) -> Vec<BulletType> {
        let mut types = Vec::new();
        for phase in &self.phases {
            for option in &phase.options {
                for emitter in &option.emitters {
                    if !types.contains(&emitter.bullet_type) {
                        types.push(emitter.bullet_type);
                    }
                }
            }
        }
        types
    }
}

impl PhaseConfig {
    fn validate(&self, encounter: &str) -> Result<(), String> {
        let ctx = format!("encounter '{}', phase '{}'", encounter, self.name);
        if self.options.is_empty() {
            return Err(format!("{ctx}: no fire options configured"));
        }
        if let Some(duration) = self.duration_secs {
            if duration <= 0.0 {
                return Err(format!("{ctx}: duration must be positive, got {duration}"));
            }
        }
        for option in &self.options {
            if option.fire_interval_secs <= 0.0 {
                return Err(format!(
                    "{ctx}: fire interval must be positive, got {}",
                    option.fire_interval_secs
                ));
            }
            if option.activation_delay_secs < 0.0 {
                return Err(format!(
                    "{ctx}: activation delay must not be negative, got {}",
                    option.activation_delay_secs
                ));
            }
            if option.emitters.is_empty() {
                return Err(format!("{ctx}: fire option has no emitters"));
            }
            for emitter in &option.emitters {
                validate_emitter(emitter, &ctx)?;
            }
        }
        Ok(())
    }
}

fn validate_emitter(emitter: &EmitterConfig, ctx: &str) -> Result<(), String> {
    if emitter.speed <= 0.0 {
        return Err(format!(
            "{ctx}: emitter speed must be positive, got {}",
            emitter.speed
        ));
    }
    match emitter.pattern {
        Pattern::Radial { count } | Pattern::Arc { count, .. } if count == 0 => {
            return Err(format!("{ctx}: pattern bullet count must be positive"));
        }
        Pattern::Arc { wideness_deg, .. } if !(0.0..=360.0).contains(&wideness_deg) => {
            return Err(format!(
                "{ctx}: arc wideness must be within [0, 360], got {wideness_deg}"
            ));
        }
        Pattern::Spray { spread_deg } if !(0.0..=360.0).contains(&spread_deg) => {
            return Err(format!(
                "{ctx}: spray spread must be within [0, 360], got {spread_deg}"
            ));
        }
        _ => {}
    }
    if let Some(batch) = emitter.batch {
        if batch.count == 0 {
            return Err(format!("{ctx}: batch count must be positive"));
        }
        if batch.cooldown_secs < 0.0 {
            return Err(format!(
                "{ctx}: batch cooldown must not be negative, got {}",
                batch.cooldown_secs
            ));
        }
    }
    if let Some(lifespan) = emitter.lifespan_secs {
        if lifespan <= 0.0 {
            return Err(format!(
                "{ctx}: bullet lifespan must be positive, got {lifespan}"
            ));
        }
    }
    Ok(())
}

/// Load and validate an encounter configuration from a JSON file.
pub fn load_from_file(path: &Path) -> Result<EncounterConfig, String> {
    let json =
        fs::read_to_string(path).map_err(|e| format!("Failed to read encounter file: {e}"))?;
    let config: EncounterConfig =
        serde_json::from_str(&json).map_err(|e| format!("Failed to parse encounter file: {e}"))?;
    config.validate()?;
    Ok(config)
}
