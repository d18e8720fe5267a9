//! Page configuration, read from an embedded JSON file over built-in defaults.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Configuration compiled into the bundle.
pub const EMBEDDED_CONFIG: &str = include_str!("../public/constellation.json");

/// Page settings. Every field has a default.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
	/// Overlay heading.
	pub title: String,
	/// Overlay subheading.
	pub subtitle: String,
	/// Time between reveal steps. Never zero.
	pub reveal_interval: Duration,
	/// Background stars drawn behind the graph.
	pub star_count: usize,
	/// Canvas fill color.
	pub background: String,
	/// Force simulation settings.
	pub physics: Physics,
}

/// Opaque parameter block for the force simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(missing_docs)]
pub struct Physics {
	pub force_charge: f32,
	pub force_spring: f32,
	pub force_max: f32,
	pub node_speed: f32,
	pub damping_factor: f32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
	title: Option<String>,
	subtitle: Option<String>,
	reveal_interval_ms: Option<u64>,
	star_count: Option<usize>,
	background: Option<String>,
	physics: Option<RawPhysics>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPhysics {
	force_charge: Option<f32>,
	force_spring: Option<f32>,
	force_max: Option<f32>,
	node_speed: Option<f32>,
	damping_factor: Option<f32>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			title: "Academic Constellation".into(),
			subtitle: "A scholarly career, one paper at a time".into(),
			reveal_interval: Duration::from_millis(1000),
			star_count: 300,
			background: "#0a0a2a".into(),
			physics: Physics::default(),
		}
	}
}

impl Default for Physics {
	fn default() -> Self {
		Self {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		}
	}
}

impl Config {
	/// Parse `json`, filling omitted fields from [`Config::default`].
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		let raw: RawConfig = serde_json::from_str(json)?;
		let defaults = Self::default();

		let reveal_interval = match raw.reveal_interval_ms {
			Some(0) => {
				return Err(ConfigError::Invalid {
					field: "reveal_interval_ms",
					reason: "must be greater than zero".into(),
				});
			}
			Some(ms) => Duration::from_millis(ms),
			None => defaults.reveal_interval,
		};

		let physics = match raw.physics {
			Some(p) => Physics {
				force_charge: p.force_charge.unwrap_or(defaults.physics.force_charge),
				force_spring: p.force_spring.unwrap_or(defaults.physics.force_spring),
				force_max: p.force_max.unwrap_or(defaults.physics.force_max),
				node_speed: p.node_speed.unwrap_or(defaults.physics.node_speed),
				damping_factor: p.damping_factor.unwrap_or(defaults.physics.damping_factor),
			},
			None => defaults.physics,
		};

		Ok(Self {
			title: raw.title.unwrap_or(defaults.title),
			subtitle: raw.subtitle.unwrap_or(defaults.subtitle),
			reveal_interval,
			star_count: raw.star_count.unwrap_or(defaults.star_count),
			background: raw.background.unwrap_or(defaults.background),
			physics,
		})
	}
}
