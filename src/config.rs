use crate::{render::StrokeStyle, sequence::StepMode};
use serde::{Deserialize, Deserializer, de::Error as _};
use std::{fmt, fs, io, path::Path, str::FromStr, time::Duration};

/// The whole program configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    /// How the chain steps.
    pub(crate) sequence: SequenceConfig,

    /// How the chain is drawn.
    pub(crate) display: DisplayConfig,
}

impl Config {
    /// Load the config from a YAML file.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => return Err(ConfigError::Io(path.display().to_string(), e)),
        };
        let config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load the config from a YAML file, falling back to the defaults if the file doesn't exist.
    pub(crate) fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() { Self::load(path) } else { Ok(Self::default()) }
    }

    /// Make sure every value is usable.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let sequence = &self.sequence;
        if sequence.nodes == 0 {
            return Err(ConfigError::EmptyChain);
        }
        if sequence.tick_period_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if !(sequence.increment > 0.0 && sequence.increment <= 1.0) {
            return Err(ConfigError::InvalidIncrement(sequence.increment));
        }
        if !(sequence.completion_threshold > 0.0 && sequence.completion_threshold <= 1.0) {
            return Err(ConfigError::InvalidThreshold(sequence.completion_threshold));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SequenceConfig {
    /// The number of nodes in the chain.
    pub(crate) nodes: usize,

    /// The time between ticks, in milliseconds.
    pub(crate) tick_period_ms: u64,

    /// How much a node's scale moves on every tick.
    pub(crate) increment: f64,

    /// How far from its starting point a node's scale must get for its step to complete.
    pub(crate) completion_threshold: f64,

    /// Whether an activation runs a single node step or a whole sweep.
    pub(crate) mode: StepMode,
}

impl SequenceConfig {
    pub(crate) fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self { nodes: 5, tick_period_ms: 50, increment: 0.05, completion_threshold: 1.0, mode: StepMode::default() }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct DisplayConfig {
    /// The background color.
    pub(crate) background: RgbColor,

    /// How bracket strokes are colored.
    pub(crate) stroke: StrokeStyle,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { background: RgbColor::new(0xbd, 0xbd, 0xbd), stroke: StrokeStyle::default() }
    }
}

/// A 24 bit color, written as a hex string like `BDBDBD` or `#BDBDBD`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RgbColor {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl RgbColor {
    pub(crate) const WHITE: Self = Self::new(255, 255, 255);

    pub(crate) const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for RgbColor {
    type Err = ConfigError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        let bytes = hex::decode(digits).map_err(|_| ConfigError::InvalidColor(input.into()))?;
        match bytes.as_slice() {
            [r, g, b] => Ok(Self::new(*r, *g, *b)),
            _ => Err(ConfigError::InvalidColor(input.into())),
        }
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode([self.r, self.g, self.b]))
    }
}

impl<'de> Deserialize<'de> for RgbColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let input = String::deserialize(deserializer)?;
        input.parse().map_err(D::Error::custom)
    }
}

/// An error loading or validating the configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("reading config file '{0}': {1}")]
    Io(String, io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("the chain needs at least one node")]
    EmptyChain,

    #[error("the tick period must be greater than zero")]
    ZeroTickPeriod,

    #[error("increment must be in (0, 1], got {0}")]
    InvalidIncrement(f64),

    #[error("completion threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("invalid color '{0}'")]
    InvalidColor(String),
}
