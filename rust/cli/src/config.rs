use holdem_ai::config::EquityConfig;
use holdem_engine::game::TableConfig;
use holdem_engine::rules::{MAX_SEATS, MIN_SEATS, STARTING_CHIPS};
use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

/// Highest accepted blind level; stakes double per level.
pub const MAX_BET_LEVEL: u32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub players: usize,
    pub starting_stack: u32,
    pub bet_level: u32,
    pub ai_trials: u32,
    pub solver_trials: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub players: ValueSource,
    pub starting_stack: ValueSource,
    pub bet_level: ValueSource,
    pub ai_trials: ValueSource,
    pub solver_trials: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            players: ValueSource::Default,
            starting_stack: ValueSource::Default,
            bet_level: ValueSource::Default,
            ai_trials: ValueSource::Default,
            solver_trials: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        let equity = EquityConfig::default();
        Self {
            seed: None,
            players: 6,
            starting_stack: STARTING_CHIPS,
            bet_level: 0,
            ai_trials: equity.ai_trials,
            solver_trials: equity.solver_trials,
        }
    }
}

impl Config {
    /// An all-AI table with the configured size, stack and stakes.
    pub fn table(&self, players: usize) -> TableConfig {
        TableConfig {
            player_seat: None,
            starting_chips: self.starting_stack,
            bet_level: self.bet_level,
            ..TableConfig::with_players(players)
        }
    }

    pub fn equity(&self) -> EquityConfig {
        EquityConfig {
            ai_trials: self.ai_trials,
            solver_trials: self.solver_trials,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{0}")]
    Invalid(String),
}

/// Defaults, then the TOML file named by `HOLDEM_CONFIG`, then `HOLDEM_*`
/// environment overrides.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("HOLDEM_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.players {
            cfg.players = v;
            sources.players = ValueSource::File;
        }
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = f.bet_level {
            cfg.bet_level = v;
            sources.bet_level = ValueSource::File;
        }
        if let Some(v) = f.ai_trials {
            cfg.ai_trials = v;
            sources.ai_trials = ValueSource::File;
        }
        if let Some(v) = f.solver_trials {
            cfg.solver_trials = v;
            sources.solver_trials = ValueSource::File;
        }
    }

    if let Some(v) = env_value("HOLDEM_SEED", "seed")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_PLAYERS", "players")? {
        cfg.players = v;
        sources.players = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_STACK", "stack")? {
        cfg.starting_stack = v;
        sources.starting_stack = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_BET_LEVEL", "bet level")? {
        cfg.bet_level = v;
        sources.bet_level = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_AI_TRIALS", "AI trials")? {
        cfg.ai_trials = v;
        sources.ai_trials = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_SOLVER_TRIALS", "solver trials")? {
        cfg.solver_trials = v;
        sources.solver_trials = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn env_value<T: std::str::FromStr>(key: &str, what: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {what}: {v}"))),
        _ => Ok(None),
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    players: Option<usize>,
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    bet_level: Option<u32>,
    #[serde(default)]
    ai_trials: Option<u32>,
    #[serde(default)]
    solver_trials: Option<u32>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !(MIN_SEATS..=MAX_SEATS).contains(&cfg.players) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: players must be {MIN_SEATS}..={MAX_SEATS}"
        )));
    }
    if cfg.starting_stack == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_stack must be >0".into(),
        ));
    }
    if cfg.bet_level > MAX_BET_LEVEL {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: bet_level must be <={MAX_BET_LEVEL}"
        )));
    }
    if cfg.ai_trials == 0 || cfg.solver_trials == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: trial counts must be >0".into(),
        ));
    }
    Ok(())
}
