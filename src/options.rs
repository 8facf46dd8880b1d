//! Launch options from environment variables and command-line flags.
//!
//! Environment variables are read first and command-line flags override them:
//!
//! | Env | Flag | Default |
//! |-----|------|---------|
//! | `SNAKE_DIFFICULTY` | `--difficulty <easy\|medium\|hard>` | medium |
//! | `SNAKE_SEED` | `--seed <u32>` | derived from the system clock |
//! | | `--cols <n>` / `--rows <n>` | fitted to the terminal, at most 48x36 |
//! | `SNAKE_LOG_PATH` | `--log <path>` / `--no-log` | `tui-snake.log` |
//!
//! A malformed environment value is reported as a warning and ignored; a
//! malformed flag is an error.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, bail, Context, Result};

use crate::core::{GameConfig, Playfield};
use crate::types::{DifficultyLevel, DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS};

pub const ENV_DIFFICULTY: &str = "SNAKE_DIFFICULTY";
pub const ENV_SEED: &str = "SNAKE_SEED";
pub const ENV_LOG_PATH: &str = "SNAKE_LOG_PATH";

pub const DEFAULT_LOG_PATH: &str = "tui-snake.log";

pub const USAGE: &str = "\
usage: tui-snake [options]

  --difficulty <easy|medium|hard>   starting difficulty (env SNAKE_DIFFICULTY)
  --seed <n>                        spawn RNG seed (env SNAKE_SEED)
  --cols <n>, --rows <n>            playfield size in cells
  --log <path>                      log file (env SNAKE_LOG_PATH)
  --no-log                          disable the log file
  -h, --help                        show this help

keys: arrows/hjkl steer, b bomb, p pause, space start, d difficulty,
      r restart, m/esc menu, q quit, ctrl-c exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOptions {
    pub difficulty: DifficultyLevel,
    pub seed: Option<u32>,
    pub cols: Option<u16>,
    pub rows: Option<u16>,
    /// `None` disables file logging
    pub log_path: Option<PathBuf>,
    pub help: bool,
    /// Problems with environment values, logged once the logger is up
    pub warnings: Vec<String>,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            difficulty: DifficultyLevel::default(),
            seed: None,
            cols: None,
            rows: None,
            log_path: Some(PathBuf::from(DEFAULT_LOG_PATH)),
            help: false,
            warnings: Vec::new(),
        }
    }
}

impl LaunchOptions {
    /// Read the process environment and `std::env::args`.
    pub fn from_process() -> Result<Self> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::parse(|key| std::env::var(key).ok(), &args)
    }

    /// Parse from an environment lookup and the arguments after the program name.
    pub fn parse(env: impl Fn(&str) -> Option<String>, args: &[String]) -> Result<Self> {
        let mut options = Self::default();
        options.apply_env(env);
        options.apply_args(args)?;
        Ok(options)
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(v) = env(ENV_DIFFICULTY) {
            match DifficultyLevel::from_str(&v) {
                Some(level) => self.difficulty = level,
                None => self
                    .warnings
                    .push(format!("ignoring {}={:?}: unknown difficulty", ENV_DIFFICULTY, v)),
            }
        }
        if let Some(v) = env(ENV_SEED) {
            match v.trim().parse::<u32>() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => self
                    .warnings
                    .push(format!("ignoring {}={:?}: not a u32", ENV_SEED, v)),
            }
        }
        if let Some(v) = env(ENV_LOG_PATH) {
            if !v.is_empty() {
                self.log_path = Some(PathBuf::from(v));
            }
        }
    }

    fn apply_args(&mut self, args: &[String]) -> Result<()> {
        let mut it = args.iter();
        while let Some(arg) = it.next() {
            let mut value = |flag: &str| {
                it.next()
                    .ok_or_else(|| anyhow!("missing value for {}", flag))
            };
            match arg.as_str() {
                "--difficulty" => {
                    let v = value("--difficulty")?;
                    self.difficulty = DifficultyLevel::from_str(v)
                        .ok_or_else(|| anyhow!("invalid --difficulty value: {}", v))?;
                }
                "--seed" => {
                    let v = value("--seed")?;
                    self.seed = Some(
                        v.parse()
                            .with_context(|| format!("invalid --seed value: {}", v))?,
                    );
                }
                "--cols" => {
                    let v = value("--cols")?;
                    self.cols = Some(
                        v.parse()
                            .with_context(|| format!("invalid --cols value: {}", v))?,
                    );
                }
                "--rows" => {
                    let v = value("--rows")?;
                    self.rows = Some(
                        v.parse()
                            .with_context(|| format!("invalid --rows value: {}", v))?,
                    );
                }
                "--log" => {
                    let v = value("--log")?;
                    self.log_path = Some(PathBuf::from(v));
                }
                "--no-log" => self.log_path = None,
                "-h" | "--help" => self.help = true,
                other => bail!("unknown argument: {}", other),
            }
        }
        Ok(())
    }

    /// Explicit `--cols/--rows` win over the size fitted to the terminal.
    ///
    /// Either way the field is capped at the default 48x36 grid.
    pub fn playfield(&self, fitted: (u16, u16)) -> Playfield {
        let cols = self.cols.unwrap_or(fitted.0).min(DEFAULT_GRID_COLS);
        let rows = self.rows.unwrap_or(fitted.1).min(DEFAULT_GRID_ROWS);
        Playfield::new(cols, rows)
    }

    pub fn game_config(&self, fitted: (u16, u16)) -> GameConfig {
        GameConfig::default()
            .with_playfield(self.playfield(fitted))
            .with_difficulty(self.difficulty)
            .with_seed(self.seed.unwrap_or_else(clock_seed))
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let options = LaunchOptions::parse(no_env, &[]).unwrap();
        assert_eq!(options, LaunchOptions::default());
        assert_eq!(options.log_path, Some(PathBuf::from(DEFAULT_LOG_PATH)));
    }

    #[test]
    fn test_flags_override_env() {
        let env = |key: &str| match key {
            ENV_DIFFICULTY => Some("easy".to_string()),
            ENV_SEED => Some("5".to_string()),
            _ => None,
        };
        let options =
            LaunchOptions::parse(env, &args(&["--difficulty", "hard", "--no-log"])).unwrap();
        assert_eq!(options.difficulty, DifficultyLevel::Hard);
        assert_eq!(options.seed, Some(5));
        assert_eq!(options.log_path, None);
    }

    #[test]
    fn test_bad_env_is_a_warning() {
        let env = |key: &str| (key == ENV_SEED).then(|| "many".to_string());
        let options = LaunchOptions::parse(env, &[]).unwrap();
        assert_eq!(options.seed, None);
        assert_eq!(options.warnings.len(), 1);
    }

    #[test]
    fn test_bad_flags_are_errors() {
        assert!(LaunchOptions::parse(no_env, &args(&["--seed"])).is_err());
        assert!(LaunchOptions::parse(no_env, &args(&["--seed", "x"])).is_err());
        assert!(LaunchOptions::parse(no_env, &args(&["--difficulty", "nightmare"])).is_err());
        assert!(LaunchOptions::parse(no_env, &args(&["--turbo"])).is_err());
    }

    #[test]
    fn test_playfield_prefers_explicit_size() {
        let options = LaunchOptions::parse(no_env, &args(&["--cols", "20"])).unwrap();
        let pf = options.playfield((30, 25));
        assert_eq!((pf.cols, pf.rows), (20, 25));

        let config = options.game_config((30, 25));
        assert_eq!(config.difficulty, DifficultyLevel::Medium);

        let options =
            LaunchOptions::parse(no_env, &args(&["--cols", "40000", "--rows", "65535"])).unwrap();
        let pf = options.playfield((30, 25));
        assert_eq!((pf.cols, pf.rows), (DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS));
        let pf = LaunchOptions::default().playfield((500, 500));
        assert_eq!((pf.cols, pf.rows), (DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS));
    }
}
