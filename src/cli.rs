//! Command-line arguments.

use crate::utils::Settings;
use std::path::PathBuf;

pub const HELP: &str = "\
Lunar Lander Extended - steer Blob across the moon and collect diamonds

Usage: lander-ext [options]

Options:
  --new            Ignore the saved state and start at the title screen
  --maze           Open on the maze view
  --level <N>      Maze level to load (1-10)
  --assets <DIR>   Directory holding level<N>.txt files
  --mute           Disable sound
  --version        Show version information
  --help           Show this help message

Keys:
  Space/Up   start, resume or jump      Left/Q, Right/W   steer
  N new game  X stop  P pause  R resume  1/2/3 difficulty  M maze  Esc quit";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub new_game: bool,
    pub maze: bool,
    pub level: Option<u32>,
    pub assets: Option<PathBuf>,
    pub mute: bool,
}

impl CliOptions {
    /// Command-line flags win over the settings file for this run.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(dir) = &self.assets {
            settings.assets_dir = dir.clone();
        }
        if let Some(level) = self.level {
            settings.maze_level = level;
        }
        if self.mute {
            settings.sound = false;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Run(CliOptions),
    Version,
    Help,
}

pub fn parse_args<I, S>(args: I) -> Result<CliCommand, String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut options = CliOptions::default();
    let mut args = args.into_iter().map(Into::into);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-v" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--new" => options.new_game = true,
            "--maze" => options.maze = true,
            "--mute" => options.mute = true,
            "--assets" => {
                let dir = args.next().ok_or("--assets needs a directory")?;
                options.assets = Some(PathBuf::from(dir));
            }
            "--level" => {
                let value = args.next().ok_or("--level needs a number")?;
                let level = value
                    .parse()
                    .map_err(|_| format!("invalid level: {value}"))?;
                options.level = Some(level);
            }
            other => return Err(format!("Unknown option: {other}")),
        }
    }
    Ok(CliCommand::Run(options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_runs() {
        let empty: [&str; 0] = [];
        assert_eq!(
            parse_args(empty),
            Ok(CliCommand::Run(CliOptions::default()))
        );
    }

    #[test]
    fn test_version_and_help() {
        assert_eq!(parse_args(["--version"]), Ok(CliCommand::Version));
        assert_eq!(parse_args(["-h"]), Ok(CliCommand::Help));
    }

    #[test]
    fn test_options() {
        let cmd = parse_args(["--new", "--maze", "--assets", "/tmp/levels", "--level", "3"])
            .expect("valid args");
        let CliCommand::Run(options) = cmd else {
            panic!("expected run");
        };
        assert!(options.new_game);
        assert!(options.maze);
        assert_eq!(options.assets, Some(PathBuf::from("/tmp/levels")));
        assert_eq!(options.level, Some(3));
    }

    #[test]
    fn test_errors() {
        assert!(parse_args(["--assets"]).is_err());
        assert!(parse_args(["--level", "two"]).is_err());
        assert!(parse_args(["--bogus"]).unwrap_err().contains("--bogus"));
    }

    #[test]
    fn test_apply_overrides_settings() {
        let mut settings = Settings::default();
        let options = CliOptions {
            mute: true,
            level: Some(2),
            assets: Some(PathBuf::from("levels")),
            ..CliOptions::default()
        };
        options.apply(&mut settings);
        assert!(!settings.sound);
        assert_eq!(settings.maze_level, 2);
        assert_eq!(settings.assets_dir, PathBuf::from("levels"));
    }
}
