//! Common types and utilities shared across modules

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::errors::ToolmanError;

/// Manifest file name used when `-f` is not given
pub const DEFAULT_MANIFEST: &str = "tools.go";

/// Long flags that may be spelled Go-style with a single dash (`-init`)
const GO_STYLE_FLAGS: &[&str] = &["init", "add", "quiet", "verbose", "help", "version"];

/// Global CLI options
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    #[arg(short, long, help = "Only print errors")]
    pub quiet: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase verbosity (-v for debug, -vv for trace)")]
    pub verbose: u8,
}

impl GlobalOpts {
    /// Get the effective verbosity level
    /// - 0: progress and errors
    /// - 1: debug (-v)
    /// - 2: trace (-vv)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

/// What a single toolman invocation does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Create a fresh tools file
    Init,
    /// Track a tool and install it
    Add(String),
    /// Install every tracked tool
    Install,
}

/// Resolved configuration for one run, passed explicitly down the call chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub manifest_path: PathBuf,
    pub mode: Mode,
}

impl RunConfig {
    /// Resolve flags into a run configuration
    ///
    /// Precedence is init > add > install. An empty `-add` value selects the
    /// install mode.
    pub fn from_flags(
        file: Option<PathBuf>,
        init: bool,
        add: Option<String>,
    ) -> Result<Self, ToolmanError> {
        let manifest_path = match file {
            Some(path) => path,
            None => std::env::current_dir()
                .map_err(ToolmanError::CurrentDir)?
                .join(DEFAULT_MANIFEST),
        };

        let mode = if init {
            Mode::Init
        } else {
            match add {
                Some(tool) if !tool.is_empty() => Mode::Add(tool),
                _ => Mode::Install,
            }
        };

        Ok(RunConfig {
            manifest_path,
            mode,
        })
    }
}

/// clap value parser for `-f`
pub fn parse_manifest_path(value: &str) -> Result<PathBuf, String> {
    if value.is_empty() {
        return Err("please don't specify an empty pathname".to_string());
    }
    Ok(PathBuf::from(clean_path(value)))
}

/// Lexically clean a slash-separated path
///
/// Repeated separators and `.` segments are dropped, `..` removes the
/// preceding segment where there is one. A rooted path never climbs above
/// `/`; an empty result is `.`.
pub fn clean_path(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{}", joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Rewrite Go-style single-dash long flags (`-init`, `-add=x`) to `--init`, `--add=x`
pub fn normalize_go_style_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut normalized = Vec::new();
    let mut passthrough = false;

    for (idx, arg) in args.into_iter().enumerate() {
        if idx == 0 || passthrough {
            normalized.push(arg);
            continue;
        }
        let rewritten = match arg.to_str() {
            Some("--") => {
                passthrough = true;
                None
            }
            Some(text) if text.starts_with('-') && !text.starts_with("--") => {
                let name = text[1..].split('=').next().unwrap_or_default();
                GO_STYLE_FLAGS
                    .contains(&name)
                    .then(|| OsString::from(format!("-{}", text)))
            }
            _ => None,
        };
        normalized.push(rewritten.unwrap_or(arg));
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os_args(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_clean_path() {
        let cases = [
            ("tools.go", "tools.go"),
            ("./tools.go", "tools.go"),
            ("a//b/./c/..", "a/b"),
            ("a/../..", ".."),
            ("../../a", "../../a"),
            ("/../x/tools.go", "/x/tools.go"),
            ("/", "/"),
            ("./", "."),
            ("build/tools/", "build/tools"),
        ];
        for (input, expected) in cases {
            assert_eq!(clean_path(input), expected, "clean_path({:?})", input);
        }
    }

    #[test]
    fn test_parse_manifest_path_rejects_empty() {
        assert_eq!(
            parse_manifest_path(""),
            Err("please don't specify an empty pathname".to_string())
        );
        assert_eq!(
            parse_manifest_path("hack/./tools.go"),
            Ok(PathBuf::from("hack/tools.go"))
        );
    }

    #[test]
    fn test_normalize_go_style_args() {
        let args = normalize_go_style_args(os_args(&[
            "toolman", "-init", "-add=example.com/a", "-f", "tools.go", "-v", "-q", "--add",
        ]));
        assert_eq!(
            args,
            os_args(&[
                "toolman", "--init", "--add=example.com/a", "-f", "tools.go", "-v", "-q", "--add",
            ])
        );
    }

    #[test]
    fn test_normalize_stops_at_double_dash() {
        let args = normalize_go_style_args(os_args(&["toolman", "--", "-init"]));
        assert_eq!(args, os_args(&["toolman", "--", "-init"]));
    }

    #[test]
    fn test_mode_precedence() {
        let path = Some(PathBuf::from("tools.go"));

        let init = RunConfig::from_flags(path.clone(), true, Some("example.com/a".into()));
        assert!(init.is_ok_and(|c| c.mode == Mode::Init));

        let add = RunConfig::from_flags(path.clone(), false, Some("example.com/a".into()));
        assert!(add.is_ok_and(|c| c.mode == Mode::Add("example.com/a".into())));

        let empty_add = RunConfig::from_flags(path.clone(), false, Some(String::new()));
        assert!(empty_add.is_ok_and(|c| c.mode == Mode::Install));

        let install = RunConfig::from_flags(path, false, None);
        assert!(install.is_ok_and(|c| c.mode == Mode::Install));
    }

    #[test]
    fn test_default_manifest_path_is_in_cwd() {
        let config = RunConfig::from_flags(None, false, None);
        let Ok(cwd) = std::env::current_dir() else {
            return;
        };
        assert!(config.is_ok_and(|c| c.manifest_path == cwd.join("tools.go")));
    }
}
