use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::editor::DelimiterClass;

/// Editing preferences the core reads but never changes.
///
/// Field names serialize in the host's camelCase preference form
/// (`surroundSelection`, `autoPairBracket`, ...). Missing keys keep their
/// default, which is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorOptions {
    /// Master toggle for wrapping a selection in a typed delimiter pair.
    pub surround_selection: bool,
    pub auto_pair_bracket: bool,
    pub auto_pair_quote: bool,
    pub auto_pair_markdown_syntax: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            surround_selection: true,
            auto_pair_bracket: true,
            auto_pair_quote: true,
            auto_pair_markdown_syntax: true,
        }
    }
}

impl EditorOptions {
    /// Whether delimiters of this class may wrap a selection.
    pub const fn allows(&self, class: DelimiterClass) -> bool {
        match class {
            DelimiterClass::Bracket => self.auto_pair_bracket,
            DelimiterClass::Quote => self.auto_pair_quote,
            DelimiterClass::MarkdownSyntax => self.auto_pair_markdown_syntax,
        }
    }

    /// Parse the host's JSON preference object.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse editor preferences")
    }

    /// These options with every toggle set in `flags` overridden.
    #[must_use]
    pub fn with_flags(self, flags: &ConfigFlags) -> Self {
        Self {
            surround_selection: flags.surround_selection.unwrap_or(self.surround_selection),
            auto_pair_bracket: flags.auto_pair_bracket.unwrap_or(self.auto_pair_bracket),
            auto_pair_quote: flags.auto_pair_quote.unwrap_or(self.auto_pair_quote),
            auto_pair_markdown_syntax: flags
                .auto_pair_markdown_syntax
                .unwrap_or(self.auto_pair_markdown_syntax),
        }
    }
}

/// Toggles read from an rc file; `None` leaves the option untouched.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub surround_selection: Option<bool>,
    pub auto_pair_bracket: Option<bool>,
    pub auto_pair_quote: Option<bool>,
    pub auto_pair_markdown_syntax: Option<bool>,
}

impl ConfigFlags {
    /// Layer `other` over `self`; toggles set in `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            surround_selection: other.surround_selection.or(self.surround_selection),
            auto_pair_bracket: other.auto_pair_bracket.or(self.auto_pair_bracket),
            auto_pair_quote: other.auto_pair_quote.or(self.auto_pair_quote),
            auto_pair_markdown_syntax: other
                .auto_pair_markdown_syntax
                .or(self.auto_pair_markdown_syntax),
        }
    }

    /// Effective options on top of the defaults.
    pub fn options(&self) -> EditorOptions {
        EditorOptions::default().with_flags(self)
    }
}

const APP_DIR: &str = "blockedit";
const LOCAL_RC: &str = ".blockeditrc";

/// Per-user rc file in the platform's configuration directory.
pub fn global_config_path() -> PathBuf {
    config_path_from(|name| std::env::var_os(name))
}

fn config_path_from(env: impl Fn(&str) -> Option<OsString>) -> PathBuf {
    let base = if cfg!(target_os = "windows") {
        env("APPDATA").map(PathBuf::from)
    } else if cfg!(target_os = "macos") {
        env("HOME").map(|home| {
            PathBuf::from(home)
                .join("Library")
                .join("Application Support")
        })
    } else {
        env("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env("HOME").map(|home| PathBuf::from(home).join(".config")))
    };
    base.map_or_else(|| PathBuf::from(LOCAL_RC), |dir| dir.join(APP_DIR).join("config"))
}

/// Rc file that overrides the user's settings for documents in `dir`.
pub fn local_override_path(dir: &Path) -> PathBuf {
    dir.join(LOCAL_RC)
}

/// Options for documents in `dir`: defaults, then the user's rc file, then
/// the override in `dir`.
pub fn load_options_for(dir: &Path) -> Result<EditorOptions> {
    let flags = load_effective_flags(&global_config_path(), &local_override_path(dir))?;
    Ok(flags.options())
}

/// Global flags with the local override layered on top.
pub fn load_effective_flags(global: &Path, local: &Path) -> Result<ConfigFlags> {
    Ok(load_config_flags(global)?.union(&load_config_flags(local)?))
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# blockedit editing preferences".to_string()];
    for (name, value) in flag_entries(flags) {
        match value {
            Some(true) => lines.push(format!("--{name}")),
            Some(false) => lines.push(format!("--no-{name}")),
            None => {}
        }
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Parse `--<toggle>` / `--no-<toggle>` tokens; unknown tokens are ignored.
///
/// Later tokens win over earlier ones.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    for token in tokens {
        let Some(name) = token.strip_prefix("--") else {
            continue;
        };
        let (name, value) = name
            .strip_prefix("no-")
            .map_or((name, true), |negated| (negated, false));
        let slot = match name {
            "surround-selection" => &mut flags.surround_selection,
            "auto-pair-bracket" => &mut flags.auto_pair_bracket,
            "auto-pair-quote" => &mut flags.auto_pair_quote,
            "auto-pair-markdown-syntax" => &mut flags.auto_pair_markdown_syntax,
            _ => continue,
        };
        *slot = Some(value);
    }
    flags
}

const fn flag_entries(flags: &ConfigFlags) -> [(&'static str, Option<bool>); 4] {
    [
        ("surround-selection", flags.surround_selection),
        ("auto-pair-bracket", flags.auto_pair_bracket),
        ("auto-pair-quote", flags.auto_pair_quote),
        ("auto-pair-markdown-syntax", flags.auto_pair_markdown_syntax),
    ]
}
