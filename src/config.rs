use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

/// User settings, read from `~/.config/bouquet/config.json`. Every field is
/// optional; missing ones take their default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GardenConfig {
    pub key_bindings: KeyBindings,
    pub fps: u32,
    /// World units mapped onto the height of the terminal canvas.
    pub world_height: f64,
    pub supersample: usize,
    pub message_delay_ms: u64,
    pub export_dir: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub start: String,
    pub next_variety: String,
    pub prev_variety: String,
    pub wrap: String,
    pub reset: String,
    pub export: String,
    pub quit: String,
    pub fullscreen: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            start: "Enter".into(),
            next_variety: "Tab".into(),
            prev_variety: "BackTab".into(),
            wrap: "w".into(),
            reset: "r".into(),
            export: "s".into(),
            quit: "q".into(),
            fullscreen: "F11".into(),
        }
    }
}

impl Default for GardenConfig {
    fn default() -> Self {
        GardenConfig {
            key_bindings: KeyBindings::default(),
            fps: 60,
            world_height: 900.0,
            supersample: 2,
            message_delay_ms: 1500,
            export_dir: PathBuf::from("."),
            log_file: None,
        }
    }
}

impl GardenConfig {
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match std::fs::read_to_string(&config_path) {
            Ok(json) => Self::parse(&json).unwrap_or_else(|e| {
                eprintln!("Warning: invalid config {} ({e}), using defaults", config_path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Parse and clamp out-of-range values.
    pub fn parse(json: &str) -> serde_json::Result<Self> {
        let mut config: GardenConfig = serde_json::from_str(json)?;
        config.fps = config.fps.clamp(1, 240);
        config.supersample = config.supersample.clamp(1, 4);
        if !(config.world_height.is_finite() && config.world_height > 0.0) {
            config.world_height = GardenConfig::default().world_height;
        }
        Ok(config)
    }

    pub fn message_delay(&self) -> Duration {
        Duration::from_millis(self.message_delay_ms)
    }

    fn config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = PathBuf::from(home);
        path.push(".config");
        path.push("bouquet");
        path.push("config.json");
        path
    }
}

/// Check whether a crossterm `KeyEvent` matches a binding string from config.
pub fn matches_binding(binding: &str, event: &KeyEvent) -> bool {
    let first_char = |s: &str| s.chars().next().map(KeyCode::Char);

    if let Some(rest) = binding.strip_prefix("Alt-") {
        if !event.modifiers.contains(KeyModifiers::ALT) {
            return false;
        }
        return match rest {
            "Enter" => event.code == KeyCode::Enter,
            other => first_char(other) == Some(event.code),
        };
    }

    if let Some(rest) = binding.strip_prefix("Ctrl-") {
        if !event.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        return first_char(rest) == Some(event.code);
    }

    // Plain bindings never fire with Ctrl or Alt held.
    if event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return false;
    }

    match binding {
        "Enter" => event.code == KeyCode::Enter,
        "Esc" => event.code == KeyCode::Esc,
        "Space" => event.code == KeyCode::Char(' '),
        "Tab" => event.code == KeyCode::Tab,
        "BackTab" => event.code == KeyCode::BackTab,
        "Backspace" => event.code == KeyCode::Backspace,
        s => {
            if let Some(n) = s.strip_prefix('F').and_then(|rest| rest.parse::<u8>().ok()) {
                return event.code == KeyCode::F(n);
            }
            // Shift only changes the case of character keys.
            match (first_char(s), event.code) {
                (Some(KeyCode::Char(want)), KeyCode::Char(got)) => want == got,
                _ => false,
            }
        }
    }
}

/// Short label for a binding in on-screen hints.
pub fn display_binding(binding: &str) -> String {
    match binding {
        "BackTab" => "Shift-Tab".into(),
        s if s.chars().count() == 1 => s.to_uppercase(),
        s => s.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn plain_bindings() {
        let none = KeyModifiers::NONE;
        assert!(matches_binding("w", &key(KeyCode::Char('w'), none)));
        assert!(!matches_binding("w", &key(KeyCode::Char('r'), none)));
        assert!(matches_binding("Enter", &key(KeyCode::Enter, none)));
        assert!(matches_binding("BackTab", &key(KeyCode::BackTab, KeyModifiers::SHIFT)));
        assert!(matches_binding("F11", &key(KeyCode::F(11), none)));
        assert!(!matches_binding("F11", &key(KeyCode::F(1), none)));
    }

    #[test]
    fn modifiers_must_match() {
        assert!(!matches_binding("s", &key(KeyCode::Char('s'), KeyModifiers::CONTROL)));
        assert!(matches_binding("Ctrl-s", &key(KeyCode::Char('s'), KeyModifiers::CONTROL)));
        assert!(!matches_binding("Ctrl-s", &key(KeyCode::Char('s'), KeyModifiers::NONE)));
        assert!(matches_binding("Alt-Enter", &key(KeyCode::Enter, KeyModifiers::ALT)));
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config = GardenConfig::parse(r#"{"fps": 30, "key_bindings": {"wrap": "b"}}"#).unwrap();
        assert_eq!(config.fps, 30);
        assert_eq!(config.key_bindings.wrap, "b");
        assert_eq!(config.key_bindings.reset, "r");
        assert_eq!(config.world_height, 900.0);
        assert_eq!(config.message_delay(), Duration::from_millis(1500));
        assert!(config.log_file.is_none());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = GardenConfig::parse(r#"{"fps": 0, "supersample": 99, "world_height": -5}"#).unwrap();
        assert_eq!(config.fps, 1);
        assert_eq!(config.supersample, 4);
        assert_eq!(config.world_height, 900.0);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(GardenConfig::parse("{fps: ").is_err());
    }

    #[test]
    fn hint_labels() {
        assert_eq!(display_binding("w"), "W");
        assert_eq!(display_binding("BackTab"), "Shift-Tab");
        assert_eq!(display_binding("Enter"), "Enter");
    }
}
