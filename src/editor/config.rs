use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    pub key_bindings: KeyBindings,
    /// Color tokens offered by the toolbar. Never interpreted by the engine.
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    pub paint_tool: String,
    pub erase_tool: String,
    pub next_color: String,
    pub prev_color: String,
    pub clear: String,
    pub flush: String,
    pub quit: String,
    #[serde(default = "default_end_stroke")]
    pub end_stroke: String,
}

fn default_end_stroke() -> String {
    "Esc".into()
}

fn default_palette() -> Vec<String> {
    vec![
        "#000000".into(),
        "#ff0000".into(),
        "#00aa00".into(),
        "#0000ff".into(),
        "#ffaa00".into(),
        "#aa00ff".into(),
        "#00aaaa".into(),
        "#ffffff".into(),
    ]
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            key_bindings: KeyBindings {
                paint_tool: "p".into(),
                erase_tool: "e".into(),
                next_color: "Tab".into(),
                prev_color: "BackTab".into(),
                clear: "c".into(),
                flush: "s".into(),
                quit: "q".into(),
                end_stroke: default_end_stroke(),
            },
            palette: default_palette(),
        }
    }
}

impl EditorConfig {
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match std::fs::read_to_string(&config_path) {
            Ok(json) => Self::parse(&json).unwrap_or_else(|e| {
                warn!(path = %config_path.display(), "invalid editor config ({e}), using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Parse a config file; an empty palette falls back to the default one.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: EditorConfig = serde_json::from_str(json)?;
        if config.palette.is_empty() {
            config.palette = default_palette();
        }
        Ok(config)
    }

    fn config_path() -> std::path::PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = std::path::PathBuf::from(home);
        path.push(".config");
        path.push("delta-canvas");
        path.push("editor.json");
        path
    }
}

/// Check whether a crossterm `KeyEvent` matches a binding string from config.
pub fn matches_binding(binding: &str, event: &KeyEvent) -> bool {
    if let Some(ch) = binding.strip_prefix("Ctrl-") {
        if !event.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        return match ch.chars().next() {
            Some(c) => event.code == KeyCode::Char(c),
            None => false,
        };
    }

    // Plain bindings never fire while Ctrl or Alt is held.
    if event.modifiers.contains(KeyModifiers::CONTROL)
        || event.modifiers.contains(KeyModifiers::ALT)
    {
        return false;
    }

    match binding {
        "Enter" => event.code == KeyCode::Enter,
        "Esc" => event.code == KeyCode::Esc,
        "Space" => event.code == KeyCode::Char(' '),
        "Tab" => event.code == KeyCode::Tab,
        "BackTab" => event.code == KeyCode::BackTab,
        "Backspace" => event.code == KeyCode::Backspace,
        "Delete" => event.code == KeyCode::Delete,
        s => {
            if let Some(rest) = s.strip_prefix('F') {
                if let Ok(n) = rest.parse::<u8>() {
                    return event.code == KeyCode::F(n);
                }
            }
            if let Some(c) = s.chars().next() {
                event.code == KeyCode::Char(c)
            } else {
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn plain_binding_rejects_modifiers() {
        assert!(matches_binding("c", &key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!matches_binding("c", &key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn ctrl_and_named_bindings() {
        assert!(matches_binding("Ctrl-s", &key(KeyCode::Char('s'), KeyModifiers::CONTROL)));
        assert!(!matches_binding("Ctrl-s", &key(KeyCode::Char('s'), KeyModifiers::NONE)));
        assert!(matches_binding("BackTab", &key(KeyCode::BackTab, KeyModifiers::SHIFT)));
        assert!(matches_binding("F5", &key(KeyCode::F(5), KeyModifiers::NONE)));
    }

    #[test]
    fn parse_fills_missing_fields() {
        let json = r#"{
            "key_bindings": {
                "paint_tool": "b", "erase_tool": "x", "next_color": "n",
                "prev_color": "m", "clear": "Delete", "flush": "Ctrl-s", "quit": "q"
            },
            "palette": []
        }"#;
        let config = EditorConfig::parse(json).unwrap();
        assert_eq!(config.key_bindings.paint_tool, "b");
        assert_eq!(config.key_bindings.end_stroke, "Esc");
        assert_eq!(config.palette.len(), 8);
    }

    #[test]
    fn omitted_fields_use_the_same_defaults() {
        let json = r#"{ "key_bindings": {
            "paint_tool": "p", "erase_tool": "e", "next_color": "Tab",
            "prev_color": "BackTab", "clear": "c", "flush": "s", "quit": "q"
        } }"#;
        let config = EditorConfig::parse(json).unwrap();
        let defaults = EditorConfig::default();
        assert_eq!(config.palette, defaults.palette);
        assert_eq!(config.key_bindings.end_stroke, defaults.key_bindings.end_stroke);
    }

    #[test]
    fn parse_rejects_invalid_json() {
        assert!(EditorConfig::parse("{").is_err());
    }
}
