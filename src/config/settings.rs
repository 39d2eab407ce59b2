use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::defaults::*;
use crate::error::FlatscreenResult;
use crate::types::Color128;

/// Windowed-mode settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatscreenSettings {
    /// Used as both the window title and the window class name.
    #[serde(default = "default_display_name")]
    pub display_name: String,

    // Initial client size
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,

    // Initial window position
    #[serde(default = "default_pos_x")]
    pub pos_x: i32,
    #[serde(default = "default_pos_y")]
    pub pos_y: i32,

    #[serde(default = "default_clear_color")]
    pub clear_color: Color128,
}

impl Default for FlatscreenSettings {
    fn default() -> Self {
        Self {
            display_name: default_display_name(),
            width: default_width(),
            height: default_height(),
            pos_x: default_pos_x(),
            pos_y: default_pos_y(),
            clear_color: default_clear_color(),
        }
    }
}

impl FlatscreenSettings {
    pub fn with_name(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Self::default()
        }
    }

    /// Load settings from a JSON file.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load_from(path: impl AsRef<Path>) -> FlatscreenResult<Self> {
        let content = match fs::read_to_string(path.as_ref()) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        let settings: Self = serde_json::from_str(&content)?;
        Ok(settings.sanitized())
    }

    /// Save settings as pretty-printed JSON.
    pub fn save_to(&self, path: impl AsRef<Path>) -> FlatscreenResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// A zero-sized window cannot back a swap chain.
    pub fn sanitized(mut self) -> Self {
        self.width = self.width.max(1);
        self.height = self.height.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("flatscreen_settings_{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn missing_file_gives_defaults() {
        let settings = FlatscreenSettings::load_from(temp_path("does_not_exist.json")).unwrap();
        assert_eq!(settings, FlatscreenSettings::default());
        assert_eq!((settings.width, settings.height), (1280, 720));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let path = temp_path("partial.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{ "display_name": "Viewer", "width": 800 }"#).unwrap();

        let settings = FlatscreenSettings::load_from(&path).unwrap();
        assert_eq!(settings.display_name, "Viewer");
        assert_eq!(settings.width, 800);
        assert_eq!(settings.height, default_height());
        assert_eq!(settings.pos_x, default_pos_x());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn save_then_load_keeps_values() {
        let path = temp_path("saved.json");
        let mut settings = FlatscreenSettings::with_name("Saved");
        settings.pos_y = 42;
        settings.clear_color = Color128::new(0.1, 0.2, 0.3, 1.0);
        settings.save_to(&path).unwrap();

        assert_eq!(FlatscreenSettings::load_from(&path).unwrap(), settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = temp_path("broken.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ width: ").unwrap();
        assert!(FlatscreenSettings::load_from(&path).is_err());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn zero_size_is_clamped() {
        let path = temp_path("zero.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{ "width": 0, "height": 0 }"#).unwrap();
        let settings = FlatscreenSettings::load_from(&path).unwrap();
        assert_eq!((settings.width, settings.height), (1, 1));
        let _ = fs::remove_file(&path);
    }
}
