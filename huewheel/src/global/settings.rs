const DOCUMENTATION: &str = r#"# Huewheel settings. Edits are kept, but the file is rewritten whenever huewheel saves it,
# losing any comments or layout of your own. Keys and values are case sensitive.

# dismiss_delay_ms: how long, in milliseconds, the pointer may wander off the color wheel before it closes.
# toggle_key: key that opens and closes the color wheel under the pointer, written as an egui key name.
# See https://docs.rs/egui/latest/egui/enum.Key.html for a list of key names.

"#;

#[must_use]
pub fn preferences_dir() -> Option<std::path::PathBuf> {
    let mut base_dir = dirs::preference_dir()?;
    base_dir.push(env!("CARGO_PKG_NAME"));
    Some(base_dir)
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub dismiss_delay_ms: u64,
    pub toggle_key: String,
}
impl Default for Settings {
    fn default() -> Self {
        Self {
            dismiss_delay_ms: 200,
            toggle_key: "Space".to_owned(),
        }
    }
}
impl Settings {
    #[must_use]
    pub fn dismiss_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.dismiss_delay_ms)
    }
    /// The configured toggle key, or space if it isn't a key egui knows.
    #[must_use]
    pub fn toggle_key(&self) -> egui::Key {
        egui::Key::from_name(&self.toggle_key).unwrap_or_else(|| {
            log::warn!("Unknown toggle key {:?}, using Space", self.toggle_key);
            egui::Key::Space
        })
    }
    #[must_use]
    pub fn selector_config(&self) -> huewheel_core::selector::SelectorConfig {
        huewheel_core::selector::SelectorConfig {
            dismiss_delay: self.dismiss_delay(),
        }
    }
}

pub struct Preferences {
    failed_to_load: bool,
    pub settings: Settings,
}
impl Preferences {
    const FILENAME: &'static str = "settings.toml";
    /// Where the settings file lives, if there's a preferences dir at all.
    #[must_use]
    pub fn path() -> Option<std::path::PathBuf> {
        let mut path = preferences_dir()?;
        path.push(Self::FILENAME);
        Some(path)
    }
    /// Settings for the whole app, read once from the preferences dir.
    /// Defaults stand in when the file is missing or won't parse.
    #[must_use]
    pub fn get() -> &'static Self {
        static GLOBAL_PREFERENCES: std::sync::OnceLock<Preferences> = std::sync::OnceLock::new();

        GLOBAL_PREFERENCES.get_or_init(|| match Self::path() {
            None => Self::no_path(),
            Some(path) => Self::load_or_default(&path),
        })
    }
    #[must_use]
    pub fn no_path() -> Self {
        log::warn!("Settings weren't available, defaulting.");
        Self {
            failed_to_load: true,
            settings: Settings::default(),
        }
    }
    #[must_use]
    fn load_or_default(path: &std::path::Path) -> Self {
        let settings: anyhow::Result<Settings> = try_block::try_block! {
            let string = std::fs::read_to_string(path)?;
            Ok(Self::parse(&string)?)
        };

        match settings {
            Ok(settings) => Self {
                failed_to_load: false,
                settings,
            },
            Err(_) => Self::no_path(),
        }
    }
    pub fn parse(string: &str) -> Result<Settings, toml::de::Error> {
        toml::from_str(string)
    }
    /// Whether these are stand-in defaults rather than the user's file.
    #[must_use]
    pub fn did_fail_to_load(&self) -> bool {
        self.failed_to_load
    }
    pub fn save(&self) -> anyhow::Result<()> {
        let mut preferences =
            preferences_dir().ok_or_else(|| anyhow::anyhow!("No preferences dir found"))?;
        // Only the last component is created. A missing parent means there's nowhere sensible to write.
        // Failure here is usually "already exists", and the write below reports anything worse.
        let _ = std::fs::DirBuilder::new().create(&preferences);

        preferences.push(Self::FILENAME);
        let string = DOCUMENTATION.to_owned() + &toml::ser::to_string_pretty(&self.settings)?;
        std::fs::write(preferences, string)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{Preferences, Settings, DOCUMENTATION};
    #[test]
    fn partial_file() {
        let settings = Preferences::parse("dismiss_delay_ms = 350\n").unwrap();
        assert_eq!(
            settings,
            Settings {
                dismiss_delay_ms: 350,
                ..Settings::default()
            }
        );
        assert_eq!(settings.dismiss_delay().as_millis(), 350);
    }
    #[test]
    fn saved_form_parses() {
        let settings = Settings {
            dismiss_delay_ms: 1000,
            toggle_key: "W".to_owned(),
        };
        let string =
            DOCUMENTATION.to_owned() + &toml::ser::to_string_pretty(&settings).unwrap();
        assert_eq!(Preferences::parse(&string).unwrap(), settings);
        assert_eq!(settings.toggle_key(), egui::Key::W);
    }
    #[test]
    fn bad_values() {
        assert!(Preferences::parse("dismiss_delay_ms = \"soon\"").is_err());
        let settings = Settings {
            toggle_key: "NotAKey".to_owned(),
            ..Settings::default()
        };
        assert_eq!(settings.toggle_key(), egui::Key::Space);
    }
}
