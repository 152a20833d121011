use std::num::NonZeroU64;

use crate::{
    lang::Language,
    prelude::Error,
    resource::{ResourceFile, SaveableResourceFile},
};

/// Settings for `config.yaml`
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
#[serde(default)]
pub struct Config {
    pub language: Language,
    pub playback: Playback,
}

impl ResourceFile for Config {
    const FILE_NAME: &'static str = "config.yaml";
}

impl SaveableResourceFile for Config {}

impl Config {
    pub fn load() -> Result<Self, Error> {
        ResourceFile::load().map_err(|e| Error::ConfigInvalid { why: format!("{}", e) })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
#[serde(default)]
pub struct Playback {
    /// Whether screens start out looping.
    pub looping: bool,
    /// Delay between reconciliation passes, in milliseconds.
    pub pause_between_frames: NonZeroU64,
}

impl Playback {
    pub fn tick(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.pause_between_frames.get())
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self {
            looping: true,
            pause_between_frames: NonZeroU64::new(crate::scheduler::DEFAULT_TICK.as_millis() as u64).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn can_parse_minimal_config() {
        let config = Config::load_from_string("{}").unwrap();

        assert_eq!(Config::default(), config);
    }

    #[test]
    fn can_parse_optional_fields_when_present_in_config() {
        let config = Config::load_from_string(
            r#"
                playback:
                  looping: false
                  pause_between_frames: 100
            "#,
        )
        .unwrap();

        assert_eq!(
            Config {
                language: Language::English,
                playback: Playback {
                    looping: false,
                    pause_between_frames: NonZeroU64::new(100).unwrap(),
                },
            },
            config,
        );
    }

    #[test]
    fn can_be_serialized() {
        assert_eq!(
            r#"
---
language: en-US
playback:
  looping: true
  pause_between_frames: 250
"#
            .trim(),
            serde_yaml::to_string(&Config::default()).unwrap().trim(),
        );
    }

    #[test]
    fn tick_reflects_pause_between_frames() {
        let playback = Playback::default();
        assert_eq!(std::time::Duration::from_millis(250), playback.tick());
    }
}
