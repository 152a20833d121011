use std::sync::{LazyLock, Mutex};

use fluent::{bundle::FluentBundle, FluentArgs, FluentResource};
use intl_memoizer::concurrent::IntlLangMemoizer;
use regex::Regex;
use unic_langid::LanguageIdentifier;

use crate::prelude::Error;

/// Display language.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
pub enum Language {
    /// English
    #[default]
    #[serde(rename = "en-US")]
    English,
}

impl Language {
    pub fn id(&self) -> LanguageIdentifier {
        let id = match self {
            Self::English => "en-US",
        };
        id.parse().unwrap()
    }
}

static BUNDLE: LazyLock<Mutex<FluentBundle<FluentResource, IntlLangMemoizer>>> = LazyLock::new(|| {
    let ftl = include_str!("../lang/en-US.ftl").to_owned();
    let res = FluentResource::try_new(ftl).expect("Failed to parse Fluent file content.");

    let mut bundle = FluentBundle::new_concurrent(vec![Language::English.id()]);
    bundle.set_use_isolating(false);

    bundle
        .add_resource(res)
        .expect("Failed to add Fluent resources to the bundle.");

    Mutex::new(bundle)
});

static RE_EXTRA_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([^\r\n ]) {2,}").unwrap());
static RE_EXTRA_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([^\r\n ])[\r\n]([^\r\n ])").unwrap());
static RE_EXTRA_PARAGRAPHS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([^\r\n ])[\r\n]{2,}([^\r\n ])").unwrap());

fn translate(id: &str) -> String {
    translate_args(id, &FluentArgs::new())
}

fn translate_args(id: &str, args: &FluentArgs) -> String {
    let bundle = match BUNDLE.lock() {
        Ok(x) => x,
        Err(_) => return "fluent-cannot-lock".to_string(),
    };

    let message = match bundle.get_message(id) {
        Some(x) => x,
        None => return format!("fluent-no-message={id}"),
    };

    let pattern = match message.value() {
        Some(x) => x,
        None => return format!("fluent-no-message-value={id}"),
    };

    let mut errors = vec![];
    let value = bundle.format_pattern(pattern, Some(args), &mut errors);

    RE_EXTRA_PARAGRAPHS
        .replace_all(
            &RE_EXTRA_LINES.replace_all(&RE_EXTRA_SPACES.replace_all(&value, "${1} "), "${1} ${2}"),
            "${1}\n\n${2}",
        )
        .to_string()
}

pub fn set(language: Language) {
    let mut bundle = BUNDLE.lock().unwrap();
    bundle.locales = vec![language.id()];
}

pub fn app_name() -> String {
    translate("vidwall")
}

pub fn field(text: &str) -> String {
    format!("{text}:")
}

pub fn handle_error(error: &Error) -> String {
    let error = match error {
        Error::ConfigInvalid { why } => format!("{}\n\n{why}", tell::config_is_invalid()),
        Error::NoMediaFound => tell::no_media_found_in_sources(),
        Error::SourceInvalid { why } => format!("{}\n\n{why}", tell::source_is_invalid()),
        Error::ScreenUnavailable { why } => format!("{}\n\n{why}", tell::screen_is_unavailable()),
    };

    format!("{} {}", field(&thing::error()), error)
}

pub mod thing {
    use super::*;

    pub fn error() -> String {
        translate("thing-error")
    }

    pub fn image_sequence() -> String {
        translate("thing-image-sequence")
    }

    pub fn video() -> String {
        translate("thing-video")
    }
}

pub mod tell {
    use super::*;

    pub fn config_is_invalid() -> String {
        translate("tell-config-is-invalid")
    }

    pub fn no_media_found_in_sources() -> String {
        translate("tell-no-media-found-in-sources")
    }

    pub fn source_is_invalid() -> String {
        translate("tell-source-is-invalid")
    }

    pub fn screen_is_unavailable() -> String {
        translate("tell-screen-is-unavailable")
    }

    pub fn usage() -> String {
        [
            translate("tell-usage-heading"),
            format!("  {}", translate("instruction-pointer-enter")),
            format!("  {}", translate("instruction-pointer-exit")),
            format!("  {}", translate("instruction-click")),
            format!("  {}", translate("instruction-double-click")),
            format!("  {}", translate("instruction-quit")),
        ]
        .join("\n")
    }
}
