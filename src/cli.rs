mod parse;

use clap::CommandFactory;

pub use crate::cli::parse::{Cli, Subcommand};
use crate::{
    cli::parse::CompletionShell,
    media,
    prelude::Error,
    resource::config::Config,
    screen,
};

/// Turn the raw CLI descriptors into tagged sources.
/// With no arguments and a piped stdin, video URLs are read one per line.
pub fn parse_sources(sources: Vec<String>, frames: Vec<String>) -> Result<Vec<media::Source>, Error> {
    let mut sources = sources;

    if sources.is_empty() && frames.is_empty() {
        use std::io::IsTerminal;

        let stdin = std::io::stdin();
        if !stdin.is_terminal() {
            sources = stdin
                .lines()
                .map_while(Result::ok)
                .filter(|raw| !raw.trim().is_empty())
                .collect();
            log::debug!("Sources from stdin: {:?}", &sources);
        }
    }

    let mut parsed = vec![];
    for raw in sources {
        parsed.push(media::Source::identify(&raw)?);
    }
    for group in frames {
        let raws: Vec<&str> = group.split(',').filter(|raw| !raw.trim().is_empty()).collect();
        parsed.push(media::Source::identify_frames(&raws)?);
    }

    Ok(parsed)
}

/// Interactive stand-ins for the pointer events on a real display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Screen { id: screen::Id, event: screen::Event },
    Quit,
}

pub fn parse_command(raw: &str) -> Option<Command> {
    let mut parts = raw.split_whitespace();
    let verb = parts.next()?;

    if matches!(verb, "quit" | "exit" | "q") {
        return parts.next().is_none().then_some(Command::Quit);
    }

    let event = match verb {
        "enter" => screen::Event::PointerEntered,
        "leave" => screen::Event::PointerExited,
        "click" => screen::Event::Clicked,
        "dblclick" => screen::Event::DoubleClicked,
        _ => return None,
    };

    let id = parts.next()?.parse().ok().map(screen::Id)?;
    if parts.next().is_some() {
        return None;
    }

    Some(Command::Screen { id, event })
}

pub fn parse() -> Cli {
    use clap::Parser;
    Cli::parse()
}

pub fn run(sub: Subcommand) -> Result<(), Error> {
    log::debug!("Invocation: {sub:?}");

    match sub {
        Subcommand::Complete { shell } => {
            let clap_shell = match shell {
                CompletionShell::Bash => clap_complete::Shell::Bash,
                CompletionShell::Fish => clap_complete::Shell::Fish,
                CompletionShell::Zsh => clap_complete::Shell::Zsh,
                CompletionShell::PowerShell => clap_complete::Shell::PowerShell,
                CompletionShell::Elvish => clap_complete::Shell::Elvish,
            };
            clap_complete::generate(
                clap_shell,
                &mut Cli::command(),
                env!("CARGO_PKG_NAME"),
                &mut std::io::stdout(),
            )
        }
        Subcommand::Schema { format, kind } => {
            let format = format.unwrap_or_default();
            let schema = match kind {
                parse::SchemaSubcommand::Config => schemars::schema_for!(Config),
            };

            let serialized = match format {
                parse::SerializationFormat::Json => serde_json::to_string_pretty(&schema).unwrap(),
                parse::SerializationFormat::Yaml => serde_yaml::to_string(&schema).unwrap(),
            };
            println!("{serialized}");
        }
    }

    Ok(())
}
