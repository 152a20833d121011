mod cli;
mod grid;
mod lang;
mod media;
mod prelude;
mod resource;
mod scheduler;
mod screen;
mod surface;

use crate::{
    cli::Cli,
    grid::Grid,
    prelude::{app_dir, Error, CONFIG_DIR, ENV_DEBUG, VERSION},
    resource::{config::Config, SaveableResourceFile},
    scheduler::Scheduler,
};

/// The logger handle must be kept alive for the lifetime of the program.
fn prepare_logging() -> Result<flexi_logger::LoggerHandle, flexi_logger::FlexiLoggerError> {
    if std::env::var(ENV_DEBUG).is_ok() {
        return flexi_logger::Logger::try_with_env_or_str("vidwall=debug")?.start();
    }

    flexi_logger::Logger::try_with_env_or_str("vidwall=info")?
        .log_to_file(flexi_logger::FileSpec::default().directory(app_dir()))
        .rotate(
            flexi_logger::Criterion::Size(1024 * 1024),
            flexi_logger::Naming::Timestamps,
            flexi_logger::Cleanup::KeepLogFiles(4),
        )
        .duplicate_to_stderr(flexi_logger::Duplicate::Warn)
        .start()
}

/// Feed interactive commands from the terminal into the wall.
/// The thread ends on EOF or once the wall stops listening.
fn read_commands(sender: tokio::sync::mpsc::Sender<cli::Command>) {
    std::thread::spawn(move || {
        use std::io::BufRead;

        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match cli::parse_command(&line) {
                Some(command) => {
                    if sender.blocking_send(command).is_err() {
                        break;
                    }
                }
                None => {
                    if !line.trim().is_empty() {
                        log::info!("Unrecognized command: {line}");
                    }
                }
            }
        }
    });
}

fn run_wall(args: Cli) -> Result<(), Error> {
    let config = Config::load()?;
    config.save();
    lang::set(config.language);
    log::debug!("Config on startup: {config:?}");

    let sources = cli::parse_sources(args.sources, args.frames)?;
    if sources.is_empty() {
        return Err(Error::NoMediaFound);
    }

    let mut mount = surface::HeadlessMount;
    let grid = Grid::new(&sources, &config.playback, &mut mount)?;
    let scheduler = Scheduler::new(grid, config.playback.tick());
    log::info!("Wall of {} screens ready", scheduler.grid().screens().len());

    println!("{} v{}", lang::app_name(), *VERSION);
    println!("{}", lang::tell::usage());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Unable to initialize async runtime");

    runtime.block_on(async move {
        let (event_tx, event_rx) = tokio::sync::mpsc::channel(64);
        let (command_tx, mut command_rx) = tokio::sync::mpsc::channel::<cli::Command>(64);
        let (stop_tx, stop_rx) = tokio::sync::watch::channel(false);

        {
            use std::io::IsTerminal;
            if std::io::stdin().is_terminal() {
                read_commands(command_tx);
            }
        }

        tokio::spawn(async move {
            let mut commands_open = true;
            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        let _ = stop_tx.send(true);
                        break;
                    }
                    command = command_rx.recv(), if commands_open => match command {
                        Some(cli::Command::Screen { id, event }) => {
                            if event_tx.send((id, event)).await.is_err() {
                                break;
                            }
                        }
                        Some(cli::Command::Quit) => {
                            let _ = stop_tx.send(true);
                            break;
                        }
                        None => {
                            commands_open = false;
                        }
                    }
                }
            }
        });

        let grid = scheduler.run(event_rx, stop_rx).await;

        for screen in grid.screens() {
            log::debug!(
                "Screen {} wound down: kind={:?}, looping={}, inverted={}, rate={:?}, frame={}",
                screen.id().0,
                screen.source().kind(),
                screen.is_looping(),
                screen.is_inverted(),
                screen.rate(),
                screen.frame(),
            );
        }
    });

    log::info!("Wall stopped");
    Ok(())
}

fn main() {
    let args = cli::parse();

    if let Some(dir) = args.config.as_deref() {
        *CONFIG_DIR.lock().unwrap() = Some(dir.to_path_buf());
    }
    let _ = std::fs::create_dir_all(app_dir());

    let logger = prepare_logging();
    if let Err(e) = &logger {
        eprintln!("Unable to initialize logging: {e}");
    }
    log::debug!("Version: {}", *VERSION);

    let result = match args.sub.clone() {
        Some(sub) => cli::run(sub),
        None => run_wall(args),
    };

    if let Err(e) = result {
        eprintln!("{}", lang::handle_error(&e));
        std::process::exit(1);
    }
}
