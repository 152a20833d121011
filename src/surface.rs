use url::Url;

use crate::{media, screen};

/// Style-class marker shared by every mounted surface.
pub const STYLE_CLASS: &str = "screen";

#[derive(Debug)]
pub enum Error {
    Playback { why: String },
    #[allow(unused)]
    Display { why: String },
}

/// One screen's rendering target.
///
/// The scheduler applies screen state through this seam once per pass.
/// Setters must be idempotent: reapplying the current rate or filter is a no-op.
pub trait Surface: Send {
    fn is_playing(&self) -> bool;
    fn play(&mut self) -> Result<(), Error>;
    fn pause(&mut self) -> Result<(), Error>;
    fn set_rate(&mut self, rate: f64) -> Result<(), Error>;
    fn set_inverted(&mut self, inverted: bool) -> Result<(), Error>;
    fn show_frame(&mut self, frame: &Url) -> Result<(), Error>;
}

/// Collaborator-provided factory that attaches one surface per screen,
/// in creation order, tagged with the screen id and the shared style class.
pub trait Mount {
    fn attach(&mut self, id: screen::Id, source: &media::Source) -> Result<Box<dyn Surface>, Error>;
}

/// Surface that only logs playback actions.
/// Lets the wall run without a display backend.
pub struct Headless {
    id: screen::Id,
    playing: bool,
    rate: f64,
    inverted: bool,
}

impl Headless {
    pub fn new(id: screen::Id) -> Self {
        Self {
            id,
            playing: false,
            rate: 1.0,
            inverted: false,
        }
    }
}

impl Surface for Headless {
    fn is_playing(&self) -> bool {
        self.playing
    }

    fn play(&mut self) -> Result<(), Error> {
        self.playing = true;
        log::debug!("[{}{}] play", STYLE_CLASS, self.id.0);
        Ok(())
    }

    fn pause(&mut self) -> Result<(), Error> {
        self.playing = false;
        log::debug!("[{}{}] pause", STYLE_CLASS, self.id.0);
        Ok(())
    }

    fn set_rate(&mut self, rate: f64) -> Result<(), Error> {
        if self.rate != rate {
            self.rate = rate;
            log::debug!("[{}{}] rate: {rate}", STYLE_CLASS, self.id.0);
        }
        Ok(())
    }

    fn set_inverted(&mut self, inverted: bool) -> Result<(), Error> {
        if self.inverted != inverted {
            self.inverted = inverted;
            log::debug!("[{}{}] inverted: {inverted}", STYLE_CLASS, self.id.0);
        }
        Ok(())
    }

    fn show_frame(&mut self, frame: &Url) -> Result<(), Error> {
        log::debug!("[{}{}] frame: {frame}", STYLE_CLASS, self.id.0);
        Ok(())
    }
}

#[derive(Default)]
pub struct HeadlessMount;

impl Mount for HeadlessMount {
    fn attach(&mut self, id: screen::Id, source: &media::Source) -> Result<Box<dyn Surface>, Error> {
        log::info!(
            "Mounted {}{} ({:?}) as .{}",
            STYLE_CLASS,
            id.0,
            source.kind(),
            STYLE_CLASS
        );
        Ok(Box::new(Headless::new(id)))
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Call {
        Play,
        Pause,
        Rate(f64),
        Inverted(bool),
        Frame(String),
    }

    pub type Calls = Arc<Mutex<Vec<Call>>>;

    /// Surface fake that records every call and can be told to fail playback.
    pub struct Recording {
        pub playing: bool,
        pub fail_playback: bool,
        pub calls: Calls,
    }

    impl Recording {
        pub fn new() -> (Self, Calls) {
            let calls = Calls::default();
            (
                Self {
                    playing: false,
                    fail_playback: false,
                    calls: calls.clone(),
                },
                calls,
            )
        }

        pub fn failing() -> Self {
            let (mut surface, _) = Self::new();
            surface.fail_playback = true;
            surface
        }
    }

    impl Surface for Recording {
        fn is_playing(&self) -> bool {
            self.playing
        }

        fn play(&mut self) -> Result<(), Error> {
            if self.fail_playback {
                return Err(Error::Playback {
                    why: "test".to_string(),
                });
            }
            self.playing = true;
            self.calls.lock().unwrap().push(Call::Play);
            Ok(())
        }

        fn pause(&mut self) -> Result<(), Error> {
            if self.fail_playback {
                return Err(Error::Playback {
                    why: "test".to_string(),
                });
            }
            self.playing = false;
            self.calls.lock().unwrap().push(Call::Pause);
            Ok(())
        }

        fn set_rate(&mut self, rate: f64) -> Result<(), Error> {
            self.calls.lock().unwrap().push(Call::Rate(rate));
            Ok(())
        }

        fn set_inverted(&mut self, inverted: bool) -> Result<(), Error> {
            self.calls.lock().unwrap().push(Call::Inverted(inverted));
            Ok(())
        }

        fn show_frame(&mut self, frame: &Url) -> Result<(), Error> {
            self.calls.lock().unwrap().push(Call::Frame(frame.to_string()));
            Ok(())
        }
    }

    /// Mount fake that hands out recording surfaces and remembers what it attached.
    #[derive(Default)]
    pub struct RecordingMount {
        pub attached: Vec<(screen::Id, media::Kind)>,
    }

    impl Mount for RecordingMount {
        fn attach(&mut self, id: screen::Id, source: &media::Source) -> Result<Box<dyn Surface>, Error> {
            self.attached.push((id, source.kind()));
            let (surface, _) = Recording::new();
            Ok(Box::new(surface))
        }
    }
}
