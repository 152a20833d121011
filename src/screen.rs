use crate::{
    media,
    surface::{self, Surface},
};

pub const NORMAL_RATE: f64 = 1.0;
pub const SLOW_RATE: f64 = 0.3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Id(pub usize);

/// Interaction events are the only mutators of screen state.
/// The scheduler just reads the flags back on each pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    PointerEntered,
    PointerExited,
    Clicked,
    DoubleClicked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Update {
    LoopingChanged,
    InvertedChanged,
    RateChanged,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rate {
    #[default]
    Normal,
    Slow,
}

impl Rate {
    pub fn factor(self) -> f64 {
        match self {
            Self::Normal => NORMAL_RATE,
            Self::Slow => SLOW_RATE,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::Slow,
            Self::Slow => Self::Normal,
        }
    }
}

/// One grid cell: the source it was bound to at creation,
/// the surface it owns, and the interaction-derived flags.
pub struct Screen {
    id: Id,
    source: media::Source,
    surface: Box<dyn Surface>,
    looping: bool,
    inverted: bool,
    rate: Rate,
    frame: usize,
}

impl Screen {
    pub fn new(id: Id, source: media::Source, looping: bool, surface: Box<dyn Surface>) -> Self {
        Self {
            id,
            source,
            surface,
            looping,
            inverted: false,
            rate: Rate::default(),
            frame: 0,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn source(&self) -> &media::Source {
        &self.source
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Current cursor into the frame sequence. Always 0 for videos.
    pub fn frame(&self) -> usize {
        self.frame
    }

    #[must_use]
    pub fn update(&mut self, event: Event) -> Option<Update> {
        match event {
            Event::PointerEntered => {
                self.looping = false;
                Some(Update::LoopingChanged)
            }
            Event::PointerExited => {
                self.looping = true;
                Some(Update::LoopingChanged)
            }
            Event::Clicked => {
                self.inverted = !self.inverted;
                Some(Update::InvertedChanged)
            }
            Event::DoubleClicked => {
                self.rate = self.rate.toggled();
                Some(Update::RateChanged)
            }
        }
    }

    /// Bring the surface in line with the current flags.
    /// Called by the scheduler once per pass; this is the only place
    /// that advances the frame cursor.
    pub fn reconcile(&mut self) -> Result<(), surface::Error> {
        self.surface.set_inverted(self.inverted)?;

        match &self.source {
            media::Source::Video { .. } => {
                self.surface.set_rate(self.rate.factor())?;

                if self.looping {
                    if !self.surface.is_playing() {
                        self.surface.play()?;
                    }
                } else if self.surface.is_playing() {
                    self.surface.pause()?;
                }
            }
            media::Source::Frames { frames } => {
                if self.looping {
                    self.frame = (self.frame + 1) % frames.len();
                    self.surface.show_frame(&frames[self.frame])?;
                }
            }
        }

        Ok(())
    }
}
