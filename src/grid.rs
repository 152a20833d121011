use crate::{
    media,
    prelude::Error,
    resource::config::Playback,
    screen::{self, Screen},
    surface::Mount,
};

pub const ROWS: usize = 3;
pub const COLUMNS: usize = 3;
pub const CELLS: usize = ROWS * COLUMNS;

/// Registry of every screen on the wall, in creation order.
/// Screens are created once at startup and live until shutdown.
pub struct Grid {
    screens: Vec<Screen>,
}

impl Grid {
    /// Bind sources to exactly [`CELLS`] screens, ids 0 through `CELLS - 1`.
    /// When there are fewer sources than cells, the first source fills the
    /// remaining cells; extra sources are ignored.
    pub fn new(sources: &[media::Source], playback: &Playback, mount: &mut dyn Mount) -> Result<Self, Error> {
        let Some(first) = sources.first() else {
            return Err(Error::NoMediaFound);
        };

        if sources.len() > CELLS {
            log::warn!("Ignoring {} extra sources beyond the {CELLS}-cell grid", sources.len() - CELLS);
        }

        let mut screens = Vec::with_capacity(CELLS);
        for cell in 0..CELLS {
            let id = screen::Id(cell);
            let source = sources.get(cell).unwrap_or(first);
            let surface = mount.attach(id, source).map_err(|e| Error::ScreenUnavailable {
                why: format!("{e:?}"),
            })?;
            screens.push(Screen::new(id, source.clone(), playback.looping, surface));
        }

        Ok(Self { screens })
    }

    /// Route an interaction event to one screen.
    /// Unknown ids are ignored so a stale collaborator cannot panic the wall.
    #[must_use]
    pub fn handle(&mut self, id: screen::Id, event: screen::Event) -> Option<screen::Update> {
        let screen = self.screens.get_mut(id.0)?;
        screen.update(event)
    }

    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    pub fn screens_mut(&mut self) -> &mut [Screen] {
        &mut self.screens
    }
}
