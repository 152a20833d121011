use std::time::Duration;

use tokio::sync::{mpsc, watch};

use crate::{grid::Grid, screen};

/// Default delay between reconciliation passes (`pause_between_frames`).
pub const DEFAULT_TICK: Duration = Duration::from_millis(250);

/// Drives the whole grid from a single repeating tick.
///
/// Interaction events and reconciliation passes interleave on one task,
/// so flag changes land atomically between passes. Toggling a flag
/// mid-interval takes effect on the next tick, not immediately.
pub struct Scheduler {
    grid: Grid,
    tick: Duration,
}

impl Scheduler {
    pub fn new(grid: Grid, tick: Duration) -> Self {
        Self { grid, tick }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// One reconciliation pass over every screen, in creation order.
    /// A screen that fails is logged and skipped; it gets another
    /// chance on the next pass.
    pub fn pass(&mut self) {
        for screen in self.grid.screens_mut() {
            if let Err(e) = screen.reconcile() {
                log::warn!("Screen {} failed to reconcile: {e:?}", screen.id().0);
            }
        }
    }

    /// Tick until the stop token flips.
    ///
    /// Events may stop arriving (the channel can close) without ending the
    /// loop; only the stop token does that. Returns the grid so callers can
    /// inspect or tear down the final state.
    pub async fn run(
        mut self,
        mut events: mpsc::Receiver<(screen::Id, screen::Event)>,
        mut stop: watch::Receiver<bool>,
    ) -> Grid {
        let mut ticker = tokio::time::interval(self.tick);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut events_open = true;

        loop {
            if *stop.borrow() {
                break;
            }

            tokio::select! {
                _ = ticker.tick() => {
                    self.pass();
                }
                changed = stop.changed() => {
                    if changed.is_err() || *stop.borrow() {
                        break;
                    }
                }
                event = events.recv(), if events_open => {
                    match event {
                        Some((id, event)) => {
                            if let Some(update) = self.grid.handle(id, event) {
                                log::debug!("Screen {}: {update:?}", id.0);
                            }
                        }
                        None => {
                            events_open = false;
                        }
                    }
                }
            }
        }

        self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        media,
        resource::config::Playback,
        surface::testing::{Recording, RecordingMount},
    };
    use pretty_assertions::assert_eq;

    fn frames_source(count: usize) -> media::Source {
        let raws: Vec<String> = (0..count)
            .map(|i| format!("https://example.com/frames/{i}.png"))
            .collect();
        media::Source::identify_frames(&raws).unwrap()
    }

    fn frames_grid(count: usize) -> Grid {
        let mut mount = RecordingMount::default();
        Grid::new(&[frames_source(count)], &Playback::default(), &mut mount).unwrap()
    }

    #[test]
    fn pass_survives_a_failing_screen() {
        let sources = vec![
            media::Source::identify("https://example.com/a.mp4").unwrap(),
            media::Source::identify("https://example.com/b.mp4").unwrap(),
        ];
        let mut mount = RecordingMount::default();
        let mut grid = Grid::new(&sources, &Playback::default(), &mut mount).unwrap();

        // Screen 0 refuses to start playback; screen 1 must still be reconciled.
        grid.screens_mut()[0] = crate::screen::Screen::new(
            crate::screen::Id(0),
            sources[0].clone(),
            true,
            Box::new(Recording::failing()),
        );
        let (surface, calls) = Recording::new();
        grid.screens_mut()[1] =
            crate::screen::Screen::new(crate::screen::Id(1), sources[1].clone(), true, Box::new(surface));

        let mut scheduler = Scheduler::new(grid, DEFAULT_TICK);
        scheduler.pass();

        use crate::surface::testing::Call;
        assert!(calls.lock().unwrap().contains(&Call::Play));
    }

    #[test]
    fn pass_applied_twice_does_not_advance_video_state_twice() {
        let sources = vec![media::Source::identify("https://example.com/a.mp4").unwrap()];
        let mut grid = {
            let mut mount = RecordingMount::default();
            Grid::new(&sources, &Playback::default(), &mut mount).unwrap()
        };
        let (surface, calls) = Recording::new();
        grid.screens_mut()[0] =
            crate::screen::Screen::new(crate::screen::Id(0), sources[0].clone(), true, Box::new(surface));

        let mut scheduler = Scheduler::new(grid, DEFAULT_TICK);
        scheduler.pass();
        scheduler.pass();

        use crate::surface::testing::Call;
        let plays = calls.lock().unwrap().iter().filter(|x| **x == Call::Play).count();
        assert_eq!(1, plays);
    }

    #[tokio::test(start_paused = true)]
    async fn run_ticks_at_the_configured_cadence_until_stopped() {
        let scheduler = Scheduler::new(frames_grid(4), DEFAULT_TICK);
        let (_event_tx, event_rx) = mpsc::channel(16);
        let (stop_tx, stop_rx) = watch::channel(false);

        let handle = tokio::spawn(scheduler.run(event_rx, stop_rx));

        // Ticks land at 0, 250, 500, 750, and 1000 ms: five passes.
        tokio::time::sleep(Duration::from_millis(1100)).await;
        stop_tx.send(true).unwrap();

        let grid = handle.await.unwrap();
        assert_eq!(1, grid.screens()[0].frame());
    }

    #[tokio::test(start_paused = true)]
    async fn run_applies_events_between_passes() {
        let scheduler = Scheduler::new(frames_grid(4), DEFAULT_TICK);
        let (event_tx, event_rx) = mpsc::channel(16);
        let (stop_tx, stop_rx) = watch::channel(false);

        let handle = tokio::spawn(scheduler.run(event_rx, stop_rx));

        // Two passes (0 and 250 ms), then the pointer lands on the screen.
        tokio::time::sleep(Duration::from_millis(260)).await;
        event_tx
            .send((screen::Id(0), screen::Event::PointerEntered))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        stop_tx.send(true).unwrap();

        let grid = handle.await.unwrap();
        assert_eq!(2, grid.screens()[0].frame());
        assert!(!grid.screens()[0].is_looping());
    }

    #[tokio::test(start_paused = true)]
    async fn run_keeps_ticking_after_the_event_channel_closes() {
        let scheduler = Scheduler::new(frames_grid(8), DEFAULT_TICK);
        let (event_tx, event_rx) = mpsc::channel(16);
        let (stop_tx, stop_rx) = watch::channel(false);

        let handle = tokio::spawn(scheduler.run(event_rx, stop_rx));

        tokio::time::sleep(Duration::from_millis(260)).await;
        drop(event_tx);
        tokio::time::sleep(Duration::from_millis(500)).await;
        stop_tx.send(true).unwrap();

        let grid = handle.await.unwrap();
        assert_eq!(4, grid.screens()[0].frame());
    }
}
