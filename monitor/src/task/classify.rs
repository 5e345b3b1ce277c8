//! Alert classification and LCD rendering
//!
//! Consumes whole samples from the queue, derives the alert level, latches it in the shared
//! display state and renders two lines of text for the latched level.
//!
//! # Loop
//! 1. Wait for a sample (bounded)
//! 2. If one arrived: lock the display state (bounded), classify, log a transition, release
//! 3. Read the display state back (bounded); on timeout keep rendering the last copy
//! 4. Render if due, with the lock already released
//!
//! # Rendering
//! - **Normal**: static text, redrawn every 5 s
//! - **Warning**: second line alternates between a marked and an unmarked banner, every 2 s
//! - **Critical**: text and blank screen alternate, every 1 s
//!
//! A fresh sample or a level change redraws right away. The flash phase restarts on a level
//! change, so the first frame of a new level is always the marked one.

use core::fmt::Write;

use embassy_time::Instant;

use crate::system::alert::{AlertLevel, Transition};
use crate::system::channels::SampleQueue;
use crate::system::collaborator::{TextDisplay, TextLine};
use crate::system::config::Timings;
use crate::system::display_state::{SharedDisplay, SharedDisplayState};
use crate::system::sample::Sample;

/// Turns the latched state into display frames at the level's cadence
#[derive(Debug, Clone)]
pub struct Renderer {
    marked: bool,
    last_frame: Option<(Instant, AlertLevel)>,
}

impl Renderer {
    pub const fn new() -> Self {
        Self {
            marked: true,
            last_frame: None,
        }
    }

    /// Returns the next frame if one is due at `now`.
    ///
    /// `fresh` forces a frame, it is set when a new sample was latched this pass.
    pub fn next_frame(
        &mut self,
        state: &SharedDisplayState,
        now: Instant,
        fresh: bool,
    ) -> Option<[TextLine; 2]> {
        let level = state.level;
        let due = match self.last_frame {
            None => true,
            Some((at, rendered)) => {
                let elapsed = now.saturating_duration_since(at);
                fresh || rendered != level || elapsed >= level.refresh_interval()
            }
        };
        if !due {
            return None;
        }

        if self.last_frame.map(|(_, rendered)| rendered) != Some(level) {
            self.marked = true;
        }

        let lines = frame(state, self.marked);
        if level != AlertLevel::Normal {
            self.marked = !self.marked;
        }
        self.last_frame = Some((now, level));
        Some(lines)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn text(s: &str) -> TextLine {
    let mut line = TextLine::new();
    // longer than the panel is cut off
    for c in s.chars() {
        if line.push(c).is_err() {
            break;
        }
    }
    line
}

/// Writer that keeps what fits and drops the rest
struct Clip<'a, const N: usize>(&'a mut heapless::String<N>);

impl<const N: usize> Write for Clip<'_, N> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Formats a reading line and cuts it to the panel.
///
/// Formatting goes through a scratch buffer twice the panel width, so an oversized reading
/// still fills the whole line instead of stopping at the piece that overflowed.
fn reading(args: core::fmt::Arguments<'_>) -> TextLine {
    let mut scratch: heapless::String<32> = heapless::String::new();
    // Clip never reports an error
    let _ = Clip(&mut scratch).write_fmt(args);
    text(&scratch)
}

/// Both lines for a state and flash phase
fn frame(state: &SharedDisplayState, marked: bool) -> [TextLine; 2] {
    let sample = &state.last_sample;
    if sample.is_sentinel() {
        return [text("Monitor ready"), text("Waiting data...")];
    }

    let (t, h) = (sample.temperature(), sample.humidity());
    match state.level {
        AlertLevel::Normal => {
            let first = reading(format_args!("OK {:.1}C {:.0}%", t, h));
            [first, text("Status: NORMAL")]
        }
        AlertLevel::Warning => {
            let first = reading(format_args!("!W {:.1}C {:.0}%", t, h));
            let banner = if marked {
                "**  WARNING  **"
            } else {
                "   WARNING     "
            };
            [first, text(banner)]
        }
        AlertLevel::Critical if marked => {
            let first = reading(format_args!("!!{:.1}C {:.0}%!!", t, h));
            [first, text("*** CRITICAL ***")]
        }
        AlertLevel::Critical => [TextLine::new(), TextLine::new()],
    }
}

/// Classification task state
pub struct Classification<'a, D> {
    samples: &'a SampleQueue,
    state: &'a SharedDisplay,
    display: D,
    renderer: Renderer,
    latched: SharedDisplayState,
    timings: Timings,
}

impl<'a, D: TextDisplay> Classification<'a, D> {
    pub fn new(
        samples: &'a SampleQueue,
        state: &'a SharedDisplay,
        display: D,
        timings: Timings,
    ) -> Self {
        Self {
            samples,
            state,
            display,
            renderer: Renderer::new(),
            latched: SharedDisplayState::INITIAL,
            timings,
        }
    }

    /// State the last frame was rendered from
    pub fn latched(&self) -> SharedDisplayState {
        self.latched
    }

    /// One loop pass for an optional new sample. Returns the level change, if any.
    pub async fn step(&mut self, received: Option<Sample>, now: Instant) -> Option<Transition> {
        let mut fresh = false;
        let mut transition = None;

        if let Some(sample) = received {
            debug!(
                "Sample received: {} C, {} %",
                sample.temperature(),
                sample.humidity()
            );
            let timeout = self.timings.state_lock_timeout;
            match self.state.update(sample, timeout).await {
                Ok(change) => {
                    if let Some(change) = change {
                        info!("State change: {}", change);
                        transition = Some(change);
                    }
                    fresh = true;
                }
                Err(e) => {
                    warn!("{}, keeping {} for this cycle", e, self.latched.level);
                }
            }
        }

        let timeout = self.timings.state_lock_timeout;
        match self.state.snapshot(timeout).await {
            Ok(state) => self.latched = state,
            Err(e) => warn!("{}, rendering last known state", e),
        }

        if let Some(lines) = self.renderer.next_frame(&self.latched, now, fresh) {
            if self.display.write_lines(&lines).await.is_err() {
                warn!("Display write failed, retrying next pass");
            }
        }

        transition
    }

    /// Classification loop
    pub async fn run(&mut self) -> ! {
        info!("Classification task started");
        loop {
            let timeout = self.timings.queue_receive_timeout;
            let received = self.samples.receive(timeout).await;
            self.step(received, Instant::now()).await;
        }
    }
}
