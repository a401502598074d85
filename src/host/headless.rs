//! Display-less host that reads touch input as JSON lines.
//!
//! Used when the binary is built without `demo-gtk`, and handy for
//! scripting the control from a shell.  Every committed toggle is logged
//! at `info`, and the frame each event produces is logged at `debug` as
//! the list of drawing calls a real canvas would receive.
//!
//! # Wire format
//!
//! One JSON object per line.  `switch` indexes the configured switches;
//! `t_ms` optionally pins the event time (otherwise the wall clock since
//! start-up is used).
//!
//! ```json
//! {"switch":0,"event":{"Down":{"x":3.0}}}
//! {"switch":0,"event":{"Move":{"x":30.0}},"t_ms":50}
//! {"switch":0,"event":{"Up":{"x":30.0}},"t_ms":90}
//! {"switch":1,"event":"Tap"}
//! ```

use super::HostError;
use crate::color::Color;
use crate::frame::SwitchFrame;
use crate::geometry::{RoundedRect, Shadow};
use crate::gesture::TouchEvent;
use crate::switch::Switch;
use crate::traits::{Canvas, FnListener};
use crate::types::{KnobImage, SwitchState};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::io::BufRead;
use std::sync::mpsc;
use std::time::{Duration, Instant};

/// One line of host input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputLine {
    pub switch: usize,
    pub event: TouchEvent,
    #[serde(default)]
    pub t_ms: Option<u64>,
}

/// Drives a set of switches from line-oriented input.
pub struct HeadlessHost {
    switches: Vec<Switch>,
    toggles: mpsc::Receiver<(usize, SwitchState)>,
    epoch: Instant,
    last: Duration,
}

impl HeadlessHost {
    /// Take ownership of `switches` and attach a logging listener to each.
    pub fn new(mut switches: Vec<Switch>) -> Self {
        let (tx, rx) = mpsc::channel();
        for (index, switch) in switches.iter_mut().enumerate() {
            let tx = tx.clone();
            let variant = switch.variant();
            switch.set_listener(FnListener(move |state: SwitchState| {
                info!("switch {} ({}): {}", index, variant, state.label());
                let _ = tx.send((index, state));
            }));
        }
        info!("headless host ready with {} switch(es)", switches.len());
        Self {
            switches,
            toggles: rx,
            epoch: Instant::now(),
            last: Duration::ZERO,
        }
    }

    pub fn switches(&self) -> &[Switch] {
        &self.switches
    }

    /// Event time for `t_ms`.  Never earlier than the previous event.
    fn clock(&mut self, t_ms: Option<u64>) -> Duration {
        let now = match t_ms {
            Some(ms) => Duration::from_millis(ms),
            None => self.epoch.elapsed(),
        };
        self.last = self.last.max(now);
        self.last
    }

    /// Feed one event and return the toggles it committed.
    pub fn apply(&mut self, line: &InputLine) -> Result<Vec<SwitchState>, HostError> {
        let count = self.switches.len();
        let now = self.clock(line.t_ms);
        let switch = self
            .switches
            .get_mut(line.switch)
            .ok_or(HostError::NoSuchSwitch {
                index: line.switch,
                count,
            })?;

        debug!("switch {}: {:?} at {:?}", line.switch, line.event, now);
        switch.handle(line.event, now);

        if log::log_enabled!(log::Level::Debug) {
            match describe(&switch.frame(now)) {
                Ok(text) => debug!("switch {} frame:\n{}", line.switch, text),
                Err(e) => warn!("could not describe frame: {}", e),
            }
        }

        Ok(self.toggles.try_iter().map(|(_, state)| state).collect())
    }

    /// Parse one JSON input line and feed it.
    pub fn apply_json(&mut self, text: &str) -> Result<Vec<SwitchState>, HostError> {
        let line: InputLine = serde_json::from_str(text)?;
        self.apply(&line)
    }

    /// Process `input` until end of file and return the number of toggles.
    ///
    /// Malformed lines and unknown switch indices are logged and skipped;
    /// read errors end the run.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<usize, HostError> {
        let mut toggles = 0;
        for line in input.lines() {
            let text = line?;
            if text.trim().is_empty() {
                continue;
            }
            match self.apply_json(&text) {
                Ok(committed) => toggles += committed.len(),
                Err(e) => warn!("skipping {:?}: {}", text, e),
            }
        }
        for (index, switch) in self.switches.iter().enumerate() {
            info!("switch {} ({}) ends {}", index, switch.variant(), switch.state());
        }
        Ok(toggles)
    }
}

/// A [`Canvas`] that writes one line of text per drawing call.
#[derive(Debug, Default)]
pub struct TextCanvas {
    out: String,
}

impl TextCanvas {
    pub fn into_string(self) -> String {
        self.out
    }
}

fn shape(s: &RoundedRect) -> String {
    format!(
        "{:.1},{:.1} {:.1}x{:.1} r{:.1}",
        s.rect.x,
        s.rect.y,
        s.rect.width,
        s.rect.height,
        s.effective_radius()
    )
}

impl Canvas for TextCanvas {
    type Error = fmt::Error;

    fn fill_rounded_rect(&mut self, s: RoundedRect, color: Color) -> Result<(), fmt::Error> {
        writeln!(self.out, "fill   {} {}", shape(&s), color)
    }

    fn stroke_rounded_rect(
        &mut self,
        s: RoundedRect,
        width: f64,
        color: Color,
    ) -> Result<(), fmt::Error> {
        writeln!(self.out, "stroke {} w{:.1} {}", shape(&s), width, color)
    }

    fn shadow(&mut self, s: RoundedRect, shadow: &Shadow) -> Result<(), fmt::Error> {
        writeln!(
            self.out,
            "shadow {} blur{:.1} opacity{:.2}",
            shape(&s),
            shadow.radius,
            shadow.opacity
        )
    }

    fn image(&mut self, s: RoundedRect, image: &KnobImage) -> Result<(), fmt::Error> {
        writeln!(self.out, "image  {} {}", shape(&s), image.path.display())
    }

    fn push_clip(&mut self, s: RoundedRect) -> Result<(), fmt::Error> {
        writeln!(self.out, "clip   {}", shape(&s))
    }

    fn pop_clip(&mut self) -> Result<(), fmt::Error> {
        writeln!(self.out, "unclip")
    }
}

/// Render `frame` as text, one drawing call per line.
pub fn describe(frame: &SwitchFrame) -> Result<String, fmt::Error> {
    let mut canvas = TextCanvas::default();
    frame.paint(&mut canvas)?;
    Ok(canvas.into_string())
}
