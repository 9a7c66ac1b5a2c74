use tracing::{error, info};

use super::{FramePacer, draw_panel};
use crate::error::{Error, Result};
use crate::overlay::{OverlayHost, PumpStatus};
use crate::telemetry::{Sample, Snapshot};

/// Why the render loop stopped
#[derive(Debug)]
pub enum LoopExit {
    /// The overlay window was destroyed
    WindowClosed,
    /// A rendering or OS call failed; the loop stopped at the tick boundary
    Faulted(Error),
}

#[derive(Debug)]
pub struct RunSummary {
    pub ticks: u64,
    pub exit: LoopExit,
}

/// Fixed-rate loop tying the sampler to the overlay.
///
/// Each tick, in order: drain window events, clear the back buffer, take one
/// snapshot, draw the panel, present, sleep out the rest of the period.
/// Single-threaded; the host, panel state and sampler are only touched here.
pub struct Compositor<H: OverlayHost, S: Sample> {
    host: H,
    sampler: S,
    pacer: FramePacer,
    title: String,
    ticks: u64,
    last_snapshot: Option<Snapshot>,
}

impl<H: OverlayHost, S: Sample> Compositor<H, S> {
    pub fn new(host: H, sampler: S, title: impl Into<String>) -> Self {
        Self {
            host,
            sampler,
            pacer: FramePacer::default(),
            title: title.into(),
            ticks: 0,
            last_snapshot: None,
        }
    }

    pub fn with_pacer(mut self, pacer: FramePacer) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    /// Number of frames presented so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn last_snapshot(&self) -> Option<&Snapshot> {
        self.last_snapshot.as_ref()
    }

    /// Run one tick without sleeping.
    pub fn tick(&mut self) -> Result<PumpStatus> {
        if self.host.pump_events()? == PumpStatus::Quit {
            return Ok(PumpStatus::Quit);
        }

        self.host.clear()?;
        let snapshot = self.sampler.sample();
        let origin = self.host.panel().top_left();
        draw_panel(&mut self.host, origin, &self.title, &snapshot)?;
        self.host.present()?;

        self.last_snapshot = Some(snapshot);
        self.ticks += 1;
        Ok(PumpStatus::Continue)
    }

    /// Run until the window closes or a tick fails.
    ///
    /// Errors never escape: they are logged here and reported in the summary.
    pub fn run(&mut self) -> RunSummary {
        info!(
            "Render loop started ({:.2} ms per tick)",
            self.pacer.period().as_secs_f64() * 1000.0
        );

        let exit = loop {
            match self.tick() {
                Ok(PumpStatus::Continue) => self.pacer.wait(),
                Ok(PumpStatus::Quit) => {
                    info!("Overlay closed after {} ticks", self.ticks);
                    break LoopExit::WindowClosed;
                }
                Err(e) => {
                    error!("Render loop stopped after {} ticks: {}", self.ticks, e);
                    break LoopExit::Faulted(e);
                }
            }
        };

        RunSummary {
            ticks: self.ticks,
            exit,
        }
    }
}
