//! Scriptable overlay host for loop tests.

use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::overlay::{
    Canvas, OverlayHost, PanelState, Point, PointerEvent, PumpStatus, Rect, Rgb, TextStyle,
};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Fill(Rect, Rgb),
    Box(Rect, Rgb),
    Text {
        text: String,
        at: Point,
        style: TextStyle,
    },
    Present,
}

/// What one call to `pump_events` delivers
#[derive(Debug, Clone)]
pub enum Pump {
    Events(Vec<PointerEvent>),
    Close,
}

#[derive(Debug, Default)]
pub struct RecordingHost {
    commands: Vec<DrawCommand>,
    script: VecDeque<Pump>,
    panel: PanelState,
    fail_present_after: Option<usize>,
    presents: usize,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(script: impl IntoIterator<Item = Pump>) -> Self {
        Self {
            script: script.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Make `present` fail once it has succeeded `count` times
    pub fn fail_present_after(mut self, count: usize) -> Self {
        self.fail_present_after = Some(count);
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn presents(&self) -> usize {
        self.presents
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Canvas for RecordingHost {
    fn clear(&mut self) -> Result<()> {
        self.commands.push(DrawCommand::Clear);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> Result<()> {
        self.commands.push(DrawCommand::Fill(rect, color));
        Ok(())
    }

    fn draw_box(&mut self, rect: Rect, color: Rgb) -> Result<()> {
        self.commands.push(DrawCommand::Box(rect, color));
        Ok(())
    }

    fn draw_text(&mut self, text: &str, at: Point, style: TextStyle) -> Result<()> {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            style,
        });
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        if self.fail_present_after == Some(self.presents) {
            return Err(Error::Gdi("BitBlt"));
        }
        self.presents += 1;
        self.commands.push(DrawCommand::Present);
        Ok(())
    }
}

impl OverlayHost for RecordingHost {
    fn pump_events(&mut self) -> Result<PumpStatus> {
        match self.script.pop_front() {
            Some(Pump::Close) => Ok(PumpStatus::Quit),
            Some(Pump::Events(events)) => {
                for event in events {
                    self.panel.handle(event);
                }
                Ok(PumpStatus::Continue)
            }
            None => Ok(PumpStatus::Continue),
        }
    }

    fn panel(&self) -> &PanelState {
        &self.panel
    }
}
