//! Seams to the outside world: the [Renderer] that paints a [Grid] and the [InputSource]
//! that reports what the user did, plus small in-memory implementations of both.
use std::collections::VecDeque;

use crate::grid::Grid;

/// Position on the drawing surface in pixels, `x` to the right and `y` downwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelPos {
    pub x: u32,
    pub y: u32,
}

impl PixelPos {
    pub const fn new(x: u32, y: u32) -> PixelPos {
        PixelPos { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const PURPLE: Rgb = Rgb(127, 0, 255);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    PrimaryPress(PixelPos),
    SecondaryPress(PixelPos),
    /// Starts a search.
    KeyTrigger,
    /// Clears the grid and both endpoints.
    KeyReset,
}

/// Paints every cell using [Role::color](crate::Role::color), plus gridlines in a color of its
/// own choosing.
pub trait Renderer {
    fn present(&mut self, grid: &Grid);
}

/// Produces the events that arrived since the last call.
pub trait InputSource {
    fn poll(&mut self) -> Vec<InputEvent>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn present(&mut self, grid: &Grid) {
        (**self).present(grid)
    }
}

impl<I: InputSource + ?Sized> InputSource for &mut I {
    fn poll(&mut self) -> Vec<InputEvent> {
        (**self).poll()
    }
}

/// Replays a queue of per-frame batches. Once the queue runs dry every poll reports
/// [InputEvent::Quit], so a session driven by it always terminates.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<InputEvent>>,
    polls: usize,
}

impl ScriptedInput {
    pub fn new<I>(frames: I) -> ScriptedInput
    where
        I: IntoIterator<Item = Vec<InputEvent>>,
    {
        ScriptedInput {
            frames: frames.into_iter().collect(),
            polls: 0,
        }
    }
    /// Queues one batch per event.
    pub fn from_events<I>(events: I) -> ScriptedInput
    where
        I: IntoIterator<Item = InputEvent>,
    {
        ScriptedInput::new(events.into_iter().map(|e| vec![e]))
    }
    pub fn push_frame(&mut self, frame: Vec<InputEvent>) {
        self.frames.push_back(frame);
    }
    pub fn polls(&self) -> usize {
        self.polls
    }
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        self.polls += 1;
        self.frames
            .pop_front()
            .unwrap_or_else(|| vec![InputEvent::Quit])
    }
}

/// Renders frames as text via the [Display](core::fmt::Display) impl of [Grid] and keeps them.
#[derive(Clone, Debug, Default)]
pub struct TextRenderer {
    frames: Vec<String>,
    presented: usize,
    keep: Option<usize>,
}

impl TextRenderer {
    pub fn new() -> TextRenderer {
        TextRenderer::default()
    }
    /// Only the last `keep` frames are retained.
    pub fn bounded(keep: usize) -> TextRenderer {
        TextRenderer {
            keep: Some(keep),
            ..TextRenderer::default()
        }
    }
    pub fn frames(&self) -> &[String] {
        &self.frames
    }
    pub fn last_frame(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }
    /// Number of frames presented, including discarded ones.
    pub fn presented(&self) -> usize {
        self.presented
    }
}

impl Renderer for TextRenderer {
    fn present(&mut self, grid: &Grid) {
        self.presented += 1;
        self.frames.push(grid.to_string());
        if let Some(keep) = self.keep {
            if self.frames.len() > keep {
                let excess = self.frames.len() - keep;
                self.frames.drain(..excess);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_input_ends_with_quit() {
        let mut input = ScriptedInput::from_events([InputEvent::KeyTrigger]);
        assert_eq!(input.poll(), vec![InputEvent::KeyTrigger]);
        assert_eq!(input.poll(), vec![InputEvent::Quit]);
        assert_eq!(input.poll(), vec![InputEvent::Quit]);
        assert_eq!(input.polls(), 3);
    }

    #[test]
    fn bounded_renderer_drops_old_frames() {
        let grid = Grid::build(2, 1).unwrap();
        let mut renderer = TextRenderer::bounded(2);
        for _ in 0..5 {
            renderer.present(&grid);
        }
        assert_eq!(renderer.frames().len(), 2);
        assert_eq!(renderer.presented(), 5);
        assert_eq!(renderer.last_frame(), Some("..\n..\n"));
    }
}
