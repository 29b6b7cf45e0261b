//! Pointer and touch input, normalized to one event stream

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A pointer event in client (pixel) coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
}

/// A touch event carrying every active touch point
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub touches: Vec<Vec2>,
}

impl TouchEvent {
    /// The equivalent pointer event: the first touch drives the pointer,
    /// and lifting ends it
    pub fn to_pointer(&self) -> Option<PointerEvent> {
        match self.phase {
            TouchPhase::Start => self.touches.first().map(|p| PointerEvent::Down(*p)),
            TouchPhase::Move => self.touches.first().map(|p| PointerEvent::Move(*p)),
            TouchPhase::End => Some(PointerEvent::Up),
        }
    }
}

/// Raw input from the host, mouse or touch
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Touch(TouchEvent),
}

impl InputEvent {
    pub fn normalize(&self) -> Option<PointerEvent> {
        match self {
            InputEvent::Pointer(event) => Some(*event),
            InputEvent::Touch(touch) => touch.to_pointer(),
        }
    }
}

impl From<PointerEvent> for InputEvent {
    fn from(event: PointerEvent) -> Self {
        InputEvent::Pointer(event)
    }
}

impl From<TouchEvent> for InputEvent {
    fn from(event: TouchEvent) -> Self {
        InputEvent::Touch(event)
    }
}

/// Screen rectangle of the render surface in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Client coordinate to normalized device coordinate (y up)
    ///
    /// None for an empty viewport or a non-finite result.
    pub fn to_ndc(&self, client: Vec2) -> Option<Vec2> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let ndc = Vec2::new(
            (client.x - self.left) / self.width * 2.0 - 1.0,
            -((client.y - self.top) / self.height) * 2.0 + 1.0,
        );
        ndc.is_finite().then_some(ndc)
    }
}
