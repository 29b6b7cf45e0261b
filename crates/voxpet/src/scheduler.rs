//! Frame scheduling and listener bookkeeping for the engine
//!
//! The host calls `FrameScheduler::tick` once per display refresh. After
//! `cancel` every tick is refused, so a host callback that fires late can
//! never reach a torn-down habitat.

use voxpet_core::InputEvent;
use voxpet_core::interaction::{PointerEvent, TouchPhase};

/// Longest step handed to the simulation; longer gaps (a backgrounded tab,
/// a debugger pause) are truncated
pub const MAX_FRAME_MS: f32 = 250.0;

#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    last_ms: Option<f64>,
    frames: u64,
    cancelled: bool,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a frame at `now_ms`, returning the elapsed time since the
    /// previous one, or `None` once cancelled
    pub fn tick(&mut self, now_ms: f64) -> Option<f32> {
        if self.cancelled || !now_ms.is_finite() {
            return None;
        }
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last).max(0.0) as f32).min(MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        self.frames += 1;
        Some(dt)
    }

    pub fn cancel(&mut self) {
        if !self.cancelled {
            log::debug!("Frame scheduler cancelled after {} frames", self.frames);
        }
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Handle returned when registering a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Callbacks for one kind of payload
pub struct ListenerRegistry<T> {
    next_id: u64,
    listeners: Vec<(ListenerId, Box<dyn FnMut(&T)>)>,
}

impl<T> Default for ListenerRegistry<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }
}

impl<T> ListenerRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, listener: impl FnMut(&T) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not registered
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(other, _)| *other != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, payload: &T) {
        for (_, listener) in &mut self.listeners {
            listener(payload);
        }
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Host input channels the engine listens on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputChannel {
    PointerDown,
    PointerMove,
    PointerUp,
    TouchStart,
    TouchMove,
    TouchEnd,
}

impl InputChannel {
    pub const ALL: [InputChannel; 6] = [
        InputChannel::PointerDown,
        InputChannel::PointerMove,
        InputChannel::PointerUp,
        InputChannel::TouchStart,
        InputChannel::TouchMove,
        InputChannel::TouchEnd,
    ];

    /// Channel a raw event arrives on
    pub fn of(event: &InputEvent) -> Self {
        match event {
            InputEvent::Pointer(PointerEvent::Down(_)) => InputChannel::PointerDown,
            InputEvent::Pointer(PointerEvent::Move(_)) => InputChannel::PointerMove,
            InputEvent::Pointer(PointerEvent::Up) => InputChannel::PointerUp,
            InputEvent::Touch(touch) => match touch.phase {
                TouchPhase::Start => InputChannel::TouchStart,
                TouchPhase::Move => InputChannel::TouchMove,
                TouchPhase::End => InputChannel::TouchEnd,
            },
        }
    }
}

/// Which input channels are currently attached
#[derive(Debug, Clone, Default)]
pub struct InputListeners {
    attached: Vec<InputChannel>,
}

impl InputListeners {
    /// All channels attached
    pub fn attached() -> Self {
        Self {
            attached: InputChannel::ALL.to_vec(),
        }
    }

    pub fn attach(&mut self, channel: InputChannel) {
        if !self.attached.contains(&channel) {
            self.attached.push(channel);
        }
    }

    pub fn detach(&mut self, channel: InputChannel) {
        self.attached.retain(|c| *c != channel);
    }

    pub fn detach_all(&mut self) {
        self.attached.clear();
    }

    pub fn accepts(&self, event: &InputEvent) -> bool {
        self.attached.contains(&InputChannel::of(event))
    }

    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }
}
