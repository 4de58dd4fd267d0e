//! Scripted collaborators and a manual clock for driving fishing cycles

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::Duration;

use bobber_sentinel::error::{CaptureError, DetectError, InputError};
use bobber_sentinel::{
    Clock, CycleConfig, DebugOverlay, Detector, FishingBot, Frame, FrameSource, InputInjector,
    MotionEvaluator, Rect, WindowHandle,
};
use chrono::{DateTime, TimeZone, Utc};
use image::DynamicImage;

pub const WINDOW_ORIGIN: (i32, i32) = (200, 100);

pub fn game_window() -> WindowHandle {
    WindowHandle {
        title: "World of Warcraft".to_string(),
        rect: (WINDOW_ORIGIN.0, WINDOW_ORIGIN.1, WINDOW_ORIGIN.0 + 800, WINDOW_ORIGIN.1 + 600),
        raw: 42,
    }
}

/// Time that only moves when someone sleeps
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
    pub sleeps: RefCell<Vec<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()),
            sleeps: RefCell::new(Vec::new()),
        }
    }

    pub fn total_slept(&self) -> Duration {
        self.sleeps.borrow().iter().sum()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
        let step = chrono::Duration::from_std(duration).unwrap();
        self.now.set(self.now.get() + step);
    }
}

/// Frames of a fixed window. Queued errors are returned first, then frames.
pub struct FakeFrames {
    pub errors: VecDeque<CaptureError>,
    pub captures: usize,
    pub window_gone: bool,
}

impl FakeFrames {
    pub fn new() -> Self {
        Self {
            errors: VecDeque::new(),
            captures: 0,
            window_gone: false,
        }
    }
}

impl FrameSource for FakeFrames {
    fn capture(&mut self) -> Result<Frame, CaptureError> {
        self.captures += 1;
        if self.window_gone {
            return Err(CaptureError::WindowNotFound("World of Warcraft".to_string()));
        }
        if let Some(err) = self.errors.pop_front() {
            return Err(err);
        }
        Ok(Frame {
            image: DynamicImage::new_rgba8(16, 12),
            window: game_window(),
        })
    }
}

pub enum Seen {
    Bobber(Rect),
    Raw([f64; 4]),
    Nothing,
    Broken,
}

/// Replays a fixed list of detections, then reports nothing forever
pub struct ScriptedDetector {
    pub script: VecDeque<Seen>,
    pub calls: usize,
}

impl ScriptedDetector {
    pub fn new(script: impl IntoIterator<Item = Seen>) -> Self {
        Self {
            script: script.into_iter().collect(),
            calls: 0,
        }
    }
}

impl Detector for ScriptedDetector {
    fn detect(&mut self, _image: &DynamicImage) -> Result<Option<[f64; 4]>, DetectError> {
        self.calls += 1;
        match self.script.pop_front() {
            Some(Seen::Bobber(r)) => Ok(Some([r.x1, r.y1, r.x2, r.y2])),
            Some(Seen::Raw(raw)) => Ok(Some(raw)),
            Some(Seen::Broken) => Err(DetectError::Inference("model crashed".to_string())),
            Some(Seen::Nothing) | None => Ok(None),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Focus(String),
    Key(String),
    Move(i32, i32),
    RightClick,
}

#[derive(Default)]
pub struct RecordingInput {
    pub events: Vec<InputEvent>,
    pub refuse_focus: bool,
    pub fail_click: bool,
}

impl RecordingInput {
    pub fn clicks(&self) -> usize {
        self.events
            .iter()
            .filter(|e| **e == InputEvent::RightClick)
            .count()
    }

    pub fn moves(&self) -> Vec<(i32, i32)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                InputEvent::Move(x, y) => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }
}

impl InputInjector for RecordingInput {
    fn focus(&mut self, window: &WindowHandle) -> bool {
        self.events.push(InputEvent::Focus(window.title.clone()));
        !self.refuse_focus
    }

    fn send_key(&mut self, key: &str) -> Result<(), InputError> {
        self.events.push(InputEvent::Key(key.to_string()));
        Ok(())
    }

    fn move_cursor(&mut self, x: i32, y: i32) -> Result<(), InputError> {
        self.events.push(InputEvent::Move(x, y));
        Ok(())
    }

    fn right_click(&mut self) -> Result<(), InputError> {
        if self.fail_click {
            return Err(InputError::Injection("mouse unplugged".to_string()));
        }
        self.events.push(InputEvent::RightClick);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingOverlay {
    pub rendered: Vec<Option<Rect>>,
}

impl DebugOverlay for RecordingOverlay {
    fn render(&mut self, _image: &DynamicImage, bbox: Option<&Rect>) {
        self.rendered.push(bbox.copied());
    }
}

pub type TestBot<'c> =
    FishingBot<FakeFrames, ScriptedDetector, RecordingInput, RecordingOverlay, &'c ManualClock>;

pub fn bot_with<'c>(
    clock: &'c ManualClock,
    frames: FakeFrames,
    script: impl IntoIterator<Item = Seen>,
    input: RecordingInput,
) -> TestBot<'c> {
    FishingBot::new(
        frames,
        ScriptedDetector::new(script),
        input,
        RecordingOverlay::default(),
        clock,
        CycleConfig::default(),
        MotionEvaluator::default(),
    )
}

/// A 20x49 box whose top edge sits at `top`. Moving it by one pixel gives a
/// distance ratio of 1 / 50 * 100 = 2%.
pub fn bobber_at(top: f64) -> Rect {
    Rect::new(100.0, top, 120.0, top + 49.0)
}

/// A 20x50 box whose left edge sits at `left`. Sideways moves keep the union
/// height at 50, so a move of `d` pixels gives a ratio of exactly `2 * d`.
pub fn swaying_at(left: f64) -> Rect {
    Rect::new(left, 100.0, left + 20.0, 150.0)
}

/// Bobber swaying sideways by one pixel: `n` detections, each ratio 2.0
pub fn idle_sway(n: usize) -> Vec<Seen> {
    (0..n)
        .map(|i| Seen::Bobber(swaying_at(100.0 + (i % 2) as f64)))
        .collect()
}

/// Bobber bobbing up and down by one pixel: `n` detections
pub fn idle_bobbing(n: usize) -> Vec<Seen> {
    (0..n)
        .map(|i| Seen::Bobber(bobber_at(100.0 + (i % 2) as f64)))
        .collect()
}
