//! The cast → sample → pull/timeout state machine
//!
//! One cycle casts the line, then samples the bobber position until either
//! its movement stands out from the cycle's running history (a bite, so the
//! bot clicks the bobber) or it has gone unseen for the grace period. The
//! supervisory loop in [`FishingBot::run`] repeats cycles after a cooldown.
//! Every wait goes through the injected [`Clock`].

use std::time::Duration;

use chrono::{DateTime, Utc};

use super::state::{CycleOutcome, CycleState, SessionStats};
use crate::bobber::{BobberInfo, MotionEvaluator, MotionRatio};
use crate::error::BotError;
use crate::geometry::{Point, Rect};
use crate::input::InputInjector;
use crate::screen_reader::{DebugOverlay, Detector, Frame, FrameSource};
use crate::utils::{Clock, Settings};
use crate::window::WindowHandle;

/// Timings and keys that drive a cycle
#[derive(Debug, Clone, PartialEq)]
pub struct CycleConfig {
    pub capture_delay: Duration,
    pub cast_delay: Duration,
    pub pull_settle_delay: Duration,
    pub post_pull_delay: Duration,
    pub timeout_grace: Duration,
    pub cooldown: Duration,
    pub cast_key: String,
    /// Pixels to move the click above the box centre
    pub click_y_offset: i32,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for CycleConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            capture_delay: settings.capture_delay(),
            cast_delay: settings.cast_delay(),
            pull_settle_delay: settings.pull_settle_delay(),
            post_pull_delay: settings.post_pull_delay(),
            timeout_grace: settings.timeout_grace(),
            cooldown: settings.cooldown(),
            cast_key: settings.cast_key.clone(),
            click_y_offset: settings.click_y_offset,
        }
    }
}

/// State owned by one cast cycle. Built fresh per cycle.
struct CastCycle {
    previous: Option<BobberInfo>,
    history: Vec<f64>,
    sampling_since: DateTime<Utc>,
}

impl CastCycle {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            previous: None,
            history: Vec::new(),
            sampling_since: now,
        }
    }

    /// Time since the bobber was last seen, or since sampling began
    fn unseen_for(&self, now: DateTime<Utc>) -> Duration {
        self.previous
            .map(|p| p.age(now))
            .unwrap_or_else(|| (now - self.sampling_since).to_std().unwrap_or_default())
    }
}

/// Result of one sampling iteration
enum SampleStep {
    Continue,
    Bite {
        bobber: BobberInfo,
        ratio: f64,
        window: WindowHandle,
    },
    Timeout(Duration),
}

/// The fishing bot: owns its collaborators and runs cast cycles
pub struct FishingBot<F, D, I, O, C> {
    frames: F,
    detector: D,
    input: I,
    overlay: O,
    clock: C,
    config: CycleConfig,
    evaluator: MotionEvaluator,
    state: CycleState,
    stats: SessionStats,
}

impl<F, D, I, O, C> FishingBot<F, D, I, O, C>
where
    F: FrameSource,
    D: Detector,
    I: InputInjector,
    O: DebugOverlay,
    C: Clock,
{
    pub fn new(
        frames: F,
        detector: D,
        input: I,
        overlay: O,
        clock: C,
        config: CycleConfig,
        evaluator: MotionEvaluator,
    ) -> Self {
        Self {
            frames,
            detector,
            input,
            overlay,
            clock,
            config,
            evaluator,
            state: CycleState::Casting,
            stats: SessionStats::default(),
        }
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    /// Run cycles until a fatal error, or until `max_cycles` have finished
    pub fn run(&mut self, max_cycles: Option<u64>) -> Result<SessionStats, BotError> {
        let mut completed = 0u64;
        loop {
            let outcome = self.run_cycle()?;
            self.stats.record(&outcome);
            completed += 1;

            tracing::info!(
                "[CYCLE] #{} finished: {} | catches={}, timeouts={}, rate={:.1}%",
                completed,
                outcome.final_state().description(),
                self.stats.catches,
                self.stats.timeouts,
                self.stats.rate
            );

            self.clock.sleep(self.config.cooldown);

            if max_cycles.is_some_and(|max| completed >= max) {
                return Ok(self.stats.clone());
            }
        }
    }

    /// Run one cast cycle: cast, then sample until a bite or a timeout
    pub fn run_cycle(&mut self) -> Result<CycleOutcome, BotError> {
        self.state = CycleState::Casting;
        self.cast()?;

        let mut cycle = CastCycle::new(self.clock.now());
        self.state = CycleState::Sampling;

        loop {
            match self.sample(&mut cycle)? {
                SampleStep::Continue => {}
                SampleStep::Bite {
                    bobber,
                    ratio,
                    window,
                } => {
                    self.state = CycleState::Acting;
                    let click = self.pull(&bobber, &window)?;
                    return Ok(CycleOutcome::Caught {
                        bobber,
                        ratio,
                        click,
                        samples: cycle.history.len(),
                    });
                }
                SampleStep::Timeout(unseen_for) => {
                    self.state = CycleState::TimedOut;
                    tracing::info!(
                        "[SAMPLE] Bobber not seen for {:.1}s, giving up on this cast",
                        unseen_for.as_secs_f64()
                    );
                    return Ok(CycleOutcome::TimedOut {
                        samples: cycle.history.len(),
                        unseen_for,
                    });
                }
            }
        }
    }

    /// Capture a frame. Only a missing window is an error; other capture
    /// failures cost this frame.
    fn grab_frame(&mut self) -> Result<Option<Frame>, BotError> {
        match self.frames.capture() {
            Ok(frame) => Ok(Some(frame)),
            Err(e) if e.is_fatal() => Err(e.into()),
            Err(e) => {
                tracing::warn!("[CAPTURE] {}", e);
                Ok(None)
            }
        }
    }

    /// Run the detector and validate its box. Errors count as no detection.
    fn locate_bobber(&mut self, frame: &Frame) -> Option<Rect> {
        match self.detector.detect(&frame.image) {
            Ok(Some([x1, y1, x2, y2])) => {
                let rect = Rect::from_corners(x1, y1, x2, y2);
                if rect.is_none() {
                    tracing::debug!("[DETECT] Discarding invalid box ({x1}, {y1}, {x2}, {y2})");
                }
                rect
            }
            Ok(None) => None,
            Err(e) => {
                tracing::debug!("[DETECT] {}", e);
                None
            }
        }
    }

    fn cast(&mut self) -> Result<(), BotError> {
        tracing::debug!("[CAST] {}", CycleState::Casting.description());

        let frame = self.grab_frame()?;
        let window = match frame {
            Some(frame) => {
                if self.locate_bobber(&frame).is_none() {
                    tracing::warn!("[CAST] Bobber not detected, casting...");
                }
                Some(frame.window)
            }
            None => None,
        };

        if let Some(window) = &window {
            if !self.input.focus(window) {
                tracing::warn!("[CAST] Could not focus '{}'", window.title);
            }
        }
        self.input.send_key(&self.config.cast_key)?;
        self.clock.sleep(self.config.cast_delay);
        Ok(())
    }

    fn sample(&mut self, cycle: &mut CastCycle) -> Result<SampleStep, BotError> {
        self.clock.sleep(self.config.capture_delay);

        let Some(frame) = self.grab_frame()? else {
            return Ok(self.check_timeout(cycle));
        };

        let Some(bbox) = self.locate_bobber(&frame) else {
            self.overlay.render(&frame.image, None);
            return Ok(self.check_timeout(cycle));
        };

        let current = BobberInfo::observe(bbox, self.clock.now());
        self.overlay.render(&frame.image, Some(&current.bbox));

        let Some(previous) = cycle.previous else {
            tracing::debug!("[SAMPLE] Baseline {}", current);
            cycle.previous = Some(current);
            return Ok(SampleStep::Continue);
        };

        let ratio = MotionRatio::between(&previous.bbox, &current.bbox);
        tracing::trace!(
            "[SAMPLE] ratio vertical={:.3} horizontal={:.3} history={}",
            ratio.vertical,
            ratio.horizontal,
            cycle.history.len()
        );

        if self.evaluator.is_significant(ratio.value(), &cycle.history) {
            return Ok(SampleStep::Bite {
                bobber: current,
                ratio: ratio.value(),
                window: frame.window,
            });
        }

        cycle.history.push(ratio.value());
        cycle.previous = Some(current);
        Ok(SampleStep::Continue)
    }

    fn check_timeout(&self, cycle: &CastCycle) -> SampleStep {
        let unseen_for = cycle.unseen_for(self.clock.now());
        if unseen_for >= self.config.timeout_grace {
            SampleStep::Timeout(unseen_for)
        } else {
            SampleStep::Continue
        }
    }

    /// Click the bobber. Returns the screen position that was clicked.
    fn pull(&mut self, bobber: &BobberInfo, window: &WindowHandle) -> Result<(i32, i32), BotError> {
        self.clock.sleep(self.config.pull_settle_delay);

        if !self.input.focus(window) {
            tracing::warn!("[PULL] Could not focus '{}', clicking anyway", window.title);
        }

        let center = bobber.bbox.center();
        let target = Point::new(center.x, center.y - self.config.click_y_offset as f64);
        let (x, y) = window.to_screen(target);

        tracing::info!(
            "[PULL] Pulling: window rect={:?}, bobber center={}, click point=({}, {})",
            window.rect,
            center,
            x,
            y
        );

        self.input.move_cursor(x, y)?;
        self.input.right_click()?;
        self.clock.sleep(self.config.post_pull_delay);
        Ok((x, y))
    }
}
