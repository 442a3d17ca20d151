//! The application loop: a [`Model`] updated by messages from a [`Driver`],
//! drawn into a [`Screen`] and flushed as [`Frame`] diffs.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};

use crate::messages::Msg;
use crate::screen::{Frame, Screen, compute_frame};

/// Shared stop flag. Set once the model returns [`Effect::End`]; drivers
/// check it to leave `poll_msgs` early.
#[derive(Clone, Debug, Default)]
pub struct Context(Arc<AtomicBool>);

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// A side-effect returned by [`Model::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start (`true`) or stop (`false`) delivering [`Msg::Tick`] once per
    /// loop iteration.
    Animate(bool),
    /// Multiple effects applied in order.
    Batch(Vec<Effect>),
    /// Signal the application loop to stop.
    End,
}

/// Application state driven by messages.
pub trait Model {
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Paint the whole state. The loop diffs against the previous frame.
    fn draw(&self, screen: &mut Screen);
}

/// An input/output back-end.
pub trait Driver {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Poll for input messages, sending them through `tx`. Must return within
    /// a frame's worth of time so animation keeps running, and return early
    /// once `ctx.is_done()`.
    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>>;

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Restore the back-end. Called even when the loop fails.
    fn close(&mut self);
}

pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub width: i32,
    pub height: i32,
}

/// Runs a [`Model`] against a [`Driver`].
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    width: i32,
    height: i32,
    animating: bool,
}

impl<M: Model, D: Driver> App<M, D> {
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            width: config.width,
            height: config.height,
            animating: false,
        }
    }

    /// The model, e.g. to inspect it after [`run`](Self::run) returns.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run until the model returns [`Effect::End`].
    ///
    /// The model sees [`Msg::Init`] first, then driver input and, while
    /// animating, one [`Msg::Tick`] per poll. Only changed glyphs are
    /// flushed. The driver is closed on every exit path.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.driver.init()?;
        let result = self.event_loop();
        self.driver.close();
        result
    }

    fn event_loop(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let ctx = Context::new();
        let (tx, rx) = mpsc::channel::<Msg>();

        let mut prev = Screen::new(self.width, self.height);
        let mut curr = Screen::new(self.width, self.height);

        tx.send(Msg::Init).ok();
        self.process_pending(&rx, &ctx, &mut prev, &mut curr)?;

        while !ctx.is_done() {
            self.driver.poll_msgs(&ctx, tx.clone())?;
            if ctx.is_done() {
                break;
            }
            if self.animating {
                tx.send(Msg::Tick).ok();
            }
            self.process_pending(&rx, &ctx, &mut prev, &mut curr)?;
        }
        Ok(())
    }

    // Returns early, without drawing, once an effect ends the app.
    fn process_pending(
        &mut self,
        rx: &Receiver<Msg>,
        ctx: &Context,
        prev: &mut Screen,
        curr: &mut Screen,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut needs_draw = false;

        while let Ok(msg) = rx.try_recv() {
            if let Some(effect) = self.model.update(msg) {
                if self.apply(effect, ctx) {
                    return Ok(());
                }
            }
            needs_draw = true;
        }

        if needs_draw {
            self.model.draw(curr);
            let frame = compute_frame(prev, curr);
            if !frame.glyphs.is_empty() {
                self.driver.flush(frame)?;
            }
            prev.copy_from(curr);
        }

        Ok(())
    }

    /// `true` once the app should stop.
    fn apply(&mut self, effect: Effect, ctx: &Context) -> bool {
        match effect {
            Effect::End => {
                ctx.cancel();
                true
            }
            Effect::Animate(on) => {
                self.animating = on;
                false
            }
            Effect::Batch(effects) => effects.into_iter().any(|e| self.apply(e, ctx)),
        }
    }
}
