// One full render pass and the machinery around it: grid, evaluation,
// magnitudes, colours, packed image - plus the worker thread and the
// superseding abort policy.
//
// A render always runs to completion; the abort flag only decides whether
// its result is emitted. Requesting a new render while one is in flight
// marks the old one superseded and joins its worker before the replacement
// starts, so two renders never write results concurrently.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread::JoinHandle;

use image::RgbImage;
use log::{debug, info};
use num::complex::Complex;

use crate::color::colorize;
use crate::error::{PlotError, PlotResult};
use crate::expr::Function;
use crate::grid::{ComplexField, Grid};
use crate::normalize::normalize;
use crate::plot::PlotSpec;

/// The packed image together with the raw field and grid it came from,
/// kept for cursor-position value lookup.
#[derive(Debug)]
pub struct RenderResult {
    pub image : RgbImage,
    pub values : ComplexField,
    pub grid : Grid,
}

impl RenderResult {
    /// Function value under pixel (col, row).
    pub fn value_at(&self, col : usize, row : usize) -> Complex<f64> {
        self.values.at(row, col)
    }

    /// World coordinate under pixel (col, row).
    pub fn coord_at(&self, col : usize, row : usize) -> (f64, f64) {
        (self.grid.x_at(row, col), self.grid.y_at(row, col))
    }
}

/// Run the whole pipeline synchronously for one spec. A bad expression
/// fails here before any pixel work; runtime math problems do not fail at
/// all, they colour pixels through the non-finite rules.
pub fn render_frame(spec : &PlotSpec) -> PlotResult<RenderResult> {
    let function = Function::parse(spec.expression())?;
    let grid = Grid::generate(
        spec.width(),
        spec.height(),
        spec.scale(),
        spec.offset_x(),
        spec.offset_y(),
    );
    let values = function.eval_grid(&grid);
    let magnitudes = normalize(
        &values,
        spec.use_log(),
        spec.use_normalization(),
        spec.band_distance(),
    );
    let image = colorize(&values, &magnitudes, spec.use_normalization());
    Ok(RenderResult { image, values, grid })
}

pub enum RenderOutcome {
    Completed(RenderResult),
    Failed(PlotError),
    Superseded,
}

/// Handle to a render running on its own worker thread.
pub struct RenderHandle {
    abort : Arc<AtomicBool>,
    worker : Option<JoinHandle<()>>,
    outcome : Receiver<RenderOutcome>,
}

/// Snapshot the spec and start a worker for it.
pub fn render(spec : &PlotSpec) -> RenderHandle {
    let snapshot = spec.clone();
    let abort = Arc::new(AtomicBool::new(false));
    let worker_abort = Arc::clone(&abort);
    let (sender, receiver) = channel();
    info!(
        "rendering {} at {}x{}",
        snapshot.expression(),
        snapshot.width(),
        snapshot.height()
    );
    let worker = std::thread::spawn(move || {
        let outcome = match render_frame(&snapshot) {
            Ok(result) => RenderOutcome::Completed(result),
            Err(err) => RenderOutcome::Failed(err),
        };
        // The render ran to completion either way; a set abort flag only
        // stops the result from being emitted.
        let outcome = if worker_abort.load(Ordering::SeqCst) {
            debug!("render of {} superseded, dropping result", snapshot.expression());
            RenderOutcome::Superseded
        } else {
            outcome
        };
        let _ = sender.send(outcome);
    });
    RenderHandle {
        abort,
        worker: Some(worker),
        outcome: receiver,
    }
}

impl RenderHandle {
    /// Mark this render superseded. The worker still runs to completion;
    /// its result is discarded instead of emitted.
    pub fn abort(&self) {
        self.abort.store(true, Ordering::SeqCst);
    }

    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Block until the worker has fully stopped, then take its outcome.
    pub fn wait(mut self) -> RenderOutcome {
        self.join();
        // A worker that died without emitting left nothing for the caller
        self.outcome.try_recv().unwrap_or(RenderOutcome::Superseded)
    }

    /// Non-blocking poll for an emitted outcome.
    pub fn try_outcome(&mut self) -> Option<RenderOutcome> {
        self.outcome.try_recv().ok()
    }

    fn join(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Render controller owning the single in-flight render.
pub struct Plotter {
    current : Option<RenderHandle>,
}

impl Plotter {
    pub fn new() -> Plotter {
        Plotter { current: None }
    }

    /// Start a render of this spec, superseding any render still in
    /// flight: its abort flag is set, its worker joined, and its outcome
    /// discarded before the new worker starts.
    pub fn request_render(&mut self, spec : &PlotSpec) {
        if let Some(previous) = self.current.take() {
            previous.abort();
            let _ = previous.wait();
        }
        self.current = Some(render(spec));
    }

    /// Block for the outcome of the current render, if any.
    pub fn wait(&mut self) -> Option<RenderOutcome> {
        self.current.take().map(RenderHandle::wait)
    }

    pub fn is_rendering(&self) -> bool {
        self.current.as_ref().map_or(false, |handle| !handle.is_finished())
    }
}

impl Default for Plotter {
    fn default() -> Plotter {
        Plotter::new()
    }
}
