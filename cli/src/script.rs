//! Replay scripts: one JSON host event per line.
//!
//! ```text
//! {"op": "attach", "surface": "d1", "viewport": {"width": 800, "height": 600}, "content": {"width": 400, "height": 100}}
//! {"op": "drag", "dx": 10, "dy": 20}
//! {"op": "resize", "width": 640, "height": 480}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use panzoom::headless::{HeadlessEngine, HeadlessSurface, ResizeWatch};
use panzoom::{InitialTransform, Point, Size, Transform, ViewConfig, ViewError, ViewTransformController};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;

/// Errors raised while loading or replaying a script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    View(#[from] ViewError),
}

/// A single host event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Attach {
        surface: String,
        viewport: Size,
        content: Size,
        #[serde(default)]
        pan: Option<Point>,
        #[serde(default)]
        zoom: Option<f64>,
        /// Re-attach with the transform recorded so far instead of `pan`/`zoom`,
        /// the way a host restores persisted state.
        #[serde(default)]
        keep: bool,
    },
    Drag {
        dx: f64,
        dy: f64,
    },
    Wheel {
        x: f64,
        y: f64,
        factor: f64,
    },
    Dblclick {
        x: f64,
        y: f64,
    },
    Resize {
        width: f64,
        height: f64,
    },
    Reset,
    ZoomIn,
    ZoomOut,
    PanEnabled {
        enabled: bool,
    },
    Restore {
        pan: Point,
        zoom: f64,
    },
    Detach,
}

/// A script step tagged with its 1-based source line.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub step: Step,
}

/// Output record, one JSON object per line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Record {
    /// A listener notification caused by the step on `line`.
    Change { line: usize, pan: Point, zoom: f64 },
    /// Controller state after the last step.
    Final { bound: bool, dirty: bool, pan_enabled: bool, transform: Option<Transform>, current: Option<Transform> },
}

/// Parse a whole script.
///
/// # Errors
///
/// Returns [`ScriptError::Parse`] with the offending line number.
pub fn parse(text: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut steps = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let line = idx + 1;
        let step = serde_json::from_str(trimmed).map_err(|source| ScriptError::Parse { line, source })?;
        steps.push(ScriptLine { line, step });
    }
    Ok(steps)
}

type Controller = ViewTransformController<HeadlessEngine, ResizeWatch>;

/// Replay `steps` against a headless controller, collecting output records.
///
/// # Errors
///
/// Returns [`ScriptError::View`] if `config` is rejected by the controller.
pub fn replay(steps: &[ScriptLine], config: ViewConfig) -> Result<Vec<Record>, ScriptError> {
    let mut controller: Controller = ViewTransformController::with_config(config, ResizeWatch::new())?;
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    controller.subscribe(move |t: &Transform| sink.borrow_mut().push(*t));

    let mut records = Vec::new();
    for ScriptLine { line, step } in steps {
        apply(&mut controller, *line, step);
        records.extend(
            changes.borrow_mut().drain(..).map(|t| Record::Change { line: *line, pan: t.pan, zoom: t.zoom }),
        );
    }

    records.push(Record::Final {
        bound: controller.is_bound(),
        dirty: controller.is_dirty(),
        pan_enabled: controller.pan_enabled(),
        transform: controller.transform(),
        current: controller.current_transform(),
    });
    Ok(records)
}

fn apply(c: &mut Controller, line: usize, step: &Step) {
    match step {
        Step::Attach { surface, viewport, content, pan, zoom, keep } => {
            let surface = HeadlessSurface::new(surface.clone(), *viewport, *content);
            let initial = match c.transform() {
                Some(saved) if *keep => InitialTransform::from(saved),
                _ => InitialTransform { pan: *pan, zoom: *zoom },
            };
            c.attach_surface(&surface, initial);
        }
        Step::Drag { dx, dy } => {
            let event = c.engine_mut().and_then(|e| e.drag_by(Point::new(*dx, *dy)));
            forward(c, line, event);
        }
        Step::Wheel { x, y, factor } => {
            let event = c.engine_mut().and_then(|e| e.wheel_zoom(Point::new(*x, *y), *factor));
            forward(c, line, event);
        }
        Step::Dblclick { x, y } => {
            let event = c.engine_mut().and_then(|e| e.double_click(Point::new(*x, *y)));
            forward(c, line, event);
        }
        Step::Resize { width, height } => {
            if let Some(engine) = c.engine_mut() {
                engine.set_viewport(Size::new(*width, *height));
            }
            c.handle_resize();
        }
        Step::Reset => c.reset(),
        Step::ZoomIn => c.zoom_in(),
        Step::ZoomOut => c.zoom_out(),
        Step::PanEnabled { enabled } => c.set_pan_enabled(*enabled),
        Step::Restore { pan, zoom } => c.restore_pan_zoom(*pan, *zoom),
        Step::Detach => c.detach(),
    }
}

fn forward(c: &mut Controller, line: usize, event: Option<panzoom::GestureEvent>) {
    match event {
        Some(event) => {
            c.handle_gesture(event);
        }
        None => warn!(line, "input ignored: no surface attached or gesture disabled"),
    }
}

/// Write records as JSON lines.
///
/// # Errors
///
/// Returns [`ScriptError::Encode`] or [`ScriptError::Io`] if writing fails.
pub fn write_records<W: Write>(out: &mut W, records: &[Record]) -> Result<(), ScriptError> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    }
    Ok(())
}
