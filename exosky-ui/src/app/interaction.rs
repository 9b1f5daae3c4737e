//! Pointer interaction shared by the 3D pages.
//!
//! [`Interaction`] turns raw mouse events into [`Intent`]s for the page to
//! act on (camera moves and ray casts), and keeps the state that results
//! from acting on them: tooltip, selection and drawn lines.

use nalgebra::{
    Point2,
    Point3,
    Vector2,
};
use serde::{
    Deserialize,
    Serialize,
};
use smallvec::SmallVec;

use crate::{
    graphics::{
        camera::{
            Camera,
            Viewport,
        },
        picking::{
            pick,
            PickOptions,
        },
        scene::LineSegment,
    },
    input::mouse::{
        MouseButton,
        MouseEvent,
    },
    sky::point_cloud::{
        PointCloud,
        PointInfo,
    },
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawVariant {
    /// Every two picks make one line.
    #[default]
    Pairs,
    /// Each line starts where the previous one ended.
    Chain,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Default,
    Drawing(DrawVariant),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Rotate,
    Pan,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Whether the secondary button pans.
    pub allow_pan: bool,
    pub draw_variant: DrawVariant,
}

/// What the page should do in response to a mouse event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Intent {
    /// Drag rotation by this many pixels.
    Rotate(Vector2<f32>),
    Pan(Vector2<f32>),
    /// Wheel delta along y.
    Zoom(f32),
    /// Cast a ray for hover feedback.
    Hover(Point2<f32>),
    /// Cast a ray for a click.
    Pick(Point2<f32>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub text: String,
    pub position: Point2<f32>,
}

/// Persistent readout of a clicked point.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    pub point: PointInfo,
    pub text: String,
    pub position: Point2<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClickOutcome {
    Selected,
    Dismissed,
    LineStarted,
    LineCompleted(LineSegment),
    Ignored,
}

#[derive(Clone, Debug, Default)]
pub struct Interaction {
    config: InteractionConfig,
    mode: Mode,
    drag: DragState,
    last_position: Option<Point2<f32>>,
    tooltip: Option<Tooltip>,
    selection: Option<Selection>,
    line_start: Option<Point3<f32>>,
    lines: Vec<LineSegment>,
}

impl Interaction {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn line_start(&self) -> Option<Point3<f32>> {
        self.line_start
    }

    pub fn lines(&self) -> &[LineSegment] {
        &self.lines
    }

    pub fn handle_mouse(&mut self, event: &MouseEvent) -> SmallVec<[Intent; 2]> {
        let mut intents = SmallVec::new();

        match event {
            MouseEvent::ButtonDown { button, position } => {
                self.drag = match button {
                    MouseButton::Left => DragState::Rotate,
                    MouseButton::Right if self.config.allow_pan => DragState::Pan,
                    _ => self.drag,
                };
                self.last_position = Some(*position);
            }
            MouseEvent::ButtonUp { button, .. } => {
                let ends_drag = match self.drag {
                    DragState::Rotate => *button == MouseButton::Left,
                    DragState::Pan => *button == MouseButton::Right,
                    DragState::Idle => false,
                };
                if ends_drag {
                    self.drag = DragState::Idle;
                }
            }
            MouseEvent::Move { position, .. } => {
                let delta = self
                    .last_position
                    .map(|last| *position - last)
                    .unwrap_or_else(Vector2::zeros);
                match self.drag {
                    DragState::Rotate => intents.push(Intent::Rotate(delta)),
                    DragState::Pan => intents.push(Intent::Pan(delta)),
                    DragState::Idle => {}
                }
                self.last_position = Some(*position);
                intents.push(Intent::Hover(*position));
            }
            MouseEvent::Click { button, position } => {
                if *button == MouseButton::Left {
                    intents.push(Intent::Pick(*position));
                }
            }
            MouseEvent::Wheel { delta, .. } => {
                intents.push(Intent::Zoom(delta.y));
            }
            MouseEvent::Enter => {}
            MouseEvent::Leave => {
                self.drag = DragState::Idle;
                self.last_position = None;
                self.tooltip = None;
            }
        }

        intents
    }

    /// Updates the hover tooltip with the nearest hit of the latest ray cast.
    /// `None` clears it.
    pub fn hover(&mut self, tooltip: Option<Tooltip>) {
        self.tooltip = tooltip;
    }

    /// Applies a click. `hit` is the nearest point under the pointer and
    /// `text` the readout to show if it gets selected.
    pub fn click(
        &mut self,
        hit: Option<PointInfo>,
        text: Option<String>,
        position: Point2<f32>,
    ) -> ClickOutcome {
        match self.mode {
            Mode::Default => {
                match (hit, text) {
                    (Some(point), Some(text)) => {
                        tracing::debug!(label = %point.label, "selected");
                        self.selection = Some(Selection {
                            point,
                            text,
                            position,
                        });
                        ClickOutcome::Selected
                    }
                    _ => {
                        if self.selection.take().is_some() {
                            ClickOutcome::Dismissed
                        }
                        else {
                            ClickOutcome::Ignored
                        }
                    }
                }
            }
            Mode::Drawing(variant) => {
                let Some(point) = hit
                else {
                    return ClickOutcome::Ignored;
                };

                match self.line_start.take() {
                    None => {
                        self.line_start = Some(point.position);
                        ClickOutcome::LineStarted
                    }
                    Some(start) => {
                        let line = LineSegment::new(start, point.position);
                        self.lines.push(line);
                        if variant == DrawVariant::Chain {
                            self.line_start = Some(point.position);
                        }
                        tracing::debug!(num_lines = self.lines.len(), "line drawn");
                        ClickOutcome::LineCompleted(line)
                    }
                }
            }
        }
    }

    /// Selects a point without a click, e.g. from a search result.
    pub fn select(&mut self, point: PointInfo, text: String, position: Point2<f32>) {
        self.selection = Some(Selection {
            point,
            text,
            position,
        });
    }

    pub fn close_selection(&mut self) -> Option<Selection> {
        self.selection.take()
    }

    /// Switches between drawing and the default mode. Returns whether
    /// drawing is now on. Leaving drawing mode drops an unfinished line but
    /// keeps the drawn ones.
    pub fn toggle_drawing(&mut self) -> bool {
        self.mode = match self.mode {
            Mode::Default => Mode::Drawing(self.config.draw_variant),
            Mode::Drawing(_) => {
                self.line_start = None;
                Mode::Default
            }
        };
        matches!(self.mode, Mode::Drawing(_))
    }

    pub fn clear_lines(&mut self) {
        self.lines.clear();
        self.line_start = None;
    }
}

/// Casts a ray through `position` and returns the nearest point hit.
pub fn pick_point(
    camera: &Camera,
    viewport: &Viewport,
    clouds: &[PointCloud],
    options: &PickOptions,
    position: Point2<f32>,
) -> Option<PointInfo> {
    let ray = camera.ray(viewport.to_ndc(position));
    let hit = pick(&ray, clouds, options).into_iter().next()?;
    clouds.get(hit.cloud)?.point(hit.index)
}
