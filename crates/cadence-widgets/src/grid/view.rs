//! Grid canvas program and view function
//!
//! The canvas program owns the gesture state machine (Idle ⇄ Dragging) and
//! translates pointer input into quantized [`GridMessage`] edits. Motion is
//! accumulated against the configured sensitivity and emitted in whole
//! units, so a drag produces discrete parameter steps instead of jitter.
//! Drawing reads the cached cell visuals; it never touches the model.

use iced::alignment::{Horizontal, Vertical};
use iced::mouse::ScrollDelta;
use iced::widget::canvas::{self, Canvas, Event, Frame, Geometry, Path, Program, Stroke, Text};
use iced::{mouse, Element, Length, Point, Rectangle, Size, Theme};

use super::cell::CELL_LABEL_SIZE;
use super::{GridConfig, GridMessage, GridState, Mode};
use crate::theme;

/// Distance of the cell label baseline from the slot bottom
const LABEL_INSET: f32 = 12.0;

// =============================================================================
// Gesture state machine
// =============================================================================

/// Canvas state: Idle (None) or Dragging (Some)
#[derive(Debug, Clone, Copy, Default)]
pub struct GridInteraction {
    pub drag: Option<DragGesture>,
}

/// An in-flight drag on one cell
#[derive(Debug, Clone, Copy)]
pub struct DragGesture {
    /// Cell the press landed in; edits route here for the whole gesture
    pub cell: usize,
    /// Press position, for click-vs-drag discrimination on release
    pub anchor: Point,
    /// Last processed pointer position
    last: Point,
    /// Sub-unit pixels not yet converted into an edit
    remainder_x: f32,
    remainder_y: f32,
    /// Whether any adjustment was issued during this gesture
    applied: bool,
}

impl DragGesture {
    fn new(cell: usize, at: Point) -> Self {
        Self {
            cell,
            anchor: at,
            last: at,
            remainder_x: 0.0,
            remainder_y: 0.0,
            applied: false,
        }
    }

    /// Feed one motion sample. Returns the whole gesture units crossed
    /// since the last sample (x: right-positive, y: up-positive); the
    /// sub-unit remainder stays in the accumulator, so 3.4 units of total
    /// motion yields exactly 3 units across however many samples.
    fn motion(&mut self, to: Point, pixels_per_unit: f32) -> (i32, i32) {
        self.remainder_x += to.x - self.last.x;
        self.remainder_y += self.last.y - to.y; // screen Y grows downward
        self.last = to;

        let units_x = (self.remainder_x / pixels_per_unit).trunc() as i32;
        let units_y = (self.remainder_y / pixels_per_unit).trunc() as i32;
        self.remainder_x -= units_x as f32 * pixels_per_unit;
        self.remainder_y -= units_y as f32 * pixels_per_unit;
        (units_x, units_y)
    }

    /// A release close to the anchor with no edits issued is a click
    fn is_click(&self, release: Point, slop: f32) -> bool {
        !self.applied && self.anchor.distance(release) <= slop
    }
}

/// The edit one gesture unit means under the active mode
fn unit_edit(mode: Mode, cell: usize, units: i32, config: &GridConfig) -> GridMessage {
    match mode {
        Mode::Velocity => GridMessage::AdjustVelocity(cell, units),
        Mode::Pitch => GridMessage::AdjustPitch(cell, units),
        Mode::Octave => GridMessage::AdjustOctave(cell, units),
        Mode::Group => GridMessage::AdjustGroup(cell, units),
        Mode::Duration => GridMessage::AdjustDuration(cell, units as f32 * config.duration_per_unit),
    }
}

/// Whole notches carried by a wheel event
fn scroll_notches(delta: &ScrollDelta, pixels_per_notch: f32) -> i32 {
    match delta {
        ScrollDelta::Lines { y, .. } => y.round() as i32,
        ScrollDelta::Pixels { y, .. } => (y / pixels_per_notch).round() as i32,
    }
}

// =============================================================================
// Canvas program
// =============================================================================

/// Canvas program for the step grid
///
/// Takes a callback closure `on_edit` that's called with a [`GridMessage`]
/// whenever a gesture crosses a unit threshold. The host applies the edit
/// to the sequencer; the grid repaints when the change notification comes
/// back, never proactively.
pub struct GridCanvas<'a, Message, F>
where
    F: Fn(GridMessage) -> Message,
{
    pub state: &'a GridState,
    pub config: &'a GridConfig,
    pub on_edit: F,
}

impl<'a, Message, F> Program<Message> for GridCanvas<'a, Message, F>
where
    Message: Clone,
    F: Fn(GridMessage) -> Message,
{
    type State = GridInteraction;

    fn update(
        &self,
        interaction: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        if let Some(position) = cursor.position_in(bounds) {
            match event {
                Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                    // A press outside every cell is nobody's gesture
                    if let Some(cell) = self.state.cell_at(position) {
                        interaction.drag = Some(DragGesture::new(cell, position));
                    }
                }
                Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                    if let Some(mut gesture) = interaction.drag {
                        if gesture.cell >= self.state.cells().len() {
                            // Topology changed mid-gesture; the rebuild is
                            // authoritative, the pending edit is abandoned
                            interaction.drag = None;
                            return None;
                        }
                        let (units_x, units_y) =
                            gesture.motion(position, self.config.drag_pixels_per_unit);
                        let mode = self.state.mode();
                        let units = if mode == Mode::Duration { units_x } else { units_y };
                        if units != 0 {
                            gesture.applied = true;
                        }
                        interaction.drag = Some(gesture);
                        if units != 0 {
                            let msg = unit_edit(mode, gesture.cell, units, self.config);
                            return Some(canvas::Action::publish((self.on_edit)(msg)));
                        }
                    }
                }
                Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                    if let Some(gesture) = interaction.drag.take() {
                        if gesture.cell < self.state.cells().len()
                            && gesture.is_click(position, self.config.click_slop)
                        {
                            let msg = GridMessage::ToggleStep(gesture.cell);
                            return Some(canvas::Action::publish((self.on_edit)(msg)));
                        }
                    }
                }
                Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                    if let Some(cell) = self.state.cell_at(position) {
                        let notches =
                            scroll_notches(delta, self.config.scroll_pixels_per_notch);
                        if notches != 0 {
                            let msg = unit_edit(self.state.mode(), cell, notches, self.config);
                            return Some(canvas::Action::publish((self.on_edit)(msg)));
                        }
                    }
                }
                _ => {}
            }
        } else if matches!(event, Event::Mouse(mouse::Event::ButtonReleased(_))) {
            // Releasing outside bounds still ends the gesture cleanly
            interaction.drag = None;
        }

        None
    }

    fn mouse_interaction(
        &self,
        interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if interaction.drag.is_some() {
            return mouse::Interaction::Grabbing;
        }
        if let Some(position) = cursor.position_in(bounds) {
            if self.state.cell_at(position).is_some() {
                return mouse::Interaction::Pointer;
            }
        }
        mouse::Interaction::default()
    }

    fn draw(
        &self,
        _interaction: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        // Background, then the header strip
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), theme::GRID_BACKGROUND);
        frame.fill_rectangle(
            Point::ORIGIN,
            Size::new(bounds.width, self.config.header_height),
            theme::HEADER_BACKGROUND,
        );

        for indicator in self.state.indicators() {
            indicator.draw(&mut frame);
        }

        for cell in self.state.cells() {
            let visual = &cell.visual;

            frame.fill_rectangle(
                Point::new(cell.slot.x, cell.slot.y),
                Size::new(cell.slot.width, cell.slot.height),
                visual.slot_fill,
            );
            frame.fill_rectangle(
                Point::new(visual.value_rect.x, visual.value_rect.y),
                Size::new(visual.value_rect.width, visual.value_rect.height),
                visual.value_fill,
            );

            // Column separator
            frame.stroke(
                &Path::line(
                    Point::new(cell.slot.x, self.config.header_height),
                    Point::new(cell.slot.x, cell.slot.y + cell.slot.height),
                ),
                Stroke::default()
                    .with_color(theme::CELL_BORDER)
                    .with_width(1.0),
            );

            frame.fill_text(Text {
                content: visual.label.clone(),
                position: Point::new(
                    cell.slot.center_x(),
                    cell.slot.y + cell.slot.height - LABEL_INSET,
                ),
                size: CELL_LABEL_SIZE.into(),
                color: visual.label_color,
                align_x: Horizontal::Center.into(),
                align_y: Vertical::Center.into(),
                ..Text::default()
            });
        }

        // Playback position overlay across the whole column
        if let Some(ph) = self.state.playhead_step() {
            frame.fill_rectangle(
                Point::new(ph as f32 * self.config.step_width, 0.0),
                Size::new(self.config.step_width, bounds.height),
                theme::PLAYHEAD,
            );
        }

        vec![frame.into_geometry()]
    }
}

/// Create a step grid element sized to its content
///
/// The element takes its natural content width, so the host decides whether
/// to scroll horizontally when the pattern outgrows the viewport.
pub fn step_grid<'a, Message>(
    state: &'a GridState,
    config: &'a GridConfig,
    on_edit: impl Fn(GridMessage) -> Message + 'a,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let size = state.content_size(config);
    Canvas::new(GridCanvas {
        state,
        config,
        on_edit,
    })
    .width(Length::Fixed(size.width))
    .height(Length::Fixed(size.height))
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PX: f32 = 8.0; // pixels per unit used by the tests

    fn drag_through(points: &[(f32, f32)]) -> (DragGesture, i32, i32) {
        let mut gesture = DragGesture::new(0, Point::new(points[0].0, points[0].1));
        let (mut total_x, mut total_y) = (0, 0);
        for &(x, y) in &points[1..] {
            let (ux, uy) = gesture.motion(Point::new(x, y), PX);
            total_x += ux;
            total_y += uy;
        }
        (gesture, total_x, total_y)
    }

    #[test]
    fn motion_quantizes_to_whole_units() {
        // 3.4 units of upward travel, spread over uneven samples,
        // must come out as exactly 3 adjustments
        let travel = 3.4 * PX;
        let (_, _, total_y) = drag_through(&[
            (0.0, 100.0),
            (0.0, 100.0 - travel * 0.3),
            (0.0, 100.0 - travel * 0.55),
            (0.0, 100.0 - travel),
        ]);
        assert_eq!(total_y, 3);
    }

    #[test]
    fn downward_motion_is_negative() {
        let (_, _, total_y) = drag_through(&[(0.0, 100.0), (0.0, 100.0 + 2.0 * PX)]);
        assert_eq!(total_y, -2);
    }

    #[test]
    fn sub_unit_motion_emits_nothing() {
        let (_, total_x, total_y) = drag_through(&[(0.0, 100.0), (PX * 0.9, 100.0 - PX * 0.9)]);
        assert_eq!((total_x, total_y), (0, 0));
    }

    #[test]
    fn remainder_carries_across_samples() {
        // Two half-unit moves add up to one unit, not zero
        let (_, _, total_y) = drag_through(&[
            (0.0, 100.0),
            (0.0, 100.0 - PX * 0.5),
            (0.0, 100.0 - PX * 1.0),
        ]);
        assert_eq!(total_y, 1);
    }

    #[test]
    fn horizontal_and_vertical_axes_are_independent() {
        let (_, total_x, total_y) =
            drag_through(&[(0.0, 100.0), (2.0 * PX, 100.0 - 3.0 * PX)]);
        assert_eq!(total_x, 2);
        assert_eq!(total_y, 3);
    }

    #[test]
    fn click_discrimination_uses_slop_and_applied() {
        let mut gesture = DragGesture::new(0, Point::new(50.0, 50.0));
        assert!(gesture.is_click(Point::new(51.0, 51.0), 3.0));
        assert!(!gesture.is_click(Point::new(60.0, 50.0), 3.0));

        // Once an edit was issued, release is never a click
        gesture.motion(Point::new(50.0, 50.0 - 2.0 * PX), PX);
        gesture.applied = true;
        assert!(!gesture.is_click(Point::new(50.0, 50.0), 3.0));
    }

    #[test]
    fn unit_edit_follows_the_mode() {
        let config = GridConfig::default();
        assert_eq!(
            unit_edit(Mode::Pitch, 4, -2, &config),
            GridMessage::AdjustPitch(4, -2)
        );
        assert_eq!(
            unit_edit(Mode::Velocity, 1, 3, &config),
            GridMessage::AdjustVelocity(1, 3)
        );
        assert_eq!(
            unit_edit(Mode::Group, 0, 1, &config),
            GridMessage::AdjustGroup(0, 1)
        );
        match unit_edit(Mode::Duration, 2, 2, &config) {
            GridMessage::AdjustDuration(2, amt) => {
                assert!((amt - 2.0 * config.duration_per_unit).abs() < f32::EPSILON)
            }
            other => panic!("unexpected edit {:?}", other),
        }
    }

    #[test]
    fn scroll_notches_from_lines_and_pixels() {
        assert_eq!(scroll_notches(&ScrollDelta::Lines { x: 0.0, y: 1.0 }, 20.0), 1);
        assert_eq!(scroll_notches(&ScrollDelta::Lines { x: 0.0, y: -1.0 }, 20.0), -1);
        assert_eq!(scroll_notches(&ScrollDelta::Pixels { x: 0.0, y: 38.0 }, 20.0), 2);
        assert_eq!(scroll_notches(&ScrollDelta::Pixels { x: 0.0, y: 4.0 }, 20.0), 0);
    }
}
