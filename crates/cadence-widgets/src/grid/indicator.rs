//! Step indicator - one numbered marker in the header strip
//!
//! Pure presentation: a pointer-shaped tab with a centered 1-based step
//! number, tinted by the group of the column it heads. No gestures, no
//! model references beyond the index it represents.

use iced::alignment::{Horizontal, Vertical};
use iced::widget::canvas::{Frame, Path, Text};
use iced::{Color, Point, Rectangle};

use crate::theme;

/// Header text size
const INDICATOR_LABEL_SIZE: f32 = 11.0;

/// Depth of the pointer tip below the tab body
const POINTER_DEPTH: f32 = 6.0;

/// One numbered page marker in the indicator header
#[derive(Debug, Clone)]
pub struct StepIndicator {
    /// Column this indicator heads
    pub index: usize,
    /// 1-based display label
    pub label: String,
    /// Slot rectangle in grid coordinates
    pub slot: Rectangle,
    /// Group tint of the column
    pub tint: Color,
}

impl StepIndicator {
    pub fn new(index: usize, slot: Rectangle, tint: Color) -> Self {
        Self {
            index,
            label: (index + 1).to_string(),
            slot,
            tint,
        }
    }

    /// Draw the pointer tab and its centered number
    pub fn draw(&self, frame: &mut Frame) {
        let inset = 2.0;
        let left = self.slot.x + inset;
        let right = self.slot.x + self.slot.width - inset;
        let top = self.slot.y + inset;
        let bottom = self.slot.y + self.slot.height;
        let body_bottom = bottom - POINTER_DEPTH;
        let mid = self.slot.x + self.slot.width / 2.0;

        // Tab body with a pointer tip aimed at the column below
        let tab = Path::new(|p| {
            p.move_to(Point::new(left, top));
            p.line_to(Point::new(right, top));
            p.line_to(Point::new(right, body_bottom));
            p.line_to(Point::new(mid, bottom));
            p.line_to(Point::new(left, body_bottom));
            p.close();
        });
        frame.fill(&tab, Color { a: 0.35, ..self.tint });

        frame.fill_text(Text {
            content: self.label.clone(),
            position: Point::new(mid, top + (body_bottom - top) / 2.0),
            size: INDICATOR_LABEL_SIZE.into(),
            color: theme::HEADER_LABEL,
            align_x: Horizontal::Center.into(),
            align_y: Vertical::Center.into(),
            ..Text::default()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_is_one_based() {
        let slot = Rectangle {
            x: 0.0,
            y: 0.0,
            width: 56.0,
            height: 26.0,
        };
        let ind = StepIndicator::new(0, slot, theme::GROUP_COLORS[0]);
        assert_eq!(ind.label, "1");
        let ind = StepIndicator::new(15, slot, theme::GROUP_COLORS[0]);
        assert_eq!(ind.label, "16");
    }
}
