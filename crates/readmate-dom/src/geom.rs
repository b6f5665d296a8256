//! Viewport and flow-layout geometry.
//!
//! A real host supplies bounding rectangles from its layout engine; the
//! engine estimates them with a deterministic vertical flow so the scroll
//! heuristic stays meaningful (and testable) over a parsed document. The
//! scheduler only ever consumes [`UnitBox`] values, so hosts with real
//! layout data can substitute their own.

/// The visible window over the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Document-space offset of the viewport's top edge.
    pub scroll_top: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scroll_top: 0.0,
        }
    }

    /// Document-space offset of the viewport's bottom edge.
    pub fn bottom(&self) -> f32 {
        self.scroll_top + self.height
    }
}

/// Estimated document-space extent of one text unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitBox {
    pub top: f32,
    pub bottom: f32,
}

impl UnitBox {
    /// Bottom edge relative to the viewport's top, the quantity the scroll
    /// heuristic compares against viewport heights.
    pub fn bottom_in_viewport(&self, viewport: &Viewport) -> f32 {
        self.bottom - viewport.scroll_top
    }
}

/// Metrics for the vertical flow estimate.
#[derive(Debug, Clone, Copy)]
pub struct FlowMetrics {
    pub font_size: f32,
    pub line_height: f32,
    /// Vertical gap between consecutive blocks.
    pub block_spacing: f32,
    pub content_width: f32,
}

impl Default for FlowMetrics {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            line_height: 1.5,
            block_spacing: 16.0,
            content_width: 800.0,
        }
    }
}

impl FlowMetrics {
    /// Average character budget per wrapped line.
    fn chars_per_line(&self) -> usize {
        let advance = self.font_size * 0.55;
        ((self.content_width / advance).floor() as usize).max(1)
    }

    /// Stack the given texts top to bottom, one box per text, in order.
    pub fn estimate_boxes<'a>(&self, texts: impl IntoIterator<Item = &'a str>) -> Vec<UnitBox> {
        let chars_per_line = self.chars_per_line();
        let mut y = 0.0_f32;
        texts
            .into_iter()
            .map(|text| {
                let chars = text.chars().count();
                let lines = chars.div_ceil(chars_per_line).max(1);
                let height = lines as f32 * self.font_size * self.line_height;
                let unit = UnitBox {
                    top: y,
                    bottom: y + height,
                };
                y += height + self.block_spacing;
                unit
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxes_are_ordered_and_non_overlapping() {
        let metrics = FlowMetrics::default();
        let boxes = metrics.estimate_boxes(["short", &"x".repeat(500), "short again"]);
        assert_eq!(boxes.len(), 3);
        assert_eq!(boxes[0].top, 0.0);
        for pair in boxes.windows(2) {
            assert!(pair[0].bottom < pair[1].top);
        }
    }

    #[test]
    fn test_longer_text_gets_taller_box() {
        let metrics = FlowMetrics::default();
        let boxes = metrics.estimate_boxes(["tiny", &"y".repeat(1000)]);
        let short = boxes[0].bottom - boxes[0].top;
        let long = boxes[1].bottom - boxes[1].top;
        assert!(long > short * 2.0);
    }

    #[test]
    fn test_empty_text_still_occupies_one_line() {
        let metrics = FlowMetrics::default();
        let boxes = metrics.estimate_boxes([""]);
        assert_eq!(boxes.len(), 1);
        assert!(boxes[0].bottom > boxes[0].top);
    }

    #[test]
    fn test_bottom_in_viewport_follows_scroll() {
        let unit = UnitBox {
            top: 900.0,
            bottom: 1000.0,
        };
        let mut viewport = Viewport::new(800.0, 600.0);
        assert_eq!(unit.bottom_in_viewport(&viewport), 1000.0);
        viewport.scroll_top = 700.0;
        assert_eq!(unit.bottom_in_viewport(&viewport), 300.0);
    }
}
