use serde::{Deserialize, Serialize};
use tracing::debug;

/// A rectangle in absolute display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Shift the rectangle by the given deltas, keeping its size.
    pub fn offset(&self, dx: i32, dy: i32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// A rect is usable as an animation destination only if it has area.
    pub fn is_positive(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Fixed system chrome insets around the display edges, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Insets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Destination rectangles for the first task of the enter animation,
/// precomputed by the remote service for the 1, 2, and 3+ visible-task
/// layouts.
///
/// The set is replaced wholesale from a single configuration reply and is
/// never partially mutated; until the first reply arrives it is empty and
/// thumbnail transitions are not legal.
#[derive(Debug, Clone, Default)]
pub struct AnimationRectSet {
    single: Option<Rect>,
    two: Option<Rect>,
    multiple: Option<Rect>,
}

impl AnimationRectSet {
    pub fn new() -> Self {
        AnimationRectSet::default()
    }

    /// Replace all three rects from a configuration reply, baking the
    /// status-bar inset into each destination.
    pub fn update(&mut self, single: Rect, two: Rect, multiple: Rect, status_bar_height: i32) {
        self.single = Some(single.offset(0, status_bar_height));
        self.two = Some(two.offset(0, status_bar_height));
        self.multiple = Some(multiple.offset(0, status_bar_height));
        debug!(
            "Updated animation rects: single={:?} two={:?} multiple={:?}",
            self.single, self.two, self.multiple
        );
    }

    /// Whether we have valid destination rects to animate to.
    pub fn is_ready(&self) -> bool {
        [self.single, self.two, self.multiple]
            .iter()
            .all(|r| r.is_some_and(|r| r.is_positive()))
    }

    /// Pick the destination rect for the given number of visible
    /// (non-home) tasks. An empty task list counts as a single task.
    pub fn select(&self, visible_task_count: usize) -> Option<Rect> {
        if visible_task_count <= 1 {
            self.single
        } else if visible_task_count <= 2 {
            self.two
        } else {
            self.multiple
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_rects() -> (Rect, Rect, Rect) {
        (
            Rect::new(0, 0, 100, 200),
            Rect::new(0, 0, 150, 250),
            Rect::new(0, 0, 200, 300),
        )
    }

    #[test]
    fn test_rect_offset() {
        let r = Rect::new(10, 20, 30, 40);
        let shifted = r.offset(0, 25);
        assert_eq!(shifted, Rect::new(10, 45, 30, 40));
    }

    #[test]
    fn test_rect_is_positive() {
        assert!(Rect::new(0, 0, 1, 1).is_positive());
        assert!(!Rect::new(0, 0, 0, 1).is_positive());
        assert!(!Rect::new(0, 0, 1, 0).is_positive());
        assert!(!Rect::new(5, 5, -1, 10).is_positive());
    }

    #[test]
    fn test_not_ready_until_updated() {
        let rects = AnimationRectSet::new();
        assert!(!rects.is_ready());
        assert!(rects.select(0).is_none());
        assert!(rects.select(5).is_none());
    }

    #[test]
    fn test_ready_after_single_update() {
        let (single, two, multiple) = make_rects();
        let mut rects = AnimationRectSet::new();
        rects.update(single, two, multiple, 0);
        assert!(rects.is_ready());

        // select never returns None once ready, for any count
        for count in 0..10 {
            assert!(rects.select(count).is_some());
        }
    }

    #[test]
    fn test_not_ready_with_degenerate_rect() {
        let (single, two, _) = make_rects();
        let mut rects = AnimationRectSet::new();
        rects.update(single, two, Rect::new(0, 0, 0, 0), 0);
        assert!(!rects.is_ready());
    }

    #[test]
    fn test_select_boundaries() {
        let (single, two, multiple) = make_rects();
        let mut rects = AnimationRectSet::new();
        rects.update(single, two, multiple, 0);

        // Empty filtered list is treated as a single task
        assert_eq!(rects.select(0), Some(single));
        assert_eq!(rects.select(1), Some(single));
        assert_eq!(rects.select(2), Some(two));
        assert_eq!(rects.select(3), Some(multiple));
        assert_eq!(rects.select(100), Some(multiple));
    }

    #[test]
    fn test_status_bar_offset_applied() {
        let (single, two, multiple) = make_rects();
        let mut rects = AnimationRectSet::new();
        rects.update(single, two, multiple, 38);
        assert_eq!(rects.select(1), Some(Rect::new(0, 38, 100, 200)));
        assert_eq!(rects.select(3), Some(Rect::new(0, 38, 200, 300)));
    }
}
