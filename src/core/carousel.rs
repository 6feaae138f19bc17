//! Seamlessly looping logo carousel.
//!
//! The item list is rendered three times back to back. The active index
//! normally lives in the middle copy; moving past either edge animates into
//! an outer copy, and once that animation has finished the index is moved
//! back to the same item in the middle copy without animation. Because the
//! three copies are identical the jump is invisible, and `index % len` never
//! changes across it.

use serde::Serialize;
use std::time::Duration;

/// Interval between automatic advances.
pub const AUTOPLAY_INTERVAL: Duration = Duration::from_millis(3000);
/// Length of one animated slide.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(800);
/// Pause after a silent jump before animation is switched back on.
pub const SETTLE_DELAY: Duration = Duration::from_millis(50);

const BUFFER_COPIES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CarouselLayout {
    pub items_to_show: usize,
    pub items_to_scroll: usize,
}

impl CarouselLayout {
    pub const fn new(items_to_show: usize, items_to_scroll: usize) -> Self {
        Self {
            items_to_show,
            items_to_scroll,
        }
    }

    /// Breakpoints used by the client logo strip.
    pub fn for_viewport(width: u32) -> Self {
        if width < 640 {
            Self::new(2, 2)
        } else if width < 1024 {
            Self::new(3, 2)
        } else {
            Self::new(5, 3)
        }
    }
}

impl Default for CarouselLayout {
    fn default() -> Self {
        Self::new(5, 3)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEnd {
    /// Still inside the middle copy, nothing to do.
    InPlace,
    /// Index was moved to the middle copy without animation; call
    /// [`LoopingCarousel::settle`] after [`SETTLE_DELAY`].
    Jumped { from: usize, to: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarouselSnapshot {
    pub index: usize,
    pub active_dot: Option<usize>,
    pub visible: Vec<usize>,
    pub animated: bool,
    pub translate_percent: f64,
}

#[derive(Debug, Clone)]
pub struct LoopingCarousel {
    len: usize,
    layout: CarouselLayout,
    index: usize,
    animated: bool,
    in_transition: bool,
}

impl LoopingCarousel {
    pub fn new(len: usize, layout: CarouselLayout) -> Self {
        Self {
            len,
            layout: sanitize(layout),
            index: len,
            animated: true,
            in_transition: false,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn layout(&self) -> CarouselLayout {
        self.layout
    }

    pub fn buffer_len(&self) -> usize {
        self.len * BUFFER_COPIES
    }

    /// Whether the next index change should be animated.
    pub fn is_animated(&self) -> bool {
        self.animated
    }

    pub fn in_transition(&self) -> bool {
        self.in_transition
    }

    pub fn set_layout(&mut self, layout: CarouselLayout) {
        self.layout = sanitize(layout);
    }

    /// Moves forward by one scroll step with animation.
    pub fn advance(&mut self) {
        if self.is_empty() {
            return;
        }
        let step = self.step();
        // A run of advances faster than the transition could walk off the
        // tripled buffer; fold back by whole copies first.
        if self.index + step >= self.buffer_len() {
            self.index -= self.len;
        }
        self.index += step;
        self.begin_transition();
    }

    /// Moves backward by one scroll step with animation.
    pub fn retreat(&mut self) {
        if self.is_empty() {
            return;
        }
        let step = self.step();
        if self.index < step {
            self.index += self.len;
        }
        self.index -= step;
        self.begin_transition();
    }

    /// Animates to the middle-copy position of item `dot`.
    pub fn go_to(&mut self, dot: usize) {
        if dot >= self.len {
            return;
        }
        self.index = dot + self.len;
        self.begin_transition();
    }

    /// Called once the slide animation has finished. Only here may the
    /// index leave an outer copy, so the silent jump is never on screen.
    pub fn complete_transition(&mut self) -> TransitionEnd {
        self.in_transition = false;
        if self.is_empty() {
            return TransitionEnd::InPlace;
        }

        let from = self.index;
        if from >= self.len * 2 || from < self.len {
            let to = self.len + from % self.len;
            self.index = to;
            self.animated = false;
            TransitionEnd::Jumped { from, to }
        } else {
            TransitionEnd::InPlace
        }
    }

    /// Re-enables animation after a silent jump.
    pub fn settle(&mut self) {
        self.animated = true;
    }

    pub fn active_dot(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.index % self.len)
    }

    /// Item indices currently in the visible window, left to right.
    pub fn visible(&self) -> Vec<usize> {
        if self.is_empty() {
            return Vec::new();
        }
        (self.index..self.index + self.layout.items_to_show)
            .map(|i| i % self.len)
            .collect()
    }

    /// Horizontal offset of the strip, in percent of the viewport width.
    pub fn translate_percent(&self) -> f64 {
        self.index as f64 * (100.0 / self.layout.items_to_show as f64)
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            index: self.index,
            active_dot: self.active_dot(),
            visible: self.visible(),
            animated: self.animated,
            translate_percent: self.translate_percent(),
        }
    }

    fn step(&self) -> usize {
        self.layout.items_to_scroll.min(self.len)
    }

    fn begin_transition(&mut self) {
        self.animated = true;
        self.in_transition = true;
    }
}

fn sanitize(layout: CarouselLayout) -> CarouselLayout {
    CarouselLayout::new(layout.items_to_show.max(1), layout.items_to_scroll.max(1))
}
