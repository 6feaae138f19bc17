use serde::Serialize;
use std::time::Duration;

pub const ROTATION_INTERVAL: Duration = Duration::from_millis(4000);
/// Viewports narrower than this show one card at a time and autoplay.
pub const MOBILE_BREAKPOINT: u32 = 768;

const MAX_CARDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardSlot {
    Left,
    Center,
    Right,
}

/// Three-card testimonial carousel: the card named by `rotation` sits in the
/// centre, the next one to its right and the one after that on the left.
#[derive(Debug, Clone)]
pub struct TestimonialRotation {
    cards: usize,
    rotation: usize,
}

impl TestimonialRotation {
    /// Only the first three testimonials take part.
    pub fn new(testimonials: usize) -> Self {
        let cards = testimonials.min(MAX_CARDS);
        Self {
            cards,
            rotation: if cards > 1 { 1 } else { 0 },
        }
    }

    pub fn cards(&self) -> usize {
        self.cards
    }

    pub fn rotation(&self) -> usize {
        self.rotation
    }

    pub fn autoplay_enabled(viewport_width: u32) -> bool {
        viewport_width < MOBILE_BREAKPOINT
    }

    pub fn next(&mut self) {
        if self.cards > 0 {
            self.rotation = (self.rotation + 1) % self.cards;
        }
    }

    pub fn select(&mut self, card: usize) {
        if card < self.cards {
            self.rotation = card;
        }
    }

    pub fn is_active(&self, card: usize) -> bool {
        card < self.cards && card == self.rotation
    }

    pub fn slot(&self, card: usize) -> Option<CardSlot> {
        if card >= self.cards {
            return None;
        }
        let relative = (card + self.cards - self.rotation) % self.cards;
        Some(match relative {
            0 => CardSlot::Center,
            1 => CardSlot::Right,
            _ => CardSlot::Left,
        })
    }

    /// Slots of every card in card order.
    pub fn layout(&self) -> Vec<CardSlot> {
        (0..self.cards).filter_map(|card| self.slot(card)).collect()
    }
}
