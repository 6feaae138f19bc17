//! Timer-driven wrappers around the carousel and testimonial state machines.

use crate::core::carousel::{
    CarouselLayout, CarouselSnapshot, LoopingCarousel, TransitionEnd, AUTOPLAY_INTERVAL,
    SETTLE_DELAY, TRANSITION_DURATION,
};
use crate::core::rotation::{CardSlot, TestimonialRotation, ROTATION_INTERVAL};
use crate::core::timer::{lock, Timer};
use std::sync::{Arc, Mutex};

pub struct CarouselDriver {
    state: Arc<Mutex<LoopingCarousel>>,
    pending: Arc<Mutex<Option<Timer>>>,
    _autoplay: Timer,
}

impl CarouselDriver {
    /// Starts autoplay immediately; dropping the driver stops every timer.
    pub fn start(carousel: LoopingCarousel) -> Self {
        let state = Arc::new(Mutex::new(carousel));
        let pending = Arc::new(Mutex::new(None));

        let tick_state = state.clone();
        let tick_pending = pending.clone();
        let autoplay = Timer::every(AUTOPLAY_INTERVAL, move || {
            lock(&tick_state).advance();
            schedule_completion(&tick_state, &tick_pending);
        });

        Self {
            state,
            pending,
            _autoplay: autoplay,
        }
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        lock(&self.state).snapshot()
    }

    pub fn next(&self) {
        lock(&self.state).advance();
        schedule_completion(&self.state, &self.pending);
    }

    pub fn previous(&self) {
        lock(&self.state).retreat();
        schedule_completion(&self.state, &self.pending);
    }

    pub fn go_to(&self, dot: usize) {
        lock(&self.state).go_to(dot);
        schedule_completion(&self.state, &self.pending);
    }

    pub fn resize(&self, viewport_width: u32) {
        lock(&self.state).set_layout(CarouselLayout::for_viewport(viewport_width));
    }
}

// Every index change restarts the completion timer, so a jump only ever
// happens once the most recent slide has finished.
fn schedule_completion(state: &Arc<Mutex<LoopingCarousel>>, pending: &Arc<Mutex<Option<Timer>>>) {
    let task_state = state.clone();
    let timer = Timer::spawn(async move {
        tokio::time::sleep(TRANSITION_DURATION).await;
        let end = lock(&task_state).complete_transition();
        if let TransitionEnd::Jumped { from, to } = end {
            tracing::trace!("carousel jumped from {} to {}", from, to);
            tokio::time::sleep(SETTLE_DELAY).await;
            lock(&task_state).settle();
        }
    });
    *lock(pending) = Some(timer);
}

pub struct RotationDriver {
    state: Arc<Mutex<TestimonialRotation>>,
    autoplay: Option<Timer>,
}

impl RotationDriver {
    pub fn start(rotation: TestimonialRotation, viewport_width: u32) -> Self {
        let mut driver = Self {
            state: Arc::new(Mutex::new(rotation)),
            autoplay: None,
        };
        driver.resize(viewport_width);
        driver
    }

    /// Autoplay runs only while the viewport is narrow.
    pub fn resize(&mut self, viewport_width: u32) {
        let wanted = TestimonialRotation::autoplay_enabled(viewport_width);
        match (wanted, self.autoplay.is_some()) {
            (true, false) => {
                let state = self.state.clone();
                self.autoplay = Some(Timer::every(ROTATION_INTERVAL, move || {
                    lock(&state).next();
                }));
            }
            (false, true) => self.autoplay = None,
            _ => {}
        }
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_some()
    }

    pub fn select(&self, card: usize) {
        lock(&self.state).select(card);
    }

    pub fn rotation(&self) -> usize {
        lock(&self.state).rotation()
    }

    pub fn layout(&self) -> Vec<CardSlot> {
        lock(&self.state).layout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_carousel_autoplay_advances_and_resets() {
        let driver = CarouselDriver::start(LoopingCarousel::new(8, CarouselLayout::new(5, 3)));

        sleep(Duration::from_millis(3_900)).await;
        let first = driver.snapshot();
        assert_eq!(first.index, 11);
        assert!(first.animated);

        // third tick lands at 17 and is folded back to 9 after the slide
        sleep(Duration::from_millis(6_000)).await;
        let third = driver.snapshot();
        assert_eq!(third.index, 9);
        assert_eq!(third.active_dot, Some(1));
        assert!(third.animated);
    }

    #[tokio::test(start_paused = true)]
    async fn test_jump_is_not_animated_until_settled() {
        let driver = CarouselDriver::start(LoopingCarousel::new(4, CarouselLayout::new(2, 2)));

        driver.next();
        driver.next();
        // index 8 is the first item of the last copy, still mid-slide
        assert_eq!(driver.snapshot().index, 8);

        sleep(Duration::from_millis(820)).await;
        let jumped = driver.snapshot();
        assert_eq!(jumped.index, 4);
        assert!(!jumped.animated);

        sleep(Duration::from_millis(60)).await;
        assert!(driver.snapshot().animated);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rotation_autoplay_only_on_mobile() {
        let mut driver = RotationDriver::start(TestimonialRotation::new(3), 1280);
        assert!(!driver.is_autoplaying());
        sleep(Duration::from_secs(10)).await;
        assert_eq!(driver.rotation(), 1);

        driver.resize(390);
        assert!(driver.is_autoplaying());
        sleep(Duration::from_millis(4_100)).await;
        assert_eq!(driver.rotation(), 2);
        sleep(Duration::from_millis(4_000)).await;
        assert_eq!(driver.rotation(), 0);

        driver.resize(1024);
        sleep(Duration::from_secs(20)).await;
        assert_eq!(driver.rotation(), 0);
    }
}
