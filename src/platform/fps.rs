//! Frames-per-second counter

use crate::sim::Timer;

/// Average frame rate since the counter was (re)started
#[derive(Debug, Clone)]
pub struct FpsCounter {
    timer: Timer,
    frames: u32,
    text: String,
}

impl FpsCounter {
    pub fn new(now: u64) -> Self {
        let mut timer = Timer::new();
        timer.start(now);
        Self {
            timer,
            frames: 0,
            text: String::from("0 fps"),
        }
    }

    /// Count one frame at time `now` (ms) and refresh the text
    pub fn frame(&mut self, now: u64) {
        if self.frames == u32::MAX {
            self.frames = 0;
            self.timer.start(now);
        }
        self.frames += 1;

        let elapsed = self.timer.time(now);
        if elapsed > 0 {
            self.text = format!("{} fps", self.average(elapsed));
        }
    }

    fn average(&self, elapsed_ms: u64) -> u32 {
        (f64::from(self.frames) / (elapsed_ms as f64 / 1000.0)) as u32
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixty_frames_per_second() {
        let mut fps = FpsCounter::new(1000);
        assert_eq!(fps.text(), "0 fps");
        for i in 1..=120u64 {
            fps.frame(1000 + i * 1000 / 60);
        }
        assert_eq!(fps.text(), "60 fps");
    }

    #[test]
    fn test_same_tick_keeps_text() {
        let mut fps = FpsCounter::new(5);
        fps.frame(5);
        assert_eq!(fps.text(), "0 fps");
    }
}
