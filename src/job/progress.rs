/// Progress percentage that only moves forward
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProgressTracker {
    current: u8,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u8 {
        self.current
    }

    /// Move to `percent` (clamped to 100). Returns the new value only if it went up.
    pub fn advance(&mut self, percent: u8) -> Option<u8> {
        let percent = percent.min(100);
        if percent > self.current {
            self.current = percent;
            Some(percent)
        } else {
            None
        }
    }
}

/// Linear position of `done` out of `total` between `start` and `end`
pub fn interpolate(start: u8, end: u8, done: usize, total: usize) -> u8 {
    if total == 0 {
        return end;
    }
    let span = usize::from(end.saturating_sub(start));
    start + (span * done.min(total) / total) as u8
}
