// Engine-wide state owned by the flatscreen adapter
//
// Replaces process-wide statics: the adapter owns one EngineState and hands out
// references to collaborators and to the outer run loop.

/// How the display composites rendered content with the real world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayType {
    #[default]
    None,
    /// Content fully covers the screen, as on a desktop window.
    Opaque,
    Additive,
    Passthrough,
}

/// Display and run-loop flags shared across the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineState {
    pub display_width: u32,
    pub display_height: u32,
    pub display_type: DisplayType,
    /// Cooperative stop flag; the outer loop exits once this is false.
    pub running: bool,
    pub focused: bool,
}

impl EngineState {
    pub fn new(display_width: u32, display_height: u32) -> Self {
        Self {
            display_width,
            display_height,
            display_type: DisplayType::None,
            running: true,
            focused: true,
        }
    }

    #[inline]
    pub fn display_size(&self) -> (u32, u32) {
        (self.display_width, self.display_height)
    }

    /// Clears the run flag. Returns true only for the call that flipped it.
    pub fn request_stop(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }
}

/// Mouse wheel delta gathered between input polls.
///
/// The adapter only adds to it; resetting belongs to the input layer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollAccumulator {
    value: f32,
}

impl ScrollAccumulator {
    #[inline]
    pub fn add(&mut self, delta: f32) {
        self.value += delta;
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_runs_with_requested_size() {
        let state = EngineState::new(640, 480);
        assert_eq!(state.display_size(), (640, 480));
        assert!(state.running);
        assert_eq!(state.display_type, DisplayType::None);
    }

    #[test]
    fn request_stop_flips_once() {
        let mut state = EngineState::new(1, 1);
        assert!(state.request_stop());
        assert!(!state.request_stop());
        assert!(!state.running);
    }

    #[test]
    fn scroll_follows_delta_sign_until_reset() {
        let mut scroll = ScrollAccumulator::default();
        scroll.add(120.0);
        scroll.add(120.0);
        assert_eq!(scroll.value(), 240.0);
        scroll.add(-360.0);
        assert_eq!(scroll.value(), -120.0);
        scroll.reset();
        assert_eq!(scroll.value(), 0.0);
    }
}
