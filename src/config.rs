use eframe::egui::Color32;

pub(crate) const FRAME_RATE: f64 = 60.;
pub(crate) const CAPTION: &str = "Snowflake Mirror Generator";
pub(crate) const SCREEN_SIZE: [f32; 2] = [800., 650.];

pub(crate) const BACKGROUND_COLOR: Color32 = Color32::from_rgb(124, 124, 154);
pub(crate) const SNOWFLAKE_COLOR: Color32 = Color32::from_rgb(64, 64, 255);
pub(crate) const ALTERNATE_COLOR: Color32 = Color32::from_rgb(24, 24, 100);
pub(crate) const LINE_THICKNESS: f32 = 4.;
pub(crate) const ALTERNATE_THICKNESS: f32 = 2.;

/// Slice counts cycled through with Tab.
pub(crate) const VALID_SIZES: [u32; 6] = [2, 4, 6, 8, 10, 12];
pub(crate) const MAX_COUNT: u32 = 24;

pub(crate) const DEFAULT_COUNT: u32 = 6;
pub(crate) const DEFAULT_MIRROR: bool = true;
pub(crate) const DEFAULT_SPINNING: bool = true;
/// Degrees per frame, negative is clockwise.
pub(crate) const DEFAULT_SPIN_SPEED: f64 = -0.5;

/// How the base slice is replicated around the circle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct SymmetryConfig {
    count: u32,
    pub mirror: bool,
}
impl SymmetryConfig {
    /// `count` is clamped into `1..=MAX_COUNT`.
    pub fn new(count: u32, mirror: bool) -> Self {
        Self {
            count: clamp_count(count),
            mirror,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn set_count(&mut self, count: u32) {
        self.count = clamp_count(count);
    }

    pub fn increase(&mut self) {
        self.set_count(self.count.saturating_add(1));
    }

    pub fn decrease(&mut self) {
        self.set_count(self.count.saturating_sub(1));
    }

    /// Moves to the next preset size, wrapping around.
    pub fn cycle(&mut self) {
        self.count = VALID_SIZES
            .iter()
            .copied()
            .find(|&size| size > self.count)
            .unwrap_or(VALID_SIZES[0]);
    }

    pub fn toggle_mirror(&mut self) {
        self.mirror = !self.mirror;
    }
}
impl Default for SymmetryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_COUNT, DEFAULT_MIRROR)
    }
}

fn clamp_count(count: u32) -> u32 {
    let clamped = count.clamp(1, MAX_COUNT);
    if clamped != count {
        log::warn!("Slice count {count} out of range, using {clamped}");
    }
    clamped
}

pub(crate) struct ViewSettings {
    pub spin_speed: f64,
    /// Draw the raw slice on top of the snowflake as well.
    pub overlay: bool,
}
impl ViewSettings {
    pub fn new() -> Self {
        Self {
            spin_speed: DEFAULT_SPIN_SPEED,
            overlay: true,
        }
    }
}

/// Startup values.
pub(crate) struct Settings {
    pub symmetry: SymmetryConfig,
    pub spinning: bool,
    pub view_settings: ViewSettings,
}
impl Settings {
    pub fn new() -> Self {
        Self {
            symmetry: SymmetryConfig::default(),
            spinning: DEFAULT_SPINNING,
            view_settings: ViewSettings::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_count_is_clamped() {
        assert_eq!(SymmetryConfig::new(0, false).count(), 1);
        assert_eq!(SymmetryConfig::new(1000, false).count(), MAX_COUNT);
    }

    #[test]
    fn test_decrease_stops_at_one() {
        let mut config = SymmetryConfig::new(2, true);
        config.decrease();
        config.decrease();
        config.decrease();
        assert_eq!(config.count(), 1);
    }

    #[test]
    fn test_increase_stops_at_max() {
        let mut config = SymmetryConfig::new(MAX_COUNT, true);
        config.increase();
        assert_eq!(config.count(), MAX_COUNT);
    }

    #[test]
    fn test_cycle_wraps() {
        let mut config = SymmetryConfig::new(10, false);
        config.cycle();
        assert_eq!(config.count(), 12);
        config.cycle();
        assert_eq!(config.count(), 2);
    }

    #[test]
    fn test_cycle_from_odd_count() {
        let mut config = SymmetryConfig::new(5, false);
        config.cycle();
        assert_eq!(config.count(), 6);
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::new();
        assert_eq!(settings.symmetry.count(), 6);
        assert!(settings.symmetry.mirror);
        assert!(settings.spinning);
    }
}
