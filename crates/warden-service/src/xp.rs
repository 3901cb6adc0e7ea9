//! XP gain sources

use rand::Rng;

/// Draws the XP granted for one qualifying message
pub trait XpSource: Send + Sync {
    fn draw(&self) -> u64;
}

/// Uniform draw from an inclusive range
#[derive(Debug, Clone, Copy)]
pub struct RandomXp {
    min: u64,
    max: u64,
}

impl RandomXp {
    /// Bounds are swapped if given in the wrong order
    pub fn new(min: u64, max: u64) -> Self {
        Self {
            min: min.min(max),
            max: max.max(min),
        }
    }
}

impl Default for RandomXp {
    fn default() -> Self {
        Self::new(15, 25)
    }
}

impl XpSource for RandomXp {
    fn draw(&self) -> u64 {
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}

/// Always grants the same amount
#[derive(Debug, Clone, Copy)]
pub struct FixedXp(pub u64);

impl XpSource for FixedXp {
    fn draw(&self) -> u64 {
        self.0
    }
}
