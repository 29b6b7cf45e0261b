//! Eased interpolation between two values.

use glam::Vec3;
use keyframe::{ease, functions};

/// Easing curve applied to tween progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EaseType {
    /// Constant speed interpolation
    #[default]
    Linear,
    /// Fast start, gentle landing
    CubicOut,
}

impl EaseType {
    /// Map normalized progress (0.0 to 1.0) through the curve.
    pub fn apply(&self, t: f32) -> f32 {
        let t = (t as f64).clamp(0.0, 1.0);
        let result = match self {
            EaseType::Linear => ease(functions::Linear, 0.0, 1.0, t),
            EaseType::CubicOut => ease(functions::EaseOutCubic, 0.0, 1.0, t),
        };
        result as f32
    }
}

/// Types that can be interpolated.
pub trait Tweenable: Copy {
    fn lerp(a: Self, b: Self, t: f32) -> Self;
}

impl Tweenable for f32 {
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        a + (b - a) * t
    }
}

impl Tweenable for Vec3 {
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        a.lerp(b, t)
    }
}

/// A value moving from `start` to `target` as progress advances.
///
/// Progress is advanced in explicit steps rather than wall-clock time, so a
/// tween takes the same number of frames whatever the frame rate.
#[derive(Debug, Clone)]
pub struct AnimatedValue<T: Tweenable> {
    current: T,
    start: T,
    target: T,
    /// 0.0 at `start`, 1.0 at `target`
    progress: f32,
    easing: EaseType,
}

impl<T: Tweenable> AnimatedValue<T> {
    pub fn new(initial: T) -> Self {
        Self {
            current: initial,
            start: initial,
            target: initial,
            progress: 1.0,
            easing: EaseType::Linear,
        }
    }

    /// Start a tween from `from` to `target`.
    pub fn animate(&mut self, from: T, target: T, easing: EaseType) {
        self.current = from;
        self.start = from;
        self.target = target;
        self.progress = 0.0;
        self.easing = easing;
    }

    /// Start a tween from the current value.
    pub fn animate_to(&mut self, target: T, easing: EaseType) {
        self.animate(self.current, target, easing);
    }

    /// Jump to a value and stop any tween.
    pub fn set_immediate(&mut self, value: T) {
        self.current = value;
        self.start = value;
        self.target = value;
        self.progress = 1.0;
    }

    /// Advance progress by `step`.
    ///
    /// Returns `true` while the tween is still running.
    pub fn step(&mut self, step: f32) -> bool {
        if self.progress >= 1.0 {
            return false;
        }
        self.progress = (self.progress + step.max(0.0)).min(1.0);
        // Absorb float drift from summing fractional steps
        if self.progress >= 1.0 - 1e-4 {
            self.progress = 1.0;
            self.current = self.target;
            return false;
        }
        let eased = self.easing.apply(self.progress);
        self.current = T::lerp(self.start, self.target, eased);
        true
    }

    pub fn value(&self) -> T {
        self.current
    }

    pub fn target(&self) -> T {
        self.target
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_animating(&self) -> bool {
        self.progress < 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_steps() {
        let mut val = AnimatedValue::new(0.0f32);
        val.animate_to(100.0, EaseType::Linear);
        assert!(val.is_animating());

        val.step(0.5);
        assert!((val.value() - 50.0).abs() < 1e-3);

        assert!(!val.step(0.5));
        assert_eq!(val.value(), 100.0);
        assert!(!val.is_animating());
    }

    #[test]
    fn test_immediate() {
        let mut val = AnimatedValue::new(0.0f32);
        val.animate_to(10.0, EaseType::CubicOut);
        val.set_immediate(50.0);
        assert_eq!(val.value(), 50.0);
        assert!(!val.is_animating());
        assert!(!val.step(0.1));
    }

    #[test]
    fn test_cubic_out_leads_linear() {
        let mut linear = AnimatedValue::new(Vec3::ZERO);
        let mut cubic = AnimatedValue::new(Vec3::ZERO);
        linear.animate_to(Vec3::splat(10.0), EaseType::Linear);
        cubic.animate_to(Vec3::splat(10.0), EaseType::CubicOut);

        linear.step(0.25);
        cubic.step(0.25);
        assert!(cubic.value().x > linear.value().x);
    }

    #[test]
    fn test_cubic_out_curve() {
        let mid = EaseType::CubicOut.apply(0.5);
        assert!(mid > 0.5 && mid < 1.0);
        assert!((EaseType::CubicOut.apply(2.0) - 1.0).abs() < 1e-6);
        assert!(EaseType::CubicOut.apply(-1.0).abs() < 1e-6);
    }
}
