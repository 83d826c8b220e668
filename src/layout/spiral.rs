use std::f64::consts::TAU;

pub const INITIAL_RADIUS: f64 = 1.0;
pub const RADIUS_INCREMENT: f64 = 5.0;
pub const INITIAL_ARC_LENGTH: f64 = 5.0;

/// Cursor over the outward spiral for a single placement attempt.
///
/// `radius` starts at 1 and only ever grows, so the angular step
/// `arc / radius` is always defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralState {
    pub radius: f64,
    pub radius_increment: f64,
    pub arc_length: f64,
    pub angle: f64,
    pub x: f64,
    pub y: f64,
    pub collisions: usize,
}

impl Default for SpiralState {
    fn default() -> Self {
        Self {
            radius: INITIAL_RADIUS,
            radius_increment: RADIUS_INCREMENT,
            arc_length: INITIAL_ARC_LENGTH,
            angle: 0.0,
            x: 0.0,
            y: 0.0,
            collisions: 0,
        }
    }
}

impl SpiralState {
    /// Next candidate position. The arc travelled is capped at a tenth of
    /// the current circumference; completing a revolution moves the cursor
    /// out by one ring.
    #[must_use]
    pub fn advance(self) -> Self {
        let circumference = TAU * self.radius;
        let step = self.arc_length.min(circumference / 10.0);
        let mut angle = self.angle + step / self.radius;
        let mut radius = self.radius;
        if angle > TAU {
            angle %= TAU;
            radius += self.radius_increment;
        }
        Self {
            radius,
            angle,
            x: radius * angle.cos(),
            y: radius * angle.sin(),
            ..self
        }
    }

    /// Record a candidate that left the usable region. The arc length is
    /// widened to the current radius so the cursor sweeps away faster.
    #[must_use]
    pub fn escape(self) -> Self {
        Self {
            collisions: self.collisions + 1,
            arc_length: self.radius,
            ..self
        }
    }

    pub fn distance(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_stays_on_unit_circle() {
        let state = SpiralState::default().advance();
        assert_eq!(state.radius, 1.0);
        let expected_angle = TAU / 10.0;
        assert!((state.angle - expected_angle).abs() < 1e-6);
        assert!((state.x - expected_angle.cos()).abs() < 1e-6);
        assert!((state.y - expected_angle.sin()).abs() < 1e-6);
    }

    #[test]
    fn full_revolution_grows_radius() {
        let mut state = SpiralState::default();
        let mut steps = 0;
        while state.radius == 1.0 {
            state = state.advance();
            steps += 1;
            assert!(steps < 100, "radius never grew");
        }
        assert_eq!(state.radius, 6.0);
        assert!(state.angle < TAU);
    }

    #[test]
    fn landing_exactly_on_tau_does_not_wrap() {
        let mut state = SpiralState::default();
        for _ in 0..10 {
            state = state.advance();
            assert_eq!(state.radius, 1.0);
        }
        assert_eq!(state.angle, TAU);

        let wrapped = state.advance();
        assert_eq!(wrapped.radius, 6.0);
        assert!((wrapped.angle - TAU / 10.0).abs() < 1e-12);
    }

    #[test]
    fn radius_never_shrinks() {
        let mut state = SpiralState::default();
        for step in 0..2_000 {
            let next = if step % 97 == 0 {
                state.escape().advance()
            } else {
                state.advance()
            };
            assert!(next.radius >= state.radius);
            assert!(next.radius >= 1.0);
            state = next;
        }
    }

    #[test]
    fn escape_counts_and_widens_arc() {
        let mut state = SpiralState::default();
        for _ in 0..40 {
            state = state.advance();
        }
        let escaped = state.escape();
        assert_eq!(escaped.collisions, 1);
        assert_eq!(escaped.arc_length, state.radius);
        assert_eq!(escaped.x, state.x);
        assert_eq!(escaped.angle, state.angle);
    }

    #[test]
    fn advance_is_deterministic() {
        let a = (0..500).fold(SpiralState::default(), |s, _| s.advance());
        let b = (0..500).fold(SpiralState::default(), |s, _| s.advance());
        assert_eq!(a, b);
        assert!((a.distance() - a.radius).abs() < 1e-3);
    }
}
