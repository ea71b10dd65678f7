//! Linear and logarithmic mappings between human units and `[0, 1]`.
//!
//! `*_set` goes human → normalized, `*_get` goes normalized → human.
//! Inputs are not clamped; [`Param`](crate::Param) clamps at the wire edge.

/// Bounds of the EQ Q range.
pub const Q_MIN: f64 = 0.3;
pub const Q_MAX: f64 = 10.0;

pub fn lin_set(min: f64, max: f64, value: f64) -> f64 {
    (value - min) / (max - min)
}

pub fn lin_get(min: f64, max: f64, norm: f64) -> f64 {
    min + (max - min) * norm
}

/// `min` and `max` must both be positive.
pub fn log_set(min: f64, max: f64, value: f64) -> f64 {
    (value / min).ln() / (max / min).ln()
}

pub fn log_get(min: f64, max: f64, norm: f64) -> f64 {
    min * ((max / min).ln() * norm).exp()
}

/// Q is stored inverted: a narrow band (high Q) sits near 0 on the wire.
pub fn q_set(q: f64) -> f64 {
    1.0 - log_set(Q_MIN, Q_MAX, q)
}

pub fn q_get(norm: f64) -> f64 {
    log_get(Q_MIN, Q_MAX, 1.0 - norm)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-3;

    fn sweep(min: f64, max: f64) -> impl Iterator<Item = f64> {
        (0..=100).map(move |i| min + (max - min) * i as f64 / 100.0)
    }

    #[test]
    fn linear_endpoints() {
        assert_eq!(lin_set(-60.0, 0.0, -60.0), 0.0);
        assert_eq!(lin_set(-60.0, 0.0, 0.0), 1.0);
        assert_eq!(lin_set(-15.0, 15.0, 0.0), 0.5);
        assert_eq!(lin_get(-12.0, 60.0, 0.5), 24.0);
    }

    #[test]
    fn linear_roundtrip() {
        for (min, max) in [(-60.0, 0.0), (0.0, 24.0), (3.0, 60.0), (-12.0, 60.0), (-15.0, 15.0)] {
            for v in sweep(min, max) {
                assert!((lin_get(min, max, lin_set(min, max, v)) - v).abs() < TOL);
            }
            for n in sweep(0.0, 1.0) {
                assert!((lin_set(min, max, lin_get(min, max, n)) - n).abs() < TOL);
            }
        }
    }

    #[test]
    fn log_endpoints() {
        assert!(log_set(20.0, 20000.0, 20.0).abs() < 1e-12);
        assert!((log_set(20.0, 20000.0, 20000.0) - 1.0).abs() < 1e-12);
        // Three decades: 200 Hz and 2 kHz sit at thirds.
        assert!((log_set(20.0, 20000.0, 200.0) - 1.0 / 3.0).abs() < 1e-9);
        assert!((log_get(20.0, 20000.0, 2.0 / 3.0) - 2000.0).abs() < 1e-6);
    }

    #[test]
    fn log_roundtrip() {
        for (min, max) in [(20.0, 20000.0), (0.02, 2000.0), (4.0, 4000.0), (5.0, 4000.0)] {
            for v in sweep(min, max) {
                assert!((log_get(min, max, log_set(min, max, v)) - v).abs() < TOL);
            }
            for n in sweep(0.0, 1.0) {
                assert!((log_set(min, max, log_get(min, max, n)) - n).abs() < TOL);
            }
        }
    }

    #[test]
    fn q_is_inverted() {
        assert!((q_set(Q_MAX)).abs() < 1e-12);
        assert!((q_set(Q_MIN) - 1.0).abs() < 1e-12);
        assert!((q_get(0.0) - Q_MAX).abs() < 1e-9);
        assert!((q_get(1.0) - Q_MIN).abs() < 1e-9);
    }

    #[test]
    fn q_roundtrip() {
        for q in sweep(Q_MIN, Q_MAX) {
            assert!((q_get(q_set(q)) - q).abs() < TOL);
        }
        for n in sweep(0.0, 1.0) {
            assert!((q_set(q_get(n)) - n).abs() < TOL);
        }
    }
}
