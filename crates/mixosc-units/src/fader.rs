//! The fader taper: a 5-segment piecewise-linear approximation of the
//! mixer's audio taper.
//!
//! ```text
//! level  1.0   0.5   0.25   0.0625   0.0
//! dB     +10   -10   -30    -60      -90
//! ```
//!
//! Both directions saturate outside the table instead of extrapolating.

/// Normalized breakpoints, top to bottom.
pub const LEVELS: [f64; 5] = [1.0, 0.5, 0.25, 0.0625, 0.0];

/// dB value at each breakpoint in [`LEVELS`].
pub const DECIBELS: [f64; 5] = [10.0, -10.0, -30.0, -60.0, -90.0];

/// Top of the fader range.
pub const MAX_DB: f64 = 10.0;

/// Bottom of the fader range (the mixer shows it as -oo).
pub const MIN_DB: f64 = -90.0;

/// dB → normalized fader level.
pub fn db_into_level(db: f64) -> f64 {
    if db >= MAX_DB {
        return 1.0;
    }
    for i in 0..LEVELS.len() - 1 {
        let (hi_db, lo_db) = (DECIBELS[i], DECIBELS[i + 1]);
        if db >= lo_db {
            let (hi, lo) = (LEVELS[i], LEVELS[i + 1]);
            return lo + (db - lo_db) * (hi - lo) / (hi_db - lo_db);
        }
    }
    0.0
}

/// Normalized fader level → dB, rounded to one decimal place.
pub fn db_from_level(level: f64) -> f64 {
    if level >= 1.0 {
        return MAX_DB;
    }
    for i in 0..LEVELS.len() - 1 {
        let (hi, lo) = (LEVELS[i], LEVELS[i + 1]);
        if level > lo || (level == lo && i == LEVELS.len() - 2) {
            let (hi_db, lo_db) = (DECIBELS[i], DECIBELS[i + 1]);
            return round_tenth(lo_db + (level - lo) * (hi_db - lo_db) / (hi - lo));
        }
    }
    MIN_DB
}

// Half away from zero; `+ 0.0` folds -0.0 into 0.0.
fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0 + 0.0
}
