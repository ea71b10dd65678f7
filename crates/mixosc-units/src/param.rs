use std::fmt;
use std::str::FromStr;

use crate::curve::{lin_get, lin_set, log_get, log_set, Q_MAX, Q_MIN};
use crate::error::UnitsError;
use crate::fader::{db_from_level, db_into_level};

/// How a parameter's human value maps onto the wire float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mapping {
    Linear { min: f64, max: f64 },
    Log { min: f64, max: f64 },
    /// Logarithmic with the wire direction flipped (EQ Q).
    InvertedLog { min: f64, max: f64 },
    Fader,
}

impl Mapping {
    /// Human value → normalized value (not clamped).
    pub fn to_norm(self, value: f64) -> f64 {
        match self {
            Mapping::Linear { min, max } => lin_set(min, max, value),
            Mapping::Log { min, max } => log_set(min, max, value),
            Mapping::InvertedLog { min, max } => 1.0 - log_set(min, max, value),
            Mapping::Fader => db_into_level(value),
        }
    }

    /// Normalized value → human value.
    pub fn from_norm(self, norm: f64) -> f64 {
        match self {
            Mapping::Linear { min, max } => lin_get(min, max, norm),
            Mapping::Log { min, max } => log_get(min, max, norm),
            Mapping::InvertedLog { min, max } => log_get(min, max, 1.0 - norm),
            Mapping::Fader => db_from_level(norm),
        }
    }

    /// Human-unit bounds of the mapping.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Mapping::Linear { min, max }
            | Mapping::Log { min, max }
            | Mapping::InvertedLog { min, max } => (min, max),
            Mapping::Fader => (crate::fader::MIN_DB, crate::fader::MAX_DB),
        }
    }
}

/// Every continuous parameter kind the client converts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    Fader,
    EqGain,
    EqFreq,
    EqQ,
    CompThreshold,
    CompMakeup,
    CompAttack,
    CompHold,
    CompRelease,
    GateThreshold,
    GateRange,
    GateAttack,
    GateHold,
    GateRelease,
    HeadampGain,
    Pan,
}

impl Param {
    pub const ALL: [Param; 16] = [
        Param::Fader,
        Param::EqGain,
        Param::EqFreq,
        Param::EqQ,
        Param::CompThreshold,
        Param::CompMakeup,
        Param::CompAttack,
        Param::CompHold,
        Param::CompRelease,
        Param::GateThreshold,
        Param::GateRange,
        Param::GateAttack,
        Param::GateHold,
        Param::GateRelease,
        Param::HeadampGain,
        Param::Pan,
    ];

    /// The mapping family and bounds for this parameter.
    pub fn mapping(self) -> Mapping {
        use Mapping::*;
        match self {
            Param::Fader => Fader,
            Param::EqGain => Linear { min: -15.0, max: 15.0 },
            Param::EqFreq => Log { min: 20.0, max: 20000.0 },
            Param::EqQ => InvertedLog { min: Q_MIN, max: Q_MAX },
            Param::CompThreshold => Linear { min: -60.0, max: 0.0 },
            Param::CompMakeup => Linear { min: 0.0, max: 24.0 },
            // Attack starts at 0 ms, which a log mapping cannot represent.
            Param::CompAttack | Param::GateAttack => Linear { min: 0.0, max: 120.0 },
            Param::CompHold | Param::GateHold => Log { min: 0.02, max: 2000.0 },
            Param::CompRelease => Log { min: 4.0, max: 4000.0 },
            Param::GateThreshold => Linear { min: -80.0, max: 0.0 },
            Param::GateRange => Linear { min: 3.0, max: 60.0 },
            Param::GateRelease => Log { min: 5.0, max: 4000.0 },
            Param::HeadampGain => Linear { min: -12.0, max: 60.0 },
            Param::Pan => Linear { min: -100.0, max: 100.0 },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Param::Fader => "fader",
            Param::EqGain => "eq-gain",
            Param::EqFreq => "eq-freq",
            Param::EqQ => "eq-q",
            Param::CompThreshold => "comp-threshold",
            Param::CompMakeup => "comp-makeup",
            Param::CompAttack => "comp-attack",
            Param::CompHold => "comp-hold",
            Param::CompRelease => "comp-release",
            Param::GateThreshold => "gate-threshold",
            Param::GateRange => "gate-range",
            Param::GateAttack => "gate-attack",
            Param::GateHold => "gate-hold",
            Param::GateRelease => "gate-release",
            Param::HeadampGain => "headamp-gain",
            Param::Pan => "pan",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Param::EqFreq => "Hz",
            Param::EqQ => "",
            Param::CompAttack
            | Param::CompHold
            | Param::CompRelease
            | Param::GateAttack
            | Param::GateHold
            | Param::GateRelease => "ms",
            Param::Pan => "%",
            _ => "dB",
        }
    }

    /// Human value → wire float.
    ///
    /// The value saturates at the parameter's bounds first; NaN maps to the
    /// lower bound, so the result is always a finite float in `[0, 1]`.
    pub fn to_wire(self, value: f64) -> f32 {
        let mapping = self.mapping();
        let (min, max) = mapping.bounds();
        let value = if value.is_nan() {
            min
        } else {
            value.clamp(min, max)
        };
        mapping.to_norm(value).clamp(0.0, 1.0) as f32
    }

    /// Wire float → human value.
    pub fn from_wire(self, wire: f32) -> f64 {
        self.mapping().from_norm(f64::from(wire))
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Param {
    type Err = UnitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Param::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnitsError::UnknownParam(s.to_string()))
    }
}
