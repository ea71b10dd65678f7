use std::fmt;
use std::str::FromStr;

use crate::error::ClientError;

/// The mixer family a client talks to.
///
/// Fixed when the engine is built; it selects the address table and the
/// default port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceKind {
    /// X-Air family (XR12/XR16/XR18, MR18).
    #[default]
    XAir,
    /// X32/M32 family.
    X32,
}

impl DeviceKind {
    /// Default OSC port for this family.
    pub fn default_port(self) -> u16 {
        match self {
            DeviceKind::XAir => 10024,
            DeviceKind::X32 => 10023,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DeviceKind::XAir => "xair",
            DeviceKind::X32 => "x32",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DeviceKind {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xair" | "x-air" | "xr" => Ok(DeviceKind::XAir),
            "x32" | "m32" => Ok(DeviceKind::X32),
            _ => Err(ClientError::UnknownDeviceKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ports() {
        assert_eq!(DeviceKind::XAir.default_port(), 10024);
        assert_eq!(DeviceKind::X32.default_port(), 10023);
    }

    #[test]
    fn parse_names() {
        assert_eq!("xair".parse::<DeviceKind>().unwrap(), DeviceKind::XAir);
        assert_eq!("X32".parse::<DeviceKind>().unwrap(), DeviceKind::X32);
        assert!(matches!(
            "wing".parse::<DeviceKind>(),
            Err(ClientError::UnknownDeviceKind(_))
        ));
    }
}
