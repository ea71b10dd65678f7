//! Per-device address tables.
//!
//! The two mixer families address the same entities with different index
//! padding (and a few entities exist on one family only):
//!
//! ```text
//! entity    xair          x32
//! bus       /bus/N        /bus/NN
//! strip     /ch/NN        /ch/NN
//! headamp   /headamp/NN   /headamp/NNN
//! snapshot  /-snap/NN     /-snap/NN
//! matrix    -             /mtx/NN
//! main      /lr           /main/st
//! mainmono  -             /main/m
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{ClientError, Result};
use crate::kind::DeviceKind;

/// A controllable object on the mixer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Bus,
    Strip,
    Headamp,
    Snapshot,
    Matrix,
    Main,
    MainMono,
}

impl Entity {
    pub const ALL: [Entity; 7] = [
        Entity::Bus,
        Entity::Strip,
        Entity::Headamp,
        Entity::Snapshot,
        Entity::Matrix,
        Entity::Main,
        Entity::MainMono,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Entity::Bus => "bus",
            Entity::Strip => "strip",
            Entity::Headamp => "headamp",
            Entity::Snapshot => "snapshot",
            Entity::Matrix => "matrix",
            Entity::Main => "main",
            Entity::MainMono => "mainmono",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Entity {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        Entity::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ClientError::UnknownEntity(s.to_string()))
    }
}

/// An address prefix plus the zero-padding width of its index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressTemplate {
    prefix: &'static str,
    width: Option<usize>,
}

impl AddressTemplate {
    /// A template that appends a zero-padded index.
    pub const fn indexed(prefix: &'static str, width: usize) -> Self {
        Self {
            prefix,
            width: Some(width),
        }
    }

    /// A template for a singleton entity; the index is ignored.
    pub const fn fixed(prefix: &'static str) -> Self {
        Self {
            prefix,
            width: None,
        }
    }

    pub fn format(&self, index: u32) -> String {
        match self.width {
            Some(width) => format!("{}/{:0width$}", self.prefix, index, width = width),
            None => self.prefix.to_string(),
        }
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    pub fn width(&self) -> Option<usize> {
        self.width
    }
}

type Table = &'static [(Entity, AddressTemplate)];

static XAIR_TABLE: Table = &[
    (Entity::Bus, AddressTemplate::indexed("/bus", 1)),
    (Entity::Strip, AddressTemplate::indexed("/ch", 2)),
    (Entity::Headamp, AddressTemplate::indexed("/headamp", 2)),
    (Entity::Snapshot, AddressTemplate::indexed("/-snap", 2)),
    (Entity::Main, AddressTemplate::fixed("/lr")),
];

static X32_TABLE: Table = &[
    (Entity::Bus, AddressTemplate::indexed("/bus", 2)),
    (Entity::Strip, AddressTemplate::indexed("/ch", 2)),
    (Entity::Headamp, AddressTemplate::indexed("/headamp", 3)),
    (Entity::Snapshot, AddressTemplate::indexed("/-snap", 2)),
    (Entity::Matrix, AddressTemplate::indexed("/mtx", 2)),
    (Entity::Main, AddressTemplate::fixed("/main/st")),
    (Entity::MainMono, AddressTemplate::fixed("/main/m")),
];

/// Resolves entity addresses for one device kind.
///
/// The table is chosen once from the [`DeviceKind`] and never changes.
#[derive(Debug, Clone, Copy)]
pub struct AddressResolver {
    kind: DeviceKind,
    table: Table,
}

impl AddressResolver {
    pub fn new(kind: DeviceKind) -> Self {
        let table = match kind {
            DeviceKind::XAir => XAIR_TABLE,
            DeviceKind::X32 => X32_TABLE,
        };
        Self { kind, table }
    }

    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// Whether the active table has an entry for `entity`.
    pub fn supports(&self, entity: Entity) -> bool {
        self.table.iter().any(|(e, _)| *e == entity)
    }

    pub fn template(&self, entity: Entity) -> Result<AddressTemplate> {
        self.table
            .iter()
            .find(|(e, _)| *e == entity)
            .map(|(_, t)| *t)
            .ok_or(ClientError::UnsupportedEntity {
                entity,
                kind: self.kind,
            })
    }

    /// Address prefix for `entity` number `index`, e.g. `/ch/01`.
    pub fn resolve(&self, entity: Entity, index: u32) -> Result<String> {
        Ok(self.template(entity)?.format(index))
    }

    /// Full parameter address, e.g. `/ch/01` + `mix/fader`.
    pub fn resolve_path(&self, entity: Entity, index: u32, suffix: &str) -> Result<String> {
        let mut address = self.resolve(entity, index)?;
        let suffix = suffix.trim_start_matches('/');
        if !suffix.is_empty() {
            address.push('/');
            address.push_str(suffix);
        }
        Ok(address)
    }

    /// Resolve by entity name (`"bus"`, `"strip"`, ...).
    pub fn resolve_named(&self, name: &str, index: u32) -> Result<String> {
        self.resolve(name.parse()?, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bus_padding_differs_per_kind() {
        let xair = AddressResolver::new(DeviceKind::XAir);
        let x32 = AddressResolver::new(DeviceKind::X32);
        assert_eq!(xair.resolve(Entity::Bus, 3).unwrap(), "/bus/3");
        assert_eq!(x32.resolve(Entity::Bus, 3).unwrap(), "/bus/03");
    }

    #[test]
    fn shared_entities() {
        for kind in [DeviceKind::XAir, DeviceKind::X32] {
            let r = AddressResolver::new(kind);
            assert_eq!(r.resolve(Entity::Strip, 7).unwrap(), "/ch/07");
            assert_eq!(r.resolve(Entity::Snapshot, 12).unwrap(), "/-snap/12");
        }
        assert_eq!(
            AddressResolver::new(DeviceKind::XAir)
                .resolve(Entity::Headamp, 1)
                .unwrap(),
            "/headamp/01"
        );
        assert_eq!(
            AddressResolver::new(DeviceKind::X32)
                .resolve(Entity::Headamp, 1)
                .unwrap(),
            "/headamp/001"
        );
    }

    #[test]
    fn main_ignores_index() {
        let xair = AddressResolver::new(DeviceKind::XAir);
        let x32 = AddressResolver::new(DeviceKind::X32);
        assert_eq!(xair.resolve(Entity::Main, 0).unwrap(), "/lr");
        assert_eq!(x32.resolve(Entity::Main, 9).unwrap(), "/main/st");
        assert_eq!(x32.resolve(Entity::MainMono, 0).unwrap(), "/main/m");
    }

    #[test]
    fn missing_entity_is_config_error() {
        let xair = AddressResolver::new(DeviceKind::XAir);
        assert!(!xair.supports(Entity::Matrix));
        assert!(matches!(
            xair.resolve(Entity::Matrix, 1),
            Err(ClientError::UnsupportedEntity {
                entity: Entity::Matrix,
                kind: DeviceKind::XAir
            })
        ));
        assert!(AddressResolver::new(DeviceKind::X32).supports(Entity::Matrix));
    }

    #[test]
    fn resolve_path_joins_suffix() {
        let r = AddressResolver::new(DeviceKind::XAir);
        assert_eq!(
            r.resolve_path(Entity::Strip, 1, "mix/fader").unwrap(),
            "/ch/01/mix/fader"
        );
        assert_eq!(
            r.resolve_path(Entity::Main, 0, "/mix/on").unwrap(),
            "/lr/mix/on"
        );
        assert_eq!(r.resolve_path(Entity::Bus, 2, "").unwrap(), "/bus/2");
    }

    #[test]
    fn resolve_by_name() {
        let r = AddressResolver::new(DeviceKind::X32);
        assert_eq!(r.resolve_named("matrix", 4).unwrap(), "/mtx/04");
        assert_eq!(r.resolve_named("MainMono", 0).unwrap(), "/main/m");
        assert!(matches!(
            r.resolve_named("dca", 1),
            Err(ClientError::UnknownEntity(_))
        ));
    }
}
