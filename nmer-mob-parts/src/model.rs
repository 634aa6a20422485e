use std::str::FromStr;

use strum::{Display, EnumString, IntoStaticStr};

use crate::errors::MobModelError;

/// The named model trees the client ships. Skins are only resolved against
/// the skin server for [`NamedModelKind::Humanoid`].
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum NamedModelKind {
    Humanoid,
    Sheep,
    #[strum(serialize = "sheep.fur")]
    SheepFur,
    Pig,
    Creeper,
    Zombie,
    Skeleton,
}

impl NamedModelKind {
    /// File stem used when this model's texture is looked up by name.
    #[must_use]
    pub fn texture_name(self) -> &'static str {
        match self {
            Self::SheepFur => "sheep_fur",
            _ => self.into(),
        }
    }
}

/// A mob is shaped either like a block from the terrain set or like one of
/// the named model trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MobModel {
    Block(u32),
    Named(NamedModelKind),
}

impl MobModel {
    pub const HUMANOID: Self = Self::Named(NamedModelKind::Humanoid);

    #[must_use]
    pub const fn is_humanoid(self) -> bool {
        matches!(self, Self::Named(NamedModelKind::Humanoid))
    }

    #[must_use]
    pub const fn is_block(self) -> bool {
        matches!(self, Self::Block(_))
    }
}

impl TryFrom<&str> for MobModel {
    type Error = MobModelError;

    /// All-digit names are block identities. Their range is only checked at
    /// render time so a bad id degrades the entity instead of failing the
    /// caller.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(MobModelError::EmptyName);
        }

        if value.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(id) = value.parse::<u32>() {
                return Ok(Self::Block(id));
            }
        }

        NamedModelKind::from_str(value)
            .map(Self::Named)
            .map_err(|_| MobModelError::UnknownName(value.to_owned()))
    }
}
