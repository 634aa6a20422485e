use std::borrow::Cow;

use image::RgbaImage;
use nmer_mob_parts::model::{MobModel, NamedModelKind};

/// Opaque reference to a GPU-resident texture, issued and redeemed by a
/// [`TextureProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(u32);

impl TextureHandle {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Textures shipped with the client, addressed by asset path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinTexture {
    /// The shared terrain atlas, used by block-shaped entities.
    Terrain,
    /// Default skin for the canonical humanoid model.
    Humanoid,
    /// Texture keyed by a named model.
    Mob(NamedModelKind),
}

impl BuiltinTexture {
    /// The texture a model kind shows when no custom skin is bound.
    #[must_use]
    pub const fn default_for(model: MobModel) -> Self {
        match model {
            MobModel::Block(_) => Self::Terrain,
            MobModel::Named(NamedModelKind::Humanoid) => Self::Humanoid,
            MobModel::Named(kind) => Self::Mob(kind),
        }
    }

    #[must_use]
    pub fn path(self) -> Cow<'static, str> {
        match self {
            Self::Terrain => Cow::Borrowed("terrain.png"),
            Self::Humanoid => Cow::Borrowed("mob/char.png"),
            Self::Mob(kind) => Cow::Owned(format!("mob/{}.png", kind.texture_name())),
        }
    }
}

/// GPU texture lifecycle collaborator. Not synchronized internally; every
/// method must be invoked from the render thread.
pub trait TextureProvider {
    fn load_builtin(&mut self, texture: BuiltinTexture) -> TextureHandle;

    fn load_image(&mut self, image: &RgbaImage) -> TextureHandle;

    /// Releasing a handle twice is undefined; callers keep at most one live
    /// handle per entity.
    fn unload(&mut self, handle: TextureHandle);

    /// Activates the handle for the current draw call.
    fn bind(&mut self, handle: TextureHandle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_selected_by_model_kind() {
        assert_eq!(
            BuiltinTexture::default_for(MobModel::Block(12)),
            BuiltinTexture::Terrain
        );
        assert_eq!(
            BuiltinTexture::default_for(MobModel::HUMANOID),
            BuiltinTexture::Humanoid
        );
        assert_eq!(
            BuiltinTexture::default_for(MobModel::Named(NamedModelKind::Pig)),
            BuiltinTexture::Mob(NamedModelKind::Pig)
        );
    }

    #[test]
    fn paths_follow_the_mob_texture_layout() {
        assert_eq!(BuiltinTexture::Humanoid.path(), "mob/char.png");
        assert_eq!(
            BuiltinTexture::Mob(NamedModelKind::SheepFur).path(),
            "mob/sheep_fur.png"
        );
    }
}
