use std::sync::Arc;

use image::RgbaImage;
use nmer_mob_parts::{
    blocks::Block,
    errors::{MobModelError, Result as PartsResult},
    model::{MobModel, NamedModelKind},
    models::{ModelCache, ModelInstance},
    types::{GeometrySink, MobAnimation},
};
use tokio::runtime::Handle;
use tracing::warn;

use crate::{
    config::SkinServerConfiguration,
    skin::{
        fetcher::{SkinFetcher, SkinSource},
        hat_overlay_present, SkinFetch, SkinState,
    },
    texture::{BuiltinTexture, TextureHandle, TextureProvider},
};

/// Cloneable, thread-safe surface for mutating an entity's model and skin.
/// Render-thread state stays in [`MobRenderable`].
#[derive(Clone)]
pub struct SkinUpdater {
    skin: Arc<SkinState>,
    source: Arc<dyn SkinSource>,
    runtime: Handle,
}

impl SkinUpdater {
    #[must_use]
    pub fn new(skin: Arc<SkinState>, source: Arc<dyn SkinSource>, runtime: Handle) -> Self {
        Self {
            skin,
            source,
            runtime,
        }
    }

    #[must_use]
    pub fn state(&self) -> &Arc<SkinState> {
        &self.skin
    }

    /// Swaps the model and discards any custom skin. For humanoid skins,
    /// call [`SkinUpdater::set_skin`] with the player's name afterwards.
    pub fn set_model(&self, name: &str) -> Result<(), MobModelError> {
        let model = MobModel::try_from(name)?;
        self.skin.apply_model(model);

        Ok(())
    }

    pub fn set_skin(&self, identity: Option<&str>) {
        if let Some(fetch) = self.skin.set_skin(identity) {
            self.spawn(fetch);
        }
    }

    pub fn reset_skin(&self) {
        self.skin.reset_skin();
    }

    /// Re-downloads the current skin, if any is set.
    pub fn reload_skin(&self) {
        if let Some(fetch) = self.skin.reload() {
            self.spawn(fetch);
        }
    }

    #[must_use]
    pub fn skin_name(&self) -> Option<String> {
        self.skin.skin_name()
    }

    fn spawn(&self, fetch: SkinFetch) {
        let fetcher = SkinFetcher::new(self.source.clone(), self.skin.clone(), fetch);
        let _task = fetcher.start(&self.runtime);
    }
}

/// Render-thread record of the live GPU binding.
struct BoundTexture {
    handle: TextureHandle,
    image: Option<Arc<RgbaImage>>,
    model: MobModel,
    revision: u64,
}

/// Entity-facing component owning a [`SkinState`] and the render-thread
/// texture binding for one mob.
pub struct MobRenderable {
    updater: SkinUpdater,
    bound: Option<BoundTexture>,
    allows_hair: bool,
}

impl MobRenderable {
    #[must_use]
    pub fn new(
        model: MobModel,
        config: Arc<SkinServerConfiguration>,
        source: Arc<dyn SkinSource>,
        runtime: Handle,
    ) -> Self {
        let skin = Arc::new(SkinState::new(model, config));

        Self {
            updater: SkinUpdater::new(skin, source, runtime),
            bound: None,
            allows_hair: true,
        }
    }

    /// Handle for mutating this entity's model and skin from any thread.
    #[must_use]
    pub fn updater(&self) -> SkinUpdater {
        self.updater.clone()
    }

    pub fn set_model(&self, name: &str) -> Result<(), MobModelError> {
        self.updater.set_model(name)
    }

    pub fn set_skin(&self, identity: Option<&str>) {
        self.updater.set_skin(identity);
    }

    pub fn reset_skin(&self) {
        self.updater.reset_skin();
    }

    pub fn reload_skin(&self) {
        self.updater.reload_skin();
    }

    #[must_use]
    pub fn skin_name(&self) -> Option<String> {
        self.updater.skin_name()
    }

    #[must_use]
    pub fn model(&self) -> MobModel {
        self.updater.skin.model()
    }

    /// Whether the headwear overlay is drawn for humanoid-shaped models.
    #[must_use]
    pub const fn allows_hair(&self) -> bool {
        self.allows_hair
    }

    /// Render thread, at most once per frame before drawing this entity:
    /// re-checks the skin state, lazily swaps the GPU texture when it
    /// changed, then activates the handle for the draw call.
    pub fn bind_texture(&mut self, textures: &mut dyn TextureProvider) {
        let state = Arc::clone(&self.updater.skin);

        // Lock-free pre-check; frames where nothing changed skip the lock.
        let dirty = self
            .bound
            .as_ref()
            .map_or(true, |bound| bound.revision != state.revision());

        if dirty {
            let shared = state.shared();
            let revision = state.revision();
            let pending = shared.pending.clone();
            let model = shared.model;

            // Images compare by identity, never by pixel data.
            let same_image = match (
                &pending,
                self.bound.as_ref().and_then(|bound| bound.image.as_ref()),
            ) {
                (Some(next), Some(current)) => Arc::ptr_eq(next, current),
                (None, None) => true,
                _ => false,
            };
            let unchanged =
                same_image && self.bound.as_ref().is_some_and(|bound| bound.model == model);

            if unchanged {
                if let Some(bound) = self.bound.as_mut() {
                    bound.revision = revision;
                }
            } else {
                if let Some(previous) = self.bound.take() {
                    textures.unload(previous.handle);
                }

                let handle = match &pending {
                    None => textures.load_builtin(BuiltinTexture::default_for(model)),
                    Some(image) => {
                        self.allows_hair = model.is_humanoid() && hat_overlay_present(image);
                        textures.load_image(image)
                    }
                };

                self.bound = Some(BoundTexture {
                    handle,
                    image: pending,
                    model,
                    revision,
                });
            }
        }

        if let Some(bound) = &self.bound {
            textures.bind(bound.handle);
        }
    }

    /// Releases the live GPU binding. Call when the entity leaves the
    /// world; render thread only.
    pub fn unload(&mut self, textures: &mut dyn TextureProvider) {
        if let Some(bound) = self.bound.take() {
            textures.unload(bound.handle);
        }
    }

    /// Renders the entity for the current animation tick, dispatching on
    /// model kind. A block identity that cannot be resolved or drawn
    /// permanently demotes the entity to the humanoid model.
    pub fn render_model(
        &mut self,
        models: &mut ModelCache,
        sink: &mut dyn GeometrySink,
        anim: &MobAnimation,
        scale: f32,
    ) {
        match self.updater.skin.model() {
            MobModel::Block(id) => {
                if let Err(error) = render_block_preview(sink, id) {
                    warn!(
                        block = id,
                        %error,
                        "could not use block model; switching to humanoid"
                    );
                    self.updater.skin.apply_model(MobModel::HUMANOID);
                }
            }
            MobModel::Named(kind) => {
                let instance = models.get_mut(kind);
                instance.pose(anim);
                instance.render(sink, scale);

                if self.allows_hair {
                    if let ModelInstance::Humanoid(model) = models.get_mut(kind) {
                        model.headwear.yaw = model.head.yaw;
                        model.headwear.pitch = model.head.pitch;

                        // The overlay has geometry visible from both sides.
                        sink.set_cull_faces(false);
                        sink.draw_part(&model.headwear, scale);
                        sink.set_cull_faces(true);
                    }
                }
            }
        }
    }

    /// Renders the wool-over-body sheep variant: the base pass, then the
    /// fleece layer in the base pose with its own texture. Bone fields
    /// borrowed from the cached base instance are restored before
    /// returning.
    pub fn render_fleece(
        &mut self,
        models: &mut ModelCache,
        sink: &mut dyn GeometrySink,
        textures: &mut dyn TextureProvider,
        anim: &MobAnimation,
        scale: f32,
    ) {
        let saved_head_pivot = match models.get_mut(NamedModelKind::Sheep) {
            ModelInstance::Quadruped(base) => base.head.pivot,
            ModelInstance::Humanoid(_) => return,
        };

        self.render_model(models, sink, anim, scale);

        let pose = match models.get_mut(NamedModelKind::Sheep) {
            ModelInstance::Quadruped(base) => base.pose_snapshot(),
            ModelInstance::Humanoid(_) => return,
        };

        let fleece = textures.load_builtin(BuiltinTexture::Mob(NamedModelKind::SheepFur));
        textures.bind(fleece);

        if let ModelInstance::Quadruped(fur) = models.get_mut(NamedModelKind::SheepFur) {
            fur.apply_pose(pose);
            fur.render(sink, scale);
        }

        textures.unload(fleece);

        if let ModelInstance::Quadruped(base) = models.get_mut(NamedModelKind::Sheep) {
            base.head.pivot = saved_head_pivot;
        }
    }
}

fn render_block_preview(sink: &mut dyn GeometrySink, id: u32) -> PartsResult<()> {
    let block = Block::from_numeric(id)?;

    sink.draw_block_preview(block, block.preview_offset())
}
