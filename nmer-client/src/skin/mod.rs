pub mod fetcher;

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};

use derive_more::Debug;
use image::RgbaImage;
use nmer_mob_parts::model::MobModel;
use tracing::{info, trace};

use crate::config::SkinServerConfiguration;

/// Fields shared between the render thread and fetch tasks. Only ever
/// mutated while holding the [`SkinState`] lock.
#[derive(Debug)]
pub(crate) struct SkinShared {
    pub(crate) model: MobModel,
    pub(crate) identity: Option<String>,
    #[debug(skip)]
    pub(crate) pending: Option<Arc<RgbaImage>>,
}

/// A background download to initiate for an accepted skin change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinFetch {
    pub url: String,
    pub identity: String,
    /// Set when the target model is not the canonical humanoid; such skins
    /// skip the humanoid-layout normalization.
    pub custom_model: bool,
}

/// The synchronized core of an entity's skin. `set_skin`, `deliver` and the
/// other mutators may be called from any thread; the render thread observes
/// the state through [`SkinState::revision`] and rebinds lazily.
#[derive(Debug)]
pub struct SkinState {
    shared: Mutex<SkinShared>,
    /// Bumped under the lock on every mutation of `shared`. Release store,
    /// Acquire load; the render thread reads it lock-free to skip frames
    /// where nothing changed.
    revision: AtomicU64,
    config: Arc<SkinServerConfiguration>,
}

impl SkinState {
    #[must_use]
    pub fn new(model: MobModel, config: Arc<SkinServerConfiguration>) -> Self {
        Self {
            shared: Mutex::new(SkinShared {
                model,
                identity: None,
                pending: None,
            }),
            revision: AtomicU64::new(0),
            config,
        }
    }

    pub(crate) fn shared(&self) -> MutexGuard<'_, SkinShared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    /// Callers must hold the `shared` lock.
    fn bump(&self) {
        self.revision.fetch_add(1, Ordering::Release);
    }

    #[must_use]
    pub fn model(&self) -> MobModel {
        self.shared().model
    }

    /// Name of the current skin; `None` while the model default is in use.
    #[must_use]
    pub fn skin_name(&self) -> Option<String> {
        self.shared().identity.clone()
    }

    /// Swaps the active model and discards any custom skin. For humanoid
    /// skins, follow up with [`SkinState::set_skin`].
    pub fn apply_model(&self, model: MobModel) {
        info!(?model, "switching entity model");

        let mut shared = self.shared();
        shared.identity = None;
        shared.pending = None;
        shared.model = model;
        self.bump();
    }

    /// Replaces any skin with the model default. The bound handle is
    /// released lazily at the next texture bind.
    pub fn reset_skin(&self) {
        let mut shared = self.shared();
        shared.identity = None;
        shared.pending = None;
        self.bump();
    }

    /// Records a new skin target and returns the download to start, if the
    /// identity may fetch at all. Block-shaped models never take skins, and
    /// bare names only resolve against the skin server for the canonical
    /// humanoid model.
    pub fn set_skin(&self, identity: Option<&str>) -> Option<SkinFetch> {
        let Some(name) = identity.filter(|name| !name.is_empty()) else {
            self.reset_skin();
            return None;
        };

        let mut shared = self.shared();
        if shared.model.is_block() {
            return None;
        }

        info!(skin = name, "switching entity skin");
        shared.identity = Some(name.to_owned());
        shared.pending = None;
        self.bump();

        let lowercase = name.to_ascii_lowercase();
        let is_full_url = (lowercase.starts_with("http://") || lowercase.starts_with("https://"))
            && lowercase.ends_with(".png");
        let is_humanoid = shared.model.is_humanoid();

        if !is_full_url && !is_humanoid {
            return None;
        }

        let url = if is_full_url {
            name.to_owned()
        } else {
            format!("{}{}.png", self.config.skin_server, name)
        };

        Some(SkinFetch {
            url,
            identity: name.to_owned(),
            custom_model: !is_humanoid,
        })
    }

    /// Stores a fetched image if `identity` still names the current target;
    /// superseded results are discarded. This is the only write path usable
    /// from a background task.
    pub fn deliver(&self, identity: &str, image: RgbaImage) {
        let mut shared = self.shared();
        if shared.identity.as_deref() == Some(identity) {
            shared.pending = Some(Arc::new(image));
            self.bump();
        } else {
            trace!(identity, "discarding superseded skin delivery");
        }
    }

    /// Forces a fresh download of the current skin, if any is set.
    pub fn reload(&self) -> Option<SkinFetch> {
        let current = self.shared().identity.clone();
        self.set_skin(current.as_deref())
    }

    pub(crate) fn config(&self) -> &SkinServerConfiguration {
        &self.config
    }
}

/// Region of the classic 64x32 layout holding the accessory overlay.
const HAT_REGION_X: std::ops::Range<u32> = 32..64;
const HAT_REGION_Y: std::ops::Range<u32> = 0..16;

/// A skin carries the accessory overlay when the marker region is not one
/// uniform fill. Undersized images never enable the overlay.
#[must_use]
pub fn hat_overlay_present(image: &RgbaImage) -> bool {
    if image.width() < HAT_REGION_X.end || image.height() < HAT_REGION_Y.end {
        return false;
    }

    let first = image.get_pixel(HAT_REGION_X.start, HAT_REGION_Y.start);
    for y in HAT_REGION_Y {
        for x in HAT_REGION_X {
            if image.get_pixel(x, y) != first {
                return true;
            }
        }
    }

    false
}
