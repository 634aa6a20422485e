use std::sync::Arc;

use async_trait::async_trait;
use hyper::body::Bytes;
use image::RgbaImage;
use tracing::{instrument, warn};

use super::{SkinFetch, SkinState};
use crate::{
    error::{SkinFetchError, SkinFetchResult},
    png,
};

/// Transport seam for skin downloads. Implementations fetch raw bytes from
/// a URL; validation, decoding and delivery stay in [`SkinFetcher`].
#[async_trait]
pub trait SkinSource: Send + Sync {
    async fn fetch(&self, url: &str) -> SkinFetchResult<Bytes>;
}

/// One background download, tied to the `set_skin` call that created it.
/// Completion is reported through [`SkinState::deliver`] exactly once;
/// failures leave the entity on its current texture.
pub struct SkinFetcher {
    source: Arc<dyn SkinSource>,
    owner: Arc<SkinState>,
    fetch: SkinFetch,
}

impl SkinFetcher {
    #[must_use]
    pub fn new(source: Arc<dyn SkinSource>, owner: Arc<SkinState>, fetch: SkinFetch) -> Self {
        Self {
            source,
            owner,
            fetch,
        }
    }

    /// Spawns the download as a fire-and-forget task. There is no
    /// cancellation; a superseded download dies at the delivery guard.
    pub fn start(self, runtime: &tokio::runtime::Handle) -> tokio::task::JoinHandle<()> {
        runtime.spawn(self.run())
    }

    #[instrument(skip(self), fields(identity = %self.fetch.identity, url = %self.fetch.url))]
    pub async fn run(self) {
        match self.fetch_and_decode().await {
            Ok(image) => self.owner.deliver(&self.fetch.identity, image),
            Err(error) => warn!(%error, "skin download failed"),
        }
    }

    async fn fetch_and_decode(&self) -> SkinFetchResult<RgbaImage> {
        let bytes = self.source.fetch(&self.fetch.url).await?;

        let limit = self.owner.config().max_skin_size;
        if bytes.len() as u64 > limit {
            return Err(SkinFetchError::OversizedImage(bytes.len(), limit));
        }

        let image = png::decode_skin(&bytes)?;

        if self.fetch.custom_model {
            Ok(image)
        } else {
            Ok(normalize_humanoid_layout(image))
        }
    }
}

/// Modern square skins keep the limb overlay layers in their bottom half;
/// the classic humanoid layout only reads the top 64x32 region.
fn normalize_humanoid_layout(image: RgbaImage) -> RgbaImage {
    if image.width() == image.height() && image.width() >= 64 {
        let half = image.height() / 2;
        image::imageops::crop_imm(&image, 0, 0, image.width(), half).to_image()
    } else {
        image
    }
}

#[cfg(test)]
mod tests {
    use std::{io::Cursor, sync::Mutex};

    use image::{DynamicImage, ImageFormat, Rgba};
    use nmer_mob_parts::model::MobModel;

    use super::*;
    use crate::config::SkinServerConfiguration;

    struct StaticSource {
        body: Bytes,
        requests: Mutex<Vec<String>>,
    }

    impl StaticSource {
        fn new(body: Bytes) -> Arc<Self> {
            Arc::new(Self {
                body,
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl SkinSource for StaticSource {
        async fn fetch(&self, url: &str) -> SkinFetchResult<Bytes> {
            self.requests.lock().unwrap().push(url.to_owned());
            Ok(self.body.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl SkinSource for FailingSource {
        async fn fetch(&self, _url: &str) -> SkinFetchResult<Bytes> {
            Err(SkinFetchError::UnexpectedStatus(
                hyper::StatusCode::NOT_FOUND,
            ))
        }
    }

    fn png_bytes(width: u32, height: u32) -> Bytes {
        let image = RgbaImage::from_pixel(width, height, Rgba([1, 2, 3, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        Bytes::from(bytes)
    }

    fn owner_with_fetch(identity: &str) -> (Arc<SkinState>, SkinFetch) {
        let state = Arc::new(SkinState::new(
            MobModel::HUMANOID,
            Arc::new(SkinServerConfiguration::default()),
        ));
        let fetch = state.set_skin(Some(identity)).unwrap();

        (state, fetch)
    }

    #[tokio::test]
    async fn successful_downloads_deliver_to_the_owner() {
        let (state, fetch) = owner_with_fetch("PlayerOne");
        let source = StaticSource::new(png_bytes(64, 32));

        SkinFetcher::new(source.clone(), state.clone(), fetch)
            .run()
            .await;

        assert!(state.shared().pending.is_some());
        assert_eq!(
            source.requests.lock().unwrap().as_slice(),
            ["http://s3.amazonaws.com/MinecraftSkins/PlayerOne.png"]
        );
    }

    #[tokio::test]
    async fn downloads_finishing_after_a_newer_skin_change_are_dropped() {
        let (state, fetch) = owner_with_fetch("PlayerOne");
        state.set_skin(Some("PlayerTwo"));

        SkinFetcher::new(StaticSource::new(png_bytes(64, 32)), state.clone(), fetch)
            .run()
            .await;

        assert!(state.shared().pending.is_none());
        assert_eq!(state.skin_name().as_deref(), Some("PlayerTwo"));
    }

    #[tokio::test]
    async fn failed_downloads_leave_the_entity_untouched() {
        let (state, fetch) = owner_with_fetch("PlayerOne");

        SkinFetcher::new(Arc::new(FailingSource), state.clone(), fetch)
            .run()
            .await;

        assert!(state.shared().pending.is_none());
        assert_eq!(state.skin_name().as_deref(), Some("PlayerOne"));
    }

    #[tokio::test]
    async fn non_png_bodies_never_deliver() {
        let (state, fetch) = owner_with_fetch("PlayerOne");
        let source = StaticSource::new(Bytes::from_static(b"<html>not a skin</html>"));

        SkinFetcher::new(source, state.clone(), fetch).run().await;

        assert!(state.shared().pending.is_none());
    }

    #[tokio::test]
    async fn square_humanoid_skins_are_cropped_to_the_classic_layout() {
        let (state, fetch) = owner_with_fetch("PlayerOne");

        SkinFetcher::new(StaticSource::new(png_bytes(64, 64)), state.clone(), fetch)
            .run()
            .await;

        let shared = state.shared();
        let pending = shared.pending.as_ref().unwrap();
        assert_eq!((pending.width(), pending.height()), (64, 32));
    }

    #[tokio::test]
    async fn custom_model_skins_keep_their_layout() {
        let state = Arc::new(SkinState::new(
            MobModel::try_from("sheep").unwrap(),
            Arc::new(SkinServerConfiguration::default()),
        ));
        let fetch = state.set_skin(Some("http://x/fleece.png")).unwrap();
        assert!(fetch.custom_model);

        SkinFetcher::new(StaticSource::new(png_bytes(64, 64)), state.clone(), fetch)
            .run()
            .await;

        let shared = state.shared();
        let pending = shared.pending.as_ref().unwrap();
        assert_eq!((pending.width(), pending.height()), (64, 64));
    }

    #[tokio::test]
    async fn oversized_bodies_are_rejected() {
        let state = Arc::new(SkinState::new(
            MobModel::HUMANOID,
            Arc::new(SkinServerConfiguration {
                max_skin_size: 16,
                ..Default::default()
            }),
        ));
        let fetch = state.set_skin(Some("PlayerOne")).unwrap();

        SkinFetcher::new(StaticSource::new(png_bytes(64, 32)), state.clone(), fetch)
            .run()
            .await;

        assert!(state.shared().pending.is_none());
    }
}
