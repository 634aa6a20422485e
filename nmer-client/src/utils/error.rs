use hyper::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkinFetchError {
    #[error("Http error: {0}")]
    HttpError(#[from] hyper::http::Error),
    #[error("Request error: {0}")]
    RequestError(#[from] hyper_util::client::legacy::Error),
    #[error("Body error: {0}")]
    BodyError(#[from] hyper::Error),
    #[error("Skin server answered with status {0}")]
    UnexpectedStatus(StatusCode),
    #[error("Skin image is {0} bytes, over the configured limit of {1}")]
    OversizedImage(usize, u64),
    #[error("Downloaded data is not a PNG image")]
    InvalidPngHeader,
    #[error("Unable to decode skin image: {0}")]
    DecodeError(#[from] image::ImageError),
}

pub type SkinFetchResult<T> = std::result::Result<T, SkinFetchError>;
