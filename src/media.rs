use url::Url;

use crate::{lang, prelude::Error};

/// Media source descriptor for one screen.
/// The variant is fixed by whoever supplies the source;
/// the screen and scheduler never inspect raw strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Video { url: Url },
    Frames { frames: Vec<Url> },
}

impl Source {
    /// Identify a raw descriptor as a video URL.
    pub fn identify(raw: &str) -> Result<Self, Error> {
        let url = Url::parse(raw).map_err(|e| Error::SourceInvalid {
            why: format!("{raw}: {e}"),
        })?;

        let mime = mime_guess::from_path(url.path()).first_or_octet_stream();
        log::info!("Inferred media type '{mime}': {url}");

        match mime.essence_str() {
            "video/mp4" | "video/mpeg" | "video/quicktime" | "video/webm" | "video/x-m4v" | "video/x-matroska"
            | "video/x-msvideo" => Ok(Self::Video { url }),
            other => Err(Error::SourceInvalid {
                why: format!("{raw}: unsupported media type '{other}'"),
            }),
        }
    }

    /// Build an image sequence from an ordered list of raw frame URLs.
    pub fn identify_frames<T: AsRef<str>>(raws: &[T]) -> Result<Self, Error> {
        if raws.is_empty() {
            return Err(Error::SourceInvalid {
                why: "empty image sequence".to_string(),
            });
        }

        let mut frames = Vec::with_capacity(raws.len());
        for raw in raws {
            let raw = raw.as_ref();
            let url = Url::parse(raw).map_err(|e| Error::SourceInvalid {
                why: format!("{raw}: {e}"),
            })?;

            let mime = mime_guess::from_path(url.path()).first_or_octet_stream();
            log::info!("Inferred media type '{mime}': {url}");

            match mime.essence_str() {
                "image/bmp" | "image/gif" | "image/jpeg" | "image/png" | "image/tiff" | "image/webp" => {
                    frames.push(url);
                }
                "image/svg+xml" => {
                    frames.push(url);
                }
                other => {
                    return Err(Error::SourceInvalid {
                        why: format!("{raw}: unsupported media type '{other}'"),
                    });
                }
            }
        }

        Ok(Self::Frames { frames })
    }

    pub fn kind(&self) -> Kind {
        match self {
            Self::Video { .. } => Kind::Video,
            Self::Frames { .. } => Kind::Frames,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Video,
    Frames,
}

impl ToString for Kind {
    fn to_string(&self) -> String {
        match self {
            Self::Video => lang::thing::video(),
            Self::Frames => lang::thing::image_sequence(),
        }
    }
}
