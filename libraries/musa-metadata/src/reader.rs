/// Tag reader implementation using lofty
use crate::error::{MetadataError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use lofty::{Accessor, AudioFile, ItemKey, ItemValue, PictureType, TaggedFileExt};
use musa_core::{RawTrack, TrackTags};
use std::path::Path;

/// Covers larger than this are left out of the tag record
const MAX_COVER_SIZE: usize = 10 * 1024 * 1024;

/// Items with a dedicated `TrackTags` field
const MAPPED_KEYS: &[ItemKey] = &[
    ItemKey::TrackTitle,
    ItemKey::TrackArtist,
    ItemKey::AlbumTitle,
    ItemKey::Genre,
    ItemKey::Year,
    ItemKey::TrackNumber,
    ItemKey::TrackTotal,
    ItemKey::DiscNumber,
    ItemKey::DiscTotal,
    ItemKey::Composer,
    ItemKey::Comment,
];

/// Tag reader using the lofty library
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyTagReader;

impl LoftyTagReader {
    /// Create a new tag reader
    pub fn new() -> Self {
        Self
    }

    /// Read the tag record of one file
    pub fn read(&self, path: &Path) -> Result<RawTrack> {
        if !path.exists() {
            return Err(MetadataError::FileNotFound(path.display().to_string()));
        }

        let tagged_file = lofty::read_from_path(path)?;
        let duration_ms = tagged_file.properties().duration().as_millis() as u64;

        let mut tags = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag())
            .map(Self::extract_from_tag)
            .unwrap_or_default();
        tags.duration_ms = Some(duration_ms);

        Ok(RawTrack {
            path: path.display().to_string(),
            tags,
        })
    }

    /// Read the tag record, falling back to an untagged record
    ///
    /// Files lofty cannot parse still show up (titled by file name).
    pub fn read_or_untagged(&self, path: &Path) -> RawTrack {
        match self.read(path) {
            Ok(track) => track,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Unreadable tags");
                RawTrack::untagged(path.display().to_string())
            }
        }
    }

    fn extract_from_tag(tag: &lofty::Tag) -> TrackTags {
        TrackTags {
            title: tag.title().map(|s| s.to_string()),
            track_title: tag.get_string(&ItemKey::TrackTitle).map(str::to_string),
            artist: tag.artist().map(|s| s.to_string()),
            track_artist: tag.get_string(&ItemKey::TrackArtist).map(str::to_string),
            album: tag.album().map(|s| s.to_string()),
            genre: tag.genre().map(|s| s.to_string()),
            duration_ms: None,
            cover: Self::cover_data_url(tag),
            year: tag.get_string(&ItemKey::Year).map(str::to_string),
            track_number: tag.get_string(&ItemKey::TrackNumber).map(str::to_string),
            total_tracks: tag.get_string(&ItemKey::TrackTotal).map(str::to_string),
            disc_number: tag.get_string(&ItemKey::DiscNumber).map(str::to_string),
            total_discs: tag.get_string(&ItemKey::DiscTotal).map(str::to_string),
            composer: tag.get_string(&ItemKey::Composer).map(str::to_string),
            comment: tag.get_string(&ItemKey::Comment).map(str::to_string),
            items: tag
                .items()
                .filter_map(|item| item_entry(item.key(), item.value()))
                .collect(),
        }
    }

    /// Front cover (or first picture) as a `data:` URL
    fn cover_data_url(tag: &lofty::Tag) -> Option<String> {
        let pictures = tag.pictures();
        let picture = pictures
            .iter()
            .find(|p| matches!(p.pic_type(), PictureType::CoverFront))
            .or_else(|| pictures.first())?;

        let data = picture.data();
        if data.len() > MAX_COVER_SIZE {
            return None;
        }

        let mime_type = picture
            .mime_type()
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| "image/jpeg".to_string());

        Some(format!("data:{};base64,{}", mime_type, STANDARD.encode(data)))
    }
}

/// Name and printable value of an item without a dedicated field
fn item_entry(key: &ItemKey, value: &ItemValue) -> Option<(String, String)> {
    if MAPPED_KEYS.contains(key) {
        return None;
    }

    let name = match key {
        ItemKey::Unknown(name) => name.clone(),
        other => format!("{:?}", other),
    };
    let value = match value {
        ItemValue::Text(text) | ItemValue::Locator(text) => text.clone(),
        ItemValue::Binary(_) => "<binary>".to_string(),
    };
    Some((name, value))
}
