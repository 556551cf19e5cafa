use std::collections::{HashMap, HashSet};

use eframe::egui;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureKey {
    pub url: String,
    pub max_side: u32,
}

impl TextureKey {
    pub fn new(url: impl Into<String>, max_side: u32) -> Self {
        Self {
            url: url.into(),
            max_side,
        }
    }
}

/// Decodes `bytes` and scales the result down so neither side exceeds
/// `max_side`. Smaller images keep their size.
pub fn decode_image(bytes: &[u8], max_side: u32) -> Result<egui::ColorImage, String> {
    let decoded = image::load_from_memory(bytes).map_err(|error| error.to_string())?;
    let decoded = if decoded.width() > max_side || decoded.height() > max_side {
        decoded.thumbnail(max_side, max_side)
    } else {
        decoded
    };
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

#[derive(Default)]
pub struct TextureCache {
    loaded: HashMap<TextureKey, egui::TextureHandle>,
    pending: HashSet<TextureKey>,
    failed: HashMap<TextureKey, String>,
}

impl TextureCache {
    pub fn get(&self, key: &TextureKey) -> Option<&egui::TextureHandle> {
        self.loaded.get(key)
    }

    pub fn failure(&self, key: &TextureKey) -> Option<&str> {
        self.failed.get(key).map(String::as_str)
    }

    /// Marks `key` as requested. Returns `false` if it is already loaded,
    /// loading or known to fail.
    pub fn begin(&mut self, key: &TextureKey) -> bool {
        if self.loaded.contains_key(key) || self.failed.contains_key(key) {
            return false;
        }
        self.pending.insert(key.clone())
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn finish(
        &mut self,
        ctx: &egui::Context,
        key: TextureKey,
        result: Result<egui::ColorImage, String>,
    ) {
        self.pending.remove(&key);
        match result {
            Ok(color) => {
                let handle = ctx.load_texture(
                    format!("gallery-{}-{}", key.max_side, key.url),
                    color,
                    egui::TextureOptions::LINEAR,
                );
                self.loaded.insert(key, handle);
            }
            Err(error) => {
                log::warn!("image {} could not be shown: {error}", key.url);
                self.failed.insert(key, error);
            }
        }
    }

    pub fn clear(&mut self) {
        self.loaded.clear();
        self.pending.clear();
        self.failed.clear();
    }
}
