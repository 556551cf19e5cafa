use std::path::PathBuf;
use std::sync::mpsc::Sender;

use eframe::egui;

use crate::gallery::LoadTicket;
use crate::model::{ApiImage, ImageInfo};
use crate::runtime::GalleryService;

use super::textures::{TextureKey, decode_image};

pub enum WorkerEvent {
    ImagesLoaded {
        ticket: LoadTicket,
        result: Result<Vec<ApiImage>, String>,
    },
    MetadataRefreshed {
        name: String,
        result: Result<ImageInfo, String>,
    },
    TextureDecoded {
        key: TextureKey,
        result: Result<egui::ColorImage, String>,
    },
    Downloaded {
        name: String,
        target: PathBuf,
        result: Result<u64, String>,
    },
}

pub fn spawn_load(
    service: GalleryService,
    ticket: LoadTicket,
    tx: Sender<WorkerEvent>,
    ctx: egui::Context,
) {
    std::thread::spawn(move || {
        let result = service.load_images().map_err(|error| error.to_string());
        let _ = tx.send(WorkerEvent::ImagesLoaded { ticket, result });
        ctx.request_repaint();
    });
}

pub fn spawn_refresh(
    service: GalleryService,
    name: String,
    tx: Sender<WorkerEvent>,
    ctx: egui::Context,
) {
    std::thread::spawn(move || {
        let result = service
            .refresh_metadata(&name)
            .map_err(|error| error.to_string());
        let _ = tx.send(WorkerEvent::MetadataRefreshed { name, result });
        ctx.request_repaint();
    });
}

pub fn spawn_download(
    service: GalleryService,
    image: ApiImage,
    target: PathBuf,
    tx: Sender<WorkerEvent>,
    ctx: egui::Context,
) {
    std::thread::spawn(move || {
        let result = service
            .download(&image, &target)
            .map_err(|error| error.to_string());
        let _ = tx.send(WorkerEvent::Downloaded {
            name: image.name,
            target,
            result,
        });
        ctx.request_repaint();
    });
}

/// Fetch and decode run on the rayon pool so a page of thumbnails does not
/// spawn a thread per card.
pub fn spawn_texture(
    service: GalleryService,
    key: TextureKey,
    tx: Sender<WorkerEvent>,
    ctx: egui::Context,
) {
    rayon::spawn(move || {
        let result = service
            .image_bytes(&key.url)
            .map_err(|error| error.to_string())
            .and_then(|bytes| decode_image(&bytes, key.max_side));
        let _ = tx.send(WorkerEvent::TextureDecoded { key, result });
        ctx.request_repaint();
    });
}
