use eframe::egui;
use eframe::egui::load::SizedTexture;

use crate::gallery::GalleryEvent;
use crate::model::GalleryImage;

use super::app::UiAction;
use super::layout::cover_uv;
use super::textures::{TextureCache, TextureKey};

const CARD_ROUNDING: f32 = 8.0;

pub struct CardView<'a> {
    pub image: &'a GalleryImage,
    pub position: usize,
    pub side: f32,
    pub thumbnail_size: u32,
}

pub fn draw_card(
    ui: &mut egui::Ui,
    card: CardView<'_>,
    textures: &TextureCache,
    actions: &mut Vec<UiAction>,
) {
    let api_image = card.image.api_image();
    let name = api_image.name.clone();

    ui.vertical(|ui| {
        ui.set_width(card.side);

        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(card.side, card.side), egui::Sense::click());
        if ui.is_rect_visible(rect) {
            let key = TextureKey::new(api_image.url.clone(), card.thumbnail_size);
            paint_cover(ui, rect, textures, &key, actions);
        }
        let response = response
            .on_hover_text(api_image.alt_text())
            .on_hover_cursor(egui::CursorIcon::PointingHand);
        if response.clicked() {
            actions.push(UiAction::Gallery(GalleryEvent::OpenCarousel(card.position)));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.menu_button("⋯", |ui| {
                if ui.button("Details").clicked() {
                    actions.push(UiAction::ShowDetails(name.clone()));
                    ui.close_menu();
                }
                if ui.button("Download").clicked() {
                    actions.push(UiAction::Download(name.clone()));
                    ui.close_menu();
                }
            });
            ui.add(
                egui::Label::new(egui::RichText::new(api_image.display_title()).strong())
                    .truncate(),
            );
        });

        let tags = api_image.card_tags();
        if !tags.is_empty() {
            ui.horizontal_wrapped(|ui| {
                for tag in tags {
                    if ui.small_button(format!("#{tag}")).clicked() {
                        actions.push(UiAction::Gallery(GalleryEvent::TagClicked(tag)));
                    }
                }
            });
        }
    });
}

/// Paints the texture for `key` cropped to fill `rect`, or a placeholder
/// while it is still loading.
pub fn paint_cover(
    ui: &egui::Ui,
    rect: egui::Rect,
    textures: &TextureCache,
    key: &TextureKey,
    actions: &mut Vec<UiAction>,
) {
    if let Some(texture) = textures.get(key) {
        egui::Image::new(SizedTexture::from_handle(texture))
            .uv(cover_uv(texture.size_vec2(), rect.size()))
            .corner_radius(CARD_ROUNDING)
            .paint_at(ui, rect);
        return;
    }

    let painter = ui.painter();
    painter.rect_filled(rect, CARD_ROUNDING, ui.visuals().extreme_bg_color);
    if let Some(error) = textures.failure(key) {
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "⚠",
            egui::FontId::proportional(rect.height().min(32.0)),
            ui.visuals().warn_fg_color,
        );
        log::trace!("placeholder for {}: {error}", key.url);
        return;
    }

    actions.push(UiAction::LoadTexture(key.clone()));
    let spinner_side = (rect.width().min(rect.height()) / 4.0).clamp(8.0, 32.0);
    egui::Spinner::new().paint_at(
        ui,
        egui::Rect::from_center_size(rect.center(), egui::vec2(spinner_side, spinner_side)),
    );
}
