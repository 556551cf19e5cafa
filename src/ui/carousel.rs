use eframe::egui;
use eframe::egui::load::SizedTexture;

use crate::gallery::{CarouselKey, GalleryEvent, GalleryState};

use super::app::UiAction;
use super::card::paint_cover;
use super::layout::{CAROUSEL_IMAGE_SIDE, CAROUSEL_THUMB_SIZE, fit_size};
use super::textures::{TextureCache, TextureKey};

const STRIP_HEIGHT: f32 = 64.0;
const EDGE_MARGIN: f32 = 64.0;
const NAV_BUTTON_SIZE: egui::Vec2 = egui::vec2(40.0, 40.0);

pub struct CarouselView<'a> {
    pub state: &'a GalleryState,
    pub textures: &'a TextureCache,
    pub thumbnail_size: u32,
    /// Scroll the strip so the current thumbnail is in view.
    pub scroll_to_current: bool,
}

/// Full-window overlay with the focused image, navigation buttons and a
/// thumbnail strip over the visible sequence.
pub fn draw_carousel(ctx: &egui::Context, view: CarouselView<'_>, actions: &mut Vec<UiAction>) {
    let carousel = view.state.carousel();
    let Some(current) = view.state.carousel_image() else {
        return;
    };
    let current_position = carousel.current();
    let screen = ctx.screen_rect();

    egui::Area::new(egui::Id::new("gallery-carousel"))
        .order(egui::Order::Foreground)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            let background = ui.allocate_rect(screen, egui::Sense::click());
            ui.painter()
                .rect_filled(screen, 0.0, egui::Color32::from_black_alpha(230));

            let image_bounds = egui::Rect::from_min_max(
                screen.min + egui::vec2(EDGE_MARGIN, EDGE_MARGIN / 2.0),
                screen.max - egui::vec2(EDGE_MARGIN, STRIP_HEIGHT + EDGE_MARGIN / 2.0),
            );
            let api_image = current.api_image();
            let full_key = TextureKey::new(api_image.url.clone(), CAROUSEL_IMAGE_SIDE);
            let thumb_key = TextureKey::new(api_image.url.clone(), view.thumbnail_size);
            // The grid thumbnail stands in until the large version arrives.
            let shown = view
                .textures
                .get(&full_key)
                .or_else(|| view.textures.get(&thumb_key));
            if view.textures.get(&full_key).is_none() && view.textures.failure(&full_key).is_none()
            {
                actions.push(UiAction::LoadTexture(full_key.clone()));
            }
            match shown {
                Some(texture) => {
                    let size = fit_size(texture.size_vec2(), image_bounds.size());
                    let rect = egui::Rect::from_center_size(image_bounds.center(), size);
                    egui::Image::new(SizedTexture::from_handle(texture)).paint_at(ui, rect);
                    // Swallows clicks so only the backdrop closes the overlay.
                    ui.allocate_rect(rect, egui::Sense::click());
                }
                None => {
                    let side = image_bounds.width().min(image_bounds.height()).min(160.0);
                    let rect = egui::Rect::from_center_size(
                        image_bounds.center(),
                        egui::vec2(side, side),
                    );
                    paint_cover(ui, rect, view.textures, &full_key, actions);
                }
            }

            let nav_y = image_bounds.center().y;
            let prev = egui::Rect::from_center_size(
                egui::pos2(screen.left() + EDGE_MARGIN / 2.0, nav_y),
                NAV_BUTTON_SIZE,
            );
            if ui
                .put(prev, egui::Button::new(egui::RichText::new("‹").size(28.0)))
                .clicked()
            {
                actions.push(UiAction::Gallery(GalleryEvent::CarouselKey(
                    CarouselKey::Left,
                )));
            }
            let next = egui::Rect::from_center_size(
                egui::pos2(screen.right() - EDGE_MARGIN / 2.0, nav_y),
                NAV_BUTTON_SIZE,
            );
            if ui
                .put(next, egui::Button::new(egui::RichText::new("›").size(28.0)))
                .clicked()
            {
                actions.push(UiAction::Gallery(GalleryEvent::CarouselKey(
                    CarouselKey::Right,
                )));
            }
            let close = egui::Rect::from_center_size(
                egui::pos2(screen.right() - EDGE_MARGIN / 2.0, screen.top() + EDGE_MARGIN / 2.0),
                NAV_BUTTON_SIZE,
            );
            if ui
                .put(close, egui::Button::new(egui::RichText::new("×").size(24.0)))
                .clicked()
            {
                actions.push(UiAction::Gallery(GalleryEvent::CloseCarousel));
            }

            ui.painter().text(
                egui::pos2(screen.left() + EDGE_MARGIN / 2.0, screen.top() + EDGE_MARGIN / 2.0),
                egui::Align2::LEFT_CENTER,
                format!(
                    "{} / {}  {}",
                    current_position + 1,
                    carousel.len(),
                    api_image.display_title()
                ),
                egui::FontId::proportional(14.0),
                egui::Color32::WHITE,
            );

            let strip = egui::Rect::from_min_max(
                egui::pos2(screen.left() + EDGE_MARGIN, screen.bottom() - STRIP_HEIGHT),
                egui::pos2(screen.right() - EDGE_MARGIN, screen.bottom() - 8.0),
            );
            ui.scope_builder(egui::UiBuilder::new().max_rect(strip), |ui| {
                egui::ScrollArea::horizontal()
                    .id_salt("gallery-carousel-strip")
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            for (position, image) in view.state.visible().enumerate() {
                                let (rect, response) = ui.allocate_exact_size(
                                    CAROUSEL_THUMB_SIZE,
                                    egui::Sense::click(),
                                );
                                if ui.is_rect_visible(rect) {
                                    let key = TextureKey::new(
                                        image.api_image().url.clone(),
                                        view.thumbnail_size,
                                    );
                                    paint_cover(ui, rect, view.textures, &key, actions);
                                }
                                if position == current_position {
                                    ui.painter().rect_stroke(
                                        rect,
                                        4.0,
                                        egui::Stroke::new(2.0, egui::Color32::WHITE),
                                        egui::StrokeKind::Outside,
                                    );
                                    if view.scroll_to_current {
                                        response.scroll_to_me(Some(egui::Align::Center));
                                    }
                                } else if response.clicked() {
                                    actions.push(UiAction::Gallery(GalleryEvent::CarouselJump(
                                        position,
                                    )));
                                }
                            }
                        });
                    });
            });

            if background.clicked() {
                actions.push(UiAction::Gallery(GalleryEvent::CloseCarousel));
            }
        });
}
