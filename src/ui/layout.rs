use eframe::egui;

pub const GRID_SPACING: f32 = 16.0;
pub const CAROUSEL_THUMB_SIZE: egui::Vec2 = egui::vec2(64.0, 40.0);

// Window widths at which the grid gains columns.
const COLUMN_BREAKPOINTS: [(f32, usize); 5] = [
    (1280.0, 6),
    (1024.0, 4),
    (768.0, 3),
    (640.0, 2),
    (0.0, 1),
];

pub fn grid_columns(available_width: f32) -> usize {
    COLUMN_BREAKPOINTS
        .iter()
        .find(|(min_width, _)| available_width >= *min_width)
        .map(|(_, columns)| *columns)
        .unwrap_or(1)
}

pub fn card_side(available_width: f32, columns: usize) -> f32 {
    let columns = columns.max(1);
    let gaps = GRID_SPACING * (columns - 1) as f32;
    ((available_width - gaps) / columns as f32).max(1.0)
}

/// The pagination sentinel only counts once it is entirely inside the
/// visible part of the scroll area.
pub fn sentinel_fully_visible(clip_rect: egui::Rect, sentinel: egui::Rect) -> bool {
    clip_rect.contains_rect(sentinel)
}

pub fn show_scroll_top(scroll_offset_y: f32) -> bool {
    scroll_offset_y > 1.0
}

/// Largest size with the aspect ratio of `image` that fits inside `bounds`.
pub fn fit_size(image: egui::Vec2, bounds: egui::Vec2) -> egui::Vec2 {
    if image.x <= 0.0 || image.y <= 0.0 {
        return egui::Vec2::ZERO;
    }
    let scale = (bounds.x / image.x).min(bounds.y / image.y);
    image * scale
}

/// UV rectangle that crops the centre of an image so it covers `target`
/// without distortion.
pub fn cover_uv(image: egui::Vec2, target: egui::Vec2) -> egui::Rect {
    let full = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    if image.x <= 0.0 || image.y <= 0.0 || target.x <= 0.0 || target.y <= 0.0 {
        return full;
    }
    let image_aspect = image.x / image.y;
    let target_aspect = target.x / target.y;
    if image_aspect > target_aspect {
        let visible = target_aspect / image_aspect;
        let margin = (1.0 - visible) / 2.0;
        egui::Rect::from_min_max(egui::pos2(margin, 0.0), egui::pos2(1.0 - margin, 1.0))
    } else {
        let visible = image_aspect / target_aspect;
        let margin = (1.0 - visible) / 2.0;
        egui::Rect::from_min_max(egui::pos2(0.0, margin), egui::pos2(1.0, 1.0 - margin))
    }
}

/// Longest side requested for the image shown in the carousel.
pub const CAROUSEL_IMAGE_SIDE: u32 = 2048;
