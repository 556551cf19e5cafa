use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use eframe::egui;

use crate::gallery::{CarouselKey, GalleryEvent, GalleryState, RefreshOutcome};
use crate::runtime::AppContext;

use super::card::{CardView, draw_card};
use super::carousel::{CarouselView, draw_carousel};
use super::layout::{
    GRID_SPACING, card_side, grid_columns, sentinel_fully_visible, show_scroll_top,
};
use super::repaint::{
    RepaintDecisionInputs, should_request_periodic_repaint, should_request_repaint_now,
};
use super::textures::{TextureCache, TextureKey};
use super::worker::{self, WorkerEvent};

const PERIODIC_REPAINT: Duration = Duration::from_millis(250);
const SENTINEL_HEIGHT: f32 = 32.0;

#[derive(Debug, Clone)]
pub enum UiAction {
    Gallery(GalleryEvent),
    LoadTexture(TextureKey),
    ShowDetails(String),
    RefreshMetadata(String),
    Download(String),
    Reload,
    ScrollToTop,
}

pub struct GalleryUiApp {
    app: AppContext,
    state: GalleryState,
    worker_tx: Sender<WorkerEvent>,
    worker_rx: Receiver<WorkerEvent>,
    active_jobs: usize,
    textures: TextureCache,
    details: Option<String>,
    alert: Option<String>,
    status: Option<String>,
    focus_search: bool,
    scroll_to_top: bool,
    show_scroll_top: bool,
    carousel_scrolled_to: Option<usize>,
}

impl GalleryUiApp {
    pub fn new(cc: &eframe::CreationContext<'_>, app: AppContext) -> Self {
        let (worker_tx, worker_rx) = mpsc::channel();
        let state = app.new_state();
        let mut ui_app = Self {
            app,
            state,
            worker_tx,
            worker_rx,
            active_jobs: 0,
            textures: TextureCache::default(),
            details: None,
            alert: None,
            status: None,
            focus_search: true,
            scroll_to_top: false,
            show_scroll_top: false,
            carousel_scrolled_to: None,
        };
        ui_app.reload(&cc.egui_ctx);
        ui_app
    }

    fn reload(&mut self, ctx: &egui::Context) {
        let ticket = self.state.begin_load();
        log::info!(
            "loading images from {} (generation {})",
            self.app.config().base_url,
            ticket.generation()
        );
        self.active_jobs += 1;
        worker::spawn_load(
            self.app.gallery_service().clone(),
            ticket,
            self.worker_tx.clone(),
            ctx.clone(),
        );
    }

    fn poll_worker_events(&mut self, ctx: &egui::Context) -> bool {
        let mut changed = false;
        while let Ok(event) = self.worker_rx.try_recv() {
            changed = true;
            self.active_jobs = self.active_jobs.saturating_sub(1);
            match event {
                WorkerEvent::ImagesLoaded { ticket, result } => {
                    if self.state.finish_load(ticket, result) {
                        self.status = self
                            .state
                            .last_error()
                            .map(|error| format!("Could not load images: {error}"));
                    }
                }
                WorkerEvent::MetadataRefreshed { name, result } => {
                    match self.state.finish_refresh(&name, result) {
                        RefreshOutcome::Updated => {
                            self.status = Some(format!("Updated {name}"));
                        }
                        RefreshOutcome::Failed { alert } => self.alert = Some(alert),
                        RefreshOutcome::Vanished => {}
                    }
                }
                WorkerEvent::TextureDecoded { key, result } => {
                    self.textures.finish(ctx, key, result);
                }
                WorkerEvent::Downloaded {
                    name,
                    target,
                    result,
                } => match result {
                    Ok(bytes) => {
                        self.status =
                            Some(format!("Saved {name} to {} ({bytes} bytes)", target.display()));
                    }
                    Err(error) => {
                        self.alert = Some(format!("Could not download {name}: {error}"));
                    }
                },
            }
        }
        changed
    }

    fn handle_hotkeys(&mut self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        let carousel_open = self.state.carousel().is_open();
        ctx.input_mut(|input| {
            if input.consume_key(egui::Modifiers::COMMAND, egui::Key::Space) {
                self.focus_search = true;
            }
            if !carousel_open {
                return;
            }
            for (key, carousel_key) in [
                (egui::Key::ArrowLeft, CarouselKey::Left),
                (egui::Key::ArrowRight, CarouselKey::Right),
                (egui::Key::Escape, CarouselKey::Escape),
            ] {
                if input.consume_key(egui::Modifiers::NONE, key) {
                    actions.push(UiAction::Gallery(GalleryEvent::CarouselKey(carousel_key)));
                }
            }
        });
    }

    fn draw_search_bar(&mut self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        egui::TopBottomPanel::top("gallery-search").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let mut query = self.state.query().to_string();
                let response = ui.add(
                    egui::TextEdit::singleline(&mut query)
                        .hint_text("Search ...")
                        .desired_width((ui.available_width() - 220.0).max(120.0)),
                );
                if self.focus_search {
                    response.request_focus();
                    self.focus_search = false;
                }
                if response.changed() {
                    actions.push(UiAction::Gallery(GalleryEvent::QueryInput {
                        value: query,
                        at: Instant::now(),
                    }));
                }
                ui.label(format!("{} found", self.state.filtered_len()));
                if ui
                    .add_enabled(!self.state.is_loading(), egui::Button::new("Reload"))
                    .clicked()
                {
                    actions.push(UiAction::Reload);
                }
            });
            if let Some(status) = &self.status {
                ui.weak(status);
            }
            ui.add_space(6.0);
        });
    }

    fn draw_gallery(&mut self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.images().is_empty() {
                if self.state.is_loading() {
                    ui.centered_and_justified(|ui| ui.spinner());
                } else if let Some(error) = self.state.last_error() {
                    ui.vertical_centered(|ui| {
                        ui.add_space(48.0);
                        ui.colored_label(ui.visuals().error_fg_color, error);
                        if ui.button("Retry").clicked() {
                            actions.push(UiAction::Reload);
                        }
                    });
                } else {
                    ui.centered_and_justified(|ui| ui.label("No images yet"));
                }
                return;
            }
            if self.state.filtered_len() == 0 {
                ui.centered_and_justified(|ui| ui.label("No images match your search"));
                return;
            }

            let mut scroll = egui::ScrollArea::vertical()
                .id_salt("gallery-grid")
                .auto_shrink([false, false]);
            if self.scroll_to_top {
                scroll = scroll.vertical_scroll_offset(0.0);
                self.scroll_to_top = false;
            }
            let thumbnail_size = self.app.config().thumbnail_size;
            let state = &self.state;
            let textures = &self.textures;
            let output = scroll.show(ui, |ui| {
                let width = ui.available_width();
                let columns = grid_columns(width);
                let side = card_side(width, columns);
                egui::Grid::new("gallery-cards")
                    .spacing(egui::vec2(GRID_SPACING, GRID_SPACING))
                    .show(ui, |ui| {
                        for (position, image) in state.visible().enumerate() {
                            let card = CardView {
                                image,
                                position,
                                side,
                                thumbnail_size,
                            };
                            draw_card(ui, card, textures, actions);
                            if (position + 1) % columns == 0 {
                                ui.end_row();
                            }
                        }
                    });

                if state.has_more() {
                    let (rect, _) = ui.allocate_exact_size(
                        egui::vec2(width, SENTINEL_HEIGHT),
                        egui::Sense::hover(),
                    );
                    egui::Spinner::new().paint_at(
                        ui,
                        egui::Rect::from_center_size(
                            rect.center(),
                            egui::vec2(SENTINEL_HEIGHT / 2.0, SENTINEL_HEIGHT / 2.0),
                        ),
                    );
                    if sentinel_fully_visible(ui.clip_rect(), rect) {
                        actions.push(UiAction::Gallery(GalleryEvent::SentinelVisible));
                    }
                }
            });
            self.show_scroll_top = show_scroll_top(output.state.offset.y);
        });

        if self.show_scroll_top && !self.state.carousel().is_open() {
            egui::Area::new(egui::Id::new("gallery-scroll-top"))
                .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-24.0, -24.0))
                .show(ctx, |ui| {
                    if ui.button("↑ Top").clicked() {
                        actions.push(UiAction::ScrollToTop);
                    }
                });
        }
    }

    fn draw_carousel(&mut self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        let carousel = *self.state.carousel();
        if !carousel.is_open() {
            self.carousel_scrolled_to = None;
            return;
        }
        let scroll_to_current = self.carousel_scrolled_to != Some(carousel.current());
        self.carousel_scrolled_to = Some(carousel.current());
        let view = CarouselView {
            state: &self.state,
            textures: &self.textures,
            thumbnail_size: self.app.config().thumbnail_size,
            scroll_to_current,
        };
        draw_carousel(ctx, view, actions);
    }

    fn draw_details(&mut self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        let Some(name) = self.details.clone() else {
            return;
        };
        let Some(image) = self.state.image(&name) else {
            self.details = None;
            return;
        };
        let api_image = image.api_image();
        let busy = self.state.is_refreshing(&name);
        let mut open = true;
        egui::Window::new(api_image.display_title())
            .id(egui::Id::new("gallery-details"))
            .collapsible(false)
            .resizable(true)
            .default_width(420.0)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.weak(&name);
                ui.separator();
                egui::ScrollArea::vertical()
                    .max_height(320.0)
                    .show(ui, |ui| ui.label(api_image.details_text()));
                ui.separator();
                ui.horizontal(|ui| {
                    let label = if busy { "Updating ..." } else { "Update" };
                    if ui.add_enabled(!busy, egui::Button::new(label)).clicked() {
                        actions.push(UiAction::RefreshMetadata(name.clone()));
                    }
                    if busy {
                        ui.spinner();
                    }
                });
            });
        // Stays open while its refresh is in flight.
        if !open && !busy {
            self.details = None;
        }
    }

    fn draw_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = &self.alert else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new("Error")
            .id(egui::Id::new("gallery-alert"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.alert = None;
        }
    }

    fn apply_actions(&mut self, ctx: &egui::Context, actions: Vec<UiAction>) -> bool {
        let mut changed = false;
        for action in actions {
            match action {
                UiAction::Gallery(event) => changed |= self.state.handle(event),
                UiAction::LoadTexture(key) => {
                    if self.textures.begin(&key) {
                        self.active_jobs += 1;
                        worker::spawn_texture(
                            self.app.gallery_service().clone(),
                            key,
                            self.worker_tx.clone(),
                            ctx.clone(),
                        );
                        changed = true;
                    }
                }
                UiAction::ShowDetails(name) => {
                    self.details = Some(name);
                    changed = true;
                }
                UiAction::RefreshMetadata(name) => match self.state.begin_refresh(&name) {
                    Ok(()) => {
                        self.active_jobs += 1;
                        worker::spawn_refresh(
                            self.app.gallery_service().clone(),
                            name,
                            self.worker_tx.clone(),
                            ctx.clone(),
                        );
                        changed = true;
                    }
                    Err(error) => log::debug!("refresh not started: {error}"),
                },
                UiAction::Download(name) => changed |= self.start_download(ctx, &name),
                UiAction::Reload => {
                    self.textures.clear();
                    self.reload(ctx);
                    changed = true;
                }
                UiAction::ScrollToTop => {
                    self.scroll_to_top = true;
                    changed = true;
                }
            }
        }
        changed
    }

    fn start_download(&mut self, ctx: &egui::Context, name: &str) -> bool {
        let Some(image) = self.state.image(name).map(|image| image.api_image().clone()) else {
            return false;
        };
        let Some(target) = pick_download_target(&image.name) else {
            return false;
        };
        self.active_jobs += 1;
        worker::spawn_download(
            self.app.gallery_service().clone(),
            image,
            target,
            self.worker_tx.clone(),
            ctx.clone(),
        );
        true
    }
}

fn pick_download_target(file_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Save image")
        .set_file_name(file_name)
        .save_file()
}

impl eframe::App for GalleryUiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let worker_state_changed = self.poll_worker_events(ctx);
        let query_applied = self.state.handle(GalleryEvent::Tick(Instant::now()));

        let mut actions = Vec::new();
        self.handle_hotkeys(ctx, &mut actions);
        self.draw_search_bar(ctx, &mut actions);
        self.draw_gallery(ctx, &mut actions);
        self.draw_details(ctx, &mut actions);
        self.draw_carousel(ctx, &mut actions);
        self.draw_alert(ctx);
        let has_pending_actions = self.apply_actions(ctx, actions);

        if let Some(remaining) = self.state.debouncer().remaining(Instant::now()) {
            ctx.request_repaint_after(remaining);
        }

        let inputs = ctx.input(|input| RepaintDecisionInputs {
            worker_state_changed: worker_state_changed || query_applied,
            has_pending_actions,
            has_pointer_activity: input.pointer.any_down()
                || input.pointer.delta() != egui::Vec2::ZERO,
            has_scroll_activity: input.raw_scroll_delta != egui::Vec2::ZERO
                || input.smooth_scroll_delta != egui::Vec2::ZERO,
            has_input_events: !input.events.is_empty(),
            has_active_jobs: self.active_jobs > 0 || self.textures.has_pending(),
        });
        if should_request_repaint_now(inputs) {
            ctx.request_repaint();
        } else if should_request_periodic_repaint(inputs) {
            ctx.request_repaint_after(PERIODIC_REPAINT);
        }
    }
}
