use std::collections::BTreeSet;
use std::time::Instant;

use crate::model::{ApiImage, GalleryImage, ImageInfo, ImageMetadata, query_tokens};

use super::{
    CarouselController, CarouselKey, GalleryError, PaginationWindow, QueryDebouncer, Result,
    matching_indices,
};

/// Generation-stamped handle for one image-list fetch. Only the most recently
/// issued ticket can apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Updated,
    Failed { alert: String },
    /// The image left the index (re-fetch) while the request was in flight.
    Vanished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryEvent {
    QueryInput { value: String, at: Instant },
    Tick(Instant),
    TagClicked(String),
    SentinelVisible,
    OpenCarousel(usize),
    CloseCarousel,
    CarouselKey(CarouselKey),
    CarouselJump(usize),
}

/// Single owner of everything the gallery shows: the image index, the active
/// query, the pagination window, the carousel and in-flight bookkeeping.
#[derive(Debug, Clone)]
pub struct GalleryState {
    images: Vec<GalleryImage>,
    query: String,
    tokens: Vec<String>,
    filtered: Vec<usize>,
    pagination: PaginationWindow,
    carousel: CarouselController,
    debouncer: QueryDebouncer,
    loading: bool,
    load_generation: u64,
    last_error: Option<String>,
    refreshing: BTreeSet<String>,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self::new(PaginationWindow::default(), QueryDebouncer::default())
    }
}

impl GalleryState {
    pub fn new(pagination: PaginationWindow, debouncer: QueryDebouncer) -> Self {
        Self {
            images: Vec::new(),
            query: String::new(),
            tokens: Vec::new(),
            filtered: Vec::new(),
            pagination,
            carousel: CarouselController::new(),
            debouncer,
            loading: false,
            load_generation: 0,
            last_error: None,
            refreshing: BTreeSet::new(),
        }
    }

    pub fn images(&self) -> &[GalleryImage] {
        &self.images
    }

    pub fn image(&self, name: &str) -> Option<&GalleryImage> {
        self.images.iter().find(|image| image.name() == name)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn filtered(&self) -> impl Iterator<Item = &GalleryImage> {
        self.filtered.iter().map(|index| &self.images[*index])
    }

    pub fn visible_len(&self) -> usize {
        self.pagination.visible_len(self.filtered.len())
    }

    pub fn visible(&self) -> impl Iterator<Item = &GalleryImage> {
        self.filtered().take(self.visible_len())
    }

    pub fn visible_image(&self, position: usize) -> Option<&GalleryImage> {
        if position >= self.visible_len() {
            return None;
        }
        self.filtered
            .get(position)
            .map(|index| &self.images[*index])
    }

    pub fn has_more(&self) -> bool {
        self.pagination.has_more(self.filtered.len())
    }

    pub fn pagination(&self) -> &PaginationWindow {
        &self.pagination
    }

    pub fn carousel(&self) -> &CarouselController {
        &self.carousel
    }

    pub fn carousel_image(&self) -> Option<&GalleryImage> {
        if !self.carousel.is_open() {
            return None;
        }
        self.visible_image(self.carousel.current())
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn has_pending_query(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn debouncer(&self) -> &QueryDebouncer {
        &self.debouncer
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_generation = self.load_generation.saturating_add(1);
        self.loading = true;
        LoadTicket {
            generation: self.load_generation,
        }
    }

    pub fn is_current_load(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.load_generation
    }

    /// Applies the result of a fetch. Returns `false` when the ticket was
    /// superseded by a later `begin_load` and the result was dropped.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: std::result::Result<Vec<ApiImage>, String>,
    ) -> bool {
        if !self.is_current_load(ticket) {
            log::debug!(
                "dropping stale image list (generation {} < {})",
                ticket.generation,
                self.load_generation
            );
            return false;
        }
        self.loading = false;
        match result {
            Ok(images) => {
                self.last_error = None;
                self.replace_images(images);
            }
            Err(error) => {
                log::error!("image list could not be loaded: {error}");
                self.last_error = Some(error);
            }
        }
        true
    }

    pub fn replace_images(&mut self, images: Vec<ApiImage>) {
        self.images = images.into_iter().map(GalleryImage::new).collect();
        self.refilter();
    }

    /// Applies `query` right away, dropping any pending debounced input.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.debouncer.cancel();
        self.query = query.into();
        self.apply_query();
    }

    /// Appends a clicked tag to the query unless the query already mentions it.
    pub fn add_tag_to_query(&mut self, tag: &str) -> bool {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() || self.query.to_lowercase().contains(&tag) {
            return false;
        }
        let query = format!("{} {tag}", self.query.trim());
        self.set_query(query.trim_start());
        true
    }

    pub fn load_more(&mut self) -> bool {
        let advanced = self.pagination.advance(self.filtered.len());
        if advanced {
            self.carousel.sync_len(self.visible_len());
        }
        advanced
    }

    pub fn open_carousel(&mut self, position: usize) -> Result<()> {
        self.carousel.open(position, self.visible_len())
    }

    pub fn close_carousel(&mut self) {
        self.carousel.close();
    }

    pub fn jump_carousel(&mut self, position: usize) -> Result<()> {
        self.carousel.jump_to(position)
    }

    pub fn is_refreshing(&self, name: &str) -> bool {
        self.refreshing.contains(name)
    }

    pub fn begin_refresh(&mut self, name: &str) -> Result<()> {
        if self.image(name).is_none() {
            return Err(GalleryError::UnknownImage(name.to_string()));
        }
        if !self.refreshing.insert(name.to_string()) {
            return Err(GalleryError::RefreshInFlight(name.to_string()));
        }
        Ok(())
    }

    /// Completes a metadata refresh. The busy flag is cleared whatever the
    /// result; the filter and pagination are left as they are.
    pub fn finish_refresh(
        &mut self,
        name: &str,
        result: std::result::Result<ImageInfo, String>,
    ) -> RefreshOutcome {
        self.refreshing.remove(name);
        match result {
            Ok(info) => match self.images.iter_mut().find(|image| image.name() == name) {
                Some(image) => {
                    image.set_metadata(ImageMetadata::Present(info));
                    RefreshOutcome::Updated
                }
                None => RefreshOutcome::Vanished,
            },
            Err(error) => {
                log::warn!("metadata refresh of {name} failed: {error}");
                RefreshOutcome::Failed {
                    alert: format!("Could not update meta: {error}"),
                }
            }
        }
    }

    /// Maps one input event to its state transition. Returns whether anything
    /// visible changed.
    pub fn handle(&mut self, event: GalleryEvent) -> bool {
        match event {
            GalleryEvent::QueryInput { value, at } => {
                self.query = value.clone();
                self.debouncer.push(value, at);
                true
            }
            GalleryEvent::Tick(now) => match self.debouncer.poll(now) {
                Some(value) => {
                    self.query = value;
                    self.apply_query();
                    true
                }
                None => false,
            },
            GalleryEvent::TagClicked(tag) => self.add_tag_to_query(&tag),
            GalleryEvent::SentinelVisible => self.load_more(),
            GalleryEvent::OpenCarousel(position) => match self.open_carousel(position) {
                Ok(()) => true,
                Err(error) => {
                    log::debug!("carousel not opened: {error}");
                    false
                }
            },
            GalleryEvent::CloseCarousel => {
                let was_open = self.carousel.is_open();
                self.close_carousel();
                was_open
            }
            GalleryEvent::CarouselKey(key) => {
                let before = self.carousel;
                self.carousel.handle_key(key);
                before != self.carousel
            }
            GalleryEvent::CarouselJump(position) => self.jump_carousel(position).is_ok(),
        }
    }

    fn apply_query(&mut self) {
        self.tokens = query_tokens(&self.query);
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = matching_indices(&self.images, &self.tokens);
        self.pagination.reset();
        self.carousel.sync_len(self.visible_len());
    }
}
