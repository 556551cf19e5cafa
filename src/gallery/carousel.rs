use super::{GalleryError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselKey {
    Left,
    Right,
    Escape,
}

/// Focused position inside the visible image sequence, with wrap-around
/// navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarouselController {
    current: usize,
    len: usize,
    open: bool,
}

impl CarouselController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn open(&mut self, start: usize, len: usize) -> Result<()> {
        if len == 0 {
            return Err(GalleryError::EmptyCarousel);
        }
        if start >= len {
            return Err(GalleryError::IndexOutOfRange { index: start, len });
        }
        self.current = start;
        self.len = len;
        self.open = true;
        Ok(())
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn next(&mut self) {
        if self.open && self.len > 0 {
            self.current = (self.current + 1) % self.len;
        }
    }

    pub fn prev(&mut self) {
        if self.open && self.len > 0 {
            self.current = (self.current + self.len - 1) % self.len;
        }
    }

    pub fn jump_to(&mut self, index: usize) -> Result<()> {
        if !self.open {
            return Err(GalleryError::CarouselClosed);
        }
        if index >= self.len {
            return Err(GalleryError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        self.current = index;
        Ok(())
    }

    pub fn handle_key(&mut self, key: CarouselKey) {
        if !self.open {
            return;
        }
        match key {
            CarouselKey::Left => self.prev(),
            CarouselKey::Right => self.next(),
            CarouselKey::Escape => self.close(),
        }
    }

    /// Follows a change of the visible sequence: the focus is clamped to the
    /// new bounds and an empty sequence closes the carousel.
    pub fn sync_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.current = 0;
            self.open = false;
        } else if self.current >= len {
            self.current = len - 1;
        }
    }
}
