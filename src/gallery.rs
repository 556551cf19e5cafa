mod carousel;
mod debounce;
mod error;
mod filter;
mod pagination;
mod state;

#[cfg(test)]
mod tests;

pub use carousel::{CarouselController, CarouselKey};
pub use debounce::{DEFAULT_DEBOUNCE, QueryDebouncer};
pub use error::{GalleryError, Result};
pub use filter::{filter, matching_indices};
pub use pagination::{DEFAULT_PAGE_SIZE, PaginationWindow};
pub use state::{GalleryEvent, GalleryState, LoadTicket, RefreshOutcome};
