use std::time::{Duration, Instant};

use crate::model::{ApiImage, GalleryImage, ImageInfo, query_tokens};

use super::{
    CarouselController, CarouselKey, GalleryError, GalleryEvent, GalleryState, PaginationWindow,
    QueryDebouncer, RefreshOutcome, filter, matching_indices,
};

fn described(name: &str, title: &str, tags: &[&str]) -> ApiImage {
    ApiImage::new(name, format!("/api/images/{name}")).with_info(ImageInfo {
        title: title.to_string(),
        description: String::new(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
    })
}

fn scenario_images() -> Vec<ApiImage> {
    vec![
        ApiImage::new("a.jpg", "/a.jpg"),
        described("b.jpg", "Beach", &["sunset", "ocean"]),
    ]
}

fn numbered_images(count: usize) -> Vec<ApiImage> {
    (0..count)
        .map(|index| ApiImage::new(format!("img-{index:03}.jpg"), format!("/img-{index:03}.jpg")))
        .collect()
}

fn index(images: Vec<ApiImage>) -> Vec<GalleryImage> {
    images.into_iter().map(GalleryImage::new).collect()
}

fn names<'a>(images: impl IntoIterator<Item = &'a GalleryImage>) -> Vec<String> {
    images
        .into_iter()
        .map(|image| image.name().to_string())
        .collect()
}

fn loaded_state(images: Vec<ApiImage>) -> GalleryState {
    let mut state = GalleryState::default();
    let ticket = state.begin_load();
    assert!(state.finish_load(ticket, Ok(images)));
    state
}

#[test]
fn empty_token_list_keeps_every_image() {
    let images = index(scenario_images());
    let filtered = filter(&images, &[]);
    assert_eq!(names(filtered), vec!["a.jpg", "b.jpg"]);
    assert_eq!(matching_indices(&images, &[]), vec![0, 1]);
}

#[test]
fn beach_query_selects_only_described_image() {
    let images = index(scenario_images());
    let tokens = query_tokens("beach");
    assert_eq!(names(filter(&images, &tokens)), vec!["b.jpg"]);
}

#[test]
fn tokens_match_as_substrings_with_and_semantics() {
    let images = index(scenario_images());
    assert_eq!(names(filter(&images, &query_tokens("sun"))), vec!["b.jpg"]);
    assert_eq!(names(filter(&images, &query_tokens(".jpg"))), vec!["a.jpg", "b.jpg"]);
    assert!(filter(&images, &query_tokens("beach forest")).is_empty());
    assert_eq!(names(filter(&images, &query_tokens(":noinfo"))), vec!["a.jpg"]);
}

#[test]
fn adding_a_token_never_grows_the_result() {
    let images = index(vec![
        described("1.jpg", "Beach", &["sunset"]),
        described("2.jpg", "Beach", &["ocean"]),
        described("3.jpg", "Forest", &["sunset"]),
        ApiImage::new("4.jpg", "/4.jpg"),
    ]);
    let mut tokens: Vec<String> = Vec::new();
    let mut previous = filter(&images, &tokens).len();
    for token in ["jpg", "beach", "sunset", "zebra"] {
        tokens.push(token.to_string());
        let current = filter(&images, &tokens).len();
        assert!(current <= previous, "token {token} grew the result");
        previous = current;
    }
    assert_eq!(previous, 0);
}

#[test]
fn umlaut_title_matches_digraph_query() {
    let images = index(vec![described("bear.jpg", "Bär", &[])]);
    assert_eq!(names(filter(&images, &query_tokens("baer"))), vec!["bear.jpg"]);
    assert_eq!(names(filter(&images, &query_tokens("Bär"))), vec!["bear.jpg"]);
}

#[test]
fn pagination_grows_by_one_page_per_advance() {
    let filtered_len = 250;
    let mut window = PaginationWindow::default();
    for advances in 0..5 {
        assert_eq!(
            window.visible_len(filtered_len),
            filtered_len.min((advances + 1) * 100)
        );
        window.advance(filtered_len);
    }
    assert_eq!(window.page(), 3);
}

#[test]
fn pagination_stops_at_the_filtered_length() {
    let mut window = PaginationWindow::new(100);
    assert!(window.advance(150));
    assert!(!window.advance(150));
    assert_eq!(window.visible_len(150), 150);

    let mut empty = PaginationWindow::new(100);
    assert!(!empty.advance(0));
    assert_eq!(empty.visible_len(0), 0);
    assert!(!empty.has_more(0));

    window.reset();
    assert_eq!(window.page(), 1);
}

#[test]
fn carousel_wraps_in_both_directions() {
    let mut carousel = CarouselController::new();
    carousel.open(4, 5).expect("open");
    carousel.next();
    assert_eq!(carousel.current(), 0);
    carousel.prev();
    assert_eq!(carousel.current(), 4);

    carousel.jump_to(2).expect("jump");
    carousel.handle_key(CarouselKey::Right);
    assert_eq!(carousel.current(), 3);
    carousel.handle_key(CarouselKey::Left);
    assert_eq!(carousel.current(), 2);
}

#[test]
fn carousel_rejects_empty_and_out_of_range_positions() {
    let mut carousel = CarouselController::new();
    assert_eq!(carousel.open(0, 0), Err(GalleryError::EmptyCarousel));
    assert!(!carousel.is_open());
    assert_eq!(
        carousel.open(3, 3),
        Err(GalleryError::IndexOutOfRange { index: 3, len: 3 })
    );

    carousel.open(0, 3).expect("open");
    assert!(carousel.jump_to(3).is_err());
    assert_eq!(carousel.current(), 0);
}

#[test]
fn carousel_close_keeps_position_and_ignores_keys() {
    let mut carousel = CarouselController::new();
    carousel.open(1, 3).expect("open");
    carousel.handle_key(CarouselKey::Escape);
    assert!(!carousel.is_open());
    assert_eq!(carousel.current(), 1);

    carousel.handle_key(CarouselKey::Right);
    carousel.next();
    assert_eq!(carousel.current(), 1);

    assert_eq!(carousel.jump_to(2), Err(GalleryError::CarouselClosed));
    assert_eq!(carousel.current(), 1);
}

#[test]
fn carousel_clamps_when_sequence_shrinks_and_closes_when_empty() {
    let mut carousel = CarouselController::new();
    carousel.open(4, 5).expect("open");

    carousel.sync_len(2);
    assert!(carousel.is_open());
    assert_eq!(carousel.current(), 1);

    carousel.next();
    assert_eq!(carousel.current(), 0);

    carousel.sync_len(0);
    assert!(!carousel.is_open());
}

#[test]
fn debouncer_emits_only_the_last_value_after_quiet_period() {
    let start = Instant::now();
    let mut debouncer = QueryDebouncer::new(Duration::from_millis(300));
    debouncer.push("b", start);
    debouncer.push("be", start + Duration::from_millis(100));
    debouncer.push("bea", start + Duration::from_millis(200));

    assert_eq!(debouncer.poll(start + Duration::from_millis(450)), None);
    assert_eq!(
        debouncer.remaining(start + Duration::from_millis(450)),
        Some(Duration::from_millis(50))
    );
    assert_eq!(
        debouncer.poll(start + Duration::from_millis(500)),
        Some("bea".to_string())
    );
    assert_eq!(debouncer.poll(start + Duration::from_millis(900)), None);
    assert!(!debouncer.is_pending());
}

#[test]
fn state_filters_scenario_through_debounced_input() {
    let mut state = loaded_state(scenario_images());
    let start = Instant::now();
    assert_eq!(state.filtered_len(), 2);

    assert!(state.handle(GalleryEvent::QueryInput {
        value: "beach".to_string(),
        at: start,
    }));
    assert_eq!(state.query(), "beach");
    assert_eq!(state.filtered_len(), 2);

    assert!(!state.handle(GalleryEvent::Tick(start + Duration::from_millis(100))));
    assert!(state.handle(GalleryEvent::Tick(start + Duration::from_millis(300))));
    assert_eq!(names(state.visible()), vec!["b.jpg"]);
    assert_eq!(state.tokens(), ["beach"]);
}

#[test]
fn sentinel_advances_pages_and_new_query_resets_them() {
    let mut state = loaded_state(numbered_images(250));
    assert_eq!(state.visible_len(), 100);
    assert!(state.has_more());

    assert!(state.handle(GalleryEvent::SentinelVisible));
    assert_eq!(state.visible_len(), 200);
    assert!(state.handle(GalleryEvent::SentinelVisible));
    assert_eq!(state.visible_len(), 250);
    assert!(!state.handle(GalleryEvent::SentinelVisible));
    assert_eq!(state.pagination().page(), 3);

    state.set_query("img-1");
    assert_eq!(state.pagination().page(), 1);
    assert_eq!(state.filtered_len(), 100);
    assert_eq!(state.visible_len(), 100);
}

#[test]
fn superseded_load_result_is_discarded() {
    let mut state = GalleryState::default();
    let first = state.begin_load();
    let second = state.begin_load();
    assert!(state.is_loading());

    assert!(!state.finish_load(first, Ok(numbered_images(3))));
    assert!(state.images().is_empty());
    assert!(state.is_loading());

    assert!(state.finish_load(second, Ok(scenario_images())));
    assert!(!state.is_loading());
    assert_eq!(names(state.images()), vec!["a.jpg", "b.jpg"]);
}

#[test]
fn failed_load_leaves_index_empty_and_clears_loading() {
    let mut state = GalleryState::default();
    let ticket = state.begin_load();
    assert!(state.finish_load(ticket, Err("unexpected response 502: bad gateway".to_string())));
    assert!(!state.is_loading());
    assert!(state.images().is_empty());
    assert_eq!(state.visible_len(), 0);
    assert!(!state.has_more());
    assert!(state.last_error().is_some_and(|error| error.contains("502")));
}

#[test]
fn tag_click_appends_once() {
    let mut state = loaded_state(scenario_images());
    assert!(state.handle(GalleryEvent::TagClicked(" Sunset ".to_string())));
    assert_eq!(state.query(), "sunset");
    assert_eq!(names(state.visible()), vec!["b.jpg"]);

    assert!(!state.handle(GalleryEvent::TagClicked("sunset".to_string())));
    assert!(!state.handle(GalleryEvent::TagClicked("  ".to_string())));

    assert!(state.add_tag_to_query("ocean"));
    assert_eq!(state.query(), "sunset ocean");
    assert_eq!(state.tokens(), ["ocean", "sunset"]);
}

#[test]
fn carousel_follows_visible_sequence_in_state() {
    let mut state = loaded_state(vec![
        described("1.jpg", "Beach", &[]),
        described("2.jpg", "Forest", &[]),
        described("3.jpg", "Beach", &[]),
        described("4.jpg", "Forest", &[]),
    ]);
    assert!(state.handle(GalleryEvent::OpenCarousel(3)));
    assert_eq!(state.carousel_image().map(GalleryImage::name), Some("4.jpg"));
    assert!(state.handle(GalleryEvent::CarouselKey(CarouselKey::Right)));
    assert_eq!(state.carousel_image().map(GalleryImage::name), Some("1.jpg"));
    assert!(state.handle(GalleryEvent::CarouselJump(3)));

    state.set_query("beach");
    assert!(state.carousel().is_open());
    assert_eq!(state.carousel().current(), 1);
    assert_eq!(state.carousel_image().map(GalleryImage::name), Some("3.jpg"));

    state.set_query("desert");
    assert!(!state.carousel().is_open());
    assert!(!state.handle(GalleryEvent::OpenCarousel(0)));
    assert!(!state.handle(GalleryEvent::CloseCarousel));
}

#[test]
fn thumbnail_jump_after_close_changes_nothing() {
    let mut state = loaded_state(scenario_images());
    assert!(state.handle(GalleryEvent::OpenCarousel(1)));
    assert!(state.handle(GalleryEvent::CloseCarousel));

    assert!(!state.handle(GalleryEvent::CarouselJump(0)));
    assert!(!state.carousel().is_open());
    assert_eq!(state.carousel().current(), 1);
}

#[test]
fn successful_refresh_updates_context_without_refiltering() {
    let mut state = loaded_state(scenario_images());
    state.set_query("beach");
    assert_eq!(state.filtered_len(), 1);

    state.begin_refresh("a.jpg").expect("begin");
    assert!(state.is_refreshing("a.jpg"));
    assert_eq!(
        state.begin_refresh("a.jpg"),
        Err(GalleryError::RefreshInFlight("a.jpg".to_string()))
    );
    state.begin_refresh("b.jpg").expect("other card refreshes independently");

    let outcome = state.finish_refresh(
        "a.jpg",
        Ok(ImageInfo {
            title: "Beach Bär".to_string(),
            description: "Sand".to_string(),
            tags: vec!["dune".to_string()],
        }),
    );
    assert_eq!(outcome, RefreshOutcome::Updated);
    assert!(!state.is_refreshing("a.jpg"));
    assert!(state.is_refreshing("b.jpg"));

    let refreshed = state.image("a.jpg").expect("image");
    assert!(refreshed.search_context().contains("baer"));
    assert!(refreshed.search_context().contains(":info"));
    assert_eq!(state.filtered_len(), 1);

    state.set_query("beach");
    assert_eq!(state.filtered_len(), 2);
}

#[test]
fn failed_refresh_keeps_prior_info_and_raises_alert() {
    let mut state = loaded_state(scenario_images());
    let before = state.image("b.jpg").cloned().expect("image");

    state.begin_refresh("b.jpg").expect("begin");
    let outcome = state.finish_refresh(
        "b.jpg",
        Err("unexpected response 500: model offline".to_string()),
    );

    assert_eq!(
        outcome,
        RefreshOutcome::Failed {
            alert: "Could not update meta: unexpected response 500: model offline".to_string()
        }
    );
    assert!(!state.is_refreshing("b.jpg"));
    assert_eq!(state.image("b.jpg"), Some(&before));
}

#[test]
fn refresh_of_unknown_or_vanished_image() {
    let mut state = loaded_state(scenario_images());
    assert_eq!(
        state.begin_refresh("missing.jpg"),
        Err(GalleryError::UnknownImage("missing.jpg".to_string()))
    );

    state.begin_refresh("a.jpg").expect("begin");
    state.replace_images(vec![described("c.jpg", "Cat", &[])]);
    let outcome = state.finish_refresh("a.jpg", Ok(ImageInfo::default()));
    assert_eq!(outcome, RefreshOutcome::Vanished);
    assert!(!state.is_refreshing("a.jpg"));
}
