use crate::model::GalleryImage;

fn matches(image: &GalleryImage, tokens: &[String]) -> bool {
    let context = image.search_context();
    tokens.iter().all(|token| context.contains(token.as_str()))
}

/// Images whose search context contains every token, in input order.
/// An empty token list keeps everything.
pub fn filter<'a>(images: &'a [GalleryImage], tokens: &[String]) -> Vec<&'a GalleryImage> {
    images
        .iter()
        .filter(|image| matches(image, tokens))
        .collect()
}

pub fn matching_indices(images: &[GalleryImage], tokens: &[String]) -> Vec<usize> {
    images
        .iter()
        .enumerate()
        .filter(|(_, image)| matches(image, tokens))
        .map(|(index, _)| index)
        .collect()
}
