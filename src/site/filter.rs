use crate::dom::ElementNode;

/// Narrower images are thumbnails
pub const MIN_SLIDE_WIDTH: u32 = 300;
/// Shorter images are thumbnails
pub const MIN_SLIDE_HEIGHT: u32 = 200;

/// Substrings marking decorative images. Matching is case-sensitive.
pub const DECORATIVE_KEYWORDS: &[&str] =
    &["avatar", "profile", "logo", "thumbnail", "thumb", "icon", "button", "social", "ad", "advertisement"];

/// Accept an image as slide content.
///
/// Dimensions are intrinsic, so the image must already be loaded.
pub fn is_slide_image(element: &ElementNode) -> bool {
    if element.natural_width < MIN_SLIDE_WIDTH || element.natural_height < MIN_SLIDE_HEIGHT {
        return false;
    }

    let fields = [element.src(), element.class_name(), element.alt()];
    !DECORATIVE_KEYWORDS.iter().any(|keyword| fields.iter().any(|field| field.contains(keyword)))
}
