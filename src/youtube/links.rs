// Addresses of the YouTube resources a video id stands for.
// Nothing here is fetched or checked, these are just URL templates.

use crate::youtube::resolver::VideoId;

const EMBED_BASE: &str = "https://www.youtube.com/embed";
const THUMBNAIL_BASE: &str = "https://img.youtube.com/vi";

// The embeddable player page for a video.
pub fn embed_url(id: &VideoId) -> String {
    format!("{}/{}", EMBED_BASE, id)
}

// Medium-quality thumbnail image (320x180).
pub fn thumbnail_url(id: &VideoId) -> String {
    format!("{}/{}/mqdefault.jpg", THUMBNAIL_BASE, id)
}
