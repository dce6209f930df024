/// Opaque handles for backend-owned resources.
///
/// Defines [`Image`](handle::Image) and [`SearchIndex`](handle::SearchIndex),
/// whose pixel or index data lives behind a shared payload the core never
/// inspects, and [`Detections`](handle::Detections), which the core filters
/// by confidence, class and region.
pub mod handle;

pub mod core;
