pub mod credentials;
pub mod fetcher;
pub mod gallery;
pub mod image_candidate;
pub mod imgur;

pub use credentials::{ClientIdCredentials, GalleryCredentials};
pub use fetcher::{FeedFetcher, FeedPage, filter_unvoted};
pub use gallery::{FeedError, GallerySource};
pub use image_candidate::ImageCandidate;
pub use imgur::ImgurGallery;
