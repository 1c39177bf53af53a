mod client;
mod transform;
mod upstream;

pub use client::CatalogClient;
pub use transform::{select_artwork, to_episode_record};
pub use upstream::{EpisodePage, UpstreamEpisode, UpstreamImage};
