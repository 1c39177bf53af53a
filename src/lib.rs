pub mod auth;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod episode;
pub mod error;
pub mod http;
pub mod present;
pub mod render_cache;

// Re-export main types for convenience
pub use auth::{CachedToken, TokenIssuer};
pub use catalog::{CatalogClient, to_episode_record};
pub use clock::{Clock, SystemClock};
pub use config::{CredentialSource, Credentials, EnvCredentials, ProviderConfig, StaticCredentials};
pub use episode::{Audio, AudioKind, EpisodeRecord};
pub use error::{AuthError, ConfigError, FetchError};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use render_cache::RenderCache;
