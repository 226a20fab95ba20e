//! Dog provider adapter and the session controller that filters candidates
//! against the ban list.

pub mod ban_set;
pub mod provider;
pub mod session;

pub use ban_set::BanSet;
pub use provider::{
    breed_from_image_url, sample_attributes, AttributeSampler, DogProvider, HttpDogProvider,
    RandomSampler,
};
pub use session::{
    DiscoverySettings, SessionController, SessionEvent, SessionSnapshot, DEFAULT_MAX_ATTEMPTS,
};
pub use tokio_util::sync::CancellationToken;
