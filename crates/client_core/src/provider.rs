use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use rand::{rngs::StdRng, Rng, SeedableRng};
use reqwest::Client;
use shared::{
    domain::{Dog, Lifespan, Origin, Size},
    error::ProviderError,
    protocol::{RandomImageResponse, BREED_SEGMENT_INDEX},
};
use tracing::debug;

/// Source of candidate dogs before ban filtering.
#[async_trait]
pub trait DogProvider: Send + Sync {
    async fn fetch_candidate(&self) -> Result<Dog, ProviderError>;
}

/// Uniform index source used to synthesize size, origin and lifespan.
pub trait AttributeSampler: Send + Sync {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick(&self, len: usize) -> usize;
}

pub struct RandomSampler {
    rng: std::sync::Mutex<StdRng>,
}

impl RandomSampler {
    pub fn from_os_rng() -> Self {
        Self {
            rng: std::sync::Mutex::new(StdRng::from_os_rng()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: std::sync::Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl AttributeSampler for RandomSampler {
    fn pick(&self, len: usize) -> usize {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.random_range(0..len)
    }
}

/// Draws the three synthetic attributes independently.
pub fn sample_attributes(sampler: &dyn AttributeSampler) -> (Size, Origin, Lifespan) {
    let size = Size::ALL[sampler.pick(Size::ALL.len())];
    let origin = Origin::ALL[sampler.pick(Origin::ALL.len())];
    let lifespan = Lifespan::ALL[sampler.pick(Lifespan::ALL.len())];
    (size, origin, lifespan)
}

/// Extracts the breed slug from an image url such as
/// `https://images.dog.ceo/breeds/hound-afghan/n02088094_1003.jpg`.
pub fn breed_from_image_url(image_url: &str) -> Result<String, ProviderError> {
    let segment = image_url
        .split('/')
        .nth(BREED_SEGMENT_INDEX)
        .unwrap_or_default();

    let looks_like_slug = !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !looks_like_slug {
        return Err(ProviderError::MissingBreed {
            image_url: image_url.to_string(),
        });
    }

    Ok(segment.to_string())
}

pub struct HttpDogProvider {
    http: Client,
    api_url: String,
    sampler: Arc<dyn AttributeSampler>,
}

impl HttpDogProvider {
    pub fn new(
        api_url: impl Into<String>,
        request_timeout: Duration,
        sampler: Arc<dyn AttributeSampler>,
    ) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|error| ProviderError::Request(error.to_string()))?;
        Ok(Self {
            http,
            api_url: api_url.into(),
            sampler,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn fetch_image(&self) -> Result<RandomImageResponse, ProviderError> {
        let res = self
            .http
            .get(&self.api_url)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = res.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
            });
        }

        let body = res.text().await.map_err(map_request_error)?;
        let payload: RandomImageResponse = serde_json::from_str(&body)
            .map_err(|error| ProviderError::MalformedPayload(error.to_string()))?;
        if !payload.is_success() {
            return Err(ProviderError::Rejected {
                status: payload.status,
            });
        }
        Ok(payload)
    }
}

#[async_trait]
impl DogProvider for HttpDogProvider {
    async fn fetch_candidate(&self) -> Result<Dog, ProviderError> {
        let payload = self.fetch_image().await?;
        let breed = breed_from_image_url(&payload.message)?;
        let (size, origin, lifespan) = sample_attributes(self.sampler.as_ref());
        debug!(%breed, %size, %origin, %lifespan, image_url = %payload.message, "fetched candidate");
        Ok(Dog::new(payload.message, breed, size, origin, lifespan))
    }
}

fn map_request_error(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Request(error.to_string())
    }
}

#[cfg(test)]
#[path = "tests/provider_tests.rs"]
mod tests;
