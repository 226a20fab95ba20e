use serde::{Deserialize, Serialize};

pub const DEFAULT_RANDOM_IMAGE_URL: &str = "https://dog.ceo/api/breeds/image/random";
pub const SUCCESS_STATUS: &str = "success";

/// Path segment (after splitting on `/`) that carries the breed slug, e.g.
/// `https://images.dog.ceo/breeds/<breed>/<file>.jpg`.
pub const BREED_SEGMENT_INDEX: usize = 4;

/// Body of the random image endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomImageResponse {
    pub message: String,
    pub status: String,
}

impl RandomImageResponse {
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}
