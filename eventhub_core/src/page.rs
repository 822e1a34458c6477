use serde::{Deserialize, Serialize, de::DeserializeOwned};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn single(results: Vec<T>) -> Self {
        Self {
            count: results.len() as u64,
            next: None,
            previous: None,
            results,
        }
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Some endpoints paginate, others return a bare JSON array.
#[derive(Deserialize)]
#[serde(untagged, bound = "T: DeserializeOwned")]
enum Listing<T> {
    Paged(Page<T>),
    Bare(Vec<T>),
}

pub fn decode_listing<T: DeserializeOwned>(value: serde_json::Value) -> serde_json::Result<Page<T>> {
    Ok(match serde_json::from_value::<Listing<T>>(value)? {
        Listing::Paged(page) => page,
        Listing::Bare(results) => Page::single(results),
    })
}
