use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use crate::constants::{LINES_PATH, STATIONS_PATH};
use crate::models::{LineRecord, StationRecord};

/// Errors that can occur while loading the datasets.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The server answered with a non-success status
    #[error("Failed to load {path}: {status} {status_text}")]
    Status {
        path: String,
        status: u16,
        status_text: String,
    },

    /// The request never produced a response (offline, `file://`, CORS)
    #[error("Failed to load {path}: {message}")]
    Network { path: String, message: String },

    /// The body was not the expected JSON array
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No window available")]
    NoWindow,
}

/// Where the two datasets live, relative to the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub stations: String,
    pub lines: String,
}

impl Default for DatasetPaths {
    fn default() -> Self {
        Self {
            stations: STATIONS_PATH.to_string(),
            lines: LINES_PATH.to_string(),
        }
    }
}

/// Raw records as loaded, before indexing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Datasets {
    pub stations: Vec<StationRecord>,
    pub lines: Vec<LineRecord>,
}

/// Transport used to fetch a dataset body
#[allow(async_fn_in_trait)]
pub trait DatasetSource {
    /// Fetch the body at `path` as text
    async fn fetch_text(&self, path: &str) -> Result<String, LoadError>;
}

/// Fetches datasets with `window.fetch`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserFetch;

impl DatasetSource for BrowserFetch {
    async fn fetch_text(&self, path: &str) -> Result<String, LoadError> {
        let network_error = |message: &str| LoadError::Network {
            path: path.to_string(),
            message: message.to_string(),
        };

        let window = web_sys::window().ok_or(LoadError::NoWindow)?;

        let opts = web_sys::RequestInit::new();
        opts.set_method("GET");

        let request = web_sys::Request::new_with_str_and_init(path, &opts)
            .map_err(|_| network_error("Failed to create request"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| network_error(&format!("Fetch failed: {e:?}")))?;

        let resp: web_sys::Response = resp_value
            .dyn_into()
            .map_err(|_| network_error("Invalid response"))?;

        if !resp.ok() {
            return Err(LoadError::Status {
                path: path.to_string(),
                status: resp.status(),
                status_text: resp.status_text(),
            });
        }

        let text = JsFuture::from(resp.text().map_err(|_| network_error("Failed to read body"))?)
            .await
            .map_err(|_| network_error("Failed to read body"))?;

        text.as_string().ok_or_else(|| network_error("Response is not a string"))
    }
}

/// Fetch both datasets concurrently.
///
/// # Errors
///
/// Fails as soon as either resource fails to fetch or parse; the error names
/// the offending path.
pub async fn load_datasets<S: DatasetSource>(
    source: &S,
    paths: &DatasetPaths,
) -> Result<Datasets, LoadError> {
    let (stations, lines) = futures::try_join!(
        fetch_json::<_, Vec<StationRecord>>(source, &paths.stations),
        fetch_json::<_, Vec<LineRecord>>(source, &paths.lines),
    )?;

    crate::log!("Loaded {} stations and {} lines", stations.len(), lines.len());

    Ok(Datasets { stations, lines })
}

async fn fetch_json<S, T>(source: &S, path: &str) -> Result<T, LoadError>
where
    S: DatasetSource,
    T: DeserializeOwned,
{
    let body = source.fetch_text(path).await?;
    serde_json::from_str(&body).map_err(|source| LoadError::Parse {
        path: path.to_string(),
        source,
    })
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_browser_fetch_reports_missing_file() {
        let err = BrowserFetch
            .fetch_text("does-not-exist/stations.json")
            .await
            .expect_err("file should not exist");

        match err {
            LoadError::Status { path, status, .. } => {
                assert_eq!(path, "does-not-exist/stations.json");
                assert_eq!(status, 404);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
