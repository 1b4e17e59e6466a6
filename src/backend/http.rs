use crate::backend::executor::DumpSource;
use crate::error::InspectError;

pub const DEFAULT_DUMP_PORT: u16 = 34777;

/// Fetches the view hierarchy from the test server's `/dump` endpoint.
pub struct DumpClient {
    url: String,
    client: reqwest::blocking::Client,
}

impl DumpClient {
    pub fn new(host: &str, port: u16) -> Result<Self, InspectError> {
        let url = format!("http://{}:{}/dump", host, port);
        // the test server is reached through a local port forward
        let client = reqwest::blocking::Client::builder()
            .no_proxy()
            .build()
            .map_err(|e| InspectError::Http {
                url: url.clone(),
                source: e,
            })?;

        Ok(Self { url, client })
    }

    /// Client for the default port on `localhost`.
    pub fn local() -> Result<Self, InspectError> {
        Self::new("localhost", DEFAULT_DUMP_PORT)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl DumpSource for DumpClient {
    fn fetch_dump(&self) -> Result<String, InspectError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| InspectError::Http {
                url: self.url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(InspectError::HttpStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|e| InspectError::Http {
            url: self.url.clone(),
            source: e,
        })
    }
}
