use std::io::BufReader;

use log::debug;

use crate::domain::entities::row::Dataset;
use crate::usecase::ports::source::{
    dataset_from_json_reader, DataSource, FetchError, QueryParams,
};

const USER_AGENT: &str = concat!("stockboard/", env!("CARGO_PKG_VERSION"));

pub struct HttpSource {
    agent: ureq::Agent,
    base_url: String,
    endpoint: String,
}

impl HttpSource {
    pub fn new(base_url: &str, endpoint: &str) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().user_agent(USER_AGENT).build(),
            base_url: base_url.trim_end_matches('/').to_string(),
            endpoint: endpoint.to_string(),
        }
    }

    pub fn url(&self) -> String {
        if self.endpoint.starts_with('/') {
            format!("{}{}", self.base_url, self.endpoint)
        } else {
            format!("{}/{}", self.base_url, self.endpoint)
        }
    }
}

impl DataSource for HttpSource {
    fn fetch(&self, params: &QueryParams) -> Result<Dataset, FetchError> {
        let url = self.url();
        let mut request = self.agent.get(&url);
        for (name, value) in params {
            request = request.query(name, &value.to_string());
        }
        debug!("GET {}", request.url());

        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                return Err(FetchError::Transport {
                    status: Some(code),
                    message: format!("{} {}", code, response.status_text()),
                })
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(FetchError::transport(transport.to_string()))
            }
        };

        // into_string caps bodies at 10 MB
        dataset_from_json_reader(BufReader::new(response.into_reader()))
    }
}
