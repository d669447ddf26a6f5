// Async HTTP engine for sqlprobe
// One shared reqwest client per scan; every probe request goes through here

use log::debug;
use reqwest::{Client, Proxy};
use std::time::{Duration, Instant};

use crate::auth::AuthStrategy;
use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::models::{Method, Target};

/// What the probers look at in a response
#[derive(Debug, Clone)]
pub struct ProbeResponse {
    pub status: u16,
    pub body: String,
    pub elapsed: Duration,
}

impl ProbeResponse {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

pub struct AttackEngine {
    client: Client,
    timeout: Duration,
    auth: Option<Box<dyn AuthStrategy + Send + Sync>>,
}

impl AttackEngine {
    pub fn new(config: &ScanConfig) -> Result<Self, ScanError> {
        let mut builder = Client::builder()
            .pool_max_idle_per_host(10)
            .timeout(config.timeout);

        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(Proxy::all(proxy.as_str())?);
        }

        Ok(Self {
            client: builder.build()?,
            timeout: config.timeout,
            auth: None,
        })
    }

    pub fn with_auth(mut self, auth: Box<dyn AuthStrategy + Send + Sync>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Send a target as described: query in the URL, form or JSON body, headers.
    /// Elapsed time covers the whole exchange including reading the body.
    pub async fn send(&self, target: &Target) -> Result<ProbeResponse, ScanError> {
        let mut req = match target.method {
            Method::GET => self.client.get(&target.url),
            Method::POST => self.client.post(&target.url),
        };
        req = req.timeout(self.timeout);

        for (name, value) in &target.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        if let Some(auth) = &self.auth {
            req = auth.apply_auth(req);
        }

        if let Some(json) = &target.json {
            req = req.json(json);
        } else if let Some(body) = &target.body {
            req = req.form(body);
        }

        debug!("{} {}", target.method, target.url);
        let start = Instant::now();
        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;

        Ok(ProbeResponse {
            status,
            body,
            elapsed: start.elapsed(),
        })
    }
}
