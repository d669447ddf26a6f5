// Authentication strategies for sqlprobe
// Applied to every outgoing probe request so scans can run behind a login

pub trait AuthStrategy {
    fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder;
}

pub struct StaticTokenAuth {
    pub token: String,
}

impl AuthStrategy for StaticTokenAuth {
    fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.bearer_auth(&self.token)
    }
}

/// Raw `Cookie` header, e.g. "PHPSESSID=abc; security=low"
pub struct CookieAuth {
    pub cookie: String,
}

impl AuthStrategy for CookieAuth {
    fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header(reqwest::header::COOKIE, self.cookie.as_str())
    }
}

/// Applies several strategies in order
pub struct CombinedAuth {
    pub strategies: Vec<Box<dyn AuthStrategy + Send + Sync>>,
}

impl AuthStrategy for CombinedAuth {
    fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        self.strategies
            .iter()
            .fold(req, |req, strategy| strategy.apply_auth(req))
    }
}
