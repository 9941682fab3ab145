use super::Middleware;
use crate::error::PortalResult;
use crate::types::{HttpMethod, PortalRequest, PortalResponse};
use async_trait::async_trait;

/// Methods the portal dispatches on; plugin routes are GET/POST only.
const PORTAL_METHODS: &str = "GET, POST, OPTIONS";

/// Request headers the portal reads: JSON bodies, bearer tokens, and the
/// locale hint for localized confirmation messages.
const PORTAL_REQUEST_HEADERS: &str = "Content-Type, Authorization, Accept-Language";

/// Cross-origin policy for the browser dashboard.
///
/// The portal only needs an origin allow-list; the method and header
/// allow-lists are fixed by what the portal itself accepts.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Origins allowed to call the portal. Empty means cross-origin
    /// requests get no CORS headers at all. `"*"` allows any origin.
    pub origins: Vec<String>,

    /// Whether the browser may send credentials (the Authorization header).
    pub allow_credentials: bool,

    /// How long browsers may cache a preflight result, in seconds.
    pub preflight_max_age: u64,

    /// Disable to make the middleware a no-op.
    pub enabled: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: Vec::new(),
            allow_credentials: true,
            preflight_max_age: 86400,
            enabled: true,
        }
    }
}

impl CorsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allowed_origin(mut self, origin: impl Into<String>) -> Self {
        self.origins.push(origin.into());
        self
    }

    pub fn allow_credentials(mut self, allow: bool) -> Self {
        self.allow_credentials = allow;
        self
    }

    pub fn preflight_max_age(mut self, seconds: u64) -> Self {
        self.preflight_max_age = seconds;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Answers preflights and stamps CORS headers onto portal responses.
pub struct CorsMiddleware {
    config: CorsConfig,
}

impl CorsMiddleware {
    pub fn new(config: CorsConfig) -> Self {
        Self { config }
    }

    /// The `Access-Control-Allow-Origin` value this request earns, if any.
    ///
    /// A wildcard entry echoes the caller's origin when credentials are on,
    /// since browsers reject `*` combined with credentials.
    fn grant(&self, req: &PortalRequest) -> Option<String> {
        if !self.config.enabled {
            return None;
        }
        let origin = req.headers.get("origin")?;
        let wildcard = self.config.origins.iter().any(|o| o == "*");
        if wildcard && !self.config.allow_credentials {
            return Some("*".to_string());
        }
        if wildcard || self.config.origins.iter().any(|o| o == origin) {
            return Some(origin.clone());
        }
        None
    }

    fn stamp(&self, response: &mut PortalResponse, allow_origin: String) {
        let headers = &mut response.headers;
        headers.insert("Access-Control-Allow-Origin".to_string(), allow_origin);
        headers.insert("Vary".to_string(), "Origin".to_string());
        if self.config.allow_credentials {
            headers.insert(
                "Access-Control-Allow-Credentials".to_string(),
                "true".to_string(),
            );
        }
    }
}

#[async_trait]
impl Middleware for CorsMiddleware {
    fn name(&self) -> &'static str {
        "cors"
    }

    /// Short-circuits preflights with 204; everything else passes through.
    async fn before_request(&self, req: &PortalRequest) -> PortalResult<Option<PortalResponse>> {
        if req.method != HttpMethod::Options {
            return Ok(None);
        }
        let Some(allow_origin) = self.grant(req) else {
            return Ok(None);
        };

        let mut response = PortalResponse::new(204);
        self.stamp(&mut response, allow_origin);
        response.headers.insert(
            "Access-Control-Allow-Methods".to_string(),
            PORTAL_METHODS.to_string(),
        );
        response.headers.insert(
            "Access-Control-Allow-Headers".to_string(),
            PORTAL_REQUEST_HEADERS.to_string(),
        );
        response.headers.insert(
            "Access-Control-Max-Age".to_string(),
            self.config.preflight_max_age.to_string(),
        );
        Ok(Some(response))
    }

    async fn after_request(
        &self,
        req: &PortalRequest,
        mut response: PortalResponse,
    ) -> PortalResult<PortalResponse> {
        if let Some(allow_origin) = self.grant(req) {
            self.stamp(&mut response, allow_origin);
        }
        Ok(response)
    }
}
