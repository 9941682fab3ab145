use std::sync::Arc;

use partner_portal_core::{
    DatabaseAdapter, HealthCheckResponse, HttpMethod, OkResponse, PartnerAccess, PortalConfig,
    PortalContext, PortalError, PortalPartner, PortalPlugin, PortalRequest, PortalResponse,
    PortalResult,
    middleware::{self, CorsConfig, CorsMiddleware, Middleware},
};

/// The main portal instance, generic over the database adapter.
pub struct PartnerPortal<DB: DatabaseAdapter> {
    config: Arc<PortalConfig>,
    plugins: Vec<Box<dyn PortalPlugin<DB>>>,
    middlewares: Vec<Box<dyn Middleware>>,
    database: Arc<DB>,
    context: PortalContext<DB>,
}

/// Initial builder for configuring the portal.
///
/// Call `.database(adapter)` to obtain a [`TypedPortalBuilder`] that can
/// accept plugins and middleware.
pub struct PortalBuilder {
    config: PortalConfig,
    cors_config: Option<CorsConfig>,
    custom_middlewares: Vec<Box<dyn Middleware>>,
}

/// Typed builder returned by [`PortalBuilder::database`].
pub struct TypedPortalBuilder<DB: DatabaseAdapter> {
    config: PortalConfig,
    database: Arc<DB>,
    plugins: Vec<Box<dyn PortalPlugin<DB>>>,
    cors_config: Option<CorsConfig>,
    custom_middlewares: Vec<Box<dyn Middleware>>,
}

impl PortalBuilder {
    pub fn new(config: PortalConfig) -> Self {
        Self {
            config,
            cors_config: None,
            custom_middlewares: Vec::new(),
        }
    }

    /// Set the database adapter, returning a [`TypedPortalBuilder`].
    pub fn database<DB: DatabaseAdapter>(self, database: DB) -> TypedPortalBuilder<DB> {
        TypedPortalBuilder {
            config: self.config,
            database: Arc::new(database),
            plugins: Vec::new(),
            cors_config: self.cors_config,
            custom_middlewares: self.custom_middlewares,
        }
    }

    /// Configure CORS.
    pub fn cors(mut self, config: CorsConfig) -> Self {
        self.cors_config = Some(config);
        self
    }
}

impl<DB: DatabaseAdapter> TypedPortalBuilder<DB> {
    /// Add a plugin to the portal.
    pub fn plugin<P: PortalPlugin<DB> + 'static>(mut self, plugin: P) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Configure CORS.
    pub fn cors(mut self, config: CorsConfig) -> Self {
        self.cors_config = Some(config);
        self
    }

    /// Add a custom middleware.
    pub fn middleware<M: Middleware + 'static>(mut self, mw: M) -> Self {
        self.custom_middlewares.push(Box::new(mw));
        self
    }

    /// Build the portal instance.
    pub async fn build(self) -> PortalResult<PartnerPortal<DB>> {
        self.config.validate()?;

        let config = Arc::new(self.config);
        let database = self.database;

        let mut context = PortalContext::new(config.clone(), database.clone());

        // Initialize all plugins
        for plugin in &self.plugins {
            plugin.on_init(&mut context).await?;
        }

        // Seed CORS with the trusted origins unless explicitly configured.
        let cors_config = self.cors_config.unwrap_or_else(|| {
            let mut cors = CorsConfig::new();
            for origin in &config.trusted_origins {
                cors = cors.allowed_origin(origin.clone());
            }
            cors
        });

        let mut middlewares: Vec<Box<dyn Middleware>> =
            vec![Box::new(CorsMiddleware::new(cors_config))];
        middlewares.extend(self.custom_middlewares);

        Ok(PartnerPortal {
            config,
            plugins: self.plugins,
            middlewares,
            database,
            context,
        })
    }
}

impl<DB: DatabaseAdapter> PartnerPortal<DB> {
    /// Create a new portal builder.
    #[allow(clippy::new_ret_no_self)]
    pub fn new(config: PortalConfig) -> PortalBuilder {
        PortalBuilder::new(config)
    }

    /// Handle a portal request.
    ///
    /// Errors from plugins and core handlers are automatically converted
    /// into standardized JSON responses via [`PortalError::into_response`],
    /// producing `{ "message": "..." }` with the appropriate HTTP status code.
    pub async fn handle_request(&self, req: PortalRequest) -> PortalResult<PortalResponse> {
        match self.handle_request_inner(&req).await {
            Ok(response) => middleware::run_after(&self.middlewares, &req, response).await,
            Err(err) => {
                if err.status_code() >= 500 {
                    self.config.logger.error(&format!(
                        "{} {:?} failed: {}",
                        req.path(),
                        req.method(),
                        err
                    ));
                }
                let response = err.into_response();
                middleware::run_after(&self.middlewares, &req, response).await
            }
        }
    }

    /// Inner request handler that may return errors.
    async fn handle_request_inner(&self, req: &PortalRequest) -> PortalResult<PortalResponse> {
        // Run before-request middleware chain
        if let Some(response) = middleware::run_before(&self.middlewares, req).await? {
            return Ok(response);
        }

        // Handle core endpoints first
        if let Some(response) = self.handle_core_request(req).await? {
            return Ok(response);
        }

        // Try each plugin until one handles the request
        for plugin in &self.plugins {
            if let Some(response) = plugin.on_request(req, &self.context).await? {
                return Ok(response);
            }
        }

        Err(PortalError::not_found("No handler found for this request"))
    }

    /// Get the configuration.
    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// Get the database adapter.
    pub fn database(&self) -> &Arc<DB> {
        &self.database
    }

    /// Get all routes from plugins.
    pub fn routes(&self) -> Vec<(String, &dyn PortalPlugin<DB>)> {
        let mut routes = Vec::new();
        for plugin in &self.plugins {
            for route in plugin.routes() {
                routes.push((route.path, plugin.as_ref()));
            }
        }
        routes
    }

    /// Get all plugins.
    pub fn plugins(&self) -> &[Box<dyn PortalPlugin<DB>>] {
        &self.plugins
    }

    /// Get plugin by name.
    pub fn get_plugin(&self, name: &str) -> Option<&dyn PortalPlugin<DB>> {
        self.plugins
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.as_ref())
    }

    /// List all plugin names.
    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Handle core portal requests.
    async fn handle_core_request(&self, req: &PortalRequest) -> PortalResult<Option<PortalResponse>> {
        match (req.method(), req.path()) {
            (HttpMethod::Get, "/ok") => {
                Ok(Some(PortalResponse::json(200, &OkResponse { ok: true })?))
            }
            (HttpMethod::Get, "/health") => Ok(Some(PortalResponse::json(
                200,
                &HealthCheckResponse {
                    status: "ok".to_string(),
                    service: self.config.app_name.clone(),
                },
            )?)),
            (HttpMethod::Get, "/me") => {
                let partner = self.context.require_partner(req).await?;
                let access = PartnerAccess::resolve(partner.pricing_tier());
                let body = serde_json::json!({
                    "partner": partner,
                    "access": access,
                });
                Ok(Some(PortalResponse::json(200, &body)?))
            }
            _ => Ok(None),
        }
    }
}
