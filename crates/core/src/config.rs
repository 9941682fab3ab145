use std::sync::Arc;

use crate::error::PortalError;
use crate::localization::{Localizer, default_localizer};
use crate::logger::{Logger, default_logger};
use crate::profit::CostModel;

/// Main configuration for the partner portal.
#[derive(Clone)]
pub struct PortalConfig {
    /// Application name, used for logs and default responses.
    ///
    /// Defaults to `"Partner Portal"`.
    pub app_name: String,

    /// Base URL for the portal service (e.g. `"http://localhost:3000"`).
    pub base_url: String,

    /// Base path where the portal routes are mounted.
    ///
    /// Defaults to `"/api/portal"`.
    pub base_path: String,

    /// ISO currency code for monetary amounts. Defaults to `"UZS"`.
    pub currency: String,

    /// Locale used when a request carries no `Accept-Language`.
    pub default_locale: String,

    /// Cost model constants used by the profit calculator.
    pub cost_model: CostModel,

    /// Origins trusted for cross-origin checks.
    pub trusted_origins: Vec<String>,

    /// Logger implementation for portal logging.
    ///
    /// Defaults to a [`TracingLogger`](crate::logger::TracingLogger) that
    /// delegates to the `tracing` crate.
    pub logger: Arc<dyn Logger>,

    /// Localization service for user-facing messages.
    pub localizer: Arc<dyn Localizer>,
}

impl PortalConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            app_name: "Partner Portal".to_string(),
            base_url: base_url.into(),
            base_path: "/api/portal".to_string(),
            currency: "UZS".to_string(),
            default_locale: "en".to_string(),
            cost_model: CostModel::default(),
            trusted_origins: Vec::new(),
            logger: default_logger(),
            localizer: default_localizer(),
        }
    }

    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    pub fn base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = path.into();
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    pub fn cost_model(mut self, model: CostModel) -> Self {
        self.cost_model = model;
        self
    }

    pub fn trusted_origin(mut self, origin: impl Into<String>) -> Self {
        self.trusted_origins.push(origin.into());
        self
    }

    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn localizer(mut self, localizer: Arc<dyn Localizer>) -> Self {
        self.localizer = localizer;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), PortalError> {
        if self.base_url.is_empty() {
            return Err(PortalError::config("base_url must not be empty"));
        }
        if !(0.0..1.0).contains(&self.cost_model.tax_rate) {
            return Err(PortalError::config("tax_rate must be within [0, 1)"));
        }
        if !(0.0..1.0).contains(&self.cost_model.logistics_rate) {
            return Err(PortalError::config("logistics_rate must be within [0, 1)"));
        }
        if self.cost_model.per_order_fee < 0.0 {
            return Err(PortalError::config("per_order_fee must not be negative"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for PortalConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalConfig")
            .field("app_name", &self.app_name)
            .field("base_url", &self.base_url)
            .field("base_path", &self.base_path)
            .field("currency", &self.currency)
            .field("default_locale", &self.default_locale)
            .field("cost_model", &self.cost_model)
            .field("trusted_origins", &self.trusted_origins)
            .finish()
    }
}
