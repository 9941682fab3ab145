//! Registration and contact plugin.
//!
//! Public endpoints: partner self-registration and the contact form. Both
//! return a localized confirmation message.

use async_trait::async_trait;
use serde::Serialize;

use partner_portal_core::adapters::DatabaseAdapter;
use partner_portal_core::types::{
    ContactFormRequest, CreateContactMessage, CreatePartner, HttpMethod, PortalRequest,
    PortalResponse, RegisterPartnerRequest,
};
use partner_portal_core::{PortalContext, PortalPartner, PortalPlugin, PortalResult, PortalRoute};

use super::helpers::localized_message;

#[derive(Debug, Serialize)]
pub struct RegisterPartnerResponse<P: Serialize> {
    pub partner: P,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ContactFormResponse {
    pub status: bool,
    pub message: String,
}

/// Serves `POST /partners/register` and `POST /contact`.
#[derive(Debug, Clone, Default)]
pub struct RegistrationPlugin;

impl RegistrationPlugin {
    pub fn new() -> Self {
        Self
    }

    /// `POST /partners/register`
    ///
    /// New partners land on the lowest tier unless the request names a
    /// specific one.
    async fn handle_register<DB: DatabaseAdapter>(
        &self,
        req: &PortalRequest,
        ctx: &PortalContext<DB>,
    ) -> PortalResult<PortalResponse> {
        let body: RegisterPartnerRequest = match partner_portal_core::validate_request_body(req) {
            Ok(v) => v,
            Err(resp) => return Ok(resp),
        };

        let mut create = CreatePartner::new(body.name, body.email).with_phone(body.phone);
        if let Some(company) = body.company {
            create = create.with_company(company);
        }
        create = create.with_pricing_tier(
            body.pricing_tier
                .unwrap_or_else(|| "starter_pro".to_string()),
        );

        let partner = ctx.database.create_partner(create).await?;
        let message = localized_message(req, ctx, "registration.welcome");

        ctx.config
            .logger
            .info(&format!("registered partner {}", partner.id()));

        Ok(PortalResponse::json(
            201,
            &RegisterPartnerResponse { partner, message },
        )?)
    }

    /// `POST /contact`
    async fn handle_contact<DB: DatabaseAdapter>(
        &self,
        req: &PortalRequest,
        ctx: &PortalContext<DB>,
    ) -> PortalResult<PortalResponse> {
        let body: ContactFormRequest = match partner_portal_core::validate_request_body(req) {
            Ok(v) => v,
            Err(resp) => return Ok(resp),
        };

        ctx.database
            .create_contact_message(CreateContactMessage {
                name: body.name,
                phone: body.phone,
                message: body.message,
            })
            .await?;

        let message = localized_message(req, ctx, "contact.received");
        Ok(PortalResponse::json(
            200,
            &ContactFormResponse {
                status: true,
                message,
            },
        )?)
    }
}

#[async_trait]
impl<DB: DatabaseAdapter> PortalPlugin<DB> for RegistrationPlugin {
    fn name(&self) -> &'static str {
        "registration"
    }

    fn routes(&self) -> Vec<PortalRoute> {
        vec![
            PortalRoute::post("/partners/register"),
            PortalRoute::post("/contact"),
        ]
    }

    async fn on_request(
        &self,
        req: &PortalRequest,
        ctx: &PortalContext<DB>,
    ) -> PortalResult<Option<PortalResponse>> {
        match (req.method(), req.path()) {
            (HttpMethod::Post, "/partners/register") => {
                Ok(Some(self.handle_register(req, ctx).await?))
            }
            (HttpMethod::Post, "/contact") => Ok(Some(self.handle_contact(req, ctx).await?)),
            _ => Ok(None),
        }
    }
}
