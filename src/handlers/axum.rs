//! Mounts the portal on an Axum router. Each portal route is bound to a
//! single dispatch handler that translates between HTTP and the portal's
//! transport-agnostic request/response types.

use axum::{
    Router,
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{self, MethodRouter},
};
use std::sync::Arc;

use crate::PartnerPortal;
use partner_portal_core::{
    DatabaseAdapter, HttpMethod, PortalError, PortalRequest, PortalResponse, PortalResult,
};

/// Extension trait turning a portal instance into an Axum router.
///
/// The returned router still needs its state: nest it and call
/// `.with_state(portal)` on the result.
pub trait AxumIntegration<DB: DatabaseAdapter> {
    fn axum_router(self) -> Router<Arc<PartnerPortal<DB>>>;
}

impl<DB: DatabaseAdapter> AxumIntegration<DB> for Arc<PartnerPortal<DB>> {
    fn axum_router(self) -> Router<Arc<PartnerPortal<DB>>> {
        let mut router = Router::new()
            .route("/ok", routing::get(dispatch::<DB>))
            .route("/health", routing::get(dispatch::<DB>))
            .route("/me", routing::get(dispatch::<DB>));

        for plugin in self.plugins() {
            for route in plugin.routes() {
                if let Some(bound) = bind::<DB>(&route.method) {
                    router = router.route(&route.path, bound);
                }
            }
        }

        router
    }
}

fn bind<DB: DatabaseAdapter>(method: &HttpMethod) -> Option<MethodRouter<Arc<PartnerPortal<DB>>>> {
    match method {
        HttpMethod::Get => Some(routing::get(dispatch::<DB>)),
        HttpMethod::Post => Some(routing::post(dispatch::<DB>)),
        HttpMethod::Put => Some(routing::put(dispatch::<DB>)),
        HttpMethod::Delete => Some(routing::delete(dispatch::<DB>)),
        HttpMethod::Patch => Some(routing::patch(dispatch::<DB>)),
        _ => None,
    }
}

async fn dispatch<DB: DatabaseAdapter>(
    State(portal): State<Arc<PartnerPortal<DB>>>,
    req: Request,
) -> Response {
    let result = match into_portal_request(req).await {
        Ok(portal_req) => portal.handle_request(portal_req).await,
        Err(err) => Err(err),
    };
    render(result)
}

async fn into_portal_request(req: Request) -> PortalResult<PortalRequest> {
    let (parts, body) = req.into_parts();

    let method = match parts.method {
        axum::http::Method::GET => HttpMethod::Get,
        axum::http::Method::POST => HttpMethod::Post,
        axum::http::Method::PUT => HttpMethod::Put,
        axum::http::Method::DELETE => HttpMethod::Delete,
        axum::http::Method::PATCH => HttpMethod::Patch,
        axum::http::Method::OPTIONS => HttpMethod::Options,
        axum::http::Method::HEAD => HttpMethod::Head,
        ref other => {
            return Err(PortalError::bad_request(format!(
                "Unsupported HTTP method: {other}"
            )));
        }
    };

    let mut portal_req = PortalRequest::new(method, parts.uri.path());

    for (name, value) in &parts.headers {
        if let Ok(text) = value.to_str() {
            portal_req
                .headers
                .insert(name.as_str().to_string(), text.to_string());
        }
    }

    if let Some(raw) = parts.uri.query() {
        portal_req.query = url::form_urlencoded::parse(raw.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
    }

    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|err| PortalError::bad_request(format!("Unreadable request body: {err}")))?;
    if !bytes.is_empty() {
        portal_req.body = Some(bytes.to_vec());
    }

    Ok(portal_req)
}

/// Renders the dispatch outcome as an HTTP response. Errors take the same
/// `{ "message": ... }` shape as the transport-agnostic path.
fn render(result: PortalResult<PortalResponse>) -> Response {
    let reply = result.unwrap_or_else(PortalError::into_response);

    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut headers = HeaderMap::new();
    for (name, value) in &reply.headers {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            headers.insert(name, value);
        }
    }

    (status, headers, Body::from(reply.body)).into_response()
}
