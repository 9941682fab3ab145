use thiserror::Error;

/// Partner portal error types.
///
/// Each variant maps to an HTTP status code via [`PortalError::status_code`].
/// Use [`PortalError::into_response`] to produce a standardized JSON response:
/// `{ "message": "..." }`.
#[derive(Error, Debug)]
pub enum PortalError {
    // --- 400 Bad Request ---
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    // --- 401 Unauthorized ---
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Partner not found")]
    PartnerNotFound,

    // --- 403 Forbidden ---
    #[error("{0}")]
    Forbidden(String),

    // --- 404 Not Found ---
    #[error("{0}")]
    NotFound(String),

    // --- 409 Conflict ---
    #[error("{0}")]
    Conflict(String),

    // --- 501 Not Implemented ---
    #[error("{0}")]
    NotImplemented(String),

    // --- 500 Internal Server Error ---
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Plugin error: {plugin} - {message}")]
    Plugin { plugin: String, message: String },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl PortalError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            // 400
            Self::BadRequest(_) | Self::InvalidRequest(_) | Self::Validation(_) => 400,
            // 401
            Self::Unauthenticated => 401,
            // 403
            Self::Forbidden(_) => 403,
            // 404
            Self::PartnerNotFound | Self::NotFound(_) => 404,
            // 409
            Self::Conflict(_) => 409,
            // 501
            Self::NotImplemented(_) => 501,
            // 500
            Self::Config(_)
            | Self::Database(_)
            | Self::Serialization(_)
            | Self::Plugin { .. }
            | Self::Internal(_) => 500,
        }
    }

    /// Convert this error into a standardized [`PortalResponse`]:
    /// `{ "message": "..." }` with the mapped status code.
    ///
    /// Internal errors (500) use a generic message to avoid leaking details.
    pub fn into_response(self) -> crate::types::PortalResponse {
        let status = self.status_code();
        let message = match status {
            500 => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        crate::types::PortalResponse::json(
            status,
            &serde_json::json!({
                "message": message
            }),
        )
        .unwrap_or_else(|_| crate::types::PortalResponse::text(status, &message))
    }

    // --- Constructors ---

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::NotImplemented(message.into())
    }

    pub fn plugin(plugin: &str, message: impl Into<String>) -> Self {
        Self::Plugin {
            plugin: plugin.to_string(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

/// Storage-level errors surfaced by database adapters.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Result alias used throughout the portal crates.
pub type PortalResult<T> = Result<T, PortalError>;

/// Build a 422 response describing the field errors from `validator`.
pub fn validation_error_response(
    errors: &validator::ValidationErrors,
) -> crate::types::PortalResponse {
    let field_errors: std::collections::HashMap<&str, Vec<String>> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages: Vec<String> = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
                .collect();
            (field, messages)
        })
        .collect();

    let body = serde_json::json!({
        "code": "VALIDATION_ERROR",
        "message": "Validation failed",
        "errors": field_errors,
    });

    crate::types::PortalResponse::json(422, &body)
        .unwrap_or_else(|_| crate::types::PortalResponse::text(422, "Validation failed"))
}

/// Validate a request body, returning a parsed + validated value or an error response.
pub fn validate_request_body<T>(
    req: &crate::types::PortalRequest,
) -> Result<T, crate::types::PortalResponse>
where
    T: serde::de::DeserializeOwned + validator::Validate,
{
    let value: T = req.body_as_json().map_err(|e| {
        crate::types::PortalResponse::json(
            400,
            &serde_json::json!({
                "message": format!("Invalid JSON: {}", e),
            }),
        )
        .unwrap_or_else(|_| crate::types::PortalResponse::text(400, "Invalid JSON"))
    })?;

    value.validate().map_err(|e| validation_error_response(&e))?;

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_taxonomy() {
        assert_eq!(PortalError::bad_request("x").status_code(), 400);
        assert_eq!(PortalError::Unauthenticated.status_code(), 401);
        assert_eq!(PortalError::forbidden("x").status_code(), 403);
        assert_eq!(PortalError::not_found("x").status_code(), 404);
        assert_eq!(PortalError::conflict("x").status_code(), 409);
        assert_eq!(PortalError::internal("x").status_code(), 500);
    }

    #[test]
    fn internal_errors_hide_details() {
        let response = PortalError::internal("secret connection string").into_response();
        assert_eq!(response.status, 500);
        let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(body["message"], "Internal server error");
    }

    #[test]
    fn client_errors_keep_message() {
        let response = PortalError::conflict("A partner with this email already exists")
            .into_response();
        assert_eq!(response.status, 409);
        let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(body["message"], "A partner with this email already exists");
    }
}
