use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use log::error;
use serde::Serialize;
use storefront_engine::{AccountApiError, AuthApiError, CatalogApiError, OrderFlowError, PaymentGatewayError};
use thiserror::Error;

/// Client-facing message for failures whose details must stay in the server log.
const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again later.";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("{0}")]
    Unspecified(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("Could not read request path: {0}")]
    InvalidRequestPath(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    AuthenticationError(#[from] AuthError),
    #[error("{0}")]
    InsufficientPermissions(String),
    #[error("{0}")]
    NoRecordFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Payment gateway error. {0}")]
    PaymentError(String),
}

/// The JSON body of every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServerError {
    fn to_error_response(&self) -> ErrorResponse {
        let (message, error) = match self {
            Self::InitializeError(_) | Self::ConfigurationError(_) | Self::IOError(_) | Self::BackendError(_) => {
                (GENERIC_ERROR_MESSAGE.to_string(), None)
            },
            Self::PaymentError(e) => ("Payment gateway error".to_string(), Some(e.clone())),
            Self::InvalidRequestBody(e) | Self::InvalidRequestPath(e) => {
                ("Invalid request".to_string(), Some(e.clone()))
            },
            _ => (self.to_string(), None),
        };
        ErrorResponse { success: false, message, error }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequestPath(_) => StatusCode::BAD_REQUEST,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            Self::InsufficientPermissions(_) => StatusCode::FORBIDDEN,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::PaymentError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("💻️ {self}");
        }
        let body = serde_json::to_string(&self.to_error_response())
            .unwrap_or_else(|_| r#"{"success":false,"message":"Internal error"}"#.to_string());
        HttpResponse::build(status).insert_header(ContentType::json()).body(body)
    }
}

/// Reasons a request could not be associated with a signed-in account.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Unauthorized: No token provided")]
    MissingToken,
    #[error("Unauthorized: Invalid or expired token")]
    InvalidToken,
    #[error("Unauthorized: No user found")]
    AccountNotFound,
    #[error("Invalid Password")]
    InvalidPassword,
}

impl From<AuthApiError> for ServerError {
    fn from(e: AuthApiError) -> Self {
        match e {
            AuthApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
            AuthApiError::HashingError(_) => Self::BackendError(e.to_string()),
            AuthApiError::ValidationError(m) => Self::ValidationError(m),
            AuthApiError::AccountAlreadyExists => Self::Conflict(e.to_string()),
            AuthApiError::InvalidPassword => Self::AuthenticationError(AuthError::InvalidPassword),
            AuthApiError::EmailNotRegistered | AuthApiError::WrongSecurityAnswer | AuthApiError::AccountNotFound => {
                Self::NoRecordFound(e.to_string())
            },
        }
    }
}

impl From<AccountApiError> for ServerError {
    fn from(e: AccountApiError) -> Self {
        match e {
            AccountApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
            AccountApiError::AccountNotFound => Self::NoRecordFound(e.to_string()),
        }
    }
}

impl From<CatalogApiError> for ServerError {
    fn from(e: CatalogApiError) -> Self {
        match e {
            CatalogApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
            CatalogApiError::ValidationError(m) => Self::ValidationError(m),
            CatalogApiError::UnknownCategory(_) => Self::ValidationError(e.to_string()),
            CatalogApiError::CategoryNotFound | CatalogApiError::ProductNotFound => Self::NoRecordFound(e.to_string()),
            CatalogApiError::CategoryAlreadyExists
            | CatalogApiError::CategoryInUse
            | CatalogApiError::ProductAlreadyExists => Self::Conflict(e.to_string()),
        }
    }
}

impl From<OrderFlowError> for ServerError {
    fn from(e: OrderFlowError) -> Self {
        match e {
            OrderFlowError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
            OrderFlowError::OrderNotFound => Self::NoRecordFound(e.to_string()),
            OrderFlowError::EmptyCart |
            OrderFlowError::MissingNonce |
            OrderFlowError::UnknownProduct(_) |
            OrderFlowError::TotalTooLarge => Self::ValidationError(e.to_string()),
            OrderFlowError::PaymentFailed(m) => Self::PaymentError(m),
            OrderFlowError::GatewayError(e) => e.into(),
            OrderFlowError::CatalogError(e) => e.into(),
        }
    }
}

impl From<PaymentGatewayError> for ServerError {
    fn from(e: PaymentGatewayError) -> Self {
        Self::PaymentError(e.to_string())
    }
}
