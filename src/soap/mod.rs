//! The SOAP client stack: the operation contract shared by transport and
//! decorators, the per-call context, and the chain-level error types.
//!
//! The stack is composed as an explicit chain of wrappers, each owning its
//! inner client and adding one concern:
//!
//! ```text
//! AuthenticationDecorator      attaches the account auth header
//!   └─ LoggerDecorator         logs the raw exchange, exactly once
//!        └─ ErrorHandlerDecorator   reclassifies faults and hard errors
//!             └─ HttpSoapClient     one blocking SOAP call
//! ```

pub mod decorator;
mod envelope;
pub mod transport;

use std::fmt;

use http::StatusCode;

use crate::model::create::{CreateShipmentOrderRequest, CreateShipmentOrderResponse};
use crate::model::delete::{DeleteShipmentOrderRequest, DeleteShipmentOrderResponse};
use crate::model::validate::{ValidateShipmentOrderRequest, ValidateShipmentResponse};

pub use decorator::{AuthenticationDecorator, ErrorHandlerDecorator, LoggerDecorator};
pub use transport::{HttpSoapClient, PRODUCTION_ENDPOINT, SANDBOX_ENDPOINT};

/// The three web service operations.
///
/// Implemented by the transport and by every decorator, so that wrappers can
/// be stacked freely. All methods take a [`CallContext`] alongside the
/// request: decorators write call-scoped state (the auth header) into it on
/// the way down, the transport records the raw exchange into it on the way
/// up.
pub trait ShipmentClient {
    /// Creates shipments and returns the labels for them.
    fn create_shipment_order(
        &self,
        ctx: &mut CallContext,
        request: &CreateShipmentOrderRequest,
    ) -> Result<CreateShipmentOrderResponse, ClientError>;

    /// Cancels previously created shipments.
    fn delete_shipment_order(
        &self,
        ctx: &mut CallContext,
        request: &DeleteShipmentOrderRequest,
    ) -> Result<DeleteShipmentOrderResponse, ClientError>;

    /// Validates shipments without creating them.
    fn validate_shipment(
        &self,
        ctx: &mut CallContext,
        request: &ValidateShipmentOrderRequest,
    ) -> Result<ValidateShipmentResponse, ClientError>;
}

/// Account-level credentials attached to one call as a SOAP header.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthHeader {
    pub user: String,
    pub signature: String,
}

impl fmt::Debug for AuthHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthHeader")
            .field("user", &self.user)
            .field("signature", &"<redacted>")
            .finish()
    }
}

/// State scoped to a single web service call.
///
/// A fresh context is created per invocation, which keeps the auth header
/// and the recorded exchange from leaking between calls. The auth header
/// must be present before the transport dispatches the request; the
/// recorded request/response text is what the logging decorator emits.
#[derive(Debug, Default)]
pub struct CallContext {
    auth: Option<AuthHeader>,
    last_request: Option<String>,
    last_response: Option<String>,
}

impl CallContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the account auth header for this call.
    pub fn set_auth_header(&mut self, header: AuthHeader) {
        self.auth = Some(header);
    }

    pub fn auth_header(&self) -> Option<&AuthHeader> {
        self.auth.as_ref()
    }

    /// Records the outgoing request document. Called by the transport
    /// immediately before dispatch.
    pub fn record_request(&mut self, request: impl Into<String>) {
        self.last_request = Some(request.into());
    }

    /// Records the incoming response document, fault bodies included.
    pub fn record_response(&mut self, response: impl Into<String>) {
        self.last_response = Some(response.into());
    }

    pub fn last_request(&self) -> Option<&str> {
        self.last_request.as_deref()
    }

    pub fn last_response(&self) -> Option<&str> {
        self.last_response.as_deref()
    }
}

/// A transport-level failure, before any reclassification.
#[derive(thiserror::Error, Debug)]
pub enum Fault {
    /// Connection, DNS or timeout failure below the HTTP layer.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status without a parseable SOAP fault body.
    #[error("HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },

    /// A SOAP fault element returned by the endpoint.
    #[error("SOAP fault {code}: {message}")]
    Soap { code: String, message: String },

    /// The response body could not be parsed as the expected document.
    #[error("malformed response envelope: {0}")]
    Envelope(String),
}

/// Error type shared along the decorator chain.
///
/// The transport only ever produces the [`Fault`] variant; the error handler
/// decorator upgrades faults and carrier-reported hard errors into the
/// `Authentication` and `Detailed` variants so that upstream code never has
/// to inspect raw faults. The facade translates this type into the public
/// [`Error`](crate::Error) taxonomy.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Fault(#[from] Fault),

    /// The application or account credentials were rejected.
    #[error("{message}")]
    Authentication { message: String },

    /// The carrier processed the call but rejected it as a whole.
    #[error("error {code}: {message}")]
    Detailed {
        code: u32,
        message: String,
        details: Vec<String>,
    },
}
