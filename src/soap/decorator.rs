//! Cross-cutting client decorators.
//!
//! Each decorator owns its inner client exclusively and implements the same
//! [`ShipmentClient`] contract, so the stack can be composed explicitly at
//! construction time. The composition order matters: authentication runs
//! outermost so the logged and classified exchange is the final,
//! authenticated one.

use http::StatusCode;

use crate::auth::AuthenticationStorage;
use crate::model::common::StatusResponse;
use crate::model::create::{CreateShipmentOrderRequest, CreateShipmentOrderResponse};
use crate::model::delete::{DeleteShipmentOrderRequest, DeleteShipmentOrderResponse};
use crate::model::validate::{ValidateShipmentOrderRequest, ValidateShipmentResponse};
use crate::soap::{AuthHeader, CallContext, ClientError, Fault, ShipmentClient};

/// Overall carrier status for rejected credentials.
const STATUS_LOGIN_FAILED: u32 = 1001;

pub(crate) const AUTH_FAILED_MESSAGE: &str =
    "Authentication failed. Please check your access credentials.";

/// Attaches the account-level auth header to the call context before
/// forwarding. Never inspects the response.
pub struct AuthenticationDecorator<C> {
    inner: C,
    auth: AuthenticationStorage,
}

impl<C> AuthenticationDecorator<C> {
    pub fn new(inner: C, auth: AuthenticationStorage) -> Self {
        Self { inner, auth }
    }

    fn attach(&self, ctx: &mut CallContext) {
        ctx.set_auth_header(AuthHeader {
            user: self.auth.user().to_string(),
            signature: self.auth.signature().to_string(),
        });
    }
}

impl<C: ShipmentClient> ShipmentClient for AuthenticationDecorator<C> {
    fn create_shipment_order(
        &self,
        ctx: &mut CallContext,
        request: &CreateShipmentOrderRequest,
    ) -> Result<CreateShipmentOrderResponse, ClientError> {
        self.attach(ctx);
        self.inner.create_shipment_order(ctx, request)
    }

    fn delete_shipment_order(
        &self,
        ctx: &mut CallContext,
        request: &DeleteShipmentOrderRequest,
    ) -> Result<DeleteShipmentOrderResponse, ClientError> {
        self.attach(ctx);
        self.inner.delete_shipment_order(ctx, request)
    }

    fn validate_shipment(
        &self,
        ctx: &mut CallContext,
        request: &ValidateShipmentOrderRequest,
    ) -> Result<ValidateShipmentResponse, ClientError> {
        self.attach(ctx);
        self.inner.validate_shipment(ctx, request)
    }
}

/// Logs the raw exchange exactly once per call, faults included.
///
/// The severity follows the typed outcome: `error` for faults and hard
/// per-item errors, `warn` for carrier warnings, `info` otherwise. The
/// request and response text comes from the call context, where the
/// transport records it; on faults without a response body the fault
/// message is logged in its place.
pub struct LoggerDecorator<C> {
    inner: C,
}

impl<C> LoggerDecorator<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

fn log_exchange(ctx: &CallContext, outcome: Result<&dyn StatusResponse, &ClientError>) {
    let request = ctx.last_request().unwrap_or_default();
    match outcome {
        Err(error) => {
            let response = ctx
                .last_response()
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            tracing::error!(request, response = %response, "web service call failed");
        }
        Ok(typed) => {
            let response = ctx.last_response().unwrap_or_default();
            let statuses = typed.item_statuses();
            let has_errors = !typed.status().is_success()
                || statuses.iter().any(|status| !status.is_success());
            let has_warnings =
                typed.status().is_warning() || statuses.iter().any(|status| status.is_warning());

            if has_errors {
                tracing::error!(request, response, "web service call completed with errors");
            } else if has_warnings {
                tracing::warn!(request, response, "web service call completed with warnings");
            } else {
                tracing::info!(request, response, "web service call succeeded");
            }
        }
    }
}

impl<C: ShipmentClient> ShipmentClient for LoggerDecorator<C> {
    fn create_shipment_order(
        &self,
        ctx: &mut CallContext,
        request: &CreateShipmentOrderRequest,
    ) -> Result<CreateShipmentOrderResponse, ClientError> {
        let result = self.inner.create_shipment_order(ctx, request);
        log_exchange(ctx, result.as_ref().map(|r| r as &dyn StatusResponse));
        result
    }

    fn delete_shipment_order(
        &self,
        ctx: &mut CallContext,
        request: &DeleteShipmentOrderRequest,
    ) -> Result<DeleteShipmentOrderResponse, ClientError> {
        let result = self.inner.delete_shipment_order(ctx, request);
        log_exchange(ctx, result.as_ref().map(|r| r as &dyn StatusResponse));
        result
    }

    fn validate_shipment(
        &self,
        ctx: &mut CallContext,
        request: &ValidateShipmentOrderRequest,
    ) -> Result<ValidateShipmentResponse, ClientError> {
        let result = self.inner.validate_shipment(ctx, request);
        log_exchange(ctx, result.as_ref().map(|r| r as &dyn StatusResponse));
        result
    }
}

/// Reclassifies transport faults and carrier-reported hard errors into
/// typed [`ClientError`] variants, so upstream code never sees raw faults.
///
/// A hard overall status only becomes an error when *no* submitted item
/// succeeded; mixed outcomes stay in-band so partial successes are not
/// hidden behind an error.
pub struct ErrorHandlerDecorator<C> {
    inner: C,
}

impl<C> ErrorHandlerDecorator<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

fn reclassify_fault(fault: Fault) -> ClientError {
    match fault {
        Fault::Http { status, .. } if status == StatusCode::UNAUTHORIZED => {
            ClientError::Authentication {
                message: AUTH_FAILED_MESSAGE.to_string(),
            }
        }
        Fault::Soap { code, message } => match code.parse::<u32>() {
            Ok(carrier_code) => ClientError::Detailed {
                code: carrier_code,
                message,
                details: Vec::new(),
            },
            Err(_) => ClientError::Fault(Fault::Soap { code, message }),
        },
        other => ClientError::Fault(other),
    }
}

fn check_response<R: StatusResponse>(response: R) -> Result<R, ClientError> {
    let status = response.status();
    if status.code == STATUS_LOGIN_FAILED {
        return Err(ClientError::Authentication {
            message: status.text.clone(),
        });
    }

    if !status.is_success() {
        let items = response.item_statuses();
        let none_succeeded = items.iter().all(|item| !item.is_success());
        if none_succeeded {
            let mut details = status.unique_messages();
            for item in &items {
                for message in item.unique_messages() {
                    if !details.contains(&message) {
                        details.push(message);
                    }
                }
            }
            return Err(ClientError::Detailed {
                code: status.code,
                message: status.text.clone(),
                details,
            });
        }
    }

    Ok(response)
}

fn reclassify<R: StatusResponse>(result: Result<R, ClientError>) -> Result<R, ClientError> {
    match result {
        Ok(response) => check_response(response),
        Err(ClientError::Fault(fault)) => Err(reclassify_fault(fault)),
        Err(other) => Err(other),
    }
}

impl<C: ShipmentClient> ShipmentClient for ErrorHandlerDecorator<C> {
    fn create_shipment_order(
        &self,
        ctx: &mut CallContext,
        request: &CreateShipmentOrderRequest,
    ) -> Result<CreateShipmentOrderResponse, ClientError> {
        reclassify(self.inner.create_shipment_order(ctx, request))
    }

    fn delete_shipment_order(
        &self,
        ctx: &mut CallContext,
        request: &DeleteShipmentOrderRequest,
    ) -> Result<DeleteShipmentOrderResponse, ClientError> {
        reclassify(self.inner.delete_shipment_order(ctx, request))
    }

    fn validate_shipment(
        &self,
        ctx: &mut CallContext,
        request: &ValidateShipmentOrderRequest,
    ) -> Result<ValidateShipmentResponse, ClientError> {
        reclassify(self.inner.validate_shipment(ctx, request))
    }
}
