//! The default transport: SOAP 1.1 over HTTP(S) via `reqwest`.
//!
//! One blocking POST per operation. Application-level credentials travel as
//! HTTP basic auth on every request; the account-level auth header is taken
//! from the call context, where the authentication decorator put it. The
//! raw request and response documents are recorded into the context for the
//! logging decorator. No retries, no connection pooling beyond what
//! `reqwest` does internally; resiliency is the caller's concern.

use std::time::Duration;

use url::Url;

use crate::auth::AuthenticationStorage;
use crate::model::create::{CreateShipmentOrderRequest, CreateShipmentOrderResponse};
use crate::model::delete::{DeleteShipmentOrderRequest, DeleteShipmentOrderResponse};
use crate::model::validate::{ValidateShipmentOrderRequest, ValidateShipmentResponse};
use crate::soap::envelope;
use crate::soap::{CallContext, ClientError, Fault, ShipmentClient};

/// Production endpoint of the business customer shipping service.
pub const PRODUCTION_ENDPOINT: &str = "https://cig.dhl.de/services/production/soap";

/// Sandbox endpoint for integration testing against the carrier.
pub const SANDBOX_ENDPOINT: &str = "https://cig.dhl.de/services/sandbox/soap";

/// Blocking SOAP-over-HTTP client for the shipment operations.
pub struct HttpSoapClient {
    http: reqwest::blocking::Client,
    endpoint: Url,
    application_id: String,
    application_token: String,
}

impl HttpSoapClient {
    /// Creates a transport for the given endpoint.
    ///
    /// `timeout` bounds the whole request including the response body; with
    /// `None` a stuck call blocks indefinitely.
    pub fn new(
        endpoint: Url,
        auth: &AuthenticationStorage,
        timeout: Option<Duration>,
    ) -> Result<Self, crate::Error> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            crate::Error::Configuration(format!("failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            http,
            endpoint,
            application_id: auth.application_id().to_string(),
            application_token: auth.application_token().to_string(),
        })
    }

    /// Sends one envelope and returns the raw response body.
    fn dispatch(
        &self,
        ctx: &mut CallContext,
        soap_action: &str,
        envelope_xml: String,
    ) -> Result<String, Fault> {
        ctx.record_request(envelope_xml.clone());

        tracing::debug!(soap_action, endpoint = %self.endpoint, "dispatching SOAP request");

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(http::header::CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", format!("urn:{soap_action}"))
            .basic_auth(&self.application_id, Some(&self.application_token))
            .body(envelope_xml)
            .send()?;

        let status = response.status();
        let body = response.text().map_err(Fault::Network)?;
        ctx.record_response(body.clone());

        // fault bodies usually arrive with HTTP 500
        if let Some((code, message)) = envelope::parse_fault(&body) {
            return Err(Fault::Soap { code, message });
        }
        if !status.is_success() {
            return Err(Fault::Http { status, body });
        }

        Ok(body)
    }
}

impl ShipmentClient for HttpSoapClient {
    fn create_shipment_order(
        &self,
        ctx: &mut CallContext,
        request: &CreateShipmentOrderRequest,
    ) -> Result<CreateShipmentOrderResponse, ClientError> {
        let envelope_xml = envelope::create_shipment_order_request(ctx.auth_header(), request);
        let body = self.dispatch(ctx, "createShipmentOrder", envelope_xml)?;
        Ok(envelope::parse_create_response(&body)?)
    }

    fn delete_shipment_order(
        &self,
        ctx: &mut CallContext,
        request: &DeleteShipmentOrderRequest,
    ) -> Result<DeleteShipmentOrderResponse, ClientError> {
        let envelope_xml = envelope::delete_shipment_order_request(ctx.auth_header(), request);
        let body = self.dispatch(ctx, "deleteShipmentOrder", envelope_xml)?;
        Ok(envelope::parse_delete_response(&body)?)
    }

    fn validate_shipment(
        &self,
        ctx: &mut CallContext,
        request: &ValidateShipmentOrderRequest,
    ) -> Result<ValidateShipmentResponse, ClientError> {
        let envelope_xml = envelope::validate_shipment_request(ctx.auth_header(), request);
        let body = self.dispatch(ctx, "validateShipment", envelope_xml)?;
        Ok(envelope::parse_validate_response(&body)?)
    }
}
