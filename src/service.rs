//! The public service facade.
//!
//! [`ShipmentService`] composes one request document per operation, invokes
//! the decorated client with a fresh call context, maps the response into
//! typed results and translates every chain error into the public
//! [`Error`](crate::Error) taxonomy. It is the single classification
//! boundary: no other error kind reaches the caller.

use std::time::Duration;

use url::Url;

use crate::auth::AuthenticationStorage;
use crate::error::{Error, Result};
use crate::model::common::Version;
use crate::model::create::{
    CreateShipmentOrderRequest, LabelResponseType, Shipment, ShipmentOrder,
};
use crate::model::delete::DeleteShipmentOrderRequest;
use crate::model::validate::{ValidateShipmentOrderRequest, ValidationState};
use crate::soap::{
    AuthenticationDecorator, CallContext, ErrorHandlerDecorator, HttpSoapClient, LoggerDecorator,
    ShipmentClient, PRODUCTION_ENDPOINT, SANDBOX_ENDPOINT,
};

/// Typed access to the three shipment operations.
///
/// Construction wires up the full decorator chain (authentication, exchange
/// logging, error reclassification) around the transport. Calls are
/// blocking and independent of each other; the only state a service keeps
/// is its immutable credentials and the HTTP connection pool.
///
/// # Examples
///
/// ```no_run
/// use frachtwerk::{AuthenticationStorage, ShipmentService};
///
/// # fn example() -> frachtwerk::Result<()> {
/// let service = ShipmentService::builder()
///     .sandbox(true)
///     .credentials(AuthenticationStorage::new(
///         "my_app_id",
///         "app_token",
///         "2222222222_01",
///         "pass",
///     ))
///     .build()?;
///
/// let cancelled = service.cancel_shipments(vec!["222201040078555111".to_string()])?;
/// println!("cancelled {} shipments", cancelled.len());
/// # Ok(())
/// # }
/// ```
pub struct ShipmentService {
    client: Box<dyn ShipmentClient + Send + Sync>,
}

impl std::fmt::Debug for ShipmentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShipmentService").finish_non_exhaustive()
    }
}

impl ShipmentService {
    /// Creates a builder for a service talking to the real web service.
    pub fn builder() -> ShipmentServiceBuilder {
        ShipmentServiceBuilder::new()
    }

    /// Wraps a custom transport in the standard decorator chain.
    ///
    /// Useful for tests and for callers that bring their own transport. The
    /// chain is identical to the one [`builder`](Self::builder) sets up:
    /// authentication outermost, then logging, then error reclassification.
    pub fn with_client<C>(client: C, auth: &AuthenticationStorage) -> Self
    where
        C: ShipmentClient + Send + Sync + 'static,
    {
        let chain = AuthenticationDecorator::new(
            LoggerDecorator::new(ErrorHandlerDecorator::new(client)),
            auth.clone(),
        );

        Self {
            client: Box::new(chain),
        }
    }

    /// Creates shipments with labels for the given orders.
    ///
    /// Returns one [`Shipment`] per order the carrier accepted; rejected
    /// orders are dropped from the result. If no order survives and the
    /// carrier reported a hard error, the call fails with
    /// [`Error::DetailedService`] instead of returning an empty list.
    pub fn create_shipments(&self, shipment_orders: Vec<ShipmentOrder>) -> Result<Vec<Shipment>> {
        let request = CreateShipmentOrderRequest::new(Version::default(), shipment_orders)
            .with_label_response_type(LabelResponseType::Base64);

        let mut ctx = CallContext::new();
        let response = self.client.create_shipment_order(&mut ctx, &request)?;

        Ok(response.into_shipments())
    }

    /// Cancels the given shipments.
    ///
    /// Returns the shipment numbers that were actually cancelled, a subset
    /// of the requested ones. Shipments the carrier could not cancel are
    /// silently omitted; cancellation is advisory.
    pub fn cancel_shipments(&self, shipment_numbers: Vec<String>) -> Result<Vec<String>> {
        let request = DeleteShipmentOrderRequest::new(Version::default(), shipment_numbers);

        let mut ctx = CallContext::new();
        let response = self.client.delete_shipment_order(&mut ctx, &request)?;

        Ok(response.into_cancelled_shipment_numbers())
    }

    /// Validates the given orders without creating shipments.
    ///
    /// Returns exactly one [`ValidationState`] per submitted order, whether
    /// it passed or not; inspecting them is the intended way to learn the
    /// per-item outcome.
    pub fn validate_shipments(
        &self,
        shipment_orders: Vec<ShipmentOrder>,
    ) -> Result<Vec<ValidationState>> {
        let request = ValidateShipmentOrderRequest::new(Version::default(), shipment_orders);

        let mut ctx = CallContext::new();
        let response = self.client.validate_shipment(&mut ctx, &request)?;

        Ok(response.into_validation_states())
    }
}

/// Builder for configuring and creating a [`ShipmentService`].
///
/// # Examples
///
/// ```no_run
/// use frachtwerk::{AuthenticationStorage, ShipmentService};
/// use std::time::Duration;
///
/// # fn example() -> frachtwerk::Result<()> {
/// let service = ShipmentService::builder()
///     .endpoint("https://cig.dhl.de/services/sandbox/soap")?
///     .credentials(AuthenticationStorage::new("app", "token", "user", "pass"))
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// # let _ = service;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ShipmentServiceBuilder {
    endpoint: Option<Url>,
    credentials: Option<AuthenticationStorage>,
    timeout: Option<Duration>,
    sandbox: bool,
}

impl ShipmentServiceBuilder {
    pub fn new() -> Self {
        Self {
            endpoint: None,
            credentials: None,
            timeout: None,
            sandbox: false,
        }
    }

    /// Overrides the web service endpoint.
    ///
    /// Without an override the production endpoint is used, or the sandbox
    /// endpoint when [`sandbox`](Self::sandbox) is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn endpoint(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.endpoint = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Targets the carrier's sandbox environment instead of production.
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Sets the credentials used for all calls.
    pub fn credentials(mut self, credentials: AuthenticationStorage) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Bounds the duration of one web service call. Without a timeout a
    /// stuck call blocks indefinitely.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configured `ShipmentService`.
    ///
    /// # Errors
    ///
    /// Returns an error if no credentials were provided or the HTTP client
    /// cannot be constructed.
    pub fn build(self) -> Result<ShipmentService> {
        let credentials = self
            .credentials
            .ok_or_else(|| Error::Configuration("credentials are required".to_string()))?;

        let endpoint = match self.endpoint {
            Some(endpoint) => endpoint,
            None => {
                let default = if self.sandbox {
                    SANDBOX_ENDPOINT
                } else {
                    PRODUCTION_ENDPOINT
                };
                Url::parse(default)?
            }
        };

        let transport = HttpSoapClient::new(endpoint, &credentials, self.timeout)?;
        Ok(ShipmentService::with_client(transport, &credentials))
    }
}

impl Default for ShipmentServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
