//! The public error taxonomy of the shipment service.
//!
//! Every failure of the three operations surfaces as one of exactly three
//! kinds: rejected credentials, a carrier-reported hard error with full
//! detail, or a generic service failure wrapping the underlying cause.
//! Per-item failures are *not* errors; they are encoded in the returned
//! collections (see the mapping rules on the response types).

use crate::soap::{ClientError, Fault};

/// The error type returned by [`ShipmentService`](crate::ShipmentService).
///
/// # Examples
///
/// ```no_run
/// use frachtwerk::{AuthenticationStorage, Error, ShipmentService};
///
/// # fn example(orders: Vec<frachtwerk::ShipmentOrder>) -> Result<(), Error> {
/// let service = ShipmentService::builder()
///     .sandbox(true)
///     .credentials(AuthenticationStorage::new("app", "token", "user", "pass"))
///     .build()?;
///
/// match service.create_shipments(orders) {
///     Ok(shipments) => println!("created {} shipments", shipments.len()),
///     Err(Error::Authentication { message }) => {
///         eprintln!("check your credentials: {message}");
///     }
///     Err(Error::DetailedService { code, message, details }) => {
///         eprintln!("carrier rejected the request ({code}): {message}");
///         for detail in details {
///             eprintln!("  - {detail}");
///         }
///     }
///     Err(e) => eprintln!("call failed: {e}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The application or account credentials were rejected.
    #[error("authentication failed: {message}")]
    Authentication {
        /// Message from the account layer, e.g. why the login failed.
        message: String,
    },

    /// The carrier processed the call but rejected it for a business or
    /// validation reason, e.g. every submitted item was invalid.
    #[error("shipment service error {code}: {message}")]
    DetailedService {
        /// The carrier's status code, e.g. `1101` for a hard validation
        /// error.
        code: u32,
        /// The carrier's status text.
        message: String,
        /// Per-item detail messages, deduplicated.
        details: Vec<String>,
    },

    /// Anything else: network failure, malformed response, an unclassified
    /// fault. Carries no carrier code.
    #[error("shipment service call failed: {source}")]
    Service {
        /// The underlying transport fault.
        #[source]
        source: Fault,
    },

    /// The service was configured incorrectly (bad endpoint, unusable HTTP
    /// client). Raised at construction time only, never by an operation.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An invalid endpoint URL was provided.
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// The carrier status code, if this error carries one.
    pub fn code(&self) -> Option<u32> {
        match self {
            Error::DetailedService { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<ClientError> for Error {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Authentication { message } => Error::Authentication { message },
            ClientError::Detailed {
                code,
                message,
                details,
            } => Error::DetailedService {
                code,
                message,
                details,
            },
            ClientError::Fault(fault) => Error::Service { source: fault },
        }
    }
}

/// A specialized `Result` type for shipment service calls.
pub type Result<T> = std::result::Result<T, Error>;
