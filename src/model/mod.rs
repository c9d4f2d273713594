//! Typed request, response and result documents for the shipment
//! operations.
//!
//! Requests are built by [`ShipmentService`](crate::ShipmentService);
//! responses are produced by the transport and mapped into the result types
//! (`Shipment`, cancelled shipment numbers, `ValidationState`) before they
//! reach the caller.

pub mod common;
pub mod create;
pub mod delete;
pub mod validate;

pub use common::{StatusInformation, StatusResponse, Version};
pub use create::{
    Address, CreateShipmentOrderRequest, CreateShipmentOrderResponse, CreationState, LabelData,
    LabelResponseType, Party, Shipment, ShipmentDetails, ShipmentOrder,
};
pub use delete::{DeleteShipmentOrderRequest, DeleteShipmentOrderResponse, DeletionState};
pub use validate::{ValidateShipmentOrderRequest, ValidateShipmentResponse, ValidationState};
