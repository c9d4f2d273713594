//! Request and response types for the `validateShipment` operation.

use serde::Serialize;

use crate::model::common::{StatusInformation, StatusResponse, Version};
use crate::model::create::ShipmentOrder;

/// Request document for `validateShipment`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidateShipmentOrderRequest {
    pub version: Version,
    pub shipment_orders: Vec<ShipmentOrder>,
}

impl ValidateShipmentOrderRequest {
    pub fn new(version: Version, shipment_orders: Vec<ShipmentOrder>) -> Self {
        Self {
            version,
            shipment_orders,
        }
    }
}

/// Raw response document for `validateShipment`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidateShipmentResponse {
    pub status: StatusInformation,
    pub validation_states: Vec<ValidationState>,
}

/// Validation result for one submitted shipment order.
///
/// Unlike create results, validation states are returned for *every*
/// submitted item, success or failure; inspecting them is the intended way
/// to learn the per-item outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationState {
    /// The caller-assigned sequence number from the request.
    pub sequence_number: String,
    pub status: StatusInformation,
}

impl ValidationState {
    /// `true` if the shipment order would be accepted as-is.
    pub fn is_valid(&self) -> bool {
        self.status.is_success()
    }
}

impl ValidateShipmentResponse {
    /// Maps the raw response to one validation state per submitted item.
    pub fn into_validation_states(self) -> Vec<ValidationState> {
        self.validation_states
    }
}

impl StatusResponse for ValidateShipmentResponse {
    fn status(&self) -> &StatusInformation {
        &self.status
    }

    fn item_statuses(&self) -> Vec<&StatusInformation> {
        self.validation_states
            .iter()
            .map(|state| &state.status)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_state_per_item_regardless_of_outcome() {
        let response = ValidateShipmentResponse {
            status: StatusInformation::new(0, "ok"),
            validation_states: vec![
                ValidationState {
                    sequence_number: "1".to_string(),
                    status: StatusInformation::new(0, "ok"),
                },
                ValidationState {
                    sequence_number: "2".to_string(),
                    status: StatusInformation::new(1101, "Hard validation error occured."),
                },
            ],
        };

        let states = response.into_validation_states();

        assert_eq!(states.len(), 2);
        assert!(states[0].is_valid());
        assert!(!states[1].is_valid());
        assert_eq!(states[1].sequence_number, "2");
    }
}
