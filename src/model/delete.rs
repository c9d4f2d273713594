//! Request and response types for the `deleteShipmentOrder` operation.

use serde::Serialize;

use crate::model::common::{StatusInformation, StatusResponse, Version};

/// Request document for `deleteShipmentOrder`.
///
/// Cancellation is only possible before the end-of-day manifest has been
/// closed for the affected shipments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteShipmentOrderRequest {
    pub version: Version,
    pub shipment_numbers: Vec<String>,
}

impl DeleteShipmentOrderRequest {
    pub fn new(version: Version, shipment_numbers: Vec<String>) -> Self {
        Self {
            version,
            shipment_numbers,
        }
    }
}

/// Raw response document for `deleteShipmentOrder`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteShipmentOrderResponse {
    pub status: StatusInformation,
    pub deletion_states: Vec<DeletionState>,
}

/// Per-shipment result within a delete response.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletionState {
    pub shipment_number: String,
    pub status: StatusInformation,
}

impl DeleteShipmentOrderResponse {
    /// Maps the raw response to the shipment numbers that were actually
    /// cancelled.
    ///
    /// Cancellation is advisory: shipments the carrier could not cancel
    /// (unknown number, already manifested) are silently omitted from the
    /// returned list rather than raised as an error.
    pub fn into_cancelled_shipment_numbers(self) -> Vec<String> {
        self.deletion_states
            .into_iter()
            .filter(|state| state.status.is_success())
            .map(|state| state.shipment_number)
            .collect()
    }
}

impl StatusResponse for DeleteShipmentOrderResponse {
    fn status(&self) -> &StatusInformation {
        &self.status
    }

    fn item_statuses(&self) -> Vec<&StatusInformation> {
        self.deletion_states
            .iter()
            .map(|state| &state.status)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(shipment_number: &str, code: u32) -> DeletionState {
        DeletionState {
            shipment_number: shipment_number.to_string(),
            status: StatusInformation::new(code, if code == 0 { "ok" } else { "Unknown shipment number." }),
        }
    }

    #[test]
    fn cancelled_numbers_are_a_subset_of_the_request() {
        let requested = ["222201040078555111", "222201040078555128", "222201040078555135"];
        let response = DeleteShipmentOrderResponse {
            status: StatusInformation::new(0, "ok"),
            deletion_states: vec![
                state(requested[0], 0),
                state(requested[1], 2000),
                state(requested[2], 0),
            ],
        };

        let cancelled = response.into_cancelled_shipment_numbers();

        assert_eq!(cancelled, vec![requested[0], requested[2]]);
        assert!(cancelled.iter().all(|n| requested.contains(&n.as_str())));
    }

    #[test]
    fn failed_cancellations_are_silent() {
        let response = DeleteShipmentOrderResponse {
            status: StatusInformation::new(0, "ok"),
            deletion_states: vec![state("222201040078555111", 2000)],
        };

        assert!(response.into_cancelled_shipment_numbers().is_empty());
    }
}
