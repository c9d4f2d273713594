//! Request, response and result types for the `createShipmentOrder`
//! operation, plus the mapping from the raw response to [`Shipment`]
//! results.

use serde::Serialize;

use crate::model::common::{StatusInformation, StatusResponse, Version};

/// How the carrier should return label documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LabelResponseType {
    /// Labels are returned inline as base64-encoded PDF data.
    Base64,
    /// Labels are returned as download URLs.
    Url,
}

impl LabelResponseType {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            LabelResponseType::Base64 => "B64",
            LabelResponseType::Url => "URL",
        }
    }
}

/// One shipment to be created, as supplied by the caller.
///
/// The `sequence_number` is assigned by the caller and correlates the order
/// with its result record; it is echoed back unchanged by the carrier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipmentOrder {
    pub sequence_number: String,
    pub shipment: ShipmentDetails,
    pub shipper: Party,
    pub receiver: Party,
}

/// Product, billing and parcel data of one shipment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipmentDetails {
    /// Carrier product code, e.g. `V01PAK` for a national parcel.
    pub product: String,
    /// Billing number the shipment is booked on.
    pub account_number: String,
    /// Planned shipment date, `YYYY-MM-DD`.
    pub shipment_date: String,
    /// Free-form reference printed on the label.
    pub customer_reference: Option<String>,
    /// Parcel weight in kilograms.
    pub weight_kg: f64,
}

/// A shipper or receiver party.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Party {
    pub name: String,
    pub address: Address,
}

/// A postal address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Address {
    pub street_name: String,
    pub street_number: String,
    pub zip: String,
    pub city: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: String,
}

/// Request document for `createShipmentOrder`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateShipmentOrderRequest {
    pub version: Version,
    pub shipment_orders: Vec<ShipmentOrder>,
    pub label_response_type: Option<LabelResponseType>,
}

impl CreateShipmentOrderRequest {
    pub fn new(version: Version, shipment_orders: Vec<ShipmentOrder>) -> Self {
        Self {
            version,
            shipment_orders,
            label_response_type: None,
        }
    }

    pub fn with_label_response_type(mut self, label_response_type: LabelResponseType) -> Self {
        self.label_response_type = Some(label_response_type);
        self
    }
}

/// Raw response document for `createShipmentOrder`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateShipmentOrderResponse {
    pub status: StatusInformation,
    pub creation_states: Vec<CreationState>,
}

/// Per-item result within a create response, keyed by the sequence number
/// from the request.
#[derive(Debug, Clone, PartialEq)]
pub struct CreationState {
    pub sequence_number: String,
    pub label_data: LabelData,
}

/// Labels and status for one created (or rejected) shipment.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelData {
    pub status: StatusInformation,
    /// Carrier-assigned shipment number, absent for rejected items.
    pub shipment_number: Option<String>,
    pub shipment_label: Option<String>,
    pub return_label: Option<String>,
    pub export_label: Option<String>,
    pub cod_label: Option<String>,
}

/// A successfully created shipment.
///
/// Only items the carrier accepted become a `Shipment`; rejected items are
/// reported through the communication log and, if the whole call failed,
/// through the error path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shipment {
    /// The caller-assigned sequence number from the request.
    pub sequence_number: String,
    /// The carrier-assigned shipment number.
    pub shipment_number: String,
    /// Base64-encoded shipment label.
    pub shipment_label: Option<String>,
    pub return_label: Option<String>,
    pub export_label: Option<String>,
    pub cod_label: Option<String>,
}

impl Shipment {
    /// `true` if at least one label document was returned.
    pub fn has_labels(&self) -> bool {
        self.shipment_label.is_some()
            || self.return_label.is_some()
            || self.export_label.is_some()
            || self.cod_label.is_some()
    }
}

impl CreateShipmentOrderResponse {
    /// Maps the raw response to the list of successfully created shipments.
    ///
    /// Items the carrier rejected (non-zero item status) are dropped, as are
    /// items without a shipment number or without any label document. The
    /// surviving shipments keep their request sequence numbers unchanged.
    pub fn into_shipments(self) -> Vec<Shipment> {
        self.creation_states
            .into_iter()
            .filter_map(|state| {
                let CreationState {
                    sequence_number,
                    label_data,
                } = state;

                if !label_data.status.is_success() {
                    return None;
                }

                let shipment_number = non_empty(label_data.shipment_number)?;
                let shipment = Shipment {
                    sequence_number,
                    shipment_number,
                    shipment_label: non_empty(label_data.shipment_label),
                    return_label: non_empty(label_data.return_label),
                    export_label: non_empty(label_data.export_label),
                    cod_label: non_empty(label_data.cod_label),
                };

                shipment.has_labels().then_some(shipment)
            })
            .collect()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl StatusResponse for CreateShipmentOrderResponse {
    fn status(&self) -> &StatusInformation {
        &self.status
    }

    fn item_statuses(&self) -> Vec<&StatusInformation> {
        self.creation_states
            .iter()
            .map(|state| &state.label_data.status)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn created(sequence_number: &str, shipment_number: &str) -> CreationState {
        CreationState {
            sequence_number: sequence_number.to_string(),
            label_data: LabelData {
                status: StatusInformation::new(0, "ok"),
                shipment_number: Some(shipment_number.to_string()),
                shipment_label: Some("JVBERi0xLjQ=".to_string()),
                return_label: None,
                export_label: None,
                cod_label: None,
            },
        }
    }

    fn rejected(sequence_number: &str) -> CreationState {
        CreationState {
            sequence_number: sequence_number.to_string(),
            label_data: LabelData {
                status: StatusInformation::new(1101, "Hard validation error occured."),
                shipment_number: None,
                shipment_label: None,
                return_label: None,
                export_label: None,
                cod_label: None,
            },
        }
    }

    #[test]
    fn all_items_created_are_all_mapped() {
        let response = CreateShipmentOrderResponse {
            status: StatusInformation::new(0, "ok"),
            creation_states: vec![created("1", "222201040078555111"), created("2", "222201040078555128")],
        };

        let shipments = response.into_shipments();

        assert_eq!(shipments.len(), 2);
        assert_eq!(shipments[0].sequence_number, "1");
        assert_eq!(shipments[0].shipment_number, "222201040078555111");
        assert_eq!(shipments[1].sequence_number, "2");
        assert!(shipments.iter().all(Shipment::has_labels));
    }

    #[test]
    fn rejected_items_are_dropped_from_the_result() {
        let response = CreateShipmentOrderResponse {
            status: StatusInformation::new(0, "ok"),
            creation_states: vec![
                created("1", "222201040078555111"),
                rejected("2"),
                created("3", "222201040078555135"),
            ],
        };

        let shipments = response.into_shipments();

        let sequence_numbers: Vec<_> = shipments
            .iter()
            .map(|s| s.sequence_number.as_str())
            .collect();
        assert_eq!(sequence_numbers, vec!["1", "3"]);
    }

    #[test]
    fn items_without_labels_are_dropped() {
        let mut state = created("1", "222201040078555111");
        state.label_data.shipment_label = Some("   ".to_string());

        let response = CreateShipmentOrderResponse {
            status: StatusInformation::new(0, "ok"),
            creation_states: vec![state],
        };

        assert!(response.into_shipments().is_empty());
    }

    #[test]
    fn items_without_shipment_number_are_dropped() {
        let mut state = created("1", "222201040078555111");
        state.label_data.shipment_number = None;

        let response = CreateShipmentOrderResponse {
            status: StatusInformation::new(0, "ok"),
            creation_states: vec![state],
        };

        assert!(response.into_shipments().is_empty());
    }
}
