//! SOAP 1.1 envelope construction and response parsing.
//!
//! Requests are written with a small escaping push-writer; responses are
//! parsed with `quick-xml` (safe against XXE by default, entities are not
//! expanded) into a lightweight element tree and extracted from there.
//! Element lookup goes by local name so the endpoint's choice of namespace
//! prefixes does not matter.

use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::Reader;

use crate::model::common::StatusInformation;
use crate::model::create::{
    CreateShipmentOrderRequest, CreateShipmentOrderResponse, CreationState, LabelData, Party,
    ShipmentOrder,
};
use crate::model::delete::{DeleteShipmentOrderRequest, DeleteShipmentOrderResponse, DeletionState};
use crate::model::validate::{
    ValidateShipmentOrderRequest, ValidateShipmentResponse, ValidationState,
};
use crate::soap::{AuthHeader, Fault};

const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
const CIS_NS: &str = "http://dhl.de/webservice/cisbase";
const BCS_NS: &str = "http://dhl.de/webservices/businesscustomershipping/3.0";

// ---------------------------------------------------------------------------
// Request construction
// ---------------------------------------------------------------------------

struct XmlWriter {
    xml: String,
}

impl XmlWriter {
    fn new() -> Self {
        Self {
            xml: String::with_capacity(1024),
        }
    }

    fn raw(&mut self, fragment: &str) {
        self.xml.push_str(fragment);
    }

    fn open(&mut self, tag: &str) {
        self.xml.push('<');
        self.xml.push_str(tag);
        self.xml.push('>');
    }

    fn close(&mut self, tag: &str) {
        self.xml.push_str("</");
        self.xml.push_str(tag);
        self.xml.push('>');
    }

    fn leaf(&mut self, tag: &str, text: &str) {
        self.open(tag);
        self.xml.push_str(&escape(text));
        self.close(tag);
    }

    fn finish(self) -> String {
        self.xml
    }
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn envelope(auth: Option<&AuthHeader>, write_body: impl FnOnce(&mut XmlWriter)) -> String {
    let mut x = XmlWriter::new();
    x.raw(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    x.raw(&format!(
        r#"<soapenv:Envelope xmlns:soapenv="{SOAP_ENV_NS}" xmlns:cis="{CIS_NS}" xmlns:bcs="{BCS_NS}">"#
    ));
    match auth {
        Some(header) => {
            x.open("soapenv:Header");
            x.open("cis:Authentification");
            x.leaf("cis:user", &header.user);
            x.leaf("cis:signature", &header.signature);
            x.close("cis:Authentification");
            x.close("soapenv:Header");
        }
        None => x.raw("<soapenv:Header/>"),
    }
    x.open("soapenv:Body");
    write_body(&mut x);
    x.close("soapenv:Body");
    x.close("soapenv:Envelope");
    x.finish()
}

fn write_version(x: &mut XmlWriter, version: &crate::model::common::Version) {
    x.open("bcs:Version");
    x.leaf("majorRelease", &version.major_release);
    x.leaf("minorRelease", &version.minor_release);
    x.close("bcs:Version");
}

fn write_address(x: &mut XmlWriter, party: &Party) {
    x.open("Address");
    x.leaf("cis:streetName", &party.address.street_name);
    x.leaf("cis:streetNumber", &party.address.street_number);
    x.leaf("cis:zip", &party.address.zip);
    x.leaf("cis:city", &party.address.city);
    x.open("cis:Origin");
    x.leaf("cis:countryISOCode", &party.address.country_code);
    x.close("cis:Origin");
    x.close("Address");
}

fn write_shipment_order(x: &mut XmlWriter, order: &ShipmentOrder) {
    x.open("ShipmentOrder");
    x.leaf("sequenceNumber", &order.sequence_number);
    x.open("Shipment");

    x.open("ShipmentDetails");
    x.leaf("product", &order.shipment.product);
    x.leaf("cis:accountNumber", &order.shipment.account_number);
    if let Some(reference) = &order.shipment.customer_reference {
        x.leaf("customerReference", reference);
    }
    x.leaf("shipmentDate", &order.shipment.shipment_date);
    x.open("ShipmentItem");
    x.leaf("weightInKG", &order.shipment.weight_kg.to_string());
    x.close("ShipmentItem");
    x.close("ShipmentDetails");

    x.open("Shipper");
    x.open("Name");
    x.leaf("cis:name1", &order.shipper.name);
    x.close("Name");
    write_address(x, &order.shipper);
    x.close("Shipper");

    x.open("Receiver");
    x.leaf("cis:name1", &order.receiver.name);
    write_address(x, &order.receiver);
    x.close("Receiver");

    x.close("Shipment");
    x.close("ShipmentOrder");
}

pub(crate) fn create_shipment_order_request(
    auth: Option<&AuthHeader>,
    request: &CreateShipmentOrderRequest,
) -> String {
    envelope(auth, |x| {
        x.open("bcs:CreateShipmentOrderRequest");
        write_version(x, &request.version);
        for order in &request.shipment_orders {
            write_shipment_order(x, order);
        }
        if let Some(label_response_type) = request.label_response_type {
            x.leaf("bcs:labelResponseType", label_response_type.as_str());
        }
        x.close("bcs:CreateShipmentOrderRequest");
    })
}

pub(crate) fn delete_shipment_order_request(
    auth: Option<&AuthHeader>,
    request: &DeleteShipmentOrderRequest,
) -> String {
    envelope(auth, |x| {
        x.open("bcs:DeleteShipmentOrderRequest");
        write_version(x, &request.version);
        for shipment_number in &request.shipment_numbers {
            x.leaf("cis:shipmentNumber", shipment_number);
        }
        x.close("bcs:DeleteShipmentOrderRequest");
    })
}

pub(crate) fn validate_shipment_request(
    auth: Option<&AuthHeader>,
    request: &ValidateShipmentOrderRequest,
) -> String {
    envelope(auth, |x| {
        x.open("bcs:ValidateShipmentOrderRequest");
        write_version(x, &request.version);
        for order in &request.shipment_orders {
            write_shipment_order(x, order);
        }
        x.close("bcs:ValidateShipmentOrderRequest");
    })
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// One element of the parsed response, attributes ignored, children in
/// document order.
#[derive(Debug, Default)]
struct XmlNode {
    name: String,
    text: String,
    children: Vec<XmlNode>,
}

impl XmlNode {
    fn named(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    fn child(&self, local: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == local)
    }

    fn children_named<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |c| c.name == local)
    }

    /// Text content of the first child with the given local name; `None`
    /// for absent or empty elements.
    fn text_of(&self, local: &str) -> Option<&str> {
        self.child(local)
            .map(|c| c.text.as_str())
            .filter(|t| !t.is_empty())
    }
}

fn local_name(name: QName<'_>) -> String {
    String::from_utf8_lossy(name.local_name().as_ref()).into_owned()
}

fn parse_document(xml: &str) -> Result<XmlNode, Fault> {
    let mut reader = Reader::from_str(xml);
    let mut stack = vec![XmlNode::named("#document".to_string())];

    loop {
        match reader
            .read_event()
            .map_err(|e| Fault::Envelope(e.to_string()))?
        {
            Event::Start(start) => stack.push(XmlNode::named(local_name(start.name()))),
            Event::Empty(empty) => {
                let node = XmlNode::named(local_name(empty.name()));
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(node);
                }
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| Fault::Envelope(e.to_string()))?;
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(text.trim());
                }
            }
            Event::CData(cdata) => {
                let text = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(text.trim());
                }
            }
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| Fault::Envelope("unbalanced element nesting".to_string()))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => return Err(Fault::Envelope("unbalanced element nesting".to_string())),
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    match (stack.pop(), stack.is_empty()) {
        (Some(root), true) => Ok(root),
        _ => Err(Fault::Envelope("truncated document".to_string())),
    }
}

fn response_element<'a>(root: &'a XmlNode, name: &str) -> Result<&'a XmlNode, Fault> {
    root.child("Envelope")
        .and_then(|envelope| envelope.child("Body"))
        .and_then(|body| body.child(name))
        .ok_or_else(|| Fault::Envelope(format!("missing {name} element")))
}

fn parse_status(node: Option<&XmlNode>) -> Result<StatusInformation, Fault> {
    let node = node.ok_or_else(|| Fault::Envelope("missing Status element".to_string()))?;
    let code = node
        .text_of("statusCode")
        .ok_or_else(|| Fault::Envelope("missing statusCode".to_string()))?
        .parse::<u32>()
        .map_err(|_| Fault::Envelope("non-numeric statusCode".to_string()))?;
    let text = node.text_of("statusText").unwrap_or_default().to_string();
    let messages = node
        .children_named("statusMessage")
        .map(|m| m.text.clone())
        .filter(|m| !m.is_empty())
        .collect();

    Ok(StatusInformation {
        code,
        text,
        messages,
    })
}

/// Extracts `(faultcode, faultstring)` if the body is a SOAP fault.
pub(crate) fn parse_fault(xml: &str) -> Option<(String, String)> {
    let root = parse_document(xml).ok()?;
    let fault = root.child("Envelope")?.child("Body")?.child("Fault")?;
    let code = fault.text_of("faultcode").unwrap_or_default().to_string();
    let message = fault.text_of("faultstring").unwrap_or_default().to_string();
    Some((code, message))
}

pub(crate) fn parse_create_response(xml: &str) -> Result<CreateShipmentOrderResponse, Fault> {
    let root = parse_document(xml)?;
    let response = response_element(&root, "CreateShipmentOrderResponse")?;
    let status = parse_status(response.child("Status"))?;

    let mut creation_states = Vec::new();
    for state in response.children_named("CreationState") {
        let label_data = state
            .child("LabelData")
            .ok_or_else(|| Fault::Envelope("CreationState without LabelData".to_string()))?;
        creation_states.push(CreationState {
            sequence_number: state.text_of("sequenceNumber").unwrap_or_default().to_string(),
            label_data: LabelData {
                status: parse_status(label_data.child("Status"))?,
                shipment_number: label_data.text_of("shipmentNumber").map(str::to_string),
                shipment_label: label_data.text_of("labelData").map(str::to_string),
                return_label: label_data.text_of("returnLabelData").map(str::to_string),
                export_label: label_data.text_of("exportLabelData").map(str::to_string),
                cod_label: label_data.text_of("codLabelData").map(str::to_string),
            },
        });
    }

    Ok(CreateShipmentOrderResponse {
        status,
        creation_states,
    })
}

pub(crate) fn parse_delete_response(xml: &str) -> Result<DeleteShipmentOrderResponse, Fault> {
    let root = parse_document(xml)?;
    let response = response_element(&root, "DeleteShipmentOrderResponse")?;
    let status = parse_status(response.child("Status"))?;

    let mut deletion_states = Vec::new();
    for state in response.children_named("DeletionState") {
        deletion_states.push(DeletionState {
            shipment_number: state
                .text_of("shipmentNumber")
                .unwrap_or_default()
                .to_string(),
            status: parse_status(state.child("Status"))?,
        });
    }

    Ok(DeleteShipmentOrderResponse {
        status,
        deletion_states,
    })
}

pub(crate) fn parse_validate_response(xml: &str) -> Result<ValidateShipmentResponse, Fault> {
    let root = parse_document(xml)?;
    let response = response_element(&root, "ValidateShipmentResponse")?;
    let status = parse_status(response.child("Status"))?;

    let mut validation_states = Vec::new();
    for state in response.children_named("ValidationState") {
        validation_states.push(ValidationState {
            sequence_number: state.text_of("sequenceNumber").unwrap_or_default().to_string(),
            status: parse_status(state.child("Status"))?,
        });
    }

    Ok(ValidateShipmentResponse {
        status,
        validation_states,
    })
}
