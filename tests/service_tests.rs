//! End-to-end tests against a faked carrier endpoint serving canned SOAP
//! responses.
//!
//! The service under test runs the full stack: request document
//! construction, the decorator chain, the blocking HTTP transport and
//! response parsing. `wiremock` plays the carrier; the tokio runtime is
//! only there to host it, the client itself stays blocking.

use frachtwerk::{
    Address, AuthenticationStorage, Error, Party, ShipmentDetails, ShipmentOrder, ShipmentService,
};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

const CREATE_SUCCESS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <bcs:CreateShipmentOrderResponse xmlns:bcs="http://dhl.de/webservices/businesscustomershipping/3.0">
      <Status><statusCode>0</statusCode><statusText>ok</statusText></Status>
      <CreationState>
        <sequenceNumber>1</sequenceNumber>
        <LabelData>
          <Status><statusCode>0</statusCode><statusText>ok</statusText></Status>
          <shipmentNumber>222201040078555111</shipmentNumber>
          <labelData>JVBERi0xLjQgbGFiZWwgb25l</labelData>
        </LabelData>
      </CreationState>
      <CreationState>
        <sequenceNumber>2</sequenceNumber>
        <LabelData>
          <Status><statusCode>0</statusCode><statusText>ok</statusText></Status>
          <shipmentNumber>222201040078555128</shipmentNumber>
          <labelData>JVBERi0xLjQgbGFiZWwgdHdv</labelData>
        </LabelData>
      </CreationState>
    </bcs:CreateShipmentOrderResponse>
  </soap:Body>
</soap:Envelope>"#;

const CREATE_PARTIAL_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <bcs:CreateShipmentOrderResponse xmlns:bcs="http://dhl.de/webservices/businesscustomershipping/3.0">
      <Status><statusCode>1101</statusCode><statusText>Hard validation error occured.</statusText></Status>
      <CreationState>
        <sequenceNumber>1</sequenceNumber>
        <LabelData>
          <Status><statusCode>0</statusCode><statusText>ok</statusText></Status>
          <shipmentNumber>222201040078555111</shipmentNumber>
          <labelData>JVBERi0xLjQgbGFiZWwgb25l</labelData>
        </LabelData>
      </CreationState>
      <CreationState>
        <sequenceNumber>2</sequenceNumber>
        <LabelData>
          <Status>
            <statusCode>1101</statusCode>
            <statusText>Hard validation error occured.</statusText>
            <statusMessage>The shipment date must not be in the past.</statusMessage>
          </Status>
        </LabelData>
      </CreationState>
      <CreationState>
        <sequenceNumber>3</sequenceNumber>
        <LabelData>
          <Status><statusCode>0</statusCode><statusText>ok</statusText></Status>
          <shipmentNumber>222201040078555135</shipmentNumber>
          <labelData>JVBERi0xLjQgbGFiZWwgdGhyZWU=</labelData>
        </LabelData>
      </CreationState>
    </bcs:CreateShipmentOrderResponse>
  </soap:Body>
</soap:Envelope>"#;

const VALIDATE_ALL_FAILED_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <bcs:ValidateShipmentResponse xmlns:bcs="http://dhl.de/webservices/businesscustomershipping/3.0">
      <Status>
        <statusCode>1101</statusCode>
        <statusText>Hard validation error occured.</statusText>
      </Status>
      <ValidationState>
        <sequenceNumber>1</sequenceNumber>
        <Status>
          <statusCode>1101</statusCode>
          <statusText>Hard validation error occured.</statusText>
          <statusMessage>The shipment date must not be in the past.</statusMessage>
        </Status>
      </ValidationState>
      <ValidationState>
        <sequenceNumber>2</sequenceNumber>
        <Status>
          <statusCode>1101</statusCode>
          <statusText>Hard validation error occured.</statusText>
          <statusMessage>Invalid postal code.</statusMessage>
        </Status>
      </ValidationState>
    </bcs:ValidateShipmentResponse>
  </soap:Body>
</soap:Envelope>"#;

const VALIDATE_MIXED_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <bcs:ValidateShipmentResponse xmlns:bcs="http://dhl.de/webservices/businesscustomershipping/3.0">
      <Status><statusCode>0</statusCode><statusText>ok</statusText></Status>
      <ValidationState>
        <sequenceNumber>1</sequenceNumber>
        <Status><statusCode>0</statusCode><statusText>ok</statusText></Status>
      </ValidationState>
      <ValidationState>
        <sequenceNumber>2</sequenceNumber>
        <Status>
          <statusCode>1101</statusCode>
          <statusText>Hard validation error occured.</statusText>
          <statusMessage>Invalid postal code.</statusMessage>
        </Status>
      </ValidationState>
    </bcs:ValidateShipmentResponse>
  </soap:Body>
</soap:Envelope>"#;

const DELETE_PARTIAL_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <bcs:DeleteShipmentOrderResponse xmlns:bcs="http://dhl.de/webservices/businesscustomershipping/3.0">
      <Status><statusCode>0</statusCode><statusText>ok</statusText></Status>
      <DeletionState>
        <shipmentNumber>222201040078555111</shipmentNumber>
        <Status><statusCode>0</statusCode><statusText>ok</statusText></Status>
      </DeletionState>
      <DeletionState>
        <shipmentNumber>222201040078555128</shipmentNumber>
        <Status><statusCode>2000</statusCode><statusText>Unknown shipment number.</statusText></Status>
      </DeletionState>
    </bcs:DeleteShipmentOrderResponse>
  </soap:Body>
</soap:Envelope>"#;

const SERVER_FAULT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <soap:Fault>
      <faultcode>soap:Server</faultcode>
      <faultstring>INVALID_CONFIGURATION</faultstring>
    </soap:Fault>
  </soap:Body>
</soap:Envelope>"#;

/// A faked carrier endpoint. Keeps the tokio runtime alive for as long as
/// the server is in use; the client under test calls it blocking.
struct MockCarrier {
    server: MockServer,
    rt: tokio::runtime::Runtime,
}

impl MockCarrier {
    fn respond_with(template: ResponseTemplate) -> Self {
        let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
        let server = rt.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(template)
                .mount(&server)
                .await;
            server
        });

        Self { server, rt }
    }

    fn service(&self) -> ShipmentService {
        ShipmentService::builder()
            .endpoint(self.server.uri())
            .expect("mock server URI")
            .credentials(AuthenticationStorage::new(
                "test_app",
                "test_token",
                "2222222222_01",
                "pass",
            ))
            .build()
            .expect("service")
    }

    fn received_body(&self) -> String {
        self.rt.block_on(async {
            let requests = self
                .server
                .received_requests()
                .await
                .expect("request recording enabled");
            String::from_utf8_lossy(&requests[0].body).into_owned()
        })
    }

    fn received_header(&self, name: &str) -> Option<String> {
        self.rt.block_on(async {
            let requests = self
                .server
                .received_requests()
                .await
                .expect("request recording enabled");
            requests[0]
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        })
    }
}

fn order(sequence_number: &str) -> ShipmentOrder {
    ShipmentOrder {
        sequence_number: sequence_number.to_string(),
        shipment: ShipmentDetails {
            product: "V01PAK".to_string(),
            account_number: "22222222220101".to_string(),
            shipment_date: "2026-08-10".to_string(),
            customer_reference: None,
            weight_kg: 1.5,
        },
        shipper: Party {
            name: "Warehouse One".to_string(),
            address: Address {
                street_name: "Nonnenstraße".to_string(),
                street_number: "11d".to_string(),
                zip: "04229".to_string(),
                city: "Leipzig".to_string(),
                country_code: "DE".to_string(),
            },
        },
        receiver: Party {
            name: "Jane Doe".to_string(),
            address: Address {
                street_name: "Charles-de-Gaulle-Straße".to_string(),
                street_number: "20".to_string(),
                zip: "53113".to_string(),
                city: "Bonn".to_string(),
                country_code: "DE".to_string(),
            },
        },
    }
}

#[test]
fn create_shipments_maps_every_accepted_item() {
    let carrier =
        MockCarrier::respond_with(ResponseTemplate::new(200).set_body_string(CREATE_SUCCESS_XML));

    let shipments = carrier
        .service()
        .create_shipments(vec![order("1"), order("2")])
        .expect("both items accepted");

    assert_eq!(shipments.len(), 2);
    assert_eq!(shipments[0].sequence_number, "1");
    assert_eq!(shipments[0].shipment_number, "222201040078555111");
    assert_eq!(shipments[1].sequence_number, "2");
    assert!(shipments.iter().all(|s| s.shipment_label.is_some()));
}

#[test]
fn outgoing_request_is_authenticated_on_both_levels() {
    let carrier =
        MockCarrier::respond_with(ResponseTemplate::new(200).set_body_string(CREATE_SUCCESS_XML));

    carrier
        .service()
        .create_shipments(vec![order("1")])
        .expect("accepted");

    // account level: SOAP auth header inside the envelope
    let body = carrier.received_body();
    assert!(body.contains("<cis:Authentification>"));
    assert!(body.contains("<cis:user>2222222222_01</cis:user>"));
    let header_at = body.find("<cis:Authentification>").expect("auth header");
    let body_at = body.find("<soapenv:Body>").expect("body element");
    assert!(header_at < body_at);

    // application level: HTTP basic auth
    let authorization = carrier.received_header("authorization").expect("basic auth");
    assert!(authorization.starts_with("Basic "));
    assert_eq!(
        carrier.received_header("soapaction").as_deref(),
        Some("urn:createShipmentOrder")
    );
}

#[test]
fn partially_rejected_create_returns_the_surviving_items_without_error() {
    let carrier =
        MockCarrier::respond_with(ResponseTemplate::new(200).set_body_string(CREATE_PARTIAL_XML));

    let shipments = carrier
        .service()
        .create_shipments(vec![order("1"), order("2"), order("3")])
        .expect("partial success stays in-band");

    let sequence_numbers: Vec<_> = shipments
        .iter()
        .map(|s| s.sequence_number.as_str())
        .collect();
    assert_eq!(sequence_numbers, vec!["1", "3"]);
}

#[test]
fn fully_rejected_validation_raises_a_detailed_service_error() {
    let carrier = MockCarrier::respond_with(
        ResponseTemplate::new(200).set_body_string(VALIDATE_ALL_FAILED_XML),
    );

    let error = carrier
        .service()
        .validate_shipments(vec![order("1"), order("2")])
        .expect_err("no item survived");

    match error {
        Error::DetailedService {
            code,
            message,
            details,
        } => {
            assert_eq!(code, 1101);
            assert_eq!(message, "Hard validation error occured.");
            assert!(details.contains(&"The shipment date must not be in the past.".to_string()));
            assert!(details.contains(&"Invalid postal code.".to_string()));
        }
        other => panic!("expected DetailedService, got {other:?}"),
    }
}

#[test]
fn mixed_validation_returns_one_state_per_item() {
    let carrier =
        MockCarrier::respond_with(ResponseTemplate::new(200).set_body_string(VALIDATE_MIXED_XML));

    let states = carrier
        .service()
        .validate_shipments(vec![order("1"), order("2")])
        .expect("mixed outcome stays in-band");

    assert_eq!(states.len(), 2);
    assert!(states[0].is_valid());
    assert!(!states[1].is_valid());
    assert_eq!(states[1].status.code, 1101);
}

#[test]
fn cancellation_returns_only_the_cancelled_numbers() {
    let carrier =
        MockCarrier::respond_with(ResponseTemplate::new(200).set_body_string(DELETE_PARTIAL_XML));

    let cancelled = carrier
        .service()
        .cancel_shipments(vec![
            "222201040078555111".to_string(),
            "222201040078555128".to_string(),
        ])
        .expect("partial cancellation is silent");

    assert_eq!(cancelled, vec!["222201040078555111".to_string()]);
}

#[test]
fn unauthorized_endpoint_raises_an_authentication_error() {
    let carrier =
        MockCarrier::respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"));

    let error = carrier
        .service()
        .create_shipments(vec![order("1")])
        .expect_err("credentials rejected");

    assert!(matches!(error, Error::Authentication { .. }));
}

#[test]
fn unclassified_server_error_raises_a_generic_service_error() {
    let carrier = MockCarrier::respond_with(
        ResponseTemplate::new(500).set_body_string("Internal Server Error"),
    );

    let error = carrier
        .service()
        .validate_shipments(vec![order("1")])
        .expect_err("no carrier code to classify");

    assert!(matches!(error, Error::Service { .. }));
    assert_eq!(error.code(), None);
}

#[test]
fn soap_fault_without_carrier_code_raises_a_generic_service_error() {
    let carrier =
        MockCarrier::respond_with(ResponseTemplate::new(500).set_body_string(SERVER_FAULT_XML));

    let error = carrier
        .service()
        .validate_shipments(vec![order("1")])
        .expect_err("server fault");

    assert!(matches!(error, Error::Service { .. }));
    assert!(error.to_string().contains("INVALID_CONFIGURATION"));
}
