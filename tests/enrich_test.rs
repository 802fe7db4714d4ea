//! Integration tests for operation enrichment.

use api_enrich::{
    enrich_item_response, enrich_or_passthrough, Enrichment, Method, OperationsConfig,
    ProviderError, Registry, ResolvedOperation, ResourceDescriptor, ResourceMetadata, SkipReason,
};
use serde_json::{json, Value};

fn registry() -> Registry {
    serde_json::from_value(json!({
        "app.Invoice": {
            "fields": [ { "name": "id" }, { "name": "number", "text": true } ],
            "descriptors": [
                {
                    "route_prefix": "/billing",
                    "operations": [
                        {
                            "method": "GET",
                            "uri_template": "/invoices{._format}",
                            "name": "_api_/billing/invoices{._format}_get_collection",
                            "short_name": "Invoice"
                        },
                        {
                            "method": "PATCH",
                            "uri_template": "/invoices/{id}{._format}",
                            "name": "_api_/billing/invoices/{id}{._format}_patch",
                            "short_name": "Invoice"
                        },
                        {
                            "method": "DELETE",
                            "uri_template": "/invoices/{id}{._format}",
                            "name": "_api_/billing/invoices/{id}{._format}_delete",
                            "short_name": "Invoice"
                        }
                    ]
                },
                {
                    "route_prefix": "",
                    "operations": [
                        {
                            "method": "POST",
                            "uri_template": "/invoices/{id}/send",
                            "name": "invoice_send",
                            "description": "Send the invoice by mail",
                            "short_name": "Invoice"
                        }
                    ]
                }
            ]
        }
    }))
    .unwrap()
}

fn get_item() -> ResolvedOperation {
    ResolvedOperation {
        method: Method::Get,
        uri_template: "/invoices/{id}{._format}".into(),
        resource_type: "app.Invoice".into(),
    }
}

fn invoice_body() -> String {
    json!({
        "@context": "/api/contexts/Invoice",
        "@id": "/api/billing/invoices/7",
        "@type": "Invoice",
        "id": 7,
        "number": "INV-0007"
    })
    .to_string()
}

fn enriched_value(body: &str) -> Value {
    let result = enrich_item_response(
        Some(&get_item()),
        Some("application/ld+json; charset=utf-8"),
        body,
        &registry(),
        &OperationsConfig::default(),
    )
    .unwrap();

    match result {
        Enrichment::Enriched(enriched) => serde_json::from_str(&enriched).unwrap(),
        Enrichment::Skipped(reason) => panic!("expected enrichment, skipped: {reason}"),
    }
}

mod item_responses {
    use super::*;

    #[test]
    fn patch_and_delete_item_operations_yield_two_entries() {
        let registry: Registry = serde_json::from_value(json!({
            "app.Invoice": {
                "descriptors": [
                    {
                        "operations": [
                            {
                                "method": "PATCH",
                                "uri_template": "/invoices/{id}",
                                "short_name": "Invoice"
                            },
                            {
                                "method": "DELETE",
                                "uri_template": "/invoices/{id}",
                                "short_name": "Invoice"
                            }
                        ]
                    }
                ]
            }
        }))
        .unwrap();

        let result = enrich_item_response(
            Some(&get_item()),
            Some("application/ld+json"),
            &invoice_body(),
            &registry,
            &OperationsConfig::default(),
        )
        .unwrap();

        let data: Value = match result {
            Enrichment::Enriched(body) => serde_json::from_str(&body).unwrap(),
            Enrichment::Skipped(reason) => panic!("expected enrichment, skipped: {reason}"),
        };
        let operations = data["hydra:operation"].as_array().unwrap();

        assert_eq!(operations.len(), 2);
        assert_eq!(operations[0]["expects"], "Invoice");
        assert!(operations[0].get("returns").is_none());
        assert_eq!(operations[1]["returns"], "owl:Nothing");
    }

    #[test]
    fn patch_and_delete_entries_follow_the_contract() {
        let data = enriched_value(&invoice_body());
        let operations = data["hydra:operation"].as_array().unwrap();

        // collection GET excluded; PATCH, DELETE, and the custom POST remain
        assert_eq!(operations.len(), 3);

        let patch = &operations[0];
        assert_eq!(patch["@id"], "/api/billing/invoices/7");
        assert_eq!(patch["@type"], "hydra:Operation");
        assert_eq!(patch["method"], "PATCH");
        assert_eq!(patch["title"], "Updates the Invoice resource");
        assert_eq!(patch["expects"], "Invoice");
        assert!(patch.get("returns").is_none());

        let delete = &operations[1];
        assert_eq!(delete["method"], "DELETE");
        assert_eq!(delete["returns"], "owl:Nothing");
        assert!(delete.get("expects").is_none());
    }

    #[test]
    fn descriptors_contribute_in_configuration_order() {
        let data = enriched_value(&invoice_body());
        let operations = data["hydra:operation"].as_array().unwrap();

        let custom = &operations[2];
        assert_eq!(custom["@id"], "/api/invoices/7/send");
        assert_eq!(custom["method"], "POST");
        assert_eq!(custom["title"], "Send the invoice by mail");
        assert_eq!(custom["expects"], "Invoice");
    }

    #[test]
    fn identifier_from_iri_when_id_field_missing() {
        let body = json!({
            "@id": "/api/billing/invoices/41",
            "@type": "Invoice"
        })
        .to_string();
        let data = enriched_value(&body);
        assert_eq!(
            data["hydra:operation"][0]["@id"],
            "/api/billing/invoices/41"
        );
    }

    #[test]
    fn original_payload_fields_are_preserved() {
        let data = enriched_value(&invoice_body());
        assert_eq!(data["@context"], "/api/contexts/Invoice");
        assert_eq!(data["number"], "INV-0007");
    }
}

mod preconditions {
    use super::*;

    fn skip_of(result: Enrichment) -> SkipReason {
        match result {
            Enrichment::Skipped(reason) => reason,
            Enrichment::Enriched(_) => panic!("expected a skip"),
        }
    }

    #[test]
    fn collection_get_is_unmodified() {
        let operation = ResolvedOperation {
            method: Method::Get,
            uri_template: "/invoices{._format}".into(),
            resource_type: "app.Invoice".into(),
        };
        let result = enrich_item_response(
            Some(&operation),
            Some("application/ld+json"),
            &invoice_body(),
            &registry(),
            &OperationsConfig::default(),
        )
        .unwrap();
        assert_eq!(skip_of(result), SkipReason::NotItemOperation);
    }

    #[test]
    fn plain_json_content_type_is_unmodified() {
        let result = enrich_item_response(
            Some(&get_item()),
            Some("application/json"),
            &invoice_body(),
            &registry(),
            &OperationsConfig::default(),
        )
        .unwrap();
        assert_eq!(skip_of(result), SkipReason::NotJsonLd);
    }

    #[test]
    fn type_without_item_operations_is_unmodified() {
        let registry: Registry = serde_json::from_value(json!({
            "app.Invoice": {
                "descriptors": [
                    {
                        "operations": [
                            {
                                "method": "GET",
                                "uri_template": "/invoices",
                                "short_name": "Invoice"
                            }
                        ]
                    }
                ]
            }
        }))
        .unwrap();

        let result = enrich_item_response(
            Some(&get_item()),
            Some("application/ld+json"),
            &invoice_body(),
            &registry,
            &OperationsConfig::default(),
        )
        .unwrap();
        assert_eq!(skip_of(result), SkipReason::NoItemOperations);
    }
}

mod idempotence {
    use super::*;

    #[test]
    fn second_run_does_not_duplicate_operations() {
        let first = match enrich_item_response(
            Some(&get_item()),
            Some("application/ld+json"),
            &invoice_body(),
            &registry(),
            &OperationsConfig::default(),
        )
        .unwrap()
        {
            Enrichment::Enriched(body) => body,
            other => panic!("expected enrichment, got {other:?}"),
        };

        let second = match enrich_item_response(
            Some(&get_item()),
            Some("application/ld+json"),
            &first,
            &registry(),
            &OperationsConfig::default(),
        )
        .unwrap()
        {
            Enrichment::Enriched(body) => body,
            other => panic!("expected enrichment, got {other:?}"),
        };

        assert_eq!(first, second);

        let data: Value = serde_json::from_str(&second).unwrap();
        assert_eq!(data["hydra:operation"].as_array().unwrap().len(), 3);
    }
}

mod pass_through_boundary {
    use super::*;

    /// Metadata provider whose backend fails on every lookup.
    struct Broken;

    impl ResourceMetadata for Broken {
        fn describe(&self, type_id: &str) -> Result<Vec<ResourceDescriptor>, ProviderError> {
            Err(ProviderError::new(type_id, "metadata backend down"))
        }
    }

    #[test]
    fn provider_failure_surfaces_as_typed_error() {
        let result = enrich_item_response(
            Some(&get_item()),
            Some("application/ld+json"),
            &invoice_body(),
            &Broken,
            &OperationsConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn passthrough_returns_original_body_on_failure() {
        let body = invoice_body();
        let result = enrich_or_passthrough(
            Some(&get_item()),
            Some("application/ld+json"),
            &body,
            &Broken,
            &OperationsConfig::default(),
        );
        assert_eq!(result, body);
    }

    #[test]
    fn passthrough_returns_original_body_on_skip() {
        let body = invoice_body();
        let result = enrich_or_passthrough(
            None,
            Some("application/ld+json"),
            &body,
            &registry(),
            &OperationsConfig::default(),
        );
        assert_eq!(result, body);
    }
}
