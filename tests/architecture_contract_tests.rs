//! Architecture contract tests.

mod support;

use support::architecture::find_lines_containing;

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = find_lines_containing(
        "src/domain",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::application",
            "crate::port",
            "tokio::",
            "reqwest::",
        ],
    );

    assert!(hits.is_empty(), "found forbidden imports in domain layer: {hits:#?}");
}

#[test]
fn ports_depend_only_on_domain_and_errors() {
    let hits = find_lines_containing(
        "src/port",
        &["crate::adapter", "crate::infrastructure", "crate::application", "reqwest::"],
    );

    assert!(hits.is_empty(), "found outer-layer imports in ports: {hits:#?}");
}

#[test]
fn application_layer_has_no_direct_adapter_imports() {
    let hits = find_lines_containing("src/application", &["crate::adapter::"]);

    assert!(hits.is_empty(), "application layer should not import adapters directly: {hits:#?}");
}

#[test]
fn venue_http_stays_in_outbound_adapters() {
    let hits = find_lines_containing("src/application", &["reqwest::", "hmac::"]);

    assert!(hits.is_empty(), "HTTP and signing belong in outbound adapters: {hits:#?}");
}
