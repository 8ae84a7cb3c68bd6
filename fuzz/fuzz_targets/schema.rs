#![no_main]

use libfuzzer_sys::fuzz_target;
use terragen::frontend::{SchemaDocument, build_graph, disambiguate};

fuzz_target!(|data: &[u8]| {
    // Fuzz the document parser
    if let Ok(document) = SchemaDocument::from_slice(data) {
        // If parsing succeeds, fuzz graph building and disambiguation per entity
        for provider in document.provider_schemas.values() {
            let blocks = std::iter::once(&provider.provider.block)
                .chain(provider.resource_schemas.values().map(|entry| &entry.block))
                .chain(provider.data_source_schemas.values().map(|entry| &entry.block));
            for block in blocks {
                if let Ok(mut graph) = build_graph(block) {
                    let _ = disambiguate(&mut graph);
                }
            }
        }
    }
});
