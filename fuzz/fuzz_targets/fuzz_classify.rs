//! Fuzz target for query classification
//!
//! Feeds arbitrary strings through the rule table for a short-variant and a
//! structural dataset. Classification must never panic, and the rendered form
//! of any match must classify to the same kind.

#![no_main]

use ferro_resolve::dataset::DatasetContext;
use ferro_resolve::resolve::{classify, resolve_local, DEFAULT_WINDOW_RADIUS};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    if input.len() > 1000 {
        return;
    }

    for dataset in ["gnomad_r4", "gnomad_sv_r2_1", "gnomad_sv_r4"] {
        let ctx = DatasetContext::new(dataset);
        if let Some(id) = classify(input, &ctx) {
            let again = classify(&id.to_string(), &ctx).map(|again| again.kind());
            assert_eq!(again, Some(id.kind()), "{input:?} in {dataset}");
        }
        let _ = resolve_local(input, &ctx, DEFAULT_WINDOW_RADIUS);
    }
});
