//! Fuzz target: command batch deserialization.
//!
//! Arbitrary bytes through the JSON batch parser: parsing may fail but must
//! never panic, and a parsed batch must survive the translation tables.
//!
//! cargo fuzz run fuzz_batch_parse

#![no_main]

use fishctl::batch::{resolve_action, translate_device, CommandBatch};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(batch) = serde_json::from_str::<CommandBatch>(text) {
        for cmd in &batch.cmds {
            let _ = translate_device(&cmd.dev);
            let _ = resolve_action(&cmd.act);
        }
    }
});
