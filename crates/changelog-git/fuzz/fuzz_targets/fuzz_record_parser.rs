// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for the commit record parser
//!
//! Feeds arbitrary bytes through `RecordParser`, which must report bad
//! input as errors and never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;

use changelog_git::RecordParser;

fuzz_target!(|data: &[u8]| {
    for record in RecordParser::from_reader(data) {
        let _ = std::hint::black_box(record);
    }
});
