#![no_main]

use citegraph_core::validate::rejection;
use citegraph_core::{Record, parse_date_or_default};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };

    // Arbitrary text never panics as a date.
    let _ = parse_date_or_default(line);

    if let Ok(record) = Record::from_json_line(line) {
        let _ = parse_date_or_default(&record.creation_date);
        let _ = rejection(&record);

        // An accepted record re-serializes to an equivalent record.
        let json = serde_json::to_string(&record).expect("record serializes");
        let again = Record::from_json_line(&json).expect("round trip parses");
        assert_eq!(record, again);
    }
});
