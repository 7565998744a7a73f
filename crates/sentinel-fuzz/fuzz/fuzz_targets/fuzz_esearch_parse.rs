#![no_main]

use libfuzzer_sys::fuzz_target;
use pubmed_affiliations::extract::parse_id_list;

fuzz_target!(|data: &[u8]| {
    if let Ok(xml) = std::str::from_utf8(data) {
        let _ = parse_id_list(xml);
    }
});
