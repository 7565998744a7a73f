#![no_main]

use libfuzzer_sys::fuzz_target;
use pubmed_affiliations::classifier::AffiliationClassifier;
use pubmed_affiliations::extract::parse_papers;

fuzz_target!(|data: &[u8]| {
    // Should never panic, only return Ok or Err
    if let Ok(xml) = std::str::from_utf8(data) {
        if let Ok(papers) = parse_papers(xml, &AffiliationClassifier::default()) {
            for paper in papers {
                assert_eq!(paper.non_academic_authors().len(), paper.company_affiliations().len());
            }
        }
    }
});
