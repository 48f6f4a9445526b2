#![no_main]

use engagestat::config::AnalysisConfig;
use engagestat::table::Table;
use engagestat::{cohort, geo, validate};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Loading, validation and both pipelines must not panic on any text
        let table = Table::parse(input, ',');
        for record in table.records() {
            let _ = validate::validate(&record);
        }

        let config = AnalysisConfig::default();
        let _ = cohort::analyze(&table, &config);
        let _ = geo::analyze(&table, &config);
    }
});
