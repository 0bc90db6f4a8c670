#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    if let Ok(schema) = dependency_container::parse(&s) {
        let _ = dependency_container::validate(&schema);
        let once = dependency_container::normalize(schema);
        let twice = dependency_container::normalize(once.clone());
        assert_eq!(once, twice, "normalize must be idempotent");
        let _ = dependency_container::build_fields(&once);
    }
});
