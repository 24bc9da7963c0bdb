#![no_main]
use libfuzzer_sys::fuzz_target;

use symex::Evaluator;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(expr) = Evaluator::create(s) {
            let printed = expr.to_string();
            assert_eq!(printed.len(), expr.calculate_length());
            let reparsed = Evaluator::create(&printed);
            assert!(reparsed.is_ok(), "could not re-parse {printed}");
        }
    }
});
