#![no_main]
use libfuzzer_sys::fuzz_target;

use symex::Evaluator;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(expr) = Evaluator::create(s) {
            for name in expr.var_names() {
                if let Ok(mut deri) = expr.derivative(name) {
                    let mut buffer = vec![0u8; deri.calculate_length()];
                    let _ = deri.write(&mut buffer);
                    let _ = deri.evaluate_x_y_z(0.5, 1.5, 2.5);
                }
            }
        }
    }
});
