pub fn assert_float_eq<T: num::Float + std::fmt::Display>(
    f1: T,
    f2: T,
    atol: T,
    rtol: T,
    msg: &str,
) {
    println!("tol {}", atol + rtol * f2.abs());
    println!("d   {}", (f1 - f2).abs());
    if (f1 - f2).abs() >= atol + rtol * f2.abs() {
        println!("Floats not almost equal. {}\nf1: {}\nf2: {}\n", msg, f1, f2);
        unreachable!();
    }
}

#[allow(dead_code)]
pub fn assert_float_eq_f64(f1: f64, f2: f64) {
    assert_float_eq(f1, f2, 1e-12, 1e-12, "");
}

/// Equality of evaluation results where `NaN` equals `NaN`.
#[allow(dead_code)]
pub fn assert_same_value(f1: f64, f2: f64, msg: &str) {
    if f1.is_nan() || f2.is_nan() {
        assert!(f1.is_nan() && f2.is_nan(), "{} vs {}, {}", f1, f2, msg);
    } else if f1.is_infinite() || f2.is_infinite() {
        assert_eq!(f1, f2, "{}", msg);
    } else {
        assert_float_eq(f1, f2, 1e-9, 1e-9, msg);
    }
}
