#[cfg(test)]
fn assert_float_eq<T: num::Float + std::fmt::Display>(f1: T, f2: T, atol: T, rtol: T) {
    if (f1 - f2).abs() >= atol + rtol * f2.abs() {
        println!("Floats not almost equal.\nf1: {}\nf2: {}\n", f1, f2);
        assert!(false);
    }
}
#[cfg(test)]
pub fn assert_float_eq_f64(f1: f64, f2: f64) {
    assert_float_eq(f1, f2, 1e-12, 1e-12);
}
/// Compares two evaluation results where both sides being `NaN` counts as equal.
#[cfg(test)]
pub fn assert_same_value(f1: f64, f2: f64) {
    if f1.is_nan() || f2.is_nan() {
        assert!(f1.is_nan() && f2.is_nan(), "{} vs {}", f1, f2);
    } else if f1.is_infinite() || f2.is_infinite() {
        assert_eq!(f1, f2);
    } else {
        assert_float_eq(f1, f2, 1e-10, 1e-10);
    }
}
