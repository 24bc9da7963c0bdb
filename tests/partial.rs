mod utils;
use rand::{thread_rng, Rng};
use std::f64::consts::{E, PI};
use std::ops::Range;
use symex::{Evaluator, ExErrorKind, ExResult};
use utils::assert_float_eq;

#[test]
fn test_readme_partial() -> ExResult<()> {
    let expr = Evaluator::create("y*x^2")?;

    // d_x
    let dexpr_dx = expr.derivative("x")?;
    assert_eq!(format!("{}", dexpr_dx), "y*(2*x)");

    // d_xy
    let mut ddexpr_dxy = dexpr_dx.derivative("y")?;
    assert_eq!(format!("{}", ddexpr_dxy), "2*x");
    let result = ddexpr_dxy.evaluate(&["x", "y"], &[2.0, f64::MAX])?;
    assert!((result - 4.0).abs() < 1e-12);

    // d_xyx
    let mut dddexpr_dxyx = ddexpr_dxy.derivative("x")?;
    assert_eq!(format!("{}", dddexpr_dxyx), "2");
    let result = dddexpr_dxyx.evaluate(&["x", "y"], &[f64::MAX, f64::MAX])?;
    assert!((result - 2.0).abs() < 1e-12);

    // all in one
    let dddexpr_dxyx_iter = expr.derivative_iter(["x", "y", "x"])?;
    assert_eq!(format!("{}", dddexpr_dxyx_iter), "2");
    assert_eq!(dddexpr_dxyx_iter.var_names(), vec!["x", "y"]);
    Ok(())
}

#[test]
fn test_basic_values() -> ExResult<()> {
    let mut d = Evaluator::create("x^2")?.derivative_x()?;
    assert_float_eq(d.evaluate_x(3.0)?, 6.0, 1e-12, 0.0, "x^2");
    let mut d = Evaluator::create("sin(x)")?.derivative_x()?;
    assert_float_eq(d.evaluate_x(0.0)?, 1.0, 1e-12, 0.0, "sin");
    Ok(())
}

#[test]
fn test_derivatives() -> ExResult<()> {
    fn test(sut: &str, range: Range<f64>, reference: impl Fn(f64) -> f64) -> ExResult<()> {
        let mut rng = thread_rng();
        let expr = Evaluator::create(sut)?;
        let mut deri = expr.derivative_x()?;
        println!("{} -> {}", expr, deri);
        for _ in 0..5 {
            let x = rng.gen_range(range.clone());
            assert_float_eq(deri.evaluate_x(x)?, reference(x), 1e-10, 1e-10, sut);
        }
        Ok(())
    }
    test("x^3 - 2*x + 1", -5.0..5.0, |x| 3.0 * x * x - 2.0)?;
    test("1/x", 0.5..5.0, |x| -1.0 / (x * x))?;
    test("x*exp(x)", -2.0..2.0, |x| x.exp() + x * x.exp())?;
    test("log(x^2)", 0.5..5.0, |x| 2.0 / x)?;
    test("sqrt(x)", 0.5..5.0, |x| 0.5 / x.sqrt())?;
    test("sin(x)*cos(x)", -3.0..3.0, |x| (2.0 * x).cos())?;
    test("tan(x)", -1.0..1.0, |x| 1.0 / (x.cos() * x.cos()))?;
    test("-cos(2*x)", -3.0..3.0, |x| 2.0 * (2.0 * x).sin())?;
    test("asin(x)", -0.9..0.9, |x| 1.0 / (1.0 - x * x).sqrt())?;
    test("acos(x)", -0.9..0.9, |x| -1.0 / (1.0 - x * x).sqrt())?;
    test("atan(x)", -5.0..5.0, |x| 1.0 / (1.0 + x * x))?;
    test("sinh(x)", -2.0..2.0, |x| x.cosh())?;
    test("cosh(x)", -2.0..2.0, |x| x.sinh())?;
    test("tanh(x)", -2.0..2.0, |x| 1.0 / (x.cosh() * x.cosh()))?;
    test("asinh(x)", -2.0..2.0, |x| 1.0 / (x * x + 1.0).sqrt())?;
    test("acosh(x)", 1.5..4.0, |x| 1.0 / (x * x - 1.0).sqrt())?;
    test("atanh(x)", -0.9..0.9, |x| 1.0 / (1.0 - x * x))?;
    test("acoth(x)", 1.5..4.0, |x| 1.0 / (1.0 - x * x))?;
    test("x^(-0.5)", 0.5..4.0, |x| -0.5 * x.powf(-1.5))?;
    test("x^pi", 0.5..4.0, |x| PI * x.powf(PI - 1.0))?;
    test("sin(x)^e", 0.5..1.5, |x| E * x.sin().powf(E - 1.0) * x.cos())?;
    test("(x^2+1)/(x-3)", -2.0..2.0, |x| {
        (2.0 * x * (x - 3.0) - (x * x + 1.0)) / ((x - 3.0) * (x - 3.0))
    })?;
    test("y*x + pi*x", -2.0..2.0, |_| PI)?;
    Ok(())
}

#[test]
fn test_finite_differences() -> ExResult<()> {
    let h = 1e-6;
    let mut rng = thread_rng();
    for sut in [
        "sin(x^2)*exp(-x)",
        "sqrt(1+x^2)/cosh(x)",
        "cot(x)+sec(x)-csc(x)",
        "acot(x)*coth(x)",
        "sech(x)+csch(x)",
        "log(2+sin(x))^3",
    ] {
        let mut expr = Evaluator::create(sut)?;
        let mut deri = expr.derivative_x()?;
        for _ in 0..5 {
            let x = rng.gen_range(0.3..1.2);
            let reference = (expr.evaluate_x(x + h)? - expr.evaluate_x(x - h)?) / (2.0 * h);
            assert_float_eq(deri.evaluate_x(x)?, reference, 1e-5, 1e-5, sut);
        }
    }
    Ok(())
}

#[test]
fn test_nth() -> ExResult<()> {
    let expr = Evaluator::create("x^4 + y^4")?;
    let mut d_xx_nth = expr.derivative_nth("x", 2)?;
    let mut d_xx_2step = expr.derivative_x()?.derivative_x()?;
    assert_float_eq(
        d_xx_nth.evaluate_x_y(4.3, 2.1)?,
        d_xx_2step.evaluate_x_y(4.3, 2.1)?,
        1e-12,
        1e-12,
        "nth",
    );
    assert_float_eq(d_xx_nth.evaluate_x(2.0)?, 48.0, 1e-12, 0.0, "nth");
    let mut d_5 = expr.derivative_nth("x", 5)?;
    assert_eq!(d_5.evaluate_x(3.0)?, 0.0);
    Ok(())
}

#[test]
fn test_not_differentiable() -> ExResult<()> {
    for sut in [
        "abs(x)",
        "ceil(x) + x",
        "floor(2*x)",
        "x^x",
        "2^x",
        "x^y",
        "x < 1",
        "(x > 1) * x",
        "x && 1",
        "f(x)",
    ] {
        let mut expr = Evaluator::create(sut)?;
        let before = expr.to_string();
        let err = expr.derivative_x().unwrap_err();
        assert_eq!(err.kind, ExErrorKind::Differentiation, "{}", sut);
        // the failed derivative leaves the expression intact
        assert_eq!(expr.to_string(), before);
        if !sut.starts_with('f') {
            expr.evaluate_x(0.5)?;
        }
    }
    // constant parts are fine as long as they are not differentiated through
    let mut d = Evaluator::create("x + 2^3")?.derivative_x()?;
    assert_eq!(d.evaluate_x(1.0)?, 1.0);
    Ok(())
}

#[test]
fn test_structural() -> ExResult<()> {
    // names that are not the variable differentiate to zero
    let expr = Evaluator::create("a*x + b")?;
    assert_eq!(expr.derivative_x()?.to_string(), "a");
    assert_eq!(expr.derivative("a")?.to_string(), "x");
    assert_eq!(expr.derivative("q")?.to_string(), "0");
    assert_eq!(expr.derivative("pi")?.to_string(), "0");
    Ok(())
}
