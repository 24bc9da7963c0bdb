use std::fmt;

use serde::{de, de::Visitor, Deserialize, Deserializer, Serialize, Serializer};

use crate::Evaluator;

impl Serialize for Evaluator {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

impl<'de> Deserialize<'de> for Evaluator {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(EvaluatorVisitor)
    }
}

#[derive(Debug)]
struct EvaluatorVisitor;

impl<'de> Visitor<'de> for EvaluatorVisitor {
    type Value = Evaluator;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a str that can be parsed by `symex` crate")
    }

    fn visit_str<E>(self, unparsed: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Evaluator::create(unparsed).map_err(|err| E::custom(err.to_string()))
    }
}

#[cfg(test)]
use serde_test::Token;

#[test]
fn test_ser_de() {
    let test_inner = |expr: Evaluator, s: &str| {
        serde_test::assert_ser_tokens(&expr, &[Token::Str(s)]);
        let serialized = serde_json::to_string(&expr).unwrap();
        let deserialized = serde_json::from_str::<Evaluator>(serialized.as_str()).unwrap();
        assert_eq!(s, format!("{}", deserialized));
    };

    let test = |s: &str, s_unparsed: &str, s_dy: &str| {
        let expr = Evaluator::create(s).unwrap();
        test_inner(expr.clone(), s_unparsed);
        let dexpr_dy = expr.derivative_y().unwrap();
        test_inner(dexpr_dy, s_dy);
    };

    test("x+y*2", "x+y*2", "2");
    test("x+sin(2*y)", "x+sin(2*y)", "cos(2*y)*2");
    test("1/x+cos(y)*2", "1/x+cos(y)*2", "0/x^2+-sin(y)*2");
    test("y*x*2", "y*x*2", "x*2");
}

#[test]
fn test_de_error() {
    assert!(serde_json::from_str::<Evaluator>("\"1 + \"").is_err());
    assert!(serde_json::from_str::<Evaluator>("3").is_err());
}
