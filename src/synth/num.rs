//! Integer and number generators.
//!
//! `number` nodes are routed through the same path as `integer` nodes;
//! fractional output only appears behind the `float`/`double` formats.
//! That mirrors the system this replaces and is kept on purpose.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde_json::Value;

use crate::schema::NumS;

// Format-scaled default ranges when the node carries no explicit bounds.
// A format-less node draws at int64 width.
const INT32_DEFAULT_MIN: f64 = 100_000.0;
const INT32_DEFAULT_MAX: f64 = 9_000_000.0;
const INT64_DEFAULT_MIN: f64 = 10_000_000_000.0;
const INT64_DEFAULT_MAX: f64 = 500_000_000_000.0;

/// Precedence: literal `example` > `enum` > format-scaled draw > generic.
pub(crate) fn integer_example(rng: &mut dyn RngCore, spec: &NumS) -> Option<Value> {
    if let Some(example) = &spec.example {
        return Some(example.clone());
    }
    if !spec.enum_.is_empty() {
        return spec.enum_.choose(rng).cloned();
    }
    match spec.format.as_deref() {
        Some("int32") => Some(scaled_integer(rng, spec, INT32_DEFAULT_MIN, INT32_DEFAULT_MAX)),
        Some("int64") => Some(scaled_integer(rng, spec, INT64_DEFAULT_MIN, INT64_DEFAULT_MAX)),
        Some("float") | Some("double") => Some(Value::from(rng.gen_range(0.0..1.0))),
        // no format, or one we do not scale for: int64-width draw, still
        // honoring explicit bounds and `multipleOf`
        _ => Some(scaled_integer(rng, spec, INT64_DEFAULT_MIN, INT64_DEFAULT_MAX)),
    }
}

/// Draw in the `multipleOf`-divided range, then multiply back, so the result
/// is an exact multiple while still honoring `minimum`/`maximum`.
///
/// Only explicit bounds are divided by the step; the format defaults are
/// used as-is, so a bare `multipleOf` widens the effective range by the
/// step factor.
fn scaled_integer(rng: &mut dyn RngCore, spec: &NumS, default_min: f64, default_max: f64) -> Value {
    let step = spec.multiple_of.filter(|m| *m != 0.0).unwrap_or(1.0);
    let mut lo = spec.minimum.map_or(default_min, |m| m / step).round() as i64;
    let mut hi = spec.maximum.map_or(default_max, |m| m / step).round() as i64;
    if hi < lo {
        std::mem::swap(&mut lo, &mut hi);
    }
    let drawn = rng.gen_range(lo..=hi) as f64 * step;
    if drawn.fract() == 0.0 {
        Value::from(drawn as i64)
    } else {
        Value::from(drawn)
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::NumS;
    use serde_json::json;

    fn rng() -> rand::rngs::ThreadRng {
        rand::thread_rng()
    }

    #[test]
    fn example_wins_over_enum_and_format() {
        let spec = NumS {
            example: Some(json!(42)),
            enum_: vec![json!(1), json!(2)],
            format: Some("int64".into()),
            ..NumS::default()
        };
        assert_eq!(integer_example(&mut rng(), &spec), Some(json!(42)));
    }

    #[test]
    fn enum_member_is_picked() {
        let spec = NumS { enum_: vec![json!(7), json!(11)], ..NumS::default() };
        for _ in 0..16 {
            let v = integer_example(&mut rng(), &spec).unwrap();
            assert!(v == json!(7) || v == json!(11));
        }
    }

    #[test]
    fn int32_draw_respects_explicit_bounds() {
        let spec = NumS {
            format: Some("int32".into()),
            minimum: Some(10.0),
            maximum: Some(20.0),
            ..NumS::default()
        };
        for _ in 0..32 {
            let v = integer_example(&mut rng(), &spec).unwrap();
            let n = v.as_i64().unwrap();
            assert!((10..=20).contains(&n), "{n} outside [10, 20]");
        }
    }

    #[test]
    fn int64_default_range_is_format_scaled() {
        let spec = NumS { format: Some("int64".into()), ..NumS::default() };
        for _ in 0..8 {
            let n = integer_example(&mut rng(), &spec).unwrap().as_i64().unwrap();
            assert!((10_000_000_000..=500_000_000_000).contains(&n));
        }
    }

    #[test]
    fn multiple_of_scales_the_draw() {
        let spec = NumS {
            format: Some("int32".into()),
            minimum: Some(0.0),
            maximum: Some(100.0),
            multiple_of: Some(5.0),
            ..NumS::default()
        };
        for _ in 0..32 {
            let n = integer_example(&mut rng(), &spec).unwrap().as_i64().unwrap();
            assert_eq!(n % 5, 0, "{n} is not a multiple of 5");
            assert!((0..=100).contains(&n));
        }
    }

    #[test]
    fn float_format_draws_a_fraction() {
        let spec = NumS { format: Some("double".into()), ..NumS::default() };
        let v = integer_example(&mut rng(), &spec).unwrap();
        let f = v.as_f64().unwrap();
        assert!((0.0..1.0).contains(&f));
    }

    #[test]
    fn formatless_draw_uses_int64_defaults() {
        let spec = NumS::default();
        for _ in 0..16 {
            let n = integer_example(&mut rng(), &spec).unwrap().as_i64().unwrap();
            assert!((10_000_000_000..=500_000_000_000).contains(&n));
        }
    }

    #[test]
    fn formatless_draw_honors_explicit_bounds() {
        let spec = NumS { minimum: Some(10.0), maximum: Some(20.0), ..NumS::default() };
        for _ in 0..64 {
            let n = integer_example(&mut rng(), &spec).unwrap().as_i64().unwrap();
            assert!((10..=20).contains(&n), "{n} outside [10, 20]");
        }
    }

    #[test]
    fn formatless_draw_scales_by_multiple_of() {
        let spec = NumS {
            minimum: Some(0.0),
            maximum: Some(100.0),
            multiple_of: Some(5.0),
            ..NumS::default()
        };
        for _ in 0..32 {
            let n = integer_example(&mut rng(), &spec).unwrap().as_i64().unwrap();
            assert_eq!(n % 5, 0, "{n} is not a multiple of 5");
            assert!((0..=100).contains(&n));
        }
    }

    #[test]
    fn bare_multiple_of_widens_the_default_range() {
        let spec = NumS {
            format: Some("int32".into()),
            multiple_of: Some(3.0),
            ..NumS::default()
        };
        for _ in 0..16 {
            let n = integer_example(&mut rng(), &spec).unwrap().as_i64().unwrap();
            assert_eq!(n % 3, 0, "{n} is not a multiple of 3");
            assert!((300_000..=27_000_000).contains(&n));
        }
    }
}
