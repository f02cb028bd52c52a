//! String generators: format-keyed branches, the name-inferred registry, and
//! the fixed-alphabet fallback.
//!
//! The name registry is an explicit tag → `fn` table built once
//! (`once_cell::sync::Lazy`), keyed by the snake-cased property or format
//! name. No dynamic lookup-by-name anywhere.

use std::collections::BTreeMap;

use chrono::Local;
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde_json::Value;

use crate::schema::StrS;

use super::{DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH};

// ------------------------------- Policy ---------------------------------- //

const MASKED_PASSWORD: &str = "********";
/// `duration` synthesizes a numeric seconds value; ten minutes, like the
/// system this replaces.
const DURATION_SECONDS: f64 = 600.0;
const FALLBACK_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

// ------------------------------ Word pools -------------------------------- //

const FIRST_NAMES: &[&str] = &[
    "ada", "grace", "alan", "edsger", "barbara", "donald", "radia", "linus",
];
const LAST_NAMES: &[&str] = &[
    "lovelace", "hopper", "turing", "dijkstra", "liskov", "knuth", "perlman",
];
const DOMAINS: &[&str] = &["example.com", "example.org", "mail.test", "inbox.dev"];
const WORDS: &[&str] = &[
    "alpha", "delta", "ember", "field", "grove", "haven", "index", "lumen", "north", "quartz",
];
const EXTENSIONS: &[&str] = &["txt", "json", "csv", "bin", "log"];
const CITIES: &[&str] = &["Lagos", "Oslo", "Kyoto", "Porto", "Quito", "Denver"];
const COUNTRIES: &[&str] = &["Norway", "Japan", "Ghana", "Chile", "Canada", "Portugal"];
const COMPANY_SUFFIXES: &[&str] = &["Labs", "Systems", "Works", "Group", "Industries"];

fn pick<'a>(rng: &mut dyn RngCore, pool: &'a [&'a str]) -> &'a str {
    pool.choose(rng).copied().unwrap_or("sample")
}

// --------------------------- Name registry -------------------------------- //

type NamedGen = fn(&mut dyn RngCore, usize, usize) -> Value;

/// Snake-cased tag → generator handle. Built once, consulted for both
/// unrecognized `format` names and property-name inference.
static NAMED_GENERATORS: Lazy<BTreeMap<&'static str, NamedGen>> = Lazy::new(|| {
    let mut table: BTreeMap<&'static str, NamedGen> = BTreeMap::new();
    table.insert("email", gen_email);
    table.insert("email_address", gen_email);
    table.insert("first_name", gen_first_name);
    table.insert("last_name", gen_last_name);
    table.insert("name", gen_full_name);
    table.insert("full_name", gen_full_name);
    table.insert("user_name", gen_user_name);
    table.insert("username", gen_user_name);
    table.insert("file_path", gen_file_path);
    table.insert("uri", gen_file_path);
    table.insert("url", gen_url);
    table.insert("phone_number", gen_phone_number);
    table.insert("city", gen_city);
    table.insert("country", gen_country);
    table.insert("company", gen_company);
    table.insert("password", gen_password);
    table.insert("uuid", gen_uuid);
    table.insert("uuid4", gen_uuid);
    table
});

// ------------------------------ Entry point ------------------------------- //

/// Precedence: literal `example` > `enum` > format branch > name-inferred
/// generator > fixed-alphabet fallback within the length bounds.
pub(crate) fn string_example(rng: &mut dyn RngCore, spec: &StrS, name: Option<&str>) -> Option<Value> {
    if let Some(example) = &spec.example {
        return Some(example.clone());
    }
    if !spec.enum_.is_empty() {
        return spec.enum_.choose(rng).cloned();
    }

    let (min, max) = length_bounds(spec);

    if let Some(format) = spec.format.as_deref() {
        match format {
            "date-time" => {
                return Some(Local::now().format("%Y-%m-%d %H:%M:%S").to_string().into());
            }
            "date" => return Some(Local::now().format("%Y-%m-%d").to_string().into()),
            "uri" => return Some(gen_file_path(rng, min, max)),
            "duration" => return Some(Value::from(DURATION_SECONDS)),
            "password" => return Some(Value::from(MASKED_PASSWORD)),
            "email" => return Some(gen_email(rng, min, max)),
            other => {
                if let Some(generate) = NAMED_GENERATORS.get(to_snake_case(other).as_str()) {
                    return Some(generate(rng, min, max));
                }
                // unrecognized format: fall through to name inference
            }
        }
    }

    if let Some(name) = name {
        if let Some(generate) = NAMED_GENERATORS.get(to_snake_case(name).as_str()) {
            return Some(generate(rng, min, max));
        }
    }

    Some(random_fixed_alphabet(rng, min, max))
}

/// Defaults [5, 25]; reconciled so the upper bound is never below the lower.
fn length_bounds(spec: &StrS) -> (usize, usize) {
    let min = spec.min_length.unwrap_or(DEFAULT_MIN_LENGTH);
    let mut max = spec.max_length.unwrap_or(DEFAULT_MAX_LENGTH);
    if max < min {
        max = min;
    }
    (min, max)
}

fn random_fixed_alphabet(rng: &mut dyn RngCore, min: usize, max: usize) -> Value {
    let len = rng.gen_range(min..=max);
    let s: String = (0..len)
        .map(|_| FALLBACK_ALPHABET[rng.gen_range(0..FALLBACK_ALPHABET.len())] as char)
        .collect();
    s.into()
}

/// Kebab and Camel/Pascal case both collapse to snake case.
pub(crate) fn to_snake_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    for c in text.chars() {
        if c == '-' {
            out.push('_');
        } else if c.is_ascii_uppercase() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

// ------------------------------ Generators -------------------------------- //

fn gen_email(rng: &mut dyn RngCore, _min: usize, _max: usize) -> Value {
    let first = pick(rng, FIRST_NAMES);
    let last = pick(rng, LAST_NAMES);
    let domain = pick(rng, DOMAINS);
    format!("{first}.{last}@{domain}").into()
}

fn gen_first_name(rng: &mut dyn RngCore, _min: usize, _max: usize) -> Value {
    capitalize(pick(rng, FIRST_NAMES)).into()
}

fn gen_last_name(rng: &mut dyn RngCore, _min: usize, _max: usize) -> Value {
    capitalize(pick(rng, LAST_NAMES)).into()
}

fn gen_full_name(rng: &mut dyn RngCore, min: usize, max: usize) -> Value {
    let first = gen_first_name(rng, min, max);
    let last = gen_last_name(rng, min, max);
    format!(
        "{} {}",
        first.as_str().unwrap_or_default(),
        last.as_str().unwrap_or_default()
    )
    .into()
}

fn gen_user_name(rng: &mut dyn RngCore, _min: usize, _max: usize) -> Value {
    let first = pick(rng, FIRST_NAMES);
    let n: u16 = rng.gen_range(10..100);
    format!("{first}{n}").into()
}

fn gen_file_path(rng: &mut dyn RngCore, _min: usize, _max: usize) -> Value {
    let a = pick(rng, WORDS);
    let b = pick(rng, WORDS);
    let c = pick(rng, WORDS);
    let ext = pick(rng, EXTENSIONS);
    format!("/{a}/{b}/{c}.{ext}").into()
}

fn gen_url(rng: &mut dyn RngCore, _min: usize, _max: usize) -> Value {
    let host = pick(rng, DOMAINS);
    let path = pick(rng, WORDS);
    format!("https://{host}/{path}").into()
}

fn gen_phone_number(rng: &mut dyn RngCore, _min: usize, _max: usize) -> Value {
    let area: u16 = rng.gen_range(200..990);
    let mid: u16 = rng.gen_range(100..1000);
    let tail: u16 = rng.gen_range(0..10_000);
    format!("+1-{area}-{mid:03}-{tail:04}").into()
}

fn gen_city(rng: &mut dyn RngCore, _min: usize, _max: usize) -> Value {
    pick(rng, CITIES).into()
}

fn gen_country(rng: &mut dyn RngCore, _min: usize, _max: usize) -> Value {
    pick(rng, COUNTRIES).into()
}

fn gen_company(rng: &mut dyn RngCore, _min: usize, _max: usize) -> Value {
    format!("{} {}", capitalize(pick(rng, WORDS)), pick(rng, COMPANY_SUFFIXES)).into()
}

fn gen_password(_rng: &mut dyn RngCore, _min: usize, _max: usize) -> Value {
    Value::from(MASKED_PASSWORD)
}

fn gen_uuid(rng: &mut dyn RngCore, _min: usize, _max: usize) -> Value {
    let mut hex = String::with_capacity(36);
    for i in 0..32 {
        if matches!(i, 8 | 12 | 16 | 20) {
            hex.push('-');
        }
        let digit = char::from_digit(rng.gen_range(0..16u32), 16).unwrap_or('0');
        hex.push(digit);
    }
    hex.into()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::StrS;
    use regex::Regex;

    fn rng() -> rand::rngs::ThreadRng {
        rand::thread_rng()
    }

    #[test]
    fn fallback_respects_reconciled_length_bounds() {
        let spec = StrS { min_length: Some(8), max_length: Some(3), ..StrS::default() };
        for _ in 0..32 {
            let v = string_example(&mut rng(), &spec, None).unwrap();
            // maxLength below minLength reconciles upward: exactly 8 chars
            assert_eq!(v.as_str().unwrap().len(), 8);
        }
    }

    #[test]
    fn default_length_bounds_apply() {
        let spec = StrS::default();
        for _ in 0..32 {
            let v = string_example(&mut rng(), &spec, None).unwrap();
            let len = v.as_str().unwrap().len();
            assert!((5..=25).contains(&len), "length {len} outside [5, 25]");
        }
    }

    #[test]
    fn date_formats_match_expected_shapes() {
        let date = StrS { format: Some("date".into()), ..StrS::default() };
        let v = string_example(&mut rng(), &date, None).unwrap();
        assert!(Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap().is_match(v.as_str().unwrap()));

        let dt = StrS { format: Some("date-time".into()), ..StrS::default() };
        let v = string_example(&mut rng(), &dt, None).unwrap();
        assert!(Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$")
            .unwrap()
            .is_match(v.as_str().unwrap()));
    }

    #[test]
    fn email_format_is_syntactically_valid() {
        let spec = StrS { format: Some("email".into()), ..StrS::default() };
        let v = string_example(&mut rng(), &spec, None).unwrap();
        let email_rx = Regex::new(r"^[a-z]+\.[a-z]+@[a-z.]+$").unwrap();
        assert!(email_rx.is_match(v.as_str().unwrap()), "got {v}");
    }

    #[test]
    fn property_name_infers_generator_without_format() {
        let spec = StrS::default();
        let v = string_example(&mut rng(), &spec, Some("email")).unwrap();
        assert!(v.as_str().unwrap().contains('@'));

        // camel-cased names are snake-cased before lookup
        let v = string_example(&mut rng(), &spec, Some("phoneNumber")).unwrap();
        assert!(v.as_str().unwrap().starts_with("+1-"));
    }

    #[test]
    fn unrecognized_format_falls_through_to_name_then_generic() {
        let spec = StrS { format: Some("blorb".into()), ..StrS::default() };
        let v = string_example(&mut rng(), &spec, Some("city")).unwrap();
        assert!(CITIES.contains(&v.as_str().unwrap()));

        let v = string_example(&mut rng(), &spec, Some("unmatched_key")).unwrap();
        assert!(v.as_str().unwrap().chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn duration_and_password_are_fixed_literals() {
        let duration = StrS { format: Some("duration".into()), ..StrS::default() };
        assert_eq!(string_example(&mut rng(), &duration, None), Some(600.0.into()));

        let password = StrS { format: Some("password".into()), ..StrS::default() };
        assert_eq!(string_example(&mut rng(), &password, None), Some("********".into()));
    }

    #[test]
    fn snake_case_handles_kebab_and_camel() {
        assert_eq!(to_snake_case("phone-number"), "phone_number");
        assert_eq!(to_snake_case("phoneNumber"), "phone_number");
        assert_eq!(to_snake_case("PhoneNumber"), "phone_number");
        assert_eq!(to_snake_case("email"), "email");
    }
}
