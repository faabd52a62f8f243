use chrono::{Duration, SecondsFormat, Utc};
use fake::faker::address::en::{BuildingNumber, StreetName};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::{DomainSuffix, SafeEmail};
use fake::faker::lorem::en::{Word, Words};
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::Rng;
use serde_json::{json, Map, Value};

use crate::config::GeneratorConfig;
use crate::domain::{ParsedInterface, Properties, StringFormat, TypeInfo, TypeKind};

/// Window for generated dates: any point in the past year.
const RECENT_WINDOW_SECONDS: i64 = 365 * 24 * 60 * 60;

/// Produces JSON values conforming to a [`ParsedInterface`].
///
/// The generator holds no state beyond its configuration. Every random choice is
/// drawn from the `Rng` passed in, so a seeded `StdRng` gives reproducible output.
#[derive(Debug, Clone, Default)]
pub struct MockGenerator {
    config: GeneratorConfig,
}

impl MockGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// A single object, or an array of `count` objects when `count > 1`.
    pub fn generate_mock_data<R: Rng + ?Sized>(
        &self,
        parsed: &ParsedInterface,
        count: Option<usize>,
        rng: &mut R,
    ) -> Value {
        match count {
            Some(n) if n > 1 => Value::Array(self.generate_many(parsed, n, rng)),
            _ => self.generate_one(parsed, rng),
        }
    }

    /// `count` independent records.
    pub fn generate_many<R: Rng + ?Sized>(
        &self,
        parsed: &ParsedInterface,
        count: usize,
        rng: &mut R,
    ) -> Vec<Value> {
        (0..count).map(|_| self.generate_one(parsed, rng)).collect()
    }

    pub fn generate_one<R: Rng + ?Sized>(&self, parsed: &ParsedInterface, rng: &mut R) -> Value {
        self.generate_object(&parsed.properties, rng)
    }

    /// Generate the value for one field, honoring its array flag.
    pub fn generate_value<R: Rng + ?Sized>(&self, info: &TypeInfo, rng: &mut R) -> Value {
        if info.is_array {
            let size = rng.gen_range(1..=self.config.max_array_size.max(1));
            let items = (0..size).map(|_| self.generate_element(info, rng)).collect();
            return Value::Array(items);
        }
        self.generate_element(info, rng)
    }

    fn generate_element<R: Rng + ?Sized>(&self, info: &TypeInfo, rng: &mut R) -> Value {
        match info.kind {
            TypeKind::Object => match &info.properties {
                Some(properties) => self.generate_object(properties, rng),
                None => Value::Object(Map::new()),
            },
            _ => self.generate_base_value(info, rng),
        }
    }

    /// Optional fields are dropped independently on every call.
    fn generate_object<R: Rng + ?Sized>(&self, properties: &Properties, rng: &mut R) -> Value {
        let omit = self.config.omit_probability();
        let mut result = Map::new();

        for (name, info) in properties {
            if info.is_optional && rng.gen_bool(omit) {
                continue;
            }
            result.insert(name.clone(), self.generate_value(info, rng));
        }

        Value::Object(result)
    }

    fn generate_base_value<R: Rng + ?Sized>(&self, info: &TypeInfo, rng: &mut R) -> Value {
        match info.kind {
            TypeKind::String => json!(generate_string(info.string_format, rng)),
            TypeKind::Number => json!(rng.gen_range(1..=1000_i64)),
            TypeKind::Boolean => json!(rng.gen_bool(0.5)),
            TypeKind::Date => {
                let offset = Duration::seconds(rng.gen_range(0..RECENT_WINDOW_SECONDS));
                json!((Utc::now() - offset).to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            TypeKind::Object => Value::Object(Map::new()),
        }
    }
}

/// Realistic string for a format hint, or 1 to 5 lorem words without one.
fn generate_string<R: Rng + ?Sized>(format: Option<StringFormat>, rng: &mut R) -> String {
    match format {
        Some(StringFormat::Email) => SafeEmail().fake_with_rng(rng),
        Some(StringFormat::Url) => {
            let host: String = Word().fake_with_rng(rng);
            let suffix: String = DomainSuffix().fake_with_rng(rng);
            format!("https://www.{}.{}", host, suffix)
        }
        Some(StringFormat::Phone) => PhoneNumber().fake_with_rng(rng),
        Some(StringFormat::Name) => Name().fake_with_rng(rng),
        Some(StringFormat::Address) => {
            let number: String = BuildingNumber().fake_with_rng(rng);
            let street: String = StreetName().fake_with_rng(rng);
            format!("{} {}", number, street)
        }
        Some(StringFormat::Company) => CompanyName().fake_with_rng(rng),
        Some(StringFormat::Uuid) => uuid::Builder::from_random_bytes(rng.gen())
            .into_uuid()
            .to_string(),
        None => {
            let words: Vec<String> = Words(1..6).fake_with_rng(rng);
            words.join(" ")
        }
    }
}

/// Default generator driven by the thread-local RNG.
pub fn generate_mock_data(parsed: &ParsedInterface, count: Option<usize>) -> Value {
    MockGenerator::default().generate_mock_data(parsed, count, &mut rand::thread_rng())
}
