//! Synthetic users for filling a development store.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::NewUser;

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bruno", "Chen", "Dana", "Emeka", "Farah", "Goran", "Hana", "Ivan", "Jonas", "Keiko",
    "Lena", "Mateo", "Nadia", "Omar", "Priya", "Quinn", "Rosa", "Sven", "Tariq",
];

const LAST_NAMES: &[&str] = &[
    "Adams", "Becker", "Costa", "Dubois", "Eriksen", "Fischer", "Garcia", "Huang", "Ito", "Jensen",
    "Kowalski", "Lopez", "Moreau", "Novak", "Okafor", "Petrov", "Rossi", "Schmidt", "Tanaka",
];

const STREETS: &[&str] = &[
    "Main St", "Oak Ave", "Maple Dr", "Cedar Ln", "Pine Rd", "Elm St", "Lake View", "Hill Crest",
];

const CITIES: &[&str] = &["Springfield", "Riverton", "Fairview", "Lakewood", "Georgetown"];

const DOMAINS: &[&str] = &["example.com", "example.org", "example.net", "mail.test"];

/// Build `count` users with distinct emails, all sharing `password_hash`.
pub fn fake_users<R: Rng>(rng: &mut R, count: usize, password_hash: &str) -> Vec<NewUser> {
    (0..count)
        .map(|i| {
            let first = FIRST_NAMES.choose(rng).copied().unwrap_or("User");
            let last = LAST_NAMES.choose(rng).copied().unwrap_or("Seed");
            let domain = DOMAINS.choose(rng).copied().unwrap_or("example.com");
            let street = STREETS.choose(rng).copied().unwrap_or("Main St");
            let city = CITIES.choose(rng).copied().unwrap_or("Springfield");
            NewUser {
                username: format!("{} {}", first, last),
                // The index keeps emails unique within one run.
                email: format!(
                    "{}.{}.{}{}@{}",
                    first.to_lowercase(),
                    last.to_lowercase(),
                    i,
                    rng.gen_range(1000..10000),
                    domain
                ),
                password_hash: password_hash.to_string(),
                address: format!("{} {}, {}", rng.gen_range(1..2000), street, city),
                phone: format!(
                    "+1-{:03}-555-{:04}",
                    rng.gen_range(200..1000),
                    rng.gen_range(0..10000)
                ),
                age: rng.gen_range(18..=60),
            }
        })
        .collect()
}
