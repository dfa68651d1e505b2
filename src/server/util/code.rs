use rand::Rng;

/// Builds `prefix` followed by `digits` random decimal digits, e.g. `GYM4820193`.
///
/// Uniqueness is the caller's job: generate again until no row uses the code.
pub fn generate_code(prefix: &str, digits: usize) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..digits)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect();

    format!("{}{}", prefix, suffix)
}

/// Six digit OTP in `100000..=999999`
pub fn generate_otp() -> String {
    rand::rng().random_range(100_000..=999_999u32).to_string()
}
