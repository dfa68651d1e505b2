/// Digits only, as stored for OTP lookups.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// A login phone needs at least 10 digits.
pub fn is_valid_phone(phone: &str) -> bool {
    normalize_phone(phone).len() >= 10
}

/// WhatsApp recipient format: digits only, Indian numbers prefixed with `91`.
pub fn format_whatsapp_phone(phone: &str) -> String {
    let digits = normalize_phone(phone);

    if digits.len() == 10 {
        format!("91{}", digits)
    } else {
        digits
    }
}
