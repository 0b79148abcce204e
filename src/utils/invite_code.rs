use rand::distributions::Alphanumeric;
use rand::Rng;

pub const INVITE_CODE_LENGTH: usize = 8;

/// Random uppercase alphanumeric league invite code
pub fn generate_invite_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(INVITE_CODE_LENGTH)
        .map(|c| (c as char).to_ascii_uppercase())
        .collect()
}

/// Codes are matched case-insensitively and without surrounding whitespace
pub fn normalize_invite_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
