/// Length of a record id: a UUID rendered as lowercase hex without dashes.
pub const ID_LEN: usize = 32;

/// Generate a new record ID (UUIDv7, no dashes).
///
/// v7 ids are time-ordered, so a key scan over ids returns records in
/// creation order.
pub fn new_id() -> String {
    uuid::Uuid::now_v7().simple().to_string()
}

/// Whether `id` has the shape produced by [`new_id`].
///
/// A string that fails this check can never name a stored record.
pub fn is_valid_id(id: &str) -> bool {
    id.len() == ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
