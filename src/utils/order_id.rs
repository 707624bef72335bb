//! Order id generation.
//!
//! Order ids are `local timestamp (%Y%m%d%H%M%S) + user id`, e.g.
//! `202608301812307` for user 7. Human-readable and sortable by creation
//! time. Collisions are only possible if the same user commits twice within
//! one second, which the order table's primary key turns into a storage
//! error rather than a silent overwrite.

use chrono::Local;

/// Generate an order id for the given user.
pub fn generate(user_id: i64) -> String {
    format!("{}{}", Local::now().format("%Y%m%d%H%M%S"), user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_ends_with_user_id() {
        let id = generate(42);
        assert!(id.ends_with("42"));
        // 14 timestamp digits + user id digits
        assert_eq!(id.len(), 14 + 2);
        assert!(id.chars().all(|c| c.is_ascii_digit()));
    }
}
