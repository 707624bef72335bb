//! Address Repository

use super::RepoResult;
use crate::db::models::Address;
use sqlx::SqliteConnection;

pub struct AddressRepository;

impl AddressRepository {
    /// Fetch an address only if it belongs to the given user.
    ///
    /// The user scope matters: an address id from another account must read
    /// as nonexistent during commit validation.
    pub async fn find_for_user(
        conn: &mut SqliteConnection,
        addr_id: i64,
        user_id: i64,
    ) -> RepoResult<Option<Address>> {
        let addr = sqlx::query_as::<_, Address>(
            "SELECT id, user_id, receiver, detail, zip_code, phone
             FROM address WHERE id = ? AND user_id = ?",
        )
        .bind(addr_id)
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(addr)
    }

    /// Insert an address (account management is external; used by seeding and tests).
    pub async fn insert(conn: &mut SqliteConnection, addr: &Address) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO address (id, user_id, receiver, detail, zip_code, phone)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(addr.id)
        .bind(addr.user_id)
        .bind(&addr.receiver)
        .bind(&addr.detail)
        .bind(&addr.zip_code)
        .bind(&addr.phone)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}
