//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// User documents.
    ///
    /// `email` carries a unique index; values are stored lowercased.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name.
        name -> Varchar,
        /// Lowercased email address.
        email -> Varchar,
        /// Optional non-negative age.
        age -> Nullable<Int4>,
        /// One of `user`, `admin`, `moderator`.
        role -> Varchar,
        /// Creation timestamp; never updated.
        created_at -> Timestamptz,
    }
}
