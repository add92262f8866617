//! SQL schema for the budget SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS authors (
    id          TEXT PRIMARY KEY,
    full_name   TEXT NOT NULL,
    created_at  TEXT NOT NULL    -- RFC 3339 UTC; server-assigned
);

-- Budget entries are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS budget_entries (
    id          TEXT PRIMARY KEY,
    year        INTEGER NOT NULL CHECK (year >= 1900),
    month       INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
    amount      INTEGER NOT NULL CHECK (amount BETWEEN 1 AND 2147483647),
    type        TEXT NOT NULL CHECK (type IN ('Income', 'Expense', 'Commission')),
    author_id   TEXT REFERENCES authors(id)
);

CREATE INDEX IF NOT EXISTS budget_entries_year_idx   ON budget_entries(year);
CREATE INDEX IF NOT EXISTS budget_entries_author_idx ON budget_entries(author_id);

PRAGMA user_version = 1;
";
