//! SQL schema for the conference-site SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// The seven tables are independent: no foreign keys, no uniqueness beyond
/// the primary key. `AUTOINCREMENT` keeps ids from being reused after a
/// delete.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Singleton: the CHECK pins the only legal row.
CREATE TABLE IF NOT EXISTS general_settings (
    id               INTEGER PRIMARY KEY CHECK (id = 1),
    event_title      TEXT NOT NULL,
    event_subtitle   TEXT,
    event_dates      TEXT NOT NULL,
    event_location   TEXT NOT NULL,
    event_mode       TEXT NOT NULL DEFAULT 'Hybrid',  -- 'Hybrid' | 'Offline' | 'Online'
    publication_info TEXT,
    organizing_dept  TEXT,
    created_at       TEXT NOT NULL,
    updated_at       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS speakers (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL,
    designation   TEXT NOT NULL,
    affiliation   TEXT NOT NULL,
    title         TEXT NOT NULL DEFAULT 'Keynote Speaker',
    image_url     TEXT NOT NULL,
    bio           TEXT,
    linkedin_url  TEXT,
    display_order INTEGER NOT NULL,
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS important_dates (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    date_text    TEXT NOT NULL,
    description  TEXT NOT NULL,
    is_highlight INTEGER NOT NULL DEFAULT 0,
    created_at   TEXT NOT NULL,
    updated_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS committee (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL,
    affiliation   TEXT NOT NULL,
    designation   TEXT,
    role          TEXT NOT NULL,   -- 'Advisory' | 'Organizing' | 'TPC'
    display_order INTEGER NOT NULL,
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS registration_fees (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    category          TEXT NOT NULL,
    indian_fee        TEXT NOT NULL,   -- display string, never parsed
    international_fee TEXT NOT NULL,
    sort_order        INTEGER NOT NULL DEFAULT 0,
    created_at        TEXT NOT NULL,
    updated_at        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS contacts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    designation TEXT NOT NULL,
    email       TEXT NOT NULL,
    phone       TEXT NOT NULL,
    department  TEXT,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS pages (
    slug            TEXT PRIMARY KEY,
    title           TEXT NOT NULL,
    content         TEXT NOT NULL,
    last_updated_by TEXT,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS speakers_order_idx  ON speakers(display_order);
CREATE INDEX IF NOT EXISTS committee_role_idx  ON committee(role, display_order);

PRAGMA user_version = 1;
";
