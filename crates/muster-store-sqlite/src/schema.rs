//! SQL schema for the Muster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- `seq` records insertion order, which is the list order.
CREATE TABLE IF NOT EXISTS recruits (
    seq          INTEGER PRIMARY KEY AUTOINCREMENT,
    recruit_id   TEXT NOT NULL UNIQUE,
    name         TEXT NOT NULL CHECK (length(trim(name)) > 0),
    email        TEXT,
    phone        TEXT,
    notes        TEXT,
    source       TEXT NOT NULL DEFAULT 'Manual',
    priority     INTEGER NOT NULL DEFAULT 1,
    stage        TEXT NOT NULL DEFAULT 'New'
                 CHECK (stage IN ('New', 'Contacted', 'In Training', 'Licensed', 'Inactive')),
    created_at   TEXT NOT NULL,   -- RFC 3339 UTC, fixed nanosecond width
    updated_at   TEXT NOT NULL,
    last_contact TEXT,
    CHECK (updated_at >= created_at)
);

-- Append-only contact log; rows go away with their recruit.
CREATE TABLE IF NOT EXISTS communications (
    seq              INTEGER PRIMARY KEY AUTOINCREMENT,
    communication_id TEXT NOT NULL UNIQUE,
    recruit_id       TEXT NOT NULL
                     REFERENCES recruits(recruit_id) ON DELETE CASCADE,
    kind             TEXT NOT NULL,   -- 'manual' | 'stage_change' | 'quick_message'
    content          TEXT NOT NULL,
    recorded_at      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS communications_recruit_idx ON communications(recruit_id);

PRAGMA user_version = 1;
";
