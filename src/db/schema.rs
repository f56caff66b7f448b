//! SQL DDL applied at startup.

/// SQLite schema.
/// - ids are UUIDs stored as BLOB
/// - timestamps are RFC3339 TEXT
/// - portfolio sections are JSON TEXT, one column per section
/// - deleting a template nulls portfolio/payment references instead of cascading
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BLOB PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    is_admin INTEGER NOT NULL DEFAULT 0,
    is_premium INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS templates (
    id BLOB PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    preview_url TEXT NOT NULL,
    is_premium INTEGER NOT NULL DEFAULT 0,
    html TEXT NOT NULL,
    css TEXT NOT NULL DEFAULT '',
    js TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS portfolios (
    id BLOB PRIMARY KEY NOT NULL,
    user_id BLOB NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    template_id BLOB NULL REFERENCES templates(id) ON DELETE SET NULL,
    title TEXT NOT NULL,
    personal_info TEXT NOT NULL, -- JSON object
    education TEXT NOT NULL,     -- JSON array
    experience TEXT NOT NULL,    -- JSON array
    projects TEXT NOT NULL,      -- JSON array
    skills TEXT NOT NULL,        -- JSON array of strings
    is_public INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_portfolios_user_id ON portfolios(user_id);

CREATE TABLE IF NOT EXISTS payments (
    id BLOB PRIMARY KEY NOT NULL,
    user_id BLOB NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    template_id BLOB NULL REFERENCES templates(id) ON DELETE SET NULL,
    amount REAL NOT NULL,
    payment_status TEXT NOT NULL DEFAULT 'pending',
    payment_date TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_payments_user_id ON payments(user_id);
"#;
