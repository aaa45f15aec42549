//! SQL schema for the Cortex SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS topics (
    topic_id  INTEGER PRIMARY KEY AUTOINCREMENT,
    title     TEXT    NOT NULL,
    title_key TEXT    NOT NULL UNIQUE,   -- whitespace-normalized title
    priority  INTEGER NOT NULL DEFAULT 50
);

CREATE TABLE IF NOT EXISTS angles (
    angle_id INTEGER PRIMARY KEY AUTOINCREMENT,
    topic_id INTEGER NOT NULL REFERENCES topics(topic_id),
    name     TEXT    NOT NULL,
    variant  TEXT    NOT NULL,
    UNIQUE (topic_id, name, variant)
);

-- At most one progress row per angle.
CREATE TABLE IF NOT EXISTS progress (
    angle_id      INTEGER PRIMARY KEY REFERENCES angles(angle_id),
    status        TEXT    NOT NULL CHECK (status IN ('pending', 'learning', 'review')),
    interval      INTEGER NOT NULL CHECK (interval >= 0),
    ease_factor   REAL    NOT NULL CHECK (ease_factor BETWEEN 1.3 AND 3.0),
    next_review   TEXT,              -- RFC 3339 UTC
    last_reviewed TEXT,              -- RFC 3339 UTC
    CHECK (status != 'review' OR next_review IS NOT NULL)
);

CREATE TABLE IF NOT EXISTS graph_nodes (
    position      INTEGER PRIMARY KEY,
    label         TEXT    NOT NULL,
    label_key     TEXT    NOT NULL UNIQUE,
    grp           TEXT    NOT NULL CHECK (grp IN ('locked', 'active', 'mastered')),
    mastery_level INTEGER NOT NULL DEFAULT 0 CHECK (mastery_level BETWEEN 0 AND 3)
);

-- Single-active invariant, enforced by the database as well.
CREATE UNIQUE INDEX IF NOT EXISTS graph_nodes_one_active
    ON graph_nodes(grp) WHERE grp = 'active';

CREATE TABLE IF NOT EXISTS graph_state (
    id              INTEGER PRIMARY KEY CHECK (id = 1),
    active_position INTEGER REFERENCES graph_nodes(position)
);

CREATE TABLE IF NOT EXISTS graph_edges (
    from_position INTEGER NOT NULL REFERENCES graph_nodes(position),
    to_position   INTEGER NOT NULL REFERENCES graph_nodes(position),
    label         TEXT    NOT NULL,
    PRIMARY KEY (from_position, to_position)
);

-- The single pending challenge, if any.
CREATE TABLE IF NOT EXISTS pending_challenge (
    id             INTEGER PRIMARY KEY CHECK (id = 1),
    topic_key      TEXT    NOT NULL,
    mastery_level  INTEGER NOT NULL,
    challenge_json TEXT    NOT NULL,
    created_at     TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS questions (
    question_id  INTEGER PRIMARY KEY AUTOINCREMENT,
    angle_id     INTEGER NOT NULL REFERENCES angles(angle_id),
    question     TEXT    NOT NULL,
    options_json TEXT    NOT NULL DEFAULT '[]',
    answer       TEXT    NOT NULL,
    explanation  TEXT    NOT NULL,
    context      TEXT,
    created_at   TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS angles_topic_idx        ON angles(topic_id);
CREATE INDEX IF NOT EXISTS progress_next_review_idx ON progress(next_review);

INSERT OR IGNORE INTO graph_state (id, active_position) VALUES (1, NULL);

PRAGMA user_version = 1;
";
