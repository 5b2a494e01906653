use rusqlite::{params, Connection, OptionalExtension};

use crate::models::DialogueState;

// ── Dialogue states ──

pub fn get_dialogue_state(
    conn: &Connection,
    session_id: &str,
) -> anyhow::Result<Option<DialogueState>> {
    let json: Option<String> = conn
        .query_row(
            "SELECT state FROM dialogue_states WHERE session_id = ?1",
            [session_id],
            |row| row.get(0),
        )
        .optional()?;

    match json {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

pub fn save_dialogue_state(
    conn: &Connection,
    session_id: &str,
    state: &DialogueState,
) -> anyhow::Result<()> {
    let json = serde_json::to_string(state)?;
    conn.execute(
        "INSERT INTO dialogue_states (session_id, state, updated_at)
         VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(session_id) DO UPDATE SET state = excluded.state, updated_at = excluded.updated_at",
        params![session_id, json],
    )?;
    Ok(())
}

pub fn delete_dialogue_state(conn: &Connection, session_id: &str) -> anyhow::Result<bool> {
    let deleted = conn.execute(
        "DELETE FROM dialogue_states WHERE session_id = ?1",
        [session_id],
    )?;
    Ok(deleted > 0)
}
