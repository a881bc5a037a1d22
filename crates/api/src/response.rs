//! Shared response bodies for API handlers.

use serde::Serialize;

/// `{ "ok": true }` acknowledgement for mutations with nothing else to report.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub ok: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// `{ "id": ... }` body returned by create endpoints.
#[derive(Debug, Serialize)]
pub struct Created {
    pub id: socialconnect_core::types::DbId,
}
