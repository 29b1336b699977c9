//! Enum/field codec
//!
//! Bidirectional mapping between the symbolic tokens used in declared
//! configuration and the numeric codes the UptimeRobot API speaks, plus the
//! composite alert-contact binding encoding.
//!
//! The tables are process-wide constants; they are never mutated and are
//! safe to read from any number of concurrent reconciliations.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A static bidirectional mapping of symbolic token to numeric code.
///
/// Within a table both tokens and codes are unique, so the reverse lookup is
/// unambiguous. A reverse lookup for a code absent from the table yields the
/// empty string rather than failing: a newly introduced remote code degrades
/// to an empty symbolic field instead of aborting reconciliation.
#[derive(Debug)]
pub struct EnumTable {
    name: &'static str,
    entries: &'static [(&'static str, u16)],
}

impl EnumTable {
    const fn new(name: &'static str, entries: &'static [(&'static str, u16)]) -> Self {
        Self { name, entries }
    }

    /// Table name, for error messages
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Forward lookup: symbolic token to numeric code.
    ///
    /// The host validates tokens against [`EnumTable::tokens`] before the
    /// core runs, so `None` here is a precondition violation; callers turn
    /// it into an invalid-input error.
    pub fn code(&self, token: &str) -> Option<u16> {
        self.entries
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, c)| *c)
    }

    /// Reverse lookup: numeric code to symbolic token, `""` when unknown
    pub fn token(&self, code: u16) -> &'static str {
        self.entries
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(t, _)| *t)
            .unwrap_or("")
    }

    /// All symbolic tokens in the table, for host-side allowed-value
    /// validation
    pub fn tokens(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(t, _)| *t)
    }
}

/// Alert contact delivery channel
pub static CONTACT_TYPE: EnumTable = EnumTable::new(
    "contact type",
    &[
        ("email", 2),
        ("twitter", 3),
        ("boxcar", 4),
        ("webhook", 5),
        ("pushbullet", 6),
        ("zapier", 7),
        ("sms", 8),
        ("pushover", 9),
        ("hipchat", 10),
        ("slack", 11),
        ("phone", 13),
        ("splunk", 15),
        ("pagerduty", 16),
        ("telegram", 18),
        ("teams", 20),
        ("hangouts", 21),
        ("discord", 23),
    ],
);

/// Alert contact status (remote-computed, inbound only)
pub static CONTACT_STATUS: EnumTable = EnumTable::new(
    "contact status",
    &[("not_activated", 0), ("paused", 1), ("active", 2)],
);

/// Monitor kind
pub static MONITOR_TYPE: EnumTable = EnumTable::new(
    "monitor type",
    &[("http", 1), ("keyword", 2), ("ping", 3), ("port", 4)],
);

/// Port-monitor sub-type
pub static MONITOR_SUB_TYPE: EnumTable = EnumTable::new(
    "monitor sub-type",
    &[
        ("http", 1),
        ("https", 2),
        ("ftp", 3),
        ("smtp", 4),
        ("pop3", 5),
        ("imap", 6),
        ("custom", 99),
    ],
);

/// HTTP authentication scheme for monitored endpoints
pub static HTTP_AUTH_TYPE: EnumTable =
    EnumTable::new("http auth type", &[("basic", 1), ("digest", 2)]);

/// Monitor status (remote-computed, inbound only)
pub static MONITOR_STATUS: EnumTable = EnumTable::new(
    "monitor status",
    &[
        ("paused", 0),
        ("not_checked_yet", 1),
        ("up", 2),
        ("seems_down", 8),
        ("down", 9),
    ],
);

/// One alert-contact-to-monitor binding as declared by the caller
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactBinding {
    /// Alert contact id (remote-assigned, carried as a string in declared
    /// state)
    pub id: String,
    /// Down-duration threshold before the contact is notified (minutes)
    #[serde(default)]
    pub threshold: u32,
    /// Re-notification interval while the monitor stays down (minutes)
    #[serde(default)]
    pub recurrence: u32,
}

/// Serialize bindings to the API's outbound wire form:
/// `id_threshold_recurrence` triples joined by `-`.
///
/// An empty list serializes to the empty string, which the API interprets
/// as "no bindings attached".
pub fn encode_contact_bindings(bindings: &[ContactBinding]) -> String {
    bindings
        .iter()
        .map(|b| format!("{}_{}_{}", b.id, b.threshold, b.recurrence))
        .collect::<Vec<_>>()
        .join("-")
}

/// Parse the encoded wire form back into structured bindings.
///
/// The read path never needs this (the API returns bindings as structured
/// records); it exists to verify the encoding round-trips.
pub fn decode_contact_bindings(encoded: &str) -> Result<Vec<ContactBinding>> {
    if encoded.is_empty() {
        return Ok(Vec::new());
    }

    encoded
        .split('-')
        .map(|part| {
            let fields: Vec<&str> = part.split('_').collect();
            let [id, threshold, recurrence] = fields.as_slice() else {
                return Err(Error::invalid_input(format!(
                    "malformed contact binding: {part}"
                )));
            };
            Ok(ContactBinding {
                id: (*id).to_string(),
                threshold: threshold
                    .parse()
                    .map_err(|_| Error::invalid_input(format!("bad threshold in binding: {part}")))?,
                recurrence: recurrence
                    .parse()
                    .map_err(|_| Error::invalid_input(format!("bad recurrence in binding: {part}")))?,
            })
        })
        .collect()
}
