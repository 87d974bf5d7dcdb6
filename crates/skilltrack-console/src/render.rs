//! Text views of console state: the output log, the status line and the
//! skills table.

use crate::client::Payload;
use crate::model::Skill;
use chrono::{Local, NaiveTime, Timelike};
use core::fmt;
use serde_json::Value;
use std::collections::VecDeque;

/// One entry of the output panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub time: NaiveTime,
    pub label: String,
    pub body: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:02}:{:02}:{:02}] {}\n{}",
            self.time.hour(),
            self.time.minute(),
            self.time.second(),
            self.label,
            self.body
        )
    }
}

/// Output panel, newest entry first.
#[derive(Debug, Default, Clone)]
pub struct OutputLog {
    entries: VecDeque<LogEntry>,
}

impl OutputLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends an entry stamped with the local wall-clock time.
    pub fn push(&mut self, label: impl Into<String>, body: impl Into<String>) {
        self.push_stamped(Local::now().time(), label, body);
    }

    pub fn push_stamped(
        &mut self,
        time: NaiveTime,
        label: impl Into<String>,
        body: impl Into<String>,
    ) {
        self.entries.push_front(LogEntry {
            time,
            label: label.into(),
            body: body.into(),
        });
    }

    pub fn push_payload(&mut self, label: impl Into<String>, payload: &Payload) {
        self.push(label, payload.render());
    }

    #[must_use]
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for OutputLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

/// Result of the most recent request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusLine {
    pub ok: bool,
    pub message: String,
}

impl StatusLine {
    pub const AUTHENTICATED: &'static str = "API authenticated";
    pub const FAILED: &'static str = "API error";

    pub fn set(&mut self, ok: bool, message: impl Into<String>) {
        self.ok = ok;
        self.message = message.into();
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            return Ok(());
        }
        let mark = if self.ok { "ok" } else { "error" };
        write!(f, "[{mark}] {}", self.message)
    }
}

/// A displayable skill row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillRow {
    pub name: String,
    pub proficiency: String,
    /// Normalized identifier, empty when the record carried none.
    pub id: String,
}

impl SkillRow {
    pub const NO_NAME: &'static str = "(no name)";
    pub const NO_ID: &'static str = "ID unavailable";

    #[must_use]
    pub fn from_skill(skill: &Skill) -> Self {
        Self {
            name: skill.name().unwrap_or_default(),
            proficiency: skill.proficiency().unwrap_or_default(),
            id: skill.skill_id(),
        }
    }

    /// Update and delete need an identifier that can go into a request path.
    #[must_use]
    pub fn actions_enabled(&self) -> bool {
        oidkit::is_valid(&self.id)
    }
}

impl fmt::Display for SkillRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() {
            Self::NO_NAME
        } else {
            &self.name
        };
        let id = if self.id.is_empty() {
            Self::NO_ID
        } else {
            &self.id
        };
        write!(f, "{name}")?;
        if !self.proficiency.is_empty() {
            write!(f, " ({})", self.proficiency)?;
        }
        write!(f, " | {id}")?;
        if !self.actions_enabled() {
            f.write_str(" | actions disabled")?;
        }
        Ok(())
    }
}

/// The skills table. Anything other than a JSON array renders as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillsView {
    rows: Vec<SkillRow>,
}

impl SkillsView {
    pub const EMPTY: &'static str = "No skills found.";

    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let rows = match value {
            Value::Array(items) => items
                .iter()
                .map(|item| SkillRow::from_skill(&Skill::from_value(item)))
                .collect(),
            _ => Vec::new(),
        };
        Self { rows }
    }

    #[must_use]
    pub fn from_payload(payload: &Payload) -> Self {
        payload.as_json().map(Self::from_value).unwrap_or_default()
    }

    #[must_use]
    pub fn rows(&self) -> &[SkillRow] {
        &self.rows
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SkillRow> {
        self.rows.get(index)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for SkillsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return f.write_str(Self::EMPTY);
        }
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{i:>3}. {row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn log_is_newest_first() {
        let mut log = OutputLog::new();
        log.push_stamped(at(9, 5, 1), "Login", "507f1f77bcf86cd799439011");
        log.push_stamped(at(9, 5, 7), "Fetch Skills", "[]");

        assert_eq!(log.len(), 2);
        assert_eq!(log.latest().unwrap().label, "Fetch Skills");
        assert_eq!(
            log.to_string(),
            "[09:05:07] Fetch Skills\n[]\n\n[09:05:01] Login\n507f1f77bcf86cd799439011"
        );
    }

    #[test]
    fn payloads_are_rendered() {
        let mut log = OutputLog::new();
        log.push_payload("Get User", &Payload::Json(json!({ "username": "bob" })));
        assert_eq!(log.latest().unwrap().body, "{\n  \"username\": \"bob\"\n}");
    }

    #[test]
    fn status_line() {
        let mut status = StatusLine::default();
        assert_eq!(status.to_string(), "");
        status.set(true, StatusLine::AUTHENTICATED);
        assert_eq!(status.to_string(), "[ok] API authenticated");
        status.set(false, StatusLine::FAILED);
        assert_eq!(status.to_string(), "[error] API error");
    }

    #[test]
    fn skills_view_rows() {
        let view = SkillsView::from_value(&json!([
            { "id": { "$oid": "507f1f77bcf86cd799439011" }, "name": "Rust", "proficiency": "Expert" },
            { "_id": "507f191e810c19729de860ea" },
            { "name": "Go", "id": { "machineIdentifier": 1 } }
        ]));

        assert_eq!(view.rows().len(), 3);
        assert!(view.get(0).unwrap().actions_enabled());
        assert_eq!(view.get(1).unwrap().id, "507f191e810c19729de860ea");
        assert!(!view.get(2).unwrap().actions_enabled());
        assert_eq!(
            view.to_string(),
            "  0. Rust (Expert) | 507f1f77bcf86cd799439011\n  \
             1. (no name) | 507f191e810c19729de860ea\n  \
             2. Go | ID unavailable | actions disabled"
        );
    }

    #[test]
    fn malformed_ids_disable_actions() {
        let view = SkillsView::from_value(&json!([
            { "id": "abc", "name": "Go" },
            { "id": "507F1F77BCF86CD799439011", "name": "Zig" }
        ]));
        let row = view.get(0).unwrap();
        assert_eq!(row.id, "abc");
        assert!(!row.actions_enabled());
        assert_eq!(row.to_string(), "Go | abc | actions disabled");
        assert!(view.get(1).unwrap().actions_enabled());
    }

    #[test]
    fn non_arrays_are_empty() {
        assert!(SkillsView::from_value(&json!({ "error": "nope" })).is_empty());
        assert!(SkillsView::from_payload(&Payload::Status(204)).is_empty());
        assert_eq!(SkillsView::default().to_string(), SkillsView::EMPTY);
    }
}
