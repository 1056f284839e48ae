//! User aggregate
//!
//! The user document and everything embedded in it: groups (with message
//! templates), communities (with question sets, submitted answers and
//! events). The aggregate is loaded and persisted as one unit; the
//! resolver methods below locate sub-entities by their storage-assigned
//! id. Caller-supplied external references (`group_ref`) are opaque
//! attributes and are never used for lookup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Root aggregate: one registered account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub whatsapp_number: String,
    pub email: String,
    pub password_hash: String,
    pub groups: Vec<Group>,
    pub communities: Vec<Community>,
    /// Optimistic-concurrency counter, compared on every save.
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A WhatsApp group owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    /// External reference supplied by the caller (e.g. the WhatsApp group
    /// id). Display-only; lookups always go through `id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_ref: Option<String>,
    pub group_name: String,
    pub description: String,
    pub paid: bool,
    pub group_link: String,
    pub templates: Vec<Template>,
}

/// A reusable message template inside a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub content: String,
}

/// A WhatsApp community owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    pub id: String,
    pub group_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_rules: Option<String>,
    pub paid: bool,
    pub group_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_add: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_ref: Option<String>,
    /// Onboarding questions shown to joiners.
    pub question_set: Vec<String>,
    /// Submitted answers, append-only.
    pub answer_set: Vec<Answer>,
    pub events: Vec<Event>,
}

/// A submitted answer set. `question` is a snapshot of the community's
/// question set at submission time, not a reference; later edits to the
/// questions must not alter stored answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub id: String,
    pub question: Vec<String>,
    pub answer: Vec<String>,
    pub submitted_at: DateTime<Utc>,
}

/// A community event. All fields are mandatory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: String,
    pub time: String,
    pub duration: String,
    pub location: String,
    pub location_details: String,
    pub details: String,
    pub cover_image: String,
    pub paid: bool,
    pub amount: f64,
}

// ── Aggregate construction ─────────────────────────────────────

impl User {
    /// A freshly registered user: empty collections, version 0.
    pub fn register(
        name: String,
        whatsapp_number: String,
        email: String,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            name,
            whatsapp_number,
            email,
            password_hash,
            groups: Vec::new(),
            communities: Vec::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

// ── Nested collection resolver ─────────────────────────────────
//
// First-match-by-id semantics over the embedded collections. Each miss
// reports a NotFound scoped to the entity that was being looked up.

impl User {
    pub fn group(&self, group_id: &str) -> DomainResult<&Group> {
        self.groups
            .iter()
            .find(|g| g.id == group_id)
            .ok_or_else(|| DomainError::not_found("group", group_id))
    }

    pub fn group_mut(&mut self, group_id: &str) -> DomainResult<&mut Group> {
        self.groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or_else(|| DomainError::not_found("group", group_id))
    }

    /// Remove a group by id, returning the removed entity.
    pub fn remove_group(&mut self, group_id: &str) -> DomainResult<Group> {
        let idx = self
            .groups
            .iter()
            .position(|g| g.id == group_id)
            .ok_or_else(|| DomainError::not_found("group", group_id))?;
        Ok(self.groups.remove(idx))
    }

    pub fn community(&self, community_id: &str) -> DomainResult<&Community> {
        self.communities
            .iter()
            .find(|c| c.id == community_id)
            .ok_or_else(|| DomainError::not_found("community", community_id))
    }

    pub fn community_mut(&mut self, community_id: &str) -> DomainResult<&mut Community> {
        self.communities
            .iter_mut()
            .find(|c| c.id == community_id)
            .ok_or_else(|| DomainError::not_found("community", community_id))
    }

    pub fn remove_community(&mut self, community_id: &str) -> DomainResult<Community> {
        let idx = self
            .communities
            .iter()
            .position(|c| c.id == community_id)
            .ok_or_else(|| DomainError::not_found("community", community_id))?;
        Ok(self.communities.remove(idx))
    }
}

impl Group {
    pub fn new(
        group_ref: Option<String>,
        group_name: String,
        description: String,
        paid: bool,
        group_link: String,
    ) -> Self {
        Self {
            id: new_id(),
            group_ref,
            group_name,
            description,
            paid,
            group_link,
            // A new group always starts with no templates.
            templates: Vec::new(),
        }
    }

    pub fn template(&self, template_id: &str) -> DomainResult<&Template> {
        self.templates
            .iter()
            .find(|t| t.id == template_id)
            .ok_or_else(|| DomainError::not_found("template", template_id))
    }

    pub fn template_mut(&mut self, template_id: &str) -> DomainResult<&mut Template> {
        self.templates
            .iter_mut()
            .find(|t| t.id == template_id)
            .ok_or_else(|| DomainError::not_found("template", template_id))
    }

    pub fn remove_template(&mut self, template_id: &str) -> DomainResult<Template> {
        let idx = self
            .templates
            .iter()
            .position(|t| t.id == template_id)
            .ok_or_else(|| DomainError::not_found("template", template_id))?;
        Ok(self.templates.remove(idx))
    }

    pub fn add_template(&mut self, content: String) -> &Template {
        self.templates.push(Template {
            id: new_id(),
            content,
        });
        // Just pushed, so the vec is non-empty.
        self.templates.last().unwrap()
    }
}

impl Community {
    pub fn answer(&self, answer_id: &str) -> DomainResult<&Answer> {
        self.answer_set
            .iter()
            .find(|a| a.id == answer_id)
            .ok_or_else(|| DomainError::not_found("answer", answer_id))
    }

    /// Append an answer, snapshotting the current question set.
    ///
    /// The answer count is deliberately not validated against the question
    /// count; callers may submit partial answers.
    pub fn add_answer(&mut self, answer: Vec<String>) -> &Answer {
        self.answer_set.push(Answer {
            id: new_id(),
            question: self.question_set.clone(),
            answer,
            submitted_at: Utc::now(),
        });
        self.answer_set.last().unwrap()
    }

    /// Overwrite the question at `index`. Out-of-range indexes are a
    /// caller error, not a missing entity.
    pub fn update_question(&mut self, index: usize, question: String) -> DomainResult<()> {
        if index >= self.question_set.len() {
            return Err(DomainError::Validation(format!(
                "question index {} out of range (0..{})",
                index,
                self.question_set.len()
            )));
        }
        self.question_set[index] = question;
        Ok(())
    }

    pub fn event(&self, event_id: &str) -> DomainResult<&Event> {
        self.events
            .iter()
            .find(|e| e.id == event_id)
            .ok_or_else(|| DomainError::not_found("event", event_id))
    }

    pub fn remove_event(&mut self, event_id: &str) -> DomainResult<Event> {
        let idx = self
            .events
            .iter()
            .position(|e| e.id == event_id)
            .ok_or_else(|| DomainError::not_found("event", event_id))?;
        Ok(self.events.remove(idx))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_group() -> (User, String) {
        let mut user = User::register(
            "Amina".into(),
            "2348012345678".into(),
            "amina@example.com".into(),
            "$2b$12$hash".into(),
        );
        let group = Group::new(
            Some("ext-42".into()),
            "Sellers".into(),
            "Weekly deals".into(),
            false,
            "https://chat.whatsapp.com/abc".into(),
        );
        let gid = group.id.clone();
        user.groups.push(group);
        (user, gid)
    }

    #[test]
    fn new_user_starts_empty_at_version_zero() {
        let user = User::register("A".into(), "1".into(), "a@b.c".into(), "h".into());
        assert!(user.groups.is_empty());
        assert!(user.communities.is_empty());
        assert_eq!(user.version, 0);
    }

    #[test]
    fn group_lookup_is_by_storage_id_not_group_ref() {
        let (user, gid) = user_with_group();
        assert_eq!(user.group(&gid).unwrap().group_name, "Sellers");
        // The external reference must not work as a lookup key.
        assert!(user.group("ext-42").is_err());
    }

    #[test]
    fn remove_group_removes_exactly_one() {
        let (mut user, gid) = user_with_group();
        let other = Group::new(None, "Other".into(), "d".into(), true, "l".into());
        let other_id = other.id.clone();
        user.groups.push(other);

        user.remove_group(&gid).unwrap();
        assert_eq!(user.groups.len(), 1);
        assert_eq!(user.groups[0].id, other_id);
    }

    #[test]
    fn remove_missing_group_is_not_found_and_does_not_mutate() {
        let (mut user, _) = user_with_group();
        let before = user.groups.clone();
        let err = user.remove_group("nope").unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "group", .. }));
        assert_eq!(user.groups, before);
    }

    #[test]
    fn new_group_starts_with_no_templates() {
        let group = Group::new(None, "G".into(), "d".into(), false, "l".into());
        assert!(group.templates.is_empty());
    }

    #[test]
    fn template_update_touches_only_the_target() {
        let (mut user, gid) = user_with_group();
        let group = user.group_mut(&gid).unwrap();
        let t1 = group.add_template("hello".into()).id.clone();
        let t2 = group.add_template("world".into()).id.clone();

        group.template_mut(&t1).unwrap().content = "bonjour".into();
        assert_eq!(group.template(&t1).unwrap().content, "bonjour");
        assert_eq!(group.template(&t2).unwrap().content, "world");
    }

    #[test]
    fn answer_snapshots_current_question_set() {
        let mut community = Community {
            id: "c1".into(),
            group_name: "Traders".into(),
            description: None,
            banner: None,
            display_profile: None,
            group_rules: None,
            paid: false,
            group_link: "link".into(),
            number_add: None,
            group_ref: None,
            question_set: vec!["Why join?".into()],
            answer_set: Vec::new(),
            events: Vec::new(),
        };

        let answer_id = community.add_answer(vec!["Deals".into()]).id.clone();
        community.update_question(0, "Who referred you?".into()).unwrap();

        let stored = community.answer(&answer_id).unwrap();
        assert_eq!(stored.question, vec!["Why join?".to_string()]);
        assert_eq!(stored.answer, vec!["Deals".to_string()]);
    }

    #[test]
    fn question_update_rejects_out_of_range_index() {
        let mut community = Community {
            id: "c1".into(),
            group_name: "T".into(),
            description: None,
            banner: None,
            display_profile: None,
            group_rules: None,
            paid: false,
            group_link: "l".into(),
            number_add: None,
            group_ref: None,
            question_set: vec!["q".into()],
            answer_set: Vec::new(),
            events: Vec::new(),
        };
        let err = community.update_question(1, "x".into()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
