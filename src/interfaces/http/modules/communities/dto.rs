//! Community, answer and event DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Answer, Community, CommunityPatch, Event, NewCommunity, NewEvent};

#[derive(Debug, Serialize, ToSchema)]
pub struct CommunityDto {
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
    pub question_set: Vec<String>,
    pub answer_set: Vec<AnswerDto>,
    pub events: Vec<EventDto>,
}

impl From<Community> for CommunityDto {
    fn from(c: Community) -> Self {
        Self {
            id: c.id,
            group_name: c.group_name,
            description: c.description,
            banner: c.banner,
            display_profile: c.display_profile,
            group_rules: c.group_rules,
            paid: c.paid,
            group_link: c.group_link,
            number_add: c.number_add,
            group_ref: c.group_ref,
            question_set: c.question_set,
            answer_set: c.answer_set.into_iter().map(AnswerDto::from).collect(),
            events: c.events.into_iter().map(EventDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnswerDto {
    pub id: String,
    /// Questions as they stood at submission time.
    pub question: Vec<String>,
    pub answer: Vec<String>,
    pub submitted_at: DateTime<Utc>,
}

impl From<Answer> for AnswerDto {
    fn from(a: Answer) -> Self {
        Self {
            id: a.id,
            question: a.question,
            answer: a.answer,
            submitted_at: a.submitted_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EventDto {
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

impl From<Event> for EventDto {
    fn from(e: Event) -> Self {
        Self {
            id: e.id,
            title: e.title,
            date: e.date,
            time: e.time,
            duration: e.duration,
            location: e.location,
            location_details: e.location_details,
            details: e.details,
            cover_image: e.cover_image,
            paid: e.paid,
            amount: e.amount,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommunityRequest {
    #[validate(length(min = 1, max = 100))]
    pub group_name: String,
    pub description: Option<String>,
    pub banner: Option<String>,
    pub display_profile: Option<String>,
    pub group_rules: Option<String>,
    #[serde(default)]
    pub paid: bool,
    #[validate(url)]
    pub group_link: String,
    pub number_add: Option<bool>,
    pub group_ref: Option<String>,
    #[serde(default)]
    pub question_set: Vec<String>,
}

impl From<CreateCommunityRequest> for NewCommunity {
    fn from(r: CreateCommunityRequest) -> Self {
        Self {
            group_name: r.group_name,
            description: r.description,
            banner: r.banner,
            display_profile: r.display_profile,
            group_rules: r.group_rules,
            paid: r.paid,
            group_link: r.group_link,
            number_add: r.number_add,
            group_ref: r.group_ref,
            question_set: r.question_set,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCommunityRequest {
    #[validate(length(min = 1, max = 100))]
    pub group_name: Option<String>,
    pub description: Option<String>,
    pub banner: Option<String>,
    pub display_profile: Option<String>,
    pub group_rules: Option<String>,
    pub paid: Option<bool>,
    #[validate(url)]
    pub group_link: Option<String>,
    pub number_add: Option<bool>,
}

impl From<UpdateCommunityRequest> for CommunityPatch {
    fn from(r: UpdateCommunityRequest) -> Self {
        Self {
            group_name: r.group_name,
            description: r.description,
            banner: r.banner,
            display_profile: r.display_profile,
            group_rules: r.group_rules,
            paid: r.paid,
            group_link: r.group_link,
            number_add: r.number_add,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateQuestionRequest {
    #[validate(length(min = 1, max = 500))]
    pub question: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitAnswerRequest {
    #[validate(length(min = 1))]
    pub answer: Vec<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub date: String,
    #[validate(length(min = 1))]
    pub time: String,
    #[validate(length(min = 1))]
    pub duration: String,
    #[validate(length(min = 1))]
    pub location: String,
    pub location_details: String,
    pub details: String,
    pub cover_image: String,
    pub paid: bool,
    pub amount: f64,
}

impl From<CreateEventRequest> for NewEvent {
    fn from(r: CreateEventRequest) -> Self {
        Self {
            title: r.title,
            date: r.date,
            time: r.time,
            duration: r.duration,
            location: r.location,
            location_details: r.location_details,
            details: r.details,
            cover_image: r.cover_image,
            paid: r.paid,
            amount: r.amount,
        }
    }
}
