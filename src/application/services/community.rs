//! Community service: community CRUD plus questions, answers and events.

use std::sync::Arc;

use tracing::info;

use crate::application::services::{load_user, mutate_user};
use crate::domain::{
    Answer, Community, CommunityPatch, DomainResult, Event, NewCommunity, NewEvent, UserStore,
};
use crate::shared::retry::RetryConfig;

pub struct CommunityService {
    store: Arc<dyn UserStore>,
    retry: RetryConfig,
}

impl CommunityService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store,
            retry: RetryConfig::default(),
        }
    }

    // ── Communities ─────────────────────────────────────────────

    pub async fn list_communities(&self, user_id: &str) -> DomainResult<Vec<Community>> {
        Ok(load_user(&self.store, user_id).await?.communities)
    }

    pub async fn get_community(
        &self,
        user_id: &str,
        community_id: &str,
    ) -> DomainResult<Community> {
        let user = load_user(&self.store, user_id).await?;
        user.community(community_id).cloned()
    }

    /// Append a new community (answers and events start empty) and return
    /// it with its assigned id.
    pub async fn add_community(
        &self,
        user_id: &str,
        new: NewCommunity,
    ) -> DomainResult<Community> {
        let community = mutate_user(
            &self.store,
            &self.retry,
            user_id,
            "add_community",
            |user| {
                let community = Community {
                    id: uuid::Uuid::new_v4().to_string(),
                    group_name: new.group_name.clone(),
                    description: new.description.clone(),
                    banner: new.banner.clone(),
                    display_profile: new.display_profile.clone(),
                    group_rules: new.group_rules.clone(),
                    paid: new.paid,
                    group_link: new.group_link.clone(),
                    number_add: new.number_add,
                    group_ref: new.group_ref.clone(),
                    question_set: new.question_set.clone(),
                    answer_set: Vec::new(),
                    events: Vec::new(),
                };
                user.communities.push(community.clone());
                Ok(community)
            },
        )
        .await?;

        info!(user_id, community_id = %community.id, "Community added");
        Ok(community)
    }

    /// Overwrite only the fields present in the patch. The question set is
    /// managed through `update_question`, never through the patch.
    pub async fn update_community(
        &self,
        user_id: &str,
        community_id: &str,
        patch: CommunityPatch,
    ) -> DomainResult<Community> {
        mutate_user(
            &self.store,
            &self.retry,
            user_id,
            "update_community",
            |user| {
                let community = user.community_mut(community_id)?;
                if let Some(name) = patch.group_name.clone() {
                    community.group_name = name;
                }
                if let Some(description) = patch.description.clone() {
                    community.description = Some(description);
                }
                if let Some(banner) = patch.banner.clone() {
                    community.banner = Some(banner);
                }
                if let Some(display_profile) = patch.display_profile.clone() {
                    community.display_profile = Some(display_profile);
                }
                if let Some(rules) = patch.group_rules.clone() {
                    community.group_rules = Some(rules);
                }
                if let Some(paid) = patch.paid {
                    community.paid = paid;
                }
                if let Some(link) = patch.group_link.clone() {
                    community.group_link = link;
                }
                if let Some(number_add) = patch.number_add {
                    community.number_add = Some(number_add);
                }
                Ok(community.clone())
            },
        )
        .await
    }

    pub async fn remove_community(
        &self,
        user_id: &str,
        community_id: &str,
    ) -> DomainResult<()> {
        mutate_user(
            &self.store,
            &self.retry,
            user_id,
            "remove_community",
            |user| user.remove_community(community_id).map(|_| ()),
        )
        .await?;

        info!(user_id, community_id, "Community removed");
        Ok(())
    }

    // ── Questions & answers ─────────────────────────────────────

    pub async fn questions(
        &self,
        user_id: &str,
        community_id: &str,
    ) -> DomainResult<Vec<String>> {
        let user = load_user(&self.store, user_id).await?;
        Ok(user.community(community_id)?.question_set.clone())
    }

    /// Overwrite the question at `index`; out-of-range is a Validation
    /// error.
    pub async fn update_question(
        &self,
        user_id: &str,
        community_id: &str,
        index: usize,
        question: String,
    ) -> DomainResult<Vec<String>> {
        mutate_user(
            &self.store,
            &self.retry,
            user_id,
            "update_question",
            |user| {
                let community = user.community_mut(community_id)?;
                community.update_question(index, question.clone())?;
                Ok(community.question_set.clone())
            },
        )
        .await
    }

    /// Append an answer, snapshotting the community's current question
    /// set. The answer count is not validated against the question count.
    pub async fn add_answer(
        &self,
        user_id: &str,
        community_id: &str,
        answer: Vec<String>,
    ) -> DomainResult<Answer> {
        mutate_user(&self.store, &self.retry, user_id, "add_answer", |user| {
            let community = user.community_mut(community_id)?;
            Ok(community.add_answer(answer.clone()).clone())
        })
        .await
    }

    pub async fn get_answer(
        &self,
        user_id: &str,
        community_id: &str,
        answer_id: &str,
    ) -> DomainResult<Answer> {
        let user = load_user(&self.store, user_id).await?;
        user.community(community_id)?.answer(answer_id).cloned()
    }

    // ── Events ──────────────────────────────────────────────────

    pub async fn list_events(
        &self,
        user_id: &str,
        community_id: &str,
    ) -> DomainResult<Vec<Event>> {
        let user = load_user(&self.store, user_id).await?;
        Ok(user.community(community_id)?.events.clone())
    }

    pub async fn add_event(
        &self,
        user_id: &str,
        community_id: &str,
        new: NewEvent,
    ) -> DomainResult<Event> {
        mutate_user(&self.store, &self.retry, user_id, "add_event", |user| {
            let community = user.community_mut(community_id)?;
            let event = Event {
                id: uuid::Uuid::new_v4().to_string(),
                title: new.title.clone(),
                date: new.date.clone(),
                time: new.time.clone(),
                duration: new.duration.clone(),
                location: new.location.clone(),
                location_details: new.location_details.clone(),
                details: new.details.clone(),
                cover_image: new.cover_image.clone(),
                paid: new.paid,
                amount: new.amount,
            };
            community.events.push(event.clone());
            Ok(event)
        })
        .await
    }

    pub async fn get_event(
        &self,
        user_id: &str,
        community_id: &str,
        event_id: &str,
    ) -> DomainResult<Event> {
        let user = load_user(&self.store, user_id).await?;
        user.community(community_id)?.event(event_id).cloned()
    }

    pub async fn remove_event(
        &self,
        user_id: &str,
        community_id: &str,
        event_id: &str,
    ) -> DomainResult<()> {
        mutate_user(&self.store, &self.retry, user_id, "remove_event", |user| {
            user.community_mut(community_id)?
                .remove_event(event_id)
                .map(|_| ())
        })
        .await
    }
}

// ── Tests ──────────────────────────────────────────────────────
