//! Group service: group and template CRUD on the user aggregate.

use std::sync::Arc;

use tracing::info;

use crate::application::services::{load_user, mutate_user};
use crate::domain::{DomainResult, Group, GroupPatch, NewGroup, Template, UserStore};
use crate::shared::retry::RetryConfig;

pub struct GroupService {
    store: Arc<dyn UserStore>,
    retry: RetryConfig,
}

impl GroupService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store,
            retry: RetryConfig::default(),
        }
    }

    // ── Groups ──────────────────────────────────────────────────

    pub async fn list_groups(&self, user_id: &str) -> DomainResult<Vec<Group>> {
        Ok(load_user(&self.store, user_id).await?.groups)
    }

    pub async fn get_group(&self, user_id: &str, group_id: &str) -> DomainResult<Group> {
        let user = load_user(&self.store, user_id).await?;
        user.group(group_id).cloned()
    }

    /// Append a new group (templates start empty) and return it with its
    /// assigned id.
    pub async fn add_group(&self, user_id: &str, new: NewGroup) -> DomainResult<Group> {
        let group = mutate_user(&self.store, &self.retry, user_id, "add_group", |user| {
            let group = Group::new(
                new.group_ref.clone(),
                new.group_name.clone(),
                new.description.clone(),
                new.paid,
                new.group_link.clone(),
            );
            user.groups.push(group.clone());
            Ok(group)
        })
        .await?;

        info!(user_id, group_id = %group.id, "Group added");
        Ok(group)
    }

    /// Overwrite only the fields present in the patch.
    pub async fn update_group(
        &self,
        user_id: &str,
        group_id: &str,
        patch: GroupPatch,
    ) -> DomainResult<Group> {
        mutate_user(&self.store, &self.retry, user_id, "update_group", |user| {
            let group = user.group_mut(group_id)?;
            if let Some(name) = patch.group_name.clone() {
                group.group_name = name;
            }
            if let Some(description) = patch.description.clone() {
                group.description = description;
            }
            if let Some(paid) = patch.paid {
                group.paid = paid;
            }
            if let Some(link) = patch.group_link.clone() {
                group.group_link = link;
            }
            Ok(group.clone())
        })
        .await
    }

    pub async fn remove_group(&self, user_id: &str, group_id: &str) -> DomainResult<()> {
        mutate_user(&self.store, &self.retry, user_id, "remove_group", |user| {
            user.remove_group(group_id).map(|_| ())
        })
        .await?;

        info!(user_id, group_id, "Group removed");
        Ok(())
    }

    // ── Templates ───────────────────────────────────────────────

    pub async fn list_templates(
        &self,
        user_id: &str,
        group_id: &str,
    ) -> DomainResult<Vec<Template>> {
        let user = load_user(&self.store, user_id).await?;
        Ok(user.group(group_id)?.templates.clone())
    }

    pub async fn get_template(
        &self,
        user_id: &str,
        group_id: &str,
        template_id: &str,
    ) -> DomainResult<Template> {
        let user = load_user(&self.store, user_id).await?;
        user.group(group_id)?.template(template_id).cloned()
    }

    pub async fn add_template(
        &self,
        user_id: &str,
        group_id: &str,
        content: String,
    ) -> DomainResult<Template> {
        mutate_user(&self.store, &self.retry, user_id, "add_template", |user| {
            let group = user.group_mut(group_id)?;
            Ok(group.add_template(content.clone()).clone())
        })
        .await
    }

    pub async fn update_template(
        &self,
        user_id: &str,
        group_id: &str,
        template_id: &str,
        content: String,
    ) -> DomainResult<Template> {
        mutate_user(
            &self.store,
            &self.retry,
            user_id,
            "update_template",
            |user| {
                let template = user.group_mut(group_id)?.template_mut(template_id)?;
                template.content = content.clone();
                Ok(template.clone())
            },
        )
        .await
    }

    pub async fn remove_template(
        &self,
        user_id: &str,
        group_id: &str,
        template_id: &str,
    ) -> DomainResult<()> {
        mutate_user(
            &self.store,
            &self.retry,
            user_id,
            "remove_template",
            |user| {
                user.group_mut(group_id)?
                    .remove_template(template_id)
                    .map(|_| ())
            },
        )
        .await
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, RegisterUser, User};
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::SeaOrmUserStore;
    use sea_orm::{ConnectOptions, Database};
    use sea_orm_migration::MigratorTrait;

    async fn setup() -> (Arc<dyn UserStore>, GroupService, String) {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1);
        let db = Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let store: Arc<dyn UserStore> = Arc::new(SeaOrmUserStore::new(db));
        let input = RegisterUser {
            name: "Chidi".into(),
            whatsapp_number: "2347000000000".into(),
            email: "chidi@example.com".into(),
            password: "irrelevant-here".into(),
        };
        let user = User::register(
            input.name,
            input.whatsapp_number,
            input.email,
            "$2b$12$hash".into(),
        );
        store.insert(&user).await.unwrap();

        let service = GroupService::new(store.clone());
        (store, service, user.id)
    }

    fn new_group(name: &str) -> NewGroup {
        NewGroup {
            group_ref: None,
            group_name: name.into(),
            description: "a group".into(),
            paid: false,
            group_link: "https://chat.whatsapp.com/x".into(),
        }
    }

    #[tokio::test]
    async fn add_group_appends_with_assigned_id() {
        let (_, svc, uid) = setup().await;

        svc.add_group(&uid, new_group("First")).await.unwrap();
        let created = svc.add_group(&uid, new_group("Second")).await.unwrap();
        assert!(!created.id.is_empty());
        assert!(created.templates.is_empty());

        let groups = svc.list_groups(&uid).await.unwrap();
        assert_eq!(groups.len(), 2);
        // New group lands at the end of the sequence.
        assert_eq!(groups.last().unwrap().group_name, "Second");
        assert_eq!(groups.last().unwrap().id, created.id);
    }

    #[tokio::test]
    async fn add_group_for_missing_user_is_not_found() {
        let (_, svc, _) = setup().await;
        let err = svc.add_group("ghost", new_group("G")).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "user", .. }));
    }

    #[tokio::test]
    async fn update_group_preserves_unpatched_fields() {
        let (_, svc, uid) = setup().await;
        let group = svc.add_group(&uid, new_group("Orig")).await.unwrap();

        let patch = GroupPatch {
            description: Some("new description".into()),
            ..GroupPatch::default()
        };
        let updated = svc.update_group(&uid, &group.id, patch).await.unwrap();

        assert_eq!(updated.group_name, "Orig");
        assert_eq!(updated.description, "new description");
        assert_eq!(updated.group_link, group.group_link);
    }

    #[tokio::test]
    async fn remove_group_removes_exactly_that_group() {
        let (_, svc, uid) = setup().await;
        let keep = svc.add_group(&uid, new_group("Keep")).await.unwrap();
        let drop = svc.add_group(&uid, new_group("Drop")).await.unwrap();

        svc.remove_group(&uid, &drop.id).await.unwrap();

        let groups = svc.list_groups(&uid).await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].id, keep.id);

        // Second delete of the same id is NotFound, not a silent no-op,
        // and leaves the sequence untouched.
        let err = svc.remove_group(&uid, &drop.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "group", .. }));
        assert_eq!(svc.list_groups(&uid).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn template_update_leaves_siblings_untouched() {
        let (_, svc, uid) = setup().await;
        let group = svc.add_group(&uid, new_group("G")).await.unwrap();

        let t1 = svc.add_template(&uid, &group.id, "one".into()).await.unwrap();
        let t2 = svc.add_template(&uid, &group.id, "two".into()).await.unwrap();

        svc.update_template(&uid, &group.id, &t1.id, "uno".into())
            .await
            .unwrap();

        let templates = svc.list_templates(&uid, &group.id).await.unwrap();
        assert_eq!(templates.len(), 2);
        assert_eq!(templates[0].content, "uno");
        let sibling = templates.iter().find(|t| t.id == t2.id).unwrap();
        assert_eq!(sibling, &t2);
    }

    #[tokio::test]
    async fn concurrent_template_appends_are_all_persisted() {
        let (_, svc, uid) = setup().await;
        let group = svc.add_group(&uid, new_group("Busy")).await.unwrap();

        let svc = Arc::new(svc);
        let mut tasks = Vec::new();
        for i in 0..8 {
            let svc = svc.clone();
            let uid = uid.clone();
            let gid = group.id.clone();
            tasks.push(tokio::spawn(async move {
                svc.add_template(&uid, &gid, format!("template {}", i)).await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let templates = svc.list_templates(&uid, &group.id).await.unwrap();
        assert_eq!(templates.len(), 8);
    }
}
