use async_trait::async_trait;
use parking_lot::RwLock;

use super::{CommentStore, Result, StoreError};
use crate::{
    models::comments::{Comment, CommentFields},
    utils::{new_comment_id, now_millis},
};

/// Keeps comments in a process-local list, newest first.
#[derive(Debug, Default)]
pub struct MemoryStore {
    comments: RwLock<Vec<Comment>>,
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn create(&self, fields: CommentFields) -> Result<Comment> {
        let comment = Comment::new(new_comment_id(), fields, now_millis());
        self.comments.write().insert(0, comment.clone());
        Ok(comment)
    }

    async fn list(&self) -> Result<Vec<Comment>> {
        Ok(self.comments.read().clone())
    }

    async fn get(&self, id: &str) -> Result<Comment> {
        self.comments
            .read()
            .iter()
            .find(|comment| comment.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update(&self, id: &str, fields: CommentFields) -> Result<Comment> {
        let mut comments = self.comments.write();
        let comment = comments
            .iter_mut()
            .find(|comment| comment.id == id)
            .ok_or(StoreError::NotFound)?;
        comment.apply(fields);
        Ok(comment.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut comments = self.comments.write();
        let before = comments.len();
        comments.retain(|comment| comment.id != id);
        if comments.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::comments::Vote;

    fn fields(option: Vote, nickname: &str, comment: &str) -> CommentFields {
        CommentFields {
            option,
            nickname: nickname.to_string(),
            comment: comment.to_string(),
        }
    }

    #[actix_web::test]
    async fn create_assigns_id_and_get_finds_it() {
        let store = MemoryStore::default();
        let created = store.create(fields(Vote::Upvote, "a", "hi")).await.unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(store.get(&created.id).await.unwrap(), created);
    }

    #[actix_web::test]
    async fn list_is_newest_first() {
        let store = MemoryStore::default();
        let first = store.create(fields(Vote::Upvote, "a", "1")).await.unwrap();
        let second = store.create(fields(Vote::Downvote, "b", "2")).await.unwrap();
        let third = store.create(fields(Vote::Upvote, "c", "3")).await.unwrap();

        let ids: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|comment| comment.id)
            .collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[actix_web::test]
    async fn update_keeps_id_and_created() {
        let store = MemoryStore::default();
        let created = store.create(fields(Vote::Upvote, "a", "hi")).await.unwrap();
        let updated = store
            .update(&created.id, fields(Vote::Downvote, "b", "changed"))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created, created.created);
        assert_eq!(updated.option, Vote::Downvote);
        assert_eq!(updated.nickname, "b");
        assert_eq!(updated.comment, "changed");
        assert_eq!(store.get(&created.id).await.unwrap(), updated);
    }

    #[actix_web::test]
    async fn unknown_ids_are_not_found() {
        let store = MemoryStore::default();
        assert!(matches!(store.get("nope").await, Err(StoreError::NotFound)));
        assert!(matches!(
            store.update("nope", fields(Vote::Upvote, "a", "b")).await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(store.delete("nope").await, Err(StoreError::NotFound)));
    }

    #[actix_web::test]
    async fn delete_removes_only_the_target() {
        let store = MemoryStore::default();
        let keep = store.create(fields(Vote::Upvote, "a", "keep")).await.unwrap();
        let removed = store.create(fields(Vote::Upvote, "b", "drop")).await.unwrap();

        store.delete(&removed.id).await.unwrap();

        assert_eq!(store.list().await.unwrap(), vec![keep.clone()]);
        assert!(matches!(store.get(&removed.id).await, Err(StoreError::NotFound)));
        assert_eq!(store.get(&keep.id).await.unwrap(), keep);
    }
}
