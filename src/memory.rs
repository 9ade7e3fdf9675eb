//! In-process store used by `AppState::fake()` and the test suites.

use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    auth::{
        repo::UserStore,
        repo_types::{NewUser, User},
    },
    db::StoreError,
    orders::{
        model::OrderStatus,
        repo::OrderStore,
        repo_types::{NewOrder, Order, OrderContents},
    },
};

#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<RwLock<Vec<User>>>,
    orders: Arc<RwLock<Vec<Order>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> anyhow::Result<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::unique("users_username_key").into());
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::unique("users_email_key").into());
        }
        let created = User {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            is_active: user.is_active,
            is_admin: user.is_admin,
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn list(&self) -> anyhow::Result<Vec<User>> {
        Ok(self.users.read().await.clone())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn find(&self, id: Uuid) -> anyhow::Result<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.iter().find(|o| o.id == id).cloned())
    }

    async fn create(&self, order: NewOrder) -> anyhow::Result<Order> {
        let owner_exists = self
            .users
            .read()
            .await
            .iter()
            .any(|u| u.id == order.owner_id);
        if !owner_exists {
            anyhow::bail!("owner {} does not exist", order.owner_id);
        }
        let created = Order {
            id: Uuid::new_v4(),
            quantity: order.quantity,
            dish: order.dish,
            stew: order.stew,
            status: OrderStatus::default(),
            owner_id: order.owner_id,
            created_at: OffsetDateTime::now_utc(),
        };
        self.orders.write().await.push(created.clone());
        Ok(created)
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Order>> {
        Ok(self.orders.read().await.clone())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(orders
            .iter()
            .filter(|o| o.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn update_contents(
        &self,
        id: Uuid,
        contents: OrderContents,
    ) -> anyhow::Result<Option<Order>> {
        let mut orders = self.orders.write().await;
        Ok(orders.iter_mut().find(|o| o.id == id).map(|o| {
            o.quantity = contents.quantity;
            o.dish = contents.dish;
            o.stew = contents.stew;
            o.clone()
        }))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> anyhow::Result<Option<Order>> {
        let mut orders = self.orders.write().await;
        Ok(orders.iter_mut().find(|o| o.id == id).map(|o| {
            o.status = status;
            o.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut orders = self.orders.write().await;
        let before = orders.len();
        orders.retain(|o| o.id != id);
        Ok(orders.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::model::{Dish, Stew};

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.into(),
            email: email.into(),
            password_hash: "hash".into(),
            is_active: true,
            is_admin: false,
        }
    }

    #[tokio::test]
    async fn user_uniqueness_is_enforced() {
        let store = MemoryStore::new();
        UserStore::create(&store, new_user("alice", "a@x.com"))
            .await
            .unwrap();

        let err = UserStore::create(&store, new_user("alice", "other@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::UniqueViolation { constraint }) if constraint.contains("username")
        ));

        let err = UserStore::create(&store, new_user("alicia", "a@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::UniqueViolation { constraint }) if constraint.contains("email")
        ));
    }

    #[tokio::test]
    async fn order_requires_existing_owner() {
        let store = MemoryStore::new();
        let res = OrderStore::create(
            &store,
            NewOrder {
                owner_id: Uuid::new_v4(),
                quantity: 1,
                dish: Dish::Sope,
                stew: Stew::Pollo,
            },
        )
        .await;
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_ids() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        assert!(store
            .update_status(id, OrderStatus::Entregado)
            .await
            .unwrap()
            .is_none());
        assert!(!store.delete(id).await.unwrap());
    }
}
