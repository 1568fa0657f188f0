//! Integration tests across the auth core and the in-memory stores.
//!
//! Tests: register → login → token → admin gate → ownership-scoped orders
//!
//! Verifies:
//! - Credentials round-trip through the store and the token service
//! - Role changes take effect on the very next admin check
//! - Order ownership hides foreign orders behind "not found"

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bazaar_auth::{
        AuthService, AuthzError, CredentialStore, OwnershipScope, PasswordHasher, SigningKey,
        TokenService, authorize_admin,
    };
    use bazaar_core::{OrderId, ProductId, StoreError};
    use bazaar_products::ProductDraft;

    use crate::{InMemoryCredentialStore, InMemoryOrderStore, InMemoryProductStore, OrderStore, ProductStore};

    fn setup() -> (Arc<InMemoryCredentialStore>, AuthService) {
        let store = Arc::new(InMemoryCredentialStore::new());
        let tokens = Arc::new(TokenService::new(&SigningKey::new("integration-secret").unwrap()));
        let hasher = PasswordHasher::with_cost(8, 1, 1).unwrap();
        let auth = AuthService::new(store.clone(), hasher, tokens).unwrap();
        (store, auth)
    }

    #[tokio::test]
    async fn promotion_takes_effect_on_next_check() {
        let (store, auth) = setup();
        let alice = auth.register("alice@example.com", "secret123").await.unwrap();
        let issued = auth.login("alice@example.com", "secret123").await.unwrap();
        let user_id = auth.tokens().verify(&issued.token).unwrap();
        assert_eq!(user_id, alice);

        let denied = authorize_admin(user_id, store.find_admin_flag(user_id).await);
        assert_eq!(denied, Err(AuthzError::Forbidden));

        store.set_admin(alice, true).unwrap();
        assert!(authorize_admin(user_id, store.find_admin_flag(user_id).await).is_ok());

        store.set_admin(alice, false).unwrap();
        assert_eq!(
            authorize_admin(user_id, store.find_admin_flag(user_id).await),
            Err(AuthzError::Forbidden)
        );
    }

    #[tokio::test]
    async fn deleted_user_token_still_verifies_but_admin_gate_fails_closed() {
        let (store, auth) = setup();
        let alice = auth.register("alice@example.com", "secret123").await.unwrap();
        store.set_admin(alice, true).unwrap();
        let issued = auth.login("alice@example.com", "secret123").await.unwrap();

        store.remove_user(alice).unwrap();

        let user_id = auth.tokens().verify(&issued.token).unwrap();
        assert!(matches!(
            authorize_admin(user_id, store.find_admin_flag(user_id).await),
            Err(AuthzError::Indeterminate(_))
        ));
    }

    #[tokio::test]
    async fn orders_are_private_to_their_owner() {
        let (_store, auth) = setup();
        let alice = auth.register("alice@example.com", "secret123").await.unwrap();
        let bob = auth.register("bob@example.com", "hunter22").await.unwrap();

        let products = InMemoryProductStore::new();
        let widget = products
            .create(ProductDraft::new("Widget", "", 500).unwrap())
            .await
            .unwrap();

        let orders = InMemoryOrderStore::new();
        let order = orders.place(alice, widget.id).await.unwrap();

        let bob_on_alices = orders.cancel(order.id, OwnershipScope::owner(bob)).await;
        let bob_on_missing = orders
            .cancel(OrderId::from_raw(9999), OwnershipScope::owner(bob))
            .await;
        assert_eq!(bob_on_alices, Err(StoreError::NotFound));
        assert_eq!(bob_on_alices, bob_on_missing);

        assert!(orders.list_for_owner(bob).await.unwrap().is_empty());
        assert_eq!(orders.list_for_owner(alice).await.unwrap().len(), 1);
        assert_eq!(products.get(ProductId::from_raw(2)).await, Err(StoreError::NotFound));
    }
}
