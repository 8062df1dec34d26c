use std::sync::Arc;

use crate::{
    auth::{MemorySessionStore, SessionKeys, SessionStore},
    config::Config,
    db::{
        DbPool, balance_store::BalanceStore, product_store::ProductStore,
        purchase_store::PurchaseStore, sale_store::SaleStore, user_store::UserStore,
    },
    services::AuthService,
};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub users: UserStore,
    pub products: ProductStore,
    pub sales: SaleStore,
    pub purchases: PurchaseStore,
    pub balances: BalanceStore,
    pub sessions: Arc<dyn SessionStore>,
    pub keys: SessionKeys,
    pub auth: Arc<AuthService>,
}

impl AppState {
    /// State backed by the in-memory session store
    pub fn new(pool: DbPool, config: &Config) -> Self {
        Self::with_session_store(pool, config, Arc::new(MemorySessionStore::new()))
    }

    pub fn with_session_store(
        pool: DbPool,
        config: &Config,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let users = UserStore::new(pool.clone());
        let keys = SessionKeys::new(&config.secret_key, config.session_hours);
        let auth = Arc::new(AuthService::new(
            users.clone(),
            sessions.clone(),
            keys.clone(),
        ));

        Self {
            users,
            products: ProductStore::new(pool.clone()),
            sales: SaleStore::new(pool.clone()),
            purchases: PurchaseStore::new(pool.clone()),
            balances: BalanceStore::new(pool),
            sessions,
            keys,
            auth,
        }
    }
}
