// src/state.rs
use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::models::{
    dealer::Dealer, expense::Expense, online_order::OnlineOrder, payment::Payment, sale::Sale,
};
use crate::store::{
    MemoryRepository, MemoryUserStore, PgRepository, PgUserStore, Repository, UserStore,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dealers: Arc<dyn Repository<Dealer>>,
    pub sales: Arc<dyn Repository<Sale>>,
    pub online_orders: Arc<dyn Repository<OnlineOrder>>,
    pub payments: Arc<dyn Repository<Payment>>,
    pub expenses: Arc<dyn Repository<Expense>>,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn postgres(db_pool: PgPool, config: Config) -> Self {
        Self {
            config: Arc::new(config),
            dealers: Arc::new(PgRepository::<Dealer>::new(db_pool.clone())),
            sales: Arc::new(PgRepository::<Sale>::new(db_pool.clone())),
            online_orders: Arc::new(PgRepository::<OnlineOrder>::new(db_pool.clone())),
            payments: Arc::new(PgRepository::<Payment>::new(db_pool.clone())),
            expenses: Arc::new(PgRepository::<Expense>::new(db_pool.clone())),
            users: Arc::new(PgUserStore::new(db_pool)),
        }
    }

    pub fn in_memory(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            dealers: Arc::new(MemoryRepository::<Dealer>::new()),
            sales: Arc::new(MemoryRepository::<Sale>::new()),
            online_orders: Arc::new(MemoryRepository::<OnlineOrder>::new()),
            payments: Arc::new(MemoryRepository::<Payment>::new()),
            expenses: Arc::new(MemoryRepository::<Expense>::new()),
            users: Arc::new(MemoryUserStore::new()),
        }
    }
}
