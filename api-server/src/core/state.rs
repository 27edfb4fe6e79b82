use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::orders::OrderService;
use shared::AppResult;

/// Server state - shared handle to every service
///
/// Holds the configuration, the embedded database handle and the JWT
/// service. The database handle is created once in [`ServerState::initialize`]
/// and injected into repositories and services; nothing reaches for a global.
/// `Clone` is shallow (`Surreal` and `Arc` are reference-counted).
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB over RocksDB)
    pub db: Surreal<Db>,
    /// JWT authentication service
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, db: Surreal<Db>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            db,
            jwt_service,
        }
    }

    /// Initialize the server state
    ///
    /// 1. Ensure the work directory structure exists
    /// 2. Open the database at `work_dir/database` and apply schema
    /// 3. Build the JWT service from config
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| shared::AppError::internal(format!("Failed to create work dir: {e}")))?;

        let db_service = DbService::new(&config.database_dir()).await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Ok(Self::new(config.clone(), db_service.db, jwt_service))
    }

    /// Get the database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Get the JWT service
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Build the order orchestrator over this state's database handle
    pub fn order_service(&self) -> OrderService {
        OrderService::new(self.db.clone())
    }
}
