//!
//! Wings user service entry point.
//! Reads configuration from TOML file (~/.config/wings-user-service/config.toml).

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use wings_user_service::config::AppConfig;
use wings_user_service::infrastructure::crypto::jwt::JwtConfig;
use wings_user_service::infrastructure::database::migrator::Migrator;
use wings_user_service::infrastructure::database::seed::seed_roles;
use wings_user_service::{create_api_router, default_config_path, init_database, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("WINGS_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Wings user service...");

    // ── Build sub-configs from AppConfig ───────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.url.clone(),
    };
    info!("Database: {}", db_config.url);

    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        expiration_hours: app_cfg.security.jwt_expiration_hours,
        issuer: "wings-user-service".to_string(),
    };
    info!(
        "JWT configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // The role reference table must hold the canonical rows before any
    // registration can resolve against it.
    if let Err(e) = seed_roles(&db).await {
        error!("Failed to seed roles: {}", e);
        return Err(e.into());
    }

    // Create default admin account if no accounts exist
    create_default_admin(&db, &app_cfg).await;

    // ── REST API server ────────────────────────────────────────
    let router = create_api_router(db.clone(), jwt_config);

    let addr = app_cfg.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutdown signal received");
        })
        .await?;

    // Perform final cleanup
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Wings user service shutdown complete");
    Ok(())
}

/// Create default admin account if no accounts exist
async fn create_default_admin(db: &sea_orm::DatabaseConnection, app_cfg: &AppConfig) {
    use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
    use wings_user_service::domain::RoleName;
    use wings_user_service::infrastructure::crypto::password::hash_password;
    use wings_user_service::infrastructure::database::entities::{account, account_role, role};

    let accounts_count = account::Entity::find().count(db).await.unwrap_or(0);

    if accounts_count == 0 {
        info!("Creating default admin account...");

        let admin_email = app_cfg.admin.email.clone();

        let password_hash = match hash_password(&app_cfg.admin.password) {
            Ok(hash) => hash,
            Err(e) => {
                error!("Failed to hash admin password: {}", e);
                return;
            }
        };

        let admin_role = match role::Entity::find()
            .filter(role::Column::Name.eq(RoleName::Admin.as_str()))
            .one(db)
            .await
        {
            Ok(Some(r)) => r,
            Ok(None) => {
                error!("Admin role row is missing; cannot create default admin");
                return;
            }
            Err(e) => {
                error!("Failed to look up admin role: {}", e);
                return;
            }
        };

        let now = chrono::Utc::now();
        let admin_id = uuid::Uuid::new_v4().to_string();

        let admin = account::ActiveModel {
            id: Set(admin_id.clone()),
            first_name: Set(app_cfg.admin.first_name.clone()),
            last_name: Set(app_cfg.admin.last_name.clone()),
            email: Set(admin_email.clone()),
            governorate: Set(String::new()),
            address: Set(String::new()),
            phone: Set(String::new()),
            password_hash: Set(password_hash),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match admin.insert(db).await {
            Ok(_) => {
                let assignment = account_role::ActiveModel {
                    account_id: Set(admin_id),
                    role_id: Set(admin_role.id),
                };
                if let Err(e) = assignment.insert(db).await {
                    error!("Failed to assign admin role: {}", e);
                    return;
                }
                info!("Default admin created: {}", admin_email);
                info!("Please change the admin password immediately!");
            }
            Err(e) => {
                error!("Failed to create admin account: {}", e);
            }
        }
    }
}
