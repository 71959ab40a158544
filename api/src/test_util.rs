use std::sync::Arc;

use adapter::{database::ConnectionPool, redis::RedisClient};
use kernel::model::{auth::AccessToken, user::User};
use registry::AppRegistry;
use shared::config::{AppConfig, AuthConfig, DatabaseConfig, RedisConfig};

use crate::extractor::AuthorizedUser;

// ハンドラーを直接呼び出すテスト用に AppRegistry を組み立てる
// redis への接続は遅延されるため、セッションを使わないテストでは不要
pub fn test_registry(pool: sqlx::PgPool) -> AppRegistry {
    let config = AppConfig {
        database: DatabaseConfig {
            host: "localhost".into(),
            port: 5432,
            username: "app".into(),
            password: "passwd".into(),
            database: "app".into(),
        },
        redis: RedisConfig {
            host: "localhost".into(),
            port: 6379,
        },
        auth: AuthConfig { ttl: 86400 },
    };
    let kv = Arc::new(RedisClient::new(&config.redis).unwrap());
    AppRegistry::new(ConnectionPool::new(pool), kv, config)
}

// extractor を通さずに認証済みユーザーを組み立てる
pub fn authorized_user(user_id: &str) -> AuthorizedUser {
    AuthorizedUser {
        access_token: AccessToken("test-access-token".into()),
        user: User {
            user_id: user_id.parse().unwrap(),
            user_name: "Test User".into(),
            email: "test@example.com".into(),
        },
    }
}
