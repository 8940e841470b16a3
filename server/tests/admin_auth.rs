//! 管理员认证集成测试：种子账号、密码校验、JWT 往返
//! Run: cargo test -p framery-server --test admin_auth

use framery_server::db::repository::AdminRepository;
use framery_server::{Config, ServerState};

fn test_config(work_dir: &std::path::Path) -> Config {
    let mut config = Config::with_overrides(work_dir.to_string_lossy(), 0);
    config.admin_username = "admin".to_string();
    config.admin_password = "seed-pass-1".to_string();
    config
}

#[tokio::test]
async fn default_admin_is_seeded_once() {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(tmp.path());
    let state = ServerState::initialize_in_memory(&config).await;

    let repo = AdminRepository::new(state.get_db());
    let user = repo.find_by_username("admin").await.unwrap().unwrap();
    assert!(user.is_active);
    assert_eq!(user.role, "admin");
    assert!(user.verify_password("seed-pass-1").unwrap());
    assert!(!user.verify_password("wrong").unwrap());

    // seeding again with a different password must not overwrite the account
    repo.seed_default_admin("admin", "other-pass").await.unwrap();
    let user = repo.find_by_username("admin").await.unwrap().unwrap();
    assert!(user.verify_password("seed-pass-1").unwrap());
}

#[tokio::test]
async fn jwt_issued_for_admin_validates_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(tmp.path());
    let state = ServerState::initialize_in_memory(&config).await;

    let jwt = state.get_jwt_service();
    let token = jwt
        .generate_token("admin_user:1", "admin", "admin")
        .unwrap();
    let claims = jwt.validate_token(&token).unwrap();
    assert_eq!(claims.sub, "admin_user:1");
    assert_eq!(claims.role, "admin");

    let current: framery_server::CurrentUser = claims.into();
    assert!(current.is_admin());
}
