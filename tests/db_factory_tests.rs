//! Tests for repository type selection and factory construction.

mod support;

use std::str::FromStr;

use climate_api::db::{ClimateRepository, RepositoryFactory, RepositoryType};
use support::with_scoped_env;

#[test]
fn test_repository_type_parses_known_names() {
    assert_eq!(
        RepositoryType::from_str("sqlite").unwrap(),
        RepositoryType::Sqlite
    );
    assert_eq!(
        RepositoryType::from_str("SQLITE").unwrap(),
        RepositoryType::Sqlite
    );
    assert_eq!(
        RepositoryType::from_str("db").unwrap(),
        RepositoryType::Sqlite
    );
    assert_eq!(
        RepositoryType::from_str("local").unwrap(),
        RepositoryType::Local
    );
    assert!(RepositoryType::from_str("mongodb").is_err());
}

#[test]
fn test_repository_type_from_env_defaults_to_local() {
    let repo_type = with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", None),
            ("CLIMATE_DATABASE_URL", None),
        ],
        RepositoryType::from_env,
    );
    assert_eq!(repo_type, RepositoryType::Local);
}

#[test]
fn test_repository_type_from_env_prefers_database_url() {
    let repo_type = with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", Some("resources/hawaii.sqlite")),
        ],
        RepositoryType::from_env,
    );
    assert_eq!(repo_type, RepositoryType::Sqlite);
}

#[test]
fn test_repository_type_env_override_wins() {
    let repo_type = with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("local")),
            ("DATABASE_URL", Some("resources/hawaii.sqlite")),
        ],
        RepositoryType::from_env,
    );
    assert_eq!(repo_type, RepositoryType::Local);
}

#[tokio::test]
async fn test_factory_creates_working_local_repository() {
    let repo = RepositoryFactory::create_local();
    assert!(repo.health_check().await.unwrap());
    assert!(repo.station_codes().await.unwrap().is_empty());
}

#[test]
fn test_factory_create_local_via_type() {
    let result = RepositoryFactory::create(RepositoryType::Local, None);
    assert!(result.is_ok());
}
