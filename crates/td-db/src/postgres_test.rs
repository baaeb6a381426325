use super::*;
use ::postgres::config::Host;
use td_core::SslMode;

fn params_config() -> DatabaseConfig {
    DatabaseConfig {
        host: Some("db.acme.example".to_string()),
        user: Some("admin".to_string()),
        password: Some("secret".to_string()),
        dbname: "quiz".to_string(),
        port: 6543,
        ..DatabaseConfig::default()
    }
}

#[test]
fn test_build_from_params() {
    let pg = build_pg_config(&params_config()).unwrap();
    assert_eq!(pg.get_hosts(), &[Host::Tcp("db.acme.example".to_string())]);
    assert_eq!(pg.get_ports(), &[6543]);
    assert_eq!(pg.get_dbname(), Some("quiz"));
    assert_eq!(pg.get_user(), Some("admin"));
    assert_eq!(pg.get_password(), Some(&b"secret"[..]));
    assert_eq!(pg.get_application_name(), Some(APPLICATION_NAME));
}

#[test]
fn test_build_from_url() {
    let config = DatabaseConfig::from_url("postgres://admin:pw@db.beta.example:5432/postgres");
    let pg = build_pg_config(&config).unwrap();
    assert_eq!(pg.get_hosts(), &[Host::Tcp("db.beta.example".to_string())]);
    assert_eq!(pg.get_user(), Some("admin"));
    assert_eq!(pg.get_password(), Some(&b"pw"[..]));
}

#[test]
fn test_tls_forced_even_when_url_disables_it() {
    let config = DatabaseConfig::from_url("postgres://admin@db.example/postgres?sslmode=disable");
    let pg = build_pg_config(&config).unwrap();
    assert_eq!(pg.get_ssl_mode(), PgSslMode::Require);
}

#[test]
fn test_connect_timeout_applied() {
    let config = DatabaseConfig {
        connect_timeout_secs: 7,
        ..params_config()
    };
    let pg = build_pg_config(&config).unwrap();
    assert_eq!(
        pg.get_connect_timeout(),
        Some(&std::time::Duration::from_secs(7))
    );
}

#[test]
fn test_url_connect_timeout_wins() {
    let pg = build_pg_config(&DatabaseConfig::from_url(
        "postgresql://admin@db.acme.example/quiz?connect_timeout=2",
    ))
    .unwrap();
    assert_eq!(
        pg.get_connect_timeout(),
        Some(&std::time::Duration::from_secs(2))
    );

    let pg = build_pg_config(&DatabaseConfig::from_url(
        "postgresql://admin@db.acme.example/quiz",
    ))
    .unwrap();
    assert_eq!(
        pg.get_connect_timeout(),
        Some(&std::time::Duration::from_secs(30))
    );
}

#[test]
fn test_malformed_url_is_connection_error() {
    let config = DatabaseConfig::from_url("postgres://admin@db.example:notaport/postgres");
    let err = build_pg_config(&config).unwrap_err();
    assert!(matches!(err, DbError::ConnectionError(_)));
    assert!(err.to_string().contains("malformed connection string"));
}

#[test]
fn test_url_without_host_is_rejected() {
    let config = DatabaseConfig::from_url("dbname=quiz user=admin");
    let err = build_pg_config(&config).unwrap_err();
    assert!(err.to_string().contains("does not name a host"));
}

#[test]
fn test_missing_host_is_rejected() {
    let config = DatabaseConfig {
        host: None,
        ..params_config()
    };
    assert!(matches!(
        build_pg_config(&config),
        Err(DbError::ConnectionError(_))
    ));
}

#[test]
fn test_ssl_disable_is_rejected() {
    let config = DatabaseConfig {
        ssl_mode: SslMode::Disable,
        ..params_config()
    };
    let err = build_pg_config(&config).unwrap_err();
    assert!(err.to_string().contains("require TLS"));
}

#[test]
fn test_unreachable_server_is_connection_error() {
    // Port 1 on localhost refuses connections immediately.
    let config = DatabaseConfig {
        host: Some("127.0.0.1".to_string()),
        port: 1,
        connect_timeout_secs: 2,
        ..params_config()
    };
    let err = PostgresBackend::connect(&config).err().unwrap();
    assert!(matches!(err, DbError::ConnectionError(_)));
}
