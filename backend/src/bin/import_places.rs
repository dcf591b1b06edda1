//! Import a landmark export into the places table.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use fun_facts_backend::domain::PlaceImportService;
use fun_facts_backend::outbound::persistence::{
    DbPool, DieselPlaceRepository, PoolConfig, run_pending_migrations,
};
use fun_facts_backend::seeding::read_landmark_export;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `import-places` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "import-places",
    about = "Load a JSON landmark export into the places catalogue",
    version
)]
struct CliArgs {
    /// Path to the landmark export (a JSON array of landmark objects).
    #[arg(long = "input", value_name = "path")]
    input: PathBuf,
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// Skip applying pending migrations before importing.
    #[arg(long = "skip-migrations")]
    skip_migrations: bool,
}

fn main() -> io::Result<()> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(error = %error, "tracing init failed");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let export = read_landmark_export(&args.input).map_err(io::Error::other)?;

    let database_url = resolve_database_url(args.database_url)?;
    if !args.skip_migrations {
        run_pending_migrations(&database_url)
            .await
            .map_err(|error| io::Error::other(format!("apply migrations: {error}")))?;
    }
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;

    let repository = Arc::new(DieselPlaceRepository::new(pool));
    let report = PlaceImportService::new(repository)
        .import_json(&export)
        .await
        .map_err(|error| io::Error::other(format!("import command failed: {error}")))?;

    println!("input={}", args.input.display());
    println!("imported_count={}", report.imported);
    println!(
        "categories={}",
        report
            .categories
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",")
    );

    Ok(())
}

fn resolve_database_url(explicit: Option<String>) -> io::Result<String> {
    resolve_database_url_from(explicit, env::var("DATABASE_URL").ok())
}

fn resolve_database_url_from(
    explicit: Option<String>,
    from_env: Option<String>,
) -> io::Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--database-url must not be empty when provided",
            ));
        }
        return Ok(value);
    }

    let value = from_env.ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "database URL missing: set --database-url or DATABASE_URL",
        )
    })?;
    if value.trim().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "DATABASE_URL must not be empty",
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI parsing helpers.

    use clap::Parser;
    use rstest::rstest;

    use super::{CliArgs, resolve_database_url_from};

    #[rstest]
    fn explicit_database_url_wins() {
        let url = resolve_database_url_from(
            Some("postgres://cli".to_owned()),
            Some("postgres://env".to_owned()),
        )
        .expect("explicit URL should resolve");
        assert_eq!(url, "postgres://cli");
    }

    #[rstest]
    fn falls_back_to_environment() {
        let url = resolve_database_url_from(None, Some("postgres://env".to_owned()))
            .expect("env URL should resolve");
        assert_eq!(url, "postgres://env");
    }

    #[rstest]
    #[case(Some("   ".to_owned()), None, "must not be empty when provided")]
    #[case(None, None, "database URL missing")]
    #[case(None, Some(String::new()), "DATABASE_URL must not be empty")]
    fn rejects_missing_or_blank_urls(
        #[case] explicit: Option<String>,
        #[case] from_env: Option<String>,
        #[case] expected: &str,
    ) {
        let error = resolve_database_url_from(explicit, from_env).expect_err("should fail");
        assert!(error.to_string().contains(expected));
    }

    #[rstest]
    fn input_flag_is_required() {
        let result = CliArgs::try_parse_from(["import-places"]);
        assert!(result.is_err());
    }

    #[rstest]
    fn parses_all_flags() {
        let args = CliArgs::try_parse_from([
            "import-places",
            "--input",
            "landmarks.json",
            "--database-url",
            "postgres://localhost/facts",
            "--skip-migrations",
        ])
        .expect("arguments should parse");
        assert_eq!(args.input.to_str(), Some("landmarks.json"));
        assert_eq!(args.database_url.as_deref(), Some("postgres://localhost/facts"));
        assert!(args.skip_migrations);
    }
}
