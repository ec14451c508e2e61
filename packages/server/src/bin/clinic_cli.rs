//! Operator CLI for the clinic authorization tables
//!
//! Exports the role matrix for the frontend build, checks the route table
//! against the catalog in CI, and mints development tokens. Output is JSON so
//! scripts can consume it.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use uuid::Uuid;

use clinic_core::common::{ConfigurationDefect, Role, RoleMatrix};
use clinic_core::domains::auth::JwtService;
use clinic_core::server::protected_routes;
use clinic_core::server::routes::route_defects;

#[derive(Parser)]
#[command(name = "clinic_cli")]
#[command(about = "Clinic authorization tooling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the role matrix as JSON for the frontend
    ExportMatrix {
        /// Output file (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate catalog, role grants and route requirements
    Check,

    /// Mint a development token (uses JWT_SECRET / JWT_ISSUER)
    IssueToken {
        /// Role to embed; repeat for several roles
        #[arg(long = "role", required = true)]
        roles: Vec<String>,
        #[arg(long)]
        tenant: Option<Uuid>,
        #[arg(long)]
        member: Option<Uuid>,
    },
}

#[derive(Serialize)]
struct CheckReport {
    success: bool,
    routes: usize,
    permissions: usize,
    defects: Vec<String>,
}

#[derive(Serialize)]
struct TokenResponse {
    token: String,
    member_id: Uuid,
    tenant_id: Uuid,
    roles: Vec<Role>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::ExportMatrix { output } => {
            let matrix = RoleMatrix::clinic().context("Invalid role matrix")?;
            let json = serde_json::to_string_pretty(&matrix.export())?;
            match output {
                Some(path) => std::fs::write(&path, json + "\n")
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => println!("{json}"),
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check => {
            let report = check();
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(if report.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::IssueToken {
            roles,
            tenant,
            member,
        } => {
            let roles = roles
                .iter()
                .map(|r| r.parse::<Role>())
                .collect::<Result<Vec<_>, _>>()?;

            let config = clinic_core::Config::from_env()?;
            let jwt = JwtService::new(&config.jwt_secret, config.jwt_issuer);
            let member_id = member.unwrap_or_else(Uuid::now_v7);
            let tenant_id = tenant.unwrap_or_else(Uuid::now_v7);
            let token = jwt.create_token(member_id, tenant_id, &roles)?;

            let response = TokenResponse {
                token,
                member_id,
                tenant_id,
                roles,
            };
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn check() -> CheckReport {
    let matrix = match RoleMatrix::clinic() {
        Ok(matrix) => Arc::new(matrix),
        Err(defect) => return failed(vec![defect]),
    };

    let routes = protected_routes(matrix.clone());
    let defects = route_defects(matrix.catalog(), routes.requirements());

    CheckReport {
        success: defects.is_empty(),
        routes: routes.requirements().len(),
        permissions: matrix.catalog().len(),
        defects: defects.iter().map(ToString::to_string).collect(),
    }
}

fn failed(defects: Vec<ConfigurationDefect>) -> CheckReport {
    CheckReport {
        success: false,
        routes: 0,
        permissions: 0,
        defects: defects.iter().map(ToString::to_string).collect(),
    }
}
