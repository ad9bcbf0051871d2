use clap::{Parser, Subcommand};
use colored::*;
use std::process;

use herald_cli::commands::{self, default_roles, parse_action_link, parse_role};
use herald_cli::{init_tracing, open_settings};
use herald_config::Config;
use herald_settings::{ActionLink, Role};

#[derive(Parser)]
#[command(name = "herald")]
#[command(about = "Herald - notification e-mail settings administration")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the settings page fields
    Fields,
    /// Print the stored settings object as JSON
    Show,
    /// Read one option, falling back to a default when it is not stored
    Get {
        /// Option key, e.g. send_to
        key: String,
        /// Value returned when the option is absent
        #[arg(long, default_value = "")]
        default: String,
    },
    /// Validate a urlencoded settings form body and store the result
    Submit {
        /// Form body, e.g. 'notify_users_e_mail[send_to]=a%40x.com'
        body: String,
        /// Refuse to save if the stored settings changed since this revision
        #[arg(long)]
        expect_revision: Option<i64>,
    },
    /// Print the settings page template data as JSON
    Render {
        /// Role offered in the recipients list, as id=Name (repeatable)
        #[arg(long = "role", value_parser = parse_role)]
        roles: Vec<Role>,
    },
    /// Print the plugin list action row, settings link first
    Link {
        /// Link already in the row, as key=Label=href (repeatable)
        #[arg(long = "action", value_parser = parse_action_link)]
        actions: Vec<ActionLink>,
    },
    /// Delete the stored settings object
    Reset,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match handle_command(cli.command).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

async fn handle_command(command: Commands) -> anyhow::Result<String> {
    let config = Config::from_env()?;

    match command {
        Commands::Fields => Ok(commands::list_fields()),
        Commands::Link { actions } => commands::link(&config.admin_url, actions),
        Commands::Show => commands::show(&open_settings(&config).await?).await,
        Commands::Get { key, default } => {
            commands::get(&open_settings(&config).await?, &key, &default).await
        }
        Commands::Submit {
            body,
            expect_revision,
        } => commands::submit(&open_settings(&config).await?, &body, expect_revision).await,
        Commands::Render { roles } => {
            let roles = if roles.is_empty() {
                default_roles()
            } else {
                roles
            };
            commands::render(&open_settings(&config).await?, &roles).await
        }
        Commands::Reset => commands::reset(&open_settings(&config).await?).await,
    }
}
