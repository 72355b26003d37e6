mod logging;
mod settings;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use shortlink_client::dashboard::{self, chart_points};
use shortlink_client::{
    DashboardStats, FileStorage, LinksView, LoginForm, Profile, RegisterForm, ShortenedLink,
    ShortlinkClient, ShortlinkError, messages,
};

use crate::settings::Settings;

const CHART_WIDTH: usize = 40;

type Client = ShortlinkClient<FileStorage>;

#[derive(Debug, Parser)]
#[command(name = "shortlink", version, about = "Command-line client for the Koda Shortlink API")]
struct Cli {
    /// API address, overrides SHORTLINK_API_URL.
    #[arg(long, global = true)]
    server: Option<String>,

    /// Session file, overrides SHORTLINK_SESSION_FILE.
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and store the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SHORTLINK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        /// Accept the terms of service.
        #[arg(long)]
        agree_terms: bool,
    },
    /// Forget the stored session.
    Logout,
    /// Show who is signed in.
    Status,
    /// Shorten a URL, signed in or not.
    Shorten { url: String },
    /// Link statistics of the signed-in account.
    Dashboard,
    /// Manage your links.
    Links {
        #[command(subcommand)]
        command: LinksCommand,
    },
    /// Show or edit your profile.
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
}

#[derive(Debug, Subcommand)]
enum LinksCommand {
    /// List one page of links.
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Only show rows whose slug or destination contains this text.
        #[arg(long)]
        search: Option<String>,
    },
    /// Point a short link at a new destination.
    Edit {
        slug: String,
        url: String,
        /// Page to show afterwards.
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Delete a short link.
    Delete {
        slug: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
        /// Page to show afterwards.
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
}

#[derive(Debug, Subcommand)]
enum ProfileCommand {
    Show,
    Update {
        #[arg(long)]
        username: String,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let settings = Settings::from_env().context("invalid configuration")?;
    logging::init_logging(&settings.log_level)?;

    let api_url = resolve_server(cli.server, &settings.api_url);
    let session_file = cli.session_file.unwrap_or_else(|| settings.session_file.clone());
    tracing::debug!(%api_url, session_file = %session_file.display(), "starting");

    let mut client = ShortlinkClient::new(
        api_url,
        settings.http_timeout,
        FileStorage::new(session_file),
    )
    .map_err(|err| anyhow!("failed to build HTTP client: {err}"))?;

    match cli.command {
        Command::Login { email, password } => {
            let session = client
                .login(&LoginForm::new(email, password))
                .await
                .map_err(map_client_error(Some(messages::SOMETHING_WENT_WRONG)))?;
            match session.display_name() {
                Some(name) => println!("Logged in as {name}"),
                None => println!("Logged in"),
            }
        }
        Command::Register {
            username,
            email,
            password,
            confirm_password,
            agree_terms,
        } => {
            let form = RegisterForm {
                username,
                email,
                password,
                confirm_password,
                agree_terms,
            };
            client
                .register(&form)
                .await
                .map_err(map_client_error(Some(messages::NETWORK_ERROR)))?;
            println!("{}", messages::REGISTER_OK);
            println!("Sign in with `shortlink login --email {}`", form.email.trim());
        }
        Command::Logout => {
            client.logout();
            println!("Logged out");
        }
        Command::Status => print_status(&client)?,
        Command::Shorten { url } => {
            // Transport failures show the raw error here.
            let link = client.shorten(&url).await.map_err(map_client_error(None))?;
            print_shortened(&link);
        }
        Command::Dashboard => {
            let stats = client
                .dashboard_stats()
                .await
                .map_err(map_client_error(Some(messages::DASHBOARD_FAILED)))?;
            print_dashboard(&stats);
        }
        Command::Links { command } => run_links(&client, command).await?,
        Command::Profile { command } => run_profile(&client, command).await?,
    }

    Ok(())
}

async fn run_links(client: &Client, command: LinksCommand) -> Result<()> {
    let mut view = LinksView::new();
    match command {
        LinksCommand::List { page, search } => {
            client
                .load_page(&mut view, page)
                .await
                .map_err(map_client_error(Some(messages::LINKS_FAILED)))?;
            if let Some(search) = search {
                view.set_search(search);
            }
        }
        LinksCommand::Edit { slug, url, page } => {
            client
                .update_link(&slug, &url)
                .await
                .map_err(map_client_error(Some(messages::UPDATE_LINK_ERROR)))?;
            println!("{}", messages::LINK_UPDATED);
            client
                .load_page(&mut view, page)
                .await
                .map_err(map_client_error(Some(messages::LINKS_FAILED)))?;
        }
        LinksCommand::Delete { slug, yes, page } => {
            if !yes && !confirm(&format!("Delete link '{slug}'?"))? {
                println!("Cancelled");
                return Ok(());
            }
            client
                .delete_link(&slug)
                .await
                .map_err(map_client_error(Some(messages::DELETE_LINK_ERROR)))?;
            println!("{}", messages::LINK_DELETED);
            client
                .load_page(&mut view, page)
                .await
                .map_err(map_client_error(Some(messages::LINKS_FAILED)))?;
        }
    }

    print_links(&view, client.base_url());
    Ok(())
}

async fn run_profile(client: &Client, command: ProfileCommand) -> Result<()> {
    let profile = match command {
        ProfileCommand::Show => client
            .profile()
            .await
            .map_err(map_client_error(Some(messages::PROFILE_FAILED)))?,
        ProfileCommand::Update { username } => {
            let profile = client
                .update_profile(&username)
                .await
                .map_err(map_client_error(Some(messages::SOMETHING_WENT_WRONG)))?;
            println!("{}", messages::PROFILE_UPDATED);
            profile
        }
    };
    print_profile(&profile);
    Ok(())
}

fn resolve_server(flag: Option<String>, configured: &str) -> String {
    let raw = flag
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| configured.to_string());
    normalize_server(raw.trim().to_string())
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// `transport_fallback` replaces connection errors; `None` keeps the raw error.
fn map_client_error(
    transport_fallback: Option<&'static str>,
) -> impl Fn(ShortlinkError) -> anyhow::Error {
    move |err| {
        let message = match (&err, transport_fallback) {
            (ShortlinkError::Unauthorized, _) => format!(
                "{}: run `shortlink login --email <email>`",
                messages::LOGIN_REQUIRED
            ),
            (ShortlinkError::Http(_), None) => err.to_string(),
            (_, fallback) => err.user_message(fallback.unwrap_or(messages::SOMETHING_WENT_WRONG)),
        };
        anyhow!(message)
    }
}

fn print_status(client: &Client) -> Result<()> {
    let session = client.session();
    if !session.is_authenticated() {
        println!("Not logged in ({})", client.base_url());
        return Ok(());
    }

    println!(
        "Logged in as {} ({})",
        session.display_name().unwrap_or("unknown user"),
        client.base_url()
    );
    if let Some(user) = &session.user {
        println!(
            "{}",
            serde_json::to_string_pretty(user).context("failed to render session user")?
        );
    }
    Ok(())
}

fn print_shortened(link: &ShortenedLink) {
    println!("Short URL: {}", link.short_url);
    println!("Code: {}", link.shortcode);
}

fn print_dashboard(stats: &DashboardStats) {
    println!(
        "Total links:     {} ({} this week)",
        dashboard::format_count(stats.total_links),
        dashboard::format_count(stats.links_this_week)
    );
    println!(
        "Total visits:    {} ({})",
        dashboard::format_count(stats.total_visits),
        dashboard::format_growth(stats.visits_growth)
    );
    println!(
        "Avg click rate:  {} ({})",
        dashboard::format_rate(stats.avg_click_rate),
        dashboard::format_growth(stats.click_rate_change)
    );

    if stats.last_7_days.is_empty() {
        return;
    }
    println!();
    println!("Visits, last 7 days:");
    for line in chart_lines(stats) {
        println!("{line}");
    }
}

/// Horizontal bars: the chart's y axis turned sideways.
fn chart_lines(stats: &DashboardStats) -> Vec<String> {
    let width = CHART_WIDTH as f64;
    chart_points(&stats.last_7_days, width, width)
        .into_iter()
        .map(|point| {
            let bar = (width - point.y).round() as usize;
            format!(
                "{:>7} {:<width$} {}",
                point.label,
                "#".repeat(bar),
                point.visits,
                width = CHART_WIDTH
            )
        })
        .collect()
}

fn print_links(view: &LinksView, base_url: &str) {
    let rows = view.visible();
    if rows.is_empty() {
        println!("No links");
    }
    for link in rows {
        println!(
            "- {}  ->  {}  ({} clicks, {})",
            link.short_url(base_url),
            link.url,
            dashboard::format_count(link.clicks),
            link.created_label()
        );
    }

    let mut footer = view.page_label();
    if let Some(prev) = view.prev_page() {
        footer.push_str(&format!("  [prev: --page {prev}]"));
    }
    if let Some(next) = view.next_page() {
        footer.push_str(&format!("  [next: --page {next}]"));
    }
    println!("{footer}");
}

fn print_profile(profile: &Profile) {
    println!("username: {}", profile.username);
    println!("email: {}", profile.email);
}
