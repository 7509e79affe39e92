//! zd - command-line access to the Zendesk v2 API.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `ZENDESK_URL`: Base URL of your Zendesk instance
//! - `ZENDESK_USERNAME`: Agent email the API token belongs to
//! - `ZENDESK_API_TOKEN`: API token
//!
//! # Usage
//!
//! ```bash
//! zd check
//! zd deleted-tickets purge 581 582
//! zd jobs get 8b726e606741012ffc2d782bcb7848fe
//! zd search --type ticket status:open printer
//! ```

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use zendesk_api::config::Config;
use zendesk_api::pagination::PageRequest;
use zendesk_api::query::{SearchQuery, SortOrder};
use zendesk_api::resources::DeletedTicketSort;
use zendesk_api::{ZendeskClient, ZendeskError};

/// Command-line client for the Zendesk API.
#[derive(Parser, Debug)]
#[command(name = "zd", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify that Zendesk is reachable and the credentials work
    Check,

    /// Work with tickets
    #[command(subcommand)]
    Tickets(TicketsCommand),

    /// Work with soft-deleted tickets
    #[command(subcommand)]
    DeletedTickets(DeletedTicketsCommand),

    /// Inspect background jobs
    #[command(subcommand)]
    Jobs(JobsCommand),

    /// Search tickets, users, organizations and groups
    Search(SearchArgs),
}

#[derive(Args, Debug, Clone, Copy)]
struct PagingArgs {
    /// Page to start from (1-based)
    #[arg(long)]
    page: Option<u32>,

    /// Items per page (max 100)
    #[arg(long)]
    per_page: Option<u32>,

    /// Follow next-page links until the listing is exhausted
    #[arg(long)]
    all: bool,
}

impl PagingArgs {
    fn request(&self) -> PageRequest {
        let mut request = PageRequest::new();
        if let Some(page) = self.page {
            request = request.with_page(page);
        }
        if let Some(per_page) = self.per_page {
            request = request.with_per_page(per_page);
        }
        request
    }
}

#[derive(Subcommand, Debug)]
enum TicketsCommand {
    /// List tickets
    #[command(visible_alias = "ls")]
    List(PagingArgs),

    /// Show one or more tickets
    Get {
        /// Ticket IDs (up to 100)
        #[arg(required = true)]
        ids: Vec<u64>,
    },

    /// Soft-delete up to 100 tickets
    DeleteMany {
        /// Ticket IDs
        #[arg(required = true)]
        ids: Vec<u64>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum SortField {
    Id,
    Subject,
    DeletedAt,
}

impl From<SortField> for DeletedTicketSort {
    fn from(field: SortField) -> Self {
        match field {
            SortField::Id => DeletedTicketSort::Id,
            SortField::Subject => DeletedTicketSort::Subject,
            SortField::DeletedAt => DeletedTicketSort::DeletedAt,
        }
    }
}

#[derive(Subcommand, Debug)]
enum DeletedTicketsCommand {
    /// List soft-deleted tickets
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        paging: PagingArgs,

        /// Sort field
        #[arg(long, value_enum)]
        sort: Option<SortField>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,
    },

    /// Restore soft-deleted tickets
    Restore {
        /// Ticket IDs (up to 100)
        #[arg(required = true)]
        ids: Vec<u64>,
    },

    /// Permanently delete soft-deleted tickets
    Purge {
        /// Ticket IDs (up to 100)
        #[arg(required = true)]
        ids: Vec<u64>,
    },
}

#[derive(Subcommand, Debug)]
enum JobsCommand {
    /// List recent background jobs
    #[command(visible_alias = "ls")]
    List(PagingArgs),

    /// Show one or more background jobs
    Get {
        /// Job status IDs (up to 100)
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Search terms in Zendesk syntax, e.g. `status:open printer`
    #[arg(required = true)]
    terms: Vec<String>,

    /// Restrict to one result type (ticket, user, organization, group)
    #[arg(long = "type")]
    result_type: Option<String>,

    /// Sort field (created_at, updated_at, priority, status, ticket_type)
    #[arg(long)]
    sort_by: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort_by")]
    desc: bool,

    #[command(flatten)]
    paging: PagingArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    // stdout carries command output; logs go to stderr
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("zendesk_api=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::debug!("Configuration loaded, base_url: {}", config.base_url);

    let client = ZendeskClient::new(&config).context("Failed to create Zendesk client")?;

    if let Err(e) = run(cli.command, &client).await {
        let message = ZendeskError::sanitize_message(&format!("{:#}", e), config.api_token());
        tracing::error!(error = %message, "Command failed");
        bail!(message);
    }

    Ok(())
}

async fn run(command: Commands, client: &ZendeskClient) -> Result<()> {
    match command {
        Commands::Check => {
            client.test_connection().await?;
            println!("ok");
        }
        Commands::Tickets(command) => run_tickets(command, client).await?,
        Commands::DeletedTickets(command) => run_deleted_tickets(command, client).await?,
        Commands::Jobs(command) => run_jobs(command, client).await?,
        Commands::Search(args) => run_search(args, client).await?,
    }
    Ok(())
}

async fn run_tickets(command: TicketsCommand, client: &ZendeskClient) -> Result<()> {
    let tickets = client.tickets();
    match command {
        TicketsCommand::List(paging) => {
            let mut page = tickets.list(paging.request()).await?;
            print_json(&page)?;
            while paging.all {
                match tickets.next(&page).await? {
                    Some(next) => page = next,
                    None => break,
                }
                print_json(&page)?;
            }
        }
        TicketsCommand::Get { ids } => match ids.as_slice() {
            [id] => match tickets.get(*id).await? {
                Some(ticket) => print_json(&ticket)?,
                None => bail!("ticket {} not found", id),
            },
            ids => print_json(&tickets.get_many(ids).await?)?,
        },
        TicketsCommand::DeleteMany { ids } => print_json(&tickets.delete_many(&ids).await?)?,
    }
    Ok(())
}

async fn run_deleted_tickets(command: DeletedTicketsCommand, client: &ZendeskClient) -> Result<()> {
    let deleted = client.deleted_tickets();
    match command {
        DeletedTicketsCommand::List { paging, sort, desc } => {
            let mut page = match sort {
                Some(field) => {
                    let order = if desc { SortOrder::Desc } else { SortOrder::Asc };
                    let sort = DeletedTicketSort::from(field).query(order);
                    deleted.list_with(sort, paging.request()).await?
                }
                None => deleted.list(paging.request()).await?,
            };
            print_json(&page)?;
            while paging.all {
                match deleted.next(&page).await? {
                    Some(next) => page = next,
                    None => break,
                }
                print_json(&page)?;
            }
        }
        DeletedTicketsCommand::Restore { ids } => {
            match ids.as_slice() {
                [id] => deleted.restore(*id).await?,
                ids => deleted.restore_many(ids).await?,
            }
            println!("restored {} ticket(s)", ids.len());
        }
        DeletedTicketsCommand::Purge { ids } => {
            let job = match ids.as_slice() {
                [id] => deleted.purge(*id).await?,
                ids => deleted.purge_many(ids).await?,
            };
            print_json(&job)?;
        }
    }
    Ok(())
}

async fn run_jobs(command: JobsCommand, client: &ZendeskClient) -> Result<()> {
    let jobs = client.job_statuses();
    match command {
        JobsCommand::List(paging) => {
            let mut page = jobs.list(paging.request()).await?;
            print_json(&page)?;
            while paging.all {
                match jobs.next(&page).await? {
                    Some(next) => page = next,
                    None => break,
                }
                print_json(&page)?;
            }
        }
        JobsCommand::Get { ids } => match ids.as_slice() {
            [id] => match jobs.get(id).await? {
                Some(job) => print_json(&job)?,
                None => bail!("job {} not found (jobs expire after about an hour)", id),
            },
            ids => {
                let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
                print_json(&jobs.get_many(&ids, PageRequest::new()).await?)?;
            }
        },
    }
    Ok(())
}

async fn run_search(args: SearchArgs, client: &ZendeskClient) -> Result<()> {
    let mut search = SearchQuery::new();
    if let Some(result_type) = args.result_type {
        search = search.of_type(result_type);
    }
    for term in args.terms {
        search = search.text(term);
    }
    if let Some(field) = args.sort_by {
        let order = if args.desc { SortOrder::Desc } else { SortOrder::Asc };
        search = search.sort_by(field, order);
    }

    let search_client = client.search();
    let mut page = search_client.find(&search, args.paging.request()).await?;
    print_json(&page)?;
    while args.paging.all {
        match search_client.next(&page).await? {
            Some(next) => page = next,
            None => break,
        }
        print_json(&page)?;
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
