//! Command-line surface for the gateway.
//!
//! Maps subcommands onto `GatewayClient` operations and prints records as
//! JSON. Library errors abort with exit status 1; the error itself goes to
//! the log only.

use anyhow::{bail, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use dialoguer::Confirm;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use dnsgateway::authinfo::gen_authinfo;
use dnsgateway::{
    CheckOp, GatewayClient, NewContact, NewDomain, PostalAddress, DEVELOPMENT_ENDPOINT,
    PRODUCTION_ENDPOINT,
};

/// Manage domain registrations via the DNS Gateway API.
#[derive(Parser)]
#[command(name = "dnsgw", version, about)]
pub struct Cli {
    /// Username for API authentication
    #[arg(short, long, env = "DNS_GATEWAY_USERNAME")]
    username: String,

    /// Password for API authentication
    #[arg(short, long, env = "DNS_GATEWAY_PASSWORD")]
    password: String,

    /// API endpoint URL
    #[arg(long, value_name = "URL", conflicts_with_all = ["pro", "dev"])]
    endpoint_url: Option<String>,

    /// Use the production endpoint (default)
    #[arg(long)]
    pro: bool,

    /// Use the development endpoint
    #[arg(long, conflicts_with = "pro")]
    dev: bool,

    /// Increase logging verbosity
    #[arg(short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage domains
    Domain {
        #[command(subcommand)]
        command: DomainCommand,
    },
    /// Manage contacts
    Contact {
        #[command(subcommand)]
        command: ContactCommand,
    },
    /// Manage zones
    Zone {
        #[command(subcommand)]
        command: ZoneCommand,
    },
}

#[derive(Subcommand)]
enum DomainCommand {
    /// List registered domains
    List,
    /// Show domain details
    Show { domain_name: String },
    /// Check domain name availability
    Check {
        domain_name: String,
        /// Domain operation to price
        #[arg(long, value_enum, default_value_t = CheckOp::Create)]
        operation: CheckOp,
    },
    /// Create a new domain
    Create(CreateDomainArgs),
    /// Delete a domain
    Delete { domain_name: String },
}

#[derive(Args)]
struct CreateDomainArgs {
    /// Domain name
    #[arg(long)]
    name: String,
    /// Registration period in years
    #[arg(long, default_value_t = 1)]
    period: u32,
    /// Enable autorenewal
    #[arg(long)]
    autorenew: bool,
    /// Authinfo code (generated when omitted)
    #[arg(long)]
    authinfo: Option<String>,
    /// Nameserver host (repeatable)
    #[arg(long = "host")]
    hosts: Vec<String>,
    /// Registrant contact id
    #[arg(long)]
    registrant: String,
    /// Administrative contact id
    #[arg(long)]
    admin: String,
    /// Billing contact id
    #[arg(long)]
    billing: String,
    /// Technical contact id
    #[arg(long)]
    tech: String,
    /// Accept the registration charge without prompting
    #[arg(short = 'y', long = "accept-charge")]
    accept: bool,
}

#[derive(Subcommand)]
enum ContactCommand {
    /// List registered contacts
    List,
    /// Show contact details
    Show { contact_id: String },
    /// Create a new contact
    Create(CreateContactArgs),
    /// Delete a contact
    Delete { contact_id: String },
}

#[derive(Args)]
struct CreateContactArgs {
    /// Contact ID
    #[arg(long)]
    id: String,
    /// Contact name
    #[arg(long)]
    name: String,
    /// Contact organisation
    #[arg(long)]
    org: Option<String>,
    /// Contact email address
    #[arg(long)]
    email: String,
    /// Contact phone number
    #[arg(long)]
    phone: String,
    /// Contact fax number
    #[arg(long)]
    fax: Option<String>,
    /// Address line 1
    #[arg(long)]
    address1: Option<String>,
    /// Address line 2
    #[arg(long)]
    address2: Option<String>,
    /// Address line 3
    #[arg(long)]
    address3: Option<String>,
    /// City
    #[arg(long)]
    city: String,
    /// Province
    #[arg(long)]
    province: Option<String>,
    /// Postal code
    #[arg(long)]
    code: Option<String>,
    /// Country code
    #[arg(long)]
    country: String,
}

#[derive(Subcommand)]
enum ZoneCommand {
    /// List supported zones
    List,
}

/// Map `-v` count onto a tracing filter, honouring `RUST_LOG` when set.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dnsgateway={level},dnsgw={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

impl Cli {
    fn endpoint(&self) -> &str {
        if let Some(url) = &self.endpoint_url {
            return url;
        }
        if self.dev {
            DEVELOPMENT_ENDPOINT
        } else {
            PRODUCTION_ENDPOINT
        }
    }
}

fn charge_display(charge: &Value) -> String {
    match charge.as_str() {
        Some(s) => s.to_string(),
        None => charge.to_string(),
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let client = GatewayClient::new(cli.endpoint(), &cli.username, &cli.password);
    match cli.command {
        Command::Domain { command } => run_domain(&client, command),
        Command::Contact { command } => run_contact(&client, command),
        Command::Zone { command } => run_zone(&client, command),
    }
}

fn run_domain(client: &GatewayClient, command: DomainCommand) -> Result<()> {
    match command {
        DomainCommand::List => {
            for domain in client.domains() {
                println!("{}", domain?);
            }
        }
        DomainCommand::Show { domain_name } => {
            println!("{}", client.domain_by_name(&domain_name)?);
        }
        DomainCommand::Check {
            domain_name,
            operation,
        } => match client.check_domain(&domain_name, operation)? {
            Some(charge) => println!("{}", charge_display(&charge)),
            None => println!("false"),
        },
        DomainCommand::Create(args) => create_domain(client, args)?,
        DomainCommand::Delete { domain_name } => {
            client.domain_by_name(&domain_name)?.delete()?;
            println!("Domain {domain_name} deleted");
        }
    }
    Ok(())
}

fn create_domain(client: &GatewayClient, args: CreateDomainArgs) -> Result<()> {
    let Some(charge) = client.check_domain(&args.name, CheckOp::Create)? else {
        bail!("domain {} is not available", args.name);
    };
    if !args.accept {
        let prompt = format!(
            "Accept registration charge of ${} for {}?",
            charge_display(&charge),
            args.name
        );
        if !Confirm::new().with_prompt(prompt).interact()? {
            bail!("registration charge declined");
        }
    }
    let authinfo = args
        .authinfo
        .unwrap_or_else(|| gen_authinfo(&args.name));
    let domain = client.create_domain(&NewDomain {
        name: args.name,
        period: args.period,
        autorenew: args.autorenew,
        authinfo,
        hosts: args.hosts,
        registrant: args.registrant,
        admin: args.admin,
        billing: args.billing,
        tech: args.tech,
        charge,
    })?;
    println!("{domain}");
    Ok(())
}

fn run_contact(client: &GatewayClient, command: ContactCommand) -> Result<()> {
    match command {
        ContactCommand::List => {
            for contact in client.contacts() {
                println!("{}", contact?);
            }
        }
        ContactCommand::Show { contact_id } => {
            println!("{}", client.contact_by_id(&contact_id)?);
        }
        ContactCommand::Create(args) => {
            let contact = client.create_contact(&NewContact {
                id: args.id,
                name: args.name,
                org: args.org,
                email: args.email,
                phone: args.phone,
                fax: args.fax,
                address: PostalAddress {
                    address1: args.address1,
                    address2: args.address2,
                    address3: args.address3,
                    city: args.city,
                    province: args.province,
                    code: args.code,
                    country: args.country,
                },
            })?;
            println!("{contact}");
        }
        ContactCommand::Delete { contact_id } => {
            client.contact_by_id(&contact_id)?.delete()?;
            println!("Contact {contact_id} deleted");
        }
    }
    Ok(())
}

fn run_zone(client: &GatewayClient, command: ZoneCommand) -> Result<()> {
    match command {
        ZoneCommand::List => {
            for zone in client.zones() {
                println!("{}", zone?);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
