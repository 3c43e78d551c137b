use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rental_site::inquiry::{InquiryDesk, InquiryForm, SubmitError};
use rental_site::mailer::EmailJsMailer;
use rental_site::{config, content, generate, output};
use std::path::PathBuf;

mod logging;

#[derive(Parser)]
#[command(name = "rental-site")]
#[command(about = "Static landing page generator for a holiday rental")]
#[command(long_about = "\
Static landing page generator for a holiday rental

One TOML file describes the property; the build renders a single page with
a booking inquiry form, amenities, location, reviews and a photo gallery.

Content structure:

  content/
  ├── site.toml        # Property copy, menu, amenities, reviews, gallery URLs
  ├── config.toml      # Palette, fonts, email service (optional)
  └── assets/          # Copied next to index.html (favicon, robots.txt)

Inquiries are delivered through EmailJS. Fill the [email] table in
config.toml; run 'rental-site gen-config' for a documented stock file.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the landing page into the output directory
    Build,
    /// Validate content and config without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Send one booking inquiry through the configured email service
    Send(SendArgs),
}

#[derive(clap::Args)]
struct SendArgs {
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
    #[arg(long, default_value = "")]
    email: String,
    /// Optional; sent as "No especificado" when left out
    #[arg(long, default_value = "")]
    phone: String,
    /// Arrival date, YYYY-MM-DD
    #[arg(long)]
    arrival: Option<NaiveDate>,
    /// Departure date, YYYY-MM-DD
    #[arg(long)]
    departure: Option<NaiveDate>,
}

impl From<SendArgs> for InquiryForm {
    fn from(args: SendArgs) -> Self {
        InquiryForm {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone: args.phone,
            arrival: args.arrival,
            departure: args.departure,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet)?;

    match cli.command {
        Command::Build => {
            let site = content::load(&cli.source)?;
            let site_config = config::load_config(&cli.source)?;
            println!("==> Generating HTML \u{2192} {}", cli.output.display());
            let report = generate::generate(&site, &site_config, &cli.source, &cli.output)?;
            output::print_build_output(&report, &cli.output);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = content::load(&cli.source)?;
            let site_config = config::load_config(&cli.source)?;
            output::print_check_output(&site, &site_config, &cli.source);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Send(args) => {
            let site_config = config::load_config(&cli.source)?;
            let mailer = EmailJsMailer::from_config(&site_config.email)?;
            let mut desk = InquiryDesk::new(args.into());
            match desk.submit(&mailer) {
                Ok(notice) => output::print_notice(notice),
                Err(SubmitError::Invalid(errors)) => {
                    output::print_inquiry_errors(&errors);
                    return Err(SubmitError::Invalid(errors).into());
                }
                Err(other) => return Err(other.into()),
            }
        }
    }

    Ok(())
}
