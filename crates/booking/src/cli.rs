//! Clap derive structures for the `booking` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// booking -- browse practitioners and book appointments
#[derive(Debug, Parser)]
#[command(
    name = "booking",
    version,
    about = "Book appointments with practitioners from the command line",
    long_about = "Browse practitioners, patients and open availability slots, \
        list booked appointments, and book new ones against a booking API.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "BOOKING_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, short = 'u', env = "BOOKING_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "BOOKING_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "BOOKING_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "BOOKING_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List practitioners
    #[command(alias = "pr")]
    Practitioners,

    /// List patients
    #[command(alias = "pa")]
    Patients,

    /// List open availability slots
    #[command(alias = "av")]
    Availabilities(AvailabilitiesArgs),

    /// List booked appointments with practitioner details
    #[command(alias = "ap")]
    Appointments,

    /// Book an appointment in an open slot
    Book(BookArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Availabilities ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AvailabilitiesArgs {
    /// Only slots of this practitioner
    #[arg(long, short = 'P')]
    pub practitioner: Option<u64>,
}

// ── Book ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct BookArgs {
    /// Patient id
    #[arg(long)]
    pub patient: Option<u64>,

    /// Practitioner id
    #[arg(long)]
    pub practitioner: Option<u64>,

    /// Slot start (RFC 3339, e.g. 2024-06-15T10:00:00Z)
    #[arg(long)]
    pub start: Option<DateTime<Utc>>,

    /// Slot end (RFC 3339)
    #[arg(long)]
    pub end: Option<DateTime<Utc>>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a config file with a single profile
    Init {
        /// Profile name
        #[arg(long, default_value = "default")]
        name: String,

        /// API base URL for the profile
        #[arg(long)]
        url: Option<String>,

        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Display current configuration
    Show,

    /// Print the config file location
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
