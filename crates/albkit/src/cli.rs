//! Clap derive structures for the `albkit` CLI.
//!
//! Defines the command tree, global flags, and shared argument types.
//! Also compiled by `build.rs` for man page generation, so this module
//! depends on nothing but clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// albkit -- manage Avi load balancer controllers from the command line
#[derive(Debug, Parser)]
#[command(
    name = "albkit",
    version,
    about = "Manage Avi load balancer controllers from the command line",
    long_about = "Generic CRUD access to every object kind an Avi controller exposes.\n\n\
        Kinds are addressed by name or path token (pool, virtualservice,\n\
        healthmonitor, ...). Run `albkit kinds` for the full list.",
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
    /// Controller profile to use
    #[arg(long, short = 'p', env = "ALBKIT_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Controller host or URL (overrides profile)
    #[arg(long, short = 'c', env = "ALBKIT_CONTROLLER", global = true)]
    pub controller: Option<String>,

    /// Login username (overrides profile)
    #[arg(long, short = 'u', env = "ALBKIT_USERNAME", global = true)]
    pub username: Option<String>,

    /// Tenant to operate in (overrides profile)
    #[arg(long, short = 't', env = "ALBKIT_TENANT", global = true)]
    pub tenant: Option<String>,

    /// Output format [default: table, or `defaults.output` from config]
    #[arg(long, short = 'o', env = "ALBKIT_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "ALBKIT_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "ALBKIT_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    pub fn output_format(&self) -> OutputFormat {
        self.output.unwrap_or_default()
    }
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the object kinds the controller exposes
    Kinds(KindsArgs),

    /// List objects of a kind
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one object by uuid or name
    Get(TargetArgs),

    /// Create an object from a JSON file
    Create(PayloadArgs),

    /// Replace an object (PUT) from a JSON file; the file must carry a uuid
    Update(PayloadArgs),

    /// Apply a partial update to an object
    Patch(PatchArgs),

    /// Delete an object by uuid or name
    #[command(alias = "rm")]
    Delete(TargetArgs),

    /// Show the controller software version
    Version,

    /// Inspect CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

impl Command {
    /// The object kind argument, for commands that take one.
    pub fn kind(&self) -> Option<&str> {
        match self {
            Self::List(args) => Some(&args.kind),
            Self::Get(args) | Self::Delete(args) => Some(&args.kind),
            Self::Create(args) | Self::Update(args) => Some(&args.kind),
            Self::Patch(args) => Some(&args.kind),
            Self::Kinds(_) | Self::Version | Self::Config(_) | Self::Completions(_) => None,
        }
    }
}

// ── Resource Arguments ───────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct KindsArgs {
    /// Only show kinds whose name contains this text (case-insensitive)
    pub filter: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Object kind (name or path token, e.g. `pool`, `VirtualService`)
    pub kind: String,

    /// Restrict to objects in this cloud (by name)
    #[arg(long)]
    pub cloud: Option<String>,

    /// Extra query parameter, repeatable
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,
}

/// An object addressed by uuid or by `--name`.
#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Object kind (name or path token)
    pub kind: String,

    /// Object uuid
    #[arg(required_unless_present = "name", conflicts_with = "name")]
    pub uuid: Option<String>,

    /// Look the object up by name instead of uuid
    #[arg(long, short = 'n')]
    pub name: Option<String>,
}

#[derive(Debug, Args)]
pub struct PayloadArgs {
    /// Object kind (name or path token)
    pub kind: String,

    /// JSON file holding the object body
    #[arg(long, short = 'f', value_name = "PATH")]
    pub from_file: PathBuf,
}

#[derive(Debug, Args)]
pub struct PatchArgs {
    /// Object kind (name or path token)
    pub kind: String,

    /// Object uuid
    pub uuid: String,

    /// Patch operation
    #[arg(long, value_enum, default_value_t = PatchOpArg::Replace)]
    pub op: PatchOpArg,

    /// JSON file holding the partial body
    #[arg(long, short = 'f', value_name = "PATH")]
    pub from_file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PatchOpArg {
    /// Append to list fields
    Add,
    /// Overwrite the given fields
    Replace,
    /// Remove the given list entries
    Delete,
}

fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.to_owned(), value.to_owned()))
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the resolved configuration (secrets masked)
    Show,

    /// Print the config file location
    Path,

    /// List configured profiles
    Profiles,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
