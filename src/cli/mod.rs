mod output;
mod resources;
mod serve;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use firebird::api::{ApiClient, ApiError, ClientConfig};
use firebird::config::{self, ConfigError, ConsoleConfig};
use firebird::models::{ValidationError, DEFAULT_ATTACH_DEVICE, DEFAULT_VM_IMAGE};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Message(String),
}

#[derive(Parser)]
#[command(
    name = "firebird",
    author,
    version,
    about = "Firebird control-plane console",
    long_about = r#"Firebird: browse and manage a virtualization control plane from the browser or the terminal.

Without a subcommand the web console is started. The other subcommands talk to the same API
directly and print tables. Configure the API with environment variables or an env file:

  API_BASE_URL       enveloped API (instances, networks, volumes, images, identity, tenants)
  VM_API_BASE_URL    VM API
  REQUEST_TIMEOUT_SECS, DEFAULT_NAMESPACE, DEFAULT_PAGE_SIZE

Examples:
  firebird serve --port 3000
  firebird vms list --namespace default --page 2
  firebird volumes attach <volume-id> <instance-id> --device /dev/vdc
"#,
    after_help = "Use `firebird <subcommand> --help` for subcommand specific options."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    pub no_color: bool,
    /// Echo every API request as a curl command on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
    /// Path to .env file
    #[arg(long, global = true)]
    pub env_file: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web console
    Serve {
        /// Host to bind to (defaults to $HOST or 127.0.0.1)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (defaults to $PORT or 3000)
        #[arg(long)]
        port: Option<u16>,
        /// Path to a custom stylesheet to serve instead of the default
        #[arg(long)]
        stylesheet: Option<String>,
    },
    /// Validate configuration and probe the health endpoints
    CheckConfig,
    /// Show the health of the infrastructure, identity and tenant services
    Health,
    /// Manage virtual machines
    Vms {
        #[command(subcommand)]
        sub: VmCommands,
    },
    /// Manage compute instances
    Instances {
        #[command(subcommand)]
        sub: InstanceCommands,
    },
    /// Manage networks
    Networks {
        #[command(subcommand)]
        sub: NetworkCommands,
    },
    /// Manage block storage volumes
    Volumes {
        #[command(subcommand)]
        sub: VolumeCommands,
    },
    /// Manage images
    Images {
        #[command(subcommand)]
        sub: ImageCommands,
    },
    /// Manage identity users
    Users {
        #[command(subcommand)]
        sub: UserCommands,
    },
    /// Manage identity domains
    Domains {
        #[command(subcommand)]
        sub: DomainCommands,
    },
    /// Manage tenant projects
    Projects {
        #[command(subcommand)]
        sub: ProjectCommands,
    },
    /// Manage tenant roles
    Roles {
        #[command(subcommand)]
        sub: RoleCommands,
    },
}

#[derive(Subcommand)]
pub enum VmCommands {
    #[command(about = "List VMs in a namespace", long_about = "List one page of VMs together with the namespace-wide status counts reported by the server.")]
    List {
        /// Namespace (defaults to $DEFAULT_NAMESPACE)
        #[arg(long, short = 'n')]
        namespace: Option<String>,
        /// Page number, 1-based
        #[arg(long, short = 'p', default_value_t = 1)]
        page: u32,
        /// Rows per page (defaults to $DEFAULT_PAGE_SIZE)
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Show VM details
    Show { namespace: String, name: String },
    /// Create a VM
    Create(CreateVmArgs),
    /// Delete a VM
    Delete { namespace: String, name: String },
}

#[derive(Args)]
pub struct CreateVmArgs {
    pub name: String,
    /// Namespace (defaults to $DEFAULT_NAMESPACE)
    #[arg(long, short = 'n')]
    pub namespace: Option<String>,
    #[arg(long, default_value_t = 2)]
    pub cpu: u32,
    /// Memory in GB
    #[arg(long, default_value_t = 4)]
    pub memory: u32,
    #[arg(long, default_value = DEFAULT_VM_IMAGE)]
    pub image: String,
    #[arg(long)]
    pub description: Option<String>,
    /// Comma separated key=value pairs
    #[arg(long)]
    pub labels: Option<String>,
    /// Console password (at least 6 characters)
    #[arg(long)]
    pub password: Option<String>,
    /// Do not assign a public IP
    #[arg(long)]
    pub no_public_ip: bool,
}

#[derive(Subcommand)]
pub enum InstanceCommands {
    /// List instances
    List,
    /// Show instance details
    Show { id: String },
    /// Create an instance
    Create {
        name: String,
        #[arg(long, default_value = "m1.small")]
        flavor: String,
        #[arg(long)]
        image: String,
        #[arg(long)]
        network_id: Option<String>,
    },
    /// Delete an instance
    Delete { id: String },
    /// Start a stopped instance
    Start { id: String },
    /// Stop a running instance
    Stop { id: String },
    /// Reboot an instance
    Reboot { id: String },
}

#[derive(Subcommand)]
pub enum NetworkCommands {
    /// List networks
    List,
    /// Show network details
    Show { id: String },
    /// Create a network
    Create {
        name: String,
        #[arg(long)]
        tenant_id: Option<String>,
        /// Create with the admin state down
        #[arg(long)]
        admin_down: bool,
        #[arg(long)]
        shared: bool,
    },
    /// Delete a network
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum VolumeCommands {
    /// List volumes
    List,
    /// Show volume details
    Show { id: String },
    /// Create a volume
    Create {
        name: String,
        /// Size in GB
        #[arg(long)]
        size: i64,
        #[arg(long)]
        volume_type: Option<String>,
        #[arg(long)]
        zone: Option<String>,
    },
    /// Delete a volume
    Delete { id: String },
    /// Attach a volume to an instance
    Attach {
        id: String,
        instance_id: String,
        #[arg(long, default_value = DEFAULT_ATTACH_DEVICE)]
        device: String,
    },
    /// Detach a volume
    Detach { id: String },
}

#[derive(Subcommand)]
pub enum ImageCommands {
    /// List images
    List,
    /// Show image details
    Show { id: String },
    /// Register an image
    Create {
        name: String,
        #[arg(long, default_value = "qcow2")]
        disk_format: String,
        #[arg(long, default_value = "bare")]
        container_format: String,
        #[arg(long, default_value = "private")]
        visibility: String,
        /// Minimum disk in GB
        #[arg(long, default_value_t = 0)]
        min_disk: i64,
        /// Minimum RAM in MB
        #[arg(long, default_value_t = 0)]
        min_ram: i64,
    },
    /// Delete an image
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// List users
    List,
    /// Show user details
    Show { id: String },
    /// Create a user
    Create {
        name: String,
        email: String,
        password: String,
        #[arg(long)]
        domain_id: Option<String>,
        /// Create the user disabled
        #[arg(long)]
        disabled: bool,
    },
    /// Delete a user
    Delete { id: String },
    /// Enable a user
    Enable { id: String },
    /// Disable a user
    Disable { id: String },
}

#[derive(Subcommand)]
pub enum DomainCommands {
    /// List domains
    List,
    /// Show domain details
    Show { id: String },
    /// Create a domain
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        disabled: bool,
    },
    /// Delete a domain
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List projects
    List,
    /// Show project details
    Show { id: String },
    /// Create a project
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        domain_id: Option<String>,
        #[arg(long)]
        disabled: bool,
    },
    /// Delete a project
    Delete { id: String },
    /// Enable a project
    Enable { id: String },
    /// Disable a project
    Disable { id: String },
}

#[derive(Subcommand)]
pub enum RoleCommands {
    /// List roles
    List,
    /// Show role details
    Show { id: String },
    /// Create a role
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a role
    Delete { id: String },
}

/// Configuration and client shared by every command of one invocation.
pub struct Context {
    pub config: ConsoleConfig,
    pub client: ApiClient,
}

impl Context {
    fn from_env(env_file: Option<&str>, verbose: bool) -> Result<Self, CliError> {
        config::load_env_file(env_file);
        let config = ConsoleConfig::from_env()?;
        let client = ApiClient::new(ClientConfig::from_console(&config).with_verbose(verbose))?;
        Ok(Self { config, client })
    }
}

pub async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = Context::from_env(cli.env_file.as_deref(), cli.verbose)?;
    let Some(command) = cli.command else {
        return serve::start_server(ctx, None, None, None).await;
    };
    match command {
        Commands::Serve { host, port, stylesheet } => serve::start_server(ctx, host, port, stylesheet).await,
        Commands::CheckConfig => resources::check_config(&ctx).await,
        Commands::Health => resources::health(&ctx).await,
        Commands::Vms { sub } => resources::vms(&ctx, sub).await,
        Commands::Instances { sub } => resources::instances(&ctx, sub).await,
        Commands::Networks { sub } => resources::networks(&ctx, sub).await,
        Commands::Volumes { sub } => resources::volumes(&ctx, sub).await,
        Commands::Images { sub } => resources::images(&ctx, sub).await,
        Commands::Users { sub } => resources::users(&ctx, sub).await,
        Commands::Domains { sub } => resources::domains(&ctx, sub).await,
        Commands::Projects { sub } => resources::projects(&ctx, sub).await,
        Commands::Roles { sub } => resources::roles(&ctx, sub).await,
    }
}
