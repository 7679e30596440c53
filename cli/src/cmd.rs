pub mod init;
pub mod push;
pub mod status;

use stos_webclient::Url;

const EXAMPLES: &str = "\
Examples:
  stos init 365        Bind the current directory to problem 365
  stos push            Upload sources and wait for the results
  stos status          Show the results of the last submission";

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true, after_help = EXAMPLES)]
pub struct GlobalArgs {
    #[command(subcommand)]
    pub subcmd: Subcommand,

    /// STOS endpoint, overriding the global config
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<Url>,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    Init(init::Args),
    Push(push::Args),

    #[command(alias("st"))]
    Status(status::Args),
}

pub type SubcmdResult = anyhow::Result<()>;

impl GlobalArgs {
    pub async fn exec_subcmd(&self) -> SubcmdResult {
        use Subcommand::*;
        match &self.subcmd {
            Init(args) => init::exec(args, self),
            Push(args) => push::exec(args, self).await,
            Status(args) => status::exec(args, self).await,
        }
    }
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct PollArgs {
    /// Give up waiting for the results after SECS seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Seconds between two status checks
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,
}
