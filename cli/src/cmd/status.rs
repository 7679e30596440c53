use stos_core::{action, Repository};

use crate::{
    config::{EnvConfig, GlobalConfig},
    util,
};

use super::{GlobalArgs, PollArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[command(flatten)]
    pub poll: PollArgs,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let mut repo = Repository::find_in_ancestors(util::current_dir())?;
    let global_cfg = GlobalConfig::from_file_and_args(global_args);
    let debug = EnvConfig::from_env().debug_dump();

    let cli = global_cfg.new_client()?;
    let poller = global_cfg.poller(&args.poll);

    util::abort_on_ctrl_c(action::status(&cli, &mut repo, &poller, &debug)).await?;
    Ok(())
}
