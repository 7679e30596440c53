use stos_core::{action, print_success};
use stos_webclient::ProblemId;

use crate::util;

use super::{GlobalArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Problem id shown on the STOS problem page
    pub problem_id: String,
}

pub fn exec(args: &Args, _: &GlobalArgs) -> SubcmdResult {
    let dir = util::current_dir();
    let repo = action::init(&dir, ProblemId::from(args.problem_id.trim()))?;
    print_success!(
        "Initialized STOS repository for problem {} in {}",
        repo.problem_id(),
        util::replace_homedir_to_tilde(dir).to_string_lossy()
    );
    Ok(())
}
