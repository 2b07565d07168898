//! Ansible binary modules for the Assisted Installer API.
//!
//! Each binary in `src/bin` is a thin wrapper around [`run_module`]:
//!
//! 1. parse the command line ([`ModuleCli`]); the environment supplies
//!    `AI_API_TOKEN`, `AI_PULL_SECRET` and `AI_API_URL`
//! 2. read and validate the args file ([`ModuleArgs`])
//! 3. skip in check mode, otherwise run the module's dispatcher
//! 4. print one JSON document and exit 0 on success, 1 on failure

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod logging;
pub mod modules;
pub mod protocol;
pub mod settings;

use std::process::ExitCode;

use assisted_core::{ModuleFailure, ModuleResult, Result};
use clap::Parser;

pub use modules::{
    AnsibleModule, ClustersModule, InfraEnvsModule, RegisterClusterModule, SupportLevelsModule,
};
pub use protocol::{ModuleArgs, Outcome};
pub use settings::ModuleCli;

/// Entry point shared by every module binary.
pub async fn run_module<M: AnsibleModule>() -> ExitCode {
    logging::init();

    let outcome = match ModuleCli::try_parse() {
        Ok(cli) => match protocol::read_args_file(&cli.args_file) {
            Ok(raw) => Outcome::from_result(&invoke::<M>(&cli, &raw).await),
            Err(e) => Outcome::failure(&ModuleFailure::new(format!("{e:#}"))),
        },
        Err(e) => Outcome::failure(&ModuleFailure::new(e.to_string())),
    };

    println!("{}", outcome.document);

    if outcome.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Run module `M` on an args document.
///
/// # Errors
///
/// Returns the validation, configuration or operation failure.
pub async fn invoke<M: AnsibleModule>(cli: &ModuleCli, raw_args: &str) -> Result<ModuleResult> {
    let args = ModuleArgs::parse(raw_args)?;

    if args.check_mode() {
        tracing::info!(module = M::NAME, "Check mode requested, skipping");
        return Ok(ModuleResult::skipped(format!(
            "remote module ({}) does not support check mode",
            M::NAME
        )));
    }

    let params = args.into_params::<M::Params>(M::NAME)?;
    let result = M::run(params, cli).await;

    if let Err(e) = &result {
        tracing::error!(module = M::NAME, error = %e, "Module failed");
    }
    result
}
