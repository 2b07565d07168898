//! `infra_envs` Ansible module.

use std::process::ExitCode;

use assisted_modules::{run_module, InfraEnvsModule};

#[tokio::main]
async fn main() -> ExitCode {
    run_module::<InfraEnvsModule>().await
}
