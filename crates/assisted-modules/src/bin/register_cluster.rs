//! `register_cluster` Ansible module.

use std::process::ExitCode;

use assisted_modules::{run_module, RegisterClusterModule};

#[tokio::main]
async fn main() -> ExitCode {
    run_module::<RegisterClusterModule>().await
}
