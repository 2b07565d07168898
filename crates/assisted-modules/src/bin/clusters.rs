//! `clusters` Ansible module.

use std::process::ExitCode;

use assisted_modules::{run_module, ClustersModule};

#[tokio::main]
async fn main() -> ExitCode {
    run_module::<ClustersModule>().await
}
