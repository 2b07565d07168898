//! `support_levels` Ansible module.

use std::process::ExitCode;

use assisted_modules::{run_module, SupportLevelsModule};

#[tokio::main]
async fn main() -> ExitCode {
    run_module::<SupportLevelsModule>().await
}
