// Copyright 2025 Ankra.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;

use ankra::cli::commands::Commands;
use ankra::cli::CliArgs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = CliArgs::parse();
    match &args.command {
        Commands::Login(cmd) => cmd.execute(&args.global).await,
        Commands::Logout(cmd) => cmd.execute(&args.global).await,
        Commands::Cluster(cmd) => cmd.execute(&args.global).await,
        Commands::Delete(cmd) => cmd.execute(&args.global).await,
        Commands::Apply(cmd) => cmd.execute(&args.global).await,
        Commands::Clone(cmd) => cmd.execute(&args.global).await,
        Commands::Charts(cmd) => cmd.execute(&args.global).await,
        Commands::Org(cmd) => cmd.execute(&args.global).await,
        Commands::Tokens(cmd) => cmd.execute(&args.global).await,
        Commands::Credentials(cmd) => cmd.execute(&args.global).await,
        Commands::Chat(cmd) => cmd.execute(&args.global).await,
    }
}
