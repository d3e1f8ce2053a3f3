mod rewrite;

use crate::Cli;
use crate::CommandResult;
use rewrite::RewriteCmd;

pub(crate) trait RunnableCommand: std::fmt::Debug {
    async fn run(self, cli: Cli) -> CommandResult;
}

#[derive(Debug, clap::Parser)]
#[command(name = "graphql")]
pub(crate) enum CommandEnum {
    /// Rewrite a GraphQL query (and optionally its variables and response)
    /// with an ordered list of rewrite rules.
    Rewrite(Box<RewriteCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Rewrite(cmd) => cmd.run(cli).await
        }
    }
}
