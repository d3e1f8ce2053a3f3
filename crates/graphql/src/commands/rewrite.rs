use crate::file_reader;
use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use anyhow::Context;
use graphql_query_rewriter::RewriteHandler;
use graphql_query_rewriter::RewriterConfig;
use graphql_query_rewriter::Variables;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct RewriteCmd {
    #[arg(
        help="Path to a JSON file containing the ordered list of rewrite \
             rules to apply.",
        long,
        short='r',
    )]
    rules: PathBuf,

    #[arg(
        help="Path to a JSON file containing the variables object sent \
             alongside the query.",
        long,
    )]
    variables: Option<PathBuf>,

    #[arg(
        help="Path to a JSON file containing a GraphQL response body for the \
             rewritten query. Its `data` is rewritten back into the shape of \
             the original query.",
        long,
    )]
    response: Option<PathBuf>,

    #[arg(
        help="Path to the GraphQL file containing the query to rewrite.",
        name="QUERY_FILE",
    )]
    query_file: PathBuf,
}
impl RewriteCmd {
    fn read_and_rewrite(&self) -> anyhow::Result<RewriteOutput> {
        log::debug!("Loading rewrite rules from {:?}.", self.rules);
        let rules = file_reader::read_content(&self.rules)?;
        let query = file_reader::read_content(&self.query_file)?;
        let variables = self.variables.as_ref()
            .map(|path| file_reader::read_content(path))
            .transpose()?;
        let response = self.response.as_ref()
            .map(|path| file_reader::read_content(path))
            .transpose()?;

        rewrite(&RewriteInputs {
            rules: rules.as_str(),
            query: query.as_str(),
            variables: variables.as_deref(),
            response: response.as_deref(),
        })
    }
}

#[inherent::inherent]
impl RunnableCommand for RewriteCmd {
    pub async fn run(self, cli: Cli) -> CommandResult {
        let output = match self.read_and_rewrite() {
            Ok(output) => output,
            Err(err) => return CommandResult::stderr(format_args!(
                "{} Failed to rewrite {:?}: {err:#}",
                output_utils::RED_X,
                self.query_file,
            )),
        };

        let json = if cli.compact {
            serde_json::to_string(&output)
        } else {
            serde_json::to_string_pretty(&output)
        };
        match json {
            Ok(json) => CommandResult::stdout(format_args!("{json}")),
            Err(err) => CommandResult::stderr(format_args!(
                "{} Failed to serialize the rewritten request: {err}",
                output_utils::RED_X,
            )),
        }
    }
}

struct RewriteInputs<'a> {
    rules: &'a str,
    query: &'a str,
    variables: Option<&'a str>,
    response: Option<&'a str>,
}

#[derive(Debug, PartialEq, serde::Serialize)]
struct RewriteOutput {
    query: String,
    variables: Option<Variables>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<serde_json::Value>,
}

fn rewrite(inputs: &RewriteInputs<'_>) -> anyhow::Result<RewriteOutput> {
    let configs: Vec<RewriterConfig> = serde_json::from_str(inputs.rules)
        .context("Rewrite rules must be a JSON array of rule objects")?;
    let mut handler = RewriteHandler::from_configs(&configs)?;
    log::debug!("Loaded {} rewrite rule(s).", configs.len());

    let variables = inputs.variables
        .map(|src| serde_json::from_str::<Variables>(src))
        .transpose()
        .context("Variables must be a JSON object")?;
    let response = inputs.response
        .map(|src| serde_json::from_str::<serde_json::Value>(src))
        .transpose()
        .context("The response must be valid JSON")?;

    let rewritten = handler.rewrite_request(inputs.query, variables)?;
    let response = response
        .map(|body| handler.rewrite_response_body(body))
        .transpose()?;

    Ok(RewriteOutput {
        query: rewritten.query,
        variables: rewritten.variables,
        response,
    })
}
