use crate::ast;
use crate::RewriteError;
use crate::Rewriter;
use crate::RewriterConfig;
use crate::RewriterConfigError;
use crate::Variables;

/// Where a [`RewriteHandler`] is in its one-shot lifecycle.
///
/// Transitions are strictly linear: `New` → `RequestDone` → `ResponseDone`. A
/// call that fails part-way through moves the handler to `Failed` instead, so
/// that a partially-rewritten exchange can never be continued.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RewriteState {
    New,
    RequestDone,
    ResponseDone,
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RewrittenRequest {
    pub query: String,

    /// `None` iff no variables were supplied and no rewriter introduced any.
    pub variables: Option<Variables>,
}

/// Applies an ordered list of [`Rewriter`]s to one request and to the
/// response that request produced.
///
/// A handler corresponds to exactly one request/response exchange. Construct a
/// new handler for every incoming request; calling either rewrite method a
/// second time (or calling [`rewrite_response`](Self::rewrite_response)
/// before [`rewrite_request`](Self::rewrite_request)) fails with
/// [`RewriteError::AlreadyRewritten`].
#[derive(Debug)]
pub struct RewriteHandler {
    rewriters: Vec<Box<dyn Rewriter>>,
    state: RewriteState,
}
impl RewriteHandler {
    pub fn new(rewriters: Vec<Box<dyn Rewriter>>) -> Self {
        Self {
            rewriters,
            state: RewriteState::New,
        }
    }

    /// Build a handler from a list of rule configurations, preserving their
    /// order.
    pub fn from_configs(
        configs: &[RewriterConfig],
    ) -> Result<Self, RewriterConfigError> {
        let rewriters = configs.iter()
            .map(RewriterConfig::build)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(rewriters))
    }

    pub fn state(&self) -> RewriteState {
        self.state
    }

    /// Rewrite `query` (and the `variables` supplied alongside it) for the
    /// server's current schema.
    ///
    /// Rewriters are applied in list order, each seeing the changes made by
    /// the ones before it. The document is printed once, after all rewriters
    /// have run.
    pub fn rewrite_request(
        &mut self,
        query: &str,
        variables: Option<Variables>,
    ) -> Result<RewrittenRequest, RewriteError> {
        self.begin_transition(RewriteState::New, "rewrite_request")?;
        let result = self.rewrite_request_impl(query, variables);
        self.end_transition(result.is_ok(), RewriteState::RequestDone);
        result
    }

    fn rewrite_request_impl(
        &mut self,
        query: &str,
        mut variables: Option<Variables>,
    ) -> Result<RewrittenRequest, RewriteError> {
        let mut document = ast::parse(query)?;
        for rewriter in &mut self.rewriters {
            variables = rewriter.rewrite_request(&mut document, variables)?;
        }
        log::debug!(
            "Rewrote request with {} rewriter(s) across {} definition(s).",
            self.rewriters.len(),
            document.definitions.len(),
        );
        Ok(RewrittenRequest {
            query: ast::print(&document),
            variables,
        })
    }

    /// Rewrite the `data` of the server's response back into the shape the
    /// original (pre-rewrite) request asked for.
    ///
    /// Rewriters are applied in reverse list order so that the last request
    /// rewrite is the first one undone.
    pub fn rewrite_response(
        &mut self,
        response: serde_json::Value,
    ) -> Result<serde_json::Value, RewriteError> {
        self.begin_transition(RewriteState::RequestDone, "rewrite_response")?;
        let result = self.rewriters.iter()
            .rev()
            .try_fold(response, |response, rewriter| rewriter.rewrite_response(response));
        self.end_transition(result.is_ok(), RewriteState::ResponseDone);
        if result.is_ok() {
            log::debug!("Rewrote response with {} rewriter(s).", self.rewriters.len());
        }
        result
    }

    /// Like [`rewrite_response`](Self::rewrite_response), but accepts a full
    /// GraphQL response body (`{ "data": ..., "errors": [...] }`) and only
    /// rewrites its `data`. Everything else in the body is left untouched.
    pub fn rewrite_response_body(
        &mut self,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, RewriteError> {
        let mut body = match body {
            serde_json::Value::Object(body) => body,
            other => return self.rewrite_response(other),
        };
        match body.remove("data") {
            Some(data) => {
                let data = self.rewrite_response(data)?;
                body.insert("data".to_string(), data);
            },
            None => {
                self.rewrite_response(serde_json::Value::Null)?;
            },
        }
        Ok(serde_json::Value::Object(body))
    }

    fn begin_transition(
        &mut self,
        expected: RewriteState,
        attempted: &'static str,
    ) -> Result<(), RewriteError> {
        if self.state != expected {
            return Err(RewriteError::AlreadyRewritten {
                attempted,
                state: self.state,
            });
        }
        Ok(())
    }

    fn end_transition(&mut self, succeeded: bool, next: RewriteState) {
        self.state = if succeeded { next } else { RewriteState::Failed };
    }
}
