use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::error::ApiError;
use crate::ui::Loader;

use super::http::{HttpRequest, HttpResponse, Transport};

#[derive(Default)]
struct Script {
    sent: Vec<HttpRequest>,
    replies: VecDeque<Result<HttpResponse, ApiError>>,
    watched: Option<Loader>,
    busy: Vec<bool>,
}

/// In-memory transport that records every request and answers from a queue.
/// An empty queue answers `200 []`, which parses as an empty list for loads
/// and as success for mutations.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    script: Rc<RefCell<Script>>,
}

impl ScriptedTransport {
    pub(crate) fn reply(&self, status: u16, body: &str) -> &Self {
        self.script.borrow_mut().replies.push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub(crate) fn fail(&self, reason: &str) -> &Self {
        self.script
            .borrow_mut()
            .replies
            .push_back(Err(ApiError::Network(reason.to_string())));
        self
    }

    pub(crate) fn sent(&self) -> Vec<HttpRequest> {
        self.script.borrow().sent.clone()
    }

    /// Record whether `loader` is lit each time a request goes out.
    pub(crate) fn watch(&self, loader: &Loader) {
        self.script.borrow_mut().watched = Some(loader.clone());
    }

    pub(crate) fn busy_while_sending(&self) -> Vec<bool> {
        self.script.borrow().busy.clone()
    }

    pub(crate) fn clear_sent(&self) {
        self.script.borrow_mut().sent.clear();
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut script = self.script.borrow_mut();
        script.sent.push(request.clone());
        if let Some(visible) = script.watched.as_ref().map(Loader::is_visible) {
            script.busy.push(visible);
        }
        script.replies.pop_front().unwrap_or_else(|| {
            Ok(HttpResponse {
                status: 200,
                body: "[]".to_string(),
            })
        })
    }
}
