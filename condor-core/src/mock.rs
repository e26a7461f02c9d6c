//! In-memory backend double.
//!
//! Responses are scripted per `(method, path)`. When several responses are queued for
//! the same route they are served in order and the last one keeps answering. Unscripted
//! routes answer 404. Every request is recorded for later assertions.

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Method, Transport};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};

#[derive(Debug, Clone)]
enum Scripted {
    Reply(HttpResponse),
    Fail(String),
}

#[derive(Debug, Default)]
pub struct MockBackend {
    routes: RefCell<BTreeMap<(String, String), VecDeque<Scripted>>>,
    log: RefCell<Vec<HttpRequest>>,
}

impl MockBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) {
        self.routes
            .borrow_mut()
            .entry((method.as_str().to_string(), path.to_string()))
            .or_default()
            .push_back(scripted);
    }

    /// Queue a raw response for `method path`.
    pub fn on(&self, method: Method, path: &str, status: u16, body: &str) {
        self.push(method, path, Scripted::Reply(HttpResponse::new(status, body)));
    }

    /// Queue a JSON response for `method path`.
    pub fn on_json<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        status: u16,
        body: &T,
    ) {
        let encoded = serde_json::to_string(body).unwrap_or_default();
        self.on(method, path, status, &encoded);
    }

    /// Queue a transport failure for `method path`.
    pub fn fail_with(&self, method: Method, path: &str, reason: &str) {
        self.push(method, path, Scripted::Fail(reason.to_string()));
    }

    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.log.borrow().clone()
    }

    #[must_use]
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.log.borrow().last().cloned()
    }

    /// Number of recorded calls to `method path`.
    #[must_use]
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|req| req.method == method && req.path() == path)
            .count()
    }

    #[must_use]
    pub fn called(&self, method: Method, path: &str) -> bool {
        self.count(method, path) > 0
    }

    fn next_for(&self, request: &HttpRequest) -> Option<Scripted> {
        let key = (request.method.as_str().to_string(), request.path().to_string());
        let mut routes = self.routes.borrow_mut();
        let queue = routes.get_mut(&key)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for MockBackend {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let scripted = self.next_for(&request);
        self.log.borrow_mut().push(request);
        match scripted {
            Some(Scripted::Reply(response)) => Ok(response),
            Some(Scripted::Fail(reason)) => Err(ApiError::Transport(reason)),
            None => Ok(HttpResponse::new(404, "")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    fn request(method: Method, url: &str) -> HttpRequest {
        HttpRequest {
            method,
            url: url.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[test]
    fn serves_queue_in_order_then_sticks_to_last() {
        let mock = MockBackend::new();
        mock.on(Method::Get, "/x", 500, "");
        mock.on(Method::Get, "/x", 200, "ok");

        let first = block_on(mock.send(request(Method::Get, "http://h/x"))).expect("first");
        let second = block_on(mock.send(request(Method::Get, "http://h/x?a=1"))).expect("second");
        let third = block_on(mock.send(request(Method::Get, "http://h/x"))).expect("third");
        assert_eq!(first.status, 500);
        assert_eq!(second.body, "ok");
        assert_eq!(third.body, "ok");
        assert_eq!(mock.count(Method::Get, "/x"), 3);
    }

    #[test]
    fn unscripted_routes_answer_not_found() {
        let mock = MockBackend::new();
        let response = block_on(mock.send(request(Method::Delete, "http://h/y"))).expect("reply");
        assert_eq!(response.status, 404);
        assert!(mock.called(Method::Delete, "/y"));
        assert!(!mock.called(Method::Get, "/y"));
    }
}
