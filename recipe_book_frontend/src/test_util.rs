use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::api::{ApiRequest, ApiResponse, Error, Method, Transport};

type Handler = Box<dyn Fn(&ApiRequest) -> Result<ApiResponse, Error>>;

/// In-memory transport that records every request. Responses come from the
/// handler, or from a held channel for requests registered with [`hold`].
///
/// [`hold`]: RecordingTransport::hold
pub struct RecordingTransport {
    requests: RefCell<Vec<ApiRequest>>,
    held: RefCell<HashMap<(Method, String), oneshot::Receiver<ApiResponse>>>,
    handler: Handler,
}

impl RecordingTransport {
    pub fn new(
        handler: impl Fn(&ApiRequest) -> Result<ApiResponse, Error> + 'static,
    ) -> Rc<Self> {
        Rc::new(RecordingTransport {
            requests: RefCell::new(vec![]),
            held: RefCell::new(HashMap::new()),
            handler: Box::new(handler),
        })
    }

    /// The next request to `method path` waits until the returned sender
    /// fires.
    pub fn hold(&self, method: Method, path: &str) -> oneshot::Sender<ApiResponse> {
        let (sender, receiver) = oneshot::channel();
        self.held
            .borrow_mut()
            .insert((method, path.to_string()), receiver);
        sender
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|request| request.method == method && request.path == path)
            .count()
    }
}

#[async_trait(?Send)]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error> {
        self.requests.borrow_mut().push(request.clone());
        let held = self
            .held
            .borrow_mut()
            .remove(&(request.method, request.path.clone()));
        match held {
            Some(receiver) => receiver
                .await
                .map_err(|_| Error::Request(gloo_net::Error::GlooError("cancelled".into()))),
            None => (self.handler)(&request),
        }
    }
}
