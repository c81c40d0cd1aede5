//! In-process stand-in for the contrast service.

use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use tiny_http::{Header, Response, Server, StatusCode};
use url::Url;

/// Serves canned responses in order, one per request, then stops.
pub(crate) struct MockService {
    pub url: Url,
    handle: JoinHandle<Vec<String>>,
}

impl MockService {
    pub fn start(responses: Vec<(u16, &'static str)>) -> Self {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let url = Url::parse(&format!("http://{addr}/")).unwrap();

        let handle = thread::spawn(move || {
            let mut bodies = Vec::new();
            for (status, body) in responses {
                let mut request = server.recv().unwrap();
                let mut received = String::new();
                request.as_reader().read_to_string(&mut received).unwrap();
                bodies.push(received);

                let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                    .unwrap();
                let response = Response::from_string(body)
                    .with_status_code(StatusCode(status))
                    .with_header(header);
                request.respond(response).unwrap();
            }
            bodies
        });

        Self { url, handle }
    }

    /// Request bodies received so far (waits for all canned responses).
    pub fn finish(self) -> Vec<String> {
        self.handle.join().unwrap()
    }
}

/// URL on which nothing is listening.
pub(crate) fn dead_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/")).unwrap()
}
