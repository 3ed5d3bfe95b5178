// Path -> maneuver routing
//
// The router is a pure mapping from a request path to a drivetrain call and
// a response. Matching is exact and case-sensitive once the query string is
// stripped; `/` and `/index.html` are the only aliases.

use crate::drive::{Drivetrain, gpio::OutputPin};
use crate::messages::{ErrorReport, StateReport};

/// The control page, served verbatim
const INDEX_HTML: &str = include_str!("../../assets/index.html");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    NotFound,
}

impl Status {
    pub fn reason(self) -> &'static str {
        match self {
            Status::Ok => "200 OK",
            Status::NotFound => "404 Not Found",
        }
    }
}

/// A response ready to be serialized onto the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Response {
    fn html(body: &str) -> Self {
        Self {
            status: Status::Ok,
            content_type: "text/html; charset=utf-8",
            body: body.as_bytes().to_vec(),
        }
    }

    fn json(status: Status, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type: "application/json",
            body,
        }
    }

    /// Status line, headers, blank line and body
    pub fn to_bytes(&self) -> Vec<u8> {
        let head = format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nCache-Control: no-store\r\nConnection: close\r\n\r\n",
            self.status.reason(),
            self.content_type,
        );
        let mut bytes = head.into_bytes();
        bytes.extend_from_slice(&self.body);
        bytes
    }
}

fn state_report<P: OutputPin>(drivetrain: &Drivetrain<P>) -> Result<Response, serde_json::Error> {
    let body = serde_json::to_vec(&StateReport {
        state: drivetrain.state(),
    })?;
    Ok(Response::json(Status::Ok, body))
}

/// Map a request path to a drivetrain action and a response.
///
/// Maneuver routes report the post-maneuver state, never the state from
/// before the call.
pub fn route<P: OutputPin>(
    path: &str,
    drivetrain: &mut Drivetrain<P>,
) -> Result<Response, serde_json::Error> {
    // Strip the query string before matching
    let path = match path.split_once('?') {
        Some((stripped, _)) => stripped,
        None => path,
    };

    match path {
        "/" | "/index.html" => Ok(Response::html(INDEX_HTML)),
        "/forward" => {
            drivetrain.forward();
            state_report(drivetrain)
        }
        "/backward" => {
            drivetrain.backward();
            state_report(drivetrain)
        }
        "/left" => {
            drivetrain.turn_left(true);
            state_report(drivetrain)
        }
        "/right" => {
            drivetrain.turn_right(true);
            state_report(drivetrain)
        }
        "/stop" => {
            drivetrain.stop();
            state_report(drivetrain)
        }
        "/status" => state_report(drivetrain),
        _ => {
            let body = serde_json::to_vec(&ErrorReport { error: "not found" })?;
            Ok(Response::json(Status::NotFound, body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drive::gpio::LoopbackPin;
    use crate::drive::{Drivetrain, Wheel};
    use crate::messages::MotionState;

    fn drivetrain() -> Drivetrain<LoopbackPin> {
        let mut pin = 0u8;
        let mut wheel = || {
            let a = LoopbackPin::new(pin);
            let b = LoopbackPin::new(pin + 1);
            pin += 2;
            Wheel::new(a, b, false)
        };
        Drivetrain::new(wheel(), wheel(), wheel(), wheel())
    }

    fn reported_state(response: &Response) -> MotionState {
        let report: StateReport = serde_json::from_slice(&response.body).unwrap();
        report.state
    }

    #[test]
    fn maneuver_routes_report_post_maneuver_state() {
        let mut drivetrain = drivetrain();
        let cases = [
            ("/forward", MotionState::Forward),
            ("/backward", MotionState::Backward),
            ("/left", MotionState::TurningLeft),
            ("/right", MotionState::TurningRight),
            ("/stop", MotionState::Stopped),
        ];
        for (path, expected) in cases {
            let response = route(path, &mut drivetrain).unwrap();
            assert_eq!(response.status, Status::Ok);
            assert_eq!(response.content_type, "application/json");
            assert_eq!(reported_state(&response), expected, "path {}", path);
            assert_eq!(drivetrain.state(), expected);
        }
    }

    #[test]
    fn status_matches_last_maneuver() {
        let mut drivetrain = drivetrain();
        let from_maneuver = route("/left", &mut drivetrain).unwrap();
        let from_status = route("/status", &mut drivetrain).unwrap();
        assert_eq!(
            reported_state(&from_status),
            reported_state(&from_maneuver)
        );
    }

    #[test]
    fn root_aliases_serve_the_control_page() {
        let mut drivetrain = drivetrain();
        for path in ["/", "/index.html"] {
            let response = route(path, &mut drivetrain).unwrap();
            assert_eq!(response.status, Status::Ok);
            assert_eq!(response.content_type, "text/html; charset=utf-8");
            assert_eq!(response.body, INDEX_HTML.as_bytes());
        }
        // Serving the page commands nothing
        assert_eq!(drivetrain.state(), MotionState::Stopped);
    }

    #[test]
    fn query_string_is_stripped_before_matching() {
        let mut drivetrain = drivetrain();
        let plain = route("/forward", &mut drivetrain).unwrap();
        let with_query = route("/forward?x=1", &mut drivetrain).unwrap();
        assert_eq!(with_query, plain);
    }

    #[test]
    fn unknown_path_is_404_and_leaves_state_alone() {
        let mut drivetrain = drivetrain();
        route("/forward", &mut drivetrain).unwrap();

        let response = route("/xyz", &mut drivetrain).unwrap();
        assert_eq!(response.status, Status::NotFound);
        assert_eq!(response.body, br#"{"error":"not found"}"#);
        assert_eq!(drivetrain.state(), MotionState::Forward);
    }

    #[test]
    fn matching_is_case_sensitive_and_exact() {
        let mut drivetrain = drivetrain();
        for path in ["/Forward", "/forward/", "/forwardx"] {
            let response = route(path, &mut drivetrain).unwrap();
            assert_eq!(response.status, Status::NotFound, "path {}", path);
        }
        assert_eq!(drivetrain.state(), MotionState::Stopped);
    }

    #[test]
    fn response_bytes_carry_required_headers() {
        let mut drivetrain = drivetrain();
        let bytes = route("/status", &mut drivetrain).unwrap().to_bytes();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Type: application/json\r\n"));
        assert!(text.contains("Cache-Control: no-store\r\n"));
        assert!(text.contains("Connection: close\r\n"));
        assert!(text.ends_with("\r\n\r\n{\"state\":\"STOP\"}"));
    }

    #[test]
    fn not_found_status_line() {
        let mut drivetrain = drivetrain();
        let bytes = route("/nope", &mut drivetrain).unwrap().to_bytes();
        assert!(bytes.starts_with(b"HTTP/1.1 404 Not Found\r\n"));
    }
}
