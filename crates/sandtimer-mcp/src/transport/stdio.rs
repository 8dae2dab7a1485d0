//! Stdio session: reads framed JSON-RPC from an input stream, writes framed
//! responses to an output stream.

use std::io::{BufRead, Write};

use sandtimer::json::{parse, Value};

use crate::protocol::{validate_message, ProtocolHandler};
use crate::types::{JsonRpcError, McpError};

use super::framing::{self, FramingError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    ShuttingDown,
}

/// One client session over a pair of byte streams.
pub struct Session<R, W> {
    handler: ProtocolHandler,
    reader: R,
    writer: W,
    state: SessionState,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(handler: ProtocolHandler, reader: R, writer: W) -> Self {
        Self {
            handler,
            reader,
            writer,
            state: SessionState::Running,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn handler(&self) -> &ProtocolHandler {
        &self.handler
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Run until end of input or an answered `shutdown`.
    ///
    /// Only I/O failures on the streams end the session with an error.
    pub fn run(&mut self) -> Result<(), FramingError> {
        tracing::info!("Stdio transport started");

        while self.state == SessionState::Running {
            match framing::read_message(&mut self.reader) {
                Ok(Some(payload)) => self.process(&payload)?,
                Ok(None) => {
                    tracing::info!("EOF on input, shutting down");
                    self.state = SessionState::ShuttingDown;
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => tracing::warn!(code = e.code(), "Failed to read message: {e}"),
            }
        }

        tracing::info!("Session ended");
        Ok(())
    }

    fn process(&mut self, payload: &[u8]) -> Result<(), FramingError> {
        let doc = match parse(payload) {
            Ok(doc) => doc,
            Err(e) => {
                let err = McpError::from(e);
                tracing::warn!(code = err.code(), "Dropping unparseable message: {err}");
                return Ok(());
            }
        };

        let message = match validate_message(&doc) {
            Ok(message) => message,
            Err(e) => {
                match doc.get("id") {
                    Some(id) => {
                        tracing::warn!(id = ?id, "Rejecting invalid request: {e}");
                        let response = JsonRpcError::new(id.clone(), e.to_error_object());
                        self.send(response.to_value())?;
                    }
                    None => tracing::warn!("Dropping invalid message: {e}"),
                }
                return Ok(());
            }
        };

        if let Some(response) = self.handler.handle_message(message) {
            self.send(response)?;
        }

        if self.handler.is_shutdown_requested() {
            self.state = SessionState::ShuttingDown;
        }
        Ok(())
    }

    /// Write a response; one that cannot be encoded is replaced by an
    /// internal error for the same id.
    fn send(&mut self, response: Value) -> Result<(), FramingError> {
        match framing::write_message(&mut self.writer, &response) {
            Err(FramingError::Encode(e)) => {
                tracing::error!("Failed to encode response: {e}");
                let fallback = JsonRpcError::new(
                    response["id"].clone(),
                    McpError::InternalError(e.to_string()).to_error_object(),
                );
                framing::write_message(&mut self.writer, &fallback.to_value())
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use sandtimer::{TimerCommand, TimerResult, TimerService};

    struct Unused;

    impl TimerService for Unused {
        fn send(&self, _command: &TimerCommand) -> TimerResult<()> {
            Ok(())
        }
    }

    fn frame(body: &str) -> String {
        format!("Content-Length: {}\r\n\r\n{body}", body.len())
    }

    fn session(input: String) -> Session<Cursor<Vec<u8>>, Vec<u8>> {
        Session::new(
            ProtocolHandler::new(Box::new(Unused)),
            Cursor::new(input.into_bytes()),
            Vec::new(),
        )
    }

    #[test]
    fn test_eof_ends_session() {
        let mut s = session(String::new());
        s.run().unwrap();
        assert_eq!(s.state(), SessionState::ShuttingDown);
        assert!(s.writer().is_empty());
    }

    #[test]
    fn test_invalid_request_with_id_is_answered() {
        let mut s = session(frame(r#"{"jsonrpc":"2.0","id":4,"params":{}}"#));
        s.run().unwrap();

        let out = s.into_writer();
        let payload = framing::read_message(&mut Cursor::new(out)).unwrap().unwrap();
        let resp = parse(&payload).unwrap();
        assert_eq!(resp["id"], 4);
        assert_eq!(resp["error"]["code"], -32600);
    }

    #[test]
    fn test_unencodable_result_becomes_internal_error() {
        let mut s = session(String::new());
        let response = sandtimer::object! {
            "jsonrpc" => "2.0",
            "id" => 1,
            "result" => f64::NAN,
        };
        s.send(response).unwrap();

        let mut out = Cursor::new(s.into_writer());
        let payload = framing::read_message(&mut out).unwrap().unwrap();
        assert!(framing::read_message(&mut out).unwrap().is_none());

        let resp = parse(&payload).unwrap();
        assert_eq!(resp["id"], 1);
        assert!(resp.get("result").is_none());
        assert_eq!(resp["error"]["code"], -32603);
        assert_eq!(resp["error"]["message"], "Internal error");
        assert_eq!(resp["error"]["data"]["message"], "An unexpected error occurred.");
    }

    #[test]
    fn test_invalid_message_without_id_is_dropped() {
        let mut s = session(frame("[1,2]") + &frame(r#"{"method":7}"#));
        s.run().unwrap();
        assert!(s.writer().is_empty());
    }
}
