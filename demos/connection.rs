//! A connection automaton over a simulated socket.
//!
//! Run with `cargo run --example connection`. Set `RUST_LOG=statecraft=debug`
//! to see every transition.

use statecraft::logging::{self, LogLevel, LogTag, LoggerConfig};
use statecraft::{
    events, ContextBuilder, ErrorCode, FsmError, State, StateBase, StateKey, StateMachineContext,
};
use std::cell::Cell;
use std::rc::Rc;

events! {
    pub struct ConnectionEvents {
        CONNECT,
        DISCONNECT,
        ERROR,
    }
}

const CONNECTION_FAILURE: ErrorCode = ErrorCode::custom("CONNECTION_FAILURE");

/// Socket that fails every `fail_every`th call.
struct FlakySocket {
    calls: Cell<u32>,
    fail_every: u32,
}

impl FlakySocket {
    fn call(&self, op: &str) -> Result<i32, String> {
        let n = self.calls.get() + 1;
        self.calls.set(n);
        if n % self.fail_every == 0 {
            return Err(format!("{op}: connection reset by peer"));
        }
        println!("socket: {op}");
        Ok(n as i32)
    }
}

trait ConnectionState: State {
    fn connect(&self) -> Result<(), FsmError>;
    fn disconnect(&self) -> Result<(), FsmError>;
    fn send(&self, value: i32) -> Result<(), FsmError>;
}

struct Connected {
    base: StateBase,
    socket: Rc<FlakySocket>,
}

impl State for Connected {
    fn base(&self) -> &StateBase {
        &self.base
    }

    fn name(&self) -> &str {
        "Connected"
    }
}

impl ConnectionState for Connected {
    fn connect(&self) -> Result<(), FsmError> {
        Ok(())
    }

    fn disconnect(&self) -> Result<(), FsmError> {
        let result = self.socket.call("disconnect");
        self.cast_event(&ConnectionEvents::DISCONNECT)?;
        result
            .map(|_| ())
            .map_err(|cause| FsmError::from_cause(CONNECTION_FAILURE, "disconnect", "Connected", &cause))
    }

    fn send(&self, value: i32) -> Result<(), FsmError> {
        match self.socket.call(&format!("send {value}")) {
            Ok(_) => Ok(()),
            Err(cause) => {
                self.cast_event(&ConnectionEvents::ERROR)?;
                Err(FsmError::from_cause(CONNECTION_FAILURE, "send", "Connected", &cause))
            }
        }
    }
}

struct Disconnected {
    base: StateBase,
    socket: Rc<FlakySocket>,
}

impl State for Disconnected {
    fn base(&self) -> &StateBase {
        &self.base
    }

    fn name(&self) -> &str {
        "Disconnected"
    }
}

impl ConnectionState for Disconnected {
    fn connect(&self) -> Result<(), FsmError> {
        match self.socket.call("connect") {
            Ok(_) => self.cast_event(&ConnectionEvents::CONNECT),
            Err(cause) => {
                self.cast_event(&ConnectionEvents::ERROR)?;
                Err(FsmError::from_cause(CONNECTION_FAILURE, "connect", "Disconnected", &cause))
            }
        }
    }

    fn disconnect(&self) -> Result<(), FsmError> {
        Ok(())
    }

    fn send(&self, _value: i32) -> Result<(), FsmError> {
        Err(FsmError::new(
            CONNECTION_FAILURE,
            "send",
            "Disconnected",
            "Connection is Closed",
        ))
    }
}

struct Connection {
    context: StateMachineContext<dyn ConnectionState>,
    connected: StateKey,
}

impl Connection {
    fn open(socket: Rc<FlakySocket>) -> Result<Self, FsmError> {
        let mut builder = ContextBuilder::<dyn ConnectionState>::new("connection");
        builder.record_history();

        let connected = builder.register(Box::new(Connected {
            base: builder.state_base()?,
            socket: Rc::clone(&socket),
        }));
        let disconnected = builder.register(Box::new(Disconnected {
            base: builder.state_base()?,
            socket,
        }));

        builder
            .add_transition(&disconnected, &ConnectionEvents::CONNECT, &connected)
            .add_transition(&connected, &ConnectionEvents::DISCONNECT, &disconnected)
            .add_transition(&connected, &ConnectionEvents::ERROR, &disconnected)
            .initial(&disconnected);

        Ok(Self {
            context: builder.build()?,
            connected,
        })
    }

    fn ensure_connected(&self) -> Result<(), FsmError> {
        if !self.context.is_in(&self.connected) {
            self.context.current().connect()?;
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_console("statecraft=info")?;
    logging::configure(LoggerConfig::from_env().with_user("demo"));

    let socket = Rc::new(FlakySocket {
        calls: Cell::new(0),
        fail_every: 4,
    });
    let connection = Connection::open(socket)?;

    for value in [12345, 23456, 34567, 45678, 56789] {
        if let Err(error) = connection.ensure_connected() {
            logging::log(LogLevel::Warning, &error.to_string(), LogTag::Named("CONNECT"))?;
            continue;
        }
        if let Err(error) = connection.context.current().send(value) {
            logging::log(LogLevel::Error, &error.to_string(), LogTag::Named("SEND"))?;
        }
        println!("state: {}", connection.context.current().name());
    }

    if let Err(error) = connection.context.current().disconnect() {
        logging::log(LogLevel::Error, &error.to_string(), LogTag::Named("DISCONNECT"))?;
    }

    if let Some(history) = connection.context.history() {
        let path: Vec<&str> = history.get_path().into_iter().map(StateKey::name).collect();
        logging::log(
            LogLevel::Info,
            &format!("path: {}", path.join(" -> ")),
            LogTag::Assert,
        )?;
    }

    Ok(())
}
