#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IpcError {
    #[error("channel '{channel}' is closed")]
    Closed { channel: &'static str },

    #[error("channel '{channel}' is full")]
    Full { channel: &'static str },

    #[error("no reply on '{channel}'")]
    NoReply { channel: &'static str },
}
