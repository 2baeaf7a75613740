#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Mailgun accepted the message and assigned it an id.
    Queued,
    /// The response carried no message id.
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageResponse {
    pub status: Status,
    /// Mailgun message id, e.g. `<20240101000000.1.ABC@mg.example.com>`.
    pub id: Option<String>,
    /// Human-readable text returned by Mailgun (`Queued. Thank you.` on success).
    pub message: Option<String>,
}
