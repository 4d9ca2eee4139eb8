//! Session ticket application data and resumption hooks.

/// Application bytes riding inside a session ticket.
///
/// The payload latches: it can be written exactly once while the ticket
/// is minted, and later writes are refused so a second callback cannot
/// overwrite a sealed ticket.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionTicketAppData {
    data: Option<Vec<u8>>,
}

impl SessionTicketAppData {
    /// Fresh payload with nothing stored.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` if nothing has been stored yet.
    ///
    /// Returns true when the payload was accepted.
    pub fn set(&mut self, data: &[u8]) -> bool {
        if self.data.is_some() {
            return false;
        }
        self.data = Some(data.to_vec());
        true
    }

    /// The stored payload, if any.
    pub fn get(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }
}

/// Verdict on a ticket presented for resumption.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TicketAction {
    /// Resume with the ticket as-is.
    Use,
    /// Resume, and mint a replacement ticket.
    UseRenew,
    /// Decline resumption.
    Ignore,
    /// Decline resumption, but mint a fresh ticket.
    IgnoreRenew,
}

/// Endpoint hooks into ticket issuance and redemption.
pub trait SessionTicketHooks {
    /// A ticket is being minted; fill in the application payload.
    fn on_new_ticket(&mut self, app_data: &mut SessionTicketAppData);

    /// A client presented a ticket carrying `app_data`.
    fn on_resume_ticket(&mut self, app_data: &SessionTicketAppData) -> TicketAction;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_latches_on_first_set() {
        let mut app_data = SessionTicketAppData::new();
        assert_eq!(app_data.get(), None);

        assert!(app_data.set(b"transport params"));
        assert!(!app_data.set(b"overwrite attempt"));
        assert_eq!(app_data.get(), Some(&b"transport params"[..]));
    }

    #[test]
    fn test_empty_payload_still_latches() {
        let mut app_data = SessionTicketAppData::new();
        assert!(app_data.set(b""));
        assert!(!app_data.set(b"late"));
        assert_eq!(app_data.get(), Some(&b""[..]));
    }

    /// Resumes only tickets that carry the payload it wrote at issuance.
    struct EchoPolicy {
        stamp: Vec<u8>,
    }

    impl SessionTicketHooks for EchoPolicy {
        fn on_new_ticket(&mut self, app_data: &mut SessionTicketAppData) {
            app_data.set(&self.stamp);
        }

        fn on_resume_ticket(&mut self, app_data: &SessionTicketAppData) -> TicketAction {
            match app_data.get() {
                Some(data) if data == self.stamp.as_slice() => TicketAction::UseRenew,
                _ => TicketAction::IgnoreRenew,
            }
        }
    }

    #[test]
    fn test_hooks_round_trip() {
        let mut policy = EchoPolicy { stamp: b"epoch-7".to_vec() };

        let mut minted = SessionTicketAppData::new();
        policy.on_new_ticket(&mut minted);
        assert_eq!(policy.on_resume_ticket(&minted), TicketAction::UseRenew);

        let mut foreign = SessionTicketAppData::new();
        foreign.set(b"epoch-3");
        assert_eq!(policy.on_resume_ticket(&foreign), TicketAction::IgnoreRenew);

        let blank = SessionTicketAppData::new();
        assert_eq!(policy.on_resume_ticket(&blank), TicketAction::IgnoreRenew);
    }
}
