use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalRequest {
    Open,
    /// Close icon or backdrop click.
    Dismiss,
    /// The hosted content finished its job.
    Close,
}

/// Single owner of the modal's open flag. Views below it only send requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModalController {
    open: bool,
    session: u64,
}

impl ModalController {
    pub fn is_open(self) -> bool {
        self.open
    }

    /// Counts openings. Hosted content keyed on it starts fresh every time
    /// the modal opens, even while the previous one is still fading out.
    pub fn session(self) -> u64 {
        self.session
    }

    /// Returns whether the flag changed.
    pub fn apply(&mut self, request: ModalRequest) -> bool {
        let next = matches!(request, ModalRequest::Open);
        if self.open == next {
            return false;
        }
        if next {
            self.session = self.session.wrapping_add(1);
        }
        debug!(?request, open = next, session = self.session, "modal state changed");
        self.open = next;
        true
    }
}
