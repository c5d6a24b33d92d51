// Shared-secret access gate for the reporting UI.
//
// The gate is passed to the front end explicitly; nothing in the data
// pipeline consults it.

/// Where a session stands with respect to the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No attempt yet.
    Locked,
    /// Last attempt was wrong; another attempt is allowed.
    Rejected,
    Granted,
}

/// One user's access state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    state: AuthState,
}

impl AuthSession {
    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn is_granted(&self) -> bool {
        self.state == AuthState::Granted
    }
}

/// Holds the configured team password, if any.
#[derive(Clone, Default)]
pub struct AccessGate {
    secret: Option<String>,
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate")
            .field("protected", &self.secret.is_some())
            .finish()
    }
}

impl AccessGate {
    pub fn new(secret: Option<String>) -> Self {
        AccessGate { secret }
    }

    /// A gate with no password: every session starts granted.
    pub fn open() -> Self {
        AccessGate { secret: None }
    }

    pub fn is_protected(&self) -> bool {
        self.secret.is_some()
    }

    pub fn start_session(&self) -> AuthSession {
        let state = if self.is_protected() {
            AuthState::Locked
        } else {
            AuthState::Granted
        };
        AuthSession { state }
    }

    /// Check a password attempt and update the session. A granted session
    /// stays granted.
    pub fn attempt(&self, session: &mut AuthSession, input: &str) -> AuthState {
        if session.state == AuthState::Granted {
            return session.state;
        }
        session.state = match &self.secret {
            None => AuthState::Granted,
            Some(secret) if secrets_match(secret, input) => AuthState::Granted,
            Some(_) => AuthState::Rejected,
        };
        session.state
    }
}

/// Compares every byte regardless of where the first mismatch is.
fn secrets_match(expected: &str, input: &str) -> bool {
    let (a, b) = (expected.as_bytes(), input.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_gate_grants_immediately() {
        let gate = AccessGate::open();
        let session = gate.start_session();
        assert!(session.is_granted());
        assert!(!gate.is_protected());
    }

    #[test]
    fn protected_gate_starts_locked() {
        let gate = AccessGate::new(Some("pitch123".into()));
        let session = gate.start_session();
        assert_eq!(session.state(), AuthState::Locked);
    }

    #[test]
    fn wrong_then_right_password() {
        let gate = AccessGate::new(Some("pitch123".into()));
        let mut session = gate.start_session();

        assert_eq!(gate.attempt(&mut session, "pitch124"), AuthState::Rejected);
        assert_eq!(gate.attempt(&mut session, ""), AuthState::Rejected);
        assert_eq!(gate.attempt(&mut session, "Pitch123"), AuthState::Rejected);
        assert_eq!(gate.attempt(&mut session, "pitch123"), AuthState::Granted);
        assert!(session.is_granted());

        // Further attempts don't revoke access.
        assert_eq!(gate.attempt(&mut session, "wrong"), AuthState::Granted);
    }

    #[test]
    fn sessions_are_independent() {
        let gate = AccessGate::new(Some("s3cret".into()));
        let mut a = gate.start_session();
        let b = gate.start_session();
        gate.attempt(&mut a, "s3cret");
        assert!(a.is_granted());
        assert!(!b.is_granted());
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let gate = AccessGate::new(Some("s3cret".into()));
        let dbg = format!("{gate:?}");
        assert!(!dbg.contains("s3cret"));
    }
}
