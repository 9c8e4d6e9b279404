/// Shared classroom passphrase. Deliberately a weak, plaintext gate: the data
/// behind it is a single class's self-assessments, and the threat model is a
/// curious student, not an attacker. No hashing, no rate limiting.
const TEACHER_PASSWORD: &str = "Gurri1234";

/// State of the teacher access prompt and the dashboard it unlocks.
#[derive(Debug, Default)]
pub struct TeacherGate {
    pub input: String,
    prompt_open: bool,
    error: bool,
    unlocked: bool,
}

impl TeacherGate {
    pub fn prompt_open(&self) -> bool {
        self.prompt_open
    }

    pub fn has_error(&self) -> bool {
        self.error
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn open_prompt(&mut self) {
        self.prompt_open = true;
        self.input.clear();
        self.error = false;
    }

    pub fn cancel(&mut self) {
        self.prompt_open = false;
        self.input.clear();
        self.error = false;
    }

    /// Compares the entered candidate against the shared secret. A match
    /// unlocks the dashboard and closes the prompt; anything else sets the
    /// error flag and leaves the dashboard locked.
    pub fn submit(&mut self) {
        if self.input == TEACHER_PASSWORD {
            self.unlocked = true;
            self.prompt_open = false;
            self.input.clear();
            self.error = false;
        } else {
            self.error = true;
        }
    }

    /// Any edit of the password field clears a pending error.
    pub fn input_edited(&mut self) {
        self.error = false;
    }

    /// Closes the dashboard; the next visit goes through the prompt again.
    pub fn lock(&mut self) {
        self.unlocked = false;
    }
}

#[cfg(test)]
mod tests {
    use super::TeacherGate;

    #[test]
    fn correct_passphrase_unlocks_and_closes_the_prompt() {
        let mut gate = TeacherGate::default();
        gate.open_prompt();
        gate.input = "Gurri1234".to_string();
        gate.submit();
        assert!(gate.is_unlocked());
        assert!(!gate.prompt_open());
        assert!(!gate.has_error());
    }

    #[test]
    fn wrong_passphrase_stays_locked_with_a_visible_error() {
        let mut gate = TeacherGate::default();
        gate.open_prompt();
        gate.input = "gurri1234".to_string();
        gate.submit();
        assert!(!gate.is_unlocked());
        assert!(gate.prompt_open());
        assert!(gate.has_error());
    }

    #[test]
    fn editing_the_input_clears_the_error_without_resubmitting() {
        let mut gate = TeacherGate::default();
        gate.open_prompt();
        gate.input = "nope".to_string();
        gate.submit();
        assert!(gate.has_error());

        gate.input.push('!');
        gate.input_edited();
        assert!(!gate.has_error());
        assert!(!gate.is_unlocked());
    }

    #[test]
    fn locking_requires_the_prompt_again() {
        let mut gate = TeacherGate::default();
        gate.open_prompt();
        gate.input = "Gurri1234".to_string();
        gate.submit();
        gate.lock();
        assert!(!gate.is_unlocked());
    }
}
